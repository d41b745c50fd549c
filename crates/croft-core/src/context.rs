//! # Validation Context
//!
//! The ancillary tuple accompanying a record into the engine: entity kind,
//! operation kind, the previous stored version on updates, caller
//! identifiers, and the evaluation timestamp. The record itself travels as
//! a separate argument so that batch validation can reuse one context
//! across rows.
//!
//! Custom rules receive the context read-only; the shipped rule set uses
//! `entity_kind` (dispatch) and `timestamp` (due-date arithmetic), while
//! `operation_kind`, `previous_record`, `user_id`, and `farm_id` exist for
//! rule authors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::{EntityKind, OperationKind};
use crate::record::Record;

/// Everything the engine knows about a validation call beyond the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationContext {
    /// Which entity's rule set applies.
    pub entity_kind: EntityKind,
    /// The write path this call sits on.
    pub operation_kind: OperationKind,
    /// The stored version being replaced, on updates.
    pub previous_record: Option<Record>,
    /// The acting user, when known.
    pub user_id: Option<Uuid>,
    /// The tenant farm, when known.
    pub farm_id: Option<Uuid>,
    /// The instant rules evaluate against (due dates, freshness).
    pub timestamp: DateTime<Utc>,
}

impl ValidationContext {
    /// Create a context for the given kind and operation, timestamped now.
    pub fn new(entity_kind: EntityKind, operation_kind: OperationKind) -> Self {
        Self {
            entity_kind,
            operation_kind,
            previous_record: None,
            user_id: None,
            farm_id: None,
            timestamp: Utc::now(),
        }
    }

    /// Attach the previous stored version of the record.
    pub fn with_previous_record(mut self, record: Record) -> Self {
        self.previous_record = Some(record);
        self
    }

    /// Attach the acting user.
    pub fn with_user(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Attach the tenant farm.
    pub fn with_farm(mut self, farm_id: Uuid) -> Self {
        self.farm_id = Some(farm_id);
        self
    }

    /// Pin the evaluation timestamp. Tests use this for deterministic
    /// due-date arithmetic and cache keys.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}
