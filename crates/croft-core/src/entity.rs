//! # Entity and Operation Taxonomies — Single Source of Truth
//!
//! Defines the `EntityKind` enum with all seven record types the farm
//! application manages, and the `OperationKind` enum naming the write path
//! a validation call sits on. These are the ONE definition used across the
//! stack: every `match` on `EntityKind` must be exhaustive, so adding a
//! kind forces every rule table and every scorer to handle it at compile
//! time. There is no string-keyed dispatch and no fallback-to-default
//! branch anywhere.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CroftError;

/// All record types the validation engine knows how to validate.
///
/// The kind selects which field rules and custom rules apply. Wire names
/// are lowercase and match the serde serialization format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Livestock record (species, age, weight, health status).
    Animal,
    /// Planted crop record (type, planting and harvest dates, area).
    Crop,
    /// Work task record (assignee, due date, priority).
    Task,
    /// Stock item record (quantity, minimum stock, unit price).
    Inventory,
    /// Farm profile record (location, size, type).
    Farm,
    /// Application user record (email, role, active flag).
    User,
    /// Weather observation record (temperature, condition, humidity).
    Weather,
}

/// Total number of entity kinds. Used for compile-time assertions.
pub const ENTITY_KIND_COUNT: usize = 7;

impl EntityKind {
    /// Returns all seven entity kinds in canonical order.
    pub fn all_kinds() -> &'static [EntityKind] {
        &[
            Self::Animal,
            Self::Crop,
            Self::Task,
            Self::Inventory,
            Self::Farm,
            Self::User,
            Self::Weather,
        ]
    }

    /// Returns the lowercase string identifier for this kind.
    ///
    /// This must match the serde serialization format and the wire names
    /// accepted from callers.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Animal => "animal",
            Self::Crop => "crop",
            Self::Task => "task",
            Self::Inventory => "inventory",
            Self::Farm => "farm",
            Self::User => "user",
            Self::Weather => "weather",
        }
    }
}

impl FromStr for EntityKind {
    type Err = CroftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "animal" => Ok(Self::Animal),
            "crop" => Ok(Self::Crop),
            "task" => Ok(Self::Task),
            "inventory" => Ok(Self::Inventory),
            "farm" => Ok(Self::Farm),
            "user" => Ok(Self::User),
            "weather" => Ok(Self::Weather),
            other => Err(CroftError::UnknownEntityKind(other.to_string())),
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The write path a validation call sits on.
///
/// Carried in the validation context for rule authors; no shipped rule
/// currently branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// A single new record about to be inserted.
    Create,
    /// An existing record about to be overwritten.
    Update,
    /// A row parsed out of an import file.
    Import,
    /// One record of a bulk write.
    Bulk,
}

impl OperationKind {
    /// Returns the lowercase string identifier for this operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Import => "import",
            Self::Bulk => "bulk",
        }
    }
}

impl FromStr for OperationKind {
    type Err = CroftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "import" => Ok(Self::Import),
            "bulk" => Ok(Self::Bulk),
            other => Err(CroftError::UnknownOperationKind(other.to_string())),
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
