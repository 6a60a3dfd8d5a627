//! Identity and time value objects shared by every record type, plus the
//! `Record` trait that ties an entity to its schema and merge rules.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use uuid::Uuid;

use super::schema::{Mode, ValidationError};

// =============================================================================
// Value Objects - Newtypes
// =============================================================================

/// Unique identifier for a persisted record.
///
/// Identifiers are time-ordered UUID v7 values; they are never reused because
/// a fresh one is generated for every create.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Creates a `RecordId` from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Generates a new time-ordered identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }

    /// Parses an identifier from its textual form.
    ///
    /// Returns `None` for anything that is not a UUID; such a value cannot
    /// name a stored record.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Uuid::parse_str(value.trim()).ok().map(Self)
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// A timestamp wrapper for `DateTime<Utc>`, serialized as RFC 3339.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a `Timestamp` from a `DateTime<Utc>`.
    #[must_use]
    pub const fn from_datetime(datetime: DateTime<Utc>) -> Self {
        Self(datetime)
    }

    /// Returns the inner `DateTime<Utc>`.
    #[must_use]
    pub const fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the current time as a `Timestamp`.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0.to_rfc3339())
    }
}

// =============================================================================
// Record Trait
// =============================================================================

/// A persisted document type managed by the resource service.
///
/// Implementors supply three things: how raw input is validated into a
/// patch, how a patch is merged into an existing record, and the order in
/// which records are listed. Creation is expressed as applying a
/// create-mode patch to a record holding the schema defaults, so both paths
/// share one set of rules.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Unvalidated field set as received from a caller.
    type Input: Send + 'static;

    /// Validated set of field changes. Never carries `id` or `createdAt`.
    type Patch: Clone + Send + Sync + 'static;

    /// Human-readable entity name, e.g. `"Todo"`.
    const KIND: &'static str;

    /// Storage collection (table) name.
    const COLLECTION: &'static str;

    fn id(&self) -> &RecordId;

    fn created_at(&self) -> &Timestamp;

    /// Validates `input` against the entity schema.
    ///
    /// # Errors
    ///
    /// Returns every failing field at once.
    fn validate(input: Self::Input, mode: Mode) -> Result<Self::Patch, ValidationError>;

    /// Builds a new record with schema defaults, then applies `patch`.
    fn materialize(id: RecordId, created_at: Timestamp, patch: &Self::Patch) -> Self;

    /// Returns a copy of `self` with every field named in `patch` overwritten.
    #[must_use]
    fn apply(self, patch: &Self::Patch) -> Self;

    /// Total order used for listings.
    fn listing_order(&self, other: &Self) -> Ordering;
}

/// Sorts records in place by their listing order.
pub fn sort_for_listing<R: Record>(records: &mut [R]) {
    records.sort_by(R::listing_order);
}
