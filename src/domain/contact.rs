//! Contact domain model.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::field::FieldPatch;
use super::record::{Record, RecordId, Timestamp};
use super::schema::{FieldRule, Mode, ValidationError, Validator};

pub const NAME: FieldRule = FieldRule::required("name");
pub const EMAIL: FieldRule = FieldRule::optional("email");
pub const PHONE: FieldRule = FieldRule::optional("phone");
pub const NOTES: FieldRule = FieldRule::optional("notes");
pub const IMAGE_URL: FieldRule = FieldRule::optional("imageUrl");

/// A persisted contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: RecordId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
}

/// Raw contact fields as received from a caller.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInput {
    #[serde(default)]
    pub name: FieldPatch<String>,
    #[serde(default)]
    pub email: FieldPatch<String>,
    #[serde(default)]
    pub phone: FieldPatch<String>,
    #[serde(default)]
    pub notes: FieldPatch<String>,
    #[serde(default)]
    pub image_url: FieldPatch<String>,
}

impl ContactInput {
    /// Input carrying only a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: FieldPatch::Value(name.into()),
            ..Self::default()
        }
    }
}

/// Validated contact changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPatch {
    pub name: Option<String>,
    pub email: FieldPatch<String>,
    pub phone: FieldPatch<String>,
    pub notes: FieldPatch<String>,
    pub image_url: FieldPatch<String>,
}

impl Record for Contact {
    type Input = ContactInput;
    type Patch = ContactPatch;

    const KIND: &'static str = "Contact";
    const COLLECTION: &'static str = "contacts";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    fn validate(input: ContactInput, mode: Mode) -> Result<ContactPatch, ValidationError> {
        let mut validator = Validator::new(mode);

        let patch = ContactPatch {
            name: validator.text(&NAME, input.name).into_value(),
            email: validator.text(&EMAIL, input.email),
            phone: validator.text(&PHONE, input.phone),
            notes: validator.text(&NOTES, input.notes),
            image_url: validator.text(&IMAGE_URL, input.image_url),
        };

        validator.finish(patch)
    }

    fn materialize(id: RecordId, created_at: Timestamp, patch: &ContactPatch) -> Self {
        Self {
            id,
            name: String::new(),
            email: None,
            phone: None,
            notes: None,
            image_url: None,
            created_at,
        }
        .apply(patch)
    }

    fn apply(self, patch: &ContactPatch) -> Self {
        Self {
            name: patch.name.clone().unwrap_or(self.name),
            email: patch.email.merge_into(self.email),
            phone: patch.phone.merge_into(self.phone),
            notes: patch.notes.merge_into(self.notes),
            image_url: patch.image_url.merge_into(self.image_url),
            ..self
        }
    }

    // Byte order on name, so both backends agree regardless of collation.
    fn listing_order(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.created_at.cmp(&other.created_at))
            .then_with(|| self.id.cmp(&other.id))
    }
}
