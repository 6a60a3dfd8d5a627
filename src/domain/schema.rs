//! Declarative field rules and the single validation routine shared by the
//! create and patch paths.
//!
//! Each entity declares its fields once as [`FieldRule`] constants and its
//! enumerations as [`Choice`] types. A [`Validator`] walks the raw input in
//! either [`Mode::Create`] or [`Mode::Patch`], collecting every failure before
//! reporting, so a rejected request names all offending fields.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::field::FieldPatch;
use super::record::Timestamp;

// =============================================================================
// Errors
// =============================================================================

/// Field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Wire name of the field that failed validation.
    pub field: String,
    /// Error message for this field.
    pub message: String,
}

impl FieldError {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Input failed one or more field constraints.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", joined_messages(.errors))]
pub struct ValidationError {
    /// Field-level errors, in schema order.
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    #[must_use]
    pub const fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    /// Creates a validation error with a single field error.
    #[must_use]
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(vec![FieldError::new(field, message)])
    }

    /// Returns the offending field names.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|error| error.field.as_str())
    }

    /// Returns `true` if `field` is among the failures.
    #[must_use]
    pub fn names(&self, field: &str) -> bool {
        self.fields().any(|name| name == field)
    }
}

fn joined_messages(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|error| error.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

// =============================================================================
// Field Rules
// =============================================================================

/// Whether input is being validated for a new record or for a patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Required fields must be supplied; absent enumerations take defaults.
    Create,
    /// Only supplied fields are checked; absence means "unchanged".
    Patch,
}

/// Declaration of one field in an entity schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    /// Wire (camelCase) name.
    pub name: &'static str,
    /// Required fields may never be missing or blank on a stored record.
    pub required: bool,
}

impl FieldRule {
    #[must_use]
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
        }
    }

    #[must_use]
    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            required: false,
        }
    }
}

/// A closed enumeration field such as `status` or `priority`.
///
/// The `Default` implementation is the value applied on create when the
/// field is omitted.
pub trait Choice: Copy + Eq + Default + Send + Sync + 'static {
    /// Every admissible value, in display order.
    const VARIANTS: &'static [Self];

    /// Wire representation.
    fn as_str(self) -> &'static str;

    /// Exact, case-sensitive lookup.
    fn parse(value: &str) -> Option<Self> {
        Self::VARIANTS
            .iter()
            .copied()
            .find(|variant| variant.as_str() == value)
    }

    /// Comma-separated list of admissible values.
    fn expected() -> String {
        Self::VARIANTS
            .iter()
            .map(|variant| variant.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// =============================================================================
// Validator
// =============================================================================

/// Accumulates field errors while converting raw input into typed values.
#[derive(Debug)]
pub struct Validator {
    mode: Mode,
    errors: Vec<FieldError>,
}

impl Validator {
    #[must_use]
    pub const fn new(mode: Mode) -> Self {
        Self {
            mode,
            errors: Vec::new(),
        }
    }

    fn reject(&mut self, rule: &FieldRule, message: String) {
        self.errors.push(FieldError::new(rule.name, message));
    }

    /// Validates a text field according to `rule.required`.
    ///
    /// A required field must carry non-blank text whenever it is supplied,
    /// and must be supplied in create mode. An optional field is cleared by
    /// `null` or an empty string.
    pub fn text(&mut self, rule: &FieldRule, value: FieldPatch<String>) -> FieldPatch<String> {
        if !rule.required {
            return match value {
                FieldPatch::Value(text) if text.is_empty() => FieldPatch::Null,
                other => other,
            };
        }

        match (value, self.mode) {
            (FieldPatch::Value(text), _) if !text.trim().is_empty() => FieldPatch::Value(text),
            (FieldPatch::Absent, Mode::Patch) => FieldPatch::Absent,
            (FieldPatch::Absent | FieldPatch::Null | FieldPatch::Value(_), Mode::Create) => {
                self.reject(rule, format!("{} is required", rule.name));
                FieldPatch::Absent
            }
            (FieldPatch::Null | FieldPatch::Value(_), Mode::Patch) => {
                self.reject(rule, format!("{} cannot be empty", rule.name));
                FieldPatch::Absent
            }
        }
    }

    /// Validates an enumeration field against `C::VARIANTS`.
    ///
    /// Returns `Some` when the field should be written. Create mode fills
    /// an omitted field with `C::default()`.
    pub fn choice<C: Choice>(&mut self, rule: &FieldRule, value: FieldPatch<String>) -> Option<C> {
        match value {
            FieldPatch::Absent => match self.mode {
                Mode::Create => Some(C::default()),
                Mode::Patch => None,
            },
            FieldPatch::Null => {
                self.reject(
                    rule,
                    format!("{} cannot be null; expected one of: {}", rule.name, C::expected()),
                );
                None
            }
            FieldPatch::Value(raw) => {
                let parsed = C::parse(&raw);
                if parsed.is_none() {
                    self.reject(
                        rule,
                        format!(
                            "'{raw}' is not a valid {}; expected one of: {}",
                            rule.name,
                            C::expected()
                        ),
                    );
                }
                parsed
            }
        }
    }

    /// Validates an optional date field. An empty string clears the field.
    pub fn date(&mut self, rule: &FieldRule, value: FieldPatch<String>) -> FieldPatch<Timestamp> {
        match value {
            FieldPatch::Absent => FieldPatch::Absent,
            FieldPatch::Null => FieldPatch::Null,
            FieldPatch::Value(raw) if raw.trim().is_empty() => FieldPatch::Null,
            FieldPatch::Value(raw) => parse_date(raw.trim()).map_or_else(
                || {
                    self.reject(
                        rule,
                        format!(
                            "{} must be an RFC 3339 timestamp or a YYYY-MM-DD date",
                            rule.name
                        ),
                    );
                    FieldPatch::Absent
                },
                FieldPatch::Value,
            ),
        }
    }

    /// Yields `value` if no field failed.
    ///
    /// # Errors
    ///
    /// Returns the accumulated [`ValidationError`] otherwise.
    pub fn finish<T>(self, value: T) -> Result<T, ValidationError> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(ValidationError::new(self.errors))
        }
    }
}

/// Parses an RFC 3339 timestamp, or a calendar date as midnight UTC.
#[must_use]
pub fn parse_date(raw: &str) -> Option<Timestamp> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(Timestamp::from_datetime(datetime.with_timezone(&Utc)));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| Timestamp::from_datetime(datetime.and_utc()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const NAME: FieldRule = FieldRule::required("name");
    const NOTES: FieldRule = FieldRule::optional("notes");
    const DUE: FieldRule = FieldRule::optional("dueDate");
    const LEVEL: FieldRule = FieldRule::optional("level");

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    enum Level {
        #[default]
        Low,
        High,
    }

    impl Choice for Level {
        const VARIANTS: &'static [Self] = &[Self::Low, Self::High];

        fn as_str(self) -> &'static str {
            match self {
                Self::Low => "low",
                Self::High => "high",
            }
        }
    }

    fn text(value: &str) -> FieldPatch<String> {
        FieldPatch::Value(value.to_string())
    }

    #[rstest]
    #[case(Mode::Create, FieldPatch::Absent)]
    #[case(Mode::Create, FieldPatch::Null)]
    #[case(Mode::Create, text(""))]
    #[case(Mode::Create, text("   "))]
    #[case(Mode::Patch, FieldPatch::Null)]
    #[case(Mode::Patch, text(""))]
    fn test_required_text_rejects_missing_or_blank(
        #[case] mode: Mode,
        #[case] value: FieldPatch<String>,
    ) {
        let mut validator = Validator::new(mode);

        assert_eq!(validator.text(&NAME, value), FieldPatch::Absent);
        let error = validator.finish(()).unwrap_err();
        assert!(error.names("name"));
    }

    #[rstest]
    fn test_required_text_absent_in_patch_mode_is_untouched() {
        let mut validator = Validator::new(Mode::Patch);

        assert_eq!(validator.text(&NAME, FieldPatch::Absent), FieldPatch::Absent);
        assert!(validator.finish(()).is_ok());
    }

    #[rstest]
    fn test_required_text_keeps_value_verbatim() {
        let mut validator = Validator::new(Mode::Create);

        assert_eq!(validator.text(&NAME, text(" Ada ")), text(" Ada "));
    }

    #[rstest]
    #[case(Mode::Create, text(""), FieldPatch::Null)]
    #[case(Mode::Patch, text(""), FieldPatch::Null)]
    #[case(Mode::Patch, FieldPatch::Null, FieldPatch::Null)]
    #[case(Mode::Create, FieldPatch::Absent, FieldPatch::Absent)]
    #[case(Mode::Patch, text("   "), text("   "))]
    #[case(Mode::Patch, text("x"), text("x"))]
    fn test_optional_text_treats_empty_string_as_clear(
        #[case] mode: Mode,
        #[case] value: FieldPatch<String>,
        #[case] expected: FieldPatch<String>,
    ) {
        let mut validator = Validator::new(mode);

        assert_eq!(validator.text(&NOTES, value), expected);
        assert!(validator.finish(()).is_ok());
    }

    #[rstest]
    #[case(NAME, true)]
    #[case(NOTES, false)]
    fn test_required_flag_decides_whether_empty_is_rejected(
        #[case] rule: FieldRule,
        #[case] rejected: bool,
    ) {
        let mut validator = Validator::new(Mode::Patch);

        let _ = validator.text(&rule, text(""));

        assert_eq!(validator.finish(()).is_err(), rejected);
    }

    #[rstest]
    #[case(Mode::Create, FieldPatch::Absent, Some(Level::Low))]
    #[case(Mode::Patch, FieldPatch::Absent, None)]
    #[case(Mode::Patch, text("high"), Some(Level::High))]
    fn test_choice_accepts_known_values_and_defaults(
        #[case] mode: Mode,
        #[case] value: FieldPatch<String>,
        #[case] expected: Option<Level>,
    ) {
        let mut validator = Validator::new(mode);

        assert_eq!(validator.choice::<Level>(&LEVEL, value), expected);
        assert!(validator.finish(()).is_ok());
    }

    #[rstest]
    #[case(text("HIGH"))]
    #[case(text("urgent"))]
    #[case(text(""))]
    #[case(FieldPatch::Null)]
    fn test_choice_rejects_out_of_set_values(#[case] value: FieldPatch<String>) {
        let mut validator = Validator::new(Mode::Patch);

        let _ = validator.choice::<Level>(&LEVEL, value);
        let error = validator.finish(()).unwrap_err();
        assert!(error.names("level"));
        assert!(error.errors[0].message.contains("low, high"));
    }

    #[rstest]
    #[case("2026-03-01", "2026-03-01T00:00:00+00:00")]
    #[case("2026-03-01T12:30:00Z", "2026-03-01T12:30:00+00:00")]
    #[case("2026-03-01T12:30:00+02:00", "2026-03-01T10:30:00+00:00")]
    fn test_parse_date_accepts_timestamps_and_calendar_dates(
        #[case] raw: &str,
        #[case] expected: &str,
    ) {
        let parsed = parse_date(raw).unwrap();

        assert_eq!(parsed.to_string(), expected);
    }

    #[rstest]
    #[case("tomorrow")]
    #[case("2026-13-01")]
    #[case("01/03/2026")]
    fn test_date_rejects_unparseable_values(#[case] raw: &str) {
        let mut validator = Validator::new(Mode::Patch);

        let _ = validator.date(&DUE, text(raw));
        assert!(validator.finish(()).unwrap_err().names("dueDate"));
    }

    #[rstest]
    fn test_date_empty_string_clears() {
        let mut validator = Validator::new(Mode::Patch);

        assert_eq!(validator.date(&DUE, text("")), FieldPatch::Null);
    }

    #[rstest]
    fn test_validator_collects_every_failure() {
        let mut validator = Validator::new(Mode::Create);

        let _ = validator.text(&NAME, FieldPatch::Absent);
        let _ = validator.choice::<Level>(&LEVEL, text("medium"));
        let _ = validator.date(&DUE, text("soon"));
        let error = validator.finish(()).unwrap_err();

        assert_eq!(
            error.fields().collect::<Vec<_>>(),
            vec!["name", "level", "dueDate"]
        );
    }
}
