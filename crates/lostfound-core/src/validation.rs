//! Field-level validation errors.
//!
//! A [`ValidationError`] collects every failing field of a submission so the
//! caller can render one message per field instead of stopping at the first.

use serde::Serialize;
use thiserror::Error;

// ─── Field ───────────────────────────────────────────────────────────────────

/// A user-editable field of a post, or a selector of a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Field {
  Type,
  Category,
  Title,
  Description,
  Location,
  Date,
  Images,
}

// ─── Problem ─────────────────────────────────────────────────────────────────

/// What is wrong with a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Problem {
  #[error("must not be empty")]
  Empty,

  #[error("must be at most {max} characters")]
  TooLong { max: usize },

  #[error("must have at most {max} entries")]
  TooMany { max: usize },

  #[error("must not be in the future")]
  InFuture,

  /// A closed-enum field carried a value outside its set.
  #[error("unrecognised value {value:?}")]
  Unrecognised { value: String },

  #[error("malformed value {value:?}")]
  Malformed { value: String },
}

/// One failing field and the reason it failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{field} {problem}")]
pub struct FieldError {
  pub field:   Field,
  pub problem: Problem,
}

// ─── ValidationError ─────────────────────────────────────────────────────────

/// All field failures of a single submission, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[error("validation failed: {}", summarize(.fields))]
pub struct ValidationError {
  pub fields: Vec<FieldError>,
}

fn summarize(fields: &[FieldError]) -> String {
  fields
    .iter()
    .map(ToString::to_string)
    .collect::<Vec<_>>()
    .join(", ")
}

impl ValidationError {
  /// An error for a single field.
  pub fn single(field: Field, problem: Problem) -> Self {
    Self {
      fields: vec![FieldError { field, problem }],
    }
  }

  pub fn push(&mut self, field: Field, problem: Problem) {
    self.fields.push(FieldError { field, problem });
  }

  pub fn is_empty(&self) -> bool { self.fields.is_empty() }

  /// Whether `field` failed for any reason.
  pub fn has(&self, field: Field) -> bool {
    self.fields.iter().any(|f| f.field == field)
  }

  /// The problem recorded for `field`, if any.
  pub fn problem(&self, field: Field) -> Option<&Problem> {
    self
      .fields
      .iter()
      .find(|f| f.field == field)
      .map(|f| &f.problem)
  }

  /// `Ok(value)` when nothing was recorded, `Err(self)` otherwise.
  pub fn into_result<T>(self, value: T) -> Result<T, Self> {
    if self.is_empty() { Ok(value) } else { Err(self) }
  }
}

// ─── Checks ──────────────────────────────────────────────────────────────────

/// Require non-blank text of at most `max` characters.
///
/// Blankness is judged on the trimmed value; length on the value as given.
pub(crate) fn check_text(
  errors: &mut ValidationError,
  field: Field,
  value: &str,
  max: usize,
) {
  if value.trim().is_empty() {
    errors.push(field, Problem::Empty);
  } else if value.chars().count() > max {
    errors.push(field, Problem::TooLong { max });
  }
}

/// Parse a closed-enum value, recording `Empty` or `Unrecognised` on failure.
pub(crate) fn check_enum<T: std::str::FromStr>(
  errors: &mut ValidationError,
  field: Field,
  value: &str,
) -> Option<T> {
  if value.trim().is_empty() {
    errors.push(field, Problem::Empty);
    return None;
  }
  match value.parse() {
    Ok(v) => Some(v),
    Err(_) => {
      errors.push(field, Problem::Unrecognised {
        value: value.to_owned(),
      });
      None
    }
  }
}
