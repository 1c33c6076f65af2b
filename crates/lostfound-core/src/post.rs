//! Post types: the listing unit of the board.
//!
//! A [`Post`] is created from a validated [`PostDraft`], edited in place by
//! later drafts, and removed permanently on delete. Identity fields (`id`,
//! author, `created_at`) never change after creation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  user::User,
  validation::{Field, Problem, ValidationError, check_enum, check_text},
};

pub const MAX_TITLE_CHARS: usize = 100;
pub const MAX_DESCRIPTION_CHARS: usize = 500;
pub const MAX_LOCATION_CHARS: usize = 100;
pub const MAX_IMAGES: usize = 5;

/// Wire format of [`Post::date`] and [`PostDraft::date`].
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ─── Enumerations ────────────────────────────────────────────────────────────

/// Whether a post reports a lost item or a found one.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  strum::EnumString,
  strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PostType {
  Lost,
  Found,
}

/// What kind of item a post is about.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  strum::EnumString,
  strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Category {
  /// ID cards, bank cards, key cards.
  Card,
  /// Books and stationery.
  School,
  /// Laptops, chargers, phones and other devices.
  It,
  Other,
}

/// Lifecycle status of a post.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PostStatus {
  #[default]
  Active,
  /// The item was returned to its owner.
  Resolved,
}

impl PostStatus {
  pub fn is_active(&self) -> bool { matches!(self, Self::Active) }
}

// ─── Post ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
  pub id:          Uuid,
  #[serde(rename = "type")]
  pub post_type:   PostType,
  pub category:    Category,
  pub title:       String,
  pub description: String,
  pub location:    String,
  /// The day the item was lost or found.
  pub date:        NaiveDate,
  /// Opaque image references, at most [`MAX_IMAGES`].
  pub images:      Vec<String>,
  pub author_id:   String,
  pub author_name: String,
  /// Store-assigned; never changes after creation.
  pub created_at:  DateTime<Utc>,
  #[serde(default)]
  pub status:      PostStatus,
}

impl Post {
  /// Build a new active post from validated fields.
  pub fn new(
    id: Uuid,
    fields: PostFields,
    author: &User,
    created_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      post_type: fields.post_type,
      category: fields.category,
      title: fields.title,
      description: fields.description,
      location: fields.location,
      date: fields.date,
      images: fields.images,
      author_id: author.id.clone(),
      author_name: author.name.clone(),
      created_at,
      status: PostStatus::Active,
    }
  }

  /// Replace every editable field, leaving identity and status untouched.
  pub fn apply(&mut self, fields: PostFields) {
    self.post_type = fields.post_type;
    self.category = fields.category;
    self.title = fields.title;
    self.description = fields.description;
    self.location = fields.location;
    self.date = fields.date;
    self.images = fields.images;
  }

  pub fn is_owned_by(&self, user_id: &str) -> bool { self.author_id == user_id }
}

// ─── Drafts ──────────────────────────────────────────────────────────────────

/// Raw form input for creating or editing a post.
///
/// Every field is kept as the user typed it; [`PostDraft::validate`] turns it
/// into typed [`PostFields`]. Missing JSON fields deserialise as empty so they
/// surface as field-level validation failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostDraft {
  #[serde(rename = "type")]
  pub post_type:   String,
  pub category:    String,
  pub title:       String,
  pub description: String,
  pub location:    String,
  /// `YYYY-MM-DD`.
  pub date:        String,
  pub images:      Vec<String>,
}

/// The editable fields of a post after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFields {
  pub post_type:   PostType,
  pub category:    Category,
  pub title:       String,
  pub description: String,
  pub location:    String,
  pub date:        NaiveDate,
  pub images:      Vec<String>,
}

impl PostDraft {
  /// Check every field and report all failures at once.
  ///
  /// `today` is the latest acceptable value for `date`.
  pub fn validate(
    &self,
    today: NaiveDate,
  ) -> Result<PostFields, ValidationError> {
    let mut errors = ValidationError::default();

    let post_type = check_enum::<PostType>(&mut errors, Field::Type, &self.post_type);
    let category = check_enum::<Category>(&mut errors, Field::Category, &self.category);
    check_text(&mut errors, Field::Title, &self.title, MAX_TITLE_CHARS);
    check_text(
      &mut errors,
      Field::Description,
      &self.description,
      MAX_DESCRIPTION_CHARS,
    );
    check_text(&mut errors, Field::Location, &self.location, MAX_LOCATION_CHARS);
    let date = self.check_date(&mut errors, today);
    if self.images.len() > MAX_IMAGES {
      errors.push(Field::Images, Problem::TooMany { max: MAX_IMAGES });
    }

    match (post_type, category, date) {
      (Some(post_type), Some(category), Some(date)) if errors.is_empty() => {
        Ok(PostFields {
          post_type,
          category,
          title: self.title.clone(),
          description: self.description.clone(),
          location: self.location.clone(),
          date,
          images: self.images.clone(),
        })
      }
      _ => Err(errors),
    }
  }

  fn check_date(
    &self,
    errors: &mut ValidationError,
    today: NaiveDate,
  ) -> Option<NaiveDate> {
    let raw = self.date.trim();
    if raw.is_empty() {
      errors.push(Field::Date, Problem::Empty);
      return None;
    }
    let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) else {
      errors.push(Field::Date, Problem::Malformed {
        value: self.date.clone(),
      });
      return None;
    };
    if date > today {
      errors.push(Field::Date, Problem::InFuture);
      return None;
    }
    Some(date)
  }
}
