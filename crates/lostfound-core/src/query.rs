//! The filter engine: free text, category and type narrowing over a post
//! sequence.
//!
//! Filtering is pure. The result is always a subsequence of the input in the
//! same relative order.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
  post::{Category, Post, PostType},
  validation::{Field, Problem, ValidationError},
};

/// Selector value meaning "no restriction".
pub const ALL: &str = "all";

/// Parameters for [`filter`] and
/// [`PostStore::search`](crate::store::PostStore::search).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
  /// Case-insensitive substring matched against title, description and
  /// location. Empty matches everything. Not trimmed.
  #[serde(default)]
  pub text:      String,
  /// `None` selects every category.
  pub category:  Option<Category>,
  /// `None` selects both lost and found posts.
  #[serde(rename = "type")]
  pub post_type: Option<PostType>,
}

impl FilterSpec {
  /// Build a spec from raw selector input.
  ///
  /// `"all"` or an empty selector means no restriction; any other value must
  /// name a known category or type.
  pub fn parse(
    text: impl Into<String>,
    category: &str,
    post_type: &str,
  ) -> Result<Self, ValidationError> {
    let mut errors = ValidationError::default();
    let category = parse_selector(&mut errors, Field::Category, category);
    let post_type = parse_selector(&mut errors, Field::Type, post_type);
    errors.into_result(Self {
      text: text.into(),
      category,
      post_type,
    })
  }

  /// Whether this spec selects every post.
  ///
  /// Lets a caller tell "nothing posted yet" apart from "nothing matched".
  pub fn is_unfiltered(&self) -> bool {
    self.text.is_empty() && self.category.is_none() && self.post_type.is_none()
  }

  pub fn matches(&self, post: &Post) -> bool {
    Matcher::new(self).matches(post)
  }
}

fn parse_selector<T: FromStr>(
  errors: &mut ValidationError,
  field: Field,
  raw: &str,
) -> Option<T> {
  if raw.is_empty() || raw == ALL {
    return None;
  }
  match raw.parse() {
    Ok(v) => Some(v),
    Err(_) => {
      errors.push(field, Problem::Unrecognised {
        value: raw.to_owned(),
      });
      None
    }
  }
}

/// A spec with its text pre-folded, so the needle is lowercased once per
/// filter pass rather than once per post.
struct Matcher<'a> {
  spec:   &'a FilterSpec,
  needle: String,
}

impl<'a> Matcher<'a> {
  fn new(spec: &'a FilterSpec) -> Self {
    Self {
      spec,
      needle: spec.text.to_lowercase(),
    }
  }

  fn matches(&self, post: &Post) -> bool {
    self.matches_text(post)
      && self.spec.category.is_none_or(|c| c == post.category)
      && self.spec.post_type.is_none_or(|t| t == post.post_type)
  }

  fn matches_text(&self, post: &Post) -> bool {
    if self.needle.is_empty() {
      return true;
    }
    [&post.title, &post.description, &post.location]
      .into_iter()
      .any(|field| field.to_lowercase().contains(&self.needle))
  }
}

/// The posts of `posts` that satisfy `spec`, in input order.
pub fn filter<'a>(
  posts: &'a [Post],
  spec: &'a FilterSpec,
) -> impl Iterator<Item = &'a Post> + 'a {
  let matcher = Matcher::new(spec);
  posts.iter().filter(move |post| matcher.matches(post))
}
