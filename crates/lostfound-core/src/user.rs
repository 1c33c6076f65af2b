//! The acting user, as supplied by an identity collaborator.
//!
//! The core never authenticates anyone; it only copies `id` and `name` onto
//! the posts a user creates.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  /// Opaque identifier issued by the identity provider.
  pub id:     String,
  pub email:  String,
  pub name:   String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub avatar: Option<String>,
}

impl User {
  /// Convenience constructor without an avatar.
  pub fn new(
    id: impl Into<String>,
    name: impl Into<String>,
    email: impl Into<String>,
  ) -> Self {
    Self {
      id:     id.into(),
      email:  email.into(),
      name:   name.into(),
      avatar: None,
    }
  }
}
