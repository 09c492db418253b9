//! User identity as returned by the auth endpoints.

use serde::{Deserialize, Serialize};
use thread_saints_core::{Email, UserId};

/// The logged-in user's identity.
///
/// Returned next to the token by login/signup and persisted alongside it in
/// the credential store; the two are always set and cleared together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(alias = "_id")]
    pub id: UserId,
    pub email: Email,
}
