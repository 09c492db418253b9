//! Credential ownership: token, identity, persistence, attachment.
//!
//! [`CredentialHolder`] is the single writer of the bearer token. Whenever
//! the token transitions between present and absent it updates the shared
//! [`TokenSlot`](crate::http::TokenSlot) *first*, so that any dependent
//! re-fetch the composition root triggers afterwards already goes out with
//! the right authorization.

pub mod store;

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

use thread_saints_core::Email;

use crate::error::ApiError;
use crate::gateway::AuthGateway;
use crate::http::TokenSlot;
use crate::models::Identity;

pub use store::{CredentialStore, FileCredentialStore, MemoryCredentialStore};

/// A live session credential: token and identity, always together.
#[derive(Clone)]
pub struct Credential {
    token: SecretString,
    identity: Identity,
}

impl Credential {
    #[must_use]
    pub const fn new(token: SecretString, identity: Identity) -> Self {
        Self { token, identity }
    }

    #[must_use]
    pub const fn token(&self) -> &SecretString {
        &self.token
    }

    #[must_use]
    pub const fn identity(&self) -> &Identity {
        &self.identity
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"[REDACTED]")
            .field("identity", &self.identity)
            .finish()
    }
}

/// Owns the session credential and keeps its three homes in sync: memory,
/// the durable store, and the outgoing-request token slot.
pub struct CredentialHolder<S: CredentialStore> {
    store: S,
    token_slot: TokenSlot,
    credential: Option<Credential>,
}

impl<S: CredentialStore> CredentialHolder<S> {
    /// Create a holder with no active credential.
    #[must_use]
    pub const fn new(store: S, token_slot: TokenSlot) -> Self {
        Self {
            store,
            token_slot,
            credential: None,
        }
    }

    /// Whether a session is active.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }

    /// The logged-in identity, if any.
    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        self.credential.as_ref().map(Credential::identity)
    }

    /// Restore a previously persisted credential.
    ///
    /// Invoked once at startup. Local, non-blocking, and non-failing: a
    /// missing or unreadable store simply leaves the credential absent.
    /// Returns whether a credential was adopted.
    pub fn restore(&mut self) -> bool {
        match self.store.load() {
            Some(credential) => {
                debug!(user = %credential.identity().id, "restored persisted credential");
                self.adopt(credential);
                true
            }
            None => false,
        }
    }

    /// Log in against the remote auth endpoint.
    ///
    /// On success the credential is adopted (token slot, memory, durable
    /// store - in that order). On failure prior state is left untouched.
    ///
    /// # Errors
    ///
    /// `Validation` if the email is not shaped like an address or the
    /// password is empty; otherwise whatever the gateway call produced.
    #[instrument(skip_all, fields(email = %email))]
    pub async fn login<G: AuthGateway>(
        &mut self,
        gateway: &G,
        email: &str,
        password: &str,
    ) -> Result<(), ApiError> {
        validate_credentials(email, password)?;
        let credential = gateway.login(email, password).await?;
        self.adopt(credential);
        Ok(())
    }

    /// Create an account; identical contract to [`Self::login`] against a
    /// distinct endpoint.
    ///
    /// # Errors
    ///
    /// Same as [`Self::login`].
    #[instrument(skip_all, fields(email = %email))]
    pub async fn signup<G: AuthGateway>(
        &mut self,
        gateway: &G,
        email: &str,
        password: &str,
    ) -> Result<(), ApiError> {
        validate_credentials(email, password)?;
        let credential = gateway.signup(email, password).await?;
        self.adopt(credential);
        Ok(())
    }

    /// End the session: clears the token slot, memory, and durable store.
    /// No server round-trip.
    pub fn logout(&mut self) {
        self.token_slot.clear();
        self.credential = None;
        self.store.clear();
    }

    fn adopt(&mut self, credential: Credential) {
        // Slot first: dependents re-fetch right after this returns.
        self.token_slot
            .set(SecretString::from(credential.token().expose_secret().to_owned()));
        self.store.save(&credential);
        self.credential = Some(credential);
    }
}

fn validate_credentials(email: &str, password: &str) -> Result<(), ApiError> {
    Email::parse(email).map_err(|e| ApiError::Validation(e.to_string()))?;
    if password.is_empty() {
        return Err(ApiError::Validation("password is required".to_owned()));
    }
    Ok(())
}
