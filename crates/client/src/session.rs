//! The session-mirror state machine.
//!
//! A [`SessionMirror`] holds a nullable snapshot of one server-owned
//! collection and moves between three states:
//!
//! - `Unauthenticated` - no credential, snapshot absent
//! - `Loading` - initial fetch in flight, snapshot is the previous value (or
//!   absent if none was ever loaded)
//! - `Ready` - snapshot is the last server response
//!
//! A fetch is bracketed by [`SessionMirror::begin_fetch`] /
//! [`SessionMirror::complete_fetch`]. `begin_fetch` hands out a token
//! carrying the mirror's current epoch; the epoch advances whenever the
//! credential goes away, so a response that arrives after a logout carries a
//! stale token and is discarded instead of repopulating the snapshot.
//!
//! Mutations do not go through the fetch bracket: the caller performs the
//! remote call and, only on success, installs the server's replacement
//! snapshot with [`SessionMirror::install`]. On failure nothing is touched,
//! so a rejected call leaves the externally observable snapshot unchanged.

/// Observable synchronization state of a mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncState {
    /// No active session; snapshot absent.
    Unauthenticated,
    /// A fetch is in flight.
    Loading,
    /// Snapshot mirrors the last server response.
    Ready,
}

/// Token tying a fetch completion to the epoch it was issued in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a begun fetch must be completed or the mirror stays Loading"]
pub struct FetchToken {
    epoch: u64,
}

/// A client-side mirror of one server-owned collection.
///
/// Concurrent mutations on the same item are not coordinated here: two
/// in-flight calls race and the later response wins. Callers that need
/// stronger ordering must serialize their own calls (the CLI is sequential;
/// a UI would disable the triggering control while a call is outstanding).
#[derive(Debug)]
pub struct SessionMirror<T> {
    snapshot: Option<T>,
    state: SyncState,
    epoch: u64,
}

impl<T> Default for SessionMirror<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SessionMirror<T> {
    /// A mirror with no session.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            snapshot: None,
            state: SyncState::Unauthenticated,
            epoch: 0,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> SyncState {
        self.state
    }

    /// The current snapshot, if any.
    #[must_use]
    pub const fn snapshot(&self) -> Option<&T> {
        self.snapshot.as_ref()
    }

    /// Start a fetch: moves to `Loading` (keeping any previous snapshot
    /// visible) and returns the token to complete it with.
    pub const fn begin_fetch(&mut self) -> FetchToken {
        self.state = SyncState::Loading;
        FetchToken { epoch: self.epoch }
    }

    /// Complete a fetch begun with [`Self::begin_fetch`].
    ///
    /// `Some` installs the fetched snapshot. `None` marks a failed fetch:
    /// the prior snapshot is kept (`Ready` if one exists, `Unauthenticated`
    /// otherwise) and the error is the caller's to surface, never recorded
    /// as mirror state. Either way, a token from before the last credential
    /// loss is ignored entirely. Returns whether the token was current.
    pub fn complete_fetch(&mut self, token: FetchToken, fetched: Option<T>) -> bool {
        if token.epoch != self.epoch {
            // Stale: the session ended while this fetch was in flight.
            return false;
        }
        match fetched {
            Some(snapshot) => {
                self.snapshot = Some(snapshot);
                self.state = SyncState::Ready;
            }
            None => {
                self.state = if self.snapshot.is_some() {
                    SyncState::Ready
                } else {
                    SyncState::Unauthenticated
                };
            }
        }
        true
    }

    /// Replace the snapshot with the server's response to a successful
    /// mutation. No merging with prior state ever happens.
    pub fn install(&mut self, snapshot: T) {
        self.snapshot = Some(snapshot);
        self.state = SyncState::Ready;
    }

    /// The credential went away: discard the snapshot immediately and
    /// invalidate any in-flight fetch.
    pub fn reset(&mut self) {
        self.snapshot = None;
        self.state = SyncState::Unauthenticated;
        self.epoch += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_unauthenticated() {
        let mirror: SessionMirror<u32> = SessionMirror::new();
        assert_eq!(mirror.state(), SyncState::Unauthenticated);
        assert!(mirror.snapshot().is_none());
    }

    #[test]
    fn test_fetch_cycle() {
        let mut mirror = SessionMirror::new();
        let token = mirror.begin_fetch();
        assert_eq!(mirror.state(), SyncState::Loading);

        assert!(mirror.complete_fetch(token, Some(41)));
        assert_eq!(mirror.state(), SyncState::Ready);
        assert_eq!(mirror.snapshot(), Some(&41));
    }

    #[test]
    fn test_failed_initial_fetch_stays_unauthenticated() {
        let mut mirror: SessionMirror<u32> = SessionMirror::new();
        let token = mirror.begin_fetch();
        assert!(mirror.complete_fetch(token, None));
        assert_eq!(mirror.state(), SyncState::Unauthenticated);
        assert!(mirror.snapshot().is_none());
    }

    #[test]
    fn test_failed_refetch_keeps_prior_snapshot() {
        let mut mirror = SessionMirror::new();
        let token = mirror.begin_fetch();
        assert!(mirror.complete_fetch(token, Some(1)));

        let token = mirror.begin_fetch();
        assert!(mirror.complete_fetch(token, None));
        assert_eq!(mirror.state(), SyncState::Ready);
        assert_eq!(mirror.snapshot(), Some(&1));
    }

    #[test]
    fn test_reset_discards_snapshot() {
        let mut mirror = SessionMirror::new();
        mirror.install(7);
        mirror.reset();
        assert_eq!(mirror.state(), SyncState::Unauthenticated);
        assert!(mirror.snapshot().is_none());
    }

    #[test]
    fn test_stale_fetch_after_reset_is_discarded() {
        // A late-arriving response for a fetch issued before logout must not
        // repopulate the snapshot.
        let mut mirror = SessionMirror::new();
        let token = mirror.begin_fetch();
        mirror.reset();

        assert!(!mirror.complete_fetch(token, Some(99)));
        assert_eq!(mirror.state(), SyncState::Unauthenticated);
        assert!(mirror.snapshot().is_none());
    }

    #[test]
    fn test_fetch_after_new_session_uses_fresh_epoch() {
        let mut mirror = SessionMirror::new();
        let stale = mirror.begin_fetch();
        mirror.reset();

        let fresh = mirror.begin_fetch();
        assert!(!mirror.complete_fetch(stale, Some(1)));
        assert!(mirror.complete_fetch(fresh, Some(2)));
        assert_eq!(mirror.snapshot(), Some(&2));
    }

    #[test]
    fn test_install_replaces_wholesale() {
        let mut mirror = SessionMirror::new();
        mirror.install(vec![1, 2, 3]);
        mirror.install(vec![9]);
        assert_eq!(mirror.snapshot(), Some(&vec![9]));
    }
}
