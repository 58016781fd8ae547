//! Session registry
//!
//! Process-wide table of sessions keyed by `(owner, mode)`. At most one
//! in-progress session exists per key. Finished sessions stay registered until
//! abandoned, replaced or reaped so the front end can still show them.
//!
//! Locking: the key map has one mutex, each session has its own. The registry
//! never blocks on a session lock while holding the map lock: lookups clone
//! the handle and release the map first, and the uniqueness check in `create`
//! only tries the session lock. A session held by a front end therefore never
//! stalls calls on other sessions.

mod owner;

pub use owner::OwnerKey;

use crate::config::RegistryConfig;
use crate::error::{GameError, Result};
use crate::game::{
    GameMode, ModeConfig, Session, SessionGuessResult, SessionId, SessionStatus, TargetSource,
};
use crate::lexicon::Dictionary;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, instrument, warn};

/// Shared handle to a registered session
pub type SessionHandle = Arc<Mutex<Session>>;

type SessionKey = (OwnerKey, GameMode);

struct Entry {
    session: SessionHandle,
    created_at: DateTime<Utc>,
}

/// Summary of one registered session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub id: SessionId,
    pub owner: OwnerKey,
    pub mode: GameMode,
    pub status: SessionStatus,
    pub attempts: usize,
    pub created_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
}

pub struct SessionRegistry {
    config: RegistryConfig,
    dictionary: Arc<dyn Dictionary>,
    sessions: Mutex<FxHashMap<SessionKey, Entry>>,
    next_id: AtomicU64,
}

impl SessionRegistry {
    #[must_use]
    pub fn new(config: RegistryConfig, dictionary: Arc<dyn Dictionary>) -> Self {
        Self {
            config,
            dictionary,
            sessions: Mutex::new(FxHashMap::default()),
            next_id: AtomicU64::new(1),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Start a new session for `owner`
    ///
    /// # Errors
    /// Returns `ActiveSessionExists` if `owner` already has an in-progress
    /// session in this mode, or a `Config` error if the drawn targets are
    /// unusable. Neither registers anything. A session that is locked
    /// elsewhere counts as in progress.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use wordle_engine::config::RegistryConfig;
    /// use wordle_engine::game::{FixedTargets, GameMode, ModeConfig};
    /// use wordle_engine::lexicon::Lexicon;
    /// use wordle_engine::registry::{OwnerKey, SessionRegistry};
    ///
    /// let registry = SessionRegistry::new(RegistryConfig::default(), Arc::new(Lexicon::embedded()));
    /// let owner = OwnerKey::from("alice");
    /// let config = ModeConfig::for_mode(GameMode::Wordle);
    ///
    /// registry.create(&owner, config.clone(), &FixedTargets::single("crane")).unwrap();
    /// assert!(registry.create(&owner, config, &FixedTargets::single("slate")).is_err());
    ///
    /// let result = registry.submit_guess(&owner, GameMode::Wordle, "crane").unwrap();
    /// assert!(result.is_terminal());
    /// ```
    pub fn create(
        &self,
        owner: &OwnerKey,
        config: ModeConfig,
        source: &dyn TargetSource,
    ) -> Result<SessionHandle> {
        self.create_at(owner, config, source, Utc::now())
    }

    /// [`SessionRegistry::create`] with an explicit clock
    ///
    /// # Errors
    /// See [`SessionRegistry::create`].
    #[instrument(skip(self, config, source, now), fields(mode = %config.mode))]
    pub fn create_at(
        &self,
        owner: &OwnerKey,
        config: ModeConfig,
        source: &dyn TargetSource,
        now: DateTime<Utc>,
    ) -> Result<SessionHandle> {
        let mode = config.mode;
        let key = (owner.clone(), mode);
        let mut sessions = self.sessions.lock();

        // Check and insert share one critical section on the map lock
        if let Some(existing) = sessions.get(&key)
            && !existing
                .session
                .try_lock()
                .is_some_and(|session| session.is_terminal())
        {
            warn!("active session already exists");
            return Err(GameError::ActiveSessionExists {
                owner: owner.clone(),
                mode,
            });
        }

        let draw = source.draw(mode, config.boards)?;
        let id = SessionId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let session = Session::start_at(id, config, draw, now).inspect_err(|error| {
            warn!(%error, "rejected session targets");
        })?;

        let handle = Arc::new(Mutex::new(session));
        if sessions
            .insert(
                key,
                Entry {
                    session: Arc::clone(&handle),
                    created_at: now,
                },
            )
            .is_some()
        {
            debug!("replaced finished session");
        }
        info!(session_id = %id, "session created");
        Ok(handle)
    }

    /// Look up the session for `owner` in `mode`
    ///
    /// # Errors
    /// Returns `SessionNotFound` if there is none.
    pub fn get(&self, owner: &OwnerKey, mode: GameMode) -> Result<SessionHandle> {
        self.sessions
            .lock()
            .get(&(owner.clone(), mode))
            .map(|entry| Arc::clone(&entry.session))
            .ok_or_else(|| GameError::SessionNotFound {
                owner: owner.clone(),
                mode,
            })
    }

    /// Remove the session and return its final state
    ///
    /// # Errors
    /// Returns `SessionNotFound` if there is none.
    #[instrument(skip(self))]
    pub fn abandon(&self, owner: &OwnerKey, mode: GameMode) -> Result<Session> {
        let entry = self
            .sessions
            .lock()
            .remove(&(owner.clone(), mode))
            .ok_or_else(|| GameError::SessionNotFound {
                owner: owner.clone(),
                mode,
            })?;
        let session = entry.session.lock().clone();
        info!(session_id = %session.id(), status = %session.status(), "session abandoned");
        Ok(session)
    }

    /// Apply a guess to the owner's session, serialized with any other call on
    /// the same session
    ///
    /// # Errors
    /// Returns `SessionNotFound`, or whatever [`Session::submit_guess`] returns.
    pub fn submit_guess(
        &self,
        owner: &OwnerKey,
        mode: GameMode,
        raw: &str,
    ) -> Result<SessionGuessResult> {
        self.submit_guess_at(owner, mode, raw, Utc::now())
    }

    /// [`SessionRegistry::submit_guess`] with an explicit clock
    ///
    /// # Errors
    /// See [`SessionRegistry::submit_guess`].
    #[instrument(skip(self, now))]
    pub fn submit_guess_at(
        &self,
        owner: &OwnerKey,
        mode: GameMode,
        raw: &str,
        now: DateTime<Utc>,
    ) -> Result<SessionGuessResult> {
        // Map lock is released before the session lock is taken
        let handle = self.get(owner, mode)?;
        let mut session = handle.lock();
        session.submit_guess_at(raw, self.dictionary.as_ref(), now)
    }

    /// Every session registered for `owner`, ordered by mode
    ///
    /// Waits for each of the owner's sessions in turn, so the caller must not
    /// hold one of their locks.
    #[must_use]
    pub fn active_sessions(&self, owner: &OwnerKey) -> Vec<SessionInfo> {
        let entries: Vec<(GameMode, SessionHandle, DateTime<Utc>)> = self
            .sessions
            .lock()
            .iter()
            .filter(|((key_owner, _), _)| key_owner == owner)
            .map(|((_, mode), entry)| (*mode, Arc::clone(&entry.session), entry.created_at))
            .collect();

        let mut infos: Vec<SessionInfo> = entries
            .into_iter()
            .map(|(mode, handle, created_at)| {
                let session = handle.lock();
                SessionInfo {
                    id: session.id(),
                    owner: owner.clone(),
                    mode,
                    status: session.status(),
                    attempts: session.attempts(),
                    created_at,
                    last_activity_at: session.last_activity_at(),
                }
            })
            .collect();
        infos.sort_by_key(|info| info.mode);
        infos
    }

    /// Drop sessions idle for at least the configured timeout
    ///
    /// Sessions busy with a guess are skipped and picked up by a later pass.
    /// Returns the keys that were removed.
    #[instrument(skip(self))]
    pub fn reap_idle(&self, now: DateTime<Utc>) -> Vec<(OwnerKey, GameMode)> {
        let timeout = self.config.idle_timeout();
        let mut reaped = Vec::new();
        self.sessions.lock().retain(|key, entry| {
            let Some(session) = entry.session.try_lock() else {
                return true;
            };
            if now - session.last_activity_at() < timeout {
                return true;
            }
            reaped.push(key.clone());
            false
        });

        if !reaped.is_empty() {
            warn!(reaped = reaped.len(), "reaped idle sessions");
        }
        reaped
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }

    /// Drop every session
    pub fn clear(&self) {
        self.sessions.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::game::FixedTargets;
    use crate::lexicon::AcceptAll;
    use chrono::Duration;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration as StdDuration;

    fn registry() -> SessionRegistry {
        SessionRegistry::new(RegistryConfig::default(), Arc::new(AcceptAll))
    }

    fn wordle() -> ModeConfig {
        ModeConfig::for_mode(GameMode::Wordle)
    }

    #[test]
    fn create_then_get() {
        let registry = registry();
        let owner = OwnerKey::from("alice");
        let handle = registry
            .create(&owner, wordle(), &FixedTargets::single("crane"))
            .unwrap();
        let fetched = registry.get(&owner, GameMode::Wordle).unwrap();
        assert!(Arc::ptr_eq(&handle, &fetched));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn one_active_session_per_owner_and_mode() {
        let registry = registry();
        let owner = OwnerKey::from("alice");
        registry
            .create(&owner, wordle(), &FixedTargets::single("crane"))
            .unwrap();

        let err = registry
            .create(&owner, wordle(), &FixedTargets::single("slate"))
            .unwrap_err();
        assert!(matches!(err, GameError::ActiveSessionExists { .. }));

        // Other modes and other owners are independent
        registry
            .create(
                &owner,
                ModeConfig::for_mode(GameMode::Mathle),
                &FixedTargets::single("3*4=12"),
            )
            .unwrap();
        registry
            .create(&OwnerKey::from("bob"), wordle(), &FixedTargets::single("slate"))
            .unwrap();
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn finished_session_is_replaced() {
        let registry = registry();
        let owner = OwnerKey::from("alice");
        registry
            .create(&owner, wordle(), &FixedTargets::single("crane"))
            .unwrap();
        registry
            .submit_guess(&owner, GameMode::Wordle, "crane")
            .unwrap();

        let handle = registry
            .create(&owner, wordle(), &FixedTargets::single("slate"))
            .unwrap();
        assert_eq!(handle.lock().attempts(), 0);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn invalid_targets_register_nothing() {
        let registry = registry();
        let owner = OwnerKey::from("alice");
        let err = registry
            .create(
                &owner,
                ModeConfig::for_mode(GameMode::Mathle),
                &FixedTargets::single("2+2=5"),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            GameError::Config(ConfigError::InvalidEquation { .. })
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn missing_session_errors() {
        let registry = registry();
        let owner = OwnerKey::from("nobody");
        assert!(matches!(
            registry.submit_guess(&owner, GameMode::Wordle, "crane"),
            Err(GameError::SessionNotFound { .. })
        ));
        assert!(registry.abandon(&owner, GameMode::Wordle).is_err());
    }

    #[test]
    fn abandon_returns_final_state() {
        let registry = registry();
        let owner = OwnerKey::from("alice");
        registry
            .create(&owner, wordle(), &FixedTargets::single("crane"))
            .unwrap();
        registry
            .submit_guess(&owner, GameMode::Wordle, "slate")
            .unwrap();

        let session = registry.abandon(&owner, GameMode::Wordle).unwrap();
        assert_eq!(session.attempts(), 1);
        assert_eq!(session.boards()[0].target().text(), "crane");
        assert!(registry.is_empty());
    }

    #[test]
    fn active_sessions_lists_owner_only() {
        let registry = registry();
        let alice = OwnerKey::from("alice");
        registry
            .create(
                &alice,
                ModeConfig::for_mode(GameMode::Duordle),
                &FixedTargets::new(["crane", "slate"]),
            )
            .unwrap();
        registry
            .create(&alice, wordle(), &FixedTargets::single("crane"))
            .unwrap();
        registry
            .create(&OwnerKey::from("bob"), wordle(), &FixedTargets::single("crane"))
            .unwrap();

        let infos = registry.active_sessions(&alice);
        let modes: Vec<GameMode> = infos.iter().map(|info| info.mode).collect();
        assert_eq!(modes, vec![GameMode::Wordle, GameMode::Duordle]);
        assert!(infos.iter().all(|info| info.owner == alice));
    }

    #[test]
    fn reap_idle_uses_last_activity() {
        let registry = registry();
        let start = Utc::now();
        let alice = OwnerKey::from("alice");
        let bob = OwnerKey::from("bob");
        registry
            .create_at(&alice, wordle(), &FixedTargets::single("crane"), start)
            .unwrap();
        registry
            .create_at(&bob, wordle(), &FixedTargets::single("crane"), start)
            .unwrap();

        let later = start + Duration::minutes(20);
        registry
            .submit_guess_at(&bob, GameMode::Wordle, "slate", later)
            .unwrap();

        let reaped = registry.reap_idle(start + Duration::minutes(31));
        assert_eq!(reaped, vec![(alice.clone(), GameMode::Wordle)]);
        assert!(registry.get(&alice, GameMode::Wordle).is_err());
        assert!(registry.get(&bob, GameMode::Wordle).is_ok());
    }

    #[test]
    fn held_session_does_not_block_other_sessions() {
        let registry = registry();
        let alice = OwnerKey::from("alice");
        let bob = OwnerKey::from("bob");
        let alice_handle = registry
            .create(&alice, wordle(), &FixedTargets::single("crane"))
            .unwrap();
        registry
            .create(&bob, wordle(), &FixedTargets::single("crane"))
            .unwrap();

        thread::scope(|scope| {
            let held = alice_handle.lock();

            // Blocks on alice's session until `held` is released
            let listing = scope.spawn(|| registry.active_sessions(&alice));
            thread::sleep(StdDuration::from_millis(50));

            let (sender, receiver) = mpsc::channel();
            let (registry, bob) = (&registry, &bob);
            scope.spawn(move || {
                let result = registry.submit_guess(bob, GameMode::Wordle, "slate");
                sender.send(result.map(|result| result.attempt)).unwrap();
            });
            let attempt = receiver
                .recv_timeout(StdDuration::from_secs(2))
                .expect("bob's guess stalled behind alice's session")
                .unwrap();
            assert_eq!(attempt, 1);

            // A held in-progress session still blocks a duplicate create
            assert!(matches!(
                registry.create(&alice, wordle(), &FixedTargets::single("slate")),
                Err(GameError::ActiveSessionExists { .. })
            ));

            drop(held);
            let infos = listing.join().unwrap();
            assert_eq!(infos.len(), 1);
            assert_eq!(infos[0].attempts, 0);
        });
    }

    #[test]
    fn clear_empties_registry() {
        let registry = registry();
        registry
            .create(&OwnerKey::from("a"), wordle(), &FixedTargets::single("crane"))
            .unwrap();
        registry.clear();
        assert!(registry.is_empty());
    }
}
