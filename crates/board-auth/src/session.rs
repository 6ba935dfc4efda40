//! Session and identity accessor
//!
//! A `Session` holds the current signed-in user, or nothing. It is filled by
//! a one-time probe against an [`IdentityProvider`] and cleared on sign-out:
//!
//! ```text
//! Uninitialized ──resolve()──→ Loading ──probe──→ Resolved(Some(user) | None)
//!       ↑                                                   │
//!       └───────────────────── logout() / reset() ──────────┘
//! ```
//!
//! A failed probe resolves to `None`; there is no retry. Sessions are plain
//! values: create one per client and pass it where it is needed.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use board_model::{LoginRequest, Post, Principal, Token, User};
use board_rbac::{AccessDecision, GrantLookup, Operation};

use crate::error::{AuthError, AuthResult};

/// Source of identity for a session.
///
/// Implemented by the HTTP client against `/auth/*`, and by test doubles.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Error returned by the provider.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The user bound to the current session.
    async fn current_user(&self) -> Result<User, Self::Error>;

    /// Establish a session with credentials.
    async fn sign_in(&self, request: &LoginRequest) -> Result<Token, Self::Error>;

    /// End the current session.
    async fn sign_out(&self) -> Result<(), Self::Error>;
}

/// Lifecycle state of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "user", rename_all = "snake_case")]
pub enum SessionState {
    /// Not probed yet
    Uninitialized,
    /// Probe in flight
    Loading,
    /// Probe finished; `None` means signed out
    Resolved(Option<User>),
}

impl SessionState {
    pub fn is_resolved(&self) -> bool {
        matches!(self, SessionState::Resolved(_))
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Resolved(Some(user)) => Some(user),
            _ => None,
        }
    }
}

/// State plus the reset count it was written under.
#[derive(Debug)]
struct Slot {
    state: SessionState,
    generation: u64,
}

impl Slot {
    fn new(state: SessionState) -> RwLock<Self> {
        RwLock::new(Self {
            state,
            generation: 0,
        })
    }
}

/// The current user's session.
#[derive(Debug)]
pub struct Session {
    slot: RwLock<Slot>,
    /// Serializes probes so concurrent callers share one.
    probe_lock: Mutex<()>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates an uninitialized session.
    pub fn new() -> Self {
        Self {
            slot: Slot::new(SessionState::Uninitialized),
            probe_lock: Mutex::new(()),
        }
    }

    /// Creates a session already resolved to `user`.
    pub fn with_user(user: Option<User>) -> Self {
        Self {
            slot: Slot::new(SessionState::Resolved(user)),
            probe_lock: Mutex::new(()),
        }
    }

    /// Snapshot of the current state.
    pub async fn state(&self) -> SessionState {
        self.slot.read().await.state.clone()
    }

    /// The resolved user, without probing.
    pub async fn current_user(&self) -> Option<User> {
        self.slot.read().await.state.user().cloned()
    }

    /// The resolved principal, without probing.
    pub async fn principal(&self) -> Option<Principal> {
        self.slot.read().await.state.user().map(User::principal)
    }

    /// Resolve the session, probing the provider on first use.
    ///
    /// Later calls return the cached result. Concurrent callers during a
    /// probe wait for it rather than starting another. A probe overtaken by
    /// a reset is discarded and yields `None`.
    pub async fn resolve<P>(&self, provider: &P) -> Option<User>
    where
        P: IdentityProvider + ?Sized,
    {
        if let SessionState::Resolved(user) = &self.slot.read().await.state {
            return user.clone();
        }

        let _probe = self.probe_lock.lock().await;

        if let SessionState::Resolved(user) = &self.slot.read().await.state {
            return user.clone();
        }

        self.probe(provider).await
    }

    /// Run one probe. Callers hold `probe_lock`.
    async fn probe<P>(&self, provider: &P) -> Option<User>
    where
        P: IdentityProvider + ?Sized,
    {
        let generation = {
            let mut slot = self.slot.write().await;
            slot.state = SessionState::Loading;
            slot.generation
        };

        let user = match provider.current_user().await {
            Ok(user) => Some(user),
            Err(e) => {
                debug!(error = %e, "Identity probe failed, treating as signed out");
                None
            }
        };

        let mut slot = self.slot.write().await;
        if slot.generation != generation {
            debug!("Session was reset during the probe, discarding result");
            return None;
        }
        if let Some(ref user) = user {
            info!(user_id = user.id, is_admin = user.is_admin, "Session resolved");
        }
        slot.state = SessionState::Resolved(user.clone());
        user
    }

    /// Resolve and return only the principal.
    pub async fn resolve_principal<P>(&self, provider: &P) -> Option<Principal>
    where
        P: IdentityProvider + ?Sized,
    {
        self.resolve(provider).await.map(|u| u.principal())
    }

    /// Discard the cached result and probe again.
    ///
    /// Any probe still in flight is invalidated, so its result can never
    /// stand in for this one.
    pub async fn refresh<P>(&self, provider: &P) -> Option<User>
    where
        P: IdentityProvider + ?Sized,
    {
        self.reset().await;
        let _probe = self.probe_lock.lock().await;
        self.probe(provider).await
    }

    /// Sign in, then probe for the user the new session belongs to.
    pub async fn login<P>(&self, provider: &P, request: &LoginRequest) -> AuthResult<User>
    where
        P: IdentityProvider + ?Sized,
    {
        request.validate()?;
        provider.sign_in(request).await.map_err(|e| {
            warn!(email = %request.email, error = %e, "Sign-in rejected");
            AuthError::SignInFailed(e.to_string())
        })?;

        self.refresh(provider)
            .await
            .ok_or(AuthError::SessionNotEstablished)
    }

    /// Sign out. The local session is cleared even if the provider fails.
    pub async fn logout<P>(&self, provider: &P) -> AuthResult<()>
    where
        P: IdentityProvider + ?Sized,
    {
        let result = provider.sign_out().await;
        self.reset().await;
        info!("Session cleared");

        result.map_err(|e| AuthError::SignOutFailed(e.to_string()))
    }

    /// Return to `Uninitialized` and invalidate any probe in flight.
    pub async fn reset(&self) {
        let mut slot = self.slot.write().await;
        slot.generation = slot.generation.wrapping_add(1);
        slot.state = SessionState::Uninitialized;
    }

    /// Check a post operation for the session's principal.
    pub async fn authorize<P, G>(
        &self,
        provider: &P,
        post: &Post,
        grants: &G,
        operation: Operation,
    ) -> AccessDecision
    where
        P: IdentityProvider + ?Sized,
        G: GrantLookup + ?Sized,
    {
        let principal = self.resolve_principal(provider).await;
        board_rbac::decide(principal, post, grants, operation)
    }

    /// Admin-area guard for the session's principal.
    pub async fn require_admin<P>(&self, provider: &P) -> AccessDecision
    where
        P: IdentityProvider + ?Sized,
    {
        board_rbac::require_admin(self.resolve_principal(provider).await)
    }

    /// Signed-in guard for the session's principal.
    pub async fn require_session<P>(&self, provider: &P) -> AccessDecision
    where
        P: IdentityProvider + ?Sized,
    {
        board_rbac::require_session(self.resolve_principal(provider).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_rbac::Route;
    use chrono::Utc;
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[derive(Debug, thiserror::Error)]
    #[error("{0}")]
    struct ProbeError(String);

    /// Provider double that counts probes and can be switched on and off.
    struct FakeProvider {
        user: Option<User>,
        signed_in: AtomicBool,
        probes: Arc<AtomicU32>,
        fail_sign_out: bool,
        delay: Duration,
    }

    impl FakeProvider {
        fn new(user: Option<User>) -> Self {
            Self {
                signed_in: AtomicBool::new(user.is_some()),
                user,
                probes: Arc::new(AtomicU32::new(0)),
                fail_sign_out: false,
                delay: Duration::ZERO,
            }
        }

        fn probes(&self) -> u32 {
            self.probes.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl IdentityProvider for FakeProvider {
        type Error = ProbeError;

        async fn current_user(&self) -> Result<User, ProbeError> {
            self.probes.fetch_add(1, Ordering::SeqCst);
            // The answer reflects the session as it was when the request went out.
            let signed_in = self.signed_in.load(Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            match (&self.user, signed_in) {
                (Some(user), true) => Ok(user.clone()),
                _ => Err(ProbeError("Could not validate credentials".to_string())),
            }
        }

        async fn sign_in(&self, request: &LoginRequest) -> Result<Token, ProbeError> {
            match &self.user {
                Some(user) if user.email == request.email && request.password == "secret1" => {
                    self.signed_in.store(true, Ordering::SeqCst);
                    Ok(Token {
                        access_token: "tok".to_string(),
                        token_type: "bearer".to_string(),
                    })
                }
                _ => Err(ProbeError("Invalid credentials".to_string())),
            }
        }

        async fn sign_out(&self) -> Result<(), ProbeError> {
            self.signed_in.store(false, Ordering::SeqCst);
            if self.fail_sign_out {
                Err(ProbeError("HTTP 500".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn user(id: i64, is_admin: bool) -> User {
        User {
            id,
            email: format!("user{}@example.com", id),
            full_name: None,
            is_active: true,
            is_admin,
            created_at: Utc::now(),
        }
    }

    fn private_post(author_id: i64) -> Post {
        Post {
            id: 9,
            title: "Private".to_string(),
            description: None,
            video_filename: "9.mp4".to_string(),
            video_original_name: "clip.mp4".to_string(),
            video_size: 10,
            author_id,
            is_public: false,
            created_at: Utc::now(),
            updated_at: None,
            author: None,
        }
    }

    #[tokio::test]
    async fn test_resolve_probes_once() {
        let provider = FakeProvider::new(Some(user(5, false)));
        let session = Session::new();
        assert_eq!(session.state().await, SessionState::Uninitialized);

        let first = session.resolve(&provider).await;
        let second = session.resolve(&provider).await;

        assert_eq!(first.map(|u| u.id), Some(5));
        assert_eq!(second.map(|u| u.id), Some(5));
        assert_eq!(provider.probes(), 1);
        assert_eq!(session.principal().await, Some(Principal::member(5)));
    }

    #[tokio::test]
    async fn test_failed_probe_means_signed_out() {
        let provider = FakeProvider::new(None);
        let session = Session::new();

        assert!(session.resolve(&provider).await.is_none());
        assert_eq!(session.state().await, SessionState::Resolved(None));
        assert_eq!(provider.probes(), 1);

        // No retry on later calls
        assert!(session.resolve(&provider).await.is_none());
        assert_eq!(provider.probes(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_resolves_share_probe() {
        let mut provider = FakeProvider::new(Some(user(5, false)));
        provider.delay = Duration::from_millis(50);
        let session = Session::new();

        let (a, b) = tokio::join!(session.resolve(&provider), session.resolve(&provider));
        assert_eq!(a, b);
        assert_eq!(provider.probes(), 1);
    }

    #[tokio::test]
    async fn test_login_reprobes() {
        let provider = FakeProvider::new(Some(user(5, false)));
        provider.signed_in.store(false, Ordering::SeqCst);
        let session = Session::new();
        assert!(session.resolve(&provider).await.is_none());

        let user = session
            .login(&provider, &LoginRequest::new("user5@example.com", "secret1"))
            .await
            .unwrap();
        assert_eq!(user.id, 5);
        assert_eq!(provider.probes(), 2);
        assert!(session.state().await.is_resolved());
    }

    #[tokio::test]
    async fn test_login_rejected() {
        let provider = FakeProvider::new(Some(user(5, false)));
        let session = Session::new();

        let err = session
            .login(&provider, &LoginRequest::new("user5@example.com", "wrong"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials");
        assert_eq!(session.state().await, SessionState::Uninitialized);
    }

    #[tokio::test]
    async fn test_login_rejects_malformed_email() {
        let provider = FakeProvider::new(Some(user(5, false)));
        let session = Session::new();

        let err = session
            .login(&provider, &LoginRequest::new("user5.example.com", "secret1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Invalid(_)));
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert_eq!(provider.probes(), 0);
    }

    #[tokio::test]
    async fn test_logout_resets_even_on_failure() {
        let mut provider = FakeProvider::new(Some(user(5, false)));
        provider.fail_sign_out = true;
        let session = Session::new();
        session.resolve(&provider).await;

        let result = session.logout(&provider).await;
        assert!(matches!(result, Err(AuthError::SignOutFailed(_))));
        assert_eq!(session.state().await, SessionState::Uninitialized);
        assert!(session.current_user().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_logout_discards_probe_in_flight() {
        let mut provider = FakeProvider::new(Some(user(5, false)));
        provider.delay = Duration::from_millis(100);
        let session = Session::new();

        let (resolved, logout) = tokio::join!(session.resolve(&provider), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            session.logout(&provider).await
        });

        assert!(logout.is_ok());
        assert!(resolved.is_none());
        assert_eq!(session.state().await, SessionState::Uninitialized);
        assert!(session.current_user().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_during_probe_reprobes() {
        let mut provider = FakeProvider::new(Some(user(5, false)));
        provider.signed_in = AtomicBool::new(false);
        provider.delay = Duration::from_millis(100);
        let session = Session::new();
        let request = LoginRequest::new("user5@example.com", "secret1");

        let (resolved, login) = tokio::join!(session.resolve(&provider), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            session.login(&provider, &request).await
        });

        assert!(resolved.is_none());
        assert_eq!(login.unwrap().id, 5);
        assert_eq!(provider.probes(), 2);
        assert_eq!(session.principal().await, Some(Principal::member(5)));
    }

    #[tokio::test]
    async fn test_authorize_uses_session_principal() {
        let provider = FakeProvider::new(Some(user(5, false)));
        let session = Session::new();
        let grants: Vec<board_rbac::PermissionGrant> = Vec::new();

        let decision = session
            .authorize(&provider, &private_post(7), &grants, Operation::View)
            .await;
        assert_eq!(decision.redirect_route(), Some(Route::Board));

        let decision = session
            .authorize(&provider, &private_post(5), &grants, Operation::Delete)
            .await;
        assert!(decision.is_allowed());
    }

    #[tokio::test]
    async fn test_guards_without_session() {
        let provider = FakeProvider::new(None);
        let session = Session::new();

        assert_eq!(
            session.require_session(&provider).await.redirect_route(),
            Some(Route::Login)
        );
        assert_eq!(
            session.require_admin(&provider).await.redirect_route(),
            Some(Route::Login)
        );
    }

    #[tokio::test]
    async fn test_admin_guard() {
        let provider = FakeProvider::new(Some(user(1, true)));
        let session = Session::new();
        assert!(session.require_admin(&provider).await.is_allowed());

        let session = Session::with_user(Some(user(2, false)));
        assert_eq!(
            session.require_admin(&provider).await.redirect_route(),
            Some(Route::Board)
        );
    }
}
