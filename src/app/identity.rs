//! Console sign-in session.
//!
//! The console authenticates with a token secret the user pastes in. The
//! secret is verified against token introspection before it is stored;
//! a verified sign-in also seeds the active region when no selection has
//! been made yet, so a fresh session lands on the default region with the
//! choice persisted.
//!
//! The token secret lives in the same injected storage as the active
//! region and is removed on sign-out. Nothing here is kept in ambient
//! global state.

use anyhow::Result;
use tracing::{info, warn};

use super::api_client::{ApiClient, TokenSelf};
use super::region_context::RegionContext;
use super::storage::{ACTIVE_REGION_KEY, TOKEN_SECRET_KEY};

/// Authentication state of the console session.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SignInState {
    /// No verified token. Either a fresh session or after sign-out.
    #[default]
    SignedOut,

    /// Token verified; carries the introspection result for display.
    SignedIn(TokenSelf),

    /// The last sign-in attempt failed. The message is shown to the user;
    /// the session behaves as signed out.
    Error(String),
}

/// The console's sign-in session.
#[derive(Debug, Clone, Default)]
pub struct ConsoleIdentity {
    sign_in_state: SignInState,
}

impl ConsoleIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SignInState {
        &self.sign_in_state
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self.sign_in_state, SignInState::SignedIn(_))
    }

    /// The verified token of the current session, if signed in.
    pub fn token(&self) -> Option<&TokenSelf> {
        match &self.sign_in_state {
            SignInState::SignedIn(token) => Some(token),
            _ => None,
        }
    }

    /// The token secret a previous session left in storage, if any.
    /// The shell re-verifies it with [`ConsoleIdentity::sign_in`] at startup.
    pub fn stored_secret(ctx: &RegionContext) -> Option<String> {
        ctx.storage().get(TOKEN_SECRET_KEY)
    }

    /// Verify a token secret and establish the session.
    ///
    /// On success the secret is persisted and, when no region has been
    /// selected yet, the default region is resolved and persisted too.
    /// On failure nothing is stored and the session reports the error.
    pub fn sign_in(
        &mut self,
        api: &ApiClient,
        secret: &str,
        ctx: &mut RegionContext,
    ) -> Result<()> {
        match api.fetch_token_self(secret, ctx) {
            Ok(token) => {
                self.complete_sign_in(secret, token, ctx);
                Ok(())
            }
            Err(e) => {
                warn!("Token verification failed: {}", e);
                self.sign_in_state = SignInState::Error(format!("Token verification failed: {}", e));
                Err(e)
            }
        }
    }

    /// Establish the session from an already-verified token.
    ///
    /// This is the second half of [`ConsoleIdentity::sign_in`], split out
    /// so shells that verify through their own transport can hand the
    /// result over.
    pub fn complete_sign_in(&mut self, secret: &str, token: TokenSelf, ctx: &mut RegionContext) {
        info!("Signed in as token {:?}", token.name);
        ctx.storage_mut().set(TOKEN_SECRET_KEY, secret);

        if ctx.active_region_id().is_none() {
            if let Some(resolved) = ctx.resolve_active_region(None) {
                ctx.storage_mut().set(ACTIVE_REGION_KEY, &resolved);
                info!("Sign-in resolved active region to {}", resolved);
            }
        }

        self.sign_in_state = SignInState::SignedIn(token);
    }

    /// End the session. The token secret is removed from storage; the
    /// region selection survives for the next session.
    pub fn sign_out(&mut self, ctx: &mut RegionContext) {
        info!("Signing out");
        ctx.storage_mut().remove(TOKEN_SECRET_KEY);
        self.sign_in_state = SignInState::SignedOut;
    }
}
