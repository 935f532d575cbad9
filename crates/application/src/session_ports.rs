use async_trait::async_trait;
use tokio::sync::watch;

use stagecraft_core::AppResult;

/// Identity provider boundary used by the app state machine.
///
/// Failures surface as the auth error variant; the gateway itself never
/// decides which screen to show.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Authenticates an existing account with email and password.
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<()>;

    /// Creates an account and leaves it signed in.
    async fn sign_up(&self, name: &str, email: &str, password: &str) -> AppResult<()>;

    /// Ends the current session.
    async fn sign_out(&self) -> AppResult<()>;

    /// Returns whether a user is currently signed in.
    async fn current_user_present(&self) -> bool;

    /// Subscribes to the sign-in status; the receiver holds the current
    /// value immediately and observes every change.
    fn subscribe_status(&self) -> watch::Receiver<bool>;
}

/// Device-local store for the few flags that survive restarts.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Returns whether onboarding has been completed on this device.
    async fn load_onboarding_completed(&self) -> AppResult<bool>;

    /// Persists the onboarding-completed flag.
    async fn save_onboarding_completed(&self, completed: bool) -> AppResult<()>;
}
