use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock, watch};
use tokio::time::{Instant, sleep};
use tracing::{info, warn};

use stagecraft_core::AppResult;
use stagecraft_domain::Screen;

use crate::config_service::{ConfigBundle, ConfigService};
use crate::session_ports::{AuthGateway, PreferenceStore};

const DEFAULT_SPLASH_MINIMUM: Duration = Duration::from_secs(2);

/// Timing knobs for the state machine.
#[derive(Debug, Clone)]
pub struct StateMachineOptions {
    /// Minimum time the launch screen stays visible during startup; a longer
    /// configured splash duration extends it.
    pub splash_minimum: Duration,
}

impl Default for StateMachineOptions {
    fn default() -> Self {
        Self {
            splash_minimum: DEFAULT_SPLASH_MINIMUM,
        }
    }
}

/// Snapshot of the app-level session state.
///
/// Snapshots are cloned out to observers; only the state machine mutates the
/// live session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSession {
    screen: Screen,
    authenticated: bool,
    onboarding_completed: bool,
    onboarding_page: usize,
    last_error: Option<String>,
}

impl AppSession {
    fn initial() -> Self {
        Self {
            screen: Screen::Splash,
            authenticated: false,
            onboarding_completed: false,
            onboarding_page: 0,
            last_error: None,
        }
    }

    /// Returns the screen the shell should present.
    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Returns whether a user is signed in.
    #[must_use]
    pub fn authenticated(&self) -> bool {
        self.authenticated
    }

    /// Returns whether onboarding has been completed on this device.
    #[must_use]
    pub fn onboarding_completed(&self) -> bool {
        self.onboarding_completed
    }

    /// Returns the zero-based index of the visible onboarding page.
    #[must_use]
    pub fn onboarding_page(&self) -> usize {
        self.onboarding_page
    }

    /// Returns the most recent operation error, cleared by the next
    /// successful transition.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

/// Decides which screen the shell presents and when.
///
/// All mutation funnels through one lock, so concurrent commands and
/// gateway-driven updates apply one at a time. Observers subscribe through
/// a watch channel and receive a snapshot whenever the session actually
/// changes.
pub struct AppStateMachine {
    config_service: ConfigService,
    auth_gateway: Arc<dyn AuthGateway>,
    preference_store: Arc<dyn PreferenceStore>,
    options: StateMachineOptions,
    session: Mutex<AppSession>,
    bundle: RwLock<Option<ConfigBundle>>,
    notifier: watch::Sender<AppSession>,
}

impl AppStateMachine {
    /// Creates a machine over the given ports, parked on the splash screen.
    #[must_use]
    pub fn new(
        config_service: ConfigService,
        auth_gateway: Arc<dyn AuthGateway>,
        preference_store: Arc<dyn PreferenceStore>,
        options: StateMachineOptions,
    ) -> Self {
        let initial = AppSession::initial();
        let (notifier, _) = watch::channel(initial.clone());

        Self {
            config_service,
            auth_gateway,
            preference_store,
            options,
            session: Mutex::new(initial),
            bundle: RwLock::new(None),
            notifier,
        }
    }

    /// Runs the startup sequence and routes off the splash screen.
    ///
    /// Loads the persisted onboarding flag (a read failure degrades to
    /// not-completed), seeds the store on first launch, and fetches the
    /// configuration bundle while the splash minimum elapses in parallel. A
    /// splash document configuring a longer duration extends the wait. On
    /// load failure the session stays on splash with the error recorded and
    /// the error propagates.
    pub async fn start(&self) -> AppResult<()> {
        let onboarding_completed = match self.preference_store.load_onboarding_completed().await {
            Ok(completed) => completed,
            Err(error) => {
                warn!(%error, "failed to read onboarding preference, treating as not completed");
                false
            }
        };
        let authenticated = self.auth_gateway.current_user_present().await;
        self.mutate(|session| {
            session.onboarding_completed = onboarding_completed;
            session.authenticated = authenticated;
        })
        .await;

        let started = Instant::now();
        let (load_outcome, ()) = tokio::join!(
            self.load_configuration(),
            sleep(self.options.splash_minimum)
        );
        let bundle = match load_outcome {
            Ok(bundle) => bundle,
            Err(error) => {
                warn!(%error, "configuration load failed during startup");
                self.mutate(|session| session.last_error = Some(error.to_string()))
                    .await;
                return Err(error);
            }
        };

        let dwell = bundle.splash().dwell(self.options.splash_minimum);
        if let Some(remaining) = dwell.checked_sub(started.elapsed())
            && !remaining.is_zero()
        {
            sleep(remaining).await;
        }

        *self.bundle.write().await = Some(bundle);

        let landing = self
            .mutate(|session| {
                session.last_error = None;
                session.screen = landing_screen(session);
                session.screen
            })
            .await;
        info!(screen = %landing, "startup complete");

        Ok(())
    }

    /// Moves to the next onboarding page; on the last page this completes
    /// the flow. Ignored outside the onboarding screen.
    pub async fn advance_onboarding(&self) -> AppResult<()> {
        let last_page_index = {
            let bundle = self.bundle.read().await;
            bundle
                .as_ref()
                .map_or(0, |bundle| bundle.onboarding().last_page_index())
        };

        let completing = self
            .mutate(|session| {
                if session.screen != Screen::Onboarding {
                    return false;
                }
                if session.onboarding_page < last_page_index {
                    session.onboarding_page += 1;
                    return false;
                }
                true
            })
            .await;

        if completing {
            self.complete_onboarding().await
        } else {
            Ok(())
        }
    }

    /// Marks onboarding as done and routes to login; serves both the skip
    /// and the finish buttons. Ignored outside the onboarding screen.
    ///
    /// The flag is persisted before the session changes: when the write
    /// fails the user stays on onboarding with the error recorded. The
    /// session lock is not held across the write, so the screen is checked
    /// again afterwards; a sign-in that landed home while the write was in
    /// flight keeps its routing and only the completion flag is recorded.
    pub async fn complete_onboarding(&self) -> AppResult<()> {
        if self.session().await.screen() != Screen::Onboarding {
            return Ok(());
        }

        if let Err(error) = self.preference_store.save_onboarding_completed(true).await {
            self.mutate(|session| session.last_error = Some(error.to_string()))
                .await;
            return Err(error);
        }

        self.mutate(|session| {
            session.onboarding_completed = true;
            session.onboarding_page = 0;
            if session.screen == Screen::Onboarding {
                session.screen = Screen::Login;
                session.last_error = None;
            }
        })
        .await;

        Ok(())
    }

    /// Signs in through the gateway; success routes home, failure records
    /// the error and leaves the session unchanged.
    pub async fn sign_in(&self, email: &str, password: &str) -> AppResult<()> {
        match self.auth_gateway.sign_in(email, password).await {
            Ok(()) => {
                self.enter_authenticated().await;
                Ok(())
            }
            Err(error) => {
                self.mutate(|session| session.last_error = Some(error.to_string()))
                    .await;
                Err(error)
            }
        }
    }

    /// Creates an account through the gateway; success routes home, failure
    /// records the error and leaves the session unchanged.
    pub async fn sign_up(&self, name: &str, email: &str, password: &str) -> AppResult<()> {
        match self.auth_gateway.sign_up(name, email, password).await {
            Ok(()) => {
                self.enter_authenticated().await;
                Ok(())
            }
            Err(error) => {
                self.mutate(|session| session.last_error = Some(error.to_string()))
                    .await;
                Err(error)
            }
        }
    }

    /// Ends the session through the gateway; success routes to login,
    /// failure records the error and leaves the session unchanged.
    pub async fn sign_out(&self) -> AppResult<()> {
        match self.auth_gateway.sign_out().await {
            Ok(()) => {
                self.mutate(|session| {
                    session.authenticated = false;
                    session.screen = Screen::Login;
                    session.last_error = None;
                })
                .await;
                Ok(())
            }
            Err(error) => {
                self.mutate(|session| session.last_error = Some(error.to_string()))
                    .await;
                Err(error)
            }
        }
    }

    /// Shows the registration screen; ignored unless login is showing.
    pub async fn open_registration(&self) {
        self.mutate(|session| {
            if session.screen == Screen::Login {
                session.screen = Screen::Registration;
            }
        })
        .await;
    }

    /// Returns from registration to login; ignored unless registration is
    /// showing.
    pub async fn close_registration(&self) {
        self.mutate(|session| {
            if session.screen == Screen::Registration {
                session.screen = Screen::Login;
            }
        })
        .await;
    }

    /// Applies an auth status reported by the gateway and re-resolves the
    /// screen: home when signed in, otherwise onboarding or login depending
    /// on the completion flag.
    ///
    /// An unchanged flag is a no-op, so re-delivered statuses never yank the
    /// user out of a screen. During splash only the flag updates; routing is
    /// deferred until startup finishes.
    pub async fn apply_auth_status(&self, authenticated: bool) {
        self.mutate(|session| {
            if session.authenticated == authenticated {
                return;
            }
            session.authenticated = authenticated;
            if session.screen == Screen::Splash {
                return;
            }
            session.screen = landing_screen(session);
            session.last_error = None;
        })
        .await;
    }

    /// Feeds gateway status changes into [`Self::apply_auth_status`],
    /// starting with the current status. Runs until the gateway drops its
    /// channel; meant to be spawned by the embedder.
    pub async fn run_auth_listener(&self) {
        let mut status = self.auth_gateway.subscribe_status();
        loop {
            let authenticated = *status.borrow_and_update();
            self.apply_auth_status(authenticated).await;
            if status.changed().await.is_err() {
                return;
            }
        }
    }

    /// Subscribes to session snapshots; the receiver holds the current
    /// snapshot immediately and observes every change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AppSession> {
        self.notifier.subscribe()
    }

    /// Returns the current session snapshot.
    pub async fn session(&self) -> AppSession {
        self.session.lock().await.clone()
    }

    /// Returns the loaded configuration, present once startup has
    /// completed.
    pub async fn configuration(&self) -> Option<ConfigBundle> {
        self.bundle.read().await.clone()
    }

    async fn load_configuration(&self) -> AppResult<ConfigBundle> {
        self.config_service.ensure_initial_configuration().await?;
        self.config_service.load_bundle().await
    }

    async fn enter_authenticated(&self) {
        self.mutate(|session| {
            session.authenticated = true;
            session.screen = Screen::Home;
            session.last_error = None;
        })
        .await;
    }

    /// Applies `change` under the session lock and notifies observers when
    /// the session actually changed.
    async fn mutate<R>(&self, change: impl FnOnce(&mut AppSession) -> R) -> R {
        let mut session = self.session.lock().await;
        let result = change(&mut session);
        self.notifier.send_if_modified(|observed| {
            if *observed == *session {
                false
            } else {
                observed.clone_from(&session);
                true
            }
        });
        result
    }
}

/// Auth-derived routing: a signed-in user always lands home, even when
/// onboarding was never finished on this device.
fn landing_screen(session: &AppSession) -> Screen {
    if session.authenticated {
        Screen::Home
    } else if !session.onboarding_completed {
        Screen::Onboarding
    } else {
        Screen::Login
    }
}
