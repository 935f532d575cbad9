use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use stagecraft_core::{AppError, AppResult};
use stagecraft_domain::{
    AuthScreenConfig, HomeConfig, OnboardingConfig, Screen, ScreenConfig, SplashConfig,
};

use crate::config_ports::ConfigDocumentStore;

/// Fully decoded configuration for every screen the app can present.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigBundle {
    splash: SplashConfig,
    onboarding: OnboardingConfig,
    login: AuthScreenConfig,
    registration: AuthScreenConfig,
    home: HomeConfig,
}

impl ConfigBundle {
    /// Returns the launch screen configuration.
    #[must_use]
    pub fn splash(&self) -> &SplashConfig {
        &self.splash
    }

    /// Returns the onboarding carousel configuration.
    #[must_use]
    pub fn onboarding(&self) -> &OnboardingConfig {
        &self.onboarding
    }

    /// Returns the login screen configuration.
    #[must_use]
    pub fn login(&self) -> &AuthScreenConfig {
        &self.login
    }

    /// Returns the registration screen configuration.
    #[must_use]
    pub fn registration(&self) -> &AuthScreenConfig {
        &self.registration
    }

    /// Returns the home screen configuration.
    #[must_use]
    pub fn home(&self) -> &HomeConfig {
        &self.home
    }

    /// Returns the tagged payload for one screen.
    #[must_use]
    pub fn config_for(&self, screen: Screen) -> ScreenConfig {
        match screen {
            Screen::Splash => ScreenConfig::Splash(self.splash.clone()),
            Screen::Onboarding => ScreenConfig::Onboarding(self.onboarding.clone()),
            Screen::Login => ScreenConfig::Login(self.login.clone()),
            Screen::Registration => ScreenConfig::Registration(self.registration.clone()),
            Screen::Home => ScreenConfig::Home(self.home.clone()),
        }
    }
}

/// Loads, seeds and updates the per-screen configuration documents.
#[derive(Clone)]
pub struct ConfigService {
    store: Arc<dyn ConfigDocumentStore>,
}

impl ConfigService {
    /// Creates a service backed by the given document store.
    #[must_use]
    pub fn new(store: Arc<dyn ConfigDocumentStore>) -> Self {
        Self { store }
    }

    /// Fetches and decodes the configuration document for `screen`.
    pub async fn fetch(&self, screen: Screen) -> AppResult<ScreenConfig> {
        let document = self
            .store
            .read_document(screen.as_str())
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("no configuration document for '{screen}'"))
            })?;

        ScreenConfig::decode(screen, document)
    }

    /// Fetches the launch screen configuration.
    pub async fn fetch_splash(&self) -> AppResult<SplashConfig> {
        match self.fetch(Screen::Splash).await? {
            ScreenConfig::Splash(config) => Ok(config),
            other => Err(mismatched_screen(Screen::Splash, &other)),
        }
    }

    /// Fetches the onboarding carousel configuration.
    pub async fn fetch_onboarding(&self) -> AppResult<OnboardingConfig> {
        match self.fetch(Screen::Onboarding).await? {
            ScreenConfig::Onboarding(config) => Ok(config),
            other => Err(mismatched_screen(Screen::Onboarding, &other)),
        }
    }

    /// Fetches the login screen configuration.
    pub async fn fetch_login(&self) -> AppResult<AuthScreenConfig> {
        match self.fetch(Screen::Login).await? {
            ScreenConfig::Login(config) => Ok(config),
            other => Err(mismatched_screen(Screen::Login, &other)),
        }
    }

    /// Fetches the registration screen configuration.
    pub async fn fetch_registration(&self) -> AppResult<AuthScreenConfig> {
        match self.fetch(Screen::Registration).await? {
            ScreenConfig::Registration(config) => Ok(config),
            other => Err(mismatched_screen(Screen::Registration, &other)),
        }
    }

    /// Fetches the home screen configuration.
    pub async fn fetch_home(&self) -> AppResult<HomeConfig> {
        match self.fetch(Screen::Home).await? {
            ScreenConfig::Home(config) => Ok(config),
            other => Err(mismatched_screen(Screen::Home, &other)),
        }
    }

    /// Returns whether the store already holds the splash document.
    ///
    /// Splash presence stands in for the whole seeded set; a store that lost
    /// individual documents surfaces later as a fetch error.
    pub async fn check_initial_configuration(&self) -> AppResult<bool> {
        Ok(self
            .store
            .read_document(Screen::Splash.as_str())
            .await?
            .is_some())
    }

    /// Writes the five seed documents in screen order.
    ///
    /// The import is sequential and best-effort: the first failing write
    /// stops it, and documents written before the failure stay written.
    pub async fn import_initial_configuration(&self) -> AppResult<()> {
        for screen in Screen::ALL {
            let document = defaults::seed_document(screen)?;
            self.store
                .write_document(screen.as_str(), document)
                .await
                .map_err(|error| {
                    AppError::Import(format!("writing seed document '{screen}': {error}"))
                })?;
        }

        Ok(())
    }

    /// Imports the seed documents when the store has never been seeded.
    ///
    /// Returns whether an import ran.
    pub async fn ensure_initial_configuration(&self) -> AppResult<bool> {
        if self.check_initial_configuration().await? {
            return Ok(false);
        }

        info!("configuration store is empty, importing seed documents");
        self.import_initial_configuration().await?;
        Ok(true)
    }

    /// Deep-merges `partial` into the document for `screen`.
    ///
    /// Unspecified fields keep their stored values; arrays and scalars in
    /// the partial replace wholesale.
    pub async fn update_config(&self, screen: Screen, partial: Value) -> AppResult<()> {
        if !partial.is_object() {
            return Err(AppError::Validation(format!(
                "partial update for '{screen}' must be a JSON object"
            )));
        }

        self.store.merge_document(screen.as_str(), partial).await
    }

    /// Deletes every stored document and re-imports the seeds.
    ///
    /// Maintenance path, deliberately not atomic: a crash between the
    /// deletes and the import leaves the store empty until the next
    /// [`Self::ensure_initial_configuration`].
    pub async fn reset_to_defaults(&self) -> AppResult<()> {
        for key in self.store.list_document_keys().await? {
            self.store.delete_document(key.as_str()).await?;
        }

        self.import_initial_configuration().await
    }

    /// Fetches every screen configuration as one bundle.
    ///
    /// The five fetches run concurrently and the load fails as a whole when
    /// any of them fails.
    pub async fn load_bundle(&self) -> AppResult<ConfigBundle> {
        let (splash, onboarding, login, registration, home) = tokio::try_join!(
            self.fetch_splash(),
            self.fetch_onboarding(),
            self.fetch_login(),
            self.fetch_registration(),
            self.fetch_home(),
        )?;

        Ok(ConfigBundle {
            splash,
            onboarding,
            login,
            registration,
            home,
        })
    }
}

fn mismatched_screen(expected: Screen, decoded: &ScreenConfig) -> AppError {
    AppError::Internal(format!(
        "expected configuration for '{expected}', decoded '{}'",
        decoded.screen()
    ))
}

mod defaults;

#[cfg(test)]
mod tests;
