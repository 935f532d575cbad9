use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use stagecraft_core::{AppError, AppResult};

use crate::{AuthScreenConfig, HomeConfig, OnboardingConfig, SplashConfig};

/// Collection under which the per-screen documents are stored.
pub const CONFIG_COLLECTION: &str = "config";

/// Screens the application can present; also the configuration document keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    /// Launch screen.
    Splash,
    /// First-run carousel.
    Onboarding,
    /// Credential entry.
    Login,
    /// Account creation overlay.
    Registration,
    /// Signed-in landing screen.
    Home,
}

impl Screen {
    /// Every screen, in seeding order.
    pub const ALL: [Self; 5] = [
        Self::Splash,
        Self::Onboarding,
        Self::Login,
        Self::Registration,
        Self::Home,
    ];

    /// Returns the stable document key.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Splash => "splash",
            Self::Onboarding => "onboarding",
            Self::Login => "login",
            Self::Registration => "registration",
            Self::Home => "home",
        }
    }
}

impl FromStr for Screen {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "splash" => Ok(Self::Splash),
            "onboarding" => Ok(Self::Onboarding),
            "login" => Ok(Self::Login),
            "registration" => Ok(Self::Registration),
            "home" => Ok(Self::Home),
            _ => Err(AppError::Validation(format!("unknown screen '{value}'"))),
        }
    }
}

impl Display for Screen {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Typed payload of one screen's configuration document.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenConfig {
    /// Launch screen payload.
    Splash(SplashConfig),
    /// First-run carousel payload.
    Onboarding(OnboardingConfig),
    /// Login form payload.
    Login(AuthScreenConfig),
    /// Registration form payload.
    Registration(AuthScreenConfig),
    /// Signed-in landing payload.
    Home(HomeConfig),
}

impl ScreenConfig {
    /// Decodes the raw document stored under `screen` into its typed payload.
    pub fn decode(screen: Screen, document: Value) -> AppResult<Self> {
        let decoded = match screen {
            Screen::Splash => SplashConfig::from_document(document).map(Self::Splash),
            Screen::Onboarding => OnboardingConfig::from_document(document).map(Self::Onboarding),
            Screen::Login => AuthScreenConfig::from_document(document).map(Self::Login),
            Screen::Registration => {
                AuthScreenConfig::from_document(document).map(Self::Registration)
            }
            Screen::Home => HomeConfig::from_document(document).map(Self::Home),
        };

        decoded.map_err(|error| decode_error(screen, error))
    }

    /// Returns the screen this payload belongs to.
    #[must_use]
    pub fn screen(&self) -> Screen {
        match self {
            Self::Splash(_) => Screen::Splash,
            Self::Onboarding(_) => Screen::Onboarding,
            Self::Login(_) => Screen::Login,
            Self::Registration(_) => Screen::Registration,
            Self::Home(_) => Screen::Home,
        }
    }
}

fn decode_error(screen: Screen, error: AppError) -> AppError {
    match error {
        AppError::Decode(message) | AppError::Validation(message) => {
            AppError::Decode(format!("{CONFIG_COLLECTION}/{screen}: {message}"))
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use serde_json::json;
    use stagecraft_core::AppError;

    use super::{Screen, ScreenConfig};

    #[test]
    fn screen_keys_round_trip() {
        for screen in Screen::ALL {
            let parsed = Screen::from_str(screen.as_str()).unwrap_or_else(|_| unreachable!());
            assert_eq!(parsed, screen);
        }

        assert!(Screen::from_str("settings").is_err());
    }

    #[test]
    fn splash_document_decodes_into_its_variant() {
        let document = json!({
            "showImage": true,
            "imageURL": "https://cdn.example.com/logo.png",
            "backgroundColor": "#FFFFFF",
            "duration": 2.0
        });

        let config = ScreenConfig::decode(Screen::Splash, document)
            .unwrap_or_else(|_| unreachable!());

        assert_eq!(config.screen(), Screen::Splash);
    }

    #[test]
    fn missing_required_key_is_a_decode_error() {
        let document = json!({ "showImage": true });

        let error = match ScreenConfig::decode(Screen::Splash, document) {
            Err(error) => error,
            Ok(_) => unreachable!(),
        };

        assert!(matches!(error, AppError::Decode(_)));
        assert!(error.to_string().contains("config/splash"));
    }

    #[test]
    fn violated_invariants_surface_as_decode_errors() {
        let field = json!({
            "id": "email",
            "type": "email",
            "label": "Email",
            "placeholder": "you@example.com",
            "required": true,
            "order": 1
        });
        let document = json!({
            "fields": [field.clone(), field],
            "buttons": []
        });

        let error = match ScreenConfig::decode(Screen::Login, document) {
            Err(error) => error,
            Ok(_) => unreachable!(),
        };

        assert!(matches!(error, AppError::Decode(_)));
        assert!(error.to_string().contains("duplicate field id"));
    }

    #[test]
    fn optional_keys_may_be_absent() {
        let document = json!({
            "fields": [],
            "buttons": []
        });

        let config = ScreenConfig::decode(Screen::Registration, document);
        assert!(config.is_ok());
    }
}
