//! Screen configuration entities and invariants.

#![forbid(unsafe_code)]

mod auth_screen;
mod button;
mod field;
mod home;
mod onboarding;
mod screen;
mod splash;

pub use auth_screen::{AuthScreenConfig, AuthScreenConfigInput, SocialProviders};
pub use button::{ButtonAction, ButtonKind, ButtonSpec, ButtonSpecInput, ButtonStyle};
pub use field::{
    CapitalizationHint, FieldKind, FieldSpec, FieldSpecInput, FieldValidation, KeyboardHint,
    is_form_valid,
};
pub use home::{HomeConfig, Talk, TalkInput, Track, TracksConfig, WebLink};
pub use onboarding::{OnboardingButtons, OnboardingConfig, OnboardingPage};
pub use screen::{CONFIG_COLLECTION, Screen, ScreenConfig};
pub use splash::SplashConfig;
