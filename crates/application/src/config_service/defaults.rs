//! Seed documents imported into an empty configuration store.
//!
//! Every document is built through the domain constructors and serialized
//! afterwards, so an invalid seed cannot ship.

use serde::Serialize;
use serde_json::Value;

use stagecraft_core::{AppError, AppResult};
use stagecraft_domain::{
    AuthScreenConfig, AuthScreenConfigInput, ButtonAction, ButtonKind, ButtonSpec,
    ButtonSpecInput, ButtonStyle, CapitalizationHint, FieldKind, FieldSpec, FieldSpecInput,
    HomeConfig, KeyboardHint, OnboardingButtons, OnboardingConfig, OnboardingPage, Screen,
    SocialProviders, SplashConfig, Talk, TalkInput, Track, TracksConfig, WebLink,
};

const EMAIL_PATTERN: &str = r"^[\w.-]+@([\w-]+\.)+[\w-]{2,4}$";
const LOGIN_PASSWORD_PATTERN: &str = r"^.{6,}$";
const NAME_PATTERN: &str = r"^[a-zA-Z\s]{2,}$";
const REGISTRATION_PASSWORD_PATTERN: &str = r"^[A-Za-z\d]{8,}$";

const INK_COLOR: &str = "#101828";
const SURFACE_COLOR: &str = "#FFFFFF";
const ACCENT_COLOR: &str = "#6941C6";

const CDN_BASE: &str = "https://cdn.stagecraft.dev";

/// Builds the seed document stored under `screen`.
pub(super) fn seed_document(screen: Screen) -> AppResult<Value> {
    match screen {
        Screen::Splash => splash_document(),
        Screen::Onboarding => onboarding_document(),
        Screen::Login => login_document(),
        Screen::Registration => registration_document(),
        Screen::Home => home_document(),
    }
}

fn splash_document() -> AppResult<Value> {
    let config = SplashConfig::new(
        true,
        Some(format!("{CDN_BASE}/brand/logo.png")),
        Some("Stagecraft".to_owned()),
        INK_COLOR,
        Some(SURFACE_COLOR.to_owned()),
        Some(2.0),
    )?;

    to_document(Screen::Splash, &config)
}

fn onboarding_document() -> AppResult<Value> {
    let pages = vec![
        OnboardingPage::new(
            "schedule",
            format!("{CDN_BASE}/onboarding/schedule.png"),
            "Build your schedule",
            "Browse every track and pin the talks you care about.",
            None,
            None,
        )?,
        OnboardingPage::new(
            "speakers",
            format!("{CDN_BASE}/onboarding/speakers.png"),
            "Meet the speakers",
            "Profiles, slides and follow-ups for every session.",
            None,
            None,
        )?,
        OnboardingPage::new(
            "venue",
            format!("{CDN_BASE}/onboarding/venue.png"),
            "Find your way",
            "Venue maps keep you on time between rooms.",
            None,
            None,
        )?,
    ];

    let buttons = OnboardingButtons::new(
        "Skip",
        "Next",
        "Get started",
        Some(ACCENT_COLOR.to_owned()),
        Some(SURFACE_COLOR.to_owned()),
    );

    let config = OnboardingConfig::new(pages, true, buttons)?;
    to_document(Screen::Onboarding, &config)
}

fn login_document() -> AppResult<Value> {
    let fields = vec![
        email_field(1)?,
        FieldSpec::new(FieldSpecInput {
            id: "password".to_owned(),
            kind: FieldKind::Password,
            label: "Password".to_owned(),
            placeholder: "Your password".to_owned(),
            required: true,
            validation: Some(LOGIN_PASSWORD_PATTERN.to_owned()),
            error_message: Some("Password must be at least 6 characters".to_owned()),
            order: 2,
            keyboard_type: Some(KeyboardHint::Default),
            autocapitalization: Some(CapitalizationHint::None),
        })?,
    ];

    let buttons = vec![
        ButtonSpec::new(ButtonSpecInput {
            id: "sign_in".to_owned(),
            kind: ButtonKind::Primary,
            title: "Sign in".to_owned(),
            style: ButtonStyle::Filled,
            order: 1,
            action: ButtonAction::Login,
            background_color: Some(ACCENT_COLOR.to_owned()),
            text_color: Some(SURFACE_COLOR.to_owned()),
            icon: None,
        })?,
        ButtonSpec::new(ButtonSpecInput {
            id: "forgot_password".to_owned(),
            kind: ButtonKind::Link,
            title: "Forgot password?".to_owned(),
            style: ButtonStyle::Plain,
            order: 2,
            action: ButtonAction::ForgotPassword,
            background_color: None,
            text_color: None,
            icon: None,
        })?,
        ButtonSpec::new(ButtonSpecInput {
            id: "google_sign_in".to_owned(),
            kind: ButtonKind::Social,
            title: "Continue with Google".to_owned(),
            style: ButtonStyle::Outlined,
            order: 3,
            action: ButtonAction::GoogleSignIn,
            background_color: None,
            text_color: None,
            icon: Some("google".to_owned()),
        })?,
        ButtonSpec::new(ButtonSpecInput {
            id: "apple_sign_in".to_owned(),
            kind: ButtonKind::Social,
            title: "Continue with Apple".to_owned(),
            style: ButtonStyle::Outlined,
            order: 4,
            action: ButtonAction::AppleSignIn,
            background_color: None,
            text_color: None,
            icon: Some("apple".to_owned()),
        })?,
        ButtonSpec::new(ButtonSpecInput {
            id: "create_account".to_owned(),
            kind: ButtonKind::Link,
            title: "New here? Create an account".to_owned(),
            style: ButtonStyle::Plain,
            order: 5,
            action: ButtonAction::Register,
            background_color: None,
            text_color: None,
            icon: None,
        })?,
    ];

    let config = AuthScreenConfig::new(AuthScreenConfigInput {
        title: Some("Welcome back".to_owned()),
        subtitle: Some("Sign in to continue".to_owned()),
        logo_url: Some(format!("{CDN_BASE}/brand/logo.png")),
        background_color: Some(SURFACE_COLOR.to_owned()),
        text_color: Some(INK_COLOR.to_owned()),
        social_buttons: Some(true),
        social_config: Some(SocialProviders::new(true, true)),
        fields,
        buttons,
        terms_text: None,
        privacy_text: None,
        divider_text: Some("or continue with".to_owned()),
    })?;

    to_document(Screen::Login, &config)
}

fn registration_document() -> AppResult<Value> {
    let fields = vec![
        FieldSpec::new(FieldSpecInput {
            id: "name".to_owned(),
            kind: FieldKind::Text,
            label: "Full name".to_owned(),
            placeholder: "Ada Lovelace".to_owned(),
            required: true,
            validation: Some(NAME_PATTERN.to_owned()),
            error_message: Some("Enter your full name".to_owned()),
            order: 1,
            keyboard_type: Some(KeyboardHint::Default),
            autocapitalization: Some(CapitalizationHint::Words),
        })?,
        email_field(2)?,
        FieldSpec::new(FieldSpecInput {
            id: "password".to_owned(),
            kind: FieldKind::Password,
            label: "Create a password".to_owned(),
            placeholder: "At least 8 letters and digits".to_owned(),
            required: true,
            validation: Some(REGISTRATION_PASSWORD_PATTERN.to_owned()),
            error_message: Some("Use at least 8 letters and digits".to_owned()),
            order: 3,
            keyboard_type: Some(KeyboardHint::Default),
            autocapitalization: Some(CapitalizationHint::None),
        })?,
    ];

    let buttons = vec![
        ButtonSpec::new(ButtonSpecInput {
            id: "create_account".to_owned(),
            kind: ButtonKind::Primary,
            title: "Create account".to_owned(),
            style: ButtonStyle::Filled,
            order: 1,
            action: ButtonAction::Register,
            background_color: Some(ACCENT_COLOR.to_owned()),
            text_color: Some(SURFACE_COLOR.to_owned()),
            icon: None,
        })?,
        ButtonSpec::new(ButtonSpecInput {
            id: "back_to_login".to_owned(),
            kind: ButtonKind::Link,
            title: "Already have an account? Sign in".to_owned(),
            style: ButtonStyle::Plain,
            order: 2,
            action: ButtonAction::Login,
            background_color: None,
            text_color: None,
            icon: None,
        })?,
    ];

    let config = AuthScreenConfig::new(AuthScreenConfigInput {
        title: Some("Create your account".to_owned()),
        subtitle: Some("Join this year's conference".to_owned()),
        logo_url: None,
        background_color: Some(SURFACE_COLOR.to_owned()),
        text_color: Some(INK_COLOR.to_owned()),
        social_buttons: None,
        social_config: None,
        fields,
        buttons,
        terms_text: Some("By continuing you agree to the Terms of Service.".to_owned()),
        privacy_text: Some("We handle your data as described in the Privacy Policy.".to_owned()),
        divider_text: None,
    })?;

    to_document(Screen::Registration, &config)
}

fn home_document() -> AppResult<Value> {
    let ai_track = Track::new(
        "ai",
        "AI & ML",
        Some(ACCENT_COLOR.to_owned()),
        vec![
            Talk::new(TalkInput {
                id: "edge-models".to_owned(),
                title: "Shipping models to the edge".to_owned(),
                description: "Quantization, batching and the tradeoffs that matter on-device."
                    .to_owned(),
                speaker_name: "Dana Whitmore".to_owned(),
                speaker_role: Some("ML Engineer".to_owned()),
                image_url: Some(format!("{CDN_BASE}/speakers/dana-whitmore.png")),
                time: "09:30".to_owned(),
                location: Some("Main stage".to_owned()),
                track_id: "ai".to_owned(),
                tags: Some(vec!["ml".to_owned(), "mobile".to_owned()]),
            })?,
            Talk::new(TalkInput {
                id: "eval-loops".to_owned(),
                title: "Evaluation loops that catch regressions".to_owned(),
                description: "Building measurement into every model release.".to_owned(),
                speaker_name: "Priya Natarajan".to_owned(),
                speaker_role: Some("Research Lead".to_owned()),
                image_url: Some(format!("{CDN_BASE}/speakers/priya-natarajan.png")),
                time: "11:00".to_owned(),
                location: Some("Main stage".to_owned()),
                track_id: "ai".to_owned(),
                tags: Some(vec!["ml".to_owned(), "testing".to_owned()]),
            })?,
        ],
    )?;

    let web_track = Track::new(
        "web",
        "Web",
        Some("#12B76A".to_owned()),
        vec![Talk::new(TalkInput {
            id: "streaming-ui".to_owned(),
            title: "Streaming interfaces without the jank".to_owned(),
            description: "Progressive rendering patterns for slow networks.".to_owned(),
            speaker_name: "Marco Ruiz".to_owned(),
            speaker_role: None,
            image_url: Some(format!("{CDN_BASE}/speakers/marco-ruiz.png")),
            time: "10:15".to_owned(),
            location: Some("River room".to_owned()),
            track_id: "web".to_owned(),
            tags: Some(vec!["web".to_owned(), "performance".to_owned()]),
        })?],
    )?;

    let mobile_track = Track::new(
        "mobile",
        "Mobile",
        Some("#F79009".to_owned()),
        vec![Talk::new(TalkInput {
            id: "offline-first".to_owned(),
            title: "Offline-first sync that users trust".to_owned(),
            description: "Conflict handling beyond last-write-wins.".to_owned(),
            speaker_name: "Yuki Tanaka".to_owned(),
            speaker_role: Some("Staff Engineer".to_owned()),
            image_url: Some(format!("{CDN_BASE}/speakers/yuki-tanaka.png")),
            time: "13:45".to_owned(),
            location: Some("Harbor room".to_owned()),
            track_id: "mobile".to_owned(),
            tags: Some(vec!["mobile".to_owned(), "sync".to_owned()]),
        })?],
    )?;

    let tracks = TracksConfig::new(
        vec![ai_track, web_track, mobile_track],
        Some("ai".to_owned()),
    )?;

    let config = HomeConfig::new(
        "Welcome to Stagecraft Conf",
        Some(format!("{CDN_BASE}/home/banner.png")),
        Some(SURFACE_COLOR.to_owned()),
        Some(INK_COLOR.to_owned()),
        Some(WebLink::new(
            "https://stagecraft.dev/schedule",
            "Full schedule on the web",
        )),
        tracks,
    )?;

    to_document(Screen::Home, &config)
}

fn email_field(order: i32) -> AppResult<FieldSpec> {
    FieldSpec::new(FieldSpecInput {
        id: "email".to_owned(),
        kind: FieldKind::Email,
        label: "Email".to_owned(),
        placeholder: "you@example.com".to_owned(),
        required: true,
        validation: Some(EMAIL_PATTERN.to_owned()),
        error_message: Some("Enter a valid email address".to_owned()),
        order,
        keyboard_type: Some(KeyboardHint::Email),
        autocapitalization: Some(CapitalizationHint::None),
    })
}

fn to_document<T: Serialize>(screen: Screen, config: &T) -> AppResult<Value> {
    serde_json::to_value(config)
        .map_err(|error| AppError::Internal(format!("serializing seed for '{screen}': {error}")))
}
