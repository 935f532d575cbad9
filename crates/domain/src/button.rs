use std::str::FromStr;

use serde::{Deserialize, Serialize};
use stagecraft_core::{AppError, AppResult};

/// Visual prominence classes for buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonKind {
    /// Main call to action.
    Primary,
    /// Supporting action.
    Secondary,
    /// Third-party identity action.
    Social,
    /// Inline text-style action.
    Link,
}

impl ButtonKind {
    /// Returns the stable document value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Social => "social",
            Self::Link => "link",
        }
    }
}

impl FromStr for ButtonKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "primary" => Ok(Self::Primary),
            "secondary" => Ok(Self::Secondary),
            "social" => Ok(Self::Social),
            "link" => Ok(Self::Link),
            _ => Err(AppError::Validation(format!(
                "unknown button kind '{value}'"
            ))),
        }
    }
}

/// Button rendering styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    /// Solid background.
    Filled,
    /// Border only.
    Outlined,
    /// No chrome.
    Plain,
}

impl ButtonStyle {
    /// Returns the stable document value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Filled => "filled",
            Self::Outlined => "outlined",
            Self::Plain => "plain",
        }
    }
}

impl FromStr for ButtonStyle {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "filled" => Ok(Self::Filled),
            "outlined" => Ok(Self::Outlined),
            "plain" => Ok(Self::Plain),
            _ => Err(AppError::Validation(format!(
                "unknown button style '{value}'"
            ))),
        }
    }
}

/// Closed vocabulary of symbolic actions a button can carry.
///
/// Documents using a value outside this vocabulary fail to decode; which
/// actions have client behavior on a given screen is the form interpreter's
/// concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ButtonAction {
    /// Submit credentials on the login screen, or return to it elsewhere.
    Login,
    /// Open the registration flow, or submit it when already there.
    Register,
    /// Google identity sign-in.
    GoogleSignIn,
    /// Apple identity sign-in.
    AppleSignIn,
    /// Start password recovery.
    ForgotPassword,
    /// Leave onboarding early.
    Skip,
    /// Advance to the next onboarding page.
    Continue,
    /// Conclude onboarding from the last page.
    Finish,
}

impl ButtonAction {
    /// Returns the stable document value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
            Self::GoogleSignIn => "googleSignIn",
            Self::AppleSignIn => "appleSignIn",
            Self::ForgotPassword => "forgotPassword",
            Self::Skip => "skip",
            Self::Continue => "continue",
            Self::Finish => "finish",
        }
    }
}

impl FromStr for ButtonAction {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "login" => Ok(Self::Login),
            "register" => Ok(Self::Register),
            "googleSignIn" => Ok(Self::GoogleSignIn),
            "appleSignIn" => Ok(Self::AppleSignIn),
            "forgotPassword" => Ok(Self::ForgotPassword),
            "skip" => Ok(Self::Skip),
            "continue" => Ok(Self::Continue),
            "finish" => Ok(Self::Finish),
            _ => Err(AppError::Validation(format!(
                "unknown button action '{value}'"
            ))),
        }
    }
}

/// Input payload used to construct a validated button description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonSpecInput {
    /// Button identifier, unique within its screen.
    pub id: String,
    /// Visual prominence class.
    pub kind: ButtonKind,
    /// User-facing title.
    pub title: String,
    /// Rendering style.
    pub style: ButtonStyle,
    /// Sort key; ties keep document order.
    pub order: i32,
    /// Symbolic action the client interprets.
    pub action: ButtonAction,
    /// Optional background color token.
    pub background_color: Option<String>,
    /// Optional text color token.
    pub text_color: Option<String>,
    /// Optional icon token.
    pub icon: Option<String>,
}

/// One actionable control described by a screen document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonSpec {
    id: String,
    #[serde(rename = "type")]
    kind: ButtonKind,
    title: String,
    style: ButtonStyle,
    order: i32,
    action: ButtonAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<String>,
}

impl ButtonSpec {
    /// Creates a validated button description.
    pub fn new(input: ButtonSpecInput) -> AppResult<Self> {
        let ButtonSpecInput {
            id,
            kind,
            title,
            style,
            order,
            action,
            background_color,
            text_color,
            icon,
        } = input;

        let button = Self {
            id,
            kind,
            title,
            style,
            order,
            action,
            background_color,
            text_color,
            icon,
        };
        button.ensure_invariants()?;
        Ok(button)
    }

    pub(crate) fn ensure_invariants(&self) -> AppResult<()> {
        if self.id.trim().is_empty() {
            return Err(AppError::Validation(
                "button id must not be empty".to_owned(),
            ));
        }

        Ok(())
    }

    /// Returns the button identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the visual prominence class.
    #[must_use]
    pub fn kind(&self) -> ButtonKind {
        self.kind
    }

    /// Returns the user-facing title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the rendering style.
    #[must_use]
    pub fn style(&self) -> ButtonStyle {
        self.style
    }

    /// Returns the sort key.
    #[must_use]
    pub fn order(&self) -> i32 {
        self.order
    }

    /// Returns the symbolic action.
    #[must_use]
    pub fn action(&self) -> ButtonAction {
        self.action
    }

    /// Returns the optional background color token.
    #[must_use]
    pub fn background_color(&self) -> Option<&str> {
        self.background_color.as_deref()
    }

    /// Returns the optional text color token.
    #[must_use]
    pub fn text_color(&self) -> Option<&str> {
        self.text_color.as_deref()
    }

    /// Returns the optional icon token.
    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }
}
