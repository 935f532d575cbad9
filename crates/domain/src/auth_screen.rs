use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use stagecraft_core::{AppError, AppResult};

use crate::{ButtonSpec, FieldSpec};

/// Third-party identity providers toggled per screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialProviders {
    show_apple: bool,
    show_google: bool,
}

impl SocialProviders {
    /// Creates the provider toggles.
    #[must_use]
    pub fn new(show_apple: bool, show_google: bool) -> Self {
        Self {
            show_apple,
            show_google,
        }
    }

    /// Returns whether the Apple provider button is rendered.
    #[must_use]
    pub fn show_apple(&self) -> bool {
        self.show_apple
    }

    /// Returns whether the Google provider button is rendered.
    #[must_use]
    pub fn show_google(&self) -> bool {
        self.show_google
    }
}

/// Input payload used to construct a validated auth screen configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthScreenConfigInput {
    /// Optional heading copy.
    pub title: Option<String>,
    /// Optional subheading copy.
    pub subtitle: Option<String>,
    /// Optional logo reference.
    pub logo_url: Option<String>,
    /// Optional background color token.
    pub background_color: Option<String>,
    /// Optional text color token.
    pub text_color: Option<String>,
    /// Whether the social button row is rendered at all.
    pub social_buttons: Option<bool>,
    /// Per-provider toggles.
    pub social_config: Option<SocialProviders>,
    /// Input controls, unsorted document order.
    pub fields: Vec<FieldSpec>,
    /// Actionable controls, unsorted document order.
    pub buttons: Vec<ButtonSpec>,
    /// Optional terms-of-service copy.
    pub terms_text: Option<String>,
    /// Optional privacy-policy copy.
    pub privacy_text: Option<String>,
    /// Optional divider copy between credential and social sections.
    pub divider_text: Option<String>,
}

/// Configuration shared by the login and registration screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthScreenConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subtitle: Option<String>,
    #[serde(rename = "logoURL", skip_serializing_if = "Option::is_none")]
    logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    social_buttons: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    social_config: Option<SocialProviders>,
    fields: Vec<FieldSpec>,
    buttons: Vec<ButtonSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    terms_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    privacy_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    divider_text: Option<String>,
}

impl AuthScreenConfig {
    /// Creates a validated auth screen configuration.
    pub fn new(input: AuthScreenConfigInput) -> AppResult<Self> {
        let AuthScreenConfigInput {
            title,
            subtitle,
            logo_url,
            background_color,
            text_color,
            social_buttons,
            social_config,
            fields,
            buttons,
            terms_text,
            privacy_text,
            divider_text,
        } = input;

        let config = Self {
            title,
            subtitle,
            logo_url,
            background_color,
            text_color,
            social_buttons,
            social_config,
            fields,
            buttons,
            terms_text,
            privacy_text,
            divider_text,
        };
        config.ensure_invariants()?;
        Ok(config)
    }

    /// Decodes a raw login or registration document.
    pub fn from_document(document: Value) -> AppResult<Self> {
        let config: Self = serde_json::from_value(document)
            .map_err(|error| AppError::Decode(error.to_string()))?;
        config.ensure_invariants()?;
        Ok(config)
    }

    pub(crate) fn ensure_invariants(&self) -> AppResult<()> {
        let mut seen_fields = HashSet::new();
        for field in &self.fields {
            field.ensure_invariants()?;
            if !seen_fields.insert(field.id()) {
                return Err(AppError::Validation(format!(
                    "duplicate field id '{}'",
                    field.id()
                )));
            }
        }

        let mut seen_buttons = HashSet::new();
        for button in &self.buttons {
            button.ensure_invariants()?;
            if !seen_buttons.insert(button.id()) {
                return Err(AppError::Validation(format!(
                    "duplicate button id '{}'",
                    button.id()
                )));
            }
        }

        Ok(())
    }

    /// Returns the optional heading copy.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the optional subheading copy.
    #[must_use]
    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    /// Returns the optional logo reference.
    #[must_use]
    pub fn logo_url(&self) -> Option<&str> {
        self.logo_url.as_deref()
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

    /// Returns whether the social button row is rendered.
    #[must_use]
    pub fn social_buttons(&self) -> Option<bool> {
        self.social_buttons
    }

    /// Returns per-provider toggles.
    #[must_use]
    pub fn social_config(&self) -> Option<SocialProviders> {
        self.social_config
    }

    /// Returns input controls in document order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Returns actionable controls in document order.
    #[must_use]
    pub fn buttons(&self) -> &[ButtonSpec] {
        &self.buttons
    }

    /// Returns input controls sorted by order key, ties in document order.
    #[must_use]
    pub fn fields_in_order(&self) -> Vec<&FieldSpec> {
        let mut ordered: Vec<&FieldSpec> = self.fields.iter().collect();
        ordered.sort_by_key(|field| field.order());
        ordered
    }

    /// Returns actionable controls sorted by order key, ties in document order.
    #[must_use]
    pub fn buttons_in_order(&self) -> Vec<&ButtonSpec> {
        let mut ordered: Vec<&ButtonSpec> = self.buttons.iter().collect();
        ordered.sort_by_key(|button| button.order());
        ordered
    }

    /// Returns the optional terms-of-service copy.
    #[must_use]
    pub fn terms_text(&self) -> Option<&str> {
        self.terms_text.as_deref()
    }

    /// Returns the optional privacy-policy copy.
    #[must_use]
    pub fn privacy_text(&self) -> Option<&str> {
        self.privacy_text.as_deref()
    }

    /// Returns the optional divider copy.
    #[must_use]
    pub fn divider_text(&self) -> Option<&str> {
        self.divider_text.as_deref()
    }
}
