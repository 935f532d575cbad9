use serde::{Deserialize, Serialize};
use serde_json::Value;
use stagecraft_core::{AppError, AppResult};

/// One onboarding carousel page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingPage {
    id: String,
    #[serde(rename = "imageURL")]
    image_url: String,
    title: String,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text_color: Option<String>,
}

impl OnboardingPage {
    /// Creates a validated onboarding page.
    pub fn new(
        id: impl Into<String>,
        image_url: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        background_color: Option<String>,
        text_color: Option<String>,
    ) -> AppResult<Self> {
        let page = Self {
            id: id.into(),
            image_url: image_url.into(),
            title: title.into(),
            description: description.into(),
            background_color,
            text_color,
        };
        page.ensure_invariants()?;
        Ok(page)
    }

    pub(crate) fn ensure_invariants(&self) -> AppResult<()> {
        if self.id.trim().is_empty() {
            return Err(AppError::Validation(
                "onboarding page id must not be empty".to_owned(),
            ));
        }

        Ok(())
    }

    /// Returns the page identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the page image reference.
    #[must_use]
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    /// Returns the page title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the page description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
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
}

/// Titles and colors for the onboarding flow buttons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingButtons {
    skip_button_title: String,
    continue_button_title: String,
    finish_button_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    button_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    button_text_color: Option<String>,
}

impl OnboardingButtons {
    /// Creates the onboarding button copy.
    #[must_use]
    pub fn new(
        skip_button_title: impl Into<String>,
        continue_button_title: impl Into<String>,
        finish_button_title: impl Into<String>,
        button_color: Option<String>,
        button_text_color: Option<String>,
    ) -> Self {
        Self {
            skip_button_title: skip_button_title.into(),
            continue_button_title: continue_button_title.into(),
            finish_button_title: finish_button_title.into(),
            button_color,
            button_text_color,
        }
    }

    /// Returns the skip button title.
    #[must_use]
    pub fn skip_button_title(&self) -> &str {
        &self.skip_button_title
    }

    /// Returns the continue button title.
    #[must_use]
    pub fn continue_button_title(&self) -> &str {
        &self.continue_button_title
    }

    /// Returns the title shown on the last page.
    #[must_use]
    pub fn finish_button_title(&self) -> &str {
        &self.finish_button_title
    }

    /// Returns the optional button color token.
    #[must_use]
    pub fn button_color(&self) -> Option<&str> {
        self.button_color.as_deref()
    }

    /// Returns the optional button text color token.
    #[must_use]
    pub fn button_text_color(&self) -> Option<&str> {
        self.button_text_color.as_deref()
    }
}

/// Onboarding carousel configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingConfig {
    pages: Vec<OnboardingPage>,
    show_skip_button: bool,
    button_config: OnboardingButtons,
}

impl OnboardingConfig {
    /// Creates a validated onboarding configuration.
    pub fn new(
        pages: Vec<OnboardingPage>,
        show_skip_button: bool,
        button_config: OnboardingButtons,
    ) -> AppResult<Self> {
        let config = Self {
            pages,
            show_skip_button,
            button_config,
        };
        config.ensure_invariants()?;
        Ok(config)
    }

    /// Decodes a raw onboarding document.
    pub fn from_document(document: Value) -> AppResult<Self> {
        let config: Self = serde_json::from_value(document)
            .map_err(|error| AppError::Decode(error.to_string()))?;
        config.ensure_invariants()?;
        Ok(config)
    }

    pub(crate) fn ensure_invariants(&self) -> AppResult<()> {
        if self.pages.is_empty() {
            return Err(AppError::Validation(
                "onboarding must include at least one page".to_owned(),
            ));
        }

        for page in &self.pages {
            page.ensure_invariants()?;
        }

        Ok(())
    }

    /// Returns pages in document order.
    #[must_use]
    pub fn pages(&self) -> &[OnboardingPage] {
        &self.pages
    }

    /// Returns whether the skip button is rendered.
    #[must_use]
    pub fn show_skip_button(&self) -> bool {
        self.show_skip_button
    }

    /// Returns the flow button copy.
    #[must_use]
    pub fn button_config(&self) -> &OnboardingButtons {
        &self.button_config
    }

    /// Returns the zero-based index of the last page.
    #[must_use]
    pub fn last_page_index(&self) -> usize {
        self.pages.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::{OnboardingButtons, OnboardingConfig, OnboardingPage};

    fn buttons() -> OnboardingButtons {
        OnboardingButtons::new("Skip", "Next", "Get started", None, None)
    }

    #[test]
    fn onboarding_requires_at_least_one_page() {
        let config = OnboardingConfig::new(Vec::new(), true, buttons());
        assert!(config.is_err());
    }

    #[test]
    fn onboarding_rejects_blank_page_ids() {
        let page = OnboardingPage::new("  ", "https://cdn.example.com/1.png", "One", "First", None, None);
        assert!(page.is_err());
    }

    #[test]
    fn last_page_index_is_zero_based() {
        let pages = vec![
            OnboardingPage::new("one", "https://cdn.example.com/1.png", "One", "First", None, None)
                .unwrap_or_else(|_| unreachable!()),
            OnboardingPage::new("two", "https://cdn.example.com/2.png", "Two", "Second", None, None)
                .unwrap_or_else(|_| unreachable!()),
        ];
        let config =
            OnboardingConfig::new(pages, false, buttons()).unwrap_or_else(|_| unreachable!());

        assert_eq!(config.last_page_index(), 1);
    }
}
