use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use stagecraft_core::{AppError, AppResult};

/// Launch screen configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplashConfig {
    show_image: bool,
    #[serde(rename = "imageURL", skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    background_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration: Option<f64>,
}

impl SplashConfig {
    /// Creates a validated splash configuration.
    pub fn new(
        show_image: bool,
        image_url: Option<String>,
        text: Option<String>,
        background_color: impl Into<String>,
        text_color: Option<String>,
        duration: Option<f64>,
    ) -> AppResult<Self> {
        let config = Self {
            show_image,
            image_url,
            text,
            background_color: background_color.into(),
            text_color,
            duration,
        };
        config.ensure_invariants()?;
        Ok(config)
    }

    /// Decodes a raw splash document.
    pub fn from_document(document: Value) -> AppResult<Self> {
        let config: Self = serde_json::from_value(document)
            .map_err(|error| AppError::Decode(error.to_string()))?;
        config.ensure_invariants()?;
        Ok(config)
    }

    pub(crate) fn ensure_invariants(&self) -> AppResult<()> {
        if let Some(duration) = self.duration
            && !(duration.is_finite() && duration >= 0.0)
        {
            return Err(AppError::Validation(
                "splash duration must be a finite number of seconds, zero or more".to_owned(),
            ));
        }

        Ok(())
    }

    /// Returns whether the splash image is rendered.
    #[must_use]
    pub fn show_image(&self) -> bool {
        self.show_image
    }

    /// Returns the optional splash image reference.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Returns the optional splash copy.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Returns the background color token.
    #[must_use]
    pub fn background_color(&self) -> &str {
        &self.background_color
    }

    /// Returns the optional text color token.
    #[must_use]
    pub fn text_color(&self) -> Option<&str> {
        self.text_color.as_deref()
    }

    /// Returns the configured display duration in seconds, if any.
    #[must_use]
    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    /// Minimum time the launch screen stays visible. Durations past what a
    /// `Duration` can represent saturate instead of overflowing.
    #[must_use]
    pub fn dwell(&self, fallback: Duration) -> Duration {
        self.duration.map_or(fallback, |seconds| {
            Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::SplashConfig;

    #[test]
    fn splash_rejects_negative_duration() {
        let config = SplashConfig::new(false, None, None, "#FFFFFF", None, Some(-1.0));
        assert!(config.is_err());
    }

    #[test]
    fn splash_rejects_non_finite_duration() {
        let config = SplashConfig::new(false, None, None, "#FFFFFF", None, Some(f64::NAN));
        assert!(config.is_err());

        let config = SplashConfig::new(false, None, None, "#FFFFFF", None, Some(f64::INFINITY));
        assert!(config.is_err());
    }

    #[test]
    fn splash_accepts_durations_past_an_hour() {
        let config = SplashConfig::new(false, None, None, "#FFFFFF", None, Some(7200.0));
        assert!(config.is_ok_and(|config| config.duration() == Some(7200.0)));
    }

    #[test]
    fn dwell_falls_back_when_duration_absent() {
        let config = SplashConfig::new(true, None, None, "#FFFFFF", None, None)
            .unwrap_or_else(|_| unreachable!());

        assert_eq!(config.dwell(Duration::from_secs(2)), Duration::from_secs(2));
    }

    #[test]
    fn dwell_uses_configured_duration() {
        let config = SplashConfig::new(true, None, None, "#FFFFFF", None, Some(3.5))
            .unwrap_or_else(|_| unreachable!());

        assert_eq!(
            config.dwell(Duration::from_secs(2)),
            Duration::from_secs_f64(3.5)
        );
    }

    #[test]
    fn dwell_saturates_for_unrepresentable_durations() {
        let config = SplashConfig::new(true, None, None, "#FFFFFF", None, Some(1e300))
            .unwrap_or_else(|_| unreachable!());

        assert_eq!(config.dwell(Duration::from_secs(2)), Duration::MAX);
    }
}
