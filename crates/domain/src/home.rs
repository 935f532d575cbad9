use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use stagecraft_core::{AppError, AppResult};

/// External link rendered on the home screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebLink {
    url: String,
    text: String,
}

impl WebLink {
    /// Creates a web link.
    #[must_use]
    pub fn new(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            text: text.into(),
        }
    }

    /// Returns the link target.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the link copy.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Input payload used to construct a validated talk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TalkInput {
    /// Talk identifier.
    pub id: String,
    /// Talk title.
    pub title: String,
    /// Talk abstract.
    pub description: String,
    /// Speaker display name.
    pub speaker_name: String,
    /// Optional speaker role or affiliation.
    pub speaker_role: Option<String>,
    /// Optional speaker or talk image reference.
    pub image_url: Option<String>,
    /// Display time slot.
    pub time: String,
    /// Optional room or venue.
    pub location: Option<String>,
    /// Owning track identifier.
    pub track_id: String,
    /// Optional topic tags.
    pub tags: Option<Vec<String>>,
}

/// One scheduled talk inside a track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Talk {
    id: String,
    title: String,
    description: String,
    speaker_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    speaker_role: Option<String>,
    #[serde(rename = "imageURL", skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
    time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<String>,
    track_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    tags: Option<Vec<String>>,
}

impl Talk {
    /// Creates a validated talk.
    pub fn new(input: TalkInput) -> AppResult<Self> {
        let TalkInput {
            id,
            title,
            description,
            speaker_name,
            speaker_role,
            image_url,
            time,
            location,
            track_id,
            tags,
        } = input;

        let talk = Self {
            id,
            title,
            description,
            speaker_name,
            speaker_role,
            image_url,
            time,
            location,
            track_id,
            tags,
        };
        talk.ensure_invariants()?;
        Ok(talk)
    }

    pub(crate) fn ensure_invariants(&self) -> AppResult<()> {
        if self.id.trim().is_empty() {
            return Err(AppError::Validation("talk id must not be empty".to_owned()));
        }

        Ok(())
    }

    /// Returns the talk identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the talk title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the talk abstract.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the speaker display name.
    #[must_use]
    pub fn speaker_name(&self) -> &str {
        &self.speaker_name
    }

    /// Returns the optional speaker role.
    #[must_use]
    pub fn speaker_role(&self) -> Option<&str> {
        self.speaker_role.as_deref()
    }

    /// Returns the optional image reference.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Returns the display time slot.
    #[must_use]
    pub fn time(&self) -> &str {
        &self.time
    }

    /// Returns the optional room or venue.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Returns the owning track identifier.
    #[must_use]
    pub fn track_id(&self) -> &str {
        &self.track_id
    }

    /// Returns the optional topic tags.
    #[must_use]
    pub fn tags(&self) -> Option<&[String]> {
        self.tags.as_deref()
    }
}

/// One schedule track and its talks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    id: String,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    talks: Vec<Talk>,
}

impl Track {
    /// Creates a validated track.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        color: Option<String>,
        talks: Vec<Talk>,
    ) -> AppResult<Self> {
        let track = Self {
            id: id.into(),
            name: name.into(),
            color,
            talks,
        };
        track.ensure_invariants()?;
        Ok(track)
    }

    pub(crate) fn ensure_invariants(&self) -> AppResult<()> {
        if self.id.trim().is_empty() {
            return Err(AppError::Validation(
                "track id must not be empty".to_owned(),
            ));
        }

        for talk in &self.talks {
            talk.ensure_invariants()?;
            if talk.track_id() != self.id {
                return Err(AppError::Validation(format!(
                    "talk '{}' references track '{}' but belongs to track '{}'",
                    talk.id(),
                    talk.track_id(),
                    self.id
                )));
            }
        }

        Ok(())
    }

    /// Returns the track identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the track display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the optional track color token.
    #[must_use]
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Returns talks in document order.
    #[must_use]
    pub fn talks(&self) -> &[Talk] {
        &self.talks
    }
}

/// Track schedule shown on the home screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TracksConfig {
    tracks: Vec<Track>,
    #[serde(skip_serializing_if = "Option::is_none")]
    selected_track_id: Option<String>,
}

impl TracksConfig {
    /// Creates a validated track schedule.
    pub fn new(tracks: Vec<Track>, selected_track_id: Option<String>) -> AppResult<Self> {
        let config = Self {
            tracks,
            selected_track_id,
        };
        config.ensure_invariants()?;
        Ok(config)
    }

    pub(crate) fn ensure_invariants(&self) -> AppResult<()> {
        let mut seen = HashSet::new();
        for track in &self.tracks {
            track.ensure_invariants()?;
            if !seen.insert(track.id()) {
                return Err(AppError::Validation(format!(
                    "duplicate track id '{}'",
                    track.id()
                )));
            }
        }

        Ok(())
    }

    /// Returns tracks in document order.
    #[must_use]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Returns the configured selected track id, unresolved.
    #[must_use]
    pub fn selected_track_id(&self) -> Option<&str> {
        self.selected_track_id.as_deref()
    }

    /// Resolves the initially selected track id.
    ///
    /// The configured id wins when it names a real track; otherwise the
    /// first track is selected; an empty schedule selects nothing.
    #[must_use]
    pub fn initial_selection(&self) -> Option<&str> {
        self.selected_track_id
            .as_deref()
            .filter(|id| self.tracks.iter().any(|track| track.id() == *id))
            .or_else(|| self.tracks.first().map(Track::id))
    }

    /// Returns the talks of the given track, or nothing for an unknown id.
    #[must_use]
    pub fn talks_for(&self, track_id: &str) -> &[Talk] {
        self.tracks
            .iter()
            .find(|track| track.id() == track_id)
            .map_or(&[], Track::talks)
    }
}

/// Home screen configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeConfig {
    welcome_text: String,
    #[serde(rename = "imageURL", skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    web_link: Option<WebLink>,
    tracks_config: TracksConfig,
}

impl HomeConfig {
    /// Creates a validated home configuration.
    pub fn new(
        welcome_text: impl Into<String>,
        image_url: Option<String>,
        background_color: Option<String>,
        text_color: Option<String>,
        web_link: Option<WebLink>,
        tracks_config: TracksConfig,
    ) -> AppResult<Self> {
        let config = Self {
            welcome_text: welcome_text.into(),
            image_url,
            background_color,
            text_color,
            web_link,
            tracks_config,
        };
        config.ensure_invariants()?;
        Ok(config)
    }

    /// Decodes a raw home document.
    pub fn from_document(document: Value) -> AppResult<Self> {
        let config: Self = serde_json::from_value(document)
            .map_err(|error| AppError::Decode(error.to_string()))?;
        config.ensure_invariants()?;
        Ok(config)
    }

    pub(crate) fn ensure_invariants(&self) -> AppResult<()> {
        self.tracks_config.ensure_invariants()
    }

    /// Returns the welcome copy.
    #[must_use]
    pub fn welcome_text(&self) -> &str {
        &self.welcome_text
    }

    /// Returns the optional header image reference.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
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

    /// Returns the optional external link.
    #[must_use]
    pub fn web_link(&self) -> Option<&WebLink> {
        self.web_link.as_ref()
    }

    /// Returns the track schedule.
    #[must_use]
    pub fn tracks_config(&self) -> &TracksConfig {
        &self.tracks_config
    }
}

#[cfg(test)]
mod tests {
    use super::{Talk, TalkInput, Track, TracksConfig};

    fn talk(id: &str, track_id: &str) -> Talk {
        Talk::new(TalkInput {
            id: id.to_owned(),
            title: "Talk".to_owned(),
            description: "About things".to_owned(),
            speaker_name: "Sam Rivers".to_owned(),
            speaker_role: None,
            image_url: None,
            time: "10:00".to_owned(),
            location: None,
            track_id: track_id.to_owned(),
            tags: None,
        })
        .unwrap_or_else(|_| unreachable!())
    }

    fn track(id: &str, talks: Vec<Talk>) -> Track {
        Track::new(id, id.to_uppercase(), None, talks).unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn talks_must_reference_their_owning_track() {
        let result = Track::new("web", "Web", None, vec![talk("t1", "mobile")]);
        assert!(result.is_err());
    }

    #[test]
    fn duplicate_track_ids_are_rejected() {
        let result = TracksConfig::new(
            vec![track("web", Vec::new()), track("web", Vec::new())],
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn initial_selection_prefers_the_configured_track() {
        let config = TracksConfig::new(
            vec![track("ai", Vec::new()), track("web", Vec::new())],
            Some("web".to_owned()),
        )
        .unwrap_or_else(|_| unreachable!());

        assert_eq!(config.initial_selection(), Some("web"));
    }

    #[test]
    fn initial_selection_falls_back_to_the_first_track() {
        let config = TracksConfig::new(
            vec![track("ai", Vec::new()), track("web", Vec::new())],
            Some("retired".to_owned()),
        )
        .unwrap_or_else(|_| unreachable!());

        assert_eq!(config.initial_selection(), Some("ai"));
    }

    #[test]
    fn initial_selection_is_empty_without_tracks() {
        let config =
            TracksConfig::new(Vec::new(), None).unwrap_or_else(|_| unreachable!());
        assert_eq!(config.initial_selection(), None);
    }

    #[test]
    fn talks_for_unknown_track_is_empty() {
        let config = TracksConfig::new(vec![track("ai", vec![talk("t1", "ai")])], None)
            .unwrap_or_else(|_| unreachable!());

        assert_eq!(config.talks_for("ai").len(), 1);
        assert!(config.talks_for("mystery").is_empty());
    }
}
