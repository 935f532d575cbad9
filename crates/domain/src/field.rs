use std::collections::HashMap;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};
use stagecraft_core::{AppError, AppResult};

/// Input control kinds a screen document can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Free-form text entry.
    Text,
    /// Email address entry.
    Email,
    /// Obscured password entry.
    Password,
    /// Phone number entry.
    Phone,
    /// Numeric entry.
    Number,
    /// Account handle entry.
    Username,
}

impl FieldKind {
    /// Returns the stable document value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Password => "password",
            Self::Phone => "phone",
            Self::Number => "number",
            Self::Username => "username",
        }
    }
}

impl FromStr for FieldKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "text" => Ok(Self::Text),
            "email" => Ok(Self::Email),
            "password" => Ok(Self::Password),
            "phone" => Ok(Self::Phone),
            "number" => Ok(Self::Number),
            "username" => Ok(Self::Username),
            _ => Err(AppError::Validation(format!(
                "unknown field kind '{value}'"
            ))),
        }
    }
}

/// Software keyboard layout hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyboardHint {
    /// Standard keyboard.
    Default,
    /// Email-optimized keyboard.
    Email,
    /// Digit pad.
    Numeric,
    /// Phone pad.
    Phone,
    /// URL-optimized keyboard.
    Url,
}

impl KeyboardHint {
    /// Returns the stable document value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Email => "email",
            Self::Numeric => "numeric",
            Self::Phone => "phone",
            Self::Url => "url",
        }
    }
}

impl FromStr for KeyboardHint {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "default" => Ok(Self::Default),
            "email" => Ok(Self::Email),
            "numeric" => Ok(Self::Numeric),
            "phone" => Ok(Self::Phone),
            "url" => Ok(Self::Url),
            _ => Err(AppError::Validation(format!(
                "unknown keyboard hint '{value}'"
            ))),
        }
    }
}

/// Automatic capitalization hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapitalizationHint {
    /// Never capitalize automatically.
    None,
    /// Capitalize the first letter of each word.
    Words,
    /// Capitalize the first letter of each sentence.
    Sentences,
    /// Capitalize every character.
    Characters,
}

impl CapitalizationHint {
    /// Returns the stable document value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Words => "words",
            Self::Sentences => "sentences",
            Self::Characters => "characters",
        }
    }
}

impl FromStr for CapitalizationHint {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "none" => Ok(Self::None),
            "words" => Ok(Self::Words),
            "sentences" => Ok(Self::Sentences),
            "characters" => Ok(Self::Characters),
            _ => Err(AppError::Validation(format!(
                "unknown capitalization hint '{value}'"
            ))),
        }
    }
}

/// Outcome of evaluating one field's validation rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValidation {
    valid: bool,
    message: Option<String>,
}

impl FieldValidation {
    fn pass() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    fn fail(message: Option<String>) -> Self {
        Self {
            valid: false,
            message,
        }
    }

    /// Returns whether the value passed the rule.
    #[must_use]
    pub fn valid(&self) -> bool {
        self.valid
    }

    /// Returns the configured error message; present only when invalid.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Input payload used to construct a validated field description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpecInput {
    /// Field identifier, unique within its screen.
    pub id: String,
    /// Input control kind.
    pub kind: FieldKind,
    /// User-facing label.
    pub label: String,
    /// Placeholder copy shown while the field is empty.
    pub placeholder: String,
    /// Whether submission requires a non-empty, valid value.
    pub required: bool,
    /// Optional author-anchored validation pattern.
    pub validation: Option<String>,
    /// Optional message shown when validation fails.
    pub error_message: Option<String>,
    /// Sort key; ties keep document order.
    pub order: i32,
    /// Optional software keyboard hint.
    pub keyboard_type: Option<KeyboardHint>,
    /// Optional capitalization hint.
    pub autocapitalization: Option<CapitalizationHint>,
}

/// One user-input control described by a screen document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    id: String,
    #[serde(rename = "type")]
    kind: FieldKind,
    label: String,
    placeholder: String,
    required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    validation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<String>,
    order: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    keyboard_type: Option<KeyboardHint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    autocapitalization: Option<CapitalizationHint>,
}

impl FieldSpec {
    /// Creates a validated field description.
    pub fn new(input: FieldSpecInput) -> AppResult<Self> {
        let FieldSpecInput {
            id,
            kind,
            label,
            placeholder,
            required,
            validation,
            error_message,
            order,
            keyboard_type,
            autocapitalization,
        } = input;

        let field = Self {
            id,
            kind,
            label,
            placeholder,
            required,
            validation,
            error_message,
            order,
            keyboard_type,
            autocapitalization,
        };
        field.ensure_invariants()?;
        Ok(field)
    }

    pub(crate) fn ensure_invariants(&self) -> AppResult<()> {
        if self.id.trim().is_empty() {
            return Err(AppError::Validation("field id must not be empty".to_owned()));
        }

        Ok(())
    }

    /// Returns the field identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the input control kind.
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Returns the user-facing label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the placeholder copy.
    #[must_use]
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Returns whether a non-empty, valid value is required to submit.
    #[must_use]
    pub fn required(&self) -> bool {
        self.required
    }

    /// Returns the optional validation pattern source.
    #[must_use]
    pub fn validation(&self) -> Option<&str> {
        self.validation.as_deref()
    }

    /// Returns the optional configured error message.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Returns the sort key.
    #[must_use]
    pub fn order(&self) -> i32 {
        self.order
    }

    /// Returns the optional keyboard hint.
    #[must_use]
    pub fn keyboard_type(&self) -> Option<KeyboardHint> {
        self.keyboard_type
    }

    /// Returns the optional capitalization hint.
    #[must_use]
    pub fn autocapitalization(&self) -> Option<CapitalizationHint> {
        self.autocapitalization
    }

    /// Evaluates the field's validation rule against a live input value.
    ///
    /// An empty value is valid exactly when the field is optional; a
    /// non-empty value without a pattern is always valid; otherwise the
    /// author-anchored pattern decides. A pattern that does not compile can
    /// never match, so the field reads as invalid (fail-closed) instead of
    /// failing the whole form.
    #[must_use]
    pub fn validate(&self, value: &str) -> FieldValidation {
        if value.is_empty() {
            return if self.required {
                FieldValidation::fail(self.error_message.clone())
            } else {
                FieldValidation::pass()
            };
        }

        let Some(pattern) = self.validation.as_deref() else {
            return FieldValidation::pass();
        };

        match Regex::new(pattern) {
            Ok(regex) if regex.is_match(value) => FieldValidation::pass(),
            _ => FieldValidation::fail(self.error_message.clone()),
        }
    }
}

/// Computes whether a form can be submitted.
///
/// True exactly when every required field holds a non-empty value whose last
/// computed validity is true; optional fields never block submission.
#[must_use]
pub fn is_form_valid(
    fields: &[FieldSpec],
    values: &HashMap<String, String>,
    validity: &HashMap<String, bool>,
) -> bool {
    fields
        .iter()
        .filter(|field| field.required())
        .all(|field| {
            let filled = values
                .get(field.id())
                .is_some_and(|value| !value.is_empty());
            filled && validity.get(field.id()).copied().unwrap_or(false)
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::str::FromStr;

    use super::{FieldKind, FieldSpec, FieldSpecInput, is_form_valid};

    const EMAIL_PATTERN: &str = r"^[\w.-]+@([\w-]+\.)+[\w-]{2,4}$";

    fn field(id: &str, required: bool, validation: Option<&str>) -> FieldSpec {
        FieldSpec::new(FieldSpecInput {
            id: id.to_owned(),
            kind: FieldKind::Text,
            label: id.to_owned(),
            placeholder: String::new(),
            required,
            validation: validation.map(str::to_owned),
            error_message: Some("Enter a valid value".to_owned()),
            order: 0,
            keyboard_type: None,
            autocapitalization: None,
        })
        .unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn empty_value_is_valid_for_optional_fields() {
        let spec = field("nickname", false, Some(r"^.{6,}$"));
        let outcome = spec.validate("");

        assert!(outcome.valid());
        assert!(outcome.message().is_none());
    }

    #[test]
    fn empty_value_is_invalid_for_required_fields() {
        let spec = field("email", true, None);
        assert!(!spec.validate("").valid());
    }

    #[test]
    fn non_empty_value_without_pattern_is_valid() {
        let spec = field("note", true, None);
        assert!(spec.validate("anything at all").valid());
    }

    #[test]
    fn pattern_match_decides_validity() {
        let spec = field("email", true, Some(EMAIL_PATTERN));

        assert!(spec.validate("a@b.com").valid());

        let rejected = spec.validate("not-an-email");
        assert!(!rejected.valid());
        assert_eq!(rejected.message(), Some("Enter a valid value"));
    }

    #[test]
    fn uncompilable_lookahead_pattern_fails_closed() {
        let spec = field(
            "password",
            true,
            Some(r"^(?=.*[A-Za-z])(?=.*\d)[A-Za-z\d]{8,}$"),
        );

        let outcome = spec.validate("abcdef12");
        assert!(!outcome.valid());
        assert_eq!(outcome.message(), Some("Enter a valid value"));
    }

    #[test]
    fn class_range_starting_with_a_perl_class_fails_closed() {
        // Dialect drift from other engines: `[\w-.]` is rejected here because
        // a class range endpoint must be a literal. The field degrades to
        // always-invalid rather than erroring.
        let spec = field("email", true, Some(r"^[\w-.]+@([\w-]+\.)+[\w-]{2,4}$"));
        assert!(!spec.validate("a@b.com").valid());
    }

    #[test]
    fn field_ids_must_not_be_blank() {
        let spec = FieldSpec::new(FieldSpecInput {
            id: "   ".to_owned(),
            kind: FieldKind::Text,
            label: "Label".to_owned(),
            placeholder: String::new(),
            required: false,
            validation: None,
            error_message: None,
            order: 0,
            keyboard_type: None,
            autocapitalization: None,
        });

        assert!(spec.is_err());
    }

    #[test]
    fn form_validity_requires_every_required_field_filled_and_valid() {
        let fields = vec![
            field("email", true, Some(EMAIL_PATTERN)),
            field("referral", false, Some(EMAIL_PATTERN)),
        ];

        let mut values = HashMap::new();
        let mut validity = HashMap::new();

        values.insert("email".to_owned(), "a@b.com".to_owned());
        validity.insert("email".to_owned(), true);
        // The optional field carries an invalid value and flag.
        values.insert("referral".to_owned(), "junk".to_owned());
        validity.insert("referral".to_owned(), false);

        assert!(is_form_valid(&fields, &values, &validity));
    }

    #[test]
    fn form_validity_fails_when_a_required_field_is_empty() {
        let fields = vec![field("email", true, None)];
        let values = HashMap::new();
        let mut validity = HashMap::new();
        validity.insert("email".to_owned(), true);

        assert!(!is_form_valid(&fields, &values, &validity));
    }

    #[test]
    fn form_validity_fails_without_a_recorded_validity_flag() {
        let fields = vec![field("email", true, None)];
        let mut values = HashMap::new();
        values.insert("email".to_owned(), "a@b.com".to_owned());

        assert!(!is_form_valid(&fields, &values, &HashMap::new()));
    }

    #[test]
    fn field_kind_round_trips_document_values() {
        for kind in [
            FieldKind::Text,
            FieldKind::Email,
            FieldKind::Password,
            FieldKind::Phone,
            FieldKind::Number,
            FieldKind::Username,
        ] {
            let parsed =
                FieldKind::from_str(kind.as_str()).unwrap_or_else(|_| unreachable!());
            assert_eq!(parsed, kind);
        }

        assert!(FieldKind::from_str("checkbox").is_err());
    }
}
