//! Live form state for the configured screens and the interpreter that
//! turns tapped buttons into flow commands.

use std::collections::HashMap;

use stagecraft_domain::{ButtonAction, ButtonSpec, FieldSpec, Screen};

/// Shown under an invalid field whose configuration carries no message.
const FALLBACK_ERROR_MESSAGE: &str = "Please enter a valid value";

/// Commands the interpreter hands back to the flow layer.
///
/// Buttons carry symbolic actions; which command (if any) an action maps to
/// depends on the screen it was tapped on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowCommand {
    /// Submit the login form.
    SignIn,
    /// Submit the registration form.
    SignUp,
    /// Switch from login to registration.
    OpenRegistration,
    /// Switch from registration back to login.
    CloseRegistration,
    /// Move the onboarding carousel forward one page.
    AdvanceOnboarding,
    /// Leave onboarding, from any page.
    CompleteOnboarding,
}

/// Entered values and per-field validity for the form on one screen.
///
/// A session is owned by the view showing the form and discarded on
/// navigation away; nothing here outlives the screen.
#[derive(Debug, Clone)]
pub struct FormSession {
    screen: Screen,
    fields: Vec<FieldSpec>,
    values: HashMap<String, String>,
    validity: HashMap<String, bool>,
}

impl FormSession {
    /// Builds an empty session for `screen` over its configured fields,
    /// sorted into render order (ties keep the configured sequence).
    #[must_use]
    pub fn new(screen: Screen, fields: &[FieldSpec]) -> Self {
        let mut fields = fields.to_vec();
        fields.sort_by_key(FieldSpec::order);

        Self {
            screen,
            fields,
            values: HashMap::new(),
            validity: HashMap::new(),
        }
    }

    /// Screen this session belongs to.
    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Fields in render order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Records an input value and recomputes the owning field's validity on
    /// the spot, not on blur.
    ///
    /// Values for ids the configuration does not know are kept verbatim;
    /// they carry no validity entry and never gate submission.
    pub fn set_value(&mut self, field_id: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(field) = self.fields.iter().find(|field| field.id() == field_id) {
            self.validity
                .insert(field_id.to_owned(), field.validate(&value).valid());
        }
        self.values.insert(field_id.to_owned(), value);
    }

    /// Current value of a field, empty until something was entered.
    #[must_use]
    pub fn value(&self, field_id: &str) -> &str {
        self.values.get(field_id).map_or("", String::as_str)
    }

    /// Last computed validity of a field; untouched fields read as valid.
    #[must_use]
    pub fn is_field_valid(&self, field_id: &str) -> bool {
        self.validity.get(field_id).copied().unwrap_or(true)
    }

    /// Error text to render under a field, if any should show.
    ///
    /// Only a required field holding a non-empty invalid value surfaces its
    /// message; empty and optional fields stay quiet so a form does not open
    /// covered in red.
    #[must_use]
    pub fn visible_error(&self, field_id: &str) -> Option<&str> {
        let field = self.fields.iter().find(|field| field.id() == field_id)?;
        if self.value(field_id).is_empty() || !field.required() || self.is_field_valid(field_id) {
            return None;
        }

        Some(field.error_message().unwrap_or(FALLBACK_ERROR_MESSAGE))
    }

    /// Whether the form can be submitted.
    #[must_use]
    pub fn is_form_valid(&self) -> bool {
        stagecraft_domain::is_form_valid(&self.fields, &self.values, &self.validity)
    }

    /// Interprets a tapped button into a flow command.
    ///
    /// Submit actions are gated on form validity; navigation actions always
    /// resolve. Everything else, including actions that belong to a
    /// different screen, resolves to nothing so newer document vocabularies
    /// degrade to inert buttons instead of errors.
    #[must_use]
    pub fn resolve_button(&self, button: &ButtonSpec) -> Option<FlowCommand> {
        match (self.screen, button.action()) {
            (Screen::Login, ButtonAction::Login) => {
                self.is_form_valid().then_some(FlowCommand::SignIn)
            }
            (Screen::Login, ButtonAction::Register) => Some(FlowCommand::OpenRegistration),
            (Screen::Registration, ButtonAction::Register) => {
                self.is_form_valid().then_some(FlowCommand::SignUp)
            }
            (Screen::Registration, ButtonAction::Login) => Some(FlowCommand::CloseRegistration),
            (Screen::Onboarding, ButtonAction::Continue) => Some(FlowCommand::AdvanceOnboarding),
            (Screen::Onboarding, ButtonAction::Skip | ButtonAction::Finish) => {
                Some(FlowCommand::CompleteOnboarding)
            }
            _ => None,
        }
    }
}
