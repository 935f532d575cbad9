//! Application services for the screen flow: configuration loading and
//! seeding, the app session state machine, and form interpretation, all over
//! the ports defined here.

#![forbid(unsafe_code)]

mod config_ports;
mod config_service;
mod form;
mod session_ports;
mod state_machine;

pub use config_ports::{ConfigDocumentStore, deep_merge};
pub use config_service::{ConfigBundle, ConfigService};
pub use form::{FlowCommand, FormSession};
pub use session_ports::{AuthGateway, PreferenceStore};
pub use state_machine::{AppSession, AppStateMachine, StateMachineOptions};
