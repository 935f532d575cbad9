//! Stagecraft console shell: wires a configuration store, auth gateway and
//! preference file into the app state machine, then drives one scripted
//! session through the configured screens.

#![forbid(unsafe_code)]

use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use stagecraft_application::{
    AppStateMachine, ConfigDocumentStore, ConfigService, FlowCommand, FormSession,
    StateMachineOptions,
};
use stagecraft_core::{AppError, AppResult};
use stagecraft_domain::{
    AuthScreenConfig, ButtonAction, CONFIG_COLLECTION, FieldKind, FieldSpec, Screen,
};
use stagecraft_infrastructure::{
    FilePreferenceStore, InMemoryAuthGateway, InMemoryDocumentStore, RestDocumentStore,
    RestDocumentStoreConfig,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StoreProvider {
    Memory,
    Rest,
}

impl StoreProvider {
    fn as_str(self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Rest => "rest",
        }
    }
}

#[derive(Debug, Clone)]
struct ShellConfig {
    store_provider: StoreProvider,
    config_store_url: Option<String>,
    config_store_token: Option<String>,
    data_dir: PathBuf,
    splash_minimum_ms: u64,
}

impl ShellConfig {
    fn load() -> AppResult<Self> {
        let store_provider = match env::var("STORE_PROVIDER") {
            Ok(value) if value == "rest" => StoreProvider::Rest,
            Ok(value) if value == "memory" => StoreProvider::Memory,
            Ok(value) => {
                return Err(AppError::Validation(format!(
                    "invalid STORE_PROVIDER value '{value}': expected 'memory' or 'rest'"
                )));
            }
            Err(_) => StoreProvider::Memory,
        };
        let config_store_url = env::var("CONFIG_STORE_URL").ok();
        if store_provider == StoreProvider::Rest && config_store_url.is_none() {
            return Err(AppError::Validation(
                "CONFIG_STORE_URL is required when STORE_PROVIDER is 'rest'".to_owned(),
            ));
        }
        let config_store_token = env::var("CONFIG_STORE_TOKEN").ok();
        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));
        let splash_minimum_ms = parse_env_u64("SPLASH_MINIMUM_MS", 2000)?;

        Ok(Self {
            store_provider,
            config_store_url,
            config_store_token,
            data_dir,
            splash_minimum_ms,
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ShellConfig::load()?;
    let document_store = build_document_store(&config)?;
    let auth_gateway = Arc::new(InMemoryAuthGateway::new());
    let preference_store = Arc::new(FilePreferenceStore::new(
        config.data_dir.join("preferences.json"),
    ));

    let machine = Arc::new(AppStateMachine::new(
        ConfigService::new(document_store),
        auth_gateway.clone(),
        preference_store,
        StateMachineOptions {
            splash_minimum: Duration::from_millis(config.splash_minimum_ms),
        },
    ));

    info!(
        provider = config.store_provider.as_str(),
        data_dir = %config.data_dir.display(),
        splash_minimum_ms = config.splash_minimum_ms,
        "stagecraft-shell started"
    );

    let listener = {
        let machine = Arc::clone(&machine);
        tokio::spawn(async move { machine.run_auth_listener().await })
    };

    machine.start().await?;
    info!(
        screen = %machine.session().await.screen(),
        "splash complete, configuration loaded"
    );
    describe_configuration(&machine).await;

    run_scripted_session(&machine, auth_gateway.as_ref()).await?;

    listener.abort();
    Ok(())
}

fn build_document_store(config: &ShellConfig) -> AppResult<Arc<dyn ConfigDocumentStore>> {
    match config.store_provider {
        StoreProvider::Memory => Ok(Arc::new(InMemoryDocumentStore::new())),
        StoreProvider::Rest => {
            let base_url = config.config_store_url.clone().ok_or_else(|| {
                AppError::Validation(
                    "CONFIG_STORE_URL is required when STORE_PROVIDER is 'rest'".to_owned(),
                )
            })?;
            let http_client = reqwest::Client::builder()
                .timeout(Duration::from_secs(15))
                .build()
                .map_err(|error| {
                    AppError::Internal(format!("failed to build HTTP client: {error}"))
                })?;
            let store = RestDocumentStore::new(
                http_client,
                RestDocumentStoreConfig {
                    base_url,
                    collection: CONFIG_COLLECTION.to_owned(),
                    bearer_token: config.config_store_token.clone(),
                },
            )?;
            Ok(Arc::new(store))
        }
    }
}

async fn describe_configuration(machine: &AppStateMachine) {
    let Some(bundle) = machine.configuration().await else {
        return;
    };

    let tracks = bundle.home().tracks_config();
    info!(
        onboarding_pages = bundle.onboarding().pages().len(),
        login_fields = bundle.login().fields().len(),
        registration_fields = bundle.registration().fields().len(),
        tracks = tracks.tracks().len(),
        selected_track = tracks.initial_selection().unwrap_or("<none>"),
        "configuration summary"
    );
}

/// Walks one full user journey on the console: through onboarding when the
/// session lands there, into registration, out again, and back in through
/// the login form.
async fn run_scripted_session(
    machine: &AppStateMachine,
    gateway: &InMemoryAuthGateway,
) -> AppResult<()> {
    while machine.session().await.screen() == Screen::Onboarding {
        info!(
            page = machine.session().await.onboarding_page(),
            "viewing onboarding page"
        );
        machine.advance_onboarding().await?;
    }

    let bundle = machine.configuration().await.ok_or_else(|| {
        AppError::Internal("configuration bundle missing after startup".to_owned())
    })?;

    if machine.session().await.screen() == Screen::Login {
        let login_form = form_for(Screen::Login, bundle.login());
        submit(machine, &login_form, bundle.login(), ButtonAction::Register).await?;
    }

    if machine.session().await.screen() == Screen::Registration {
        let mut registration_form = form_for(Screen::Registration, bundle.registration());
        fill_with_demo_values(&mut registration_form);
        submit(
            machine,
            &registration_form,
            bundle.registration(),
            ButtonAction::Register,
        )
        .await?;
    }

    let session = machine.session().await;
    info!(
        screen = %session.screen(),
        authenticated = session.authenticated(),
        "registration submitted"
    );
    if let Some(email) = gateway.current_user_email().await {
        info!(email = %email, "gateway reports a signed-in user");
    }

    machine.sign_out().await?;
    info!(screen = %machine.session().await.screen(), "signed out");

    let mut login_form = form_for(Screen::Login, bundle.login());
    fill_with_demo_values(&mut login_form);
    submit(machine, &login_form, bundle.login(), ButtonAction::Login).await?;

    let session = machine.session().await;
    info!(
        screen = %session.screen(),
        authenticated = session.authenticated(),
        "signed back in, session script complete"
    );
    Ok(())
}

fn form_for(screen: Screen, config: &AuthScreenConfig) -> FormSession {
    let fields: Vec<FieldSpec> = config.fields_in_order().into_iter().cloned().collect();
    FormSession::new(screen, &fields)
}

fn fill_with_demo_values(form: &mut FormSession) {
    for field in form.fields().to_vec() {
        form.set_value(field.id(), demo_value_for(&field));
        if let Some(message) = form.visible_error(field.id()) {
            warn!(field = field.id(), message = message, "demo value rejected");
        }
    }
}

fn demo_value_for(field: &FieldSpec) -> &'static str {
    match field.kind() {
        FieldKind::Email | FieldKind::Username => "ada@example.com",
        FieldKind::Password => "passw0rd42",
        FieldKind::Phone => "+15550100",
        FieldKind::Number => "42",
        FieldKind::Text => "Ada Lovelace",
    }
}

/// Finds the button carrying `action` on the screen's config and feeds it
/// through the form interpreter, dispatching whatever command falls out.
async fn submit(
    machine: &AppStateMachine,
    form: &FormSession,
    config: &AuthScreenConfig,
    action: ButtonAction,
) -> AppResult<()> {
    let Some(button) = config
        .buttons_in_order()
        .into_iter()
        .find(|button| button.action() == action)
    else {
        warn!(action = action.as_str(), "no button carries this action");
        return Ok(());
    };

    let Some(command) = form.resolve_button(button) else {
        warn!(button = button.id(), "button resolved to no command");
        return Ok(());
    };

    match command {
        FlowCommand::SignIn => {
            machine
                .sign_in(
                    first_value_of_kind(form, FieldKind::Email),
                    first_value_of_kind(form, FieldKind::Password),
                )
                .await
        }
        FlowCommand::SignUp => {
            machine
                .sign_up(
                    first_value_of_kind(form, FieldKind::Text),
                    first_value_of_kind(form, FieldKind::Email),
                    first_value_of_kind(form, FieldKind::Password),
                )
                .await
        }
        FlowCommand::OpenRegistration => {
            machine.open_registration().await;
            Ok(())
        }
        FlowCommand::CloseRegistration => {
            machine.close_registration().await;
            Ok(())
        }
        FlowCommand::AdvanceOnboarding => machine.advance_onboarding().await,
        FlowCommand::CompleteOnboarding => machine.complete_onboarding().await,
    }
}

fn first_value_of_kind<'a>(form: &'a FormSession, kind: FieldKind) -> &'a str {
    form.fields()
        .iter()
        .find(|field| field.kind() == kind)
        .map_or("", |field| form.value(field.id()))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn parse_env_u64(name: &str, default: u64) -> AppResult<u64> {
    match env::var(name) {
        Ok(value) => value.parse::<u64>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        Err(_) => Ok(default),
    }
}
