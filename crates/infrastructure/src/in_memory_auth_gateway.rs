//! Auth gateway for development. Accounts live in process memory and are
//! announced on tracing output instead of a real identity backend.

use std::collections::HashMap;

use async_trait::async_trait;
use stagecraft_application::AuthGateway;
use stagecraft_core::{AppError, AppResult};
use tokio::sync::{RwLock, watch};
use tracing::info;

#[derive(Clone)]
struct Account {
    name: String,
    password: String,
}

/// Development auth gateway holding accounts in memory.
pub struct InMemoryAuthGateway {
    accounts: RwLock<HashMap<String, Account>>,
    current: RwLock<Option<String>>,
    status: watch::Sender<bool>,
}

impl InMemoryAuthGateway {
    /// Creates a gateway with no accounts and nobody signed in.
    #[must_use]
    pub fn new() -> Self {
        let (status, _) = watch::channel(false);
        Self {
            accounts: RwLock::new(HashMap::new()),
            current: RwLock::new(None),
            status,
        }
    }

    /// Email of the signed-in account, if any.
    pub async fn current_user_email(&self) -> Option<String> {
        self.current.read().await.clone()
    }

    /// Display name of a registered account.
    pub async fn display_name(&self, email: &str) -> Option<String> {
        self.accounts
            .read()
            .await
            .get(email)
            .map(|account| account.name.clone())
    }

    fn publish_presence(&self, present: bool) {
        self.status.send_if_modified(|current| {
            if *current == present {
                false
            } else {
                *current = present;
                true
            }
        });
    }
}

impl Default for InMemoryAuthGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthGateway for InMemoryAuthGateway {
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<()> {
        let accepted = self
            .accounts
            .read()
            .await
            .get(email)
            .is_some_and(|account| account.password == password);
        if !accepted {
            return Err(AppError::Auth("invalid email or password".to_owned()));
        }

        *self.current.write().await = Some(email.to_owned());
        self.publish_presence(true);
        Ok(())
    }

    async fn sign_up(&self, name: &str, email: &str, password: &str) -> AppResult<()> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(email) {
            return Err(AppError::Auth(format!(
                "an account for '{email}' already exists"
            )));
        }

        accounts.insert(
            email.to_owned(),
            Account {
                name: name.to_owned(),
                password: password.to_owned(),
            },
        );
        drop(accounts);
        info!(email = email, "registered development account");

        *self.current.write().await = Some(email.to_owned());
        self.publish_presence(true);
        Ok(())
    }

    async fn sign_out(&self) -> AppResult<()> {
        *self.current.write().await = None;
        self.publish_presence(false);
        Ok(())
    }

    async fn current_user_present(&self) -> bool {
        *self.status.borrow()
    }

    fn subscribe_status(&self) -> watch::Receiver<bool> {
        self.status.subscribe()
    }
}
