#![allow(dead_code)]

use async_trait::async_trait;
use brief::AppError;
use brief::application::services::{AuthService, UrlService, UserService};
use brief::domain::entities::{
    Account, AccountKey, NewAccount, NewShortLink, ProfileUpdate, ShortLink,
};
use brief::domain::repositories::{AccountRepository, ShortLinkRepository};
use brief::infrastructure::probe::{ProbeError, UrlProbe};
use brief::state::AppState;
use brief::utils::hash_generator::HashGenerator;
use chrono::Utc;
use serde_json::json;
use std::sync::{Arc, Mutex};
use url::Url;
use uuid::Uuid;

pub const ADMIN_EMAIL: &str = "admin@brief.test";
pub const ADMIN_PASSWORD: &str = "admin-password";
pub const PUBLIC_BASE: &str = "http://brief.test";

/// Account store backed by a vector, enforcing unique ids and emails.
#[derive(Default)]
pub struct MemoryAccountRepository {
    accounts: Mutex<Vec<Account>>,
}

fn matches(account: &Account, key: &AccountKey) -> bool {
    match key {
        AccountKey::Id(id) => account.id == *id,
        AccountKey::Email(email) => account.email == *email,
    }
}

#[async_trait]
impl AccountRepository for MemoryAccountRepository {
    async fn create(&self, new_account: NewAccount) -> Result<Account, AppError> {
        let mut accounts = self.accounts.lock().unwrap();

        if accounts
            .iter()
            .any(|a| a.id == new_account.id || a.email == new_account.email)
        {
            return Err(AppError::conflict(
                "Account already exists",
                json!({ "email": new_account.email }),
            ));
        }

        let now = Utc::now();
        let account = Account {
            id: new_account.id,
            firstname: new_account.firstname,
            lastname: new_account.lastname,
            email: new_account.email,
            password: new_account.password,
            salt: new_account.salt,
            role: new_account.role,
            is_locked: false,
            created_at: now,
            updated_at: now,
        };
        accounts.push(account.clone());

        Ok(account)
    }

    async fn find(&self, key: &AccountKey) -> Result<Option<Account>, AppError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.iter().find(|a| matches(a, key)).cloned())
    }

    async fn list(&self) -> Result<Vec<Account>, AppError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.iter().rev().cloned().collect())
    }

    async fn update_profile(&self, id: Uuid, update: ProfileUpdate) -> Result<Account, AppError> {
        let mut accounts = self.accounts.lock().unwrap();
        let account = accounts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": id })))?;

        if let Some(firstname) = update.firstname {
            account.firstname = firstname;
        }
        if let Some(lastname) = update.lastname {
            account.lastname = lastname;
        }
        account.updated_at = Utc::now();

        Ok(account.clone())
    }

    async fn update_password(
        &self,
        id: Uuid,
        password_hash: &str,
        salt: &str,
    ) -> Result<Account, AppError> {
        let mut accounts = self.accounts.lock().unwrap();
        let account = accounts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": id })))?;

        account.password = password_hash.to_string();
        account.salt = salt.to_string();
        account.updated_at = Utc::now();

        Ok(account.clone())
    }

    async fn set_locked(
        &self,
        key: &AccountKey,
        locked: bool,
    ) -> Result<Option<Account>, AppError> {
        let mut accounts = self.accounts.lock().unwrap();

        Ok(accounts.iter_mut().find(|a| matches(a, key)).map(|a| {
            a.is_locked = locked;
            a.updated_at = Utc::now();
            a.clone()
        }))
    }
}

/// Link store backed by a vector, enforcing unique hashes.
#[derive(Default)]
pub struct MemoryShortLinkRepository {
    links: Mutex<Vec<ShortLink>>,
}

#[async_trait]
impl ShortLinkRepository for MemoryShortLinkRepository {
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let mut links = self.links.lock().unwrap();

        if links.iter().any(|l| l.hash == new_link.hash) {
            return Err(AppError::conflict(
                "Hash already exists",
                json!({ "hash": new_link.hash }),
            ));
        }

        let link = ShortLink {
            id: new_link.id,
            long_url: new_link.long_url,
            hash: new_link.hash,
            user_id: new_link.user_id,
            created_at: Utc::now(),
        };
        links.push(link.clone());

        Ok(link)
    }

    async fn find_by_hash(&self, hash: &str) -> Result<Option<ShortLink>, AppError> {
        let links = self.links.lock().unwrap();
        Ok(links.iter().find(|l| l.hash == hash).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ShortLink>, AppError> {
        let links = self.links.lock().unwrap();
        Ok(links.iter().find(|l| l.id == id).cloned())
    }

    async fn list_by_owner(&self, user_id: Uuid) -> Result<Vec<ShortLink>, AppError> {
        let links = self.links.lock().unwrap();
        Ok(links
            .iter()
            .rev()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<ShortLink>, AppError> {
        let links = self.links.lock().unwrap();
        Ok(links.iter().rev().cloned().collect())
    }

    async fn delete(&self, id: Uuid) -> Result<Option<ShortLink>, AppError> {
        let mut links = self.links.lock().unwrap();
        let position = links.iter().position(|l| l.id == id);
        Ok(position.map(|i| links.remove(i)))
    }
}

/// Probe that accepts every destination except hosts containing "unreachable".
pub struct StubProbe;

#[async_trait]
impl UrlProbe for StubProbe {
    async fn check(&self, url: &Url) -> Result<(), ProbeError> {
        match url.host_str() {
            Some(host) if host.contains("unreachable") => {
                Err(ProbeError::Unreachable(host.to_string()))
            }
            _ => Ok(()),
        }
    }
}

pub struct TestContext {
    pub state: AppState,
    pub admin_id: Uuid,
    pub admin_token: String,
}

/// Builds application state over in-memory stores with a bootstrapped admin.
pub async fn create_test_state() -> TestContext {
    let auth = Arc::new(AuthService::new("test-signing-secret"));
    let accounts = Arc::new(MemoryAccountRepository::default());
    let links = Arc::new(MemoryShortLinkRepository::default());

    let admin_id = Uuid::new_v4();
    let user_service = Arc::new(UserService::new(accounts, auth.clone()));
    user_service
        .create_admin(admin_id, ADMIN_EMAIL.to_string(), ADMIN_PASSWORD)
        .await
        .unwrap();
    let admin_token = user_service
        .login(ADMIN_EMAIL, ADMIN_PASSWORD)
        .await
        .unwrap()
        .token;

    let url_service = Arc::new(UrlService::new(
        links,
        Arc::new(StubProbe),
        Arc::new(HashGenerator::new(0)),
        admin_id,
        10,
    ));

    let state = AppState::new(
        auth,
        user_service,
        url_service,
        Some(PUBLIC_BASE.to_string()),
    );

    TestContext {
        state,
        admin_id,
        admin_token,
    }
}

/// Registers a regular account and returns `(id, token)`.
pub async fn register_user(state: &AppState, email: &str) -> (Uuid, String) {
    let session = state
        .user_service
        .register(brief::application::services::user_service::Registration {
            firstname: "Test".to_string(),
            lastname: "User".to_string(),
            email: email.to_string(),
            password: "password1".to_string(),
        })
        .await
        .unwrap();

    (session.account.id, session.token)
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
