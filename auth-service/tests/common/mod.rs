use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use auth::Authenticator;
use auth::PasswordHasher;
use auth::TokenConfig;
use auth::TokenVerifier;
use auth::WorkFactor;
use auth_service::domain::user::models::Login;
use auth_service::domain::user::models::NewUser;
use auth_service::domain::user::models::User;
use auth_service::domain::user::models::UserId;
use auth_service::domain::user::ports::UserRepository;
use auth_service::domain::user::service::AuthService;
use auth_service::inbound::http::create_router;
use auth_service::user::errors::UserError;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const TEST_ISSUER: &str = "imager-test";

/// Credential store kept in memory; the mutex makes check-and-insert atomic,
/// mirroring the unique index on `users.login`.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<String, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut users = self.users.lock().expect("Repository lock poisoned");
        if users.contains_key(user.login.as_str()) {
            return Err(UserError::LoginTaken(user.login.to_string()));
        }

        let id = UserId::new(users.len() as i64 + 1)?;
        let created = User {
            id,
            login: user.login,
            password_hash: user.password_hash,
        };
        users.insert(created.login.to_string(), created.clone());

        Ok(created)
    }

    async fn find_by_login(&self, login: &Login) -> Result<Option<User>, UserError> {
        let users = self.users.lock().expect("Repository lock poisoned");
        Ok(users.get(login.as_str()).cloned())
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub token_verifier: TokenVerifier,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let token_config = TokenConfig::new(TEST_SECRET, TEST_ISSUER, Duration::from_secs(3600))
            .expect("Valid token config");
        let hasher = PasswordHasher::with_work_factor(WorkFactor::MINIMAL)
            .expect("Valid work factor");
        let authenticator = Arc::new(Authenticator::with_password_hasher(
            token_config.clone(),
            hasher,
        ));

        let repository = Arc::new(InMemoryUserRepository::default());
        let auth_service = Arc::new(AuthService::new(repository, authenticator));
        let router = create_router(auth_service, Duration::from_secs(30));

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            token_verifier: TokenVerifier::new(Arc::new(token_config)),
        }
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub async fn sign_up(&self, login: &str, password: &str) -> reqwest::Response {
        self.post("/users/sign_up")
            .form(&[("login", login), ("password", password)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn sign_in(&self, login: &str, password: &str) -> reqwest::Response {
        self.post("/users/sign_in")
            .form(&[("login", login), ("password", password)])
            .send()
            .await
            .expect("Failed to execute request")
    }
}
