use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::TokenCodec;
use divelog_service::domain::auth::service::AuthService;
use divelog_service::domain::divelog::errors::DiveLogError;
use divelog_service::domain::divelog::models::DiveLog;
use divelog_service::domain::divelog::models::DiveLogId;
use divelog_service::domain::divelog::ports::DiveLogRepository;
use divelog_service::domain::divelog::service::DiveLogService;
use divelog_service::domain::user::models::EmailAddress;
use divelog_service::domain::user::models::User;
use divelog_service::domain::user::models::UserId;
use divelog_service::domain::user::ports::UserRepository;
use divelog_service::domain::user::service::UserService;
use divelog_service::inbound::http::router::create_router;
use divelog_service::user::errors::UserError;

pub const TEST_JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// In-memory credential store backing the test server.
///
/// Same contract as the Postgres repository, including the
/// `include_credential` projection and email uniqueness.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove a user directly, bypassing the API. Used to simulate accounts
    /// deleted while their tokens are still in circulation.
    pub fn remove(&self, id: &UserId) {
        self.users.lock().unwrap().remove(id);
    }

    /// Drop a user's stored hash directly, bypassing the API. Used to
    /// simulate accounts imported without a usable credential.
    pub fn clear_credential(&self, id: &UserId) {
        if let Some(user) = self.users.lock().unwrap().get_mut(id) {
            user.password_hash = None;
        }
    }
}

fn without_credential(mut user: User) -> User {
    user.password_hash = None;
    user
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();

        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
        include_credential: bool,
    ) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        let user = users.values().find(|u| &u.email == email).cloned();

        Ok(match user {
            Some(user) if include_credential => Some(user),
            Some(user) => Some(without_credential(user)),
            None => None,
        })
    }

    async fn find_by_id(
        &self,
        id: &UserId,
        include_credential: bool,
    ) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        let user = users.get(id).cloned();

        Ok(match user {
            Some(user) if include_credential => Some(user),
            Some(user) => Some(without_credential(user)),
            None => None,
        })
    }

    async fn update_credential(&self, id: &UserId, password_hash: &str) -> Result<(), UserError> {
        let mut users = self.users.lock().unwrap();

        match users.get_mut(id) {
            Some(user) => {
                user.password_hash = Some(password_hash.to_string());
                Ok(())
            }
            None => Err(UserError::NotFound(id.to_string())),
        }
    }
}

/// In-memory dive log store, ordered newest dive first like the SQL query.
#[derive(Default)]
pub struct InMemoryDiveLogRepository {
    dive_logs: Mutex<HashMap<DiveLogId, DiveLog>>,
}

impl InMemoryDiveLogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DiveLogRepository for InMemoryDiveLogRepository {
    async fn create(&self, dive_log: DiveLog) -> Result<DiveLog, DiveLogError> {
        self.dive_logs
            .lock()
            .unwrap()
            .insert(dive_log.id, dive_log.clone());
        Ok(dive_log)
    }

    async fn find_by_id(&self, id: &DiveLogId) -> Result<Option<DiveLog>, DiveLogError> {
        Ok(self.dive_logs.lock().unwrap().get(id).cloned())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<DiveLog>, DiveLogError> {
        let dive_logs = self.dive_logs.lock().unwrap();

        let mut owned: Vec<DiveLog> = dive_logs
            .values()
            .filter(|log| &log.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.0.cmp(&a.id.0)));

        Ok(owned)
    }

    async fn update(&self, dive_log: DiveLog) -> Result<DiveLog, DiveLogError> {
        let mut dive_logs = self.dive_logs.lock().unwrap();

        match dive_logs.get_mut(&dive_log.id) {
            Some(stored) => {
                *stored = dive_log.clone();
                Ok(dive_log)
            }
            None => Err(DiveLogError::NotFound(dive_log.id.to_string())),
        }
    }

    async fn delete(&self, id: &DiveLogId) -> Result<(), DiveLogError> {
        match self.dive_logs.lock().unwrap().remove(id) {
            Some(_) => Ok(()),
            None => Err(DiveLogError::NotFound(id.to_string())),
        }
    }
}

/// Test application that spawns a real server over in-memory stores.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub token_codec: TokenCodec,
    pub user_repository: Arc<InMemoryUserRepository>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let user_repository = Arc::new(InMemoryUserRepository::new());
        let dive_log_repository = Arc::new(InMemoryDiveLogRepository::new());
        let token_codec = Arc::new(TokenCodec::new(TEST_JWT_SECRET));

        let user_service = Arc::new(UserService::new(Arc::clone(&user_repository)));
        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&user_repository),
            Arc::clone(&token_codec),
        ));
        let dive_log_service = Arc::new(DiveLogService::new(dive_log_repository));

        let router = create_router(user_service, auth_service, dive_log_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            token_codec: TokenCodec::new(TEST_JWT_SECRET),
            user_repository,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make PUT request
    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(format!("{}{}", self.address, path))
    }

    /// Helper to make DELETE request
    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(format!("{}{}", self.address, path))
    }

    /// Register a user through the API and return its id.
    pub async fn register_user(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/api/users")
            .json(&serde_json::json!({
                "email": email,
                "password": password,
                "firstName": "Ana",
                "lastName": "Silva"
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["id"].as_str().expect("id missing").to_string()
    }

    /// Log in through the API and return the issued token.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/api/auth/login")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["token"].as_str().expect("token missing").to_string()
    }
}
