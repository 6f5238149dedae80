//! Shared wiring for API integration tests

#![allow(dead_code)]

use actix_web::web;
use jsonwebtoken::{encode, EncodingKey, Header};
use std::sync::Arc;
use uuid::Uuid;

use pd_api::middleware::auth::Claims;
use pd_api::{AppState, HttpSettings};
use pd_core::{
    BcryptPasswordHasher, InMemoryOtpSessionStore, MockOtpProvider, MockUserRepository, OtpIssuanceConfig,
    User,
};
use pd_shared::{CorsConfig, JwtConfig};

pub const SECRET: &str = "integration-test-secret";
pub const ISSUER: &str = "profiledesk";
pub const STARTING_MOBILE: &str = "09120000000";

pub struct TestContext {
    pub users: Arc<MockUserRepository>,
    pub provider: Arc<MockOtpProvider>,
    pub sessions: Arc<InMemoryOtpSessionStore>,
    pub data: web::Data<AppState<MockUserRepository, MockOtpProvider>>,
    pub settings: HttpSettings,
    pub user: User,
}

impl TestContext {
    /// One admin, unverified unless `verified`, stored in a fresh repository
    pub async fn new(verified: bool) -> Self {
        let users = Arc::new(MockUserRepository::new());
        let provider = Arc::new(MockOtpProvider::new());
        let sessions = Arc::new(InMemoryOtpSessionStore::new());

        let mut user = User::new("Old", "Name", STARTING_MOBILE, "old-hash");
        if verified {
            user.verify_mobile(STARTING_MOBILE, chrono::Utc::now());
        }
        users.insert(user.clone()).await;

        let data = web::Data::new(AppState::new(
            users.clone(),
            provider.clone(),
            sessions.clone(),
            Arc::new(BcryptPasswordHasher::new(4)),
            OtpIssuanceConfig::default(),
        ));

        let settings = HttpSettings {
            jwt: JwtConfig::new(SECRET),
            cors: CorsConfig::development(),
            max_payload_size: 64 * 1024,
        };

        Self {
            users,
            provider,
            sessions,
            data,
            settings,
            user,
        }
    }

    /// Bearer header value for this context's user in `session_id`
    pub fn bearer(&self, session_id: &str) -> String {
        bearer_for(self.user.id, session_id)
    }
}

pub fn bearer_for(user_id: Uuid, session_id: &str) -> String {
    let claims = Claims::for_session(user_id, session_id, ISSUER, 3600);
    let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_bytes())).unwrap();
    format!("Bearer {}", token)
}
