use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use axum::http::{HeaderName, HeaderValue, header};
use axum_test::TestServer;
use chrono::{DateTime, TimeZone, Utc};
use meets_api::{ApiState, middleware::auth::IdentityProvider, router};
use meets_core::{
    models::{
        identity::{AuthenticatedUser, Role},
        meet::Meet,
    },
    service::MeetService,
};
use meets_db::mock::repositories::MockMeetRepo;
use uuid::Uuid;

pub const MEMBER_TOKEN: &str = "member-token";
pub const ADMIN_TOKEN: &str = "admin-token";

/// Identity provider backed by a fixed token table.
pub struct StaticIdentityProvider {
    users: HashMap<String, AuthenticatedUser>,
}

impl StaticIdentityProvider {
    pub fn new() -> Self {
        let mut users = HashMap::new();
        users.insert(
            MEMBER_TOKEN.to_string(),
            AuthenticatedUser {
                id: "1".to_string(),
                uuid: "org1".to_string(),
                email: "org1@example.com".to_string(),
                roles: vec![Role::Member],
            },
        );
        users.insert(
            ADMIN_TOKEN.to_string(),
            AuthenticatedUser {
                id: "2".to_string(),
                uuid: "admin".to_string(),
                email: "admin@example.com".to_string(),
                roles: vec![Role::Elevated],
            },
        );
        Self { users }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn authenticate(&self, token: &str) -> eyre::Result<AuthenticatedUser> {
        self.users
            .get(token)
            .cloned()
            .ok_or_else(|| eyre::eyre!("unknown token"))
    }
}

pub struct TestContext {
    pub meet_repo: MockMeetRepo,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            meet_repo: MockMeetRepo::new(),
        }
    }

    // Build a server around the mock repository
    pub fn server(self) -> TestServer {
        let state = Arc::new(ApiState {
            meets: MeetService::new(Arc::new(self.meet_repo)),
            identity: Arc::new(StaticIdentityProvider::new()),
        });

        TestServer::new(router(state)).expect("Failed to build test server")
    }
}

pub fn bearer(token: &str) -> (HeaderName, HeaderValue) {
    (
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {token}")).expect("valid header"),
    )
}

pub fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, day, hour, minute, 0).unwrap()
}

pub fn stored_meet(id: i64, organizer_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Meet {
    Meet {
        id,
        uuid: Uuid::new_v4(),
        title: format!("Meet {id}"),
        organizer_id: organizer_id.to_string(),
        participants: vec!["p1".to_string()],
        start,
        end,
        description: String::new(),
        color: String::new(),
        meet_type: 0,
        old_price: 0.0,
        discount: 0.0,
        price: 0.0,
    }
}
