use async_trait::async_trait;
use chrono::{DateTime, Utc};
use meets_core::{
    models::meet::{Meet, MeetQueryOptions, NewMeet},
    repository::MeetRepository,
};
use mockall::mock;
use uuid::Uuid;

// Mock repository for handler and service tests
mock! {
    pub MeetRepo {}

    #[async_trait]
    impl MeetRepository for MeetRepo {
        async fn create(&self, meet: &NewMeet) -> eyre::Result<Meet>;

        async fn get_by_id(&self, id: i64) -> eyre::Result<Option<Meet>>;

        async fn get_by_uuid(&self, uuid: Uuid) -> eyre::Result<Option<Meet>>;

        async fn update(&self, meet: &NewMeet) -> eyre::Result<Option<Meet>>;

        async fn delete(&self, id: i64) -> eyre::Result<bool>;

        async fn query_meets(&self, options: &MeetQueryOptions) -> eyre::Result<Vec<Meet>>;

        async fn has_conflict(
            &self,
            organizer_id: &str,
            start: DateTime<Utc>,
            end: DateTime<Utc>,
            exclude_uuid: Option<Uuid>,
        ) -> eyre::Result<bool>;

        async fn occupying_meets(
            &self,
            organizer_id: &str,
            from: DateTime<Utc>,
            to: DateTime<Utc>,
        ) -> eyre::Result<Vec<Meet>>;
    }
}
