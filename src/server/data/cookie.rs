use std::future::Future;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr, EntityTrait, QueryOrder};

use crate::server::model::auth::CookieSource;

/// Stores the platform login captured by the token route.
///
/// Only the latest login matters, saving a new one replaces any previous row.
pub struct CookieRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CookieRepository<'a, C> {
    /// Creates a new instance of [`CookieRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Replaces the stored login with the provided session cookie and access token
    pub async fn save(
        &self,
        session_id: String,
        access_token: String,
    ) -> Result<entity::platform_cookie::Model, DbErr> {
        entity::prelude::PlatformCookie::delete_many()
            .exec(self.db)
            .await?;

        let cookie = entity::platform_cookie::ActiveModel {
            session_id: ActiveValue::Set(session_id),
            access_token: ActiveValue::Set(access_token),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        };

        cookie.insert(self.db).await
    }

    /// Gets the most recent login, if any
    pub async fn latest(&self) -> Result<Option<entity::platform_cookie::Model>, DbErr> {
        entity::prelude::PlatformCookie::find()
            .order_by_desc(entity::platform_cookie::Column::Id)
            .one(self.db)
            .await
    }
}

impl<'a, C: ConnectionTrait + Sync> CookieSource for CookieRepository<'a, C> {
    fn session_cookie(&self) -> impl Future<Output = Result<Option<String>, DbErr>> + Send {
        async move { Ok(self.latest().await?.map(|cookie| cookie.session_id)) }
    }
}
