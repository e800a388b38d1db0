use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;

use crate::application::ports::{ChatUserRepository, RepositoryError};
use crate::domain::ChatUser;

pub struct PgChatUserRepository {
    pool: PgPool,
}

impl PgChatUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatUserRepository for PgChatUserRepository {
    #[instrument(skip(self))]
    async fn find_by_chat_id(&self, chat_id: i64) -> Result<Option<ChatUser>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM chat_users WHERE chat_id = $1")
            .bind(chat_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        row.as_ref().map(map_row).transpose()
    }

    #[instrument(skip(self, user), fields(chat_id = user.chat_id))]
    async fn create(&self, user: &ChatUser) -> Result<(), RepositoryError> {
        // DO NOTHING on conflict: two concurrent /start registrations
        // still leave exactly one identity record.
        sqlx::query(
            r#"
            INSERT INTO chat_users
                (chat_id, username, first_name, last_name, group_name,
                 is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (chat_id) DO NOTHING
            "#,
        )
        .bind(user.chat_id)
        .bind(&user.username)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.group_name)
        .bind(user.is_active)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(())
    }
}

fn map_row(row: &PgRow) -> Result<ChatUser, RepositoryError> {
    let get = |e: sqlx::Error| RepositoryError::QueryFailed(e.to_string());

    Ok(ChatUser {
        chat_id: row.try_get("chat_id").map_err(get)?,
        username: row.try_get("username").map_err(get)?,
        first_name: row.try_get("first_name").map_err(get)?,
        last_name: row.try_get("last_name").map_err(get)?,
        group_name: row.try_get("group_name").map_err(get)?,
        is_active: row.try_get("is_active").map_err(get)?,
        created_at: row.try_get("created_at").map_err(get)?,
        updated_at: row.try_get("updated_at").map_err(get)?,
    })
}
