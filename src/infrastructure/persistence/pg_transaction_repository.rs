use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;

use crate::application::ports::{RepositoryError, TransactionRepository};
use crate::domain::{Category, NewTransaction, Transaction, TransactionPatch};

pub struct PgTransactionRepository {
    pool: PgPool,
}

impl PgTransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionRepository for PgTransactionRepository {
    #[instrument(skip(self, transaction), fields(source_message_id = transaction.source_message_id))]
    async fn create(&self, transaction: &NewTransaction) -> Result<Transaction, RepositoryError> {
        let now = Utc::now();

        let row = sqlx::query(
            r#"
            INSERT INTO transactions
                (source_message_id, chat_user_id, amount, location, fulltext,
                 date, time, category, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
            RETURNING *
            "#,
        )
        .bind(transaction.source_message_id)
        .bind(transaction.chat_user_id)
        .bind(transaction.amount)
        .bind(&transaction.location)
        .bind(&transaction.fulltext)
        .bind(transaction.date)
        .bind(transaction.time)
        .bind(transaction.category.map(|c| c.as_str()))
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        map_row(&row)
    }

    #[instrument(skip(self))]
    async fn find_by_source_message(
        &self,
        source_message_id: i64,
    ) -> Result<Option<Transaction>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM transactions WHERE source_message_id = $1")
            .bind(source_message_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.as_ref().map(map_row).transpose()
    }

    #[instrument(skip(self, patch))]
    async fn update(
        &self,
        id: i64,
        patch: &TransactionPatch,
    ) -> Result<Transaction, RepositoryError> {
        let row = sqlx::query(
            r#"
            UPDATE transactions SET
                amount     = COALESCE($2, amount),
                location   = COALESCE($3, location),
                category   = COALESCE($4, category),
                date       = COALESCE($5, date),
                time       = COALESCE($6, time),
                updated_at = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.amount)
        .bind(&patch.location)
        .bind(patch.category.map(|c| c.as_str()))
        .bind(patch.date)
        .bind(patch.time)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        match row {
            Some(row) => map_row(&row),
            None => Err(RepositoryError::NotFound(format!("transaction {}", id))),
        }
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM transactions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("transaction {}", id)));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_date(
        &self,
        chat_user_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<Transaction>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM transactions WHERE chat_user_id = $1 AND date = $2 ORDER BY id",
        )
        .bind(chat_user_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(map_row).collect()
    }

    #[instrument(skip(self))]
    async fn find_by_date_range(
        &self,
        chat_user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM transactions
            WHERE chat_user_id = $1 AND date BETWEEN $2 AND $3
            ORDER BY date ASC, id ASC
            "#,
        )
        .bind(chat_user_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(map_row).collect()
    }
}

fn map_row(row: &PgRow) -> Result<Transaction, RepositoryError> {
    let category: Option<String> = row.try_get("category").map_err(map_sqlx_error)?;

    Ok(Transaction {
        id: row.try_get("id").map_err(map_sqlx_error)?,
        source_message_id: row.try_get("source_message_id").map_err(map_sqlx_error)?,
        chat_user_id: row.try_get("chat_user_id").map_err(map_sqlx_error)?,
        amount: row.try_get("amount").map_err(map_sqlx_error)?,
        location: row.try_get("location").map_err(map_sqlx_error)?,
        fulltext: row.try_get("fulltext").map_err(map_sqlx_error)?,
        date: row.try_get("date").map_err(map_sqlx_error)?,
        time: row.try_get("time").map_err(map_sqlx_error)?,
        category: category.as_deref().map(Category::parse_lenient),
        created_at: row.try_get("created_at").map_err(map_sqlx_error)?,
        updated_at: row.try_get("updated_at").map_err(map_sqlx_error)?,
    })
}

fn map_sqlx_error(e: sqlx::Error) -> RepositoryError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepositoryError::ConstraintViolation(db.message().to_string())
        }
        sqlx::Error::RowNotFound => RepositoryError::NotFound(e.to_string()),
        _ => RepositoryError::QueryFailed(e.to_string()),
    }
}
