//! [`KingdomStore`] backed by the `kingdoms` table.
//!
//! Resource columns are `BIGINT`; values are widened from `u32` on write and
//! checked on read. A row that does not fit the domain types surfaces as
//! [`DbError::CorruptRow`] rather than being clamped.

use chrono::NaiveDate;
use kingdoms_core::KingdomStore;
use kingdoms_types::{Kingdom, KingdomDraft, KingdomId};
use sqlx::{FromRow, PgConnection, PgPool};
use uuid::Uuid;

use crate::error::DbError;
use crate::postgres::PostgresPool;

/// A row from the `kingdoms` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct KingdomRow {
    /// Primary key.
    pub id: Uuid,
    /// Treasury.
    pub gold: i64,
    /// Population.
    pub citizens: i64,
    /// Stored food.
    pub food: i64,
    /// Founding date.
    pub date_of_creation: NaiveDate,
}

impl TryFrom<KingdomRow> for Kingdom {
    type Error = DbError;

    fn try_from(row: KingdomRow) -> Result<Self, Self::Error> {
        let column = |name: &str, value: i64| {
            u32::try_from(value).map_err(|e| DbError::CorruptRow {
                id: row.id,
                reason: format!("{name} = {value}: {e}"),
            })
        };
        Ok(Self {
            id: KingdomId::from(row.id),
            gold: column("gold", row.gold)?,
            citizens: column("citizens", row.citizens)?,
            food: column("food", row.food)?,
            date_of_creation: row.date_of_creation,
        })
    }
}

const SELECT_BY_ID: &str = r"SELECT id, gold, citizens, food, date_of_creation
    FROM kingdoms WHERE id = $1";

const SELECT_ALL: &str = r"SELECT id, gold, citizens, food, date_of_creation
    FROM kingdoms ORDER BY id";

const SELECT_RICHEST: &str = r"SELECT id, gold, citizens, food, date_of_creation
    FROM kingdoms ORDER BY gold DESC, id ASC LIMIT 1";

/// `PostgreSQL` implementation of [`KingdomStore`].
#[derive(Debug, Clone)]
pub struct PgKingdomStore {
    pool: PgPool,
}

impl PgKingdomStore {
    /// Create a store over an open pool.
    pub fn new(pool: &PostgresPool) -> Self {
        Self {
            pool: pool.pool().clone(),
        }
    }
}

async fn write_resources(conn: &mut PgConnection, kingdom: &Kingdom) -> Result<(), DbError> {
    sqlx::query(r"UPDATE kingdoms SET gold = $1, citizens = $2, food = $3 WHERE id = $4")
        .bind(i64::from(kingdom.gold))
        .bind(i64::from(kingdom.citizens))
        .bind(i64::from(kingdom.food))
        .bind(kingdom.id.into_inner())
        .execute(conn)
        .await?;
    Ok(())
}

impl KingdomStore for PgKingdomStore {
    type Error = DbError;

    async fn insert(&self, draft: KingdomDraft) -> Result<Kingdom, DbError> {
        let kingdom = draft.into_kingdom(KingdomId::new());

        sqlx::query(
            r"INSERT INTO kingdoms (id, gold, citizens, food, date_of_creation)
              VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(kingdom.id.into_inner())
        .bind(i64::from(kingdom.gold))
        .bind(i64::from(kingdom.citizens))
        .bind(i64::from(kingdom.food))
        .bind(kingdom.date_of_creation)
        .execute(&self.pool)
        .await?;

        tracing::debug!(kingdom_id = %kingdom.id, "Inserted kingdom");
        Ok(kingdom)
    }

    async fn update(&self, kingdom: &Kingdom) -> Result<(), DbError> {
        let mut conn = self.pool.acquire().await?;
        write_resources(&mut conn, kingdom).await
    }

    async fn update_pair(&self, first: &Kingdom, second: &Kingdom) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;
        write_resources(&mut *tx, first).await?;
        write_resources(&mut *tx, second).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn find_by_id(&self, id: KingdomId) -> Result<Option<Kingdom>, DbError> {
        let row = sqlx::query_as::<_, KingdomRow>(SELECT_BY_ID)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await?;
        row.map(Kingdom::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Kingdom>, DbError> {
        let rows = sqlx::query_as::<_, KingdomRow>(SELECT_ALL)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(Kingdom::try_from).collect()
    }

    async fn delete(&self, id: KingdomId) -> Result<(), DbError> {
        let result = sqlx::query(r"DELETE FROM kingdoms WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await?;
        tracing::debug!(
            kingdom_id = %id,
            rows = result.rows_affected(),
            "Deleted kingdom"
        );
        Ok(())
    }

    async fn find_richest(&self) -> Result<Option<Kingdom>, DbError> {
        let row = sqlx::query_as::<_, KingdomRow>(SELECT_RICHEST)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Kingdom::try_from).transpose()
    }
}
