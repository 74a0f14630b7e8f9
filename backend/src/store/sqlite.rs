//! SQLite-backed store

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use sqlx::error::ErrorKind;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;

use super::InventoryStore;
use crate::config::DatabaseConfig;
use crate::error::{AppError, AppResult};
use crate::models::{Item, Movement, NewItem, NewMovement, NewParty, Party, PartyType, RecentTransaction};

/// Fixed-width creation timestamp, so text order equals time order
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

#[derive(Clone)]
pub struct SqliteStore {
    db: SqlitePool,
}

#[derive(Debug, FromRow)]
struct ItemRow {
    id: i64,
    name: String,
    category: Option<String>,
    brand: Option<String>,
    unit: String,
    cost_price: String,
    sale_price: String,
    active: bool,
    notes: Option<String>,
}

#[derive(Debug, FromRow)]
struct PartyRow {
    id: i64,
    #[sqlx(rename = "type")]
    party_type: String,
    name: String,
    phone: Option<String>,
    address: Option<String>,
}

#[derive(Debug, FromRow)]
struct MovementRow {
    id: i64,
    item_id: i64,
    txn_type: String,
    qty: String,
    unit_price: Option<String>,
    party_id: Option<i64>,
    ref_no: Option<String>,
    txn_date: NaiveDate,
    remarks: Option<String>,
    created_at: String,
}

#[derive(Debug, FromRow)]
struct RecentRow {
    id: i64,
    txn_date: NaiveDate,
    txn_type: String,
    item: String,
    qty: String,
    unit_price: Option<String>,
    party: Option<String>,
    ref_no: Option<String>,
    remarks: Option<String>,
    created_at: String,
}

fn parse_decimal(column: &str, value: &str) -> AppResult<Decimal> {
    Decimal::from_str(value)
        .map_err(|e| AppError::Internal(format!("Corrupt {} value {:?}: {}", column, value, e)))
}

fn parse_optional_decimal(column: &str, value: Option<&str>) -> AppResult<Option<Decimal>> {
    value.map(|v| parse_decimal(column, v)).transpose()
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

fn parse_timestamp(value: &str) -> AppResult<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| AppError::Internal(format!("Corrupt created_at value {:?}: {}", value, e)))
}

impl TryFrom<ItemRow> for Item {
    type Error = AppError;

    fn try_from(row: ItemRow) -> AppResult<Self> {
        Ok(Item {
            id: row.id,
            name: row.name,
            category: row.category,
            brand: row.brand,
            unit: row.unit,
            cost_price: parse_decimal("cost_price", &row.cost_price)?,
            sale_price: parse_decimal("sale_price", &row.sale_price)?,
            active: row.active,
            notes: row.notes,
        })
    }
}

impl TryFrom<PartyRow> for Party {
    type Error = AppError;

    fn try_from(row: PartyRow) -> AppResult<Self> {
        Ok(Party {
            id: row.id,
            party_type: row.party_type.parse().map_err(|e: &str| AppError::Internal(e.to_string()))?,
            name: row.name,
            phone: row.phone,
            address: row.address,
        })
    }
}

impl TryFrom<MovementRow> for Movement {
    type Error = AppError;

    fn try_from(row: MovementRow) -> AppResult<Self> {
        Ok(Movement {
            id: row.id,
            item_id: row.item_id,
            movement_type: row.txn_type.parse().map_err(|e: &str| AppError::Internal(e.to_string()))?,
            quantity: parse_decimal("qty", &row.qty)?,
            unit_price: parse_optional_decimal("unit_price", row.unit_price.as_deref())?,
            party_id: row.party_id,
            ref_no: row.ref_no,
            txn_date: row.txn_date,
            remarks: row.remarks,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

impl TryFrom<RecentRow> for RecentTransaction {
    type Error = AppError;

    fn try_from(row: RecentRow) -> AppResult<Self> {
        Ok(RecentTransaction {
            id: row.id,
            txn_date: row.txn_date,
            txn_type: row.txn_type.parse().map_err(|e: &str| AppError::Internal(e.to_string()))?,
            item: row.item,
            qty: parse_decimal("qty", &row.qty)?,
            unit_price: parse_optional_decimal("unit_price", row.unit_price.as_deref())?,
            party: row.party,
            ref_no: row.ref_no,
            remarks: row.remarks,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

/// Translate constraint failures into the store's error kinds
fn map_write_error(err: sqlx::Error, referenced: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.kind() {
            ErrorKind::ForeignKeyViolation => return AppError::Referential(referenced.to_string()),
            ErrorKind::UniqueViolation => return AppError::DuplicateEntry("name".to_string()),
            ErrorKind::CheckViolation => {
                return AppError::ValidationError(db_err.message().to_string())
            }
            _ => {}
        }
    }
    AppError::DatabaseError(err)
}

const ITEM_COLUMNS: &str =
    "id, name, category, brand, unit, cost_price, sale_price, active, notes";
const MOVEMENT_COLUMNS: &str =
    "id, item_id, txn_type, qty, unit_price, party_id, ref_no, txn_date, remarks, created_at";

impl SqliteStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Open (creating if missing) the database at the configured URL
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // Every connection to an in-memory URL is a separate database
        let pool = if config.url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(config.max_connections)
        }
        .acquire_timeout(Duration::from_secs(30))
        .connect_with(options)
        .await?;

        Ok(Self::new(pool))
    }

    /// Apply embedded schema migrations
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::migrate!("./migrations").run(&self.db).await?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db
    }
}

#[async_trait]
impl InventoryStore for SqliteStore {
    async fn insert_item(&self, item: NewItem) -> AppResult<Item> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            r#"
            INSERT INTO items (name, category, brand, unit, cost_price, sale_price, notes)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            ITEM_COLUMNS
        ))
        .bind(&item.name)
        .bind(&item.category)
        .bind(&item.brand)
        .bind(&item.unit)
        .bind(item.cost_price.to_string())
        .bind(item.sale_price.to_string())
        .bind(&item.notes)
        .fetch_one(&self.db)
        .await?;

        row.try_into()
    }

    async fn get_item(&self, id: i64) -> AppResult<Option<Item>> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {} FROM items WHERE id = ?",
            ITEM_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        row.map(Item::try_from).transpose()
    }

    async fn list_items(&self, active_only: bool) -> AppResult<Vec<Item>> {
        let filter = if active_only { "WHERE active = 1" } else { "" };
        let rows = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {} FROM items {} ORDER BY name, id",
            ITEM_COLUMNS, filter
        ))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(Item::try_from).collect()
    }

    async fn update_item_prices(
        &self,
        id: i64,
        cost_price: Option<Decimal>,
        sale_price: Option<Decimal>,
    ) -> AppResult<Option<Item>> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            r#"
            UPDATE items
               SET cost_price = COALESCE(?, cost_price),
                   sale_price = COALESCE(?, sale_price)
             WHERE id = ?
            RETURNING {}
            "#,
            ITEM_COLUMNS
        ))
        .bind(cost_price.map(|p| p.to_string()))
        .bind(sale_price.map(|p| p.to_string()))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        row.map(Item::try_from).transpose()
    }

    async fn delete_item(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM items WHERE id = ?")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_party(&self, party_type: PartyType, name: &str) -> AppResult<Option<Party>> {
        let row = sqlx::query_as::<_, PartyRow>(
            "SELECT id, type, name, phone, address FROM parties WHERE type = ? AND name = ?",
        )
        .bind(party_type.as_str())
        .bind(name)
        .fetch_optional(&self.db)
        .await?;

        row.map(Party::try_from).transpose()
    }

    async fn insert_party(&self, party: NewParty) -> AppResult<Party> {
        let row = sqlx::query_as::<_, PartyRow>(
            r#"
            INSERT INTO parties (type, name, phone, address)
            VALUES (?, ?, ?, ?)
            RETURNING id, type, name, phone, address
            "#,
        )
        .bind(party.party_type.as_str())
        .bind(&party.name)
        .bind(&party.phone)
        .bind(&party.address)
        .fetch_one(&self.db)
        .await
        .map_err(|e| map_write_error(e, "party"))?;

        row.try_into()
    }

    async fn list_parties(&self, party_type: PartyType) -> AppResult<Vec<Party>> {
        let rows = sqlx::query_as::<_, PartyRow>(
            "SELECT id, type, name, phone, address FROM parties WHERE type = ? ORDER BY name",
        )
        .bind(party_type.as_str())
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(Party::try_from).collect()
    }

    async fn delete_party(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM parties WHERE id = ?")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn append_movement(&self, movement: NewMovement) -> AppResult<Movement> {
        let referenced = if movement.party_id.is_some() {
            "item or party"
        } else {
            "item"
        };

        // created_at never precedes the newest stamp already stored
        let row = sqlx::query_as::<_, MovementRow>(&format!(
            r#"
            INSERT INTO transactions (
                item_id, txn_type, qty, unit_price, party_id, ref_no, txn_date, remarks, created_at
            )
            VALUES (
                ?, ?, ?, ?, ?, ?, ?, ?,
                MAX(?, COALESCE((SELECT MAX(created_at) FROM transactions), ''))
            )
            RETURNING {}
            "#,
            MOVEMENT_COLUMNS
        ))
        .bind(movement.item_id)
        .bind(movement.movement_type.as_str())
        .bind(movement.quantity.to_string())
        .bind(movement.unit_price.map(|p| p.to_string()))
        .bind(movement.party_id)
        .bind(&movement.ref_no)
        .bind(movement.txn_date)
        .bind(&movement.remarks)
        .bind(format_timestamp(Utc::now()))
        .fetch_one(&self.db)
        .await
        .map_err(|e| map_write_error(e, referenced))?;

        row.try_into()
    }

    async fn list_movements(&self, item_id: Option<i64>) -> AppResult<Vec<Movement>> {
        let rows = match item_id {
            Some(item_id) => {
                sqlx::query_as::<_, MovementRow>(&format!(
                    "SELECT {} FROM transactions WHERE item_id = ? ORDER BY id",
                    MOVEMENT_COLUMNS
                ))
                .bind(item_id)
                .fetch_all(&self.db)
                .await?
            }
            None => {
                sqlx::query_as::<_, MovementRow>(&format!(
                    "SELECT {} FROM transactions ORDER BY id",
                    MOVEMENT_COLUMNS
                ))
                .fetch_all(&self.db)
                .await?
            }
        };

        rows.into_iter().map(Movement::try_from).collect()
    }

    async fn recent_movements(&self, limit: u32) -> AppResult<Vec<RecentTransaction>> {
        let rows = sqlx::query_as::<_, RecentRow>(
            r#"
            SELECT t.id, t.txn_date, t.txn_type, i.name AS item, t.qty, t.unit_price,
                   p.name AS party, t.ref_no, t.remarks, t.created_at
            FROM transactions t
            JOIN items i ON i.id = t.item_id
            LEFT JOIN parties p ON p.id = t.party_id
            ORDER BY t.created_at DESC, t.id DESC
            LIMIT ?
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(RecentTransaction::try_from).collect()
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.db).await?;
        Ok(())
    }
}
