//! Business model
//!
//! The `businesses` table is append-only: rows are inserted and read, never
//! updated or deleted.

use chrono::NaiveDateTime;
use credlens_core::{AnalysisInput, BusinessRecord, NewBusinessRecord};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Business {
    pub id: i64,
    pub monthly_revenue: f64,
    pub payment_delays: f64,
    pub transactions: i64,
    pub avg_sentiment: f64,
    pub risk_label: Option<i64>,
    pub created_at: NaiveDateTime,
}

/// Body of `POST /api/business`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBusiness {
    #[serde(flatten)]
    #[validate(custom(function = "validate_metrics"))]
    pub metrics: AnalysisInput,

    #[validate(range(min = 0, max = 1, message = "risk_label must be 0 or 1"))]
    pub risk_label: Option<i64>,
}

fn validate_metrics(input: &AnalysisInput) -> Result<(), ValidationError> {
    if input.revenue < 0.0 || input.payment_delay < 0.0 || input.transactions < 0 {
        return Err(ValidationError::new("negative_metric"));
    }
    if !(-1.0..=1.0).contains(&input.sentiment) {
        return Err(ValidationError::new("sentiment_out_of_range"));
    }
    Ok(())
}

impl CreateBusiness {
    /// Unlabeled submissions are stored as label 0
    pub fn into_record(self) -> NewBusinessRecord {
        NewBusinessRecord::from_input(&self.metrics, Some(self.risk_label.unwrap_or(0)))
    }
}

impl Business {
    pub async fn insert(pool: &SqlitePool, record: &NewBusinessRecord) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO businesses (monthly_revenue, payment_delays, transactions, avg_sentiment, risk_label)
            VALUES (?, ?, ?, ?, ?)
            "#
        )
        .bind(record.monthly_revenue)
        .bind(record.payment_delays)
        .bind(record.transactions)
        .bind(record.avg_sentiment)
        .bind(record.risk_label)
        .execute(pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Business>(
            r#"
            SELECT id, monthly_revenue, payment_delays, transactions, avg_sentiment, risk_label, created_at
            FROM businesses
            ORDER BY id ASC
            "#
        )
        .fetch_all(pool)
        .await
    }

    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM businesses")
            .fetch_one(pool)
            .await
    }
}

impl From<Business> for BusinessRecord {
    fn from(row: Business) -> Self {
        BusinessRecord {
            id: row.id,
            monthly_revenue: row.monthly_revenue,
            payment_delays: row.payment_delays,
            transactions: row.transactions,
            avg_sentiment: row.avg_sentiment,
            risk_label: row.risk_label,
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use serde_json::json;

    async fn pool() -> SqlitePool {
        let pool = db::create_memory_pool().await.unwrap();
        db::run_migrations(&pool).await.unwrap();
        pool
    }

    fn new_record(revenue: f64, label: Option<i64>) -> NewBusinessRecord {
        NewBusinessRecord {
            monthly_revenue: revenue,
            payment_delays: 4.0,
            transactions: 30,
            avg_sentiment: 0.2,
            risk_label: label,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let pool = pool().await;

        let first = Business::insert(&pool, &new_record(1.0, Some(0))).await.unwrap();
        let second = Business::insert(&pool, &new_record(2.0, None)).await.unwrap();

        assert!(second > first);
        assert_eq!(Business::count(&pool).await.unwrap(), 2);

        let rows = Business::list_all(&pool).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, first);
        assert_eq!(rows[0].monthly_revenue, 1.0);
        assert_eq!(rows[1].risk_label, None);
    }

    #[tokio::test]
    async fn test_row_converts_to_record() {
        let pool = pool().await;
        Business::insert(&pool, &new_record(5_000.0, Some(1))).await.unwrap();

        let row = Business::list_all(&pool).await.unwrap().remove(0);
        let record = BusinessRecord::from(row);

        assert_eq!(record.label(), Some(1));
        assert_eq!(record.features().values, [5_000.0, 4.0, 30.0, 0.2]);
    }

    #[test]
    fn test_create_business_validation() {
        let ok: CreateBusiness = serde_json::from_value(json!({
            "revenue": 1000, "paymentDelay": 3, "transactions": 10, "risk_label": 1
        }))
        .unwrap();
        assert!(ok.validate().is_ok());
        assert_eq!(ok.into_record().risk_label, Some(1));

        let bad_label: CreateBusiness = serde_json::from_value(json!({
            "revenue": 1000, "risk_label": 2
        }))
        .unwrap();
        assert!(bad_label.validate().is_err());

        let bad_sentiment: CreateBusiness = serde_json::from_value(json!({
            "revenue": 1000, "sentiment": 1.5
        }))
        .unwrap();
        assert!(bad_sentiment.validate().is_err());
    }

    #[test]
    fn test_missing_label_defaults_to_zero() {
        let body: CreateBusiness = serde_json::from_value(json!({ "revenue": 10 })).unwrap();
        assert_eq!(body.into_record().risk_label, Some(0));
    }
}
