//! Assessment persistence
//!
//! Assessments are append-only: a correction is a new row, never an
//! update. Station results and the category metrics are stored as JSON
//! documents inside the row.

use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use scoutai_common::{Error, Result};

use crate::models::{Assessment, Tier};

/// Insert an assessment
pub async fn insert_assessment(pool: &SqlitePool, assessment: &Assessment) -> Result<()> {
    let stations = serde_json::to_string(&assessment.stations)
        .map_err(|e| Error::Internal(format!("Failed to serialize stations: {}", e)))?;
    let metrics = serde_json::to_string(&assessment.metrics)
        .map_err(|e| Error::Internal(format!("Failed to serialize metrics: {}", e)))?;

    sqlx::query(
        r#"
        INSERT INTO assessments (
            assessment_id, athlete, overall_score, tier,
            stations, metrics, created_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(assessment.assessment_id.to_string())
    .bind(&assessment.athlete)
    .bind(assessment.overall_score)
    .bind(assessment.tier.as_str())
    .bind(&stations)
    .bind(&metrics)
    .bind(assessment.created_at.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}

/// Load an assessment by id
pub async fn get_assessment(pool: &SqlitePool, id: Uuid) -> Result<Option<Assessment>> {
    let row = sqlx::query(
        r#"
        SELECT assessment_id, athlete, overall_score, tier,
               stations, metrics, created_at
        FROM assessments
        WHERE assessment_id = ?
        "#,
    )
    .bind(id.to_string())
    .fetch_optional(pool)
    .await?;

    row.map(row_to_assessment).transpose()
}

/// List assessments, newest first, optionally filtered by athlete
pub async fn list_assessments(
    pool: &SqlitePool,
    athlete: Option<&str>,
    limit: i64,
) -> Result<Vec<Assessment>> {
    let rows = match athlete {
        Some(athlete) => {
            sqlx::query(
                r#"
                SELECT assessment_id, athlete, overall_score, tier,
                       stations, metrics, created_at
                FROM assessments
                WHERE athlete = ?
                ORDER BY created_at DESC
                LIMIT ?
                "#,
            )
            .bind(athlete)
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query(
                r#"
                SELECT assessment_id, athlete, overall_score, tier,
                       stations, metrics, created_at
                FROM assessments
                ORDER BY created_at DESC
                LIMIT ?
                "#,
            )
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
    };

    rows.into_iter().map(row_to_assessment).collect()
}

fn row_to_assessment(row: sqlx::sqlite::SqliteRow) -> Result<Assessment> {
    let assessment_id: String = row.get("assessment_id");
    let assessment_id = Uuid::parse_str(&assessment_id)
        .map_err(|e| Error::Internal(format!("Failed to parse assessment_id: {}", e)))?;

    let tier: String = row.get("tier");
    let tier = Tier::parse(&tier)
        .ok_or_else(|| Error::Internal(format!("Unknown tier in database: {}", tier)))?;

    let stations: String = row.get("stations");
    let stations = serde_json::from_str(&stations)
        .map_err(|e| Error::Internal(format!("Failed to deserialize stations: {}", e)))?;

    let metrics: String = row.get("metrics");
    let metrics = serde_json::from_str(&metrics)
        .map_err(|e| Error::Internal(format!("Failed to deserialize metrics: {}", e)))?;

    let created_at: String = row.get("created_at");
    let created_at = chrono::DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| Error::Internal(format!("Failed to parse created_at: {}", e)))?
        .with_timezone(&chrono::Utc);

    Ok(Assessment {
        assessment_id,
        athlete: row.get("athlete"),
        stations,
        metrics,
        overall_score: row.get("overall_score"),
        tier,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::aggregate::build_assessment;
    use crate::models::StationResult;
    use std::collections::BTreeMap;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        crate::db::init_tables(&pool).await.unwrap();
        pool
    }

    fn station(score: f64) -> StationResult {
        StationResult {
            score,
            metrics: BTreeMap::from([("detection_coverage".to_string(), 1.0)]),
        }
    }

    #[tokio::test]
    async fn test_assessment_roundtrip() {
        let pool = test_pool().await;
        let assessment = build_assessment("athlete-7", station(82.0), station(74.5), station(66.0));

        insert_assessment(&pool, &assessment).await.unwrap();
        let loaded = get_assessment(&pool, assessment.assessment_id)
            .await
            .unwrap()
            .expect("assessment should exist");

        assert_eq!(loaded, assessment);
    }

    #[tokio::test]
    async fn test_get_missing_assessment_is_none() {
        let pool = test_pool().await;
        let loaded = get_assessment(&pool, Uuid::new_v4()).await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_list_filters_by_athlete() {
        let pool = test_pool().await;
        let a = build_assessment("athlete-a", station(50.0), station(50.0), station(50.0));
        let b = build_assessment("athlete-b", station(60.0), station(60.0), station(60.0));
        insert_assessment(&pool, &a).await.unwrap();
        insert_assessment(&pool, &b).await.unwrap();

        let all = list_assessments(&pool, None, 50).await.unwrap();
        assert_eq!(all.len(), 2);

        let only_a = list_assessments(&pool, Some("athlete-a"), 50).await.unwrap();
        assert_eq!(only_a.len(), 1);
        assert_eq!(only_a[0].athlete, "athlete-a");
    }
}
