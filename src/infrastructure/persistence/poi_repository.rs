//! POI repository implementation for Postgres

use anyhow::{anyhow, Result};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::entities::{Poi, PoiKind};
use crate::domain::value_objects::{GameId, GeoPoint, PoiId};

const POI_COLUMNS: &str = "id, game_id, name, description, contextual_data, image_url, \
     kind, tags, ST_Y(location::geometry) AS lat, ST_X(location::geometry) AS lng";

/// Repository for POI operations
pub struct PostgresPoiRepository {
    pool: PgPool,
}

impl PostgresPoiRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new POI
    pub async fn create(&self, poi: &Poi) -> Result<()> {
        sqlx::query(
            "INSERT INTO pois \
                 (id, game_id, name, description, contextual_data, image_url, kind, tags, location) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, ST_GeogFromText($9))",
        )
        .bind(poi.id.as_uuid())
        .bind(poi.game_id.as_uuid())
        .bind(&poi.name)
        .bind(&poi.description)
        .bind(&poi.contextual_data)
        .bind(&poi.image_url)
        .bind(poi.kind.as_str())
        .bind(&poi.tags)
        .bind(poi.location.to_ewkt())
        .execute(&self.pool)
        .await?;

        tracing::debug!("Created POI: {}", poi.name);
        Ok(())
    }

    /// Get a POI within a game
    pub async fn get(&self, id: PoiId, game_id: GameId) -> Result<Option<Poi>> {
        let row = sqlx::query(&format!(
            "SELECT {POI_COLUMNS} FROM pois WHERE id = $1 AND game_id = $2"
        ))
        .bind(id.as_uuid())
        .bind(game_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(row_to_poi).transpose()
    }

    /// List all POIs in a game, oldest first
    pub async fn list_by_game(&self, game_id: GameId) -> Result<Vec<Poi>> {
        let rows = sqlx::query(&format!(
            "SELECT {POI_COLUMNS} FROM pois WHERE game_id = $1 ORDER BY created_at"
        ))
        .bind(game_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(row_to_poi).collect()
    }

    /// Update a POI within its game
    pub async fn update(&self, poi: &Poi) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE pois \
             SET name = $3, description = $4, contextual_data = $5, image_url = $6, \
                 kind = $7, tags = $8, location = ST_GeogFromText($9) \
             WHERE id = $1 AND game_id = $2",
        )
        .bind(poi.id.as_uuid())
        .bind(poi.game_id.as_uuid())
        .bind(&poi.name)
        .bind(&poi.description)
        .bind(&poi.contextual_data)
        .bind(&poi.image_url)
        .bind(poi.kind.as_str())
        .bind(&poi.tags)
        .bind(poi.location.to_ewkt())
        .execute(&self.pool)
        .await?;

        tracing::debug!("Updated POI: {}", poi.id);
        Ok(result.rows_affected() > 0)
    }

    /// Delete a POI within its game
    pub async fn delete(&self, id: PoiId, game_id: GameId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM pois WHERE id = $1 AND game_id = $2")
            .bind(id.as_uuid())
            .bind(game_id.as_uuid())
            .execute(&self.pool)
            .await?;

        tracing::debug!("Deleted POI: {}", id);
        Ok(result.rows_affected() > 0)
    }
}

fn row_to_poi(row: PgRow) -> Result<Poi> {
    let kind_raw: String = row.try_get("kind")?;
    let kind = PoiKind::parse(&kind_raw).ok_or_else(|| anyhow!("Unknown POI kind: {kind_raw}"))?;

    let lat: f64 = row.try_get("lat")?;
    let lng: f64 = row.try_get("lng")?;

    Ok(Poi {
        id: PoiId::from_uuid(row.try_get("id")?),
        game_id: GameId::from_uuid(row.try_get("game_id")?),
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        contextual_data: row.try_get("contextual_data")?,
        image_url: row.try_get("image_url")?,
        kind,
        tags: row.try_get("tags")?,
        location: GeoPoint::new(lat, lng),
    })
}
