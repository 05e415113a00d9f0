//! Game repository implementation for Postgres

use anyhow::{anyhow, Result};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::entities::{Game, GameStatus, Visibility};
use crate::domain::value_objects::{GameId, GeoPoint, OwnerId};

const GAME_COLUMNS: &str = "id, owner_id, title, description, \
     ST_Y(location::geometry) AS lat, ST_X(location::geometry) AS lng, \
     cover_image_url, categories, status, visibility, created_at, updated_at";

/// Repository for Game operations
pub struct PostgresGameRepository {
    pool: PgPool,
}

impl PostgresGameRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new game
    pub async fn create(&self, game: &Game) -> Result<()> {
        sqlx::query(
            "INSERT INTO games \
                 (id, owner_id, title, description, location, cover_image_url, \
                  categories, status, visibility, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, ST_GeogFromText($5), $6, $7, $8, $9, $10, $11)",
        )
        .bind(game.id.as_uuid())
        .bind(game.owner_id.as_uuid())
        .bind(&game.title)
        .bind(&game.description)
        .bind(game.location.map(|point| point.to_ewkt()))
        .bind(&game.cover_image_url)
        .bind(&game.categories)
        .bind(game.status.as_str())
        .bind(game.visibility.as_str())
        .bind(game.created_at)
        .bind(game.updated_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!("Created game: {}", game.id);
        Ok(())
    }

    /// Get one of the owner's games by ID
    pub async fn get(&self, id: GameId, owner: OwnerId) -> Result<Option<Game>> {
        let row = sqlx::query(&format!(
            "SELECT {GAME_COLUMNS} FROM games WHERE id = $1 AND owner_id = $2"
        ))
        .bind(id.as_uuid())
        .bind(owner.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(row_to_game).transpose()
    }

    /// List the owner's games, newest first
    pub async fn list_by_owner(&self, owner: OwnerId) -> Result<Vec<Game>> {
        let rows = sqlx::query(&format!(
            "SELECT {GAME_COLUMNS} FROM games WHERE owner_id = $1 ORDER BY created_at DESC"
        ))
        .bind(owner.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(row_to_game).collect()
    }

    /// Update general information. Returns false when no row matched the
    /// id/owner pair.
    pub async fn update_general_info(&self, game: &Game) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE games \
             SET title = $3, description = $4, location = ST_GeogFromText($5), \
                 cover_image_url = $6, categories = $7, updated_at = $8 \
             WHERE id = $1 AND owner_id = $2",
        )
        .bind(game.id.as_uuid())
        .bind(game.owner_id.as_uuid())
        .bind(&game.title)
        .bind(&game.description)
        .bind(game.location.map(|point| point.to_ewkt()))
        .bind(&game.cover_image_url)
        .bind(&game.categories)
        .bind(game.updated_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!("Updated game: {}", game.id);
        Ok(result.rows_affected() > 0)
    }

    /// Set status and visibility in one conditional statement
    pub async fn set_status(
        &self,
        id: GameId,
        owner: OwnerId,
        status: GameStatus,
        visibility: Visibility,
    ) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE games SET status = $3, visibility = $4, updated_at = now() \
             WHERE id = $1 AND owner_id = $2",
        )
        .bind(id.as_uuid())
        .bind(owner.as_uuid())
        .bind(status.as_str())
        .bind(visibility.as_str())
        .execute(&self.pool)
        .await?;

        tracing::debug!("Set game {} to {}/{}", id, status.as_str(), visibility.as_str());
        Ok(result.rows_affected() > 0)
    }

    /// Delete a game; related rows cascade at the schema level
    pub async fn delete(&self, id: GameId, owner: OwnerId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM games WHERE id = $1 AND owner_id = $2")
            .bind(id.as_uuid())
            .bind(owner.as_uuid())
            .execute(&self.pool)
            .await?;

        tracing::debug!("Deleted game: {}", id);
        Ok(result.rows_affected() > 0)
    }
}

fn row_to_game(row: PgRow) -> Result<Game> {
    let status_raw: String = row.try_get("status")?;
    let status = GameStatus::parse(&status_raw)
        .ok_or_else(|| anyhow!("Unknown game status: {status_raw}"))?;

    let visibility_raw: String = row.try_get("visibility")?;
    let visibility = Visibility::parse(&visibility_raw)
        .ok_or_else(|| anyhow!("Unknown game visibility: {visibility_raw}"))?;

    let lat: Option<f64> = row.try_get("lat")?;
    let lng: Option<f64> = row.try_get("lng")?;
    let location = match (lat, lng) {
        (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
        _ => None,
    };

    Ok(Game {
        id: GameId::from_uuid(row.try_get("id")?),
        owner_id: OwnerId::from_uuid(row.try_get("owner_id")?),
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        location,
        cover_image_url: row.try_get("cover_image_url")?,
        categories: row.try_get("categories")?,
        status,
        visibility,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
