//! Character repository implementation for Postgres

use anyhow::{anyhow, Result};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::entities::{Character, CharacterCategory};
use crate::domain::value_objects::{CharacterId, GameId};

/// Repository for Character operations
pub struct PostgresCharacterRepository {
    pool: PgPool,
}

impl PostgresCharacterRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new character
    pub async fn create(&self, character: &Character) -> Result<()> {
        sqlx::query(
            "INSERT INTO characters (id, game_id, name, summary, image_url, category) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(character.id.as_uuid())
        .bind(character.game_id.as_uuid())
        .bind(&character.name)
        .bind(&character.summary)
        .bind(&character.image_url)
        .bind(character.category.as_str())
        .execute(&self.pool)
        .await?;

        tracing::debug!("Created character: {}", character.name);
        Ok(())
    }

    /// List all characters in a game, oldest first
    pub async fn list_by_game(&self, game_id: GameId) -> Result<Vec<Character>> {
        let rows = sqlx::query(
            "SELECT id, game_id, name, summary, image_url, category \
             FROM characters WHERE game_id = $1 ORDER BY created_at",
        )
        .bind(game_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(row_to_character).collect()
    }

    /// Update a character within its game
    pub async fn update(&self, character: &Character) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE characters \
             SET name = $3, summary = $4, image_url = $5, category = $6 \
             WHERE id = $1 AND game_id = $2",
        )
        .bind(character.id.as_uuid())
        .bind(character.game_id.as_uuid())
        .bind(&character.name)
        .bind(&character.summary)
        .bind(&character.image_url)
        .bind(character.category.as_str())
        .execute(&self.pool)
        .await?;

        tracing::debug!("Updated character: {}", character.id);
        Ok(result.rows_affected() > 0)
    }

    /// Delete a character within its game
    pub async fn delete(&self, id: CharacterId, game_id: GameId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM characters WHERE id = $1 AND game_id = $2")
            .bind(id.as_uuid())
            .bind(game_id.as_uuid())
            .execute(&self.pool)
            .await?;

        tracing::debug!("Deleted character: {}", id);
        Ok(result.rows_affected() > 0)
    }
}

fn row_to_character(row: PgRow) -> Result<Character> {
    let category_raw: String = row.try_get("category")?;
    let category = CharacterCategory::parse(&category_raw)
        .ok_or_else(|| anyhow!("Unknown character category: {category_raw}"))?;

    Ok(Character {
        id: CharacterId::from_uuid(row.try_get("id")?),
        game_id: GameId::from_uuid(row.try_get("game_id")?),
        name: row.try_get("name")?,
        summary: row.try_get("summary")?,
        image_url: row.try_get("image_url")?,
        category,
    })
}
