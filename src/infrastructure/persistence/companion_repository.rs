//! Companion config repository implementation for Postgres

use anyhow::Result;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::entities::{CompanionConfig, CompanionRole, Personality, Tone};
use crate::domain::value_objects::{CompanionConfigId, GameId};

/// Repository for the per-game companion configuration
pub struct PostgresCompanionRepository {
    pool: PgPool,
}

impl PostgresCompanionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get the companion config for a game, if one has been saved
    pub async fn get_by_game(&self, game_id: GameId) -> Result<Option<CompanionConfig>> {
        let row = sqlx::query(
            "SELECT id, game_id, name, avatar_url, tone, personality, relationship, \
                    humor_level, formality, additional_context, system_prompt \
             FROM companion_configs WHERE game_id = $1",
        )
        .bind(game_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(row_to_config).transpose()
    }

    /// Insert or replace the game's companion config
    pub async fn upsert(&self, config: &CompanionConfig) -> Result<()> {
        sqlx::query(
            "INSERT INTO companion_configs \
                 (id, game_id, name, avatar_url, tone, personality, relationship, \
                  humor_level, formality, additional_context, system_prompt, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, now()) \
             ON CONFLICT (game_id) DO UPDATE SET \
                 name = EXCLUDED.name, \
                 avatar_url = EXCLUDED.avatar_url, \
                 tone = EXCLUDED.tone, \
                 personality = EXCLUDED.personality, \
                 relationship = EXCLUDED.relationship, \
                 humor_level = EXCLUDED.humor_level, \
                 formality = EXCLUDED.formality, \
                 additional_context = EXCLUDED.additional_context, \
                 system_prompt = EXCLUDED.system_prompt, \
                 updated_at = now()",
        )
        .bind(config.id.as_uuid())
        .bind(config.game_id.as_uuid())
        .bind(&config.name)
        .bind(&config.avatar_url)
        .bind(config.tone.map(|tone| tone.as_str()))
        .bind(config.personality.map(|personality| personality.as_str()))
        .bind(config.relationship.map(|relationship| relationship.as_str()))
        .bind(config.humor_level)
        .bind(config.formality)
        .bind(&config.additional_context)
        .bind(&config.system_prompt)
        .execute(&self.pool)
        .await?;

        tracing::debug!("Saved companion config for game: {}", config.game_id);
        Ok(())
    }
}

fn row_to_config(row: PgRow) -> Result<CompanionConfig> {
    // Persona columns are nullable and may also hold values written by an
    // older build; anything unrecognized reads back as unset and the
    // readiness check reports the field as missing.
    let tone = row
        .try_get::<Option<String>, _>("tone")?
        .as_deref()
        .and_then(Tone::parse);
    let personality = row
        .try_get::<Option<String>, _>("personality")?
        .as_deref()
        .and_then(Personality::parse);
    let relationship = row
        .try_get::<Option<String>, _>("relationship")?
        .as_deref()
        .and_then(CompanionRole::parse);

    Ok(CompanionConfig {
        id: CompanionConfigId::from_uuid(row.try_get("id")?),
        game_id: GameId::from_uuid(row.try_get("game_id")?),
        name: row.try_get("name")?,
        avatar_url: row.try_get("avatar_url")?,
        tone,
        personality,
        relationship,
        humor_level: row.try_get("humor_level")?,
        formality: row.try_get("formality")?,
        additional_context: row.try_get("additional_context")?,
        system_prompt: row.try_get("system_prompt")?,
    })
}
