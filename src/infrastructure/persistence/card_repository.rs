//! Card repository implementation for Postgres

use anyhow::{anyhow, Result};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::entities::{Card, CardAudience, CardScope, PoiKind};
use crate::domain::value_objects::{CardId, GameId, HeroJourneyStage, PoiId};

/// Repository for Card operations
pub struct PostgresCardRepository {
    pool: PgPool,
}

impl PostgresCardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new card
    pub async fn create(&self, card: &Card) -> Result<()> {
        sqlx::query(
            "INSERT INTO cards \
                 (id, game_id, title, prompt, kind, hero_steps, audience, scope, keywords, poi_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(card.id.as_uuid())
        .bind(card.game_id.as_uuid())
        .bind(&card.title)
        .bind(&card.prompt)
        .bind(card.kind.as_str())
        .bind(stages_to_strings(&card.hero_steps))
        .bind(card.audience.as_str())
        .bind(card.scope.as_str())
        .bind(&card.keywords)
        .bind(card.poi_id.map(|id| *id.as_uuid()))
        .execute(&self.pool)
        .await?;

        tracing::debug!("Created card: {}", card.title);
        Ok(())
    }

    /// List all cards in a game, oldest first
    pub async fn list_by_game(&self, game_id: GameId) -> Result<Vec<Card>> {
        let rows = sqlx::query(
            "SELECT id, game_id, title, prompt, kind, hero_steps, audience, scope, keywords, poi_id \
             FROM cards WHERE game_id = $1 ORDER BY created_at",
        )
        .bind(game_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(row_to_card).collect()
    }

    /// Update a card within its game
    pub async fn update(&self, card: &Card) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE cards \
             SET title = $3, prompt = $4, kind = $5, hero_steps = $6, audience = $7, \
                 scope = $8, keywords = $9, poi_id = $10 \
             WHERE id = $1 AND game_id = $2",
        )
        .bind(card.id.as_uuid())
        .bind(card.game_id.as_uuid())
        .bind(&card.title)
        .bind(&card.prompt)
        .bind(card.kind.as_str())
        .bind(stages_to_strings(&card.hero_steps))
        .bind(card.audience.as_str())
        .bind(card.scope.as_str())
        .bind(&card.keywords)
        .bind(card.poi_id.map(|id| *id.as_uuid()))
        .execute(&self.pool)
        .await?;

        tracing::debug!("Updated card: {}", card.id);
        Ok(result.rows_affected() > 0)
    }

    /// Delete a card within its game
    pub async fn delete(&self, id: CardId, game_id: GameId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM cards WHERE id = $1 AND game_id = $2")
            .bind(id.as_uuid())
            .bind(game_id.as_uuid())
            .execute(&self.pool)
            .await?;

        tracing::debug!("Deleted card: {}", id);
        Ok(result.rows_affected() > 0)
    }
}

fn stages_to_strings(stages: &[HeroJourneyStage]) -> Vec<String> {
    stages.iter().map(|stage| stage.as_str().to_string()).collect()
}

fn row_to_card(row: PgRow) -> Result<Card> {
    let kind_raw: String = row.try_get("kind")?;
    let kind = PoiKind::parse(&kind_raw).ok_or_else(|| anyhow!("Unknown card kind: {kind_raw}"))?;

    let audience_raw: String = row.try_get("audience")?;
    let audience = CardAudience::parse(&audience_raw)
        .ok_or_else(|| anyhow!("Unknown card audience: {audience_raw}"))?;

    let scope_raw: String = row.try_get("scope")?;
    let scope =
        CardScope::parse(&scope_raw).ok_or_else(|| anyhow!("Unknown card scope: {scope_raw}"))?;

    // Stage names are a closed set; anything unrecognized in storage is
    // skipped so one bad tag cannot take the whole deck down.
    let steps_raw: Vec<String> = row.try_get("hero_steps")?;
    let hero_steps = steps_raw
        .iter()
        .filter_map(|raw| {
            let parsed = HeroJourneyStage::parse(raw);
            if parsed.is_none() {
                tracing::debug!("Skipping unknown hero journey stage: {raw}");
            }
            parsed
        })
        .collect();

    Ok(Card {
        id: CardId::from_uuid(row.try_get("id")?),
        game_id: GameId::from_uuid(row.try_get("game_id")?),
        title: row.try_get("title")?,
        prompt: row.try_get("prompt")?,
        kind,
        hero_steps,
        audience,
        scope,
        keywords: row.try_get("keywords")?,
        poi_id: row
            .try_get::<Option<uuid::Uuid>, _>("poi_id")?
            .map(PoiId::from_uuid),
    })
}
