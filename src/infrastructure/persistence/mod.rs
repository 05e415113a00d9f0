//! Postgres persistence adapters
//!
//! This module implements the repository pattern for Postgres/PostGIS,
//! providing CRUD operations for all domain entities. Ownership predicates
//! are part of the queries themselves: game mutations only match rows whose
//! `owner_id` equals the caller, so the check and the write are one
//! statement.

mod card_repository;
mod character_repository;
mod companion_repository;
mod game_repository;
mod poi_repository;

pub use card_repository::PostgresCardRepository;
pub use character_repository::PostgresCharacterRepository;
pub use companion_repository::PostgresCompanionRepository;
pub use game_repository::PostgresGameRepository;
pub use poi_repository::PostgresPoiRepository;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

const SCHEMA: &str = r#"
CREATE EXTENSION IF NOT EXISTS postgis;

CREATE TABLE IF NOT EXISTS games (
    id UUID PRIMARY KEY,
    owner_id UUID NOT NULL,
    title TEXT NOT NULL DEFAULT '',
    description TEXT NOT NULL DEFAULT '',
    location geography(Point, 4326),
    cover_image_url TEXT,
    categories TEXT[] NOT NULL DEFAULT '{}',
    status TEXT NOT NULL DEFAULT 'draft',
    visibility TEXT NOT NULL DEFAULT 'private',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
CREATE INDEX IF NOT EXISTS idx_games_owner ON games (owner_id);

CREATE TABLE IF NOT EXISTS characters (
    id UUID PRIMARY KEY,
    game_id UUID NOT NULL REFERENCES games(id) ON DELETE CASCADE,
    name TEXT NOT NULL,
    summary TEXT NOT NULL,
    image_url TEXT,
    category TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
CREATE INDEX IF NOT EXISTS idx_characters_game ON characters (game_id);

CREATE TABLE IF NOT EXISTS pois (
    id UUID PRIMARY KEY,
    game_id UUID NOT NULL REFERENCES games(id) ON DELETE CASCADE,
    name TEXT NOT NULL,
    description TEXT NOT NULL,
    contextual_data TEXT NOT NULL DEFAULT '',
    image_url TEXT,
    kind TEXT NOT NULL,
    tags TEXT[] NOT NULL DEFAULT '{}',
    location geography(Point, 4326) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
CREATE INDEX IF NOT EXISTS idx_pois_game ON pois (game_id);

CREATE TABLE IF NOT EXISTS cards (
    id UUID PRIMARY KEY,
    game_id UUID NOT NULL REFERENCES games(id) ON DELETE CASCADE,
    title TEXT NOT NULL,
    prompt TEXT NOT NULL,
    kind TEXT NOT NULL,
    hero_steps TEXT[] NOT NULL DEFAULT '{}',
    audience TEXT NOT NULL,
    scope TEXT NOT NULL DEFAULT 'general',
    keywords TEXT,
    poi_id UUID REFERENCES pois(id) ON DELETE SET NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
CREATE INDEX IF NOT EXISTS idx_cards_game ON cards (game_id);

CREATE TABLE IF NOT EXISTS companion_configs (
    id UUID PRIMARY KEY,
    game_id UUID NOT NULL UNIQUE REFERENCES games(id) ON DELETE CASCADE,
    name TEXT NOT NULL,
    avatar_url TEXT,
    tone TEXT,
    personality TEXT,
    relationship TEXT,
    humor_level SMALLINT,
    formality SMALLINT,
    additional_context TEXT,
    system_prompt TEXT NOT NULL DEFAULT '',
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
"#;

/// Combined repository providing access to all domain repositories
#[derive(Clone)]
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("Failed to connect to Postgres")?;

        let repository = Self { pool };
        repository.initialize_schema().await?;
        Ok(repository)
    }

    async fn initialize_schema(&self) -> Result<()> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .context("Failed to initialize database schema")?;
        tracing::debug!("Database schema initialized");
        Ok(())
    }

    pub fn games(&self) -> PostgresGameRepository {
        PostgresGameRepository::new(self.pool.clone())
    }

    pub fn characters(&self) -> PostgresCharacterRepository {
        PostgresCharacterRepository::new(self.pool.clone())
    }

    pub fn pois(&self) -> PostgresPoiRepository {
        PostgresPoiRepository::new(self.pool.clone())
    }

    pub fn cards(&self) -> PostgresCardRepository {
        PostgresCardRepository::new(self.pool.clone())
    }

    pub fn companions(&self) -> PostgresCompanionRepository {
        PostgresCompanionRepository::new(self.pool.clone())
    }
}
