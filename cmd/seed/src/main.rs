//! # seed
//!
//! Creates the initial admin account so the admin-gated endpoints are
//! reachable on a fresh database. Credentials come from
//! `LECTERN_SEED_NAME` / `LECTERN_SEED_EMAIL` / `LECTERN_SEED_PASSWORD`.

use anyhow::Context;
use chrono::Utc;
use uuid::Uuid;

use auth_adapters::Argon2Hasher;
use configs::AppConfig;
use domains::models::{Role, User};
use domains::ports::{PasswordHasher, UserRepo};
use storage_adapters::SqliteStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    let config = AppConfig::load().context("failed to load configuration")?;
    let store = SqliteStore::connect(&config.database.url)
        .await
        .context("failed to open database")?;
    let users = store.users();

    let name = std::env::var("LECTERN_SEED_NAME").unwrap_or_else(|_| "Administrator".into());
    let email = std::env::var("LECTERN_SEED_EMAIL")
        .unwrap_or_else(|_| "admin@lectern.local".into())
        .trim()
        .to_lowercase();
    let password = std::env::var("LECTERN_SEED_PASSWORD")
        .context("LECTERN_SEED_PASSWORD must be set to seed the admin account")?;
    anyhow::ensure!(
        password.len() >= 8,
        "seed password must be at least 8 characters"
    );

    if users.find_by_email(&email).await?.is_some() {
        tracing::info!(%email, "admin account already present, nothing to do");
        return Ok(());
    }

    let now = Utc::now();
    let admin = User {
        id: Uuid::new_v4(),
        name,
        email: email.clone(),
        password_hash: Argon2Hasher::new().hash(&password)?,
        role: Role::Admin,
        created_at: now,
        updated_at: now,
    };
    let admin_id = admin.id;
    users.insert(admin).await?;

    tracing::info!(%email, %admin_id, "admin account created");
    Ok(())
}
