//! Startup data: optional bootstrap admin and demo content.

use inkpost_core::validation::{validate_author_name, validate_new_password};
use inkpost_db::models::author::{Author, CreateAuthor};

use crate::auth::principal::Principal;
use crate::config::BootstrapAdmin;
use crate::error::AppResult;
use crate::services::articles;
use crate::state::AppState;

/// Demo authors as `(name, password)`.
const DEMO_AUTHORS: &[(&str, &str)] = &[("alice", "g3h3im"), ("bob", "s3cr3t")];

/// Demo articles by the first demo author, oldest first.
const DEMO_ARTICLES: &[(&str, &str)] = &[
    (
        "Test-Beitrag 1 (automatisch erzeugt)",
        r#"{"ops":[{"attributes":{"bold":true},"insert":"Testbeitrag (Demo-Content)"},{"insert":"\n"}]}"#,
    ),
    (
        "Test-Beitrag 2 (automatisch erzeugt)",
        r#"{"ops":[{"insert":"Noch ein Testbeitrag (Demo-Content)\n"}]}"#,
    ),
];

/// Create the configured admin author unless the name already exists.
pub async fn ensure_bootstrap_admin(state: &AppState, admin: &BootstrapAdmin) -> AppResult<()> {
    let name = validate_author_name(&admin.name)?;

    if let Some(existing) = state.store.find_author_by_name(name).await? {
        if !existing.is_admin {
            tracing::warn!(author_id = existing.id, "Bootstrap admin name belongs to a non-admin");
        }
        return Ok(());
    }

    let password = validate_new_password(&admin.password, &admin.password)?;
    let author = insert_author(state, name, password, true).await?;
    tracing::info!(author_id = author.id, "Bootstrap admin created");
    Ok(())
}

/// Seed demo authors and articles when no articles exist yet.
///
/// Content goes through the same rendering and sanitizing as user input.
pub async fn seed_demo_data(state: &AppState) -> AppResult<()> {
    if state.store.count_articles().await? > 0 {
        tracing::info!("Articles present, skipping demo data");
        return Ok(());
    }

    let mut authors = Vec::with_capacity(DEMO_AUTHORS.len());
    for (name, password) in DEMO_AUTHORS {
        let author = match state.store.find_author_by_name(name).await? {
            Some(author) => author,
            None => insert_author(state, name, password, false).await?,
        };
        authors.push(author);
    }

    let owner = Principal::for_author(&authors[0]);
    for (title, content_rich) in DEMO_ARTICLES {
        articles::create(&*state.store, Some(&owner), title, content_rich).await?;
    }

    tracing::info!(
        authors = authors.len(),
        articles = DEMO_ARTICLES.len(),
        "Demo data seeded",
    );
    Ok(())
}

async fn insert_author(
    state: &AppState,
    name: &str,
    password: &str,
    is_admin: bool,
) -> AppResult<Author> {
    let password_hash = state.hasher.hash_blocking(password.to_string()).await?;
    let author = state
        .store
        .create_author(&CreateAuthor {
            name: name.to_string(),
            password_hash,
            is_admin,
        })
        .await?;
    Ok(author)
}
