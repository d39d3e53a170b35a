//! Redis session cache.
//!
//! Mirrors the editing session under fixed per-user keys — one key per
//! entity sequence and one per style parameter. On load, any key present
//! in the cache takes precedence over the remote default for that
//! sequence, so an in-progress edit survives reconnects without clobbering
//! the parts the user never touched. A value that fails to parse is
//! treated as a miss, not an error: a stale cache must never block a load.

use anyhow::Result;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::models::{ResumeDocument, StyleParameters};

pub const KEY_PERSONAL: &str = "personal";
pub const KEY_EDUCATION: &str = "educationData";
pub const KEY_EXPERIENCES: &str = "experiences";
pub const KEY_PROJECTS: &str = "projectData";
pub const KEY_SKILLS: &str = "skillsData";
pub const KEY_FONT: &str = "font";
pub const KEY_FONT_SIZE: &str = "fontSize";
pub const KEY_COLORS: &str = "colors";
pub const KEY_MARGINS: &str = "margins";

fn key(user_id: Uuid, name: &str) -> String {
    format!("user:{user_id}:{name}")
}

async fn get_json<T: DeserializeOwned>(
    conn: &mut MultiplexedConnection,
    key: &str,
) -> Result<Option<T>> {
    let raw: Option<String> = conn.get(key).await?;
    match raw {
        None => Ok(None),
        Some(s) => match serde_json::from_str(&s) {
            Ok(v) => Ok(Some(v)),
            Err(e) => {
                warn!("discarding unparseable cache entry {key}: {e}");
                Ok(None)
            }
        },
    }
}

async fn set_json<T: Serialize>(
    conn: &mut MultiplexedConnection,
    key: &str,
    value: &T,
) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    conn.set::<_, _, ()>(key, raw).await?;
    Ok(())
}

/// Overlays cached entity sequences onto `base`, key by key. Returns true
/// when at least one sequence came from the cache.
pub async fn apply_cached_document(
    client: &Client,
    user_id: Uuid,
    base: &mut ResumeDocument,
) -> Result<bool> {
    let mut conn = client.get_multiplexed_async_connection().await?;
    let mut hit = false;

    if let Some(v) = get_json(&mut conn, &key(user_id, KEY_PERSONAL)).await? {
        base.personal = v;
        hit = true;
    }
    if let Some(v) = get_json(&mut conn, &key(user_id, KEY_EDUCATION)).await? {
        base.education = v;
        hit = true;
    }
    if let Some(v) = get_json(&mut conn, &key(user_id, KEY_EXPERIENCES)).await? {
        base.experience = v;
        hit = true;
    }
    if let Some(v) = get_json(&mut conn, &key(user_id, KEY_PROJECTS)).await? {
        base.projects = v;
        hit = true;
    }
    if let Some(v) = get_json(&mut conn, &key(user_id, KEY_SKILLS)).await? {
        base.skills = v;
        hit = true;
    }

    Ok(hit)
}

/// Writes every entity sequence of the document to its session key.
pub async fn store_document(client: &Client, user_id: Uuid, doc: &ResumeDocument) -> Result<()> {
    let mut conn = client.get_multiplexed_async_connection().await?;
    set_json(&mut conn, &key(user_id, KEY_PERSONAL), &doc.personal).await?;
    set_json(&mut conn, &key(user_id, KEY_EDUCATION), &doc.education).await?;
    set_json(&mut conn, &key(user_id, KEY_EXPERIENCES), &doc.experience).await?;
    set_json(&mut conn, &key(user_id, KEY_PROJECTS), &doc.projects).await?;
    set_json(&mut conn, &key(user_id, KEY_SKILLS), &doc.skills).await?;
    Ok(())
}

/// Overlays cached style parameters onto `base`, parameter by parameter.
pub async fn apply_cached_style(
    client: &Client,
    user_id: Uuid,
    base: &mut StyleParameters,
) -> Result<()> {
    let mut conn = client.get_multiplexed_async_connection().await?;

    if let Some(v) = get_json(&mut conn, &key(user_id, KEY_FONT)).await? {
        base.font = v;
    }
    if let Some(v) = get_json(&mut conn, &key(user_id, KEY_FONT_SIZE)).await? {
        base.font_size = v;
    }
    if let Some(v) = get_json(&mut conn, &key(user_id, KEY_COLORS)).await? {
        base.colors = v;
    }
    if let Some(v) = get_json(&mut conn, &key(user_id, KEY_MARGINS)).await? {
        base.margins = v;
    }

    Ok(())
}

/// Writes the full style parameter set to its session keys.
pub async fn store_style(client: &Client, user_id: Uuid, style: &StyleParameters) -> Result<()> {
    let mut conn = client.get_multiplexed_async_connection().await?;
    set_json(&mut conn, &key(user_id, KEY_FONT), &style.font).await?;
    set_json(&mut conn, &key(user_id, KEY_FONT_SIZE), &style.font_size).await?;
    set_json(&mut conn, &key(user_id, KEY_COLORS), &style.colors).await?;
    set_json(&mut conn, &key(user_id, KEY_MARGINS), &style.margins).await?;
    Ok(())
}
