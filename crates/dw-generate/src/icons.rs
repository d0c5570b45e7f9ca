//! Startup loading of the icon catalog used by the import resolver.

use std::path::Path;
use std::time::Duration;

use dw_refine::IconTable;
use reqwest::Client;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{GenerationError, Result};

pub const LUCIDE_ICON_NODES: &str = "https://lucide.dev/api/icon-nodes";

/// Loads the icon table from `source`, an `http(s)` URL or a local JSON file.
/// Any failure is logged and yields an empty table so the server can still
/// start; unresolved icons then take the fallback path.
pub async fn load_icon_table(source: &str, timeout: Duration) -> IconTable {
    match fetch_icon_table(source, timeout).await {
        Ok(icons) => {
            info!(icons = icons.len(), source, "loaded icon catalog");
            icons
        }
        Err(err) => {
            warn!(%err, source, "icon catalog unavailable, continuing without icons");
            IconTable::empty()
        }
    }
}

async fn fetch_icon_table(source: &str, timeout: Duration) -> Result<IconTable> {
    let catalog: Value = if source.starts_with("http://") || source.starts_with("https://") {
        let client = Client::builder().timeout(timeout).build()?;
        client
            .get(source)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?
    } else {
        let path = Path::new(source);
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|err| GenerationError::IconCatalog(format!("{}: {err}", path.display())))?;
        serde_json::from_str(&text).map_err(|err| GenerationError::IconCatalog(err.to_string()))?
    };
    icon_table_from_catalog(&catalog)
}

/// The catalog is a JSON object keyed by kebab-case icon names; the values
/// are icon node data and are ignored.
pub fn icon_table_from_catalog(catalog: &Value) -> Result<IconTable> {
    let entries = catalog.as_object().ok_or_else(|| {
        GenerationError::IconCatalog("expected an object keyed by icon name".to_string())
    })?;
    Ok(IconTable::from_icon_keys(entries.keys()))
}
