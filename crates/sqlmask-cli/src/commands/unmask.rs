use anyhow::{Context as _, Result};
use sqlmask_core::AliasMapping;
use std::path::{Path, PathBuf};

use super::{Context, read_input};

pub async fn handle(
    ctx: &Context,
    file: Option<PathBuf>,
    id: Option<i64>,
    mapping_file: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let text = read_input(file.as_deref())?;
    let masker = ctx.masker();

    let restored = match (id, mapping_file) {
        (Some(id), _) => {
            let storage = ctx.storage().await?;
            let mapping = storage
                .get_mapping(id)
                .await
                .with_context(|| format!("cannot restore from history #{}", id))?;
            let restored = masker.unmask(&text, &mapping);
            storage.save_restoration(id, &restored).await?;
            restored
        }
        (None, Some(path)) => masker.unmask(&text, &load_mapping(&path)?),
        (None, None) => anyhow::bail!("either --id or --mapping is required"),
    };

    if json {
        let body = serde_json::json!({
            "history_id": id,
            "restored_query": restored,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        println!("{}", restored);
    }

    Ok(())
}

/// Read a flat `{ "ALIAS": "original" }` JSON object
pub fn load_mapping(path: &Path) -> Result<AliasMapping> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read mapping {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("invalid mapping in {}", path.display()))
}
