use anyhow::Result;
use sqlmask_core::{AliasMapping, Role};
use std::fmt::Write as _;
use std::path::PathBuf;

use super::{Context, read_input};

pub async fn handle(ctx: &Context, file: Option<PathBuf>, json: bool, no_save: bool) -> Result<()> {
    let sql = read_input(file.as_deref())?;
    let result = ctx.masker().mask(&sql);

    let history_id = if no_save {
        None
    } else {
        let storage = ctx.storage().await?;
        Some(storage.save_masking(&sql, &result).await?)
    };

    if json {
        let body = serde_json::json!({
            "history_id": history_id,
            "masked_query": result.masked,
            "mapping": result.mapping,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    println!("{}", result.masked);
    println!();
    print!("{}", render_mapping(&result.mapping));

    if let Some(id) = history_id {
        println!("\n✓ Saved as history #{}", id);
        println!("  Restore with: sqlmask unmask --id {}", id);
    }

    Ok(())
}

/// Alias table for terminal output
pub fn render_mapping(mapping: &AliasMapping) -> String {
    if mapping.is_empty() {
        return "No identifiers masked.\n".to_string();
    }

    let mut out = format!("Mapping ({} aliases):\n", mapping.len());
    for (alias, original) in mapping.iter() {
        let role = Role::from_alias(alias)
            .map(|role| role.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        let _ = writeln!(out, "  {:<8} {}  ({})", alias, original, role);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_mapping() {
        let result = sqlmask_core::mask("SELECT u.NAME FROM HR.TB_USER u");
        let rendered = render_mapping(&result.mapping);

        assert!(rendered.starts_with("Mapping (4 aliases):\n"));
        assert!(rendered.contains("  TBL_001  TB_USER  (table)\n"));
        assert!(rendered.contains("  ALS_001  u  (table alias)\n"));
    }

    #[test]
    fn test_render_empty_mapping() {
        assert_eq!(
            render_mapping(&AliasMapping::new()),
            "No identifiers masked.\n"
        );
    }
}
