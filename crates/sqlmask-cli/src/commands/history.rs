use anyhow::Result;

use super::Context;
use super::mask::render_mapping;
use crate::cli::HistoryCommands;

pub async fn handle(ctx: &Context, cmd: HistoryCommands) -> Result<()> {
    let storage = ctx.storage().await?;

    match cmd {
        HistoryCommands::List => {
            let rows = storage.list_history(ctx.config.history.preview_chars).await?;

            if rows.is_empty() {
                println!("No history found.");
                return Ok(());
            }

            println!("History:");
            for row in rows {
                let status = if row.restored_at.is_some() { "restored" } else { "masked" };
                println!("  #{} [{}] {}", row.id, status, single_line(&row.preview));
                println!("    Created: {}", row.created_at);
            }
        }
        HistoryCommands::Show { id } => {
            let record = storage.get_history(id).await?;

            println!("History #{}", record.id);
            println!("  Created: {}", record.created_at);
            if let Some(restored_at) = record.restored_at {
                println!("  Restored: {}", restored_at);
            }

            println!("\nOriginal:\n{}", record.original_query);
            println!("\nMasked:\n{}", record.masked_query);
            if let Some(restored) = &record.restored_query {
                println!("\nRestored:\n{}", restored);
            }

            println!();
            print!("{}", render_mapping(&record.mapping));
        }
        HistoryCommands::Delete { id } => {
            storage.delete_history(id).await?;
            println!("✓ Deleted history #{}", id);
        }
    }

    Ok(())
}

/// Collapse line breaks so a preview fits on one line
fn single_line(preview: &str) -> String {
    preview.split_whitespace().collect::<Vec<_>>().join(" ")
}
