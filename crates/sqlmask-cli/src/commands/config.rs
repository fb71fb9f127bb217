use anyhow::Result;
use sqlmask_config::Config;

use super::Context;
use crate::cli::ConfigCommands;

pub fn handle(ctx: &Context, cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Show => {
            print!("{}", toml::to_string_pretty(&ctx.config)?);
            if let Some(path) = ctx.db_path() {
                println!("\n# effective database: {}", path.display());
            }
        }
        ConfigCommands::Path => {
            println!("{}", Config::config_path().display());
        }
    }

    Ok(())
}
