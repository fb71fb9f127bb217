pub mod config;
pub mod history;
pub mod mask;
pub mod serve;
pub mod unmask;

use anyhow::{Context as _, Result};
use sqlmask_config::Config;
use sqlmask_core::QueryMasker;
use sqlmask_storage::Storage;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Settings shared by every command
pub struct Context {
    pub config: Config,
    db_override: Option<PathBuf>,
}

impl Context {
    pub fn new(config: Config, db_override: Option<PathBuf>) -> Self {
        Self {
            config,
            db_override,
        }
    }

    pub fn masker(&self) -> QueryMasker {
        QueryMasker::new(self.config.masking)
    }

    /// Database path: `--db` flag, then config, then the platform default
    pub fn db_path(&self) -> Option<PathBuf> {
        self.db_override
            .clone()
            .or_else(|| self.config.storage.db_path.clone())
    }

    pub async fn storage(&self) -> Result<Storage> {
        Storage::new(self.db_path())
            .await
            .context("failed to open history database")
    }
}

/// Read a statement from `file`, or from stdin when no file is given.
///
/// Input must be UTF-8; anything else is rejected before masking.
pub fn read_input(file: Option<&Path>) -> Result<String> {
    let bytes = match file {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?
        }
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    String::from_utf8(bytes).context("input is not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_input_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("query.sql");
        std::fs::write(&path, "SELECT A FROM S.T").unwrap();

        assert_eq!(read_input(Some(&path)).unwrap(), "SELECT A FROM S.T");
    }

    #[test]
    fn test_read_input_rejects_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("query.sql");
        std::fs::write(&path, [0x53, 0xff, 0xfe]).unwrap();

        let err = read_input(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("not valid UTF-8"));
    }

    #[test]
    fn test_db_flag_overrides_config() {
        let mut config = Config::default();
        config.storage.db_path = Some(PathBuf::from("/from/config.db"));

        let ctx = Context::new(config.clone(), None);
        assert_eq!(ctx.db_path(), Some(PathBuf::from("/from/config.db")));

        let ctx = Context::new(config, Some(PathBuf::from("/from/flag.db")));
        assert_eq!(ctx.db_path(), Some(PathBuf::from("/from/flag.db")));
    }
}
