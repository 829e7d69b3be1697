//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use kiosk_auth::MemoryAuthProvider;
use kiosk_db::MemoryProductRepository;
use kiosk_storefront::{Storefront, StorefrontConfig};

use crate::output::Output;

/// Config file names, in lookup order.
pub const CONFIG_NAMES: [&str; 3] = ["kiosk.toml", ".kiosk.toml", "kiosk.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// Storefront configuration.
    pub config: StorefrontConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from an explicit config file, or the nearest one found
    /// walking up from the working directory.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = PathBuf::from(path);
                let config = StorefrontConfig::load(&path)?;
                (config, Some(path))
            }
            None => match find_config(&cwd) {
                Some(path) => {
                    let config = StorefrontConfig::load(&path)?;
                    (config, Some(path))
                }
                None => (StorefrontConfig::default(), None),
            },
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        let path = PathBuf::from(path);
        if path.is_absolute() {
            path
        } else {
            self.cwd.join(path)
        }
    }

    /// Build a storefront over a catalog fixture, as an anonymous visitor.
    pub async fn storefront(&self, fixture: &str, width: u32) -> Result<Storefront> {
        self.storefront_with(self.config.clone(), fixture, width).await
    }

    /// Like [`storefront`](Self::storefront), with a different config.
    pub async fn storefront_with(
        &self,
        config: StorefrontConfig,
        fixture: &str,
        width: u32,
    ) -> Result<Storefront> {
        let path = self.resolve_path(fixture);
        let repo = MemoryProductRepository::load_fixture(&path)
            .with_context(|| format!("Failed to load catalog: {}", path.display()))?;
        self.output
            .debug(&format!("{} products in {}", repo.len(), path.display()));

        let storefront = Storefront::builder()
            .with_config(config)
            .with_repository(Arc::new(repo))
            .with_auth_provider(Arc::new(MemoryAuthProvider::default()))
            .with_viewport_width(width)
            .build()?;
        storefront.load().await?;
        Ok(storefront)
    }
}

/// Find a config file in `start` or any parent.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let root = std::env::temp_dir().join(format!("kiosk-cli-{}", std::process::id()));
        let nested = root.join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.join("kiosk.json"), "{}").unwrap();

        assert_eq!(find_config(&nested), Some(root.join("kiosk.json")));

        std::fs::write(nested.join(".kiosk.toml"), "").unwrap();
        assert_eq!(find_config(&nested), Some(nested.join(".kiosk.toml")));

        std::fs::remove_dir_all(&root).unwrap();
    }
}
