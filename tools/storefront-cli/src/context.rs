//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use storefront_cache::FileStore;
use storefront_commerce::cart::CartStorage;
use storefront_commerce::catalog::Catalog;
use storefront_commerce::Storefront;
use storefront_data::CatalogLoader;

use crate::config::{ShopConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: ShopConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            let path = resolve_against(&cwd, path);
            (ShopConfig::load(&path)?, Some(path))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((path, config)) => (config, Some(path)),
                None => (ShopConfig::default(), None),
            }
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(PathBuf, ShopConfig)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = ShopConfig::load(&config_path) {
                        return Some((config_path, config));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Directory relative config paths resolve against.
    pub fn base_dir(&self) -> &Path {
        self.config_path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(self.cwd.as_path())
    }

    /// Resolve a path relative to the config file's directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        resolve_against(self.base_dir(), path)
    }

    /// Catalog location with file paths resolved; URLs pass through.
    pub fn catalog_location(&self) -> String {
        let source = self.config.catalog.source.trim();
        if source.starts_with("http://") || source.starts_with("https://") {
            source.to_string()
        } else {
            self.resolve_path(source).display().to_string()
        }
    }

    /// Fetch the catalog, falling back to an empty one with a warning.
    pub async fn load_catalog(&self) -> Result<Catalog> {
        let loader = CatalogLoader::from_location(&self.catalog_location())?
            .with_policy(self.config.catalog.fetch_policy());

        let spinner = self.output.spinner("Loading products...");
        let (catalog, err) = loader.fetch_or_empty().await;
        spinner.finish_and_clear();

        if let Some(e) = err {
            self.output.warn(&format!(
                "Could not load products from {}: {}",
                loader.location(),
                e
            ));
        }
        self.output
            .debug(&format!("{} products from {}", catalog.len(), loader.location()));

        Ok(catalog)
    }

    /// Open the cart storage and the catalog as one session.
    pub async fn open_storefront(&self) -> Result<Storefront<FileStore>> {
        let catalog = self.load_catalog().await?;

        let storage_path = self.resolve_path(&self.config.storage.path);
        self.output
            .debug(&format!("Cart storage: {}", storage_path.display()));
        let store = FileStore::open(&storage_path);

        Ok(Storefront::open(
            catalog,
            CartStorage::with_key(store, self.config.storage.key.as_str()),
        ))
    }
}

fn resolve_against(base: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}
