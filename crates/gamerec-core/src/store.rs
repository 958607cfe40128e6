//! Store management for gamerec
//!
//! The store is the directory holding the configuration and the stage
//! database. Default location: `.gamerec/` under the project root.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::RecommenderConfig;
use crate::db::{Database, DB_FILE};
use crate::error::{GamerecError, Result};

/// Default store directory name
pub const DEFAULT_STORE_DIR: &str = ".gamerec";

/// Configuration file name inside the store
pub const CONFIG_FILE: &str = "config.toml";

/// The gamerec store
#[derive(Debug)]
pub struct Store {
    /// Root path of the store
    root: PathBuf,
    /// Store configuration
    config: RecommenderConfig,
    /// SQLite database
    db: Database,
}

impl Store {
    /// Discover a store by walking up from the given root directory
    pub fn discover(root: &Path) -> Result<Self> {
        let store_path = discover_store(root)?;
        Self::open(&store_path)
    }

    /// Open an existing store at the given path
    #[tracing::instrument(skip(path), fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_dir() {
            return Err(GamerecError::StoreNotFound {
                search_root: path.to_path_buf(),
            });
        }

        let config = RecommenderConfig::load_or_default(&path.join(CONFIG_FILE))?;
        let db = Database::open(path)?;

        Ok(Store {
            root: path.to_path_buf(),
            config,
            db,
        })
    }

    /// Initialize a new store under the given project root
    pub fn init(project_root: &Path) -> Result<Self> {
        Self::init_at(&project_root.join(DEFAULT_STORE_DIR))
    }

    /// Initialize a store at an explicit store root path
    ///
    /// Idempotent: an existing configuration is kept as is.
    #[tracing::instrument(skip(store_root), fields(path = %store_root.display()))]
    pub fn init_at(store_root: &Path) -> Result<Self> {
        fs::create_dir_all(store_root)?;

        let config_path = store_root.join(CONFIG_FILE);
        if !config_path.exists() {
            RecommenderConfig::default().save(&config_path)?;
            tracing::info!("created store configuration");
        }

        Self::open(store_root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    pub fn db(&self) -> &Database {
        &self.db
    }
}

/// Find the nearest store directory at or above `root`
///
/// A `.gamerec` directory holding neither a config nor a database is skipped.
pub fn discover_store(root: &Path) -> Result<PathBuf> {
    let mut current = Some(root);
    while let Some(dir) = current {
        let candidate = dir.join(DEFAULT_STORE_DIR);
        if candidate.is_dir() && is_store_root(&candidate) {
            return Ok(candidate);
        }
        current = dir.parent();
    }

    Err(GamerecError::StoreNotFound {
        search_root: root.to_path_buf(),
    })
}

/// Whether `path` looks like a store root
pub fn is_store_root(path: &Path) -> bool {
    path.join(CONFIG_FILE).is_file() || path.join(DB_FILE).is_file()
}
