//! Command implementations

pub mod check;
pub mod completions;
pub mod generate;
pub mod locate;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use crate::cli::ProductsArgs;
use berth::core::{find_products_file, Declaration, Platform, Product};
use berth::util::config::{global_config_path, load_config, project_config_path};
use berth::util::diagnostic::suggestions;
use berth::Config;

/// A loaded declaration with its configuration and target platform.
pub struct Session {
    /// Directory containing Products.toml
    pub base_dir: PathBuf,
    pub config: Config,
    pub platform: Platform,
    pub products: Vec<Product>,
}

impl Session {
    /// Locate and load the declaration file and configuration.
    ///
    /// Flags override config: `--target` beats `[target] triple`.
    pub fn load(args: &ProductsArgs) -> Result<Self> {
        let products_path = match &args.products {
            Some(path) => path.clone(),
            None => {
                let cwd = std::env::current_dir()?;
                find_products_file(&cwd)
                    .map_err(|e| anyhow!("{}\n{}", e, suggestions::NO_PRODUCTS_FILE))?
            }
        };

        // Manifest bindings must not depend on the consumer's working directory.
        let products_path = std::path::absolute(&products_path)
            .with_context(|| format!("failed to resolve {}", products_path.display()))?;
        let base_dir = products_path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_default();

        let config = load_config(global_config_path().as_deref(), &project_config_path(&base_dir));

        let platform = match &args.target {
            Some(triple) => Platform::from_triple(triple)?,
            None => config.platform()?,
        };

        let declaration = Declaration::load(&products_path)?;
        let products = declaration.resolve(&base_dir, &platform)?;

        tracing::debug!(
            "Loaded {} products from {} for {}",
            products.len(),
            products_path.display(),
            platform
        );

        Ok(Session {
            base_dir,
            config,
            platform,
            products,
        })
    }
}
