//! High-level operations

pub mod check;
pub mod locate;
pub mod manifest;

pub use check::{all_satisfied, check_products, ProductStatus};
pub use locate::Locator;
pub use manifest::{render_manifest, write_manifest, ManifestError, ManifestOptions};
