//! Core data types: platforms, naming rules, prefixes and products.

pub mod declaration;
pub mod loader;
pub mod naming;
pub mod platform;
pub mod prefix;
pub mod product;

pub use declaration::{find_products_file, Declaration, DeclarationError, PRODUCTS_FILE};
pub use platform::{Arch, Libc, Os, Platform, PlatformError};
pub use prefix::Prefix;
pub use product::{ExecutableProduct, FileProduct, LibraryProduct, Product, ProductError, ProductKind};
