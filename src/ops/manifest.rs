//! Dependency manifest generation.
//!
//! Writes a Rust source file that binds each product's variable name to
//! its verified path, plus a `check_deps()` function that re-verifies the
//! bindings when the consuming program starts. The file is meant to be
//! pulled in with `include!`.
//!
//! Every product must be satisfied before anything is written.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::core::platform::Platform;
use crate::core::product::Product;
use crate::ops::locate::Locator;
use crate::util::diagnostic::Diagnostic;

/// Crate whose `can_load` the generated `check_deps()` calls.
pub const DEFAULT_RUNTIME_CRATE: &str = "berth";

/// Error generating a manifest.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ManifestError {
    #[error("variable name `{name}` is bound by more than one product")]
    #[diagnostic(
        code(berth::manifest::duplicate_variable),
        help("Give each product a distinct variable name")
    )]
    DuplicateVariable { name: String },

    #[error("{product} is not satisfied, cannot generate manifest")]
    #[diagnostic(
        code(berth::manifest::unsatisfied),
        help("Install the missing artifacts, then run `berth check --verbose` to see what is missing")
    )]
    Unsatisfied { product: String },

    #[error("path for `{variable}` is not valid UTF-8: {}", path.display())]
    #[diagnostic(code(berth::manifest::non_utf8_path))]
    NonUtf8Path { variable: String, path: PathBuf },

    #[error("failed to write manifest: {}", path.display())]
    #[diagnostic(code(berth::manifest::write))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ManifestError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ManifestError::DuplicateVariable { name } => Diagnostic::error(self.to_string())
                .with_context(format!("`{}` would be defined twice in the manifest", name))
                .with_suggestion("Rename one of the products in Products.toml"),

            ManifestError::Unsatisfied { product } => Diagnostic::error(self.to_string())
                .with_context(format!("{} could not be located", product))
                .with_suggestion("Make sure the install step completed successfully")
                .with_suggestion("Run `berth check --verbose` to see each lookup step"),

            ManifestError::NonUtf8Path { path, .. } => Diagnostic::error(self.to_string())
                .with_location(path.clone())
                .with_suggestion("Install into a directory whose path is valid UTF-8"),

            ManifestError::Write { path, source } => Diagnostic::error(self.to_string())
                .with_location(path.clone())
                .with_context(source.to_string()),
        }
    }
}

/// Options for manifest generation.
#[derive(Debug, Clone)]
pub struct ManifestOptions {
    /// Platform the products were built for
    pub platform: Platform,

    /// Log each lookup step at info level
    pub verbose: bool,

    /// Crate path providing `can_load` in the generated code
    pub runtime_crate: String,

    /// Package named in the rebuild instructions
    pub package: Option<String>,
}

impl Default for ManifestOptions {
    fn default() -> Self {
        ManifestOptions {
            platform: Platform::host(),
            verbose: false,
            runtime_crate: DEFAULT_RUNTIME_CRATE.to_string(),
            package: None,
        }
    }
}

impl ManifestOptions {
    pub fn new(platform: Platform) -> Self {
        ManifestOptions {
            platform,
            ..Default::default()
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_runtime_crate(mut self, krate: impl Into<String>) -> Self {
        self.runtime_crate = krate.into();
        self
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    fn rebuild_hint(&self) -> String {
        match &self.package {
            Some(pkg) => format!("please rebuild `{}` and try again", pkg),
            None => "please re-run the build and try again".to_string(),
        }
    }
}

/// Verify `products` and write the manifest to `path`.
///
/// The output file is not touched unless every product is satisfied.
pub fn write_manifest(
    path: &Path,
    products: &[Product],
    opts: &ManifestOptions,
) -> Result<(), ManifestError> {
    let locator = Locator::new(opts.platform).verbose(opts.verbose);
    let contents = render_manifest(products, &locator, opts)?;

    std::fs::write(path, contents).map_err(|source| ManifestError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!("Wrote manifest for {} products to {}", products.len(), path.display());
    Ok(())
}

/// Verify `products` with `locator` and render the manifest text.
pub fn render_manifest(
    products: &[Product],
    locator: &Locator<'_>,
    opts: &ManifestOptions,
) -> Result<String, ManifestError> {
    check_unique_variables(products)?;

    let mut bindings = Vec::with_capacity(products.len());
    for product in products {
        let path = locator
            .locate(product)
            .ok_or_else(|| ManifestError::Unsatisfied {
                product: product.to_string(),
            })?;
        let path = path.into_os_string().into_string().map_err(|raw| ManifestError::NonUtf8Path {
            variable: product.variable_name().to_string(),
            path: PathBuf::from(raw),
        })?;
        bindings.push((product, path));
    }

    // Debug formatting of a str yields a valid Rust string literal.
    let rebuild = format!("{:?}", opts.rebuild_hint());
    let mut out = String::new();

    out.push_str("// This file is automatically generated by berth.\n");
    out.push_str("// Do not edit.\n");
    out.push_str("//\n");
    out.push_str("// Include this file with `include!` and call `check_deps()`\n");
    out.push_str("// before using any of the paths below.\n");
    out.push('\n');

    for (product, path) in &bindings {
        out.push_str("#[allow(non_upper_case_globals)]\n");
        out.push_str(&format!(
            "pub const {}: &str = {:?};\n",
            product.variable_name(),
            path
        ));
    }
    out.push('\n');

    out.push_str("/// Re-verify the paths recorded when this file was generated.\n");
    out.push_str("pub fn check_deps() -> ::std::result::Result<(), ::std::string::String> {\n");
    for (product, _) in &bindings {
        let var = product.variable_name();
        out.push_str(&format!("    if !::std::path::Path::new({}).is_file() {{\n", var));
        out.push_str(&format!(
            "        return Err(format!(\"{}: {{}} does not exist, {{}}\", {}, {}));\n",
            var, var, rebuild
        ));
        out.push_str("    }\n");

        if let Product::Library(_) = product {
            out.push_str(&format!("    if !::{}::can_load({}) {{\n", opts.runtime_crate, var));
            out.push_str(&format!(
                "        return Err(format!(\"{}: {{}} cannot be opened, {{}}\", {}, {}));\n",
                var, var, rebuild
            ));
            out.push_str("    }\n");
        }
    }
    out.push_str("    Ok(())\n");
    out.push_str("}\n");

    Ok(out)
}

fn check_unique_variables(products: &[Product]) -> Result<(), ManifestError> {
    let mut seen = HashSet::new();
    for product in products {
        if !seen.insert(product.variable_name()) {
            return Err(ManifestError::DuplicateVariable {
                name: product.variable_name().to_string(),
            });
        }
    }
    Ok(())
}
