//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Berth - verify installed build products and generate a dependency manifest
#[derive(Parser)]
#[command(name = "berth")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Report every lookup step
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check that every declared product is satisfied
    Check(CheckArgs),

    /// Print the resolved path of a single product
    Locate(LocateArgs),

    /// Write the dependency manifest
    Generate(GenerateArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Options shared by every command that reads a declaration file.
#[derive(Args)]
pub struct ProductsArgs {
    /// Path to Products.toml (searched upward from the current directory by default)
    #[arg(long, env = "BERTH_PRODUCTS")]
    pub products: Option<PathBuf>,

    /// Target triple the products were built for (defaults to the host)
    #[arg(long)]
    pub target: Option<String>,
}

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub products: ProductsArgs,

    /// Emit the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct LocateArgs {
    /// Variable name of the product
    pub name: String,

    #[command(flatten)]
    pub products: ProductsArgs,
}

#[derive(Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub products: ProductsArgs,

    /// Output path for the manifest (default: deps.rs next to Products.toml)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Package named in rebuild instructions
    #[arg(long)]
    pub package: Option<String>,

    /// Crate providing `can_load` for the generated check
    #[arg(long)]
    pub runtime_crate: Option<String>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
