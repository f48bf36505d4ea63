//! User-friendly diagnostic messages.
//!
//! Every error shown to a user should say what went wrong, where, and
//! what to try next.

use std::path::PathBuf;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when no declaration file is found.
    pub const NO_PRODUCTS_FILE: &str =
        "help: Create a Products.toml listing the expected products, or pass --products";

    /// Suggestion when products are unsatisfied.
    pub const UNSATISFIED: &str = "help: Run `berth check --verbose` to see each lookup step";

    /// Suggestion when a product name is not declared.
    pub const UNKNOWN_PRODUCT: &str = "help: Run `berth check` to list declared products";
}

/// An error report with context lines, a location and suggested fixes.
#[derive(Debug, Clone, Default)]
pub struct Diagnostic {
    pub message: String,
    pub context: Vec<String>,
    pub suggestions: Vec<String>,
    /// Related file or directory
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Render for the terminal, with ANSI styling when `color` is set.
    pub fn format(&self, color: bool) -> String {
        let (error, help) = if color {
            ("\x1b[1;31merror\x1b[0m", "\x1b[1;32mhelp\x1b[0m")
        } else {
            ("error", "help")
        };

        let mut output = format!("{}: {}\n", error, self.message);
        if let Some(path) = &self.location {
            output.push_str(&format!("  --> {}\n", path.display()));
        }
        for line in &self.context {
            output.push_str(&format!("  = {}\n", line));
        }
        for suggestion in &self.suggestions {
            output.push_str(&format!("{}: {}\n", help, suggestion));
        }
        output
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}
