use serde::{Deserialize, Serialize};

/// Knobs for parsing and linting an xd document.
///
/// Every field has a conventional default; callers (and the CLI, via a TOML
/// file) override only what they need.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Grid character marking a block (a black square).
    pub block_marker: char,
    /// Grid character marking an open cell whose letter is not stated in the
    /// grid and lives only in clue answers (template grids).
    pub open_marker: char,
    /// Delimiter embedded in multi-word answers for display.
    /// Stripped before letters are validated against the grid.
    pub split_character: char,
    /// Run the lint rules after validation.
    pub lint_enabled: bool,
    /// Emit lint findings as report errors instead of warnings.
    pub strict_linting: bool,
    /// Meta keys the completeness lint rule expects to be present.
    pub required_meta_keys: Vec<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            block_marker: '.',
            open_marker: '_',
            split_character: '|',
            lint_enabled: true,
            strict_linting: false,
            required_meta_keys: vec!["Title".to_string(), "Author".to_string()],
        }
    }
}
