//! Syntax highlighting for srcprint documents.
//!
//! Wraps the `syntect` engine behind a small surface: resolve a grammar from a
//! file name, look up a style by name, and render one file's source as an HTML
//! or LaTeX fragment. Style-definition markup (CSS or LaTeX color macros) is
//! generated from the same theme so fragments and preamble always agree.

mod html;
mod latex;

use std::path::Path;

use syntect::highlighting::{Color, Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use tracing::{debug, instrument};

use srcprint_shared::{DEFAULT_STYLE, OutputFormat, Result, SrcprintError};

/// Theme that the `default` style name resolves to.
const DEFAULT_THEME: &str = "InspiredGitHub";

/// Name of the built-in monochrome style.
const MONOCHROME_STYLE: &str = "bw";

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// A resolved highlighting grammar (lexical rules for one language).
#[derive(Debug, Clone, Copy)]
pub struct Grammar<'a> {
    syntax: &'a SyntaxReference,
}

impl Grammar<'_> {
    /// Human-readable language name (e.g. `Rust`, `Python`).
    pub fn name(&self) -> &str {
        &self.syntax.name
    }
}

/// A resolved highlighting style.
#[derive(Debug, Clone, Copy)]
pub struct Style<'a> {
    name: &'a str,
    theme: &'a Theme,
}

impl Style<'_> {
    /// Name the style is registered under.
    pub fn name(&self) -> &str {
        self.name
    }
}

// ---------------------------------------------------------------------------
// Highlighter
// ---------------------------------------------------------------------------

/// Grammar and style registries plus the renderers built on them.
pub struct Highlighter {
    syntaxes: SyntaxSet,
    themes: ThemeSet,
}

impl Highlighter {
    /// Load the bundled grammars and styles.
    pub fn new() -> Self {
        let syntaxes = SyntaxSet::load_defaults_newlines();
        let mut themes = ThemeSet::load_defaults();

        if let Some(base) = themes.themes.get(DEFAULT_THEME) {
            let mono = monochrome(base);
            themes.themes.insert(MONOCHROME_STYLE.to_string(), mono);
        }

        debug!(
            grammars = syntaxes.syntaxes().len(),
            styles = themes.themes.len(),
            "highlighter registries loaded"
        );

        Self { syntaxes, themes }
    }

    /// Load the bundled registries plus every `.tmTheme` file under `dir`.
    pub fn with_theme_dir(dir: &Path) -> Result<Self> {
        let mut highlighter = Self::new();
        highlighter.themes.add_from_folder(dir).map_err(|e| {
            SrcprintError::config(format!("failed to load themes from {}: {e}", dir.display()))
        })?;
        debug!(dir = %dir.display(), styles = highlighter.themes.themes.len(), "extra themes loaded");
        Ok(highlighter)
    }

    /// Find the grammar for `path` by its file name, then by its extension.
    ///
    /// Only the name is consulted; file contents are never sniffed.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn resolve_grammar(&self, path: &Path) -> Result<Grammar<'_>> {
        let file_name = path.file_name().and_then(|n| n.to_str());
        let extension = path.extension().and_then(|e| e.to_str());

        let syntax = file_name
            .and_then(|name| self.syntaxes.find_syntax_by_extension(name))
            .or_else(|| extension.and_then(|ext| self.syntaxes.find_syntax_by_extension(ext)))
            .or_else(|| {
                extension.and_then(|ext| {
                    self.syntaxes
                        .find_syntax_by_extension(&ext.to_ascii_lowercase())
                })
            })
            .ok_or_else(|| SrcprintError::unsupported(path))?;

        debug!(grammar = %syntax.name, "grammar resolved");
        Ok(Grammar { syntax })
    }

    /// Look up a style by name. `default` is an alias for the bundled light theme.
    pub fn style<'a>(&'a self, name: &'a str) -> Result<Style<'a>> {
        let key = if name == DEFAULT_STYLE { DEFAULT_THEME } else { name };
        let theme = self
            .themes
            .themes
            .get(key)
            .ok_or_else(|| SrcprintError::UnknownStyle {
                name: name.to_string(),
                available: self.style_names(),
            })?;
        Ok(Style { name, theme })
    }

    /// Every accepted style name, aliases included, sorted.
    pub fn style_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.themes.themes.keys().cloned().collect();
        names.push(DEFAULT_STYLE.to_string());
        names.sort();
        names.dedup();
        names
    }

    /// Style-definition markup to embed in the document preamble.
    pub fn style_defs(&self, format: OutputFormat, style: Style<'_>) -> Result<String> {
        match format {
            OutputFormat::Html => html::style_defs(style.theme),
            OutputFormat::Latex => Ok(latex::style_defs(style.name, style.theme)),
        }
    }

    /// Highlight `text` with `grammar` and `style`, returning one rendered fragment.
    pub fn render(
        &self,
        format: OutputFormat,
        text: &str,
        grammar: Grammar<'_>,
        style: Style<'_>,
    ) -> Result<String> {
        match format {
            OutputFormat::Html => html::render(text, grammar.syntax, &self.syntaxes),
            OutputFormat::Latex => {
                latex::render(text, grammar.syntax, &self.syntaxes, style.theme)
            }
        }
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

/// Derive a black-on-white theme from `base`, keeping bold/italic/underline.
fn monochrome(base: &Theme) -> Theme {
    let mut theme = base.clone();
    theme.name = Some(MONOCHROME_STYLE.to_string());
    theme.settings.foreground = Some(Color::BLACK);
    theme.settings.background = Some(Color::WHITE);
    for item in &mut theme.scopes {
        item.style.foreground = Some(Color::BLACK);
        item.style.background = None;
    }
    theme
}

fn engine_error(e: syntect::Error) -> SrcprintError {
    SrcprintError::Highlight(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_by_extension() {
        let hl = Highlighter::new();
        assert_eq!(hl.resolve_grammar(Path::new("a.py")).unwrap().name(), "Python");
        assert_eq!(hl.resolve_grammar(Path::new("src/main.rs")).unwrap().name(), "Rust");
        assert_eq!(hl.resolve_grammar(Path::new("b.js")).unwrap().name(), "JavaScript");
    }

    #[test]
    fn resolves_by_file_name() {
        let hl = Highlighter::new();
        let grammar = hl.resolve_grammar(Path::new("project/Makefile")).unwrap();
        assert_eq!(grammar.name(), "Makefile");
    }

    #[test]
    fn resolves_upper_case_extension() {
        let hl = Highlighter::new();
        assert_eq!(hl.resolve_grammar(Path::new("LEGACY.PY")).unwrap().name(), "Python");
    }

    #[test]
    fn unsupported_extension_fails_distinctly() {
        let hl = Highlighter::new();
        let err = hl.resolve_grammar(Path::new("notes.zzz")).unwrap_err();
        assert!(matches!(err, SrcprintError::UnsupportedFileType { .. }));

        let err = hl.resolve_grammar(Path::new("no_extension_here")).unwrap_err();
        assert!(matches!(err, SrcprintError::UnsupportedFileType { .. }));
    }

    #[test]
    fn default_and_bw_styles_exist() {
        let hl = Highlighter::new();
        assert_eq!(hl.style("default").unwrap().name(), "default");
        assert_eq!(hl.style("bw").unwrap().name(), "bw");
        assert!(hl.style("Solarized (dark)").is_ok());

        let names = hl.style_names();
        assert!(names.contains(&"default".to_string()));
        assert!(names.contains(&"bw".to_string()));
        assert!(names.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn unknown_style_lists_available() {
        let hl = Highlighter::new();
        let err = hl.style("neon-dreams").unwrap_err();
        match err {
            SrcprintError::UnknownStyle { name, available } => {
                assert_eq!(name, "neon-dreams");
                assert!(available.contains(&"default".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn monochrome_theme_is_black() {
        let hl = Highlighter::new();
        let style = hl.style("bw").unwrap();
        assert!(
            style
                .theme
                .scopes
                .iter()
                .all(|item| item.style.foreground == Some(Color::BLACK))
        );
    }

    #[test]
    fn missing_theme_dir_is_config_error() {
        let err = Highlighter::with_theme_dir(Path::new("/nonexistent/themes")).err();
        assert!(matches!(err, Some(SrcprintError::Config { .. })));
    }

    #[test]
    fn empty_theme_dir_keeps_bundled_styles() {
        let dir = tempfile::tempdir().unwrap();
        let hl = Highlighter::with_theme_dir(dir.path()).unwrap();
        assert!(hl.style("default").is_ok());
    }

    #[test]
    fn render_dispatches_on_format() {
        let hl = Highlighter::new();
        let grammar = hl.resolve_grammar(Path::new("a.py")).unwrap();
        let style = hl.style("default").unwrap();

        let html = hl.render(OutputFormat::Html, "x = 1\n", grammar, style).unwrap();
        assert!(html.starts_with("<div class=\"source\">"));

        let tex = hl.render(OutputFormat::Latex, "x = 1\n", grammar, style).unwrap();
        assert!(tex.starts_with("\\begin{Verbatim}"));
    }
}
