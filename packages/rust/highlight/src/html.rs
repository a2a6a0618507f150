//! HTML fragments: class-annotated spans plus the CSS that colors them.

use syntect::highlighting::Theme;
use syntect::html::{ClassStyle, ClassedHTMLGenerator, css_for_theme_with_class_style};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use srcprint_shared::Result;

use super::engine_error;

/// Prefix on every generated class, so scope names like `source` never
/// collide with the document's own CSS.
const CLASS_PREFIX: &str = "sp-";

const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed {
    prefix: CLASS_PREFIX,
};

/// CSS rules for `theme`, scoped to the generated class names.
pub(crate) fn style_defs(theme: &Theme) -> Result<String> {
    css_for_theme_with_class_style(theme, CLASS_STYLE).map_err(engine_error)
}

/// Render `text` as `<div class="source"><pre>…</pre></div>`.
pub(crate) fn render(text: &str, syntax: &SyntaxReference, syntaxes: &SyntaxSet) -> Result<String> {
    let mut generator = ClassedHTMLGenerator::new_with_class_style(syntax, syntaxes, CLASS_STYLE);
    for line in LinesWithEndings::from(text) {
        generator
            .parse_html_for_line_which_includes_newline(line)
            .map_err(engine_error)?;
    }
    let spans = generator.finalize();

    Ok(format!(
        "<div class=\"source\"><pre class=\"{CLASS_PREFIX}code\">{spans}</pre></div>\n"
    ))
}
