//! LaTeX fragments for the `fancyvrb` `Verbatim` environment.
//!
//! Inside `Verbatim` with `commandchars=\\\{\}` only backslash and braces are
//! special, so those three are the only characters that need escaping. Every
//! colored token becomes `\srctok{RRGGBB}{text}`; the macros are defined by
//! [`style_defs`].

use syntect::easy::HighlightLines;
use syntect::highlighting::{Color, FontStyle, Theme};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use srcprint_shared::Result;

use super::engine_error;

const VERBATIM_BEGIN: &str =
    "\\begin{Verbatim}[commandchars=\\\\\\{\\},formatcom=\\color{srcforeground}]\n";
const VERBATIM_END: &str = "\\end{Verbatim}\n";

/// Color and escape macros used by rendered fragments.
pub(crate) fn style_defs(name: &str, theme: &Theme) -> String {
    let foreground = theme.settings.foreground.unwrap_or(Color::BLACK);
    let mut defs = String::new();
    defs.push_str(&format!("% style \"{name}\" generated by srcprint\n"));
    defs.push_str("\\def\\srcZbs{\\char`\\\\}\n");
    defs.push_str("\\def\\srcZob{\\char`\\{}\n");
    defs.push_str("\\def\\srcZcb{\\char`\\}}\n");
    defs.push_str("\\newcommand{\\srctok}[2]{\\textcolor[HTML]{#1}{#2}}\n");
    defs.push_str(&format!(
        "\\definecolor{{srcforeground}}{{HTML}}{{{}}}\n",
        hex(foreground)
    ));
    defs
}

/// Render `text` as a `Verbatim` block colored with `theme`.
pub(crate) fn render(
    text: &str,
    syntax: &SyntaxReference,
    syntaxes: &SyntaxSet,
    theme: &Theme,
) -> Result<String> {
    let mut highlighter = HighlightLines::new(syntax, theme);
    let mut out = String::with_capacity(text.len() * 2 + VERBATIM_BEGIN.len());
    out.push_str(VERBATIM_BEGIN);

    for line in LinesWithEndings::from(text) {
        let regions = highlighter
            .highlight_line(line, syntaxes)
            .map_err(engine_error)?;
        for (style, piece) in regions {
            // Macro arguments must not span a line break inside Verbatim.
            let body = piece.trim_end_matches(['\n', '\r']);
            push_token(&mut out, style.foreground, style.font_style, body);
            if body.len() < piece.len() {
                out.push('\n');
            }
        }
    }

    if !out.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(VERBATIM_END);
    Ok(out)
}

fn push_token(out: &mut String, color: Color, font: FontStyle, body: &str) {
    if body.is_empty() {
        return;
    }
    let escaped = escape(body);
    if body.trim().is_empty() {
        out.push_str(&escaped);
        return;
    }

    let mut token = format!("\\srctok{{{}}}{{{escaped}}}", hex(color));
    if font.contains(FontStyle::ITALIC) {
        token = format!("\\textit{{{token}}}");
    }
    if font.contains(FontStyle::BOLD) {
        token = format!("\\textbf{{{token}}}");
    }
    if font.contains(FontStyle::UNDERLINE) {
        token = format!("\\underline{{{token}}}");
    }
    out.push_str(&token);
}

/// Escape the `commandchars` of the Verbatim environment.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\srcZbs{}"),
            '{' => out.push_str("\\srcZob{}"),
            '}' => out.push_str("\\srcZcb{}"),
            _ => out.push(c),
        }
    }
    out
}

fn hex(color: Color) -> String {
    format!("{:02X}{:02X}{:02X}", color.r, color.g, color.b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use syntect::highlighting::ThemeSet;

    #[test]
    fn escapes_command_chars() {
        assert_eq!(escape(r"a\b{c}"), r"a\srcZbs{}b\srcZob{}c\srcZcb{}");
        assert_eq!(escape("plain % $ _"), "plain % $ _");
    }

    #[test]
    fn hex_is_upper_case_rgb() {
        let c = Color { r: 0x0a, g: 0xff, b: 0x10, a: 0xff };
        assert_eq!(hex(c), "0AFF10");
    }

    #[test]
    fn renders_verbatim_block() {
        let syntaxes = SyntaxSet::load_defaults_newlines();
        let themes = ThemeSet::load_defaults();
        let syntax = syntaxes.find_syntax_by_extension("rs").unwrap();

        let out = render(
            "fn main() {\n    println!(\"hi\");\n}\n",
            syntax,
            &syntaxes,
            &themes.themes["InspiredGitHub"],
        )
        .unwrap();

        assert!(out.starts_with("\\begin{Verbatim}"));
        assert!(out.ends_with("\\end{Verbatim}\n"));
        assert!(out.contains("\\srctok{"));
        assert!(out.contains("\\srcZob{}"));
        // One source line per Verbatim line, plus the begin/end lines.
        assert_eq!(out.lines().count(), 5);
    }

    #[test]
    fn missing_final_newline_is_added() {
        let syntaxes = SyntaxSet::load_defaults_newlines();
        let themes = ThemeSet::load_defaults();
        let syntax = syntaxes.find_syntax_plain_text();

        let out = render("last", syntax, &syntaxes, &themes.themes["InspiredGitHub"]).unwrap();
        assert!(out.contains("last}\n\\end{Verbatim}"));
    }

    #[test]
    fn style_defs_define_macros() {
        let themes = ThemeSet::load_defaults();
        let defs = style_defs("default", &themes.themes["InspiredGitHub"]);

        assert!(defs.starts_with("% style \"default\""));
        assert!(defs.contains("\\newcommand{\\srctok}[2]"));
        assert!(defs.contains("\\definecolor{srcforeground}{HTML}{"));
        assert!(defs.contains("\\def\\srcZbs{\\char`\\\\}"));
    }
}
