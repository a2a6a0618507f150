//! Document templates: preamble, per-file heading, and closing markup.
//!
//! These are static strings; the only dynamic parts are the style
//! definitions produced by the highlighter and the escaped file name.

use srcprint_shared::OutputFormat;

/// CSS embedded ahead of the highlighter's own rules.
const HTML_CSS: &str = "
h1 {
  font-family: Cousine, monospace;
  font-size: 18pt;
  background: #bbb;
  padding: .5em .3em;
  border: 1px solid black;
}
.source {
  font-family: Cousine, monospace;
  font-size: 12pt;
}
";

const HTML_CLOSING: &str = "</body></html>\n";

const LATEX_PREAMBLE: &str = "\\documentclass{article}
\\usepackage[utf8]{inputenc}
\\usepackage[T1]{fontenc}
\\usepackage{fancyvrb}
\\usepackage{xcolor}
\\usepackage[a4paper,top=2cm,bottom=2cm,left=2cm,right=2cm]{geometry}
";

const LATEX_CLOSING: &str = "\\end{document}\n";

/// Everything up to the first file section.
pub fn preamble(format: OutputFormat, style_defs: &str) -> String {
    match format {
        OutputFormat::Html => format!(
            "<html><head><style type=\"text/css\">{HTML_CSS}{style_defs}</style></head><body>\n"
        ),
        OutputFormat::Latex => {
            format!("{LATEX_PREAMBLE}{style_defs}\\begin{{document}}\n")
        }
    }
}

/// Section heading for one input file.
pub fn heading(format: OutputFormat, name: &str) -> String {
    match format {
        OutputFormat::Html => format!("<h1>{}</h1>\n", escape_html(name)),
        OutputFormat::Latex => format!("\\hrule\n\\section*{{{}}}\n", escape_latex(name)),
    }
}

/// Markup that closes the document.
pub fn closing(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Html => HTML_CLOSING,
        OutputFormat::Latex => LATEX_CLOSING,
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '{' | '}' | '_' | '&' | '%' | '$' | '#' => {
                out.push('\\');
                out.push(c);
            }
            '^' => out.push_str("\\textasciicircum{}"),
            '~' => out.push_str("\\textasciitilde{}"),
            _ => out.push(c),
        }
    }
    out
}
