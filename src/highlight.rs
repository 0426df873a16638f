//! Syntax highlighting as an injectable capability.
//!
//! The browser only knows the [`Highlight`] trait. [`SyntectHighlighter`]
//! colors code with syntect's bundled syntaxes; [`PlainHighlighter`] is the
//! no-op used when highlighting is switched off.

use crate::models::language;
use once_cell::sync::Lazy;
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};
use syntect::{
    easy::HighlightLines, highlighting::ThemeSet, parsing::SyntaxSet, util::LinesWithEndings,
};

static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(|| SyntaxSet::load_defaults_newlines());
static THEME_SET: Lazy<ThemeSet> = Lazy::new(|| ThemeSet::load_defaults());

pub const DEFAULT_THEME: &str = "base16-mocha.dark";

/// Columns a tab expands to. Raw tabs in the buffer move the terminal
/// cursor to the next tab stop and break the card layout.
pub const TAB_WIDTH: usize = 4;

pub trait Highlight {
    fn highlight(&self, code: &str, language: &str) -> Vec<Line<'static>>;
}

/// Renders code uncolored, one line per source line.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainHighlighter;

impl Highlight for PlainHighlighter {
    fn highlight(&self, code: &str, _language: &str) -> Vec<Line<'static>> {
        plain_lines(code)
    }
}

pub fn expand_tabs(code: &str) -> String {
    code.replace('\t', &" ".repeat(TAB_WIDTH))
}

/// Uncolored lines with tabs expanded.
pub fn plain_lines(code: &str) -> Vec<Line<'static>> {
    expand_tabs(code).lines().map(|l| Line::raw(l.to_string())).collect()
}

#[derive(Debug, Clone)]
pub struct SyntectHighlighter {
    theme: String,
}

impl SyntectHighlighter {
    /// Unknown theme names fall back to the default theme.
    pub fn new(theme: &str) -> Self {
        let theme = if THEME_SET.themes.contains_key(theme) {
            theme.to_string()
        } else {
            log::warn!("Unknown syntax theme '{}', using {}", theme, DEFAULT_THEME);
            DEFAULT_THEME.to_string()
        };
        Self { theme }
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new(DEFAULT_THEME)
    }
}

impl Highlight for SyntectHighlighter {
    fn highlight(&self, code: &str, language: &str) -> Vec<Line<'static>> {
        let Some(theme) = THEME_SET.themes.get(&self.theme) else {
            return plain_lines(code);
        };

        let syntax = SYNTAX_SET
            .find_syntax_by_token(&language::syntax_token(language))
            .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text());

        let mut highlighter = HighlightLines::new(syntax, theme);
        let mut lines = Vec::new();
        let expanded = expand_tabs(code);

        for line in LinesWithEndings::from(&expanded) {
            let ranges = match highlighter.highlight_line(line, &SYNTAX_SET) {
                Ok(ranges) => ranges,
                Err(e) => {
                    log::debug!("Highlighting failed for {}, showing plain text: {}", language, e);
                    return plain_lines(code);
                }
            };

            let spans: Vec<Span<'static>> = ranges
                .iter()
                .map(|(style, text)| {
                    let fg = style.foreground;
                    Span::styled(
                        text.trim_end_matches(['\n', '\r']).to_string(),
                        Style::default().fg(Color::Rgb(fg.r, fg.g, fg.b)),
                    )
                })
                .collect();
            lines.push(Line::from(spans));
        }

        lines
    }
}
