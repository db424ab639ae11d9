//! Lightweight rich text markup.
//!
//! Markup uses paired delimiters:
//!
//! | Markup          | Style     |
//! |-----------------|-----------|
//! | `**text**`      | bold      |
//! | `_text_`        | italic    |
//! | `__text__`      | underline |
//!
//! Resolution rules, applied in this order:
//!
//! 1. The input is scanned left to right. `**` and `__` are read greedily, so
//!    `___` is `__` followed by `_`. A lone `*` is plain text.
//! 2. A single `_` with a letter or digit on both sides is plain text, so
//!    `snake_case` stays as written.
//! 3. A delimiter closes the nearest still-open delimiter of the same kind.
//!    Delimiters opened after that one and not yet closed are demoted to plain
//!    text, so overlapping spans resolve innermost-first.
//! 4. Delimiters still open at the end of the input are plain text.
//! 5. Spans with no content (`****`) produce no run. Empty input is plain
//!    text and yields a single empty run.
//!
//! Styles of nested spans compose: `**_both_**` yields one bold italic run.
//!
//! ```
//! use docgen::rich_text::RichTextParser;
//!
//! let runs: Vec<_> = RichTextParser::new().parse("plain **bold** _it_").collect();
//! assert_eq!(runs.len(), 4);
//! assert!(runs[1].is_bold);
//! assert_eq!(runs[3].text, "it");
//! ```

use serde::{Deserialize, Serialize};

/// A run of text with uniform styling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledRun {
    /// The text content
    pub text: String,
    /// Bold
    pub is_bold: bool,
    /// Italic
    pub is_italic: bool,
    /// Underlined
    pub is_underline: bool,
}

impl StyledRun {
    /// Create an unstyled run.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Check if any style flag is set.
    pub fn has_styling(&self) -> bool {
        self.is_bold || self.is_italic || self.is_underline
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DelimiterKind {
    Bold,
    Italic,
    Underline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Literal,
    Open,
    Close,
}

#[derive(Debug, Clone)]
struct Token<'a> {
    raw: &'a str,
    delimiter: Option<DelimiterKind>,
    role: Role,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Style {
    bold: bool,
    italic: bool,
    underline: bool,
}

impl Style {
    fn apply(mut self, kind: DelimiterKind, role: Role) -> Self {
        let on = role == Role::Open;
        match kind {
            DelimiterKind::Bold => self.bold = on,
            DelimiterKind::Italic => self.italic = on,
            DelimiterKind::Underline => self.underline = on,
        }
        self
    }

    fn run(self, text: String) -> StyledRun {
        StyledRun {
            text,
            is_bold: self.bold,
            is_italic: self.italic,
            is_underline: self.underline,
        }
    }
}

/// Parser for rich text markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct RichTextParser;

impl RichTextParser {
    /// Create a parser.
    pub fn new() -> Self {
        Self
    }

    /// Parse `markup` into a lazy sequence of runs.
    ///
    /// Delimiters are paired up front; runs are assembled as the iterator is
    /// advanced. The returned iterator can be cloned to restart from the
    /// current position.
    pub fn parse<'a>(&self, markup: &'a str) -> Runs<'a> {
        let mut tokens = tokenize(markup);
        pair_delimiters(&mut tokens);
        Runs {
            tokens,
            pos: 0,
            style: Style::default(),
            pending_empty: markup.is_empty(),
        }
    }

    /// Parse `markup` and collect all runs.
    pub fn parse_to_vec(&self, markup: &str) -> Vec<StyledRun> {
        self.parse(markup).collect()
    }

    /// Text of `markup` with all paired delimiters removed.
    pub fn plain_text(&self, markup: &str) -> String {
        self.parse(markup).map(|run| run.text).collect()
    }
}

fn tokenize<'a>(markup: &'a str) -> Vec<Token<'a>> {
    let mut tokens = Vec::new();
    let bytes = markup.as_bytes();
    let mut text_start = 0;
    let mut i = 0;

    let flush = |tokens: &mut Vec<Token<'a>>, start: usize, end: usize| {
        if end > start {
            tokens.push(Token {
                raw: &markup[start..end],
                delimiter: None,
                role: Role::Literal,
            });
        }
    };

    while i < bytes.len() {
        let (kind, width) = match bytes[i] {
            b'*' if bytes.get(i + 1) == Some(&b'*') => (Some(DelimiterKind::Bold), 2),
            b'_' if bytes.get(i + 1) == Some(&b'_') => (Some(DelimiterKind::Underline), 2),
            b'_' if !is_intraword(markup, i) => (Some(DelimiterKind::Italic), 1),
            _ => (None, 1),
        };

        match kind {
            Some(kind) => {
                flush(&mut tokens, text_start, i);
                tokens.push(Token {
                    raw: &markup[i..i + width],
                    delimiter: Some(kind),
                    role: Role::Literal,
                });
                i += width;
                text_start = i;
            }
            None => i += width,
        }
    }
    flush(&mut tokens, text_start, bytes.len());
    tokens
}

/// Whether the `_` at byte `i` sits between two alphanumeric characters.
fn is_intraword(markup: &str, i: usize) -> bool {
    let before = markup[..i].chars().next_back();
    let after = markup[i + 1..].chars().next();
    matches!((before, after), (Some(b), Some(a)) if b.is_alphanumeric() && a.is_alphanumeric())
}

fn pair_delimiters(tokens: &mut [Token<'_>]) {
    let mut open: Vec<usize> = Vec::new();

    for i in 0..tokens.len() {
        let Some(kind) = tokens[i].delimiter else {
            continue;
        };

        let opener = open
            .iter()
            .rposition(|&idx| tokens[idx].delimiter == Some(kind));

        match opener {
            Some(pos) => {
                // Anything opened inside the span and still open cannot close any more.
                open.truncate(pos + 1);
                if let Some(idx) = open.pop() {
                    tokens[idx].role = Role::Open;
                    tokens[i].role = Role::Close;
                }
            }
            None => open.push(i),
        }
    }
}

/// Lazy iterator over the runs of a markup string.
#[derive(Debug, Clone)]
pub struct Runs<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    style: Style,
    pending_empty: bool,
}

impl Runs<'_> {
    /// Style after applying the consecutive delimiter tokens starting at `from`,
    /// and the index of the first token that is not a paired delimiter.
    fn peek_toggles(&self, from: usize) -> (Style, usize) {
        let mut style = self.style;
        let mut j = from;
        while let Some(token) = self.tokens.get(j) {
            match (token.delimiter, token.role) {
                (Some(kind), Role::Open | Role::Close) => style = style.apply(kind, token.role),
                _ => break,
            }
            j += 1;
        }
        (style, j)
    }
}

impl Iterator for Runs<'_> {
    type Item = StyledRun;

    fn next(&mut self) -> Option<StyledRun> {
        if self.pending_empty {
            self.pending_empty = false;
            return Some(StyledRun::plain(""));
        }

        let mut text = String::new();

        while self.pos < self.tokens.len() {
            let token = &self.tokens[self.pos];
            if token.role == Role::Literal {
                text.push_str(token.raw);
                self.pos += 1;
                continue;
            }

            let (style, next) = self.peek_toggles(self.pos);
            if text.is_empty() || style == self.style {
                // Nothing to flush yet, or the toggles cancel out (empty span).
                self.style = style;
                self.pos = next;
                continue;
            }
            return Some(self.style.run(text));
        }

        if text.is_empty() {
            None
        } else {
            Some(self.style.run(text))
        }
    }
}
