use ratatui::{
    style::Style,
    text::{Line, Span},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Largest valid scroll offset for `content_rows` shown in `view_rows`.
pub fn max_scroll(content_rows: usize, view_rows: usize) -> usize {
    content_rows.saturating_sub(view_rows)
}

/// Plain text of a line, for hit tests and assertions.
pub fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}

/// A run of styled fragments with no break opportunity inside it.
#[derive(Default)]
struct Word {
    parts: Vec<(String, Style)>,
    width: usize,
    trailing: usize,
}

enum Token {
    Word(Word),
    Newline,
}

fn tokenize(spans: &[Span<'_>]) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word = Word::default();

    for span in spans {
        for (i, segment) in span.content.split('\n').enumerate() {
            if i > 0 {
                if !word.parts.is_empty() {
                    tokens.push(Token::Word(std::mem::take(&mut word)));
                }
                tokens.push(Token::Newline);
            }
            for chunk in segment.split_inclusive(' ') {
                let body = chunk.trim_end_matches(' ');
                // a chunk that starts after a finished word carries its own width
                if word.trailing > 0 {
                    tokens.push(Token::Word(std::mem::take(&mut word)));
                }
                word.width += body.width();
                word.trailing = chunk.len() - body.len();
                word.parts.push((chunk.to_string(), span.style));
            }
        }
    }
    if !word.parts.is_empty() {
        tokens.push(Token::Word(word));
    }
    tokens
}

struct LineBuilder {
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    width: usize,
    max_width: usize,
}

impl LineBuilder {
    fn push_part(&mut self, text: String, style: Style) {
        self.width += text.width();
        match self.spans.last_mut() {
            Some(last) if last.style == style => last.content.to_mut().push_str(&text),
            _ => self.spans.push(Span::styled(text, style)),
        }
    }

    fn finish_line(&mut self) {
        while let Some(last) = self.spans.last_mut() {
            let trimmed = last.content.trim_end().to_string();
            if !trimmed.is_empty() {
                last.content = trimmed.into();
                break;
            }
            self.spans.pop();
        }
        self.lines.push(Line::from(std::mem::take(&mut self.spans)));
        self.width = 0;
    }

    fn push_word(&mut self, word: Word) {
        // separator spaces never open a line and are trimmed where one ends
        if word.width == 0 {
            if self.width > 0 {
                for (text, style) in word.parts {
                    self.push_part(text, style);
                }
            }
            return;
        }
        if self.width > 0 && self.width + word.width > self.max_width {
            self.finish_line();
        }
        if word.width > self.max_width {
            self.push_long_word(word);
            return;
        }
        for (text, style) in word.parts {
            self.push_part(text, style);
        }
    }

    fn push_long_word(&mut self, word: Word) {
        for (text, style) in word.parts {
            let mut chunk = String::new();
            for ch in text.chars() {
                let ch_width = ch.width().unwrap_or(0);
                if self.width + chunk.width() + ch_width > self.max_width && (self.width > 0 || !chunk.is_empty()) {
                    self.push_part(std::mem::take(&mut chunk), style);
                    self.finish_line();
                }
                chunk.push(ch);
            }
            if !chunk.is_empty() {
                self.push_part(chunk, style);
            }
        }
    }
}

/// Word-wraps styled spans to `max_width` columns. Breaks only at spaces, so a
/// link followed by punctuation stays together; words wider than the line are
/// split by character. `\n` forces a break, two in a row yield an empty line.
pub fn wrap_spans(spans: &[Span<'_>], max_width: usize) -> Vec<Line<'static>> {
    if max_width == 0 {
        return Vec::new();
    }
    let mut builder = LineBuilder {
        lines: Vec::new(),
        spans: Vec::new(),
        width: 0,
        max_width,
    };
    for token in tokenize(spans) {
        match token {
            Token::Word(word) => builder.push_word(word),
            Token::Newline => builder.finish_line(),
        }
    }
    if !builder.spans.is_empty() {
        builder.finish_line();
    }
    builder.lines
}
