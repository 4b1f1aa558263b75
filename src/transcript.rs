use std::collections::HashMap;

use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::content::{self, ContentBlock, Inline, Piece, HEADLINE};
use crate::models::{Interaction, InteractionId, Topic};
use crate::theme::Theme;
use crate::utils::wrap_spans;

const GUTTER: &str = "│ ";
const BULLET: &str = "• ";
const INDENT: &str = "  ";

/// The laid-out transcript: one entry per terminal row, plus the row where each
/// interaction starts and the rows that act as menu buttons.
pub struct Transcript {
    lines: Vec<Line<'static>>,
    anchors: HashMap<InteractionId, usize>,
    menu_rows: HashMap<usize, Topic>,
}

impl Transcript {
    pub fn build(history: &[Interaction], width: u16, theme: &Theme) -> Self {
        let mut builder = Builder {
            transcript: Transcript {
                lines: Vec::new(),
                anchors: HashMap::new(),
                menu_rows: HashMap::new(),
            },
            width: usize::from(width).max(1),
            theme,
        };

        for text in HEADLINE {
            builder.extend(wrap_spans(&[Span::styled(text, theme.headline)], builder.width));
        }
        builder.blank();
        builder.menu();

        for interaction in history {
            builder.blank();
            builder.interaction(interaction);
        }

        builder.transcript
    }

    pub fn lines(&self) -> &[Line<'static>] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Row just past the last line; the scroll fallback when an anchor is missing.
    pub fn bottom(&self) -> usize {
        self.lines.len()
    }

    pub fn anchors(&self) -> &HashMap<InteractionId, usize> {
        &self.anchors
    }

    pub fn menu_rows(&self) -> &HashMap<usize, Topic> {
        &self.menu_rows
    }
}

struct Builder<'a> {
    transcript: Transcript,
    width: usize,
    theme: &'a Theme,
}

impl Builder<'_> {
    fn push(&mut self, line: Line<'static>) {
        self.transcript.lines.push(line);
    }

    fn extend(&mut self, lines: Vec<Line<'static>>) {
        self.transcript.lines.extend(lines);
    }

    fn blank(&mut self) {
        self.push(Line::default());
    }

    fn menu(&mut self) {
        for topic in Topic::ALL {
            let row = self.transcript.lines.len();
            self.transcript.menu_rows.insert(row, topic);
            self.push(Line::from(vec![
                Span::styled(format!("[{}] ", topic.shortcut()), self.theme.menu_key),
                Span::styled(topic.menu_label(), self.theme.menu_item),
            ]));
        }
    }

    fn interaction(&mut self, interaction: &Interaction) {
        let row = self.transcript.lines.len();
        self.transcript.anchors.insert(interaction.id().clone(), row);

        let prompt = format!("main page/{} >", interaction.topic().label());
        self.push(Line::styled(prompt, self.theme.prompt));
        self.window(content::block(interaction.topic()));
        self.blank();
        self.menu();
    }

    /// Renders a content block inside a shaded window with a left gutter.
    fn window(&mut self, block: &'static ContentBlock) {
        let inner = self.width.saturating_sub(GUTTER.width() + 1).max(1);
        let mut body: Vec<Line<'static>> = Vec::new();
        let mut footnotes: Vec<&'static str> = Vec::new();

        for (i, piece) in block.pieces.iter().enumerate() {
            if i > 0 {
                body.push(Line::default());
            }
            match piece {
                Piece::Paragraph(inlines) => {
                    let spans = self.inline_spans(*inlines, &mut footnotes);
                    body.extend(wrap_spans(&spans, inner));
                }
                Piece::Bullets(bullets) => {
                    let hanging = inner.saturating_sub(BULLET.width()).max(1);
                    for bullet in *bullets {
                        let spans = self.inline_spans(bullet.inlines, &mut footnotes);
                        body.extend(hang(wrap_spans(&spans, hanging), BULLET, self.theme));
                        if let Some(note) = bullet.note {
                            let note_lines = wrap_spans(&[Span::styled(note, self.theme.note)], hanging);
                            body.extend(hang(note_lines, INDENT, self.theme));
                        }
                    }
                }
                Piece::LinkRow(links) => {
                    let mut spans = Vec::new();
                    for (n, link) in links.iter().enumerate() {
                        if n > 0 {
                            spans.push(Span::styled("   ", self.theme.text));
                        }
                        footnotes.push(link.href);
                        spans.push(Span::styled(link.label, self.theme.link));
                        spans.push(Span::styled(format!("[{}]", footnotes.len()), self.theme.footnote));
                    }
                    body.extend(wrap_spans(&spans, inner));
                }
            }
        }

        if !footnotes.is_empty() {
            body.push(Line::default());
            for (n, href) in footnotes.iter().enumerate() {
                let spans = [Span::styled(format!("[{}] {}", n + 1, href), self.theme.footnote)];
                body.extend(wrap_spans(&spans, inner));
            }
        }

        self.window_line(Line::default());
        for line in body {
            self.window_line(line);
        }
        self.window_line(Line::default());
    }

    fn inline_spans(&self, inlines: &'static [Inline], footnotes: &mut Vec<&'static str>) -> Vec<Span<'static>> {
        let mut spans = Vec::new();
        for inline in inlines {
            match inline {
                Inline::Text(text) => spans.push(Span::styled(*text, self.theme.text)),
                Inline::Break => spans.push(Span::styled("\n", self.theme.text)),
                Inline::Link(link) => {
                    footnotes.push(link.href);
                    spans.push(Span::styled(link.label, self.theme.link));
                    spans.push(Span::styled(format!("[{}]", footnotes.len()), self.theme.footnote));
                }
            }
        }
        spans
    }

    /// Prefixes the gutter and pads the row so the window background spans the width.
    fn window_line(&mut self, line: Line<'static>) {
        let mut spans = vec![Span::styled(GUTTER, self.theme.gutter)];
        spans.extend(line.spans);
        let used: usize = spans.iter().map(|s| s.width()).sum();
        if used < self.width {
            spans.push(Span::styled(" ".repeat(self.width - used), self.theme.text));
        }
        self.push(Line::from(spans));
    }
}

/// Puts `prefix` before the first line and matching blanks before the rest.
fn hang(lines: Vec<Line<'static>>, prefix: &'static str, theme: &Theme) -> Vec<Line<'static>> {
    lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            let lead = if i == 0 { prefix } else { INDENT };
            let mut spans = vec![Span::styled(lead, theme.text)];
            spans.extend(line.spans);
            Line::from(spans)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IdGenerator, SequentialIds};
    use crate::utils::line_text;

    fn history(topics: &[Topic]) -> Vec<Interaction> {
        let mut ids = SequentialIds::default();
        topics.iter().map(|&t| Interaction::new(ids.next_id(t), t)).collect()
    }

    fn rows(transcript: &Transcript) -> Vec<String> {
        transcript.lines().iter().map(line_text).collect()
    }

    #[test]
    fn empty_history_shows_headline_and_menu() {
        let transcript = Transcript::build(&[], 60, &Theme::default());
        let rows = rows(&transcript);
        assert_eq!(rows[0], "Hi! My name is Katerina👋");
        assert_eq!(rows[3], "products from 0 to 1.");
        assert_eq!(rows[5], "[1] about");
        assert_eq!(rows[6], "[2] playing with AI");
        assert!(transcript.anchors().is_empty());
        assert_eq!(transcript.menu_rows().len(), 4);
        assert_eq!(transcript.menu_rows().get(&8), Some(&Topic::Contact));
    }

    #[test]
    fn each_interaction_gets_an_anchor_at_its_prompt() {
        let history = history(&[Topic::About, Topic::Contact]);
        let transcript = Transcript::build(&history, 60, &Theme::default());
        let rows = rows(&transcript);

        let about = transcript.anchors()[history[0].id()];
        let contact = transcript.anchors()[history[1].id()];
        assert!(about < contact);
        assert_eq!(rows[about], "main page/about >");
        assert_eq!(rows[contact], "main page/contact >");
        // one menu at the top plus one after each block
        assert_eq!(transcript.menu_rows().len(), 12);
        assert_eq!(transcript.bottom(), transcript.len());
    }

    #[test]
    fn window_lists_footnotes_for_links() {
        let history = history(&[Topic::Femtech]);
        let transcript = Transcript::build(&history, 80, &Theme::default());
        let rows = rows(&transcript);
        assert!(rows.iter().any(|r| r.contains("Instagram[1]   TikTok[2]   YouTube[3]")));
        assert!(rows.iter().any(|r| r.contains("[3] https://www.youtube.com/@katfemtech")));
        assert!(rows.iter().filter(|r| r.starts_with(GUTTER)).all(|r| r.chars().count() == 80));
    }

    #[test]
    fn repeated_topics_keep_separate_blocks() {
        let history = history(&[Topic::About, Topic::About]);
        let transcript = Transcript::build(&history, 40, &Theme::default());
        assert_eq!(transcript.anchors().len(), 2);
        let prompts = rows(&transcript).iter().filter(|r| *r == "main page/about >").count();
        assert_eq!(prompts, 2);
    }
}
