use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};

use crate::theme::Theme;
use crate::transcript::Transcript;

const HOME_LABEL: &str = "main page";
const CARET: &str = "█";

/// Screen regions for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Areas {
    pub transcript: Rect,
    pub scrollbar: Rect,
    pub bottom_bar: Rect,
}

impl Areas {
    /// Transcript column capped at `max_width`, with a gutter and a fixed bar at the bottom.
    pub fn new(area: Rect, max_width: u16) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1), Constraint::Length(2)])
            .split(area);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(2), Constraint::Min(1), Constraint::Length(1)])
            .split(rows[1]);

        let mut transcript = columns[1];
        transcript.width = transcript.width.min(max_width);

        let bar_row = rows[2];
        let bottom_bar = Rect {
            x: columns[1].x,
            y: bar_row.y + bar_row.height.saturating_sub(1),
            width: columns[1].width,
            height: bar_row.height.min(1),
        };

        Self {
            transcript,
            scrollbar: columns[2],
            bottom_bar,
        }
    }

    /// The clickable "main page" label at the start of the bottom bar.
    pub fn home_button(&self) -> Rect {
        Rect {
            width: (HOME_LABEL.len() as u16).min(self.bottom_bar.width),
            ..self.bottom_bar
        }
    }
}

/// What the bottom bar shows besides the prompt.
pub struct BarState<'a> {
    pub status: &'a str,
    pub cursor_on: bool,
    pub flash: Option<&'a str>,
}

pub fn render(
    f: &mut Frame,
    areas: &Areas,
    transcript: &Transcript,
    scroll_offset: usize,
    bar: &BarState,
    theme: &Theme,
) {
    f.render_widget(Block::default().style(Style::default().bg(theme.root_bg)), f.area());

    let height = usize::from(areas.transcript.height);
    let start = scroll_offset.min(transcript.len());
    let end = (start + height).min(transcript.len());
    let visible = transcript.lines()[start..end].to_vec();
    f.render_widget(Paragraph::new(visible), areas.transcript);

    let scrollable = transcript.len().saturating_sub(height);
    if scrollable > 0 {
        let mut state = ScrollbarState::new(scrollable).position(start);
        f.render_stateful_widget(
            Scrollbar::default()
                .orientation(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None)
                .style(theme.scrollbar),
            areas.scrollbar,
            &mut state,
        );
    }

    render_bottom_bar(f, areas.bottom_bar, bar, theme);
}

fn render_bottom_bar(f: &mut Frame, area: Rect, bar: &BarState, theme: &Theme) {
    let rest = bar.status.strip_prefix(HOME_LABEL).unwrap_or(bar.status);
    let mut spans = vec![
        Span::styled(HOME_LABEL, theme.bar_home),
        Span::styled(rest.to_string(), theme.bar),
        Span::styled(" ", theme.bar),
    ];
    if bar.cursor_on {
        spans.push(Span::styled(CARET, theme.caret));
    }
    if let Some(flash) = bar.flash {
        spans.push(Span::styled(format!("   {flash}"), theme.flash));
    }
    f.render_widget(Paragraph::new(Line::from(spans)).style(theme.bar), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IdGenerator, Interaction, SequentialIds, Topic};
    use ratatui::{Terminal, backend::TestBackend};

    fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        let width = usize::from(buffer.area.width);
        let start = usize::from(y) * width;
        buffer.content[start..start + width].iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn areas_cap_width_and_pin_the_bar() {
        let areas = Areas::new(Rect::new(0, 0, 120, 30), 72);
        assert_eq!(areas.transcript, Rect::new(2, 1, 72, 27));
        assert_eq!(areas.bottom_bar.y, 29);
        assert_eq!(areas.home_button().width, 9);
        assert_eq!(areas.scrollbar.x, 119);
    }

    #[test]
    fn bottom_bar_shows_prompt_and_caret() {
        let theme = Theme::default();
        let transcript = Transcript::build(&[], 40, &theme);
        let mut terminal = Terminal::new(TestBackend::new(50, 12)).unwrap();
        let areas = Areas::new(Rect::new(0, 0, 50, 12), 72);
        let bar = BarState { status: "main page/femtech >", cursor_on: true, flash: None };
        terminal.draw(|f| render(f, &areas, &transcript, 0, &bar, &theme)).unwrap();

        let last = row_text(&terminal, 11);
        assert!(last.starts_with("  main page/femtech > █"), "{last:?}");
    }

    #[test]
    fn hidden_caret_leaves_a_blank() {
        let theme = Theme::default();
        let transcript = Transcript::build(&[], 40, &theme);
        let mut terminal = Terminal::new(TestBackend::new(50, 12)).unwrap();
        let areas = Areas::new(Rect::new(0, 0, 50, 12), 72);
        let bar = BarState { status: "main page >", cursor_on: false, flash: None };
        terminal.draw(|f| render(f, &areas, &transcript, 0, &bar, &theme)).unwrap();

        assert_eq!(row_text(&terminal, 11).trim_end(), "  main page >");
    }

    #[test]
    fn transcript_scrolls_by_offset() {
        let theme = Theme::default();
        let mut ids = SequentialIds::default();
        let history = vec![Interaction::new(ids.next_id(Topic::Contact), Topic::Contact)];
        let transcript = Transcript::build(&history, 40, &theme);
        let anchor = transcript.anchors()[history[0].id()];

        let mut terminal = Terminal::new(TestBackend::new(50, 12)).unwrap();
        let areas = Areas::new(Rect::new(0, 0, 50, 12), 72);
        let bar = BarState { status: "main page/contact >", cursor_on: false, flash: None };
        terminal.draw(|f| render(f, &areas, &transcript, anchor, &bar, &theme)).unwrap();

        assert!(row_text(&terminal, areas.transcript.y).starts_with("  main page/contact >"));
    }
}
