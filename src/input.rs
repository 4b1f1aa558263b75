use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::models::Topic;

const WHEEL_ROWS: isize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Select(Topic),
    Clear,
    ScrollBy(isize),
    PageUp,
    PageDown,
    Top,
    Bottom,
    CopyLinks,
    Quit,
}

pub fn action_for_key(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('m') | KeyCode::Backspace => Some(Action::Clear),
        KeyCode::Char('y') => Some(Action::CopyLinks),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::ScrollBy(-1)),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::ScrollBy(1)),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::PageDown | KeyCode::Char(' ') => Some(Action::PageDown),
        KeyCode::Home | KeyCode::Char('g') => Some(Action::Top),
        KeyCode::End | KeyCode::Char('G') => Some(Action::Bottom),
        KeyCode::Char(c) => Topic::from_key(c).map(Action::Select),
        _ => None,
    }
}

/// Where things were on screen in the last frame, for mouse hit tests.
#[derive(Debug, Default, Clone)]
pub struct HitMap {
    pub transcript: Rect,
    pub home_button: Rect,
    pub scroll_offset: usize,
    pub menu_rows: HashMap<usize, Topic>,
}

impl HitMap {
    pub fn action_for_mouse(&self, mouse: MouseEvent) -> Option<Action> {
        match mouse.kind {
            MouseEventKind::ScrollUp => Some(Action::ScrollBy(-WHEEL_ROWS)),
            MouseEventKind::ScrollDown => Some(Action::ScrollBy(WHEEL_ROWS)),
            MouseEventKind::Down(MouseButton::Left) => self.click(mouse.column, mouse.row),
            _ => None,
        }
    }

    fn click(&self, column: u16, row: u16) -> Option<Action> {
        if contains(self.home_button, column, row) {
            return Some(Action::Clear);
        }
        if !contains(self.transcript, column, row) {
            return None;
        }
        let line = self.scroll_offset + usize::from(row - self.transcript.y);
        self.menu_rows.get(&line).copied().map(Action::Select)
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.x + area.width && row >= area.y && row < area.y + area.height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn digits_and_initials_select_topics() {
        assert_eq!(action_for_key(press(KeyCode::Char('3'))), Some(Action::Select(Topic::Femtech)));
        assert_eq!(action_for_key(press(KeyCode::Char('p'))), Some(Action::Select(Topic::PlayingWithAi)));
        assert_eq!(action_for_key(press(KeyCode::Char('z'))), None);
    }

    #[test]
    fn control_c_quits_and_releases_are_ignored() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(action_for_key(ctrl_c), Some(Action::Quit));

        let release = KeyEvent {
            code: KeyCode::Char('1'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(action_for_key(release), None);
    }

    #[test]
    fn backspace_goes_to_main_page() {
        assert_eq!(action_for_key(press(KeyCode::Backspace)), Some(Action::Clear));
    }

    #[test]
    fn clicks_resolve_through_scroll_offset() {
        let hits = HitMap {
            transcript: Rect::new(2, 1, 60, 20),
            home_button: Rect::new(2, 23, 9, 1),
            scroll_offset: 10,
            menu_rows: HashMap::from([(15, Topic::Contact)]),
        };
        assert_eq!(hits.action_for_mouse(click(5, 6)), Some(Action::Select(Topic::Contact)));
        assert_eq!(hits.action_for_mouse(click(5, 7)), None);
        assert_eq!(hits.action_for_mouse(click(4, 23)), Some(Action::Clear));
        assert_eq!(hits.action_for_mouse(click(70, 6)), None);
    }

    #[test]
    fn wheel_scrolls() {
        let hits = HitMap::default();
        let wheel = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(hits.action_for_mouse(wheel), Some(Action::ScrollBy(WHEEL_ROWS)));
    }
}
