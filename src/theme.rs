use ratatui::style::{Color, Modifier, Style};

const EMERALD: Color = Color::Rgb(52, 211, 153);
const ZINC_300: Color = Color::Rgb(212, 212, 216);
const ZINC_400: Color = Color::Rgb(161, 161, 170);
const ZINC_500: Color = Color::Rgb(113, 113, 122);
const ZINC_900: Color = Color::Rgb(24, 24, 27);
const ZINC_950: Color = Color::Rgb(9, 9, 11);

pub struct Theme {
    pub root_bg: Color,

    pub headline: Style,
    pub menu_item: Style,
    pub menu_key: Style,
    pub prompt: Style,
    pub text: Style,
    pub link: Style,
    pub footnote: Style,
    pub note: Style,
    pub gutter: Style,
    pub bar: Style,
    pub bar_home: Style,
    pub caret: Style,
    pub flash: Style,
    pub scrollbar: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            root_bg: ZINC_950,

            headline: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            menu_item: Style::default().fg(EMERALD),
            menu_key: Style::default().fg(ZINC_500),
            prompt: Style::default().fg(ZINC_400),
            text: Style::default().fg(ZINC_300).bg(ZINC_900),
            link: Style::default().fg(EMERALD).bg(ZINC_900).add_modifier(Modifier::UNDERLINED),
            footnote: Style::default().fg(ZINC_500).bg(ZINC_900),
            note: Style::default().fg(ZINC_400).bg(ZINC_900).add_modifier(Modifier::ITALIC),
            gutter: Style::default().fg(ZINC_500).bg(ZINC_900),
            bar: Style::default().fg(ZINC_400).bg(ZINC_950),
            bar_home: Style::default().fg(ZINC_400).bg(ZINC_950).add_modifier(Modifier::UNDERLINED),
            caret: Style::default().fg(EMERALD).bg(ZINC_950),
            flash: Style::default().fg(ZINC_500).bg(ZINC_950).add_modifier(Modifier::DIM),
            scrollbar: Style::default().fg(ZINC_500),
        }
    }
}
