use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;

/// Styles shared by the table and input widgets.
///
/// Widgets patch their own option styles on top of these, so an app can switch the whole UI
/// between [`Theme::light`] and [`Theme::dark`] by swapping one value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Theme {
    pub text_primary: Style,
    pub text_muted: Style,
    pub accent: Style,
    pub danger: Style,
    pub header: Style,
    pub row_hover: Style,
    pub border: Style,
    pub surface: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl Theme {
    pub fn light() -> Self {
        use ratatui::style::Stylize;

        Self {
            text_primary: Style::default().fg(Color::Black),
            text_muted: Style::default().dark_gray(),
            accent: Style::default().blue(),
            danger: Style::default().red(),
            header: Style::default()
                .bg(Color::Gray)
                .add_modifier(Modifier::BOLD),
            row_hover: Style::default().add_modifier(Modifier::REVERSED),
            border: Style::default().gray(),
            surface: Style::default().bg(Color::Gray),
        }
    }

    pub fn dark() -> Self {
        use ratatui::style::Stylize;

        Self {
            text_primary: Style::default().fg(Color::White),
            text_muted: Style::default().gray(),
            accent: Style::default().cyan(),
            danger: Style::default().light_red(),
            header: Style::default()
                .bg(Color::Black)
                .add_modifier(Modifier::BOLD),
            row_hover: Style::default().add_modifier(Modifier::REVERSED),
            border: Style::default().dark_gray(),
            surface: Style::default().bg(Color::DarkGray),
        }
    }

    pub fn is_dark(&self) -> bool {
        *self == Self::dark()
    }
}
