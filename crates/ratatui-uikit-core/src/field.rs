//! Single-line text input with label, helper/error text, clear action and password masking.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthChar;

use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::MouseButton;
use crate::input::MouseEvent;
use crate::input::MouseEventKind;
use crate::keymap::InputFieldBindings;
use crate::render;
use crate::theme::Theme;

const CLEAR_GLYPH: &str = "✕";
const MASK_CHAR: char = '•';

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputVariant {
    /// Tinted background, no border.
    Filled,
    /// Bordered box.
    #[default]
    Outlined,
    /// Bare text.
    Ghost,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputSize {
    Sm,
    #[default]
    Md,
    Lg,
}

impl InputSize {
    /// Horizontal padding inside the field, in columns.
    pub fn padding(self) -> u16 {
        match self {
            InputSize::Sm => 0,
            InputSize::Md => 1,
            InputSize::Lg => 2,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct InputFieldOptions {
    pub label: Option<String>,
    pub placeholder: Option<String>,
    pub helper_text: Option<String>,
    pub error_message: Option<String>,
    pub disabled: bool,
    pub invalid: bool,
    pub variant: InputVariant,
    pub size: InputSize,
    /// Show a clear affordance while the field has text.
    pub show_clear: bool,
    /// Mask the value, with a Show/Hide toggle.
    pub password: bool,
    pub style: Style,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputFieldAction {
    None,
    Redraw,
    /// The value changed; carries the new value.
    Changed(String),
}

#[derive(Clone, Copy, Debug, Default)]
struct FieldLayout {
    text: Rect,
    clear: Option<Rect>,
    toggle: Option<Rect>,
}

/// A text field that works controlled or uncontrolled.
///
/// Uncontrolled, the field keeps its own value and reports edits as
/// [`InputFieldAction::Changed`]. Controlled, the app also calls [`InputField::set_value`] with
/// its copy of the value every frame; the field re-syncs whenever that value changes.
#[derive(Clone, Debug, Default)]
pub struct InputField {
    value: String,
    controlled: Option<String>,
    cursor: usize, // char index
    scroll: usize, // first visible char
    show_password: bool,
    focused: bool,
    options: InputFieldOptions,
    bindings: InputFieldBindings,
    layout: FieldLayout,
}

impl InputField {
    pub fn new() -> Self {
        Self::with_options(InputFieldOptions::default())
    }

    pub fn with_options(options: InputFieldOptions) -> Self {
        Self {
            options,
            focused: true,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &InputFieldOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: InputFieldOptions) {
        self.options = options;
    }

    pub fn set_bindings(&mut self, bindings: InputFieldBindings) {
        self.bindings = bindings;
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Mirrors a controlled value. `None` leaves the field uncontrolled.
    pub fn set_value(&mut self, value: Option<&str>) {
        let Some(value) = value else {
            self.controlled = None;
            return;
        };
        if self.controlled.as_deref() == Some(value) {
            return;
        }
        self.controlled = Some(value.to_string());
        self.value = value.to_string();
        self.cursor = self.value.chars().count();
    }

    /// Cursor position as a char index into [`InputField::value`].
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the clear affordance is shown (and the clear binding is live).
    pub fn can_clear(&self) -> bool {
        self.options.show_clear && !self.value.is_empty() && !self.options.disabled
    }

    /// Empties the field. A disabled field is left alone.
    pub fn clear(&mut self) -> InputFieldAction {
        if self.options.disabled {
            return InputFieldAction::None;
        }
        self.value.clear();
        self.cursor = 0;
        self.scroll = 0;
        InputFieldAction::Changed(String::new())
    }

    pub fn is_password_visible(&self) -> bool {
        self.show_password
    }

    /// `true` when the value is drawn as mask characters.
    pub fn is_masked(&self) -> bool {
        self.options.password && !self.show_password
    }

    pub fn toggle_password_visibility(&mut self) -> InputFieldAction {
        if !self.options.password {
            return InputFieldAction::None;
        }
        self.show_password = !self.show_password;
        InputFieldAction::Redraw
    }

    /// The name a screen reader (or a form summary) would use: label, else placeholder.
    pub fn accessible_label(&self) -> Option<&str> {
        self.options
            .label
            .as_deref()
            .or(self.options.placeholder.as_deref())
    }

    /// Text of the message line: the error when invalid, otherwise the helper text.
    pub fn message(&self) -> Option<&str> {
        if self.options.invalid {
            Some(self.options.error_message.as_deref().unwrap_or("Invalid"))
        } else {
            self.options.helper_text.as_deref()
        }
    }

    /// Rows needed to draw the field: label, box, message line.
    pub fn height(&self) -> u16 {
        let label = u16::from(self.options.label.is_some());
        label + self.box_height() + 1
    }

    pub fn handle_event(&mut self, event: InputEvent) -> InputFieldAction {
        if self.options.disabled {
            return InputFieldAction::None;
        }
        match event {
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Paste(text) => {
                let text: String = text.chars().filter(|c| *c != '\n' && *c != '\r').collect();
                if text.is_empty() {
                    return InputFieldAction::None;
                }
                for ch in text.chars() {
                    self.insert_char(ch);
                }
                InputFieldAction::Changed(self.value.clone())
            }
            InputEvent::Mouse(mouse) => self.handle_mouse(mouse),
        }
    }

    /// Terminal cursor position for the last render, when focused.
    pub fn cursor_pos(&self) -> Option<(u16, u16)> {
        if !self.focused || self.options.disabled || self.layout.text.width == 0 {
            return None;
        }
        let text = self.layout.text;
        let cols: usize = self
            .display_chars()
            .skip(self.scroll)
            .take(self.cursor.saturating_sub(self.scroll))
            .map(|c| UnicodeWidthChar::width(c).unwrap_or(0))
            .sum();
        let x = text.x.saturating_add(cols.min(text.width as usize) as u16);
        Some((x.min(text.x + text.width - 1), text.y))
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        self.layout = FieldLayout::default();
        if area.width == 0 || area.height == 0 {
            return;
        }

        let mut base = theme.text_primary.patch(self.options.style);
        if self.options.disabled {
            base = base.add_modifier(Modifier::DIM);
        }
        let mut y = area.y;
        let bottom = area.y + area.height;

        if let Some(label) = &self.options.label {
            render::render_str(
                area.x,
                y,
                area.width,
                buf,
                label,
                base.add_modifier(Modifier::BOLD),
            );
            y += 1;
        }
        if y >= bottom {
            return;
        }

        let box_area = Rect::new(area.x, y, area.width, self.box_height().min(bottom - y));
        self.render_box(box_area, buf, base, theme);
        y += box_area.height;

        if y < bottom {
            if let Some(message) = self.message() {
                let style = if self.options.invalid {
                    theme.danger
                } else {
                    theme.text_muted
                };
                render::render_str(area.x, y, area.width, buf, message, style);
            }
        }
    }

    fn box_height(&self) -> u16 {
        match (self.options.variant, self.options.size) {
            (InputVariant::Outlined, _) | (_, InputSize::Lg) => 3,
            _ => 1,
        }
    }

    fn render_box(&mut self, area: Rect, buf: &mut Buffer, base: Style, theme: &Theme) {
        let border_style = if self.options.invalid {
            theme.danger
        } else if self.focused && !self.options.disabled {
            theme.accent
        } else {
            theme.border
        };

        let inner = match self.options.variant {
            InputVariant::Outlined => {
                let block = Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(border_style);
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            InputVariant::Filled => {
                buf.set_style(area, theme.surface);
                area
            }
            InputVariant::Ghost => area,
        };
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let row_y = inner.y + inner.height.saturating_sub(1) / 2;
        let pad = self.options.size.padding().min(inner.width / 2);
        let mut right = inner.x + inner.width - pad;
        let left = inner.x + pad;
        let affordance = theme.text_muted;

        if self.options.password {
            let label = if self.show_password { "Hide" } else { "Show" };
            let w = render::str_width(label) as u16;
            if right >= left + w {
                right -= w;
                render::render_str(right, row_y, w, buf, label, affordance);
                self.layout.toggle = Some(Rect::new(right, row_y, w, 1));
                right = right.saturating_sub(1).max(left);
            }
        }
        if self.can_clear() && right > left {
            right -= 1;
            render::render_str(right, row_y, 1, buf, CLEAR_GLYPH, affordance);
            self.layout.clear = Some(Rect::new(right, row_y, 1, 1));
            right = right.saturating_sub(1).max(left);
        }

        let text = Rect::new(left, row_y, right.saturating_sub(left), 1);
        self.layout.text = text;
        if text.width == 0 {
            return;
        }

        if self.value.is_empty() {
            self.scroll = 0;
            if let Some(placeholder) = &self.options.placeholder {
                render::render_str(
                    text.x,
                    text.y,
                    text.width,
                    buf,
                    placeholder,
                    base.patch(theme.text_muted),
                );
            }
            return;
        }

        self.ensure_cursor_visible(text.width as usize);
        let shown: String = self.display_chars().skip(self.scroll).collect();
        render::render_str(text.x, text.y, text.width, buf, &shown, base);
    }

    fn ensure_cursor_visible(&mut self, width: usize) {
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        }
        let widths: Vec<usize> = self
            .display_chars()
            .map(|c| UnicodeWidthChar::width(c).unwrap_or(0))
            .collect();
        // keep one column free for the cursor itself
        while self.scroll < self.cursor
            && widths[self.scroll..self.cursor].iter().sum::<usize>() >= width
        {
            self.scroll += 1;
        }
    }

    fn display_chars(&self) -> impl Iterator<Item = char> + '_ {
        let masked = self.is_masked();
        self.value
            .chars()
            .map(move |c| if masked { MASK_CHAR } else { c })
    }

    fn handle_key(&mut self, key: KeyEvent) -> InputFieldAction {
        if self.bindings.toggle_password.matches(&key) {
            return self.toggle_password_visibility();
        }
        if self.bindings.clear.matches(&key) {
            return if self.can_clear() {
                self.clear()
            } else {
                InputFieldAction::None
            };
        }
        if let Some(ch) = key.text_char() {
            self.insert_char(ch);
            return InputFieldAction::Changed(self.value.clone());
        }

        let len = self.value.chars().count();
        match key.code {
            KeyCode::Backspace if self.cursor > 0 => {
                self.cursor -= 1;
                self.remove_char_at(self.cursor);
                InputFieldAction::Changed(self.value.clone())
            }
            KeyCode::Delete if self.cursor < len => {
                self.remove_char_at(self.cursor);
                InputFieldAction::Changed(self.value.clone())
            }
            KeyCode::Left if self.cursor > 0 => {
                self.cursor -= 1;
                InputFieldAction::Redraw
            }
            KeyCode::Right if self.cursor < len => {
                self.cursor += 1;
                InputFieldAction::Redraw
            }
            KeyCode::Home if self.cursor > 0 => {
                self.cursor = 0;
                InputFieldAction::Redraw
            }
            KeyCode::End if self.cursor < len => {
                self.cursor = len;
                InputFieldAction::Redraw
            }
            _ => InputFieldAction::None,
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> InputFieldAction {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return InputFieldAction::None;
        }
        let hit = |r: Option<Rect>| {
            r.is_some_and(|r| mouse.y == r.y && mouse.x >= r.x && mouse.x < r.x + r.width)
        };
        if hit(self.layout.clear) {
            return self.clear();
        }
        if hit(self.layout.toggle) {
            return self.toggle_password_visibility();
        }
        InputFieldAction::None
    }

    fn insert_char(&mut self, ch: char) {
        let idx = byte_index_from_char_index(&self.value, self.cursor);
        self.value.insert(idx, ch);
        self.cursor += 1;
    }

    fn remove_char_at(&mut self, char_idx: usize) {
        let start = byte_index_from_char_index(&self.value, char_idx);
        let end = byte_index_from_char_index(&self.value, char_idx + 1);
        self.value.replace_range(start..end, "");
    }
}

fn byte_index_from_char_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map_or(s.len(), |(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::key_char;
    use crate::keymap::key_ctrl;

    fn typed(field: &mut InputField, s: &str) {
        for c in s.chars() {
            field.handle_event(key_char(c).into());
        }
    }

    fn draw(field: &mut InputField, w: u16) -> Vec<String> {
        let h = field.height();
        let area = Rect::new(0, 0, w, h);
        let mut buf = Buffer::empty(area);
        field.render(area, &mut buf, &Theme::default());
        (0..h)
            .map(|y| {
                (0..w)
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn typing_reports_changes() {
        let mut f = InputField::new();
        assert_eq!(
            f.handle_event(key_char('h').into()),
            InputFieldAction::Changed("h".into())
        );
        typed(&mut f, "i");
        assert_eq!(f.value(), "hi");
        f.handle_event(KeyCode::Left.into());
        typed(&mut f, "-");
        assert_eq!(f.value(), "h-i");
        assert_eq!(
            f.handle_event(KeyCode::Backspace.into()),
            InputFieldAction::Changed("hi".into())
        );
        assert_eq!(f.handle_event(KeyCode::Home.into()), InputFieldAction::Redraw);
        assert_eq!(f.handle_event(KeyCode::Backspace.into()), InputFieldAction::None);
    }

    #[test]
    fn controlled_value_resyncs_only_on_change() {
        let mut f = InputField::new();
        f.set_value(Some("abc"));
        assert_eq!(f.value(), "abc");
        typed(&mut f, "d");
        // same controlled value as before: the local edit stands
        f.set_value(Some("abc"));
        assert_eq!(f.value(), "abcd");
        f.set_value(Some("xyz"));
        assert_eq!(f.value(), "xyz");
        assert_eq!(f.cursor(), 3);
    }

    #[test]
    fn clear_requires_visible_affordance() {
        let mut f = InputField::with_options(InputFieldOptions {
            show_clear: true,
            ..Default::default()
        });
        assert!(!f.can_clear());
        assert_eq!(f.handle_event(KeyCode::Esc.into()), InputFieldAction::None);
        typed(&mut f, "abc");
        assert!(f.can_clear());
        assert_eq!(
            f.handle_event(KeyCode::Esc.into()),
            InputFieldAction::Changed(String::new())
        );
        assert_eq!(f.value(), "");

        let mut no_clear = InputField::new();
        typed(&mut no_clear, "abc");
        assert_eq!(no_clear.handle_event(KeyCode::Esc.into()), InputFieldAction::None);
    }

    #[test]
    fn disabled_field_ignores_input() {
        let mut f = InputField::with_options(InputFieldOptions {
            disabled: true,
            show_clear: true,
            ..Default::default()
        });
        f.set_value(Some("x"));
        assert!(!f.can_clear());
        assert_eq!(f.handle_event(key_char('a').into()), InputFieldAction::None);
        assert_eq!(f.clear(), InputFieldAction::None);
        assert_eq!(f.value(), "x");
    }

    #[test]
    fn password_is_masked_until_revealed() {
        let mut f = InputField::with_options(InputFieldOptions {
            password: true,
            variant: InputVariant::Ghost,
            size: InputSize::Sm,
            ..Default::default()
        });
        typed(&mut f, "pw");
        assert!(f.is_masked());
        let lines = draw(&mut f, 20);
        assert_eq!(lines[0], "••              Show");
        assert_eq!(
            f.handle_event(key_ctrl('r').into()),
            InputFieldAction::Redraw
        );
        let lines = draw(&mut f, 20);
        assert_eq!(lines[0], "pw              Hide");
    }

    #[test]
    fn renders_label_placeholder_and_helper() {
        let mut f = InputField::with_options(InputFieldOptions {
            label: Some("Name".into()),
            placeholder: Some("Enter".into()),
            helper_text: Some("Type something".into()),
            ..Default::default()
        });
        let lines = draw(&mut f, 20);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Name");
        assert_eq!(lines[2], "│ Enter            │");
        assert_eq!(lines[4], "Type something");
    }

    #[test]
    fn invalid_shows_error_over_helper() {
        let mut f = InputField::with_options(InputFieldOptions {
            invalid: true,
            helper_text: Some("help".into()),
            ..Default::default()
        });
        assert_eq!(f.message(), Some("Invalid"));
        f.set_options(InputFieldOptions {
            invalid: true,
            error_message: Some("Please enter a valid email".into()),
            ..Default::default()
        });
        assert_eq!(f.message(), Some("Please enter a valid email"));
    }

    #[test]
    fn accessible_label_falls_back_to_placeholder() {
        let f = InputField::with_options(InputFieldOptions {
            placeholder: Some("Enter".into()),
            ..Default::default()
        });
        assert_eq!(f.accessible_label(), Some("Enter"));
    }

    #[test]
    fn clicking_clear_glyph_clears() {
        let mut f = InputField::with_options(InputFieldOptions {
            show_clear: true,
            variant: InputVariant::Ghost,
            size: InputSize::Sm,
            ..Default::default()
        });
        typed(&mut f, "abc");
        let lines = draw(&mut f, 10);
        assert_eq!(lines[0], "abc      ✕");
        assert_eq!(
            f.handle_event(InputEvent::Mouse(MouseEvent::left_click(9, 0))),
            InputFieldAction::Changed(String::new())
        );
    }

    #[test]
    fn long_value_scrolls_to_cursor() {
        let mut f = InputField::with_options(InputFieldOptions {
            variant: InputVariant::Ghost,
            size: InputSize::Sm,
            ..Default::default()
        });
        typed(&mut f, "abcdefghij");
        let lines = draw(&mut f, 5);
        assert_eq!(lines[0], "ghij");
        assert_eq!(f.cursor_pos(), Some((4, 0)));
    }
}
