use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;

use super::column::Column;
use super::row::TableRow;
use super::sort::SortState;
use super::state::TableState;
use crate::input::InputEvent;
use crate::input::KeyEvent;
use crate::input::MouseButton;
use crate::input::MouseEvent;
use crate::input::MouseEventKind;
use crate::keymap::TableBindings;
use crate::render;
use crate::theme::Theme;
use crate::viewport::ViewportState;

#[derive(Clone, Debug, PartialEq)]
pub enum DataTableAction<T> {
    None,
    Redraw,
    SortChanged(SortState),
    /// The selected rows after a toggle, in dataset order.
    SelectionChanged(Vec<T>),
}

/// Options for [`DataTableView`].
#[derive(Clone, Debug)]
pub struct DataTableOptions {
    /// Adds a leading checkbox column and enables row toggling.
    pub selectable: bool,
    pub show_header: bool,
    pub show_scrollbar: bool,
    pub col_gap: u16,
    pub loading_text: String,
    pub empty_text: String,
    pub select_title: String,
    pub style: Style,
    pub header_style: Style,
    pub cursor_style: Style,
    pub selected_style: Style,
    pub focused_header_style: Style,
}

impl Default for DataTableOptions {
    fn default() -> Self {
        Self {
            selectable: false,
            show_header: true,
            show_scrollbar: true,
            col_gap: 2,
            loading_text: "Loading...".to_string(),
            empty_text: "No data available".to_string(),
            select_title: "Select".to_string(),
            style: Style::default(),
            header_style: Style::default(),
            cursor_style: Style::default(),
            selected_style: Style::default().add_modifier(Modifier::BOLD),
            focused_header_style: Style::default().add_modifier(Modifier::UNDERLINED),
        }
    }
}

const CHECKED: &str = "[x]";
const UNCHECKED: &str = "[ ]";

// Where things landed on the last render, for mouse hit-testing.
#[derive(Clone, Debug, Default)]
struct TableLayout {
    header: Option<Rect>,
    body: Rect,
    select: Option<(u16, u16)>,
    columns: Vec<(u16, u16)>,
}

impl TableLayout {
    fn column_at(&self, x: u16) -> Option<usize> {
        self.columns
            .iter()
            .position(|&(start, width)| x >= start && x < start.saturating_add(width))
    }

    fn in_select(&self, x: u16) -> bool {
        self.select
            .is_some_and(|(start, width)| x >= start && x < start.saturating_add(width))
    }
}

/// A sortable, optionally selectable table of rows.
///
/// The view owns the dataset plus a [`TableState`]; rows are drawn in sorted-view order, and
/// user gestures are forwarded to the state as sort requests and selection toggles. Drive it
/// from your app loop with [`DataTableView::handle_event`] and [`DataTableView::render`].
pub struct DataTableView<T> {
    pub viewport: ViewportState,
    state: TableState<T>,
    data: Vec<T>,
    loading: bool,
    focused: bool,
    options: DataTableOptions,
    bindings: TableBindings,
    cursor: Option<usize>,
    header_focus: usize,
    layout: TableLayout,
}

impl<T: TableRow + Clone> DataTableView<T> {
    pub fn new(columns: Vec<Column<T>>) -> Self {
        Self::with_options(columns, DataTableOptions::default())
    }

    pub fn with_options(columns: Vec<Column<T>>, options: DataTableOptions) -> Self {
        Self {
            viewport: ViewportState::default(),
            state: TableState::new(columns),
            data: Vec::new(),
            loading: false,
            focused: true,
            options,
            bindings: TableBindings::default(),
            cursor: None,
            header_focus: 0,
            layout: TableLayout::default(),
        }
    }

    pub fn options(&self) -> &DataTableOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: DataTableOptions) {
        self.options = options;
    }

    pub fn set_bindings(&mut self, bindings: TableBindings) {
        self.bindings = bindings;
    }

    pub fn bindings(&self) -> &TableBindings {
        &self.bindings
    }

    pub fn state(&self) -> &TableState<T> {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut TableState<T> {
        &mut self.state
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Replaces the dataset. Sort and selection state are kept.
    pub fn set_data(&mut self, data: Vec<T>) {
        self.data = data;
        self.cursor = match self.cursor {
            _ if self.data.is_empty() => None,
            Some(c) => Some(c.min(self.data.len() - 1)),
            None => Some(0),
        };
        self.viewport.set_content(self.data.len() as u32);
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Rows in display order.
    pub fn view(&self) -> Vec<&T> {
        self.state.view(&self.data)
    }

    pub fn is_empty_view(&self) -> bool {
        TableState::is_empty_view(&self.data, self.loading)
    }

    pub fn selected_rows(&self) -> Vec<&T> {
        self.state.selected_rows(&self.data)
    }

    /// Cursor position, as an index into [`DataTableView::view`].
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: Option<usize>) {
        self.cursor = cursor.and_then(|c| {
            if self.data.is_empty() {
                None
            } else {
                Some(c.min(self.data.len() - 1))
            }
        });
        if let Some(c) = self.cursor {
            self.viewport.ensure_visible(c as u32);
        }
    }

    /// Index of the column whose header has keyboard focus.
    pub fn focused_column(&self) -> usize {
        self.header_focus
    }

    pub fn request_sort(&mut self, column_key: &str) -> DataTableAction<T> {
        if self.state.request_sort(column_key) {
            DataTableAction::SortChanged(self.state.sort_state().clone())
        } else {
            DataTableAction::None
        }
    }

    /// Toggles the row at `view_index`. Does nothing unless the table is selectable.
    pub fn toggle_selection_at(&mut self, view_index: usize) -> DataTableAction<T> {
        if !self.options.selectable {
            return DataTableAction::None;
        }
        let Some(data_index) = self.data_index_of(view_index) else {
            return DataTableAction::None;
        };
        let row = &self.data[data_index];
        let selected: Vec<T> = self
            .state
            .toggle_selection(row, &self.data)
            .into_iter()
            .cloned()
            .collect();
        DataTableAction::SelectionChanged(selected)
    }

    pub fn handle_event(&mut self, event: InputEvent) -> DataTableAction<T> {
        self.clamp_header_focus();
        if self.loading {
            return DataTableAction::None;
        }
        match event {
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Mouse(mouse) => self.handle_mouse(mouse),
            InputEvent::Paste(_) => DataTableAction::None,
        }
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        self.layout = TableLayout::default();
        if area.width == 0 || area.height == 0 {
            return;
        }

        let base = theme.text_primary.patch(self.options.style);
        let header_style = theme.header.patch(self.options.header_style);
        buf.set_style(area, base);

        let header_h = u16::from(self.options.show_header).min(area.height);
        let mut body = Rect::new(
            area.x,
            area.y + header_h,
            area.width,
            area.height - header_h,
        );

        self.viewport.set_viewport(body.height);
        self.viewport.set_content(self.data.len() as u32);
        if let Some(c) = self.cursor {
            self.viewport.ensure_visible(c as u32);
        }
        let scrollbar_x = if self.options.show_scrollbar
            && body.width >= 2
            && self.viewport.content_h > self.viewport.viewport_h as u32
        {
            body.width -= 1;
            Some(body.x + body.width)
        } else {
            None
        };

        self.clamp_header_focus();
        self.layout.body = body;
        self.compute_columns(Rect::new(area.x, area.y, body.width, area.height));

        if header_h > 0 {
            let header = Rect::new(area.x, area.y, area.width, 1);
            self.layout.header = Some(header);
            self.render_header(header, buf, header_style, theme);
        }

        if self.loading {
            let row = Rect::new(body.x, body.y, body.width, body.height.min(1));
            render::render_str_centered(row, buf, &self.options.loading_text, theme.text_muted);
            return;
        }
        if self.is_empty_view() {
            let row = Rect::new(body.x, body.y, body.width, body.height.min(1));
            render::render_str_centered(row, buf, &self.options.empty_text, theme.text_muted);
            return;
        }

        self.render_body(body, buf, base, theme);

        if let Some(x) = scrollbar_x {
            render::render_scrollbar(
                Rect::new(x, body.y, 1, body.height),
                buf,
                &self.viewport,
                theme.text_muted,
                theme.text_muted.patch(theme.accent),
            );
        }
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer, style: Style, theme: &Theme) {
        buf.set_style(area, style);
        if let Some((x, width)) = self.layout.select {
            render::render_str(x, area.y, width, buf, &self.options.select_title, style);
        }
        for (i, (column, &(x, width))) in self
            .state
            .columns()
            .iter()
            .zip(&self.layout.columns)
            .enumerate()
        {
            let title = match self.state.sort_indicator(&column.key) {
                Some(glyph) => format!("{} {glyph}", column.title),
                None => column.title.clone(),
            };
            let style = if self.focused && i == self.header_focus {
                style.patch(self.options.focused_header_style)
            } else if column.sortable {
                style
            } else {
                style.patch(theme.text_muted)
            };
            render::render_str(x, area.y, width, buf, &title, style);
        }
    }

    fn render_body(&self, area: Rect, buf: &mut Buffer, base: Style, theme: &Theme) {
        let view = self.state.view(&self.data);
        let cursor_style = theme.row_hover.patch(self.options.cursor_style);
        let selected_style = base.patch(theme.accent).patch(self.options.selected_style);

        for (dy, index) in self.viewport.visible_rows().enumerate() {
            let Some(row) = view.get(index).copied() else {
                break;
            };
            let y = area.y + dy as u16;
            let is_selected = self.options.selectable && self.state.is_selected(row);
            let mut style = if is_selected { selected_style } else { base };
            if self.focused && self.cursor == Some(index) {
                style = style.patch(cursor_style);
            }
            buf.set_style(Rect::new(area.x, y, area.width, 1), style);

            if let Some((x, width)) = self.layout.select {
                let check = if is_selected { CHECKED } else { UNCHECKED };
                render::render_str(x, y, width, buf, check, style);
            }
            for (column, &(x, width)) in self.state.columns().iter().zip(&self.layout.columns) {
                let line = cell_line(column, row);
                render::render_line(x, y, width, buf, &line, style);
            }
        }
    }

    // Lays columns out left to right; anything past the right edge gets zero width.
    fn compute_columns(&mut self, area: Rect) {
        let gap = self.options.col_gap;
        let right = area.x.saturating_add(area.width);
        let mut x = area.x;
        let mut place = |want: u16| -> (u16, u16) {
            let start = x.min(right);
            let width = want.min(right - start);
            x = start.saturating_add(width).saturating_add(gap).min(right);
            (start, width)
        };

        let select = self.options.selectable.then(|| {
            let want = render::str_width(&self.options.select_title).max(CHECKED.len()) as u16;
            place(want)
        });
        let columns = self
            .state
            .columns()
            .iter()
            .map(|column| place(self.natural_width(column)))
            .collect();
        self.layout.select = select;
        self.layout.columns = columns;
    }

    fn natural_width(&self, column: &Column<T>) -> u16 {
        if let Some(width) = column.width {
            return width;
        }
        // room for " ↑" so the header does not shift when sorting
        let title = render::str_width(&column.title) + if column.sortable { 2 } else { 0 };
        let cells = if self.loading {
            0
        } else {
            self.data
                .iter()
                .map(|row| cell_line(column, row).width())
                .max()
                .unwrap_or(0)
        };
        title.max(cells).min(u16::MAX as usize) as u16
    }

    fn handle_key(&mut self, key: KeyEvent) -> DataTableAction<T> {
        let b = &self.bindings;
        if b.sort.matches(&key) {
            let Some(column_key) = self
                .state
                .columns()
                .get(self.header_focus)
                .map(|c| c.key.clone())
            else {
                return DataTableAction::None;
            };
            return self.request_sort(&column_key);
        }
        if b.toggle_row.matches(&key) {
            return match self.cursor {
                Some(c) => self.toggle_selection_at(c),
                None => DataTableAction::None,
            };
        }
        if b.clear_selection.matches(&key) {
            if !self.options.selectable || self.state.selection().is_empty() {
                return DataTableAction::None;
            }
            self.state.clear_selection();
            return DataTableAction::SelectionChanged(Vec::new());
        }
        if b.row_up.matches(&key) {
            return self.move_cursor_by(-1);
        }
        if b.row_down.matches(&key) {
            return self.move_cursor_by(1);
        }
        if b.first_row.matches(&key) {
            return self.move_cursor_to(0);
        }
        if b.last_row.matches(&key) {
            return self.move_cursor_to(self.data.len().saturating_sub(1));
        }
        if b.column_left.matches(&key) {
            return self.move_header_focus_by(-1);
        }
        if b.column_right.matches(&key) {
            return self.move_header_focus_by(1);
        }
        DataTableAction::None
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> DataTableAction<T> {
        match mouse.kind {
            MouseEventKind::ScrollUp => {
                self.viewport.scroll_y_by(-1);
                DataTableAction::Redraw
            }
            MouseEventKind::ScrollDown => {
                self.viewport.scroll_y_by(1);
                DataTableAction::Redraw
            }
            MouseEventKind::Down(MouseButton::Left) => self.click(mouse.x, mouse.y),
            _ => DataTableAction::None,
        }
    }

    fn click(&mut self, x: u16, y: u16) -> DataTableAction<T> {
        if let Some(header) = self.layout.header {
            if y == header.y {
                let Some(index) = self.layout.column_at(x) else {
                    return DataTableAction::None;
                };
                // the schema may have shrunk since the last render
                let Some(key) = self.state.columns().get(index).map(|c| c.key.clone()) else {
                    return DataTableAction::None;
                };
                self.header_focus = index;
                return match self.request_sort(&key) {
                    DataTableAction::None => DataTableAction::Redraw,
                    action => action,
                };
            }
        }

        let body = self.layout.body;
        if y < body.y || y >= body.y.saturating_add(body.height) || self.is_empty_view() {
            return DataTableAction::None;
        }
        let index = self.viewport.y as usize + (y - body.y) as usize;
        if index >= self.data.len() {
            return DataTableAction::None;
        }
        self.cursor = Some(index);
        if self.layout.in_select(x) {
            self.toggle_selection_at(index)
        } else {
            DataTableAction::Redraw
        }
    }

    fn move_cursor_by(&mut self, delta: i64) -> DataTableAction<T> {
        if self.data.is_empty() {
            return DataTableAction::None;
        }
        let current = self.cursor.unwrap_or(0) as i64;
        let next = (current + delta).clamp(0, self.data.len() as i64 - 1) as usize;
        self.move_cursor_to(next)
    }

    fn move_cursor_to(&mut self, index: usize) -> DataTableAction<T> {
        if self.data.is_empty() || self.cursor == Some(index) {
            return DataTableAction::None;
        }
        self.set_cursor(Some(index));
        DataTableAction::Redraw
    }

    fn clamp_header_focus(&mut self) {
        let count = self.state.columns().len();
        self.header_focus = self.header_focus.min(count.saturating_sub(1));
    }

    fn move_header_focus_by(&mut self, delta: i64) -> DataTableAction<T> {
        let count = self.state.columns().len();
        if count == 0 {
            return DataTableAction::None;
        }
        let next = (self.header_focus as i64 + delta).clamp(0, count as i64 - 1) as usize;
        if next == self.header_focus {
            return DataTableAction::None;
        }
        self.header_focus = next;
        DataTableAction::Redraw
    }

    fn data_index_of(&self, view_index: usize) -> Option<usize> {
        let view = self.state.view(&self.data);
        let row = *view.get(view_index)?;
        self.data.iter().position(|r| std::ptr::eq(r, row))
    }
}

fn cell_line<T: TableRow>(column: &Column<T>, row: &T) -> Line<'static> {
    let value = row.field(&column.data_index);
    match &column.render {
        Some(render) => render(&value, row),
        None => Line::raw(value.display_text()),
    }
}
