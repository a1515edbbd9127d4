use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui_uikit::crossterm_input::input_event_from_crossterm;
use ratatui_uikit::field::InputField;
use ratatui_uikit::field::InputFieldAction;
use ratatui_uikit::field::InputFieldOptions;
use ratatui_uikit::input::InputEvent;
use ratatui_uikit::input::KeyCode;
use ratatui_uikit::keymap::key;
use ratatui_uikit::keymap::key_ctrl;
use ratatui_uikit::keymap::key_event_matches;
use ratatui_uikit::render;
use ratatui_uikit::table::Column;
use ratatui_uikit::table::DataTableAction;
use ratatui_uikit::table::DataTableOptions;
use ratatui_uikit::table::DataTableView;
use ratatui_uikit::theme::Theme;
use serde_json::Value;
use serde_json::json;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::WriteLogger;
use std::fs::File;
use std::io;
use std::time::Duration;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Focus {
    Name,
    People,
}

struct App {
    theme: Theme,
    focus: Focus,
    name: String,
    input: InputField,
    table: DataTableView<Value>,
    table_area: Rect,
    status: String,
}

impl App {
    fn new() -> Self {
        let input = InputField::with_options(InputFieldOptions {
            label: Some("Name".into()),
            placeholder: Some("Enter your name".into()),
            helper_text: Some("Type something".into()),
            show_clear: true,
            ..Default::default()
        });

        let mut table = DataTableView::with_options(
            vec![
                Column::new("name", "Name").sortable(true),
                Column::new("age", "Age").sortable(true),
                Column::new("city", "City"),
            ],
            DataTableOptions {
                selectable: true,
                ..Default::default()
            },
        );
        table.set_data(vec![
            json!({"id": 1, "name": "jps", "age": 26, "city": "Hyderabad"}),
            json!({"id": 2, "name": "abhi", "age": 34, "city": "Bangalore"}),
            json!({"id": 3, "name": "lmj", "age": 29, "city": "Delhi"}),
        ]);
        table.set_focused(false);

        Self {
            theme: Theme::light(),
            focus: Focus::Name,
            name: String::new(),
            input,
            table,
            table_area: Rect::default(),
            status: "Tab switch focus  ^D dark mode  ^C quit".to_string(),
        }
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.input.set_focused(focus == Focus::Name);
        self.table.set_focused(focus == Focus::People);
    }

    fn handle(&mut self, ev: InputEvent) {
        match ev {
            InputEvent::Key(ref k) if key_event_matches(&key_ctrl('d'), k) => {
                self.theme = if self.theme.is_dark() {
                    Theme::light()
                } else {
                    Theme::dark()
                };
            }
            InputEvent::Key(ref k) if key_event_matches(&key(KeyCode::Tab), k) => {
                let next = match self.focus {
                    Focus::Name => Focus::People,
                    Focus::People => Focus::Name,
                };
                self.set_focus(next);
            }
            InputEvent::Mouse(m) => {
                let in_table = m.y >= self.table_area.y
                    && m.y < self.table_area.y + self.table_area.height;
                self.set_focus(if in_table { Focus::People } else { Focus::Name });
                self.dispatch(InputEvent::Mouse(m));
            }
            ev => self.dispatch(ev),
        }
    }

    fn dispatch(&mut self, ev: InputEvent) {
        match self.focus {
            Focus::Name => {
                if let InputFieldAction::Changed(value) = self.input.handle_event(ev) {
                    self.name = value;
                }
            }
            Focus::People => match self.table.handle_event(ev) {
                DataTableAction::SelectionChanged(rows) => {
                    log::info!("selected rows: {}", Value::from(rows.clone()));
                    let names: Vec<&str> = rows.iter().filter_map(|r| r["name"].as_str()).collect();
                    self.status = if names.is_empty() {
                        "Selected: none".to_string()
                    } else {
                        format!("Selected: {}", names.join(", "))
                    };
                }
                DataTableAction::SortChanged(sort) => {
                    log::info!("sort: {sort:?}");
                }
                DataTableAction::Redraw | DataTableAction::None => {}
            },
        }
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) -> Option<(u16, u16)> {
        buf.set_style(area, self.theme.text_primary);
        if self.theme.is_dark() {
            buf.set_style(area, self.theme.surface);
        }
        if area.height < 4 {
            return None;
        }

        render::render_str(
            area.x,
            area.y,
            area.width,
            buf,
            "UI Components Demo",
            self.theme.accent.add_modifier(Modifier::BOLD),
        );

        // controlled: the app owns the value
        self.input.set_value(Some(&self.name));
        let input_h = self.input.height().min(area.height - 2);
        let input_area = Rect::new(area.x, area.y + 2, area.width.min(40), input_h);
        self.input.render(input_area, buf, &self.theme);

        let table_y = input_area.y + input_area.height + 1;
        let bottom = area.y + area.height - 1;
        if table_y < bottom {
            self.table_area = Rect::new(area.x, table_y, area.width, bottom - table_y);
            self.table.render(self.table_area, buf, &self.theme);
        }

        render::render_str(area.x, bottom, area.width, buf, &self.status, self.theme.text_muted);
        self.input.cursor_pos()
    }
}

fn main() -> io::Result<()> {
    let log_file = File::create("preview.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file).map_err(io::Error::other)?;

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let res = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    res
}

fn run<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| {
            let area = f.area();
            let cursor = app.render(area, f.buffer_mut());
            if let Some((x, y)) = cursor {
                f.set_cursor_position((x, y));
            }
        })?;

        if !crossterm::event::poll(Duration::from_millis(50))? {
            continue;
        }
        let Some(ev) = input_event_from_crossterm(crossterm::event::read()?) else {
            continue;
        };
        if let InputEvent::Key(ref k) = ev {
            if key_event_matches(&key_ctrl('c'), k) {
                return Ok(());
            }
        }
        app.handle(ev);
    }
}
