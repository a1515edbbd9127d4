use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui_uikit::crossterm_input::input_event_from_crossterm;
use ratatui_uikit::input::InputEvent;
use ratatui_uikit::input::KeyCode;
use ratatui_uikit::keymap::key;
use ratatui_uikit::keymap::key_char;
use ratatui_uikit::keymap::key_event_matches;
use ratatui_uikit::stories;
use ratatui_uikit::stories::Story;
use ratatui_uikit::theme::Theme;
use std::io;
use std::time::Duration;

fn main() -> io::Result<()> {
    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let theme = Theme::default();
    let mut stories = stories::catalogue();

    let res = run(&mut terminal, &theme, &mut stories);

    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    res
}

fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    theme: &Theme,
    stories: &mut [Story],
) -> io::Result<()> {
    if stories.is_empty() {
        return Ok(());
    }
    let mut current = 0usize;
    loop {
        terminal.draw(|f| {
            let area = f.area();
            let story = &mut stories[current];
            let block = Block::default()
                .title(format!("{} (Tab next, q quit)", story.path()))
                .borders(Borders::ALL);
            let inner = block.inner(area);
            f.render_widget(block, area);

            let buf = f.buffer_mut();
            let body = Rect::new(inner.x, inner.y, inner.width, inner.height.saturating_sub(1));
            story.widget.render(body, buf, theme);

            if inner.height > 0 {
                let footer = format!("{}/{}", current + 1, stories.len());
                let span = Span::styled(footer, theme.text_muted);
                buf.set_span(inner.x, inner.y + inner.height - 1, &span, inner.width);
            }
        })?;

        if !crossterm::event::poll(Duration::from_millis(50))? {
            continue;
        }
        let Some(ev) = input_event_from_crossterm(crossterm::event::read()?) else {
            continue;
        };
        if let InputEvent::Key(ref k) = ev {
            if key_event_matches(&key_char('q'), k) {
                return Ok(());
            }
            if key_event_matches(&key(KeyCode::Tab), k) {
                current = (current + 1) % stories.len();
                continue;
            }
        }
        stories[current].widget.handle_event(ev);
    }
}
