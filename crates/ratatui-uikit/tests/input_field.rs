use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui_uikit::field::InputField;
use ratatui_uikit::field::InputFieldAction;
use ratatui_uikit::field::InputFieldOptions;
use ratatui_uikit::input::InputEvent;
use ratatui_uikit::input::KeyCode;
use ratatui_uikit::input::KeyEvent;
use ratatui_uikit::theme::Theme;

fn screen(field: &mut InputField, width: u16) -> String {
    let area = Rect::new(0, 0, width, field.height());
    let mut buf = Buffer::empty(area);
    field.render(area, &mut buf, &Theme::default());
    let mut out = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            out.push_str(buf[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

#[test]
fn renders_label_and_placeholder() {
    let mut field = InputField::with_options(InputFieldOptions {
        label: Some("Name".into()),
        placeholder: Some("Enter".into()),
        ..Default::default()
    });
    let text = screen(&mut field, 30);
    assert!(text.contains("Name"));
    assert!(text.contains("Enter"));
}

#[test]
fn calls_on_change() {
    let mut field = InputField::new();
    let mut changes = Vec::new();
    for ev in [
        InputEvent::Key(KeyEvent::new(KeyCode::Char('a'))),
        InputEvent::Paste("bc\n".into()),
        InputEvent::Key(KeyEvent::new(KeyCode::Backspace)),
    ] {
        if let InputFieldAction::Changed(value) = field.handle_event(ev) {
            changes.push(value);
        }
    }
    assert_eq!(changes, ["a", "abc", "ab"]);
}

#[test]
fn typed_text_replaces_placeholder() {
    let mut field = InputField::with_options(InputFieldOptions {
        placeholder: Some("Enter".into()),
        ..Default::default()
    });
    field.handle_event(InputEvent::Paste("Ada".into()));
    let text = screen(&mut field, 30);
    assert!(text.contains("Ada"));
    assert!(!text.contains("Enter"));
}

#[test]
fn password_field_never_shows_plain_text_while_masked() {
    let mut field = InputField::with_options(InputFieldOptions {
        password: true,
        ..Default::default()
    });
    field.handle_event(InputEvent::Paste("hunter2".into()));
    let text = screen(&mut field, 30);
    assert!(!text.contains("hunter2"));
    assert!(text.contains("•••••••"));
    assert!(text.contains("Show"));
}
