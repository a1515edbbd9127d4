//! Named widget configurations, grouped by component.
//!
//! Each [`Story`] is a fully configured widget; the `storybook` example cycles through
//! [`catalogue`].

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use serde_json::Value;
use serde_json::json;

use crate::field::InputField;
use crate::field::InputFieldAction;
use crate::field::InputFieldOptions;
use crate::field::InputVariant;
use crate::input::InputEvent;
use crate::table::Column;
use crate::table::DataTableAction;
use crate::table::DataTableOptions;
use crate::table::DataTableView;
use crate::theme::Theme;

pub enum StoryWidget {
    DataTable(DataTableView<Value>),
    InputField(InputField),
}

impl StoryWidget {
    /// Forwards `event`; returns `true` when the story should be redrawn.
    pub fn handle_event(&mut self, event: InputEvent) -> bool {
        match self {
            StoryWidget::DataTable(table) => {
                !matches!(table.handle_event(event), DataTableAction::None)
            }
            StoryWidget::InputField(field) => {
                !matches!(field.handle_event(event), InputFieldAction::None)
            }
        }
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        match self {
            StoryWidget::DataTable(table) => table.render(area, buf, theme),
            StoryWidget::InputField(field) => field.render(area, buf, theme),
        }
    }
}

pub struct Story {
    /// Component group, e.g. `"Components/DataTable"`.
    pub title: &'static str,
    pub name: &'static str,
    pub widget: StoryWidget,
}

impl Story {
    /// `"Components/DataTable/Default"`.
    pub fn path(&self) -> String {
        format!("{}/{}", self.title, self.name)
    }
}

pub fn catalogue() -> Vec<Story> {
    vec![
        data_table_default(),
        data_table_loading(),
        input_field_default(),
        input_field_password(),
        input_field_error(),
    ]
}

const DATA_TABLE: &str = "Components/DataTable";
const INPUT_FIELD: &str = "Components/InputField";

pub fn data_table_default() -> Story {
    let columns = vec![
        Column::new("name", "Name").sortable(true),
        Column::new("age", "Age").sortable(true),
        Column::new("city", "City"),
    ];
    let mut table = DataTableView::with_options(
        columns,
        DataTableOptions {
            selectable: true,
            ..Default::default()
        },
    );
    table.set_data(vec![
        json!({"id": 1, "name": "Alice", "age": 26, "city": "Berlin"}),
        json!({"id": 2, "name": "Bob", "age": 34, "city": "Paris"}),
        json!({"id": 3, "name": "Charlie", "age": 29, "city": "Delhi"}),
    ]);
    Story {
        title: DATA_TABLE,
        name: "Default",
        widget: StoryWidget::DataTable(table),
    }
}

pub fn data_table_loading() -> Story {
    let mut table = DataTableView::new(vec![Column::new("name", "Name")]);
    table.set_loading(true);
    Story {
        title: DATA_TABLE,
        name: "Loading",
        widget: StoryWidget::DataTable(table),
    }
}

pub fn input_field_default() -> Story {
    let field = InputField::with_options(InputFieldOptions {
        label: Some("Full name".into()),
        placeholder: Some("Enter your full name".into()),
        helper_text: Some("This will be displayed on your profile".into()),
        ..Default::default()
    });
    Story {
        title: INPUT_FIELD,
        name: "Default",
        widget: StoryWidget::InputField(field),
    }
}

pub fn input_field_password() -> Story {
    let field = InputField::with_options(InputFieldOptions {
        label: Some("Password".into()),
        placeholder: Some("Enter password".into()),
        helper_text: Some("Keep it secure".into()),
        password: true,
        show_clear: true,
        variant: InputVariant::Filled,
        ..Default::default()
    });
    Story {
        title: INPUT_FIELD,
        name: "Password",
        widget: StoryWidget::InputField(field),
    }
}

pub fn input_field_error() -> Story {
    let field = InputField::with_options(InputFieldOptions {
        label: Some("Email".into()),
        placeholder: Some("you@example.com".into()),
        error_message: Some("Please enter a valid email".into()),
        invalid: true,
        ..Default::default()
    });
    Story {
        title: INPUT_FIELD,
        name: "Error",
        widget: StoryWidget::InputField(field),
    }
}
