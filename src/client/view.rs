//! 终端视图渲染

use std::fmt::Write;

use super::controller::ViewState;

/// 把当前状态渲染成多行文本：表单、错误、编号列表
pub fn render(state: &ViewState) -> String {
    let mut out = String::new();

    let mode = if state.edit_mode { "Edit item" } else { "New item" };
    let _ = writeln!(out, "== {} ==", mode);
    let _ = writeln!(out, "  name:        {}", state.form.name);
    let _ = writeln!(
        out,
        "  description: {}",
        state.form.description.as_deref().unwrap_or("")
    );

    if !state.error.is_empty() {
        let _ = writeln!(out, "! {}", state.error);
    }

    if state.loading {
        let _ = writeln!(out, "Loading...");
    } else if state.items.is_empty() {
        let _ = writeln!(out, "No items yet.");
    } else {
        for (index, item) in state.items.iter().enumerate() {
            let marker = if state.form.id == Some(item.id) { "*" } else { " " };
            match item.description.as_deref() {
                Some(description) if !description.is_empty() => {
                    let _ = writeln!(out, "{}{:>3}. {} - {}", marker, index + 1, item.name, description);
                }
                _ => {
                    let _ = writeln!(out, "{}{:>3}. {}", marker, index + 1, item.name);
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::items::model::Item;
    use crate::client::controller::ItemForm;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_render_empty_create_mode() {
        let out = render(&ViewState::default());
        assert!(out.starts_with("== New item =="));
        assert!(out.contains("No items yet."));
    }

    #[test]
    fn test_render_marks_edited_item_and_error() {
        let item = Item {
            id: Uuid::new_v4(),
            name: "Book".to_string(),
            description: Some("d".to_string()),
            created_at: Utc::now(),
        };
        let state = ViewState {
            items: vec![item.clone()],
            loading: false,
            error: "Failed to update item.".to_string(),
            edit_mode: true,
            form: ItemForm {
                id: Some(item.id),
                name: "Book".to_string(),
                description: Some("d".to_string()),
            },
        };

        let out = render(&state);
        assert!(out.contains("== Edit item =="));
        assert!(out.contains("! Failed to update item."));
        assert!(out.contains("*  1. Book - d"));
    }
}
