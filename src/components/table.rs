use serde::Serialize;
use serde_json::Value;

use crate::models::Record;
use crate::utils::html::escape;
use crate::utils::{display_value, lookup};

/// Turns the resolved cell value (and the whole record) into display text.
pub type CellRenderer<T> = fn(Option<&Value>, &T) -> String;

pub enum Accessor<T> {
    /// Key path into the serialized record; dotted paths walk nested objects
    Path(&'static str),
    /// Typed accessor on the record itself
    Field(fn(&T) -> Option<Value>),
}

pub struct Column<T> {
    pub label: &'static str,
    accessor: Accessor<T>,
    render: Option<CellRenderer<T>>,
}

impl<T> Column<T> {
    pub fn path(path: &'static str, label: &'static str) -> Self {
        Self {
            label,
            accessor: Accessor::Path(path),
            render: None,
        }
    }

    pub fn field(label: &'static str, accessor: fn(&T) -> Option<Value>) -> Self {
        Self {
            label,
            accessor: Accessor::Field(accessor),
            render: None,
        }
    }

    pub fn render(mut self, render: CellRenderer<T>) -> Self {
        self.render = Some(render);
        self
    }

    fn resolve(&self, record: &T, serialized: &Value) -> Option<Value> {
        match &self.accessor {
            Accessor::Path(path) => lookup(serialized, path).cloned(),
            Accessor::Field(accessor) => accessor(record).filter(|v| !v.is_null()),
        }
    }

    /// Cell text; a missing value never fails, it renders empty or whatever the renderer picks.
    pub fn cell(&self, record: &T, serialized: &Value) -> String {
        let value = self.resolve(record, serialized);
        match self.render {
            Some(render) => render(value.as_ref(), record),
            None => display_value(value.as_ref()),
        }
    }
}

/// What the per-row "edit" control does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    /// Opens the form modal pre-filled with the row
    OpenForm,
    /// Posts straight to `{base}/{id}/{action}`
    Post {
        label: &'static str,
        action: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRow {
    pub id: i64,
    pub cells: Vec<String>,
    pub delete_armed: bool,
}

/// Read-only grid described by column descriptors.
///
/// Sorting, filtering and paging are left to whoever hands in the rows.
pub struct Table<T> {
    title: String,
    base_path: String,
    columns: Vec<Column<T>>,
    edit: Option<EditAction>,
    delete: bool,
    create: bool,
}

impl<T> Table<T>
where
    T: Record + Serialize,
{
    pub fn new(title: impl Into<String>, base_path: impl Into<String>, columns: Vec<Column<T>>) -> Self {
        Self {
            title: title.into(),
            base_path: base_path.into(),
            columns,
            edit: None,
            delete: false,
            create: false,
        }
    }

    pub fn with_edit(mut self, action: EditAction) -> Self {
        self.edit = Some(action);
        self
    }

    pub fn with_delete(mut self) -> Self {
        self.delete = true;
        self
    }

    pub fn with_create(mut self) -> Self {
        self.create = true;
        self
    }

    pub fn headers(&self) -> Vec<&'static str> {
        let mut headers: Vec<&'static str> = self.columns.iter().map(|c| c.label).collect();
        if self.has_row_actions() {
            headers.push("Actions");
        }
        headers
    }

    pub fn has_row_actions(&self) -> bool {
        self.edit.is_some() || self.delete
    }

    pub fn rows(&self, data: &[T], armed_row: Option<i64>) -> Vec<RenderedRow> {
        data.iter()
            .map(|record| {
                let serialized = serde_json::to_value(record).unwrap_or_else(|e| {
                    log::warn!("⚠️  Could not serialize row {}: {}", record.record_id(), e);
                    Value::Null
                });
                RenderedRow {
                    id: record.record_id(),
                    cells: self
                        .columns
                        .iter()
                        .map(|column| column.cell(record, &serialized))
                        .collect(),
                    delete_armed: self.delete && armed_row == Some(record.record_id()),
                }
            })
            .collect()
    }

    pub fn empty_message(&self) -> String {
        format!("No {} found", self.title.to_lowercase())
    }

    pub fn render_html(&self, data: &[T], armed_row: Option<i64>) -> String {
        let mut html = String::new();
        html.push_str("<section class=\"panel\">\n<div class=\"panel-head\">");
        html.push_str(&format!("<h2>{}</h2>", escape(&self.title)));
        if self.create {
            html.push_str(&format!(
                "<a class=\"button primary\" href=\"{}?modal=create\">+ Add New</a>",
                escape(&self.base_path)
            ));
        }
        html.push_str("</div>\n<table>\n<thead><tr>");
        for header in self.headers() {
            html.push_str(&format!("<th>{}</th>", escape(header)));
        }
        html.push_str("</tr></thead>\n<tbody>\n");

        for row in self.rows(data, armed_row) {
            html.push_str(&format!("<tr data-id=\"{}\">", row.id));
            for cell in &row.cells {
                html.push_str(&format!("<td>{}</td>", escape(cell)));
            }
            if self.has_row_actions() {
                html.push_str("<td class=\"actions\">");
                html.push_str(&self.row_actions_html(&row));
                html.push_str("</td>");
            }
            html.push_str("</tr>\n");
        }
        html.push_str("</tbody>\n</table>\n");

        if data.is_empty() {
            html.push_str(&format!("<p class=\"empty\">{}</p>\n", escape(&self.empty_message())));
        }
        html.push_str("</section>\n");
        html
    }

    fn row_actions_html(&self, row: &RenderedRow) -> String {
        let base = escape(&self.base_path);
        let mut html = String::new();

        match self.edit {
            Some(EditAction::OpenForm) => {
                html.push_str(&format!(
                    "<a class=\"button\" href=\"{}?edit={}\">Edit</a>",
                    base, row.id
                ));
            }
            Some(EditAction::Post { label, action }) => {
                html.push_str(&format!(
                    "<form method=\"post\" action=\"{}/{}/{}\"><button type=\"submit\">{}</button></form>",
                    base,
                    row.id,
                    escape(action),
                    escape(label)
                ));
            }
            None => {}
        }

        if self.delete {
            let (class, label) = if row.delete_armed {
                ("button danger armed", "Confirm delete")
            } else {
                ("button danger", "Delete")
            };
            html.push_str(&format!(
                "<form method=\"post\" action=\"{}/{}/delete\"><button class=\"{}\" type=\"submit\">{}</button></form>",
                base, row.id, class, label
            ));
            if row.delete_armed {
                html.push_str(&format!(
                    "<form method=\"post\" action=\"{}/delete/cancel\"><button type=\"submit\">Cancel</button></form>",
                    base
                ));
            }
        }
        html
    }
}
