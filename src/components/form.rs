use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::utils::display_value;
use crate::utils::html::escape;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Email,
    Select,
    Textarea,
}

impl FieldKind {
    /// Value a field starts with when the form opens without initial data.
    pub fn empty_value(self) -> Value {
        match self {
            FieldKind::Number => Value::from(0),
            _ => Value::String(String::new()),
        }
    }

    fn input_type(self) -> &'static str {
        match self {
            FieldKind::Number => "number",
            FieldKind::Email => "email",
            _ => "text",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl ToString, label: impl Into<String>) -> Self {
        Self {
            value: value.to_string(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub options: Vec<SelectOption>,
    pub placeholder: Option<&'static str>,
}

impl FormField {
    pub fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            options: Vec::new(),
            placeholder: None,
        }
    }

    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn number(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Number)
    }

    pub fn email(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Email)
    }

    pub fn textarea(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Textarea)
    }

    pub fn select(name: &'static str, label: &'static str, options: Vec<SelectOption>) -> Self {
        Self {
            options,
            ..Self::new(name, label, FieldKind::Select)
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    /// Converts raw form input into the value submitted for this field.
    pub fn coerce(&self, raw: Option<&str>) -> Value {
        let raw = raw.unwrap_or_default();
        match self.kind {
            FieldKind::Number => number_value(raw),
            _ => Value::String(raw.to_string()),
        }
    }
}

/// Blank or unparseable input becomes 0; integral values stay integers.
fn number_value(raw: &str) -> Value {
    let Ok(number) = raw.trim().parse::<f64>() else {
        return Value::from(0);
    };
    if !number.is_finite() {
        return Value::from(0);
    }
    if number.fract() == 0.0 && number.abs() < i64::MAX as f64 {
        Value::from(number as i64)
    } else {
        Value::from(number)
    }
}

/// Create/edit form described by field descriptors.
///
/// Values are kept flat, keyed by descriptor name. A dotted name such as
/// `userDetails.email` is a plain key here: it is neither read from nor written
/// back into a nested object.
#[derive(Debug, Clone)]
pub struct FormModal {
    title: String,
    fields: Vec<FormField>,
    values: Map<String, Value>,
    editing: bool,
}

impl FormModal {
    /// Opens with every field at its empty value.
    pub fn open(title: impl Into<String>, fields: Vec<FormField>) -> Self {
        let values = fields
            .iter()
            .map(|field| (field.name.to_string(), field.kind.empty_value()))
            .collect();
        Self {
            title: title.into(),
            fields,
            values,
            editing: false,
        }
    }

    /// Opens seeded from `initial` by literal top-level key.
    pub fn open_with(title: impl Into<String>, fields: Vec<FormField>, initial: &Value) -> Self {
        let values = fields
            .iter()
            .map(|field| {
                let value = match initial.get(field.name) {
                    Some(v) if v.is_string() || v.is_number() || v.is_boolean() => v.clone(),
                    _ => field.kind.empty_value(),
                };
                (field.name.to_string(), value)
            })
            .collect();
        Self {
            title: title.into(),
            fields,
            values,
            editing: true,
        }
    }

    /// Re-opens with values the user already submitted.
    pub fn reopen(
        title: impl Into<String>,
        fields: Vec<FormField>,
        submitted: Map<String, Value>,
        editing: bool,
    ) -> Self {
        Self {
            title: title.into(),
            fields,
            values: submitted,
            editing,
        }
    }

    /// Flat object with exactly the declared names, built from raw form input.
    pub fn collect(fields: &[FormField], raw: &HashMap<String, String>) -> Map<String, Value> {
        fields
            .iter()
            .map(|field| {
                let raw_value = raw.get(field.name).map(String::as_str);
                (field.name.to_string(), field.coerce(raw_value))
            })
            .collect()
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() {
            "Update"
        } else {
            "Create"
        }
    }

    pub fn render_html(&self, action: &str, cancel_href: &str) -> String {
        let mut html = String::new();
        html.push_str("<div class=\"modal-backdrop\"><div class=\"modal\">\n");
        html.push_str(&format!(
            "<div class=\"panel-head\"><h3>{}</h3><a class=\"button\" href=\"{}\">&times;</a></div>\n",
            escape(&self.title),
            escape(cancel_href)
        ));
        html.push_str(&format!(
            "<form method=\"post\" action=\"{}\">\n",
            escape(action)
        ));

        for field in &self.fields {
            html.push_str(&self.field_html(field));
        }

        html.push_str(&format!(
            "<div class=\"form-actions\"><a class=\"button\" href=\"{}\">Cancel</a><button class=\"button primary\" type=\"submit\">{}</button></div>\n",
            escape(cancel_href),
            self.submit_label()
        ));
        html.push_str("</form>\n</div></div>\n");
        html
    }

    fn field_html(&self, field: &FormField) -> String {
        let name = escape(field.name);
        let current = display_value(self.values.get(field.name));
        let required = if field.required { " required" } else { "" };
        let marker = if field.required { " <span class=\"required\">*</span>" } else { "" };
        let placeholder = field
            .placeholder
            .map(|p| format!(" placeholder=\"{}\"", escape(p)))
            .unwrap_or_default();

        let control = match field.kind {
            FieldKind::Select => {
                let mut select = format!("<select name=\"{}\"{}>", name, required);
                select.push_str(&format!(
                    "<option value=\"\">Select {}</option>",
                    escape(field.label)
                ));
                for option in &field.options {
                    let selected = if option.value == current { " selected" } else { "" };
                    select.push_str(&format!(
                        "<option value=\"{}\"{}>{}</option>",
                        escape(&option.value),
                        selected,
                        escape(&option.label)
                    ));
                }
                select.push_str("</select>");
                select
            }
            FieldKind::Textarea => format!(
                "<textarea name=\"{}\" rows=\"3\"{}{}>{}</textarea>",
                name,
                placeholder,
                required,
                escape(&current)
            ),
            kind => {
                let step = if kind == FieldKind::Number { " step=\"0.01\"" } else { "" };
                format!(
                    "<input type=\"{}\" name=\"{}\" value=\"{}\"{}{}{}>",
                    kind.input_type(),
                    name,
                    escape(&current),
                    step,
                    placeholder,
                    required
                )
            }
        };

        format!(
            "<label>{}{}\n{}</label>\n",
            escape(field.label),
            marker,
            control
        )
    }
}
