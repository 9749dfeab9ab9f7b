//! A minimal form surface for rendering mapped fields.
//!
//! [`DojoForm`] holds an ordered list of field definitions plus initial
//! values and an optional prefix. It only constructs and renders — binding
//! submitted data and validating it stay with the hosting framework. Widget
//! attribute bags are computed on every render call and never cached.

use std::collections::HashMap;

use dijit_forms_core::{DojoConfig, ModuleCollector};
use dijit_forms_model::Value;

use crate::fields::FormFieldDef;

/// An ordered collection of form fields, renderable as toolkit markup.
#[derive(Debug, Clone, Default)]
pub struct DojoForm {
    fields: Vec<FormFieldDef>,
    initial: HashMap<String, Value>,
    prefix: Option<String>,
}

impl DojoForm {
    /// Creates a form over the given field definitions.
    pub fn new(fields: Vec<FormFieldDef>) -> Self {
        Self {
            fields,
            initial: HashMap::new(),
            prefix: None,
        }
    }

    /// Sets initial values keyed by field name.
    #[must_use]
    pub fn with_initial(mut self, initial: HashMap<String, Value>) -> Self {
        self.initial = initial;
        self
    }

    /// Sets the form prefix (namespacing multiple forms on one page).
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Returns the form's field definitions in render order.
    pub fn fields(&self) -> &[FormFieldDef] {
        &self.fields
    }

    /// Returns the form prefix, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Appends a field after all existing fields.
    pub fn push_field(&mut self, field: FormFieldDef) {
        self.fields.push(field);
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&FormFieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Removes a field by name, returning it if it was present.
    pub fn remove_field(&mut self, name: &str) -> Option<FormFieldDef> {
        let index = self.fields.iter().position(|f| f.name == name)?;
        Some(self.fields.remove(index))
    }

    /// The HTML name attribute for a field, prefix-aware.
    pub fn html_name(&self, field_name: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}-{field_name}"),
            None => field_name.to_string(),
        }
    }

    /// The HTML id attribute for a field.
    pub fn html_id(&self, field_name: &str) -> String {
        format!("id_{}", self.html_name(field_name))
    }

    /// Renders one field's widget, forwarding the field's validation
    /// attributes into the widget's attribute bag.
    pub fn render_field(
        &self,
        field: &FormFieldDef,
        config: &DojoConfig,
        collector: &mut ModuleCollector,
    ) -> String {
        let value = self.initial.get(&field.name).or(field.initial.as_ref());
        let extra = field.extra_field_attrs();
        field.widget_instance().render(
            &self.html_name(&field.name),
            value,
            Some(&extra),
            config,
            collector,
        )
    }

    /// Renders a label tag for a field.
    pub fn label_tag(&self, field: &FormFieldDef) -> String {
        format!(
            r#"<label for="{}">{}</label>"#,
            self.html_id(&field.name),
            field.label
        )
    }

    /// Renders the whole form body: one row per field, hidden fields bare.
    pub fn render(&self, config: &DojoConfig, collector: &mut ModuleCollector) -> String {
        let mut html = String::new();
        for field in &self.fields {
            let widget_html = self.render_field(field, config, collector);
            if field.widget.is_hidden() {
                html.push_str(&widget_html);
                continue;
            }
            html.push_str("<p>");
            html.push_str(&self.label_tag(field));
            html.push(' ');
            html.push_str(&widget_html);
            if !field.help_text.is_empty() {
                html.push_str(&format!(
                    r#" <span class="helptext">{}</span>"#,
                    field.help_text
                ));
            }
            html.push_str("</p>");
        }
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FormFieldKind;
    use crate::widgets::DojoWidgetKind;

    fn make_form() -> DojoForm {
        DojoForm::new(vec![
            FormFieldDef::new("title", FormFieldKind::Char).max_length(100),
            FormFieldDef::new("published", FormFieldKind::Date),
        ])
    }

    #[test]
    fn test_html_name_without_prefix() {
        let form = make_form();
        assert_eq!(form.html_name("title"), "title");
        assert_eq!(form.html_id("title"), "id_title");
    }

    #[test]
    fn test_html_name_with_prefix() {
        let form = make_form().with_prefix("article");
        assert_eq!(form.html_name("title"), "article-title");
        assert_eq!(form.html_id("title"), "id_article-title");
    }

    #[test]
    fn test_render_field_mixes_attrs() {
        let form = make_form();
        let mut collector = ModuleCollector::new();
        let html = form.render_field(
            form.field("title").unwrap(),
            &DojoConfig::default(),
            &mut collector,
        );
        assert!(html.contains(r#"dojoType="dijit.form.ValidationTextBox""#));
        assert!(html.contains(r#"maxlength="100""#));
        assert!(html.contains(r#"required="true""#));
    }

    #[test]
    fn test_render_uses_initial_value() {
        let mut initial = HashMap::new();
        initial.insert("title".to_string(), Value::from("Hello"));
        let form = make_form().with_initial(initial);
        let mut collector = ModuleCollector::new();
        let html = form.render_field(
            form.field("title").unwrap(),
            &DojoConfig::default(),
            &mut collector,
        );
        assert!(html.contains(r#"value="Hello""#));
    }

    #[test]
    fn test_render_collects_modules_in_field_order() {
        let form = make_form();
        let mut collector = ModuleCollector::new();
        form.render(&DojoConfig::default(), &mut collector);
        assert_eq!(
            collector.modules(),
            &[
                "dijit.form.ValidationTextBox".to_string(),
                "dijit.form.DateTextBox".to_string(),
            ]
        );
    }

    #[test]
    fn test_render_twice_is_stable() {
        let form = make_form();
        let config = DojoConfig::default();
        let mut collector = ModuleCollector::new();
        let first = form.render(&config, &mut collector);
        let second = form.render(&config, &mut collector);
        assert_eq!(first, second);
        // modules registered once despite two renders
        assert_eq!(collector.len(), 2);
    }

    #[test]
    fn test_hidden_fields_render_bare() {
        let mut form = make_form();
        form.push_field(
            FormFieldDef::new("token", FormFieldKind::Char).widget(DojoWidgetKind::HiddenInput),
        );
        let mut collector = ModuleCollector::new();
        let html = form.render(&DojoConfig::default(), &mut collector);
        assert!(html.contains(r#"type="hidden""#));
        assert!(!html.contains(r#"<label for="id_token""#));
    }

    #[test]
    fn test_push_field_appends_last() {
        let mut form = make_form();
        form.push_field(FormFieldDef::new("id", FormFieldKind::ModelChoice));
        assert_eq!(form.fields().last().unwrap().name, "id");
    }
}
