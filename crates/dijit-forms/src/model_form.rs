//! Model-backed form construction.
//!
//! [`generate_form_fields`] builds form fields from a model's metadata,
//! routing every field through the field mapper so model columns come out
//! wearing Dijit widgets. [`ModelFormConfig`] selects and overrides fields
//! the way the hosting framework's model-form options do.

use std::collections::HashMap;

use dijit_forms_model::{ModelFieldType, ModelMeta, Value};

use crate::fields::FormFieldDef;
use crate::form::DojoForm;
use crate::mapper::{default_form_field_for, select_form_field};
use crate::widgets::DojoWidgetKind;

/// Configuration for generating a model-backed form.
pub struct ModelFormConfig {
    /// The model metadata to generate fields from.
    pub meta: &'static ModelMeta,
    /// Which model fields to include in the form.
    pub fields: ModelFormFields,
    /// Widget overrides keyed by field name.
    pub widgets: HashMap<String, DojoWidgetKind>,
    /// Label overrides keyed by field name.
    pub labels: HashMap<String, String>,
    /// Help text overrides keyed by field name.
    pub help_texts: HashMap<String, String>,
}

/// Specifies which model fields to include in a model form.
#[derive(Debug, Clone)]
pub enum ModelFormFields {
    /// Include all editable fields.
    All,
    /// Include only the specified fields.
    Include(Vec<String>),
    /// Include all fields except the specified ones.
    Exclude(Vec<String>),
}

impl ModelFormConfig {
    /// Creates a new `ModelFormConfig` with all fields included.
    pub fn new(meta: &'static ModelMeta) -> Self {
        Self {
            meta,
            fields: ModelFormFields::All,
            widgets: HashMap::new(),
            labels: HashMap::new(),
            help_texts: HashMap::new(),
        }
    }

    /// Sets which fields to include.
    #[must_use]
    pub fn with_fields(mut self, fields: ModelFormFields) -> Self {
        self.fields = fields;
        self
    }

    /// Adds a widget override for a specific field.
    #[must_use]
    pub fn with_widget(mut self, field_name: impl Into<String>, widget: DojoWidgetKind) -> Self {
        self.widgets.insert(field_name.into(), widget);
        self
    }

    /// Adds a label override for a specific field.
    #[must_use]
    pub fn with_label(mut self, field_name: impl Into<String>, label: impl Into<String>) -> Self {
        self.labels.insert(field_name.into(), label.into());
        self
    }

    /// Adds a help text override for a specific field.
    #[must_use]
    pub fn with_help_text(
        mut self,
        field_name: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        self.help_texts.insert(field_name.into(), text.into());
        self
    }
}

/// Generates form field definitions from a model form configuration.
///
/// Every constructed field routes through the field mapper
/// ([`select_form_field`]); unmapped types fall back to the framework's
/// default construction. Auto-generated key fields and non-editable fields
/// are skipped.
pub fn generate_form_fields(config: &ModelFormConfig) -> Vec<FormFieldDef> {
    let mut form_fields = Vec::new();

    for model_field in &config.meta.fields {
        if !model_field.editable || model_field.auto_created {
            continue;
        }
        if model_field.primary_key && model_field.field_type.is_auto() {
            continue;
        }

        let field_name = model_field.name.to_string();
        match &config.fields {
            ModelFormFields::All => {}
            ModelFormFields::Include(include) => {
                if !include.contains(&field_name) {
                    continue;
                }
            }
            ModelFormFields::Exclude(exclude) => {
                if exclude.contains(&field_name) {
                    continue;
                }
            }
        }

        let mut form_field = match select_form_field(model_field) {
            Some(mapping) => {
                let mut f = FormFieldDef::new(model_field.name, mapping.form_field);
                if let Some(widget) = mapping.widget {
                    f.widget = widget;
                }
                if let Some(extra) = mapping.extra_attrs {
                    f.extra_attrs = Some(extra);
                }
                f
            }
            None => default_form_field_for(model_field),
        };

        form_field.required = !model_field.blank;
        form_field.label = capfirst(&model_field.verbose_name);
        form_field.help_text = model_field.help_text.clone();
        if form_field.max_length.is_none() {
            form_field.max_length = model_field.max_length;
        }
        if let ModelFieldType::Decimal { decimal_places, .. } = &model_field.field_type {
            form_field.decimal_places = Some(*decimal_places);
        }
        if model_field.field_type.is_positive_integer() {
            form_field.min_value = Some(Value::Int(0));
        }
        if let Some(choices) = &model_field.choices {
            form_field.choices = choices
                .iter()
                .map(|(value, label)| (value.to_string(), label.clone()))
                .collect();
        }
        if let Some(default) = &model_field.default {
            form_field.initial = Some(default.clone());
        }

        if let Some(widget) = config.widgets.get(&field_name) {
            form_field.widget = *widget;
        }
        if let Some(label) = config.labels.get(&field_name) {
            form_field.label = label.clone();
        }
        if let Some(help_text) = config.help_texts.get(&field_name) {
            form_field.help_text = help_text.clone();
        }

        form_fields.push(form_field);
    }

    form_fields
}

/// Builds a renderable form from a model form configuration.
pub fn modelform_factory(config: &ModelFormConfig) -> DojoForm {
    DojoForm::new(generate_form_fields(config))
}

fn capfirst(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}
