//! Form field definitions.
//!
//! [`FormFieldDef`] describes a user-input-facing field: its kind, widget,
//! and the validation metadata it forwards into widget attributes at render
//! time via [`FormFieldDef::extra_field_attrs`]. Validation itself belongs
//! to the hosting framework; this layer only carries the metadata through to
//! the client toolkit.

use dijit_forms_model::Value;

use crate::widgets::{DojoWidgetKind, ExtraFieldAttrs, FieldAttr};

/// The client-side pattern slug fields validate against.
pub const SLUG_JS_REGEX: &str = "^[-\\w]+$";

/// The kind of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFieldKind {
    /// A character (string) field.
    Char,
    /// An integer field.
    Integer,
    /// A floating-point field.
    Float,
    /// A fixed-precision decimal field.
    Decimal,
    /// A boolean field.
    Boolean,
    /// A nullable boolean field (yes/no/unknown).
    NullBoolean,
    /// A date field.
    Date,
    /// A combined date-time field.
    DateTime,
    /// A time field.
    Time,
    /// An email address field.
    Email,
    /// A URL field.
    Url,
    /// A slug field (letters, numbers, hyphens, underscores).
    Slug,
    /// An IP address field.
    IpAddress,
    /// A file-system path selected from a fixed listing.
    FilePath,
    /// A file upload field.
    File,
    /// An image upload field.
    Image,
    /// A single-choice field.
    Choice,
    /// A single-choice field whose value is coerced by the framework.
    TypedChoice,
    /// A multiple-choice field.
    MultipleChoice,
    /// A field validated against a regular expression.
    Regex,
    /// A single choice drawn from model instances.
    ModelChoice,
    /// Multiple choices drawn from model instances.
    ModelMultipleChoice,
}

/// Returns the Dijit default widget for a form field kind.
pub const fn default_widget_for_kind(kind: FormFieldKind) -> DojoWidgetKind {
    match kind {
        FormFieldKind::Char | FormFieldKind::Slug | FormFieldKind::Regex => {
            DojoWidgetKind::ValidationTextInput
        }
        FormFieldKind::Integer | FormFieldKind::Float | FormFieldKind::Decimal => {
            DojoWidgetKind::NumberTextInput
        }
        FormFieldKind::Boolean => DojoWidgetKind::CheckboxInput,
        FormFieldKind::NullBoolean => DojoWidgetKind::NullBooleanSelect,
        FormFieldKind::Date => DojoWidgetKind::DateInput,
        FormFieldKind::DateTime => DojoWidgetKind::DateTimeInput,
        FormFieldKind::Time => DojoWidgetKind::TimeInput,
        FormFieldKind::Email => DojoWidgetKind::EmailTextInput,
        FormFieldKind::Url => DojoWidgetKind::UrlTextInput,
        FormFieldKind::IpAddress => DojoWidgetKind::IpAddressTextInput,
        FormFieldKind::FilePath
        | FormFieldKind::Choice
        | FormFieldKind::TypedChoice
        | FormFieldKind::ModelChoice => DojoWidgetKind::Select,
        FormFieldKind::File | FormFieldKind::Image => DojoWidgetKind::FileInput,
        FormFieldKind::MultipleChoice | FormFieldKind::ModelMultipleChoice => {
            DojoWidgetKind::SelectMultiple
        }
    }
}

/// Complete definition of a form field.
#[derive(Debug, Clone)]
pub struct FormFieldDef {
    /// The field name (HTML name attribute).
    pub name: String,
    /// The field kind.
    pub kind: FormFieldKind,
    /// Whether this field is required.
    pub required: bool,
    /// Human-readable label.
    pub label: String,
    /// Help text, forwarded as the widget's prompt message.
    pub help_text: String,
    /// Default/initial value.
    pub initial: Option<Value>,
    /// Maximum character length.
    pub max_length: Option<usize>,
    /// Lower value bound.
    pub min_value: Option<Value>,
    /// Upper value bound.
    pub max_value: Option<Value>,
    /// Digits after the decimal point.
    pub decimal_places: Option<u32>,
    /// Client-side validation regex.
    pub js_regex: Option<String>,
    /// Whether the field accepts multiple values.
    pub multiple: bool,
    /// Choices for option-presenting fields, as (value, label) pairs.
    pub choices: Vec<(String, String)>,
    /// The widget kind used for rendering.
    pub widget: DojoWidgetKind,
    /// Overrides the computed extra-attribute bundle when set. The field
    /// mapper uses this for choice fields, which forward exactly
    /// required/help_text.
    pub extra_attrs: Option<ExtraFieldAttrs>,
}

impl FormFieldDef {
    /// Creates a new `FormFieldDef` with the Dijit default widget for its
    /// kind.
    pub fn new(name: impl Into<String>, kind: FormFieldKind) -> Self {
        let name = name.into();
        let label = name.replace('_', " ");
        let js_regex = match kind {
            FormFieldKind::Slug => Some(SLUG_JS_REGEX.to_string()),
            _ => None,
        };
        let multiple = matches!(
            kind,
            FormFieldKind::MultipleChoice | FormFieldKind::ModelMultipleChoice
        );
        Self {
            name,
            kind,
            required: true,
            label,
            help_text: String::new(),
            initial: None,
            max_length: None,
            min_value: None,
            max_value: None,
            decimal_places: None,
            js_regex,
            multiple,
            choices: Vec::new(),
            widget: default_widget_for_kind(kind),
            extra_attrs: None,
        }
    }

    /// Sets whether this field is required.
    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the help text.
    #[must_use]
    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = text.into();
        self
    }

    /// Sets the initial value.
    #[must_use]
    pub fn initial(mut self, value: impl Into<Value>) -> Self {
        self.initial = Some(value.into());
        self
    }

    /// Sets the maximum character length.
    #[must_use]
    pub const fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Sets the lower value bound.
    #[must_use]
    pub fn min_value(mut self, value: impl Into<Value>) -> Self {
        self.min_value = Some(value.into());
        self
    }

    /// Sets the upper value bound.
    #[must_use]
    pub fn max_value(mut self, value: impl Into<Value>) -> Self {
        self.max_value = Some(value.into());
        self
    }

    /// Sets the decimal precision.
    #[must_use]
    pub const fn decimal_places(mut self, places: u32) -> Self {
        self.decimal_places = Some(places);
        self
    }

    /// Sets the client-side validation regex.
    #[must_use]
    pub fn js_regex(mut self, pattern: impl Into<String>) -> Self {
        self.js_regex = Some(pattern.into());
        self
    }

    /// Sets the choices.
    #[must_use]
    pub fn choices(mut self, choices: Vec<(String, String)>) -> Self {
        self.choices = choices;
        self
    }

    /// Sets the widget kind.
    #[must_use]
    pub const fn widget(mut self, widget: DojoWidgetKind) -> Self {
        self.widget = widget;
        self
    }

    /// Replaces the computed extra-attribute bundle.
    #[must_use]
    pub fn extra_attrs(mut self, extra: ExtraFieldAttrs) -> Self {
        self.extra_attrs = Some(extra);
        self
    }

    /// The validation metadata this field forwards into its widget's
    /// attributes at render time.
    ///
    /// When the field mapper attached an explicit bundle (choice fields),
    /// that bundle is forwarded verbatim; otherwise the bundle is derived
    /// from the field's own metadata. Widgets admit only their allow-listed
    /// subset.
    pub fn extra_field_attrs(&self) -> ExtraFieldAttrs {
        if let Some(overridden) = &self.extra_attrs {
            return overridden.clone();
        }
        let mut extra = ExtraFieldAttrs::new();
        extra.set(FieldAttr::Required, self.required);
        if !self.help_text.is_empty() {
            extra.set(FieldAttr::HelpText, self.help_text.clone());
        }
        if let Some(min) = &self.min_value {
            extra.set(FieldAttr::MinValue, min.clone());
        }
        if let Some(max) = &self.max_value {
            extra.set(FieldAttr::MaxValue, max.clone());
        }
        if let Some(len) = self.max_length {
            extra.set(FieldAttr::MaxLength, len as i64);
        }
        if let Some(places) = self.decimal_places {
            extra.set(FieldAttr::DecimalPlaces, i64::from(places));
        }
        if let Some(pattern) = &self.js_regex {
            extra.set(FieldAttr::JsRegex, pattern.clone());
        }
        if self.multiple {
            extra.set(FieldAttr::Multiple, true);
        }
        extra
    }

    /// Instantiates this field's widget, carrying the field's choices when
    /// the widget presents options.
    pub fn widget_instance(&self) -> crate::widgets::DojoWidget {
        let widget = crate::widgets::DojoWidget::new(self.widget);
        if self.widget.is_choice_widget() {
            widget.with_choices(self.choices.clone())
        } else {
            widget
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dijit_forms_core::{DojoConfig, ModuleCollector};

    #[test]
    fn test_new_defaults() {
        let f = FormFieldDef::new("first_name", FormFieldKind::Char);
        assert!(f.required);
        assert_eq!(f.label, "first name");
        assert_eq!(f.widget, DojoWidgetKind::ValidationTextInput);
        assert!(!f.multiple);
    }

    #[test]
    fn test_default_widgets() {
        assert_eq!(
            default_widget_for_kind(FormFieldKind::Email),
            DojoWidgetKind::EmailTextInput
        );
        assert_eq!(
            default_widget_for_kind(FormFieldKind::Integer),
            DojoWidgetKind::NumberTextInput
        );
        assert_eq!(
            default_widget_for_kind(FormFieldKind::Date),
            DojoWidgetKind::DateInput
        );
        assert_eq!(
            default_widget_for_kind(FormFieldKind::ModelMultipleChoice),
            DojoWidgetKind::SelectMultiple
        );
        assert_eq!(
            default_widget_for_kind(FormFieldKind::Boolean),
            DojoWidgetKind::CheckboxInput
        );
    }

    #[test]
    fn test_slug_field_carries_regex() {
        let f = FormFieldDef::new("slug", FormFieldKind::Slug);
        assert_eq!(f.js_regex.as_deref(), Some(SLUG_JS_REGEX));
        let extra = f.extra_field_attrs();
        assert_eq!(
            extra.get(FieldAttr::JsRegex),
            Some(&Value::String(SLUG_JS_REGEX.to_string()))
        );
    }

    #[test]
    fn test_slug_regex_is_valid() {
        // the pattern must also be a valid server-side regex
        let re = regex::Regex::new(SLUG_JS_REGEX).unwrap();
        assert!(re.is_match("a-slug_42"));
        assert!(!re.is_match("no spaces"));
    }

    #[test]
    fn test_multiple_choice_defaults_multiple() {
        let f = FormFieldDef::new("tags", FormFieldKind::MultipleChoice);
        assert!(f.multiple);
        let extra = f.extra_field_attrs();
        assert_eq!(extra.get(FieldAttr::Multiple), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_extra_field_attrs_bundle() {
        let f = FormFieldDef::new("quantity", FormFieldKind::Integer)
            .help_text("How many?")
            .min_value(1_i64)
            .max_value(99_i64);
        let extra = f.extra_field_attrs();
        assert_eq!(extra.get(FieldAttr::Required), Some(&Value::Bool(true)));
        assert_eq!(
            extra.get(FieldAttr::HelpText),
            Some(&Value::String("How many?".to_string()))
        );
        assert_eq!(extra.get(FieldAttr::MinValue), Some(&Value::Int(1)));
        assert_eq!(extra.get(FieldAttr::MaxValue), Some(&Value::Int(99)));
        assert!(extra.get(FieldAttr::MaxLength).is_none());
    }

    #[test]
    fn test_extra_attrs_override_wins() {
        let bundle = ExtraFieldAttrs::new()
            .with(FieldAttr::Required, false)
            .with(FieldAttr::HelpText, "choose wisely");
        let f = FormFieldDef::new("status", FormFieldKind::TypedChoice)
            .max_length(10)
            .extra_attrs(bundle.clone());
        assert_eq!(f.extra_field_attrs(), bundle);
    }

    #[test]
    fn test_widget_instance_carries_choices() {
        let f = FormFieldDef::new("status", FormFieldKind::Choice).choices(vec![(
            "d".to_string(),
            "Draft".to_string(),
        )]);
        let mut collector = ModuleCollector::new();
        let html = f.widget_instance().render(
            "status",
            None,
            None,
            &DojoConfig::default(),
            &mut collector,
        );
        assert!(html.contains("Draft"));
    }
}
