//! The Dijit widget layer.
//!
//! Every widget kind is a [`DojoWidgetKind`] variant carrying a descriptor:
//! its client-side module (`dojoType`), version-dependent module fallbacks,
//! the allow-list of field attributes it accepts ([`valid_extra_attrs`]),
//! and its overrides to the default field-attribute map. A [`DojoWidget`]
//! instance combines a kind with author-supplied attributes and choices, and
//! knows how to build its render-time attribute bag and render toolkit
//! markup.
//!
//! Attribute computation is the core contract: gather the widget's own
//! attributes, set `dojoType`, report required modules to the collector, mix
//! the allow-listed validation attributes into the bag through the attribute
//! map, and tokenize booleans. Missing attributes and unmapped concerns are
//! skipped silently.
//!
//! [`valid_extra_attrs`]: DojoWidgetKind::valid_extra_attrs

use std::collections::BTreeMap;

use dijit_forms_core::{DojoConfig, DojoVersion, ModuleCollector};
use dijit_forms_model::Value;
use serde_json::Value as JsonValue;

use crate::attrs::{
    encode_bool_attrs, flatatt, mixin_attr, stamp_value, AttrBag, TemporalStyle,
};

/// The validation concerns a form field can forward to its widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldAttr {
    /// Whether the field must be filled in.
    Required,
    /// The field's help text (rendered as the widget's prompt message).
    HelpText,
    /// Lower value bound.
    MinValue,
    /// Upper value bound.
    MaxValue,
    /// Maximum character length.
    MaxLength,
    /// Digits after the decimal point.
    DecimalPlaces,
    /// Client-side validation regex.
    JsRegex,
    /// Whether the widget accepts multiple values.
    Multiple,
}

/// The default mapping of field attributes to widget attribute paths.
///
/// Dot-separated paths become nested structures in the attribute bag.
/// Individual widget kinds may override entries via
/// [`DojoWidgetKind::attr_overrides`].
pub const fn default_attr_path(attr: FieldAttr) -> &'static str {
    match attr {
        FieldAttr::Required => "required",
        FieldAttr::HelpText => "promptMessage",
        FieldAttr::MinValue => "constraints.min",
        FieldAttr::MaxValue => "constraints.max",
        FieldAttr::MaxLength => "maxlength",
        FieldAttr::DecimalPlaces => "constraints.places",
        FieldAttr::JsRegex => "regExp",
        FieldAttr::Multiple => "multiple",
    }
}

/// Validation metadata carried from a form field into widget rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtraFieldAttrs {
    entries: BTreeMap<FieldAttr, Value>,
}

impl ExtraFieldAttrs {
    /// Creates an empty attribute bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a concern's value, replacing any previous one.
    pub fn set(&mut self, attr: FieldAttr, value: impl Into<Value>) -> &mut Self {
        self.entries.insert(attr, value.into());
        self
    }

    /// Builder form of [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, attr: FieldAttr, value: impl Into<Value>) -> Self {
        self.entries.insert(attr, value.into());
        self
    }

    /// Looks up a concern's value.
    pub fn get(&self, attr: FieldAttr) -> Option<&Value> {
        self.entries.get(&attr)
    }

    /// Iterates over the carried concerns.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldAttr, &Value)> {
        self.entries.iter()
    }

    /// Returns the number of carried concerns.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no concerns are carried.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Enumerates the Dijit widget kinds.
///
/// Each variant is a rendering strategy backed by a client-side module; the
/// descriptor methods below replace the per-class attributes a subclass
/// hierarchy would carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DojoWidgetKind {
    /// `dijit.form.TextBox`.
    TextInput,
    /// `dijit.form.TextBox` rendered as a password input.
    PasswordInput,
    /// Hidden input; still typed so `dijit.form.Form` can collect its value.
    HiddenInput,
    /// `dijit.form.Textarea`.
    Textarea,
    /// `dijit.form.DateTextBox`.
    DateInput,
    /// `dijit.form.TimeTextBox`.
    TimeInput,
    /// `dijit.form.DateTextBox` carrying a full date-time stamp.
    DateTimeInput,
    /// `dijit.form.CheckBox`.
    CheckboxInput,
    /// `dijit.form.FilteringSelect`.
    Select,
    /// `dijit.form.FilteringSelect` over yes/no/unknown.
    NullBooleanSelect,
    /// `dijit.form.MultiSelect`.
    SelectMultiple,
    /// A group of `dijit.form.RadioButton` inputs.
    RadioSelect,
    /// A group of `dijit.form.CheckBox` inputs.
    CheckboxSelectMultiple,
    /// `dojox.form.FileInput`.
    FileInput,
    /// `dijit.Editor`, rendered in a `<div>`.
    EditorInput,
    /// `dijit.form.HorizontalSlider`.
    HorizontalSliderInput,
    /// `dijit.form.VerticalSlider`.
    VerticalSliderInput,
    /// `dijit.form.ValidationTextBox`.
    ValidationTextInput,
    /// `dijit.form.ValidationTextBox` rendered as a password input.
    ValidationPasswordInput,
    /// Validation text box wired to the email regex generator.
    EmailTextInput,
    /// Validation text box wired to the IP address regex generator.
    IpAddressTextInput,
    /// Validation text box wired to the URL regex generator.
    UrlTextInput,
    /// `dijit.form.NumberTextBox`.
    NumberTextInput,
    /// `dijit.form.RangeBoundTextBox`.
    RangeBoundTextInput,
    /// `dijit.form.NumberSpinner`.
    NumberSpinnerInput,
    /// `dojox.form.Rating`.
    RatingInput,
    /// `dojox.form.DateTextBox` (animated calendar).
    DateInputAnim,
    /// `dojox.form.DropDownSelect`.
    DropDownSelect,
    /// `dojox.form.CheckedMultiSelect`.
    CheckedMultiSelect,
}

impl DojoWidgetKind {
    /// The `dojoType` markup attribute, which doubles as the widget's
    /// default required module.
    pub const fn dojo_type(self) -> Option<&'static str> {
        match self {
            // hidden inputs keep a dojoType so dijit.form.Form collects them
            Self::TextInput | Self::PasswordInput | Self::HiddenInput => {
                Some("dijit.form.TextBox")
            }
            Self::Textarea => Some("dijit.form.Textarea"),
            Self::DateInput | Self::DateTimeInput => Some("dijit.form.DateTextBox"),
            Self::TimeInput => Some("dijit.form.TimeTextBox"),
            Self::CheckboxInput | Self::CheckboxSelectMultiple => Some("dijit.form.CheckBox"),
            Self::Select | Self::NullBooleanSelect => Some("dijit.form.FilteringSelect"),
            Self::SelectMultiple => Some("dijit.form.MultiSelect"),
            Self::RadioSelect => Some("dijit.form.RadioButton"),
            Self::FileInput => Some("dojox.form.FileInput"),
            Self::EditorInput => Some("dijit.Editor"),
            Self::HorizontalSliderInput => Some("dijit.form.HorizontalSlider"),
            Self::VerticalSliderInput => Some("dijit.form.VerticalSlider"),
            Self::ValidationTextInput
            | Self::ValidationPasswordInput
            | Self::EmailTextInput
            | Self::IpAddressTextInput
            | Self::UrlTextInput => Some("dijit.form.ValidationTextBox"),
            Self::NumberTextInput => Some("dijit.form.NumberTextBox"),
            Self::RangeBoundTextInput => Some("dijit.form.RangeBoundTextBox"),
            Self::NumberSpinnerInput => Some("dijit.form.NumberSpinner"),
            Self::RatingInput => Some("dojox.form.Rating"),
            Self::DateInputAnim => Some("dojox.form.DateTextBox"),
            Self::DropDownSelect => Some("dojox.form.DropDownSelect"),
            Self::CheckedMultiSelect => Some("dojox.form.CheckedMultiSelect"),
        }
    }

    /// Alternative module requirement, used instead of [`dojo_type`] when
    /// the configured release predates the widget's own module.
    ///
    /// [`dojo_type`]: Self::dojo_type
    pub fn alt_require(self, version: DojoVersion) -> Option<&'static str> {
        if version >= DojoVersion::new(1, 3, 0) {
            return None;
        }
        match self {
            Self::RadioSelect => Some("dijit.form.CheckBox"),
            Self::HorizontalSliderInput | Self::VerticalSliderInput => {
                Some("dijit.form.Slider")
            }
            _ => None,
        }
    }

    /// Additional client-side modules this widget needs loaded.
    pub const fn extra_requires(self) -> &'static [&'static str] {
        match self {
            Self::EmailTextInput | Self::IpAddressTextInput | Self::UrlTextInput => {
                &["dojox.validate.regexp"]
            }
            _ => &[],
        }
    }

    /// The client-side regex generator function for validation text boxes.
    pub fn regexp_gen(self, version: DojoVersion) -> Option<&'static str> {
        let legacy = version < DojoVersion::new(1, 3, 0);
        match self {
            Self::EmailTextInput => Some(if legacy {
                "dojox.regexp.emailAddress"
            } else {
                "dojox.validate.regexp.emailAddress"
            }),
            Self::IpAddressTextInput => Some(if legacy {
                "dojox.regexp.ipAddress"
            } else {
                "dojox.validate.regexp.ipAddress"
            }),
            Self::UrlTextInput => Some(if legacy {
                "dojox.regexp.url"
            } else {
                "dojox.validate.regexp.url"
            }),
            _ => None,
        }
    }

    /// The field attributes this widget accepts into its attribute bag.
    pub const fn valid_extra_attrs(self) -> &'static [FieldAttr] {
        match self {
            Self::TextInput | Self::PasswordInput => &[FieldAttr::MaxLength],
            Self::DateInput | Self::TimeInput | Self::DateTimeInput | Self::DateInputAnim => &[
                FieldAttr::Required,
                FieldAttr::HelpText,
                FieldAttr::MinValue,
                FieldAttr::MaxValue,
            ],
            Self::Select | Self::DropDownSelect | Self::CheckedMultiSelect => {
                &[FieldAttr::Required, FieldAttr::HelpText]
            }
            Self::ValidationTextInput
            | Self::ValidationPasswordInput
            | Self::EmailTextInput
            | Self::IpAddressTextInput
            | Self::UrlTextInput => &[
                FieldAttr::Required,
                FieldAttr::HelpText,
                FieldAttr::JsRegex,
                FieldAttr::MaxLength,
            ],
            Self::NumberTextInput | Self::RangeBoundTextInput | Self::NumberSpinnerInput => &[
                FieldAttr::MinValue,
                FieldAttr::MaxValue,
                FieldAttr::Required,
                FieldAttr::HelpText,
                FieldAttr::DecimalPlaces,
            ],
            Self::RatingInput => &[FieldAttr::MaxValue],
            _ => &[],
        }
    }

    /// Per-kind overrides to the default field-attribute map.
    pub const fn attr_overrides(self) -> &'static [(FieldAttr, &'static str)] {
        match self {
            Self::RatingInput => &[(FieldAttr::MaxValue, "numStars")],
            _ => &[],
        }
    }

    /// How temporal values are stamped into this widget's attributes.
    pub const fn temporal_style(self) -> TemporalStyle {
        match self {
            Self::DateInput | Self::DateInputAnim => TemporalStyle::DateOnly,
            Self::TimeInput => TemporalStyle::TimeOnly,
            _ => TemporalStyle::DateTime,
        }
    }

    /// Returns `true` for widgets that present a list of options.
    pub const fn is_choice_widget(self) -> bool {
        matches!(
            self,
            Self::Select
                | Self::NullBooleanSelect
                | Self::SelectMultiple
                | Self::RadioSelect
                | Self::CheckboxSelectMultiple
                | Self::DropDownSelect
                | Self::CheckedMultiSelect
        )
    }

    /// Returns `true` for widgets rendered as hidden inputs.
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::HiddenInput)
    }

    /// Stylesheets this widget needs, relative to the configured base URL.
    pub fn css_resources(self, config: &DojoConfig) -> Vec<String> {
        let paths: &[&str] = match self {
            Self::FileInput => &["dojox/form/resources/FileInput.css"],
            Self::RatingInput => &["dojox/form/resources/Rating.css"],
            Self::DateInputAnim => &["dojox/widget/Calendar/Calendar.css"],
            Self::DropDownSelect => &["dojox/form/resources/DropDownSelect.css"],
            Self::CheckedMultiSelect => &["dojox/form/resources/CheckedMultiSelect.css"],
            _ => &[],
        };
        paths
            .iter()
            .map(|p| format!("{}/{p}", config.base_url))
            .collect()
    }

    const fn html_input_type(self) -> Option<&'static str> {
        match self {
            Self::PasswordInput | Self::ValidationPasswordInput => Some("password"),
            Self::HiddenInput => Some("hidden"),
            Self::FileInput => Some("file"),
            Self::CheckboxInput => Some("checkbox"),
            Self::TextInput
            | Self::DateInput
            | Self::DateTimeInput
            | Self::TimeInput
            | Self::HorizontalSliderInput
            | Self::VerticalSliderInput
            | Self::ValidationTextInput
            | Self::EmailTextInput
            | Self::IpAddressTextInput
            | Self::UrlTextInput
            | Self::NumberTextInput
            | Self::RangeBoundTextInput
            | Self::NumberSpinnerInput
            | Self::RatingInput
            | Self::DateInputAnim => Some("text"),
            _ => None,
        }
    }
}

/// A widget instance: a kind plus author-supplied attributes and choices.
#[derive(Debug, Clone, Default)]
pub struct DojoWidget {
    /// The widget kind.
    pub kind: DojoWidgetKind,
    /// Author-supplied attributes, merged into every render.
    pub attrs: AttrBag,
    /// Choices for option-presenting widgets, as (value, label) pairs.
    pub choices: Vec<(String, String)>,
}

impl Default for DojoWidgetKind {
    fn default() -> Self {
        Self::TextInput
    }
}

impl DojoWidget {
    /// Creates a widget of the given kind with no extra attributes.
    pub fn new(kind: DojoWidgetKind) -> Self {
        Self {
            kind,
            attrs: AttrBag::new(),
            choices: Vec::new(),
        }
    }

    /// Adds an author-supplied attribute.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Sets the choices for an option-presenting widget.
    #[must_use]
    pub fn with_choices(mut self, choices: Vec<(String, String)>) -> Self {
        self.choices = choices;
        self
    }

    /// Computes this widget's render-time attribute bag.
    ///
    /// Gathers the author attributes, assigns `dojoType`, registers the
    /// widget's client modules with the collector, mixes in the allow-listed
    /// validation attributes from `extra` through the attribute map, and
    /// tokenizes booleans. Missing concerns and unmapped entries are
    /// skipped; this never fails.
    pub fn build_attrs(
        &self,
        config: &DojoConfig,
        collector: &mut ModuleCollector,
        extra: Option<&ExtraFieldAttrs>,
    ) -> AttrBag {
        let mut attrs = self.attrs.clone();

        if let Some(dojo_type) = self.kind.dojo_type() {
            attrs.insert(
                "dojoType".to_string(),
                JsonValue::String(dojo_type.to_string()),
            );
        }

        if let Some(alt) = self.kind.alt_require(config.version) {
            collector.add(alt);
        } else if let Some(dojo_type) = self.kind.dojo_type() {
            collector.add(dojo_type);
        }
        for module in self.kind.extra_requires() {
            collector.add(*module);
        }

        if let Some(generator) = self.kind.regexp_gen(config.version) {
            attrs
                .entry("regExpGen")
                .or_insert_with(|| JsonValue::String(generator.to_string()));
        }

        if let Some(extra) = extra {
            for attr in self.kind.valid_extra_attrs() {
                let Some(value) = extra.get(*attr) else {
                    continue;
                };
                if value.is_null() {
                    continue;
                }
                let path = self
                    .kind
                    .attr_overrides()
                    .iter()
                    .find(|(a, _)| a == attr)
                    .map_or_else(|| default_attr_path(*attr), |(_, p)| *p);
                mixin_attr(
                    &mut attrs,
                    path,
                    stamp_value(value, self.kind.temporal_style()),
                );
            }
        }

        encode_bool_attrs(&mut attrs);
        attrs
    }

    /// Renders the widget as toolkit markup.
    pub fn render(
        &self,
        name: &str,
        value: Option<&Value>,
        extra: Option<&ExtraFieldAttrs>,
        config: &DojoConfig,
        collector: &mut ModuleCollector,
    ) -> String {
        let attrs = self.build_attrs(config, collector, extra);
        let attr_str = flatatt(&attrs);
        let val = self.format_value(value);

        if self.kind.is_choice_widget() {
            return self.render_choices(name, value, &attr_str);
        }

        match self.kind {
            DojoWidgetKind::Textarea => {
                let body = val.unwrap_or_default();
                format!(r#"<textarea name="{name}"{attr_str}>{body}</textarea>"#)
            }
            DojoWidgetKind::EditorInput => {
                // dijit.Editor attaches to a div, not a form control
                let body = val.unwrap_or_default();
                format!(r#"<div name="{name}"{attr_str}>{body}</div>"#)
            }
            DojoWidgetKind::CheckboxInput => {
                let checked = if is_truthy(value) { " checked" } else { "" };
                format!(r#"<input type="checkbox" name="{name}"{checked}{attr_str} />"#)
            }
            DojoWidgetKind::FileInput => {
                // file inputs never echo a value back
                format!(r#"<input type="file" name="{name}"{attr_str} />"#)
            }
            DojoWidgetKind::PasswordInput | DojoWidgetKind::ValidationPasswordInput => {
                format!(r#"<input type="password" name="{name}" value=""{attr_str} />"#)
            }
            _ => {
                let input_type = self.kind.html_input_type().unwrap_or("text");
                let val = val.unwrap_or_default();
                format!(r#"<input type="{input_type}" name="{name}" value="{val}"{attr_str} />"#)
            }
        }
    }

    fn render_choices(&self, name: &str, value: Option<&Value>, attr_str: &str) -> String {
        let selected = selected_values(value);
        let default_null_boolean;
        let choices: &[(String, String)] =
            if self.kind == DojoWidgetKind::NullBooleanSelect && self.choices.is_empty() {
                default_null_boolean = null_boolean_choices();
                &default_null_boolean
            } else {
                &self.choices
            };

        match self.kind {
            DojoWidgetKind::RadioSelect | DojoWidgetKind::CheckboxSelectMultiple => {
                let input_type = if self.kind == DojoWidgetKind::RadioSelect {
                    "radio"
                } else {
                    "checkbox"
                };
                let mut html = String::from("<div>");
                for (i, (val, label)) in choices.iter().enumerate() {
                    let checked = if selected.contains(val) { " checked" } else { "" };
                    let option_id = format!("id_{name}_{i}");
                    html.push_str(&format!(
                        r#"<div><input type="{input_type}" name="{name}" value="{val}" id="{option_id}"{checked}{attr_str} />"#
                    ));
                    html.push_str(&format!(
                        r#" <label for="{option_id}">{label}</label></div>"#
                    ));
                }
                html.push_str("</div>");
                html
            }
            _ => {
                let multiple = matches!(
                    self.kind,
                    DojoWidgetKind::SelectMultiple | DojoWidgetKind::CheckedMultiSelect
                );
                let multiple_attr = if multiple { " multiple" } else { "" };
                let mut options = String::new();
                for (val, label) in choices {
                    let selected_attr = if selected.contains(val) { " selected" } else { "" };
                    options.push_str(&format!(
                        r#"<option value="{val}"{selected_attr}>{label}</option>"#
                    ));
                }
                format!(r#"<select name="{name}"{multiple_attr}{attr_str}>{options}</select>"#)
            }
        }
    }

    fn format_value(&self, value: Option<&Value>) -> Option<String> {
        let value = value?;
        if value.is_null() {
            return None;
        }
        let formatted = match (self.kind.temporal_style(), value) {
            (TemporalStyle::DateOnly, Value::Date(d)) => d.format("%Y-%m-%d").to_string(),
            (TemporalStyle::DateOnly, Value::DateTime(dt)) => dt.format("%Y-%m-%d").to_string(),
            (TemporalStyle::TimeOnly, Value::Time(t)) => format!("T{}", t.format("%H:%M:%S")),
            (TemporalStyle::TimeOnly, Value::DateTime(dt)) => {
                dt.format("T%H:%M:%S").to_string()
            }
            (_, Value::DateTime(dt)) => dt.format("%Y-%m-%dT%H:%M:%S").to_string(),
            _ => value.to_string(),
        };
        Some(formatted)
    }
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => matches!(s.as_str(), "true" | "on" | "1"),
        Some(Value::Int(i)) => *i != 0,
        _ => false,
    }
}

fn selected_values(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::List(items)) => items.iter().map(ToString::to_string).collect(),
        Some(v) if !v.is_null() => vec![v.to_string()],
        _ => Vec::new(),
    }
}

fn null_boolean_choices() -> Vec<(String, String)> {
    vec![
        ("1".to_string(), "Unknown".to_string()),
        ("2".to_string(), "Yes".to_string()),
        ("3".to_string(), "No".to_string()),
    ]
}
