//! The field mapper: model field types to form field kinds and widgets.
//!
//! [`FIELD_MAPPING_RULES`] is an ordered list of (predicate, form field,
//! optional widget) rules, scanned top-down; the first match wins. Ordering
//! is load-bearing: a rule whose predicate covers a whole column family
//! (character-backed, date-carrying, integer-backed, upload) must come after
//! every rule for a specific member of that family, or the specific types
//! would resolve to the family's generic mapping. The tests pin this down.
//!
//! Fields declaring `choices` are special-cased: whatever rule matched, they
//! get a choice-capable widget plus a bundle of exactly the required and
//! help-text attributes, which flows into attribute mixing at render time.

use dijit_forms_model::{ModelFieldDef, ModelFieldType};

use crate::fields::{FormFieldDef, FormFieldKind};
use crate::widgets::{DojoWidgetKind, ExtraFieldAttrs, FieldAttr};

/// One entry of the mapping table.
#[derive(Debug, Clone, Copy)]
pub struct MappingRule {
    /// Structural match against the model field type.
    pub matches: fn(&ModelFieldType) -> bool,
    /// The form field kind this rule selects.
    pub form_field: FormFieldKind,
    /// An explicit widget, when the kind's default is not wanted.
    pub widget: Option<DojoWidgetKind>,
}

const fn rule(
    matches: fn(&ModelFieldType) -> bool,
    form_field: FormFieldKind,
) -> MappingRule {
    MappingRule {
        matches,
        form_field,
        widget: None,
    }
}

const fn rule_with_widget(
    matches: fn(&ModelFieldType) -> bool,
    form_field: FormFieldKind,
    widget: DojoWidgetKind,
) -> MappingRule {
    MappingRule {
        matches,
        form_field,
        widget: Some(widget),
    }
}

fn comma_separated(t: &ModelFieldType) -> bool {
    matches!(t, ModelFieldType::CommaSeparatedInteger)
}

fn date_time(t: &ModelFieldType) -> bool {
    matches!(t, ModelFieldType::DateTime)
}

fn decimal(t: &ModelFieldType) -> bool {
    matches!(t, ModelFieldType::Decimal { .. })
}

fn email(t: &ModelFieldType) -> bool {
    matches!(t, ModelFieldType::Email)
}

fn file_path(t: &ModelFieldType) -> bool {
    matches!(t, ModelFieldType::FilePath)
}

fn float(t: &ModelFieldType) -> bool {
    matches!(t, ModelFieldType::Float)
}

fn single_relation(t: &ModelFieldType) -> bool {
    matches!(
        t,
        ModelFieldType::ForeignKey { .. } | ModelFieldType::OneToOne { .. }
    )
}

fn image(t: &ModelFieldType) -> bool {
    matches!(t, ModelFieldType::Image)
}

fn ip_address(t: &ModelFieldType) -> bool {
    matches!(t, ModelFieldType::IpAddress)
}

fn many_to_many(t: &ModelFieldType) -> bool {
    matches!(t, ModelFieldType::ManyToMany { .. })
}

fn null_boolean(t: &ModelFieldType) -> bool {
    matches!(t, ModelFieldType::NullBoolean)
}

fn boolean(t: &ModelFieldType) -> bool {
    matches!(t, ModelFieldType::Boolean)
}

fn positive_small_integer(t: &ModelFieldType) -> bool {
    matches!(t, ModelFieldType::PositiveSmallInteger)
}

fn positive_integer(t: &ModelFieldType) -> bool {
    matches!(t, ModelFieldType::PositiveInteger)
}

fn slug(t: &ModelFieldType) -> bool {
    matches!(t, ModelFieldType::Slug)
}

fn small_integer(t: &ModelFieldType) -> bool {
    matches!(t, ModelFieldType::SmallInteger)
}

fn time(t: &ModelFieldType) -> bool {
    matches!(t, ModelFieldType::Time)
}

fn url(t: &ModelFieldType) -> bool {
    matches!(t, ModelFieldType::Url)
}

fn text(t: &ModelFieldType) -> bool {
    matches!(t, ModelFieldType::Text)
}

/// The ordered model-field-to-form-field table.
///
/// Family rules (`is_date_like`, `is_file_like`, `is_integer_like`,
/// `is_char_like`) sit below the specific rules they would otherwise
/// shadow; the character-backed catch-all is last.
pub static FIELD_MAPPING_RULES: &[MappingRule] = &[
    rule(comma_separated, FormFieldKind::Char),
    rule(date_time, FormFieldKind::DateTime),
    rule(ModelFieldType::is_date_like, FormFieldKind::Date),
    rule(decimal, FormFieldKind::Decimal),
    rule(email, FormFieldKind::Email),
    rule(file_path, FormFieldKind::FilePath),
    rule(float, FormFieldKind::Float),
    rule(single_relation, FormFieldKind::ModelChoice),
    rule(image, FormFieldKind::Image),
    rule(ModelFieldType::is_file_like, FormFieldKind::File),
    rule(ip_address, FormFieldKind::IpAddress),
    rule(many_to_many, FormFieldKind::ModelMultipleChoice),
    // the original maps nullable booleans onto plain character fields
    rule(null_boolean, FormFieldKind::Char),
    rule(boolean, FormFieldKind::Boolean),
    rule(positive_small_integer, FormFieldKind::Integer),
    rule(positive_integer, FormFieldKind::Integer),
    rule(slug, FormFieldKind::Slug),
    rule(small_integer, FormFieldKind::Integer),
    rule(ModelFieldType::is_integer_like, FormFieldKind::Integer),
    rule(time, FormFieldKind::Time),
    rule(url, FormFieldKind::Url),
    rule_with_widget(text, FormFieldKind::Char, DojoWidgetKind::Textarea),
    rule(ModelFieldType::is_char_like, FormFieldKind::Char),
];

/// The result of mapping one model field.
#[derive(Debug, Clone)]
pub struct FieldMapping {
    /// The selected form field kind.
    pub form_field: FormFieldKind,
    /// The widget to use instead of the kind's default, if any.
    pub widget: Option<DojoWidgetKind>,
    /// The validation bundle choice fields forward to their widget.
    pub extra_attrs: Option<ExtraFieldAttrs>,
}

/// Selects the form field kind and widget for a model field.
///
/// Scans [`FIELD_MAPPING_RULES`] top-down and returns the first match. A
/// field declaring `choices` always maps to a coerced choice field with a
/// `Select` widget carrying exactly the required/help-text bundle — the
/// choices check wins over any rule widget. Returns `None` when no rule
/// matches, signalling the caller to fall back to the framework's default
/// field construction.
pub fn select_form_field(field: &ModelFieldDef) -> Option<FieldMapping> {
    for rule in FIELD_MAPPING_RULES {
        if !(rule.matches)(&field.field_type) {
            continue;
        }
        if field.has_choices() {
            let extra = ExtraFieldAttrs::new()
                .with(FieldAttr::Required, !field.blank)
                .with(FieldAttr::HelpText, field.help_text.clone());
            return Some(FieldMapping {
                form_field: FormFieldKind::TypedChoice,
                widget: Some(DojoWidgetKind::Select),
                extra_attrs: Some(extra),
            });
        }
        return Some(FieldMapping {
            form_field: rule.form_field,
            widget: rule.widget,
            extra_attrs: None,
        });
    }
    tracing::debug!(
        field = field.name,
        "no widget mapping rule matched; deferring to framework default"
    );
    None
}

/// The framework's default field construction, used when no mapping rule
/// matches.
pub fn default_form_field_for(field: &ModelFieldDef) -> FormFieldDef {
    let kind = match &field.field_type {
        ModelFieldType::Char
        | ModelFieldType::Text
        | ModelFieldType::CommaSeparatedInteger
        | ModelFieldType::Uuid
        | ModelFieldType::Json => FormFieldKind::Char,
        ModelFieldType::Slug => FormFieldKind::Slug,
        ModelFieldType::Email => FormFieldKind::Email,
        ModelFieldType::Url => FormFieldKind::Url,
        ModelFieldType::IpAddress => FormFieldKind::IpAddress,
        ModelFieldType::FilePath => FormFieldKind::FilePath,
        ModelFieldType::File => FormFieldKind::File,
        ModelFieldType::Image => FormFieldKind::Image,
        ModelFieldType::Integer
        | ModelFieldType::BigInteger
        | ModelFieldType::SmallInteger
        | ModelFieldType::PositiveInteger
        | ModelFieldType::PositiveSmallInteger
        | ModelFieldType::Auto
        | ModelFieldType::BigAuto => FormFieldKind::Integer,
        ModelFieldType::Float => FormFieldKind::Float,
        ModelFieldType::Decimal { .. } => FormFieldKind::Decimal,
        ModelFieldType::Boolean => FormFieldKind::Boolean,
        ModelFieldType::NullBoolean => FormFieldKind::NullBoolean,
        ModelFieldType::Date => FormFieldKind::Date,
        ModelFieldType::DateTime => FormFieldKind::DateTime,
        ModelFieldType::Time => FormFieldKind::Time,
        ModelFieldType::ForeignKey { .. } | ModelFieldType::OneToOne { .. } => {
            FormFieldKind::ModelChoice
        }
        ModelFieldType::ManyToMany { .. } => FormFieldKind::ModelMultipleChoice,
    };
    let form_field = FormFieldDef::new(field.name, kind);
    // JSON payloads edit as free text
    if matches!(field.field_type, ModelFieldType::Json) {
        form_field.widget(DojoWidgetKind::Textarea)
    } else {
        form_field
    }
}
