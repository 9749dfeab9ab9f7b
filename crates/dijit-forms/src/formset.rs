//! Formsets over model-backed forms.
//!
//! [`ModelFormSet`] manages repeated rows of the same model form: the
//! management form data the hosting framework uses to track row counts, and
//! the per-row hidden key fields. The hidden primary-key (and, for inline
//! sets, foreign-key) field is appended AFTER all other fields of a row;
//! downstream processing relies on that ordering.

use std::collections::HashMap;

use dijit_forms_core::{DojoConfig, ModuleCollector};
use dijit_forms_model::{ModelFieldDef, ModelMeta, Value};

use crate::fields::{FormFieldDef, FormFieldKind};
use crate::form::DojoForm;
use crate::model_form::{generate_form_fields, ModelFormConfig};
use crate::widgets::DojoWidgetKind;

/// The default prefix for formset HTML name attributes.
pub const DEFAULT_PREFIX: &str = "form";

const TOTAL_FORMS: &str = "TOTAL_FORMS";
const INITIAL_FORMS: &str = "INITIAL_FORMS";
const MIN_NUM_FORMS: &str = "MIN_NUM_FORMS";
const MAX_NUM_FORMS: &str = "MAX_NUM_FORMS";

/// A collection of repeated model-backed forms managed together.
pub struct ModelFormSet {
    /// The model the rows are generated from.
    pub meta: &'static ModelMeta,
    /// The per-row forms, in display order.
    pub forms: Vec<DojoForm>,
    /// Number of extra (empty) rows displayed.
    pub extra: usize,
    /// Minimum number of rows required.
    pub min_num: usize,
    /// Maximum number of rows allowed.
    pub max_num: usize,
    prefix: String,
    initial_count: usize,
}

impl ModelFormSet {
    /// Creates a formset over pre-built row forms.
    pub fn new(meta: &'static ModelMeta, prefix: impl Into<String>, forms: Vec<DojoForm>) -> Self {
        Self {
            meta,
            forms,
            extra: 1,
            min_num: 0,
            max_num: 1000,
            prefix: prefix.into(),
            initial_count: 0,
        }
    }

    /// Sets the number of extra rows.
    #[must_use]
    pub const fn with_extra(mut self, extra: usize) -> Self {
        self.extra = extra;
        self
    }

    /// Sets the minimum number of rows.
    #[must_use]
    pub const fn with_min_num(mut self, min_num: usize) -> Self {
        self.min_num = min_num;
        self
    }

    /// Sets the maximum number of rows.
    #[must_use]
    pub const fn with_max_num(mut self, max_num: usize) -> Self {
        self.max_num = max_num;
        self
    }

    /// Sets how many rows are backed by existing instances.
    #[must_use]
    pub const fn with_initial_count(mut self, count: usize) -> Self {
        self.initial_count = count;
        self
    }

    /// Returns the formset prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the total number of rows.
    pub fn total_form_count(&self) -> usize {
        self.forms.len()
    }

    /// Returns the number of instance-backed rows.
    pub const fn initial_form_count(&self) -> usize {
        self.initial_count
    }

    /// The management form data the hosting framework reads back on submit.
    pub fn management_form_data(&self) -> HashMap<String, String> {
        let prefix = &self.prefix;
        let mut data = HashMap::new();
        data.insert(
            format!("{prefix}-{TOTAL_FORMS}"),
            self.total_form_count().to_string(),
        );
        data.insert(
            format!("{prefix}-{INITIAL_FORMS}"),
            self.initial_form_count().to_string(),
        );
        data.insert(format!("{prefix}-{MIN_NUM_FORMS}"), self.min_num.to_string());
        data.insert(format!("{prefix}-{MAX_NUM_FORMS}"), self.max_num.to_string());
        data
    }

    /// Renders the management form as hidden inputs.
    pub fn management_form_html(
        &self,
        config: &DojoConfig,
        collector: &mut ModuleCollector,
    ) -> String {
        let prefix = &self.prefix;
        let mut initial = HashMap::new();
        initial.insert(
            format!("{prefix}-{TOTAL_FORMS}"),
            Value::Int(self.total_form_count() as i64),
        );
        initial.insert(
            format!("{prefix}-{INITIAL_FORMS}"),
            Value::Int(self.initial_form_count() as i64),
        );
        initial.insert(
            format!("{prefix}-{MIN_NUM_FORMS}"),
            Value::Int(self.min_num as i64),
        );
        initial.insert(
            format!("{prefix}-{MAX_NUM_FORMS}"),
            Value::Int(self.max_num as i64),
        );
        DojoForm::new(management_form_fields(prefix))
            .with_initial(initial)
            .render(config, collector)
    }

    /// Appends the hidden primary-key field to every row that needs one.
    ///
    /// A row needs one when the model's key is not user-editable (not
    /// editable, auto-created, an auto kind, or a parent link) or when the
    /// key has no field on the form. The hidden field replaces any visible
    /// key field and always lands after all other fields of the row.
    pub fn add_hidden_pk_fields(&mut self) {
        let Some(pk) = self.meta.pk() else {
            return;
        };
        let pk_name = pk.name;
        let not_editable = pk_is_not_editable(pk);
        for form in &mut self.forms {
            if !not_editable && form.field(pk_name).is_some() {
                continue;
            }
            form.remove_field(pk_name);
            form.push_field(hidden_key_field(pk_name));
        }
    }

    /// Renders the whole formset: management form first, then each row.
    pub fn render(&self, config: &DojoConfig, collector: &mut ModuleCollector) -> String {
        let mut html = self.management_form_html(config, collector);
        for form in &self.forms {
            html.push_str(&form.render(config, collector));
        }
        html
    }
}

/// A formset for editing rows related to a parent instance.
///
/// In addition to the hidden primary key, every row carries a hidden field
/// for the foreign key pointing at the parent. When the key to the parent
/// is the row's own primary key (a parent link), the hidden key field does
/// double duty and no separate field is added.
pub struct InlineModelFormSet {
    /// The underlying formset.
    pub formset: ModelFormSet,
    /// The name of the foreign key pointing at the parent.
    pub fk_name: &'static str,
}

impl InlineModelFormSet {
    /// Appends the hidden key fields to every row: the primary key first,
    /// then the foreign key to the parent (unless they coincide).
    pub fn add_hidden_key_fields(&mut self) {
        self.formset.add_hidden_pk_fields();
        let pk_is_fk = self
            .formset
            .meta
            .pk()
            .is_some_and(|pk| pk.name == self.fk_name);
        if pk_is_fk {
            return;
        }
        let label = self
            .formset
            .meta
            .field(self.fk_name)
            .map(|f| f.verbose_name.clone())
            .unwrap_or_else(|| self.fk_name.replace('_', " "));
        for form in &mut self.formset.forms {
            form.remove_field(self.fk_name);
            let mut field = hidden_key_field(self.fk_name);
            field.label = label.clone();
            form.push_field(field);
        }
    }

    /// Renders the whole inline formset.
    pub fn render(&self, config: &DojoConfig, collector: &mut ModuleCollector) -> String {
        self.formset.render(config, collector)
    }
}

/// Builds a formset of `initial + extra` rows from a model form config.
pub fn modelformset_factory(
    config: &ModelFormConfig,
    prefix: &str,
    initial: usize,
    extra: usize,
) -> ModelFormSet {
    let total = initial + extra;
    let forms = (0..total)
        .map(|i| {
            DojoForm::new(generate_form_fields(config)).with_prefix(format!("{prefix}-{i}"))
        })
        .collect();
    let mut formset = ModelFormSet::new(config.meta, prefix, forms)
        .with_extra(extra)
        .with_initial_count(initial);
    formset.add_hidden_pk_fields();
    formset
}

/// Builds an inline formset whose rows hide the foreign key to the parent.
pub fn inlineformset_factory(
    config: &ModelFormConfig,
    fk_name: &'static str,
    prefix: &str,
    initial: usize,
    extra: usize,
) -> InlineModelFormSet {
    let total = initial + extra;
    let forms = (0..total)
        .map(|i| {
            let mut form =
                DojoForm::new(generate_form_fields(config)).with_prefix(format!("{prefix}-{i}"));
            // the parent key is never edited directly on an inline row
            form.remove_field(fk_name);
            form
        })
        .collect();
    let formset = ModelFormSet::new(config.meta, prefix, forms)
        .with_extra(extra)
        .with_initial_count(initial);
    let mut inline = InlineModelFormSet { formset, fk_name };
    inline.add_hidden_key_fields();
    inline
}

/// The hidden integer fields of the management form.
pub fn management_form_fields(prefix: &str) -> Vec<FormFieldDef> {
    [TOTAL_FORMS, INITIAL_FORMS, MIN_NUM_FORMS, MAX_NUM_FORMS]
        .iter()
        .map(|suffix| {
            FormFieldDef::new(format!("{prefix}-{suffix}"), FormFieldKind::Integer)
                .min_value(0_i64)
                .widget(DojoWidgetKind::HiddenInput)
        })
        .collect()
}

fn hidden_key_field(name: &str) -> FormFieldDef {
    FormFieldDef::new(name, FormFieldKind::ModelChoice)
        .required(false)
        .widget(DojoWidgetKind::HiddenInput)
}

fn pk_is_not_editable(pk: &ModelFieldDef) -> bool {
    !pk.editable
        || pk.auto_created
        || pk.field_type.is_auto()
        || pk.field_type.is_parent_link()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dijit_forms_model::ModelFieldType;
    use std::sync::LazyLock;

    static AUTO_PK_META: LazyLock<ModelMeta> = LazyLock::new(|| ModelMeta {
        model_name: "item",
        verbose_name: "item".to_string(),
        fields: vec![
            ModelFieldDef::new("id", ModelFieldType::Auto)
                .primary_key()
                .auto_created(),
            ModelFieldDef::new("name", ModelFieldType::Char).max_length(50),
            ModelFieldDef::new("quantity", ModelFieldType::PositiveInteger).blank(),
        ],
    });

    static NATURAL_PK_META: LazyLock<ModelMeta> = LazyLock::new(|| ModelMeta {
        model_name: "country",
        verbose_name: "country".to_string(),
        fields: vec![
            ModelFieldDef::new("code", ModelFieldType::Char)
                .primary_key()
                .max_length(2),
            ModelFieldDef::new("name", ModelFieldType::Char).max_length(50),
        ],
    });

    static CHILD_META: LazyLock<ModelMeta> = LazyLock::new(|| ModelMeta {
        model_name: "chapter",
        verbose_name: "chapter".to_string(),
        fields: vec![
            ModelFieldDef::new("id", ModelFieldType::Auto)
                .primary_key()
                .auto_created(),
            ModelFieldDef::new(
                "book",
                ModelFieldType::ForeignKey {
                    to: "library.book".into(),
                    parent_link: false,
                },
            )
            .verbose_name("parent book"),
            ModelFieldDef::new("title", ModelFieldType::Char).max_length(100),
        ],
    });

    fn auto_config() -> ModelFormConfig {
        ModelFormConfig::new(&AUTO_PK_META)
    }

    #[test]
    fn test_management_form_data() {
        let formset = modelformset_factory(&auto_config(), DEFAULT_PREFIX, 2, 1);
        let data = formset.management_form_data();
        assert_eq!(data.get("form-TOTAL_FORMS"), Some(&"3".to_string()));
        assert_eq!(data.get("form-INITIAL_FORMS"), Some(&"2".to_string()));
        assert_eq!(data.get("form-MIN_NUM_FORMS"), Some(&"0".to_string()));
        assert_eq!(data.get("form-MAX_NUM_FORMS"), Some(&"1000".to_string()));
    }

    #[test]
    fn test_management_form_html() {
        let formset = modelformset_factory(&auto_config(), DEFAULT_PREFIX, 1, 0);
        let mut collector = ModuleCollector::new();
        let html = formset.management_form_html(&DojoConfig::default(), &mut collector);
        assert!(html.contains("form-TOTAL_FORMS"));
        assert!(html.contains("form-INITIAL_FORMS"));
        assert!(html.contains(r#"type="hidden""#));
        // hidden inputs stay typed so the client form widget collects them
        assert!(html.contains(r#"dojoType="dijit.form.TextBox""#));
    }

    #[test]
    fn test_hidden_pk_appended_last() {
        let formset = modelformset_factory(&auto_config(), DEFAULT_PREFIX, 1, 1);
        for form in &formset.forms {
            let last = form.fields().last().unwrap();
            assert_eq!(last.name, "id");
            assert_eq!(last.kind, FormFieldKind::ModelChoice);
            assert_eq!(last.widget, DojoWidgetKind::HiddenInput);
            assert!(!last.required);
        }
    }

    #[test]
    fn test_editable_pk_keeps_visible_field() {
        let config = ModelFormConfig::new(&NATURAL_PK_META);
        let formset = modelformset_factory(&config, DEFAULT_PREFIX, 0, 1);
        let form = &formset.forms[0];
        let code = form.field("code").unwrap();
        assert_ne!(code.widget, DojoWidgetKind::HiddenInput);
        // no duplicate hidden key
        assert_eq!(
            form.fields().iter().filter(|f| f.name == "code").count(),
            1
        );
    }

    #[test]
    fn test_excluded_editable_pk_gets_hidden_field() {
        let config = ModelFormConfig::new(&NATURAL_PK_META).with_fields(
            crate::model_form::ModelFormFields::Include(vec!["name".to_string()]),
        );
        let formset = modelformset_factory(&config, DEFAULT_PREFIX, 0, 1);
        let form = &formset.forms[0];
        let last = form.fields().last().unwrap();
        assert_eq!(last.name, "code");
        assert_eq!(last.widget, DojoWidgetKind::HiddenInput);
    }

    #[test]
    fn test_row_prefixes() {
        let formset = modelformset_factory(&auto_config(), DEFAULT_PREFIX, 0, 2);
        let mut collector = ModuleCollector::new();
        let html = formset.render(&DojoConfig::default(), &mut collector);
        assert!(html.contains(r#"name="form-0-name""#));
        assert!(html.contains(r#"name="form-1-name""#));
    }

    #[test]
    fn test_inline_formset_hides_fk_last() {
        let config = ModelFormConfig::new(&CHILD_META);
        let inline = inlineformset_factory(&config, "book", "chapters", 0, 2);
        for form in &inline.formset.forms {
            let fields = form.fields();
            let last = fields.last().unwrap();
            assert_eq!(last.name, "book");
            assert_eq!(last.widget, DojoWidgetKind::HiddenInput);
            assert_eq!(last.label, "parent book");
            // hidden pk sits just before the fk
            assert_eq!(fields[fields.len() - 2].name, "id");
            // the fk is not rendered as a visible choice field
            assert_eq!(fields.iter().filter(|f| f.name == "book").count(), 1);
        }
    }

    #[test]
    fn test_inline_formset_render() {
        let config = ModelFormConfig::new(&CHILD_META);
        let inline = inlineformset_factory(&config, "book", "chapters", 0, 1);
        let mut collector = ModuleCollector::new();
        let html = inline.render(&DojoConfig::default(), &mut collector);
        assert!(html.contains("chapters-TOTAL_FORMS"));
        assert!(html.contains(r#"name="chapters-0-title""#));
        assert!(html.contains(r#"name="chapters-0-book""#));
    }

    #[test]
    fn test_builders() {
        let formset = ModelFormSet::new(&AUTO_PK_META, "items", vec![])
            .with_extra(3)
            .with_min_num(1)
            .with_max_num(10);
        assert_eq!(formset.extra, 3);
        assert_eq!(formset.min_num, 1);
        assert_eq!(formset.max_num, 10);
        assert_eq!(formset.prefix(), "items");
    }
}
