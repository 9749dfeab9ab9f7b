//! End-to-end: model metadata through mapping and attribute mixing to
//! rendered toolkit markup and a populated module collector.

use std::sync::LazyLock;

use dijit_forms::core::{DojoConfig, ModuleCollector};
use dijit_forms::formset::{modelformset_factory, DEFAULT_PREFIX};
use dijit_forms::model::{ModelFieldDef, ModelFieldType, ModelMeta, Value};
use dijit_forms::{modelform_factory, ModelFormConfig};

static ARTICLE_META: LazyLock<ModelMeta> = LazyLock::new(|| ModelMeta {
    model_name: "article",
    verbose_name: "article".to_string(),
    fields: vec![
        ModelFieldDef::new("id", ModelFieldType::Auto)
            .primary_key()
            .auto_created(),
        ModelFieldDef::new("title", ModelFieldType::Char).max_length(100),
        ModelFieldDef::new("body", ModelFieldType::Text),
        ModelFieldDef::new("contact", ModelFieldType::Email).blank(),
        ModelFieldDef::new("status", ModelFieldType::Char)
            .help_text("Publication state")
            .choices(vec![
                (Value::from("d"), "Draft".to_string()),
                (Value::from("p"), "Published".to_string()),
            ]),
        ModelFieldDef::new("views", ModelFieldType::PositiveInteger).blank(),
        ModelFieldDef::new("published_on", ModelFieldType::Date)
            .nullable()
            .blank(),
    ],
});

#[test]
fn model_form_renders_dijit_markup() {
    let form = modelform_factory(&ModelFormConfig::new(&ARTICLE_META));
    let config = DojoConfig::default();
    let mut collector = ModuleCollector::new();
    let html = form.render(&config, &mut collector);

    // each model field came out wearing its Dijit widget
    assert!(html.contains(r#"dojoType="dijit.form.ValidationTextBox""#));
    assert!(html.contains(r#"dojoType="dijit.form.Textarea""#));
    assert!(html.contains(r#"dojoType="dijit.form.FilteringSelect""#));
    assert!(html.contains(r#"dojoType="dijit.form.NumberTextBox""#));
    assert!(html.contains(r#"dojoType="dijit.form.DateTextBox""#));

    // validation metadata landed in widget attributes
    assert!(html.contains(r#"maxlength="100""#));
    assert!(html.contains(r#"required="true""#));
    assert!(html.contains(r#"required="false""#));
    assert!(html.contains(r#"promptMessage="Publication state""#));
    assert!(html.contains(r#"constraints='{"min":0}'"#));

    // the choice field renders its options
    assert!(html.contains(r#"<option value="d">Draft</option>"#));
    assert!(html.contains(r#"<option value="p">Published</option>"#));
}

#[test]
fn model_form_fills_collector_in_field_order() {
    let form = modelform_factory(&ModelFormConfig::new(&ARTICLE_META));
    let config = DojoConfig::default();
    let mut collector = ModuleCollector::new();
    form.render(&config, &mut collector);

    assert_eq!(
        collector.modules(),
        &[
            "dijit.form.ValidationTextBox".to_string(),
            "dijit.form.Textarea".to_string(),
            "dojox.validate.regexp".to_string(),
            "dijit.form.FilteringSelect".to_string(),
            "dijit.form.NumberTextBox".to_string(),
            "dijit.form.DateTextBox".to_string(),
        ]
    );
}

#[test]
fn rendering_is_idempotent_per_request() {
    let form = modelform_factory(&ModelFormConfig::new(&ARTICLE_META));
    let config = DojoConfig::default();

    let mut first_collector = ModuleCollector::new();
    let first = form.render(&config, &mut first_collector);
    let mut second_collector = ModuleCollector::new();
    let second = form.render(&config, &mut second_collector);

    assert_eq!(first, second);
    assert_eq!(first_collector.modules(), second_collector.modules());
}

#[test]
fn formset_rows_carry_hidden_keys() {
    let formset = modelformset_factory(
        &ModelFormConfig::new(&ARTICLE_META),
        DEFAULT_PREFIX,
        1,
        1,
    );
    let config = DojoConfig::default();
    let mut collector = ModuleCollector::new();
    let html = formset.render(&config, &mut collector);

    assert!(html.contains("form-TOTAL_FORMS"));
    assert!(html.contains(r#"name="form-0-title""#));
    assert!(html.contains(r#"name="form-1-title""#));
    assert!(html.contains(r#"type="hidden" name="form-0-id""#));
    assert!(html.contains(r#"type="hidden" name="form-1-id""#));
}
