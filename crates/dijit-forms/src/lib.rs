//! # dijit-forms
//!
//! Dijit widget substitution for model-driven forms.
//!
//! The glue has two moving parts. The *field mapper*
//! ([`mapper::select_form_field`]) intercepts model-field-to-form-field
//! construction and selects Dijit-flavored field kinds and widgets from an
//! ordered rule table. The *attribute mixer*
//! ([`widgets::DojoWidget::build_attrs`]) runs on every render, folding a
//! field's validation metadata (required, bounds, regex, length) into the
//! widget's attribute bag in the nested, token-encoded form the client
//! toolkit's `dojoType` scan consumes. Required client modules are reported
//! to a request-scoped [`ModuleCollector`](dijit_forms_core::ModuleCollector)
//! along the way.
//!
//! Model-form generation ([`model_form`]) and formsets ([`formset`]) wire
//! those two parts into the hosting framework's construction hooks.

pub mod attrs;
pub mod fields;
pub mod form;
pub mod formset;
pub mod mapper;
pub mod model_form;
pub mod widgets;

/// Core types: configuration, errors, the module collector.
pub use dijit_forms_core as core;

/// Model field descriptors consumed by the mapper.
pub use dijit_forms_model as model;

pub use fields::{FormFieldDef, FormFieldKind};
pub use form::DojoForm;
pub use formset::{InlineModelFormSet, ModelFormSet};
pub use mapper::{select_form_field, FieldMapping};
pub use model_form::{generate_form_fields, modelform_factory, ModelFormConfig, ModelFormFields};
pub use widgets::{DojoWidget, DojoWidgetKind, ExtraFieldAttrs, FieldAttr};
