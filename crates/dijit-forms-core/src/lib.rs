//! # dijit-forms-core
//!
//! Core types for the dijit-forms glue layer: the Dojo configuration
//! ([`config::DojoConfig`]), the error type ([`error::DijitError`]), the
//! request-scoped required-module collector ([`collector::ModuleCollector`]),
//! and logging setup.

pub mod collector;
pub mod config;
pub mod error;
pub mod logging;

pub use collector::ModuleCollector;
pub use config::{DojoConfig, DojoVersion};
pub use error::{DijitError, DijitResult};
