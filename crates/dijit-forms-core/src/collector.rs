//! The required-module collector.
//!
//! Every Dijit widget rendered on a page needs its client-side module loaded
//! (a `dojo.require("dijit.form.TextBox")` call emitted by the page-level
//! script tag). Widgets report their modules here as a side effect of
//! attribute computation; a page emitter (out of scope for this crate)
//! drains the collector when the response is assembled.
//!
//! The collector is request-scoped: create one per request/response cycle and
//! pass it `&mut` through the render call chain. It is deliberately not a
//! process-wide global, so there is no shared mutable state to guard.

use std::collections::HashSet;

/// An append-only, order-preserving, duplicate-suppressing registry of
/// required client-side modules.
///
/// # Examples
///
/// ```
/// use dijit_forms_core::ModuleCollector;
///
/// let mut collector = ModuleCollector::new();
/// collector.add("dijit.form.TextBox");
/// collector.add("dijit.form.CheckBox");
/// collector.add("dijit.form.TextBox"); // suppressed
/// assert_eq!(collector.modules().len(), 2);
/// ```
#[derive(Debug, Default, Clone)]
pub struct ModuleCollector {
    modules: Vec<String>,
    seen: HashSet<String>,
}

impl ModuleCollector {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a required module. Duplicates are suppressed; first
    /// registration order is preserved.
    pub fn add(&mut self, module: impl Into<String>) {
        let module = module.into();
        if self.seen.insert(module.clone()) {
            tracing::trace!(module = %module, "dojo module required");
            self.modules.push(module);
        }
    }

    /// Returns the registered modules in first-registration order.
    pub fn modules(&self) -> &[String] {
        &self.modules
    }

    /// Empties the collector. Call at the start of each request cycle when
    /// reusing a collector instance.
    pub fn clear(&mut self) {
        self.modules.clear();
        self.seen.clear();
    }

    /// Returns the number of distinct registered modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Returns `true` if no modules have been registered.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_preserves_order() {
        let mut c = ModuleCollector::new();
        c.add("dijit.form.ValidationTextBox");
        c.add("dijit.form.CheckBox");
        c.add("dojox.validate.regexp");
        assert_eq!(
            c.modules(),
            &[
                "dijit.form.ValidationTextBox".to_string(),
                "dijit.form.CheckBox".to_string(),
                "dojox.validate.regexp".to_string(),
            ]
        );
    }

    #[test]
    fn test_add_suppresses_duplicates() {
        let mut c = ModuleCollector::new();
        c.add("dijit.form.TextBox");
        c.add("dijit.form.TextBox");
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut c = ModuleCollector::new();
        c.add("dijit.form.TextBox");
        c.clear();
        assert!(c.is_empty());
        // a cleared module may be registered again
        c.add("dijit.form.TextBox");
        assert_eq!(c.len(), 1);
    }
}
