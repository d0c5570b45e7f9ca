//! Second pass: assign every used component tag to a source module.

use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;
use tracing::debug;

use crate::catalog::{IconTable, RuleCatalog};
use crate::settings::RefineSettings;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Imported names grouped per module, modules in first-seen order.
    pub imports_by_module: IndexMap<String, IndexSet<String>>,
    /// Tags that matched nothing and were bound to the placeholder instead.
    pub fallback_names: Vec<String>,
}

impl Resolution {
    pub fn insert(&mut self, module: &str, name: &str) {
        self.imports_by_module
            .entry(module.to_string())
            .or_default()
            .insert(name.to_string());
    }

    pub fn is_fallback(&self, name: &str) -> bool {
        self.fallback_names.iter().any(|fallback| fallback == name)
    }

    pub fn module_of(&self, name: &str) -> Option<&str> {
        self.imports_by_module
            .iter()
            .find(|(_, names)| names.contains(name))
            .map(|(module, _)| module.as_str())
    }

    /// One `import { .. } from "..";` line per module.
    pub fn render_imports(&self) -> String {
        self.imports_by_module
            .iter()
            .filter(|(_, names)| !names.is_empty())
            .map(|(module, names)| {
                format!("import {{ {} }} from \"{}\";\n", names.iter().join(", "), module)
            })
            .collect()
    }
}

pub struct ImportResolver<'a> {
    catalog: &'a RuleCatalog,
    icons: &'a IconTable,
    settings: &'a RefineSettings,
}

impl<'a> ImportResolver<'a> {
    pub fn new(catalog: &'a RuleCatalog, icons: &'a IconTable, settings: &'a RefineSettings) -> Self {
        Self {
            catalog,
            icons,
            settings,
        }
    }

    /// `declared_names` and `framework_names` are the module's existing
    /// bindings; neither is imported again, the placeholder included.
    pub fn resolve(
        &self,
        used_tag_names: &IndexSet<String>,
        declared_names: &HashSet<String>,
        framework_names: &HashSet<String>,
    ) -> Resolution {
        let mut resolution = Resolution::default();
        let placeholder = &self.settings.fallback_icon;
        let placeholder_bound =
            declared_names.contains(placeholder) || framework_names.contains(placeholder);

        for name in used_tag_names {
            if declared_names.contains(name) {
                continue;
            }
            if let Some(module) = self.catalog.resolve(name) {
                resolution.insert(module, name);
            } else if self.icons.contains(name) {
                resolution.insert(&self.settings.icon_module, name);
            } else {
                resolution.fallback_names.push(name.clone());
                if !placeholder_bound {
                    resolution.insert(&self.settings.icon_module, placeholder);
                }
            }
        }

        debug!(
            modules = resolution.imports_by_module.len(),
            fallbacks = resolution.fallback_names.len(),
            "resolved component imports"
        );
        resolution
    }
}
