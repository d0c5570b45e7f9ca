use std::sync::Arc;

use tracing::debug;

use crate::catalog::{IconTable, RuleCatalog};
use crate::classify::{classify, Classification};
use crate::error::Result;
use crate::resolve::{ImportResolver, Resolution};
use crate::sanitize::sanitize;
use crate::settings::RefineSettings;
use crate::syntax::SyntaxTree;

/// Output of one refinement call.
#[derive(Debug, Clone)]
pub struct Refined {
    pub code: String,
    pub classification: Classification,
    pub resolution: Resolution,
    /// Number of opening and closing tags replaced by the fallback element.
    pub rewritten_tags: usize,
}

/// Runs parse, classify, resolve, sanitize and print over a generated module.
///
/// The catalog and icon table are shared read-only, so one `Refiner` can
/// serve concurrent calls.
#[derive(Debug, Clone)]
pub struct Refiner {
    catalog: Arc<RuleCatalog>,
    icons: Arc<IconTable>,
    settings: RefineSettings,
}

impl Refiner {
    pub fn new(catalog: Arc<RuleCatalog>, icons: Arc<IconTable>, settings: RefineSettings) -> Self {
        Self {
            catalog,
            icons,
            settings,
        }
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    pub fn icons(&self) -> &IconTable {
        &self.icons
    }

    pub fn settings(&self) -> &RefineSettings {
        &self.settings
    }

    pub fn refine(&self, source: &str) -> Result<Refined> {
        let mut tree = SyntaxTree::parse(source)?;

        let classification = classify(&mut tree, &self.settings.framework_module);
        let resolution = ImportResolver::new(&self.catalog, &self.icons, &self.settings).resolve(
            &classification.used_tag_names,
            &classification.declared_names,
            &classification.framework_names,
        );
        let rewritten_tags = sanitize(
            &mut tree,
            &classification.framework_names,
            &resolution.fallback_names,
            &self.settings.fallback_element,
        );

        let body = tree.print()?;
        let mut code = resolution.render_imports();
        code.push_str(&body);

        debug!(
            imports = resolution.imports_by_module.len(),
            fallbacks = resolution.fallback_names.len(),
            rewritten_tags,
            "refined module"
        );

        Ok(Refined {
            code,
            classification,
            resolution,
            rewritten_tags,
        })
    }

    pub fn refine_code(&self, source: &str) -> Result<String> {
        self.refine(source).map(|refined| refined.code)
    }
}

impl Default for Refiner {
    fn default() -> Self {
        Self::new(
            Arc::new(RuleCatalog::shadcn()),
            Arc::new(IconTable::empty()),
            RefineSettings::default(),
        )
    }
}
