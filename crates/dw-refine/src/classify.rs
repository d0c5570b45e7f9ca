//! First pass: sort the module's names into framework imports, local
//! declarations, and component tags that still need an import.

use std::collections::HashSet;

use indexmap::IndexSet;
use swc_ecma_ast::{
    ClassDecl, DefaultDecl, ExportDefaultDecl, FnDecl, ImportDecl, ImportSpecifier,
    JSXElementName, JSXOpeningElement, Module, ModuleDecl, ModuleItem, Pat, VarDeclarator,
};
use swc_ecma_visit::{Visit, VisitWith};
use tracing::debug;

use crate::syntax::SyntaxTree;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Local bindings introduced by imports from the framework module.
    pub framework_names: HashSet<String>,
    /// Variables, functions and classes declared in the module itself.
    pub declared_names: HashSet<String>,
    /// Component tags in first-seen order, excluding framework names.
    pub used_tag_names: IndexSet<String>,
}

/// Uppercase-initial identifiers denote components; lowercase ones are
/// built-in elements.
pub fn is_component_name(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// Classifies the names in `tree`. Every import that does not come from
/// `framework_module` is removed from the tree; the resolver regenerates the
/// ones that are actually needed.
pub fn classify(tree: &mut SyntaxTree, framework_module: &str) -> Classification {
    let framework_names = retain_framework_imports(&mut tree.module, framework_module);

    let mut collector = NameCollector {
        framework_names: &framework_names,
        declared_names: HashSet::new(),
        used_tag_names: IndexSet::new(),
    };
    tree.module.visit_with(&mut collector);
    let NameCollector {
        declared_names,
        used_tag_names,
        ..
    } = collector;

    debug!(
        framework = framework_names.len(),
        declared = declared_names.len(),
        used = used_tag_names.len(),
        "classified module names"
    );

    Classification {
        framework_names,
        declared_names,
        used_tag_names,
    }
}

fn retain_framework_imports(module: &mut Module, framework_module: &str) -> HashSet<String> {
    let mut framework_names = HashSet::new();
    let before = module.body.len();

    module.body.retain(|item| match item {
        ModuleItem::ModuleDecl(ModuleDecl::Import(import)) => {
            if &*import.src.value == framework_module {
                framework_names.extend(import_locals(import));
                true
            } else {
                false
            }
        }
        _ => true,
    });

    let dropped = before - module.body.len();
    if dropped > 0 {
        debug!(dropped, "discarded generated imports");
    }
    framework_names
}

fn import_locals(import: &ImportDecl) -> impl Iterator<Item = String> + '_ {
    import.specifiers.iter().map(|spec| {
        let local = match spec {
            ImportSpecifier::Named(named) => &named.local,
            ImportSpecifier::Default(default) => &default.local,
            ImportSpecifier::Namespace(namespace) => &namespace.local,
        };
        local.sym.to_string()
    })
}

struct NameCollector<'a> {
    framework_names: &'a HashSet<String>,
    declared_names: HashSet<String>,
    used_tag_names: IndexSet<String>,
}

impl Visit for NameCollector<'_> {
    fn visit_var_declarator(&mut self, declarator: &VarDeclarator) {
        if let Pat::Ident(binding) = &declarator.name {
            self.declared_names.insert(binding.id.sym.to_string());
        }
        declarator.visit_children_with(self);
    }

    fn visit_fn_decl(&mut self, decl: &FnDecl) {
        self.declared_names.insert(decl.ident.sym.to_string());
        decl.visit_children_with(self);
    }

    fn visit_class_decl(&mut self, decl: &ClassDecl) {
        self.declared_names.insert(decl.ident.sym.to_string());
        decl.visit_children_with(self);
    }

    fn visit_export_default_decl(&mut self, export: &ExportDefaultDecl) {
        let ident = match &export.decl {
            DefaultDecl::Fn(func) => func.ident.as_ref(),
            DefaultDecl::Class(class) => class.ident.as_ref(),
            DefaultDecl::TsInterfaceDecl(_) => None,
        };
        if let Some(ident) = ident {
            self.declared_names.insert(ident.sym.to_string());
        }
        export.visit_children_with(self);
    }

    fn visit_jsx_opening_element(&mut self, element: &JSXOpeningElement) {
        if let JSXElementName::Ident(ident) = &element.name {
            let name = &*ident.sym;
            if is_component_name(name) && !self.framework_names.contains(name) {
                self.used_tag_names.insert(name.to_string());
            }
        }
        element.visit_children_with(self);
    }
}
