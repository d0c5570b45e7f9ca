//! Third pass: replace unresolved component tags with a built-in element.

use std::collections::HashSet;

use swc_ecma_ast::{JSXClosingElement, JSXElementName, JSXOpeningElement};
use swc_ecma_visit::{VisitMut, VisitMutWith};
use tracing::debug;

use crate::classify::is_component_name;
use crate::syntax::SyntaxTree;

/// Rewrites every opening and closing tag named in `fallback_names` to
/// `fallback_element`. Returns the number of tag positions rewritten.
pub fn sanitize(
    tree: &mut SyntaxTree,
    framework_names: &HashSet<String>,
    fallback_names: &[String],
    fallback_element: &str,
) -> usize {
    if fallback_names.is_empty() {
        return 0;
    }

    let mut sanitizer = TagSanitizer {
        framework_names,
        fallback_names: fallback_names.iter().map(String::as_str).collect(),
        fallback_element,
        rewritten: 0,
    };
    tree.module.visit_mut_with(&mut sanitizer);

    debug!(rewritten = sanitizer.rewritten, "sanitized unresolved tags");
    sanitizer.rewritten
}

struct TagSanitizer<'a> {
    framework_names: &'a HashSet<String>,
    fallback_names: HashSet<&'a str>,
    fallback_element: &'a str,
    rewritten: usize,
}

impl TagSanitizer<'_> {
    fn rewrite(&mut self, name: &mut JSXElementName) {
        let JSXElementName::Ident(ident) = name else {
            return;
        };
        let tag = &*ident.sym;
        if is_component_name(tag)
            && !self.framework_names.contains(tag)
            && self.fallback_names.contains(tag)
        {
            ident.sym = self.fallback_element.into();
            self.rewritten += 1;
        }
    }
}

impl VisitMut for TagSanitizer<'_> {
    fn visit_mut_jsx_opening_element(&mut self, element: &mut JSXOpeningElement) {
        self.rewrite(&mut element.name);
        element.visit_mut_children_with(self);
    }

    fn visit_mut_jsx_closing_element(&mut self, element: &mut JSXClosingElement) {
        self.rewrite(&mut element.name);
        element.visit_mut_children_with(self);
    }
}
