use serde::{Deserialize, Serialize};

use crate::error::{RefineError, Result};

/// Module and identifier names the refinement passes rely on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefineSettings {
    /// Imports from this module are kept and never resolved or rewritten.
    pub framework_module: String,
    /// Module serving icon components and the fallback placeholder.
    pub icon_module: String,
    /// Export bound from `icon_module` for every unresolved tag.
    pub fallback_icon: String,
    /// Built-in element that replaces unresolved tags.
    pub fallback_element: String,
}

impl Default for RefineSettings {
    fn default() -> Self {
        Self {
            framework_module: "react".to_string(),
            icon_module: "lucide-react".to_string(),
            fallback_icon: "Box".to_string(),
            fallback_element: "div".to_string(),
        }
    }
}

impl RefineSettings {
    /// Rejects values that would make the refined module invalid: the
    /// fallback element must be a lowercase built-in tag and the placeholder
    /// a plain identifier.
    pub fn validate(&self) -> Result<()> {
        for (field, module) in [
            ("framework_module", &self.framework_module),
            ("icon_module", &self.icon_module),
        ] {
            if module.trim().is_empty() {
                return Err(invalid(field, module, "module name must not be empty"));
            }
        }
        if !is_identifier(&self.fallback_icon) {
            return Err(invalid(
                "fallback_icon",
                &self.fallback_icon,
                "must be a plain JavaScript identifier",
            ));
        }
        if !is_builtin_element(&self.fallback_element) {
            return Err(invalid(
                "fallback_element",
                &self.fallback_element,
                "must be a lowercase element name such as `div`",
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, value: &str, reason: &'static str) -> RefineError {
    RefineError::InvalidSetting {
        field,
        value: value.to_string(),
        reason,
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn is_builtin_element(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
