//! Ordered component import rules and the icon lookup table.
//!
//! Both structures are built once at startup and shared read-only between
//! refinement calls.

use std::collections::HashSet;
use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{RefineError, Result};

/// Test applied to a tag identifier by an [`ImportRule`].
#[derive(Debug, Clone)]
pub enum Matcher {
    Regex(Regex),
    Prefix(String),
    Exact(String),
}

impl Matcher {
    pub fn regex(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(Matcher::Regex)
            .map_err(|source| RefineError::InvalidRule {
                pattern: pattern.to_string(),
                source,
            })
    }

    pub fn prefix(prefix: impl Into<String>) -> Self {
        Matcher::Prefix(prefix.into())
    }

    pub fn exact(name: impl Into<String>) -> Self {
        Matcher::Exact(name.into())
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            Matcher::Regex(regex) => regex.is_match(name),
            Matcher::Prefix(prefix) => name.starts_with(prefix.as_str()),
            Matcher::Exact(exact) => name == exact,
        }
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Regex(regex) => f.write_str(regex.as_str()),
            Matcher::Prefix(prefix) => write!(f, "^{prefix}"),
            Matcher::Exact(exact) => write!(f, "^{exact}$"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImportRule {
    pub matcher: Matcher,
    pub module: String,
}

impl ImportRule {
    pub fn new(matcher: Matcher, module: impl Into<String>) -> Self {
        Self {
            matcher,
            module: module.into(),
        }
    }
}

/// Serialized form of a rule, as written in configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    pub pattern: String,
    pub module: String,
}

impl RuleSpec {
    pub fn new(pattern: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            module: module.into(),
        }
    }
}

// shadcn/ui families first, nivo charts last. `Toggle` must stay after
// `ToggleGroup` and `Alert` after `AlertDialog`.
const SHADCN_RULES: &[(&str, &str)] = &[
    ("Avatar", "@/components/ui/avatar"),
    ("AspectRatio", "@/components/ui/aspect-ratio"),
    ("Badge", "@/components/ui/badge"),
    ("Button", "@/components/ui/button"),
    ("Card", "@/components/ui/card"),
    ("Checkbox", "@/components/ui/checkbox"),
    ("Collapsible", "@/components/ui/collapsible"),
    ("Menubar", "@/components/ui/menubar"),
    ("Select", "@/components/ui/select"),
    ("RadioGroup", "@/components/ui/radio-group"),
    ("Textarea", "@/components/ui/textarea"),
    ("ToggleGroup", "@/components/ui/toggle-group"),
    ("Toggle", "@/components/ui/toggle"),
    ("Skeleton", "@/components/ui/skeleton"),
    ("Slider", "@/components/ui/slider"),
    ("Tooltip", "@/components/ui/tooltip"),
    ("Label", "@/components/ui/label"),
    ("Input", "@/components/ui/input"),
    ("ScrollArea", "@/components/ui/scroll-area"),
    ("Switch", "@/components/ui/switch"),
    ("Dialog", "@/components/ui/dialog"),
    ("Sheet", "@/components/ui/sheet"),
    ("Separator", "@/components/ui/separator"),
    ("NavigationMenu", "@/components/ui/navigation-menu"),
    ("HoverCard", "@/components/ui/hover-card"),
    ("DropdownMenu", "@/components/ui/dropdown-menu"),
    ("Accordion", "@/components/ui/accordion"),
    ("AlertDialog", "@/components/ui/alert-dialog"),
    ("Alert", "@/components/ui/alert"),
    ("Table", "@/components/ui/table"),
    ("Tabs", "@/components/ui/tabs"),
    ("Popover", "@/components/ui/popover"),
    ("Calendar", "@/components/ui/calendar"),
    ("Command", "@/components/ui/command"),
    ("ContextMenu", "@/components/ui/context-menu"),
    ("Carousel", "@/components/ui/carousel"),
    ("Drawer", "@/components/ui/drawer"),
    ("Pagination", "@/components/ui/pagination"),
    ("Resizable", "@/components/ui/resizable"),
    ("ResponsiveBar", "@nivo/bar"),
    ("ResponsiveLine", "@nivo/line"),
    ("ResponsivePie", "@nivo/pie"),
    ("ResponsiveScatterPlot", "@nivo/scatterplot"),
    ("ResponsiveHeatMap", "@nivo/heatmap"),
];

/// Ordered rule list. The first rule whose matcher accepts a name decides its
/// module, so overlapping rules must be listed most specific first.
#[derive(Debug, Clone, Default)]
pub struct RuleCatalog {
    rules: Vec<ImportRule>,
}

impl RuleCatalog {
    pub fn new(rules: Vec<ImportRule>) -> Self {
        Self { rules }
    }

    /// Built-in catalog covering shadcn/ui and the nivo responsive charts.
    pub fn shadcn() -> Self {
        Self::new(
            SHADCN_RULES
                .iter()
                .map(|(prefix, module)| ImportRule::new(Matcher::prefix(*prefix), *module))
                .collect(),
        )
    }

    pub fn from_specs(specs: &[RuleSpec]) -> Result<Self> {
        let rules = specs
            .iter()
            .map(|spec| Ok(ImportRule::new(Matcher::regex(&spec.pattern)?, spec.module.clone())))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(rules))
    }

    pub fn push(&mut self, rule: ImportRule) {
        self.rules.push(rule);
    }

    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.matcher.matches(name))
            .map(|rule| rule.module.as_str())
    }

    pub fn rules(&self) -> &[ImportRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Known icon component names. Only membership matters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IconTable {
    names: HashSet<String>,
}

impl IconTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the table from kebab-case catalog keys such as `arrow-up-right`.
    pub fn from_icon_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        keys.into_iter()
            .map(|key| pascal_case(key.as_ref()))
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<String> for IconTable {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

pub fn pascal_case(key: &str) -> String {
    key.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_matching_rule_wins() {
        let catalog = RuleCatalog::from_specs(&[
            RuleSpec::new("^Card.*", "mod-a"),
            RuleSpec::new("^CardTitle$", "mod-b"),
        ])
        .unwrap();

        assert_eq!(catalog.resolve("CardTitle"), Some("mod-a"));
        assert_eq!(catalog.resolve("Card"), Some("mod-a"));
        assert_eq!(catalog.resolve("Cart"), None);
    }

    #[test]
    fn shadcn_catalog_prefers_specific_families() {
        let catalog = RuleCatalog::shadcn();

        assert_eq!(catalog.len(), 44);
        assert_eq!(
            catalog.resolve("ToggleGroupItem"),
            Some("@/components/ui/toggle-group")
        );
        assert_eq!(catalog.resolve("Toggle"), Some("@/components/ui/toggle"));
        assert_eq!(
            catalog.resolve("AlertDialogAction"),
            Some("@/components/ui/alert-dialog")
        );
        assert_eq!(
            catalog.resolve("AlertDescription"),
            Some("@/components/ui/alert")
        );
        assert_eq!(catalog.resolve("CardHeader"), Some("@/components/ui/card"));
        assert_eq!(catalog.resolve("ResponsivePie"), Some("@nivo/pie"));
        assert_eq!(catalog.resolve("Sidebar"), None);
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let err = RuleCatalog::from_specs(&[RuleSpec::new("^Card(", "mod")]).unwrap_err();
        assert!(matches!(err, RefineError::InvalidRule { ref pattern, .. } if pattern == "^Card("));
    }

    #[test]
    fn matcher_variants() {
        assert!(Matcher::prefix("Tabs").matches("TabsList"));
        assert!(!Matcher::exact("Tabs").matches("TabsList"));
        assert!(Matcher::exact("Tabs").matches("Tabs"));
        assert_eq!(Matcher::prefix("Card").to_string(), "^Card");
        assert_eq!(Matcher::exact("Tabs").to_string(), "^Tabs$");
    }

    #[test]
    fn icon_keys_are_pascal_cased() {
        let icons = IconTable::from_icon_keys(["arrow-up-right", "settings", "bar-chart-3"]);

        assert_eq!(icons.len(), 3);
        assert!(icons.contains("ArrowUpRight"));
        assert!(icons.contains("Settings"));
        assert!(icons.contains("BarChart3"));
        assert!(!icons.contains("arrow-up-right"));
    }
}
