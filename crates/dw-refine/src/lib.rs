//! Repairs generated React component modules so that every component tag
//! resolves to an import.
//!
//! A module goes through three passes over its swc syntax tree:
//! [`classify`] sorts its names and drops generated imports, [`resolve`]
//! assigns each component tag a module from the [`RuleCatalog`] or the
//! [`IconTable`], and [`sanitize`] turns whatever stayed unresolved into a
//! plain element. [`Refiner`] drives the passes and prints the result.

pub mod catalog;
pub mod classify;
pub mod error;
pub mod pipeline;
pub mod resolve;
pub mod sanitize;
pub mod settings;
pub mod syntax;

pub use catalog::{pascal_case, IconTable, ImportRule, Matcher, RuleCatalog, RuleSpec};
pub use classify::{classify, is_component_name, Classification};
pub use error::{RefineError, Result};
pub use pipeline::{Refined, Refiner};
pub use resolve::{ImportResolver, Resolution};
pub use sanitize::sanitize;
pub use settings::RefineSettings;
pub use syntax::SyntaxTree;
