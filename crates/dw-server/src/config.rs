//! Process configuration loaded from TOML files and the environment

use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dw_generate::{GenerationConfig, DEFAULT_SYSTEM_PROMPT, LUCIDE_ICON_NODES};
use dw_refine::{IconTable, RefineSettings, Refiner, RuleCatalog, RuleSpec};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Result, ServerError};

pub const CONFIG_FILE_NAME: &str = "dewhale.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DewhaleConfig {
    pub server: ServerSettings,
    pub generation: GenerationConfig,
    pub prompts: PromptSettings,
    pub catalog: CatalogSettings,
    pub refine: RefineSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Address the HTTP endpoint listens on
    pub bind: SocketAddr,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from((Ipv4Addr::LOCALHOST, 3000)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptSettings {
    /// Directory holding prompt templates
    pub dir: PathBuf,
    /// System prompt file name inside `dir`
    pub system_prompt: String,
}

impl Default for PromptSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("prompts"),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// URL or local JSON file with the icon catalog
    pub icon_source: String,
    pub load_icons: bool,
    pub icon_timeout_secs: u64,
    /// Replaces the built-in shadcn/nivo rules when present
    pub rules: Option<Vec<RuleSpec>>,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            icon_source: LUCIDE_ICON_NODES.to_string(),
            load_icons: true,
            icon_timeout_secs: 10,
            rules: None,
        }
    }
}

impl CatalogSettings {
    pub fn build_catalog(&self) -> Result<RuleCatalog> {
        match &self.rules {
            Some(specs) => Ok(RuleCatalog::from_specs(specs)?),
            None => Ok(RuleCatalog::shadcn()),
        }
    }
}

impl DewhaleConfig {
    /// Loads the explicit file when given, otherwise the first of
    /// `./dewhale.toml` and `<config dir>/dewhale/config.toml` that exists,
    /// otherwise defaults. Credentials from the environment win.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => Self::load_from_file(path)?,
            None => match Self::candidate_paths().into_iter().find(|path| path.is_file()) {
                Some(path) => Self::load_from_file(&path)?,
                None => {
                    debug!("no configuration file found, using defaults");
                    Self::default()
                }
            },
        };

        Ok(config.with_env())
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ServerError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            ServerError::Config(format!("Failed to parse config file {}: {}", path.display(), e))
        })?;

        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ServerError::Config(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ServerError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        std::fs::write(path, content)
            .map_err(|e| ServerError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Validates `[refine]` and compiles `[catalog]`. Either failing stops
    /// startup.
    pub fn build_refiner(&self, icons: IconTable) -> Result<Refiner> {
        self.refine.validate()?;
        let catalog = self.catalog.build_catalog()?;
        Ok(Refiner::new(
            Arc::new(catalog),
            Arc::new(icons),
            self.refine.clone(),
        ))
    }

    pub fn with_env(mut self) -> Self {
        self.generation = self.generation.with_env();
        self
    }

    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("dewhale").join("config.toml"))
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
        paths.extend(Self::default_config_path());
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dw_refine::RefineError;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = DewhaleConfig::default();
        assert_eq!(config.server.bind.port(), 3000);
        assert_eq!(config.generation.model, "gpt-4-vision-preview");
        assert_eq!(config.prompts.system_prompt, "ui-gen.md");
        assert_eq!(config.refine.framework_module, "react");
        assert!(config.catalog.rules.is_none());
    }

    #[test]
    fn test_partial_config_file() {
        let content = r#"
[server]
bind = "0.0.0.0:8080"

[catalog]
load_icons = false
rules = [
    { pattern = "^Card.*", module = "ui/card" },
    { pattern = "^Chart", module = "recharts" },
]

[refine]
fallback_element = "span"
"#;
        let config: DewhaleConfig = toml::from_str(content).unwrap();

        assert_eq!(config.server.bind.port(), 8080);
        assert!(!config.catalog.load_icons);
        assert_eq!(config.refine.fallback_element, "span");
        assert_eq!(config.refine.icon_module, "lucide-react");

        let catalog = config.catalog.build_catalog().unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.resolve("ChartLegend"), Some("recharts"));
    }

    #[test]
    fn test_invalid_rule_is_a_startup_error() {
        let settings = CatalogSettings {
            rules: Some(vec![RuleSpec::new("^(Broken", "nowhere")]),
            ..Default::default()
        };
        assert!(matches!(settings.build_catalog(), Err(ServerError::Refine(_))));
    }

    #[test]
    fn test_invalid_refine_settings_stop_startup() {
        let mut config = DewhaleConfig::default();
        config.refine.fallback_element = "Panel".to_string();
        let err = config.build_refiner(IconTable::empty()).unwrap_err();
        assert!(matches!(
            err,
            ServerError::Refine(RefineError::InvalidSetting { field: "fallback_element", .. })
        ));

        let mut config = DewhaleConfig::default();
        config.refine.fallback_icon = String::new();
        let err = config.build_refiner(IconTable::empty()).unwrap_err();
        assert!(matches!(
            err,
            ServerError::Refine(RefineError::InvalidSetting { field: "fallback_icon", .. })
        ));

        let refiner = DewhaleConfig::default()
            .build_refiner(IconTable::empty())
            .unwrap();
        assert_eq!(refiner.catalog().len(), 44);
    }

    #[test]
    fn test_config_file_operations() {
        let mut config = DewhaleConfig::default();
        config.generation.api_key = "secret".to_string();
        let temp_file = NamedTempFile::new().unwrap();

        config.save_to_file(temp_file.path()).unwrap();
        let saved = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(!saved.contains("secret"), "api keys are never written back");

        let loaded = DewhaleConfig::load_from_file(temp_file.path()).unwrap();
        assert_eq!(loaded.server.bind, config.server.bind);
        assert_eq!(loaded.generation.model, config.generation.model);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = DewhaleConfig::load(Some(Path::new("/nonexistent/dewhale.toml"))).unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }
}
