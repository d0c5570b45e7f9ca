use std::sync::Arc;
use std::time::Duration;

use dw_generate::{load_icon_table, GenerationClient, PromptStore};
use dw_refine::{IconTable, Refiner};
use tracing::{info, warn};

use crate::config::DewhaleConfig;
use crate::Result;

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub refiner: Arc<Refiner>,
    pub generator: Option<Arc<GenerationClient>>,
    pub prompts: PromptStore,
}

impl AppState {
    pub fn new(refiner: Refiner, generator: Option<GenerationClient>, prompts: PromptStore) -> Self {
        Self {
            refiner: Arc::new(refiner),
            generator: generator.map(Arc::new),
            prompts,
        }
    }

    /// Builds the catalog, loads the icon table once and connects the
    /// generation client. Missing credentials or icons degrade the
    /// server instead of stopping it; bad rule patterns or refine settings
    /// do not.
    pub async fn from_config(config: &DewhaleConfig) -> Result<Self> {
        // Fail on bad settings before spending time on the icon fetch
        config.refine.validate()?;
        config.catalog.build_catalog()?;

        let icons = if config.catalog.load_icons {
            load_icon_table(
                &config.catalog.icon_source,
                Duration::from_secs(config.catalog.icon_timeout_secs),
            )
            .await
        } else {
            IconTable::empty()
        };

        let generator = match GenerationClient::new(config.generation.clone()) {
            Ok(client) => Some(client),
            Err(err) => {
                warn!(%err, "ui generation disabled");
                None
            }
        };

        let refiner = config.build_refiner(icons)?;
        info!(
            rules = refiner.catalog().len(),
            icons = refiner.icons().len(),
            generation = generator.is_some(),
            "refinement engine ready"
        );

        let prompts = PromptStore::new(&config.prompts.dir, &config.prompts.system_prompt);

        Ok(Self::new(refiner, generator, prompts))
    }
}
