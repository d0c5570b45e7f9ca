use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{GenerationError, Result};

pub const DEFAULT_SYSTEM_PROMPT: &str = "ui-gen.md";

/// Directory of prompt templates. Files are read on every request so edits
/// take effect without a restart.
#[derive(Debug, Clone)]
pub struct PromptStore {
    dir: PathBuf,
    system_prompt: String,
}

impl PromptStore {
    pub fn new(dir: impl Into<PathBuf>, system_prompt: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            system_prompt: system_prompt.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn system_prompt_path(&self) -> PathBuf {
        self.dir.join(&self.system_prompt)
    }

    pub async fn load_system_prompt(&self) -> Result<String> {
        let path = self.system_prompt_path();
        let prompt = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| GenerationError::Prompt {
                path: path.clone(),
                source,
            })?;
        debug!(path = %path.display(), bytes = prompt.len(), "loaded system prompt");
        Ok(prompt)
    }
}

impl Default for PromptStore {
    fn default() -> Self {
        Self::new("prompts", DEFAULT_SYSTEM_PROMPT)
    }
}
