//! Upstream collaborators of the refinement engine: the chat-completion
//! service that produces component code, the prompt templates it is fed with,
//! and the icon catalog loaded at startup.

pub mod client;
pub mod error;
pub mod extract;
pub mod icons;
pub mod prompt;

pub use client::{Generation, GenerationClient, GenerationConfig, GenerationRequest, Usage};
pub use error::{GenerationError, Result};
pub use extract::{extract_code_block, Extracted};
pub use icons::{icon_table_from_catalog, load_icon_table, LUCIDE_ICON_NODES};
pub use prompt::{PromptStore, DEFAULT_SYSTEM_PROMPT};
