//! HTTP delivery endpoint and command-line front end of the refinement
//! engine.
//!
//! [`routes::create_router`] wires the generation service and the
//! [`dw_refine::Refiner`] behind `/ui-gen`, `/refine` and `/health`;
//! [`config::DewhaleConfig`] carries everything the process reads at
//! startup.

pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod routes;
pub mod server;
pub mod state;

pub use config::DewhaleConfig;
pub use error::{Result, ServerError, GENERIC_FAILURE};
pub use state::AppState;

#[cfg(test)]
mod tests;
