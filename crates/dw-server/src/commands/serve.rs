use std::net::SocketAddr;

use clap::Args;

use crate::{config::DewhaleConfig, server::serve, state::AppState, Result};

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to listen on (overrides `[server] bind`)
    #[arg(short, long)]
    pub bind: Option<SocketAddr>,
}

pub async fn serve_command(args: ServeArgs, config: &DewhaleConfig) -> Result<()> {
    let addr = args.bind.unwrap_or(config.server.bind);
    let state = AppState::from_config(config).await?;
    serve(state, addr).await
}
