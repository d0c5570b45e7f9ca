use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use dw_refine::IconTable;
use tracing::info;

use crate::{config::DewhaleConfig, Result};

#[derive(Debug, Args)]
pub struct RefineArgs {
    /// Generated module to refine, `-` for stdin
    pub input: PathBuf,

    /// Write the refined module here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Offline refinement. Icons are not fetched, so icon tags resolve only
/// through the rule catalog or the fallback.
pub async fn refine_command(args: RefineArgs, config: &DewhaleConfig) -> Result<()> {
    let source = read_input(&args.input)?;

    let refiner = config.build_refiner(IconTable::empty())?;
    let refined = refiner.refine(&source)?;

    info!(
        modules = refined.resolution.imports_by_module.len(),
        fallbacks = refined.resolution.fallback_names.len(),
        "refined {}",
        args.input.display()
    );

    match &args.output {
        Some(path) => std::fs::write(path, &refined.code)?,
        None => std::io::stdout().lock().write_all(refined.code.as_bytes())?,
    }
    Ok(())
}

fn read_input(input: &Path) -> Result<String> {
    if input.as_os_str() == "-" {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        return Ok(source);
    }
    Ok(std::fs::read_to_string(input)?)
}
