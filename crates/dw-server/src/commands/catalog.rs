use clap::Args;

use crate::{config::DewhaleConfig, Result};

#[derive(Debug, Args)]
pub struct CatalogArgs {
    /// Print the rules as JSON
    #[arg(long)]
    pub json: bool,
}

/// Prints the effective rule catalog in match order.
pub async fn catalog_command(args: CatalogArgs, config: &DewhaleConfig) -> Result<()> {
    let catalog = config.catalog.build_catalog()?;

    if args.json {
        let rules: Vec<_> = catalog
            .rules()
            .iter()
            .map(|rule| serde_json::json!({ "pattern": rule.matcher.to_string(), "module": rule.module }))
            .collect();
        let text = serde_json::to_string_pretty(&rules)
            .map_err(|e| crate::ServerError::Config(format!("Failed to render catalog: {}", e)))?;
        println!("{text}");
        return Ok(());
    }

    for (index, rule) in catalog.rules().iter().enumerate() {
        println!("{:>3}  {:<24} {}", index + 1, rule.matcher.to_string(), rule.module);
    }
    println!(
        "fallback: {} from {} (rendered as <{}>)",
        config.refine.fallback_icon, config.refine.icon_module, config.refine.fallback_element
    );
    Ok(())
}
