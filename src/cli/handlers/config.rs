use crate::cli::{args::ConfigArgs, global::GlobalArgs};
use partner_file::{PARTNER_MIME, PartnerConfig};

pub fn handle(
    args: ConfigArgs,
    _global: &GlobalArgs,
    config: &PartnerConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }

    println!("source     {}", config.settings.source);
    println!("extension  .{}", config.settings.extension);
    println!("mime       {}", PARTNER_MIME);
    println!("fields     {}", config.alias_table().len());

    if !config.aliases.is_empty() {
        println!();
        println!("Extra aliases:");
        for (canonical, aliases) in &config.aliases {
            println!("  {}  {}", canonical, aliases.join(", "));
        }
    }

    Ok(())
}
