use crate::cli::{args::ApplyArgs, config::read_input, global::GlobalArgs};
use partner_file::{PartnerConfig, PartnerParser, apply_parsed_fields};
use std::collections::HashSet;

pub fn handle(
    args: ApplyArgs,
    global: &GlobalArgs,
    config: &PartnerConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = read_input(args.file.as_ref(), global)?;
    let table = config.alias_table();
    let parsed = PartnerParser::with_table(&table).parse(&content);

    for warning in &parsed.warnings {
        tracing::warn!("{}", warning);
    }
    if !parsed.ok {
        for error in &parsed.errors {
            tracing::error!("{}", error);
        }
        if !args.allow_errors {
            return Err(format!(
                "{} line(s) could not be parsed. Use --allow-errors to apply the valid lines anyway.",
                parsed.errors.len()
            )
            .into());
        }
    }

    let mut selected: HashSet<String> = match args.only {
        Some(keys) => keys.into_iter().map(|k| k.trim().to_string()).collect(),
        None => parsed.raw_keys(),
    };
    if args.recognized_only {
        let unrecognized: HashSet<&str> = parsed.unrecognized().map(|f| f.raw_key.as_str()).collect();
        selected.retain(|key| !unrecognized.contains(key.as_str()));
    }

    let applied = apply_parsed_fields(&parsed.fields, &selected);

    let output = if args.pretty {
        serde_json::to_string_pretty(&applied)?
    } else {
        serde_json::to_string(&applied)?
    };
    println!("{}", output);

    Ok(())
}
