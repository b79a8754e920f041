use crate::cli::{args::AliasesArgs, global::GlobalArgs};
use partner_file::{AliasTable, PartnerConfig};
use std::collections::BTreeMap;

pub fn handle(
    args: AliasesArgs,
    _global: &GlobalArgs,
    config: &PartnerConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let table = config.alias_table();

    let canonicals: Vec<&str> = match &args.field {
        Some(field) => {
            let canonical = if table.is_known(field) {
                field.as_str()
            } else {
                table
                    .resolve(field)
                    .ok_or_else(|| format!("No field matches '{}'", field))?
            };
            vec![canonical]
        }
        None => table.canonical_keys().collect(),
    };

    if args.json {
        let listing: BTreeMap<&str, &[String]> = canonicals
            .iter()
            .map(|c| (*c, table.aliases_of(c).unwrap_or_default()))
            .collect();
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    print_listing(&table, &canonicals);
    Ok(())
}

fn print_listing(table: &AliasTable, canonicals: &[&str]) {
    let width = canonicals.iter().map(|c| c.chars().count()).max().unwrap_or(0);
    for canonical in canonicals {
        let aliases = table.aliases_of(canonical).unwrap_or_default();
        println!("  {:<width$}  {}", canonical, aliases.join(", "), width = width);
    }
}
