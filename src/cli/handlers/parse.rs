use crate::cli::{args::ParseArgs, config::read_input, global::GlobalArgs};
use partner_file::{ParseResult, PartnerConfig, PartnerParser};

pub fn handle(
    args: ParseArgs,
    global: &GlobalArgs,
    config: &PartnerConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = read_input(args.file.as_ref(), global)?;
    let table = config.alias_table();
    let result = PartnerParser::with_table(&table).parse(&content);

    if args.json {
        let output = if args.pretty {
            serde_json::to_string_pretty(&result)?
        } else {
            serde_json::to_string(&result)?
        };
        println!("{}", output);
    } else {
        print_report(&result);
    }

    if !result.ok {
        return Err(format!("{} line(s) could not be parsed", result.errors.len()).into());
    }
    Ok(())
}

fn print_report(result: &ParseResult) {
    let meta = &result.metadata;
    if !meta.is_empty() {
        println!("Metadata:");
        if let Some(version) = &meta.version {
            println!("  version    {}", version);
        }
        if let Some(generated) = &meta.generated_at {
            println!("  generated  {}", generated);
        }
        if let Some(source) = &meta.source {
            println!("  source     {}", source);
        }
        println!();
    }

    println!("Fields ({}):", result.fields.len());
    let key_width = result
        .fields
        .iter()
        .map(|f| f.canonical_key.chars().count())
        .max()
        .unwrap_or(0);
    for field in &result.fields {
        let marker = if field.recognized { ' ' } else { '?' };
        println!(
            "  {:>4} {} {:<7} {:<width$}  {}",
            field.line,
            marker,
            field.section.as_str(),
            field.canonical_key,
            field.value,
            width = key_width
        );
    }

    if !result.warnings.is_empty() {
        println!();
        println!("Warnings ({}):", result.warnings.len());
        for warning in &result.warnings {
            println!("  {}", warning);
        }
    }

    if !result.errors.is_empty() {
        println!();
        println!("Errors ({}):", result.errors.len());
        for error in &result.errors {
            println!("  {}", error);
        }
    }
}
