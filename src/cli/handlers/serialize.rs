use crate::cli::{
    args::SerializeArgs,
    config::{read_input, write_output},
    global::GlobalArgs,
};
use partner_file::{AppliedResult, PartnerConfig, PartnerFileError, PartnerSerializer};

pub fn handle(
    args: SerializeArgs,
    global: &GlobalArgs,
    config: &PartnerConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let input_text = read_input(args.file.as_ref(), global)?;
    let applied: AppliedResult =
        serde_json::from_str(input_text.trim()).map_err(PartnerFileError::from)?;

    let mut serializer = PartnerSerializer::from_settings(&config.settings);
    if let Some(source) = args.source {
        serializer = serializer.source(source);
    }
    if let Some(date) = args.date {
        serializer = serializer.generated_on(date);
    }

    let output = serializer.serialize(&applied);
    write_output(&output, args.output.as_ref(), &config.settings.extension)
}
