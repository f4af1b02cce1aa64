use crate::cli::{
    args::EncodeArgs,
    config::{read_bytes, resolve_codec},
    global::GlobalArgs,
};
use base_chat::CodecConfig;
use std::fs;

pub fn handle(
    args: EncodeArgs,
    _global: &GlobalArgs,
    config: &CodecConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let resolved = resolve_codec(config, &args.codec, args.max_length)?;
    let codec = resolved.codec();

    let data = read_bytes(args.file.as_ref())?;
    let encoded = codec.encode(&data)?;

    tracing::info!(
        alphabet = %resolved.alphabet_name,
        bytes = data.len(),
        chars = encoded.chars().count(),
        "encoded payload"
    );

    if let Some(output_path) = &args.output {
        fs::write(output_path, encoded.as_bytes())?;
    } else {
        println!("{}", encoded);
    }

    Ok(())
}
