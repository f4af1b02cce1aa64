use crate::cli::{
    args::DecodeArgs,
    config::{read_frame, resolve_codec},
    global::GlobalArgs,
};
use base_chat::CodecConfig;
use std::fs;
use std::io::{self, Write};

pub fn handle(
    args: DecodeArgs,
    _global: &GlobalArgs,
    config: &CodecConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let resolved = resolve_codec(config, &args.codec, None)?;
    let codec = resolved.codec();

    let text = read_frame(args.file.as_ref())?;
    let data = codec.decode(&text).inspect_err(|e| {
        tracing::debug!(kind = e.kind(), "decode failed");
    })?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &data)?;
    } else {
        io::stdout().write_all(&data)?;
    }

    Ok(())
}
