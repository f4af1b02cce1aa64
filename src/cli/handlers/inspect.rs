use crate::cli::{
    args::InspectArgs,
    config::{read_frame, resolve_codec},
    global::GlobalArgs,
};
use base_chat::{CodecConfig, Frame};

pub fn handle(
    args: InspectArgs,
    _global: &GlobalArgs,
    config: &CodecConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let resolved = resolve_codec(config, &args.codec, None)?;
    let codec = resolved.codec();

    let text = read_frame(args.file.as_ref())?;
    let frame = codec.parse(&text)?;
    let verified = frame.verify(codec.guard()).is_ok();

    if args.json {
        let report = serde_json::json!({
            "profile": resolved.profile.as_str(),
            "alphabet": &resolved.alphabet_name,
            "base": codec.alphabet().size(),
            "hash": checksum_name(&frame, resolved.hash.as_str()),
            "segments": &frame.segment_lengths,
            "frame_chars": text.chars().count(),
            "declared_length": frame.declared_len,
            "checksum": frame.checksum.as_ref().map(hex::encode),
            "verified": verified,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&resolved.alphabet_name, &codec, &frame, &text, verified);
    }

    if !verified {
        tracing::warn!("checksum does not match payload");
    }

    Ok(())
}

fn checksum_name<'a>(frame: &Frame, hash: &'a str) -> Option<&'a str> {
    frame.checksum.as_ref().map(|_| hash)
}

fn print_report(
    alphabet_name: &str,
    codec: &base_chat::FrameCodec<'_>,
    frame: &Frame,
    text: &str,
    verified: bool,
) {
    let lengths: Vec<String> = frame.segment_lengths.iter().map(|n| n.to_string()).collect();

    println!("Profile:         {}", codec.profile().as_str());
    println!(
        "Alphabet:        {} (base {})",
        alphabet_name,
        codec.alphabet().size()
    );
    println!(
        "Frame:           {} chars, segments [{}]",
        text.chars().count(),
        lengths.join(", ")
    );
    println!("Declared length: {} bytes", frame.declared_len);
    match &frame.checksum {
        Some(checksum) => {
            println!("Checksum:        {} ({})", hex::encode(checksum), codec.guard().name());
            println!("Verified:        {}", if verified { "yes" } else { "NO" });
        }
        None => println!("Checksum:        none"),
    }
}
