use crate::cli::{args::InfoArgs, global::GlobalArgs};
use base_chat::{CodecConfig, HashAlgorithm, Profile};

const PREVIEW_LEN: usize = 20;

pub fn handle(
    args: InfoArgs,
    _global: &GlobalArgs,
    config: &CodecConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let name = args
        .alphabet
        .clone()
        .unwrap_or_else(|| config.settings.alphabet_name().to_string());
    let alphabet = config.alphabet(&name)?;
    let alphabet = alphabet.as_ref();

    let default_profile = config.settings.profile();
    let default_hash = config.settings.hash_algorithm()?;
    let profiles = [Profile::Integrity, Profile::LengthOnly];

    if args.json {
        let hashes: Vec<_> = HashAlgorithm::ALL
            .iter()
            .map(|algo| {
                serde_json::json!({
                    "name": algo.as_str(),
                    "bytes": algo.output_size(),
                    "cryptographic": algo.is_cryptographic(),
                    "default": *algo == default_hash,
                })
            })
            .collect();
        let report = serde_json::json!({
            "alphabet": name,
            "base": alphabet.size(),
            "separator": alphabet.separator().to_string(),
            "preview": alphabet.preview(PREVIEW_LEN),
            "profiles": profiles.iter().map(|p| p.as_str()).collect::<Vec<_>>(),
            "default_profile": default_profile.as_str(),
            "hashes": hashes,
            "alphabets": config.alphabet_names(),
            "max_length": config.settings.max_length,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let separator = alphabet.separator();
    println!("Alphabet:  {} (base {})", name, alphabet.size());
    println!(
        "Separator: {} (U+{:04X})",
        separator,
        separator as u32
    );
    let suffix = if alphabet.size() > PREVIEW_LEN { "..." } else { "" };
    println!("Preview:   {}{}", alphabet.preview(PREVIEW_LEN), suffix);
    if let Some(max) = config.settings.max_length {
        println!("Max length: {} chars", max);
    }

    println!("\nProfiles:");
    for profile in profiles {
        let marker = if profile == default_profile { " (default)" } else { "" };
        println!(
            "  {:<12} {} segments{}",
            profile.as_str(),
            profile.segment_count(),
            marker
        );
    }

    println!("\nHashes:");
    for algo in HashAlgorithm::ALL {
        let marker = if algo == default_hash { " (default)" } else { "" };
        let kind = if algo.is_cryptographic() { "" } else { ", non-cryptographic" };
        println!(
            "  {:<10} {:>2} bytes{}{}",
            algo.as_str(),
            algo.output_size(),
            kind,
            marker
        );
    }

    println!("\nAlphabets:");
    for alphabet_name in config.alphabet_names() {
        println!("  {}", alphabet_name);
    }

    Ok(())
}
