use base_chat::{AlphabetRef, CodecConfig, FrameCodec, HashAlgorithm, Profile};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use super::args::CodecArgs;

/// Codec settings after merging CLI flags over configuration.
pub struct ResolvedCodec {
    pub alphabet_name: String,
    pub alphabet: AlphabetRef,
    pub profile: Profile,
    pub hash: HashAlgorithm,
    pub max_length: Option<usize>,
}

impl ResolvedCodec {
    pub fn codec(&self) -> FrameCodec<'_> {
        FrameCodec::builder()
            .alphabet(self.alphabet.as_ref())
            .profile(self.profile)
            .hash(self.hash)
            .max_length_opt(self.max_length)
            .build()
    }
}

/// Resolve alphabet, profile and hash: CLI flag first, then config.
pub fn resolve_codec(
    config: &CodecConfig,
    args: &CodecArgs,
    max_length: Option<usize>,
) -> Result<ResolvedCodec, Box<dyn std::error::Error>> {
    let alphabet_name = args
        .alphabet
        .clone()
        .unwrap_or_else(|| config.settings.alphabet_name().to_string());
    let alphabet = config.alphabet(&alphabet_name)?;
    alphabet.as_ref().log_diagnostics();

    let profile = args
        .profile
        .map(Profile::from)
        .unwrap_or_else(|| config.settings.profile());

    let hash = match &args.hash {
        Some(name) => HashAlgorithm::from_str(name)?,
        None => config.settings.hash_algorithm()?,
    };

    if profile == Profile::Integrity && !hash.is_cryptographic() {
        tracing::info!(hash = hash.as_str(), "checksum detects noise only, not tampering");
    }

    Ok(ResolvedCodec {
        alphabet_name,
        alphabet,
        profile,
        hash,
        max_length: max_length.or(config.settings.max_length),
    })
}

/// Read raw bytes from a file or stdin.
pub fn read_bytes(file: Option<&PathBuf>) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    match file {
        Some(path) => Ok(fs::read(path)?),
        None => {
            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Read a frame from a file or stdin.
///
/// Only trailing line breaks are stripped: a space is a digit of the
/// standard alphabet, so general whitespace trimming would corrupt frames.
pub fn read_frame(file: Option<&PathBuf>) -> Result<String, Box<dyn std::error::Error>> {
    let raw = read_bytes(file)?;
    let text = String::from_utf8(raw).map_err(|_| "Input is not valid UTF-8 text")?;
    Ok(text.trim_end_matches(['\r', '\n']).to_string())
}
