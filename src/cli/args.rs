use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encode binary data into a chat-safe frame
    Encode(EncodeArgs),
    /// Decode a frame back into binary data
    Decode(DecodeArgs),
    /// Show what a frame carries without writing the payload
    Inspect(InspectArgs),
    /// Show alphabet, profile and hash details
    Info(InfoArgs),
}

/// Framing options shared by every command that touches a frame
#[derive(Args, Debug, Default)]
pub struct CodecArgs {
    /// Alphabet name (default from config, normally "standard")
    #[arg(short = 'a', long, value_name = "NAME")]
    pub alphabet: Option<String>,

    /// Frame profile
    #[arg(short = 'p', long, value_enum)]
    pub profile: Option<ProfileArg>,

    /// Checksum algorithm for the integrity profile
    #[arg(long, value_name = "ALG")]
    pub hash: Option<String>,
}

/// Frame profiles (CLI enum)
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ProfileArg {
    /// checksum|length|payload
    Integrity,
    /// length|payload
    LengthOnly,
}

impl From<ProfileArg> for base_chat::Profile {
    fn from(cli: ProfileArg) -> Self {
        match cli {
            ProfileArg::Integrity => base_chat::Profile::Integrity,
            ProfileArg::LengthOnly => base_chat::Profile::LengthOnly,
        }
    }
}

/// Arguments for encoding data
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Input file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub codec: CodecArgs,

    /// Fail if the frame is longer than this many characters
    #[arg(short = 'm', long, value_name = "CHARS")]
    pub max_length: Option<usize>,

    /// Output file (writes to stdout if not provided)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}

/// Arguments for decoding data
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Input file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub codec: CodecArgs,

    /// Output file (writes to stdout if not provided)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}

/// Arguments for inspecting a frame
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Input file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub codec: CodecArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the info command
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Alphabet to describe
    #[arg(short = 'a', long, value_name = "NAME")]
    pub alphabet: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
