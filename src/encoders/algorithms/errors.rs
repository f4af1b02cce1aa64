use thiserror::Error;

/// Errors that can occur while encoding or decoding a frame.
///
/// Every variant is terminal to the call that produced it. The codec never
/// retries; the caller decides whether to split the payload, switch profile,
/// or ask for the text again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    /// The input contains a character that is not a digit of the alphabet.
    ///
    /// `position` counts chars from the start of the frame, so it matches
    /// what a user sees in a chat window rather than UTF-8 byte offsets.
    #[error("invalid symbol '{symbol}' (U+{code:04X}) at position {position}", code = codepoint(.symbol))]
    InvalidSymbol { symbol: char, position: usize },

    /// Wrong segment count, empty segment, or a value that does not fit the
    /// width its segment declares.
    #[error("malformed frame: {0}")]
    MalformedFrame(String),

    /// The reconstructed payload hashes to something other than the
    /// transmitted checksum.
    #[error("checksum mismatch: frame carries {expected}, payload hashes to {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    /// The payload cannot be described by the 2-byte length field.
    #[error("payload of {len} bytes exceeds the {max}-byte frame limit")]
    PayloadTooLarge { len: usize, max: usize },

    /// The finished frame is longer than the caller allowed.
    #[error("encoded frame is {length} characters, limit is {max}")]
    LengthExceeded { length: usize, max: usize },
}

impl FrameError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        FrameError::MalformedFrame(reason.into())
    }

    /// Short, stable name of the error kind, handy for logs and JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            FrameError::InvalidSymbol { .. } => "invalid_symbol",
            FrameError::MalformedFrame(_) => "malformed_frame",
            FrameError::ChecksumMismatch { .. } => "checksum_mismatch",
            FrameError::PayloadTooLarge { .. } => "payload_too_large",
            FrameError::LengthExceeded { .. } => "length_exceeded",
        }
    }
}

/// A value needs more bytes than the width it was asked to fill.
///
/// The frame codec turns this into [`FrameError::MalformedFrame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("value needs {needed} bytes but only {width} are available")]
pub struct Overflow {
    pub needed: usize,
    pub width: usize,
}

/// Errors raised while assembling an alphabet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlphabetError {
    /// Fewer than two symbols survived de-duplication and exclusion.
    #[error("alphabet needs at least 2 symbols, got {0}")]
    TooSmall(usize),

    /// A configured range names something that is not a Unicode scalar value.
    #[error("invalid codepoint U+{0:X} in alphabet range")]
    InvalidCodepoint(u32),

    /// A range whose end lies before its start.
    #[error("alphabet range U+{start:X}..=U+{end:X} is reversed")]
    ReversedRange { start: u32, end: u32 },

    /// No built-in or configured alphabet carries this name.
    #[error("alphabet '{name}' not found{}", suggestion_hint(.suggestion))]
    UnknownAlphabet {
        name: String,
        suggestion: Option<String>,
    },
}

/// Errors raised while loading configuration or resolving its names.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown hash algorithm '{0}'")]
    UnknownHash(String),

    #[error("unknown frame profile '{0}' (expected 'integrity' or 'length_only')")]
    UnknownProfile(String),

    #[error(transparent)]
    Alphabet(#[from] AlphabetError),

    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

fn codepoint(symbol: &char) -> u32 {
    *symbol as u32
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(name) => format!(", did you mean '{}'?", name),
        None => String::new(),
    }
}

/// Calculate Levenshtein distance between two strings
fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let len2 = s2.chars().count();
    if s1.is_empty() {
        return len2;
    }

    let mut prev_row: Vec<usize> = (0..=len2).collect();
    let mut curr_row = vec![0; len2 + 1];

    for (i, c1) in s1.chars().enumerate() {
        curr_row[0] = i + 1;

        for (j, c2) in s2.chars().enumerate() {
            let cost = if c1 == c2 { 0 } else { 1 };
            curr_row[j + 1] = (curr_row[j] + 1)
                .min(prev_row[j + 1] + 1)
                .min(prev_row[j] + cost);
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[len2]
}

/// Find the closest matching name, used to suggest a fix for typos.
pub fn find_closest_name<'a>(name: &str, available: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let threshold = if name.len() < 5 { 2 } else { 3 };

    available
        .into_iter()
        .map(|candidate| (levenshtein_distance(name, candidate), candidate))
        .filter(|(distance, _)| *distance <= threshold)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, candidate)| candidate.to_string())
}
