use std::collections::HashMap;
use std::sync::OnceLock;

use crate::encoders::algorithms::errors::{AlphabetError, FrameError};

/// Reserved frame separator. Never a member of any alphabet.
pub const SEPARATOR: char = '|';

/// Name under which the built-in alphabet is registered.
pub const STANDARD_ALPHABET: &str = "standard";

const STANDARD_ASCII: &str = concat!(
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789",
    "!@#$%^&()_-+={}[];'\"<>,.?/~ ",
);

// Inclusive ranges, in wire order.
const STANDARD_RANGES: [(u32, u32); 9] = [
    (0x00A1, 0x02FE), // Latin-1 supplement through spacing modifiers
    (0x0370, 0x03FE), // Greek and Coptic
    (0x0400, 0x0484), // Cyrillic, up to the combining marks
    (0x0488, 0x04FE), // Cyrillic, after U+0487
    (0x0500, 0x052E), // Cyrillic supplement
    (0x0530, 0x058E), // Armenian
    (0x1E00, 0x1EFE), // Latin extended additional
    (0x2100, 0x214E), // Letterlike symbols
    (0x2190, 0x21FE), // Arrows
];

// Look-alikes that chat clients render ambiguously.
const STANDARD_EXCLUDED: [char; 4] = ['\u{2194}', '\u{147}', '\u{DA}', '\u{21D4}'];

static STANDARD: OnceLock<Alphabet> = OnceLock::new();

/// Ordered, de-duplicated set of symbols used as the digits of a base-N numeral.
///
/// The order is part of the wire format: a frame can only be decoded with the
/// exact alphabet that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
    index: HashMap<char, usize>,
}

impl Alphabet {
    /// Returns the process-wide standard alphabet (BASE 1674).
    ///
    /// Built on first use; concurrent first callers all observe the same
    /// instance.
    pub fn standard() -> &'static Alphabet {
        STANDARD.get_or_init(|| {
            let mut builder = Alphabet::builder().chars(STANDARD_ASCII);
            for (start, end) in STANDARD_RANGES {
                builder = builder.range(start, end);
            }
            builder.exclude(STANDARD_EXCLUDED).assemble()
        })
    }

    /// Starts building a custom alphabet.
    pub fn builder() -> AlphabetBuilder {
        AlphabetBuilder::default()
    }

    /// Creates an alphabet from an ordered list of symbols.
    ///
    /// Duplicates and the separator are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`AlphabetError::TooSmall`] if fewer than two symbols remain.
    pub fn new(symbols: impl IntoIterator<Item = char>) -> Result<Self, AlphabetError> {
        let mut builder = Alphabet::builder();
        builder.pending.extend(symbols.into_iter().map(Source::Char));
        builder.build()
    }

    fn from_unique(symbols: Vec<char>) -> Self {
        let index = symbols.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        Alphabet { symbols, index }
    }

    /// Number of symbols, the radix of every numeral written with this alphabet.
    pub fn size(&self) -> usize {
        self.symbols.len()
    }

    /// Symbol for digit `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.size()`. Digits always come from division by
    /// `size()`, so this never fires on user input.
    pub fn symbol_at(&self, i: usize) -> char {
        self.symbols[i]
    }

    /// Digit value of `symbol`.
    ///
    /// `position` is only used to describe the failure.
    pub fn value_of(&self, symbol: char, position: usize) -> Result<usize, FrameError> {
        self.index
            .get(&symbol)
            .copied()
            .ok_or(FrameError::InvalidSymbol { symbol, position })
    }

    /// Like [`value_of`](Self::value_of) without error context.
    pub fn try_value_of(&self, symbol: char) -> Option<usize> {
        self.index.get(&symbol).copied()
    }

    /// Whether `symbol` is a digit of this alphabet.
    pub fn contains(&self, symbol: char) -> bool {
        self.index.contains_key(&symbol)
    }

    /// The segment separator, [`SEPARATOR`] for every alphabet.
    pub fn separator(&self) -> char {
        SEPARATOR
    }

    /// All symbols in digit order.
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// The first `n` symbols as a string, for display.
    pub fn preview(&self, n: usize) -> String {
        self.symbols.iter().take(n).collect()
    }

    /// Emits the alphabet's vital statistics at info level.
    ///
    /// Call once at start-up; nothing is logged when the alphabet is built.
    pub fn log_diagnostics(&self) {
        tracing::info!(
            base = self.size(),
            separator = %self.separator(),
            first = %self.symbol_at(0),
            last = %self.symbol_at(self.size() - 1),
            "alphabet ready"
        );
    }
}

#[derive(Debug, Clone, Copy)]
enum Source {
    Char(char),
    Range(u32, u32),
}

/// Assembles an [`Alphabet`] from explicit symbols and inclusive code-point
/// ranges, in the order they are added.
#[derive(Debug, Clone, Default)]
pub struct AlphabetBuilder {
    pending: Vec<Source>,
    excluded: Vec<char>,
}

impl AlphabetBuilder {
    /// Appends every char of `chars`.
    pub fn chars(mut self, chars: &str) -> Self {
        self.pending.extend(chars.chars().map(Source::Char));
        self
    }

    /// Appends the inclusive code-point range `start..=end`.
    pub fn range(mut self, start: u32, end: u32) -> Self {
        self.pending.push(Source::Range(start, end));
        self
    }

    /// Removes these symbols from the final alphabet.
    pub fn exclude(mut self, symbols: impl IntoIterator<Item = char>) -> Self {
        self.excluded.extend(symbols);
        self
    }

    /// Validates and builds the alphabet.
    ///
    /// # Errors
    ///
    /// - [`AlphabetError::ReversedRange`] if a range ends before it starts
    /// - [`AlphabetError::InvalidCodepoint`] if a range covers a surrogate or
    ///   runs past U+10FFFF
    /// - [`AlphabetError::TooSmall`] if fewer than two symbols remain
    pub fn build(self) -> Result<Alphabet, AlphabetError> {
        for source in &self.pending {
            if let Source::Range(start, end) = *source {
                if end < start {
                    return Err(AlphabetError::ReversedRange { start, end });
                }
                if let Some(bad) = (start..=end).find(|&cp| char::from_u32(cp).is_none()) {
                    return Err(AlphabetError::InvalidCodepoint(bad));
                }
            }
        }

        let alphabet = self.assemble();
        if alphabet.size() < 2 {
            return Err(AlphabetError::TooSmall(alphabet.size()));
        }
        Ok(alphabet)
    }

    // Skips anything that is not a scalar value; `build` has rejected those already.
    fn assemble(self) -> Alphabet {
        let mut seen = std::collections::HashSet::new();
        let mut symbols = Vec::new();

        let candidates = self.pending.into_iter().flat_map(|source| match source {
            Source::Char(c) => vec![c],
            Source::Range(start, end) => (start..=end).filter_map(char::from_u32).collect(),
        });

        for c in candidates {
            if c == SEPARATOR || self.excluded.contains(&c) {
                continue;
            }
            if seen.insert(c) {
                symbols.push(c);
            }
        }

        Alphabet::from_unique(symbols)
    }
}
