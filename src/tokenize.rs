//! Tokenization.
//!
//! The default word tokenizer splits on runs of non-word characters with
//! a regex compiled once per process and discards empty pieces; original
//! case is preserved.

use regex::Regex;
use std::sync::{Arc, LazyLock};

/// Runs of non-word characters, compiled once and shared process-wide.
static WORD_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w]+").expect("word-break pattern is valid"));

/// Splits an input into a lazy sequence of tokens.
pub trait Tokenizer: Send + Sync {
    fn tokenize<'a>(&self, input: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a>;
}

/// Default tokenizer: splits on `[^\w]+`, drops empty pieces.
///
/// `"Hello, world! Test..."` tokenizes to `["Hello", "world", "Test"]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer;

impl Tokenizer for WordTokenizer {
    fn tokenize<'a>(&self, input: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a> {
        Box::new(WORD_BREAKS.split(input).filter(|piece| !piece.is_empty()))
    }
}

/// Tokenizer wrapping a caller-supplied split function.
#[derive(Clone)]
pub struct FnTokenizer {
    split: Arc<dyn for<'a> Fn(&'a str) -> Box<dyn Iterator<Item = &'a str> + 'a> + Send + Sync>,
}

impl FnTokenizer {
    pub fn new(
        split: impl for<'a> Fn(&'a str) -> Box<dyn Iterator<Item = &'a str> + 'a>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        Self {
            split: Arc::new(split),
        }
    }
}

impl Tokenizer for FnTokenizer {
    fn tokenize<'a>(&self, input: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a> {
        (self.split)(input)
    }
}

impl std::fmt::Debug for FnTokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnTokenizer")
    }
}
