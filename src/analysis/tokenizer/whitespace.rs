//! Whitespace tokenizer implementation.

use super::Tokenizer;

use crate::analysis::token::{Token, TokenStream, TokenType};
use crate::error::Result;

/// A tokenizer that splits text on whitespace.
#[derive(Clone, Debug, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    /// Create a new whitespace tokenizer.
    pub fn new() -> Self {
        WhitespaceTokenizer
    }

    fn detect_token_type(word: &str) -> TokenType {
        if word.chars().all(|c| c.is_ascii_digit()) {
            TokenType::Num
        } else if word.contains(':') && !word.ends_with(':') {
            TokenType::Url
        } else if word.chars().all(|c| c.is_ascii_punctuation()) {
            TokenType::Punctuation
        } else if word.chars().all(|c| c.is_ascii_alphanumeric()) {
            TokenType::Alphanum
        } else {
            TokenType::Other
        }
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = Vec::new();
        let mut start: Option<usize> = None;

        for (index, c) in text.char_indices() {
            match (c.is_whitespace(), start) {
                (true, Some(begin)) => {
                    tokens.push((begin, index));
                    start = None;
                }
                (false, None) => start = Some(index),
                _ => {}
            }
        }
        if let Some(begin) = start {
            tokens.push((begin, text.len()));
        }

        let tokens: Vec<Token> = tokens
            .into_iter()
            .enumerate()
            .map(|(position, (begin, end))| {
                let word = &text[begin..end];
                Token::with_offsets(word, position, begin, end)
                    .with_token_type(Self::detect_token_type(word))
            })
            .collect();

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}
