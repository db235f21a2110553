//! Streaming expansion of token sequences against a concept source.
//!
//! [`LabelExpander`] matches greedy multi-token windows against concept
//! labels; [`UriExpander`] treats every token as a concept identifier.
//! Both are pull-based: each call to `next_token` produces at most one
//! output token, and original tokens are always emitted unchanged.
//!
//! Expansion tokens are co-located with the token that triggered them: same
//! position and offsets, a position increment of zero and a position length
//! equal to the number of input tokens the match consumed.

use std::collections::VecDeque;
use std::sync::Arc;

use log::trace;

use crate::analysis::token::Token;
use crate::error::{Result, SkosError};
use crate::skos::concept::{ExpansionKind, LabelKind};
use crate::skos::source::ConceptSource;

/// State of a [`LabelExpander`] between two output requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpansionState {
    /// Emitting previously queued tokens.
    DrainingStack,
    /// Pulling input until the buffer holds a full window or input ends.
    FillingBuffer,
    /// Trying buffered windows against the concept source, longest first.
    Matching,
    /// No window matched; the head of the buffer is emitted unchanged.
    PassingThrough,
    /// Input is exhausted and nothing is queued, or the stream was aborted.
    Exhausted,
}

/// Multi-token label expansion automaton.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use skos_analysis::analysis::token::Token;
/// use skos_analysis::skos::concept::{ExpansionKind, LabelKind};
/// use skos_analysis::skos::expander::LabelExpander;
/// use skos_analysis::skos::graph::RelationGraph;
/// use skos_analysis::skos::store::{ConceptStore, StoreConfig};
///
/// let mut graph = RelationGraph::new();
/// graph
///     .add_label("ex:2", LabelKind::Pref, "jumps", None)
///     .add_label("ex:2", LabelKind::Alt, "leaps", None);
/// let store = Arc::new(ConceptStore::build(&graph, StoreConfig::default()).unwrap());
///
/// let input = vec![Token::new("jumps", 0)].into_iter();
/// let texts: Vec<String> = LabelExpander::new(input, store, vec![ExpansionKind::AltLabel])
///     .map(|token| token.unwrap().text)
///     .collect();
/// assert_eq!(texts, vec!["jumps", "leaps"]);
/// ```
pub struct LabelExpander<I> {
    input: I,
    input_done: bool,
    source: Arc<dyn ConceptSource>,
    kinds: Vec<ExpansionKind>,
    match_kinds: Vec<LabelKind>,
    window_size: usize,
    buffer: VecDeque<Token>,
    stack: VecDeque<Token>,
    state: ExpansionState,
}

impl<I: Iterator<Item = Token>> LabelExpander<I> {
    /// Create an expander matching single tokens against every label kind.
    pub fn new(input: I, source: Arc<dyn ConceptSource>, kinds: Vec<ExpansionKind>) -> Self {
        LabelExpander {
            input,
            input_done: false,
            source,
            kinds,
            match_kinds: LabelKind::ALL.to_vec(),
            window_size: 1,
            buffer: VecDeque::new(),
            stack: VecDeque::new(),
            state: ExpansionState::DrainingStack,
        }
    }

    /// Longest number of consecutive tokens tried as one label. Clamped to at least 1.
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size.max(1);
        self
    }

    /// Label kinds a window may match.
    pub fn with_match_kinds(mut self, match_kinds: Vec<LabelKind>) -> Self {
        self.match_kinds = match_kinds;
        self
    }

    pub fn state(&self) -> ExpansionState {
        self.state
    }

    /// Tokens queued for emission ahead of the buffer.
    pub fn pending(&self) -> usize {
        self.stack.len()
    }

    /// Tokens read from the input but not yet emitted or queued.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Produce the next output token, or `None` at end of stream.
    ///
    /// A concept source failure aborts the stream: the error names the
    /// triggering token and every later call returns `Ok(None)`.
    pub fn next_token(&mut self) -> Result<Option<Token>> {
        loop {
            match self.state {
                ExpansionState::DrainingStack => match self.stack.pop_front() {
                    Some(token) => return Ok(Some(token)),
                    None => self.state = ExpansionState::FillingBuffer,
                },
                ExpansionState::FillingBuffer => {
                    self.fill_buffer();
                    self.state = if self.buffer.is_empty() {
                        ExpansionState::Exhausted
                    } else {
                        ExpansionState::Matching
                    };
                }
                ExpansionState::Matching => match self.longest_match() {
                    Ok(Some((window, concepts))) => {
                        let head = self.expand(window, &concepts);
                        return match head {
                            Ok(head) => {
                                self.state = ExpansionState::DrainingStack;
                                Ok(head)
                            }
                            Err(e) => Err(self.abort(e)),
                        };
                    }
                    Ok(None) => self.state = ExpansionState::PassingThrough,
                    Err(e) => return Err(self.abort(e)),
                },
                ExpansionState::PassingThrough => match self.buffer.pop_front() {
                    Some(token) => {
                        self.state = ExpansionState::DrainingStack;
                        return Ok(Some(token));
                    }
                    None => self.state = ExpansionState::FillingBuffer,
                },
                ExpansionState::Exhausted => return Ok(None),
            }
        }
    }

    fn fill_buffer(&mut self) {
        while !self.input_done && self.buffer.len() < self.window_size {
            match self.input.next() {
                Some(token) => self.buffer.push_back(token),
                None => self.input_done = true,
            }
        }
    }

    /// Find the longest buffered window, starting at the head, that names a concept.
    fn longest_match(&self) -> Result<Option<(usize, Vec<String>)>> {
        for window in (1..=self.buffer.len()).rev() {
            let candidate = self.window_text(window);
            let concepts = self
                .source
                .concepts_for_label(&candidate, &self.match_kinds)
                .map_err(|e| self.lookup_error(e))?;
            if !concepts.is_empty() {
                trace!("window '{candidate}' matched {} concept(s)", concepts.len());
                return Ok(Some((window, concepts)));
            }
        }
        Ok(None)
    }

    fn window_text(&self, window: usize) -> String {
        self.buffer
            .iter()
            .take(window)
            .map(|token| token.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Queue the expansions of a matched window followed by its trailing
    /// tokens and return the head token.
    fn expand(&mut self, window: usize, concepts: &[String]) -> Result<Option<Token>> {
        let Some(head) = self.buffer.front() else {
            return Ok(None);
        };

        let mut queued: Vec<Token> = Vec::new();
        for uri in concepts {
            for &kind in &self.kinds {
                let texts = self
                    .source
                    .expansions(uri, kind)
                    .map_err(|e| self.lookup_error(e))?;
                queued.extend(texts.into_iter().map(|text| head.expansion(text, kind, window)));
            }
        }

        let head = self.buffer.pop_front();
        self.stack.extend(queued);
        self.stack.extend(self.buffer.drain(..window - 1));
        Ok(head)
    }

    fn lookup_error(&self, error: SkosError) -> SkosError {
        match self.buffer.front() {
            Some(token) => SkosError::analysis(format!(
                "concept lookup failed for token '{}' at position {}: {error}",
                token.text, token.position
            )),
            None => SkosError::analysis(format!("concept lookup failed: {error}")),
        }
    }

    fn abort(&mut self, error: SkosError) -> SkosError {
        self.state = ExpansionState::Exhausted;
        self.buffer.clear();
        self.stack.clear();
        error
    }
}

impl<I: Iterator<Item = Token>> Iterator for LabelExpander<I> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

/// Single-token expansion for streams of concept identifiers.
///
/// Each input token is looked up as a URI. Known concepts are followed by
/// their expansions; anything else passes through unchanged.
pub struct UriExpander<I> {
    input: I,
    source: Arc<dyn ConceptSource>,
    kinds: Vec<ExpansionKind>,
    stack: VecDeque<Token>,
    done: bool,
}

impl<I: Iterator<Item = Token>> UriExpander<I> {
    pub fn new(input: I, source: Arc<dyn ConceptSource>, kinds: Vec<ExpansionKind>) -> Self {
        UriExpander {
            input,
            source,
            kinds,
            stack: VecDeque::new(),
            done: false,
        }
    }

    pub fn pending(&self) -> usize {
        self.stack.len()
    }

    /// Produce the next output token, or `None` at end of stream.
    pub fn next_token(&mut self) -> Result<Option<Token>> {
        if let Some(token) = self.stack.pop_front() {
            return Ok(Some(token));
        }
        if self.done {
            return Ok(None);
        }
        let Some(token) = self.input.next() else {
            self.done = true;
            return Ok(None);
        };

        match self.expansions_of(&token) {
            Ok(expansions) => {
                self.stack.extend(expansions);
                Ok(Some(token))
            }
            Err(e) => {
                self.done = true;
                self.stack.clear();
                Err(SkosError::analysis(format!(
                    "concept lookup failed for token '{}' at position {}: {e}",
                    token.text, token.position
                )))
            }
        }
    }

    fn expansions_of(&self, token: &Token) -> Result<Vec<Token>> {
        let uri = token.text.as_str();
        if !self.source.contains_concept(uri)? {
            return Ok(Vec::new());
        }

        let mut queued: Vec<Token> = Vec::new();
        for &kind in &self.kinds {
            let texts = self.source.expansions(uri, kind)?;
            queued.extend(texts.into_iter().map(|text| token.expansion(text, kind, 1)));
        }
        Ok(queued)
    }
}

impl<I: Iterator<Item = Token>> Iterator for UriExpander<I> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}
