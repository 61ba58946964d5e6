//! Keypad-style calculator session.
//!
//! A session collects keystrokes into a bounded input line. Pressing equals
//! compiles and evaluates the line, stores the formatted answer and clears
//! the input. The last answer can be recalled while the input is empty.

use crate::api::{self, Engine, Error};
use crate::binding::Binding;
use tracing::debug;

/// Configuration options for a [`Session`].
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Size of the input buffer. One slot stays reserved, so at most
    /// `capacity - 1` bytes of input are kept.
    ///
    /// Default: 64
    pub capacity: usize,

    /// Decimal places used when formatting the answer.
    ///
    /// Default: 2
    pub precision: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            capacity: 64,
            precision: 2,
        }
    }
}

/// # Example
///
/// ```
/// use keycalc_core::session::Session;
///
/// let mut session = Session::default();
/// for c in "1/3".chars() {
///     session.push(c);
/// }
/// assert!((session.equals().unwrap() - 1.0 / 3.0).abs() < 1e-12);
/// assert_eq!(session.recall(), Some("0.33"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Session {
    options: SessionOptions,
    input: String,
    last_answer: String,
}

impl Session {
    pub fn new(options: SessionOptions) -> Self {
        Self {
            options,
            input: String::new(),
            last_answer: String::new(),
        }
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Append a keystroke. Returns false, dropping it, when the buffer is full.
    pub fn push(&mut self, c: char) -> bool {
        if self.input.len() + c.len_utf8() < self.options.capacity {
            self.input.push(c);
            true
        } else {
            debug!(%c, capacity = self.options.capacity, "Input buffer full");
            false
        }
    }

    /// Evaluate the input with the built-in functions only.
    pub fn equals(&mut self) -> Result<f64, Error> {
        let result = api::compile(&self.input, &[]).map(|expr| expr.evaluate());
        self.finish(result)
    }

    /// Evaluate the input against an engine and per-call bindings.
    pub fn equals_with<'env>(
        &mut self,
        engine: &Engine<'env>,
        bindings: &[Binding<'env>],
    ) -> Result<f64, Error> {
        let result = engine.compile(&self.input, bindings).map(|expr| expr.evaluate());
        self.finish(result)
    }

    fn finish(&mut self, result: Result<f64, Error>) -> Result<f64, Error> {
        let value = *result.as_ref().unwrap_or(&f64::NAN);
        self.last_answer = format!("{:.*}", self.options.precision, value);
        debug!(input = %self.input, answer = %self.last_answer, "Evaluated");
        self.input.clear();
        result
    }

    /// The last answer, available only while nothing has been typed.
    pub fn recall(&self) -> Option<&str> {
        if self.input.is_empty() && !self.last_answer.is_empty() {
            Some(&self.last_answer)
        } else {
            None
        }
    }

    /// The text a one-line display would show: the input being typed, or the
    /// last answer when the input is empty.
    pub fn display(&self) -> &str {
        if self.input.is_empty() {
            &self.last_answer
        } else {
            &self.input
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Drop the typed input and keep the last answer.
    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    /// Clear the input and forget the last answer.
    pub fn reset(&mut self) {
        self.input.clear();
        self.last_answer.clear();
    }
}
