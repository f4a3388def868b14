//! Configuration surface of a [`StructuredGenerator`].
//!
//! [`StructuredGenerator`]: crate::generator::StructuredGenerator

use std::sync::Arc;

use serde_json::Value;

/// A seed exchange: one input value and the output value it should map
/// to, both conforming to the declared shapes. Examples are flattened
/// into user/assistant turn pairs at the head of every conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct Example {
    /// Input value conforming to the input shape.
    pub input: Value,
    /// Output value conforming to the output shape.
    pub output: Value,
}

impl Example {
    /// Create an example pair.
    pub fn new(input: Value, output: Value) -> Self {
        Self { input, output }
    }
}

/// A configuration value that is either fixed or recomputed on demand.
///
/// Computed values support configuration that changes over the
/// generator's lifetime; the engine resolves them exactly once per
/// generation attempt so a single attempt sees a consistent view.
#[derive(Clone)]
pub enum Provided<T> {
    /// A literal value, fixed at construction.
    Static(T),
    /// A producer invoked at resolve time.
    Computed(Arc<dyn Fn() -> T + Send + Sync>),
}

impl<T: Clone> Provided<T> {
    /// Resolve to a concrete value.
    pub fn resolve(&self) -> T {
        match self {
            Provided::Static(value) => value.clone(),
            Provided::Computed(producer) => producer(),
        }
    }
}

impl<T> std::fmt::Debug for Provided<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provided::Static(_) => f.write_str("Provided::Static(..)"),
            Provided::Computed(_) => f.write_str("Provided::Computed(..)"),
        }
    }
}

/// Default bound on the history buffer, in entries.
pub const DEFAULT_MAX_MESSAGES: usize = 10;

/// Default number of full restarts after the first failed attempt.
pub const DEFAULT_RETRIES: u32 = 2;

/// Default number of repair round-trips per attempt.
pub const DEFAULT_FIX_TRIES: u32 = 1;

/// Options accepted by the generator constructor.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Free-text hint embedded in the instruction prompt under its own
    /// section.
    pub conversion_help: Option<Provided<String>>,
    /// Seed exchanges replayed at the head of every conversation.
    pub examples: Option<Provided<Vec<Example>>>,
    /// Bound on the history buffer, in entries.
    pub max_messages: usize,
    /// Log assembled message lists and raw replies at debug level.
    pub verbose: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl GeneratorOptions {
    /// Options with the default bound and no hint or examples.
    pub fn new() -> Self {
        Self {
            conversion_help: None,
            examples: None,
            max_messages: DEFAULT_MAX_MESSAGES,
            verbose: false,
        }
    }

    /// Set a fixed conversion hint.
    pub fn with_conversion_help(mut self, help: impl Into<String>) -> Self {
        self.conversion_help = Some(Provided::Static(help.into()));
        self
    }

    /// Set a conversion hint recomputed on every attempt.
    pub fn with_computed_conversion_help(
        mut self,
        producer: impl Fn() -> String + Send + Sync + 'static,
    ) -> Self {
        self.conversion_help = Some(Provided::Computed(Arc::new(producer)));
        self
    }

    /// Set a fixed example list.
    pub fn with_examples(mut self, examples: Vec<Example>) -> Self {
        self.examples = Some(Provided::Static(examples));
        self
    }

    /// Set an example list recomputed on every attempt.
    pub fn with_computed_examples(
        mut self,
        producer: impl Fn() -> Vec<Example> + Send + Sync + 'static,
    ) -> Self {
        self.examples = Some(Provided::Computed(Arc::new(producer)));
        self
    }

    /// Set the history bound, in entries.
    pub fn with_max_messages(mut self, max_messages: usize) -> Self {
        self.max_messages = max_messages;
        self
    }

    /// Enable verbose debug logging of prompts and replies.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Resolve the conversion hint for one attempt.
    pub(crate) fn resolve_conversion_help(&self) -> Option<String> {
        self.conversion_help.as_ref().map(Provided::resolve)
    }

    /// Resolve the example list for one attempt.
    pub(crate) fn resolve_examples(&self) -> Vec<Example> {
        self.examples
            .as_ref()
            .map(Provided::resolve)
            .unwrap_or_default()
    }
}
