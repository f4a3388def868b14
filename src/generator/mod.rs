//! The schema-constrained generation/repair engine.
//!
//! [`StructuredGenerator`] drives a multi-turn conversation with a
//! [`ChatBackend`]: it assembles a prompt from the declared shapes,
//! sends the caller's input, extracts and validates the reply, and runs
//! a two-tier recovery protocol when the reply does not conform. The
//! inner repair loop re-prompts conversationally with the validation
//! diagnostics; the outer retry loop discards the failed conversation
//! and starts over, which avoids compounding a bad conversational
//! anchor.
//!
//! One generator instance owns one logical conversation. `generate`
//! takes `&mut self`, so safe Rust callers cannot overlap two calls on
//! the same instance; use separate instances for concurrent generation.

pub mod history;
pub mod options;

use std::sync::Arc;

use serde_json::Value;

use crate::llms::base_backend::{generate_call_id, ChatBackend};
use crate::schema::validate::Violation;
use crate::schema::{describe, validate, Shape, ValueKind};
use crate::types::messages::{ChatMessage, HistoryEntry};
use crate::utilities::errors::GenerateError;
use crate::utilities::{extractor, prompts};

use history::HistoryBuffer;
use options::{Example, GeneratorOptions, DEFAULT_FIX_TRIES, DEFAULT_RETRIES};

/// Why a reply was refused.
#[derive(Debug, Clone)]
enum Rejection {
    /// The extracted text was not well-formed JSON (or no JSON object
    /// was present at all).
    Parse(String),
    /// The parsed value failed validation against the output shape.
    Schema(Vec<Violation>),
}

impl Rejection {
    /// The correction message sent back to the backend.
    fn correction(&self) -> String {
        match self {
            Rejection::Parse(detail) => prompts::compose_parse_correction(detail),
            Rejection::Schema(violations) => prompts::compose_correction(violations),
        }
    }

    /// One-line summary for logging.
    fn summary(&self) -> String {
        match self {
            Rejection::Parse(detail) => format!("not parseable as JSON ({})", detail),
            Rejection::Schema(violations) => format!("{} schema violation(s)", violations.len()),
        }
    }

    /// The violation list surfaced on exhaustion. A parse rejection
    /// becomes a single synthetic violation with an empty path.
    fn into_violations(self) -> Vec<Violation> {
        match self {
            Rejection::Parse(detail) => vec![Violation {
                path: Vec::new(),
                message: format!("could not be parsed as JSON: {}", detail),
                expected: ValueKind::Object,
                received: ValueKind::String,
            }],
            Rejection::Schema(violations) => violations,
        }
    }
}

/// Schema-constrained generator over a chat backend.
///
/// Construct one per logical conversation with
/// [`StructuredGenerator::new`], then call [`generate`] (default retry
/// budget) or [`generate_with`].
///
/// [`generate`]: StructuredGenerator::generate
/// [`generate_with`]: StructuredGenerator::generate_with
#[derive(Debug)]
pub struct StructuredGenerator {
    backend: Arc<dyn ChatBackend>,
    input_shape: Shape,
    output_shape: Shape,
    options: GeneratorOptions,
    history: HistoryBuffer,
}

impl StructuredGenerator {
    /// Create a generator over `backend` that converts values of
    /// `input_shape` into values of `output_shape`.
    pub fn new(
        backend: Arc<dyn ChatBackend>,
        input_shape: Shape,
        output_shape: Shape,
        options: GeneratorOptions,
    ) -> Self {
        let history = HistoryBuffer::new(options.max_messages);
        Self {
            backend,
            input_shape,
            output_shape,
            options,
            history,
        }
    }

    /// The buffered exchanges of this instance.
    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    /// Generate an output value for `input` with the default budget
    /// (2 retries, 1 repair round-trip per attempt).
    pub async fn generate(&mut self, input: Value) -> Result<Value, GenerateError> {
        self.generate_with(input, DEFAULT_RETRIES, DEFAULT_FIX_TRIES, None)
            .await
    }

    /// Generate an output value for `input`.
    ///
    /// `retries` is the number of full restarts after the first failed
    /// attempt; `fix_tries` the number of repair round-trips within each
    /// attempt. When `explicit_history` is given it replaces the
    /// instance's own buffer in prompt assembly for this call.
    ///
    /// Transport errors from the backend propagate immediately without
    /// consuming any budget. Conformance failures are recovered locally;
    /// once the budget is exhausted the last rejection's violations are
    /// surfaced in [`GenerateError::Exhausted`].
    pub async fn generate_with(
        &mut self,
        input: Value,
        retries: u32,
        fix_tries: u32,
        explicit_history: Option<Vec<ChatMessage>>,
    ) -> Result<Value, GenerateError> {
        let call_id = generate_call_id();
        let input_text = input.to_string();
        let mut round_trips: u32 = 0;
        let mut last_rejection: Option<Rejection> = None;

        for attempt in 0..=retries {
            // ASSEMBLE. Function-valued options resolve here, once per
            // attempt, so every round-trip of the attempt sees the same
            // examples and hint.
            let examples = self.options.resolve_examples();
            let conversion_help = self.options.resolve_conversion_help();
            let instruction = prompts::compose_instruction(
                &describe::skeleton(&self.input_shape).to_string(),
                &describe::skeleton(&self.output_shape).to_string(),
                conversion_help.as_deref(),
            );
            let example_turns = flatten_examples(&examples);
            let input_turn = ChatMessage::user(input_text.clone());

            let mut messages = example_turns.clone();
            messages.push(ChatMessage::user(instruction.clone()));
            match &explicit_history {
                Some(turns) => messages.extend(turns.iter().cloned()),
                None => messages.extend(self.history.flatten()),
            }
            messages.push(input_turn.clone());

            log::debug!(
                "[{}] attempt {}/{}: sending {} messages",
                call_id,
                attempt + 1,
                retries + 1,
                messages.len()
            );
            self.log_messages(&call_id, "request", &messages);

            // SEND.
            let reply = self.backend.chat(messages).await?;
            round_trips += 1;
            self.log_reply(&call_id, &reply.content);

            // EXTRACT_VALIDATE.
            let mut rejection = match self.evaluate(&reply.content) {
                Ok(value) => {
                    self.record(input_turn, reply.content);
                    return Ok(value);
                }
                Err(rejection) => rejection,
            };
            log::warn!("[{}] reply rejected: {}", call_id, rejection.summary());

            // REPAIR_LOOP. Each round-trip is a fresh, self-contained
            // request: examples, instruction, the original input, the
            // latest rejected reply, and the correction. Channel history
            // stays out so the correction stays focused.
            let mut rejected_content = reply.content;
            let mut repaired = None;
            for fix in 0..fix_tries {
                let correction = rejection.correction();
                let mut repair_messages = example_turns.clone();
                repair_messages.push(ChatMessage::user(instruction.clone()));
                repair_messages.push(input_turn.clone());
                repair_messages.push(ChatMessage::assistant(rejected_content.clone()));
                repair_messages.push(ChatMessage::user(correction));

                log::debug!(
                    "[{}] repair {}/{} on attempt {}",
                    call_id,
                    fix + 1,
                    fix_tries,
                    attempt + 1
                );
                self.log_messages(&call_id, "repair request", &repair_messages);

                let repair_reply = self.backend.chat(repair_messages).await?;
                round_trips += 1;
                self.log_reply(&call_id, &repair_reply.content);

                match self.evaluate(&repair_reply.content) {
                    Ok(value) => {
                        repaired = Some((value, repair_reply.content));
                        break;
                    }
                    Err(next) => {
                        log::warn!("[{}] repair rejected: {}", call_id, next.summary());
                        rejected_content = repair_reply.content;
                        rejection = next;
                    }
                }
            }

            if let Some((value, content)) = repaired {
                self.record(input_turn, content);
                return Ok(value);
            }

            last_rejection = Some(rejection);
        }

        let violations = last_rejection
            .map(Rejection::into_violations)
            .unwrap_or_default();
        log::warn!(
            "[{}] exhausted after {} round-trips with {} violation(s)",
            call_id,
            round_trips,
            violations.len()
        );
        Err(GenerateError::Exhausted {
            attempts: round_trips,
            violations,
        })
    }

    /// Extract, parse, and validate one reply.
    fn evaluate(&self, raw: &str) -> Result<Value, Rejection> {
        let candidate = extractor::extract_json_object(raw)
            .ok_or_else(|| Rejection::Parse("no JSON object found in reply".to_string()))?;
        let value: Value =
            serde_json::from_str(candidate).map_err(|e| Rejection::Parse(e.to_string()))?;
        match validate::validate(&value, &self.output_shape) {
            Ok(()) => Ok(value),
            Err(violations) => Err(Rejection::Schema(violations)),
        }
    }

    /// Record a successful exchange, evicting per the buffer bound.
    fn record(&mut self, input_turn: ChatMessage, reply_content: String) {
        self.history.append(HistoryEntry::new(
            input_turn,
            ChatMessage::assistant(reply_content),
        ));
    }

    fn log_messages(&self, call_id: &str, label: &str, messages: &[ChatMessage]) {
        if !self.options.verbose {
            return;
        }
        for (index, message) in messages.iter().enumerate() {
            log::debug!(
                "[{}] {} [{}] {}: {}",
                call_id,
                label,
                index,
                message.role,
                message.content
            );
        }
    }

    fn log_reply(&self, call_id: &str, content: &str) {
        if self.options.verbose {
            log::debug!("[{}] reply: {}", call_id, content);
        }
    }
}

/// Expand example pairs into alternating user/assistant turns.
fn flatten_examples(examples: &[Example]) -> Vec<ChatMessage> {
    let mut turns = Vec::with_capacity(examples.len() * 2);
    for example in examples {
        turns.push(ChatMessage::user(example.input.to_string()));
        turns.push(ChatMessage::assistant(example.output.to_string()));
    }
    turns
}
