//! Prompt text assembly for the generation engine.
//!
//! Two kinds of text are composed here: the instruction prompt that opens
//! every conversation (shape descriptions plus fixed behavioral
//! constraints) and the correction messages sent when a reply is
//! rejected. All functions are pure; the engine interpolates fresh
//! descriptions on every attempt.

use crate::schema::validate::{render_path, Violation};

/// Fixed behavioral constraints appended to every instruction prompt.
const INSTRUCTION_RULES: &str = "\
Rules:
- Treat the input as already valid; never question or correct it.
- Reply with exactly one JSON object conforming to the output shape.
- Do not include conversational text, commentary, or code fences.
- If a reply of yours is rejected, you will receive a follow-up message \
describing the problems; answer it with a corrected JSON object.";

/// Build the instruction prompt from the two shape descriptions and an
/// optional conversion hint.
///
/// The descriptions are embedded verbatim; the hint, when present, gets
/// its own labeled section between the shapes and the rules.
pub fn compose_instruction(
    input_description: &str,
    output_description: &str,
    conversion_help: Option<&str>,
) -> String {
    let mut prompt = format!(
        "You convert structured input data into structured output data.\n\n\
         The input you receive conforms to this shape:\n{}\n\n\
         The output you produce must conform to this shape:\n{}\n",
        input_description, output_description
    );
    if let Some(help) = conversion_help {
        prompt.push_str(&format!("\nConversion notes:\n{}\n", help));
    }
    prompt.push('\n');
    prompt.push_str(INSTRUCTION_RULES);
    prompt
}

/// Build the correction message for a schema-validation rejection.
///
/// One line per violation: `path: Received <kind> but expected <kind>`.
/// Union violations arrive already flattened from the validator, so each
/// branch's mismatches get their own line.
pub fn compose_correction(violations: &[Violation]) -> String {
    let mut message =
        String::from("Your previous reply did not conform to the required output shape.\n");
    message.push_str("Problems:\n");
    for violation in violations {
        message.push_str(&format!(
            "{}: Received {} but expected {}\n",
            render_path(&violation.path),
            violation.received,
            violation.expected
        ));
    }
    message.push_str("Reply with a single corrected JSON object and nothing else.");
    message
}

/// Build the correction message for a reply that could not be parsed as
/// JSON at all.
pub fn compose_parse_correction(detail: &str) -> String {
    format!(
        "Your previous reply could not be parsed as JSON: {}\n\
         Reply with a single JSON object conforming to the output shape and nothing else.",
        detail
    )
}
