//! Feedback client: asks the chat model to explain a computed score.
//!
//! A read timeout is the one recoverable failure: the scores are already
//! final, so the caller gets a fixed explanatory message instead of an error.
//! Every other failure propagates.

use std::sync::Arc;

use tracing::{info, warn};

use crate::analysis::scoring::ScoreMap;
use crate::llm_client::prompts::{FEEDBACK_PROMPT_TEMPLATE, FEEDBACK_SYSTEM};
use crate::llm_client::{ChatCompleter, CompletionRequest, LlmError};

pub const FEEDBACK_TEMPERATURE: f32 = 0.2;
pub const FEEDBACK_MAX_TOKENS: u32 = 250;

/// Returned verbatim in place of model output when the feedback call times out.
pub const FEEDBACK_TIMEOUT_MESSAGE: &str = "LLM feedback took too long to respond.\n\n\
This can happen on limited hardware.\n\
Your ATS score is valid — please try again for feedback.";

/// Model text, or the timeout fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Generated(String),
    TimedOut,
}

impl Feedback {
    pub fn into_text(self) -> String {
        match self {
            Feedback::Generated(text) => text,
            Feedback::TimedOut => FEEDBACK_TIMEOUT_MESSAGE.to_string(),
        }
    }

    pub fn timed_out(&self) -> bool {
        matches!(self, Feedback::TimedOut)
    }
}

#[derive(Clone)]
pub struct FeedbackClient {
    completer: Arc<dyn ChatCompleter>,
}

impl FeedbackClient {
    pub fn new(completer: Arc<dyn ChatCompleter>) -> Self {
        Self { completer }
    }

    pub async fn explain(&self, scores: &ScoreMap, final_score: f64) -> Result<Feedback, LlmError> {
        let request = CompletionRequest {
            system: FEEDBACK_SYSTEM.to_string(),
            prompt: build_feedback_prompt(scores, final_score),
            temperature: FEEDBACK_TEMPERATURE,
            max_tokens: FEEDBACK_MAX_TOKENS,
        };

        match self.completer.complete(&request).await {
            Ok(text) => {
                info!(chars = text.len(), "feedback generated");
                Ok(Feedback::Generated(text))
            }
            Err(LlmError::Timeout) => {
                warn!("feedback generation timed out; returning fallback message");
                Ok(Feedback::TimedOut)
            }
            Err(e) => Err(e),
        }
    }
}

/// Fills the feedback template with the four percentages, each in its
/// shortest round-trip form (`80.0`, `40.25`).
pub fn build_feedback_prompt(scores: &ScoreMap, final_score: f64) -> String {
    FEEDBACK_PROMPT_TEMPLATE
        .replace("{skills}", &format_percent(scores.skills))
        .replace("{experience}", &format_percent(scores.experience))
        .replace("{projects}", &format_percent(scores.projects))
        .replace("{final_score}", &format_percent(final_score))
}

fn format_percent(value: f64) -> String {
    format!("{value:?}")
}
