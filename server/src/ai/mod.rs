//! AI writing actions.
//!
//! A task request is dispatched through an [`AiGateway`]. Two gateways
//! exist: [`mock::MockAiGateway`] fabricates deterministic results with
//! simulated latency, and [`relay::RelayAiGateway`] forwards a composed
//! prompt to a hosted provider selected by task family. The gateway is
//! chosen once at startup.

pub mod mock;
pub mod relay;

use async_trait::async_trait;
use shared_types::{AiOutcome, AiTask};
use thiserror::Error;

/// Default word targets when the caller does not supply one.
pub const DEFAULT_SHORTEN_TARGET: u32 = 150;
pub const DEFAULT_EXPAND_TARGET: u32 = 300;

#[derive(Debug, Clone)]
pub struct AiRequest {
    pub task: AiTask,
    /// Section text the task operates on; may be empty for ideation tasks.
    pub text: String,
    pub word_target: Option<u32>,
    /// Research field, used to steer ideation tasks.
    pub field: Option<String>,
    /// Free-form notes forwarded with the prompt.
    pub notes: Option<String>,
}

#[derive(Debug, Error)]
pub enum AiGatewayError {
    #[error("provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[async_trait]
pub trait AiGateway: Send + Sync {
    async fn run(&self, request: AiRequest) -> Result<AiOutcome, AiGatewayError>;
}

/// Build the single user-message prompt forwarded to a provider.
pub fn compose_prompt(request: &AiRequest) -> String {
    let topic = request
        .field
        .as_deref()
        .filter(|f| !f.is_empty())
        .unwrap_or("the paper's research topic");
    let instruction = match request.task {
        AiTask::Rewrite => "Rewrite the following academic text for clarity, precision, and flow. Return only the rewritten text.".to_string(),
        AiTask::Proofread => "Proofread the following academic text. Fix grammar, spelling, and punctuation without changing the meaning. Return only the corrected text.".to_string(),
        AiTask::Shorten => format!(
            "Shorten the following academic text to roughly {} words while keeping every key claim. Return only the shortened text.",
            request.word_target.unwrap_or(DEFAULT_SHORTEN_TARGET)
        ),
        AiTask::Expand => format!(
            "Expand the following academic text to roughly {} words, elaborating on the existing claims without inventing results. Return only the expanded text.",
            request.word_target.unwrap_or(DEFAULT_EXPAND_TARGET)
        ),
        AiTask::BulletsToParagraph => "Convert the following bullet points into a coherent academic paragraph. Return only the paragraph.".to_string(),
        AiTask::ParagraphToBullets => "Convert the following paragraph into concise bullet points. Return only the bullets.".to_string(),
        AiTask::Critique => "Critique the following academic text. List its strengths, weaknesses, and concrete suggestions for improvement.".to_string(),
        AiTask::Rqs => format!("Propose five focused research questions for a study about {topic}."),
        AiTask::Hypotheses => format!("Propose three testable hypotheses for a study about {topic}."),
        AiTask::Contributions => format!("Outline the likely contributions of a study about {topic}."),
        AiTask::SuggestCitations => "Suggest peer-reviewed sources relevant to the following text, with authors, year, and venue.".to_string(),
        AiTask::SynthesizeSources => "Synthesize the sources discussed in the following text into a short narrative identifying points of agreement and disagreement.".to_string(),
        AiTask::SpotGaps => "Identify gaps, contradictions, and unsupported claims in the following academic text.".to_string(),
        AiTask::Summarize => "Summarize the following academic text in a few sentences.".to_string(),
        AiTask::Organize => "Propose a clearer outline for the following academic text, as a markdown list of headings.".to_string(),
    };

    let mut prompt = instruction;
    if let Some(notes) = request.notes.as_deref().filter(|n| !n.is_empty()) {
        prompt.push_str("\n\nAuthor notes: ");
        prompt.push_str(notes);
    }
    if !request.text.is_empty() {
        prompt.push_str("\n\n");
        prompt.push_str(&request.text);
    }
    prompt
}
