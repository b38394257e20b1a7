//! Mock gateway: deterministic fixtures, no network.
//!
//! Replacement tasks apply a real (if simple) text transformation so the
//! editor behaves sensibly offline; analytical tasks return canned
//! structures shaped like the relay's parsed results. Latency is simulated
//! in the 1-2.5s range the hosted providers exhibit, seeded from the
//! request so runs are reproducible.

use async_trait::async_trait;
use shared_types::{AiOutcome, AiTask, Feedback, SuggestedCitation};
use std::time::Duration;

use super::{AiGateway, AiGatewayError, AiRequest, DEFAULT_EXPAND_TARGET, DEFAULT_SHORTEN_TARGET};

pub struct MockAiGateway {
    simulate_latency: bool,
}

impl MockAiGateway {
    pub fn new(simulate_latency: bool) -> Self {
        Self { simulate_latency }
    }

    fn delay_for(request: &AiRequest) -> Duration {
        let seed: u64 = request
            .task
            .as_str()
            .bytes()
            .chain(request.text.bytes())
            .map(u64::from)
            .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b));
        Duration::from_millis(1000 + seed % 1500)
    }
}

#[async_trait]
impl AiGateway for MockAiGateway {
    async fn run(&self, request: AiRequest) -> Result<AiOutcome, AiGatewayError> {
        if self.simulate_latency {
            tokio::time::sleep(Self::delay_for(&request)).await;
        }
        Ok(fabricate(&request))
    }
}

fn fabricate(request: &AiRequest) -> AiOutcome {
    let text = request.text.trim();
    let topic = request
        .field
        .as_deref()
        .filter(|f| !f.is_empty())
        .unwrap_or("the stated research topic");

    match request.task {
        AiTask::Rewrite => AiOutcome::Revised(format!(
            "To state this more precisely: {}",
            collapse_whitespace(text)
        )),
        AiTask::Proofread => AiOutcome::Revised(collapse_whitespace(text)),
        AiTask::Shorten => {
            let target = request.word_target.unwrap_or(DEFAULT_SHORTEN_TARGET) as usize;
            let words: Vec<&str> = text.split_whitespace().collect();
            AiOutcome::Revised(words[..words.len().min(target)].join(" "))
        }
        AiTask::Expand => {
            let target = request.word_target.unwrap_or(DEFAULT_EXPAND_TARGET);
            AiOutcome::Revised(format!(
                "{text} Building on this point, the present study elaborates the argument \
                 toward a fuller treatment of roughly {target} words, clarifying the scope \
                 of each claim and its relation to the evidence discussed above."
            ))
        }
        AiTask::BulletsToParagraph => {
            let joined = text
                .lines()
                .map(strip_bullet_marker)
                .filter(|l| !l.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            AiOutcome::Revised(joined)
        }
        AiTask::ParagraphToBullets => {
            let bullets = text
                .split(". ")
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| format!("- {}", s.trim_end_matches('.')))
                .collect::<Vec<_>>()
                .join("\n");
            AiOutcome::Revised(bullets)
        }
        AiTask::Critique => AiOutcome::FeedbackReport(Feedback {
            strengths: vec![
                "The central claim is stated early and unambiguously.".to_string(),
                "The register is appropriately formal for an academic audience.".to_string(),
            ],
            weaknesses: vec![
                "Several assertions lack supporting citations.".to_string(),
                "Transitions between paragraphs are abrupt.".to_string(),
            ],
            suggestions: vec![
                "Cite at least one source for each empirical claim.".to_string(),
                "Add a linking sentence at the end of each paragraph.".to_string(),
                "Define specialized terms on first use.".to_string(),
            ],
        }),
        AiTask::Rqs => AiOutcome::Suggestions(vec![
            format!("What measurable outcomes does {topic} affect, and over what time horizon?"),
            format!("Which populations are most and least served by current approaches to {topic}?"),
            format!("What mechanisms explain the observed variation in results related to {topic}?"),
        ]),
        AiTask::Hypotheses => AiOutcome::Suggestions(vec![
            format!("H1: Exposure to the intervention improves primary outcomes relative to the control condition in studies of {topic}."),
            "H2: The effect size is moderated by prior experience with comparable interventions.".to_string(),
            "H3: Self-reported and observed measures of the outcome diverge systematically.".to_string(),
        ]),
        AiTask::Contributions => AiOutcome::Suggestions(vec![
            format!("An integrative framework connecting the fragmented empirical literature on {topic}."),
            "A replicable measurement protocol for the study's primary outcome.".to_string(),
            "Practical guidance for practitioners derived from the findings.".to_string(),
        ]),
        AiTask::SuggestCitations => AiOutcome::Citations(vec![
            SuggestedCitation {
                title: "The Impact of Artificial Intelligence on Educational Outcomes: A Systematic Review".to_string(),
                authors: vec!["Smith, J. A.".to_string(), "Johnson, M. K.".to_string()],
                year: "2023".to_string(),
                journal: Some("Journal of Educational Technology Research".to_string()),
                relevance: Some("Systematic review covering the outcome measures this section discusses.".to_string()),
                url: None,
                doi: Some("10.1016/j.edutech.2023.123456".to_string()),
            },
            SuggestedCitation {
                title: "Machine Learning Applications in Academic Writing: Current Trends and Future Directions".to_string(),
                authors: vec!["Chen, L.".to_string(), "Rodriguez, A. M.".to_string()],
                year: "2024".to_string(),
                journal: Some("Computers & Education".to_string()),
                relevance: Some("Recent survey of the methods most often applied in this area.".to_string()),
                url: None,
                doi: Some("10.1016/j.compedu.2024.104118".to_string()),
            },
        ]),
        AiTask::SynthesizeSources => AiOutcome::Synthesis(
            "Across the cited sources there is broad agreement on the direction of the effect \
             but not its magnitude. Earlier studies report large gains under controlled \
             conditions, while later field studies find smaller, context-dependent effects. \
             The disagreement tracks differences in measurement: studies using standardized \
             instruments cluster tightly, whereas self-report studies scatter widely."
                .to_string(),
        ),
        AiTask::SpotGaps => AiOutcome::Gaps(vec![
            "No study in the reviewed set follows participants beyond one semester.".to_string(),
            "The claimed causal link is supported only by correlational evidence.".to_string(),
            "Non-English-language literature is absent from the review.".to_string(),
        ]),
        AiTask::Summarize => {
            let summary: String = text
                .split_inclusive(". ")
                .take(2)
                .collect::<String>()
                .trim()
                .to_string();
            AiOutcome::Summary(if summary.is_empty() {
                "The section is empty; there is nothing to summarize yet.".to_string()
            } else {
                summary
            })
        }
        AiTask::Organize => AiOutcome::Outline(
            "- Opening claim and motivation\n\
             - Evidence, strongest first\n\
             - Counterpoints and their limits\n\
             - Implication for the research question"
                .to_string(),
        ),
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn strip_bullet_marker(line: &str) -> &str {
    let trimmed = line.trim_start();
    let stripped = trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))
        .or_else(|| trimmed.strip_prefix("• "));
    if let Some(rest) = stripped {
        return rest.trim();
    }
    // "1. item" style markers
    if let Some(dot) = trimmed.find(". ") {
        if trimmed[..dot].chars().all(|c| c.is_ascii_digit()) && dot <= 3 {
            return trimmed[dot + 2..].trim();
        }
    }
    trimmed
}
