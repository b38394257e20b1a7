//! Static section registry for the paper outline.
//!
//! Sections carry display metadata only (title, guidance, target word
//! count). Draft routes reject section ids that are not listed here.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub guidance: &'static str,
    pub target_words: u32,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    pub subsections: &'static [SectionSpec],
}

pub const OUTLINE: &[SectionSpec] = &[
    SectionSpec {
        id: "abstract",
        title: "Abstract",
        guidance: "Include: purpose, methods, key findings, and conclusions. Keep it under 250 words.",
        target_words: 250,
        subsections: &[],
    },
    SectionSpec {
        id: "introduction",
        title: "Introduction",
        guidance: "Set the research context, state the problem, and preview your objectives.",
        target_words: 1000,
        subsections: &[
            SectionSpec {
                id: "intro-background",
                title: "Background",
                guidance: "Situate the topic and explain why it matters now.",
                target_words: 400,
                subsections: &[],
            },
            SectionSpec {
                id: "intro-problem",
                title: "Problem Statement",
                guidance: "State the specific problem your study addresses.",
                target_words: 300,
                subsections: &[],
            },
            SectionSpec {
                id: "intro-objectives",
                title: "Research Objectives",
                guidance: "List the concrete objectives or questions this paper answers.",
                target_words: 300,
                subsections: &[],
            },
        ],
    },
    SectionSpec {
        id: "literature-review",
        title: "Literature Review",
        guidance: "Survey prior work, organize it thematically, and identify what is missing.",
        target_words: 1500,
        subsections: &[
            SectionSpec {
                id: "lit-theoretical",
                title: "Theoretical Framework",
                guidance: "Describe the theories or models your analysis builds on.",
                target_words: 500,
                subsections: &[],
            },
            SectionSpec {
                id: "lit-previous",
                title: "Previous Studies",
                guidance: "Summarize key studies and their findings.",
                target_words: 600,
                subsections: &[],
            },
            SectionSpec {
                id: "lit-gaps",
                title: "Research Gaps",
                guidance: "Point out the gaps or contradictions your study targets.",
                target_words: 400,
                subsections: &[],
            },
        ],
    },
    SectionSpec {
        id: "methodology",
        title: "Methodology",
        guidance: "Describe your design, participants, procedure, and analysis plan in enough detail to replicate.",
        target_words: 1200,
        subsections: &[
            SectionSpec {
                id: "method-design",
                title: "Research Design",
                guidance: "Name the design and justify the choice.",
                target_words: 300,
                subsections: &[],
            },
            SectionSpec {
                id: "method-participants",
                title: "Participants",
                guidance: "Describe the sample, recruitment, and inclusion criteria.",
                target_words: 300,
                subsections: &[],
            },
            SectionSpec {
                id: "method-procedure",
                title: "Procedure",
                guidance: "Walk through data collection step by step.",
                target_words: 300,
                subsections: &[],
            },
            SectionSpec {
                id: "method-analysis",
                title: "Data Analysis",
                guidance: "Explain how the data were analyzed and why those methods fit.",
                target_words: 300,
                subsections: &[],
            },
        ],
    },
    SectionSpec {
        id: "results",
        title: "Results",
        guidance: "Report findings without interpretation. Use past tense.",
        target_words: 800,
        subsections: &[],
    },
    SectionSpec {
        id: "discussion",
        title: "Discussion",
        guidance: "Interpret the results, connect them to prior work, and acknowledge limitations.",
        target_words: 1000,
        subsections: &[
            SectionSpec {
                id: "discussion-interpretation",
                title: "Interpretation",
                guidance: "Explain what the findings mean relative to your questions.",
                target_words: 400,
                subsections: &[],
            },
            SectionSpec {
                id: "discussion-implications",
                title: "Implications",
                guidance: "Spell out theoretical and practical implications.",
                target_words: 300,
                subsections: &[],
            },
            SectionSpec {
                id: "discussion-limitations",
                title: "Limitations",
                guidance: "State limitations honestly and their likely effect on the results.",
                target_words: 300,
                subsections: &[],
            },
        ],
    },
    SectionSpec {
        id: "conclusion",
        title: "Conclusion",
        guidance: "Restate the contribution and suggest directions for future work.",
        target_words: 400,
        subsections: &[],
    },
    SectionSpec {
        id: "references",
        title: "References",
        guidance: "Formatted reference entries, one per paragraph.",
        target_words: 0,
        subsections: &[],
    },
];

/// Every valid section id, subsections included.
pub fn all_ids() -> impl Iterator<Item = &'static str> {
    OUTLINE
        .iter()
        .flat_map(|s| std::iter::once(s.id).chain(s.subsections.iter().map(|c| c.id)))
}

pub fn is_valid(section_id: &str) -> bool {
    all_ids().any(|id| id == section_id)
}
