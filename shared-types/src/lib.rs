//! Shared types between the ResearchFlow service and its clients
//!
//! Everything here is plain data: papers, section drafts, version
//! snapshots, bibliographic sources, AI tasks and their outcomes, and the
//! typed editor-bus events. Serializable with serde for JSON over HTTP.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Papers
// ============================================================================

/// A paper as it appears in the dashboard registry.
///
/// Field names on the wire stay camelCase to match the registry payloads the
/// original clients persisted under `researchflow_papers`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
    /// Millisecond-timestamp string assigned at creation.
    pub id: String,
    pub title: String,
    pub topic: String,
    /// Paper type, e.g. "research-paper" or "literature-review".
    #[serde(rename = "type")]
    pub kind: String,
    /// Creation date, `YYYY-MM-DD`.
    pub created_at: String,
    /// Date of the most recent edit, `YYYY-MM-DD`.
    pub last_modified: String,
    /// Free-standing completion percentage in `[0, 100]`; set at creation,
    /// never derived from section state.
    pub progress: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// Whole-paper word count, refreshed on every section save.
    pub word_count: u64,
}

/// Form data for creating a paper.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPaper {
    pub title: String,
    pub topic: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

// ============================================================================
// Section drafts and version history
// ============================================================================

/// Version snapshots retained per `(paper, section)`.
pub const VERSION_HISTORY_LIMIT: usize = 10;

/// Minimum draft length (chars) before a save produces a snapshot.
pub const SNAPSHOT_MIN_CHARS: usize = 10;

/// Length of the preview excerpt stored with each snapshot.
pub const SNAPSHOT_PREVIEW_CHARS: usize = 80;

/// A capped, timestamped copy of a section's text retained for manual
/// rollback.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VersionSnapshot {
    /// ULID assigned when the snapshot is taken.
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub content: String,
    /// Leading excerpt of `content` for list displays.
    pub preview: String,
}

impl VersionSnapshot {
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        let preview = content.chars().take(SNAPSHOT_PREVIEW_CHARS).collect();
        Self {
            id: ulid::Ulid::new().to_string(),
            timestamp: Utc::now(),
            content,
            preview,
        }
    }
}

// ============================================================================
// Bibliographic sources
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Book,
    Journal,
    Website,
    Conference,
    Thesis,
    Other,
}

impl Default for SourceType {
    fn default() -> Self {
        SourceType::Journal
    }
}

/// A bibliographic record in a paper's source library.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub id: String,
    #[serde(rename = "type")]
    pub source_type: SourceType,
    pub title: String,
    /// Free-form author string, e.g. "Smith, J. & Johnson, M.".
    pub author: String,
    pub year: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub journal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Derived short identifier, e.g. "smith2023impact". Not unique.
    pub citation_key: String,
}

/// Form data for adding or editing a source. The citation key is always
/// rederived server-side.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewSource {
    #[serde(rename = "type", default)]
    pub source_type: SourceType,
    pub title: String,
    pub author: String,
    pub year: String,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub journal: Option<String>,
    #[serde(default)]
    pub volume: Option<String>,
    #[serde(default)]
    pub pages: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CitationStyle {
    Apa,
    Mla,
}

/// Metadata returned by the DOI resolver route.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CitationMetadata {
    pub title: String,
    pub authors: Vec<String>,
    pub journal: String,
    pub year: String,
    pub volume: String,
    pub pages: String,
    pub url: String,
    pub doi: String,
    #[serde(rename = "type")]
    pub source_type: SourceType,
}

// ============================================================================
// AI tasks
// ============================================================================

/// String identifier selecting which AI-assisted transformation or analysis
/// to run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AiTask {
    Rewrite,
    Proofread,
    Shorten,
    Expand,
    BulletsToParagraph,
    ParagraphToBullets,
    Critique,
    Rqs,
    Hypotheses,
    Contributions,
    SuggestCitations,
    SynthesizeSources,
    SpotGaps,
    Summarize,
    Organize,
}

/// Which side of the UI a task's result lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskFamily {
    /// Result replaces the editor's full text.
    Replacement,
    /// Result is displayed in the side panel, keyed by task.
    Analytical,
}

/// Which hosted provider the relay gateway routes a task to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderFamily {
    Anthropic,
    OpenAi,
}

impl AiTask {
    pub fn parse(input: &str) -> Option<Self> {
        match input {
            "rewrite" => Some(Self::Rewrite),
            "proofread" => Some(Self::Proofread),
            "shorten" => Some(Self::Shorten),
            "expand" => Some(Self::Expand),
            "bullets_to_paragraph" => Some(Self::BulletsToParagraph),
            "paragraph_to_bullets" => Some(Self::ParagraphToBullets),
            "critique" => Some(Self::Critique),
            "rqs" => Some(Self::Rqs),
            "hypotheses" => Some(Self::Hypotheses),
            "contributions" => Some(Self::Contributions),
            "suggest_citations" => Some(Self::SuggestCitations),
            "synthesize_sources" => Some(Self::SynthesizeSources),
            "spot_gaps" => Some(Self::SpotGaps),
            "summarize" => Some(Self::Summarize),
            "organize" => Some(Self::Organize),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rewrite => "rewrite",
            Self::Proofread => "proofread",
            Self::Shorten => "shorten",
            Self::Expand => "expand",
            Self::BulletsToParagraph => "bullets_to_paragraph",
            Self::ParagraphToBullets => "paragraph_to_bullets",
            Self::Critique => "critique",
            Self::Rqs => "rqs",
            Self::Hypotheses => "hypotheses",
            Self::Contributions => "contributions",
            Self::SuggestCitations => "suggest_citations",
            Self::SynthesizeSources => "synthesize_sources",
            Self::SpotGaps => "spot_gaps",
            Self::Summarize => "summarize",
            Self::Organize => "organize",
        }
    }

    pub fn family(&self) -> TaskFamily {
        match self {
            Self::Rewrite
            | Self::Proofread
            | Self::Shorten
            | Self::Expand
            | Self::BulletsToParagraph
            | Self::ParagraphToBullets => TaskFamily::Replacement,
            _ => TaskFamily::Analytical,
        }
    }

    /// Ideation tasks run from a blank page; everything else needs text.
    pub fn requires_input(&self) -> bool {
        !matches!(
            self,
            Self::Rqs | Self::Hypotheses | Self::Contributions | Self::SuggestCitations
        )
    }

    pub fn provider_family(&self) -> ProviderFamily {
        match self.family() {
            TaskFamily::Replacement => ProviderFamily::OpenAi,
            TaskFamily::Analytical => ProviderFamily::Anthropic,
        }
    }
}

/// Critique feedback, grouped the way the side panel renders it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Feedback {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
}

/// A citation the AI suggests adding to the paper.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SuggestedCitation {
    pub title: String,
    pub authors: Vec<String>,
    pub year: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub journal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
}

/// Typed result of an AI task.
///
/// The mock gateway produces the structured variants; the provider relay
/// only ever yields `Text`, which the API surfaces as a generic `result`
/// field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum AiOutcome {
    Revised(String),
    FeedbackReport(Feedback),
    Suggestions(Vec<String>),
    Citations(Vec<SuggestedCitation>),
    Synthesis(String),
    Gaps(Vec<String>),
    Summary(String),
    Outline(String),
    Text(String),
}

// ============================================================================
// Editor event bus
// ============================================================================

/// Typed topics replacing the original stringly-named DOM events that
/// connected the editor, citation manager, and AI panel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EditorEvent {
    /// Return focus to the content editor.
    Focus,
    /// Insert an inline citation at the caret.
    InsertCitation { paper_id: String, inline: String },
    /// A panel asks the editor shell to perform an inline insertion.
    RequestInsertCitation { paper_id: String, inline: String },
    /// Append a formatted entry to the paper's references section.
    AddReferenceEntry { paper_id: String, entry: String },
    /// Open the add-source dialog in the citation manager.
    OpenAddSource { paper_id: String },
    /// A panel asks the editor shell to run an AI task.
    RequestAi {
        paper_id: String,
        task: AiTask,
        #[serde(skip_serializing_if = "Option::is_none")]
        word_target: Option<u32>,
    },
}

// ============================================================================
// Storage keys
// ============================================================================

/// Composite-key builders for the key-value store. The layout matches the
/// keys the original clients used, so existing exports stay readable.
pub mod keys {
    pub const PAPERS: &str = "researchflow_papers";
    pub const THEME: &str = "researchflow_theme";
    pub const USER: &str = "researchflow_user";

    pub fn section(paper_id: &str, section_id: &str) -> String {
        format!("paper_{paper_id}_section_{section_id}")
    }

    pub fn versions(paper_id: &str, section_id: &str) -> String {
        format!("paper_{paper_id}_section_{section_id}_versions")
    }

    pub fn sources(paper_id: &str) -> String {
        format!("paper_{paper_id}_sources")
    }
}

// ============================================================================
// Tests
// ============================================================================
