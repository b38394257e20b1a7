//! Section draft persistence with capped version history.
//!
//! Drafts are plain text keyed by `(paper, section)`. Every save that
//! exceeds the snapshot threshold also records a version snapshot, newest
//! first, trimmed to [`VERSION_HISTORY_LIMIT`]. Saving refreshes the owning
//! paper's word count and last-modified date.

use ractor::ActorRef;
use shared_types::{keys, VersionSnapshot, SNAPSHOT_MIN_CHARS, VERSION_HISTORY_LIMIT};

use crate::actors::storage::StorageMsg;
use crate::editor;
use crate::sections;
use crate::store::{self, papers, StoreError};

#[derive(Debug, Clone, Copy)]
pub struct SaveOutcome {
    /// Whether this save produced a version snapshot.
    pub snapshot_taken: bool,
    /// Whole-paper word count after the save.
    pub paper_word_count: u64,
}

pub async fn load(
    storage: &ActorRef<StorageMsg>,
    paper_id: &str,
    section_id: &str,
) -> Result<String, StoreError> {
    let key = keys::section(paper_id, section_id);
    Ok(store::get_raw(storage, &key).await?.unwrap_or_default())
}

pub async fn list_versions(
    storage: &ActorRef<StorageMsg>,
    paper_id: &str,
    section_id: &str,
) -> Result<Vec<VersionSnapshot>, StoreError> {
    let key = keys::versions(paper_id, section_id);
    Ok(store::get_json(storage, &key).await?.unwrap_or_default())
}

/// Persist a draft, snapshot it when long enough, and refresh the owning
/// paper's stats.
pub async fn save(
    storage: &ActorRef<StorageMsg>,
    paper_id: &str,
    section_id: &str,
    text: &str,
) -> Result<SaveOutcome, StoreError> {
    let key = keys::section(paper_id, section_id);
    store::set_raw(storage, &key, text.to_string()).await?;

    let snapshot_taken = text.chars().count() > SNAPSHOT_MIN_CHARS;
    if snapshot_taken {
        let versions_key = keys::versions(paper_id, section_id);
        let mut versions: Vec<VersionSnapshot> = store::get_json(storage, &versions_key)
            .await?
            .unwrap_or_default();
        versions.insert(0, VersionSnapshot::new(text));
        versions.truncate(VERSION_HISTORY_LIMIT);
        store::set_json(storage, &versions_key, &versions).await?;
    }

    let paper_word_count = total_word_count(storage, paper_id).await?;
    let today = papers::today();
    papers::update(storage, paper_id, |paper| {
        paper.word_count = paper_word_count;
        paper.last_modified = today;
    })
    .await?;

    Ok(SaveOutcome {
        snapshot_taken,
        paper_word_count,
    })
}

/// Sum the word counts of every registered section of a paper.
pub async fn total_word_count(
    storage: &ActorRef<StorageMsg>,
    paper_id: &str,
) -> Result<u64, StoreError> {
    let mut total = 0;
    for section_id in sections::all_ids() {
        let text = load(storage, paper_id, section_id).await?;
        total += editor::word_count(&text);
    }
    Ok(total)
}
