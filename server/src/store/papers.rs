//! Paper registry operations.
//!
//! The whole registry lives under one key (`researchflow_papers`) as a JSON
//! list, newest paper first. Paper ids are millisecond-timestamp strings
//! assigned at creation.

use chrono::Utc;
use ractor::ActorRef;
use shared_types::{keys, NewPaper, Paper};

use crate::actors::storage::StorageMsg;
use crate::store::{self, StoreError};

pub fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

pub async fn list(storage: &ActorRef<StorageMsg>) -> Result<Vec<Paper>, StoreError> {
    Ok(store::get_json(storage, keys::PAPERS).await?.unwrap_or_default())
}

pub async fn find(
    storage: &ActorRef<StorageMsg>,
    paper_id: &str,
) -> Result<Option<Paper>, StoreError> {
    Ok(list(storage).await?.into_iter().find(|p| p.id == paper_id))
}

async fn save_all(storage: &ActorRef<StorageMsg>, papers: &[Paper]) -> Result<(), StoreError> {
    store::set_json(storage, keys::PAPERS, &papers).await
}

/// Create a paper and prepend it to the registry.
pub async fn create(storage: &ActorRef<StorageMsg>, form: NewPaper) -> Result<Paper, StoreError> {
    let today = today();
    let paper = Paper {
        id: Utc::now().timestamp_millis().to_string(),
        title: form.title,
        topic: form.topic,
        kind: form.kind,
        created_at: today.clone(),
        last_modified: today,
        progress: 0,
        due_date: form.due_date.filter(|d| !d.is_empty()),
        word_count: 0,
    };

    let mut papers = list(storage).await?;
    papers.insert(0, paper.clone());
    save_all(storage, &papers).await?;
    Ok(paper)
}

/// Apply an edit to one paper and persist the registry. Returns the updated
/// paper, or `None` when the id is unknown.
pub async fn update<F>(
    storage: &ActorRef<StorageMsg>,
    paper_id: &str,
    apply: F,
) -> Result<Option<Paper>, StoreError>
where
    F: FnOnce(&mut Paper),
{
    let mut papers = list(storage).await?;
    let Some(paper) = papers.iter_mut().find(|p| p.id == paper_id) else {
        return Ok(None);
    };
    apply(paper);
    let updated = paper.clone();
    save_all(storage, &papers).await?;
    Ok(Some(updated))
}

/// Remove a paper and every composite key that belongs to it: section
/// drafts, version lists, and the source library.
pub async fn delete(storage: &ActorRef<StorageMsg>, paper_id: &str) -> Result<bool, StoreError> {
    let mut papers = list(storage).await?;
    let before = papers.len();
    papers.retain(|p| p.id != paper_id);
    if papers.len() == before {
        return Ok(false);
    }
    save_all(storage, &papers).await?;

    let prefix = format!("paper_{paper_id}_");
    for key in store::list_keys(storage, &prefix).await? {
        store::delete_raw(storage, &key).await?;
    }
    Ok(true)
}
