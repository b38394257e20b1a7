//! Per-paper source libraries.
//!
//! Each paper's bibliography lives under `paper_{id}_sources` as a JSON
//! list, newest source first. The citation key is rederived on every add
//! and edit.

use ractor::ActorRef;
use shared_types::{keys, NewSource, Source};
use uuid::Uuid;

use crate::actors::storage::StorageMsg;
use crate::citations;
use crate::store::{self, StoreError};

pub async fn list(
    storage: &ActorRef<StorageMsg>,
    paper_id: &str,
) -> Result<Vec<Source>, StoreError> {
    let key = keys::sources(paper_id);
    Ok(store::get_json(storage, &key).await?.unwrap_or_default())
}

pub async fn find(
    storage: &ActorRef<StorageMsg>,
    paper_id: &str,
    source_id: &str,
) -> Result<Option<Source>, StoreError> {
    Ok(list(storage, paper_id)
        .await?
        .into_iter()
        .find(|s| s.id == source_id))
}

async fn save_all(
    storage: &ActorRef<StorageMsg>,
    paper_id: &str,
    sources: &[Source],
) -> Result<(), StoreError> {
    let key = keys::sources(paper_id);
    store::set_json(storage, &key, &sources).await
}

/// Add a source to the front of the paper's library.
pub async fn add(
    storage: &ActorRef<StorageMsg>,
    paper_id: &str,
    form: NewSource,
) -> Result<Source, StoreError> {
    let source = Source {
        id: Uuid::new_v4().to_string(),
        citation_key: citations::citation_key(&form.author, &form.year, &form.title),
        source_type: form.source_type,
        title: form.title,
        author: form.author,
        year: form.year,
        publisher: form.publisher,
        journal: form.journal,
        volume: form.volume,
        pages: form.pages,
        url: form.url,
        doi: form.doi,
        notes: form.notes,
    };

    let mut sources = list(storage, paper_id).await?;
    sources.insert(0, source.clone());
    save_all(storage, paper_id, &sources).await?;
    Ok(source)
}

/// Replace a source's fields, keeping its id and regenerating the citation
/// key. Returns `None` when the id is unknown.
pub async fn update(
    storage: &ActorRef<StorageMsg>,
    paper_id: &str,
    source_id: &str,
    form: NewSource,
) -> Result<Option<Source>, StoreError> {
    let mut sources = list(storage, paper_id).await?;
    let Some(source) = sources.iter_mut().find(|s| s.id == source_id) else {
        return Ok(None);
    };

    source.citation_key = citations::citation_key(&form.author, &form.year, &form.title);
    source.source_type = form.source_type;
    source.title = form.title;
    source.author = form.author;
    source.year = form.year;
    source.publisher = form.publisher;
    source.journal = form.journal;
    source.volume = form.volume;
    source.pages = form.pages;
    source.url = form.url;
    source.doi = form.doi;
    source.notes = form.notes;

    let updated = source.clone();
    save_all(storage, paper_id, &sources).await?;
    Ok(Some(updated))
}

pub async fn remove(
    storage: &ActorRef<StorageMsg>,
    paper_id: &str,
    source_id: &str,
) -> Result<bool, StoreError> {
    let mut sources = list(storage, paper_id).await?;
    let before = sources.len();
    sources.retain(|s| s.id != source_id);
    if sources.len() == before {
        return Ok(false);
    }
    save_all(storage, paper_id, &sources).await?;
    Ok(true)
}
