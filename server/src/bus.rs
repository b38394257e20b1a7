//! In-process editor event bus.
//!
//! Panels coordinate through one typed broadcast channel instead of ad hoc
//! global events. The service runs a single subscriber: the reference
//! appender, which reacts to [`EditorEvent::AddReferenceEntry`] by
//! appending the formatted entry to the paper's references draft,
//! separated from existing entries by a blank line.

use ractor::ActorRef;
use shared_types::EditorEvent;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::actors::storage::StorageMsg;
use crate::store::{drafts, papers, StoreError};

pub const BUS_CAPACITY: usize = 64;

pub const REFERENCES_SECTION: &str = "references";

pub fn channel() -> broadcast::Sender<EditorEvent> {
    broadcast::channel(BUS_CAPACITY).0
}

pub fn spawn_reference_appender(
    storage: ActorRef<StorageMsg>,
    mut events: broadcast::Receiver<EditorEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(EditorEvent::AddReferenceEntry { paper_id, entry }) => {
                    if let Err(e) = append_reference(&storage, &paper_id, &entry).await {
                        tracing::warn!(error = %e, paper_id, "Failed to append reference entry");
                    }
                }
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Reference appender lagged behind the editor bus");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}

async fn append_reference(
    storage: &ActorRef<StorageMsg>,
    paper_id: &str,
    entry: &str,
) -> Result<(), StoreError> {
    // The paper may have been deleted after the event was published;
    // writing anyway would recreate a dangling draft key.
    if papers::find(storage, paper_id).await?.is_none() {
        tracing::warn!(paper_id, "Dropping reference entry for unknown paper");
        return Ok(());
    }

    let current = drafts::load(storage, paper_id, REFERENCES_SECTION).await?;
    let updated = if current.trim().is_empty() {
        entry.to_string()
    } else {
        format!("{current}\n\n{entry}")
    };
    drafts::save(storage, paper_id, REFERENCES_SECTION, &updated).await?;
    tracing::debug!(paper_id, "Appended reference entry");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::storage::{StorageActor, StorageArguments};
    use ractor::Actor;
    use shared_types::NewPaper;
    use std::time::Duration;

    async fn register_paper(storage: &ActorRef<StorageMsg>) -> String {
        papers::create(
            storage,
            NewPaper {
                title: "Bus Paper".to_string(),
                topic: "Events".to_string(),
                kind: "research".to_string(),
                due_date: None,
                description: None,
            },
        )
        .await
        .expect("create failed")
        .id
    }

    async fn wait_for_draft(
        storage: &ActorRef<StorageMsg>,
        paper_id: &str,
        needle: &str,
    ) -> String {
        for _ in 0..50 {
            let text = drafts::load(storage, paper_id, REFERENCES_SECTION)
                .await
                .expect("load failed");
            if text.contains(needle) {
                return text;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("reference entry never appeared");
    }

    #[tokio::test]
    async fn test_add_reference_entry_appends_with_separator() {
        let (storage, _handle) = Actor::spawn(None, StorageActor, StorageArguments::InMemory)
            .await
            .expect("Failed to spawn storage actor");
        let bus = channel();
        let _appender = spawn_reference_appender(storage.clone(), bus.subscribe());
        let paper_id = register_paper(&storage).await;

        bus.send(EditorEvent::AddReferenceEntry {
            paper_id: paper_id.clone(),
            entry: "First entry.".to_string(),
        })
        .expect("send failed");
        wait_for_draft(&storage, &paper_id, "First entry.").await;

        bus.send(EditorEvent::AddReferenceEntry {
            paper_id: paper_id.clone(),
            entry: "Second entry.".to_string(),
        })
        .expect("send failed");
        let text = wait_for_draft(&storage, &paper_id, "Second entry.").await;

        assert_eq!(text, "First entry.\n\nSecond entry.");
    }

    #[tokio::test]
    async fn test_other_events_are_ignored() {
        let (storage, _handle) = Actor::spawn(None, StorageActor, StorageArguments::InMemory)
            .await
            .expect("Failed to spawn storage actor");
        let bus = channel();
        let _appender = spawn_reference_appender(storage.clone(), bus.subscribe());
        let paper_id = register_paper(&storage).await;

        bus.send(EditorEvent::Focus).expect("send failed");
        bus.send(EditorEvent::AddReferenceEntry {
            paper_id: paper_id.clone(),
            entry: "Only entry.".to_string(),
        })
        .expect("send failed");

        let text = wait_for_draft(&storage, &paper_id, "Only entry.").await;
        assert_eq!(text, "Only entry.");
    }

    #[tokio::test]
    async fn test_entry_for_unknown_paper_leaves_no_draft() {
        let (storage, _handle) = Actor::spawn(None, StorageActor, StorageArguments::InMemory)
            .await
            .expect("Failed to spawn storage actor");
        let bus = channel();
        let _appender = spawn_reference_appender(storage.clone(), bus.subscribe());
        let paper_id = register_paper(&storage).await;

        // First event targets a paper that was never registered (or was
        // deleted); the second proves the appender got past it.
        bus.send(EditorEvent::AddReferenceEntry {
            paper_id: "ghost".to_string(),
            entry: "Orphan entry.".to_string(),
        })
        .expect("send failed");
        bus.send(EditorEvent::AddReferenceEntry {
            paper_id: paper_id.clone(),
            entry: "Kept entry.".to_string(),
        })
        .expect("send failed");

        wait_for_draft(&storage, &paper_id, "Kept entry.").await;
        let orphan = drafts::load(&storage, "ghost", REFERENCES_SECTION)
            .await
            .expect("load failed");
        assert_eq!(orphan, "");
    }
}
