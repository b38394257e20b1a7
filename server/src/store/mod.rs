//! Typed domain operations over the key-value storage actor.
//!
//! Each submodule owns one slice of the storage layout: the paper registry,
//! section drafts with version history, and per-paper source libraries. All
//! access goes through [`StorageMsg`] rpc calls so the SQLite connection
//! stays confined to the actor.

pub mod drafts;
pub mod papers;
pub mod sources;

use ractor::ActorRef;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::actors::storage::{StorageError, StorageMsg};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage actor unavailable: {0}")]
    Actor(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("corrupt record under '{key}': {source}")]
    Corrupt {
        key: String,
        source: serde_json::Error,
    },
}

pub async fn get_raw(
    storage: &ActorRef<StorageMsg>,
    key: &str,
) -> Result<Option<String>, StoreError> {
    let key = key.to_string();
    ractor::call!(storage, |reply| StorageMsg::Get { key, reply })
        .map_err(|e| StoreError::Actor(e.to_string()))?
        .map_err(StoreError::from)
}

pub async fn set_raw(
    storage: &ActorRef<StorageMsg>,
    key: &str,
    value: String,
) -> Result<(), StoreError> {
    let key = key.to_string();
    ractor::call!(storage, |reply| StorageMsg::Set { key, value, reply })
        .map_err(|e| StoreError::Actor(e.to_string()))?
        .map_err(StoreError::from)
}

pub async fn delete_raw(storage: &ActorRef<StorageMsg>, key: &str) -> Result<(), StoreError> {
    let key = key.to_string();
    ractor::call!(storage, |reply| StorageMsg::Delete { key, reply })
        .map_err(|e| StoreError::Actor(e.to_string()))?
        .map_err(StoreError::from)
}

pub async fn list_keys(
    storage: &ActorRef<StorageMsg>,
    prefix: &str,
) -> Result<Vec<String>, StoreError> {
    let prefix = prefix.to_string();
    ractor::call!(storage, |reply| StorageMsg::ListKeys { prefix, reply })
        .map_err(|e| StoreError::Actor(e.to_string()))?
        .map_err(StoreError::from)
}

/// Fetch and decode a JSON value, or return `None` when the key is absent.
pub async fn get_json<T: DeserializeOwned>(
    storage: &ActorRef<StorageMsg>,
    key: &str,
) -> Result<Option<T>, StoreError> {
    match get_raw(storage, key).await? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Corrupt {
                key: key.to_string(),
                source,
            }),
        None => Ok(None),
    }
}

/// Encode and store a JSON value.
pub async fn set_json<T: Serialize>(
    storage: &ActorRef<StorageMsg>,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value).map_err(|source| StoreError::Corrupt {
        key: key.to_string(),
        source,
    })?;
    set_raw(storage, key, raw).await
}
