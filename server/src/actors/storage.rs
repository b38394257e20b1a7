//! StorageActor - key-value persistence using ractor
//!
//! This actor backs the paper registry, section drafts, version lists, and
//! per-paper source libraries with a single SQLite table. It supports both
//! file-based and in-memory databases.
//!
//! # Architecture
//!
//! - Uses ractor for actor model; all storage access is serialized through
//!   this actor's mailbox
//! - Uses rusqlite (bundled) for SQLite database access
//! - Values are opaque strings; callers layer JSON on top
//!
//! # Example
//!
//! ```rust,ignore
//! use ractor::{Actor, call};
//!
//! // Spawn with file-based database
//! let (store_ref, _handle) = Actor::spawn(
//!     None,
//!     StorageActor,
//!     StorageArguments::File("/path/to/researchflow.db".to_string()),
//! ).await?;
//!
//! let value = call!(store_ref, |reply| StorageMsg::Get {
//!     key: "researchflow_papers".to_string(),
//!     reply,
//! })?;
//! ```

use async_trait::async_trait;
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use rusqlite::{Connection, OptionalExtension};
use thiserror::Error;

/// Actor that manages the key-value store
#[derive(Debug, Default)]
pub struct StorageActor;

/// Arguments for spawning StorageActor
#[derive(Debug, Clone)]
pub enum StorageArguments {
    /// File-based database path
    File(String),
    /// In-memory database (for testing)
    InMemory,
}

/// State for StorageActor
pub struct StorageState {
    conn: Connection,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

// ============================================================================
// Messages
// ============================================================================

/// Messages handled by StorageActor
#[derive(Debug)]
pub enum StorageMsg {
    /// Fetch the value stored under a key, if any
    Get {
        key: String,
        reply: RpcReplyPort<Result<Option<String>, StorageError>>,
    },
    /// Insert or overwrite the value under a key
    Set {
        key: String,
        value: String,
        reply: RpcReplyPort<Result<(), StorageError>>,
    },
    /// Remove a key; removing an absent key is not an error
    Delete {
        key: String,
        reply: RpcReplyPort<Result<(), StorageError>>,
    },
    /// List all keys beginning with a prefix, used for referential cleanup
    /// when a paper is deleted
    ListKeys {
        prefix: String,
        reply: RpcReplyPort<Result<Vec<String>, StorageError>>,
    },
}

impl StorageActor {
    fn open(database_path: &str) -> Result<Connection, StorageError> {
        // Ensure parent directory exists for file-based databases
        if database_path != ":memory:" {
            if let Some(parent) = std::path::Path::new(database_path).parent() {
                std::fs::create_dir_all(parent).ok();
            }
        }

        let conn = Connection::open(database_path)?;
        Self::run_migrations(&conn)?;
        Ok(conn)
    }

    fn run_migrations(conn: &Connection) -> Result<(), StorageError> {
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            )
            "#,
            (),
        )?;
        Ok(())
    }

    fn handle_get(&self, key: &str, state: &StorageState) -> Result<Option<String>, StorageError> {
        let value = state
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn handle_set(&self, key: &str, value: &str, state: &StorageState) -> Result<(), StorageError> {
        state.conn.execute(
            r#"
            INSERT INTO kv (key, value, updated_at)
            VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            [key, value],
        )?;
        Ok(())
    }

    fn handle_delete(&self, key: &str, state: &StorageState) -> Result<(), StorageError> {
        state
            .conn
            .execute("DELETE FROM kv WHERE key = ?1", [key])?;
        Ok(())
    }

    fn handle_list_keys(
        &self,
        prefix: &str,
        state: &StorageState,
    ) -> Result<Vec<String>, StorageError> {
        let pattern = format!("{prefix}%");
        let mut stmt = state
            .conn
            .prepare("SELECT key FROM kv WHERE key LIKE ?1 ORDER BY key")?;
        let rows = stmt.query_map([pattern], |row| row.get::<_, String>(0))?;
        let mut keys = Vec::new();
        for row in rows {
            keys.push(row?);
        }
        Ok(keys)
    }
}

#[async_trait]
impl Actor for StorageActor {
    type Msg = StorageMsg;
    type State = StorageState;
    type Arguments = StorageArguments;

    async fn pre_start(
        &self,
        myself: ActorRef<Self::Msg>,
        args: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        tracing::info!(
            actor_id = %myself.get_id(),
            "StorageActor starting"
        );

        let conn = match args {
            StorageArguments::File(path) => {
                tracing::info!(database_path = %path, "Opening file-based database");
                Self::open(&path)
                    .map_err(|e| ActorProcessingErr::from(format!("Failed to open database: {e}")))?
            }
            StorageArguments::InMemory => {
                tracing::info!("Opening in-memory database");
                Self::open(":memory:").map_err(|e| {
                    ActorProcessingErr::from(format!("Failed to open in-memory database: {e}"))
                })?
            }
        };

        Ok(StorageState { conn })
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            StorageMsg::Get { key, reply } => {
                let _ = reply.send(self.handle_get(&key, state));
            }
            StorageMsg::Set { key, value, reply } => {
                let _ = reply.send(self.handle_set(&key, &value, state));
            }
            StorageMsg::Delete { key, reply } => {
                let _ = reply.send(self.handle_delete(&key, state));
            }
            StorageMsg::ListKeys { prefix, reply } => {
                let _ = reply.send(self.handle_list_keys(&prefix, state));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn spawn_store() -> ActorRef<StorageMsg> {
        let (store, _handle) = Actor::spawn(None, StorageActor, StorageArguments::InMemory)
            .await
            .expect("Failed to spawn storage actor");
        store
    }

    #[tokio::test]
    async fn test_set_then_get_round_trip() {
        let store = spawn_store().await;

        let result = ractor::call!(store, |reply| StorageMsg::Set {
            key: "k1".to_string(),
            value: "v1".to_string(),
            reply,
        })
        .expect("rpc failed");
        assert!(result.is_ok());

        let value = ractor::call!(store, |reply| StorageMsg::Get {
            key: "k1".to_string(),
            reply,
        })
        .expect("rpc failed")
        .expect("get failed");
        assert_eq!(value, Some("v1".to_string()));
    }

    #[tokio::test]
    async fn test_get_missing_key_is_none() {
        let store = spawn_store().await;

        let value = ractor::call!(store, |reply| StorageMsg::Get {
            key: "absent".to_string(),
            reply,
        })
        .expect("rpc failed")
        .expect("get failed");
        assert_eq!(value, None);
    }

    #[tokio::test]
    async fn test_set_overwrites_existing_value() {
        let store = spawn_store().await;

        for value in ["first", "second"] {
            ractor::call!(store, |reply| StorageMsg::Set {
                key: "k".to_string(),
                value: value.to_string(),
                reply,
            })
            .expect("rpc failed")
            .expect("set failed");
        }

        let value = ractor::call!(store, |reply| StorageMsg::Get {
            key: "k".to_string(),
            reply,
        })
        .expect("rpc failed")
        .expect("get failed");
        assert_eq!(value, Some("second".to_string()));
    }

    #[tokio::test]
    async fn test_delete_removes_key() {
        let store = spawn_store().await;

        ractor::call!(store, |reply| StorageMsg::Set {
            key: "doomed".to_string(),
            value: "x".to_string(),
            reply,
        })
        .expect("rpc failed")
        .expect("set failed");

        ractor::call!(store, |reply| StorageMsg::Delete {
            key: "doomed".to_string(),
            reply,
        })
        .expect("rpc failed")
        .expect("delete failed");

        let value = ractor::call!(store, |reply| StorageMsg::Get {
            key: "doomed".to_string(),
            reply,
        })
        .expect("rpc failed")
        .expect("get failed");
        assert_eq!(value, None);
    }

    #[tokio::test]
    async fn test_list_keys_by_prefix() {
        let store = spawn_store().await;

        for key in ["paper_1_section_abstract", "paper_1_sources", "paper_2_sources"] {
            ractor::call!(store, |reply| StorageMsg::Set {
                key: key.to_string(),
                value: "{}".to_string(),
                reply,
            })
            .expect("rpc failed")
            .expect("set failed");
        }

        let keys = ractor::call!(store, |reply| StorageMsg::ListKeys {
            prefix: "paper_1_".to_string(),
            reply,
        })
        .expect("rpc failed")
        .expect("list failed");
        assert_eq!(
            keys,
            vec![
                "paper_1_section_abstract".to_string(),
                "paper_1_sources".to_string()
            ]
        );
    }
}
