pub mod storage;

pub use storage::{StorageActor, StorageArguments, StorageError, StorageMsg};
