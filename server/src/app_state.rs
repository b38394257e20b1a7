use ractor::ActorRef;
use shared_types::EditorEvent;
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::actors::storage::StorageMsg;
use crate::ai::AiGateway;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    storage: ActorRef<StorageMsg>,
    ai: Arc<dyn AiGateway>,
    bus: broadcast::Sender<EditorEvent>,
    simulate_latency: bool,
}

impl AppState {
    pub fn new(
        storage: ActorRef<StorageMsg>,
        ai: Arc<dyn AiGateway>,
        simulate_latency: bool,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                storage,
                ai,
                bus: crate::bus::channel(),
                simulate_latency,
            }),
        }
    }

    pub fn storage(&self) -> ActorRef<StorageMsg> {
        self.inner.storage.clone()
    }

    pub fn ai(&self) -> Arc<dyn AiGateway> {
        self.inner.ai.clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EditorEvent> {
        self.inner.bus.subscribe()
    }

    /// Publish an event on the editor bus. Dropped silently when no
    /// subscriber is attached.
    pub fn publish(&self, event: EditorEvent) {
        let _ = self.inner.bus.send(event);
    }

    /// Whether mock routes sleep to imitate provider latency.
    pub fn simulate_latency(&self) -> bool {
        self.inner.simulate_latency
    }
}
