//! Per-conversation monitor lifecycle.
//!
//! At most one poller runs per conversation. Starting a monitor for a
//! conversation that already has one aborts the old task, waits for it to
//! finish, and only then spawns the replacement. Each spawned task carries a
//! guard that removes its map entry when the task ends for any reason
//! (abort, panic, or runtime shutdown).

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::notice;
use super::poller::CoefficientPoller;
use crate::domain::{ConversationId, WarehouseId};
use crate::error::Result;
use crate::infrastructure::config::monitor::MonitorConfig;
use crate::port::{Messenger, SupplyApi};

struct ActiveMonitor {
    generation: u64,
    handle: JoinHandle<()>,
}

type MonitorMap = Arc<Mutex<HashMap<ConversationId, ActiveMonitor>>>;

/// Removes a task's entry on drop, unless a newer task has replaced it.
struct EntryGuard {
    tasks: MonitorMap,
    conversation: ConversationId,
    generation: u64,
}

impl Drop for EntryGuard {
    fn drop(&mut self) {
        let mut tasks = self.tasks.lock();
        let owned = tasks
            .get(&self.conversation)
            .is_some_and(|m| m.generation == self.generation);
        if owned {
            tasks.remove(&self.conversation);
            debug!(
                conversation = %self.conversation,
                generation = self.generation,
                "Monitor entry released"
            );
        }
    }
}

/// Owns the conversation → poller map.
pub struct MonitorManager {
    tasks: MonitorMap,
    /// One lock per conversation so cancel → remove → insert is atomic per
    /// key while different conversations start concurrently.
    start_locks: Mutex<HashMap<ConversationId, Arc<tokio::sync::Mutex<()>>>>,
    next_generation: AtomicU64,
    supply: Arc<dyn SupplyApi>,
    messenger: Arc<dyn Messenger>,
    config: MonitorConfig,
}

impl MonitorManager {
    pub fn new(
        supply: Arc<dyn SupplyApi>,
        messenger: Arc<dyn Messenger>,
        config: MonitorConfig,
    ) -> Self {
        Self {
            tasks: Arc::new(Mutex::new(HashMap::new())),
            start_locks: Mutex::new(HashMap::new()),
            next_generation: AtomicU64::new(0),
            supply,
            messenger,
            config,
        }
    }

    /// Start (or restart) monitoring the configured warehouses for a
    /// conversation.
    ///
    /// # Errors
    ///
    /// Fails when the start announcement cannot be delivered; no poller is
    /// spawned in that case.
    pub async fn start(&self, conversation: ConversationId) -> Result<()> {
        self.start_with(conversation, self.config.warehouse_ids()).await
    }

    /// Start (or restart) monitoring a specific warehouse set.
    ///
    /// # Errors
    ///
    /// Fails when the start announcement cannot be delivered.
    pub async fn start_with(
        &self,
        conversation: ConversationId,
        warehouse_ids: Vec<WarehouseId>,
    ) -> Result<()> {
        let start_lock = Arc::clone(self.start_locks.lock().entry(conversation).or_default());
        let _serial = start_lock.lock().await;

        let previous = self.tasks.lock().remove(&conversation);
        if let Some(previous) = previous {
            previous.handle.abort();
            match previous.handle.await {
                Ok(()) => {}
                Err(e) if e.is_cancelled() => {}
                Err(e) => warn!(
                    conversation = %conversation,
                    error = %e,
                    "Previous monitor ended abnormally"
                ),
            }
            info!(
                conversation = %conversation,
                generation = previous.generation,
                "Previous monitor cancelled"
            );
            tokio::time::sleep(self.config.restart_grace()).await;
        }

        let announcement = notice::monitor_started(
            &self.config.warehouses,
            &self.config.rule(),
            self.config.poll_interval(),
        );
        self.messenger.send_text(conversation, &announcement).await?;

        let poller = CoefficientPoller::new(
            Arc::clone(&self.supply),
            Arc::clone(&self.messenger),
            self.config.rule(),
            warehouse_ids,
            self.config.poll_interval(),
            self.config.error_backoff(),
        );

        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let guard = EntryGuard {
            tasks: Arc::clone(&self.tasks),
            conversation,
            generation,
        };

        // Hold the map while spawning so the guard can never run before the
        // entry it is meant to remove exists.
        let mut tasks = self.tasks.lock();
        let handle = tokio::spawn(async move {
            let _guard = guard;
            poller.run(conversation).await;
        });
        tasks.insert(conversation, ActiveMonitor { generation, handle });
        drop(tasks);

        info!(conversation = %conversation, generation, "Monitor registered");
        Ok(())
    }

    #[must_use]
    pub fn is_active(&self, conversation: ConversationId) -> bool {
        self.tasks.lock().contains_key(&conversation)
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.tasks.lock().len()
    }

    /// Abort every running monitor.
    pub fn shutdown(&self) {
        let drained: Vec<_> = self.tasks.lock().drain().collect();
        for (conversation, monitor) in drained {
            monitor.handle.abort();
            debug!(conversation = %conversation, "Monitor aborted on shutdown");
        }
    }
}
