//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers one async method per
//! player intent. Every intent resolves to the post-action [`Snapshot`].
use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::{
    Action, CombatAction, CombatCommand, Direction, EntityId, EquipItemAction, MoveAction,
    UseItemAction,
};

use super::errors::{Result, RuntimeError};
use super::snapshot::Snapshot;
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Execute an arbitrary player action.
    pub async fn execute(&self, action: impl Into<Action>) -> Result<Snapshot> {
        let action = action.into();
        self.request(|reply| Command::Execute { action, reply })
            .await?
    }

    pub async fn move_player(&self, direction: Direction) -> Result<Snapshot> {
        self.execute(MoveAction::new(direction)).await
    }

    /// Attack, defend or flee in the current encounter.
    ///
    /// Rejected while the enemy's delayed turn is pending.
    pub async fn resolve_combat_action(&self, command: CombatCommand) -> Result<Snapshot> {
        self.execute(CombatAction::new(command)).await
    }

    pub async fn consume_item(&self, item: impl Into<EntityId>) -> Result<Snapshot> {
        self.execute(UseItemAction::new(item)).await
    }

    pub async fn equip_item(&self, item: impl Into<EntityId>) -> Result<Snapshot> {
        self.execute(EquipItemAction::new(item)).await
    }

    /// Restore the starting world. Any pending enemy turn becomes stale.
    pub async fn reset_game(&self) -> Result<Snapshot> {
        self.request(|reply| Command::Reset { reply }).await
    }

    /// Query the current game state and grid (read-only)
    pub async fn snapshot(&self) -> Result<Snapshot> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::World` - movement, pickups and inventory changes
    /// - `Topic::Combat` - encounters, damage, boss abilities and phases
    /// - `Topic::Quest` - objective progress, completions and level-ups
    /// - `Topic::Session` - start, reset, game over and rejected intents
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::Topic;
    ///
    /// let mut combat = handle.subscribe(Topic::Combat);
    /// while let Ok(event) = combat.recv().await {
    ///     // Render combat log
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
