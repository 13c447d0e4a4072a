//! Delayed enemy turns.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use game_core::EncounterId;

use super::simulation::Command;

/// Schedules at most one enemy turn at a time.
///
/// The sleeping task holds only a weak sender, so a pending turn never keeps
/// the simulation worker alive after every [`crate::RuntimeHandle`] is gone.
pub struct EnemyTurnTimer {
    delay: Duration,
    commands: mpsc::WeakSender<Command>,
    pending: Option<(EncounterId, JoinHandle<()>)>,
}

impl EnemyTurnTimer {
    pub fn new(delay: Duration, commands: mpsc::WeakSender<Command>) -> Self {
        Self {
            delay,
            commands,
            pending: None,
        }
    }

    /// Sends `EnemyTurn { encounter }` after the delay, replacing any earlier turn.
    pub fn schedule(&mut self, encounter: EncounterId) {
        self.cancel();

        let commands = self.commands.clone();
        let delay = self.delay;
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(commands) = commands.upgrade() else {
                trace!(target: "runtime::timer", %encounter, "runtime gone before enemy turn");
                return;
            };
            if commands.send(Command::EnemyTurn { encounter }).await.is_err() {
                trace!(target: "runtime::timer", %encounter, "command channel closed");
            }
        });

        debug!(
            target: "runtime::timer",
            %encounter,
            delay_ms = delay.as_millis() as u64,
            "enemy turn scheduled"
        );
        self.pending = Some((encounter, task));
    }

    /// Aborts the pending turn, if any.
    pub fn cancel(&mut self) {
        if let Some((encounter, task)) = self.pending.take() {
            task.abort();
            debug!(target: "runtime::timer", %encounter, "enemy turn cancelled");
        }
    }

    /// Marks the turn for `encounter` as delivered.
    pub fn fired(&mut self, encounter: EncounterId) {
        if self.pending() == Some(encounter) {
            self.pending = None;
        }
    }

    pub fn pending(&self) -> Option<EncounterId> {
        self.pending.as_ref().map(|(encounter, _)| *encounter)
    }
}

impl Drop for EnemyTurnTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encounter(seq: u32) -> EncounterId {
        EncounterId { epoch: 0, seq }
    }

    #[tokio::test(start_paused = true)]
    async fn fires_after_the_delay() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut timer = EnemyTurnTimer::new(Duration::from_millis(1000), tx.downgrade());

        timer.schedule(encounter(1));
        assert_eq!(timer.pending(), Some(encounter(1)));

        tokio::time::sleep(Duration::from_millis(999)).await;
        assert!(rx.try_recv().is_err());

        let Some(Command::EnemyTurn { encounter: fired }) = rx.recv().await else {
            panic!("expected an enemy turn");
        };
        assert_eq!(fired, encounter(1));

        timer.fired(fired);
        assert_eq!(timer.pending(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_turns_never_arrive() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut timer = EnemyTurnTimer::new(Duration::from_millis(1000), tx.downgrade());

        timer.schedule(encounter(1));
        timer.cancel();
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert!(rx.try_recv().is_err());
        assert_eq!(timer.pending(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn rescheduling_replaces_the_pending_turn() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut timer = EnemyTurnTimer::new(Duration::from_millis(1000), tx.downgrade());

        timer.schedule(encounter(1));
        timer.schedule(encounter(2));
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert!(matches!(
            rx.try_recv(),
            Ok(Command::EnemyTurn { encounter: fired }) if fired == encounter(2)
        ));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn weak_sender_does_not_outlive_the_channel() {
        let (tx, rx) = mpsc::channel(4);
        let mut timer = EnemyTurnTimer::new(Duration::from_millis(10), tx.downgrade());
        drop(tx);
        drop(rx);

        timer.schedule(encounter(1));
        tokio::time::sleep(Duration::from_millis(50)).await;
        timer.fired(encounter(1));
        assert_eq!(timer.pending(), None);
    }
}
