//! Simulation worker that owns the authoritative [`game_core::GameState`].
//!
//! Receives commands from [`crate::RuntimeHandle`] and the enemy-turn timer,
//! executes actions via [`game_core::GameEngine`] one at a time, and publishes
//! the resulting events to the [`EventBus`].

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use game_content::WorldSpec;
use game_core::{
    Action, EncounterId, EnemyTurnAction, ErrorSeverity, ExecuteError, ExecutionOutcome,
    GameConfig, GameEngine, GameEnv, GameError, GameState, PcgRng, StaticMap,
};

use super::timer::EnemyTurnTimer;
use crate::api::{Result, Snapshot};
use crate::events::{Event, EventBus, SessionEvent};

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Execute a player intent and reply with the resulting snapshot.
    Execute {
        action: Action,
        reply: oneshot::Sender<Result<Snapshot>>,
    },
    /// Delayed enemy turn, sent by the timer.
    EnemyTurn { encounter: EncounterId },
    /// Rebuild the starting world.
    Reset { reply: oneshot::Sender<Snapshot> },
    /// Query the current game state (read-only).
    QueryState { reply: oneshot::Sender<Snapshot> },
}

/// Background task that processes gameplay commands.
///
/// The worker is the only writer of the game state. Commands are handled to
/// completion in arrival order, so a delayed enemy turn is applied atomically
/// between player intents.
pub struct SimulationWorker {
    state: GameState,
    world: WorldSpec,
    map: StaticMap,
    config: GameConfig,
    rng: PcgRng,
    command_rx: mpsc::Receiver<Command>,
    timer: EnemyTurnTimer,
    event_bus: EventBus,
}

impl SimulationWorker {
    pub fn new(
        world: WorldSpec,
        config: GameConfig,
        game_seed: u64,
        command_rx: mpsc::Receiver<Command>,
        timer: EnemyTurnTimer,
        event_bus: EventBus,
    ) -> Self {
        Self {
            state: world.new_game(game_seed),
            map: world.map(),
            world,
            config,
            rng: PcgRng,
            command_rx,
            timer,
            event_bus,
        }
    }

    /// Main worker loop. Ends once every handle is dropped.
    pub async fn run(mut self) {
        info!(
            target: "runtime::worker",
            game_seed = self.state.game_seed,
            enemies = self.state.enemies.len(),
            quests = self.state.quests.len(),
            "simulation worker started"
        );
        self.event_bus.publish(Event::Session(SessionEvent::Started {
            game_seed: self.state.game_seed,
        }));

        while let Some(command) = self.command_rx.recv().await {
            self.handle_command(command);
        }

        self.timer.cancel();
        debug!(target: "runtime::worker", "simulation worker stopped");
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Execute { action, reply } => {
                let result = self.handle_intent(&action);
                if reply.send(result).is_err() {
                    debug!(
                        target: "runtime::worker",
                        "Execute reply channel closed (caller dropped)"
                    );
                }
            }
            Command::EnemyTurn { encounter } => self.handle_enemy_turn(encounter),
            Command::Reset { reply } => {
                self.reset();
                if reply.send(self.snapshot()).is_err() {
                    debug!(
                        target: "runtime::worker",
                        "Reset reply channel closed (caller dropped)"
                    );
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.snapshot()).is_err() {
                    debug!(
                        target: "runtime::worker",
                        "QueryState reply channel closed (caller dropped)"
                    );
                }
            }
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state, &self.map)
    }

    fn execute(&mut self, action: &Action) -> std::result::Result<ExecutionOutcome, ExecuteError> {
        let env = GameEnv::new(&self.map, &self.rng, &self.config);
        GameEngine::new(&mut self.state, env).execute(action)
    }

    fn handle_intent(&mut self, action: &Action) -> Result<Snapshot> {
        debug!(
            target: "runtime::worker",
            action = action.as_str(),
            nonce = self.state.nonce,
            "executing intent"
        );

        let nonce = self.state.nonce;
        match self.execute(action) {
            Ok(outcome) => {
                self.commit(nonce, outcome);
                Ok(self.snapshot())
            }
            Err(error) => {
                self.report_rejection(action, &error);
                Err(error.into())
            }
        }
    }

    fn handle_enemy_turn(&mut self, encounter: EncounterId) {
        self.timer.fired(encounter);

        let action = Action::from(EnemyTurnAction::new(encounter));
        let nonce = self.state.nonce;
        match self.execute(&action) {
            Ok(outcome) => self.commit(nonce, outcome),
            Err(error) if error.is_stale_enemy_turn() => {
                debug!(target: "runtime::worker", %encounter, "discarding stale enemy turn");
                self.event_bus.publish(Event::Session(SessionEvent::EnemyTurnDiscarded {
                    encounter,
                }));
            }
            Err(error) => self.report_rejection(&action, &error),
        }
    }

    /// Publishes the events of a successful action and arms the timer if the
    /// encounter now waits on the enemy.
    fn commit(&mut self, nonce: u64, outcome: ExecutionOutcome) {
        for event in outcome.events {
            self.event_bus.publish(Event::Game { nonce, event });
        }

        if let Some(encounter) = outcome.enemy_turn {
            self.timer.schedule(encounter);
        }

        if self.state.is_game_over() {
            info!(target: "runtime::worker", nonce, "player defeated; waiting for reset");
        }
    }

    fn report_rejection(&self, action: &Action, error: &ExecuteError) {
        match error.severity() {
            ErrorSeverity::Internal | ErrorSeverity::Fatal => warn!(
                target: "runtime::worker",
                action = action.as_str(),
                code = error.error_code(),
                %error,
                "action failed"
            ),
            ErrorSeverity::Recoverable | ErrorSeverity::Validation => debug!(
                target: "runtime::worker",
                action = action.as_str(),
                code = error.error_code(),
                %error,
                "intent rejected"
            ),
        }

        self.event_bus.publish(Event::Session(SessionEvent::ActionRejected {
            action: action.as_str().to_owned(),
            code: error.error_code().to_owned(),
            message: error.to_string(),
        }));
    }

    fn reset(&mut self) {
        self.timer.cancel();
        let fresh = self.world.new_game(self.state.game_seed);
        self.state.reset(fresh);

        info!(target: "runtime::worker", epoch = self.state.epoch, "game reset");
        self.event_bus.publish(Event::Session(SessionEvent::Reset {
            epoch: self.state.epoch,
        }));
    }
}
