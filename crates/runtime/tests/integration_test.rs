//! End-to-end sessions driven through the runtime handle.
//!
//! Every test runs on a paused clock, so the enemy-turn delay elapses only
//! when the test awaits past it.

use std::time::Duration;

use game_content::WorldSpec;
use game_content::dungeon::initial_player;
use game_core::{
    CellKind, CombatCommand, CombatError, CombatTurn, Combatant, Direction, Enemy, EntityId,
    ExecuteError, GameEvent, GameStatus, Item, ItemCategory, ItemError, MapDimensions,
    ObjectiveKind, ObjectiveTarget, Position, Quest, QuestObjective, QuestRewards, QuestStatus,
    ResourceMeter, StatBundle, TransitionPhaseError, WorldItem,
};
use runtime::{Event, Runtime, RuntimeConfig, RuntimeError, SessionEvent, Topic};
use tokio::sync::broadcast;

const DELAY: Duration = Duration::from_millis(1000);
/// Just past the delay, so the enemy turn is handled before the test resumes.
const AFTER_DELAY: Duration = Duration::from_millis(1001);

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn goblin(attack: i32) -> Enemy {
    Enemy {
        id: EntityId::new("goblin1"),
        name: "Goblin Warrior".into(),
        health: ResourceMeter::full(40),
        attack,
        defense: 2,
        position: Position::new(3, 1),
        experience: 25,
        gold: 15,
        loot: vec![
            Item::new("sword1", "Rusty Sword", ItemCategory::Weapon, "Worn", 25)
                .with_stats(StatBundle::attack(5)),
        ],
        boss: None,
    }
}

/// 8x6 room: player at (1,1), goblin at (3,1), a gem at (1,3) and a
/// main quest to collect it.
fn arena(goblin_attack: i32) -> WorldSpec {
    WorldSpec {
        dimensions: MapDimensions::new(8, 6),
        walls: Vec::new(),
        exits: Vec::new(),
        player: initial_player(),
        enemies: vec![goblin(goblin_attack)],
        items: vec![WorldItem::new(
            Item::new("gem1", "Blue Gem", ItemCategory::Treasure, "Glitters", 10),
            Position::new(1, 3),
        )],
        quests: vec![Quest {
            id: EntityId::new("main1"),
            title: "Shiny".into(),
            description: "Find the gem".into(),
            objectives: vec![QuestObjective::new(
                "obj1",
                "Collect the gem",
                ObjectiveKind::Collect,
                ObjectiveTarget::parse("gem1"),
                1,
            )],
            rewards: QuestRewards {
                experience: 0,
                gold: 100,
                items: Vec::new(),
            },
            status: QuestStatus::Active,
            is_main_quest: true,
        }],
    }
}

async fn start(world: WorldSpec) -> Runtime {
    init_tracing();
    let config = RuntimeConfig {
        enemy_turn_delay: DELAY,
        game_seed: Some(7),
        ..RuntimeConfig::default()
    };
    Runtime::builder()
        .config(config)
        .world(world)
        .build()
        .await
        .expect("runtime should build")
}

async fn next_game_event(rx: &mut broadcast::Receiver<Event>) -> GameEvent {
    loop {
        match rx.recv().await.expect("event stream open") {
            Event::Game { event, .. } => return event,
            Event::Session(_) => continue,
        }
    }
}

#[tokio::test(start_paused = true)]
async fn blocked_moves_keep_position_and_explain() {
    let runtime = start(arena(8)).await;
    let handle = runtime.handle();

    let error = handle.move_player(Direction::Up).await.unwrap_err();
    assert!(matches!(
        error.rejection(),
        Some(ExecuteError::Move(TransitionPhaseError { .. }))
    ));

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.state.player.position, Position::new(1, 1));
    assert_eq!(snapshot.message(), "Cannot move there!");
    assert_eq!(snapshot.state.nonce, 0);

    let snapshot = handle.move_player(Direction::Right).await.unwrap();
    assert_eq!(snapshot.state.player.position, Position::new(2, 1));
    assert_eq!(snapshot.message(), "Moved successfully.");
    assert_eq!(snapshot.cell(2, 1), Some(CellKind::Player));
    assert_eq!(snapshot.cell(1, 1), Some(CellKind::Empty));
    assert_eq!(snapshot.cell(0, 0), Some(CellKind::Wall));
    assert_eq!(snapshot.cell(3, 1), Some(CellKind::Enemy));

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn enemy_replies_after_the_delay() {
    let runtime = start(arena(8)).await;
    let handle = runtime.handle();
    let mut combat = handle.subscribe(Topic::Combat);

    handle.move_player(Direction::Right).await.unwrap();
    let snapshot = handle.move_player(Direction::Right).await.unwrap();
    assert_eq!(snapshot.state.player.position, Position::new(2, 1));
    let encounter = snapshot.state.encounter.as_ref().expect("encounter started");
    assert_eq!(encounter.log, vec!["Combat started with Goblin Warrior!"]);
    assert!(matches!(
        next_game_event(&mut combat).await,
        GameEvent::EncounterStarted { .. }
    ));

    // Movement is refused while fighting.
    assert!(handle.move_player(Direction::Down).await.is_err());

    let snapshot = handle
        .resolve_combat_action(CombatCommand::Attack)
        .await
        .unwrap();
    let encounter = snapshot.state.encounter.as_ref().unwrap();
    assert_eq!(encounter.turn, CombatTurn::EnemyTurn);
    let goblin_health = snapshot.state.enemies[0].health.current;
    assert!((23..=27).contains(&goblin_health));

    // No second player action while the enemy's turn is pending.
    let error = handle
        .resolve_combat_action(CombatCommand::Attack)
        .await
        .unwrap_err();
    assert!(matches!(
        error.rejection(),
        Some(ExecuteError::Combat(TransitionPhaseError {
            error: CombatError::NotPlayerTurn,
            ..
        }))
    ));

    tokio::time::sleep(DELAY - Duration::from_millis(1)).await;
    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.state.player.health.current, 100);
    assert_eq!(
        snapshot.state.encounter.as_ref().unwrap().turn,
        CombatTurn::EnemyTurn
    );

    tokio::time::sleep(Duration::from_millis(2)).await;
    let snapshot = handle.snapshot().await.unwrap();
    let taken = 100 - snapshot.state.player.health.current;
    assert!((3..=7).contains(&taken), "took {taken}");
    assert_eq!(snapshot.message(), format!("Took {taken} damage!"));
    assert_eq!(
        snapshot.state.encounter.as_ref().unwrap().turn,
        CombatTurn::PlayerTurn
    );

    let mut saw_counterattack = false;
    while let Ok(event) = combat.try_recv() {
        if let Event::Game {
            event:
                GameEvent::DamageDealt {
                    target: Combatant::Player,
                    amount,
                    ..
                },
            ..
        } = event
        {
            assert_eq!(amount, taken);
            saw_counterattack = true;
        }
    }
    assert!(saw_counterattack);
}

#[tokio::test(start_paused = true)]
async fn fighting_to_victory_pays_out() {
    let runtime = start(arena(1)).await;
    let handle = runtime.handle();
    let mut quest = handle.subscribe(Topic::Quest);

    handle.move_player(Direction::Right).await.unwrap();
    handle.move_player(Direction::Right).await.unwrap();

    let mut snapshot = handle.snapshot().await.unwrap();
    let mut rounds = 0;
    while snapshot.state.encounter.is_some() {
        rounds += 1;
        assert!(rounds <= 4, "goblin should fall within four hits");
        snapshot = handle
            .resolve_combat_action(CombatCommand::Attack)
            .await
            .unwrap();
        if snapshot.state.encounter.is_some() {
            tokio::time::sleep(AFTER_DELAY).await;
        }
    }

    assert!(rounds >= 3);
    assert!(snapshot.state.enemies.is_empty());
    assert_eq!(snapshot.state.player.experience, 25);
    assert_eq!(snapshot.state.player.gold, 65);
    assert!(
        snapshot
            .state
            .player
            .inventory_item(&EntityId::new("sword1"))
            .is_some()
    );
    assert_eq!(
        snapshot.message(),
        "Defeated Goblin Warrior! Gained 25 XP and 15 gold."
    );
    assert_eq!(snapshot.cell(3, 1), Some(CellKind::Empty));

    // Nothing is left to fire once the fight is over.
    tokio::time::sleep(DELAY * 3).await;
    let after = handle.snapshot().await.unwrap();
    assert_eq!(after.state, snapshot.state);

    // The kill did not touch the collect quest.
    assert!(quest.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn defend_then_flee_leaves_the_enemy_wounded() {
    let runtime = start(arena(8)).await;
    let handle = runtime.handle();

    handle.move_player(Direction::Right).await.unwrap();
    handle.move_player(Direction::Right).await.unwrap();

    let snapshot = handle
        .resolve_combat_action(CombatCommand::Attack)
        .await
        .unwrap();
    let wounded = snapshot.state.enemies[0].health.current;
    tokio::time::sleep(AFTER_DELAY).await;

    let snapshot = handle
        .resolve_combat_action(CombatCommand::Defend)
        .await
        .unwrap();
    assert!(snapshot.state.encounter.as_ref().unwrap().defending);
    tokio::time::sleep(AFTER_DELAY).await;

    let snapshot = handle
        .resolve_combat_action(CombatCommand::Flee)
        .await
        .unwrap();
    assert!(snapshot.state.encounter.is_none());
    assert_eq!(snapshot.state.enemies[0].health.current, wounded);
    assert_eq!(snapshot.state.player.position, Position::new(2, 1));

    // Combat actions outside an encounter are refused.
    let error = handle
        .resolve_combat_action(CombatCommand::Attack)
        .await
        .unwrap_err();
    assert!(matches!(
        error.rejection(),
        Some(ExecuteError::Combat(TransitionPhaseError {
            error: CombatError::NoEncounter,
            ..
        }))
    ));
}

#[tokio::test(start_paused = true)]
async fn reset_discards_the_pending_enemy_turn() {
    let runtime = start(arena(8)).await;
    let handle = runtime.handle();
    let mut session = handle.subscribe(Topic::Session);
    let mut combat = handle.subscribe(Topic::Combat);

    handle.move_player(Direction::Right).await.unwrap();
    handle.move_player(Direction::Right).await.unwrap();
    handle
        .resolve_combat_action(CombatCommand::Attack)
        .await
        .unwrap();

    let snapshot = handle.reset_game().await.unwrap();
    assert_eq!(
        snapshot.message(),
        "Game reset! Welcome back to the adventure!"
    );
    assert_eq!(snapshot.state.epoch, 1);
    assert_eq!(snapshot.state.nonce, 0);
    assert!(snapshot.state.encounter.is_none());
    assert_eq!(snapshot.state.enemies[0].health, ResourceMeter::full(40));
    assert_eq!(snapshot.state.player.position, Position::new(1, 1));

    tokio::time::sleep(DELAY * 3).await;
    let after = handle.snapshot().await.unwrap();
    assert_eq!(after.state.player.health.current, 100);
    assert_eq!(after.state, snapshot.state);

    while let Ok(event) = combat.try_recv() {
        assert!(!matches!(
            event,
            Event::Game {
                event: GameEvent::DamageDealt {
                    target: Combatant::Player,
                    ..
                },
                ..
            }
        ));
    }

    let mut saw_reset = false;
    while let Ok(event) = session.try_recv() {
        if event == Event::Session(SessionEvent::Reset { epoch: 1 }) {
            saw_reset = true;
        }
    }
    assert!(saw_reset);
}

#[tokio::test(start_paused = true)]
async fn defeat_locks_the_game_until_reset() {
    let mut world = arena(60);
    world.player.health = ResourceMeter::new(5, 100);
    let runtime = start(world).await;
    let handle = runtime.handle();
    let mut session = handle.subscribe(Topic::Session);

    handle.move_player(Direction::Right).await.unwrap();
    handle.move_player(Direction::Right).await.unwrap();
    handle
        .resolve_combat_action(CombatCommand::Attack)
        .await
        .unwrap();

    loop {
        match session.recv().await.unwrap() {
            Event::Game {
                event: GameEvent::PlayerDefeated,
                ..
            } => break,
            _ => continue,
        }
    }

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.state.status, GameStatus::GameOver);
    assert_eq!(snapshot.state.player.health.current, 0);
    assert!(snapshot.state.encounter.is_none());
    assert_eq!(snapshot.message(), "Game Over!");

    let error = handle.move_player(Direction::Left).await.unwrap_err();
    assert!(matches!(error, RuntimeError::Rejected(ExecuteError::GameOver)));

    let snapshot = handle.reset_game().await.unwrap();
    assert_eq!(snapshot.state.status, GameStatus::Playing);
    assert_eq!(snapshot.state.player.health, ResourceMeter::new(5, 100));
    handle.move_player(Direction::Down).await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn collecting_the_gem_completes_the_main_quest() {
    let runtime = start(arena(8)).await;
    let handle = runtime.handle();
    let mut world = handle.subscribe(Topic::World);
    let mut quest = handle.subscribe(Topic::Quest);

    handle.move_player(Direction::Down).await.unwrap();
    let snapshot = handle.move_player(Direction::Down).await.unwrap();

    assert_eq!(snapshot.state.player.position, Position::new(1, 3));
    assert!(snapshot.state.items.is_empty());
    assert!(
        snapshot
            .state
            .player
            .inventory_item(&EntityId::new("gem1"))
            .is_some()
    );
    assert_eq!(snapshot.state.player.gold, 50 + 10 + 100);
    assert_eq!(snapshot.state.quests[0].status, QuestStatus::Completed);
    assert!(snapshot.victory);

    assert!(matches!(next_game_event(&mut world).await, GameEvent::Moved { .. }));
    assert!(matches!(next_game_event(&mut world).await, GameEvent::Moved { .. }));
    assert_eq!(
        next_game_event(&mut world).await,
        GameEvent::ItemCollected {
            item: EntityId::new("gem1"),
            gold: 10,
        }
    );
    assert!(matches!(
        next_game_event(&mut quest).await,
        GameEvent::ObjectiveProgressed { current: 1, required: 1, .. }
    ));
    assert_eq!(
        next_game_event(&mut quest).await,
        GameEvent::QuestCompleted {
            quest: EntityId::new("main1"),
            is_main_quest: true,
        }
    );
}

#[tokio::test(start_paused = true)]
async fn inventory_intents_through_the_handle() {
    let mut world = arena(8);
    world.player.health = ResourceMeter::new(30, 100);
    world.player.inventory = vec![
        Item::new("potion1", "Health Potion", ItemCategory::Potion, "Heals", 30)
            .with_stats(StatBundle::restore(50, 0))
            .with_quantity(1),
        Item::new("sword2", "Iron Sword", ItemCategory::Weapon, "Sharp", 40)
            .with_stats(StatBundle::attack(5)),
    ];
    let runtime = start(world).await;
    let handle = runtime.handle();

    let snapshot = handle.consume_item("potion1").await.unwrap();
    assert_eq!(snapshot.state.player.health.current, 80);
    assert_eq!(snapshot.message(), "Used Health Potion!");

    let snapshot = handle.equip_item("sword2").await.unwrap();
    assert_eq!(snapshot.state.player.attack, 20);
    assert!(snapshot.state.player.inventory.is_empty());
    assert_eq!(snapshot.message(), "Equipped Iron Sword!");

    let error = handle.consume_item("potion1").await.unwrap_err();
    assert!(matches!(
        error.rejection(),
        Some(ExecuteError::UseItem(TransitionPhaseError { .. }))
    ));
    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.message(), "Equipped Iron Sword!");
    assert_eq!(snapshot.state.nonce, 2);
}

#[tokio::test(start_paused = true)]
async fn items_wait_while_the_enemy_turn_is_pending() {
    let mut world = arena(8);
    world.player.health = ResourceMeter::new(30, 100);
    world.player.inventory = vec![
        Item::new("potion1", "Health Potion", ItemCategory::Potion, "Heals", 30)
            .with_stats(StatBundle::restore(50, 0))
            .with_quantity(1),
        Item::new("sword2", "Iron Sword", ItemCategory::Weapon, "Sharp", 40)
            .with_stats(StatBundle::attack(5)),
    ];
    let runtime = start(world).await;
    let handle = runtime.handle();

    handle.move_player(Direction::Right).await.unwrap();
    handle.move_player(Direction::Right).await.unwrap();
    let snapshot = handle
        .resolve_combat_action(CombatCommand::Attack)
        .await
        .unwrap();
    assert_eq!(
        snapshot.state.encounter.as_ref().unwrap().turn,
        CombatTurn::EnemyTurn
    );
    let nonce = snapshot.state.nonce;

    let error = handle.consume_item("potion1").await.unwrap_err();
    assert!(matches!(
        error.rejection(),
        Some(ExecuteError::UseItem(TransitionPhaseError {
            error: ItemError::AwaitingEnemyTurn,
            ..
        }))
    ));
    let error = handle.equip_item("sword2").await.unwrap_err();
    assert!(matches!(
        error.rejection(),
        Some(ExecuteError::EquipItem(TransitionPhaseError {
            error: ItemError::AwaitingEnemyTurn,
            ..
        }))
    ));

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.state.nonce, nonce);
    assert_eq!(snapshot.state.player.health.current, 30);
    assert_eq!(snapshot.state.player.attack, 15);
    assert_eq!(snapshot.state.player.inventory.len(), 2);

    tokio::time::sleep(AFTER_DELAY).await;
    let before = handle.snapshot().await.unwrap();
    assert_eq!(
        before.state.encounter.as_ref().unwrap().turn,
        CombatTurn::PlayerTurn
    );
    let wounded = before.state.player.health.current;
    assert!(wounded < 30);

    let snapshot = handle.consume_item("potion1").await.unwrap();
    assert_eq!(snapshot.state.player.health.current, wounded + 50);
    let snapshot = handle.equip_item("sword2").await.unwrap();
    assert_eq!(snapshot.state.player.attack, 20);

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn misplaced_worlds_are_refused() {
    let mut world = arena(8);
    world.enemies[0].position = Position::new(0, 3);

    let error = Runtime::builder()
        .world(world)
        .build()
        .await
        .err()
        .expect("wall placement should fail");
    assert!(matches!(
        error,
        RuntimeError::InvalidWorld(ref ids) if ids == &["goblin1".to_string()]
    ));
}

#[tokio::test(start_paused = true)]
async fn default_dungeon_boots() {
    let runtime = Runtime::builder()
        .config(RuntimeConfig {
            game_seed: Some(1),
            ..RuntimeConfig::default()
        })
        .build()
        .await
        .unwrap();

    let snapshot = runtime.handle().snapshot().await.unwrap();
    assert_eq!(snapshot.grid.len(), 15);
    assert_eq!(snapshot.grid[0].len(), 20);
    assert_eq!(snapshot.state.enemies.len(), 5);
    assert_eq!(snapshot.state.game_seed, 1);
    assert!(!snapshot.victory);

    runtime.shutdown().await.unwrap();
}
