//! Quest objective tracking.
//!
//! World events (an item collected, an enemy killed) are matched against the
//! objectives of every active quest. Completion is latched: objectives and
//! quests never go back to incomplete.

use crate::state::{EntityId, ObjectiveKind, ObjectiveTarget, Quest, QuestStatus};

/// A world occurrence quests can react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorldEvent<'a> {
    Collected(&'a EntityId),
    Killed(&'a EntityId),
}

impl WorldEvent<'_> {
    fn matches(&self, kind: ObjectiveKind, target: &ObjectiveTarget) -> bool {
        match (self, kind) {
            // Collection targets are always a concrete item.
            (WorldEvent::Collected(item), ObjectiveKind::Collect) => {
                matches!(target, ObjectiveTarget::Entity(id) if id == *item)
            }
            (WorldEvent::Killed(enemy), ObjectiveKind::Kill) => target.matches(enemy),
            _ => false,
        }
    }
}

/// One objective counter that moved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectiveProgress {
    pub quest: EntityId,
    pub objective: EntityId,
    pub current: u32,
    pub required: u32,
}

/// Everything a single world event changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuestUpdate {
    pub progressed: Vec<ObjectiveProgress>,
    /// Indices (into the quest list) of quests completed by this event.
    pub completed: Vec<usize>,
}

/// Applies `event` to every active quest.
pub fn record_event(quests: &mut [Quest], event: WorldEvent<'_>) -> QuestUpdate {
    let mut update = QuestUpdate::default();

    for (index, quest) in quests.iter_mut().enumerate() {
        if !quest.is_active() {
            continue;
        }

        for objective in &mut quest.objectives {
            if event.matches(objective.kind, &objective.target) {
                objective.advance();
                update.progressed.push(ObjectiveProgress {
                    quest: quest.id.clone(),
                    objective: objective.id.clone(),
                    current: objective.current,
                    required: objective.required,
                });
            }
        }

        if refresh_status(quest) {
            update.completed.push(index);
        }
    }

    update
}

/// Marks an active quest completed once all its objectives are.
///
/// Returns true only on the transition; calling it again is a no-op.
pub fn refresh_status(quest: &mut Quest) -> bool {
    if quest.is_active() && quest.all_objectives_completed() {
        quest.status = QuestStatus::Completed;
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{QuestObjective, QuestRewards};

    fn quest(id: &str, status: QuestStatus, objectives: Vec<QuestObjective>) -> Quest {
        Quest {
            id: EntityId::new(id),
            title: id.to_uppercase(),
            description: String::new(),
            objectives,
            rewards: QuestRewards::default(),
            status,
            is_main_quest: false,
        }
    }

    fn kill_any(required: u32) -> QuestObjective {
        QuestObjective::new(
            "obj2",
            "Defeat enemies",
            ObjectiveKind::Kill,
            ObjectiveTarget::Any,
            required,
        )
    }

    fn collect(target: &str) -> QuestObjective {
        QuestObjective::new(
            "obj1",
            "Collect it",
            ObjectiveKind::Collect,
            ObjectiveTarget::parse(target),
            1,
        )
    }

    #[test]
    fn collection_completes_matching_quest() {
        let mut quests = vec![quest("main1", QuestStatus::Active, vec![collect("treasure1")])];

        let update = record_event(&mut quests, WorldEvent::Collected(&EntityId::new("key1")));
        assert!(update.progressed.is_empty());
        assert_eq!(quests[0].status, QuestStatus::Active);

        let update = record_event(&mut quests, WorldEvent::Collected(&EntityId::new("treasure1")));
        assert_eq!(update.completed, vec![0]);
        assert!(quests[0].objectives[0].completed);
        assert_eq!(quests[0].status, QuestStatus::Completed);
    }

    #[test]
    fn any_target_counts_every_kill() {
        let mut quests = vec![quest("side1", QuestStatus::Active, vec![kill_any(3)])];

        for enemy in ["goblin1", "orc1"] {
            let update = record_event(&mut quests, WorldEvent::Killed(&EntityId::new(enemy)));
            assert!(update.completed.is_empty());
        }
        assert_eq!(quests[0].objectives[0].current, 2);

        let update = record_event(&mut quests, WorldEvent::Killed(&EntityId::new("skeleton1")));
        assert_eq!(update.completed, vec![0]);
        assert_eq!(update.progressed[0].current, 3);
    }

    #[test]
    fn specific_kill_target_ignores_others() {
        let objective = QuestObjective::new(
            "boss",
            "Slay the dragon",
            ObjectiveKind::Kill,
            ObjectiveTarget::parse("dragon1"),
            1,
        );
        let mut quests = vec![quest("hunt", QuestStatus::Active, vec![objective])];

        record_event(&mut quests, WorldEvent::Killed(&EntityId::new("goblin1")));
        assert_eq!(quests[0].objectives[0].current, 0);

        record_event(&mut quests, WorldEvent::Killed(&EntityId::new("dragon1")));
        assert!(quests[0].is_completed());
    }

    #[test]
    fn inactive_quests_do_not_progress() {
        let mut quests = vec![quest("later", QuestStatus::Available, vec![kill_any(1)])];

        let update = record_event(&mut quests, WorldEvent::Killed(&EntityId::new("orc1")));

        assert!(update.progressed.is_empty());
        assert_eq!(quests[0].objectives[0].current, 0);
        assert_eq!(quests[0].status, QuestStatus::Available);
    }

    #[test]
    fn completion_is_latched_and_reported_once() {
        let mut quests = vec![quest("side1", QuestStatus::Active, vec![kill_any(1)])];

        let first = record_event(&mut quests, WorldEvent::Killed(&EntityId::new("a")));
        let second = record_event(&mut quests, WorldEvent::Killed(&EntityId::new("b")));

        assert_eq!(first.completed, vec![0]);
        assert!(second.completed.is_empty());
        assert!(quests[0].objectives[0].completed);
        assert!(quests[0].is_completed());
        assert!(!refresh_status(&mut quests[0]));
    }
}
