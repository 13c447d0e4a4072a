//! World loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::world::WorldSpec;

/// Loader for complete worlds from RON files.
pub struct WorldLoader;

impl WorldLoader {
    pub fn load(path: &Path) -> LoadResult<WorldSpec> {
        Self::parse(&read_file(path)?)
            .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))
    }

    /// Parses and checks a world document.
    ///
    /// Rejects worlds with entities on walls or off the map, and worlds with
    /// duplicate enemy or item ids.
    pub fn parse(content: &str) -> LoadResult<WorldSpec> {
        let world: WorldSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse world RON: {}", e))?;

        let misplaced = world.misplaced();
        anyhow::ensure!(
            misplaced.is_empty(),
            "entities placed on impassable cells: {:?}",
            misplaced
        );

        let mut ids: Vec<&str> = world
            .enemies
            .iter()
            .map(|enemy| enemy.id.as_str())
            .chain(world.items.iter().map(|world| world.item.id.as_str()))
            .collect();
        ids.sort_unstable();
        if let Some(pair) = ids.windows(2).find(|pair| pair[0] == pair[1]) {
            anyhow::bail!("duplicate entity id {}", pair[0]);
        }

        Ok(world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::default_world;

    const SMALL_WORLD: &str = r#"
        (
            dimensions: (width: 6, height: 5),
            walls: [(x: 3, y: 2)],
            player: (
                id: "player",
                name: "Tester",
                level: 1,
                health: (current: 30, maximum: 30),
                mana: (current: 5, maximum: 5),
                experience: 0,
                experience_to_next: 100,
                attack: 7,
                defense: 1,
                position: (x: 1, y: 1),
                inventory: [],
                equipment: (weapon: None, armor: None, accessory: None),
                gold: 0,
            ),
            enemies: [
                (
                    id: "rat1",
                    name: "Giant Rat",
                    health: (current: 8, maximum: 8),
                    attack: 3,
                    defense: 0,
                    position: (x: 4, y: 3),
                    experience: 5,
                    gold: 1,
                ),
            ],
            items: [
                (
                    item: (
                        id: "coin1",
                        name: "Old Coin",
                        category: treasure,
                        description: "Worn smooth",
                        value: 3,
                    ),
                    position: (x: 2, y: 3),
                ),
            ],
        )
    "#;

    #[test]
    fn parses_hand_written_world() {
        let world = WorldLoader::parse(SMALL_WORLD).unwrap();

        assert_eq!(world.player.name, "Tester");
        assert_eq!(world.enemies[0].id.as_str(), "rat1");
        assert!(world.enemies[0].loot.is_empty());
        assert!(world.enemies[0].boss.is_none());
        assert!(world.quests.is_empty());
        assert_eq!(world.walls.len(), 1);
    }

    #[test]
    fn default_world_survives_ron() {
        let source = ron::to_string(&default_world()).unwrap();
        assert_eq!(WorldLoader::parse(&source).unwrap(), default_world());
    }

    #[test]
    fn rejects_enemy_on_wall() {
        let broken = SMALL_WORLD.replace("position: (x: 4, y: 3)", "position: (x: 3, y: 2)");

        let error = WorldLoader::parse(&broken).unwrap_err();
        assert!(error.to_string().contains("rat1"));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let broken = SMALL_WORLD.replace("\"coin1\"", "\"rat1\"");

        let error = WorldLoader::parse(&broken).unwrap_err();
        assert!(error.to_string().contains("duplicate"));
    }
}
