//! Assumed-fill item placement.
//!
//! Progression items are placed in reverse acquisition order: for each
//! item, the remaining unplaced pool is assumed to be owned, already
//! placed items reachable under that assumption are collected, and the
//! item goes to a random location accessible without it. A location
//! chosen this way can never require the item sitting on it.

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use duorando_game::{Item, ItemInstance, ItemPool, LocationId, RegionName, RewardType, World, WorldId};
use duorando_logic::{can_fill, Progression};

use crate::generate::{CancelToken, GenerationError};

/// Zelda reward tokens handed out across the ten reward dungeons.
const ZELDA_REWARDS: &[RewardType] = &[
    RewardType::Pendant,
    RewardType::Pendant,
    RewardType::Pendant,
    RewardType::Crystal,
    RewardType::Crystal,
    RewardType::Crystal,
    RewardType::Crystal,
    RewardType::Crystal,
    RewardType::RedCrystal,
    RewardType::RedCrystal,
];

const MEDALLIONS: &[Item] = &[Item::Bombos, Item::Ether, Item::Quake];

pub struct Filler {
    rng: StdRng,
}

impl Filler {
    pub fn new(seed: u64) -> Self {
        let mut rng_seed = [0u8; 32];
        rng_seed[..8].copy_from_slice(&seed.to_le_bytes());
        Filler {
            rng: StdRng::from_seed(rng_seed),
        }
    }

    /// Runs the full placement pipeline over all worlds. On success every
    /// empty location holds exactly one pool item.
    pub fn fill(
        &mut self,
        worlds: &mut [World],
        pools: &mut [ItemPool],
        cancel: &CancelToken,
    ) -> Result<(), GenerationError> {
        for world in worlds.iter_mut() {
            self.assign_medallions(world);
            self.assign_rewards(world);
        }

        // Dungeon items first, restricted to their own world. The world's
        // own progression pool is assumed so key placement is not starved
        // by missing movement items.
        for w in 0..worlds.len() {
            let mut dungeon = std::mem::take(&mut pools[w].dungeon);
            dungeon.shuffle(&mut self.rng);
            let assumed_extra = pools[w].progression.clone();
            self.assumed_fill(worlds, &mut dungeon, &assumed_extra, &[w], cancel)?;
        }

        // Seed part of Ganon's Tower with junk so the progression pass
        // does not cluster late items there.
        for w in 0..worlds.len() {
            self.tower_junk_fill(&mut worlds[w], &mut pools[w].junk);
        }

        let mut progression: Vec<ItemInstance> = pools
            .iter_mut()
            .flat_map(|pool| std::mem::take(&mut pool.progression))
            .collect();
        progression.shuffle(&mut self.rng);
        let world_ids: Vec<WorldId> = (0..worlds.len()).collect();
        self.assumed_fill(worlds, &mut progression, &[], &world_ids, cancel)?;

        let mut nice: Vec<ItemInstance> = pools
            .iter_mut()
            .flat_map(|pool| std::mem::take(&mut pool.nice))
            .collect();
        self.fast_fill(worlds, &mut nice)?;

        let mut junk: Vec<ItemInstance> = pools
            .iter_mut()
            .flat_map(|pool| std::mem::take(&mut pool.junk))
            .collect();
        self.fast_fill(worlds, &mut junk)?;

        Ok(())
    }

    /// Each medallion gate independently draws one of the three medallions.
    fn assign_medallions(&mut self, world: &mut World) {
        for region_id in world.medallion_region_ids() {
            let medallion = MEDALLIONS[self.rng.gen_range(0..MEDALLIONS.len())];
            world.regions[region_id].medallion = Some(medallion);
            debug!(
                "world {}: {:?} requires {:?}",
                world.id, world.regions[region_id].name, medallion
            );
        }
    }

    /// Shuffles the pendant/crystal tokens over the Zelda reward dungeons
    /// and marks every Metroid boss region with a boss token.
    fn assign_rewards(&mut self, world: &mut World) {
        let mut rewards: Vec<RewardType> = ZELDA_REWARDS.to_vec();
        rewards.shuffle(&mut self.rng);
        for (region_id, reward) in world.zelda_reward_region_ids().into_iter().zip(rewards) {
            world.regions[region_id].reward = Some(reward);
        }
        for region_id in world.metroid_boss_region_ids() {
            world.regions[region_id].reward = Some(RewardType::BossToken);
        }
    }

    /// Places junk into half of the still-empty Ganon's Tower slots.
    fn tower_junk_fill(&mut self, world: &mut World, junk: &mut Vec<ItemInstance>) {
        let tower = world.region(RegionName::GanonsTower).id;
        let mut slots: Vec<LocationId> = world
            .locations
            .iter()
            .filter(|loc| loc.region == tower && loc.item.is_none())
            .map(|loc| loc.id)
            .collect();
        slots.shuffle(&mut self.rng);
        slots.truncate(slots.len() / 2);
        junk.shuffle(&mut self.rng);
        for loc_id in slots {
            if let Some(item) = junk.pop() {
                world.locations[loc_id].item = Some(item);
            }
        }
    }

    /// Core assumed-fill loop. `items` has already been shuffled; items
    /// are drawn from the back. `assumed_extra` is owned on top of the
    /// not-yet-placed remainder when computing reachability.
    fn assumed_fill(
        &mut self,
        worlds: &mut [World],
        items: &mut Vec<ItemInstance>,
        assumed_extra: &[ItemInstance],
        candidate_worlds: &[WorldId],
        cancel: &CancelToken,
    ) -> Result<(), GenerationError> {
        while let Some(item) = items.pop() {
            cancel.check()?;
            let mut assumed: Vec<ItemInstance> = items.clone();
            assumed.extend_from_slice(assumed_extra);
            let progressions = collect_items(worlds, &assumed);

            let mut candidates: Vec<(WorldId, LocationId)> = vec![];
            for &w in candidate_worlds {
                let world = &worlds[w];
                for location in &world.locations {
                    if can_fill(&progressions[w], &item, location, world) {
                        candidates.push((w, location.id));
                    }
                }
            }
            if candidates.is_empty() {
                return Err(GenerationError::FillExhausted {
                    item: format!("{:?}", item.kind),
                    world: item.world_id,
                });
            }
            let (w, loc_id) = candidates[self.rng.gen_range(0..candidates.len())];
            worlds[w].locations[loc_id].item = Some(item);
            debug!(
                "world {}: {:?} (world {}) -> {}",
                w, item.kind, item.world_id, worlds[w].locations[loc_id].name
            );
        }
        Ok(())
    }

    /// Distributes items over empty locations without reachability checks.
    fn fast_fill(
        &mut self,
        worlds: &mut [World],
        items: &mut Vec<ItemInstance>,
    ) -> Result<(), GenerationError> {
        let mut slots: Vec<(WorldId, LocationId)> = vec![];
        for world in worlds.iter() {
            for loc_id in world.empty_location_ids() {
                slots.push((world.id, loc_id));
            }
        }
        slots.shuffle(&mut self.rng);
        for (w, loc_id) in slots {
            let Some(item) = items.pop() else { break };
            worlds[w].locations[loc_id].item = Some(item);
        }
        if let Some(item) = items.last() {
            return Err(GenerationError::FillExhausted {
                item: format!("{:?}", item.kind),
                world: item.world_id,
            });
        }
        Ok(())
    }
}

/// Computes the per-world progression reachable from a base inventory
/// plus every already-placed item, to a fixpoint. Availability is
/// evaluated in the world holding the location; the collected item
/// credits its owner world.
pub fn collect_items(worlds: &[World], base: &[ItemInstance]) -> Vec<Progression> {
    let mut progressions: Vec<Progression> = worlds.iter().map(|_| Progression::new()).collect();
    for item in base {
        progressions[item.world_id].add(item);
    }
    let mut remaining: Vec<(WorldId, LocationId)> = vec![];
    for world in worlds {
        for location in &world.locations {
            if location.item.is_some() {
                remaining.push((world.id, location.id));
            }
        }
    }
    loop {
        let mut progressed = false;
        remaining.retain(|&(w, loc_id)| {
            let location = &worlds[w].locations[loc_id];
            if !progressions[w].location_available(location, &worlds[w]) {
                return true;
            }
            if let Some(item) = location.item {
                progressions[item.world_id].add(&item);
            }
            progressed = true;
            false
        });
        if !progressed {
            return progressions;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duorando_game::Config;

    fn filled_worlds(seed: u64, players: usize) -> Vec<World> {
        let mut worlds: Vec<World> = (0..players)
            .map(|id| {
                let config = Config {
                    player_id: id,
                    player_count: players,
                    ..Config::default()
                };
                World::new(config, id)
            })
            .collect();
        let mut pools: Vec<ItemPool> = worlds
            .iter()
            .map(|world| ItemPool::build(world).unwrap())
            .collect();
        let mut filler = Filler::new(seed);
        filler
            .fill(&mut worlds, &mut pools, &CancelToken::new())
            .unwrap();
        worlds
    }

    #[test]
    fn fill_assigns_every_location() {
        let worlds = filled_worlds(7, 1);
        for location in &worlds[0].locations {
            assert!(location.item.is_some(), "{} left empty", location.name);
        }
    }

    #[test]
    fn fill_is_deterministic_for_a_seed() {
        let a = filled_worlds(12345, 1);
        let b = filled_worlds(12345, 1);
        for (left, right) in a[0].locations.iter().zip(&b[0].locations) {
            assert_eq!(left.item, right.item, "{} diverged", left.name);
        }
        for (left, right) in a[0].regions.iter().zip(&b[0].regions) {
            assert_eq!(left.reward, right.reward);
            assert_eq!(left.medallion, right.medallion);
        }
    }

    #[test]
    fn reward_assignment_matches_token_counts() {
        let worlds = filled_worlds(99, 1);
        let world = &worlds[0];
        let crystals = world
            .zelda_reward_region_ids()
            .iter()
            .filter(|&&id| {
                matches!(
                    world.regions[id].reward,
                    Some(RewardType::Crystal) | Some(RewardType::RedCrystal)
                )
            })
            .count();
        let reds = world
            .zelda_reward_region_ids()
            .iter()
            .filter(|&&id| world.regions[id].reward == Some(RewardType::RedCrystal))
            .count();
        assert_eq!(crystals, 7);
        assert_eq!(reds, 2);
        for &id in &world.metroid_boss_region_ids() {
            assert_eq!(world.regions[id].reward, Some(RewardType::BossToken));
        }
        for &id in &world.medallion_region_ids() {
            assert!(world.regions[id].medallion.is_some());
        }
    }

    #[test]
    fn dungeon_items_land_in_their_own_dungeon() {
        let worlds = filled_worlds(4242, 1);
        let world = &worlds[0];
        for location in &world.locations {
            let item = location.item.unwrap();
            if item.kind.is_dungeon_item() {
                assert!(
                    world.regions[location.region]
                        .region_items
                        .contains(&item.kind),
                    "{:?} escaped to {}",
                    item.kind,
                    location.name
                );
            }
        }
    }

    #[test]
    fn collect_items_reaches_a_fixpoint_with_full_base() {
        let world = World::new(Config::default(), 0);
        let pool = ItemPool::build(&world).unwrap();
        let mut base: Vec<ItemInstance> = pool.dungeon.clone();
        base.extend(pool.progression.clone());
        let worlds = vec![world];
        let progressions = collect_items(&worlds, &base);
        assert!(progressions[0].has(Item::Morph));
        // Event tokens are picked up from their pre-filled locations.
        assert!(progressions[0].has(Item::Agahnim));
    }

    #[test]
    fn multiworld_fill_places_every_pool_in_both_worlds() {
        let worlds = filled_worlds(777, 2);
        for world in &worlds {
            for location in &world.locations {
                assert!(location.item.is_some(), "{} left empty", location.name);
            }
        }
        // Dungeon items never cross worlds.
        for world in &worlds {
            for location in &world.locations {
                let item = location.item.unwrap();
                if item.kind.is_dungeon_item() {
                    assert_eq!(item.world_id, world.id);
                }
            }
        }
    }
}
