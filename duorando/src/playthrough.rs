//! Sphere analysis over a fully placed set of worlds.
//!
//! Spheres are computed breadth-first: each sphere is the batch of
//! locations that became available under the progression accumulated
//! from all earlier spheres. Collection crosses worlds; an item found
//! in one world advances the progression of the world that owns it.

use serde::Serialize;

use duorando_game::{Item, ItemInstance, LocationId, World, WorldId};
use duorando_logic::Progression;

use crate::fill::collect_items;
use crate::generate::{CancelToken, GenerationError};

#[derive(Clone, Debug, Serialize)]
pub struct SphereEntry {
    pub world_id: WorldId,
    pub location: &'static str,
    pub item: ItemInstance,
}

#[derive(Clone, Debug, Serialize)]
pub struct Sphere {
    pub entries: Vec<SphereEntry>,
    /// Progression per world after collecting this sphere.
    #[serde(skip)]
    pub progressions: Vec<Progression>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Playthrough {
    pub spheres: Vec<Sphere>,
}

impl Playthrough {
    /// Walks the worlds from an empty inventory and batches locations
    /// into spheres until nothing new opens up. Fails if any placed item
    /// stays out of reach or a goal location never becomes available.
    pub fn generate(worlds: &[World], cancel: &CancelToken) -> Result<Playthrough, GenerationError> {
        let mut progressions: Vec<Progression> =
            worlds.iter().map(|_| Progression::new()).collect();
        let mut remaining: Vec<(WorldId, LocationId)> = vec![];
        for world in worlds {
            for location in &world.locations {
                if location.item.is_some() {
                    remaining.push((world.id, location.id));
                }
            }
        }

        let mut spheres: Vec<Sphere> = vec![];
        loop {
            cancel.check()?;
            let mut newly: Vec<(WorldId, LocationId)> = vec![];
            remaining.retain(|&(w, loc_id)| {
                if progressions[w].location_available(&worlds[w].locations[loc_id], &worlds[w]) {
                    newly.push((w, loc_id));
                    false
                } else {
                    true
                }
            });
            if newly.is_empty() {
                break;
            }
            let mut entries: Vec<SphereEntry> = vec![];
            for (w, loc_id) in newly {
                let location = &worlds[w].locations[loc_id];
                if let Some(item) = location.item {
                    progressions[item.world_id].add(&item);
                    entries.push(SphereEntry {
                        world_id: w,
                        location: location.name,
                        item,
                    });
                }
            }
            spheres.push(Sphere {
                entries,
                progressions: progressions.clone(),
            });
        }

        if !remaining.is_empty() {
            return Err(GenerationError::UnsolvableSeed {
                unresolved: remaining.len(),
            });
        }
        for world in worlds {
            for loc_id in world.goal_location_ids() {
                if !progressions[world.id].location_available(&world.locations[loc_id], world) {
                    return Err(GenerationError::UnsolvableSeed { unresolved: 1 });
                }
            }
        }
        Ok(Playthrough { spheres })
    }
}

/// How much a placed item matters for finishing the seed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Importance {
    /// Removing the item makes the seed unbeatable, or leaves its owner
    /// world short of a master sword.
    Mandatory,
    /// A progressive sword the seed can finish without, with the owner
    /// world still reaching two sword copies.
    Sword,
    /// Progression-class item the seed does not strictly need.
    NiceToHave,
    Useless,
}

/// Classifies one location's item by re-walking the worlds with that
/// single item deleted.
pub fn location_importance(
    worlds: &[World],
    world_id: WorldId,
    location_id: LocationId,
) -> Importance {
    let Some(item) = worlds[world_id].locations[location_id].item else {
        return Importance::Useless;
    };
    if !item.kind.is_progression() && !item.kind.is_dungeon_item() {
        if item.kind.is_nice() {
            return Importance::NiceToHave;
        }
        return Importance::Useless;
    }

    let mut trimmed: Vec<World> = worlds.to_vec();
    trimmed[world_id].locations[location_id].item = None;
    let progressions = collect_items(&trimmed, &[]);
    let beatable = trimmed.iter().all(|world| {
        world.goal_location_ids().iter().all(|&loc_id| {
            progressions[world.id].location_available(&world.locations[loc_id], world)
        })
    });
    if item.kind == Item::ProgressiveSword {
        // Losing this copy must still leave the owner world a master
        // sword (two progressive copies).
        if !beatable || progressions[item.world_id].count(Item::ProgressiveSword) < 2 {
            return Importance::Mandatory;
        }
        return Importance::Sword;
    }
    if beatable {
        return Importance::NiceToHave;
    }
    Importance::Mandatory
}

#[cfg(test)]
mod tests {
    use super::*;
    use duorando_game::{Config, ItemPool};

    use crate::fill::Filler;

    fn generated(seed: u64) -> (Vec<World>, Playthrough) {
        let mut worlds = vec![World::new(Config::default(), 0)];
        let mut pools = vec![ItemPool::build(&worlds[0]).unwrap()];
        Filler::new(seed)
            .fill(&mut worlds, &mut pools, &CancelToken::new())
            .unwrap();
        let playthrough = Playthrough::generate(&worlds, &CancelToken::new()).unwrap();
        (worlds, playthrough)
    }

    #[test]
    fn playthrough_covers_every_location_exactly_once() {
        let (worlds, playthrough) = generated(21);
        let total: usize = playthrough.spheres.iter().map(|s| s.entries.len()).sum();
        assert_eq!(total, worlds[0].locations.len());
    }

    #[test]
    fn spheres_have_no_forward_dependencies() {
        let (worlds, playthrough) = generated(345);
        // Each sphere's locations must already be available under the
        // progression from strictly earlier spheres.
        let mut progressions: Vec<Progression> = vec![Progression::new()];
        for sphere in &playthrough.spheres {
            for entry in &sphere.entries {
                let location = worlds[entry.world_id]
                    .location_by_name(entry.location)
                    .unwrap();
                assert!(
                    progressions[entry.world_id]
                        .location_available(location, &worlds[entry.world_id]),
                    "{} opened before its requirements",
                    entry.location
                );
            }
            for entry in &sphere.entries {
                progressions[entry.item.world_id].add(&entry.item);
            }
        }
    }

    #[test]
    fn unreachable_placement_is_reported_unsolvable() {
        let mut worlds = vec![World::new(Config::default(), 0)];
        // A single key stranded behind its own door, with the override
        // locations untouched, leaves the walk stuck.
        let loc = worlds[0]
            .location_by_name("Hyrule Castle - Zelda's Cell")
            .unwrap()
            .id;
        worlds[0].locations[loc].item =
            Some(ItemInstance::new(duorando_game::Item::KeyHC, 1, 0));
        let err = Playthrough::generate(&worlds, &CancelToken::new()).unwrap_err();
        assert!(matches!(err, GenerationError::UnsolvableSeed { .. }));
    }

    #[test]
    fn missing_gating_item_is_a_completability_error() {
        let mut worlds = vec![World::new(Config::default(), 0)];
        let mut pools = vec![ItemPool::build(&worlds[0]).unwrap()];
        // Dropping the morph ball strands the whole Metroid side; the
        // walk must report that instead of returning a truncated route.
        pools[0]
            .progression
            .retain(|i| i.kind != duorando_game::Item::Morph);
        Filler::new(5)
            .fill(&mut worlds, &mut pools, &CancelToken::new())
            .unwrap();
        let err = Playthrough::generate(&worlds, &CancelToken::new()).unwrap_err();
        assert!(matches!(err, GenerationError::UnsolvableSeed { .. }));
    }

    #[test]
    fn removing_a_required_item_reads_as_mandatory() {
        let (worlds, playthrough) = generated(58);
        // The first progression item collected is a safe bet: nothing
        // before it can substitute for it unless another copy exists.
        let mut found = None;
        'outer: for sphere in &playthrough.spheres {
            for entry in &sphere.entries {
                if entry.item.kind == duorando_game::Item::Morph {
                    found = Some((entry.world_id, entry.location));
                    break 'outer;
                }
            }
        }
        let (world_id, name) = found.expect("morph ball placed somewhere");
        let loc_id = worlds[world_id].location_by_name(name).unwrap().id;
        assert_eq!(
            location_importance(&worlds, world_id, loc_id),
            Importance::Mandatory
        );
    }

    #[test]
    fn spare_sword_copies_classify_as_sword() {
        let (worlds, playthrough) = generated(12345);
        let mut sword_spots: Vec<(WorldId, &'static str)> = vec![];
        for sphere in &playthrough.spheres {
            for entry in &sphere.entries {
                if entry.item.kind == Item::ProgressiveSword {
                    sword_spots.push((entry.world_id, entry.location));
                }
            }
        }
        assert_eq!(sword_spots.len(), 4);
        // A sword copy is never merely nice to have.
        for &(world_id, name) in &sword_spots {
            let loc_id = worlds[world_id].location_by_name(name).unwrap().id;
            assert_ne!(
                location_importance(&worlds, world_id, loc_id),
                Importance::NiceToHave,
                "{name}"
            );
        }
        // The last copy collected is spare: three others landed first,
        // and no requirement asks for more than two.
        let (world_id, name) = *sword_spots.last().unwrap();
        let loc_id = worlds[world_id].location_by_name(name).unwrap().id;
        assert_eq!(
            location_importance(&worlds, world_id, loc_id),
            Importance::Sword
        );
    }

    #[test]
    fn junk_reads_as_useless() {
        let (worlds, _) = generated(58);
        let junk_loc = worlds[0]
            .locations
            .iter()
            .find(|loc| loc.item.map_or(false, |i| i.kind.is_junk()))
            .unwrap();
        assert_eq!(
            location_importance(&worlds, 0, junk_loc.id),
            Importance::Useless
        );
    }
}
