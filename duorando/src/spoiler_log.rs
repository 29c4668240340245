//! Serializable summary of a generated seed: reward and medallion
//! assignments, the full placement, and the sphere-by-sphere route.

use serde::Serialize;

use duorando_game::{World, WorldId};

use crate::playthrough::{Importance, Playthrough};

#[derive(Clone, Debug, Serialize)]
pub struct SpoilerPlacement {
    pub world_id: WorldId,
    pub location: String,
    pub item: String,
    pub item_world: WorldId,
}

#[derive(Clone, Debug, Serialize)]
pub struct SpoilerRegion {
    pub world_id: WorldId,
    pub region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reward: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medallion: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SpoilerSphere {
    pub index: usize,
    pub entries: Vec<SpoilerPlacement>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SpoilerImportance {
    pub world_id: WorldId,
    pub location: String,
    pub item: String,
    pub importance: Importance,
}

#[derive(Clone, Debug, Serialize)]
pub struct SpoilerLog {
    pub regions: Vec<SpoilerRegion>,
    pub placements: Vec<SpoilerPlacement>,
    pub spheres: Vec<SpoilerSphere>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub importance: Option<Vec<SpoilerImportance>>,
}

impl SpoilerLog {
    pub fn new(worlds: &[World], playthrough: &Playthrough) -> Self {
        let mut regions: Vec<SpoilerRegion> = vec![];
        let mut placements: Vec<SpoilerPlacement> = vec![];
        for world in worlds {
            for region in &world.regions {
                if region.reward.is_none() && region.medallion.is_none() {
                    continue;
                }
                regions.push(SpoilerRegion {
                    world_id: world.id,
                    region: format!("{:?}", region.name),
                    reward: region.reward.map(|r| format!("{:?}", r)),
                    medallion: region.medallion.map(|m| format!("{:?}", m)),
                });
            }
            for location in &world.locations {
                if let Some(item) = location.item {
                    placements.push(SpoilerPlacement {
                        world_id: world.id,
                        location: location.name.to_string(),
                        item: format!("{:?}", item.kind),
                        item_world: item.world_id,
                    });
                }
            }
        }
        let spheres = playthrough
            .spheres
            .iter()
            .enumerate()
            .map(|(index, sphere)| SpoilerSphere {
                index,
                entries: sphere
                    .entries
                    .iter()
                    .map(|entry| SpoilerPlacement {
                        world_id: entry.world_id,
                        location: entry.location.to_string(),
                        item: format!("{:?}", entry.item.kind),
                        item_world: entry.item.world_id,
                    })
                    .collect(),
            })
            .collect();
        SpoilerLog {
            regions,
            placements,
            spheres,
            importance: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duorando_game::{Config, ItemPool};

    use crate::fill::Filler;
    use crate::generate::CancelToken;

    #[test]
    fn spoiler_log_serializes_with_rewards_and_spheres() {
        let mut worlds = vec![World::new(Config::default(), 0)];
        let mut pools = vec![ItemPool::build(&worlds[0]).unwrap()];
        Filler::new(3)
            .fill(&mut worlds, &mut pools, &CancelToken::new())
            .unwrap();
        let playthrough = Playthrough::generate(&worlds, &CancelToken::new()).unwrap();
        let spoiler = SpoilerLog::new(&worlds, &playthrough);

        assert_eq!(spoiler.placements.len(), worlds[0].locations.len());
        // Ten reward dungeons plus four boss regions; the medallion
        // gates are reward dungeons themselves.
        assert_eq!(spoiler.regions.len(), 14);
        let json = serde_json::to_string(&spoiler).unwrap();
        assert!(json.contains("Pendant"));
        assert!(!json.contains("importance"));
    }
}
