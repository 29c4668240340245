use anyhow::{Result, bail};
use hashbrown::HashMap;

use crate::{
    Config, Item, ItemInstance, LocationId, RegionId, RegionName, Requirement, RewardPool,
    RewardType, WorldId, metroid, zelda,
};

/// Item-aware override rule attached to a location. `IsKind` matches the
/// given kind owned by the location's own world; `NotKind` matches
/// everything else.
#[derive(Clone, Debug, PartialEq)]
pub enum ItemRule {
    IsKind(Item),
    NotKind(Item),
}

impl ItemRule {
    pub fn matches(&self, item: &ItemInstance, world_id: WorldId) -> bool {
        match self {
            ItemRule::IsKind(kind) => item.kind == *kind && item.world_id == world_id,
            ItemRule::NotKind(kind) => !(item.kind == *kind && item.world_id == world_id),
        }
    }
}

/// Placement override attached to a location: admits a matching item
/// regardless of reachability, subject to an extra progression gate.
/// When `unlocks_itself` is set, a held matching item also counts
/// toward the location's own requirement.
#[derive(Clone, Debug)]
pub struct OverrideRule {
    pub rule: ItemRule,
    pub requirement: Requirement,
    pub unlocks_itself: bool,
}

#[derive(Clone, Debug)]
pub struct Region {
    pub id: RegionId,
    pub name: RegionName,
    pub requirement: Requirement,
    /// Which reward shuffle pool this region draws from, if any.
    /// Resolved at construction time.
    pub reward_pool: Option<RewardPool>,
    /// Assigned by the fill engine before general item placement.
    pub reward: Option<RewardType>,
    /// Whether entry is gated on a medallion, independent of the entry
    /// requirement. The concrete medallion is randomized per seed.
    pub needs_medallion: bool,
    pub medallion: Option<Item>,
    /// Dungeon-local items: in non-keysanity these may only be placed at
    /// locations within this region.
    pub region_items: Vec<Item>,
    /// The location whose availability marks this region as completed,
    /// crediting its reward.
    pub reward_location: Option<LocationId>,
}

#[derive(Clone, Debug)]
pub struct Location {
    pub id: LocationId,
    pub name: &'static str,
    pub region: RegionId,
    pub requirement: Requirement,
    pub allow: Option<ItemRule>,
    pub always_allow: Option<OverrideRule>,
    /// Completing this location credits the region's reward.
    pub is_reward_location: bool,
    pub is_goal: bool,
    pub item: Option<ItemInstance>,
}

/// Definition of a location within a region, before ids are assigned.
pub struct LocationDef {
    pub name: &'static str,
    pub requirement: Requirement,
    pub allow: Option<ItemRule>,
    pub always_allow: Option<OverrideRule>,
    pub is_reward_location: bool,
    pub is_goal: bool,
    /// Pre-filled event token, excluded from the shuffle pool.
    pub event_item: Option<Item>,
}

impl LocationDef {
    pub fn new(name: &'static str, requirement: Requirement) -> Self {
        LocationDef {
            name,
            requirement,
            allow: None,
            always_allow: None,
            is_reward_location: false,
            is_goal: false,
            event_item: None,
        }
    }

    pub fn allow(mut self, rule: ItemRule) -> Self {
        self.allow = Some(rule);
        self
    }

    pub fn always_allow(mut self, rule: ItemRule) -> Self {
        self.always_allow = Some(OverrideRule {
            rule,
            requirement: Requirement::Free,
            unlocks_itself: false,
        });
        self
    }

    /// Override for a key that opens the very door gating its own chest:
    /// placement is gated on `requirement`, and once held the key counts
    /// toward the location's requirement.
    pub fn always_allow_unlocking(mut self, rule: ItemRule, requirement: Requirement) -> Self {
        self.always_allow = Some(OverrideRule {
            rule,
            requirement,
            unlocks_itself: true,
        });
        self
    }

    pub fn reward(mut self) -> Self {
        self.is_reward_location = true;
        self
    }

    pub fn goal(mut self) -> Self {
        self.is_goal = true;
        self
    }

    pub fn event(mut self, item: Item) -> Self {
        self.event_item = Some(item);
        self
    }
}

/// Definition of a region plus its locations, before ids are assigned.
pub struct RegionDef {
    pub name: RegionName,
    pub requirement: Requirement,
    pub reward_pool: Option<RewardPool>,
    pub needs_medallion: bool,
    pub region_items: Vec<Item>,
    pub locations: Vec<LocationDef>,
}

impl RegionDef {
    pub fn new(name: RegionName, requirement: Requirement, locations: Vec<LocationDef>) -> Self {
        RegionDef {
            name,
            requirement,
            reward_pool: None,
            needs_medallion: false,
            region_items: vec![],
            locations,
        }
    }

    pub fn reward(mut self, pool: RewardPool) -> Self {
        self.reward_pool = Some(pool);
        self
    }

    pub fn medallion(mut self) -> Self {
        self.needs_medallion = true;
        self
    }

    pub fn region_items(mut self, items: Vec<Item>) -> Self {
        self.region_items = items;
        self
    }
}

/// The full region/location graph for one player.
#[derive(Clone, Debug)]
pub struct World {
    pub id: WorldId,
    pub config: Config,
    pub regions: Vec<Region>,
    pub locations: Vec<Location>,
    region_index: HashMap<RegionName, RegionId>,
}

impl World {
    pub fn new(config: Config, id: WorldId) -> Self {
        let mut defs: Vec<RegionDef> = vec![];
        defs.extend(zelda::region_defs(&config));
        defs.extend(metroid::region_defs(&config));

        let mut regions: Vec<Region> = vec![];
        let mut locations: Vec<Location> = vec![];
        let mut region_index: HashMap<RegionName, RegionId> = HashMap::new();
        for def in defs {
            let region_id = regions.len();
            region_index.insert(def.name, region_id);
            let mut reward_location: Option<LocationId> = None;
            for loc in def.locations {
                let location_id = locations.len();
                if loc.is_reward_location {
                    reward_location = Some(location_id);
                }
                locations.push(Location {
                    id: location_id,
                    name: loc.name,
                    region: region_id,
                    requirement: loc.requirement,
                    allow: loc.allow,
                    always_allow: loc.always_allow,
                    is_reward_location: loc.is_reward_location,
                    is_goal: loc.is_goal,
                    item: loc
                        .event_item
                        .map(|kind| ItemInstance::new(kind, 1, id)),
                });
            }
            regions.push(Region {
                id: region_id,
                name: def.name,
                requirement: def.requirement,
                reward_pool: def.reward_pool,
                reward: None,
                needs_medallion: def.needs_medallion,
                medallion: None,
                region_items: def.region_items,
                reward_location,
            });
        }
        World {
            id,
            config,
            regions,
            locations,
            region_index,
        }
    }

    pub fn region(&self, name: RegionName) -> &Region {
        &self.regions[self.region_index[&name]]
    }

    pub fn region_mut(&mut self, name: RegionName) -> &mut Region {
        let idx = self.region_index[&name];
        &mut self.regions[idx]
    }

    pub fn location_by_name(&self, name: &str) -> Option<&Location> {
        self.locations.iter().find(|loc| loc.name == name)
    }

    /// Locations whose item slot is still unassigned.
    pub fn empty_location_ids(&self) -> Vec<LocationId> {
        self.locations
            .iter()
            .filter(|loc| loc.item.is_none())
            .map(|loc| loc.id)
            .collect()
    }

    /// Goal locations for the configured goal condition.
    pub fn goal_location_ids(&self) -> Vec<LocationId> {
        self.locations
            .iter()
            .filter(|loc| loc.is_goal)
            .filter(|loc| {
                let zelda_goal = loc.item.map(|i| i.kind) == Some(Item::Triforce);
                match self.config.goal {
                    crate::Goal::DefeatBoth => true,
                    crate::Goal::DefeatGanon => zelda_goal,
                    crate::Goal::DefeatMotherBrain => !zelda_goal,
                }
            })
            .map(|loc| loc.id)
            .collect()
    }

    /// Regions participating in the Zelda reward shuffle.
    pub fn zelda_reward_region_ids(&self) -> Vec<RegionId> {
        self.regions
            .iter()
            .filter(|r| r.reward_pool == Some(RewardPool::ZeldaDungeon))
            .map(|r| r.id)
            .collect()
    }

    pub fn metroid_boss_region_ids(&self) -> Vec<RegionId> {
        self.regions
            .iter()
            .filter(|r| r.reward_pool == Some(RewardPool::MetroidBoss))
            .map(|r| r.id)
            .collect()
    }

    pub fn medallion_region_ids(&self) -> Vec<RegionId> {
        self.regions
            .iter()
            .filter(|r| r.needs_medallion)
            .map(|r| r.id)
            .collect()
    }
}

/// The canonical unplaced item pool for one world, split by placement
/// tier. Dungeon items are placed first (restricted in non-keysanity),
/// then progression, then nice, then junk.
#[derive(Clone, Debug)]
pub struct ItemPool {
    pub dungeon: Vec<ItemInstance>,
    pub progression: Vec<ItemInstance>,
    pub nice: Vec<ItemInstance>,
    pub junk: Vec<ItemInstance>,
}

impl ItemPool {
    pub fn build(world: &World) -> Result<ItemPool> {
        let id = world.id;
        let mut dungeon: Vec<ItemInstance> = vec![];
        for (kind, count) in DUNGEON_POOL {
            for ordinal in 1..=*count {
                dungeon.push(ItemInstance::new(*kind, ordinal, id));
            }
        }

        let mut progression: Vec<ItemInstance> = vec![];
        for (kind, count) in PROGRESSION_POOL {
            for ordinal in 1..=*count {
                progression.push(ItemInstance::new(*kind, ordinal, id));
            }
        }
        if world.config.metroid_keysanity {
            for kind in [
                Item::CardBrinstarBoss,
                Item::CardWreckedShipBoss,
                Item::CardNorfairBoss,
                Item::CardMaridiaBoss,
            ] {
                progression.push(ItemInstance::new(kind, 1, id));
            }
        }

        let mut nice: Vec<ItemInstance> = vec![];
        for (kind, count) in NICE_POOL {
            for ordinal in 1..=*count {
                nice.push(ItemInstance::new(*kind, ordinal, id));
            }
        }

        let empty = world.empty_location_ids().len();
        let fixed = dungeon.len() + progression.len() + nice.len();
        if fixed > empty {
            bail!(
                "item pool overflow: {} fixed items for {} empty locations",
                fixed,
                empty
            );
        }
        let mut junk: Vec<ItemInstance> = vec![];
        let mut junk_counts: HashMap<Item, u16> = HashMap::new();
        for i in 0..(empty - fixed) {
            let kind = JUNK_CYCLE[i % JUNK_CYCLE.len()];
            let ordinal = junk_counts.entry(kind).or_insert(0);
            *ordinal += 1;
            junk.push(ItemInstance::new(kind, *ordinal, id));
        }

        Ok(ItemPool {
            dungeon,
            progression,
            nice,
            junk,
        })
    }

    pub fn total_len(&self) -> usize {
        self.dungeon.len() + self.progression.len() + self.nice.len() + self.junk.len()
    }
}

const DUNGEON_POOL: &[(Item, u16)] = &[
    (Item::KeyHC, 1),
    (Item::KeyCT, 2),
    (Item::KeyDP, 1),
    (Item::KeyTH, 1),
    (Item::KeyPD, 3),
    (Item::KeySP, 1),
    (Item::KeySW, 3),
    (Item::KeyTT, 1),
    (Item::KeyIP, 2),
    (Item::KeyMM, 3),
    (Item::KeyTR, 3),
    (Item::KeyGT, 2),
    (Item::BigKeyEP, 1),
    (Item::BigKeyDP, 1),
    (Item::BigKeyTH, 1),
    (Item::BigKeyPD, 1),
    (Item::BigKeySP, 1),
    (Item::BigKeySW, 1),
    (Item::BigKeyTT, 1),
    (Item::BigKeyIP, 1),
    (Item::BigKeyMM, 1),
    (Item::BigKeyTR, 1),
    (Item::BigKeyGT, 1),
];

const PROGRESSION_POOL: &[(Item, u16)] = &[
    (Item::ProgressiveSword, 4),
    (Item::ProgressiveGlove, 2),
    (Item::Bow, 1),
    (Item::Hookshot, 1),
    (Item::Hammer, 1),
    (Item::FireRod, 1),
    (Item::IceRod, 1),
    (Item::Lamp, 1),
    (Item::Bombos, 1),
    (Item::Ether, 1),
    (Item::Quake, 1),
    (Item::MoonPearl, 1),
    (Item::Flippers, 1),
    (Item::Boots, 1),
    (Item::Mirror, 1),
    (Item::Flute, 1),
    (Item::Book, 1),
    (Item::Cape, 1),
    (Item::Somaria, 1),
    (Item::Morph, 1),
    (Item::Bombs, 1),
    (Item::Charge, 1),
    (Item::Ice, 1),
    (Item::Wave, 1),
    (Item::Plasma, 1),
    (Item::Varia, 1),
    (Item::Gravity, 1),
    (Item::SpeedBooster, 1),
    (Item::HiJump, 1),
    (Item::SpaceJump, 1),
    (Item::ScrewAttack, 1),
    (Item::Grapple, 1),
    (Item::SpringBall, 1),
    (Item::Missile, 3),
    (Item::Super, 2),
    (Item::PowerBomb, 2),
    (Item::ETank, 5),
];

const NICE_POOL: &[(Item, u16)] = &[
    (Item::Spazer, 1),
    (Item::XRay, 1),
    (Item::HalfMagic, 1),
    (Item::Bottle, 1),
    (Item::SilverArrows, 1),
    (Item::BlueMail, 1),
    (Item::RedMail, 1),
    (Item::HeartContainer, 2),
    (Item::ReserveTank, 2),
];

const JUNK_CYCLE: &[Item] = &[
    Item::HeartPiece,
    Item::TwentyRupees,
    Item::TenArrows,
    Item::FiftyRupees,
    Item::ThreeBombs,
    Item::OneHundredRupees,
    Item::ThreeHundredRupees,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Goal;

    #[test]
    fn world_builds_with_consistent_ids() {
        let world = World::new(Config::default(), 0);
        for (i, region) in world.regions.iter().enumerate() {
            assert_eq!(region.id, i);
        }
        for (i, loc) in world.locations.iter().enumerate() {
            assert_eq!(loc.id, i);
            assert!(loc.region < world.regions.len());
        }
    }

    #[test]
    fn pool_exactly_matches_empty_locations() {
        let world = World::new(Config::default(), 0);
        let pool = ItemPool::build(&world).unwrap();
        assert_eq!(pool.total_len(), world.empty_location_ids().len());
    }

    #[test]
    fn event_locations_are_prefilled() {
        let world = World::new(Config::default(), 0);
        let goal_ids = world.goal_location_ids();
        assert_eq!(goal_ids.len(), 2);
        for id in goal_ids {
            assert!(world.locations[id].item.is_some());
        }
        let agahnim = world.location_by_name("Castle Tower - Agahnim").unwrap();
        assert_eq!(agahnim.item.map(|i| i.kind), Some(Item::Agahnim));
    }

    #[test]
    fn goal_selection_respects_config() {
        let config = Config {
            goal: Goal::DefeatGanon,
            ..Config::default()
        };
        let world = World::new(config, 0);
        let goal_ids = world.goal_location_ids();
        assert_eq!(goal_ids.len(), 1);
        assert_eq!(
            world.locations[goal_ids[0]].item.map(|i| i.kind),
            Some(Item::Triforce)
        );
    }

    #[test]
    fn reward_and_medallion_capable_regions_match_configured_counts() {
        let world = World::new(Config::default(), 0);
        assert_eq!(world.zelda_reward_region_ids().len(), 10);
        assert_eq!(world.metroid_boss_region_ids().len(), 4);
        assert_eq!(world.medallion_region_ids().len(), 2);
    }
}
