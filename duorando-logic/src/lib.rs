//! Progression state and access-predicate evaluation.
//!
//! A `Progression` is an accumulator of owned item copies. All derived
//! capability queries are pure functions of the current counts; they are
//! re-evaluated many times per fill/playthrough pass and must behave
//! identically given identical inputs. Dungeon rewards are not stored:
//! a reward counts as obtained exactly when the region's reward location
//! is available, so reward-count requirements are evaluated live against
//! the world.

use hashbrown::HashSet;

use duorando_game::{
    Capability, Capacity, Item, ItemInstance, Location, LogicDifficulty, Region, Requirement,
    RewardType, World, NUM_ITEMS,
};

#[derive(Clone, Debug)]
pub struct Progression {
    counts: Vec<Capacity>,
    seen: HashSet<ItemInstance>,
}

impl Default for Progression {
    fn default() -> Self {
        Progression::new()
    }
}

impl Progression {
    pub fn new() -> Self {
        Progression {
            counts: vec![0; NUM_ITEMS],
            seen: HashSet::new(),
        }
    }

    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a ItemInstance>) -> Self {
        let mut progression = Progression::new();
        for item in items {
            progression.add(item);
        }
        progression
    }

    /// Adds one item copy. Returns false (and does not change counts) if
    /// this exact copy was already added.
    pub fn add(&mut self, item: &ItemInstance) -> bool {
        if !self.seen.insert(*item) {
            return false;
        }
        self.counts[item.kind as usize] += 1;
        true
    }

    pub fn count(&self, kind: Item) -> Capacity {
        self.counts[kind as usize]
    }

    pub fn has(&self, kind: Item) -> bool {
        self.count(kind) > 0
    }

    /// A region's reward is obtained when its reward location is
    /// available, whether or not the item sitting there has been placed.
    pub fn region_completed(&self, region: &Region, world: &World) -> bool {
        match region.reward_location {
            Some(loc_id) => self.location_available(&world.locations[loc_id], world),
            None => false,
        }
    }

    /// Counts obtained rewards matching the filter, within one world.
    pub fn reward_count(&self, world: &World, matches: impl Fn(RewardType) -> bool) -> Capacity {
        world
            .regions
            .iter()
            .filter(|r| r.reward.map_or(false, &matches))
            .filter(|r| self.region_completed(r, world))
            .count() as Capacity
    }

    pub fn crystals(&self, world: &World) -> Capacity {
        self.reward_count(world, |r| {
            r == RewardType::Crystal || r == RewardType::RedCrystal
        })
    }

    pub fn red_crystals(&self, world: &World) -> Capacity {
        self.reward_count(world, |r| r == RewardType::RedCrystal)
    }

    pub fn pendants(&self, world: &World) -> Capacity {
        self.reward_count(world, |r| r == RewardType::Pendant)
    }

    pub fn boss_tokens(&self, world: &World) -> Capacity {
        self.reward_count(world, |r| r == RewardType::BossToken)
    }

    // Zelda-side capabilities:

    pub fn can_lift_light(&self) -> bool {
        self.has(Item::ProgressiveGlove)
    }

    pub fn can_lift_heavy(&self) -> bool {
        self.count(Item::ProgressiveGlove) >= 2
    }

    pub fn can_light_torches(&self) -> bool {
        self.has(Item::FireRod) || self.has(Item::Lamp)
    }

    pub fn can_melt_freezors(&self) -> bool {
        self.has(Item::FireRod) || (self.has(Item::Bombos) && self.has(Item::ProgressiveSword))
    }

    pub fn can_extend_magic(&self) -> bool {
        self.has(Item::HalfMagic) || self.has(Item::Bottle)
    }

    pub fn can_kill_many_enemies(&self) -> bool {
        self.has(Item::ProgressiveSword)
            || self.has(Item::Hammer)
            || self.has(Item::Bow)
            || self.has(Item::FireRod)
            || self.has(Item::Somaria)
            || (self.has(Item::Cape) && self.can_extend_magic())
    }

    // Metroid-side capabilities:

    pub fn can_ibj(&self) -> bool {
        self.has(Item::Morph) && self.has(Item::Bombs)
    }

    pub fn can_fly(&self) -> bool {
        self.has(Item::SpaceJump) || self.can_ibj()
    }

    pub fn can_use_power_bombs(&self) -> bool {
        self.has(Item::Morph) && self.has(Item::PowerBomb)
    }

    pub fn can_pass_bomb_passages(&self) -> bool {
        self.has(Item::Morph) && (self.has(Item::Bombs) || self.has(Item::PowerBomb))
    }

    pub fn can_destroy_bomb_walls(&self) -> bool {
        self.can_pass_bomb_passages() || self.has(Item::ScrewAttack)
    }

    pub fn can_spring_ball_jump(&self) -> bool {
        self.has(Item::Morph) && self.has(Item::SpringBall)
    }

    pub fn can_hell_run(&self, logic: LogicDifficulty) -> bool {
        let tanks_needed = match logic {
            LogicDifficulty::Normal => 5,
            LogicDifficulty::Hard => 3,
        };
        self.has(Item::Varia) || self.count(Item::ETank) >= tanks_needed
    }

    pub fn can_open_red_doors(&self) -> bool {
        self.has(Item::Missile) || self.has(Item::Super)
    }

    // Crossover portals between the two game halves:

    pub fn can_access_death_mountain_portal(&self) -> bool {
        (self.can_destroy_bomb_walls() || self.has(Item::SpeedBooster))
            && self.has(Item::Super)
            && self.has(Item::Morph)
    }

    pub fn can_access_dark_world_portal(&self) -> bool {
        self.can_use_power_bombs()
            && self.has(Item::Super)
            && self.has(Item::Gravity)
            && self.has(Item::SpeedBooster)
    }

    pub fn can_access_misery_mire_portal(&self, logic: LogicDifficulty) -> bool {
        let jump = match logic {
            LogicDifficulty::Normal => self.has(Item::SpaceJump),
            LogicDifficulty::Hard => self.has(Item::SpaceJump) || self.has(Item::HiJump),
        };
        self.has(Item::Varia) && self.has(Item::Super) && self.has(Item::Gravity) && jump
    }

    pub fn can_access_maridia_portal(&self) -> bool {
        self.has(Item::MoonPearl)
            && self.has(Item::Flippers)
            && self.can_lift_heavy()
            && self.has(Item::Gravity)
    }

    fn capability(&self, capability: Capability, world: &World) -> bool {
        let logic = world.config.logic;
        match capability {
            Capability::LiftLight => self.can_lift_light(),
            Capability::LiftHeavy => self.can_lift_heavy(),
            Capability::LightTorches => self.can_light_torches(),
            Capability::MeltFreezors => self.can_melt_freezors(),
            Capability::KillManyEnemies => self.can_kill_many_enemies(),
            Capability::ExtendMagic => self.can_extend_magic(),
            Capability::Ibj => self.can_ibj(),
            Capability::Fly => self.can_fly(),
            Capability::UsePowerBombs => self.can_use_power_bombs(),
            Capability::PassBombPassages => self.can_pass_bomb_passages(),
            Capability::DestroyBombWalls => self.can_destroy_bomb_walls(),
            Capability::SpringBallJump => self.can_spring_ball_jump(),
            Capability::HellRun => self.can_hell_run(logic),
            Capability::OpenRedDoors => self.can_open_red_doors(),
            Capability::AccessDeathMountainPortal => self.can_access_death_mountain_portal(),
            Capability::AccessDarkWorldPortal => self.can_access_dark_world_portal(),
            Capability::AccessMiseryMirePortal => self.can_access_misery_mire_portal(logic),
            Capability::AccessMaridiaPortal => self.can_access_maridia_portal(),
        }
    }

    /// Evaluates a requirement tree. Pure and monotonic: a superset
    /// Progression satisfies at least everything a subset does.
    pub fn satisfies(&self, req: &Requirement, world: &World) -> bool {
        match req {
            Requirement::Free => true,
            Requirement::Never => false,
            Requirement::Item(kind, n) => self.count(*kind) >= *n,
            Requirement::Capability(capability) => self.capability(*capability, world),
            Requirement::Keycard(kind) => {
                !world.config.metroid_keysanity || self.has(*kind)
            }
            Requirement::CanEnterRegion(name) => self.can_enter(world.region(*name), world),
            Requirement::PendantCount(n) => self.pendants(world) >= *n,
            Requirement::CrystalCount(n) => self.crystals(world) >= *n,
            Requirement::RedCrystalCount(n) => self.red_crystals(world) >= *n,
            Requirement::BossTokenCount(n) => self.boss_tokens(world) >= *n,
            Requirement::And(reqs) => reqs.iter().all(|r| self.satisfies(r, world)),
            Requirement::Or(reqs) => reqs.iter().any(|r| self.satisfies(r, world)),
        }
    }

    /// Region entry: the medallion gate (if any) applies before the entry
    /// requirement. A medallion-gated region with no assigned medallion is
    /// never enterable.
    pub fn can_enter(&self, region: &Region, world: &World) -> bool {
        if region.needs_medallion {
            match region.medallion {
                Some(medallion) => {
                    if !self.has(medallion) || !self.has(Item::ProgressiveSword) {
                        return false;
                    }
                }
                None => return false,
            }
        }
        self.satisfies(&region.requirement, world)
    }

    /// A location is available when its region is enterable and its own
    /// predicate holds. A self-unlocking override counts the held key
    /// toward the predicate, so a key placed through the override can
    /// open its own chest.
    pub fn location_available(&self, location: &Location, world: &World) -> bool {
        if !self.can_enter(&world.regions[location.region], world) {
            return false;
        }
        if let Some(over) = &location.always_allow {
            if over.unlocks_itself {
                if let Some(held) = location.item {
                    if over.rule.matches(&held, world.id) {
                        let mut with_held = self.clone();
                        with_held.add(&held);
                        return with_held.satisfies(&location.requirement, world);
                    }
                }
            }
        }
        self.satisfies(&location.requirement, world)
    }
}

/// Placement check used by the fill engine: the AlwaysAllow override
/// accepts an item independently of reachability; otherwise the Allow
/// rule and the location's availability must both hold, along with the
/// dungeon-item and keycard world/region restrictions.
pub fn can_fill(
    progression: &Progression,
    item: &ItemInstance,
    location: &Location,
    world: &World,
) -> bool {
    if location.item.is_some() {
        return false;
    }
    if let Some(over) = &location.always_allow {
        if over.rule.matches(item, world.id) && progression.satisfies(&over.requirement, world) {
            return true;
        }
    }
    if let Some(allow) = &location.allow {
        if !allow.matches(item, world.id) {
            return false;
        }
    }
    if item.kind.is_dungeon_item() {
        if item.world_id != world.id {
            return false;
        }
        if !world.config.zelda_keysanity
            && !world.regions[location.region].region_items.contains(&item.kind)
        {
            return false;
        }
    }
    if item.kind.is_keycard() && item.world_id != world.id {
        return false;
    }
    progression.location_available(location, world)
}
