// The changes suggested by this lint usually make the code more cluttered and less clear:
#![allow(clippy::needless_range_loop)]

pub mod metroid;
pub mod world;
pub mod zelda;

use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};
use strum::EnumCount;
use strum_macros::{EnumCount as EnumCountMacro, EnumString, VariantNames};

pub use world::{ItemPool, ItemRule, Location, OverrideRule, Region, World};

pub type WorldId = usize; // Index of a player's world (0-based; 0 in single-player)
pub type RegionId = usize; // Index into World.regions
pub type LocationId = usize; // Index into World.locations
pub type Capacity = i16; // Data type used to represent item counts and thresholds

pub const NUM_ITEMS: usize = Item::COUNT;

/// Item kinds across both game halves, including per-dungeon keys,
/// keysanity keycards, and the event tokens granted by boss fights.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    EnumString,
    VariantNames,
    EnumCountMacro,
    TryFromPrimitive,
    Serialize,
    Deserialize,
    PartialOrd,
    Ord,
)]
#[repr(usize)]
pub enum Item {
    // Zelda-side progression:
    ProgressiveSword,
    ProgressiveGlove,
    Bow,
    Hookshot,
    Hammer,
    FireRod,
    IceRod,
    Lamp,
    Bombos,
    Ether,
    Quake,
    MoonPearl,
    Flippers,
    Boots,
    Mirror,
    Flute,
    Book,
    Cape,
    Somaria,
    // Metroid-side progression:
    Morph,
    Bombs,
    Charge,
    Ice,
    Wave,
    Plasma,
    Varia,
    Gravity,
    SpeedBooster,
    HiJump,
    SpaceJump,
    ScrewAttack,
    Grapple,
    SpringBall,
    Missile,
    Super,
    PowerBomb,
    ETank,
    ReserveTank,
    // Dungeon small keys:
    KeyHC,
    KeyCT,
    KeyDP,
    KeyTH,
    KeyPD,
    KeySP,
    KeySW,
    KeyTT,
    KeyIP,
    KeyMM,
    KeyTR,
    KeyGT,
    // Dungeon big keys:
    BigKeyEP,
    BigKeyDP,
    BigKeyTH,
    BigKeyPD,
    BigKeySP,
    BigKeySW,
    BigKeyTT,
    BigKeyIP,
    BigKeyMM,
    BigKeyTR,
    BigKeyGT,
    // Metroid keysanity boss keycards:
    CardBrinstarBoss,
    CardWreckedShipBoss,
    CardNorfairBoss,
    CardMaridiaBoss,
    // Nice-to-have:
    Spazer,
    XRay,
    HalfMagic,
    Bottle,
    SilverArrows,
    BlueMail,
    RedMail,
    HeartContainer,
    // Junk and scam filler:
    HeartPiece,
    ThreeBombs,
    TenArrows,
    TwentyRupees,
    FiftyRupees,
    OneHundredRupees,
    ThreeHundredRupees,
    // Event tokens (never in the shuffle pool):
    Agahnim,
    Triforce,
    MotherBrain,
}

impl Item {
    pub fn is_key(self) -> bool {
        use Item::*;
        matches!(
            self,
            KeyHC | KeyCT | KeyDP | KeyTH | KeyPD | KeySP | KeySW | KeyTT | KeyIP | KeyMM | KeyTR
                | KeyGT
        )
    }

    pub fn is_big_key(self) -> bool {
        use Item::*;
        matches!(
            self,
            BigKeyEP
                | BigKeyDP
                | BigKeyTH
                | BigKeyPD
                | BigKeySP
                | BigKeySW
                | BigKeyTT
                | BigKeyIP
                | BigKeyMM
                | BigKeyTR
                | BigKeyGT
        )
    }

    pub fn is_keycard(self) -> bool {
        use Item::*;
        matches!(
            self,
            CardBrinstarBoss | CardWreckedShipBoss | CardNorfairBoss | CardMaridiaBoss
        )
    }

    /// Dungeon-local items: subject to own-dungeon placement unless keysanity.
    pub fn is_dungeon_item(self) -> bool {
        self.is_key() || self.is_big_key()
    }

    pub fn is_event(self) -> bool {
        matches!(self, Item::Agahnim | Item::Triforce | Item::MotherBrain)
    }

    /// Items capable of gating access to other locations.
    pub fn is_progression(self) -> bool {
        use Item::*;
        if self.is_dungeon_item() || self.is_keycard() {
            return true;
        }
        matches!(
            self,
            ProgressiveSword
                | ProgressiveGlove
                | Bow
                | Hookshot
                | Hammer
                | FireRod
                | IceRod
                | Lamp
                | Bombos
                | Ether
                | Quake
                | MoonPearl
                | Flippers
                | Boots
                | Mirror
                | Flute
                | Book
                | Cape
                | Somaria
                | Morph
                | Bombs
                | Charge
                | Ice
                | Wave
                | Plasma
                | Varia
                | Gravity
                | SpeedBooster
                | HiJump
                | SpaceJump
                | ScrewAttack
                | Grapple
                | SpringBall
                | Missile
                | Super
                | PowerBomb
                | ETank
        )
    }

    pub fn is_nice(self) -> bool {
        use Item::*;
        matches!(
            self,
            Spazer | XRay | HalfMagic | Bottle | SilverArrows | BlueMail | RedMail | HeartContainer
                | ReserveTank
        )
    }

    pub fn is_scam(self) -> bool {
        use Item::*;
        matches!(self, TenArrows | TwentyRupees | ThreeBombs)
    }

    pub fn is_junk(self) -> bool {
        use Item::*;
        matches!(
            self,
            HeartPiece
                | ThreeBombs
                | TenArrows
                | TwentyRupees
                | FiftyRupees
                | OneHundredRupees
                | ThreeHundredRupees
        )
    }
}

/// One concrete copy of an item, as placed by the fill engine. The
/// `(world_id, kind, ordinal)` triple is the copy's identity: collecting
/// the same copy twice must not double-count.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemInstance {
    pub kind: Item,
    pub ordinal: u16,
    pub world_id: WorldId,
}

impl ItemInstance {
    pub fn new(kind: Item, ordinal: u16, world_id: WorldId) -> Self {
        ItemInstance {
            kind,
            ordinal,
            world_id,
        }
    }
}

/// Names for the fixed set of regions. Referenced by requirements
/// (`CanEnterRegion`), so they are stable identifiers rather than
/// construction-order indices.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, EnumString, VariantNames, Serialize, Deserialize,
)]
pub enum RegionName {
    // Zelda side:
    LightWorld,
    HyruleCastle,
    EasternPalace,
    DesertPalace,
    TowerOfHera,
    CastleTower,
    DarkWorld,
    DarkWorldMire,
    PalaceOfDarkness,
    SwampPalace,
    SkullWoods,
    ThievesTown,
    IcePalace,
    MiseryMire,
    TurtleRock,
    GanonsTower,
    // Metroid side:
    Crateria,
    Brinstar,
    WreckedShip,
    Norfair,
    LowerNorfair,
    Maridia,
    Tourian,
}

/// Dungeon completion tokens, shuffled across reward-capable regions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RewardType {
    Pendant,
    Crystal,
    RedCrystal,
    BossToken,
}

/// Which shuffle pool a reward-capable region draws from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RewardPool {
    ZeldaDungeon,
    MetroidBoss,
}

/// Derived capability queries, evaluated against a Progression snapshot.
/// Resolved at construction time into requirement trees; the semantics
/// live in the logic crate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Capability {
    LiftLight,
    LiftHeavy,
    LightTorches,
    MeltFreezors,
    KillManyEnemies,
    ExtendMagic,
    Ibj,
    Fly,
    UsePowerBombs,
    PassBombPassages,
    DestroyBombWalls,
    SpringBallJump,
    HellRun,
    OpenRedDoors,
    AccessDeathMountainPortal,
    AccessDarkWorldPortal,
    AccessMiseryMirePortal,
    AccessMaridiaPortal,
}

/// Boolean access predicate tree. Evaluation must be pure and monotonic:
/// no variant may require the absence of an item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Requirement {
    Free,
    Never,
    Item(Item, Capacity),
    Capability(Capability),
    /// Required only when Metroid keysanity is enabled.
    Keycard(Item),
    CanEnterRegion(RegionName),
    PendantCount(Capacity),
    CrystalCount(Capacity),
    RedCrystalCount(Capacity),
    BossTokenCount(Capacity),
    And(Vec<Requirement>),
    Or(Vec<Requirement>),
}

impl Requirement {
    pub fn make_and(reqs: Vec<Requirement>) -> Requirement {
        let mut out_reqs: Vec<Requirement> = vec![];
        for req in reqs {
            if let Requirement::Never = req {
                return Requirement::Never;
            } else if let Requirement::Free = req {
                continue;
            } else if let Requirement::And(and_reqs) = req {
                out_reqs.extend(and_reqs);
            } else {
                out_reqs.push(req);
            }
        }
        if out_reqs.is_empty() {
            Requirement::Free
        } else if out_reqs.len() == 1 {
            out_reqs.into_iter().next().unwrap()
        } else {
            Requirement::And(out_reqs)
        }
    }

    pub fn make_or(reqs: Vec<Requirement>) -> Requirement {
        let mut out_reqs: Vec<Requirement> = vec![];
        for req in reqs {
            if let Requirement::Never = req {
                continue;
            } else if let Requirement::Free = req {
                return Requirement::Free;
            } else if let Requirement::Or(or_reqs) = req {
                out_reqs.extend(or_reqs);
            } else {
                out_reqs.push(req);
            }
        }
        if out_reqs.is_empty() {
            Requirement::Never
        } else if out_reqs.len() == 1 {
            out_reqs.into_iter().next().unwrap()
        } else {
            Requirement::Or(out_reqs)
        }
    }

    pub fn item(item: Item) -> Requirement {
        Requirement::Item(item, 1)
    }

    pub fn cap(capability: Capability) -> Requirement {
        Requirement::Capability(capability)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    Normal,
    Multiworld,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicDifficulty {
    Normal,
    Hard,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Goal {
    DefeatBoth,
    DefeatGanon,
    DefeatMotherBrain,
}

/// Per-player generation settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub game_mode: GameMode,
    pub logic: LogicDifficulty,
    pub goal: Goal,
    pub zelda_keysanity: bool,
    pub metroid_keysanity: bool,
    /// Crystals required to enter Ganon's Tower.
    pub tower_crystal_count: Capacity,
    /// Crystals required to defeat Ganon.
    pub ganon_crystal_count: Capacity,
    /// Boss tokens required to enter Tourian.
    pub tourian_boss_tokens: Capacity,
    pub player_id: WorldId,
    pub player_count: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            game_mode: GameMode::Normal,
            logic: LogicDifficulty::Normal,
            goal: Goal::DefeatBoth,
            zelda_keysanity: false,
            metroid_keysanity: false,
            tower_crystal_count: 7,
            ganon_crystal_count: 7,
            tourian_boss_tokens: 4,
            player_id: 0,
            player_count: 1,
        }
    }
}

impl Config {
    pub fn keysanity(&self) -> bool {
        self.zelda_keysanity || self.metroid_keysanity
    }

    /// Checks for contradictory settings. Runs before fill ever starts;
    /// failures here are user-correctable and never retried.
    pub fn validate(&self) -> Result<(), String> {
        if self.player_count == 0 {
            return Err("player count must be at least 1".to_string());
        }
        if self.player_id >= self.player_count {
            return Err(format!(
                "player id {} out of range for {} player(s)",
                self.player_id, self.player_count
            ));
        }
        match self.game_mode {
            GameMode::Normal if self.player_count != 1 => {
                return Err("normal mode requires exactly 1 player".to_string());
            }
            GameMode::Multiworld if self.player_count < 2 => {
                return Err("multiworld mode requires at least 2 players".to_string());
            }
            _ => {}
        }
        if !(0..=7).contains(&self.tower_crystal_count) {
            return Err(format!(
                "tower crystal count {} out of range 0-7",
                self.tower_crystal_count
            ));
        }
        if !(0..=7).contains(&self.ganon_crystal_count) {
            return Err(format!(
                "ganon crystal count {} out of range 0-7",
                self.ganon_crystal_count
            ));
        }
        if !(0..=4).contains(&self.tourian_boss_tokens) {
            return Err(format!(
                "tourian boss token count {} out of range 0-4",
                self.tourian_boss_tokens
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_classification_is_disjoint_for_pool_items() {
        for i in 0..NUM_ITEMS {
            let item = Item::try_from(i).unwrap();
            if item.is_event() {
                continue;
            }
            let classes = [item.is_progression(), item.is_nice(), item.is_junk()];
            assert_eq!(
                classes.iter().filter(|&&x| x).count(),
                1,
                "{item:?} must belong to exactly one placement tier"
            );
        }
    }

    #[test]
    fn make_and_collapses_free_and_never() {
        assert_eq!(
            Requirement::make_and(vec![Requirement::Free, Requirement::item(Item::Lamp)]),
            Requirement::item(Item::Lamp)
        );
        assert_eq!(
            Requirement::make_and(vec![Requirement::Never, Requirement::item(Item::Lamp)]),
            Requirement::Never
        );
        assert_eq!(
            Requirement::make_or(vec![Requirement::Free, Requirement::item(Item::Lamp)]),
            Requirement::Free
        );
    }

    #[test]
    fn default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn config_rejects_contradictory_player_settings() {
        let config = Config {
            game_mode: GameMode::Multiworld,
            player_count: 1,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            player_id: 3,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
