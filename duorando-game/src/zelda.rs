//! Zelda-side region and location definitions. Access predicates follow
//! the vanilla dungeon layouts, with keysanity handled by the fill
//! engine's placement rules rather than by the predicates themselves.

use crate::{
    Capability::*,
    Config, Item,
    ItemRule::{IsKind, NotKind},
    RegionName::*,
    Requirement, RewardPool,
    world::{LocationDef, RegionDef},
};

fn item(kind: Item) -> Requirement {
    Requirement::item(kind)
}

fn count(kind: Item, n: i16) -> Requirement {
    Requirement::Item(kind, n)
}

fn cap(capability: crate::Capability) -> Requirement {
    Requirement::cap(capability)
}

fn enter(region: crate::RegionName) -> Requirement {
    Requirement::CanEnterRegion(region)
}

fn and(reqs: Vec<Requirement>) -> Requirement {
    Requirement::make_and(reqs)
}

fn or(reqs: Vec<Requirement>) -> Requirement {
    Requirement::make_or(reqs)
}

// Death Mountain access, with the crossover portal from the Metroid side.
fn death_mountain() -> Requirement {
    or(vec![
        item(Item::Flute),
        and(vec![cap(LiftLight), item(Item::Lamp)]),
        cap(AccessDeathMountainPortal),
    ])
}

pub fn region_defs(config: &Config) -> Vec<RegionDef> {
    use Item::*;
    vec![
        RegionDef::new(
            LightWorld,
            Requirement::Free,
            vec![
                LocationDef::new("Master Sword Pedestal", Requirement::PendantCount(3)),
                LocationDef::new("Link's Uncle", Requirement::Free),
                LocationDef::new("Kakariko Well - Top", Requirement::Free),
                LocationDef::new("Blind's Hideout - Top", Requirement::Free),
                LocationDef::new("Bottle Merchant", Requirement::Free),
                LocationDef::new("Sahasrahla", Requirement::PendantCount(1)),
                LocationDef::new("Library", item(Boots)),
                LocationDef::new("Zora's Ledge", item(Flippers)),
                LocationDef::new("King Zora", or(vec![cap(LiftLight), item(Flippers)])),
                LocationDef::new("Race Game", Requirement::Free),
                LocationDef::new(
                    "Desert Ledge",
                    or(vec![
                        item(Book),
                        and(vec![item(Flute), cap(LiftHeavy), item(Mirror)]),
                    ]),
                ),
                LocationDef::new(
                    "Bombos Tablet",
                    and(vec![item(Book), item(Mirror), count(ProgressiveSword, 2)]),
                ),
                LocationDef::new("Old Man", and(vec![item(Lamp), death_mountain()])),
                LocationDef::new(
                    "Ether Tablet",
                    and(vec![
                        item(Book),
                        count(ProgressiveSword, 2),
                        death_mountain(),
                        or(vec![item(Mirror), and(vec![item(Hookshot), item(Hammer)])]),
                    ]),
                ),
            ],
        ),
        RegionDef::new(
            HyruleCastle,
            Requirement::Free,
            vec![
                LocationDef::new("Sanctuary", Requirement::Free),
                LocationDef::new(
                    "Sewers - Secret Room",
                    or(vec![cap(LiftLight), and(vec![item(Lamp), item(KeyHC)])]),
                ),
                LocationDef::new("Sewers - Dark Cross", item(Lamp)),
                LocationDef::new("Hyrule Castle - Map Chest", Requirement::Free),
                LocationDef::new("Hyrule Castle - Boomerang Chest", item(KeyHC)),
                LocationDef::new("Hyrule Castle - Zelda's Cell", item(KeyHC)),
            ],
        )
        .region_items(vec![KeyHC]),
        RegionDef::new(
            EasternPalace,
            Requirement::Free,
            vec![
                LocationDef::new("Eastern Palace - Cannonball Chest", Requirement::Free),
                LocationDef::new("Eastern Palace - Map Chest", Requirement::Free),
                LocationDef::new("Eastern Palace - Compass Chest", Requirement::Free),
                LocationDef::new("Eastern Palace - Big Chest", item(BigKeyEP))
                    .allow(NotKind(BigKeyEP)),
                LocationDef::new("Eastern Palace - Big Key Chest", item(Lamp)),
                LocationDef::new(
                    "Eastern Palace - Armos Knights",
                    and(vec![item(BigKeyEP), item(Bow), item(Lamp)]),
                )
                .reward(),
            ],
        )
        .reward(RewardPool::ZeldaDungeon)
        .region_items(vec![BigKeyEP]),
        RegionDef::new(
            DesertPalace,
            or(vec![
                item(Book),
                and(vec![item(Mirror), cap(LiftHeavy), item(Flute)]),
            ]),
            vec![
                LocationDef::new("Desert Palace - Map Chest", Requirement::Free),
                LocationDef::new("Desert Palace - Torch", item(Boots)),
                LocationDef::new("Desert Palace - Big Chest", item(BigKeyDP))
                    .allow(NotKind(BigKeyDP)),
                LocationDef::new("Desert Palace - Compass Chest", item(KeyDP)),
                LocationDef::new("Desert Palace - Big Key Chest", item(KeyDP)),
                LocationDef::new(
                    "Desert Palace - Lanmolas",
                    and(vec![
                        item(BigKeyDP),
                        item(KeyDP),
                        cap(LiftLight),
                        cap(LightTorches),
                        cap(KillManyEnemies),
                    ]),
                )
                .reward(),
            ],
        )
        .reward(RewardPool::ZeldaDungeon)
        .region_items(vec![KeyDP, BigKeyDP]),
        RegionDef::new(
            TowerOfHera,
            and(vec![
                death_mountain(),
                or(vec![item(Mirror), and(vec![item(Hookshot), item(Hammer)])]),
            ]),
            vec![
                LocationDef::new("Tower of Hera - Basement Cage", Requirement::Free),
                LocationDef::new("Tower of Hera - Map Chest", Requirement::Free),
                LocationDef::new(
                    "Tower of Hera - Big Key Chest",
                    and(vec![item(KeyTH), cap(LightTorches)]),
                ),
                LocationDef::new("Tower of Hera - Compass Chest", item(BigKeyTH)),
                LocationDef::new("Tower of Hera - Big Chest", item(BigKeyTH))
                    .allow(NotKind(BigKeyTH)),
                LocationDef::new(
                    "Tower of Hera - Moldorm",
                    and(vec![item(BigKeyTH), cap(KillManyEnemies)]),
                )
                .reward(),
            ],
        )
        .reward(RewardPool::ZeldaDungeon)
        .region_items(vec![KeyTH, BigKeyTH]),
        RegionDef::new(
            CastleTower,
            and(vec![
                cap(KillManyEnemies),
                or(vec![item(Cape), count(ProgressiveSword, 2)]),
            ]),
            vec![
                LocationDef::new("Castle Tower - Foyer", Requirement::Free),
                LocationDef::new(
                    "Castle Tower - Dark Maze",
                    and(vec![item(Lamp), item(KeyCT)]),
                ),
                LocationDef::new(
                    "Castle Tower - Agahnim",
                    and(vec![item(Lamp), count(KeyCT, 2), count(ProgressiveSword, 1)]),
                )
                .event(Agahnim),
            ],
        )
        .region_items(vec![KeyCT]),
        RegionDef::new(
            DarkWorld,
            or(vec![
                item(Agahnim),
                and(vec![item(MoonPearl), item(Hammer), cap(LiftLight)]),
                and(vec![item(MoonPearl), cap(LiftHeavy), item(Flippers)]),
                and(vec![item(MoonPearl), cap(AccessDarkWorldPortal)]),
            ]),
            vec![
                LocationDef::new("Pyramid", Requirement::Free),
                LocationDef::new("Hype Cave", item(MoonPearl)),
                LocationDef::new("Stumpy", item(MoonPearl)),
                LocationDef::new("Digging Game", item(MoonPearl)),
                LocationDef::new("Catfish", and(vec![item(MoonPearl), cap(LiftLight)])),
                LocationDef::new(
                    "Bumper Cave",
                    and(vec![
                        item(MoonPearl),
                        cap(LiftLight),
                        item(Cape),
                        cap(ExtendMagic),
                    ]),
                ),
                LocationDef::new("Purple Chest", cap(LiftHeavy)),
                LocationDef::new(
                    "Pyramid Fairy - Left",
                    and(vec![item(MoonPearl), Requirement::RedCrystalCount(2)]),
                ),
                LocationDef::new(
                    "Pyramid Fairy - Right",
                    and(vec![item(MoonPearl), Requirement::RedCrystalCount(2)]),
                ),
                LocationDef::new(
                    "Ganon",
                    and(vec![
                        enter(GanonsTower),
                        Requirement::CrystalCount(config.ganon_crystal_count),
                        count(ProgressiveSword, 2),
                        cap(LightTorches),
                    ]),
                )
                .goal()
                .event(Triforce),
            ],
        ),
        RegionDef::new(
            DarkWorldMire,
            or(vec![
                and(vec![item(Flute), cap(LiftHeavy)]),
                cap(AccessMiseryMirePortal),
            ]),
            vec![
                LocationDef::new("Mire Shed - Left", item(MoonPearl)),
                LocationDef::new("Mire Shed - Right", item(MoonPearl)),
            ],
        ),
        RegionDef::new(
            PalaceOfDarkness,
            and(vec![item(MoonPearl), enter(DarkWorld)]),
            vec![
                LocationDef::new("Palace of Darkness - Shooter Room", Requirement::Free),
                LocationDef::new("Palace of Darkness - The Arena - Ledge", item(Bow)),
                LocationDef::new("Palace of Darkness - Map Chest", item(Bow)),
                LocationDef::new("Palace of Darkness - Stalfos Basement", item(KeyPD)),
                LocationDef::new("Palace of Darkness - Big Key Chest", count(KeyPD, 2)),
                LocationDef::new(
                    "Palace of Darkness - Big Chest",
                    and(vec![item(BigKeyPD), item(Lamp), count(KeyPD, 2)]),
                )
                .allow(NotKind(BigKeyPD)),
                LocationDef::new(
                    "Palace of Darkness - Helmasaur King",
                    and(vec![
                        item(BigKeyPD),
                        item(Lamp),
                        item(Hammer),
                        item(Bow),
                        count(KeyPD, 3),
                    ]),
                )
                .reward(),
            ],
        )
        .reward(RewardPool::ZeldaDungeon)
        .region_items(vec![KeyPD, BigKeyPD]),
        RegionDef::new(
            SwampPalace,
            and(vec![
                item(MoonPearl),
                item(Mirror),
                item(Flippers),
                enter(DarkWorld),
            ]),
            vec![
                LocationDef::new("Swamp Palace - Entrance", Requirement::Free),
                LocationDef::new("Swamp Palace - Map Chest", item(KeySP)),
                LocationDef::new(
                    "Swamp Palace - Big Chest",
                    and(vec![item(BigKeySP), item(KeySP), item(Hammer)]),
                )
                .allow(NotKind(BigKeySP)),
                LocationDef::new(
                    "Swamp Palace - Compass Chest",
                    and(vec![item(KeySP), item(Hammer)]),
                ),
                LocationDef::new(
                    "Swamp Palace - Waterfall Room",
                    and(vec![item(KeySP), item(Hammer), item(Hookshot)]),
                ),
                LocationDef::new(
                    "Swamp Palace - Arrghus",
                    and(vec![item(KeySP), item(Hammer), item(Hookshot)]),
                )
                .reward(),
            ],
        )
        .reward(RewardPool::ZeldaDungeon)
        .region_items(vec![KeySP, BigKeySP]),
        RegionDef::new(
            SkullWoods,
            and(vec![
                item(MoonPearl),
                enter(DarkWorld),
                or(vec![item(Hookshot), and(vec![item(Hammer), cap(LiftLight)])]),
            ]),
            vec![
                LocationDef::new("Skull Woods - Compass Chest", Requirement::Free),
                LocationDef::new("Skull Woods - Map Chest", Requirement::Free),
                LocationDef::new("Skull Woods - Pot Prison", Requirement::Free),
                // A key placed here unlocks the very door that gates it; the
                // override permits that placement.
                LocationDef::new("Skull Woods - Pinball Room", item(KeySW))
                    .always_allow(IsKind(KeySW)),
                LocationDef::new("Skull Woods - Big Chest", item(BigKeySW))
                    .allow(NotKind(BigKeySW)),
                LocationDef::new(
                    "Skull Woods - Mothula",
                    and(vec![item(FireRod), count(ProgressiveSword, 1), count(KeySW, 3)]),
                )
                .reward(),
            ],
        )
        .reward(RewardPool::ZeldaDungeon)
        .region_items(vec![KeySW, BigKeySW]),
        RegionDef::new(
            ThievesTown,
            and(vec![item(MoonPearl), enter(DarkWorld)]),
            vec![
                LocationDef::new("Thieves' Town - Map Chest", Requirement::Free),
                LocationDef::new("Thieves' Town - Ambush Chest", Requirement::Free),
                LocationDef::new("Thieves' Town - Compass Chest", Requirement::Free),
                LocationDef::new(
                    "Thieves' Town - Attic",
                    and(vec![item(KeyTT), item(BigKeyTT)]),
                ),
                // The chest's own key may sit inside it; with the big key
                // and hammer the held key opens the door.
                LocationDef::new(
                    "Thieves' Town - Big Chest",
                    and(vec![item(BigKeyTT), item(KeyTT), item(Hammer)]),
                )
                .allow(NotKind(BigKeyTT))
                .always_allow_unlocking(IsKind(KeyTT), item(Hammer)),
                LocationDef::new(
                    "Thieves' Town - Blind",
                    and(vec![item(BigKeyTT), item(KeyTT), cap(KillManyEnemies)]),
                )
                .reward(),
            ],
        )
        .reward(RewardPool::ZeldaDungeon)
        .region_items(vec![KeyTT, BigKeyTT]),
        RegionDef::new(
            IcePalace,
            and(vec![
                item(MoonPearl),
                item(Flippers),
                cap(LiftHeavy),
                cap(MeltFreezors),
            ]),
            vec![
                LocationDef::new("Ice Palace - Compass Chest", Requirement::Free),
                LocationDef::new("Ice Palace - Iced T Room", Requirement::Free),
                LocationDef::new("Ice Palace - Freezor Chest", cap(MeltFreezors)),
                LocationDef::new(
                    "Ice Palace - Spike Room",
                    or(vec![item(Hookshot), item(KeyIP)]),
                ),
                LocationDef::new("Ice Palace - Big Chest", item(BigKeyIP))
                    .allow(NotKind(BigKeyIP)),
                LocationDef::new(
                    "Ice Palace - Map Chest",
                    and(vec![item(Hammer), cap(LiftLight)]),
                ),
                LocationDef::new(
                    "Ice Palace - Kholdstare",
                    and(vec![
                        item(BigKeyIP),
                        item(Hammer),
                        cap(MeltFreezors),
                        cap(LiftLight),
                        count(KeyIP, 2),
                    ]),
                )
                .reward(),
            ],
        )
        .reward(RewardPool::ZeldaDungeon)
        .region_items(vec![KeyIP, BigKeyIP]),
        RegionDef::new(
            MiseryMire,
            and(vec![
                enter(DarkWorldMire),
                item(MoonPearl),
                count(ProgressiveSword, 1),
                or(vec![item(Boots), item(Hookshot)]),
            ]),
            vec![
                LocationDef::new("Misery Mire - Bridge Chest", Requirement::Free),
                LocationDef::new("Misery Mire - Spike Chest", Requirement::Free),
                LocationDef::new("Misery Mire - Main Lobby", item(KeyMM)),
                LocationDef::new("Misery Mire - Map Chest", item(KeyMM)),
                LocationDef::new(
                    "Misery Mire - Compass Chest",
                    and(vec![cap(LightTorches), count(KeyMM, 2)]),
                ),
                LocationDef::new(
                    "Misery Mire - Big Key Chest",
                    and(vec![cap(LightTorches), count(KeyMM, 2)]),
                ),
                LocationDef::new("Misery Mire - Big Chest", item(BigKeyMM))
                    .allow(NotKind(BigKeyMM)),
                LocationDef::new(
                    "Misery Mire - Vitreous",
                    and(vec![item(BigKeyMM), item(Lamp), item(Somaria)]),
                )
                .reward(),
            ],
        )
        .reward(RewardPool::ZeldaDungeon)
        .medallion()
        .region_items(vec![KeyMM, BigKeyMM]),
        RegionDef::new(
            TurtleRock,
            and(vec![
                item(Hammer),
                cap(LiftHeavy),
                item(Somaria),
                item(MoonPearl),
            ]),
            vec![
                LocationDef::new("Turtle Rock - Compass Chest", Requirement::Free),
                LocationDef::new("Turtle Rock - Roller Room - Left", item(FireRod)),
                LocationDef::new("Turtle Rock - Chain Chomps", item(KeyTR)),
                LocationDef::new("Turtle Rock - Big Key Chest", count(KeyTR, 2)),
                LocationDef::new(
                    "Turtle Rock - Big Chest",
                    and(vec![item(BigKeyTR), count(KeyTR, 2)]),
                )
                .allow(NotKind(BigKeyTR)),
                LocationDef::new(
                    "Turtle Rock - Crystaroller Room",
                    and(vec![item(BigKeyTR), count(KeyTR, 2)]),
                ),
                LocationDef::new(
                    "Turtle Rock - Trinexx",
                    and(vec![
                        item(BigKeyTR),
                        count(KeyTR, 3),
                        item(FireRod),
                        item(IceRod),
                        item(Lamp),
                    ]),
                )
                .reward(),
            ],
        )
        .reward(RewardPool::ZeldaDungeon)
        .medallion()
        .region_items(vec![KeyTR, BigKeyTR]),
        RegionDef::new(
            GanonsTower,
            and(vec![
                Requirement::CrystalCount(config.tower_crystal_count),
                item(MoonPearl),
                cap(LiftHeavy),
                death_mountain(),
            ]),
            vec![
                LocationDef::new("Ganon's Tower - Bob's Torch", item(Boots)),
                LocationDef::new(
                    "Ganon's Tower - DMs Room",
                    and(vec![item(Hammer), item(Hookshot)]),
                ),
                LocationDef::new(
                    "Ganon's Tower - Map Chest",
                    and(vec![item(Hammer), or(vec![item(Boots), item(Hookshot)])]),
                ),
                LocationDef::new(
                    "Ganon's Tower - Firesnake Room",
                    and(vec![item(Hammer), item(Hookshot), item(KeyGT)]),
                ),
                LocationDef::new("Ganon's Tower - Tile Room", item(Somaria)),
                LocationDef::new(
                    "Ganon's Tower - Big Chest",
                    and(vec![item(BigKeyGT), count(KeyGT, 2)]),
                )
                .allow(NotKind(BigKeyGT)),
                LocationDef::new(
                    "Ganon's Tower - Moldorm Chest",
                    and(vec![item(BigKeyGT), count(KeyGT, 2), item(Hookshot)]),
                ),
            ],
        )
        .region_items(vec![KeyGT, BigKeyGT]),
    ]
}
