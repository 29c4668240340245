//! Metroid-side region and location definitions. Boss regions carry a
//! fixed boss-token reward pool; Tourian is gated on the configured
//! token count.

use crate::{
    Capability::*,
    Config, Item,
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

fn card(kind: Item) -> Requirement {
    Requirement::Keycard(kind)
}

fn and(reqs: Vec<Requirement>) -> Requirement {
    Requirement::make_and(reqs)
}

fn or(reqs: Vec<Requirement>) -> Requirement {
    Requirement::make_or(reqs)
}

pub fn region_defs(config: &Config) -> Vec<RegionDef> {
    use Item::*;
    vec![
        RegionDef::new(
            Crateria,
            Requirement::Free,
            vec![
                LocationDef::new(
                    "Crateria - Power Bomb (Crateria surface)",
                    and(vec![cap(UsePowerBombs), or(vec![item(SpeedBooster), cap(Fly)])]),
                ),
                LocationDef::new("Crateria - Missile (Crateria middle)", cap(PassBombPassages)),
                LocationDef::new(
                    "Crateria - Bomb Torizo",
                    and(vec![item(Morph), cap(OpenRedDoors)]),
                ),
                LocationDef::new("Crateria - Terminator Room", cap(DestroyBombWalls)),
                LocationDef::new(
                    "Crateria - Gauntlet",
                    and(vec![cap(DestroyBombWalls), count(ETank, 1)]),
                ),
            ],
        ),
        RegionDef::new(
            Brinstar,
            or(vec![cap(DestroyBombWalls), item(SpeedBooster)]),
            vec![
                LocationDef::new(
                    "Brinstar - Early Supers",
                    and(vec![cap(OpenRedDoors), item(Morph)]),
                ),
                LocationDef::new(
                    "Brinstar - Reserve Tank",
                    and(vec![cap(OpenRedDoors), or(vec![item(SpeedBooster), item(Morph)])]),
                ),
                LocationDef::new("Brinstar - Charge Beam", cap(PassBombPassages)),
                LocationDef::new("Brinstar - Etecoons Energy Tank", cap(UsePowerBombs)),
                LocationDef::new(
                    "Brinstar - X-Ray Scope",
                    and(vec![cap(UsePowerBombs), or(vec![item(Grapple), item(SpaceJump)])]),
                ),
                LocationDef::new(
                    "Brinstar - Kraid",
                    and(vec![cap(PassBombPassages), card(CardBrinstarBoss)]),
                )
                .reward(),
                LocationDef::new(
                    "Brinstar - Varia Suit",
                    and(vec![cap(PassBombPassages), card(CardBrinstarBoss)]),
                ),
            ],
        )
        .reward(RewardPool::MetroidBoss),
        RegionDef::new(
            WreckedShip,
            and(vec![
                cap(UsePowerBombs),
                or(vec![
                    item(SpeedBooster),
                    item(Grapple),
                    item(SpaceJump),
                    item(Gravity),
                ]),
            ]),
            vec![
                LocationDef::new("Wrecked Ship - Main Shaft", Requirement::Free),
                LocationDef::new("Wrecked Ship - Attic Assembly Line", Requirement::Free),
                LocationDef::new(
                    "Wrecked Ship - Reserve Tank",
                    and(vec![item(SpeedBooster), cap(UsePowerBombs)]),
                ),
                LocationDef::new(
                    "Wrecked Ship - Gravity Suit",
                    or(vec![item(Varia), count(ETank, 2)]),
                ),
                LocationDef::new(
                    "Wrecked Ship - Phantoon",
                    and(vec![cap(OpenRedDoors), card(CardWreckedShipBoss)]),
                )
                .reward(),
            ],
        )
        .reward(RewardPool::MetroidBoss),
        RegionDef::new(
            Norfair,
            and(vec![cap(OpenRedDoors), cap(HellRun), item(Morph)]),
            vec![
                LocationDef::new(
                    "Norfair - Ice Beam",
                    or(vec![item(SpeedBooster), cap(PassBombPassages)]),
                ),
                LocationDef::new(
                    "Norfair - Hi-Jump Boots",
                    and(vec![cap(OpenRedDoors), item(Morph)]),
                ),
                LocationDef::new("Norfair - Speed Booster", cap(OpenRedDoors)),
                LocationDef::new(
                    "Norfair - Wave Beam",
                    or(vec![item(SpaceJump), item(HiJump), cap(Ibj)]),
                ),
                LocationDef::new(
                    "Norfair - Reserve Tank",
                    and(vec![item(Morph), or(vec![cap(Fly), item(HiJump)])]),
                ),
            ],
        ),
        RegionDef::new(
            LowerNorfair,
            and(vec![
                item(Varia),
                cap(UsePowerBombs),
                or(vec![cap(Fly), and(vec![item(HiJump), item(Gravity)])]),
            ]),
            vec![
                LocationDef::new("Lower Norfair - Screw Attack", Requirement::Free),
                LocationDef::new("Lower Norfair - Mickey Mouse Room", cap(PassBombPassages)),
                LocationDef::new(
                    "Lower Norfair - Golden Torizo",
                    and(vec![item(Charge), count(ETank, 3)]),
                ),
                LocationDef::new(
                    "Lower Norfair - Ridley",
                    and(vec![
                        item(Charge),
                        item(Varia),
                        count(ETank, 3),
                        card(CardNorfairBoss),
                    ]),
                )
                .reward(),
            ],
        )
        .reward(RewardPool::MetroidBoss),
        RegionDef::new(
            Maridia,
            or(vec![
                and(vec![cap(UsePowerBombs), item(Gravity)]),
                cap(AccessMaridiaPortal),
            ]),
            vec![
                LocationDef::new(
                    "Maridia - Mama Turtle",
                    or(vec![cap(Fly), item(SpeedBooster), item(Grapple)]),
                ),
                LocationDef::new("Maridia - Watering Hole - Left", Requirement::Free),
                LocationDef::new(
                    "Maridia - Plasma Beam",
                    or(vec![item(ScrewAttack), item(SpeedBooster)]),
                ),
                LocationDef::new(
                    "Maridia - Spring Ball",
                    and(vec![item(Grapple), or(vec![item(SpaceJump), cap(SpringBallJump)])]),
                ),
                LocationDef::new(
                    "Maridia - Draygon",
                    and(vec![item(Gravity), item(SpeedBooster), card(CardMaridiaBoss)]),
                )
                .reward(),
                LocationDef::new(
                    "Maridia - Space Jump",
                    and(vec![item(Gravity), item(SpeedBooster), card(CardMaridiaBoss)]),
                ),
            ],
        )
        .reward(RewardPool::MetroidBoss),
        RegionDef::new(
            Tourian,
            Requirement::BossTokenCount(config.tourian_boss_tokens),
            vec![
                LocationDef::new(
                    "Tourian - Mother Brain",
                    and(vec![item(Charge), cap(PassBombPassages)]),
                )
                .goal()
                .event(MotherBrain),
            ],
        ),
    ]
}
