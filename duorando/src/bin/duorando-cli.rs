use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::info;
use rand::{RngCore, SeedableRng};

use duorando::generate::{CancelToken, SeedGenerator};
use duorando::playthrough::location_importance;
use duorando::spoiler_log::SpoilerImportance;
use duorando_game::Config;

#[derive(Parser)]
struct Args {
    /// Master seed; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = 1)]
    players: usize,

    #[arg(long)]
    zelda_keysanity: bool,

    #[arg(long)]
    metroid_keysanity: bool,

    /// Classify every placement by how much it matters.
    #[arg(long)]
    importance: bool,

    /// Write the spoiler log here instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(|| {
        rand::rngs::StdRng::from_entropy().next_u64()
    });
    let config = Config {
        zelda_keysanity: args.zelda_keysanity,
        metroid_keysanity: args.metroid_keysanity,
        ..Config::default()
    };
    let generator = SeedGenerator::new(vec![config; args.players]);
    let cancel = CancelToken::new();
    let data = generator.generate(seed, &cancel)?;
    info!(
        "seed {} filled across {} worlds in {} spheres",
        data.seed,
        data.worlds.len(),
        data.playthrough.spheres.len()
    );

    let mut spoiler = data.spoiler;
    if args.importance {
        let mut entries: Vec<SpoilerImportance> = vec![];
        for world in &data.worlds {
            for location in &world.locations {
                let Some(item) = location.item else { continue };
                entries.push(SpoilerImportance {
                    world_id: world.id,
                    location: location.name.to_string(),
                    item: format!("{:?}", item.kind),
                    importance: location_importance(&data.worlds, world.id, location.id),
                });
            }
        }
        spoiler.importance = Some(entries);
    }

    let json = serde_json::to_string_pretty(&spoiler)?;
    match &args.output {
        Some(path) => std::fs::write(path, json)?,
        None => println!("{}", json),
    }
    Ok(())
}
