//! Boxslide - headless runner
//!
//! Loads a level, walks a body through it for a fixed number of ticks and
//! logs where it ends up.

use anyhow::{Context, Result};
use boxslide_game::{Level, MoveInput, Simulation, SimulationConfig};
use clap::Parser;
use glam::Vec2;
use log::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Level JSON file (defaults to the built-in test room)
    #[arg(short, long)]
    level: Option<std::path::PathBuf>,

    /// Number of fixed ticks to simulate
    #[arg(short, long, default_value_t = 250)]
    ticks: u32,

    /// Hold the run key
    #[arg(short, long)]
    run: bool,

    /// Input direction as `x,y`. Each axis maps to a direction key, so only
    /// its sign counts and diagonals are normalized (`1,0.2` moves like `1,1`)
    #[arg(short, long, default_value = "1,0", value_parser = parse_direction)]
    dir: Vec2,

    /// Log the body position every N ticks (0 = only at the end)
    #[arg(long, default_value_t = 50)]
    report_every: u32,
}

fn parse_direction(s: &str) -> Result<Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{s}`"))?;
    let x: f32 = x.trim().parse().map_err(|e| format!("bad x: {e}"))?;
    let y: f32 = y.trim().parse().map_err(|e| format!("bad y: {e}"))?;
    Ok(Vec2::new(x, y))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let env = env_logger::Env::default().default_filter_or("boxslide=info");
    env_logger::Builder::from_env(env).init();

    let level = match &args.level {
        Some(path) => {
            Level::load(path).with_context(|| format!("loading level {}", path.display()))?
        }
        None => Level::test_room(),
    };
    info!(
        "level '{}' ({} colliders)",
        level.id,
        level.collision.collider_count()
    );

    let mut simulation = Simulation::new(SimulationConfig::default(), level)
        .context("invalid movement configuration")?;
    let body_id = simulation.add_body();

    let input = {
        let input = MoveInput::toward(args.dir);
        if args.run {
            input.running()
        } else {
            input
        }
    };
    if !input.has_movement() {
        warn!("direction {:?} maps to no movement", args.dir);
    }

    for tick in 1..=args.ticks {
        simulation.step(&[input]);

        if args.report_every > 0 && tick % args.report_every == 0 {
            if let Some(body) = simulation.get_body(body_id) {
                info!(
                    "tick {tick}: position={:?} in_zone={}",
                    body.position(),
                    body.state.in_zone()
                );
            }
        }
    }

    let body = simulation
        .get_body(body_id)
        .context("body disappeared from the simulation")?;
    info!(
        "finished {} ticks at {:?} (total stats: {:?})",
        simulation.frame,
        body.position(),
        body.total_stats
    );

    Ok(())
}
