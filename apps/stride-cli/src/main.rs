use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use glam::{Vec2, Vec3};
use stride_actor::{ActorBuilder, ActorConfig, ActorCoordinator};
use stride_anim::SimulatedAnimator;
use stride_common::RigidBody;
use stride_input::{DeviceFrame, ScriptedSource};
use stride_kernel::{Ground, GroundPatch, SandboxWorld, SimBody};
use stride_locomotion::LocomotionEvent;
use tracing_subscriber::EnvFilter;

type SandboxActor = ActorCoordinator<SimBody, Arc<Ground>, SimulatedAnimator, ScriptedSource>;

/// Presentation frame length used by the scenario runner.
const FRAME_DT: f32 = 1.0 / 60.0;

/// Longest scenario the runner will script (one hour).
const MAX_SECONDS: f32 = 3600.0;

#[derive(Parser)]
#[command(name = "stride-cli", about = "CLI tool for stride locomotion scenarios")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Simulate one actor through a scripted scenario
    Run {
        /// Actor config (.json, .yaml or .yml); defaults if omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long, value_enum, default_value_t = Scenario::Walk)]
        scenario: Scenario,
        /// Simulated seconds
        #[arg(long, default_value = "3")]
        seconds: f32,
    },
    /// Validate an actor config file and print the resolved values
    CheckConfig { file: PathBuf },
    /// Run a scenario twice and compare final state hashes
    Replay {
        #[arg(short, long, value_enum, default_value_t = Scenario::Jump)]
        scenario: Scenario,
        #[arg(long, default_value = "3")]
        seconds: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Scenario {
    /// Run forward on flat ground
    Walk,
    /// Stand still and jump once
    Jump,
    /// Run forward off a raised platform
    Ledge,
    /// Sprint forward while turning the camera
    Sprint,
}

impl Scenario {
    fn world(self) -> SandboxWorld {
        match self {
            Scenario::Ledge => {
                let mut ground = Ground::flat(0.0, 100.0);
                ground.add_patch(GroundPatch::new(Vec2::new(-5.0, -2.0), Vec2::new(5.0, 5.0), 2.0));
                SandboxWorld::new(ground)
            }
            _ => SandboxWorld::flat(100.0),
        }
    }

    fn spawn_point(self) -> Vec3 {
        match self {
            Scenario::Ledge => Vec3::new(0.0, 2.0, 0.0),
            _ => Vec3::ZERO,
        }
    }

    fn script(self, frames: usize) -> ScriptedSource {
        let forward = DeviceFrame {
            movement: Vec2::new(0.0, 1.0),
            ..Default::default()
        };
        match self {
            Scenario::Walk | Scenario::Ledge => ScriptedSource::new().hold(forward, frames),
            Scenario::Jump => {
                let press = DeviceFrame {
                    jump_held: true,
                    ..Default::default()
                };
                ScriptedSource::new()
                    .hold(DeviceFrame::default(), 10)
                    .hold(press, 1)
                    .hold(DeviceFrame::default(), frames.saturating_sub(11))
            }
            Scenario::Sprint => {
                let sprint = DeviceFrame {
                    sprint: true,
                    look: Vec2::new(0.5, 0.0),
                    ..forward
                };
                ScriptedSource::new().hold(sprint, frames)
            }
        }
    }
}

struct RunSummary {
    frames: usize,
    fixed_steps: u32,
    events: Vec<LocomotionEvent>,
    position: Vec3,
    hash: u64,
    grounded: bool,
}

fn spawn(config: ActorConfig, scenario: Scenario, world: &SandboxWorld, frames: usize) -> anyhow::Result<SandboxActor> {
    let actor = ActorBuilder::new()
        .config(config)
        .rigid_body(SimBody::new(scenario.spawn_point()))
        .ground_probe(world.ground())
        .animation_sink(SimulatedAnimator::new())
        .input_source(scenario.script(frames))
        .build()?;
    Ok(actor)
}

fn simulate(config: ActorConfig, scenario: Scenario, seconds: f32) -> anyhow::Result<RunSummary> {
    anyhow::ensure!(
        seconds.is_finite() && seconds > 0.0 && seconds <= MAX_SECONDS,
        "--seconds must be in (0, {MAX_SECONDS}], got {seconds}"
    );
    let frames = (seconds / FRAME_DT).ceil() as usize;
    let mut world = scenario.world();
    let mut actor = spawn(config, scenario, &world, frames)?;

    let mut fixed_steps = 0;
    let mut events = Vec::new();
    for frame in 0..frames {
        let report = actor.frame(FRAME_DT, &mut world);
        fixed_steps += report.fixed_steps;
        for event in &report.events {
            tracing::info!(frame, ?event, position = ?actor.body().position(), "locomotion event");
        }
        events.extend(report.events);
    }

    Ok(RunSummary {
        frames,
        fixed_steps,
        events,
        position: actor.body().position(),
        hash: world.state_hash(actor.body()),
        grounded: actor.is_grounded(),
    })
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<ActorConfig> {
    match path {
        Some(path) => ActorConfig::from_path(path)
            .with_context(|| format!("loading actor config {}", path.display())),
        None => Ok(ActorConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("stride-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", stride_common::crate_info());
            println!("input: {}", stride_input::crate_info());
            println!("camera: {}", stride_camera::crate_info());
            println!("anim: {}", stride_anim::crate_info());
            println!("locomotion: {}", stride_locomotion::crate_info());
            println!("actor: {}", stride_actor::crate_info());
            println!("kernel: {}", stride_kernel::crate_info());
        }
        Commands::Run {
            config,
            scenario,
            seconds,
        } => {
            let config = load_config(config.as_ref())?;
            println!("Scenario {scenario:?}: {seconds}s at {:.0} Hz fixed", 1.0 / config.fixed_step);
            let summary = simulate(config, scenario, seconds)?;
            println!(
                "frames={}, fixed_steps={}, grounded={}",
                summary.frames, summary.fixed_steps, summary.grounded
            );
            println!("events: {:?}", summary.events);
            println!(
                "final position: ({:.3}, {:.3}, {:.3})",
                summary.position.x, summary.position.y, summary.position.z
            );
            println!("state hash: {:#018x}", summary.hash);
        }
        Commands::CheckConfig { file } => {
            let config = ActorConfig::from_path(&file)
                .with_context(|| format!("checking {}", file.display()))?;
            println!("{}: OK", file.display());
            println!("{}", config.to_json_pretty()?);
        }
        Commands::Replay { scenario, seconds } => {
            println!("Deterministic replay: scenario={scenario:?}, seconds={seconds}");
            let first = simulate(ActorConfig::default(), scenario, seconds)?;
            let second = simulate(ActorConfig::default(), scenario, seconds)?;
            println!("Run 1: steps={}, hash={:#018x}", first.fixed_steps, first.hash);
            println!("Run 2: steps={}, hash={:#018x}", second.fixed_steps, second.hash);
            let matched = first.hash == second.hash && first.events == second.events;
            println!("Match: {}", if matched { "OK" } else { "MISMATCH" });
            anyhow::ensure!(matched, "replay diverged");
        }
    }

    Ok(())
}
