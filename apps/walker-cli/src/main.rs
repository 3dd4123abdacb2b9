use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use walker_input::{Control, InputState};
use walker_render::{DebugTextRenderer, ModelSummary, Projection, Renderer, SceneStatus};
use walker_sim::{Walker, tuning};

#[derive(Parser)]
#[command(name = "walker-cli", about = "Headless scene walker operations")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and tuning constants
    Info,
    /// Run the movement integrator for a number of frames and print the pose
    Walk {
        /// Number of frames to simulate
        #[arg(short, long, default_value = "60")]
        frames: u32,
        /// Controls held for the whole run, e.g. forward,sprint,turn-left
        #[arg(short, long, value_delimiter = ',')]
        controls: Vec<String>,
        /// Start in third person
        #[arg(long)]
        third_person: bool,
    },
    /// Load a model (with fallback chain) and print what came out
    Probe {
        /// Model file to load
        model: PathBuf,
        /// Fallback model file
        #[arg(long, default_value = "model.gltf")]
        fallback: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("walker-cli v{}", env!("CARGO_PKG_VERSION"));
            println!(
                "base speed: {} /frame (sprint x{})",
                tuning::BASE_SPEED,
                tuning::SPRINT_MULTIPLIER
            );
            println!("turn step: {} rad/frame", tuning::TURN_STEP);
            println!(
                "spawn: ({}, {}, {})",
                tuning::SPAWN_POSITION.x,
                tuning::SPAWN_POSITION.y,
                tuning::SPAWN_POSITION.z
            );
        }
        Commands::Walk {
            frames,
            controls,
            third_person,
        } => {
            let mut input = InputState::new();
            for name in &controls {
                match Control::from_name(name) {
                    Some(control) => input.set(control, true),
                    // Unknown names are ignored, same as unknown keys.
                    None => tracing::warn!("ignoring unknown control {name:?}"),
                }
            }

            let mut walker = Walker::new();
            if third_person {
                walker.toggle_view();
            }
            for _ in 0..frames {
                walker.step(&input);
            }

            let scene = SceneStatus {
                view_label: walker.view().label(),
                model: None,
            };
            let out = DebugTextRenderer::new().render(
                &scene,
                &walker.camera_pose(),
                &Projection::default(),
            );
            print!("{out}");
        }
        Commands::Probe { model, fallback } => {
            let loaded = walker_assets::load_model(&model, &fallback);
            let summary = ModelSummary {
                name: loaded.name.clone(),
                mesh_count: loaded.meshes.len(),
                clip_count: loaded.clips.len(),
            };
            println!(
                "{}: {:?}, {} meshes, {} vertices, {} clips",
                summary.name,
                loaded.source,
                summary.mesh_count,
                loaded.vertex_count(),
                summary.clip_count
            );
            for clip in &loaded.clips {
                println!("  clip {:?} ({:.2}s)", clip.name, clip.duration);
            }
        }
    }

    Ok(())
}
