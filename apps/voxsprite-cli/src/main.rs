use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use tokio::sync::oneshot;
use tracing_subscriber::EnvFilter;
use voxsprite_assets::AssetSource;
use voxsprite_common::{DrawableKind, SceneKind, ViewerConfig};
use voxsprite_field::{FieldProvider, SceneField};
use voxsprite_mesh::{MeshOptions, ParticleMesh, count_active};
use voxsprite_render::{
    Drawable, FrameContext, FrameLoop, FrameSettings, RecordingBackend, ResourceGate,
};

#[derive(Parser)]
#[command(name = "voxsprite-cli", about = "Headless voxsprite tooling")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Config file plus the overrides shared by every command that builds a field.
#[derive(Args)]
struct FieldArgs {
    /// Viewer config (YAML); defaults are used when absent
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Draw strategy: fullscreen_field, quads or points
    #[arg(long)]
    drawable: Option<DrawableKind>,
    /// Grid edge length
    #[arg(long)]
    size: Option<usize>,
    /// Built-in scene: sphere, emblem or marched
    #[arg(long)]
    scene: Option<SceneKind>,
}

impl FieldArgs {
    fn load(&self) -> anyhow::Result<ViewerConfig> {
        let mut config = match &self.config {
            Some(path) => ViewerConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => ViewerConfig::default(),
        };
        if let Some(drawable) = self.drawable {
            config.render.drawable = drawable;
        }
        if let Some(size) = self.size {
            config.field.size = size;
        }
        if let Some(scene) = self.scene {
            config.field.scene = scene;
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Build the mesh for a scene and report its size
    Mesh {
        #[command(flatten)]
        field: FieldArgs,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Run the frame loop against a recording backend
    Simulate {
        #[command(flatten)]
        field: FieldArgs,
        /// Number of ticks to run
        #[arg(short, long, default_value = "120")]
        ticks: u64,
        /// Tick at which the sprite load completes
        #[arg(long, default_value = "30")]
        ready_at: u64,
        /// Simulate a failed sprite load
        #[arg(long)]
        never_ready: bool,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Check a config file and print the effective settings
    Validate {
        /// Config file to check
        path: PathBuf,
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
            println!("voxsprite-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", voxsprite_common::crate_info());
            println!("field: {}", voxsprite_field::crate_info());
            println!("mesh: {}", voxsprite_mesh::crate_info());
            println!("assets: {}", voxsprite_assets::crate_info());
            println!("render: {}", voxsprite_render::crate_info());
        }
        Commands::Mesh { field, json } => {
            let config = field.load()?;
            let voxels = SceneField::from_config(&config.field).compute();
            let options = MeshOptions::from(&config.mesh);
            let active = count_active(&voxels);
            let stats = ParticleMesh::build(&voxels, &options)?.stats();

            if json {
                let report = json!({
                    "scene": format!("{:?}", config.field.scene),
                    "size": voxels.size(),
                    "depth": voxels.depth(),
                    "active_cells": active,
                    "quads": stats.quads,
                    "vertices": stats.vertices,
                    "indices": stats.indices,
                    "index_width": format!("{:?}", stats.index_width),
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "scene={:?} grid={}x{}x{} active={active}",
                    config.field.scene,
                    voxels.size(),
                    voxels.size(),
                    voxels.depth()
                );
                println!("{stats}");
            }
        }
        Commands::Simulate {
            field,
            ticks,
            ready_at,
            never_ready,
            json,
        } => {
            let config = field.load()?;
            let voxels = SceneField::from_config(&config.field).compute();
            let drawable = Drawable::build(
                config.render.drawable,
                &voxels,
                &MeshOptions::from(&config.mesh),
            )?;
            let sprite = AssetSource::from(&config.sprite).resolve()?;

            let (tx, rx) = oneshot::channel();
            let settings = FrameSettings::from_config(&config.render, config.focus(), 16.0 / 9.0);
            let ctx = match FrameContext::new(
                RecordingBackend::new(),
                &drawable,
                ResourceGate::new(rx),
                settings,
            ) {
                Ok(ctx) => ctx,
                Err(never) => match never {},
            };
            let mut frame_loop = FrameLoop::new(ctx);

            let mut pending = if never_ready {
                drop(tx);
                None
            } else {
                Some((tx, sprite))
            };
            let stats = frame_loop.run_headless_with(ticks, |tick, ctx| {
                if tick == ready_at {
                    if let Some((tx, sprite)) = pending.take() {
                        // receiver lives in ctx, so the send cannot fail
                        let _ = tx.send(sprite);
                    }
                }
                // sweep the pointer in a slow circle
                let angle = tick as f32 * 0.05;
                ctx.on_pointer_move(400.0 + 200.0 * angle.cos(), 300.0 + 100.0 * angle.sin());
            });

            let ctx = frame_loop.context();
            let camera = ctx.camera();
            if json {
                let report = json!({
                    "drawable": format!("{:?}", drawable.kind()),
                    "primitive": format!("{:?}", ctx.primitive()),
                    "ticks": stats.ticks,
                    "gated": stats.gated,
                    "draws": stats.draws,
                    "failed": stats.failed,
                    "gate": format!("{:?}", ctx.gate_state()),
                    "x_rotation": camera.x_rotation(),
                    "y_rotation": camera.y_rotation(),
                    "eye": camera.eye().to_array(),
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("drawable={:?} primitive={:?}", drawable.kind(), ctx.primitive());
                println!(
                    "ticks={} gated={} draws={} failed={} gate={:?}",
                    stats.ticks,
                    stats.gated,
                    stats.draws,
                    stats.failed,
                    ctx.gate_state()
                );
                println!(
                    "camera x_rotation={:.3} y_rotation={:.3} eye={:.3}",
                    camera.x_rotation(),
                    camera.y_rotation(),
                    camera.eye()
                );
            }
        }
        Commands::Validate { path } => {
            let config = ViewerConfig::load(&path)
                .with_context(|| format!("loading {}", path.display()))?;
            println!("{}: OK", path.display());
            print!("{}", config.to_yaml()?);
        }
    }

    Ok(())
}
