mod build_demo;
mod dev_server;
mod replay;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use replay::{Canvases, json_lines, load_options, load_scenes, replay, summarize, text_lines};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "portcanvas")]
#[command(about = "Replay, check and demo canvas scenes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay scenes against in-memory canvases and print the draw calls
    Render {
        /// Scene file: one scene, a JSON array, or newline-delimited scenes
        file: PathBuf,
        /// Bridge options as JSON, e.g. {"clear": false}
        #[arg(long)]
        config: Option<PathBuf>,
        /// Paint over previous frames instead of clearing first
        #[arg(long)]
        no_clear: bool,
        /// Canvas ids that exist; defaults to every id the scenes mention
        #[arg(long = "canvas")]
        canvases: Vec<String>,
        #[arg(long, default_value_t = 300.0)]
        width: f64,
        #[arg(long, default_value_t = 150.0)]
        height: f64,
        #[arg(long, value_enum, default_value = "text")]
        format: Format,
    },
    /// Decode a scene file and summarize its contents
    Check {
        file: PathBuf,
    },
    /// Compile the browser demo to wasm
    BuildDemo {
        #[arg(long, default_value = "demos/canvas-demo")]
        dir: PathBuf,
        #[arg(long)]
        release: bool,
    },
    /// Serve a directory (the built demo by default) over HTTP
    Serve {
        #[arg(long, default_value = "demos/canvas-demo/dist")]
        dir: PathBuf,
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the trace; logs go to stderr.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            file,
            config,
            no_clear,
            canvases,
            width,
            height,
            format,
        } => {
            let scenes = load_scenes(&file)?;
            let mut options = match config {
                Some(path) => load_options(&path)?,
                None => Default::default(),
            };
            if no_clear {
                options.clear = false;
            }
            // Nothing on the command line produces input events.
            options.forward_input = false;

            let canvases = if canvases.is_empty() {
                Canvases::Referenced
            } else {
                Canvases::Only(canvases.into_iter().collect())
            };

            let report = replay(&scenes, options, &canvases, (width, height));
            let lines = match format {
                Format::Text => text_lines(&report.trace),
                Format::Json => json_lines(&report.trace)?,
            };
            for line in lines {
                println!("{line}");
            }
            for (index, canvas_id) in &report.missing {
                eprintln!("#{index} {canvas_id}: canvas not found, scene skipped");
            }
            eprintln!(
                "{} scene(s) replayed, {} skipped",
                report.scenes,
                report.missing.len()
            );
        }
        Commands::Check { file } => {
            let scenes = load_scenes(&file)?;
            for (index, scene) in scenes.iter().enumerate() {
                let summary = summarize(scene);
                println!(
                    "scene {}: canvas {}, {} rect(s), {} text(s), {} unsupported",
                    index, scene.canvas_id, summary.rects, summary.texts, summary.unsupported
                );
            }
            println!("{} scene(s) ok", scenes.len());
        }
        Commands::BuildDemo { dir, release } => {
            build_demo::build_demo(&dir, release)?;
        }
        Commands::Serve { dir, port } => {
            dev_server::serve(&dir, port).await?;
        }
    }

    Ok(())
}
