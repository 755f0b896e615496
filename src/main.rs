use std::path::PathBuf;
use std::sync::Arc;

use clap::{ArgAction, Parser};

use inkboard::capture::{FfmpegEncoder, Recorder};
use inkboard::config::Config;
use inkboard::engine::{Engine, Tool};
use inkboard::util;

#[derive(Parser, Debug)]
#[command(name = "inkboard")]
#[command(version, about = "Raster whiteboard drawing engine with undo and recording")]
struct Cli {
    /// Path to an alternate config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Surface width in pixels (overrides config)
    #[arg(long, value_name = "PIXELS")]
    width: Option<u32>,

    /// Surface height in pixels (overrides config)
    #[arg(long, value_name = "PIXELS")]
    height: Option<u32>,

    /// Record the scripted session and export the clip
    #[arg(long, short = 'r', action = ArgAction::SetTrue)]
    record: bool,

    /// Encoder binary for recording (overrides config)
    #[arg(long, value_name = "BIN")]
    encoder: Option<PathBuf>,

    /// Directory for the exported recording (overrides config)
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config)?;
    if let Some(width) = cli.width {
        config.surface.width = width;
    }
    if let Some(height) = cli.height {
        config.surface.height = height;
    }
    if let Some(encoder) = cli.encoder {
        config.recording.encoder = encoder;
    }
    if let Some(output_dir) = cli.output_dir {
        config.recording.directory = Some(output_dir);
    }

    let backend = Arc::new(FfmpegEncoder::new(config.recording.encoder.clone()));
    let recorder = Recorder::new(backend, config.recording.framerate);
    let mut engine = Engine::with_brush(
        config.surface.width,
        config.surface.height,
        config.brush_color(),
        config.brush.thickness,
        recorder,
    )?;

    log::info!(
        "Engine ready: {}x{} surface, {} {}px brush",
        engine.width(),
        engine.height(),
        util::color_to_name(&engine.current_color),
        engine.current_thickness,
    );

    if cli.record {
        engine
            .toggle_recording()
            .map_err(|err| anyhow::anyhow!("recording could not be started: {err}"))?;
        log::info!("Recording started");
    }

    run_demo(&mut engine);

    if engine.is_recording() {
        engine.toggle_recording()?;
        log::info!("Recording stopped");
    }

    match engine.save_recording(&config.save_config())? {
        Some(path) => println!("Recording exported to {}", path.display()),
        None => log::debug!("No recording to export"),
    }

    println!(
        "inkboard demo complete: tool={}, undo available={}, export available={}",
        engine.tool().label(),
        engine.can_undo(),
        engine.can_export(),
    );

    Ok(())
}

/// Drives the engine through one scripted session: a freehand wave, a
/// rectangle, a circle, and one undo. Stands in for the pointer events a
/// real shell would dispatch.
fn run_demo(engine: &mut Engine) {
    let w = engine.width() as i32;
    let h = engine.height() as i32;

    engine.set_tool(Tool::Freehand);
    engine.on_press(w / 8, h / 4);
    for step in 1..=8 {
        let x = w / 8 + step * (3 * w / 4) / 8;
        let y = h / 4 + if step % 2 == 0 { -h / 16 } else { h / 16 };
        engine.on_move(x, y);
    }
    engine.on_release();
    log::info!("Freehand stroke committed (undo available: {})", engine.can_undo());

    engine.set_tool(Tool::Rect);
    engine.on_press(w / 4, h / 2);
    engine.on_move(w / 2, h / 2 + h / 8);
    engine.on_move(3 * w / 4, 3 * h / 4);
    engine.on_release();
    log::info!("Rectangle committed");

    engine.set_tool(Tool::Circle);
    engine.on_press(w / 2, h / 2);
    engine.on_move(w / 2 + w / 8, h / 2);
    engine.on_release();
    log::info!("Circle committed");

    if engine.undo() {
        log::info!("Undid the circle");
    }
}
