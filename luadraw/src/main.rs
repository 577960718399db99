use anyhow::{Context, Result};
use backend::{RenderLoop, SdlEventSource, System, TickPolicy};
use scripting::{bootstrap_config, ConfigSnapshot};
use std::env;
use std::path::Path;
use std::process;

mod cli;
mod logging;

const SCREEN_WIDTH: usize = 800;
const SCREEN_HEIGHT: usize = 800;

// 50 frames per second
const TICK_PERIOD_MS: u32 = 20;

fn main() {
    logging::init_logging(logging::LoggingConfig::default());

    let args = env::args().skip(1).collect::<Vec<String>>();
    let script = match cli::parse(&args) {
        Ok(cli::Command::Run { script }) => script,
        Ok(cli::Command::Help) => {
            println!("{}", cli::USAGE);
            return;
        }
        Err(msg) => {
            eprintln!("{msg}\n\n{}", cli::USAGE);
            process::exit(1);
        }
    };

    if let Err(e) = run(&script) {
        eprintln!("luadraw: {e:#}");
        process::exit(1);
    }
}

fn run(script: &Path) -> Result<()> {
    let config = load_config(script)?;
    let system = System::new(&config.window_title, SCREEN_WIDTH, SCREEN_HEIGHT)
        .context("graphics initialization failed")?;

    let frames = {
        let ticks = system
            .tick_source(TICK_PERIOD_MS)
            .context("cannot register frame tick")?;
        let mut events =
            SdlEventSource::new(&system, ticks.tag()).context("cannot open event queue")?;

        let bg = config.background_color;
        let mut render_loop = RenderLoop::new(TickPolicy::Backlog);
        render_loop
            .run(
                &mut events,
                || system.clear_screen(bg.red, bg.green, bg.blue),
                || system.present(),
            )
            .context("render loop aborted")?
    };

    log::info!("window closed after {frames} frames");
    system.shutdown();
    Ok(())
}

/// Evaluates the startup script. Nothing graphical is touched before this
/// succeeds.
fn load_config(script: &Path) -> Result<ConfigSnapshot> {
    let config = bootstrap_config(script)
        .with_context(|| format!("cannot configure from {}", script.display()))?;
    log::info!(
        "configured by {}: title \"{}\", background {}",
        script.display(),
        config.window_title,
        config.background_color
    );
    Ok(config)
}
