use clap::Parser;
use env_logger::Env;
use log::{error, info};

use crate::cli::Cli;
use crate::mpris::DbusPlayer;

mod render_loop;
mod settings;
mod startup;

pub use render_loop::*;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(if cli.debug {
        "debug"
    } else {
        "info"
    }))
    .format_timestamp_secs()
    .init();

    let mut settings = settings::load_settings(cli.config.as_deref());
    cli.apply(&mut settings);
    if let Err(msg) = settings.validate() {
        error!("invalid settings: {msg}");
        return Err(msg.into());
    }

    let player = DbusPlayer::connect(&cli.player, settings.player.bus).inspect_err(|e| {
        error!("cannot reach player {:?}: {e}", cli.player);
    })?;
    info!(
        "{} v{} watching {} on the {:?} bus",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        player.bus_name(),
        settings.player.bus
    );

    let display = startup::open_display(&settings.display).inspect_err(|e| {
        error!("cannot open display: {e}");
    })?;

    let mut render_loop = RenderLoop::new(
        player,
        display,
        startup::font_size(settings.layout.font_size),
        settings.render_loop.clone(),
    )
    .with_max_frames(cli.max_frames());

    render_loop.run().map_err(|e| {
        error!("{e}");
        e.into()
    })
}
