//! `morphtype`: render a line of text from a variable font at a chosen
//! weight and width.

mod cli;
mod controls;
mod interactive;
mod output;

use anyhow::{Context, Result};
use clap::Parser;

use morphtype_core::{Config, Session};

use crate::cli::Cli;
use crate::controls::{Command, Controls};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", toml::to_string_pretty(&Config::default())?);
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };
    let font_path = cli.font.as_deref().context("no font file given")?;

    let mut session = Session::open(&config, font_path)
        .with_context(|| format!("cannot explore {}", font_path.display()))?;
    if let Some(language) = &cli.language {
        session.set_language(language)?;
    }
    if !session.font().is_variable() {
        log::warn!("{} has no variation axes; sliders will have no effect", font_path.display());
    }

    let mut controls = Controls::new(&config.sliders, config.variations.unit);
    if let Some(weight) = cli.weight {
        controls.apply(Command::Weight(weight));
    }
    if let Some(width) = cli.width {
        controls.apply(Command::Width(width));
    }
    controls.apply(Command::Shaping(cli.shaping));
    controls.apply(Command::Text(cli.text));

    if cli.interactive {
        return interactive::run(&mut session, controls, &config.canvas, &cli.output);
    }

    session.apply_request(controls.request());
    let (frame, report) = output::render_frame(&mut session, &config.canvas);
    output::save_png(&frame, &cli.output)?;
    println!("{}", output::summary(&report, &cli.output));
    Ok(())
}
