//! Command-line definitions.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "morphtype", version)]
#[command(about = "Render shaped text from a variable font at chosen weight and width")]
pub struct Cli {
    /// Variable (or static) TrueType/OpenType font file.
    #[arg(required_unless_present = "print_config")]
    pub font: Option<PathBuf>,

    /// Text to shape and render.
    #[arg(short, long, default_value = "")]
    pub text: String,

    /// Weight slider position (axis value = position / 100 in relative units).
    #[arg(long, allow_negative_numbers = true)]
    pub weight: Option<i32>,

    /// Width slider position (axis value = position / 100 in relative units).
    #[arg(long, allow_negative_numbers = true)]
    pub width: Option<i32>,

    /// Advance the pen by shaped advances instead of raw design advances.
    #[arg(long)]
    pub shaping: bool,

    /// BCP-47 language for shaping (guessed from the text when omitted).
    #[arg(long)]
    pub language: Option<String>,

    /// PNG file written after each render.
    #[arg(short, long, default_value = "morphtype.png")]
    pub output: PathBuf,

    /// Config file to use instead of the platform default.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Read slider commands from stdin and re-render after each one.
    #[arg(long)]
    pub interactive: bool,

    /// Print the default configuration to stdout and exit.
    #[arg(long)]
    pub print_config: bool,
}
