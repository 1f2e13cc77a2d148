use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::Parser as ClapParser;

use subsync::parser;
use subsync::serialiser::{format_clock, format_timecode};
use subsync::srt::PlaybackSample;
use subsync::sync;

fn main() {
    env_logger::init();
    match run() {
        Ok(()) => (),
        Err(err) => {
            eprintln!("An error occurred: {}", err);
            for cause in err.chain().skip(1) {
                eprintln!("    {}", cause);
            }
        }
    }
}

#[derive(ClapParser)]
#[command(about = "Print the transcript of an SRT subtitle file")]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "The file to read from. If not supplied, the subtitles will be read from standard input.",
        default_value = "-"
    )]
    input: String,
    #[arg(
        short,
        long,
        value_name = "SECONDS",
        help = "Mark the entry that would be active at the given playback offset."
    )]
    at: Option<f64>,
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let data = if cli.input == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(&cli.input)
            .context(format!("Failed to open input file: '{}'", cli.input))?
    };

    let entries = parser::parse(&data);

    let active = cli.at.and_then(|time_seconds| {
        sync::active_entry_index(&entries, PlaybackSample { time_seconds })
    });

    for (index, entry) in entries.iter().enumerate() {
        let marker = if active == Some(index) { ">" } else { " " };
        println!(
            "{} {:>5}  {} --> {}  {}",
            marker,
            format_clock(entry.start_seconds),
            format_timecode(entry.start_seconds),
            format_timecode(entry.end_seconds),
            entry.text
        );
    }

    Ok(())
}
