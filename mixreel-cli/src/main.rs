//! mixreel CLI Tool
//!
//! Command-line interface for exporting DJ mix set lists to video editor
//! timelines.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use mixreel_core::{timecode_to_frames, Mix, MixFile};
use mixreel_xmeml::ExportConfig;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "mixreel")]
#[command(about = "Export DJ mix set lists to video editor timelines")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a set list JSON file to a timeline
    Export {
        /// Input JSON file path
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (overwritten if it exists)
        #[arg(short, long)]
        output: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Fcpxml)]
        format: Format,

        /// Name of the generated sequence
        #[arg(long, default_value = "DJ Mix Sequence")]
        sequence_name: String,
    },

    /// Show the set list with its frame positions
    Info {
        /// Input JSON file path
        input: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Final Cut Pro 7 XML (xmeml version 5)
    Fcpxml,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    FmtSubscriber::builder()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match cli.command {
        Commands::Export {
            input,
            output,
            format,
            sequence_name,
        } => export_mix(&input, &output, format, sequence_name)?,

        Commands::Info { input } => print_info(&read_mix(&input)?)?,
    }

    Ok(())
}

fn read_mix(input: &Path) -> Result<Mix> {
    debug!("reading set list from {}", input.display());
    let file = File::open(input)
        .with_context(|| format!("Failed to open DJ mix file {}", input.display()))?;
    let mix_file = MixFile::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse DJ mix file {}", input.display()))?;
    Ok(mix_file.into_mix())
}

fn export_mix(input: &Path, output: &Path, format: Format, sequence_name: String) -> Result<()> {
    let mix = read_mix(input)?;
    println!(
        "Exporting {} tracks from {}",
        mix.track_count(),
        input.display()
    );

    let config = ExportConfig {
        sequence_name,
        ..ExportConfig::default()
    };

    match format {
        Format::Fcpxml => {
            // build before touching the output so a bad set list leaves it intact
            let document =
                mixreel_xmeml::build_document(&mix, &config).context("Failed to build timeline")?;

            let file = File::create(output).context("Failed to create output file")?;
            document
                .write(BufWriter::new(file))
                .context("Failed to write Final Cut Pro XML")?;

            println!(
                "Final Cut Pro XML created successfully: {} ({} clips, {} transitions, {} frames)",
                output.display(),
                document.video_clip_items().len(),
                document.transition_items().len(),
                document.duration()
            );
        }
    }

    Ok(())
}

fn print_info(mix: &Mix) -> Result<()> {
    println!("\n=== DJ Mix ===");
    println!("Audio: {}", mix.complete_mix_audio_file);
    println!("Tracks: {}", mix.track_count());

    let last_track = mix.last_track().context("Nothing to show")?;
    let total = timecode_to_frames(&last_track.transition.end_time)?;
    println!(
        "Duration: {} frames ({:.2} seconds)",
        total,
        total as f64 / mixreel_core::TIMEBASE as f64
    );

    println!("\n=== Set List ===");
    for (i, track) in mix.set_track_list.iter().enumerate() {
        let start = timecode_to_frames(&track.start_time)?;
        let end = timecode_to_frames(&track.transition.end_time)?;
        let artist = if track.artist.is_empty() {
            String::new()
        } else {
            format!(" - {}", track.artist)
        };
        println!(
            "  [{}] {}{} frames {}..{}",
            i, track.title, artist, start, end
        );
    }

    let outgoing = mix.outgoing_tracks();
    if !outgoing.is_empty() {
        println!("\n=== Transitions ===");
        for (i, track) in outgoing.iter().enumerate() {
            println!(
                "  [{} -> {}] {} as {} frames {}..{}",
                i,
                i + 1,
                track.transition.kind,
                track.transition.kind.effect_name(),
                timecode_to_frames(&track.transition.start_time)?,
                timecode_to_frames(&track.transition.end_time)?
            );
        }
    }

    Ok(())
}
