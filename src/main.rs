use clap::Parser;
use trackgen::config::load_config;
use trackgen::errors::{TrackgenError, TrackgenResult};
use trackgen::generator::TrackGenerator;
use trackgen::segment::SegmentKind;
use trackgen::track::TrackDefinition;

#[derive(Parser, Clone)]
#[command(name = "trackgen")]
#[command(about = "Generate a deterministic track layout over a bounded grid")]
struct Args {
    /// Track name
    #[arg(long, default_value = "generated_track")]
    name: String,

    /// Terrain size in grid cells (format: WIDTHxDEPTH); overrides the
    /// config file
    #[arg(long)]
    size: Option<String>,

    /// Segment size in world units (format: WIDTHxDEPTH)
    #[arg(long)]
    segment_size: Option<String>,

    /// Target number of growth steps after the start segment
    #[arg(long)]
    length: Option<u32>,

    /// Half-extent of the central zone where the track may not start
    #[arg(long)]
    start_margin: Option<f32>,

    /// Random seed for reproducible generation
    #[arg(long)]
    seed: Option<u64>,

    /// Output file path relative to the tracks/ directory (e.g. "my_track.bin")
    #[arg(long)]
    output: Option<String>,

    /// Suppress the per-segment listing
    #[arg(long)]
    quiet: bool,
}

/// Parse size string "WIDTHxDEPTH" with validation
fn parse_size(size_str: &str) -> TrackgenResult<(u32, u32)> {
    let parts: Vec<&str> = size_str.split('x').collect();
    if parts.len() != 2 {
        return Err(TrackgenError::InvalidConfig {
            reason: format!("Invalid size format '{size_str}'. Expected WIDTHxDEPTH"),
        });
    }

    let parse = |s: &str| {
        s.parse::<u32>().map_err(|_| TrackgenError::InvalidConfig {
            reason: format!("Invalid size value: '{s}'"),
        })
    };
    let (width, depth) = (parse(parts[0])?, parse(parts[1])?);

    if width == 0 || depth == 0 {
        return Err(TrackgenError::InvalidConfig {
            reason: "Width and depth must be greater than 0".to_string(),
        });
    }

    Ok((width, depth))
}

/// Parse segment size string "WIDTHxDEPTH" (floats) with validation
fn parse_segment_size(size_str: &str) -> TrackgenResult<(f32, f32)> {
    let parts: Vec<&str> = size_str.split('x').collect();
    if parts.len() != 2 {
        return Err(TrackgenError::InvalidConfig {
            reason: format!("Invalid segment size format '{size_str}'. Expected WIDTHxDEPTH"),
        });
    }

    let parse = |s: &str| {
        s.parse::<f32>().map_err(|_| TrackgenError::InvalidConfig {
            reason: format!("Invalid segment size value: '{s}'"),
        })
    };
    let (width, depth) = (parse(parts[0])?, parse(parts[1])?);

    if width <= 0.0 || depth <= 0.0 {
        return Err(TrackgenError::InvalidConfig {
            reason: "Segment width and depth must be positive".to_string(),
        });
    }

    Ok((width, depth))
}

fn validate_output_path(filename: &str) -> TrackgenResult<()> {
    use std::path::Path;

    let path = Path::new(filename);
    if path.is_absolute() {
        return Err(TrackgenError::InvalidConfig {
            reason: format!(
                "Output path must be relative to the tracks/ directory, got absolute path: {filename}"
            ),
        });
    }

    if filename.contains("..") {
        return Err(TrackgenError::InvalidConfig {
            reason: "Output path cannot contain '..'".to_string(),
        });
    }

    Ok(())
}

fn main() -> TrackgenResult<()> {
    env_logger::init();
    let args = Args::parse();

    // config file provides the baseline; CLI flags override per field
    let mut config = load_config();
    if let Some(size) = &args.size {
        (config.terrain_width, config.terrain_depth) = parse_size(size)?;
    }
    if let Some(segment_size) = &args.segment_size {
        (config.segment_width, config.segment_depth) = parse_segment_size(segment_size)?;
    }
    if let Some(length) = args.length {
        config.path_length = length;
    }
    if let Some(margin) = args.start_margin {
        config.start_margin = margin;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let output_filename = args.output.clone();
    if let Some(filename) = &output_filename {
        validate_output_path(filename)?;
    }

    let mut generator = TrackGenerator::new(config)?;
    let report = generator.regenerate();

    if !args.quiet {
        for segment in generator.ledger().iter() {
            println!("{segment}");
        }
    }

    let bounds = generator.bounds();
    let turns = generator
        .ledger()
        .iter()
        .filter(|s| s.kind.is_turn())
        .count();
    let straights = generator
        .ledger()
        .iter()
        .filter(|s| s.kind == SegmentKind::Straight)
        .count();

    println!("\nTrack summary:");
    println!("  Name: {}", args.name);
    println!("  Seed: {}", generator.config().seed);
    println!(
        "  Bounds: x [{:.2}, {:.2}], z [{:.2}, {:.2}]",
        bounds.x_min, bounds.x_max, bounds.z_min, bounds.z_max
    );
    println!(
        "  Segments: {} total ({} straight, {} turns)",
        generator.ledger().len(),
        straights,
        turns
    );
    println!(
        "  Growth: {} of {} requested steps{}",
        report.achieved,
        report.requested,
        if report.dead_end { " (dead end)" } else { "" }
    );
    if report.start_fallback {
        println!("  Note: start retry budget exhausted, start may sit in the exclusion zone");
    }

    if let Some(filename) = &output_filename {
        let track = TrackDefinition::from_generator(args.name.clone(), &generator)?;
        track.save_to_file(filename)?;
        let full_path = TrackDefinition::get_tracks_dir()?.join(filename);
        println!("Track saved to: {}", full_path.display());
    }

    Ok(())
}
