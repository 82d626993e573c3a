// cargo run --bin ground-track --release -- --id 0 --start 2008-09-20T12:00:00Z --duration 5560 --dt 10.0 /tmp/track.txt

use clap::Parser;
use std::fs::File;
use std::io::prelude::*;
use std::path::PathBuf;

use spacetrash_lib::{
    catalog::Catalog,
    propagation::ground_track,
    source::CatalogSource,
    units::{Time, Timestamp},
};
use trash_types::prelude::RecordId;

/// Print the ground track of one catalog object over time
#[derive(Parser, Debug)]
#[command(version)]
struct Opts {
    /// The catalog source, a URL or a file path
    #[arg(long, default_value = spacetrash_lib::config::DEFAULT_SOURCE)]
    source: CatalogSource,

    /// Record id, i.e. its index in the catalog
    #[arg(short = 'i', long)]
    id: usize,

    /// Start time (RFC 3339), defaults to now
    #[arg(short = 's', long)]
    start: Option<Timestamp>,

    /// Duration in seconds
    #[arg(short = 'd', long)]
    duration: f64,

    /// Time step (dt)
    #[arg(short = 't', long)]
    dt: f64,

    /// Output file path to write
    output: PathBuf,
}

/// Upper bound on the samples of one run, the whole track is held in memory
const MAX_SAMPLES: usize = 1_000_000;

/// Number of samples covering `[0, duration]` at `dt` spacing
fn sample_count(duration: f64, dt: f64) -> Result<usize, String> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(format!("dt must be a positive number of seconds, got {dt}"));
    }
    if !duration.is_finite() || duration < 0.0 {
        return Err(format!(
            "duration must be a non-negative number of seconds, got {duration}"
        ));
    }
    let steps = (duration / dt).floor();
    if steps >= MAX_SAMPLES as f64 {
        return Err(format!(
            "{duration} s at dt = {dt} s needs more than {MAX_SAMPLES} samples"
        ));
    }
    Ok(steps as usize + 1)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opts = Opts::parse();
    let samples = sample_count(opts.duration, opts.dt)?;

    let rt = tokio::runtime::Builder::new_current_thread().build()?;
    let text = rt.block_on(opts.source.fetch())?;
    let (catalog, _) = Catalog::from_text(&text)?;
    let record = catalog
        .get(RecordId::new(opts.id))
        .ok_or_else(|| format!("No record with id {} in the catalog", opts.id))?;

    let start = opts.start.unwrap_or_else(Timestamp::now);
    let track = ground_track(record, start, Time::from_secs(opts.dt), samples)?;

    let mut output = File::create(opts.output)?;
    writeln!(&mut output, "# {} ({})", record.name, record.id)?;

    for (t, position) in track.into_iter() {
        let time = (t - start).as_secs();
        match position {
            Ok(p) => writeln!(
                &mut output,
                "{} {} {} {}",
                time, p.latitude, p.longitude, p.height
            )?,
            Err(e) => eprintln!("{time}: {e}"),
        }
    }

    Ok(())
}
