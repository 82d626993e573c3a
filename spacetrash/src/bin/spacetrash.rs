use clap::Parser;
use std::{fs::File, io::BufWriter, path::PathBuf, time::Duration};
use tracing::info;

use spacetrash_lib::{
    catalog::Catalog,
    config::{Config, Settings},
    layer::HeadlessLayer,
    sim_info::SimulationInfo,
    snapshot::{Snapshot, SnapshotWriter},
    source::CatalogSource,
    tracker::{FrameEnvironment, RedrawStage, SpaceTrash},
    units::{Time, Timestamp},
    FrameComponent,
};

#[derive(Parser, Debug)]
#[command(version)]
struct Opts {
    /// Configuration toml file.
    ///
    /// Built-in defaults are used when not provided.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Re-propagate every object on each frame
    #[arg(long)]
    simulate: bool,

    /// Stop after this many frames
    #[arg(long)]
    frames: Option<u64>,

    /// Real time between frames, e.g. '16ms' or '1s'
    #[arg(long, value_parser = humantime::parse_duration)]
    frame_interval: Option<Duration>,

    /// Simulated seconds per real second
    #[arg(long)]
    time_scale: Option<f64>,

    /// Simulated start time (RFC 3339), defaults to now
    #[arg(long)]
    start: Option<Timestamp>,

    /// Write a JSON-lines snapshot of every frame to this file
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// The catalog source. This can either be an http(s):// or file:// URL
    /// or a local file path
    source: Option<CatalogSource>,
}

impl Opts {
    fn overrides(&self) -> Config {
        Config {
            source: self.source.clone(),
            simulate: self.simulate.then_some(true),
            frame_interval: self.frame_interval,
            frames: self.frames,
            time_scale: self.time_scale,
            snapshot: self.snapshot.clone(),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let opts = Opts::parse();

    let intr = interruptor::Interruptor::new();
    let intr_clone = intr.clone();
    ctrlc::set_handler(move || {
        if intr_clone.is_set() {
            let exit_code = if cfg!(target_family = "unix") {
                // 128 (fatal error signal "n") + 2 (control-c is fatal error signal 2)
                130
            } else {
                // Windows code 3221225786
                // -1073741510 == C000013A
                -1073741510
            };
            std::process::exit(exit_code);
        } else {
            intr_clone.set();
        }
    })?;

    let file_cfg = match &opts.config {
        Some(p) => Config::load(p)?,
        None => Config::default(),
    };
    let settings = Settings::from(file_cfg.merge(opts.overrides()));
    info!(source = %settings.source, simulate = settings.simulate, "Starting");

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let text = rt.block_on(settings.source.fetch())?;
    let (catalog, summary) = Catalog::from_text(&text)?;
    println!(
        "Loaded {} objects ({} skipped, {} dangling lines)",
        summary.accepted, summary.skipped, summary.dangling_lines
    );

    let start = opts.start.unwrap_or_else(Timestamp::now);
    let mut sim_info = SimulationInfo::new(start, settings.time_scale);

    let mut tracker = SpaceTrash::new(HeadlessLayer::new());
    let report = tracker.populate(catalog, sim_info.timestamp);
    println!(
        "Placed {} of {} objects at {}",
        report.placed, report.recomputed, report.timestamp
    );
    tracker.set_simulation(settings.simulate);

    let mut snapshots = settings
        .snapshot
        .as_ref()
        .map(|p| File::create(p).map(|f| SnapshotWriter::new(BufWriter::new(f))))
        .transpose()?;

    let env = FrameEnvironment {
        sim_info: &sim_info,
        stage: RedrawStage::BeforeRedraw,
    };
    tracker.init(&env);

    let dt = Time::from_std(settings.frame_interval);
    loop {
        if intr.is_set() {
            break;
        }
        if let Some(max) = settings.frames {
            if sim_info.frame_iteration >= max {
                break;
            }
        }

        std::thread::sleep(settings.frame_interval);
        sim_info.frame_step(dt);

        for stage in [RedrawStage::BeforeRedraw, RedrawStage::AfterRedraw] {
            let env = FrameEnvironment {
                sim_info: &sim_info,
                stage,
            };
            if let Some(report) = tracker.step(&env) {
                if sim_info.frame_iteration % 100 == 0 {
                    println!(
                        "TIME: {} ({} updated, {} failed)",
                        report.timestamp,
                        report.updated,
                        report.failures.len()
                    );
                }
            }
        }

        if let Some(w) = snapshots.as_mut() {
            w.write(&Snapshot::capture(
                sim_info.frame_iteration,
                sim_info.timestamp,
                &tracker,
            ))?;
        }
    }

    if let Some(w) = snapshots {
        let written = w.written();
        w.into_inner()?;
        info!(snapshots = written, "Wrote snapshots");
    }

    println!("Stopped at\n{sim_info:#?}");

    Ok(())
}

mod interruptor {
    use std::sync::atomic::{AtomicBool, Ordering::SeqCst};
    use std::sync::Arc;

    #[derive(Clone, Debug)]
    #[repr(transparent)]
    pub struct Interruptor(Arc<AtomicBool>);

    impl Interruptor {
        pub fn new() -> Self {
            Interruptor(Arc::new(AtomicBool::new(false)))
        }

        pub fn set(&self) {
            self.0.store(true, SeqCst);
        }

        pub fn is_set(&self) -> bool {
            self.0.load(SeqCst)
        }
    }

    impl Default for Interruptor {
        fn default() -> Self {
            Self::new()
        }
    }
}
