use dotenv::dotenv;
use kinematch::reconstruct::MatchSummary;
use kinematch::trellis::StepFailure;
use kinematch::{
    Error, MatchConfig, MatchOutcome, MatchedPath, PathReconstructor, RoadNetwork, StreetGrid,
    TimedPosition, Trellis,
};
use log::{error, info, warn};
use measure_time::info_time;
use serde::Serialize;
use std::env;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Printed to stdout once every path is exported.
#[derive(Serialize)]
struct Report {
    failure: Option<String>,
    matches: Vec<MatchSummary>,
    baseline: MatchSummary,
}

const USAGE: &str = "usage: kinematch <network.jsonl> <grid.jsonl> <trace.jsonl> [output-dir]";

struct Args {
    network: PathBuf,
    grid: PathBuf,
    trace: PathBuf,
    output: PathBuf,
}

impl Args {
    fn parse() -> kinematch::Result<Args> {
        let mut args = env::args_os().skip(1).map(PathBuf::from);

        let (Some(network), Some(grid), Some(trace)) = (args.next(), args.next(), args.next())
        else {
            return Err(Error::Config(USAGE.to_string()));
        };

        let output = args
            .next()
            .or_else(|| env::var_os("KINEMATCH_OUTPUT").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Args {
            network,
            grid,
            trace,
            output,
        })
    }
}

/// Reads an override from the environment, if one is set.
fn var<T: FromStr>(name: &str) -> kinematch::Result<Option<T>> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| Error::Config(format!("{name} has an unusable value: {value:?}"))),
        Err(_) => Ok(None),
    }
}

fn config() -> kinematch::Result<MatchConfig> {
    let mut config = MatchConfig::default();

    if let Some(candidates) = var("KINEMATCH_CANDIDATES")? {
        config = config.with_candidates(candidates);
    }

    if let Some(tracked) = var("KINEMATCH_TRACKED_INTERVALS")? {
        config = config.with_tracked_intervals(tracked);
    }

    if let Some(acceleration) = var("KINEMATCH_ACCELERATION")? {
        config = config.with_acceleration(acceleration);
    }

    if let Some(slack) = var("KINEMATCH_SLACK")? {
        config = config.with_slack(slack);
    }

    if let Some(buffer) = var("KINEMATCH_TIME_BUFFER")? {
        config = config.with_time_buffer(buffer);
    }

    let low = var("KINEMATCH_INITIAL_SPEED_MIN")?.unwrap_or(config.initial_interval.low);
    let high = var("KINEMATCH_INITIAL_SPEED_MAX")?.unwrap_or(config.initial_interval.high);
    if !(low >= 0.0 && low <= high) {
        return Err(Error::Config(format!(
            "initial speed interval [{low}, {high}] is not ordered"
        )));
    }

    if config.candidates == 0 || config.tracked_intervals == 0 {
        return Err(Error::Config(
            "candidates and tracked intervals must be at least 1".to_string(),
        ));
    }

    Ok(config.with_initial_interval(low, high))
}

fn open(path: &Path) -> kinematch::Result<BufReader<File>> {
    Ok(BufReader::new(File::open(path)?))
}

fn load(args: &Args) -> kinematch::Result<(RoadNetwork, StreetGrid, Vec<TimedPosition>)> {
    let network = {
        info_time!("loading network from {}", args.network.display());
        RoadNetwork::from_records(codec::read_network(open(&args.network)?)?)?
    };

    let grid = {
        info_time!("loading grid from {}", args.grid.display());
        StreetGrid::from_records(codec::read_grid(open(&args.grid)?)?)?
    };

    let trace = codec::read_trace(open(&args.trace)?)?
        .into_iter()
        .map(|record| TimedPosition::new(record.lat, record.lon, record.timestamp))
        .collect::<Vec<_>>();

    info!("Loaded trace of {} points", trace.len());
    Ok((network, grid, trace))
}

fn export(path: &MatchedPath, directory: &Path, file_name: &str) -> kinematch::Result<()> {
    let file = File::create(directory.join(file_name))?;
    path.write_gpx(BufWriter::new(file), file_name)?;

    info!("Wrote {file_name} (score {:.2})", path.score);
    Ok(())
}

fn run() -> kinematch::Result<()> {
    let args = Args::parse()?;
    let config = config()?;
    let (network, grid, trace) = load(&args)?;

    let outcome = {
        info_time!("matching {} trace points", trace.len());
        Trellis::new(&network, &grid, config).run(&trace)
    };

    let lattice = match &outcome {
        MatchOutcome::Matched(lattice) => lattice,
        MatchOutcome::Failed {
            failure: failure @ StepFailure::EmptyTrace,
            ..
        } => return Err(Error::Match(*failure)),
        MatchOutcome::Failed { failure, lattice } => {
            warn!("Matching stopped early ({failure}), exporting the partial match");
            lattice
        }
    };

    fs::create_dir_all(&args.output)?;
    let reconstructor = PathReconstructor::new(&network);

    let paths = reconstructor.reconstruct_all(lattice)?;
    for (rank, path) in paths.iter().enumerate() {
        export(path, &args.output, &path.file_name(rank))?;
    }

    let baseline = reconstructor.nearest_snap(&grid, &trace)?;
    export(&baseline, &args.output, "nearest_snap.gpx")?;

    let report = Report {
        failure: outcome.failure().map(|failure| failure.to_string()),
        matches: paths.iter().map(MatchedPath::summary).collect(),
        baseline: baseline.summary(),
    };

    match serde_json::to_string_pretty(&report) {
        Ok(report) => println!("{report}"),
        Err(err) => warn!("Could not render the match report: {err}"),
    }

    Ok(())
}

fn main() {
    dotenv().ok();

    #[cfg(feature = "tracing")]
    kinematch::util::trace::initialize_tracer();
    #[cfg(not(feature = "tracing"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        error!("{err}");
        std::process::exit(1);
    }
}
