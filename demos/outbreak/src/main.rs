//! outbreak: run one of the built-in compartmental models over a synthetic
//! town and write `metadata.json`, `status_summary.csv`, and
//! `individual_logs.csv` to a directory.
//!
//! ```text
//! outbreak --model seiqrdv --days 120 --population 2000 --out ./seiqrdv-run
//! RUST_LOG=debug outbreak --model rumor --mean-field
//! ```

mod town;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::de::DeserializeOwned;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use et_agent::{PopulationConfig, Status};
use et_core::{GeoPoint, NodeId, PlaceType, SimConfig, DEFAULT_SEED};
use et_model::{
    integrate_rk4, CompartmentalModel, MeanField, SeiqrdvModel, SeiqrdvParams, SeirModel, SeirParams,
    SeisirrModel, SeisirrParams,
};
use et_schedule::{
    load_schedule_csv, DaySchedule, EnergyExponentialMobility, LogNormalMobility, StepEvent,
};
use et_sim::{SimBuilder, Simulation};
use et_town::Town;

use town::build_town;

/// RK4 sub-steps per simulated day for the mean-field comparison.
const RK4_STEPS_PER_DAY: u32 = 24;

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ModelKind {
    Seir,
    Seiqrdv,
    /// SEIsIrR rumor spreading.
    Rumor,
}

/// Agent-based outbreak simulation over a synthetic town
#[derive(Parser, Debug)]
#[command(name = "outbreak")]
struct Args {
    #[arg(long, value_enum, default_value = "seir")]
    model: ModelKind,

    /// Maximum number of days to simulate
    #[arg(long, default_value_t = 60)]
    days: u32,

    #[arg(long, default_value_t = 1_000)]
    population: usize,

    /// Initial spreaders, placed at random homes
    #[arg(long, default_value_t = 10)]
    spreaders: usize,

    /// Seed one extra spreader at the home nearest to LAT,LON (repeatable)
    #[arg(long, value_name = "LAT,LON", value_parser = parse_point)]
    spreader_near: Vec<GeoPoint>,

    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Draw the generator from OS entropy instead of --seed
    #[arg(long)]
    unseeded: bool,

    /// JSON file with the model's parameters (defaults are built in)
    #[arg(long)]
    params: Option<PathBuf>,

    /// Day schedule CSV (name,event_type,max_distance,place_types,mobility)
    #[arg(long)]
    schedule: Option<PathBuf>,

    /// Output directory
    #[arg(long, default_value = "outbreak-run")]
    out: PathBuf,

    /// Log per-day progress at debug level only
    #[arg(long)]
    silent: bool,

    /// Compare the run against the mean-field ODE
    #[arg(long)]
    mean_field: bool,
}

// ── Default parameters and schedules ──────────────────────────────────────────

fn default_seir() -> SeirParams {
    SeirParams { max_energy: 5, beta: 0.4, sigma: 3, gamma: 5, xi: 60 }
}

fn default_seiqrdv() -> SeiqrdvParams {
    SeiqrdvParams {
        max_energy:        5,
        lam_cap:           0.0001,
        beta:              0.4,
        alpha:             0.05,
        gamma:             4,
        delta:             5,
        lam:               7,
        rho:               7,
        kappa:             0.2,
        mu:                0.0001,
        hospital_capacity: Some(30),
    }
}

fn default_rumor() -> SeisirrParams {
    SeisirrParams {
        max_energy: 5,
        literacy:   0.25,
        gamma:      0.5,
        alpha:      0.5,
        lam:        0.8,
        phi:        0.1,
        theta:      0.3,
        mu:         0.3,
        eta1:       0.1,
        eta2:       0.1,
        mem_span:   10,
    }
}

fn default_schedule(kind: ModelKind) -> Result<DaySchedule> {
    let greet = StepEvent::disperse("greet_neighbors", 1_000.0, [PlaceType::Accommodation])?;
    let events = match kind {
        ModelKind::Seir => vec![
            greet,
            StepEvent::disperse(
                "chore",
                2_000.0,
                [PlaceType::Commercial, PlaceType::Workplace, PlaceType::Education, PlaceType::Religious],
            )?
            .with_mobility(LogNormalMobility::new(400.0, 0.8)?)?,
        ],
        ModelKind::Seiqrdv => vec![
            greet,
            StepEvent::disperse(
                "chore",
                2_000.0,
                [PlaceType::Commercial, PlaceType::Workplace, PlaceType::HealthcareFacility],
            )?
            .with_mobility(LogNormalMobility::new(400.0, 0.8)?)?,
        ],
        ModelKind::Rumor => vec![
            greet,
            StepEvent::disperse("gossip", 2_000.0, [PlaceType::Commercial, PlaceType::Religious, PlaceType::Other])?
                .with_mobility(EnergyExponentialMobility::new(500.0)?)?,
        ],
    };
    Ok(DaySchedule::new(events)?)
}

fn parse_point(s: &str) -> Result<GeoPoint, String> {
    let (lat, lon) = s.split_once(',').ok_or_else(|| format!("expected LAT,LON, got {s:?}"))?;
    let lat: f32 = lat.trim().parse().map_err(|e| format!("bad latitude {lat:?}: {e}"))?;
    let lon: f32 = lon.trim().parse().map_err(|e| format!("bad longitude {lon:?}: {e}"))?;
    Ok(GeoPoint::new(lat, lon))
}

/// Nearest node to each point, kept only when it is a home.
fn spreader_homes(town: &Town, points: &[GeoPoint]) -> Vec<NodeId> {
    let mut homes = Vec::new();
    for &point in points {
        match town.snap_to_node(point) {
            Some(node) if town.place_type(node) == PlaceType::Accommodation => homes.push(node),
            Some(node) => {
                warn!(%point, %node, place = %town.place_type(node), "nearest node is not a home; ignoring")
            }
            None => warn!(%point, "town has no nodes to snap to"),
        }
    }
    homes
}

fn load_params<P: DeserializeOwned>(path: Option<&Path>, default: fn() -> P) -> Result<P> {
    let Some(path) = path else {
        return Ok(default());
    };
    let file = File::open(path).with_context(|| format!("opening parameters {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing parameters {}", path.display()))
}

fn load_schedule(path: Option<&Path>, kind: ModelKind) -> Result<DaySchedule> {
    match path {
        Some(path) => load_schedule_csv(path).with_context(|| format!("loading schedule {}", path.display())),
        None => default_schedule(kind),
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let town = build_town().context("building the synthetic town")?;
    let config = SimConfig::new(args.days).with_seed((!args.unseeded).then_some(args.seed));
    let pinned = spreader_homes(&town, &args.spreader_near);
    let population = PopulationConfig::new(args.population, args.spreaders + pinned.len())
        .with_spreader_nodes(pinned);
    let schedule = load_schedule(args.schedule.as_deref(), args.model)?;

    info!(
        model      = ?args.model,
        nodes      = town.node_count(),
        homes      = town.accommodation_nodes().len(),
        population = args.population,
        days       = args.days,
        "town ready"
    );

    match args.model {
        ModelKind::Seir => {
            let params = load_params(args.params.as_deref(), default_seir)?;
            let model = SeirModel::new(params.clone(), schedule)?;
            let sim = run(&args, config, model, town, population)?;
            if args.mean_field {
                compare_mean_field(&params, &sim);
            }
        }
        ModelKind::Seiqrdv => {
            let params = load_params(args.params.as_deref(), default_seiqrdv)?;
            let model = SeiqrdvModel::new(params.clone(), schedule)?;
            let sim = run(&args, config, model, town, population)?;
            if args.mean_field {
                compare_mean_field(&params, &sim);
            }
        }
        ModelKind::Rumor => {
            let params = load_params(args.params.as_deref(), default_rumor)?;
            let model = SeisirrModel::new(params.clone(), schedule)?;
            let sim = run(&args, config, model, town, population)?;
            if args.mean_field {
                compare_mean_field(&params, &sim);
            }
        }
    }
    Ok(())
}

fn run<M: CompartmentalModel>(
    args:       &Args,
    config:     SimConfig,
    model:      M,
    town:       Town,
    population: PopulationConfig,
) -> Result<Simulation<M>> {
    let mut sim = SimBuilder::new(config, model, town, population).build()?;

    let t0 = Instant::now();
    sim.run(&args.out, args.silent);
    let elapsed = t0.elapsed();

    let tally = sim.tally();
    info!(
        days     = sim.phase().timestep(),
        living   = sim.model().living_total(tally),
        infected = sim.model().infected_total(tally),
        counts   = %tally,
        elapsed  = ?elapsed,
        out      = %args.out.display(),
        "run finished"
    );
    Ok(sim)
}

/// Log the largest per-day L2 distance between the agent densities and the
/// mean-field trajectory started from the same initial densities.
///
/// Densities are relative to the starting population, so migration shows up
/// as growth on both sides.
fn compare_mean_field<M: CompartmentalModel, F: MeanField>(system: &F, sim: &Simulation<M>) {
    let Some(initial) = sim.tallies().first() else {
        return;
    };
    let total = initial.total().max(1) as f64;
    let daily: Vec<Vec<f64>> = sim
        .tallies()
        .iter()
        .filter(|t| t.current_event.is_none() || t.event_label() == et_schedule::END_DAY)
        .map(|t| <M::Status as Status>::ALL.iter().map(|&s| t.count(s) as f64 / total).collect())
        .collect();
    let Some(y0) = daily.first() else {
        return;
    };
    let days = (daily.len() - 1) as u32;
    let reference = integrate_rk4(system, y0, days, RK4_STEPS_PER_DAY);

    let (worst_day, worst) = daily
        .iter()
        .zip(&reference)
        .map(|(abm, ode)| abm.iter().zip(ode).map(|(a, b)| (a - b).powi(2)).sum::<f64>().sqrt())
        .enumerate()
        .fold((0, 0.0_f64), |best, (day, d)| if d > best.1 { (day, d) } else { best });

    info!(
        labels    = ?system.labels(),
        days,
        worst_day,
        worst_l2  = worst,
        "mean-field comparison"
    );
}
