use std::io::Write;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{arg, ArgAction, ArgMatches, Command};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tv_schedule::generator::{generate_instance, GeneratorConfig};
use tv_schedule::tuning::TuningParams;
use tv_schedule::verify::verify_solution;
use tv_schedule::{io, GreedyScheduler, ScheduleKpi};

fn cli() -> Command {
    Command::new("tv-schedule")
        .about("Greedy broadcast scheduling for TV multiplexes")
        .arg_required_else_help(true)
        .arg(arg!(-v --verbose "Log every committed program").global(true))
        .subcommand(
            Command::new("schedule")
                .about("Schedules a JSON request and prints the response")
                .arg(arg!(<INPUT> "Path to the request json file").value_parser(clap::value_parser!(PathBuf)))
                .arg(
                    arg!(-o --output [OUTPUT] "Write the response here instead of stdout")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--"min-duration-pct" [PCT] "Minimum dwell as a percentage of the shortest program")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    arg!(--"switch-penalty-pct" [PCT] "Switch penalty as a percentage of the average score")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    arg!(--category <CATEGORY> "Selected category; default time preferences apply only when all are selected")
                        .required(false)
                        .action(ArgAction::Append),
                )
                .arg(arg!(--kpi "Print timeline metrics to stderr")),
        )
        .subcommand(
            Command::new("generate")
                .about("Writes a synthetic JSON request")
                .arg(
                    arg!(-c --channels [CHANNELS] "Number of channels")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("10"),
                )
                .arg(
                    arg!(-s --seed [SEED] "Random seed")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("42"),
                )
                .arg(
                    arg!(--category <CATEGORY> "Keep only channels of this genre")
                        .required(false)
                        .action(ArgAction::Append),
                )
                .arg(
                    arg!(--"channel-id" <ID> "Keep only the channel with this id")
                        .required(false)
                        .value_parser(clap::value_parser!(u32))
                        .action(ArgAction::Append),
                )
                .arg(
                    arg!(-o --output [OUTPUT] "Write the request here instead of stdout")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    if let Err(e) = match matches.subcommand() {
        Some(("schedule", sub_m)) => schedule(
            sub_m.get_one::<PathBuf>("INPUT").cloned(),
            sub_m.get_one::<PathBuf>("output").cloned(),
            TuningParams {
                min_duration_pct: sub_m.get_one::<u32>("min-duration-pct").copied(),
                switch_penalty_pct: sub_m.get_one::<u32>("switch-penalty-pct").copied(),
                category_filter: sub_m.contains_id("category").then(|| categories(sub_m)),
            },
            sub_m.get_flag("kpi"),
        ),
        Some(("generate", sub_m)) => generate(
            GeneratorConfig::default()
                .with_channels(sub_m.get_one::<usize>("channels").copied().unwrap_or(10))
                .with_seed(sub_m.get_one::<u64>("seed").copied().unwrap_or(42))
                .with_categories(categories(sub_m))
                .with_channel_ids(
                    sub_m
                        .get_many::<u32>("channel-id")
                        .into_iter()
                        .flatten()
                        .copied(),
                ),
            sub_m.get_one::<PathBuf>("output").cloned(),
        ),
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn categories(matches: &ArgMatches) -> Vec<String> {
    matches
        .get_many::<String>("category")
        .into_iter()
        .flatten()
        .cloned()
        .collect()
}

fn schedule(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    tuning: TuningParams,
    print_kpi: bool,
) -> Result<()> {
    let input = input.ok_or_else(|| anyhow!("Missing input path"))?;
    let instance = io::load_instance(&input)
        .with_context(|| format!("Failed to load instance from {}", input.display()))?;
    let instance = tuning.apply(&instance).context("Failed to apply tuning")?;

    let (solution, stats) = GreedyScheduler::new().schedule_with_stats(&instance);
    info!(
        entries = solution.len(),
        total_score = solution.total_score,
        steps = stats.steps,
        "solved {}",
        input.display()
    );

    for violation in verify_solution(&instance, &solution) {
        warn!(kind = ?violation.violation_type, "{}", violation.message);
    }

    if print_kpi {
        let kpi = ScheduleKpi::calculate(&solution, &instance);
        eprintln!("entries:           {}", kpi.entry_count);
        eprintln!("total score:       {}", kpi.total_score);
        eprintln!("coverage:          {:.1}%", kpi.coverage * 100.0);
        eprintln!("idle minutes:      {}", kpi.idle_minutes);
        eprintln!("channel switches:  {}", kpi.channel_switches);
        eprintln!("longest genre run: {}", kpi.longest_genre_run);
        eprintln!("average fitness:   {:.2}", kpi.average_fitness);
        for (genre, minutes) in &kpi.minutes_by_genre {
            eprintln!("  {genre}: {minutes} min");
        }
    }

    match output {
        Some(path) => io::write_response(&path, &solution)
            .with_context(|| format!("Failed to write response to {}", path.display()))?,
        None => {
            let json = io::response_json(&solution)?;
            writeln!(std::io::stdout(), "{json}")?;
        }
    }
    Ok(())
}

fn generate(config: GeneratorConfig, output: Option<PathBuf>) -> Result<()> {
    let instance = generate_instance(&config);
    info!(
        channels = instance.channels.len(),
        seed = config.seed,
        programs = instance.program_count(),
        "generated instance"
    );

    match output {
        Some(path) => io::write_instance(&path, &instance)
            .with_context(|| format!("Failed to write instance to {}", path.display()))?,
        None => {
            let json = io::instance_json(&instance)?;
            writeln!(std::io::stdout(), "{json}")?;
        }
    }
    Ok(())
}
