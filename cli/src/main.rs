use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use maze_common::db::parser::infile;
use maze_common::util::config::{Config, StepMode, TracebackMode};
use maze_common::util::generator::{self, GeneratorParams};
use maze_common::util::logger;
use maze_router::grid::{CellKind, RoutingGrid, row_major};
use maze_router::observer::StepObserver;
use maze_router::{RoutingContext, check};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    config: PathBuf,

    /// Log rip-up decisions and per-target results.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum TracebackArg {
    MinTurn,
    Direct,
}

impl From<TracebackArg> for TracebackMode {
    fn from(arg: TracebackArg) -> Self {
        match arg {
            TracebackArg::MinTurn => TracebackMode::MinTurn,
            TracebackArg::Direct => TracebackMode::Direct,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SteppingArg {
    Wave,
    Destination,
    Net,
    RouteAll,
}

impl From<SteppingArg> for StepMode {
    fn from(arg: SteppingArg) -> Self {
        match arg {
            SteppingArg::Wave => StepMode::Wave,
            SteppingArg::Destination => StepMode::Destination,
            SteppingArg::Net => StepMode::Net,
            SteppingArg::RouteAll => StepMode::RouteAll,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    Route {
        /// Floorplan to route; overrides `input.infile`.
        infile: Option<String>,
        #[arg(long, value_enum)]
        traceback: Option<TracebackArg>,
        #[arg(long, value_enum)]
        stepping: Option<SteppingArg>,
        /// Print the routed grid.
        #[arg(long)]
        show: bool,
    },
    Generate {
        #[arg(long, default_value_t = 20)]
        cols: u32,
        #[arg(long, default_value_t = 20)]
        rows: u32,
        #[arg(long, default_value_t = 40)]
        blockages: usize,
        #[arg(long, default_value_t = 10)]
        nets: usize,
        #[arg(long, default_value_t = 3)]
        max_targets: usize,
        #[arg(long, default_value_t = 1)]
        seed: u64,
        #[arg(long, default_value = "inputs/random.infile")]
        output: String,
    },
}

/// Forwards stepping statuses to the log.
struct LogObserver;

impl StepObserver for LogObserver {
    fn on_step(&mut self, status: &str) {
        log::info!("[step] {}", status);
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init(args.verbose);

    let mut config = if args.config.exists() {
        log::info!("Loading configuration from {:?}", args.config);
        let config_str = std::fs::read_to_string(&args.config)
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;
        toml::from_str(&config_str)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?
    } else {
        log::warn!(
            "Configuration file {:?} not found. Using internal defaults.",
            args.config
        );
        Config::default()
    };

    let command = args.command.unwrap_or(Commands::Route {
        infile: None,
        traceback: None,
        stepping: None,
        show: false,
    });

    match command {
        Commands::Route {
            infile,
            traceback,
            stepping,
            show,
        } => {
            if let Some(infile) = infile {
                config.input.infile = infile;
            }
            if let Some(traceback) = traceback {
                config.router.traceback_mode = traceback.into();
            }
            if let Some(stepping) = stepping {
                config.router.step_mode = stepping.into();
            }
            run_routing(&config, show)?;
        }
        Commands::Generate {
            cols,
            rows,
            blockages,
            nets,
            max_targets,
            seed,
            output,
        } => {
            prepare_output_dir(&output)?;
            log::info!(
                "Generating random floorplan ({}x{}, Blockages: {}, Nets: {}, Seed: {})...",
                cols,
                rows,
                blockages,
                nets,
                seed
            );
            let params = GeneratorParams {
                cols,
                rows,
                blockages,
                nets,
                max_targets,
                seed,
            };
            let floorplan = generator::generate_random_floorplan(&params)?;
            generator::write_infile(&floorplan, &output)
                .with_context(|| format!("Failed to write '{}'", output))?;
            log::info!("Generated: {}", output);
        }
    }

    Ok(())
}

fn prepare_output_dir(path_str: &str) -> anyhow::Result<()> {
    if let Some(parent) = Path::new(path_str).parent() {
        if !parent.exists() && !parent.as_os_str().is_empty() {
            log::info!("Creating output directory: {:?}", parent);
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn run_routing(config: &Config, show: bool) -> anyhow::Result<()> {
    let path = &config.input.infile;
    if !Path::new(path).exists() {
        return Err(anyhow::anyhow!("Input floorplan missing: {}", path));
    }

    log::info!("Parsing floorplan: {}", path);
    let floorplan =
        infile::parse(path).with_context(|| format!("Invalid floorplan syntax in '{}'", path))?;

    let mut ctx = RoutingContext::with_observer(&floorplan, config.router.clone(), LogObserver)
        .with_context(|| format!("Cannot route '{}'", path))?;
    if ctx.nets().is_empty() {
        log::warn!("Floorplan '{}' has no nets", path);
    }
    ctx.route_all()?;

    for net in ctx.nets().ids() {
        println!("Net {}: {:?}", net, ctx.outcome(net));
    }
    if show {
        print!("{}", render(ctx.grid()));
    }

    check::run(ctx.grid(), ctx.nets()).map_err(|e| anyhow::anyhow!("Verification Failed: {}", e))?;
    log::info!("Total wirelength: {} tiles", check::total_wirelength(ctx.grid()));

    Ok(())
}

/// One character per tile: `#` blockage, `S`/`T` routed pins, `s`/`t`
/// unrouted pins, and wires drawn with the owning net's index in base 36.
fn render<G: RoutingGrid>(grid: &G) -> String {
    let mut out = String::with_capacity((grid.cols() as usize + 1) * grid.rows() as usize);
    for c in row_major(grid.cols(), grid.rows()) {
        let ch = match grid.kind(c) {
            CellKind::Empty => '.',
            CellKind::Blockage => '#',
            CellKind::SourceRouted => 'S',
            CellKind::SourceUnrouted => 's',
            CellKind::TargetRouted => 'T',
            CellKind::TargetUnrouted => 't',
            CellKind::WireFull | CellKind::WirePartial => grid
                .owner(c)
                .and_then(|net| char::from_digit(net.0 % 36, 36))
                .unwrap_or('?'),
        };
        out.push(ch);
        if c.x + 1 == grid.cols() {
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_common::util::config::RouterConfig;

    #[test]
    fn renders_routed_grid() {
        let fp = infile::parse_str("4 2\n1\n1 1\n1\n2 0 0 3 0\n").unwrap();
        let ctx = maze_router::route(&fp, &RouterConfig::default()).unwrap();
        assert_eq!(render(ctx.grid()), "S00T\n.#..\n");
    }

    #[test]
    fn cli_args_parse() {
        let args = Args::try_parse_from([
            "maze",
            "--verbose",
            "route",
            "board.infile",
            "--traceback",
            "direct",
            "--stepping",
            "route-all",
            "--show",
        ])
        .unwrap();
        assert!(args.verbose);
        assert!(matches!(
            args.command,
            Some(Commands::Route {
                traceback: Some(TracebackArg::Direct),
                stepping: Some(SteppingArg::RouteAll),
                show: true,
                ..
            })
        ));
    }
}
