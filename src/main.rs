use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use archery_scorer::config::{self, Config};
use archery_scorer::handicap::{self, HandicapOptions, HandicapSystem};
use archery_scorer::round::{self, RoundDefinition, RoundGeometry};
use archery_scorer::score_pad::build_score_pad;
use archery_scorer::{output, GoldsType};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// List built-in rounds (default if no subcommand)
    Rounds,
    /// Predict the score for a handicap on a round
    Predict {
        #[command(flatten)]
        round: RoundArgs,
        /// Handicap, 0 (best) to 100
        handicap: u32,
        #[command(flatten)]
        options: HandicapArgs,
    },
    /// Find the handicap for a score shot on a round
    Handicap {
        #[command(flatten)]
        round: RoundArgs,
        /// Score shot
        score: u32,
        #[command(flatten)]
        options: HandicapArgs,
    },
    /// Print expected scores for every handicap on a round
    Table {
        #[command(flatten)]
        round: RoundArgs,
        #[command(flatten)]
        options: HandicapArgs,
    },
    /// Break arrows into ends and totals
    Pad {
        /// Arrows in shooting order, e.g. "X 10 9 9 8 M"
        arrows: String,
        /// Round the arrows were shot for (omit for a plain practice pad)
        #[arg(short, long)]
        round: Option<String>,
        /// Sub-type of the round (see `rounds`)
        #[arg(long)]
        sub_type: Option<u32>,
        /// Arrows per end
        #[arg(short, long)]
        end_size: Option<usize>,
        /// Which arrows count as golds
        #[arg(short, long, value_enum)]
        golds: Option<GoldsArg>,
        #[arg(short, long, value_enum, default_value_t = FormatArg::Text)]
        format: FormatArg,
    },
    /// Write a default config file
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug)]
struct RoundArgs {
    /// Round key or name (see `rounds`)
    round: String,
    /// Sub-type of the round, e.g. 2 for WA 1440 Ladies
    #[arg(long)]
    sub_type: Option<u32>,
}

#[derive(Args, Debug)]
struct HandicapArgs {
    /// Handicap tables to use
    #[arg(long, value_enum)]
    system: Option<SystemArg>,
    /// Score with inner-ten rules (indoor ten-zone rounds only)
    #[arg(long)]
    inner_ten: bool,
    /// Only count the first N arrows of the round
    #[arg(long)]
    arrows: Option<u32>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SystemArg {
    Agb2023,
    Legacy,
}

impl From<SystemArg> for HandicapSystem {
    fn from(arg: SystemArg) -> Self {
        match arg {
            SystemArg::Agb2023 => HandicapSystem::Agb2023,
            SystemArg::Legacy => HandicapSystem::Legacy,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum GoldsArg {
    Nines,
    Tens,
    Xs,
}

impl From<GoldsArg> for GoldsType {
    fn from(arg: GoldsArg) -> Self {
        match arg {
            GoldsArg::Nines => GoldsType::Nines,
            GoldsArg::Tens => GoldsType::Tens,
            GoldsArg::Xs => GoldsType::Xs,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum FormatArg {
    Text,
    Csv,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "archery-scorer")]
#[command(about = "Archery handicaps and score pads", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/archery-scorer/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let command = cli.command.unwrap_or(Commands::Rounds);
    let config_path = cli.config.map(PathBuf::from);

    // init must work even when the existing config is broken
    let is_init = matches!(command, Commands::Init { .. });
    let config = if is_init {
        Config::default()
    } else {
        match config::load_config(config_path.clone()) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Config error: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        }
    };

    if let Err(errors) = config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    if let Err(e) = run(command, &config, config_path) {
        if is_init {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        eprintln!("Error: {:#}", e);
        std::process::exit(EXIT_INPUT);
    }

    std::process::exit(EXIT_SUCCESS);
}

fn run(command: Commands, config: &Config, config_path: Option<PathBuf>) -> Result<()> {
    let use_colors = output::should_use_colors(config.color());

    match command {
        Commands::Rounds => {
            println!("{}", output::format_round_list(&round::catalog()));
        }
        Commands::Predict {
            round,
            handicap,
            options,
        } => {
            let geometry = load_geometry(&round.round, round.sub_type)?;
            let options = handicap_options(&options, config);
            let score = handicap::expected_score(&geometry, handicap, &options)?;
            log::info!(
                "{} handicap {} ({}) -> {}",
                geometry.round().display_name,
                handicap,
                options.system,
                score
            );
            println!("{}", score);
        }
        Commands::Handicap {
            round,
            score,
            options,
        } => {
            let geometry = load_geometry(&round.round, round.sub_type)?;
            let options = handicap_options(&options, config);
            let found = handicap::handicap_for_score(&geometry, score, &options)?;
            println!("{}", found);
        }
        Commands::Table { round, options } => {
            let geometry = load_geometry(&round.round, round.sub_type)?;
            let options = handicap_options(&options, config);
            let table = handicap::handicap_table(&geometry, &options)?;
            println!("{}", output::format_handicap_table(&table, use_colors));
        }
        Commands::Pad {
            arrows,
            round: round_name,
            sub_type,
            end_size,
            golds,
            format,
        } => {
            let arrows = round::parse_arrows(&arrows)?;
            let geometry = round_name
                .as_deref()
                .map(|name| load_geometry(name, sub_type))
                .transpose()?;
            let golds_type = golds
                .map(GoldsType::from)
                .or(config.golds_type)
                .unwrap_or_else(|| match &geometry {
                    Some(g) => GoldsType::default_for(g.profile()),
                    None => GoldsType::Tens,
                });
            let end_size = end_size.unwrap_or_else(|| config.end_size());

            let rows = build_score_pad(geometry.as_ref(), &arrows, end_size, golds_type)?;
            match format {
                FormatArg::Text => {
                    println!("{}", output::format_score_pad(&rows, golds_type, use_colors))
                }
                FormatArg::Csv => println!("{}", output::format_score_pad_csv(&rows)),
                FormatArg::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&rows).context("Failed to serialize score pad")?
                ),
            }
        }
        Commands::Init { force } => {
            let path = match config_path {
                Some(path) => path,
                None => config::get_config_path()?,
            };
            config::write_default_config(&path, force)?;
            println!("Config written to {}", path.display());
        }
    }

    Ok(())
}

fn find_definition(name: &str) -> Result<RoundDefinition> {
    round::find_round(name).with_context(|| {
        format!(
            "Unknown round '{}'. Run `archery-scorer rounds` to list them",
            name
        )
    })
}

fn load_geometry(name: &str, sub_type: Option<u32>) -> Result<RoundGeometry> {
    let definition = find_definition(name)?;
    Ok(definition.geometry(sub_type)?)
}

fn handicap_options(args: &HandicapArgs, config: &Config) -> HandicapOptions {
    HandicapOptions {
        system: args
            .system
            .map(HandicapSystem::from)
            .unwrap_or_else(|| config.handicap_system()),
        inner_ten_archer: args.inner_ten || config.inner_ten_archer(),
        arrows_limit: args.arrows,
    }
}
