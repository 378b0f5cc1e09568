use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Read};
use std::path::PathBuf;

use metabolic_age::config::Config;
use metabolic_age::history::{HistoryEntry, HistoryStore, ResultSink};
use metabolic_age::scoring::{MetabolicAgeResult, UserAnswers};

const EXIT_SUCCESS: i32 = 0;
const EXIT_NETWORK: i32 = 2;
const EXIT_CONFIG: i32 = 4;
const EXIT_INVALID_ANSWERS: i32 = 5;
const EXIT_STORAGE: i32 = 6;

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
    Tsv,
}

#[derive(Subcommand, Debug)]
enum HistoryCommand {
    /// Show averages and answer distributions
    Stats,
    /// Export every stored entry as CSV
    Export {
        /// File or directory to write to (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Delete all stored entries
    Clear,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Answer the questionnaire interactively (default if no subcommand)
    Ask {
        /// Don't store the result or send it to the webhook
        #[arg(long)]
        no_save: bool,
    },
    /// Score answers from a YAML or JSON file ("-" for stdin)
    Score {
        file: String,

        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,

        /// Store the result and send it to the webhook
        #[arg(long)]
        save: bool,
    },
    /// Inspect stored results
    History {
        #[command(subcommand)]
        action: HistoryCommand,
    },
}

#[derive(Parser, Debug)]
#[command(name = "metabolic-age")]
#[command(about = "Estimate your metabolic age from a short lifestyle questionnaire", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/metabolic-age/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn read_answers(file: &str) -> anyhow::Result<UserAnswers> {
    use anyhow::Context;

    let content = if file == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read answers from stdin")?;
        buf
    } else {
        std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read answers from {}", file))?
    };

    serde_saphyr::from_str(&content).with_context(|| format!("Failed to parse answers in {}", file))
}

/// Store the result locally and post it to the webhook, as configured.
/// Returns the exit code to use on failure.
async fn record_result(
    config: &Config,
    answers: &UserAnswers,
    result: &MetabolicAgeResult,
) -> Result<(), i32> {
    if config.history.enabled {
        let mut store = HistoryStore::new(metabolic_age::config::history_path(config));
        if let Err(e) = store.record(answers, result) {
            eprintln!("Failed to save result: {:#}", e);
            return Err(EXIT_STORAGE);
        }
    }

    if let Some(webhook) = &config.webhook {
        let entry = HistoryEntry::new(answers, result, Utc::now());
        let client = match metabolic_age::webhook::WebhookClient::new(webhook) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to create webhook client: {:#}", e);
                return Err(EXIT_NETWORK);
            }
        };
        if let Err(e) = client.submit(&entry).await {
            eprintln!("Failed to submit result: {:#}", e);
            return Err(EXIT_NETWORK);
        }
    }

    Ok(())
}

fn score_or_exit(answers: &UserAnswers) -> MetabolicAgeResult {
    match metabolic_age::scoring::calculate_metabolic_age(answers) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Invalid answers: {}", e);
            std::process::exit(EXIT_INVALID_ANSWERS);
        }
    }
}

fn load_history_or_exit(path: &std::path::Path) -> metabolic_age::history::HistoryState {
    match metabolic_age::history::load_history(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to load history: {:#}", e);
            std::process::exit(EXIT_STORAGE);
        }
    }
}

fn run_history(action: HistoryCommand, config: &Config) -> i32 {
    let path = metabolic_age::config::history_path(config);

    match action {
        HistoryCommand::Stats => {
            let state = load_history_or_exit(&path);
            let stats = metabolic_age::history::compute_stats(&state.entries);
            let use_colors = metabolic_age::output::should_use_colors();
            println!(
                "{}",
                metabolic_age::output::format_stats(stats.as_ref(), use_colors)
            );
        }
        HistoryCommand::Export { output } => {
            let state = load_history_or_exit(&path);
            let csv = metabolic_age::history::to_csv(&state.entries);
            let Some(mut target) = output else {
                println!("{}", csv);
                return EXIT_SUCCESS;
            };
            if target.is_dir() {
                let today = chrono::Local::now().date_naive();
                target = target.join(metabolic_age::history::export_file_name(today));
            }
            if let Err(e) = std::fs::write(&target, csv) {
                eprintln!("Failed to write {}: {}", target.display(), e);
                return EXIT_STORAGE;
            }
            println!(
                "Exported {} entries to {}",
                state.len(),
                target.display()
            );
        }
        HistoryCommand::Clear => {
            if let Err(e) = metabolic_age::history::clear_history(&path) {
                eprintln!("Failed to clear history: {:#}", e);
                return EXIT_STORAGE;
            }
            println!("History cleared.");
        }
    }

    EXIT_SUCCESS
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let command = cli.command.unwrap_or(Commands::Ask { no_save: false });

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match metabolic_age::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = metabolic_age::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    log::debug!(
        "Units: {} / {}, history {}",
        config.units.height,
        config.units.weight,
        if config.history.enabled { "on" } else { "off" }
    );

    let code = match command {
        Commands::Ask { no_save } => {
            let answers = {
                let stdin = io::stdin();
                let mut prompter =
                    metabolic_age::questionnaire::Prompter::new(stdin.lock(), io::stdout());
                match metabolic_age::questionnaire::run_questionnaire(&mut prompter, &config.units)
                {
                    Ok(a) => a,
                    Err(e) => {
                        eprintln!("{:#}", e);
                        std::process::exit(EXIT_INVALID_ANSWERS);
                    }
                }
            };

            let result = score_or_exit(&answers);
            let use_colors = metabolic_age::output::should_use_colors();
            println!();
            println!("{}", metabolic_age::output::format_result(&result, use_colors));

            if no_save {
                EXIT_SUCCESS
            } else {
                match record_result(&config, &answers, &result).await {
                    Ok(()) => EXIT_SUCCESS,
                    Err(code) => code,
                }
            }
        }
        Commands::Score { file, format, save } => {
            let answers = match read_answers(&file) {
                Ok(a) => a,
                Err(e) => {
                    eprintln!("{:#}", e);
                    std::process::exit(EXIT_INVALID_ANSWERS);
                }
            };

            if let Err(errors) = metabolic_age::scoring::validate_answers(&answers) {
                eprintln!("Invalid answers:");
                for error in errors {
                    eprintln!("  - {}", error);
                }
                std::process::exit(EXIT_INVALID_ANSWERS);
            }

            let result = score_or_exit(&answers);
            match format {
                OutputFormat::Text => {
                    let use_colors = metabolic_age::output::should_use_colors();
                    println!("{}", metabolic_age::output::format_result(&result, use_colors));
                }
                OutputFormat::Json => match serde_json::to_string_pretty(&result) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Failed to serialize result: {}", e);
                        std::process::exit(EXIT_INVALID_ANSWERS);
                    }
                },
                OutputFormat::Tsv => println!("{}", metabolic_age::output::format_tsv(&result)),
            }

            if save {
                match record_result(&config, &answers, &result).await {
                    Ok(()) => EXIT_SUCCESS,
                    Err(code) => code,
                }
            } else {
                EXIT_SUCCESS
            }
        }
        Commands::History { action } => run_history(action, &config),
    };

    std::process::exit(code);
}
