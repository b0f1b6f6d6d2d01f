use anyhow::Result;
use clap::{Arg, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;

use obesity_cli::predict::form::{form_args, record_from_matches};
use obesity_cli::predict::run_predict;
use obesity_cli::train::input::TrainConfig;
use obesity_cli::train::trainer;
use obesity_cli::validate::input::ValidateConfig;
use obesity_cli::validate::runner;

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("OBESITY_LOG", "error,obesity=info"))
        .init();

    let matches = Command::new("obesity")
        .version(clap::crate_version!())
        .about("Obesity level estimation - train, validate and serve survey classifiers")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("train")
                .about("Fit the gradient-boosted classifier and write the artifact bundle")
                .arg(
                    Arg::new("config")
                        .help("Path to training configuration file (JSON)")
                        .required(false)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("data")
                        .short('d')
                        .long("data")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .help(
                            "Path to the survey CSV. Overrides the data file \
                             specified in the configuration file.",
                        )
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("artifacts")
                        .short('o')
                        .long("artifacts")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .help(
                            "Directory the fitted artifacts are written to. \
                             Overrides the directory specified in the configuration file.",
                        )
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .help(
                            "Seed for the hold-out split. Overrides the seed \
                             specified in the configuration file.",
                        )
                        .value_parser(clap::value_parser!(u64)),
                ),
        )
        .subcommand(
            Command::new("validate")
                .about("Cross-validate the Random Forest baseline on the survey data")
                .arg(
                    Arg::new("config")
                        .help("Path to validation configuration file (JSON)")
                        .required(false)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("data")
                        .short('d')
                        .long("data")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .help(
                            "Path to the survey CSV. Overrides the data file \
                             specified in the configuration file.",
                        )
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("folds")
                        .short('k')
                        .long("folds")
                        .help(
                            "Number of cross-validation folds. Overrides the fold \
                             count specified in the configuration file.",
                        )
                        .value_parser(clap::value_parser!(usize)),
                ),
        )
        .subcommand(
            Command::new("predict")
                .about("Estimate the obesity level for one filled-in survey form")
                .arg(
                    Arg::new("artifacts")
                        .short('a')
                        .long("artifacts")
                        .required(true)
                        .help("Directory holding the trained artifact bundle")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .value_hint(ValueHint::DirPath),
                )
                .args(form_args()),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Version {version}\n\n\
             {all-args}{after-help}",
        )
        .get_matches();

    match matches.subcommand() {
        Some(("train", sub_m)) => handle_train(sub_m),
        Some(("validate", sub_m)) => handle_validate(sub_m),
        Some(("predict", sub_m)) => handle_predict(sub_m),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn handle_train(matches: &ArgMatches) -> Result<()> {
    let Some(config_path) = matches.get_one::<PathBuf>("config") else {
        print_template(&TrainConfig::default())?;
        return Ok(());
    };
    log::info!("[Obesity::Train] Training from config: {:?}", config_path);

    let params = TrainConfig::from_arguments(config_path, matches)?;
    match trainer::run_training(&params) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Training failed: {:#}", e);
            std::process::exit(1)
        }
    }
}

fn handle_validate(matches: &ArgMatches) -> Result<()> {
    let Some(config_path) = matches.get_one::<PathBuf>("config") else {
        print_template(&ValidateConfig::default())?;
        return Ok(());
    };
    log::info!("[Obesity::Validate] Validating from config: {:?}", config_path);

    let params = ValidateConfig::from_arguments(config_path, matches)?;
    match runner::run_validation(&params) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Validation failed: {:#}", e);
            std::process::exit(1)
        }
    }
}

fn handle_predict(matches: &ArgMatches) -> Result<()> {
    let artifacts_dir: &String = matches
        .get_one("artifacts")
        .ok_or_else(|| anyhow::anyhow!("--artifacts is required"))?;
    let record = record_from_matches(matches)?;

    match run_predict(artifacts_dir, &record) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Prediction failed: {:#}", e);
            std::process::exit(1)
        }
    }
}

/// Without a config file, emit a filled-in template so the user can pipe
/// it to disk, tweak it and re-run.
fn print_template<T: serde::Serialize>(config: &T) -> Result<()> {
    eprintln!("No config file provided; printing the default configuration.");
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
