use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use untp_credential::{CredentialClassifier, CredentialType, FeatureTypePolicy};
use untp_migrate::{
    extract_features, load_document, migrate_file, to_pretty_json, write_json_atomic,
    MigrationOptions, Migrator,
};
use untp_transform::MigrationTarget;

mod logging;

fn cli() -> Command {
    let first_wins = Arg::new("first-wins")
        .long("first-wins")
        .action(ArgAction::SetTrue)
        .help("Settle a feature's credential type on its first classified component");

    Command::new("untp-migrate")
        .version(untp_migrate::VERSION)
        .about("Migrate UNTP app-config documents between schema versions")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Debug logging when RUST_LOG is unset"),
        )
        .subcommand(
            Command::new("migrate")
                .about("Migrate a configuration document")
                .arg(
                    Arg::new("input")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Source document"),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .required_unless_present("dry-run")
                        .value_parser(value_parser!(PathBuf))
                        .help("Destination document"),
                )
                .arg(
                    Arg::new("target")
                        .long("target")
                        .value_parser(value_parser!(PathBuf))
                        .help("Target profile (TOML); built-in 0.6.0 profile by default"),
                )
                .arg(first_wins.clone())
                .arg(
                    Arg::new("service-prefix")
                        .long("service-prefix")
                        .action(ArgAction::Append)
                        .help("In-scope service-name prefix (repeatable, default: process)"),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .action(ArgAction::SetTrue)
                        .help("Migrate in memory and print the report; write nothing"),
                )
                .arg(
                    Arg::new("report")
                        .long("report")
                        .value_parser(value_parser!(PathBuf))
                        .help("Also write the report as JSON"),
                ),
        )
        .subcommand(
            Command::new("extract")
                .about("Extract the features of one credential type")
                .arg(
                    Arg::new("input")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Source document"),
                )
                .arg(
                    Arg::new("credential")
                        .long("credential")
                        .short('c')
                        .required(true)
                        .value_parser(value_parser!(CredentialType))
                        .help("Credential type: DFR, DTE, DPP, DCC or DIA"),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Destination JSON array"),
                )
                .arg(first_wins),
        )
        .subcommand(
            Command::new("classify")
                .about("Show each feature's credential type")
                .arg(
                    Arg::new("input")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Source document"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
}

fn main() -> ExitCode {
    let matches = cli().get_matches();
    logging::setup_tracing(matches.get_flag("verbose"));

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("migrate", args)) => migrate(args),
        Some(("extract", args)) => extract(args),
        Some(("classify", args)) => classify(args),
        _ => Ok(()),
    }
}

fn path_arg<'a>(args: &'a ArgMatches, name: &str) -> Result<&'a Path> {
    args.get_one::<PathBuf>(name)
        .map(PathBuf::as_path)
        .with_context(|| format!("missing --{name}"))
}

fn feature_type_policy(args: &ArgMatches) -> FeatureTypePolicy {
    if args.get_flag("first-wins") {
        FeatureTypePolicy::FirstWins
    } else {
        FeatureTypePolicy::LastWins
    }
}

fn migrate(args: &ArgMatches) -> Result<()> {
    let input = path_arg(args, "input")?;
    let target = match args.get_one::<PathBuf>("target") {
        Some(profile) => MigrationTarget::load(profile)
            .with_context(|| format!("loading target profile {}", profile.display()))?,
        None => MigrationTarget::v0_6_0(),
    };
    let prefixes = args
        .get_many::<String>("service-prefix")
        .into_iter()
        .flatten()
        .cloned();
    let options = MigrationOptions::default()
        .with_service_prefixes(prefixes)
        .with_feature_type_policy(feature_type_policy(args));
    let migrator = Migrator::new(&target).with_options(options);

    let dry_run = args.get_flag("dry-run");
    let output = if dry_run {
        None
    } else {
        Some(path_arg(args, "output")?)
    };
    let report = migrate_file(&migrator, input, output)
        .with_context(|| format!("migrating {}", input.display()))?;

    if let Some(path) = args.get_one::<PathBuf>("report") {
        write_json_atomic(path, &report)
            .with_context(|| format!("writing report {}", path.display()))?;
    }
    println!("{report}");
    Ok(())
}

fn extract(args: &ArgMatches) -> Result<()> {
    let input = path_arg(args, "input")?;
    let output = path_arg(args, "output")?;
    let credential_type = *args
        .get_one::<CredentialType>("credential")
        .context("missing --credential")?;

    let document = load_document(input)?;
    let features = extract_features(
        &document,
        credential_type,
        &CredentialClassifier::with_defaults(),
        feature_type_policy(args),
    )
    .with_context(|| format!("extracting {credential_type} features from {}", input.display()))?;
    write_json_atomic(output, &features)
        .with_context(|| format!("writing {}", output.display()))?;

    println!("Extracted {} {credential_type} feature(s) to {}", features.len(), output.display());
    Ok(())
}

fn classify(args: &ArgMatches) -> Result<()> {
    let input = path_arg(args, "input")?;
    let document = load_document(input)?;
    let classified = Migrator::new(&MigrationTarget::v0_6_0())
        .classify(&document)
        .with_context(|| format!("classifying {}", input.display()))?;

    if args.get_flag("json") {
        let entries: Vec<_> = classified
            .iter()
            .map(|(location, classification)| {
                json!({
                    "location": location,
                    "credential_type": classification.credential_type,
                    "skipped_components": classification
                        .skipped
                        .iter()
                        .map(|(index, _)| index)
                        .collect::<Vec<_>>(),
                })
            })
            .collect();
        println!("{}", to_pretty_json(&entries)?);
        return Ok(());
    }

    for (location, classification) in &classified {
        match classification.credential_type {
            Some(credential_type) => println!("{location}: {credential_type}"),
            None => println!("{location}: none"),
        }
        for (index, err) in &classification.skipped {
            println!("  component {index} skipped: {err}");
        }
    }
    Ok(())
}
