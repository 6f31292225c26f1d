use anyhow::Result;
use clap::ArgMatches;
use log::LevelFilter;
use std::path::PathBuf;

use sbs_cli::cli::build_cli;
use sbs_cli::select::input::{load_select_config, SelectConfig};
use sbs_cli::select::output::write_selection_output;
use sbs_cli::select::runner::run_selection;
use sbs_cli::util::validate_tsv_or_csv_file;

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("SBS_LOG", "error,sbs=info"))
        .init();

    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("select", sub_m)) => handle_select(sub_m),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn handle_select(matches: &ArgMatches) -> Result<()> {
    let Some(data_path) = matches.get_one::<String>("data") else {
        anyhow::bail!("No input data provided");
    };
    validate_tsv_or_csv_file(data_path)?;
    eprintln!("[sbs::select] Selecting features from: {}", data_path);

    let mut config = if let Some(config_path) = matches.get_one::<PathBuf>("config") {
        eprintln!("[sbs::select] Using config: {:?}", config_path);
        load_select_config(config_path)?
    } else {
        eprintln!("[sbs::select] No config provided; using defaults.");
        SelectConfig::default()
    };
    config.apply_overrides(matches)?;

    if matches.get_one::<PathBuf>("config").is_none() {
        let default_json = serde_json::to_string_pretty(&config).unwrap_or_default();
        eprintln!("[sbs::select] Effective config:\n{}", default_json);
    }

    let outcome = match run_selection(data_path, &config) {
        Ok(outcome) => outcome,
        Err(e) => {
            log::error!("Selection failed: {:#}", e);
            std::process::exit(1)
        }
    };

    let output_path: Option<&PathBuf> = matches.get_one("output_file");
    write_selection_output(
        &outcome.result,
        &outcome.data,
        output_path.map(PathBuf::as_path),
    )?;
    eprintln!(
        "[sbs::select] Completed selection over {} features ({} levels).",
        outcome.data.n_features(),
        outcome.result.len()
    );
    Ok(())
}
