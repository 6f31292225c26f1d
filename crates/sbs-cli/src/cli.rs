use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, ValueHint};

/// The `sbs` command line.
pub fn build_cli() -> Command {
    Command::new("sbs")
        .version(clap::crate_version!())
        .about("Sequential backward feature selection for tabular data")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("select")
                .about("Rank feature subsets by greedily dropping one column at a time")
                .arg(
                    Arg::new("data")
                        .help("Path to the input table (*.csv or *.tsv) with a header row")
                        .required(true)
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("config")
                        .help("Path to a JSON selection configuration file")
                        .required(false)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("target")
                        .short('t')
                        .long("target")
                        .help("Header of the target column. Defaults to the last column.")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("model")
                        .short('m')
                        .long("model")
                        .help("Override the model from the JSON config.")
                        .value_parser(["nearest-centroid", "least-squares", "ridge"])
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("reduced_size")
                        .short('r')
                        .long("reduced-size")
                        .help("Smallest feature count to reduce to (inclusive).")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("direct")
                        .long("direct")
                        .help("Fit and score each subset on all rows instead of cross-validating.")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("folds")
                        .short('k')
                        .long("folds")
                        .help("Number of cross-validation folds.")
                        .value_parser(clap::value_parser!(usize))
                        .conflicts_with("direct"),
                )
                .arg(
                    Arg::new("parallel")
                        .long("parallel")
                        .help("Score the candidates of each level in parallel.")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("output_file")
                        .short('o')
                        .long("output")
                        .help("Where to write the results (*.json, *.csv or *.tsv). Defaults to stdout.")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                ),
        )
}
