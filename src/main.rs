//! mdsummary: list a docs folder inside a section of the root document.
#![allow(clippy::multiple_crate_versions)]

use clap::{ArgAction, Parser};
use mdsummary::fs::TokioFs;
use mdsummary::{config, pipeline, Error};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;

#[derive(Parser)]
#[allow(clippy::struct_excessive_bools)]
#[command(name = "mdsummary", version)]
#[command(about = "Keep a generated list of your docs in a README section", long_about = None)]
#[command(disable_version_flag = true)]
struct Args {
    /// Folder containing the root document
    #[arg(short = 'b', long = "baseFolder", value_name = "PATH", default_value = "./")]
    base_folder: PathBuf,

    /// Folder to scan for documents, relative to the base folder
    #[arg(short = 'd', long = "docsFolder", value_name = "PATH", default_value = "./")]
    docs_folder: PathBuf,

    /// Heading text of the section to manage
    #[arg(short = 's', long = "docsSection", value_name = "NAME")]
    docs_section: Option<String>,

    /// Only match headings of this level (1-6)
    #[arg(
        short = 'l',
        long = "headingLevel",
        value_name = "LEVEL",
        allow_negative_numbers = true
    )]
    heading_level: Option<String>,

    /// Root document file name
    #[arg(short = 'r', long = "rootFile", value_name = "FILE")]
    root_file: Option<String>,

    /// Document extensions to match
    #[arg(long, short = 'e', value_name = "EXT")]
    ext: Vec<String>,

    /// Additional folder names to skip
    #[arg(long, short = 'x', value_name = "NAME")]
    exclude: Vec<String>,

    /// Show the parent folder next to each title
    #[arg(long)]
    folder_in_title: bool,

    /// Print the updated document instead of writing it
    #[arg(long)]
    dry_run: bool,

    /// Print the planned edit as JSON instead of writing it
    #[arg(long, conflicts_with = "dry_run")]
    plan: bool,

    /// Log each stage to stderr
    #[arg(long)]
    verbose: bool,

    /// Print version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    version: Option<bool>,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn build_options(args: Args) -> Result<(config::Options, bool), Error> {
    let mut cfg = config::Config::load(&args.base_folder);

    // Override config with command line args
    if let Some(root_file) = args.root_file {
        cfg.root_file = root_file;
    }
    if !args.ext.is_empty() {
        cfg.file_extensions = args.ext;
    }
    cfg.exclude_folders.extend(args.exclude);
    cfg.folder_in_title |= args.folder_in_title;

    let mut options = config::Options::new(
        args.base_folder,
        args.docs_folder,
        args.docs_section,
        args.heading_level,
        &cfg,
    )?;
    options.dry_run = args.dry_run || args.plan;
    Ok((options, args.plan))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let (options, print_plan) = match build_options(args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let outcome = match pipeline::run(&TokioFs, &options).await {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if print_plan {
        match serde_json::to_string_pretty(&outcome.edit) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else if options.dry_run {
        print!("{}", outcome.content);
    }

    ExitCode::SUCCESS
}
