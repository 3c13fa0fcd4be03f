use anyhow::Result;
use branchdiff::VcsKind;
use branchdiff::areas::open_vcs;
use branchdiff::areas::repository::Repository;
use branchdiff::artifacts::branch::branch_name::BranchName;
use branchdiff::artifacts::core::PagerWriter;
use branchdiff::artifacts::diff::unified::DEFAULT_CONTEXT;
use branchdiff::artifacts::locator::dotted_path::DottedPath;
use branchdiff::commands::branch_diff::BranchDiffOptions;
use clap::Parser;
use is_terminal::IsTerminal;
use log::LevelFilter;
use minus::Pager;
use std::path::PathBuf;

const LOG_ENV: &str = "BRANCHDIFF_LOG";
const FALLBACK_LOG_ENV: &str = "RUST_LOG";
const NO_PAGER_ENV: &str = "NO_PAGER";

#[derive(Parser)]
#[command(
    name = "branchdiff",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "Diff a function or class across branch copies of a file",
    long_about = "Finds a def or class block in a Python source file by its dotted name \
    (e.g. Class.method) and shows how the same block differs in each branch, \
    the trunk or any other copy of the file, one unified diff per copy.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[arg(index = 1, help = "The working file holding the base block")]
    file: PathBuf,
    #[arg(index = 2, help = "Dotted name of the block, e.g. Class.method")]
    block: DottedPath,
    #[arg(
        short,
        long,
        value_name = "LIST",
        help = "Comma-separated branches to compare with (default: all branches)"
    )]
    branches: Option<String>,
    #[arg(short = 'a', long = "ann", help = "Diff annotation (blame) lines instead of code")]
    annotate: bool,
    #[arg(short, long, help = "Also compare with the trunk or default branch")]
    trunk: bool,
    #[arg(
        short,
        long,
        value_name = "LIST",
        help = "Comma-separated extra targets (URLs or rev:path specs)"
    )]
    others: Option<String>,
    #[arg(long, value_enum, help = "Version-control system (default: auto-detect)")]
    vcs: Option<VcsKind>,
    #[arg(short = 'U', long, default_value_t = DEFAULT_CONTEXT, help = "Lines of context")]
    context: usize,
    #[arg(short, long, action = clap::ArgAction::Count, help = "Raise the log level")]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    let filter_env = if std::env::var_os(LOG_ENV).is_none()
        && std::env::var_os(FALLBACK_LOG_ENV).is_some()
    {
        FALLBACK_LOG_ENV
    } else {
        LOG_ENV
    };

    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_env(env_logger::Env::new().filter(filter_env))
        .target(env_logger::Target::Stderr)
        .try_init();
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let branches = cli
        .branches
        .as_deref()
        .map(BranchName::try_parse_list)
        .transpose()?;
    let others = cli.others.as_deref().map(split_list).unwrap_or_default();

    let options = BranchDiffOptions::new(
        cli.file.clone(),
        cli.block.clone(),
        branches,
        cli.trunk,
        others,
        cli.annotate,
    )
    .with_context(cli.context);

    let pwd = std::env::current_dir()?;
    let vcs = open_vcs(cli.vcs, &cli.file)?;
    let use_pager = std::io::stdout().is_terminal() && std::env::var_os(NO_PAGER_ENV).is_none();

    if use_pager {
        let pager = Pager::new();
        let repository = Repository::new(&pwd, Box::new(PagerWriter::new(pager.clone())), vcs)?;

        repository.branch_diff(&options)?;
        minus::page_all(pager)?;
    } else {
        if !std::io::stdout().is_terminal() {
            colored::control::set_override(false);
        }
        let repository = Repository::new(&pwd, Box::new(std::io::stdout()), vcs)?;

        repository.branch_diff(&options)?;
    }

    Ok(())
}
