use std::{path::PathBuf, process};

use clap::Parser;
use convlog::{Changelog, LinkStyle};
use env_logger::{Builder, Env};
use log::{debug, LevelFilter};

#[derive(Parser, Debug)]
#[command(name = "convlog")]
#[command(about = "Generate a changelog from conventional commits", long_about = None)]
struct Cli {
    /// Starting commit hash (excluded from the changelog)
    #[arg(long)]
    since: Option<String>,

    /// Version shown in the release heading (defaults to Unreleased)
    #[arg(long)]
    version: Option<String>,

    /// Output file [default: CHANGELOG.md]
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Continue from the commit recorded in the existing output file
    #[arg(long)]
    auto: bool,

    /// Run git in this directory instead of the current one
    #[arg(short = 'C', long = "repo", value_name = "DIR")]
    repo: Option<PathBuf>,

    /// Path to config file (defaults to .convlog.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base URL used to turn commit hashes into links
    #[arg(long)]
    repository: Option<String>,

    /// How commit links are built: github, gitlab, stash, cgit or gitweb
    #[arg(long)]
    link_style: Option<LinkStyle>,

    /// Show what is going on
    #[arg(short, long)]
    verbose: bool,
}

fn init_log(level: LevelFilter) {
    let _ = Builder::from_env(Env::default().default_filter_or(level.as_str()))
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}

fn build(cli: &Cli) -> convlog::error::Result<Changelog> {
    let mut changelog = match cli.config {
        Some(ref cfg) => Changelog::from_file(cfg)?,
        None => Changelog::from_default_file()?,
    };

    if let Some(ref output) = cli.output {
        changelog = changelog.outfile(output);
    }
    if let Some(ref since) = cli.since {
        changelog = changelog.since(since);
    }
    if let Some(ref version) = cli.version {
        changelog = changelog.version(version);
    }
    if let Some(ref dir) = cli.repo {
        changelog = changelog.git_work_tree(dir);
    }
    if let Some(ref repo) = cli.repository {
        changelog = changelog.repository(repo);
    }
    if let Some(style) = cli.link_style {
        changelog = changelog.link_style(style);
    }

    Ok(changelog)
}

fn main() {
    let cli = Cli::parse();
    init_log(if cli.verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    });
    debug!("{cli:?}");

    let mut changelog = match build(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("❌ {e}");
            process::exit(1);
        }
    };

    if cli.auto {
        if let Some(hash) = changelog.resume() {
            println!("🔍 Auto-detected last processed commit: {hash}");
        }
    }

    println!("📝 Getting git commits...");
    let commits = match changelog.try_get_commits() {
        Ok(commits) => commits,
        Err(e) => {
            println!("❌ Failed to get git commits: {e}");
            vec![]
        }
    };
    if commits.is_empty() {
        println!("ℹ️  No new commits found");
        return;
    }
    println!("📊 Found {} new commits", commits.len());

    println!("🔄 Generating changelog...");
    let sm = changelog.section_map(commits);
    if let Err(e) = changelog.write_section_map(&sm) {
        println!("❌ Failed to write file {}: {e}", changelog.outfile.display());
        process::exit(1);
    }
    println!("✅ Changelog generated: {}", changelog.outfile.display());

    if let Some(latest) = changelog.latest_hash() {
        println!("📌 Latest commit: {latest}");
        println!("💡 Next usage: {} --since {latest}", env!("CARGO_PKG_NAME"));
    }
}
