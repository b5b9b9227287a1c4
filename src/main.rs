use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;

use zfs_list_tui::dump::{render_json, render_text};
use zfs_list_tui::listing::{self, ListRequest, ZfsCommand};
use zfs_list_tui::logging::{LogLevel, init_file_logging};
use zfs_list_tui::model::{ColumnSpec, DEFAULT_COLUMNS, Property};
use zfs_list_tui::settings::default_settings_path;
use zfs_list_tui::sort::{SortState, sort_tree};
use zfs_list_tui::tree::DatasetTree;
use zfs_list_tui::tui::{self, TuiRunOptions};

#[derive(Parser)]
#[command(name = "zfs-list-tui")]
#[command(about = "Browse ZFS filesystems and their snapshots", long_about = None)]
struct Cli {
    /// Properties to show, comma separated (same names and aliases as `zfs list -o`)
    #[arg(short = 'o', value_name = "PROPERTY[,...]", default_value = DEFAULT_COLUMNS)]
    properties: String,

    /// Only list this filesystem and its descendants
    filesystem: Option<String>,

    /// zfs binary to run
    #[arg(long, value_name = "PATH", default_value = "zfs")]
    zfs: PathBuf,

    /// Settings file (defaults to ~/.config/zfs-list-tui.json)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Sort by this property initially
    #[arg(long, value_name = "PROPERTY")]
    sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    reverse: bool,

    /// Print the tree and exit instead of starting the viewer
    #[arg(long)]
    dump: bool,

    /// With --dump, emit JSON
    #[arg(long, requires = "dump")]
    json: bool,

    /// Write logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "warn")]
    log_level: LogLevel,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        init_file_logging(cli.log_level, path)?;
    }

    let columns = ColumnSpec::parse(&cli.properties).context("parse -o property list")?;
    let request = ListRequest::new(columns.clone(), cli.filesystem.clone());
    let source = ZfsCommand::new(&cli.zfs);
    let sort = initial_sort(&columns, cli.sort.as_deref(), cli.reverse)?;

    let listing = listing::fetch(&source, &request).context("zfs list failed")?;

    if cli.dump {
        let malformed = listing.malformed.len();
        let (mut tree, report) = DatasetTree::build(listing.records);
        sort_tree(&mut tree, &sort, &columns);
        if cli.json {
            println!("{}", render_json(&tree, &columns)?);
        } else {
            print!("{}", render_text(&tree, &columns));
        }
        if malformed > 0 {
            eprintln!("warning: skipped {} malformed rows", malformed);
        }
        if !report.bookmarks.is_empty() {
            eprintln!("note: {} bookmarks not shown", report.bookmarks.len());
        }
        for name in &report.orphans {
            eprintln!("warning: dropped snapshot without a listed filesystem: {}", name);
        }
        return Ok(());
    }

    let settings_path = match cli.config {
        Some(path) => Some(path),
        None => match default_settings_path() {
            Ok(path) => Some(path),
            Err(err) => {
                tracing::warn!("settings disabled: {:#}", err);
                None
            }
        },
    };

    tui::run_with_options(TuiRunOptions {
        source: Box::new(source),
        request,
        initial: listing,
        sort,
        settings_path,
    })
}

fn initial_sort(columns: &ColumnSpec, sort: Option<&str>, reverse: bool) -> Result<SortState> {
    let mut state = SortState::default();
    let Some(name) = sort else {
        return Ok(state);
    };
    let prop: Property = name
        .parse()
        .with_context(|| format!("parse --sort {}", name))?;
    let idx = columns
        .columns()
        .iter()
        .position(|p| *p == prop)
        .ok_or_else(|| anyhow!("--sort {} is not one of the displayed columns", prop))?;
    state.click(idx);
    if reverse {
        state.click(idx);
    }
    Ok(state)
}
