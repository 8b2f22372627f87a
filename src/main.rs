use std::env;
use std::fmt;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tablegrid::backend::{BackendEvent, HeadlessBackend};
use tablegrid::layout::snapshot::GridSnapshot;
use tablegrid::layout::{GridLayout, LayoutElement, Options, TableItem, TableRow};
use tablegrid_config::Config;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "tablegrid=info";

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the config file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Sub,
}

#[derive(Subcommand)]
enum Sub {
    /// Parse the config file and report errors.
    Validate,
    /// Build sample tables on a headless backend and print them.
    Demo {
        /// Keep the auto-sized element centered.
        #[arg(long)]
        centered: bool,
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

/// Element of the demo tables, identified by its name.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
struct Label(&'static str);

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl LayoutElement for Label {
    type Id = Label;

    fn id(&self) -> &Label {
        self
    }
}

type DemoLayout = GridLayout<Label, HeadlessBackend<Label>>;

#[derive(Serialize)]
struct Report<'a> {
    name: &'static str,
    grid: GridSnapshot,
    events: &'a [BackendEvent<Label>],
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    };

    let filter = env::var("RUST_LOG")
        .ok()
        .or_else(|| {
            let config = config.as_ref().ok()?;
            config.debug.log_filter.clone()
        })
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::builder().parse_lossy(filter))
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(config) => config,
        Err(err) => {
            // Debug formatting renders the full miette report.
            eprintln!("{err:?}");
            return Err(anyhow!("invalid config"));
        }
    };

    match cli.command {
        Sub::Validate => {
            match &cli.config {
                Some(path) => info!("config is valid: {path:?}"),
                None => warn!("no config file given, the defaults are valid"),
            }
            Ok(())
        }
        Sub::Demo { centered, json } => demo(&config, centered, json),
    }
}

fn demo(config: &Config, centered: bool, json: bool) -> anyhow::Result<()> {
    let options = Rc::new(Options::from_config(config));

    let rows = [
        Some(TableRow::new([
            Some(TableItem::new(Label("A"))),
            Some(TableItem::new(Label("B"))),
        ])),
        Some(TableRow::new([Some(TableItem::new(Label("C"))), None])),
        None,
    ];
    let rows = DemoLayout::from_rows_with_options(rows, HeadlessBackend::new(), options.clone())
        .context("error building the rows table")?;

    let auto_sized = DemoLayout::auto_sized(
        Label("D"),
        Some(options.padding),
        centered,
        HeadlessBackend::new(),
    );

    let reports = [
        Report {
            name: "rows",
            grid: GridSnapshot::capture(&rows),
            events: rows.backend().events(),
        },
        Report {
            name: "auto-sized",
            grid: GridSnapshot::capture(&auto_sized),
            events: auto_sized.backend().events(),
        },
    ];

    if json {
        let json = serde_json::to_string_pretty(&reports).context("error serializing")?;
        println!("{json}");
        return Ok(());
    }

    for report in &reports {
        println!("# {}\n{}\n", report.name, report.grid);
        for event in report.events {
            let event = serde_json::to_string(event).context("error serializing")?;
            println!("{event}");
        }
        println!();
    }

    Ok(())
}
