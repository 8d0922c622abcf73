use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

mod report;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Planar subdivision runner: build, split, classify, report")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Classify site records into the faces of a split polygon and write the
    /// per-face report
    Report {
        /// Site records: csv with columns id, postcode, population, contact, x, y
        #[arg(long)]
        sites: PathBuf,
        /// Polygon outline: whitespace-separated `x y` pairs, clockwise
        #[arg(long)]
        polygon: PathBuf,
        /// Face splits: one `e1 e2` edge-id pair per line, applied in order
        #[arg(long)]
        splits: Option<PathBuf>,
        /// Report output path
        #[arg(long)]
        out: PathBuf,
        /// Also write a machine-readable JSON summary
        #[arg(long)]
        summary: Option<PathBuf>,
        /// Check structural invariants after the build and after every split
        #[arg(long)]
        check: bool,
    },
    /// Print the mesh dump after applying the splits
    Inspect {
        #[arg(long)]
        polygon: PathBuf,
        #[arg(long)]
        splits: Option<PathBuf>,
        #[arg(long)]
        check: bool,
    },
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Report {
            sites,
            polygon,
            splits,
            out,
            summary,
            check,
        } => report::run_report(
            &sites,
            &polygon,
            splits.as_deref(),
            &out,
            summary.as_deref(),
            check,
        ),
        Action::Inspect {
            polygon,
            splits,
            check,
        } => report::run_inspect(&polygon, splits.as_deref(), check),
    }
}
