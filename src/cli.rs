use clap::{Args, Parser, Subcommand};
use seqcover::coverage::{BoundsPolicy, BuildOptions};
use seqcover::feature::SortOrder;
use seqcover::palette::Palette;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(
    name = "seqcover",
    version,
    about = "Paint non-overlapping sequence features and their legend"
)]
pub struct Cli {
    /// Log build details (repeat for trace output).
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the painted sequence and its legend to the terminal.
    Show(ShowArgs),
    /// Write the accepted segments and legend as CSV.
    Export(ExportArgs),
}

#[derive(Debug, Args)]
pub struct InputArgs {
    /// FASTA, FASTQ or plain sequence file, optionally gzipped.
    pub sequence: PathBuf,

    /// CSV/TSV feature table with `start`, `end`, `label` and `type_id` columns.
    pub features: PathBuf,

    /// Id of the sequence record to use (default: the first record).
    #[clap(short, long)]
    pub record: Option<String>,

    /// Built-in palette to color feature types with.
    #[clap(long, value_enum, default_value_t = Palette::Selected)]
    pub palette: Palette,

    /// CSV `type_id,color` table, replaces the built-in palette.
    #[clap(long)]
    pub colors: Option<PathBuf>,

    /// Ordering of features sharing a start position.
    #[clap(long, value_enum, default_value_t = SortOrder::StartThenEnd)]
    pub sort: SortOrder,

    /// Handling of features that reach past the sequence.
    #[clap(long, value_enum, default_value_t = BoundsPolicy::Truncate)]
    pub bounds: BoundsPolicy,
}

impl InputArgs {
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            sort: self.sort,
            bounds: self.bounds,
        }
    }
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    #[clap(flatten)]
    pub input: InputArgs,

    /// Bases per line (default: terminal width).
    #[clap(short, long)]
    pub width: Option<usize>,

    /// Do not print the legend.
    #[clap(long)]
    pub no_legend: bool,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[clap(flatten)]
    pub input: InputArgs,

    /// Path to write the segment CSV to (default: stdout).
    #[clap(short, long)]
    pub output: Option<PathBuf>,

    /// Also write the covered bases as FASTA to this path.
    #[clap(long)]
    pub covered: Option<PathBuf>,
}
