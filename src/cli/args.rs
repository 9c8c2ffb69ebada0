//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::builder::RangedU64ValueParser;
use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::application::printer::MAX_TUNABLE;

fn tunable_parser() -> RangedU64ValueParser<usize> {
    RangedU64ValueParser::<usize>::new().range(0..=MAX_TUNABLE as u64)
}

/// Column-aligned fixed-point printing of 3D vectors, 3x3 matrices and matrix node chains
#[derive(Parser, Debug)]
#[command(name = "matprint")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output to stderr (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// Digits after the decimal point (overrides config)
    #[arg(short, long, global = true, value_parser = tunable_parser())]
    pub precision: Option<usize>,

    /// Extra spaces before the second and third column (overrides config)
    #[arg(short, long, global = true, value_parser = tunable_parser())]
    pub width_buffer: Option<usize>,

    /// Config file (default: ./.matprint.toml if present)
    #[arg(short, long, global = true, env = "MATPRINT_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a vector
    #[command(allow_negative_numbers = true)]
    Vector {
        x: f64,
        y: f64,
        z: f64,
    },

    /// Print a matrix given column by column (x1 y1 z1 x2 y2 z2 x3 y3 z3)
    #[command(allow_negative_numbers = true)]
    Matrix {
        #[arg(num_args = 9, required = true)]
        values: Vec<f64>,
        /// Transpose before printing
        #[arg(long)]
        transpose: bool,
    },

    /// Dot product of two vectors (x1 y1 z1 x2 y2 z2)
    #[command(allow_negative_numbers = true)]
    Dot {
        #[arg(num_args = 6, required = true)]
        values: Vec<f64>,
    },

    /// Print every vector, matrix and the node chain of a TOML document
    Render {
        /// Document file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Print only the node chain of a TOML document
    Chain {
        /// Document file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Show the chain as an outline instead of matrices
        #[arg(long)]
        outline: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}
