use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::logging;
use tracing::level_filters::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "kmz2csv")]
#[command(version)]
#[command(about = "Extract placemarks from a KMZ archive into CSV", long_about = None)]
#[command(after_help = "Examples:\n  \
  kmz2csv convert trees.kmz -o trees.csv      convert with the built-in style table\n  \
  kmz2csv convert trees.kmz -c styles.toml    use another classification table\n  \
  kmz2csv analyze trees.csv                   per-style summary of a converted file\n  \
  kmz2csv style trees.kmz '#icon-959-009D57'  show one style definition")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Quiet mode (-qq => quieter)
    #[arg(short = 'q', action = clap::ArgAction::Count, global = true)]
    pub quiet: u8,

    /// More log output (-vv => trace)
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert every placemark to a CSV row
    Convert {
        /// KMZ archive
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output CSV path
        #[arg(short = 'o', long, value_name = "CSV", default_value = "fruit_trees.csv")]
        output: PathBuf,

        /// Classification table (TOML); defaults to the built-in survey table
        #[arg(short = 'c', long, value_name = "TOML")]
        classification: Option<PathBuf>,
    },

    /// Summarize a converted CSV by style reference
    Analyze {
        #[arg(value_name = "CSV")]
        csv: PathBuf,
    },

    /// List archive entries
    List {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Show sizes and compression method
        #[arg(short = 'l', long)]
        long: bool,
    },

    /// Print the Folder/Document outline
    Structure {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print a Style or StyleMap definition
    Style {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Style id, with or without the leading '#'
        #[arg(value_name = "ID")]
        id: String,
    },

    /// List tags and ExtendedData fields used by placemarks
    Fields {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Show the first placemark with a LineString geometry
    Linestring {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        logging::level_for(self.quiet, self.verbose)
    }
}
