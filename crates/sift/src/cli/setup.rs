use clap::{Parser, Subcommand, ValueEnum};
use siftapp::facets::FacetType;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sift",
    bin_name = "sift",
    version,
    disable_help_subcommand = true
)]
#[command(about = "Compose faceted biodiversity filters", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a sift.toml (default: ./sift.toml, then the user config dir)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Facet types as accepted on the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FacetArg {
    Boolean,
    Classification,
    #[value(name = "single_select")]
    SingleSelect,
    #[value(name = "refine_tree")]
    RefineTree,
}

impl From<FacetArg> for FacetType {
    fn from(arg: FacetArg) -> Self {
        match arg {
            FacetArg::Boolean => FacetType::Boolean,
            FacetArg::Classification => FacetType::Classification,
            FacetArg::SingleSelect => FacetType::SingleSelect,
            FacetArg::RefineTree => FacetType::RefineTree,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every facet kind a clause can carry
    #[command(display_order = 1)]
    Kinds,

    /// Print the resolved panel configuration
    #[command(display_order = 2)]
    Config,

    /// Search the configured taxon index
    #[command(display_order = 3)]
    Search {
        /// Free-text query
        query: String,

        #[arg(short, long, value_enum, default_value_t)]
        output: OutputFormat,
    },

    /// Replay a script of facet events and print the resulting clauses and chips
    #[command(display_order = 4)]
    Apply {
        /// JSON script file (reads stdin when absent or "-")
        script: Option<PathBuf>,

        /// Subject the panel is opened for
        #[arg(short, long, default_value = "all")]
        subject: String,

        /// Facet types to enable for this view (default: from config)
        #[arg(short, long, value_enum, value_delimiter = ',')]
        facets: Vec<FacetArg>,

        #[arg(short, long, value_enum, default_value_t)]
        output: OutputFormat,
    },
}
