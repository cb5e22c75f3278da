use clap::{Args, Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use std::path::PathBuf;

#[derive(Parser)]
#[clap(name = "keggkit", author, version, about, long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Command,
    // Level of verbosity.
    #[clap(flatten)]
    pub verbose: Verbosity<InfoLevel>,
}

/// Options shared by every command that talks to the KEGG REST API.
#[derive(Args, Debug, Clone)]
pub struct KeggArgs {
    /// Base URL of the KEGG REST API
    #[clap(long, default_value = keggkit::client::DEFAULT_BASE_URL)]
    pub base_url: String,

    /// The number of concurrent requests. KEGG limits clients to three requests per second, so keep this low.
    #[clap(short, long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..=16))]
    pub threads: u64,

    /// Milliseconds each worker waits before sending a request
    #[clap(long, default_value_t = 350)]
    pub delay_ms: u64,

    /// Request timeout in seconds
    #[clap(long, default_value_t = 30)]
    pub timeout: u64,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch KEGG records and extract their names, EC numbers and KEGG orthology
    Get {
        /// File with one KEGG identifier per line. May be gzip, bzip, xz, or zstd compressed [default: stdin]
        input: Option<PathBuf>,
        /// Output TSV file path [default: stdout]
        #[clap(short, long)]
        output: Option<PathBuf>,
        /// Write the problems found during the run (failed requests, malformed lines) to this file
        #[clap(long)]
        log: Option<PathBuf>,
        #[clap(flatten)]
        kegg: KeggArgs,
    },

    /// Extract names, EC numbers and KEGG orthology from KEGG flat files
    #[clap(visible_alias = "flat")]
    Parse {
        /// KEGG flat file with one or more records, each ending with `///`. May be gzip, bzip, xz, or zstd compressed [default: stdin]
        input: Option<PathBuf>,
        /// Output TSV file path [default: stdout]
        #[clap(short, long)]
        output: Option<PathBuf>,
        /// Write the problems found while parsing to this file
        #[clap(long)]
        log: Option<PathBuf>,
    },

    /// Look up the KEGG annotation of ModelSEED reactions
    #[clap(visible_alias = "rxn")]
    Reactions {
        /// The model's reactions, one `id<TAB>equation` per line (the equation is optional)
        reactions: PathBuf,
        /// ModelSEED Reactions_Aliases.tsv file
        #[clap(long, group = "reaction_map")]
        aliases: Option<PathBuf>,
        /// Two-column ModelSEED to KEGG reaction mapper file. Conflicts with --aliases
        #[clap(long, conflicts_with = "reaction_map")]
        mapper: Option<PathBuf>,
        /// Add the reaction equation as a final column
        #[clap(long)]
        with_equation: bool,
        /// Output TSV file path [default: stdout]
        #[clap(short, long)]
        output: Option<PathBuf>,
        /// Write the problems found during the run (missing aliases, failed requests, malformed lines) to this file
        #[clap(long)]
        log: Option<PathBuf>,
        #[clap(flatten)]
        kegg: KeggArgs,
    },

    /// Convert identifiers between KEGG and outside databases (e.g. `conv eco ncbi-geneid`)
    Conv {
        /// Target database or organism code
        target: String,
        /// Source database
        source: String,
        /// Output TSV file path [default: stdout]
        #[clap(short, long)]
        output: Option<PathBuf>,
        #[clap(flatten)]
        kegg: KeggArgs,
    },
}
