mod run_network;
mod run_stages;

use run_network::*;
use run_stages::*;

use clap::{Parser, Subcommand};
use log::info;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "LUPIN",
    long_about = "Linked Units of co-expressed genes: weighted gene co-expression networks.\n\
		  Soft-threshold a gene x gene correlation matrix into an adjacency matrix,\n\
		  compute the topological overlap matrix (TOM) and the dissimilarity\n\
		  1 - TOM for hierarchical clustering."
)]
struct Cli {
    #[arg(short = 'v', long, global = true, help = "Log progress (RUST_LOG=info)")]
    verbose: bool,

    #[command(subcommand)]
    commands: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Build the whole network from expression or correlation",
        long_about = "Run every stage in order: \n\
		      (1) Pearson correlation (if an expression matrix is given)\n\
		      (2) Soft-thresholded adjacency\n\
		      (3) Topological overlap matrix (TOM)\n\
		      (4) Dissimilarity 1 - TOM\n"
    )]
    Network(NetworkArgs),

    /// Pearson correlation between genes of a gene x sample matrix
    Correlation(CorrelationArgs),

    /// Soft-thresholded adjacency from a correlation matrix
    Adjacency(AdjacencyArgs),

    /// Topological overlap matrix from an adjacency matrix
    #[command(visible_alias = "tom")]
    TopologicalOverlap(TomArgs),

    /// Dissimilarity 1 - TOM
    #[command(visible_alias = "dist")]
    Dissimilarity(DissimilarityArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    match &cli.commands {
        Commands::Network(args) => {
            run_network(args)?;
        }
        Commands::Correlation(args) => {
            run_correlation(args)?;
        }
        Commands::Adjacency(args) => {
            run_adjacency(args)?;
        }
        Commands::TopologicalOverlap(args) => {
            run_tom(args)?;
        }
        Commands::Dissimilarity(args) => {
            run_dissimilarity(args)?;
        }
    }

    info!("Done");
    Ok(())
}
