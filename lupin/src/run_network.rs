use crate::run_stages::*;
use clap::Parser;
use lupin::adjacency::soft_threshold_adjacency;
use lupin::correlation::pearson_correlation;
use lupin::dissimilarity::tom_dissimilarity;
use lupin::network_common::*;
use lupin::network_io::*;
use std::time::Instant;

#[derive(Parser, Debug, Clone)]
pub struct NetworkArgs {
    #[arg(
        short = 'e',
        long,
        conflicts_with = "correlation",
        required_unless_present = "correlation",
        help = "Gene x sample expression matrix (.csv or .tsv, optionally .gz)"
    )]
    pub expression: Option<Box<str>>,

    #[arg(
        short = 'c',
        long,
        help = "Gene x gene correlation matrix, instead of expression"
    )]
    pub correlation: Option<Box<str>>,

    #[command(flatten)]
    pub threshold: ThresholdArgs,

    #[command(flatten)]
    pub workers: WorkerArgs,

    #[arg(long, default_value_t = false, help = "Also write {out}.connectivity.tsv")]
    pub connectivity: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Intermediate matrices are nice to have; losing one is not fatal
fn write_intermediate(output: &OutputArgs, stage: &str, gm: &GeneMatrix) {
    if let Err(e) = output.write(stage, gm) {
        warn!("failed to save the {} matrix: {}", stage, e);
    }
}

pub fn run_network(args: &NetworkArgs) -> anyhow::Result<()> {
    let timer = Instant::now();

    let corr = match (&args.expression, &args.correlation) {
        (Some(expr_file), _) => {
            info!("Phase 1: Pearson correlation of {}", expr_file);
            let expr = ExpressionMatrix::read(expr_file, delim_of(expr_file))?;
            let corr = GeneMatrix::new(expr.genes, pearson_correlation(&expr.mat)?)?;
            write_intermediate(&args.output, "correlation", &corr);
            corr
        }
        (None, Some(corr_file)) => {
            info!("Phase 1: reading correlation matrix {}", corr_file);
            let corr = GeneMatrix::read(corr_file, delim_of(corr_file))?;
            warn_if_asymmetric(&corr, "correlation matrix");
            corr
        }
        (None, None) => {
            return Err(anyhow::anyhow!("need either --expression or --correlation"));
        }
    };

    let ThresholdArgs { beta, network_type } = args.threshold;
    info!(
        "Phase 2: {} adjacency with β = {:.1} ({} genes)",
        network_type,
        beta,
        corr.num_genes()
    );
    let GeneMatrix { genes, mat: corr } = corr;
    let adj = GeneMatrix::new(genes, soft_threshold_adjacency(&corr, beta, network_type)?)?;
    drop(corr);
    write_intermediate(&args.output, "adjacency", &adj);

    info!("Phase 3: topological overlap matrix (TOM)");
    let tom = run_tom_stage(&adj, &args.workers, &args.output, args.connectivity)?;
    drop(adj);
    write_intermediate(&args.output, "tom", &tom);

    info!("Phase 4: dissimilarity (1 - TOM)");
    let GeneMatrix { genes, mat: tom } = tom;
    let dist = GeneMatrix::new(genes, tom_dissimilarity(&tom)?)?;
    args.output.write("dissimilarity", &dist)?;

    info!("Network of {} genes built in {:.2?}", dist.num_genes(), timer.elapsed());
    Ok(())
}
