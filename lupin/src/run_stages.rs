use clap::{Args, Parser};
use lupin::adjacency::soft_threshold_adjacency;
use lupin::correlation::pearson_correlation;
use lupin::dissimilarity::tom_dissimilarity;
use lupin::network_common::*;
use lupin::network_io::*;
use lupin::progress::{BarProgress, LogProgress, ProgressReporter};
use lupin::tom::{connectivity, TomEngine};

/// Where and how to write output matrices
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    #[arg(
        long,
        short,
        required = true,
        help = "Output file prefix",
        long_help = "Output file prefix.\n\
                     Generates: {out}.{stage}.csv (or {out}.{stage}.csv.gz with --gzip)\n\
                     and {out}.{stage}.tsv[.gz] with a tab delimiter"
    )]
    pub out: Box<str>,

    #[arg(
        short = 'd',
        long,
        default_value = ",",
        help = "Output delimiter (`tab` or `\\t` for tabs)",
        long_help = "Output delimiter (`tab` or `\\t` for tabs).\n\
                     Input delimiters follow the file extension: tab for .tsv/.txt, comma otherwise"
    )]
    pub delim: Box<str>,

    #[arg(long, default_value_t = false, help = "Gzip output files")]
    pub gzip: bool,

    #[arg(
        long,
        default_value_t = DEFAULT_PRECISION,
        help = "Number of decimals written for every value"
    )]
    pub precision: usize,
}

impl OutputArgs {
    pub fn delim(&self) -> &str {
        match &*self.delim {
            "tab" | "\\t" => "\t",
            d => d,
        }
    }

    /// `{out}.{stage}.csv[.gz]`, or `.tsv` for tab-delimited output
    pub fn file(&self, stage: &str) -> Box<str> {
        let ext = if self.delim() == "\t" { "tsv" } else { "csv" };
        let gz = if self.gzip { ".gz" } else { "" };
        format!("{}.{}.{}{}", self.out, stage, ext, gz).into_boxed_str()
    }

    pub fn write(&self, stage: &str, gm: &GeneMatrix) -> anyhow::Result<()> {
        anyhow::ensure!(!self.delim().is_empty(), "empty output delimiter");
        gm.write(&self.file(stage), self.delim(), self.precision)
    }
}

#[derive(Args, Debug, Clone)]
pub struct ThresholdArgs {
    #[arg(
        short = 'b',
        long,
        default_value_t = DEFAULT_BETA,
        help = "Soft-threshold power β (> 0)"
    )]
    pub beta: f64,

    #[arg(
        short = 't',
        long,
        value_enum,
        default_value_t = NetworkType::Signed,
        help = "Network type",
        long_help = "Network type.\n\
                     signed: ((1 + cor) / 2)^β, diagonal 0\n\
                     unsigned: |cor|^β, diagonal 1\n\
                     signed-hybrid: cor^β for cor > 0 else 0, diagonal 1"
    )]
    pub network_type: NetworkType,
}

#[derive(Args, Debug, Clone)]
pub struct WorkerArgs {
    #[arg(
        short = 'w',
        long,
        help = "Number of TOM workers (default: number of logical CPUs)"
    )]
    pub num_workers: Option<usize>,

    #[arg(long, default_value_t = false, help = "Show a progress bar for TOM")]
    pub progress_bar: bool,
}

impl WorkerArgs {
    pub fn engine(&self) -> anyhow::Result<TomEngine> {
        match self.num_workers {
            Some(w) => TomEngine::new(w),
            None => Ok(TomEngine::with_available_parallelism()),
        }
    }

    pub fn reporter(&self) -> anyhow::Result<Box<dyn ProgressReporter>> {
        if self.progress_bar {
            Ok(Box::new(BarProgress::new("TOM")?))
        } else {
            Ok(Box::new(LogProgress::new("TOM")))
        }
    }
}

/// Inputs are trusted to be symmetric; flag the ones that are not
pub fn warn_if_asymmetric(gm: &GeneMatrix, what: &str) {
    let asym = gm.mat.max_asymmetry();
    if asym > 1e-8 {
        warn!("{} is not symmetric (max |M[i,j] - M[j,i]| = {:e})", what, asym);
    }
}

pub fn run_tom_stage(
    adj: &GeneMatrix,
    workers: &WorkerArgs,
    output: &OutputArgs,
    write_k: bool,
) -> anyhow::Result<GeneMatrix> {
    let engine = workers.engine()?;
    info!("TOM with {} workers", engine.num_workers());
    let mut reporter = workers.reporter()?;
    let tom = engine.compute(&adj.mat, reporter.as_mut())?;

    if write_k {
        let kk = connectivity(&adj.mat)?;
        let file = format!("{}.connectivity.tsv", output.out);
        write_connectivity(&file, &adj.genes, &kk, "\t", output.precision)?;
    }

    GeneMatrix::new(adj.genes.clone(), tom)
}

#[derive(Parser, Debug, Clone)]
pub struct CorrelationArgs {
    #[arg(
        short = 'e',
        long,
        required = true,
        help = "Gene x sample expression matrix (.csv or .tsv, optionally .gz)"
    )]
    pub expression: Box<str>,

    #[command(flatten)]
    pub output: OutputArgs,
}

pub fn run_correlation(args: &CorrelationArgs) -> anyhow::Result<()> {
    let expr = ExpressionMatrix::read(&args.expression, delim_of(&args.expression))?;
    let corr = GeneMatrix::new(expr.genes, pearson_correlation(&expr.mat)?)?;
    args.output.write("correlation", &corr)
}

#[derive(Parser, Debug, Clone)]
pub struct AdjacencyArgs {
    #[arg(
        short = 'c',
        long,
        required = true,
        help = "Gene x gene correlation matrix"
    )]
    pub correlation: Box<str>,

    #[command(flatten)]
    pub threshold: ThresholdArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

pub fn run_adjacency(args: &AdjacencyArgs) -> anyhow::Result<()> {
    let corr = GeneMatrix::read(&args.correlation, delim_of(&args.correlation))?;
    warn_if_asymmetric(&corr, "correlation matrix");
    let ThresholdArgs { beta, network_type } = args.threshold;
    let adj = soft_threshold_adjacency(&corr.mat, beta, network_type)?;
    args.output
        .write("adjacency", &GeneMatrix::new(corr.genes, adj)?)
}

#[derive(Parser, Debug, Clone)]
pub struct TomArgs {
    #[arg(
        short = 'a',
        long,
        required = true,
        help = "Gene x gene adjacency matrix"
    )]
    pub adjacency: Box<str>,

    #[command(flatten)]
    pub workers: WorkerArgs,

    #[arg(long, default_value_t = false, help = "Also write {out}.connectivity.tsv")]
    pub connectivity: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

pub fn run_tom(args: &TomArgs) -> anyhow::Result<()> {
    let adj = GeneMatrix::read(&args.adjacency, delim_of(&args.adjacency))?;
    warn_if_asymmetric(&adj, "adjacency matrix");
    let tom = run_tom_stage(&adj, &args.workers, &args.output, args.connectivity)?;
    args.output.write("tom", &tom)
}

#[derive(Parser, Debug, Clone)]
pub struct DissimilarityArgs {
    #[arg(
        short = 'm',
        long,
        required = true,
        help = "Gene x gene topological overlap matrix"
    )]
    pub tom: Box<str>,

    #[command(flatten)]
    pub output: OutputArgs,
}

pub fn run_dissimilarity(args: &DissimilarityArgs) -> anyhow::Result<()> {
    let tom = GeneMatrix::read(&args.tom, delim_of(&args.tom))?;
    let dist = tom_dissimilarity(&tom.mat)?;
    args.output
        .write("dissimilarity", &GeneMatrix::new(tom.genes, dist)?)
}
