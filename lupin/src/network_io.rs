use crate::network_common::*;
use matrix_util::common_io::{mkdir, write_lines};

/// A square gene x gene matrix and the gene order shared by its rows
/// and columns
pub struct GeneMatrix {
    pub genes: Vec<Box<str>>,
    pub mat: Mat,
}

impl GeneMatrix {
    pub fn new(genes: Vec<Box<str>>, mat: Mat) -> anyhow::Result<Self> {
        let nn = mat.ensure_square("gene x gene matrix")?;
        anyhow::ensure!(
            genes.len() == nn,
            "{} gene names for a {} x {} matrix",
            genes.len(),
            nn,
            nn
        );
        Ok(Self { genes, mat })
    }

    /// Read a delimited gene x gene table whose header and row names
    /// list the same genes in the same order
    pub fn read(file: &str, delim: &str) -> anyhow::Result<Self> {
        let MatWithNames { rows, cols, mat } = Mat::read_names_delim(file, delim)?;
        anyhow::ensure!(
            rows == cols,
            "{}: row names and column names are not in the same gene order",
            file
        );
        anyhow::ensure!(
            mat.iter().all(|x| x.is_finite()),
            "{}: gene x gene matrix has non-finite values",
            file
        );
        Self::new(rows, mat)
    }

    pub fn write(&self, file: &str, delim: &str, precision: usize) -> anyhow::Result<()> {
        mkdir(file)?;
        self.mat.write_names_delim(
            file,
            (&self.genes, &self.genes),
            "gene_id",
            delim,
            precision,
        )?;
        info!("Wrote {}", file);
        Ok(())
    }

    pub fn num_genes(&self) -> usize {
        self.genes.len()
    }
}

/// A gene x sample expression matrix
pub struct ExpressionMatrix {
    pub genes: Vec<Box<str>>,
    pub mat: Mat,
}

impl ExpressionMatrix {
    pub fn read(file: &str, delim: &str) -> anyhow::Result<Self> {
        let MatWithNames { rows, cols, mat } = Mat::read_names_delim(file, delim)?;
        info!(
            "Read {} genes x {} samples from {}",
            rows.len(),
            cols.len(),
            file
        );
        Ok(Self { genes: rows, mat })
    }
}

/// Write `gene{delim}k` lines with a header
pub fn write_connectivity(
    file: &str,
    genes: &[Box<str>],
    kk: &DVec,
    delim: &str,
    precision: usize,
) -> anyhow::Result<()> {
    anyhow::ensure!(genes.len() == kk.len(), "gene names and connectivity differ");
    mkdir(file)?;
    let mut lines = Vec::with_capacity(genes.len() + 1);
    lines.push(format!("gene_id{}k", delim).into_boxed_str());
    lines.extend(
        genes
            .iter()
            .zip(kk.iter())
            .map(|(g, k)| format!("{}{}{:.*}", g, delim, precision, k).into_boxed_str()),
    );
    write_lines(&lines, file)?;
    info!("Wrote {}", file);
    Ok(())
}

/// Tab for `.tsv`/`.txt` (possibly gzipped), comma otherwise
pub fn delim_of(file: &str) -> &'static str {
    let stem = file.strip_suffix(".gz").unwrap_or(file);
    if stem.ends_with(".tsv") || stem.ends_with(".txt") {
        "\t"
    } else {
        ","
    }
}
