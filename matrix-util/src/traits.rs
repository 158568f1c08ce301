use crate::common_io::Delimiter;

/// A matrix together with its row and column names
pub struct MatWithNames<T> {
    pub rows: Vec<Box<str>>,
    pub cols: Vec<Box<str>>,
    pub mat: T,
}

/// Checks and fix-ups for square matrices (correlation, adjacency,
/// topological overlap, ...)
pub trait SquareMatOps {
    type Scalar;

    fn is_square(&self) -> bool;

    /// Return the dimension `n` of an `n x n` matrix, or an error
    /// naming `what` if the matrix is not square
    fn ensure_square(&self, what: &str) -> anyhow::Result<usize>;

    /// `max |M[i,j] - M[j,i]|`
    fn max_asymmetry(&self) -> Self::Scalar;

    fn is_symmetric(&self, tol: Self::Scalar) -> bool;

    /// `M[j,i] = M[i,j]` for all `i < j`
    fn mirror_upper_triangle(&mut self);
}

/// Operations to sample random matrices
pub trait SampleOps {
    type Mat;
    type Scalar;

    /// Sample a matrix from a uniform distribution `U(0,1)`
    fn runif(dd: usize, nn: usize) -> Self::Mat;

    /// Sample `N(0,1)` with a fixed seed, so that the same matrix
    /// comes back on every call
    fn rnorm_seeded(dd: usize, nn: usize, seed: u64) -> Self::Mat;
}

/// Read and write named matrices from and to delimited files
///
/// The layout is a header line `{row_column_name}{delim}{col_1}...`
/// followed by one line per row: the row name and then the values.
pub trait IoOps {
    type Scalar;
    type Mat;

    fn read_names_delim(
        file: &str,
        delim: impl Into<Delimiter>,
    ) -> anyhow::Result<MatWithNames<Self::Mat>>;

    fn from_csv_with_names(csv_file: &str) -> anyhow::Result<MatWithNames<Self::Mat>> {
        Self::read_names_delim(csv_file, ",")
    }

    fn from_tsv_with_names(tsv_file: &str) -> anyhow::Result<MatWithNames<Self::Mat>> {
        Self::read_names_delim(tsv_file, "\t")
    }

    /// * `names` - (row names, column names)
    /// * `row_column_name` - label of the first header cell
    /// * `precision` - number of decimals for every value
    fn write_names_delim(
        &self,
        file: &str,
        names: (&[Box<str>], &[Box<str>]),
        row_column_name: &str,
        delim: &str,
        precision: usize,
    ) -> anyhow::Result<()>;

    fn to_csv_with_names(
        &self,
        csv_file: &str,
        names: (&[Box<str>], &[Box<str>]),
        precision: usize,
    ) -> anyhow::Result<()> {
        self.write_names_delim(csv_file, names, "gene_id", ",", precision)
    }
}
