pub const DEFAULT_BETA: f64 = 6.0;
pub const DEFAULT_PRECISION: usize = 6;
pub const PROGRESS_STEP_PERCENT: usize = 5;

pub type Mat = ndarray::Array2<f64>;
pub type DVec = ndarray::Array1<f64>;

pub use log::{debug, info, warn};
pub use matrix_util::traits::*;
pub use ndarray::prelude::*;
pub use rayon::prelude::*;

/// How correlation signs enter the adjacency
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum NetworkType {
    /// `((1 + cor) / 2)^β`, diagonal 0
    #[default]
    Signed,
    /// `|cor|^β`, diagonal 1
    Unsigned,
    /// `cor^β` if `cor > 0` else 0, diagonal 1
    SignedHybrid,
}

impl NetworkType {
    /// Value placed on the diagonal of the adjacency matrix.
    /// Connectivity never counts it.
    pub fn adjacency_diagonal(&self) -> f64 {
        match self {
            NetworkType::Signed => 0.0,
            NetworkType::Unsigned | NetworkType::SignedHybrid => 1.0,
        }
    }
}

impl std::fmt::Display for NetworkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NetworkType::Signed => "signed",
            NetworkType::Unsigned => "unsigned",
            NetworkType::SignedHybrid => "signed-hybrid",
        };
        write!(f, "{}", name)
    }
}
