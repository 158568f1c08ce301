pub use ndarray::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
pub use rayon::prelude::*;

use crate::traits::*;
use num_traits::{Float, FromPrimitive};

impl<T> SampleOps for ndarray::Array2<T>
where
    T: Float + FromPrimitive + Send,
{
    type Mat = Self;
    type Scalar = T;

    fn runif(dd: usize, nn: usize) -> Self::Mat {
        let rvec: Vec<T> = (0..(dd * nn))
            .into_par_iter()
            .map_init(rand::rng, |rng, _| {
                let x: f64 = rng.random();
                T::from_f64(x).unwrap_or_else(T::zero)
            })
            .collect();

        Array2::from_shape_vec((dd, nn), rvec).expect("dd * nn elements")
    }

    fn rnorm_seeded(dd: usize, nn: usize, seed: u64) -> Self::Mat {
        let mut rng = StdRng::seed_from_u64(seed);
        Array2::from_shape_simple_fn((dd, nn), || {
            let x: f64 = rng.sample(StandardNormal);
            T::from_f64(x).unwrap_or_else(T::zero)
        })
    }
}

impl<T> SquareMatOps for ndarray::Array2<T>
where
    T: Float,
{
    type Scalar = T;

    fn is_square(&self) -> bool {
        self.nrows() == self.ncols()
    }

    fn ensure_square(&self, what: &str) -> anyhow::Result<usize> {
        let (nr, nc) = self.dim();
        if nr != nc {
            return Err(anyhow::anyhow!(
                "{} must be a square matrix, but it is {} x {}",
                what,
                nr,
                nc
            ));
        }
        Ok(nr)
    }

    fn max_asymmetry(&self) -> T {
        let n = self.nrows().min(self.ncols());
        let mut ret = T::zero();
        for i in 0..n {
            for j in (i + 1)..n {
                ret = ret.max((self[(i, j)] - self[(j, i)]).abs());
            }
        }
        ret
    }

    fn is_symmetric(&self, tol: T) -> bool {
        self.is_square() && self.max_asymmetry() <= tol
    }

    fn mirror_upper_triangle(&mut self) {
        let n = self.nrows().min(self.ncols());
        for i in 0..n {
            for j in (i + 1)..n {
                self[(j, i)] = self[(i, j)];
            }
        }
    }
}
