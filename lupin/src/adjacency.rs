use crate::network_common::*;

/// Soft-thresholding of a correlation matrix into a weighted adjacency
/// matrix
///
/// * `beta` - soft-threshold power β (finite, > 0)
/// * `network` - how negative correlations are treated
#[derive(Clone, Copy, Debug)]
pub struct SoftThreshold {
    beta: f64,
    network: NetworkType,
}

impl SoftThreshold {
    pub fn new(beta: f64, network: NetworkType) -> anyhow::Result<Self> {
        if !(beta.is_finite() && beta > 0.0) {
            return Err(anyhow::anyhow!(
                "soft-threshold power must be a positive number, got {}",
                beta
            ));
        }
        Ok(Self { beta, network })
    }

    /// Adjacency weight of one off-diagonal correlation value
    pub fn weight(&self, corr: f64) -> f64 {
        match self.network {
            NetworkType::Signed => ((corr + 1.0) * 0.5).clamp(0.0, 1.0).powf(self.beta),
            NetworkType::Unsigned => corr.abs().min(1.0).powf(self.beta),
            NetworkType::SignedHybrid => {
                if corr > 0.0 {
                    corr.min(1.0).powf(self.beta)
                } else {
                    0.0
                }
            }
        }
    }

    /// Build the `n x n` adjacency matrix from an `n x n` correlation
    /// matrix. Each unordered pair is evaluated once (upper triangle)
    /// and mirrored.
    pub fn adjacency(&self, corr: &Mat) -> anyhow::Result<Mat> {
        let nn = corr.ensure_square("correlation matrix")?;
        let diag = self.network.adjacency_diagonal();

        let mut adj = Mat::zeros((nn, nn));
        adj.axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(i, mut adj_i)| {
                adj_i[i] = diag;
                for j in (i + 1)..nn {
                    adj_i[j] = self.weight(corr[(i, j)]);
                }
            });
        adj.mirror_upper_triangle();

        Ok(adj)
    }
}

/// Soft-threshold `corr` with power `beta`
pub fn soft_threshold_adjacency(
    corr: &Mat,
    beta: f64,
    network: NetworkType,
) -> anyhow::Result<Mat> {
    let timer = std::time::Instant::now();
    let adj = SoftThreshold::new(beta, network)?.adjacency(corr)?;
    info!(
        "{} adjacency (β = {:.1}) of {} genes in {:.2?}",
        network,
        beta,
        adj.nrows(),
        timer.elapsed()
    );
    Ok(adj)
}
