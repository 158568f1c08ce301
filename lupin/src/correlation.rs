use crate::network_common::*;

/// Pearson correlation between the rows (genes) of a gene x sample
/// matrix.
///
/// Each row is centred and scaled to unit norm, so that the gene x
/// gene product is the correlation. A gene with no variance correlates
/// 0 with every other gene. The diagonal is exactly 1 and the result
/// is symmetric.
pub fn pearson_correlation(expr_gs: &Mat) -> anyhow::Result<Mat> {
    let (ngenes, nsamples) = expr_gs.dim();
    anyhow::ensure!(
        nsamples >= 2,
        "need at least two samples for correlation, got {}",
        nsamples
    );
    anyhow::ensure!(
        expr_gs.iter().all(|x| x.is_finite()),
        "expression matrix has non-finite values"
    );

    let timer = std::time::Instant::now();

    let mut zz_gs = expr_gs.clone();
    zz_gs
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .for_each(|mut z_g| {
            let first = z_g[0];
            if z_g.iter().all(|&x| x == first) {
                z_g.fill(0.0);
                return;
            }
            let mu = z_g.sum() / nsamples as f64;
            z_g.mapv_inplace(|x| x - mu);
            let norm = z_g.iter().map(|x| x * x).sum::<f64>().sqrt();
            z_g.mapv_inplace(|x| x / norm);
        });

    let n_constant = zz_gs
        .axis_iter(Axis(0))
        .filter(|z_g| z_g.iter().all(|&x| x == 0.0))
        .count();
    if n_constant > 0 {
        warn!("{} genes have no variance across samples", n_constant);
    }

    let mut corr = Mat::zeros((ngenes, ngenes));
    corr.axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(i, mut corr_i)| {
            let z_i = zz_gs.row(i);
            corr_i[i] = 1.0;
            for j in (i + 1)..ngenes {
                corr_i[j] = z_i.dot(&zz_gs.row(j)).clamp(-1.0, 1.0);
            }
        });
    corr.mirror_upper_triangle();

    info!(
        "Pearson correlation of {} genes over {} samples in {:.2?}",
        ngenes,
        nsamples,
        timer.elapsed()
    );
    Ok(corr)
}
