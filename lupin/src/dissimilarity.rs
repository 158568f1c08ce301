use crate::network_common::*;

/// `dist[i,j] = 1 - TOM[i,j]`, diagonal included
pub fn tom_dissimilarity(tom: &Mat) -> anyhow::Result<Mat> {
    tom.ensure_square("TOM")?;
    Ok(tom.mapv(|x| 1.0 - x))
}
