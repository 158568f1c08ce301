//! Topological overlap of a weighted adjacency matrix
//!
//! ```text
//!   k_i        = sum_{u != i} a_iu
//!   numerator  = sum_{u != i,j} a_iu * a_ju + a_ij
//!   denominator= min(k_i, k_j) + 1 - a_ij
//!   TOM_ij     = numerator / denominator   (0 if denominator <= 0)
//!   TOM_ii     = 1
//! ```
//!
//! Rows are split into contiguous ranges, one per worker. A worker
//! fills the upper triangle of its own rows only, so the output is
//! written without locks; the lower triangle is mirrored once every
//! worker has joined.

use crate::network_common::*;
use crate::progress::{aggregate_progress, ProgressReporter};
use matrix_util::utils::partition_contiguous;
use std::sync::mpsc::sync_channel;
use std::time::Instant;

/// Connectivity `k_i = sum_{u != i} a_iu`; the diagonal is never
/// counted, whatever value it holds
pub fn connectivity(adj: &Mat) -> anyhow::Result<DVec> {
    let nn = adj.ensure_square("adjacency matrix")?;
    Ok(DVec::from_shape_fn(nn, |i| {
        adj.row(i)
            .iter()
            .enumerate()
            .filter(|&(u, _)| u != i)
            .map(|(_, &a_iu)| a_iu)
            .sum()
    }))
}

/// Overlap of an off-diagonal pair `i != j`, clamped to `[0, 1]`
fn pair_overlap(adj: &Mat, kk: &DVec, i: usize, j: usize) -> f64 {
    let dot: f64 = adj
        .row(i)
        .iter()
        .zip(adj.row(j).iter())
        .enumerate()
        .filter(|&(u, _)| u != i && u != j)
        .map(|(_, (&a_iu, &a_ju))| a_iu * a_ju)
        .sum();

    let a_ij = adj[(i, j)];
    let numerator = dot + a_ij;
    let denominator = kk[i].min(kk[j]) + 1.0 - a_ij;

    let value = if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    };
    value.clamp(0.0, 1.0)
}

/// Computes the topological overlap matrix with a fixed number of
/// workers, each owning a contiguous row range
#[derive(Clone, Debug)]
pub struct TomEngine {
    num_workers: usize,
}

impl TomEngine {
    pub fn new(num_workers: usize) -> anyhow::Result<Self> {
        anyhow::ensure!(num_workers > 0, "need at least one TOM worker");
        Ok(Self { num_workers })
    }

    /// One worker per logical CPU
    pub fn with_available_parallelism() -> Self {
        Self {
            num_workers: num_cpus::get().max(1),
        }
    }

    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Block until every row is done and return the full symmetric
    /// matrix. `reporter` sees milestones from a separate aggregator
    /// thread while the workers run.
    pub fn compute(&self, adj: &Mat, reporter: &mut dyn ProgressReporter) -> anyhow::Result<Mat> {
        let nn = adj.ensure_square("adjacency matrix")?;
        let timer = Instant::now();
        info!("Starting TOM calculation for {} genes...", nn);

        let kk = connectivity(adj)?;
        debug!("...connectivity (k) calculated");

        let mut tom = Mat::zeros((nn, nn));
        if nn == 0 {
            return Ok(tom);
        }

        let intervals = partition_contiguous(nn, self.num_workers);
        info!(
            "...parallelizing TOM calculation over {} row ranges",
            intervals.len()
        );

        // disjoint row slabs, one per worker
        let mut slabs = Vec::with_capacity(intervals.len());
        let mut rest = tom.view_mut();
        for &(lb, ub) in intervals.iter() {
            let (slab, tail) = rest.split_at(Axis(0), ub - lb);
            slabs.push((lb, slab));
            rest = tail;
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(intervals.len())
            .build()?;

        // capacity covers every row, so workers never wait on it
        let (tx, rx) = sync_channel::<usize>(nn);
        let kk = &kk;
        let progress = &mut *reporter;

        let rows_seen = std::thread::scope(|s| {
            let aggregator = s.spawn(move || aggregate_progress(rx, nn, progress));

            pool.scope(|ps| {
                for (lb, mut slab) in slabs {
                    let tx = tx.clone();
                    ps.spawn(move |_| {
                        for (r, mut tom_i) in slab.outer_iter_mut().enumerate() {
                            let i = lb + r;
                            tom_i[i] = 1.0;
                            for j in (i + 1)..nn {
                                tom_i[j] = pair_overlap(adj, kk, i, j);
                            }
                            // progress is advisory; a gone aggregator is fine
                            let _ = tx.send(i);
                        }
                    });
                }
            });
            drop(tx);

            aggregator
                .join()
                .map_err(|_| anyhow::anyhow!("TOM progress aggregator panicked"))
        })?;
        debug_assert_eq!(rows_seen, nn);

        tom.mirror_upper_triangle();

        reporter.finish(nn, timer.elapsed());
        Ok(tom)
    }
}
