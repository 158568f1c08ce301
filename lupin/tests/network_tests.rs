use approx::assert_abs_diff_eq;
use lupin::adjacency::{soft_threshold_adjacency, SoftThreshold};
use lupin::correlation::pearson_correlation;
use lupin::dissimilarity::tom_dissimilarity;
use lupin::network_common::*;
use lupin::progress::{NoProgress, ProgressReporter};
use lupin::tom::{connectivity, TomEngine};
use std::time::Duration;

const ALL_TYPES: [NetworkType; 3] = [
    NetworkType::Signed,
    NetworkType::Unsigned,
    NetworkType::SignedHybrid,
];

fn random_correlation(ngenes: usize, nsamples: usize, seed: u64) -> anyhow::Result<Mat> {
    pearson_correlation(&Mat::rnorm_seeded(ngenes, nsamples, seed))
}

fn hand_adjacency() -> Mat {
    array![
        [1.0, 0.5, 0.2, 0.0],
        [0.5, 1.0, 0.4, 0.1],
        [0.2, 0.4, 1.0, 0.3],
        [0.0, 0.1, 0.3, 1.0]
    ]
}

#[test]
fn four_gene_overlap_by_hand() -> anyhow::Result<()> {
    let adj = hand_adjacency();

    let kk = connectivity(&adj)?;
    assert_abs_diff_eq!(kk, array![0.7, 1.0, 0.9, 0.4], epsilon = 1e-12);

    let tom = TomEngine::new(2)?.compute(&adj, &mut NoProgress)?;
    let expected = [
        ((0, 1), (0.2 * 0.4 + 0.0 * 0.1 + 0.5) / (0.7 + 1.0 - 0.5)),
        ((0, 2), (0.5 * 0.4 + 0.0 * 0.3 + 0.2) / (0.7 + 1.0 - 0.2)),
        ((0, 3), (0.5 * 0.1 + 0.2 * 0.3 + 0.0) / (0.4 + 1.0 - 0.0)),
        ((1, 2), (0.5 * 0.2 + 0.1 * 0.3 + 0.4) / (0.9 + 1.0 - 0.4)),
        ((1, 3), (0.5 * 0.0 + 0.4 * 0.3 + 0.1) / (0.4 + 1.0 - 0.1)),
        ((2, 3), (0.2 * 0.0 + 0.4 * 0.1 + 0.3) / (0.4 + 1.0 - 0.3)),
    ];
    for ((i, j), want) in expected {
        assert_abs_diff_eq!(tom[(i, j)], want, epsilon = 1e-9);
        assert_eq!(tom[(i, j)], tom[(j, i)]);
    }
    for i in 0..4 {
        assert_eq!(tom[(i, i)], 1.0);
    }

    let dist = tom_dissimilarity(&tom)?;
    assert_abs_diff_eq!(dist[(0, 1)], 1.0 - 0.58 / 1.2, epsilon = 1e-9);
    Ok(())
}

#[test]
fn four_gene_signed_network_by_hand() -> anyhow::Result<()> {
    let corr = array![
        [1.0, 0.6, -0.2, 0.0],
        [0.6, 1.0, 0.4, -0.8],
        [-0.2, 0.4, 1.0, 0.2],
        [0.0, -0.8, 0.2, 1.0]
    ];
    let adj = soft_threshold_adjacency(&corr, 2.0, NetworkType::Signed)?;

    // ((1 + cor) / 2)^2
    let expected_adj = array![
        [0.0, 0.64, 0.16, 0.25],
        [0.64, 0.0, 0.49, 0.01],
        [0.16, 0.49, 0.0, 0.36],
        [0.25, 0.01, 0.36, 0.0]
    ];
    assert_abs_diff_eq!(adj, expected_adj, epsilon = 1e-12);

    let kk = connectivity(&adj)?;
    assert_abs_diff_eq!(kk, array![1.05, 1.14, 1.01, 0.62], epsilon = 1e-12);

    for num_workers in [1, 2, 3, 4, 64] {
        let tom = TomEngine::new(num_workers)?.compute(&adj, &mut NoProgress)?;
        // (0.16 * 0.49 + 0.25 * 0.01 + 0.64) / (1.05 + 1 - 0.64)
        assert_abs_diff_eq!(tom[(0, 1)], 0.7209 / 1.41, epsilon = 1e-12);
        assert_abs_diff_eq!(tom[(0, 1)], 0.511277, epsilon = 1e-6);
        // (0.64 * 0.25 + 0.49 * 0.36 + 0.01) / (0.62 + 1 - 0.01)
        assert_abs_diff_eq!(tom[(1, 3)], 0.3464 / 1.61, epsilon = 1e-12);
        assert_abs_diff_eq!(tom[(1, 3)], 0.215155, epsilon = 1e-6);
        assert_eq!(tom[(3, 1)], tom[(1, 3)]);

        let dist = tom_dissimilarity(&tom)?;
        assert_abs_diff_eq!(dist[(0, 1)], 1.0 - 0.7209 / 1.41, epsilon = 1e-12);
        assert_eq!(dist[(2, 2)], 0.0);
    }
    Ok(())
}

#[test]
fn worker_count_does_not_change_the_result() -> anyhow::Result<()> {
    let corr = random_correlation(37, 25, 2024)?;
    let adj = soft_threshold_adjacency(&corr, 6.0, NetworkType::Signed)?;

    let reference = TomEngine::new(1)?.compute(&adj, &mut NoProgress)?;
    for num_workers in [2, 3, 8, 37, 100] {
        let tom = TomEngine::new(num_workers)?.compute(&adj, &mut NoProgress)?;
        assert_eq!(tom, reference, "{} workers", num_workers);
    }
    Ok(())
}

#[test]
fn matrices_are_symmetric_and_bounded() -> anyhow::Result<()> {
    let corr = random_correlation(24, 15, 7)?;
    assert!(corr.is_symmetric(0.0));

    for network in ALL_TYPES {
        let adj = soft_threshold_adjacency(&corr, 4.0, network)?;
        assert!(adj.is_symmetric(0.0));
        assert!(adj.iter().all(|&a| (0.0..=1.0).contains(&a)));
        for i in 0..adj.nrows() {
            assert_eq!(adj[(i, i)], network.adjacency_diagonal());
        }

        let tom = TomEngine::new(4)?.compute(&adj, &mut NoProgress)?;
        assert!(tom.is_symmetric(0.0));
        assert!(tom.iter().all(|&t| (0.0..=1.0).contains(&t)));
        for i in 0..tom.nrows() {
            assert_eq!(tom[(i, i)], 1.0);
        }

        let dist = tom_dissimilarity(&tom)?;
        assert!(dist.is_symmetric(0.0));
        assert_eq!(dist, tom.mapv(|t| 1.0 - t));
        for i in 0..dist.nrows() {
            assert_eq!(dist[(i, i)], 0.0);
        }
    }
    Ok(())
}

#[test]
fn diagonal_never_enters_the_overlap() -> anyhow::Result<()> {
    // signed and unsigned style diagonals give the same TOM
    let with_ones = hand_adjacency();
    let mut with_zeros = with_ones.clone();
    with_zeros.diag_mut().fill(0.0);

    let engine = TomEngine::new(3)?;
    let t1 = engine.compute(&with_ones, &mut NoProgress)?;
    let t0 = engine.compute(&with_zeros, &mut NoProgress)?;
    assert_eq!(t1, t0);
    Ok(())
}

#[test]
fn fully_connected_genes_overlap_fully() -> anyhow::Result<()> {
    let mut adj = Mat::ones((3, 3));
    adj.diag_mut().fill(0.0);
    let tom = TomEngine::new(3)?.compute(&adj, &mut NoProgress)?;
    assert_eq!(tom, Mat::ones((3, 3)));
    assert_eq!(tom_dissimilarity(&tom)?, Mat::zeros((3, 3)));
    Ok(())
}

#[test]
fn unconnected_pair_and_non_positive_denominator() -> anyhow::Result<()> {
    let adj = Mat::zeros((2, 2));
    let tom = TomEngine::new(1)?.compute(&adj, &mut NoProgress)?;
    assert_eq!(tom, Mat::eye(2));

    // min(k_0, k_1) + 1 - a_01 = -3 + 1 - 0 < 0
    let adj = array![[0.0, 0.0, -3.0], [0.0, 0.0, -3.0], [-3.0, -3.0, 0.0]];
    let tom = TomEngine::new(2)?.compute(&adj, &mut NoProgress)?;
    assert_eq!(tom[(0, 1)], 0.0);
    assert_eq!(tom[(1, 0)], 0.0);
    assert!(tom.iter().all(|&t| (0.0..=1.0).contains(&t)));
    Ok(())
}

#[test]
fn higher_power_never_strengthens_a_link() -> anyhow::Result<()> {
    let corr = random_correlation(12, 10, 99)?;
    for network in ALL_TYPES {
        let mut prev = soft_threshold_adjacency(&corr, 1.0, network)?;
        for beta in [2.0, 3.0, 6.0, 10.0] {
            let adj = SoftThreshold::new(beta, network)?.adjacency(&corr)?;
            for i in 0..adj.nrows() {
                for j in 0..adj.ncols() {
                    if i != j {
                        assert!(adj[(i, j)] <= prev[(i, j)]);
                    }
                }
            }
            prev = adj;
        }
    }
    Ok(())
}

#[derive(Default)]
struct Recorder {
    percents: Vec<usize>,
    finished: Option<usize>,
}

impl ProgressReporter for Recorder {
    fn milestone(&mut self, percent: usize, done: usize, total: usize) {
        assert!(done <= total);
        self.percents.push(percent);
    }

    fn finish(&mut self, total: usize, _elapsed: Duration) {
        self.finished = Some(total);
    }
}

#[test]
fn progress_reaches_completion() -> anyhow::Result<()> {
    let corr = random_correlation(63, 12, 5)?;
    let adj = soft_threshold_adjacency(&corr, 6.0, NetworkType::Unsigned)?;

    let mut rec = Recorder::default();
    TomEngine::new(4)?.compute(&adj, &mut rec)?;

    assert_eq!(rec.finished, Some(63));
    assert_eq!(rec.percents.last(), Some(&100));
    for w in rec.percents.windows(2) {
        assert!(w[1] > w[0]);
    }
    assert!(rec.percents[..rec.percents.len() - 1]
        .windows(2)
        .all(|w| w[1] >= w[0] + PROGRESS_STEP_PERCENT));
    Ok(())
}
