use proptest::prelude::*;

use tilesw_alignment_rs::pairwise::sw::{Schedule, Strategy as TileStrategy};
use tilesw_alignment_rs::Engine;
use tilesw_core_rs::alignment::{Alignment, GAP};
use tilesw_core_rs::Scoring;

use super::local::Score;

/// Untiled reference: best cell of the full DP matrix.
fn full_matrix_score(seq1: &[u8], seq2: &[u8], scoring: &Scoring<Score>) -> Score {
    let mut prev = vec![0; seq1.len() + 1];
    let mut best = 0;
    for s2 in seq2 {
        let mut row = vec![0; seq1.len() + 1];
        for (j, s1) in seq1.iter().enumerate() {
            let score = (prev[j] + scoring.symbols(*s1, *s2))
                .max(prev[j + 1] + scoring.gap())
                .max(row[j] + scoring.gap())
                .max(0);
            row[j + 1] = score;
            best = best.max(score);
        }
        prev = row;
    }
    best
}

fn align(
    seq1: &str,
    seq2: &str,
    tile_dim: usize,
    scoring: Scoring<Score>,
    schedule: Schedule,
    strategy: TileStrategy,
) -> Alignment<Score> {
    Engine::builder()
        .set_tile_dim(tile_dim)
        .set_scoring(scoring)
        .set_schedule(schedule)
        .set_strategy(strategy)
        .build()
        .and_then(|engine| engine.align(seq1.as_bytes(), seq2.as_bytes()))
        .unwrap_or_else(|err| panic!("Alignment failed: {err:?}"))
}

fn scoring() -> impl Strategy<Value = Scoring<Score>> {
    (1..5, -5..0, -5..0).prop_map(|(matched, mismatch, gap)| Scoring::new(matched, mismatch, gap))
}

/// Sequential nested-loop run, the baseline every other configuration is compared with.
fn baseline(seq1: &str, seq2: &str, tile_dim: usize, scoring: Scoring<Score>) -> Alignment<Score> {
    align(seq1, seq2, tile_dim, scoring, Schedule::Sequential, TileStrategy::NestedLoop)
}

fn residues(aligned: &[u8]) -> Vec<u8> {
    aligned.iter().copied().filter(|x| *x != GAP).collect()
}

proptest! {
    #[test]
    fn test_alignment_is_well_formed(
        seq1 in "[ACGT]{0,60}",
        seq2 in "[ACGT]{0,60}",
        tile_dim in 1usize..20,
        scoring in scoring(),
    ) {
        let alignment = baseline(&seq1, &seq2, tile_dim, scoring);
        let (aligned1, aligned2) = (alignment.aligned1(), alignment.aligned2());

        prop_assert_eq!(aligned1.len(), aligned2.len());
        prop_assert!(aligned1.iter().zip(aligned2).all(|(a, b)| *a != GAP || *b != GAP));
        prop_assert!(*alignment.score() >= 0);
        prop_assert_eq!(alignment.replay(&scoring), *alignment.score());

        let expected = full_matrix_score(seq1.as_bytes(), seq2.as_bytes(), &scoring);
        prop_assert_eq!(*alignment.score(), expected);

        // Aligned residues are exactly the covered ranges of the inputs
        let covered1 = &seq1.as_bytes()[alignment.seq1().clone()];
        let covered2 = &seq2.as_bytes()[alignment.seq2().clone()];
        prop_assert_eq!(residues(aligned1), covered1.to_vec());
        prop_assert_eq!(residues(aligned2), covered2.to_vec());
    }

    #[test]
    fn test_tile_invariance(
        seq1 in "[ACGT]{1,50}",
        seq2 in "[ACGT]{1,50}",
        tile_dim in 1usize..17,
        scoring in scoring(),
    ) {
        let untiled = baseline(&seq1, &seq2, 64, scoring);
        let tiled = baseline(&seq1, &seq2, tile_dim, scoring);
        prop_assert_eq!(tiled, untiled);
    }

    #[test]
    fn test_schedule_and_kernel_equivalence(
        seq1 in "[ACGT]{0,50}",
        seq2 in "[ACGT]{0,50}",
        tile_dim in 1usize..12,
        fifo_depth in 1usize..5,
    ) {
        let scoring = Scoring::default();
        let reference = baseline(&seq1, &seq2, tile_dim, scoring);
        for (schedule, strategy) in [
            (Schedule::Wavefront, TileStrategy::NestedLoop),
            (Schedule::Sequential, TileStrategy::RowPipeline { fifo_depth }),
            (Schedule::Wavefront, TileStrategy::RowPipeline { fifo_depth }),
        ] {
            let alignment = align(&seq1, &seq2, tile_dim, scoring, schedule, strategy);
            prop_assert_eq!(&alignment, &reference);
        }
    }
}
