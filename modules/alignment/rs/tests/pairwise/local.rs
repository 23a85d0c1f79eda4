use eyre::Result;
use rayon::ThreadPoolBuilder;

use tilesw_alignment_rs::pairwise::sw::{HostInput, Schedule, Strategy};
use tilesw_alignment_rs::Engine;
use tilesw_core_rs::alignment::{Alignment, Op};
use tilesw_core_rs::Scoring;

pub type Score = i32;

pub fn invrle(rle: &str) -> String {
    let gapfirst = Op::symbol(&Op::GapFirst);
    let gapsecond = Op::symbol(&Op::GapSecond);
    rle.chars()
        .map(|x| {
            if x == gapfirst {
                gapsecond
            } else if x == gapsecond {
                gapfirst
            } else {
                x
            }
        })
        .collect::<String>()
}

/// Engines covering every tile dimension class, schedule and kernel.
pub fn engines(scoring: Scoring<Score>) -> Result<Vec<Engine<Score>>> {
    let mut engines = Vec::new();
    for tile_dim in [1, 3, 8, 16, 64] {
        for (schedule, strategy) in [
            (Schedule::Sequential, Strategy::NestedLoop),
            (Schedule::Wavefront, Strategy::row_pipeline()),
        ] {
            let mut builder = Engine::builder()
                .set_tile_dim(tile_dim)
                .set_scoring(scoring)
                .set_schedule(schedule)
                .set_strategy(strategy);
            if schedule == Schedule::Wavefront {
                let pool = ThreadPoolBuilder::new().num_threads(3).build()?;
                builder = builder.set_thread_pool(pool);
            }
            engines.push(builder.build()?);
        }
    }
    Ok(engines)
}

struct Workload<'a> {
    seq1: (&'a [u8], usize),
    seq2: (&'a [u8], usize),
    score: Score,
    rle: &'a str,
}

fn ensure(engine: &Engine<Score>, w: &Workload<'_>) -> Result<()> {
    let invrle = invrle(w.rle);

    for (seq1, seq2, rle) in [(w.seq1, w.seq2, w.rle), (w.seq2, w.seq1, invrle.as_str())] {
        let result = engine.align(seq1.0, seq2.0)?;
        assert_eq!(result.seq1().start, seq1.1);
        assert_eq!(result.seq2().start, seq2.1);
        assert_eq!(*result.score(), w.score);
        assert_eq!(result.rle(), rle);
        assert_eq!(result.replay(engine.config().scoring()), w.score);
    }
    Ok(())
}

#[test]
fn test_no_gaps() -> Result<()> {
    let workload = [
        Workload {
            seq1: (b"AAGAA", 1),
            seq2: (b"AGA", 0),
            score: 9,
            rle: "3=",
        },
        Workload {
            seq1: (b"AGTCCCGTGTCCCAGGGG", 0),
            seq2: (b"AGTC", 0),
            score: 12,
            rle: "4=",
        },
        Workload {
            seq1: (b"CGCGCGCGTTT", 6),
            seq2: (b"CGTTT", 0),
            score: 15,
            rle: "5=",
        },
        Workload {
            seq1: (b"AAAA", 0),
            seq2: (b"AAAA", 0),
            score: 12,
            rle: "4=",
        },
    ];

    for engine in engines(Scoring::default())? {
        for w in &workload {
            ensure(&engine, w)?;
        }
    }
    Ok(())
}

#[test]
fn test_gaps() -> Result<()> {
    let workload = [
        Workload {
            seq1: (b"AAAGGGAGGGTTTA", 3),
            seq2: (b"GGGGGGG", 0),
            score: 16,
            rle: "3=1^3=",
        },
        Workload {
            seq1: (b"AAAAAAAAAAAAAAAATTTAAAAAAAAAAAAAAAA", 0),
            seq2: (b"AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA", 0),
            score: 90,
            rle: "16=3^16=",
        },
        Workload {
            seq1: (b"ACGTACGTACGTTTTTGGGGG", 0),
            seq2: (b"TTTTACGTACGTACGTGGGGGACGTCCCC", 4),
            score: 43,
            rle: "11=4^6=",
        },
        Workload {
            seq1: (b"AGCTGAC", 1),
            seq2: (b"GCTAGAC", 0),
            score: 16,
            rle: "3=1v3=",
        },
    ];

    for engine in engines(Scoring::default())? {
        for w in &workload {
            ensure(&engine, w)?;
        }
    }
    Ok(())
}

#[test]
fn test_short_sequences() -> Result<()> {
    // 2 / -1 / -1
    let scoring = Scoring::new(2, -1, -1);
    for tile_dim in [7, 8, 16] {
        let engine = Engine::builder()
            .set_tile_dim(tile_dim)
            .set_scoring(scoring)
            .build()?;
        let alignment = engine.align(b"AGCTGAC", b"GCTAGAC")?;
        assert!(!alignment.is_empty());
        assert!(*alignment.score() > 0);
        assert_eq!(alignment.aligned1(), b"GCT-GAC");
        assert_eq!(alignment.aligned2(), b"GCTAGAC");
        assert_eq!(*alignment.score(), 11);
    }
    Ok(())
}

const SEQ1: &[u8] = b"ACACCAGTACCCAAAACCAGGCGGGCTCGCCACGTCGGCTAATC";
const SEQ2: &[u8] = b"ACACCTATACCCAAGGCATAACAGCCAATC";

#[test]
fn test_reference_pair() -> Result<()> {
    let expected = |alignment: &Alignment<Score>| {
        assert_eq!(alignment.aligned1_str(), "ACACC-AGTACCCAA---A-ACCAGGC");
        assert_eq!(alignment.aligned2_str(), "ACACCTA-TACCCAAGGCATAACA-GC");
        assert_eq!(*alignment.score(), 40);
        assert_eq!(alignment.seq1(), &(0..22));
        assert_eq!(alignment.seq2(), &(0..25));
        assert_eq!(alignment.rle(), "5=1v1=1^7=3v1=1v1=1X2=1^2=");
    };

    let engine = Engine::builder().set_tile_dim(16).build()?;
    let (alignment, stats) = engine.align_with_stats(SEQ1, SEQ2)?;
    expected(&alignment);
    assert_eq!(*stats.tiles(), 6);
    assert!(*stats.recomputed() >= 2);

    // The result doesn't depend on the tiling
    for tile_dim in [1, 8] {
        let alignment = tilesw_alignment_rs::align(SEQ1, SEQ2, tile_dim, Scoring::default())?;
        expected(&alignment);
    }
    for engine in engines(Scoring::default())? {
        expected(&engine.align(SEQ1, SEQ2)?);
    }
    Ok(())
}

#[test]
fn test_disjoint_alphabets() -> Result<()> {
    for engine in engines(Scoring::default())? {
        for (seq1, seq2) in [
            (&b"AAAA"[..], &b"CCCC"[..]),
            (&b"ACACAC"[..], &b"GTGTGTGT"[..]),
            (&b"ACGT"[..], &b""[..]),
            (&b""[..], &b"ACGT"[..]),
            (&b""[..], &b""[..]),
        ] {
            let (alignment, stats) = engine.align_with_stats(seq1, seq2)?;
            assert!(alignment.is_empty());
            assert_eq!(*alignment.score(), 0);
            assert_eq!(alignment.aligned1_str(), "");
            assert_eq!(alignment.aligned2_str(), "");
            assert_eq!(*stats.recomputed(), 0);
        }
    }
    Ok(())
}

#[test]
fn test_identical_sequences() -> Result<()> {
    let scoring = Scoring::default();
    for engine in engines(scoring)? {
        for seq in [&b"A"[..], &b"ACGTAC"[..], SEQ1] {
            let alignment = engine.align(seq, seq)?;
            assert_eq!(alignment.aligned1(), seq);
            assert_eq!(alignment.aligned2(), seq);
            assert!(alignment.ops().all(|x| x == Op::Match));
            assert_eq!(*alignment.score(), seq.len() as Score * scoring.matched);
        }
    }
    Ok(())
}

#[test]
fn test_host_buffers() -> Result<()> {
    let engine = Engine::<Score>::builder().set_tile_dim(16).build()?;
    let input = HostInput::new(SEQ1, SEQ2, 16)?;
    assert_eq!(input.seq1().len(), 49);
    assert_eq!(input.seq2().len(), 33);
    assert_eq!(input.tilenum(), &[3, 2]);

    let output = engine.run_host(&input)?;
    assert_eq!(output.aligned1().len(), SEQ1.len() + SEQ2.len());
    let (aligned1, aligned2) = output.aligned();
    assert_eq!(aligned1, b"ACACC-AGTACCCAA---A-ACCAGGC");
    assert_eq!(aligned2, b"ACACCTA-TACCCAAGGCATAACA-GC");
    assert_eq!(*output.score(), 40);
    Ok(())
}

#[test]
fn test_configuration_errors() -> Result<()> {
    assert!(Engine::<Score>::builder().set_tile_dim(0).build().is_err());
    assert!(Engine::<Score>::builder()
        .set_strategy(Strategy::RowPipeline { fifo_depth: 0 })
        .build()
        .is_err());

    let engine = Engine::<Score>::builder().set_max_len(16).build()?;
    assert!(engine.align(SEQ1, b"ACGT").is_err());
    assert!(engine.align(b"ACGT", SEQ2).is_err());
    assert!(engine.run_host(&HostInput::new(SEQ1, b"ACGT", 16)?).is_err());

    // Padding and gap bytes are reserved
    assert!(engine.align(b"AC\0GT", b"ACGT").is_err());
    assert!(engine.align(b"AC-GT", b"AC-GT").is_err());
    assert!(engine.align(b"A-A", b"AAA").is_err());
    assert!(HostInput::new(b"ACGT", b"A-GT", 16).is_err());
    Ok(())
}
