use super::*;
use rand::{SeedableRng, rngs::StdRng};

#[test]
fn choose_target_stays_in_range_for_many_shapes() {
    let mut rng = StdRng::seed_from_u64(7);
    for rows in 1..=12 {
        for cols in 1..=12 {
            for _ in 0..20 {
                let pos = choose_target_with(&mut rng, rows, cols);
                assert!(pos.fits(rows, cols), "{pos:?} outside {rows}x{cols}");
            }
        }
    }
    assert!(choose_target(3, 5).fits(3, 5));
}

#[test]
fn single_cell_grid_always_targets_origin() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..10 {
        assert_eq!(choose_target_with(&mut rng, 1, 1), AnswerPosition::new(0, 0));
    }
}

#[test]
fn every_cell_is_reachable() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut seen = [[false; 4]; 3];
    for _ in 0..2000 {
        let pos = choose_target_with(&mut rng, 3, 4);
        seen[pos.row as usize][pos.col as usize] = true;
    }
    assert!(seen.iter().flatten().all(|&s| s));
}

#[test]
fn seeded_instances_are_reproducible() {
    let cfg = PuzzleConfig::default();
    let a = PuzzleInstance::new_with(&mut StdRng::seed_from_u64(9), &cfg);
    let b = PuzzleInstance::new_with(&mut StdRng::seed_from_u64(9), &cfg);
    assert_eq!(a, b);
    assert!(a.target().fits(cfg.grid.rows, cfg.grid.cols));
}

#[test]
fn regenerate_always_changes_identity() {
    let cfg = PuzzleConfig::default();
    let mut rng = StdRng::seed_from_u64(3);
    let first = PuzzleInstance::new_with(&mut rng, &cfg);
    let mut current = first;
    for _ in 0..50 {
        let next = current.regenerate_with(&mut rng, &cfg);
        assert_ne!(next.id(), current.id());
        current = next;
    }
}

#[test]
fn pinned_target_is_kept() {
    let inst = PuzzleInstance::with_target(PuzzleId(5), AnswerPosition::new(1, 0));
    assert_eq!(inst.target(), AnswerPosition::new(1, 0));
    assert_eq!(inst.id(), PuzzleId(5));
}
