#![cfg(test)]

// Property tests for DoubleHashTable kept inside the crate, next to the
// table they exercise.

use crate::error::TableError;
use crate::policy::{Policy, ReorganizeMode};
use crate::slot::SlotState;
use crate::table::DoubleHashTable;
use hashbrown::HashSet;
use proptest::prelude::*;

// Pool-indexed operations shrink toward earlier keys and shorter runs.
#[derive(Clone, Debug)]
enum Op {
    Insert(usize),
    Remove(usize),
    Search(usize),
    Rehash,
    Reorganize,
}

fn arb_scenario() -> impl Strategy<Value = (usize, f64, Vec<String>, Vec<Op>)> {
    (
        1usize..=8,
        0.3f64..=1.0,
        proptest::collection::vec("[a-z]{1,5}", 1..=10),
    )
        .prop_flat_map(|(n, lf, pool)| {
            let idx = 0..pool.len();
            let op = prop_oneof![
                4 => idx.clone().prop_map(Op::Insert),
                2 => idx.clone().prop_map(Op::Remove),
                2 => idx.prop_map(Op::Search),
                1 => Just(Op::Rehash),
                1 => Just(Op::Reorganize),
            ];
            proptest::collection::vec(op, 1..60)
                .prop_map(move |ops| (n, lf, pool.clone(), ops))
        })
}

fn check_live_set(sut: &DoubleHashTable, pool: &[String], model: &HashSet<String>) -> Result<(), TestCaseError> {
    prop_assert_eq!(sut.len(), model.len());
    for k in pool {
        prop_assert_eq!(sut.contains(k), model.contains(k), "membership of {}", k);
    }
    let live = sut
        .slots()
        .filter(|(_, s)| s.state() == SlotState::Occupied)
        .count();
    prop_assert_eq!(live, model.len());
    Ok(())
}

fn run_against_model(
    policy: Policy,
    n: usize,
    lf: f64,
    pool: &[String],
    ops: Vec<Op>,
) -> Result<(), TestCaseError> {
    let mut sut = DoubleHashTable::with_policy(n, lf, policy).unwrap();
    let mut model: HashSet<String> = HashSet::new();

    for op in ops {
        match op {
            Op::Insert(i) => {
                let k = &pool[i];
                match sut.insert(k) {
                    Ok(index) => {
                        prop_assert!(model.len() < n, "insert past the cap");
                        prop_assert!(model.insert(k.clone()), "duplicate accepted");
                        prop_assert_eq!(sut.search(k).map(|s| s.index), Ok(index));
                    }
                    Err(TableError::MaxElementsReached { max }) => {
                        prop_assert_eq!(max, n);
                        prop_assert_eq!(model.len(), n);
                    }
                    Err(TableError::AlreadyExists { .. }) => {
                        prop_assert!(model.contains(k));
                    }
                    Err(e) => prop_assert!(false, "unexpected insert error {:?}", e),
                }
            }
            Op::Remove(i) => {
                let k = &pool[i];
                match sut.remove(k) {
                    Ok(_) => prop_assert!(model.remove(k)),
                    Err(TableError::NotFound { .. }) => prop_assert!(!model.contains(k)),
                    Err(e) => prop_assert!(false, "unexpected remove error {:?}", e),
                }
                prop_assert!(!sut.contains(k));
            }
            Op::Search(i) => {
                let k = &pool[i];
                match sut.search(k) {
                    Ok(s) => {
                        prop_assert!(model.contains(k));
                        prop_assert_eq!(s.key, k.as_str());
                    }
                    Err(_) => prop_assert!(!model.contains(k)),
                }
            }
            Op::Rehash => {
                let r = sut.rehash();
                prop_assert_eq!(r.moves.len(), model.len());
                prop_assert_eq!(sut.tombstones(), 0);
            }
            Op::Reorganize => {
                let had_tombstones = sut.tombstones() > 0;
                let before = sut.clone();
                match sut.reorganize() {
                    Ok(_) => {
                        prop_assert!(had_tombstones);
                        if policy.reorganize == ReorganizeMode::TombstonesOnly {
                            model.clear();
                        } else {
                            prop_assert_eq!(sut.tombstones(), 0);
                        }
                    }
                    Err(TableError::NothingToReorganize) => {
                        prop_assert!(!had_tombstones);
                        prop_assert_eq!(&sut, &before);
                    }
                    Err(e) => prop_assert!(false, "unexpected reorganize error {:?}", e),
                }
            }
        }
        prop_assert_eq!(sut.capacity(), DoubleHashTable::new(n, lf).unwrap().capacity());
        check_live_set(&sut, pool, &model)?;
    }
    Ok(())
}

// Property: state-machine equivalence against a set of live keys.
// Invariants exercised across random operation sequences:
// - Inserts respect the element cap and reject duplicates.
// - Deleted keys are never found, and tombstones never hide live keys.
// - Rehash keeps exactly the live keys and leaves no tombstones.
// - Reorganize fails without tombstones and leaves the table untouched;
//   in tombstones-only mode it drops every live entry.
// - `len` always equals the number of live keys.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_default_policy_matches_model((n, lf, pool, ops) in arb_scenario()) {
        run_against_model(Policy::default(), n, lf, &pool, ops)?;
    }

    #[test]
    fn prop_compact_reorganize_matches_model((n, lf, pool, ops) in arb_scenario()) {
        let policy = Policy { reorganize: ReorganizeMode::Compact, ..Policy::default() };
        run_against_model(policy, n, lf, &pool, ops)?;
    }
}
