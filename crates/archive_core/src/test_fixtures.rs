//! Shared test fixtures for archive_core and downstream crates.
//!
//! Small hand-built graphs for scenario tests, plus a seeded random record
//! generator for property-style planner tests.

use crate::{CreatureRecord, EvolutionRef};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub fn record(id: &str) -> CreatureRecord {
    CreatureRecord::new(id)
}

pub fn with_links(id: &str, evolves_to: &[&str], evolves_from: &[&str]) -> CreatureRecord {
    let mut r = record(id);
    r.evolves_to = evolves_to.iter().map(|n| EvolutionRef::new(n)).collect();
    r.evolves_from = evolves_from.iter().map(|n| EvolutionRef::new(n)).collect();
    r
}

/// `names[0]` evolves to `names[1]`, which evolves to `names[2]`, and so on.
/// Links are only written on the evolving side.
pub fn chain(names: &[&str]) -> Vec<CreatureRecord> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| match names.get(i + 1) {
            Some(next) => with_links(name, &[*next], &[]),
            None => record(name),
        })
        .collect()
}

/// A→B, A→C, B→D, C→D.
pub fn diamond() -> Vec<CreatureRecord> {
    vec![
        with_links("A", &["B", "C"], &[]),
        with_links("B", &["D"], &["A"]),
        with_links("C", &["D"], &["A"]),
        with_links("D", &[], &["B", "C"]),
    ]
}

pub fn make_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(42)
}

/// `count` records named `n0..n{count-1}`, each with up to `max_links`
/// random links. Links land on either side at random, and roughly one in ten
/// points at an id outside the set.
pub fn random_records(rng: &mut impl Rng, count: usize, max_links: usize) -> Vec<CreatureRecord> {
    let mut records: Vec<CreatureRecord> = (0..count).map(|i| record(&format!("n{i}"))).collect();
    if count == 0 {
        return records;
    }
    for r in &mut records {
        let links = rng.gen_range(0..=max_links);
        for _ in 0..links {
            let target = if rng.gen_bool(0.1) {
                format!("ghost{}", rng.gen_range(0..count))
            } else {
                format!("n{}", rng.gen_range(0..count))
            };
            if rng.gen_bool(0.5) {
                r.evolves_to.push(EvolutionRef::new(&target));
            } else {
                r.evolves_from.push(EvolutionRef::new(&target));
            }
        }
    }
    records
}
