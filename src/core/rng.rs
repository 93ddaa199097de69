use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the small integer draws the companion logic needs.
///
/// Keyword bonuses, busy replies and news picks all go through this trait so
/// a session can run on thread randomness, a fixed seed, or a scripted stub.
pub trait RandomSource {
    /// Uniform integer in `low..=high`.
    fn next_in_range(&mut self, low: i32, high: i32) -> i32;

    /// Uniform pick from a non-empty slice.
    fn choose<'a, T>(&mut self, items: &'a [T]) -> &'a T
    where
        Self: Sized,
    {
        let last = items.len().saturating_sub(1) as i32;
        let index = self.next_in_range(0, last).clamp(0, last) as usize;
        &items[index]
    }
}

/// Unseeded randomness backed by the thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_in_range(&mut self, low: i32, high: i32) -> i32 {
        rand::thread_rng().gen_range(low..=high)
    }
}

/// Reproducible randomness for `--seed` runs.
#[derive(Debug, Clone)]
pub struct SeededRandom(StdRng);

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        SeededRandom(StdRng::seed_from_u64(seed))
    }
}

impl RandomSource for SeededRandom {
    fn next_in_range(&mut self, low: i32, high: i32) -> i32 {
        self.0.gen_range(low..=high)
    }
}

/// Either of the runtime sources, picked once at startup.
#[derive(Debug, Clone)]
pub enum SessionRandom {
    Thread(ThreadRandom),
    Seeded(SeededRandom),
}

impl SessionRandom {
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => SessionRandom::Seeded(SeededRandom::new(seed)),
            None => SessionRandom::Thread(ThreadRandom),
        }
    }
}

impl RandomSource for SessionRandom {
    fn next_in_range(&mut self, low: i32, high: i32) -> i32 {
        match self {
            SessionRandom::Thread(rng) => rng.next_in_range(low, high),
            SessionRandom::Seeded(rng) => rng.next_in_range(low, high),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::RandomSource;
    use std::collections::VecDeque;

    /// Replays a fixed list of draws; falls back to `low` once exhausted.
    #[derive(Debug, Default)]
    pub struct ScriptedRandom {
        draws: VecDeque<i32>,
        pub calls: Vec<(i32, i32)>,
    }

    impl ScriptedRandom {
        pub fn new(draws: &[i32]) -> Self {
            ScriptedRandom {
                draws: draws.iter().copied().collect(),
                calls: Vec::new(),
            }
        }
    }

    impl RandomSource for ScriptedRandom {
        fn next_in_range(&mut self, low: i32, high: i32) -> i32 {
            self.calls.push((low, high));
            self.draws.pop_front().unwrap_or(low).clamp(low, high)
        }
    }
}
