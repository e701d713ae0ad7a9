//! Timed enemy waves
//!
//! Every interval the spawner rolls a wave size and queues that many
//! spawns, staggered so ships arrive one after another.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::ms_to_ticks;
use crate::tuning::SpawnerTuning;

#[derive(Debug, Clone)]
pub struct Spawner {
    interval: u32,
    stagger: u32,
    min_count: u32,
    max_count: u32,
    /// Ticks since the last wave was rolled
    timer: u32,
    /// Countdown per queued spawn
    pending: Vec<u32>,
}

impl Spawner {
    pub fn new(tuning: &SpawnerTuning) -> Self {
        Self {
            interval: ms_to_ticks(tuning.interval_ms).max(1),
            stagger: ms_to_ticks(tuning.stagger_ms),
            min_count: tuning.min_count,
            max_count: tuning.max_count.max(tuning.min_count),
            timer: 0,
            pending: Vec::new(),
        }
    }

    /// Forget queued spawns and restart the wave clock
    pub fn reset(&mut self) {
        self.timer = 0;
        self.pending.clear();
    }

    /// Advance one tick; returns how many enemies should appear now
    pub fn tick(&mut self, rng: &mut Pcg32) -> u32 {
        self.timer += 1;
        if self.timer >= self.interval {
            self.timer = 0;
            let count = rng.random_range(self.min_count..=self.max_count);
            log::debug!("Spawn wave of {}", count);
            self.pending.extend((0..count).map(|i| i * self.stagger));
        }

        let due = self.pending.iter().filter(|&&delay| delay == 0).count() as u32;
        self.pending.retain_mut(|delay| {
            if *delay == 0 {
                return false;
            }
            *delay -= 1;
            true
        });
        due
    }

    /// Spawns queued but not yet due
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn run(spawner: &mut Spawner, rng: &mut Pcg32, ticks: u32) -> Vec<(u32, u32)> {
        (1..=ticks)
            .filter_map(|t| {
                let due = spawner.tick(rng);
                (due > 0).then_some((t, due))
            })
            .collect()
    }

    #[test]
    fn test_first_wave_after_interval() {
        let mut spawner = Spawner::new(&SpawnerTuning::default());
        let mut rng = Pcg32::seed_from_u64(3);
        let spawns = run(&mut spawner, &mut rng, 299);
        assert!(spawns.is_empty());
        assert_eq!(spawner.tick(&mut rng), 1);
    }

    #[test]
    fn test_wave_sizes_and_stagger() {
        let mut spawner = Spawner::new(&SpawnerTuning::default());
        let mut rng = Pcg32::seed_from_u64(11);
        let spawns = run(&mut spawner, &mut rng, 300 * 40);

        let total: u32 = spawns.iter().map(|(_, n)| n).sum();
        assert!((40..=80).contains(&total));
        // Only the wave tick and the tick 60 later ever spawn
        for (tick, n) in &spawns {
            assert_eq!(*n, 1);
            assert!(tick % 300 == 0 || tick % 300 == 60, "unexpected tick {tick}");
        }
        // Both wave sizes show up over 40 waves
        assert!(spawns.iter().any(|(t, _)| t % 300 == 60));
        assert!(total < 80);
    }

    #[test]
    fn test_fixed_count() {
        let tuning = SpawnerTuning {
            interval_ms: 1000,
            min_count: 3,
            max_count: 3,
            stagger_ms: 0,
        };
        let mut spawner = Spawner::new(&tuning);
        let mut rng = Pcg32::seed_from_u64(0);
        let spawns = run(&mut spawner, &mut rng, 60);
        assert_eq!(spawns, vec![(60, 3)]);
    }

    #[test]
    fn test_reset_drops_pending() {
        let mut spawner = Spawner::new(&SpawnerTuning {
            min_count: 2,
            max_count: 2,
            ..Default::default()
        });
        let mut rng = Pcg32::seed_from_u64(0);
        run(&mut spawner, &mut rng, 300);
        assert_eq!(spawner.pending(), 1);
        spawner.reset();
        assert_eq!(spawner.pending(), 0);
        assert!(run(&mut spawner, &mut rng, 299).is_empty());
    }
}
