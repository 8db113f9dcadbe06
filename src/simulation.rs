use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::types::{Hyperparams, RunStatus};

pub const TICK_INTERVAL: Duration = Duration::from_millis(500);
pub const MAX_EPOCH: u32 = 100;

const INITIAL_GENERATOR_LOSS: f64 = 2.5;
const INITIAL_DISCRIMINATOR_LOSS: f64 = 0.7;
const GENERATOR_LOSS_FLOOR: f64 = 0.5;
const SAMPLE_EVERY: u32 = 5;

/// Uniform samples in [0, 1).
pub trait UniformSource {
    fn next_uniform(&mut self) -> f64;
}

pub struct EntropySource(SmallRng);

impl EntropySource {
    pub fn new() -> Self {
        Self(SmallRng::from_entropy())
    }
}

impl Default for EntropySource {
    fn default() -> Self {
        Self::new()
    }
}

impl UniformSource for EntropySource {
    fn next_uniform(&mut self) -> f64 {
        self.0.gen()
    }
}

/// Per-epoch loss logs. Both series always have the same length.
#[derive(Clone, Debug, Default)]
pub struct LossHistory {
    pub generator: Vec<f64>,
    pub discriminator: Vec<f64>,
}

impl LossHistory {
    pub fn len(&self) -> usize {
        self.generator.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generator.is_empty()
    }

    fn clear(&mut self) {
        self.generator.clear();
        self.discriminator.clear();
    }
}

/// What the glue should do after a tick.
#[derive(Clone, Copy, Debug, Default)]
pub struct TickOutcome {
    /// False when the tick was ignored (not training, or run complete).
    pub stepped: bool,
    pub sample_due: bool,
    pub completed: bool,
}

/// Simulated GAN training run. No gradients anywhere: generator loss decays
/// through a randomized convergence formula and discriminator loss re-rolls
/// around 0.7 each epoch.
pub struct TrainingSimulation<S> {
    status: RunStatus,
    epoch: u32,
    generator_loss: f64,
    discriminator_loss: f64,
    history: LossHistory,
    source: S,
}

impl<S: UniformSource> TrainingSimulation<S> {
    pub fn new(source: S) -> Self {
        Self {
            status: RunStatus::Ready,
            epoch: 0,
            generator_loss: INITIAL_GENERATOR_LOSS,
            discriminator_loss: INITIAL_DISCRIMINATOR_LOSS,
            history: LossHistory::default(),
            source,
        }
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    pub fn generator_loss(&self) -> f64 {
        self.generator_loss
    }

    pub fn discriminator_loss(&self) -> f64 {
        self.discriminator_loss
    }

    pub fn history(&self) -> &LossHistory {
        &self.history
    }

    pub fn is_training(&self) -> bool {
        self.status == RunStatus::Training
    }

    /// No-op while already training or once the run has completed.
    pub fn start(&mut self) {
        if matches!(self.status, RunStatus::Ready | RunStatus::Paused) {
            self.status = RunStatus::Training;
            log::info!("training started at epoch {}", self.epoch);
        }
    }

    /// Keeps the accumulated run for a later resume.
    pub fn pause(&mut self) {
        if self.status == RunStatus::Training {
            self.status = RunStatus::Paused;
            log::info!("training paused at epoch {}", self.epoch);
        }
    }

    /// Advances one epoch. Ignored unless the run is actively training, so a
    /// stale timer event after pause/completion cannot mutate anything.
    pub fn tick(&mut self, params: &Hyperparams) -> TickOutcome {
        if self.status != RunStatus::Training {
            return TickOutcome::default();
        }

        self.epoch += 1;

        let convergence_rate = params.learning_rate * 1000.0;
        let noise_impact = (200.0 - f64::from(params.noise_dimension)) / 1000.0;

        self.generator_loss = (self.generator_loss
            - self.source.next_uniform() * 0.1 * convergence_rate
            - noise_impact)
            .max(GENERATOR_LOSS_FLOOR);
        self.discriminator_loss = 0.7 + (self.source.next_uniform() - 0.5) * 0.3;

        self.history.generator.push(self.generator_loss);
        self.history.discriminator.push(self.discriminator_loss);

        log::trace!(
            "epoch {}: gen {:.4} disc {:.4}",
            self.epoch,
            self.generator_loss,
            self.discriminator_loss
        );

        let completed = self.epoch >= MAX_EPOCH;
        if completed {
            self.status = RunStatus::Complete;
            log::info!("training complete after {} epochs", self.epoch);
        }

        TickOutcome {
            stepped: true,
            sample_due: self.epoch % SAMPLE_EVERY == 0,
            completed,
        }
    }

    /// Callable from any status, including `Complete`.
    pub fn reset(&mut self) {
        self.status = RunStatus::Ready;
        self.epoch = 0;
        self.generator_loss = INITIAL_GENERATOR_LOSS;
        self.discriminator_loss = INITIAL_DISCRIMINATOR_LOSS;
        self.history.clear();
        log::info!("training reset");
    }

    /// 0..1 fraction driving sample glyph selection.
    pub fn quality_fraction(&self) -> f64 {
        (INITIAL_GENERATOR_LOSS - self.generator_loss) / 2.0
    }

    pub fn quality_score(&self) -> u32 {
        (self.quality_fraction() * 100.0).round().clamp(0.0, 100.0) as u32
    }
}

/// Gates ticks to the fixed cadence using one logical timer handle: arming
/// replaces any pending tick and clearing cancels it, so a paused or reset
/// run can never observe a stale tick.
#[derive(Clone, Copy, Debug, Default)]
pub struct TickTimer {
    last: Option<Instant>,
}

impl TickTimer {
    pub fn arm(&mut self, now: Instant) {
        self.last = Some(now);
    }

    pub fn clear(&mut self) {
        self.last = None;
    }

    /// True at most once per elapsed interval; re-arms itself on firing.
    pub fn due(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.duration_since(last) >= TICK_INTERVAL => {
                self.last = Some(now);
                true
            }
            _ => false,
        }
    }

    /// Time until the pending tick fires, for repaint scheduling.
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.last {
            Some(last) => TICK_INTERVAL.saturating_sub(now.duration_since(last)),
            None => Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Source that returns the same value forever.
    struct FixedSource(f64);

    impl UniformSource for FixedSource {
        fn next_uniform(&mut self) -> f64 {
            self.0
        }
    }

    /// Source that cycles through a fixed list.
    struct CycleSource {
        values: Vec<f64>,
        at: usize,
    }

    impl UniformSource for CycleSource {
        fn next_uniform(&mut self) -> f64 {
            let v = self.values[self.at % self.values.len()];
            self.at += 1;
            v
        }
    }

    fn sim(value: f64) -> TrainingSimulation<FixedSource> {
        TrainingSimulation::new(FixedSource(value))
    }

    #[test]
    fn reference_tick_with_default_hyperparams() {
        // convergence = 0.2, noise impact = 0.1, draw pinned at 0.5:
        // gen = 2.5 - 0.5*0.1*0.2 - 0.1 = 2.39, disc = 0.7 + 0*0.3 = 0.7
        let mut sim = sim(0.5);
        sim.start();
        let outcome = sim.tick(&Hyperparams::default());
        assert!(outcome.stepped);
        assert!(!outcome.sample_due);
        assert_eq!(sim.epoch(), 1);
        assert_relative_eq!(sim.generator_loss(), 2.39, epsilon = 1e-12);
        assert_relative_eq!(sim.discriminator_loss(), 0.7, epsilon = 1e-12);
    }

    #[test]
    fn tick_is_ignored_unless_training() {
        let mut sim = sim(0.5);
        let outcome = sim.tick(&Hyperparams::default());
        assert!(!outcome.stepped);
        assert_eq!(sim.epoch(), 0);
        assert!(sim.history().is_empty());

        sim.start();
        sim.tick(&Hyperparams::default());
        sim.pause();
        let outcome = sim.tick(&Hyperparams::default());
        assert!(!outcome.stepped);
        assert_eq!(sim.epoch(), 1);
    }

    #[test]
    fn generator_loss_never_drops_below_floor() {
        let mut sim = sim(1.0);
        sim.start();
        for _ in 0..60 {
            sim.tick(&Hyperparams::default());
            assert!(sim.generator_loss() >= 0.5);
        }
        // Constant maximum draws pull it all the way to the floor.
        assert_relative_eq!(sim.generator_loss(), 0.5, epsilon = 1e-12);
        assert_eq!(sim.quality_score(), 100);
    }

    #[test]
    fn discriminator_loss_stays_in_band() {
        let mut sim = TrainingSimulation::new(CycleSource {
            values: vec![0.0, 0.25, 0.5, 0.75, 0.999],
            at: 0,
        });
        sim.start();
        // A draw of exactly 0.0 lands on the band edge, which rounds to
        // 0.5499999999999999 in f64; compare with a small tolerance.
        for _ in 0..50 {
            sim.tick(&Hyperparams::default());
            let disc = sim.discriminator_loss();
            assert!(
                disc >= 0.55 - 1e-9 && disc <= 0.85 + 1e-9,
                "disc out of band: {disc}"
            );
        }
    }

    #[test]
    fn history_lengths_track_epoch() {
        let mut sim = sim(0.5);
        sim.start();
        for _ in 0..17 {
            sim.tick(&Hyperparams::default());
            assert_eq!(sim.history().generator.len(), sim.epoch() as usize);
            assert_eq!(sim.history().discriminator.len(), sim.epoch() as usize);
        }
    }

    #[test]
    fn every_fifth_epoch_requests_a_sample() {
        let mut sim = sim(0.5);
        sim.start();
        for expected_epoch in 1..=20 {
            let outcome = sim.tick(&Hyperparams::default());
            assert_eq!(outcome.sample_due, expected_epoch % 5 == 0);
        }
    }

    #[test]
    fn run_completes_at_epoch_100_and_locks() {
        let mut sim = sim(0.5);
        sim.start();
        let mut completions = 0;
        for _ in 0..150 {
            if sim.tick(&Hyperparams::default()).completed {
                completions += 1;
            }
        }
        assert_eq!(completions, 1);
        assert_eq!(sim.epoch(), 100);
        assert_eq!(sim.status(), RunStatus::Complete);
        assert_eq!(sim.history().len(), 100);

        // Start/pause no longer do anything until a reset.
        sim.start();
        assert_eq!(sim.status(), RunStatus::Complete);
        sim.pause();
        assert_eq!(sim.status(), RunStatus::Complete);
    }

    #[test]
    fn reset_restores_defaults_from_any_status() {
        let mut sim = sim(0.5);
        sim.start();
        for _ in 0..100 {
            sim.tick(&Hyperparams::default());
        }
        assert_eq!(sim.status(), RunStatus::Complete);

        sim.reset();
        assert_eq!(sim.status(), RunStatus::Ready);
        assert_eq!(sim.epoch(), 0);
        assert_relative_eq!(sim.generator_loss(), 2.5);
        assert_relative_eq!(sim.discriminator_loss(), 0.7);
        assert!(sim.history().is_empty());

        // A completed-then-reset run can start again.
        sim.start();
        assert_eq!(sim.status(), RunStatus::Training);
    }

    #[test]
    fn start_while_training_is_a_no_op() {
        let mut sim = sim(0.5);
        sim.start();
        sim.tick(&Hyperparams::default());
        sim.start();
        assert_eq!(sim.status(), RunStatus::Training);
        assert_eq!(sim.epoch(), 1);
    }

    #[test]
    fn quality_score_rises_as_generator_loss_falls() {
        let mut sim = sim(0.8);
        sim.start();
        assert_eq!(sim.quality_score(), 0);
        let mut previous = sim.quality_score();
        for _ in 0..40 {
            sim.tick(&Hyperparams::default());
            let score = sim.quality_score();
            assert!(score >= previous);
            assert!(score <= 100);
            previous = score;
        }
    }

    #[test]
    fn hyperparams_are_read_fresh_each_tick() {
        let mut sim = sim(0.5);
        sim.start();
        // Noise dimension of 200 removes the constant decay term entirely.
        let frozen = Hyperparams {
            learning_rate: 0.0,
            noise_dimension: 200,
        };
        sim.tick(&frozen);
        assert_relative_eq!(sim.generator_loss(), 2.5, epsilon = 1e-12);

        sim.tick(&Hyperparams::default());
        assert_relative_eq!(sim.generator_loss(), 2.39, epsilon = 1e-12);
    }

    #[test]
    fn tick_timer_fires_once_per_interval() {
        let t0 = Instant::now();
        let mut timer = TickTimer::default();
        assert!(!timer.due(t0));

        timer.arm(t0);
        assert!(!timer.due(t0 + Duration::from_millis(499)));
        assert!(timer.due(t0 + Duration::from_millis(500)));
        // Re-armed on firing: nothing due until another interval passes.
        assert!(!timer.due(t0 + Duration::from_millis(600)));
        assert!(timer.due(t0 + Duration::from_millis(1000)));
    }

    #[test]
    fn cleared_timer_never_fires() {
        let t0 = Instant::now();
        let mut timer = TickTimer::default();
        timer.arm(t0);
        timer.clear();
        assert!(!timer.due(t0 + Duration::from_secs(10)));
        assert_eq!(timer.remaining(t0), Duration::ZERO);
    }
}
