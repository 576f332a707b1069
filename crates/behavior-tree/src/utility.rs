//! Utility-based arbitration.
//!
//! A [`UtilitySelector`] scores every child with an attached scoring function
//! and tries children until one does not fail. Two arbitration policies are
//! supported:
//!
//! - [`Arbitration::Deterministic`]: children are tried in descending score
//!   order (stable on ties, so declaration order breaks them)
//! - [`Arbitration::Stochastic`]: children are sampled proportionally to
//!   their positive scores; a failed child is removed from the pool and the
//!   remainder is resampled
//!
//! An optional [`Cooldown`] adds behavioral inertia: the child that most
//! recently took over receives an additive bonus that decays geometrically
//! while it keeps winning, and is dropped once it falls to the floor.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{Behavior, Status};

/// Scoring function attached to a utility option.
///
/// Receives read-only access to the context (typically to read the
/// blackboard) and returns an unbounded desirability score.
pub type Scorer<C> = Box<dyn Fn(&C) -> f32 + Send>;

/// Type alias for a scored behavior option in utility-based decision making.
type ScoredOption<C> = (Box<dyn Behavior<C>>, Scorer<C>);

/// How a [`UtilitySelector`] turns scores into an evaluation order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Arbitration {
    /// Try children by descending score; negative scores are skipped.
    #[default]
    Deterministic,
    /// Weighted random sampling among children with a score above zero.
    Stochastic,
}

/// Inertia bookkeeping for a utility selector.
///
/// Once a child other than the favored one succeeds or runs, it becomes
/// favored and receives `bonus` on top of its score. Every further win of
/// the favored child multiplies the bonus by `decay`; when the bonus drops to
/// `floor` or below, the favor is cleared.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cooldown {
    bonus: f32,
    decay: f32,
    floor: f32,
    favored: Option<usize>,
    current: f32,
}

impl Cooldown {
    /// Bonus granted to a newly favored child.
    pub const DEFAULT_BONUS: f32 = 100.0;
    /// Geometric decay applied on every repeated win.
    pub const DEFAULT_DECAY: f32 = 0.7;
    /// Bonus at or below which the favor is cleared.
    pub const DEFAULT_FLOOR: f32 = 10.0;

    /// Creates cooldown state with custom tuning.
    ///
    /// `decay` is expected in `(0, 1)`; values outside that range are
    /// clamped so the bonus cannot grow.
    pub fn new(bonus: f32, decay: f32, floor: f32) -> Self {
        Self {
            bonus,
            decay: decay.clamp(0.0, 1.0),
            floor,
            favored: None,
            current: 0.0,
        }
    }

    /// Index of the currently favored child, if any.
    pub fn favored(&self) -> Option<usize> {
        self.favored
    }

    /// Bonus currently applied to the favored child.
    pub fn current_bonus(&self) -> f32 {
        if self.favored.is_some() {
            self.current
        } else {
            0.0
        }
    }

    /// Additive bonus for the child at `index`.
    pub fn bonus_for(&self, index: usize) -> f32 {
        if self.favored == Some(index) {
            self.current
        } else {
            0.0
        }
    }

    /// Records that the child at `index` succeeded or is running.
    pub fn record(&mut self, index: usize) {
        if self.favored != Some(index) {
            self.favored = Some(index);
            self.current = self.bonus;
            return;
        }

        self.current *= self.decay;
        if self.current <= self.floor {
            self.favored = None;
            self.current = 0.0;
        }
    }
}

impl Default for Cooldown {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_BONUS,
            Self::DEFAULT_DECAY,
            Self::DEFAULT_FLOOR,
        )
    }
}

/// Executes child behaviors based on utility scores.
///
/// # Semantics
///
/// - Every scoring function is evaluated once per tick, before any child runs
/// - Children are tried according to the configured [`Arbitration`] until one
///   returns a non-`Failure` status, which is returned
/// - If no candidate is left, the selector returns `Failure`
///
/// # Example
///
/// ```rust,ignore
/// use behavior_tree::{Arbitration, Cooldown, UtilitySelector};
///
/// let selector = UtilitySelector::new(vec![
///     (flee_behavior(), Box::new(|ctx: &Ctx| flee_score(ctx))),
///     (attack_behavior(), Box::new(|ctx: &Ctx| attack_score(ctx))),
/// ])
/// .with_arbitration(Arbitration::Stochastic)
/// .with_cooldown(Cooldown::default());
/// ```
pub struct UtilitySelector<C> {
    options: Vec<ScoredOption<C>>,
    arbitration: Arbitration,
    cooldown: Option<Cooldown>,
    rng: ChaCha8Rng,
}

impl<C> UtilitySelector<C> {
    /// Creates a new deterministic utility selector without cooldown.
    ///
    /// # Panics
    ///
    /// Panics if `options` is empty.
    pub fn new(options: Vec<ScoredOption<C>>) -> Self {
        assert!(
            !options.is_empty(),
            "UtilitySelector must have at least one option"
        );
        Self {
            options,
            arbitration: Arbitration::Deterministic,
            cooldown: None,
            rng: ChaCha8Rng::seed_from_u64(0),
        }
    }

    /// Selects the arbitration policy (builder pattern).
    pub fn with_arbitration(mut self, arbitration: Arbitration) -> Self {
        self.arbitration = arbitration;
        self
    }

    /// Enables cooldown inertia (builder pattern).
    pub fn with_cooldown(mut self, cooldown: Cooldown) -> Self {
        self.cooldown = Some(cooldown);
        self
    }

    /// Reseeds the sampler used by stochastic arbitration (builder pattern).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    /// Current cooldown state, if cooldown is enabled.
    pub fn cooldown(&self) -> Option<&Cooldown> {
        self.cooldown.as_ref()
    }

    /// Evaluates every scoring function, including any cooldown bonus.
    pub fn scores(&self, ctx: &C) -> Vec<f32> {
        self.options
            .iter()
            .enumerate()
            .map(|(index, (_, scorer))| {
                let bonus = self
                    .cooldown
                    .as_ref()
                    .map_or(0.0, |cooldown| cooldown.bonus_for(index));
                scorer(ctx) + bonus
            })
            .collect()
    }

    fn try_option(&mut self, index: usize, ctx: &mut C) -> Status {
        let status = self.options[index].0.tick(ctx);
        if !status.is_failure() {
            if let Some(cooldown) = self.cooldown.as_mut() {
                cooldown.record(index);
            }
        }
        status
    }

    fn tick_deterministic(&mut self, scores: &[f32], ctx: &mut C) -> Status {
        // NaN compares false and is skipped along with negative scores
        let mut order: Vec<usize> = (0..scores.len()).filter(|&i| scores[i] >= 0.0).collect();
        order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

        for index in order {
            let status = self.try_option(index, ctx);
            tracing::trace!("utility option {} -> {:?}", index, status);
            if !status.is_failure() {
                return status;
            }
        }
        Status::Failure
    }

    fn tick_stochastic(&mut self, scores: &[f32], ctx: &mut C) -> Status {
        let mut weights: Vec<f32> = scores
            .iter()
            .map(|&score| if score > 0.0 { score } else { 0.0 })
            .collect();

        while let Some(index) = weighted_index(&mut self.rng, &weights) {
            let status = self.try_option(index, ctx);
            tracing::trace!("utility sample {} -> {:?}", index, status);
            if !status.is_failure() {
                return status;
            }
            weights[index] = 0.0;
        }
        Status::Failure
    }
}

impl<C> Behavior<C> for UtilitySelector<C> {
    fn tick(&mut self, ctx: &mut C) -> Status {
        let scores = self.scores(ctx);
        tracing::debug!(
            "UtilitySelector: {:?} scores={:?} favored={:?}",
            self.arbitration,
            scores,
            self.cooldown.as_ref().and_then(Cooldown::favored)
        );

        match self.arbitration {
            Arbitration::Deterministic => self.tick_deterministic(&scores, ctx),
            Arbitration::Stochastic => self.tick_stochastic(&scores, ctx),
        }
    }
}

/// Samples an index with probability proportional to its weight.
///
/// Weights that are zero, negative or NaN are never selected. Returns `None`
/// when no positive weight is left.
pub fn weighted_index<R: Rng + ?Sized>(rng: &mut R, weights: &[f32]) -> Option<usize> {
    if let Some(index) = weights.iter().position(|&w| w == f32::INFINITY) {
        return Some(index);
    }
    // Summed in f64 so large finite scores cannot overflow the total
    let total: f64 = weights
        .iter()
        .filter(|&&w| w > 0.0)
        .map(|&w| f64::from(w))
        .sum();
    if total <= 0.0 {
        return None;
    }

    let mut pick = rng.gen_range(0.0..total);
    let mut last_positive = None;
    for (index, &weight) in weights.iter().enumerate() {
        if weight <= 0.0 || weight.is_nan() {
            continue;
        }
        let weight = f64::from(weight);
        if pick < weight {
            return Some(index);
        }
        pick -= weight;
        last_positive = Some(index);
    }
    // Rounding can leave `pick` marginally above the last bucket
    last_positive
}
