/// Decision-core constants and tunable parameters.
///
/// Constants are the fixed numeric contract of the field and steering
/// algorithms. Instance fields are defaults that callers may override per
/// simulation through the `with_*` builders.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AiConfig {
    /// Greedy descent steps taken when extracting a flow field.
    pub flow_step_count: u32,
    /// Repulsion factor applied to reached approach values before the flee field
    /// is relaxed again.
    pub flee_multiplier: f32,
    /// Radius within which a separating agent pushes away from its neighbours.
    pub separation_threshold: f32,
    /// Strength of the separation push.
    pub separation_force: f32,
    /// Hit points restored by a `HealSelf` action.
    pub self_heal_amount: f32,
}

impl AiConfig {
    // ===== field algorithms =====
    /// Sentinel marking unreachable or unvisited tiles.
    pub const INVALID_TILE_VALUE: f32 = 1e5;
    /// Cost of one orthogonal step during relaxation.
    pub const RELAX_STEP: f32 = 1.0;

    // ===== steering =====
    /// Seconds of target velocity added to the target position when pursuing.
    pub const PURSUE_HORIZON: f32 = 4.0;
    /// Lower clamp of the evade prediction horizon.
    pub const EVADE_MIN_HORIZON: f32 = 1.0;
    /// Upper clamp of the evade prediction horizon.
    pub const EVADE_MAX_HORIZON: f32 = 4.0;
    /// Scale applied to the intercept estimate before clamping.
    pub const EVADE_INTERCEPT_SCALE: f32 = 0.9;
    /// Seconds of own velocity used to look up the flow field ahead.
    pub const FLOW_LOOKAHEAD: f32 = 0.5;
    pub const ALIGNMENT_RADIUS: f32 = 100.0;
    pub const ALIGNMENT_WEIGHT: f32 = 0.8;
    /// Magnitudes below this are treated as zero.
    pub const EPSILON: f32 = 1e-6;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_FLOW_STEP_COUNT: u32 = 2;
    pub const DEFAULT_FLEE_MULTIPLIER: f32 = -1.2;
    pub const DEFAULT_SEPARATION_THRESHOLD: f32 = 70.0;
    pub const DEFAULT_SEPARATION_FORCE: f32 = 1.0;
    pub const DEFAULT_SELF_HEAL_AMOUNT: f32 = 10.0;

    pub fn new() -> Self {
        Self {
            flow_step_count: Self::DEFAULT_FLOW_STEP_COUNT,
            flee_multiplier: Self::DEFAULT_FLEE_MULTIPLIER,
            separation_threshold: Self::DEFAULT_SEPARATION_THRESHOLD,
            separation_force: Self::DEFAULT_SEPARATION_FORCE,
            self_heal_amount: Self::DEFAULT_SELF_HEAL_AMOUNT,
        }
    }

    #[must_use]
    pub fn with_flow_step_count(mut self, steps: u32) -> Self {
        self.flow_step_count = steps;
        self
    }

    #[must_use]
    pub fn with_flee_multiplier(mut self, multiplier: f32) -> Self {
        self.flee_multiplier = multiplier;
        self
    }

    #[must_use]
    pub fn with_separation(mut self, threshold: f32, force: f32) -> Self {
        self.separation_threshold = threshold;
        self.separation_force = force;
        self
    }

    #[must_use]
    pub fn with_self_heal_amount(mut self, amount: f32) -> Self {
        self.self_heal_amount = amount;
        self
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::new()
    }
}
