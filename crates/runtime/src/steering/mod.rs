//! Continuous steering for kinematic actors.
//!
//! Every tick each kinematic actor's steering vector is reset and then
//! summed from the contributions its [`SteeringProfile`] enables. All
//! contributions read a snapshot of positions and velocities taken before
//! any actor is updated, so the result does not depend on iteration order.
//! Integration then applies the sum as an acceleration-limited correction.

pub mod behaviors;
mod system;

pub use system::{KinematicSnapshot, accumulate, integrate, snapshot};

/// Target-relative behaviour driving an actor toward or away from the
/// nearest hostile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Primary {
    Seek,
    Flee,
    Pursue,
    Evade,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Separation {
    pub threshold: f32,
    pub force: f32,
}

/// Which contributions an actor sums each tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SteeringProfile {
    pub primary: Option<Primary>,
    /// Repulsion from other separating actors.
    pub separation: Option<Separation>,
    /// Partial velocity matching with other aligning actors.
    pub alignment: bool,
    /// Follow the shared flow field.
    pub flow_follow: bool,
}

impl SteeringProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flow-following pack member that keeps its distance.
    pub fn flow_follower(separation: Separation) -> Self {
        Self::new().with_flow_follow().with_separation(separation)
    }

    #[must_use]
    pub fn with_primary(mut self, primary: Primary) -> Self {
        self.primary = Some(primary);
        self
    }

    #[must_use]
    pub fn with_separation(mut self, separation: Separation) -> Self {
        self.separation = Some(separation);
        self
    }

    #[must_use]
    pub fn with_alignment(mut self) -> Self {
        self.alignment = true;
        self
    }

    #[must_use]
    pub fn with_flow_follow(mut self) -> Self {
        self.flow_follow = true;
        self
    }
}
