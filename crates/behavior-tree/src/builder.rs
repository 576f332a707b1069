//! Builder utilities for ergonomic behavior tree construction.
//!
//! This module provides helper functions to reduce boilerplate when building
//! behavior trees. Instead of writing verbose `Box::new(Sequence::new(vec![...]))`,
//! you can use shorter functions like `sequence(vec![...])`.

use crate::{Arbitration, Behavior, Cooldown, Inverter, Parallel, Scorer, Selector, Sequence};
use crate::UtilitySelector;

/// Creates a sequence node.
///
/// Shorthand for `Box::new(Sequence::new(children))`.
#[inline]
pub fn sequence<C: 'static>(children: Vec<Box<dyn Behavior<C>>>) -> Box<dyn Behavior<C>> {
    Box::new(Sequence::new(children))
}

/// Creates a selector node.
///
/// Shorthand for `Box::new(Selector::new(children))`.
#[inline]
pub fn selector<C: 'static>(children: Vec<Box<dyn Behavior<C>>>) -> Box<dyn Behavior<C>> {
    Box::new(Selector::new(children))
}

/// Creates a parallel node.
///
/// Shorthand for `Box::new(Parallel::new(children))`.
#[inline]
pub fn parallel<C: 'static>(children: Vec<Box<dyn Behavior<C>>>) -> Box<dyn Behavior<C>> {
    Box::new(Parallel::new(children))
}

/// Creates an inverter node.
///
/// Shorthand for `Box::new(Inverter::new(child))`.
#[inline]
pub fn inverter<C: 'static>(child: Box<dyn Behavior<C>>) -> Box<dyn Behavior<C>> {
    Box::new(Inverter::new(child))
}

/// Creates a utility selector node.
///
/// `seed` only matters for [`Arbitration::Stochastic`]; pass a per-agent
/// value so agents sharing a preset do not sample in lockstep.
pub fn utility_selector<C: 'static>(
    options: Vec<(Box<dyn Behavior<C>>, Scorer<C>)>,
    arbitration: Arbitration,
    cooldown: Option<Cooldown>,
    seed: u64,
) -> Box<dyn Behavior<C>> {
    let mut node = UtilitySelector::new(options)
        .with_arbitration(arbitration)
        .with_seed(seed);
    if let Some(cooldown) = cooldown {
        node = node.with_cooldown(cooldown);
    }
    Box::new(node)
}
