//! Composite behavior nodes.
//!
//! Composite nodes control the execution flow of multiple child behaviors.
//! This module provides the fundamental building blocks for creating complex
//! decision trees: [`Sequence`] (AND logic), [`Selector`] (OR logic) and
//! [`Parallel`] (tick everyone, decide once).

use crate::{Behavior, Status};

/// Executes child behaviors in order until one does not succeed.
///
/// # Semantics
///
/// A `Sequence` node evaluates its children from left to right:
/// - If a child returns `Failure` or `Running`, the sequence **stops
///   immediately** and returns that status
/// - If a child returns `Success`, the sequence **continues** to the next child
/// - If all children return `Success`, the sequence returns `Success`
///
/// This is analogous to a short-circuited logical AND (&&) operation.
pub struct Sequence<C> {
    children: Vec<Box<dyn Behavior<C>>>,
}

impl<C> Sequence<C> {
    /// Creates a new sequence with the given child behaviors.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty. A sequence with no children is
    /// meaningless and likely indicates a programming error.
    pub fn new(children: Vec<Box<dyn Behavior<C>>>) -> Self {
        assert!(
            !children.is_empty(),
            "Sequence must have at least one child"
        );
        Self { children }
    }
}

impl<C> Behavior<C> for Sequence<C> {
    fn tick(&mut self, ctx: &mut C) -> Status {
        for child in &mut self.children {
            match child.tick(ctx) {
                Status::Success => continue,
                other => return other, // Short-circuit on Failure or Running
            }
        }
        Status::Success
    }
}

/// Executes child behaviors in order until one does not fail.
///
/// # Semantics
///
/// A `Selector` node evaluates its children from left to right:
/// - If a child returns `Success` or `Running`, the selector **stops
///   immediately** and returns that status
/// - If a child returns `Failure`, the selector **continues** to the next child
/// - If all children return `Failure`, the selector returns `Failure`
///
/// This is analogous to a short-circuited logical OR (||) operation.
pub struct Selector<C> {
    children: Vec<Box<dyn Behavior<C>>>,
}

impl<C> Selector<C> {
    /// Creates a new selector with the given child behaviors.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty. A selector with no children is
    /// meaningless and likely indicates a programming error.
    pub fn new(children: Vec<Box<dyn Behavior<C>>>) -> Self {
        assert!(
            !children.is_empty(),
            "Selector must have at least one child"
        );
        Self { children }
    }
}

impl<C> Behavior<C> for Selector<C> {
    fn tick(&mut self, ctx: &mut C) -> Status {
        for child in &mut self.children {
            match child.tick(ctx) {
                Status::Failure => continue,
                other => return other, // Short-circuit on Success or Running
            }
        }
        Status::Failure
    }
}

/// Ticks every child each evaluation and reports the first decisive result.
///
/// # Semantics
///
/// - All children are evaluated on every tick, in order, even after one of
///   them has already produced a decisive result
/// - The first non-`Running` status seen during the pass is returned
/// - If every child is `Running`, the parallel node returns `Running`
///
/// Side effects of later children (e.g., a move intent written after a
/// condition already failed) still happen in the same pass.
pub struct Parallel<C> {
    children: Vec<Box<dyn Behavior<C>>>,
}

impl<C> Parallel<C> {
    /// Creates a new parallel node with the given child behaviors.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty.
    pub fn new(children: Vec<Box<dyn Behavior<C>>>) -> Self {
        assert!(
            !children.is_empty(),
            "Parallel must have at least one child"
        );
        Self { children }
    }
}

impl<C> Behavior<C> for Parallel<C> {
    fn tick(&mut self, ctx: &mut C) -> Status {
        let mut decided = None;
        for child in &mut self.children {
            let status = child.tick(ctx);
            if decided.is_none() && !status.is_running() {
                decided = Some(status);
            }
        }
        decided.unwrap_or(Status::Running)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestContext {
        value: i32,
        trace: Vec<&'static str>,
    }

    impl TestContext {
        fn new() -> Self {
            Self {
                value: 0,
                trace: Vec::new(),
            }
        }
    }

    struct Fixed {
        name: &'static str,
        status: Status,
    }

    impl Fixed {
        fn boxed(name: &'static str, status: Status) -> Box<dyn Behavior<TestContext>> {
            Box::new(Self { name, status })
        }
    }

    impl Behavior<TestContext> for Fixed {
        fn tick(&mut self, ctx: &mut TestContext) -> Status {
            ctx.trace.push(self.name);
            self.status
        }
    }

    struct Increment;
    impl Behavior<TestContext> for Increment {
        fn tick(&mut self, ctx: &mut TestContext) -> Status {
            ctx.value += 1;
            Status::Success
        }
    }

    #[test]
    fn sequence_all_success() {
        let mut seq = Sequence::new(vec![Box::new(Increment), Box::new(Increment)]);

        let mut ctx = TestContext::new();
        assert_eq!(seq.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.value, 2);
    }

    #[test]
    fn sequence_stops_at_failure_without_evaluating_the_rest() {
        let mut seq = Sequence::new(vec![
            Fixed::boxed("first", Status::Success),
            Fixed::boxed("second", Status::Failure),
            Fixed::boxed("third", Status::Success),
        ]);

        let mut ctx = TestContext::new();
        assert_eq!(seq.tick(&mut ctx), Status::Failure);
        assert_eq!(ctx.trace, vec!["first", "second"]);
    }

    #[test]
    fn sequence_stops_at_running() {
        let mut seq = Sequence::new(vec![
            Fixed::boxed("walk", Status::Running),
            Fixed::boxed("attack", Status::Success),
        ]);

        let mut ctx = TestContext::new();
        assert_eq!(seq.tick(&mut ctx), Status::Running);
        assert_eq!(ctx.trace, vec!["walk"]);
    }

    #[test]
    fn selector_returns_first_non_failure() {
        let mut sel = Selector::new(vec![
            Fixed::boxed("a", Status::Failure),
            Fixed::boxed("b", Status::Running),
            Fixed::boxed("c", Status::Success),
        ]);

        let mut ctx = TestContext::new();
        assert_eq!(sel.tick(&mut ctx), Status::Running);
        assert_eq!(ctx.trace, vec!["a", "b"]);
    }

    #[test]
    fn selector_fails_when_all_fail() {
        let mut sel = Selector::new(vec![
            Fixed::boxed("a", Status::Failure),
            Fixed::boxed("b", Status::Failure),
        ]);

        let mut ctx = TestContext::new();
        assert_eq!(sel.tick(&mut ctx), Status::Failure);
        assert_eq!(ctx.trace, vec!["a", "b"]);
    }

    #[test]
    fn parallel_ticks_every_child_and_keeps_first_decision() {
        let mut par = Parallel::new(vec![
            Fixed::boxed("a", Status::Running),
            Fixed::boxed("b", Status::Failure),
            Fixed::boxed("c", Status::Success),
        ]);

        let mut ctx = TestContext::new();
        assert_eq!(par.tick(&mut ctx), Status::Failure);
        assert_eq!(ctx.trace, vec!["a", "b", "c"]);
    }

    #[test]
    fn parallel_runs_while_everyone_runs() {
        let mut par = Parallel::new(vec![
            Fixed::boxed("a", Status::Running),
            Fixed::boxed("b", Status::Running),
        ]);

        let mut ctx = TestContext::new();
        assert_eq!(par.tick(&mut ctx), Status::Running);
    }
}
