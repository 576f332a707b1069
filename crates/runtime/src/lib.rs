//! Per-agent decision layer for grid-world simulations.
//!
//! This crate wires the pure algorithms of `game-core` and the generic
//! engine of `behavior-tree` to actual agents. Consumers build a [`World`],
//! hand it to a [`Simulation`], spawn actors with a [`Brain`] and step.
//!
//! Modules are organized by responsibility:
//! - [`world`] is the in-memory entity store agents read and write
//! - [`providers`] hosts the two decision modes: behavior trees and state
//!   machines, with their leaf libraries and presets
//! - [`influence`] builds scalar fields from world queries
//! - [`steering`] accumulates and integrates continuous motion
//! - [`resolve`] turns intents into world changes
//! - [`simulation`] drives one tick of all of the above
pub mod error;
pub mod influence;
pub mod providers;
pub mod resolve;
pub mod simulation;
pub mod steering;
pub mod world;

pub use error::{Result, RuntimeError};
pub use providers::ai::{AgentSlots, AiContext, BehaviorTree};
pub use providers::fsm::{State, StateId, StateMachine, Transition};
pub use resolve::Outcome;
pub use simulation::{Brain, FieldCache, Simulation, TickReport};
pub use steering::{Primary, Separation, SteeringProfile};
pub use world::{Actor, ActorFlags, HealCooldown, Motion, Pickup, PickupKind, Waypoint, World};
