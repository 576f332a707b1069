use bitflags::bitflags;
use game_core::{Action, Blackboard, EntityId, Position, Team};
use glam::Vec2;

use crate::steering::SteeringProfile;

bitflags! {
    /// Tags that select actors for queries and field sources.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ActorFlags: u8 {
        /// Controlled from outside the decision layer.
        const PLAYER = 1 << 0;
        /// Member of a pack; source of the hive-pack field.
        const HIVE   = 1 << 1;
    }
}

/// Turn-based recharge for healing abilities.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HealCooldown {
    pub turns_left: u32,
    pub recharge_turns: u32,
}

impl HealCooldown {
    /// A cooldown that is ready immediately.
    pub fn ready(recharge_turns: u32) -> Self {
        Self {
            turns_left: 0,
            recharge_turns,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.turns_left == 0
    }

    pub fn trigger(&mut self) {
        self.turns_left = self.recharge_turns;
    }

    pub fn tick(&mut self) {
        self.turns_left = self.turns_left.saturating_sub(1);
    }
}

/// Continuous kinematic state for steering-driven actors.
#[derive(Clone, Debug, PartialEq)]
pub struct Motion {
    pub position: Vec2,
    pub velocity: Vec2,
    pub max_speed: f32,
    pub acceleration: f32,
    /// Accumulated steering for the current tick.
    pub steer: Vec2,
    pub profile: SteeringProfile,
}

impl Motion {
    pub const DEFAULT_MAX_SPEED: f32 = 5.0;
    pub const DEFAULT_ACCELERATION: f32 = 2.0;

    pub fn new(position: Vec2, profile: SteeringProfile) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            max_speed: Self::DEFAULT_MAX_SPEED,
            acceleration: Self::DEFAULT_ACCELERATION,
            steer: Vec2::ZERO,
            profile,
        }
    }

    #[must_use]
    pub fn with_max_speed(mut self, max_speed: f32) -> Self {
        self.max_speed = max_speed;
        self
    }

    #[must_use]
    pub fn with_acceleration(mut self, acceleration: f32) -> Self {
        self.acceleration = acceleration;
        self
    }

    #[must_use]
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }
}

/// An agent in the world.
#[derive(Clone, Debug)]
pub struct Actor {
    pub id: EntityId,
    pub position: Position,
    pub team: Team,
    pub hitpoints: f32,
    pub melee_damage: f32,
    /// Intent for the current tick.
    pub action: Action,
    /// Intent resolved on the previous tick.
    pub previous_action: Action,
    pub flags: ActorFlags,
    pub blackboard: Blackboard,
    pub master: Option<EntityId>,
    pub heal_cooldown: Option<HealCooldown>,
    pub motion: Option<Motion>,
}

impl Actor {
    pub const DEFAULT_HITPOINTS: f32 = 100.0;
    pub const DEFAULT_MELEE_DAMAGE: f32 = 20.0;

    /// A blank actor; the id is assigned when it is spawned.
    pub fn new(position: Position, team: Team) -> Self {
        Self {
            id: EntityId(0),
            position,
            team,
            hitpoints: Self::DEFAULT_HITPOINTS,
            melee_damage: Self::DEFAULT_MELEE_DAMAGE,
            action: Action::Nop,
            previous_action: Action::Nop,
            flags: ActorFlags::empty(),
            blackboard: Blackboard::new(),
            master: None,
            heal_cooldown: None,
            motion: None,
        }
    }

    /// Default monster: monsters team, 100 hp, 20 melee.
    pub fn monster(position: Position) -> Self {
        Self::new(position, Team::MONSTERS)
    }

    pub fn player(position: Position) -> Self {
        Self::new(position, Team::PLAYER).with_flags(ActorFlags::PLAYER)
    }

    #[must_use]
    pub fn with_hitpoints(mut self, hitpoints: f32) -> Self {
        self.hitpoints = hitpoints;
        self
    }

    #[must_use]
    pub fn with_melee_damage(mut self, damage: f32) -> Self {
        self.melee_damage = damage;
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: ActorFlags) -> Self {
        self.flags |= flags;
        self
    }

    #[must_use]
    pub fn with_heal_cooldown(mut self, recharge_turns: u32) -> Self {
        self.heal_cooldown = Some(HealCooldown::ready(recharge_turns));
        self
    }

    /// Attaches kinematics starting at the actor's tile.
    #[must_use]
    pub fn with_motion(mut self, profile: SteeringProfile) -> Self {
        self.motion = Some(Motion::new(self.position.to_vec2(), profile));
        self
    }

    #[must_use]
    pub fn with_custom_motion(mut self, motion: Motion) -> Self {
        self.motion = Some(motion);
        self
    }

    pub fn is_hostile_to(&self, other: &Actor) -> bool {
        self.team.is_hostile_to(other.team)
    }

    /// Continuous position if kinematic, else the tile centre.
    pub fn world_position(&self) -> Vec2 {
        self.motion
            .as_ref()
            .map_or_else(|| self.position.to_vec2(), |m| m.position)
    }

    pub fn velocity(&self) -> Vec2 {
        self.motion.as_ref().map_or(Vec2::ZERO, |m| m.velocity)
    }
}
