//! # Cinder Core
//!
//! A tick-driven block automaton for a fixed-size voxel world.
//!
//! [`Physics`] advances the world one tick at a time. Each behavior
//! simulator defers work through a [`TickQueue`] of packed countdown
//! entries, and a random ticker pokes a few cells per 16³ chunk every tick.
//! Per-block behaviors are plain function pointers held in
//! [`BlockCallbacks`].
//!
//! ```no_run
//! use cinder_core::{Level, Physics, PhysicsConfig, WorldEvents};
//! use cinder_utils::Dimensions;
//!
//! let events = WorldEvents::new();
//! let level = Level::empty(Dimensions::new(64, 32, 64)).unwrap();
//! let mut physics = Physics::new(level, &events, &PhysicsConfig::default());
//! physics.tick();
//! ```

pub mod behavior;
pub mod block;
pub mod config;
pub mod physics;
pub mod ticks;
pub mod world;

pub use behavior::{BlockAction, BlockCallbacks, BlockHandler};
pub use config::{ConfigError, PhysicsConfig};
pub use physics::Physics;
pub use ticks::{PackedEntry, TickQueue, TickState};
pub use world::{Level, LevelError, World, WorldEvent, WorldEvents};
