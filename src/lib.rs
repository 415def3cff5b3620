//! Simulation core of a top-down arcade shooter: a ship at the centre of
//! the screen turns and fires at asteroids drifting in from the edges.
//!
//! The host calls [`compute::tick`] once per fixed tick and draws the
//! returned [`entities::GameState`] afterwards.

pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod interfaces;
pub mod render;
pub mod timer;
