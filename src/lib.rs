//! A host-driven engine for small timed mini-games.
//!
//! Each game plugs into a [`session::Session`], which owns the state machine,
//! score, clock and deferred timers, and projects the game into renderer-agnostic
//! [`render::Primitive`]s. The host feeds it real time and input; nothing here
//! blocks or spawns threads.

pub mod catalog;
pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod games;
pub mod input;
pub mod render;
pub mod session;
