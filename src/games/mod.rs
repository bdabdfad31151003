//! The three games, each implementing [`crate::session::Game`].

pub mod dots;
pub mod maze;
pub mod waste;
