//! Implementation of chess environment, its rules and specifics.

pub mod attacks;
pub mod board;
pub mod core;
pub mod moves;
pub mod special;
pub mod state;
