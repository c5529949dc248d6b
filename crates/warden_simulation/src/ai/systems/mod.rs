//! AI systems (perception → selection → behavior)

pub mod movement;
pub mod perception;

// Re-export all systems
pub use movement::*;
pub use perception::*;
