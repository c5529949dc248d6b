//! Combat systems (health, damage, attack)

pub mod damage;
pub mod weapon;


// Re-export all systems
pub use damage::*;
pub use weapon::*;
