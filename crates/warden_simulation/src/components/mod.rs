//! ECS Components для агентов
//!
//! Организация по доменам:
//! - actor: Agent marker, Health, HealthBar (presenter)
//! - config: AgentConfig (радиусы, маски, тайминги)
//! - movement: MovementCommand (Navigator seam)
//!
//! AI состояние (PerceptionState, WalkPoint, ...) живёт в `crate::ai`,
//! cooldown атаки: в `crate::combat`.

pub mod actor;
pub mod config;
pub mod movement;

// Re-exports для удобного импорта
pub use actor::*;
pub use config::*;
pub use movement::*;
