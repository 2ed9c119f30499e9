//! Enemy AI for Ocular.
//!
//! One state machine (Wandering, Chasing, Ready, Attacking) shared by every
//! archetype, parametrized by per-archetype profiles, plus the archetype
//! extensions that run beside it (ghost phasing, bee patrol).

pub mod agent;
pub mod extensions;
pub mod fsm;
pub mod profiles;

pub use ocular_core as core;

pub use agent::EnemyAgent;
pub use fsm::{EnemyContext, EnemyState, StepOutcome};
pub use profiles::{get_profile, EnemyProfile};
