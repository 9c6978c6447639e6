//! AI systems (perception, locomotion, vocalization, animation push)

pub mod animation;
pub mod fsm;
pub mod movement;
pub mod target;
pub mod vocalization;


// Re-export all systems
pub use animation::*;
pub use fsm::*;
pub use movement::*;
pub use target::*;
pub use vocalization::*;
