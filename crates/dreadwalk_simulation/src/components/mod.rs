//! ECS Components для enemy entity и его host-адаптеров
//!
//! Организация по доменам:
//! - enemy: marker + required components
//! - target: цель преследования (TargetTag, TargetLink)
//! - navigation: NavMesh агент хоста и locomotion intent
//! - animation: animator хоста и snapshot параметров

pub mod animation;
pub mod enemy;
pub mod navigation;
pub mod target;

// Re-exports для удобного импорта
pub use animation::*;
pub use enemy::*;
pub use navigation::*;
pub use target::*;
