//! Placement transform solver and the spawn tool state machine.
//!
//! Nothing in this module touches the ECS world. Hosts plug in through the
//! traits in [`host`] and convert their values with [`frame`].

mod axis;
mod basis;
mod config;
mod error;
pub mod frame;
pub mod host;
mod random;
mod rotator;
mod session;
mod solver;

pub use axis::*;
pub use basis::*;
pub use config::*;
pub use error::*;
pub use host::*;
pub use random::*;
pub use rotator::*;
pub use session::*;
pub use solver::*;
