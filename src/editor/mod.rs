mod camera;
mod input;
mod plugin;
mod spawn_tool;
mod state;
mod visualizer;

pub use camera::*;
pub use input::*;
pub use plugin::*;
pub use spawn_tool::*;
pub use state::*;
pub use visualizer::*;
