//! # Bevy Spawn Designer
//!
//! Click-drag spawning of primitives onto physics surfaces.
//!
//! ## Quick Start
//!
//! ```no_run
//! use bevy::prelude::*;
//! use bevy_spawn_designer::DesignerPlugin;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(DesignerPlugin)
//!         .run();
//! }
//! ```
//!
//! ## Placing Assets
//!
//! - **View mode**: Camera navigation (WASD + mouse)
//! - **Designer mode** (`I`): hold Ctrl, press LMB on a collider and drag.
//!   The drag distance scales the draft, the drag direction orients it.
//!   RMB re-rolls the random rotation and scale, releasing LMB places it.
//!
//! The solver itself lives in [`placement`] and has no ECS dependency, so it
//! can be driven from tests or another host through the traits in
//! [`placement::host`].

pub mod constants;
pub mod editor;
pub mod placement;
pub mod scene;
pub mod ui;
pub mod utils;

// Re-export the main plugin
pub use editor::DesignerPlugin;

// Re-export editor state types
pub use editor::{DesignerMode, DraftHandle, EditorCamera, SpawnToolState};

// Re-export commonly used scene types
pub use scene::{DraftPreview, PlacedAsset, PrimitiveShape, SpawnPalette};

// Re-export the solver surface
pub use placement::{
    AlignmentConfig, AxisType, PlacementError, PlacementSession, PlacementSolution,
    PlacementWarning, SpawnOutcome, SpawnState, SpawnTool,
};

// Re-export settings
pub use ui::DesignerSettings;
