mod panels;
mod settings;

pub use panels::*;
pub use settings::*;

use bevy::prelude::*;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(SettingsPlugin).add_plugins(PanelsPlugin);
    }
}
