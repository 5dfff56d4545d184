use bevy::prelude::*;
use bevy_egui::{egui, EguiContext, EguiContextSettings, EguiContexts, EguiPrimaryContextPass};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::placement::{AlignmentConfig, AxisType, RandomRange, RotationGrid};
use crate::scene::SpawnPalette;

/// Application settings that persist to disk
#[derive(Resource, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct DesignerSettings {
    /// Rules applied to every spawned object
    pub alignment: AlignmentConfig,
    /// Rotation snap in degrees (0.0 = disabled)
    pub rotation_snap: f32,
    /// Camera movement speed
    pub camera_speed: f32,
    /// Camera mouse sensitivity
    pub camera_sensitivity: f32,
    /// UI scale factor (1.0 = default)
    pub ui_scale: f32,
    /// Show hotkey hints in the status bar
    pub show_hints: bool,
}

impl Default for DesignerSettings {
    fn default() -> Self {
        Self {
            alignment: AlignmentConfig::default(),
            rotation_snap: 15.0,
            camera_speed: 10.0,
            camera_sensitivity: 0.003,
            ui_scale: 1.5,
            show_hints: true,
        }
    }
}

impl DesignerSettings {
    /// Get the settings file path
    fn file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push("bevy_spawn_designer");
            p.push("settings.ron");
            p
        })
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::file_path() else {
            return Self::default();
        };

        match fs::read_to_string(&path) {
            Ok(content) => Self::from_ron(&content),
            Err(_) => Self::default(),
        }
    }

    /// Parse settings, falling back to defaults when the text is invalid
    pub fn from_ron(content: &str) -> Self {
        ron::from_str(content).unwrap_or_else(|e| {
            warn!("Ignoring invalid settings file: {}", e);
            Self::default()
        })
    }

    /// Save settings to disk
    pub fn save(&self) {
        let Some(path) = Self::file_path() else {
            error!("Could not determine config directory");
            return;
        };

        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                error!("Failed to create config directory: {}", e);
                return;
            }
        }

        match ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            Ok(content) => {
                if let Err(e) = fs::write(&path, content) {
                    error!("Failed to save settings: {}", e);
                } else {
                    debug!("Settings saved to: {:?}", path);
                }
            }
            Err(e) => {
                error!("Failed to serialize settings: {}", e);
            }
        }
    }

    pub fn rotation_grid(&self) -> RotationGrid {
        RotationGrid::new(self.rotation_snap)
    }
}

/// Resource to track if settings window is open
#[derive(Resource, Default)]
pub struct SettingsWindowState {
    pub open: bool,
}

pub struct SettingsPlugin;

impl Plugin for SettingsPlugin {
    fn build(&self, app: &mut App) {
        let settings = DesignerSettings::load();
        app.insert_resource(settings)
            .init_resource::<SettingsWindowState>()
            .add_systems(Update, (apply_ui_scale, toggle_settings_window))
            .add_systems(EguiPrimaryContextPass, draw_settings_window);
    }
}

/// Apply UI scale to egui
fn apply_ui_scale(
    settings: Res<DesignerSettings>,
    mut query: Query<&mut EguiContextSettings, With<EguiContext>>,
) {
    for mut ctx_settings in &mut query {
        ctx_settings.scale_factor = settings.ui_scale;
    }
}

/// F1 opens and closes the settings window
fn toggle_settings_window(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut window_state: ResMut<SettingsWindowState>,
) {
    if keyboard.just_pressed(KeyCode::F1) {
        window_state.open = !window_state.open;
    }
}

fn axis_combo(ui: &mut egui::Ui, id: &str, axis: &mut AxisType) -> bool {
    let mut changed = false;
    egui::ComboBox::from_id_salt(id)
        .selected_text(axis.label())
        .show_ui(ui, |ui| {
            for candidate in AxisType::ALL {
                changed |= ui
                    .selectable_value(axis, candidate, candidate.label())
                    .changed();
            }
        });
    changed
}

fn vec3_row(ui: &mut egui::Ui, value: &mut Vec3) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        for (label, component) in [("x", &mut value.x), ("y", &mut value.y), ("z", &mut value.z)] {
            ui.label(label);
            changed |= ui
                .add(egui::DragValue::new(component).speed(0.05))
                .changed();
        }
    });
    changed
}

fn range_row(ui: &mut egui::Ui, range: &mut RandomRange, speed: f64) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        changed |= ui
            .add(egui::DragValue::new(&mut range.min).speed(speed).prefix("min "))
            .changed();
        changed |= ui
            .add(egui::DragValue::new(&mut range.max).speed(speed).prefix("max "))
            .changed();
        changed |= ui.checkbox(&mut range.negate, "±").changed();
    });
    changed
}

fn alignment_section(ui: &mut egui::Ui, alignment: &mut AlignmentConfig) -> bool {
    let mut changed = false;

    egui::Grid::new("settings_alignment_grid")
        .num_columns(2)
        .spacing([10.0, 8.0])
        .show(ui, |ui| {
            ui.label("Normal Axis:");
            changed |= axis_combo(ui, "normal_axis", &mut alignment.normal_axis);
            ui.end_row();

            ui.label("Cursor Axis:");
            changed |= axis_combo(ui, "cursor_axis", &mut alignment.cursor_axis);
            ui.end_row();

            ui.label("Scale To Cursor:");
            changed |= ui.checkbox(&mut alignment.scale_toward_cursor, "").changed();
            ui.end_row();

            ui.label("Snap Rotation:");
            ui.horizontal(|ui| {
                changed |= ui.checkbox(&mut alignment.snap_rotation_x, "Roll").changed();
                changed |= ui.checkbox(&mut alignment.snap_rotation_y, "Pitch").changed();
                changed |= ui.checkbox(&mut alignment.snap_rotation_z, "Yaw").changed();
            });
            ui.end_row();

            ui.label("Relative Offset:");
            changed |= vec3_row(ui, &mut alignment.relative_offset);
            ui.end_row();

            ui.label("World Offset:");
            changed |= vec3_row(ui, &mut alignment.world_offset);
            ui.end_row();
        });

    if alignment.has_axis_conflict() {
        ui.colored_label(
            egui::Color32::from_rgb(230, 160, 60),
            "Normal and cursor axis share a family; the unaligned rotation is used.",
        );
    }

    ui.add_space(4.0);
    changed |= ui
        .checkbox(&mut alignment.apply_random_rotation, "Random Rotation")
        .changed();
    ui.add_enabled_ui(alignment.apply_random_rotation, |ui| {
        for (label, range) in ["Roll", "Pitch", "Yaw"].iter().zip(&mut alignment.random_rotation) {
            ui.horizontal(|ui| {
                ui.label(*label);
                changed |= range_row(ui, range, 1.0);
            });
        }
    });

    changed |= ui
        .checkbox(&mut alignment.apply_random_scale, "Random Scale")
        .changed();
    ui.add_enabled_ui(alignment.apply_random_scale, |ui| {
        for (label, range) in ["X", "Y", "Z"].iter().zip(&mut alignment.random_scale) {
            ui.horizontal(|ui| {
                ui.label(*label);
                changed |= range_row(ui, range, 0.01);
            });
        }
    });

    changed
}

/// Draw the settings window
fn draw_settings_window(
    mut contexts: EguiContexts,
    mut settings: ResMut<DesignerSettings>,
    mut palette: ResMut<SpawnPalette>,
    mut window_state: ResMut<SettingsWindowState>,
) -> Result {
    let ctx = contexts.ctx_mut()?;

    // Edit a copy so change detection only fires on real edits.
    let mut edited = settings.clone();
    let mut changed = false;

    egui::Window::new("Spawn Settings")
        .open(&mut window_state.open)
        .resizable(false)
        .show(ctx, |ui| {
            ui.heading("Alignment");
            changed |= alignment_section(ui, &mut edited.alignment);

            ui.add_space(8.0);
            ui.separator();
            ui.add_space(4.0);

            ui.heading("Palette");
            ui.horizontal_wrapped(|ui| {
                for entry in &mut palette.entries {
                    ui.checkbox(&mut entry.enabled, entry.shape.display_name());
                }
            });

            ui.add_space(8.0);
            ui.separator();
            ui.add_space(4.0);

            ui.heading("Editor");
            egui::Grid::new("settings_editor_grid")
                .num_columns(2)
                .spacing([10.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Rotation Snap:");
                    changed |= ui
                        .add(
                            egui::Slider::new(&mut edited.rotation_snap, 0.0..=90.0)
                                .step_by(5.0)
                                .suffix("°"),
                        )
                        .changed();
                    ui.end_row();

                    ui.label("Movement Speed:");
                    changed |= ui
                        .add(egui::Slider::new(&mut edited.camera_speed, 1.0..=50.0).step_by(1.0))
                        .changed();
                    ui.end_row();

                    ui.label("Mouse Sensitivity:");
                    changed |= ui
                        .add(egui::Slider::new(&mut edited.camera_sensitivity, 0.001..=0.01))
                        .changed();
                    ui.end_row();

                    ui.label("UI Scale:");
                    changed |= ui
                        .add(
                            egui::Slider::new(&mut edited.ui_scale, 0.75..=3.0)
                                .step_by(0.25)
                                .suffix("x"),
                        )
                        .changed();
                    ui.end_row();

                    ui.label("Show Hints:");
                    changed |= ui.checkbox(&mut edited.show_hints, "").changed();
                    ui.end_row();
                });

            ui.add_space(8.0);
            if ui.button("Reset to Defaults").clicked() {
                edited = DesignerSettings::default();
                changed = true;
            }
        });

    if changed && edited != *settings {
        *settings = edited;
        settings.save();
    }
    Ok(())
}
