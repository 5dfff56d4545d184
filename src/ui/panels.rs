use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};

use super::DesignerSettings;
use crate::editor::{DesignerMode, SpawnToolState};
use crate::placement::SpawnState;

pub struct PanelsPlugin;

impl Plugin for PanelsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(EguiPrimaryContextPass, draw_status_bar);
    }
}

fn mode_color(mode: DesignerMode) -> egui::Color32 {
    match mode {
        DesignerMode::View => egui::Color32::from_rgb(100, 149, 237),
        DesignerMode::Designer => egui::Color32::from_rgb(100, 200, 100),
    }
}

fn hint_text(mode: DesignerMode, dragging: bool) -> &'static str {
    match (mode, dragging) {
        (DesignerMode::View, _) => "I: designer   RMB: look   WASD/Space/Q: move   F1: settings",
        (DesignerMode::Designer, false) => "Ctrl+LMB drag: spawn   Esc: view   F1: settings",
        (DesignerMode::Designer, true) => "Release LMB: place   RMB: reroll   Release Ctrl: cancel",
    }
}

/// Draw status bar showing current mode and spawn tool state
fn draw_status_bar(
    mut contexts: EguiContexts,
    mode: Res<State<DesignerMode>>,
    settings: Res<DesignerSettings>,
    tool_state: Res<SpawnToolState>,
) -> Result {
    let ctx = contexts.ctx_mut()?;
    let mode = *mode.get();
    let tool = &tool_state.tool;

    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        if settings.show_hints {
            ui.label(
                egui::RichText::new(hint_text(mode, tool.is_dragging()))
                    .size(12.0)
                    .color(egui::Color32::from_rgb(160, 160, 160)),
            );
        }

        ui.horizontal(|ui| {
            ui.colored_label(mode_color(mode), format!("[{}]", mode.label()));

            if mode == DesignerMode::Designer {
                ui.separator();
                let tool_text = match tool.state() {
                    SpawnState::Dragging(active) => {
                        format!("Dragging {}", active.draft.shape.display_name())
                    }
                    SpawnState::Idle if tool_state.armed => "Armed".to_string(),
                    SpawnState::Idle => "Idle".to_string(),
                };
                ui.label(tool_text);

                if let Some(session) = tool.session() {
                    ui.separator();
                    let scale = session.last_pose.scale;
                    ui.label(format!(
                        "Scale: {:.2} {:.2} {:.2}   Dist: {:.2}",
                        scale.x,
                        scale.y,
                        scale.z,
                        session.drag_distance()
                    ));
                }
            }

            ui.separator();

            if settings.rotation_snap > 0.0 && settings.alignment.snaps_any_rotation() {
                ui.label(format!("Rot: {:.0}deg", settings.rotation_snap));
            } else {
                ui.label("Rot: Off");
            }

            if settings.alignment.has_axis_conflict() {
                ui.separator();
                ui.colored_label(egui::Color32::from_rgb(230, 160, 60), "Axis conflict");
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if let Some(warning) = tool.last_warnings().first() {
                    ui.colored_label(egui::Color32::from_rgb(230, 160, 60), warning.to_string());
                }
            });
        });
    });
    Ok(())
}
