use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::config::*;
use crate::readout::{CellReadout, HudReadout, HudRefreshTimer, ReadoutLine, refresh_readout};
use crate::selection::{
    HudPointerCapture, PickRequested, SelectedCell, apply_pick_requests, request_pick_at_cursor,
    sync_selected_marker,
};

/// Whether the overlay is drawn
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudVisibility {
    pub visible: bool,
}

impl HudVisibility {
    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }
}

/// Polling, selection and input handling for the cell overlay.
///
/// Reads `CellRegistry`, `Cell`, `Organelle` and `FoodParticle` from the host
/// and never writes them. Drawing lives in [`HudPanelsPlugin`].
pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        let config = app.world_mut().get_resource_or_insert_with(HudConfig::default).clone();

        app.insert_resource(HudVisibility {
            visible: config.visible_on_start,
        })
        .insert_resource(HudRefreshTimer::from_config(&config))
        .init_resource::<SelectedCell>()
        .init_resource::<HudReadout>()
        .init_resource::<HudPointerCapture>()
        .add_event::<PickRequested>()
        .add_systems(Startup, announce_hud)
        .add_systems(
            Update,
            (
                toggle_hud,
                request_pick_at_cursor,
                apply_pick_requests,
                refresh_readout,
                sync_selected_marker,
            )
                .chain(),
        );
    }
}

/// egui panels for the overlay. Needs `bevy_egui::EguiPlugin` and [`HudPlugin`].
pub struct HudPanelsPlugin;

impl Plugin for HudPanelsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, draw_hud_panels.after(refresh_readout));
    }
}

fn announce_hud(config: Res<HudConfig>) {
    info!("Cell HUD loaded, press {:?} to toggle", config.toggle_key);
}

pub fn toggle_hud(
    keys: Res<ButtonInput<KeyCode>>,
    config: Res<HudConfig>,
    mut visibility: ResMut<HudVisibility>,
) {
    if keys.just_pressed(config.toggle_key) {
        visibility.toggle();
        debug!("HUD visible: {}", visibility.visible);
    }
}

fn panel_frame() -> egui::Frame {
    egui::Frame::none()
        .fill(egui::Color32::from_black_alpha(191))
        .inner_margin(egui::Margin::same(6.0))
        .rounding(egui::Rounding::same(3.0))
}

fn header(ui: &mut egui::Ui, text: &str) {
    ui.vertical_centered(|ui| {
        ui.label(
            egui::RichText::new(text)
                .size(15.0)
                .strong()
                .color(egui::Color32::from_rgb(77, 255, 204)),
        );
    });
}

fn readout_line(ui: &mut egui::Ui, line: &ReadoutLine) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 4.0;
        ui.label(egui::RichText::new(format!("{}:", line.label)).size(13.0).color(egui::Color32::from_gray(242)));
        ui.label(egui::RichText::new(&line.value).size(13.0).color(line.color));
        if let Some(unit) = line.unit {
            ui.label(egui::RichText::new(unit).size(13.0).color(egui::Color32::from_gray(242)));
        }
    });
}

fn cytosol_gauge(ui: &mut egui::Ui, cell: &CellReadout) {
    let gauge = egui::ProgressBar::new(cell.gauge_fill())
        .fill(cell.gauge_color())
        .desired_width(CELL_PANEL_WIDTH - 12.0)
        .desired_height(GAUGE_HEIGHT)
        .text(egui::RichText::new(&cell.gauge_label).size(11.0).strong().color(egui::Color32::BLACK));
    ui.add(gauge);
}

/// Draw the ecosystem and cell panels from the last readout
pub fn draw_hud_panels(
    mut contexts: EguiContexts,
    visibility: Res<HudVisibility>,
    readout: Res<HudReadout>,
    mut capture: ResMut<HudPointerCapture>,
) {
    let ctx = contexts.ctx_mut();
    capture.0 = visibility.visible && ctx.is_pointer_over_area();

    if !visibility.visible {
        return;
    }

    egui::Area::new(egui::Id::new("hud_ecosystem"))
        .anchor(egui::Align2::LEFT_TOP, [PANEL_MARGIN, PANEL_MARGIN])
        .show(ctx, |ui| {
            panel_frame().show(ui, |ui| {
                ui.set_width(ECOSYSTEM_PANEL_WIDTH - 12.0);
                header(ui, "ECOSYSTEM");
                for line in &readout.ecosystem.lines {
                    readout_line(ui, line);
                }
            });
        });

    egui::Area::new(egui::Id::new("hud_cell"))
        .anchor(egui::Align2::LEFT_BOTTOM, [PANEL_MARGIN, -PANEL_MARGIN])
        .show(ctx, |ui| {
            panel_frame().show(ui, |ui| {
                ui.set_width(CELL_PANEL_WIDTH - 12.0);
                match &readout.cell {
                    Some(cell) => {
                        header(ui, &cell.title);
                        cytosol_gauge(ui, cell);
                        ui.add_space(4.0);
                        for line in &cell.lines {
                            readout_line(ui, line);
                        }
                    }
                    None => {
                        ui.vertical_centered(|ui| {
                            ui.label(
                                egui::RichText::new(HUD_HINT)
                                    .size(12.0)
                                    .italics()
                                    .color(egui::Color32::from_gray(178)),
                            );
                        });
                    }
                }
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_twice_restores_visibility() {
        let mut visibility = HudVisibility { visible: true };
        visibility.toggle();
        assert!(!visibility.visible);
        visibility.toggle();
        assert!(visibility.visible);
    }
}
