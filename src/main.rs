use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use cell_hud::camera::{CameraState, camera_pan, camera_zoom, setup_camera};
use cell_hud::cell::{
    CellRegistry, cell_metabolism, drift_cells, population_failsafe, register_cell, remove_starved_cells,
    spawn_initial_cells, unregister_cell,
};
use cell_hud::food::{FoodSpawnTimer, spawn_food};
use cell_hud::hud::{HudPanelsPlugin, HudPlugin};
use cell_hud::outline::{manage_selection_outlines, update_outline_positions};

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Cell HUD".to_string(),
                        resolution: (1280.0, 720.0).into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(LogPlugin {
                    level: Level::INFO,
                    filter: "wgpu=error,naga=warn,cell_hud=info".to_string(),
                    ..default()
                }),
        )
        .add_plugins(EguiPlugin)
        .insert_resource(ClearColor(Color::srgb(0.04, 0.06, 0.1)))
        // Host simulation
        .init_resource::<CameraState>()
        .init_resource::<CellRegistry>()
        .init_resource::<FoodSpawnTimer>()
        .add_observer(register_cell)
        .add_observer(unregister_cell)
        .add_systems(Startup, (setup_camera, spawn_initial_cells))
        .add_systems(Update, (camera_zoom, camera_pan))
        .add_systems(
            Update,
            (
                spawn_food,
                drift_cells,
                cell_metabolism,
                remove_starved_cells,
                population_failsafe,
            )
                .chain(),
        )
        // Overlay
        .add_plugins((HudPlugin, HudPanelsPlugin))
        .add_systems(Update, (manage_selection_outlines, update_outline_positions).chain())
        .run();
}
