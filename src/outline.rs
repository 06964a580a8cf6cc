use bevy::prelude::*;

use crate::cell::Cell;
use crate::config::OUTLINE_PADDING;
use crate::selection::Selected;

/// Ring drawn behind the selected cell
#[derive(Component)]
pub struct SelectionOutline {
    pub cell: Entity,
}

/// Spawn a ring for newly selected cells and drop rings whose cell lost the marker
pub fn manage_selection_outlines(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    added_selection: Query<(Entity, &Cell, &Transform), Added<Selected>>,
    mut removed_selection: RemovedComponents<Selected>,
    outlines: Query<(Entity, &SelectionOutline)>,
) {
    for (entity, cell, transform) in added_selection.iter() {
        let outer = cell.radius + OUTLINE_PADDING;
        commands.spawn((
            SelectionOutline { cell: entity },
            Mesh2d(meshes.add(Annulus::new(outer - 1.5, outer))),
            MeshMaterial2d(materials.add(ColorMaterial::from_color(Color::srgba(1.0, 1.0, 0.0, 0.8)))),
            Transform::from_xyz(transform.translation.x, transform.translation.y, -0.1),
        ));
    }

    // also fires when the selected cell is despawned
    for removed in removed_selection.read() {
        for (outline_entity, outline) in outlines.iter() {
            if outline.cell == removed {
                commands.entity(outline_entity).despawn();
            }
        }
    }
}

/// Keep rings centred on their cells
pub fn update_outline_positions(
    selected_cells: Query<&Transform, (With<Selected>, Without<SelectionOutline>)>,
    mut outlines: Query<(&SelectionOutline, &mut Transform)>,
) {
    for (outline, mut outline_transform) in outlines.iter_mut() {
        if let Ok(cell_transform) = selected_cells.get(outline.cell) {
            outline_transform.translation.x = cell_transform.translation.x;
            outline_transform.translation.y = cell_transform.translation.y;
        }
    }
}
