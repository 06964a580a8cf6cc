use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::camera::{CameraView, MainCamera};
use crate::cell::{Cell, CellRegistry, Organelle};
use crate::config::HudConfig;

/// Marker component for the currently selected cell
#[derive(Component)]
pub struct Selected;

/// The cell the detail panel follows, plus where it sat in the registry at
/// the last poll.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SelectedCell {
    entity: Option<Entity>,
    index: usize,
}

impl SelectedCell {
    pub fn entity(&self) -> Option<Entity> {
        self.entity
    }

    /// 0-based registry position as of the last revalidation
    pub fn index(&self) -> usize {
        self.index
    }

    /// Point the selection at `entity`. The index is refreshed on the next poll.
    pub fn select(&mut self, entity: Entity) {
        self.entity = Some(entity);
    }

    pub fn clear(&mut self) {
        self.entity = None;
        self.index = 0;
    }

    /// Re-resolve the selection against the current registry.
    ///
    /// A selection that is still alive and listed keeps its entity and picks up
    /// its new index. Anything else falls back to the first registered cell,
    /// or to nothing when the registry is empty.
    pub fn revalidate(&mut self, registry: &[Entity], is_alive: impl Fn(Entity) -> bool) -> Option<Entity> {
        let Some(&first) = registry.first() else {
            self.clear();
            return None;
        };

        if let Some(entity) = self.entity.filter(|&entity| is_alive(entity)) {
            if let Some(index) = registry.iter().position(|&e| e == entity) {
                self.index = index;
                return Some(entity);
            }
        }

        self.entity = Some(first);
        self.index = 0;
        Some(first)
    }
}

/// How a click is resolved to a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickPolicy {
    /// Try the closest organelle first and select its cell, then fall back to
    /// cell bodies tested against their plain radius.
    #[default]
    OrganelleFirst,
    /// Only test cell bodies, against a radius widened by the configured tolerance.
    DirectOnly,
}

/// A cell body that can be hit by a click
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickCandidate {
    pub entity: Entity,
    pub position: Vec2,
    pub radius: f32,
}

/// Request to select whatever cell sits at a world position
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PickRequested {
    pub world: Vec2,
}

/// Set while the pointer is over a HUD panel so clicks on the panel don't
/// reach the world.
#[derive(Resource, Debug, Default)]
pub struct HudPointerCapture(pub bool);

/// Owner of the organelle closest to `world`, if any lies strictly within `max_distance`
pub fn nearest_organelle_owner(
    world: Vec2,
    organelles: impl IntoIterator<Item = (Entity, Vec2)>,
    max_distance: f32,
) -> Option<Entity> {
    let mut closest: Option<(Entity, f32)> = None;

    for (owner, position) in organelles {
        let distance = world.distance(position);
        if distance >= max_distance {
            continue;
        }
        match closest {
            None => closest = Some((owner, distance)),
            Some((_, closest_dist)) if distance < closest_dist => closest = Some((owner, distance)),
            _ => {}
        }
    }

    closest.map(|(owner, _)| owner)
}

/// Closest cell whose (scaled) radius contains `world`
pub fn nearest_cell(
    world: Vec2,
    candidates: impl IntoIterator<Item = PickCandidate>,
    radius_scale: f32,
) -> Option<Entity> {
    let mut closest: Option<(Entity, f32)> = None;

    for candidate in candidates {
        let distance = world.distance(candidate.position);
        if distance > candidate.radius * radius_scale {
            continue;
        }
        match closest {
            None => closest = Some((candidate.entity, distance)),
            Some((_, closest_dist)) if distance < closest_dist => {
                closest = Some((candidate.entity, distance));
            }
            _ => {}
        }
    }

    closest.map(|(entity, _)| entity)
}

/// Resolve a world position to the cell it should select under `config.pick_policy`.
///
/// `organelles` yields `(owner, position)` pairs; an organelle whose owner
/// fails `is_live` is skipped in favour of the cell-body test.
pub fn resolve_pick(
    world: Vec2,
    config: &HudConfig,
    organelles: impl IntoIterator<Item = (Entity, Vec2)>,
    cells: impl IntoIterator<Item = PickCandidate>,
    is_live: impl Fn(Entity) -> bool,
) -> Option<Entity> {
    match config.pick_policy {
        PickPolicy::OrganelleFirst => {
            let owner = nearest_organelle_owner(world, organelles, config.organelle_pick_radius);
            match owner {
                Some(owner) if is_live(owner) => Some(owner),
                _ => nearest_cell(world, cells, 1.0),
            }
        }
        PickPolicy::DirectOnly => nearest_cell(world, cells, config.direct_pick_tolerance),
    }
}

/// Turn a left-button release over the world into a [`PickRequested`]
pub fn request_pick_at_cursor(
    mouse_button: Res<ButtonInput<MouseButton>>,
    capture: Res<HudPointerCapture>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Transform, &OrthographicProjection), With<MainCamera>>,
    mut picks: EventWriter<PickRequested>,
) {
    if !mouse_button.just_released(MouseButton::Left) || capture.0 {
        return;
    }

    let Ok(window) = windows.get_single() else {
        return;
    };
    let Ok((transform, projection)) = cameras.get_single() else {
        debug!("No main camera, ignoring click");
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };

    let view = CameraView::new(transform, projection, Vec2::new(window.width(), window.height()));
    picks.send(PickRequested {
        world: view.screen_to_world(cursor).truncate(),
    });
}

/// Apply pending pick requests to the selection. Misses keep the current selection.
pub fn apply_pick_requests(
    mut requests: EventReader<PickRequested>,
    config: Res<HudConfig>,
    registry: Option<Res<CellRegistry>>,
    cells: Query<(&Cell, &Transform)>,
    organelles: Query<(&Parent, &GlobalTransform), With<Organelle>>,
    mut selected: ResMut<SelectedCell>,
) {
    let Some(registry) = registry else {
        requests.clear();
        return;
    };

    let is_live = |entity: Entity| cells.get(entity).is_ok_and(|(cell, _)| cell.active);

    for request in requests.read() {
        let candidates = registry.iter().filter_map(|entity| {
            let (cell, transform) = cells.get(entity).ok()?;
            cell.active.then(|| PickCandidate {
                entity,
                position: transform.translation.truncate(),
                radius: cell.radius,
            })
        });
        let organelle_points = organelles
            .iter()
            .map(|(parent, transform)| (parent.get(), transform.translation().truncate()));

        match resolve_pick(request.world, &config, organelle_points, candidates, is_live) {
            Some(entity) => {
                debug!("Selected cell {entity:?} at {}", request.world);
                selected.select(entity);
            }
            None => debug!("No cell at {}, keeping selection", request.world),
        }
    }
}

/// Move the [`Selected`] marker onto whatever the tracker points at
pub fn sync_selected_marker(
    mut commands: Commands,
    selected: Res<SelectedCell>,
    marked: Query<Entity, With<Selected>>,
) {
    if !selected.is_changed() {
        return;
    }

    for entity in marked.iter() {
        if Some(entity) != selected.entity() {
            commands.entity(entity).remove::<Selected>();
        }
    }

    if let Some(entity) = selected.entity() {
        if !marked.contains(entity) {
            if let Some(mut entity_commands) = commands.get_entity(entity) {
                entity_commands.try_insert(Selected);
            }
        }
    }
}
