use crate::config::*;
use crate::food::FoodParticle;
use bevy::prelude::*;
use rand::Rng;

/// Cell component. Owned and mutated by the simulation; the HUD only reads it.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub radius: f32,
    pub velocity: Vec2,
    pub cytosol: f32,
    pub cytosol_min: f32,
    pub cytosol_max: f32,
    pub active: bool,
}

impl Cell {
    pub fn new(radius: f32, velocity: Vec2) -> Self {
        Self {
            radius,
            velocity,
            cytosol: STARTING_CYTOSOL,
            cytosol_min: CELL_CYTOSOL_MIN,
            cytosol_max: CELL_CYTOSOL_MAX,
            active: true,
        }
    }

    /// Maximum cytosol this cell can hold right now. Bigger cells store more.
    pub fn effective_cytosol_max(&self) -> f32 {
        self.cytosol_max * (self.radius / REFERENCE_CELL_RADIUS).max(0.0)
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    pub fn add_cytosol(&mut self, amount: f32) {
        self.cytosol = (self.cytosol + amount).min(self.effective_cytosol_max());
    }

    pub fn drain_cytosol(&mut self, amount: f32) {
        self.cytosol = (self.cytosol - amount).max(self.cytosol_min);
    }

    pub fn is_starved(&self) -> bool {
        self.cytosol <= self.cytosol_min
    }
}

/// Sub-entity of a cell, spawned as its child
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Organelle;

/// Ordered list of live cells.
///
/// Order is not stable: removal swaps the last cell into the freed slot.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct CellRegistry {
    cells: Vec<Entity>,
}

impl CellRegistry {
    pub fn register(&mut self, entity: Entity) {
        if !self.cells.contains(&entity) {
            self.cells.push(entity);
        }
    }

    pub fn unregister(&mut self, entity: Entity) {
        if let Some(index) = self.cells.iter().position(|&e| e == entity) {
            self.cells.swap_remove(index);
        }
    }

    pub fn as_slice(&self) -> &[Entity] {
        &self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.cells.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl FromIterator<Entity> for CellRegistry {
    fn from_iter<I: IntoIterator<Item = Entity>>(iter: I) -> Self {
        let mut registry = Self::default();
        for entity in iter {
            registry.register(entity);
        }
        registry
    }
}

/// Observer keeping the registry in step with spawned cells
pub fn register_cell(trigger: Trigger<OnAdd, Cell>, mut registry: ResMut<CellRegistry>) {
    registry.register(trigger.entity());
}

/// Observer keeping the registry in step with despawned cells
pub fn unregister_cell(trigger: Trigger<OnRemove, Cell>, mut registry: ResMut<CellRegistry>) {
    registry.unregister(trigger.entity());
}

/// Startup system spawning the initial population
pub fn spawn_initial_cells(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    spawn_random_cells(&mut commands, &mut meshes, &mut materials, INITIAL_CELL_COUNT);
}

/// Spawn `count` cells at random positions, each carrying its organelles
pub fn spawn_random_cells(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<ColorMaterial>,
    count: usize,
) {
    let mut rng = rand::thread_rng();
    let membrane = materials.add(ColorMaterial::from_color(Color::srgba(0.3, 0.7, 0.9, 0.6)));
    let organelle_mesh = meshes.add(Circle::new(ORGANELLE_RADIUS));
    let organelle_material = materials.add(ColorMaterial::from_color(Color::srgb(0.9, 0.5, 0.8)));

    for _ in 0..count {
        let x = rng.gen_range(-CELL_SPAWN_RANGE..CELL_SPAWN_RANGE);
        let y = rng.gen_range(-CELL_SPAWN_RANGE..CELL_SPAWN_RANGE);
        let radius = rng.gen_range(MIN_CELL_RADIUS..MAX_CELL_RADIUS);
        let heading = rng.gen_range(0.0..std::f32::consts::TAU);
        let speed = rng.gen_range(0.0..MAX_CELL_SPEED);

        commands
            .spawn((
                Cell::new(radius, Vec2::from_angle(heading) * speed),
                Mesh2d(meshes.add(Circle::new(radius))),
                MeshMaterial2d(membrane.clone()),
                Transform::from_xyz(x, y, WORLD_PLANE_Z),
            ))
            .with_children(|parent| {
                for _ in 0..ORGANELLES_PER_CELL {
                    let offset = Vec2::from_angle(rng.gen_range(0.0..std::f32::consts::TAU))
                        * rng.gen_range(0.0..radius * 0.5);
                    parent.spawn((
                        Organelle,
                        Mesh2d(organelle_mesh.clone()),
                        MeshMaterial2d(organelle_material.clone()),
                        Transform::from_xyz(offset.x, offset.y, 0.1),
                    ));
                }
            });
    }
}

/// Move cells along their velocity with a little random jitter, bouncing at the world edge
pub fn drift_cells(time: Res<Time>, mut cells: Query<(&mut Cell, &mut Transform)>) {
    let dt = time.delta_secs();
    let mut rng = rand::thread_rng();

    for (mut cell, mut transform) in cells.iter_mut() {
        let jitter = Vec2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)) * CELL_JITTER * dt;
        cell.velocity = (cell.velocity + jitter).clamp_length_max(MAX_CELL_SPEED);

        let mut position = transform.translation.truncate() + cell.velocity * dt;
        if position.x.abs() > WORLD_BOUNDS {
            cell.velocity.x = -cell.velocity.x;
            position.x = position.x.clamp(-WORLD_BOUNDS, WORLD_BOUNDS);
        }
        if position.y.abs() > WORLD_BOUNDS {
            cell.velocity.y = -cell.velocity.y;
            position.y = position.y.clamp(-WORLD_BOUNDS, WORLD_BOUNDS);
        }
        transform.translation.x = position.x;
        transform.translation.y = position.y;
    }
}

/// Drain cytosol over time and refill it from overlapping food
pub fn cell_metabolism(
    mut commands: Commands,
    time: Res<Time>,
    mut cells: Query<(&mut Cell, &Transform)>,
    food: Query<(Entity, &Transform), With<FoodParticle>>,
) {
    let drain = CYTOSOL_DRAIN_PER_SECOND * time.delta_secs();
    let mut eaten: Vec<Entity> = Vec::new();

    for (mut cell, transform) in cells.iter_mut() {
        cell.drain_cytosol(drain);

        let position = transform.translation.truncate();
        for (particle, particle_transform) in food.iter() {
            if eaten.contains(&particle) {
                continue;
            }
            if position.distance(particle_transform.translation.truncate()) <= cell.radius {
                cell.add_cytosol(FOOD_CYTOSOL);
                eaten.push(particle);
            }
        }
    }

    for particle in eaten {
        commands.entity(particle).despawn();
    }
}

/// Despawn cells whose cytosol ran out
pub fn remove_starved_cells(mut commands: Commands, cells: Query<(Entity, &Cell)>) {
    for (entity, cell) in cells.iter() {
        if cell.is_starved() {
            commands.entity(entity).despawn_recursive();
        }
    }
}

/// Respawn a batch of cells if the population died out
pub fn population_failsafe(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    registry: Res<CellRegistry>,
) {
    if registry.is_empty() {
        info!("Population extinct, respawning {} cells", FAILSAFE_RESPAWN_COUNT);
        spawn_random_cells(&mut commands, &mut meshes, &mut materials, FAILSAFE_RESPAWN_COUNT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unregister_swaps_last_into_freed_slot() {
        let [a, b, c] = [Entity::from_raw(1), Entity::from_raw(2), Entity::from_raw(3)];
        let mut registry: CellRegistry = [a, b, c].into_iter().collect();

        registry.unregister(a);

        assert_eq!(registry.as_slice(), &[c, b]);
    }

    #[test]
    fn register_ignores_duplicates() {
        let a = Entity::from_raw(7);
        let mut registry = CellRegistry::default();
        registry.register(a);
        registry.register(a);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn cytosol_stays_within_bounds() {
        let mut cell = Cell::new(REFERENCE_CELL_RADIUS, Vec2::ZERO);
        cell.add_cytosol(10.0);
        assert_eq!(cell.cytosol, cell.effective_cytosol_max());

        cell.drain_cytosol(10.0);
        assert_eq!(cell.cytosol, CELL_CYTOSOL_MIN);
        assert!(cell.is_starved());
    }

    #[test]
    fn effective_max_scales_with_radius() {
        let small = Cell::new(REFERENCE_CELL_RADIUS / 2.0, Vec2::ZERO);
        let large = Cell::new(REFERENCE_CELL_RADIUS * 2.0, Vec2::ZERO);
        assert!((small.effective_cytosol_max() - CELL_CYTOSOL_MAX / 2.0).abs() < 1e-6);
        assert!((large.effective_cytosol_max() - CELL_CYTOSOL_MAX * 2.0).abs() < 1e-6);
    }
}
