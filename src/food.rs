use crate::config::*;
use bevy::prelude::*;
use rand::Rng;

/// Ephemeral food particle. Cells absorb it on contact.
#[derive(Component, Debug, Default)]
pub struct FoodParticle;

/// Timer resource for food spawning
#[derive(Resource)]
pub struct FoodSpawnTimer(pub Timer);

impl Default for FoodSpawnTimer {
    fn default() -> Self {
        Self(Timer::from_seconds(FOOD_SPAWN_INTERVAL, TimerMode::Repeating))
    }
}

/// System to spawn food at regular intervals until the cap is reached
pub fn spawn_food(
    time: Res<Time>,
    mut timer: ResMut<FoodSpawnTimer>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    food: Query<(), With<FoodParticle>>,
) {
    if !timer.0.tick(time.delta()).just_finished() || food.iter().count() >= MAX_FOOD {
        return;
    }

    let mut rng = rand::thread_rng();
    let x = rng.gen_range(-WORLD_BOUNDS..WORLD_BOUNDS);
    let y = rng.gen_range(-WORLD_BOUNDS..WORLD_BOUNDS);

    commands.spawn((
        FoodParticle,
        Mesh2d(meshes.add(Circle::new(FOOD_RADIUS))),
        MeshMaterial2d(materials.add(ColorMaterial::from_color(Color::srgb(1.0, 0.87, 0.27)))),
        Transform::from_xyz(x, y, WORLD_PLANE_Z - 0.2),
    ));
}
