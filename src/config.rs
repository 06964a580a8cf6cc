//! Configuration constants for the cell HUD and its demo host simulation

use bevy::prelude::*;

use crate::selection::PickPolicy;

// ============================================================================
// HUD POLLING
// ============================================================================

/// Seconds of accumulated frame time between HUD refreshes
pub const HUD_REFRESH_INTERVAL: f32 = 0.15;

/// Key that flips overlay visibility
pub const HUD_TOGGLE_KEY: KeyCode = KeyCode::KeyH;

/// Message shown in the cell panel while nothing is selected
pub const HUD_HINT: &str = "Click a cell to view info";

// ============================================================================
// HIT TESTING
// ============================================================================

/// Maximum distance (world units) from the click to an organelle for it to be picked
pub const ORGANELLE_PICK_RADIUS: f32 = 3.0;

/// Radius multiplier used by the direct-only pick policy so small cells are easier to hit
pub const DIRECT_PICK_TOLERANCE: f32 = 1.2;

/// Depth of the plane the simulation lives on
pub const WORLD_PLANE_Z: f32 = 0.0;

// ============================================================================
// STATUS THRESHOLDS
// ============================================================================

/// Cytosol below this is "Starving"
pub const STARVING_BELOW: f32 = -0.3;

/// Cytosol above this is "Thriving"
pub const THRIVING_ABOVE: f32 = 0.3;

/// Ranges narrower than this are treated as degenerate when normalizing the gauge
pub const MIN_GAUGE_RANGE: f32 = 0.001;

// ============================================================================
// PANEL LAYOUT
// ============================================================================

pub const ECOSYSTEM_PANEL_WIDTH: f32 = 200.0;
pub const CELL_PANEL_WIDTH: f32 = 220.0;

/// Distance between a panel and the screen edge
pub const PANEL_MARGIN: f32 = 10.0;

pub const GAUGE_HEIGHT: f32 = 16.0;

// ============================================================================
// DEMO SIMULATION
// ============================================================================

/// Number of cells spawned at game start
pub const INITIAL_CELL_COUNT: usize = 40;

/// Number of cells respawned by the failsafe when the population dies out
pub const FAILSAFE_RESPAWN_COUNT: usize = 20;

/// Cells spawn within ±CELL_SPAWN_RANGE
pub const CELL_SPAWN_RANGE: f32 = 250.0;

/// Cells bounce off ±WORLD_BOUNDS, food spawns inside it
pub const WORLD_BOUNDS: f32 = 400.0;

pub const MIN_CELL_RADIUS: f32 = 8.0;
pub const MAX_CELL_RADIUS: f32 = 20.0;

/// Radius at which a cell's effective cytosol maximum equals its nominal maximum
pub const REFERENCE_CELL_RADIUS: f32 = 14.0;

/// Maximum initial speed in world units per second
pub const MAX_CELL_SPEED: f32 = 40.0;

/// Random acceleration applied to cell velocity per second
pub const CELL_JITTER: f32 = 30.0;

pub const CELL_CYTOSOL_MIN: f32 = -1.0;
pub const CELL_CYTOSOL_MAX: f32 = 1.0;
pub const STARTING_CYTOSOL: f32 = 0.2;

/// Cytosol drained from every cell per second
pub const CYTOSOL_DRAIN_PER_SECOND: f32 = 0.04;

/// Organelles spawned inside every cell
pub const ORGANELLES_PER_CELL: usize = 3;
pub const ORGANELLE_RADIUS: f32 = 2.0;

/// Interval in seconds between food spawns
pub const FOOD_SPAWN_INTERVAL: f32 = 0.25;

/// Food stops spawning once this many particles exist
pub const MAX_FOOD: usize = 150;

pub const FOOD_RADIUS: f32 = 3.0;

/// Cytosol a cell gains from one food particle
pub const FOOD_CYTOSOL: f32 = 0.25;

/// Extra radius of the ring drawn around the selected cell
pub const OUTLINE_PADDING: f32 = 3.0;

/// Runtime HUD settings. Hosts that want different behavior insert their own
/// value before adding [`crate::hud::HudPlugin`].
#[derive(Resource, Debug, Clone)]
pub struct HudConfig {
    pub refresh_interval: f32,
    pub pick_policy: PickPolicy,
    pub organelle_pick_radius: f32,
    pub direct_pick_tolerance: f32,
    pub toggle_key: KeyCode,
    pub visible_on_start: bool,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            refresh_interval: HUD_REFRESH_INTERVAL,
            pick_policy: PickPolicy::OrganelleFirst,
            organelle_pick_radius: ORGANELLE_PICK_RADIUS,
            direct_pick_tolerance: DIRECT_PICK_TOLERANCE,
            toggle_key: HUD_TOGGLE_KEY,
            visible_on_start: true,
        }
    }
}
