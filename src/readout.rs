//! Periodic polling of the simulation into display-ready text.
//!
//! Everything the panels show is rebuilt here on a fixed real-time cadence;
//! drawing never reads the simulation directly.

use bevy::prelude::*;
use bevy_egui::egui::Color32;

use crate::cell::{Cell, CellRegistry};
use crate::config::*;
use crate::food::FoodParticle;
use crate::selection::SelectedCell;

/// Qualitative health of a cell derived from its cytosol level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStatus {
    Starving,
    Hungry,
    Healthy,
    Thriving,
}

impl CellStatus {
    pub fn classify(cytosol: f32) -> Self {
        if cytosol < STARVING_BELOW {
            CellStatus::Starving
        } else if cytosol > THRIVING_ABOVE {
            CellStatus::Thriving
        } else if cytosol > 0.0 {
            CellStatus::Healthy
        } else {
            CellStatus::Hungry
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CellStatus::Starving => "Starving",
            CellStatus::Hungry => "Hungry",
            CellStatus::Healthy => "Healthy",
            CellStatus::Thriving => "Thriving",
        }
    }

    pub fn color(self) -> Color32 {
        match self {
            CellStatus::Starving => Color32::from_rgb(0xff, 0x44, 0x44),
            CellStatus::Hungry => Color32::from_rgb(0xff, 0xaa, 0x44),
            CellStatus::Healthy => Color32::from_rgb(0x88, 0xff, 0x88),
            CellStatus::Thriving => Color32::from_rgb(0x44, 0xff, 0x88),
        }
    }
}

/// One `Label: value unit` row of a panel
#[derive(Debug, Clone, PartialEq)]
pub struct ReadoutLine {
    pub label: &'static str,
    pub value: String,
    pub unit: Option<&'static str>,
    pub color: Color32,
}

impl ReadoutLine {
    fn new(label: &'static str, value: String, color: Color32) -> Self {
        Self {
            label,
            value,
            unit: None,
            color,
        }
    }

    fn with_unit(mut self, unit: &'static str) -> Self {
        self.unit = Some(unit);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EcosystemReadout {
    pub cell_count: usize,
    pub food_count: usize,
    pub lines: Vec<ReadoutLine>,
}

impl EcosystemReadout {
    pub fn new(cell_count: usize, food_count: usize) -> Self {
        let lines = vec![
            ReadoutLine::new("Cells", cell_count.to_string(), Color32::from_rgb(0x00, 0xff, 0x88)),
            ReadoutLine::new("Food", food_count.to_string(), Color32::from_rgb(0xff, 0xdd, 0x44)),
        ];
        Self {
            cell_count,
            food_count,
            lines,
        }
    }
}

/// Detail panel contents for the selected cell
#[derive(Debug, Clone, PartialEq)]
pub struct CellReadout {
    /// 0-based position in the registry
    pub index: usize,
    pub total: usize,
    pub cytosol: f32,
    pub cytosol_min: f32,
    pub cytosol_max: f32,
    pub radius: f32,
    pub speed: f32,
    pub status: CellStatus,
    pub title: String,
    pub gauge_label: String,
    pub lines: Vec<ReadoutLine>,
}

impl CellReadout {
    pub fn new(index: usize, total: usize, cell: &Cell) -> Self {
        let cytosol_max = cell.effective_cytosol_max();
        let speed = cell.speed();
        let status = CellStatus::classify(cell.cytosol);
        let number = index + 1;

        let lines = vec![
            ReadoutLine::new("Radius", format!("{:.2}", cell.radius), Color32::from_rgb(0xaa, 0xdd, 0xff)),
            ReadoutLine::new("Speed", format!("{:.2}", speed), Color32::from_rgb(0xff, 0xaa, 0x44)).with_unit("u/s"),
            ReadoutLine::new("Status", status.label().to_string(), status.color()),
        ];

        Self {
            index,
            total,
            cytosol: cell.cytosol,
            cytosol_min: cell.cytosol_min,
            cytosol_max,
            radius: cell.radius,
            speed,
            status,
            title: format!("CELL #{number} ({number}/{total})"),
            gauge_label: format!("Cytosol: {:.2} / {:.2}", cell.cytosol, cytosol_max),
            lines,
        }
    }

    /// Fraction of the gauge to fill, in `0.0..=1.0`
    pub fn gauge_fill(&self) -> f32 {
        let mut range = self.cytosol_max - self.cytosol_min;
        if range < MIN_GAUGE_RANGE {
            range = 1.0;
        }
        ((self.cytosol - self.cytosol_min) / range).clamp(0.0, 1.0)
    }

    pub fn gauge_color(&self) -> Color32 {
        let range = self.cytosol_max - self.cytosol_min;
        let normalized = if range > MIN_GAUGE_RANGE {
            (self.cytosol - self.cytosol_min) / range
        } else {
            0.5
        };

        if normalized < 0.2 {
            Color32::from_rgb(255, 77, 77)
        } else if normalized < 0.4 {
            Color32::from_rgb(255, 204, 51)
        } else if normalized > 0.8 {
            Color32::from_rgb(51, 230, 255)
        } else {
            Color32::from_rgb(77, 255, 204)
        }
    }
}

/// Everything the panels draw. Replaced as a whole on every poll.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct HudReadout {
    pub ecosystem: EcosystemReadout,
    /// `None` while nothing is selected; the panel shows a hint instead
    pub cell: Option<CellReadout>,
}

impl Default for HudReadout {
    fn default() -> Self {
        Self {
            ecosystem: EcosystemReadout::new(0, 0),
            cell: None,
        }
    }
}

impl HudReadout {
    /// Revalidate `selected` against `registry` and build a fresh readout.
    pub fn poll(
        selected: &mut SelectedCell,
        registry: &[Entity],
        food_count: usize,
        cell_of: impl Fn(Entity) -> Option<Cell>,
    ) -> Self {
        let ecosystem = EcosystemReadout::new(registry.len(), food_count);

        let is_alive = |entity: Entity| cell_of(entity).is_some_and(|cell| cell.active);
        let cell = selected
            .revalidate(registry, is_alive)
            .and_then(|entity| cell_of(entity))
            .map(|cell| CellReadout::new(selected.index(), registry.len(), &cell));

        Self { ecosystem, cell }
    }
}

/// Repeating timer driving [`refresh_readout`]
#[derive(Resource)]
pub struct HudRefreshTimer(pub Timer);

impl HudRefreshTimer {
    pub fn from_config(config: &HudConfig) -> Self {
        Self(Timer::from_seconds(config.refresh_interval, TimerMode::Repeating))
    }
}

/// Poll the simulation every refresh interval
pub fn refresh_readout(
    time: Res<Time>,
    mut timer: ResMut<HudRefreshTimer>,
    registry: Option<Res<CellRegistry>>,
    cells: Query<&Cell>,
    food: Query<(), With<FoodParticle>>,
    mut selected: ResMut<SelectedCell>,
    mut readout: ResMut<HudReadout>,
) {
    if !timer.0.tick(time.delta()).just_finished() {
        return;
    }

    let registry = registry.as_deref().map(CellRegistry::as_slice).unwrap_or_default();
    let food_count = food.iter().count();

    *readout = HudReadout::poll(&mut selected, registry, food_count, |entity| cells.get(entity).ok().copied());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell_with(cytosol: f32) -> Cell {
        Cell {
            cytosol,
            ..Cell::new(REFERENCE_CELL_RADIUS, Vec2::new(3.0, 4.0))
        }
    }

    #[test]
    fn status_thresholds() {
        assert_eq!(CellStatus::classify(-0.31), CellStatus::Starving);
        assert_eq!(CellStatus::classify(-0.3), CellStatus::Hungry);
        assert_eq!(CellStatus::classify(-0.1), CellStatus::Hungry);
        assert_eq!(CellStatus::classify(0.0), CellStatus::Hungry);
        assert_eq!(CellStatus::classify(0.01), CellStatus::Healthy);
        assert_eq!(CellStatus::classify(0.3), CellStatus::Healthy);
        assert_eq!(CellStatus::classify(0.31), CellStatus::Thriving);
    }

    #[test]
    fn empty_registry_reports_zero_and_no_cell() {
        let mut selected = SelectedCell::default();
        let readout = HudReadout::poll(&mut selected, &[], 0, |_| None);

        assert_eq!(readout.ecosystem.cell_count, 0);
        assert_eq!(readout.ecosystem.lines[0].value, "0");
        assert!(readout.cell.is_none());
        assert_eq!(selected.entity(), None);
    }

    #[test]
    fn readout_before_first_poll_shows_zero_counts() {
        let readout = HudReadout::default();

        let values: Vec<_> = readout.ecosystem.lines.iter().map(|line| (line.label, line.value.as_str())).collect();
        assert_eq!(values, vec![("Cells", "0"), ("Food", "0")]);
        assert!(readout.cell.is_none());
    }

    #[test]
    fn cell_readout_formats_title_and_lines() {
        let readout = CellReadout::new(1, 3, &cell_with(0.5));

        assert_eq!(readout.title, "CELL #2 (2/3)");
        assert_eq!(readout.gauge_label, "Cytosol: 0.50 / 1.00");
        assert_eq!(readout.lines[0].value, "14.00");
        assert_eq!(readout.lines[1].value, "5.00");
        assert_eq!(readout.lines[1].unit, Some("u/s"));
        assert_eq!(readout.lines[2].value, "Thriving");
    }

    #[test]
    fn gauge_fill_is_normalized_between_bounds() {
        let readout = CellReadout::new(0, 1, &cell_with(0.0));
        assert!((readout.gauge_fill() - 0.5).abs() < 1e-6);

        let empty = CellReadout::new(0, 1, &cell_with(-1.0));
        assert_eq!(empty.gauge_fill(), 0.0);
    }

    #[test]
    fn degenerate_range_does_not_divide_by_zero() {
        let cell = Cell {
            cytosol: 0.2,
            cytosol_min: 1.0,
            cytosol_max: 1.0,
            ..Cell::new(REFERENCE_CELL_RADIUS, Vec2::ZERO)
        };
        let readout = CellReadout::new(0, 1, &cell);

        assert_eq!(readout.gauge_fill(), 0.0);
        assert_eq!(readout.gauge_color(), Color32::from_rgb(77, 255, 204));
    }

    #[test]
    fn poll_reports_selected_cell() {
        let a = Entity::from_raw(1);
        let b = Entity::from_raw(2);
        let mut selected = SelectedCell::default();
        selected.select(b);

        let readout = HudReadout::poll(&mut selected, &[a, b], 7, |_| Some(cell_with(-0.5)));

        assert_eq!(readout.ecosystem.food_count, 7);
        let cell = readout.cell.expect("selected cell readout");
        assert_eq!(cell.index, 1);
        assert_eq!(cell.status, CellStatus::Starving);
    }
}
