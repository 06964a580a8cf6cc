//! Heads-up overlay for a cell simulation.
//!
//! The host simulation owns [`cell::Cell`], [`cell::Organelle`],
//! [`cell::CellRegistry`] and [`food::FoodParticle`]. [`hud::HudPlugin`] polls
//! them every 150 ms, tracks a selected cell picked with the mouse, and
//! [`hud::HudPanelsPlugin`] draws the two panels with egui.

pub mod camera;
pub mod cell;
pub mod config;
pub mod food;
pub mod hud;
pub mod outline;
pub mod readout;
pub mod selection;
