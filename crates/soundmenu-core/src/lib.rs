//! Toolkit-free core for the soundmenu popup: configuration, menu entries,
//! the selection model, and pointer-anchored placement.

pub mod config;
pub mod menu;
pub mod placement;
pub mod selection;
