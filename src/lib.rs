//! Interactive explorer for video-game sales and review data.
//!
//! The [`data`] layer holds the pure filtering core; [`state`] derives every
//! view from a single [`data::filter::Selection`]; [`app`] and [`ui`] render it
//! with egui.

pub mod app;
pub mod cli;
pub mod color;
pub mod data;
pub mod state;
pub mod ui;
