//! Rendering: the top summary bar and the two charts.

pub mod panels;
pub mod plot;
