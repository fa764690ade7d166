//! Render pipelines.
//!
//! - `hexagon` compiles, links and builds the single pipeline the hexagon is drawn with

pub mod hexagon;
