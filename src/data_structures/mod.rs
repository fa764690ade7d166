//! Engine data structures.
//!
//! - `mesh` contains the hexagon vertex data and the GPU buffers it lives in

pub mod mesh;
