//! Start-up configuration.
//!
//! Everything has a default matching the classic hexagon exercise. A few
//! values can be overridden from the environment:
//!
//! - `HEXAGON_TITLE` sets the window title
//! - `HEXAGON_WIDTH` / `HEXAGON_HEIGHT` set the initial window size in pixels

use crate::{colour::Colour, data_structures::mesh::Hexagon, shader::ShaderSources};

pub const TITLE_VAR: &str = "HEXAGON_TITLE";
pub const WIDTH_VAR: &str = "HEXAGON_WIDTH";
pub const HEIGHT_VAR: &str = "HEXAGON_HEIGHT";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub clear_colour: Colour,
    pub fill_colour: Colour,
    /// Clip-space `w` the vertex shader writes; values above 1 shrink the mesh.
    pub clip_w: f32,
    pub mesh: Hexagon,
    pub shaders: ShaderSources,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: "Sebastian Ramos 1804540159".to_string(),
            width: 800,
            height: 800,
            clear_colour: Colour::rgba(0.2, 0.3, 0.3, 1.0),
            fill_colour: Colour::rgb(0.043, 0.427, 0.839),
            clip_w: 1.2,
            mesh: Hexagon::default(),
            shaders: ShaderSources::default(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the known keys.
    ///
    /// Invalid values are logged and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();
        if let Some(title) = lookup(TITLE_VAR) {
            settings.title = title;
        }
        if let Some(width) = lookup(WIDTH_VAR).and_then(|v| parse_dimension(WIDTH_VAR, &v)) {
            settings.width = width;
        }
        if let Some(height) = lookup(HEIGHT_VAR).and_then(|v| parse_dimension(HEIGHT_VAR, &v)) {
            settings.height = height;
        }
        settings
    }
}

fn parse_dimension(key: &str, value: &str) -> Option<u32> {
    match value.trim().parse::<u32>() {
        Ok(0) => {
            log::warn!("{key} must be greater than zero, keeping the default");
            None
        }
        Ok(v) => Some(v),
        Err(e) => {
            log::warn!("ignoring {key}={value:?}: {e}");
            None
        }
    }
}
