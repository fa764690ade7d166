//! hexagon-ngin
//!
//! Opens a window, compiles a vertex and a fragment shader, uploads a
//! hard-coded hexagon and draws it every frame until the window is closed or
//! ESC is pressed. Runs natively and in the browser (WebGL through wgpu).
//!
//! High-level modules
//! - `app`: the winit event loop and application state
//! - `colour`: display-space colours and sRGB handling
//! - `context`: window, surface, device and queue
//! - `data_structures`: the hexagon mesh and its GPU buffers
//! - `input`: key to action mapping
//! - `pipelines`: the hexagon render pipeline and its fill uniform
//! - `render`: the scene drawn each frame and surface error handling
//! - `settings`: start-up configuration with environment overrides
//! - `shader`: WGSL compilation and linking checks
//! - `snapshot`: offscreen rendering for golden image tests
//! - `timing`: frame rate statistics
//!

pub mod app;
pub mod colour;
pub mod context;
pub mod data_structures;
pub mod input;
pub mod pipelines;
pub mod render;
pub mod settings;
pub mod shader;
pub mod snapshot;
pub mod timing;

pub use app::run;
pub use colour::Colour;
pub use settings::Settings;
