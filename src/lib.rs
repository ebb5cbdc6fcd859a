pub mod board;
pub mod camera;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod geometry;
pub mod life;
pub mod rules;
pub mod session;
pub mod state;

pub mod prelude {
    use bevy::{color::Color, input::keyboard::KeyCode, input::mouse::MouseButton};

    pub const WINDOW_TITLE: &str = "Game of Life";

    pub const DEFAULT_ROWS: usize = 100;
    pub const DEFAULT_COLUMNS: usize = 100;
    pub const DEFAULT_CELL_SIZE: u32 = 10;
    /// generations per second
    pub const DEFAULT_SIMULATION_SPEED: u32 = 300;

    pub const BG_COLOR: Color = Color::WHITE;
    pub const CELL_ALIVE_COLOR: Color = Color::BLACK;
    pub const GRID_LINE_COLOR: Color = Color::srgb(0.75, 0.75, 0.75);
    pub const GRID_LINE_WIDTH_PX: f32 = 1.0;

    pub const START_KEY: KeyCode = KeyCode::Space;
    pub const RESET_KEY: KeyCode = KeyCode::KeyC;
    pub const RANDOMIZE_KEY: KeyCode = KeyCode::KeyR;
    pub const PAINT_BUTTON: MouseButton = MouseButton::Left;
    pub const ERASE_BUTTON: MouseButton = MouseButton::Right;

    pub const DIAGNOSTICS_INTERVAL_SECS: u64 = 1;
}
