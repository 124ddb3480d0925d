use wasm_bindgen::prelude::*;

pub mod logging;
pub mod config;
pub mod engine;
pub mod frame_loop;
pub mod lighting;
pub mod math;
#[cfg(not(target_arch = "wasm32"))]
pub mod terminal;

use config::profile_from_buffer;
use engine::rasterizer::TorusRenderer;
use engine::types::RotationState;
use frame_loop::{Command, Key};

/// Initialize the WASM module (call once from JS).
#[wasm_bindgen(start)]
pub fn init() {
    console_log!("ascii-torus {} ready", env!("CARGO_PKG_VERSION"));
}

/// Renderer for a `width * height` viewport, or `None` when the cell count
/// does not fit in a u32 (and so cannot be addressed on wasm32).
fn renderer_for(profile: &[f64], width: u32, height: u32) -> Option<TorusRenderer> {
    width.checked_mul(height)?;
    Some(TorusRenderer::new(profile_from_buffer(profile), width as usize, height as usize))
}

/// Render one frame and return it as newline-separated rows.
///
/// `profile` — Float64Array in the `profile_from_buffer` layout (empty = defaults)
/// `a` / `b` — rotation angles in radians
///
/// Oversized viewports yield an empty string.
#[wasm_bindgen]
pub fn render_frame(profile: &[f64], width: u32, height: u32, a: f64, b: f64) -> String {
    let Some(mut renderer) = renderer_for(profile, width, height) else {
        return String::new();
    };
    renderer.render(a, b);
    renderer.buffers().to_text()
}

/// Render one frame and return its inverse-depth buffer (`width * height`,
/// row-major, 0 = empty).
#[wasm_bindgen]
pub fn render_depth(profile: &[f64], width: u32, height: u32, a: f64, b: f64) -> js_sys::Float64Array {
    let Some(mut renderer) = renderer_for(profile, width, height) else {
        return js_sys::Float64Array::new_with_length(0);
    };
    renderer.render(a, b);
    js_sys::Float64Array::from(renderer.buffers().depths())
}

/// Apply one key press to `speeds` (`[speed_a, speed_b]`).
///
/// Returns true when the key means quit. Unknown keys and short buffers are
/// left untouched.
#[wasm_bindgen]
pub fn apply_key(profile: &[f64], speeds: &mut [f64], key: char) -> bool {
    let Some(command) = Command::from_key(Key::Char(key)) else {
        return false;
    };
    if command == Command::Quit {
        return true;
    }
    if speeds.len() < 2 {
        return false;
    }

    let increment = profile_from_buffer(profile).speed_increment;
    let mut rotation = RotationState::new(speeds[0], speeds[1]);
    command.apply(&mut rotation, increment);
    speeds[0] = rotation.speed_a;
    speeds[1] = rotation.speed_b;
    false
}
