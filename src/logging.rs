/// `console_log!` — browser console on wasm32, stderr elsewhere.
///
/// The native binary only logs while the terminal is in its normal state,
/// so nothing here has to know about raw mode.

#[macro_export]
macro_rules! console_log {
    ($($t:tt)*) => {
        $crate::logging::write_line(&format!($($t)*))
    };
}

#[doc(hidden)]
pub fn write_line(line: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(line));

    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("[ascii-torus] {line}");
}
