#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::io::Result<()> {
    use ascii_torus::config::RenderProfile;
    use ascii_torus::console_log;
    use ascii_torus::frame_loop::{FrameLoop, ThreadPacer};
    use ascii_torus::terminal::TerminalDisplay;

    let display = TerminalDisplay::open()?;
    let mut frame_loop = FrameLoop::new(display, ThreadPacer, RenderProfile::default());
    let result = frame_loop.run();
    let viewport = *frame_loop.renderer().viewport();
    // Restore the terminal before anything is written to stderr.
    drop(frame_loop);

    let frames = result?;
    console_log!("{}x{} viewport, {} frames rendered", viewport.width, viewport.height, frames);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
