/// Frame loop — `Intro → Running → Terminated`.
///
/// The loop never touches the platform directly. Everything it needs from the
/// terminal goes through [`Display`], and the per-frame sleep goes through
/// [`Pacer`], so tests can drive it with scripted collaborators.

use std::io;
use std::thread;
use std::time::Duration;

use crate::config::RenderProfile;
use crate::engine::rasterizer::{FrameStats, TorusRenderer};
use crate::engine::types::{RotationState, BLANK_GLYPH};

/// Size used when the terminal cannot report one.
pub const DEFAULT_SIZE: (usize, usize) = (80, 25);

const INTRO_LINES: [&str; 7] = [
    "==========================================",
    "         WELCOME TO DONUTGRAM 2000",
    "     ASCII Torus Renderer & Spinner XT",
    "==========================================",
    "",
    "         Press any key to begin...",
    "   (w/s and a/d change speed, q quits)",
];

/// A key delivered by [`Display::poll_key`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    /// Ctrl+C, which raw mode delivers as a key instead of a signal
    Interrupt,
    /// Any other key (arrows, Tab, function keys, ...)
    Other,
}

/// Terminal capabilities the frame loop relies on.
pub trait Display {
    /// Size in cells. Implementations fall back to [`DEFAULT_SIZE`].
    fn size(&mut self) -> (usize, usize);

    /// Write `glyphs` (`width * height` cells, row-major) at `origin`,
    /// overwriting the previous frame in place.
    fn present(&mut self, glyphs: &[char], origin: (u16, u16), width: usize, height: usize) -> io::Result<()>;

    /// Non-blocking; at most one key per call.
    fn poll_key(&mut self) -> io::Result<Option<Key>>;

    fn hide_cursor(&mut self) -> io::Result<()>;

    fn show_cursor(&mut self) -> io::Result<()>;

    fn clear_screen(&mut self) -> io::Result<()>;
}

/// Fixed-delay throttle between frames.
pub trait Pacer {
    fn sleep(&mut self, duration: Duration);
}

/// Sleeps the current thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Runtime key commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    /// `w`
    DecreaseSpeedA,
    /// `s`
    IncreaseSpeedA,
    /// `a`
    DecreaseSpeedB,
    /// `d`
    IncreaseSpeedB,
}

impl Command {
    pub fn from_key(key: Key) -> Option<Command> {
        match key {
            Key::Interrupt => Some(Command::Quit),
            Key::Other => None,
            Key::Char(c) => match c.to_ascii_lowercase() {
                'q' => Some(Command::Quit),
                'w' => Some(Command::DecreaseSpeedA),
                's' => Some(Command::IncreaseSpeedA),
                'a' => Some(Command::DecreaseSpeedB),
                'd' => Some(Command::IncreaseSpeedB),
                _ => None,
            },
        }
    }

    /// Apply a speed command. `Quit` leaves the rotation untouched.
    pub fn apply(self, rotation: &mut RotationState, increment: f64) {
        match self {
            Command::Quit => {}
            Command::DecreaseSpeedA => rotation.speed_a -= increment,
            Command::IncreaseSpeedA => rotation.speed_a += increment,
            Command::DecreaseSpeedB => rotation.speed_b -= increment,
            Command::IncreaseSpeedB => rotation.speed_b += increment,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Intro,
    Running,
    Terminated,
}

/// Lay the intro text out centred in a `width * height` glyph buffer.
pub fn intro_banner(width: usize, height: usize) -> Vec<char> {
    let mut glyphs = vec![BLANK_GLYPH; width * height];
    let top = height.saturating_sub(INTRO_LINES.len()) / 2;
    for (row, line) in INTRO_LINES.iter().enumerate() {
        let y = top + row;
        if y >= height {
            break;
        }
        let len = line.chars().count();
        let left = width.saturating_sub(len) / 2;
        for (col, c) in line.chars().enumerate().take(width.saturating_sub(left)) {
            glyphs[y * width + left + col] = c;
        }
    }
    glyphs
}

pub struct FrameLoop<D: Display, P: Pacer> {
    display: D,
    pacer: P,
    renderer: TorusRenderer,
    rotation: RotationState,
    state: LoopState,
    frames: u64,
    last_stats: FrameStats,
}

impl<D: Display, P: Pacer> FrameLoop<D, P> {
    /// Query the display size once; the viewport stays fixed afterwards.
    pub fn new(mut display: D, pacer: P, profile: RenderProfile) -> Self {
        let (width, height) = display.size();
        let rotation = RotationState::new(profile.speed_a, profile.speed_b);
        Self {
            display,
            pacer,
            renderer: TorusRenderer::new(profile, width, height),
            rotation,
            state: LoopState::Intro,
            frames: 0,
            last_stats: FrameStats::default(),
        }
    }

    /// Run the intro and then frames until quit. Returns the number of frames rendered.
    pub fn run(&mut self) -> io::Result<u64> {
        if self.state == LoopState::Intro {
            self.run_intro()?;
        }
        if self.state == LoopState::Running {
            self.display.hide_cursor()?;
            let result = self.run_frames();
            let restored = self.display.show_cursor();
            result.and(restored)?;
        }
        Ok(self.frames)
    }

    /// Show the banner and wait for a key, polling at the profile's interval.
    pub fn run_intro(&mut self) -> io::Result<()> {
        let viewport = *self.renderer.viewport();
        let banner = intro_banner(viewport.width, viewport.height);
        self.display.present(&banner, (0, 0), viewport.width, viewport.height)?;

        let interval = self.renderer.profile().intro_poll_interval;
        let key = loop {
            if let Some(key) = self.display.poll_key()? {
                break key;
            }
            self.pacer.sleep(interval);
        };

        if key == Key::Interrupt {
            self.state = LoopState::Terminated;
            return Ok(());
        }
        self.display.clear_screen()?;
        self.state = LoopState::Running;
        Ok(())
    }

    fn run_frames(&mut self) -> io::Result<()> {
        while self.state == LoopState::Running {
            self.step()?;
        }
        Ok(())
    }

    /// One running frame: render, present, advance, sleep, then handle at most one key.
    pub fn step(&mut self) -> io::Result<LoopState> {
        self.last_stats = self.renderer.render(self.rotation.a, self.rotation.b);
        let buffers = self.renderer.buffers();
        self.display.present(buffers.glyphs(), (0, 0), buffers.width(), buffers.height())?;
        self.frames += 1;

        self.rotation.advance();
        self.pacer.sleep(self.renderer.profile().frame_delay);

        if let Some(command) = self.display.poll_key()?.and_then(Command::from_key) {
            if command == Command::Quit {
                self.state = LoopState::Terminated;
            } else {
                command.apply(&mut self.rotation, self.renderer.profile().speed_increment);
            }
        }
        Ok(self.state)
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn rotation(&self) -> &RotationState {
        &self.rotation
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last_stats(&self) -> FrameStats {
        self.last_stats
    }

    pub fn renderer(&self) -> &TorusRenderer {
        &self.renderer
    }

    pub fn display(&self) -> &D {
        &self.display
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    #[derive(Debug, PartialEq, Eq)]
    enum Call {
        Present,
        Poll,
        Hide,
        Show,
        Clear,
    }

    #[derive(Default)]
    struct ScriptedDisplay {
        size: (usize, usize),
        keys: VecDeque<Option<Key>>,
        calls: Vec<Call>,
        frames: Vec<Vec<char>>,
        fail_present_after: Option<usize>,
    }

    impl ScriptedDisplay {
        fn new(keys: &[Option<Key>]) -> Self {
            Self { size: (40, 20), keys: keys.iter().copied().collect(), ..Default::default() }
        }

        fn count(&self, call: Call) -> usize {
            self.calls.iter().filter(|c| **c == call).count()
        }
    }

    impl Display for ScriptedDisplay {
        fn size(&mut self) -> (usize, usize) {
            self.size
        }

        fn present(&mut self, glyphs: &[char], _origin: (u16, u16), width: usize, height: usize) -> io::Result<()> {
            assert_eq!(glyphs.len(), width * height);
            if let Some(limit) = self.fail_present_after {
                if self.frames.len() >= limit {
                    return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
                }
            }
            self.calls.push(Call::Present);
            self.frames.push(glyphs.to_vec());
            Ok(())
        }

        fn poll_key(&mut self) -> io::Result<Option<Key>> {
            self.calls.push(Call::Poll);
            // Quit once the script runs dry so a broken loop cannot spin forever.
            Ok(self.keys.pop_front().unwrap_or(Some(Key::Char('q'))))
        }

        fn hide_cursor(&mut self) -> io::Result<()> {
            self.calls.push(Call::Hide);
            Ok(())
        }

        fn show_cursor(&mut self) -> io::Result<()> {
            self.calls.push(Call::Show);
            Ok(())
        }

        fn clear_screen(&mut self) -> io::Result<()> {
            self.calls.push(Call::Clear);
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingPacer {
        sleeps: Vec<Duration>,
    }

    impl Pacer for RecordingPacer {
        fn sleep(&mut self, duration: Duration) {
            self.sleeps.push(duration);
        }
    }

    fn key(c: char) -> Option<Key> {
        Some(Key::Char(c))
    }

    fn run(keys: &[Option<Key>]) -> FrameLoop<ScriptedDisplay, RecordingPacer> {
        let mut fl = FrameLoop::new(ScriptedDisplay::new(keys), RecordingPacer::default(), RenderProfile::default());
        fl.run().unwrap();
        fl
    }

    #[test]
    fn test_intro_polls_until_key() {
        let fl = run(&[None, None, key('x'), None, key('q')]);
        assert_eq!(fl.state(), LoopState::Terminated);
        assert_eq!(fl.frames(), 2);
        let profile = RenderProfile::default();
        let sleeps = &fl.pacer.sleeps;
        assert_eq!(sleeps[..2], [profile.intro_poll_interval, profile.intro_poll_interval]);
        assert_eq!(sleeps[2..], [profile.frame_delay, profile.frame_delay]);
    }

    #[test]
    fn test_call_sequence() {
        let fl = run(&[key(' '), None, key('q')]);
        use Call::*;
        assert_eq!(
            fl.display().calls,
            vec![Present, Poll, Clear, Hide, Present, Poll, Present, Poll, Show]
        );
    }

    #[test]
    fn test_quit_stops_without_extra_frame() {
        let fl = run(&[key('k'), key('q'), None, None]);
        assert_eq!(fl.frames(), 1);
        // Banner plus exactly one rendered frame.
        assert_eq!(fl.display().frames.len(), 2);
        assert_eq!(fl.display().count(Call::Show), 1);
        assert_eq!(fl.display().keys.len(), 2);
    }

    #[test]
    fn test_speed_adjustments() {
        let profile = RenderProfile::default();
        let fl = run(&[key('x'), key('w'), key('w'), key('w'), key('d'), key('D'), key('q')]);
        let r = fl.rotation();
        assert!((r.speed_a - (profile.speed_a - 0.03)).abs() < 1e-12);
        assert!((r.speed_b - (profile.speed_b + 0.02)).abs() < 1e-12);
    }

    #[test]
    fn test_one_key_per_frame() {
        // Every poll returns one key; each frame consumes exactly one.
        let fl = run(&[key('x'), key('s'), key('a'), key('s'), key('q')]);
        assert_eq!(fl.frames(), 4);
        assert_eq!(fl.display().count(Call::Poll), 5);
    }

    #[test]
    fn test_angles_advance_by_speed() {
        let profile = RenderProfile::default();
        let fl = run(&[key('x'), None, None, key('q')]);
        let r = fl.rotation();
        assert!((r.a - 3.0 * profile.speed_a).abs() < 1e-12);
        assert!((r.b - 3.0 * profile.speed_b).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_keys_change_nothing() {
        let profile = RenderProfile::default();
        let fl = run(&[key('x'), key('z'), key('1'), key('q')]);
        assert_eq!(fl.rotation().speed_a, profile.speed_a);
        assert_eq!(fl.rotation().speed_b, profile.speed_b);
    }

    #[test]
    fn test_non_character_key_starts_and_is_ignored() {
        let profile = RenderProfile::default();
        let fl = run(&[Some(Key::Other), Some(Key::Other), key('q')]);
        assert_eq!(fl.frames(), 2);
        assert_eq!(fl.display().count(Call::Clear), 1);
        assert_eq!(fl.rotation().speed_a, profile.speed_a);
        assert_eq!(fl.rotation().speed_b, profile.speed_b);
    }

    #[test]
    fn test_interrupt_during_intro_skips_running() {
        let fl = run(&[Some(Key::Interrupt)]);
        assert_eq!(fl.state(), LoopState::Terminated);
        assert_eq!(fl.frames(), 0);
        assert_eq!(fl.display().count(Call::Hide), 0);
        assert_eq!(fl.display().count(Call::Clear), 0);
    }

    #[test]
    fn test_cursor_restored_on_error() {
        let mut display = ScriptedDisplay::new(&[key('x'), None, None, None]);
        display.fail_present_after = Some(2);
        let mut fl = FrameLoop::new(display, RecordingPacer::default(), RenderProfile::default());
        assert!(fl.run().is_err());
        assert_eq!(fl.display().count(Call::Hide), 1);
        assert_eq!(fl.display().count(Call::Show), 1);
    }

    #[test]
    fn test_presented_frame_matches_renderer() {
        let fl = run(&[key('x'), key('q')]);
        let mut reference = TorusRenderer::new(RenderProfile::default(), 40, 20);
        reference.render(0.0, 0.0);
        assert_eq!(fl.display().frames[1], reference.buffers().glyphs());
        assert!(fl.last_stats().plotted > 0);
    }

    #[test]
    fn test_command_mapping() {
        assert_eq!(Command::from_key(Key::Char('q')), Some(Command::Quit));
        assert_eq!(Command::from_key(Key::Char('Q')), Some(Command::Quit));
        assert_eq!(Command::from_key(Key::Interrupt), Some(Command::Quit));
        assert_eq!(Command::from_key(Key::Char('w')), Some(Command::DecreaseSpeedA));
        assert_eq!(Command::from_key(Key::Char('s')), Some(Command::IncreaseSpeedA));
        assert_eq!(Command::from_key(Key::Char('a')), Some(Command::DecreaseSpeedB));
        assert_eq!(Command::from_key(Key::Char('d')), Some(Command::IncreaseSpeedB));
        assert_eq!(Command::from_key(Key::Char('x')), None);
        assert_eq!(Command::from_key(Key::Other), None);
    }

    #[test]
    fn test_repeated_presses_are_additive() {
        let mut r = RotationState::new(0.0, 0.0);
        for _ in 0..25 {
            Command::IncreaseSpeedB.apply(&mut r, 0.01);
        }
        assert!((r.speed_b - 0.25).abs() < 1e-12);
        assert_eq!(r.speed_a, 0.0);
        assert_eq!((r.a, r.b), (0.0, 0.0));
    }

    #[test]
    fn test_intro_banner_layout() {
        let banner = intro_banner(50, 10);
        assert_eq!(banner.len(), 500);
        let text: String = banner.iter().collect();
        assert!(text.contains("Press any key to begin..."));
        assert!(text.contains("WELCOME TO DONUTGRAM 2000"));
        // Smaller than the text: still the right size, no panic.
        assert_eq!(intro_banner(5, 2).len(), 10);
        assert!(intro_banner(0, 0).is_empty());
    }
}
