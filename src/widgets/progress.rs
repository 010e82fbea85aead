//! Progress bar.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::core::component::Component;
use crate::core::screen::Screen;
use crate::core::style::Style;

/// Eighth-block glyphs, from empty to full.
pub const BLOCKS: [char; 9] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉', '█'];

const INDETERMINATE_STEP: Duration = Duration::from_millis(200);

/// Shared progress counter that may be updated from any thread.
///
/// The bar reads it on every draw; request a redraw through the application
/// handle after updating it.
#[derive(Clone, Debug, Default)]
pub struct ProgressHandle {
    value: Arc<AtomicI32>,
}

impl ProgressHandle {
    pub fn set(&self, progress: i32) {
        self.value.store(progress, Ordering::Relaxed);
    }

    pub fn increment(&self, delta: i32) {
        self.value.fetch_add(delta, Ordering::Relaxed);
    }

    pub fn get(&self) -> i32 {
        self.value.load(Ordering::Relaxed)
    }
}

/// A one-row bar, either determinate with eighth-cell precision or an indeterminate
/// block sliding across at a fixed pace.
pub struct ProgressBar {
    style: Style,
    progress: ProgressHandle,
    max: i32,
    indeterminate: bool,
    started: Instant,
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressBar {
    /// An indeterminate bar with a maximum of 100.
    pub fn new() -> Self {
        Self {
            style: Style::default(),
            progress: ProgressHandle::default(),
            max: 100,
            indeterminate: true,
            started: Instant::now(),
        }
    }

    pub fn handle(&self) -> ProgressHandle {
        self.progress.clone()
    }

    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    pub fn set_progress(&mut self, progress: i32) {
        self.progress.set(progress.min(self.max));
    }

    pub fn increment(&mut self, delta: i32) {
        self.progress.increment(delta);
    }

    pub fn progress(&self) -> i32 {
        self.progress.get()
    }

    pub fn set_max(&mut self, max: i32) {
        self.max = max;
        self.progress.set(self.progress.get().min(max));
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    /// Switching mode restarts the indeterminate animation.
    pub fn set_indeterminate(&mut self, indeterminate: bool) {
        self.indeterminate = indeterminate;
        self.started = Instant::now();
    }

    pub fn is_indeterminate(&self) -> bool {
        self.indeterminate
    }

    fn draw_frame(&self, screen: &mut dyn Screen, elapsed: Duration) {
        let (width, _) = screen.size();
        if width <= 0 {
            return;
        }
        if self.indeterminate {
            let bar_width = width / 6;
            let steps = (elapsed.as_millis() / INDETERMINATE_STEP.as_millis()) as i64;
            let pos = (steps % i64::from(width + bar_width)) as i32;
            for x in pos - bar_width..pos {
                screen.set_cell(x, 0, self.style, BLOCKS[8]);
            }
            return;
        }

        if self.max <= 0 {
            return;
        }
        let progress = f64::from(self.progress.get().clamp(0, self.max));
        let filled = progress * f64::from(width) / f64::from(self.max);
        let blocks = filled.floor() as i32;
        let part = ((filled.fract()) * 8.0).floor() as usize;
        for x in 0..blocks {
            screen.set_cell(x, 0, self.style, BLOCKS[8]);
        }
        screen.set_cell(blocks, 0, self.style, BLOCKS[part.min(8)]);
    }
}

impl Component for ProgressBar {
    fn draw(&mut self, screen: &mut dyn Screen) {
        self.draw_frame(screen, self.started.elapsed());
    }
}
