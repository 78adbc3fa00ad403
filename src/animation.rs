//! Frame-by-frame animation over a canvas.
//!
//! Each frame is the full set of `(x, y, color)` pixels that should be lit.
//! Pixels lit by the previous frame but missing from the new one are
//! reverted to the static background; new pixels are drawn. Only cells that
//! change are written to the terminal.

use crate::canvas::Canvas;
use crate::color::Color;
use crate::error::Result;
use crate::event::{LogLevel, emit_event, emit_log};
use crate::geometry::{CellPos, Coordinate, PixelPos};
use crate::palette::Palette;
use crate::terminal::{AnsiDriver, Driver, Session};
use std::collections::HashSet;
use std::time::Duration;

/// 1/24 of a second.
pub const DEFAULT_FRAME_DELAY: Duration = Duration::from_nanos(41_666_667);

/// Animation configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimationOptions {
    /// Pause after each frame. `None` or zero runs frames back to back.
    pub delay: Option<Duration>,
    /// End the run when Ctrl+C is read between frames.
    pub stop_on_interrupt: bool,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            delay: Some(DEFAULT_FRAME_DELAY),
            stop_on_interrupt: true,
        }
    }
}

impl AnimationOptions {
    /// Options with no delay between frames.
    #[must_use]
    pub fn unthrottled() -> Self {
        Self {
            delay: None,
            ..Self::default()
        }
    }
}

/// What one [`Animator::step`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Pixels from the previous frame reverted to the background.
    pub erased: usize,
    /// New pixels lit and drawn.
    pub drawn: usize,
    /// Pixels of this frame that were already lit.
    pub skipped: usize,
}

/// Totals over a whole [`Animator::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: usize,
    pub erased: usize,
    pub drawn: usize,
    pub skipped: usize,
    /// Whether the run was cut short by Ctrl+C.
    pub interrupted: bool,
}

impl RunSummary {
    fn record(&mut self, stats: FrameStats) {
        self.frames += 1;
        self.erased += stats.erased;
        self.drawn += stats.drawn;
        self.skipped += stats.skipped;
    }
}

/// A lit pixel as supplied by a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PixelEvent {
    pub pos: PixelPos,
    pub color: Color,
}

/// Drives frames onto a canvas and a terminal session.
pub struct Animator<'a, D: Driver> {
    canvas: &'a mut Canvas,
    palette: &'a Palette,
    session: &'a mut Session<D>,
    options: AnimationOptions,
    seen: HashSet<PixelEvent>,
}

impl<'a, D: Driver> Animator<'a, D> {
    pub fn new(
        canvas: &'a mut Canvas,
        palette: &'a Palette,
        session: &'a mut Session<D>,
        options: AnimationOptions,
    ) -> Self {
        Self {
            canvas,
            palette,
            session,
            options,
            seen: HashSet::new(),
        }
    }

    #[must_use]
    pub fn canvas(&self) -> &Canvas {
        &*self.canvas
    }

    /// Pixels lit by the last frame.
    #[must_use]
    pub fn seen(&self) -> &HashSet<PixelEvent> {
        &self.seen
    }

    /// Write every on-screen cell of the canvas and refresh.
    pub fn draw_static(&mut self) -> Result<()> {
        for (pos, _) in self.canvas.cells() {
            draw_cell(&*self.canvas, self.palette, self.session, pos)?;
        }
        self.session.driver_mut().refresh()
    }

    /// Apply one frame: erase what disappeared, draw what appeared, refresh.
    ///
    /// All coordinates are normalized before anything changes, so a bad
    /// coordinate leaves the canvas and screen untouched. Each changed cell
    /// is written once, in its final state. A failed write leaves the canvas
    /// and [`seen`](Self::seen) at the new frame.
    pub fn step<I, X, Y>(&mut self, frame: I) -> Result<FrameStats>
    where
        I: IntoIterator<Item = (X, Y, Color)>,
        X: Coordinate,
        Y: Coordinate,
    {
        let events = frame
            .into_iter()
            .map(|(x, y, color)| {
                Ok(PixelEvent {
                    pos: PixelPos::new(x, y)?,
                    color,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let current: HashSet<PixelEvent> = events.iter().copied().collect();
        let mut abandoned: Vec<PixelEvent> = self.seen.difference(&current).copied().collect();
        abandoned.sort_unstable();

        // Canvas and seen set are settled before the first terminal write.
        let mut stats = FrameStats::default();
        let mut touched = Vec::with_capacity(abandoned.len() + events.len());
        for event in &abandoned {
            let cell = event.pos.cell();
            self.canvas.reset_cell(cell);
            self.canvas.reset_cell_color(cell);
            touched.push(cell);
            stats.erased += 1;
        }
        for event in &events {
            if self.canvas.get_pixel(event.pos) {
                stats.skipped += 1;
                continue;
            }
            let cell = event.pos.cell();
            self.canvas.set_pixel(event.pos);
            self.canvas.set_cell_color(cell, event.color);
            touched.push(cell);
            stats.drawn += 1;
        }
        self.seen = current;

        let mut written = HashSet::with_capacity(touched.len());
        for cell in touched {
            if written.insert(cell) {
                draw_cell(&*self.canvas, self.palette, self.session, cell)?;
            }
        }

        self.session.driver_mut().refresh()?;
        emit_event(
            "frame",
            &format!(
                "erased={} drawn={} skipped={}",
                stats.erased, stats.drawn, stats.skipped
            ),
        );
        Ok(stats)
    }

    /// Draw the static canvas, then every frame until `frames` runs out or
    /// Ctrl+C is read.
    pub fn run<F, I, X, Y>(&mut self, frames: F) -> Result<RunSummary>
    where
        F: IntoIterator<Item = I>,
        I: IntoIterator<Item = (X, Y, Color)>,
        X: Coordinate,
        Y: Coordinate,
    {
        self.draw_static()?;

        let mut summary = RunSummary::default();
        for frame in frames {
            summary.record(self.step(frame)?);

            if let Some(delay) = self.options.delay.filter(|d| !d.is_zero()) {
                std::thread::sleep(delay);
            }
            if self.interrupted()? {
                summary.interrupted = true;
                emit_log(
                    LogLevel::Info,
                    &format!("animation: interrupted after {} frames", summary.frames),
                );
                return Ok(summary);
            }
        }

        emit_log(
            LogLevel::Debug,
            &format!("animation: finished after {} frames", summary.frames),
        );
        Ok(summary)
    }

    /// Drain pending keys looking for Ctrl+C; other keys are kept on the
    /// session.
    fn interrupted(&mut self) -> Result<bool> {
        if !self.options.stop_on_interrupt {
            return Ok(false);
        }
        while let Some(key) = self.session.driver_mut().poll_key()? {
            if key.is_ctrl_c() {
                return Ok(true);
            }
            self.session.stash_key(key);
        }
        Ok(false)
    }
}

/// Write one cell as it currently stands on the canvas. Cells above or
/// left of the screen are skipped.
fn draw_cell<D: Driver>(
    canvas: &Canvas,
    palette: &Palette,
    session: &mut Session<D>,
    pos: CellPos,
) -> Result<()> {
    let Some((row, col)) = pos.to_screen() else {
        return Ok(());
    };
    let pair = palette.pair_or_default(canvas.color_at(pos));
    session
        .driver_mut()
        .write_cell(row, col, canvas.glyph_at(pos), pair)
}

/// Register the palette's colors, then run `frames` on `session`.
pub fn animate<D, F, I, X, Y>(
    canvas: &mut Canvas,
    palette: &Palette,
    session: &mut Session<D>,
    frames: F,
    options: AnimationOptions,
) -> Result<RunSummary>
where
    D: Driver,
    F: IntoIterator<Item = I>,
    I: IntoIterator<Item = (X, Y, Color)>,
    X: Coordinate,
    Y: Coordinate,
{
    palette.start_colors(session.driver_mut())?;
    Animator::new(canvas, palette, session, options).run(frames)
}

/// [`animate`] on the process's terminal, restoring it afterwards even when
/// the animation fails.
pub fn animate_in_terminal<F, I, X, Y>(
    canvas: &mut Canvas,
    palette: &Palette,
    frames: F,
    options: AnimationOptions,
) -> Result<RunSummary>
where
    F: IntoIterator<Item = I>,
    I: IntoIterator<Item = (X, Y, Color)>,
    X: Coordinate,
    Y: Coordinate,
{
    let mut session = Session::begin(AnsiDriver::stdio())?;
    let summary = animate(canvas, palette, &mut session, frames, options)?;
    session.end()?;
    Ok(summary)
}
