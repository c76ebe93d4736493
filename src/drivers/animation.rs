//! Frame-stepped bitmap animation for the 8x8 LED matrix.
//!
//! The tick handler calls [`AnimationEngine::advance_frame`] once per tick.
//! Every call writes at most one frame (eight row writes), so the tick
//! never waits on the animation.
//!
//! ## One pass
//!
//! | Phase    | Frames | Effect                                           |
//! |----------|--------|--------------------------------------------------|
//! | LoadIn   | 8      | row = bitmap >> column, column 7 → 0 (enters from the right) |
//! | ShiftOut | 8      | row = shown << 1 (leaves to the left)            |
//!
//! A cycle is `repetitions` passes of the same bitmap.  A new bitmap is
//! only accepted once the running cycle has completed; a request made
//! mid-cycle is parked in `pending` and never cuts the image short.

use crate::alarm::AnimationKind;
use crate::app::ports::{MATRIX_ROWS, MatrixPort};

/// One image, row 0 at the top, bit 7 leftmost.
pub type Bitmap = [u8; MATRIX_ROWS as usize];

pub const BITMAP_CHECK: Bitmap = [
    0b0000_0000,
    0b0000_0011,
    0b0000_0111,
    0b0000_1110,
    0b1101_1100,
    0b1111_1000,
    0b1111_0000,
    0b0110_0000,
];

pub const BITMAP_WARNING: Bitmap = [
    0b0000_0000,
    0b0110_0110,
    0b0110_0110,
    0b0110_0110,
    0b0110_0110,
    0b0000_0000,
    0b0110_0110,
    0b0000_0000,
];

pub const BITMAP_HEART: Bitmap = [
    0b0000_0000,
    0b0110_0110,
    0b1001_1001,
    0b1000_0001,
    0b1000_0001,
    0b0100_0010,
    0b0010_0100,
    0b0001_1000,
];

/// Frames in one load-in plus shift-out pass.
pub const FRAMES_PER_PASS: u32 = 2 * MATRIX_ROWS as u32;

pub const fn bitmap_for(kind: AnimationKind) -> &'static Bitmap {
    match kind {
        AnimationKind::Check => &BITMAP_CHECK,
        AnimationKind::Warning => &BITMAP_WARNING,
        AnimationKind::Heart => &BITMAP_HEART,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Next frame draws the bitmap shifted right by `column`.
    LoadIn { column: u8 },
    /// `remaining` left shifts until the image has left the matrix.
    ShiftOut { remaining: u8 },
    /// Cycle complete; ready for a new bitmap.
    Done,
}

/// Non-blocking animation state machine.  Stack-allocated, no heap.
#[derive(Debug, Clone)]
pub struct AnimationEngine {
    kind: AnimationKind,
    phase: Phase,
    repetitions: u8,
    completed_passes: u8,
    pending: Option<AnimationKind>,
}

impl AnimationEngine {
    /// Idle engine showing nothing, ready to start the heart image.
    pub const fn new() -> Self {
        Self {
            kind: AnimationKind::Heart,
            phase: Phase::Done,
            repetitions: 1,
            completed_passes: 0,
            pending: None,
        }
    }

    pub fn is_cycle_complete(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Bitmap of the running (or last finished) cycle.
    pub fn current(&self) -> AnimationKind {
        self.kind
    }

    /// Selection that arrived while a cycle was running.
    pub fn pending(&self) -> Option<AnimationKind> {
        self.pending
    }

    /// Begin a cycle of `repetitions` passes of `kind`.
    ///
    /// Returns `false` if a cycle is still in flight; the running image is
    /// left untouched and `kind` is parked as pending unless it is the
    /// running bitmap.
    pub fn start(&mut self, kind: AnimationKind, repetitions: u8) -> bool {
        if !self.is_cycle_complete() {
            self.pending = (kind != self.kind).then_some(kind);
            return false;
        }
        self.kind = kind;
        self.repetitions = repetitions.max(1);
        self.completed_passes = 0;
        self.pending = None;
        self.phase = Phase::LoadIn {
            column: MATRIX_ROWS - 1,
        };
        true
    }

    /// Draw the next frame.  No-op once the cycle is complete.
    pub fn advance_frame(&mut self, matrix: &mut impl MatrixPort) {
        match self.phase {
            Phase::LoadIn { column } => {
                let bitmap = bitmap_for(self.kind);
                for (row, bits) in (0..MATRIX_ROWS).zip(bitmap.iter()) {
                    matrix.set_row(row, bits >> column);
                }
                self.phase = match column {
                    0 => Phase::ShiftOut {
                        remaining: MATRIX_ROWS,
                    },
                    c => Phase::LoadIn { column: c - 1 },
                };
            }
            Phase::ShiftOut { remaining } => {
                for row in 0..MATRIX_ROWS {
                    let shown = matrix.get_row(row);
                    matrix.set_row(row, shown << 1);
                }
                self.phase = if remaining > 1 {
                    Phase::ShiftOut {
                        remaining: remaining - 1,
                    }
                } else {
                    self.finish_pass()
                };
            }
            Phase::Done => {}
        }
    }

    fn finish_pass(&mut self) -> Phase {
        self.completed_passes = self.completed_passes.saturating_add(1);
        if self.completed_passes < self.repetitions {
            Phase::LoadIn {
                column: MATRIX_ROWS - 1,
            }
        } else {
            Phase::Done
        }
    }
}

impl Default for AnimationEngine {
    fn default() -> Self {
        Self::new()
    }
}
