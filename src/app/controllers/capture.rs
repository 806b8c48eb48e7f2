//! Signature capture surface.
//!
//! Turns pointer input into strokes, renders them into a pixel canvas and
//! keeps the latest PNG export. Input arrives through [`PointerEvent`], which
//! each host adapter (FLTK mouse, touch) produces in viewport coordinates.

use tracing::{debug, warn};

use crate::app::domain::settings::ResizeBehavior;
use crate::app::domain::stroke::{Point, Snapshot, Stroke};
use crate::app::infrastructure::error::Result;
use crate::app::services::raster::{Canvas, StrokeStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    /// Pointer left the surface. Stops drawing exactly like `Up`.
    Leave,
}

/// Host-neutral pointer event in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: f32,
    pub y: f32,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, x: f32, y: f32) -> Self {
        Self { kind, x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// A touch event as delivered by a touch-capable host: the phase plus the
/// positions of all active touches. The FLTK pad never builds these, since
/// FLTK folds touch into mouse events; hosts with raw touch input feed them
/// through [`CaptureSurface::handle_touch`].
#[derive(Debug, Clone, PartialEq)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub touches: Vec<(f32, f32)>,
}

impl TouchEvent {
    /// Map onto the pointer abstraction using the first active touch.
    /// Start/Move without any active touch carry no position and are dropped.
    pub fn to_pointer(&self) -> Option<PointerEvent> {
        match self.phase {
            TouchPhase::Start | TouchPhase::Move => {
                let &(x, y) = self.touches.first()?;
                let kind = if self.phase == TouchPhase::Start {
                    PointerKind::Down
                } else {
                    PointerKind::Move
                };
                Some(PointerEvent::new(kind, x, y))
            }
            TouchPhase::End | TouchPhase::Cancel => {
                let (x, y) = self.touches.first().copied().unwrap_or((0.0, 0.0));
                Some(PointerEvent::new(PointerKind::Up, x, y))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Drawing,
}

pub struct CaptureSurface {
    canvas: Option<Canvas>,
    style: StrokeStyle,
    resize_behavior: ResizeBehavior,
    strokes: Vec<Stroke>,
    state: CaptureState,
    export: Option<Snapshot>,
}

impl CaptureSurface {
    pub fn new(style: StrokeStyle, resize_behavior: ResizeBehavior) -> Self {
        Self {
            canvas: None,
            style,
            resize_behavior,
            strokes: Vec::new(),
            state: CaptureState::Idle,
            export: None,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn canvas(&self) -> Option<&Canvas> {
        self.canvas.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.canvas
            .as_ref()
            .is_some_and(|c| c.width() > 0 && c.height() > 0)
    }

    /// Reallocate the canvas to the on-screen box and reapply the pen style.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        if let Some(c) = &self.canvas {
            if c.width() == width && c.height() == height {
                return Ok(());
            }
        }
        debug!(width, height, behavior = ?self.resize_behavior, "resizing signature surface");
        self.canvas = Some(Canvas::new(width, height, self.style));

        match self.resize_behavior {
            ResizeBehavior::Clear => {
                if !self.strokes.is_empty() {
                    warn!("signature surface resized; drawn signature discarded");
                }
                self.strokes.clear();
                self.export = None;
                self.state = CaptureState::Idle;
            }
            ResizeBehavior::Preserve => {
                self.replay_strokes();
                if self.export.is_some() {
                    self.export = Some(self.export_canvas()?);
                }
            }
        }
        Ok(())
    }

    pub fn begin_stroke(&mut self, point: Point) {
        let Some(canvas) = self.canvas.as_mut().filter(|c| c.width() > 0 && c.height() > 0) else {
            return;
        };
        canvas.draw_dot(point);
        self.strokes.push(Stroke::starting_at(point));
        self.state = CaptureState::Drawing;
        debug!(x = point.x, y = point.y, "stroke started");
    }

    pub fn extend_stroke(&mut self, point: Point) {
        if self.state != CaptureState::Drawing {
            return;
        }
        let (Some(canvas), Some(stroke)) = (self.canvas.as_mut(), self.strokes.last_mut()) else {
            return;
        };
        if let Some(prev) = stroke.last_point() {
            canvas.draw_segment(prev, point);
        }
        stroke.push(point);
    }

    /// Leave drawing state and export the canvas. A stroke that never moved
    /// still exports, since its start dot is on the canvas.
    pub fn end_stroke(&mut self) -> Result<()> {
        if self.state != CaptureState::Drawing {
            return Ok(());
        }
        self.state = CaptureState::Idle;
        let recorded = self.strokes.last().map_or(0, Stroke::len);
        if recorded == 0 {
            return Ok(());
        }
        self.export = Some(self.export_canvas()?);
        debug!(points = recorded, strokes = self.strokes.len(), "stroke ended; signature exported");
        Ok(())
    }

    pub fn clear(&mut self) {
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.clear();
        }
        self.strokes.clear();
        self.export = None;
        self.state = CaptureState::Idle;
        debug!("signature cleared");
    }

    /// Latest export, or `None` when nothing was signed since the last clear.
    pub fn export_snapshot(&self) -> Option<&Snapshot> {
        self.export.as_ref()
    }

    /// Feed one pointer event. `origin` is the surface's current top-left in
    /// the same viewport coordinates as the event and must be read fresh for
    /// every event.
    pub fn handle_pointer(&mut self, event: PointerEvent, origin: (f32, f32)) -> Result<()> {
        let local = Point::new(event.x - origin.0, event.y - origin.1);
        match event.kind {
            PointerKind::Down => self.begin_stroke(local),
            PointerKind::Move => self.extend_stroke(local),
            PointerKind::Up | PointerKind::Leave => self.end_stroke()?,
        }
        Ok(())
    }

    pub fn handle_touch(&mut self, event: &TouchEvent, origin: (f32, f32)) -> Result<()> {
        match event.to_pointer() {
            Some(pointer) => self.handle_pointer(pointer, origin),
            None => Ok(()),
        }
    }

    fn replay_strokes(&mut self) {
        let Some(canvas) = self.canvas.as_mut() else {
            return;
        };
        for stroke in &self.strokes {
            let points = stroke.points();
            if let Some(&first) = points.first() {
                canvas.draw_dot(first);
            }
            for pair in points.windows(2) {
                canvas.draw_segment(pair[0], pair[1]);
            }
        }
    }

    fn export_canvas(&self) -> Result<Snapshot> {
        match &self.canvas {
            Some(canvas) => canvas.export(),
            None => Ok(Snapshot::new(Vec::new(), 0, 0)),
        }
    }
}
