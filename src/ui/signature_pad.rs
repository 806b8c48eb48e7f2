use std::cell::RefCell;
use std::rc::Rc;

use fltk::{
    app,
    draw,
    enums::{ColorDepth, Color, Event},
    image::RgbImage,
    prelude::*,
    widget::Widget,
};
use tracing::error;

use crate::app::controllers::capture::{CaptureSurface, PointerEvent, PointerKind};
use crate::app::domain::stroke::Snapshot;

pub const PAD_HEIGHT: i32 = 150;

const BORDER: Color = Color::from_rgb(170, 170, 170);
const HINT: Color = Color::from_rgb(200, 200, 200);

/// FLTK adapter around a [`CaptureSurface`]. Mouse events become
/// [`PointerEvent`]s with the widget origin read at event time.
pub struct SignaturePad {
    pub widget: Widget,
    surface: Rc<RefCell<CaptureSurface>>,
}

impl SignaturePad {
    pub fn new(w: i32, surface: CaptureSurface) -> Self {
        let surface = Rc::new(RefCell::new(surface));
        let mut widget = Widget::new(0, 0, w, PAD_HEIGHT, None);

        if let Err(e) = surface.borrow_mut().resize(w.max(1) as u32, PAD_HEIGHT as u32) {
            error!("Failed to size signature pad: {}", e);
        }

        let draw_surface = surface.clone();
        widget.draw(move |wid| {
            draw_pad(wid, &draw_surface.borrow());
        });

        let handle_surface = surface.clone();
        widget.handle(move |wid, event| handle_pad(wid, event, &handle_surface));

        let resize_surface = surface.clone();
        widget.resize_callback(move |wid, _x, _y, w, h| {
            if w <= 0 || h <= 0 {
                return;
            }
            if let Err(e) = resize_surface.borrow_mut().resize(w as u32, h as u32) {
                error!("Failed to resize signature pad: {}", e);
            }
            wid.redraw();
        });

        Self { widget, surface }
    }

    pub fn snapshot(&self) -> Option<Snapshot> {
        self.surface.borrow().export_snapshot().cloned()
    }

    pub fn clear(&mut self) {
        self.surface.borrow_mut().clear();
        self.widget.redraw();
    }
}

fn draw_pad(wid: &Widget, surface: &CaptureSurface) {
    draw::draw_rect_fill(wid.x(), wid.y(), wid.w(), wid.h(), Color::White);

    match surface.canvas() {
        Some(canvas) if !canvas.is_blank() => {
            let (cw, ch) = (canvas.width() as i32, canvas.height() as i32);
            match RgbImage::new(canvas.as_rgba(), cw, ch, ColorDepth::Rgba8) {
                Ok(mut img) => img.draw(wid.x(), wid.y(), cw, ch),
                Err(e) => error!("Failed to draw signature: {}", e),
            }
        }
        _ => {
            draw::set_draw_color(HINT);
            draw::set_font(fltk::enums::Font::HelveticaItalic, 14);
            draw::draw_text2("Sign here", wid.x(), wid.y(), wid.w(), wid.h(), fltk::enums::Align::Center);
        }
    }

    draw::set_draw_color(BORDER);
    draw::draw_rect(wid.x(), wid.y(), wid.w(), wid.h());
}

/// Map an FLTK event on the pad to a pointer kind. A drag that has left
/// the widget counts as leaving the surface, since FLTK keeps delivering
/// drags to the widget that took the push.
pub fn pointer_kind(event: Event, inside: bool) -> Option<PointerKind> {
    match event {
        Event::Push => Some(PointerKind::Down),
        Event::Drag if inside => Some(PointerKind::Move),
        Event::Drag => Some(PointerKind::Leave),
        Event::Released => Some(PointerKind::Up),
        Event::Leave => Some(PointerKind::Leave),
        _ => None,
    }
}

fn handle_pad(wid: &mut Widget, event: Event, surface: &Rc<RefCell<CaptureSurface>>) -> bool {
    // Claim Enter so FLTK reports Leave to this widget
    if event == Event::Enter {
        return true;
    }
    let Some(kind) = pointer_kind(event, app::event_inside_widget(wid)) else {
        return false;
    };

    let pointer = PointerEvent::new(kind, app::event_x() as f32, app::event_y() as f32);
    let origin = (wid.x() as f32, wid.y() as f32);
    if let Err(e) = surface.borrow_mut().handle_pointer(pointer, origin) {
        error!("Failed to export signature: {}", e);
    }
    wid.redraw();
    // Consume pointer events so the enclosing scroll area never pans
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::controllers::capture::CaptureState;
    use crate::app::domain::settings::ResizeBehavior;
    use crate::app::services::raster::StrokeStyle;

    #[test]
    fn test_pointer_kind_mapping() {
        assert_eq!(pointer_kind(Event::Push, true), Some(PointerKind::Down));
        assert_eq!(pointer_kind(Event::Drag, true), Some(PointerKind::Move));
        assert_eq!(pointer_kind(Event::Released, false), Some(PointerKind::Up));
        assert_eq!(pointer_kind(Event::Leave, false), Some(PointerKind::Leave));
        assert_eq!(pointer_kind(Event::Enter, true), None);
        assert_eq!(pointer_kind(Event::KeyDown, true), None);
    }

    #[test]
    fn test_drag_outside_ends_stroke() {
        assert_eq!(pointer_kind(Event::Drag, false), Some(PointerKind::Leave));

        let mut surface = CaptureSurface::new(StrokeStyle::default(), ResizeBehavior::Clear);
        surface.resize(100, 50).unwrap();
        let origin = (10.0, 20.0);
        let events = [
            (Event::Push, true, 20.0, 30.0),
            (Event::Drag, true, 40.0, 30.0),
            (Event::Drag, false, 200.0, 30.0),
            (Event::Drag, true, 50.0, 40.0),
        ];
        for (event, inside, x, y) in events {
            let kind = pointer_kind(event, inside).unwrap();
            surface.handle_pointer(PointerEvent::new(kind, x, y), origin).unwrap();
        }

        assert_eq!(surface.state(), CaptureState::Idle);
        assert!(surface.export_snapshot().is_some());
        assert_eq!(surface.strokes().len(), 1);
        assert_eq!(surface.strokes()[0].len(), 2);
    }
}
