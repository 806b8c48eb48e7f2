use fltk::{
    app,
    button::Button,
    enums::{Align, Color, Event, Font, FrameType},
    frame::Frame,
    group::{Flex, Group},
    prelude::*,
    window::Window,
};

use super::run_dialog;

const OVERLAY_W: i32 = 480;
const OVERLAY_H: i32 = 320;
const CONTENT_MARGIN: i32 = 40;

/// Text of a modal confirmation notice.
pub struct Notice {
    pub title: &'static str,
    pub text: &'static str,
    pub delivery: &'static str,
    pub button: &'static str,
}

pub const SIGNED_NOTICE: Notice = Notice {
    title: "Contract Signed!",
    text: "Your signature has been successfully added to the Call-Off Contract.",
    delivery: "The signed contract is ready for delivery.",
    button: "Continue",
};

pub const SENT_NOTICE: Notice = Notice {
    title: "Thank You!",
    text: "The Call-Off Contract has been successfully sent to the contractors.",
    delivery: "A copy will arrive in your inbox within the next 5 minutes.",
    button: "Close",
};

/// Show a modal notice. Closes on the button or on a click outside the
/// content box.
pub fn show_notice(notice: &Notice) {
    let mut dialog = Window::default()
        .with_size(OVERLAY_W, OVERLAY_H)
        .with_label(notice.title)
        .center_screen();
    dialog.make_modal(true);
    dialog.set_color(Color::from_rgb(90, 90, 90));

    let cx = CONTENT_MARGIN;
    let cy = CONTENT_MARGIN;
    let cw = OVERLAY_W - CONTENT_MARGIN * 2;
    let ch = OVERLAY_H - CONTENT_MARGIN * 2;

    let mut content = Group::new(cx, cy, cw, ch, None);
    content.set_frame(FrameType::FlatBox);
    content.set_color(Color::White);

    let mut flex = Flex::new(cx + 15, cy + 10, cw - 30, ch - 20, None);
    flex.set_type(fltk::group::FlexType::Column);
    flex.set_spacing(6);

    let mut check = Frame::default().with_label("\u{2713}");
    check.set_label_size(30);
    check.set_label_color(Color::from_rgb(76, 175, 80));
    flex.fixed(&check, 40);

    let mut title = Frame::default().with_label(notice.title);
    title.set_label_size(20);
    title.set_label_font(Font::HelveticaBold);
    flex.fixed(&title, 30);

    let mut text = Frame::default().with_label(notice.text);
    text.set_label_size(13);
    text.set_align(Align::Center | Align::Inside | Align::Wrap);

    let mut delivery = Frame::default().with_label(notice.delivery);
    delivery.set_label_size(12);
    delivery.set_label_color(Color::from_rgb(100, 100, 100));
    delivery.set_align(Align::Center | Align::Inside | Align::Wrap);
    flex.fixed(&delivery, 30);

    let mut close_btn = Button::default().with_label(notice.button);
    flex.fixed(&close_btn, 32);

    flex.end();
    content.end();
    dialog.end();

    let mut dialog_close = dialog.clone();
    close_btn.set_callback(move |_| {
        dialog_close.hide();
    });

    dialog.handle(move |win, event| {
        if event == Event::Push {
            let (x, y) = (app::event_x(), app::event_y());
            let inside = x >= cx && x < cx + cw && y >= cy && y < cy + ch;
            if !inside {
                win.hide();
                return true;
            }
        }
        false
    });

    dialog.show();
    run_dialog(&dialog);
}
