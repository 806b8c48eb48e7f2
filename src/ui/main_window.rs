use fltk::{
    app::Sender,
    button::{Button, CheckButton},
    enums::{Align, CallbackTrigger, Color, Font, FrameType},
    frame::Frame,
    group::{Flex, Pack, PackType, Scroll, ScrollType},
    image::PngImage,
    input::{Input, MultilineInput},
    menu::MenuBar,
    prelude::*,
    widget::Widget,
    window::Window,
};

use crate::app::controllers::capture::CaptureSurface;
use crate::app::controllers::form::{SEND_LABEL, SignatureBlock};
use crate::app::domain::form::{DOCUMENT_SECTIONS, FieldId, SIGNER_SECTION};
use crate::app::domain::messages::Message;
use super::signature_pad::SignaturePad;

const MENU_HEIGHT: i32 = 30;
const MARGIN: i32 = 15;
const LABEL_HEIGHT: i32 = 22;
const INPUT_HEIGHT: i32 = 28;
const MULTILINE_HEIGHT: i32 = 80;
const BUTTON_ROW_HEIGHT: i32 = 34;
const LINE_HEIGHT: i32 = 18;
const SIGNATURE_IMAGE_HEIGHT: i32 = 60;

const HEADING_COLOR: Color = Color::from_rgb(40, 40, 40);
const LOCKED_COLOR: Color = Color::from_rgb(235, 235, 235);

/// Editable control for one form field.
pub enum FieldInput {
    Single(Input),
    Multi(MultilineInput),
}

impl FieldInput {
    pub fn value(&self) -> String {
        match self {
            FieldInput::Single(i) => i.value(),
            FieldInput::Multi(i) => i.value(),
        }
    }

    pub fn set_value(&mut self, value: &str) {
        match self {
            FieldInput::Single(i) => i.set_value(value),
            FieldInput::Multi(i) => i.set_value(value),
        }
    }

    /// Lock or unlock the control, greying it while locked.
    pub fn set_locked(&mut self, locked: bool) {
        let color = if locked { LOCKED_COLOR } else { Color::White };
        match self {
            FieldInput::Single(i) => {
                i.set_readonly(locked);
                i.set_color(color);
                i.redraw();
            }
            FieldInput::Multi(i) => {
                i.set_readonly(locked);
                i.set_color(color);
                i.redraw();
            }
        }
    }

    pub fn hide(&mut self) {
        match self {
            FieldInput::Single(i) => i.hide(),
            FieldInput::Multi(i) => i.hide(),
        }
    }

    pub fn as_base_widget(&self) -> Widget {
        match self {
            FieldInput::Single(i) => i.as_base_widget(),
            FieldInput::Multi(i) => i.as_base_widget(),
        }
    }
}

/// A field's input plus the static frame that replaces it once frozen.
pub struct FieldRow {
    pub id: FieldId,
    pub label: Frame,
    pub input: FieldInput,
    pub display: Frame,
}

impl FieldRow {
    /// Swap the input for a static rendering of `text`. Line breaks are
    /// kept; the frame grows to fit.
    pub fn freeze(&mut self, text: &str, multiline: bool) {
        self.input.hide();
        let lines = estimate_lines(text, self.display.w());
        let h = if multiline { lines * LINE_HEIGHT + 8 } else { LINE_HEIGHT + 8 };
        self.display.set_size(self.display.w(), h);
        self.display.set_label(&escape_label(text));
        self.display.show();
    }
}

/// Widgets of the signed view, hidden until the contract is signed.
pub struct SignedBlockWidgets {
    pub name: Frame,
    pub position: Frame,
    pub image: Frame,
    pub date: Frame,
    pub all: Vec<Widget>,
}

impl SignedBlockWidgets {
    pub fn show(&mut self, block: &SignatureBlock) {
        self.name.set_label(&escape_label(&block.name));
        self.position.set_label(&escape_label(&block.position));
        self.date.set_label(&escape_label(&block.date_text));
        if let Ok(mut img) = PngImage::from_data(block.signature.png_bytes()) {
            let (w, h) = (img.w().max(1), img.h().max(1));
            let scaled_w = w * SIGNATURE_IMAGE_HEIGHT / h;
            img.scale(scaled_w, SIGNATURE_IMAGE_HEIGHT, true, true);
            self.image.set_image(Some(img));
        } else {
            tracing::warn!("Signature snapshot could not be decoded for display");
        }
        for w in self.all.iter_mut() {
            w.show();
        }
    }
}

pub struct MainWidgets {
    pub wind: Window,
    pub menu: MenuBar,
    pub scroll: Scroll,
    pub pack: Pack,
    pub rows: Vec<FieldRow>,
    pub name_check: CheckButton,
    pub position_check: CheckButton,
    pub pad: SignaturePad,
    /// Everything that is removed from view once the form is signed.
    pub sign_section: Vec<Widget>,
    pub signed_block: SignedBlockWidgets,
    pub actions: Flex,
    pub send_btn: Button,
}

impl MainWidgets {
    pub fn row_mut(&mut self, id: FieldId) -> Option<&mut FieldRow> {
        self.rows.iter_mut().find(|r| r.id == id)
    }

    pub fn set_confirmation_checked(&mut self, id: FieldId, checked: bool) {
        match id {
            FieldId::ClientName => self.name_check.set_checked(checked),
            FieldId::ClientPosition => self.position_check.set_checked(checked),
            _ => {}
        }
    }

    pub fn confirmation_checked(&self, id: FieldId) -> bool {
        match id {
            FieldId::ClientName => self.name_check.is_checked(),
            FieldId::ClientPosition => self.position_check.is_checked(),
            _ => false,
        }
    }
}

/// FLTK labels treat `@` as a symbol prefix.
pub fn escape_label(text: &str) -> String {
    text.replace('@', "@@")
}

/// Rough wrapped line count for a label of the given pixel width.
pub fn estimate_lines(text: &str, width: i32) -> i32 {
    let chars_per_line = ((width - 10) / 7).max(1) as usize;
    text.lines()
        .map(|line| line.chars().count().div_ceil(chars_per_line).max(1) as i32)
        .sum::<i32>()
        .max(1)
}

fn heading(text: &str) {
    let mut frame = Frame::default().with_size(0, 34).with_label(text);
    frame.set_align(Align::Left | Align::Inside | Align::Bottom);
    frame.set_label_font(Font::HelveticaBold);
    frame.set_label_size(16);
    frame.set_label_color(HEADING_COLOR);
}

fn field_row(id: FieldId, sender: &Sender<Message>) -> FieldRow {
    let mut label = Frame::default().with_size(0, LABEL_HEIGHT).with_label(id.label());
    label.set_align(Align::Left | Align::Inside);
    label.set_label_size(13);

    let mut input = if id.is_multiline() {
        let mut i = MultilineInput::default().with_size(0, MULTILINE_HEIGHT);
        i.set_wrap(true);
        i.set_trigger(CallbackTrigger::Changed);
        i.emit(*sender, Message::FieldEdited(id));
        FieldInput::Multi(i)
    } else {
        let mut i = Input::default().with_size(0, INPUT_HEIGHT);
        i.set_trigger(CallbackTrigger::Changed);
        i.emit(*sender, Message::FieldEdited(id));
        FieldInput::Single(i)
    };
    input.set_locked(false);

    let mut display = Frame::default().with_size(0, LINE_HEIGHT + 8);
    display.set_align(Align::Left | Align::Top | Align::Inside | Align::Wrap);
    display.set_label_size(13);
    display.hide();

    FieldRow { id, label, input, display }
}

fn signed_frame(h: i32, label: &str, bold: bool) -> Frame {
    let mut f = Frame::default().with_size(0, h).with_label(label);
    f.set_align(Align::Left | Align::Inside);
    if bold {
        f.set_label_font(Font::HelveticaBold);
    } else {
        f.set_label_size(12);
        f.set_label_color(Color::from_rgb(110, 110, 110));
    }
    f.hide();
    f
}

pub fn build_main_window(
    sender: &Sender<Message>,
    surface: CaptureSurface,
    width: i32,
    height: i32,
) -> MainWidgets {
    let mut wind = Window::new(100, 100, width, height, "Call-Off Contract - SignPad");
    wind.set_xclass("SignPad");
    wind.set_color(Color::from_rgb(245, 245, 245));

    let menu = MenuBar::new(0, 0, width, MENU_HEIGHT, "");

    let mut scroll = Scroll::new(0, MENU_HEIGHT, width, height - MENU_HEIGHT, None);
    scroll.set_type(ScrollType::Vertical);
    scroll.set_frame(FrameType::FlatBox);

    let content_w = width - MARGIN * 2 - 20;
    let mut pack = Pack::new(MARGIN, MENU_HEIGHT + MARGIN, content_w, 0, None);
    pack.set_type(PackType::Vertical);
    pack.set_spacing(4);

    let mut title = Frame::default().with_size(0, 44).with_label("Call-Off Contract");
    title.set_label_font(Font::HelveticaBold);
    title.set_label_size(22);
    title.set_align(Align::Left | Align::Inside);

    let mut rows = Vec::with_capacity(FieldId::ALL.len());
    for (section, ids) in DOCUMENT_SECTIONS {
        heading(section);
        for &id in ids {
            rows.push(field_row(id, sender));
        }
    }

    heading(SIGNER_SECTION.0);
    let mut sign_section = Vec::new();

    let name_row = field_row(FieldId::ClientName, sender);
    let mut name_check = CheckButton::default()
        .with_size(0, 24)
        .with_label("I confirm my name is entered correctly");
    name_check.emit(*sender, Message::ConfirmationToggled(FieldId::ClientName));

    let position_row = field_row(FieldId::ClientPosition, sender);
    let mut position_check = CheckButton::default()
        .with_size(0, 24)
        .with_label("I confirm my position is entered correctly");
    position_check.emit(*sender, Message::ConfirmationToggled(FieldId::ClientPosition));

    let date_row = field_row(FieldId::ClientDate, sender);

    let mut pad_label = Frame::default().with_size(0, LABEL_HEIGHT).with_label("Signature");
    pad_label.set_align(Align::Left | Align::Inside);
    pad_label.set_label_size(13);

    let pad = SignaturePad::new(content_w, surface);

    let mut sign_buttons = Flex::default().with_size(0, BUTTON_ROW_HEIGHT).row();
    let mut clear_btn = Button::default().with_label("Clear Signature");
    clear_btn.emit(*sender, Message::ClearSignature);
    sign_buttons.fixed(&clear_btn, 140);
    Frame::default();
    let mut submit_btn = Button::default().with_label("Sign Contract");
    submit_btn.set_color(Color::from_rgb(33, 150, 243));
    submit_btn.set_label_color(Color::White);
    submit_btn.emit(*sender, Message::Submit);
    sign_buttons.fixed(&submit_btn, 160);
    sign_buttons.end();

    for row in [&name_row, &position_row] {
        sign_section.push(row.label.as_base_widget());
        sign_section.push(row.input.as_base_widget());
    }
    sign_section.push(name_check.as_base_widget());
    sign_section.push(position_check.as_base_widget());
    sign_section.push(pad_label.as_base_widget());
    sign_section.push(pad.widget.as_base_widget());
    sign_section.push(sign_buttons.as_base_widget());

    rows.push(name_row);
    rows.push(position_row);
    rows.push(date_row);

    let name_caption = signed_frame(18, "Name", false);
    let name = signed_frame(24, "", true);
    let position = signed_frame(22, "", false);
    let sig_caption = signed_frame(18, "Signature", false);
    let mut image = signed_frame(SIGNATURE_IMAGE_HEIGHT + 10, "", false);
    image.set_frame(FrameType::BorderBox);
    image.set_color(Color::White);
    image.set_align(Align::Left | Align::Inside);
    let date_caption = signed_frame(18, "Date", false);
    let date = signed_frame(24, "", true);
    let all = vec![
        name_caption.as_base_widget(),
        name.as_base_widget(),
        position.as_base_widget(),
        sig_caption.as_base_widget(),
        image.as_base_widget(),
        date_caption.as_base_widget(),
        date.as_base_widget(),
    ];
    let signed_block = SignedBlockWidgets { name, position, image, date, all };

    let mut actions = Flex::default().with_size(0, BUTTON_ROW_HEIGHT).row();
    let mut send_btn = Button::default().with_label(SEND_LABEL);
    send_btn.emit(*sender, Message::SendSummary);
    actions.fixed(&send_btn, 160);
    let mut print_btn = Button::default().with_label("View / Print Contract");
    print_btn.emit(*sender, Message::PrintDocument);
    actions.fixed(&print_btn, 180);
    Frame::default();
    actions.end();
    actions.hide();

    // Bottom padding
    Frame::default().with_size(0, MARGIN * 2);

    pack.end();
    scroll.end();
    wind.end();
    wind.resizable(&scroll);

    let mut layout_pack = pack.clone();
    scroll.resize_callback(move |_, _x, _y, w, _h| {
        let pw = (w - MARGIN * 2 - 20).max(100);
        layout_pack.resize(layout_pack.x(), layout_pack.y(), pw, layout_pack.h());
        layout_pack.redraw();
    });

    MainWidgets {
        wind,
        menu,
        scroll,
        pack,
        rows,
        name_check,
        position_check,
        pad,
        sign_section,
        signed_block,
        actions,
        send_btn,
    }
}
