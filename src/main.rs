use std::sync::Arc;

use fltk::{
    app,
    enums::Event,
    prelude::*,
};
use tracing::{info, warn};

use sign_pad::app::controllers::capture::CaptureSurface;
use sign_pad::app::domain::messages::Message;
use sign_pad::app::domain::settings::AppSettings;
use sign_pad::app::infrastructure::logging::init_logging;
use sign_pad::app::services::raster::StrokeStyle;
use sign_pad::app::services::transport::HttpTransport;
use sign_pad::app::state::AppState;
use sign_pad::ui::main_window::build_main_window;
use sign_pad::ui::menu::build_menu;

fn main() {
    init_logging();

    let mut settings = AppSettings::load();
    if let Err(e) = settings.validate() {
        warn!("Invalid settings, using defaults: {}", e);
        settings = AppSettings::default();
    }
    info!(config = %AppSettings::get_config_path().display(), "SignPad starting");

    let app = app::App::default();
    let (sender, receiver) = app::channel::<Message>();

    let style = StrokeStyle {
        width: settings.stroke_width,
        color: settings.stroke_color,
    };
    let surface = CaptureSurface::new(style, settings.resize_behavior);

    let mut widgets = build_main_window(&sender, surface, settings.window_width, settings.window_height);
    build_menu(&mut widgets.menu, &sender);

    widgets.wind.set_callback({
        let s = sender;
        move |_| {
            if app::event() == Event::Close {
                s.send(Message::WindowClose);
            }
        }
    });
    widgets.wind.show();

    let mut state = AppState::new(widgets, settings, Arc::new(HttpTransport), sender);

    while app.wait() {
        let Some(msg) = receiver.recv() else {
            continue;
        };
        match msg {
            Message::FieldEdited(id) => state.field_edited(id),
            Message::ConfirmationToggled(id) => state.confirmation_toggled(id),
            Message::Submit => state.submit(),
            Message::ClearSignature => state.clear_signature(),
            Message::SendSummary => state.send_summary(),
            Message::SendFinished(result) => state.send_finished(result),
            Message::PrintDocument => state.print_document(),
            Message::FileQuit | Message::WindowClose => {
                if state.file_quit() {
                    app.quit();
                }
            }
        }
    }
}
