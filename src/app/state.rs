use std::sync::Arc;

use chrono::{Local, Utc};
use fltk::{app, app::Sender, dialog, prelude::*};
use tracing::{error, info, warn};

use super::controllers::form::{FormController, SendState};
use super::domain::form::FieldId;
use super::domain::messages::Message;
use super::domain::settings::AppSettings;
use super::infrastructure::error::{AppError, TransportError};
use super::services::print;
use super::services::transport::Transport;
use crate::ui::dialogs::notice::{SENT_NOTICE, SIGNED_NOTICE, show_notice};
use crate::ui::main_window::MainWidgets;

const SEND_FAILED_TEXT: &str = "Failed to send contract. Please try again or contact support.";

pub struct AppState {
    pub form: FormController,
    pub widgets: MainWidgets,
    pub settings: AppSettings,
    pub transport: Arc<dyn Transport>,
    pub sender: Sender<Message>,
}

impl AppState {
    pub fn new(
        widgets: MainWidgets,
        settings: AppSettings,
        transport: Arc<dyn Transport>,
        sender: Sender<Message>,
    ) -> Self {
        if !settings.endpoint_configured() {
            warn!("No webhook endpoint configured; sending will fail until settings.json is updated");
        }
        let form = FormController::with_date(Local::now().date_naive());
        let mut widgets = widgets;
        for row in widgets.rows.iter_mut() {
            row.input.set_value(&form.field(row.id).value);
        }
        Self {
            form,
            widgets,
            settings,
            transport,
            sender,
        }
    }

    /// Copy an edited widget value into the form model.
    pub fn field_edited(&mut self, id: FieldId) {
        let Some(row) = self.widgets.rows.iter().find(|r| r.id == id) else {
            return;
        };
        let value = row.input.value();
        if !self.form.set_value(id, &value) {
            // Locked fields keep their model value
            let current = self.form.field(id).value.clone();
            if let Some(row) = self.widgets.row_mut(id) {
                row.input.set_value(&current);
            }
        }
    }

    pub fn confirmation_toggled(&mut self, id: FieldId) {
        let checked = self.widgets.confirmation_checked(id);
        let locked = self.form.set_confirmation(id, checked);
        if checked && !locked {
            // Nothing typed yet; the box cannot stay ticked
            self.widgets.set_confirmation_checked(id, false);
        }
        if let Some(row) = self.widgets.row_mut(id) {
            row.input.set_locked(locked);
        }
    }

    pub fn submit(&mut self) {
        let snapshot = self.widgets.pad.snapshot();
        let today = Local::now().date_naive();
        let doc = match self.form.submit(snapshot.as_ref(), today) {
            Ok(doc) => doc,
            Err(AppError::Validation(e)) => {
                dialog::alert_default(&e.alert_text());
                return;
            }
            Err(e) => {
                warn!("Submit ignored: {}", e);
                return;
            }
        };

        for row in self.widgets.rows.iter_mut() {
            if matches!(row.id, FieldId::ClientName | FieldId::ClientPosition) {
                continue;
            }
            if let Some(frozen) = doc.field(row.id) {
                row.freeze(&frozen.text, frozen.multiline);
            }
        }
        for w in self.widgets.sign_section.iter_mut() {
            w.hide();
        }
        self.widgets.signed_block.show(&doc.signature);
        self.widgets.actions.show();
        self.refresh_send_button();

        self.widgets.pack.redraw();
        self.widgets.scroll.redraw();
        self.widgets.wind.redraw();

        show_notice(&SIGNED_NOTICE);
    }

    pub fn clear_signature(&mut self) {
        if self.form.is_signed() {
            return;
        }
        self.widgets.pad.clear();
    }

    /// Post the summary on a worker thread. The result comes back as
    /// `Message::SendFinished`.
    pub fn send_summary(&mut self) {
        let Some(payload) = self.form.begin_send(Utc::now()) else {
            return;
        };
        self.refresh_send_button();

        let transport = Arc::clone(&self.transport);
        let endpoint = self.settings.endpoint_url.clone();
        let sender = self.sender;
        std::thread::spawn(move || {
            let result = transport.post(&endpoint, &payload);
            sender.send(Message::SendFinished(result));
            app::awake();
        });
    }

    pub fn send_finished(&mut self, result: Result<(), TransportError>) {
        let state = self.form.finish_send(&result);
        self.refresh_send_button();
        match state {
            SendState::Sent => show_notice(&SENT_NOTICE),
            SendState::Ready => dialog::alert_default(SEND_FAILED_TEXT),
            SendState::InFlight => {}
        }
    }

    pub fn print_document(&mut self) {
        if let Err(e) = print::open_for_printing(&self.form) {
            error!("Failed to open printable contract: {}", e);
            dialog::alert_default(&format!("Could not open the contract for printing: {}", e));
        }
    }

    /// Handle a quit request. Returns `true` if the app should exit.
    pub fn file_quit(&mut self) -> bool {
        if self.form.send_state() == SendState::InFlight {
            let choice = dialog::choice2_default(
                "The contract is still being sent. Quit anyway?",
                "Quit",
                "Cancel",
                "",
            );
            if choice != Some(0) {
                return false;
            }
        }
        info!("Shutting down");
        true
    }

    fn refresh_send_button(&mut self) {
        let btn = &mut self.widgets.send_btn;
        btn.set_label(self.form.send_label());
        if self.form.can_send() {
            btn.activate();
        } else {
            btn.deactivate();
        }
        btn.redraw();
    }
}
