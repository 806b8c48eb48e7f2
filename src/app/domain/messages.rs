use super::form::FieldId;
use crate::app::infrastructure::error::TransportError;

/// All messages that can be sent through the FLTK channel.
/// Widget and menu callbacks send one of these; the dispatch loop in main
/// hands them to `AppState`.
#[derive(Debug, Clone)]
pub enum Message {
    // Form
    FieldEdited(FieldId),
    ConfirmationToggled(FieldId),
    Submit,

    // Signature pad
    ClearSignature,

    // Actions
    SendSummary,
    SendFinished(Result<(), TransportError>),
    PrintDocument,

    // Window
    FileQuit,
    WindowClose,
}
