use fltk::{
    app::Sender,
    enums::Shortcut,
    menu::{MenuBar, MenuFlag},
    prelude::*,
};

use crate::app::domain::messages::Message;

pub fn build_menu(menu: &mut MenuBar, sender: &Sender<Message>) {
    let s = sender;

    // File
    menu.add("File/Print Contract...", Shortcut::Ctrl | 'p', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::PrintDocument) });
    menu.add("File/Quit", Shortcut::Ctrl | 'q', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::FileQuit) });

    // Contract
    menu.add("Contract/Sign Contract", Shortcut::Ctrl | Shortcut::Shift | 's', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::Submit) });
    menu.add("Contract/Clear Signature", Shortcut::None, MenuFlag::MenuDivider, { let s = *s; move |_| s.send(Message::ClearSignature) });
    menu.add("Contract/Send Contract", Shortcut::Ctrl | Shortcut::Shift | 'e', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::SendSummary) });
}
