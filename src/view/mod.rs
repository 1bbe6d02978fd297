mod actions;
mod presentation;
mod text_buffer;
mod window;

pub use actions::{
    DeleteBackward, DeleteForward, FocusNext, FocusPrevious, INPUT_KEY_CONTEXT, InsertNewline,
    MoveEnd, MoveHome, MoveLeft, MoveRight, PasteClipboard, SubmitForm, TEXTAREA_KEY_CONTEXT,
    ensure_contact_keybindings,
};
pub use presentation::{
    ContactFormPresentation, FieldPresentation, InputKind, SENDING_LABEL, SUBMIT_LABEL,
    SubmitButtonPresentation,
};
pub use text_buffer::TextBuffer;
pub use window::ContactFormView;
