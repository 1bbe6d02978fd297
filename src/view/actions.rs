use std::sync::Once;

use gpui::{App, KeyBinding, actions};

pub const INPUT_KEY_CONTEXT: &str = "contact_form_input";
pub const TEXTAREA_KEY_CONTEXT: &str = "contact_form_textarea";

actions!(
    contact_form,
    [
        MoveLeft,
        MoveRight,
        MoveHome,
        MoveEnd,
        DeleteBackward,
        DeleteForward,
        PasteClipboard,
        InsertNewline,
        SubmitForm,
        FocusNext,
        FocusPrevious,
    ]
);

static BINDINGS_INIT: Once = Once::new();

pub fn ensure_contact_keybindings(cx: &mut App) {
    BINDINGS_INIT.call_once(|| {
        cx.bind_keys(common_bindings(INPUT_KEY_CONTEXT));
        cx.bind_keys(common_bindings(TEXTAREA_KEY_CONTEXT));
        cx.bind_keys(input_only_bindings());
        cx.bind_keys(textarea_only_bindings());
    });
}

fn common_bindings(context: &'static str) -> Vec<KeyBinding> {
    vec![
        KeyBinding::new("left", MoveLeft, Some(context)),
        KeyBinding::new("right", MoveRight, Some(context)),
        KeyBinding::new("home", MoveHome, Some(context)),
        KeyBinding::new("end", MoveEnd, Some(context)),
        KeyBinding::new("backspace", DeleteBackward, Some(context)),
        KeyBinding::new("delete", DeleteForward, Some(context)),
        KeyBinding::new("cmd-v", PasteClipboard, Some(context)),
        KeyBinding::new("ctrl-v", PasteClipboard, Some(context)),
        KeyBinding::new("tab", FocusNext, Some(context)),
        KeyBinding::new("shift-tab", FocusPrevious, Some(context)),
    ]
}

fn input_only_bindings() -> Vec<KeyBinding> {
    vec![KeyBinding::new("enter", SubmitForm, Some(INPUT_KEY_CONTEXT))]
}

fn textarea_only_bindings() -> Vec<KeyBinding> {
    vec![
        KeyBinding::new("enter", InsertNewline, Some(TEXTAREA_KEY_CONTEXT)),
        KeyBinding::new("cmd-enter", SubmitForm, Some(TEXTAREA_KEY_CONTEXT)),
        KeyBinding::new("ctrl-enter", SubmitForm, Some(TEXTAREA_KEY_CONTEXT)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_contexts_are_distinct() {
        assert_ne!(INPUT_KEY_CONTEXT, TEXTAREA_KEY_CONTEXT);
    }

    #[test]
    fn common_bindings_cover_editing_and_focus_keys() {
        assert_eq!(common_bindings(INPUT_KEY_CONTEXT).len(), 10);
    }

    #[test]
    fn enter_submits_inputs_and_breaks_lines_in_textarea() {
        assert_eq!(input_only_bindings().len(), 1);
        assert_eq!(textarea_only_bindings().len(), 3);
    }
}
