use gpui::{
    AnyElement, ClickEvent, Context, FocusHandle, FontWeight, InteractiveElement, IntoElement,
    KeyDownEvent, ParentElement, Render, SharedString, StatefulInteractiveElement, Styled,
    Subscription, Window, div, prelude::FluentBuilder as _, px, rgb,
};
use tracing::{debug, warn};

use crate::contact::{ContactField, ContactForm};
use crate::form::{SimulatedTransport, SubmitOutcome, SubmitTransport};

use super::actions::{
    DeleteBackward, DeleteForward, FocusNext, FocusPrevious, INPUT_KEY_CONTEXT, InsertNewline,
    MoveEnd, MoveHome, MoveLeft, MoveRight, PasteClipboard, SubmitForm, TEXTAREA_KEY_CONTEXT,
    ensure_contact_keybindings,
};
use super::presentation::{
    ContactFormPresentation, FieldPresentation, InputKind, SubmitButtonPresentation,
};
use super::text_buffer::TextBuffer;

const BACKGROUND: u32 = 0xf8fafc;
const TEXT: u32 = 0x1f2933;
const INPUT_BACKGROUND: u32 = 0xffffff;
const BORDER: u32 = 0xcbd2d9;
const BORDER_FOCUS: u32 = 0x3b82f6;
const ERROR: u32 = 0xdc2626;
const ACCENT: u32 = 0x2563eb;
const ACCENT_DISABLED: u32 = 0x9aa5b1;
const SUCCESS_BACKGROUND: u32 = 0xdcfce7;
const SUCCESS_TEXT: u32 = 0x166534;

struct FieldInput {
    field: ContactField,
    buffer: TextBuffer,
    focus: FocusHandle,
}

/// Window root for the contact form. Editing happens in local text buffers;
/// every content change is forwarded to the controller as a change event and
/// focus loss as a blur event.
pub struct ContactFormView {
    form: ContactForm,
    transport: SimulatedTransport,
    inputs: Vec<FieldInput>,
    _subscriptions: Vec<Subscription>,
}

impl ContactFormView {
    pub fn new(
        form: ContactForm,
        transport: SimulatedTransport,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        ensure_contact_keybindings(cx);

        let mut inputs = Vec::with_capacity(ContactField::ALL.len());
        let mut subscriptions = Vec::with_capacity(ContactField::ALL.len());
        for field in ContactField::ALL {
            let focus = cx.focus_handle();
            subscriptions.push(cx.on_blur(&focus, window, move |this, _, cx| {
                this.blur(field, cx);
            }));
            inputs.push(FieldInput {
                field,
                buffer: TextBuffer::default(),
                focus,
            });
        }

        Self {
            form,
            transport,
            inputs,
            _subscriptions: subscriptions,
        }
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    fn input_mut(&mut self, field: ContactField) -> Option<&mut FieldInput> {
        self.inputs.iter_mut().find(|input| input.field == field)
    }

    fn edit(
        &mut self,
        field: ContactField,
        apply: impl FnOnce(&mut TextBuffer) -> bool,
        cx: &mut Context<Self>,
    ) {
        let Some(input) = self.input_mut(field) else {
            return;
        };
        let before = input.buffer.value().to_string();
        if !apply(&mut input.buffer) {
            return;
        }
        if input.buffer.value() != before {
            let value = input.buffer.value().to_string();
            if let Err(error) = field.change(&self.form, value) {
                debug!(%error, field = %field.key(), "change ignored");
            }
        }
        cx.notify();
    }

    fn blur(&mut self, field: ContactField, cx: &mut Context<Self>) {
        if let Err(error) = field.blur(&self.form) {
            warn!(%error, field = %field.key(), "blur failed");
        }
        cx.notify();
    }

    fn handle_key_down(
        &mut self,
        field: ContactField,
        event: &KeyDownEvent,
        cx: &mut Context<Self>,
    ) {
        let modifiers = &event.keystroke.modifiers;
        if modifiers.control || modifiers.platform || modifiers.function || modifiers.alt {
            return;
        }
        let Some(text) = event
            .keystroke
            .key_char
            .clone()
            .filter(|text| !text.chars().any(char::is_control))
        else {
            return;
        };
        self.edit(field, |buffer| buffer.insert(&text), cx);
        cx.stop_propagation();
    }

    fn paste(&mut self, field: ContactField, cx: &mut Context<Self>) {
        let Some(text) = cx.read_from_clipboard().and_then(|item| item.text()) else {
            return;
        };
        let text = if InputKind::for_field(field).is_multiline() {
            text
        } else {
            text.replace(['\r', '\n'], " ")
        };
        self.edit(field, |buffer| buffer.insert(&text), cx);
    }

    fn focus_field(&mut self, field: ContactField, window: &mut Window, cx: &mut Context<Self>) {
        if let Some(input) = self.input_mut(field) {
            let handle = input.focus.clone();
            window.focus(&handle, cx);
        }
    }

    fn focus_offset(
        &mut self,
        field: ContactField,
        offset: isize,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let Some(index) = self.inputs.iter().position(|input| input.field == field) else {
            return;
        };
        let len = self.inputs.len() as isize;
        let next = (index as isize + offset).rem_euclid(len) as usize;
        let handle = self.inputs[next].focus.clone();
        window.focus(&handle, cx);
    }

    fn submit(&mut self, cx: &mut Context<Self>) {
        match self.form.submit_if_ready() {
            Ok(None) => return,
            Ok(Some(SubmitOutcome::Rejected)) => {}
            Ok(Some(SubmitOutcome::Sending(payload))) => {
                let delivery = self.transport.send(payload);
                let form = self.form.clone();
                cx.spawn(async move |this, cx| {
                    delivery.await;
                    if let Err(error) = form.complete_submit() {
                        warn!(%error, "failed to complete submission");
                    }
                    if let Err(error) = this.update(cx, |_, cx| cx.notify()) {
                        debug!(%error, "contact form closed before submit completed");
                    }
                })
                .detach();
            }
            Err(error) => debug!(%error, "submit ignored"),
        }
        cx.notify();
    }

    fn render_banner(message: SharedString) -> impl IntoElement {
        div()
            .px_4()
            .py_3()
            .rounded_md()
            .bg(rgb(SUCCESS_BACKGROUND))
            .text_color(rgb(SUCCESS_TEXT))
            .child(message)
    }

    fn render_field(
        &self,
        field: &FieldPresentation,
        window: &Window,
        cx: &mut Context<Self>,
    ) -> AnyElement {
        let Some(input) = self.inputs.iter().find(|input| input.field == field.field) else {
            return div().into_any_element();
        };
        let focused = input.focus.is_focused(window);
        let multiline = field.kind.is_multiline();
        let border = if field.has_error() {
            ERROR
        } else if focused {
            BORDER_FOCUS
        } else {
            BORDER
        };
        let lines = input.buffer.display_lines(focused && !field.disabled);
        let key = field.field;

        let mut control = div()
            .id(field.id.as_str())
            .key_context(if multiline {
                TEXTAREA_KEY_CONTEXT
            } else {
                INPUT_KEY_CONTEXT
            })
            .track_focus(&input.focus)
            .flex()
            .flex_col()
            .px_3()
            .py_2()
            .min_h(px(if multiline { 96.0 } else { 36.0 }))
            .border_1()
            .border_color(rgb(border))
            .rounded_md()
            .bg(rgb(INPUT_BACKGROUND))
            .children(
                lines
                    .into_iter()
                    .map(|line| div().min_h(px(18.0)).child(SharedString::from(line))),
            );

        if field.disabled {
            control = control.opacity(0.55).cursor_default();
        } else {
            control = control
                .cursor_text()
                .on_click(cx.listener(move |this, _: &ClickEvent, window, cx| {
                    this.focus_field(key, window, cx);
                }))
                .on_key_down(cx.listener(move |this, event: &KeyDownEvent, _, cx| {
                    this.handle_key_down(key, event, cx);
                }))
                .on_action(cx.listener(move |this, _: &MoveLeft, _, cx| {
                    this.edit(key, TextBuffer::move_left, cx);
                }))
                .on_action(cx.listener(move |this, _: &MoveRight, _, cx| {
                    this.edit(key, TextBuffer::move_right, cx);
                }))
                .on_action(cx.listener(move |this, _: &MoveHome, _, cx| {
                    this.edit(key, TextBuffer::move_home, cx);
                }))
                .on_action(cx.listener(move |this, _: &MoveEnd, _, cx| {
                    this.edit(key, TextBuffer::move_end, cx);
                }))
                .on_action(cx.listener(move |this, _: &DeleteBackward, _, cx| {
                    this.edit(key, TextBuffer::delete_backward, cx);
                }))
                .on_action(cx.listener(move |this, _: &DeleteForward, _, cx| {
                    this.edit(key, TextBuffer::delete_forward, cx);
                }))
                .on_action(cx.listener(move |this, _: &PasteClipboard, _, cx| {
                    this.paste(key, cx);
                }))
                .on_action(cx.listener(move |this, _: &InsertNewline, _, cx| {
                    this.edit(key, |buffer| buffer.insert("\n"), cx);
                }))
                .on_action(cx.listener(move |this, _: &FocusNext, window, cx| {
                    this.focus_offset(key, 1, window, cx);
                }))
                .on_action(cx.listener(move |this, _: &FocusPrevious, window, cx| {
                    this.focus_offset(key, -1, window, cx);
                }))
                .on_action(cx.listener(|this, _: &SubmitForm, _, cx| {
                    this.submit(cx);
                }));
        }

        div()
            .flex()
            .flex_col()
            .gap_1()
            .child(
                div()
                    .text_sm()
                    .font_weight(FontWeight::SEMIBOLD)
                    .child(field.label),
            )
            .child(control)
            .when_some(field.error.clone(), |this, error| {
                this.child(div().text_xs().text_color(rgb(ERROR)).child(error))
            })
            .into_any_element()
    }

    fn render_submit(
        &self,
        submit: SubmitButtonPresentation,
        cx: &mut Context<Self>,
    ) -> impl IntoElement {
        div()
            .id("contact-submit")
            .flex()
            .justify_center()
            .px_4()
            .py_2()
            .rounded_md()
            .bg(rgb(if submit.disabled {
                ACCENT_DISABLED
            } else {
                ACCENT
            }))
            .text_color(rgb(INPUT_BACKGROUND))
            .child(submit.label)
            .when(!submit.disabled, |button| {
                button
                    .cursor_pointer()
                    .on_click(cx.listener(|this, _: &ClickEvent, _, cx| this.submit(cx)))
            })
    }
}

impl Render for ContactFormView {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let presentation = match ContactFormPresentation::capture(&self.form) {
            Ok(presentation) => presentation,
            Err(error) => {
                warn!(%error, "failed to read contact form state");
                return div()
                    .p_6()
                    .text_color(rgb(ERROR))
                    .child(SharedString::from(error.to_string()))
                    .into_any_element();
            }
        };

        // The controller owns the values; buffers only follow it, which
        // matters after the post-submit reset.
        for field in &presentation.fields {
            if let Some(input) = self.input_mut(field.field) {
                input.buffer.sync(&field.value);
            }
        }

        let mut root = div()
            .size_full()
            .flex()
            .flex_col()
            .gap_4()
            .p_6()
            .bg(rgb(BACKGROUND))
            .text_color(rgb(TEXT))
            .child(
                div()
                    .text_xl()
                    .font_weight(FontWeight::BOLD)
                    .child("Contact"),
            );

        if let Some(message) = presentation.success_message.clone() {
            root = root.child(Self::render_banner(message));
        }
        for field in &presentation.fields {
            root = root.child(self.render_field(field, window, cx));
        }
        root.child(self.render_submit(presentation.submit, cx))
            .into_any_element()
    }
}
