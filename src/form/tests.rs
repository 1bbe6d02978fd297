use super::*;
use futures::executor::block_on;
use gpui::SharedString;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone, Debug, Eq, PartialEq)]
struct TestError(&'static str);

impl ValidationError for TestError {
    fn message(&self) -> SharedString {
        self.0.into()
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, FormModel)]
struct SignupForm {
    handle: String,
    invite_code: String,
    note: String,
}

fn required(_: &SignupForm, value: &String) -> Result<(), TestError> {
    if value.is_empty() {
        Err(TestError("required"))
    } else {
        Ok(())
    }
}

fn controller() -> FormController<SignupForm, TestError> {
    let controller = FormController::new(SignupForm::default(), FormOptions::default());
    let fields = SignupForm::fields();
    controller
        .register_field_validator(fields.handle(), required)
        .expect("register handle validator");
    controller
        .register_field_validator(fields.invite_code(), required)
        .expect("register invite validator");
    controller
}

fn fill(controller: &FormController<SignupForm, TestError>) {
    let fields = SignupForm::fields();
    controller
        .change(fields.handle(), "calm".to_string())
        .expect("handle");
    controller
        .change(fields.invite_code(), "X1".to_string())
        .expect("invite");
}

#[derive(Clone, Default)]
struct RecordingTransport {
    sent: Arc<Mutex<Vec<SignupForm>>>,
}

impl SubmitTransport<SignupForm> for RecordingTransport {
    fn send(&self, payload: SignupForm) -> BoxedSubmitFuture {
        let sent = self.sent.clone();
        Box::pin(async move {
            sent.lock().expect("recording lock").push(payload);
        })
    }
}

#[test]
fn derive_macro_generates_field_lenses() {
    let fields = SignupForm::fields();
    assert_eq!(fields.handle().key().as_str(), "handle");
    assert_eq!(fields.invite_code().key().as_str(), "invite_code");

    let mut model = SignupForm::default();
    fields.note().set(&mut model, "hi".to_string());
    assert_eq!(fields.note().get(&model), "hi");
}

#[test]
fn every_field_starts_untouched_without_error() {
    let snapshot = controller().snapshot().expect("snapshot");
    assert_eq!(snapshot.field_meta.len(), 3);
    assert!(
        snapshot
            .field_meta
            .values()
            .all(|meta| !meta.touched && meta.error.is_none())
    );
    assert_eq!(snapshot.submit_state, SubmitState::Idle);
    assert_eq!(snapshot.submit_count, 0);
    assert!(!snapshot.is_valid);
}

#[test]
fn change_on_untouched_field_skips_validation() {
    let controller = controller();
    let handle = SignupForm::fields().handle();
    controller.blur(handle).expect("blur");
    assert_eq!(
        controller.field_meta(handle).expect("meta").error,
        Some(TestError("required"))
    );

    let code = SignupForm::fields().invite_code();
    controller.change(code, "".to_string()).expect("change");
    assert_eq!(controller.field_meta(code).expect("meta").error, None);
}

#[test]
fn blur_marks_touched_and_validates() {
    let controller = controller();
    let handle = SignupForm::fields().handle();
    controller.blur(handle).expect("blur");

    let meta = controller.field_meta(handle).expect("meta");
    assert!(meta.touched);
    assert_eq!(meta.visible_error(), Some(&TestError("required")));
    assert_eq!(
        controller.display_error(handle).expect("display").as_deref(),
        Some("required")
    );
}

#[test]
fn blur_on_field_without_validator_clears_error_slot() {
    let controller = controller();
    let note = SignupForm::fields().note();
    controller.blur(note).expect("blur");
    let meta = controller.field_meta(note).expect("meta");
    assert!(meta.touched);
    assert_eq!(meta.error, None);
}

#[test]
fn error_visibility_requires_touch() {
    let meta = FieldMeta {
        touched: false,
        error: Some(TestError("hidden")),
    };
    assert_eq!(meta.visible_error(), None);

    let meta = FieldMeta {
        touched: true,
        ..meta
    };
    assert_eq!(meta.visible_error(), Some(&TestError("hidden")));
}

#[test]
fn validity_is_rederived_not_read_from_stored_errors() {
    let controller = controller();
    let fields = SignupForm::fields();
    controller
        .change(fields.handle(), "calm".to_string())
        .expect("change");
    let snapshot = controller.snapshot().expect("snapshot");
    assert!(snapshot.field_meta.values().all(|meta| meta.error.is_none()));
    assert!(!snapshot.is_valid);

    controller.blur(fields.note()).expect("blur");
    controller
        .register_field_validator(fields.note(), |_: &SignupForm, _: &String| {
            Err(TestError("never"))
        })
        .expect("register");
    controller.blur(fields.note()).expect("blur");
    controller
        .register_field_validator(fields.note(), |_: &SignupForm, _: &String| Ok(()))
        .expect("register");
    controller
        .change(fields.invite_code(), "X1".to_string())
        .expect("change");
    assert_eq!(
        controller.field_meta(fields.note()).expect("meta").error,
        Some(TestError("never"))
    );
    assert!(controller.is_valid().expect("valid"));
}

#[test]
fn rejected_submit_touches_all_fields_and_keeps_model() {
    let controller = controller();
    let fields = SignupForm::fields();
    controller
        .change(fields.handle(), "calm".to_string())
        .expect("change");

    let outcome = controller.submit().expect("submit");
    assert!(outcome.is_rejected());

    let snapshot = controller.snapshot().expect("snapshot");
    assert!(snapshot.field_meta.values().all(|meta| meta.touched));
    assert_eq!(
        snapshot.meta(fields.invite_code().key()).and_then(|m| m.error.clone()),
        Some(TestError("required"))
    );
    assert_eq!(snapshot.meta(fields.handle().key()).and_then(|m| m.error.clone()), None);
    assert_eq!(snapshot.model.handle, "calm");
    assert_eq!(snapshot.submit_state, SubmitState::Idle);
    assert_eq!(snapshot.submit_count, 1);
}

#[test]
fn submit_state_transitions_are_enforced() {
    let controller = controller();
    assert_eq!(
        controller.complete_submit(),
        Err(FormError::InvalidStateTransition {
            from: SubmitState::Idle,
            to: SubmitState::Succeeded,
        })
    );

    fill(&controller);
    assert!(matches!(
        controller.submit().expect("submit"),
        SubmitOutcome::Sending(_)
    ));
    assert_eq!(controller.submit(), Err(FormError::AlreadySubmitting));
    assert_eq!(
        controller.change(SignupForm::fields().note(), "late".to_string()),
        Err(FormError::InputsLocked)
    );
    assert_eq!(controller.reset_to_initial(), Err(FormError::InputsLocked));

    controller.complete_submit().expect("complete");
    assert_eq!(
        controller.complete_submit(),
        Err(FormError::InvalidStateTransition {
            from: SubmitState::Succeeded,
            to: SubmitState::Succeeded,
        })
    );
}

#[test]
fn blur_while_submitting_is_ignored() {
    let controller = controller();
    fill(&controller);
    controller.submit().expect("submit");
    let before = controller.snapshot().expect("snapshot").field_meta;
    controller.blur(SignupForm::fields().note()).expect("blur");
    assert_eq!(controller.snapshot().expect("snapshot").field_meta, before);
}

#[test]
fn submit_async_delivers_payload_and_resets() {
    let controller = controller();
    fill(&controller);
    let transport = RecordingTransport::default();

    let outcome = block_on(controller.submit_async(&transport)).expect("submit");
    assert!(matches!(outcome, SubmitOutcome::Sending(_)));

    let sent = transport.sent.lock().expect("recording lock").clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].handle, "calm");
    assert_eq!(sent[0].invite_code, "X1");

    let snapshot = controller.snapshot().expect("snapshot");
    assert_eq!(snapshot.model, SignupForm::default());
    assert_eq!(snapshot.submit_state, SubmitState::Succeeded);
    assert_eq!(
        controller.success_message().expect("message"),
        Some(FormOptions::default().success_message)
    );
}

#[test]
fn rejected_submit_async_never_reaches_transport() {
    let controller = controller();
    let transport = RecordingTransport::default();
    let outcome = block_on(controller.submit_async(&transport)).expect("submit");
    assert!(outcome.is_rejected());
    assert!(transport.sent.lock().expect("recording lock").is_empty());
}

#[test]
fn rejected_submit_keeps_success_banner() {
    let controller = controller();
    fill(&controller);
    block_on(controller.submit_async(&SimulatedTransport::new(Duration::ZERO))).expect("submit");

    assert!(controller.submit().expect("submit").is_rejected());
    assert_eq!(
        controller.submit_state().expect("state"),
        SubmitState::Succeeded
    );
}

#[test]
fn reset_to_initial_clears_model_meta_and_banner() {
    let controller = controller();
    fill(&controller);
    controller.submit().expect("submit");
    controller.complete_submit().expect("complete");
    controller
        .change(SignupForm::fields().note(), "draft".to_string())
        .expect("change");
    controller.blur(SignupForm::fields().handle()).expect("blur");

    controller.reset_to_initial().expect("reset");
    let snapshot = controller.snapshot().expect("snapshot");
    assert_eq!(snapshot.model, SignupForm::default());
    assert!(snapshot.field_meta.values().all(|meta| *meta == FieldMeta::default()));
    assert_eq!(snapshot.submit_state, SubmitState::Idle);
}

#[test]
fn register_validator_replaces_previous() {
    let controller = controller();
    let handle = SignupForm::fields().handle();
    controller
        .register_field_validator(handle, |_: &SignupForm, value: &String| {
            if value.len() < 3 {
                Err(TestError("too short"))
            } else {
                Ok(())
            }
        })
        .expect("register");
    controller.change(handle, "ab".to_string()).expect("change");
    assert!(!controller.validate_field(handle).expect("validate"));
    assert_eq!(
        controller.field_meta(handle).expect("meta").error,
        Some(TestError("too short"))
    );
}

#[test]
fn form_ids_are_unique_per_controller() {
    let first = controller().form_id().expect("id");
    let second = controller().form_id().expect("id");
    assert_ne!(first, second);
    assert!(first.to_string().starts_with("form-"));
}

#[test]
fn snapshot_can_submit_reflects_validity_and_state() {
    let controller = controller();
    assert!(!controller.snapshot().expect("snapshot").can_submit());
    fill(&controller);
    assert!(controller.snapshot().expect("snapshot").can_submit());
    controller.submit().expect("submit");
    assert!(!controller.snapshot().expect("snapshot").can_submit());
}

#[test]
fn submit_if_ready_leaves_invalid_form_untouched() {
    let controller = controller();
    assert_eq!(controller.submit_if_ready().expect("submit"), None);

    let snapshot = controller.snapshot().expect("snapshot");
    assert_eq!(snapshot.submit_count, 0);
    assert!(
        SignupForm::field_keys()
            .iter()
            .all(|key| snapshot.meta(*key).is_some_and(|meta| !meta.touched))
    );
}

#[test]
fn submit_if_ready_keeps_success_banner_clean() {
    let controller = controller();
    fill(&controller);
    block_on(controller.submit_async(&SimulatedTransport::new(Duration::ZERO))).expect("submit");

    assert_eq!(controller.submit_if_ready().expect("submit"), None);
    assert_eq!(
        controller.submit_state().expect("state"),
        SubmitState::Succeeded
    );
    let handle = controller
        .field_meta(SignupForm::fields().handle())
        .expect("meta");
    assert!(!handle.touched);
    assert_eq!(handle.error, None);
}

#[test]
fn submit_if_ready_sends_valid_form_once() {
    let controller = controller();
    fill(&controller);
    let outcome = controller.submit_if_ready().expect("submit");
    assert!(matches!(outcome, Some(SubmitOutcome::Sending(_))));
    assert_eq!(controller.submit_if_ready().expect("submit"), None);
    assert!(controller.is_submitting().expect("state"));
}

#[test]
fn form_error_messages_are_readable() {
    assert_eq!(
        FormError::StatePoisoned("reading").to_string(),
        "form state lock poisoned while reading"
    );
    assert_eq!(
        FormError::InputsLocked.to_string(),
        "form inputs are locked while submitting"
    );
}
