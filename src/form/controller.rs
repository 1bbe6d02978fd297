use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use gpui::SharedString;
use tracing::{debug, info};

use super::options::FormOptions;
use super::transport::SubmitTransport;
use super::validation::{FieldLens, FormModel, ValidationError};

static FORM_ID_ALLOCATOR: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FormId(pub u64);

impl FormId {
    pub fn next() -> Self {
        Self(FORM_ID_ALLOCATOR.fetch_add(1, Ordering::SeqCst))
    }
}

impl Display for FormId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "form-{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FieldKey(&'static str);

impl FieldKey {
    pub const fn new(value: &'static str) -> Self {
        Self(value)
    }

    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl Display for FieldKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// Whole-form lifecycle. A success message exists only in `Succeeded`, so it
/// can never coexist with an in-flight submission.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SubmitState {
    Idle,
    Submitting,
    Succeeded,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldMeta<E> {
    pub touched: bool,
    pub error: Option<E>,
}

impl<E> Default for FieldMeta<E> {
    fn default() -> Self {
        Self {
            touched: false,
            error: None,
        }
    }
}

impl<E> FieldMeta<E> {
    /// The stored error, but only once the field has been touched.
    pub fn visible_error(&self) -> Option<&E> {
        if self.touched {
            self.error.as_ref()
        } else {
            None
        }
    }

    fn reset(&mut self) {
        self.touched = false;
        self.error = None;
    }
}

#[derive(Clone, Debug)]
pub struct FormSnapshot<T, E> {
    pub model: T,
    pub submit_state: SubmitState,
    pub submit_count: u32,
    pub is_valid: bool,
    pub field_meta: BTreeMap<FieldKey, FieldMeta<E>>,
}

impl<T, E> FormSnapshot<T, E> {
    pub fn is_submitting(&self) -> bool {
        self.submit_state == SubmitState::Submitting
    }

    pub fn can_submit(&self) -> bool {
        self.is_valid && !self.is_submitting()
    }

    pub fn meta(&self, key: FieldKey) -> Option<&FieldMeta<E>> {
        self.field_meta.get(&key)
    }
}

/// Result of the synchronous half of a submit.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SubmitOutcome<T> {
    /// At least one validator failed; the errors are now visible.
    Rejected,
    /// Validation passed and the form is locked until the payload is sent.
    Sending(T),
}

impl<T> SubmitOutcome<T> {
    pub fn is_rejected(&self) -> bool {
        matches!(self, SubmitOutcome::Rejected)
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum FormError {
    StatePoisoned(&'static str),
    InvalidStateTransition { from: SubmitState, to: SubmitState },
    AlreadySubmitting,
    InputsLocked,
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FormError::StatePoisoned(context) => {
                write!(f, "form state lock poisoned while {context}")
            }
            FormError::InvalidStateTransition { from, to } => {
                write!(f, "invalid submit state transition: {from:?} -> {to:?}")
            }
            FormError::AlreadySubmitting => f.write_str("form submit is already in progress"),
            FormError::InputsLocked => f.write_str("form inputs are locked while submitting"),
        }
    }
}

impl std::error::Error for FormError {}

pub type FormResult<T> = Result<T, FormError>;

pub(super) type SyncFieldValidatorFn<T, E> = Arc<dyn Fn(&T) -> Result<(), E> + Send + Sync>;

pub(super) struct FormState<T, E> {
    pub(super) id: FormId,
    pub(super) initial_model: T,
    pub(super) model: T,
    pub(super) submit_state: SubmitState,
    pub(super) submit_count: u32,
    pub(super) field_meta: BTreeMap<FieldKey, FieldMeta<E>>,
}

impl<T: Clone, E> FormState<T, E> {
    pub(super) fn ensure_meta(&mut self, key: FieldKey) -> &mut FieldMeta<E> {
        self.field_meta.entry(key).or_default()
    }

    fn reset_model_and_meta(&mut self) {
        self.model = self.initial_model.clone();
        for meta in self.field_meta.values_mut() {
            meta.reset();
        }
    }
}

#[derive(Clone)]
pub struct FormController<T, E>
where
    T: FormModel,
    E: ValidationError,
{
    pub(super) options: FormOptions,
    pub(super) state: Arc<RwLock<FormState<T, E>>>,
    pub(super) field_validators: Arc<RwLock<BTreeMap<FieldKey, SyncFieldValidatorFn<T, E>>>>,
}

impl<T, E> FormController<T, E>
where
    T: FormModel,
    E: ValidationError,
{
    pub fn new(initial: T, options: FormOptions) -> Self {
        let field_meta = T::field_keys()
            .iter()
            .map(|key| (*key, FieldMeta::default()))
            .collect();
        Self {
            options,
            state: Arc::new(RwLock::new(FormState {
                id: FormId::next(),
                initial_model: initial.clone(),
                model: initial,
                submit_state: SubmitState::Idle,
                submit_count: 0,
                field_meta,
            })),
            field_validators: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    pub fn form_id(&self) -> FormResult<FormId> {
        Ok(read_lock(&self.state, "reading form id")?.id)
    }

    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    pub fn value<L>(&self, lens: L) -> FormResult<L::Value>
    where
        L: FieldLens<T>,
    {
        Ok(lens
            .get(&read_lock(&self.state, "reading field value")?.model)
            .clone())
    }

    pub fn field_meta<L>(&self, lens: L) -> FormResult<FieldMeta<E>>
    where
        L: FieldLens<T>,
    {
        Ok(read_lock(&self.state, "reading field meta")?
            .field_meta
            .get(&lens.key())
            .cloned()
            .unwrap_or_default())
    }

    /// Message to render under a field: present only for touched fields with
    /// a stored error.
    pub fn display_error<L>(&self, lens: L) -> FormResult<Option<SharedString>>
    where
        L: FieldLens<T>,
    {
        Ok(self
            .field_meta(lens)?
            .visible_error()
            .map(ValidationError::message))
    }

    pub fn submit_state(&self) -> FormResult<SubmitState> {
        Ok(read_lock(&self.state, "reading submit state")?.submit_state)
    }

    pub fn submit_count(&self) -> FormResult<u32> {
        Ok(read_lock(&self.state, "reading submit count")?.submit_count)
    }

    pub fn is_submitting(&self) -> FormResult<bool> {
        Ok(self.submit_state()? == SubmitState::Submitting)
    }

    pub fn inputs_disabled(&self) -> FormResult<bool> {
        self.is_submitting()
    }

    pub fn can_submit(&self) -> FormResult<bool> {
        Ok(!self.is_submitting()? && self.is_valid()?)
    }

    pub fn success_message(&self) -> FormResult<Option<SharedString>> {
        Ok((self.submit_state()? == SubmitState::Succeeded)
            .then(|| self.options.success_message.clone()))
    }

    pub fn snapshot(&self) -> FormResult<FormSnapshot<T, E>> {
        let is_valid = self.is_valid()?;
        let state = read_lock(&self.state, "creating form snapshot")?;
        Ok(FormSnapshot {
            model: state.model.clone(),
            submit_state: state.submit_state,
            submit_count: state.submit_count,
            is_valid,
            field_meta: state.field_meta.clone(),
        })
    }

    pub fn reset_to_initial(&self) -> FormResult<()> {
        let mut state = write_lock(&self.state, "resetting form")?;
        if state.submit_state == SubmitState::Submitting {
            return Err(FormError::InputsLocked);
        }
        state.reset_model_and_meta();
        transition_submit_state(&mut state, SubmitState::Idle)
    }

    /// Validates every field regardless of touched state and marks all of them
    /// touched. On success the form enters `Submitting` and the caller owns
    /// delivering the returned payload, then calls [`Self::complete_submit`].
    pub fn submit(&self) -> FormResult<SubmitOutcome<T>> {
        let validators = self.validators_snapshot()?;
        let mut state = write_lock(&self.state, "preparing submit")?;
        if state.submit_state == SubmitState::Submitting {
            return Err(FormError::AlreadySubmitting);
        }
        state.submit_count = state.submit_count.saturating_add(1);

        let results = validators
            .iter()
            .map(|(key, validator)| (*key, validator(&state.model).err()))
            .collect::<Vec<_>>();
        for key in T::field_keys() {
            state.ensure_meta(*key).touched = true;
        }
        let mut rejected = false;
        for (key, error) in results {
            let meta = state.ensure_meta(key);
            meta.touched = true;
            rejected |= error.is_some();
            meta.error = error;
        }

        if rejected {
            debug!(form = %state.id, "submit rejected by validation");
            return Ok(SubmitOutcome::Rejected);
        }

        transition_submit_state(&mut state, SubmitState::Submitting)?;
        debug!(form = %state.id, "submit accepted");
        Ok(SubmitOutcome::Sending(state.model.clone()))
    }

    /// Submit path for triggers that mirror a disabled submit button, such as
    /// pressing enter inside an input. Returns `None` without touching any
    /// state when the form is invalid or already submitting.
    pub fn submit_if_ready(&self) -> FormResult<Option<SubmitOutcome<T>>> {
        if !self.can_submit()? {
            return Ok(None);
        }
        self.submit().map(Some)
    }

    /// Finishes an accepted submit: model, errors and touched flags return to
    /// their initial values and the success message becomes visible.
    pub fn complete_submit(&self) -> FormResult<()> {
        let mut state = write_lock(&self.state, "completing submit")?;
        if state.submit_state != SubmitState::Submitting {
            return Err(FormError::InvalidStateTransition {
                from: state.submit_state,
                to: SubmitState::Succeeded,
            });
        }
        state.reset_model_and_meta();
        transition_submit_state(&mut state, SubmitState::Succeeded)?;
        info!(form = %state.id, "submission completed");
        Ok(())
    }

    pub async fn submit_async<S>(&self, transport: &S) -> FormResult<SubmitOutcome<T>>
    where
        S: SubmitTransport<T>,
    {
        let outcome = self.submit()?;
        if let SubmitOutcome::Sending(payload) = &outcome {
            transport.send(payload.clone()).await;
            self.complete_submit()?;
        }
        Ok(outcome)
    }

    pub(super) fn validators_snapshot(
        &self,
    ) -> FormResult<BTreeMap<FieldKey, SyncFieldValidatorFn<T, E>>> {
        Ok(read_lock(&self.field_validators, "reading field validators")?.clone())
    }
}

pub(super) fn transition_submit_state<T, E>(
    state: &mut FormState<T, E>,
    next: SubmitState,
) -> FormResult<()> {
    let current = state.submit_state;
    if current == next {
        return Ok(());
    }

    let allowed = matches!(
        (current, next),
        (SubmitState::Idle, SubmitState::Submitting)
            | (SubmitState::Succeeded, SubmitState::Submitting)
            | (SubmitState::Submitting, SubmitState::Succeeded)
            | (SubmitState::Succeeded, SubmitState::Idle)
    );
    if !allowed {
        return Err(FormError::InvalidStateTransition {
            from: current,
            to: next,
        });
    }
    state.submit_state = next;
    Ok(())
}

pub(super) fn read_lock<'a, T>(
    lock: &'a RwLock<T>,
    context: &'static str,
) -> FormResult<RwLockReadGuard<'a, T>> {
    lock.read().map_err(|_| FormError::StatePoisoned(context))
}

pub(super) fn write_lock<'a, T>(
    lock: &'a RwLock<T>,
    context: &'static str,
) -> FormResult<RwLockWriteGuard<'a, T>> {
    lock.write().map_err(|_| FormError::StatePoisoned(context))
}
