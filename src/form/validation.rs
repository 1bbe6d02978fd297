use std::sync::Arc;

use gpui::SharedString;

use super::controller::{
    FieldKey, FormController, FormError, FormResult, SubmitState, SyncFieldValidatorFn,
    read_lock, transition_submit_state, write_lock,
};

pub trait ValidationError: Clone + Send + Sync + 'static {
    fn message(&self) -> SharedString;
}

pub trait FieldLens<T>: Copy + Send + Sync + 'static {
    type Value: Clone + PartialEq + Send + Sync + 'static;

    fn key(self) -> FieldKey;
    fn get<'a>(self, model: &'a T) -> &'a Self::Value;
    fn set(self, model: &mut T, value: Self::Value);
}

pub trait FormModel: Clone + Send + Sync + 'static {
    type Fields;

    fn fields() -> Self::Fields;

    /// Every field of the model, in declaration order.
    fn field_keys() -> &'static [FieldKey];
}

pub trait FieldValidator<T, L, E>: Send + Sync
where
    L: FieldLens<T>,
    E: ValidationError,
{
    fn validate(&self, model: &T, value: &L::Value) -> Result<(), E>;
}

impl<T, L, E, F> FieldValidator<T, L, E> for F
where
    L: FieldLens<T>,
    E: ValidationError,
    F: for<'a> Fn(&'a T, &'a L::Value) -> Result<(), E> + Send + Sync,
{
    fn validate(&self, model: &T, value: &L::Value) -> Result<(), E> {
        (self)(model, value)
    }
}

impl<T, E> FormController<T, E>
where
    T: FormModel,
    E: ValidationError,
{
    /// Installs the validator for a field, replacing any previous one.
    pub fn register_field_validator<L, V>(&self, lens: L, validator: V) -> FormResult<()>
    where
        L: FieldLens<T>,
        V: FieldValidator<T, L, E> + 'static,
    {
        let validator = Arc::new(validator);
        let wrapped: SyncFieldValidatorFn<T, E> =
            Arc::new(move |model: &T| validator.validate(model, lens.get(model)));
        write_lock(&self.field_validators, "registering field validator")?
            .insert(lens.key(), wrapped);
        Ok(())
    }

    /// Change event. The raw value is stored as-is and any success message is
    /// dismissed. Only an already touched field is revalidated.
    pub fn change<L>(&self, lens: L, value: L::Value) -> FormResult<()>
    where
        L: FieldLens<T>,
    {
        let key = lens.key();
        let touched = {
            let mut state = write_lock(&self.state, "writing field value")?;
            if state.submit_state == SubmitState::Submitting {
                return Err(FormError::InputsLocked);
            }
            lens.set(&mut state.model, value);
            if state.submit_state == SubmitState::Succeeded {
                transition_submit_state(&mut state, SubmitState::Idle)?;
            }
            state.ensure_meta(key).touched
        };

        if touched {
            let _ = self.validate_field_by_key(key)?;
        }
        Ok(())
    }

    /// Blur event: marks the field touched and always revalidates it. Ignored
    /// while a submission is in flight.
    pub fn blur<L>(&self, lens: L) -> FormResult<()>
    where
        L: FieldLens<T>,
    {
        let key = lens.key();
        {
            let mut state = write_lock(&self.state, "touching field")?;
            if state.submit_state == SubmitState::Submitting {
                return Ok(());
            }
            state.ensure_meta(key).touched = true;
        }

        let _ = self.validate_field_by_key(key)?;
        Ok(())
    }

    pub fn validate_field<L>(&self, lens: L) -> FormResult<bool>
    where
        L: FieldLens<T>,
    {
        self.validate_field_by_key(lens.key())
    }

    /// Re-derives overall validity from the current model. Stored errors are
    /// display state and are not consulted.
    pub fn is_valid(&self) -> FormResult<bool> {
        let validators = self.validators_snapshot()?;
        let state = read_lock(&self.state, "reading model for validity")?;
        Ok(validators
            .values()
            .all(|validator| validator(&state.model).is_ok()))
    }

    pub(super) fn validate_field_by_key(&self, key: FieldKey) -> FormResult<bool> {
        let validator = read_lock(&self.field_validators, "reading field validator")?
            .get(&key)
            .cloned();

        let mut state = write_lock(&self.state, "writing field validation result")?;
        let error = validator.and_then(|validator| validator(&state.model).err());
        let is_valid = error.is_none();
        state.ensure_meta(key).error = error;
        Ok(is_valid)
    }
}
