mod controller;
mod options;
mod transport;
mod validation;

#[cfg(test)]
mod tests;

pub use contact_form_derive::FormModel;
pub use controller::{
    FieldKey, FieldMeta, FormController, FormError, FormId, FormResult, FormSnapshot,
    SubmitOutcome, SubmitState,
};
pub use options::{
    DEFAULT_SUBMIT_DELAY, DEFAULT_SUCCESS_MESSAGE, FormOptions, SUBMIT_DELAY_ENV,
    SUCCESS_MESSAGE_ENV,
};
pub use transport::{BoxedSubmitFuture, SimulatedTransport, SubmitTransport};
pub use validation::{FieldLens, FieldValidator, FormModel, ValidationError};
