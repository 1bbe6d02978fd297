pub mod contact;
pub mod form;
pub mod telemetry;
pub mod view;

pub use contact::{ContactError, ContactField, ContactForm, ContactFormData, contact_form};
pub use form::{FormError, FormOptions, FormResult, SimulatedTransport};
pub use view::ContactFormView;
