use std::time::Duration;

use gpui::SharedString;
use tracing::warn;

pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(1000);
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Thank you! Your message has been sent.";

pub const SUBMIT_DELAY_ENV: &str = "CONTACT_FORM_SUBMIT_DELAY_MS";
pub const SUCCESS_MESSAGE_ENV: &str = "CONTACT_FORM_SUCCESS_MESSAGE";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FormOptions {
    /// Latency of the simulated send.
    pub submit_delay: Duration,
    /// Banner shown after a completed submission.
    pub success_message: SharedString,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            submit_delay: DEFAULT_SUBMIT_DELAY,
            success_message: DEFAULT_SUCCESS_MESSAGE.into(),
        }
    }
}

impl FormOptions {
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`. Unparseable or empty values are
    /// reported and leave the current setting in place.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(raw) = lookup(SUBMIT_DELAY_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(millis) => self.submit_delay = Duration::from_millis(millis),
                Err(error) => {
                    warn!(key = SUBMIT_DELAY_ENV, value = %raw, %error, "ignoring submit delay override");
                }
            }
        }

        if let Some(raw) = lookup(SUCCESS_MESSAGE_ENV) {
            if raw.trim().is_empty() {
                warn!(key = SUCCESS_MESSAGE_ENV, "ignoring empty success message override");
            } else {
                self.success_message = raw.into();
            }
        }
        self
    }

    pub fn submit_delay(mut self, value: Duration) -> Self {
        self.submit_delay = value;
        self
    }

    pub fn success_message(mut self, value: impl Into<SharedString>) -> Self {
        self.success_message = value.into();
        self
    }
}
