use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use futures_timer::Delay;
use tracing::info;

use super::options::{DEFAULT_SUBMIT_DELAY, FormOptions};

pub type BoxedSubmitFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Delivers an accepted payload. Delivery has no failure path: the future
/// resolving means the submission is complete.
pub trait SubmitTransport<T>: Send + Sync + 'static {
    fn send(&self, payload: T) -> BoxedSubmitFuture;
}

/// Stands in for a real endpoint: waits a fixed delay, then writes the
/// payload to the diagnostic log.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SimulatedTransport {
    delay: Duration,
}

impl SimulatedTransport {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_options(options: &FormOptions) -> Self {
        Self::new(options.submit_delay)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SimulatedTransport {
    fn default() -> Self {
        Self::new(DEFAULT_SUBMIT_DELAY)
    }
}

impl<T> SubmitTransport<T> for SimulatedTransport
where
    T: Debug + Send + 'static,
{
    fn send(&self, payload: T) -> BoxedSubmitFuture {
        let delay = self.delay;
        Box::pin(async move {
            if !delay.is_zero() {
                Delay::new(delay).await;
            }
            info!(?payload, "form submitted");
        })
    }
}
