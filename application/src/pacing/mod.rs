//! Call pacing: per-model spacing and rate-limit retries.

pub mod retrying_caller;
pub mod throttle_gate;

pub use retrying_caller::RetryingCaller;
pub use throttle_gate::ThrottleGate;
