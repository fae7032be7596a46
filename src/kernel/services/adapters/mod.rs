pub mod driver;
pub mod runtime;

pub use driver::{EffectDriver, SessionPorts};
pub use runtime::TokioExecutor;
