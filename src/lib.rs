//! codedeck - headless editor session and asynchronous feedback coordinator.
//!
//! Module structure:
//! - kernel: headless session core (state/action/effect)
//! - kernel::services: collaborator ports + adapters (storage, checks, assists)
//! - session: top-level controller wiring the kernel to the collaborators
//! - logging: tracing bootstrap for host applications

pub mod kernel;
pub mod logging;
pub mod session;

pub use session::{CompletionSource, SessionController};
