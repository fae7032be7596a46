//! Service ports: traits + data contracts for the external collaborators.

pub mod assist;
pub mod check;
pub mod files;
pub mod runtime;

pub use assist::{
    ActionError, CodeGenerator, Compiler, GeneratedCode, SuggestError, SuggestRequest,
    SuggestionEngine,
};
pub use check::{
    CheckChannel, CheckDelivery, CheckError, CheckOutcome, CheckReply, CheckRequest,
    CheckSubscription,
};
pub use files::{FetchError, FileStore, PersistError};
pub use runtime::{AsyncExecutor, BoxFuture, PortFuture};
