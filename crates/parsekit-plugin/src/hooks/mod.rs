//! Hook system: definitions, scope matching, and the dispatcher.

pub mod definitions;
pub mod dispatcher;
pub mod matcher;

pub use definitions::{HookScope, HookStage, ParseHook};
pub use dispatcher::HookDispatcher;
pub use matcher::applies;
