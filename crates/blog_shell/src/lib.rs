//! Runtime-agnostic terminal engine for the blog page.
//!
//! The engine owns everything that happens between a key press in the prompt and a line in the
//! transcript: the command registry and built-in commands, the pipe interpreter, tab completion
//! with cycling, history recall, and the prompt/caret lifecycle. Browser concerns reach it only
//! through the collaborator traits in [`blog_host`].

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod commands;
pub mod completion;
pub mod history;
pub mod pipeline;
pub mod prompt;
pub mod registry;
pub mod session;

pub use commands::builtin_registrations;
pub use completion::{compute_candidates, CompletionOutcome, CompletionState};
pub use history::{HistoryCursor, HistoryLog};
pub use pipeline::execute;
pub use prompt::{caret_geometry, ActivePrompt, PromptInput};
pub use registry::{
    CommandDescriptor, CommandHandler, CommandInvocation, CommandRegistration, CommandRegistry,
    CompletionSource,
};
pub use session::{SessionContext, ShellSession, SubscriptionId};
