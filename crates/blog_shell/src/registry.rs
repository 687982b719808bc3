//! Command registration table.

use std::{collections::BTreeMap, rc::Rc};

use blog_shell_contract::{ShellError, Stream};
use futures::future::LocalBoxFuture;

use crate::session::SessionContext;

/// Async command handler.
///
/// `Ok(None)` leaves the pipeline stream untouched; `Ok(Some(_))` replaces it.
pub type CommandHandler = Rc<
    dyn Fn(CommandInvocation) -> LocalBoxFuture<'static, Result<Option<Stream>, ShellError>>,
>;

/// Source of option values offered by tab completion after the command name.
pub type CompletionSource = Rc<dyn Fn(&SessionContext) -> Vec<String>>;

/// Human-facing metadata of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDescriptor {
    /// Exact, case-sensitive command token.
    pub name: String,
    /// One-line description.
    pub summary: String,
    /// Argument grammar.
    pub usage: String,
}

impl CommandDescriptor {
    /// Creates a descriptor.
    pub fn new(name: &str, summary: &str, usage: &str) -> Self {
        Self {
            name: name.to_string(),
            summary: summary.to_string(),
            usage: usage.to_string(),
        }
    }
}

/// Arguments handed to a command handler.
#[derive(Clone)]
pub struct CommandInvocation {
    /// Argument tokens joined by single spaces.
    pub args: String,
    /// Stream from the previous stage; `None` when the command runs on its own.
    pub input: Option<Stream>,
    /// Session the command runs in.
    pub session: SessionContext,
}

impl CommandInvocation {
    /// Whether the command runs inside a pipeline and should return messages as lines.
    pub fn is_piped(&self) -> bool {
        self.input.is_some()
    }

    /// Input lines, empty when nothing was piped in.
    pub fn input_lines(&self) -> Stream {
        self.input.clone().unwrap_or_default()
    }
}

/// One registry entry.
#[derive(Clone)]
pub struct CommandRegistration {
    /// Command metadata.
    pub descriptor: CommandDescriptor,
    /// Option values offered after the command name.
    pub completion: Option<CompletionSource>,
    /// Command implementation.
    pub handler: CommandHandler,
}

/// Fixed table of commands keyed by name.
#[derive(Clone, Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, CommandRegistration>,
}

impl CommandRegistry {
    /// Builds a registry from registrations. Later entries replace earlier ones with the same name.
    pub fn from_registrations(registrations: impl IntoIterator<Item = CommandRegistration>) -> Self {
        let mut registry = Self::default();
        for registration in registrations {
            registry.register(registration);
        }
        registry
    }

    /// Adds or replaces one command.
    pub fn register(&mut self, registration: CommandRegistration) {
        self.commands
            .insert(registration.descriptor.name.clone(), registration);
    }

    /// Exact-match lookup.
    pub fn get(&self, name: &str) -> Option<&CommandRegistration> {
        self.commands.get(name)
    }

    /// Registered command names in ascending order.
    pub fn names(&self) -> Vec<String> {
        self.commands.keys().cloned().collect()
    }

    /// Registered descriptors in name order.
    pub fn descriptors(&self) -> Vec<CommandDescriptor> {
        self.commands
            .values()
            .map(|registration| registration.descriptor.clone())
            .collect()
    }

    /// Completion options for `name`, empty when the command is unknown or offers none.
    pub fn options_for(&self, name: &str, session: &SessionContext) -> Vec<String> {
        self.get(name)
            .and_then(|registration| registration.completion.as_ref())
            .map(|source| source(session))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(name: &str, summary: &str) -> CommandRegistration {
        CommandRegistration {
            descriptor: CommandDescriptor::new(name, summary, name),
            completion: Some(Rc::new(|_: &SessionContext| vec!["-x".to_string()])),
            handler: Rc::new(|_| Box::pin(async { Ok(None) })),
        }
    }

    #[test]
    fn lookup_is_exact_and_case_sensitive() {
        let registry = CommandRegistry::from_registrations([registration("ls", "list")]);
        assert!(registry.get("ls").is_some());
        assert!(registry.get("LS").is_none());
        assert!(registry.get("l").is_none());
    }

    #[test]
    fn later_registration_replaces_earlier() {
        let registry = CommandRegistry::from_registrations([
            registration("ls", "first"),
            registration("help", "help"),
            registration("ls", "second"),
        ]);
        assert_eq!(registry.names(), vec!["help".to_string(), "ls".to_string()]);
        assert_eq!(registry.descriptors()[1].summary, "second");
    }
}
