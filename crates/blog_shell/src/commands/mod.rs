//! Built-in command registrations.

mod posts;
mod text;
mod view;

use std::{cmp::Ordering, rc::Rc};

use crate::{
    registry::{CommandDescriptor, CommandRegistration, CompletionSource},
    session::SessionContext,
};

/// Every built-in command in help order.
pub fn builtin_registrations() -> Vec<CommandRegistration> {
    vec![
        view::help_registration(),
        posts::ls_registration(),
        posts::open_registration(),
        view::theme_registration(),
        view::translate_registration(),
        view::clear_registration(),
        text::grep_registration(),
        text::head_registration(),
        text::tail_registration(),
        text::sort_registration(),
        text::uniq_registration(),
        text::wc_registration(),
        text::cut_registration(),
    ]
}

fn descriptor(name: &str, summary: &str, usage: &str) -> CommandDescriptor {
    CommandDescriptor::new(name, summary, usage)
}

fn fixed_options(options: &'static [&'static str]) -> Option<CompletionSource> {
    Some(Rc::new(move |_: &SessionContext| {
        options.iter().map(|option| option.to_string()).collect::<Vec<_>>()
    }))
}

/// Ascending order that ignores case first and puts lowercase before uppercase on ties.
pub(crate) fn locale_compare(left: &str, right: &str) -> Ordering {
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        .then_with(|| right.cmp(left))
}
