//! Line filters for pipelines: `grep`, `head`, `tail`, `sort`, `uniq`, `wc`, `cut`.

use std::rc::Rc;

use blog_shell_contract::{ShellError, Stream};
use leptos::logging;
use regex::RegexBuilder;
use shell_line_headless::{has_flag, option_number};

use super::{descriptor, fixed_options, locale_compare};
use crate::registry::{CommandHandler, CommandInvocation, CommandRegistration};

const DEFAULT_LINE_COUNT: usize = 10;

/// Wraps a synchronous filter as a command handler.
fn filter(run: fn(&CommandInvocation) -> Result<Stream, ShellError>) -> CommandHandler {
    Rc::new(move |invocation| {
        let result = run(&invocation).map(Some);
        Box::pin(async move { result })
    })
}

pub(super) fn grep_registration() -> CommandRegistration {
    CommandRegistration {
        descriptor: descriptor("grep", "Keep lines matching a pattern.", "grep [-i] <pattern>"),
        completion: fixed_options(&["-i"]),
        handler: filter(grep),
    }
}

pub(super) fn head_registration() -> CommandRegistration {
    CommandRegistration {
        descriptor: descriptor("head", "Keep the first lines.", "head [-n N]"),
        completion: fixed_options(&["-n 10", "-n 20", "-n 50"]),
        handler: filter(|invocation| {
            let count = line_count(&invocation.args);
            Ok(invocation.input_lines().into_iter().take(count).collect())
        }),
    }
}

pub(super) fn tail_registration() -> CommandRegistration {
    CommandRegistration {
        descriptor: descriptor("tail", "Keep the last lines.", "tail [-n N]"),
        completion: fixed_options(&["-n 10", "-n 20", "-n 50"]),
        handler: filter(|invocation| {
            let count = line_count(&invocation.args);
            let lines = invocation.input_lines();
            let skip = lines.len().saturating_sub(count);
            Ok(lines.into_iter().skip(skip).collect())
        }),
    }
}

pub(super) fn sort_registration() -> CommandRegistration {
    CommandRegistration {
        descriptor: descriptor("sort", "Sort lines.", "sort"),
        completion: None,
        handler: filter(|invocation| {
            let mut lines = invocation.input_lines();
            lines.sort_by(|left, right| locale_compare(left, right));
            Ok(lines)
        }),
    }
}

pub(super) fn uniq_registration() -> CommandRegistration {
    CommandRegistration {
        descriptor: descriptor("uniq", "Collapse repeated adjacent lines.", "uniq"),
        completion: None,
        handler: filter(|invocation| {
            let mut lines = invocation.input_lines();
            lines.dedup();
            Ok(lines)
        }),
    }
}

pub(super) fn wc_registration() -> CommandRegistration {
    CommandRegistration {
        descriptor: descriptor("wc", "Count lines, words, and characters.", "wc [-l]"),
        completion: fixed_options(&["-l"]),
        handler: filter(word_count),
    }
}

pub(super) fn cut_registration() -> CommandRegistration {
    CommandRegistration {
        descriptor: descriptor("cut", "Select one tab-separated field.", "cut [-f N]"),
        completion: fixed_options(&["-f 1", "-f 2"]),
        handler: filter(|invocation| {
            let field = option_number(&invocation.args, "-f").unwrap_or(1).max(1);
            Ok(invocation
                .input_lines()
                .iter()
                .map(|line| line.split('\t').nth(field - 1).unwrap_or_default().to_string())
                .collect())
        }),
    }
}

fn line_count(args: &str) -> usize {
    option_number(args, "-n").unwrap_or(DEFAULT_LINE_COUNT)
}

fn grep(invocation: &CommandInvocation) -> Result<Stream, ShellError> {
    let mut tokens = invocation.args.split_whitespace().peekable();
    let case_insensitive = tokens.next_if_eq(&"-i").is_some();
    let pattern = tokens.collect::<Vec<_>>().join(" ");
    if pattern.is_empty() {
        return Ok(invocation.input_lines());
    }

    let matcher = RegexBuilder::new(&pattern)
        .case_insensitive(case_insensitive)
        .build()
        .map_err(|err| {
            logging::warn!("grep pattern `{pattern}` rejected: {err}");
            ShellError::bad_argument(format!("grep: invalid pattern `{pattern}`"))
        })?;
    Ok(invocation
        .input_lines()
        .into_iter()
        .filter(|line| matcher.is_match(line))
        .collect())
}

fn word_count(invocation: &CommandInvocation) -> Result<Stream, ShellError> {
    let lines = invocation.input_lines();
    if has_flag(&invocation.args, "-l") {
        return Ok(vec![lines.len().to_string()]);
    }
    let joined = lines.join("\n");
    Ok(vec![format!(
        "{} {} {}",
        lines.len(),
        joined.split_whitespace().count(),
        joined.chars().count()
    )])
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::commands::fixture::{run, sample_session};

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    fn apply(registration: CommandRegistration, args: &str, input: Stream) -> Stream {
        let (shell, _) = sample_session();
        let invocation = CommandInvocation {
            args: args.to_string(),
            input: Some(input),
            session: shell.context().clone(),
        };
        block_on((registration.handler)(invocation))
            .expect("filter result")
            .unwrap_or_default()
    }

    #[test]
    fn filters_compose_over_explicit_streams() {
        let ten: Stream = (1..=10).map(|n| format!("line {n}")).collect();
        let first_three = apply(head_registration(), "-n 3", ten);
        assert_eq!(apply(wc_registration(), "-l", first_three), lines(&["3"]));

        let sorted = apply(sort_registration(), "", lines(&["b", "a", "a", "c"]));
        assert_eq!(apply(uniq_registration(), "", sorted), lines(&["a", "b", "c"]));
        assert_eq!(
            apply(uniq_registration(), "", lines(&["a", "b", "a"])),
            lines(&["a", "b", "a"])
        );
    }

    #[test]
    fn grep_filters_with_optional_case_folding() {
        let (shell, _) = sample_session();
        assert_eq!(run(&shell, "ls | grep RUST"), Vec::<String>::new());
        assert_eq!(run(&shell, "ls | grep -i RUST"), lines(&["rust-notes.md"]));
        assert_eq!(run(&shell, "ls | grep ^h.*md$"), lines(&["hello.md"]));
        assert_eq!(run(&shell, "ls | grep"), lines(&["hello.md", "rust-notes.md"]));
    }

    #[test]
    fn grep_rejects_invalid_pattern() {
        let (shell, _) = sample_session();
        assert_eq!(run(&shell, "ls | grep ("), lines(&["Invalid arguments."]));
        assert_eq!(run(&shell, "grep ("), lines(&["Invalid arguments."]));
    }

    #[test]
    fn head_and_tail_take_counts() {
        let (shell, _) = sample_session();
        assert_eq!(run(&shell, "help | head -n 1"), lines(&["Available commands:"]));
        assert_eq!(run(&shell, "ls | tail -n 1"), lines(&["rust-notes.md"]));
        assert_eq!(run(&shell, "ls | head -n 0"), Vec::<String>::new());
        assert_eq!(run(&shell, "ls | head -n -1"), lines(&["hello.md", "rust-notes.md"]));
        assert_eq!(run(&shell, "ls | tail -n 99"), lines(&["hello.md", "rust-notes.md"]));
    }

    #[test]
    fn sort_folds_case_and_uniq_collapses_neighbours() {
        let (shell, _) = sample_session();
        assert_eq!(
            run(&shell, "ls -topic | cut -f 2 | sort"),
            lines(&["[-]", "[rust, async]"])
        );
        assert_eq!(run(&shell, "ls | sort | uniq | wc -l"), lines(&["2"]));
    }

    #[test]
    fn wc_reports_lines_words_chars() {
        let (shell, _) = sample_session();
        assert_eq!(run(&shell, "ls | wc"), lines(&["2 2 22"]));
        assert_eq!(run(&shell, "ls | wc -l"), lines(&["2"]));
    }

    #[test]
    fn cut_selects_fields_and_defaults_to_first() {
        let (shell, _) = sample_session();
        assert_eq!(
            run(&shell, "ls -topic | cut"),
            lines(&["hello.md", "rust-notes.md"])
        );
        assert_eq!(run(&shell, "ls -topic | cut -f 3"), lines(&["", ""]));
        assert_eq!(
            run(&shell, "ls -topic | cut -f 0"),
            lines(&["hello.md", "rust-notes.md"])
        );
    }
}
