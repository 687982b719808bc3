//! `help`, `theme`, `translate`, and `clear`.

use std::rc::Rc;

use blog_host::Message;
use blog_shell_contract::{Language, LineClass, ShellError, Stream, Theme};

use super::{descriptor, fixed_options};
use crate::registry::{CommandInvocation, CommandRegistration};

pub(super) fn help_registration() -> CommandRegistration {
    CommandRegistration {
        descriptor: descriptor("help", "Show the command overview.", "help"),
        completion: None,
        handler: Rc::new(|invocation| Box::pin(async move { show_help(&invocation) })),
    }
}

pub(super) fn theme_registration() -> CommandRegistration {
    CommandRegistration {
        descriptor: descriptor("theme", "Switch the page theme.", "theme <terminal|blog>"),
        completion: fixed_options(&["terminal", "blog"]),
        handler: Rc::new(|invocation| Box::pin(async move { switch_theme(invocation) })),
    }
}

pub(super) fn translate_registration() -> CommandRegistration {
    CommandRegistration {
        descriptor: descriptor(
            "translate",
            "Switch the interface and post language.",
            "translate <en|kr>",
        ),
        completion: fixed_options(&["en", "kr"]),
        handler: Rc::new(|invocation| Box::pin(switch_language(invocation))),
    }
}

pub(super) fn clear_registration() -> CommandRegistration {
    CommandRegistration {
        descriptor: descriptor("clear", "Clear the terminal.", "clear"),
        completion: None,
        handler: Rc::new(|invocation| {
            Box::pin(async move {
                invocation.session.clear_transcript();
                Ok(Some(Vec::new()))
            })
        }),
    }
}

fn show_help(invocation: &CommandInvocation) -> Result<Option<Stream>, ShellError> {
    let text = invocation.session.t(Message::Help);
    if invocation.is_piped() {
        return Ok(Some(text.split('\n').map(str::to_string).collect()));
    }
    invocation.session.print_text(&text, LineClass::Plain);
    Ok(None)
}

fn switch_theme(invocation: CommandInvocation) -> Result<Option<Stream>, ShellError> {
    let theme = match invocation.args.as_str() {
        "" => return Err(ShellError::bad_argument("theme: missing theme name")),
        name => Theme::parse(name)
            .ok_or_else(|| ShellError::bad_argument(format!("theme: unknown theme `{name}`")))?,
    };
    invocation.session.set_theme(theme);
    Ok(Some(invocation.input.unwrap_or_default()))
}

async fn switch_language(invocation: CommandInvocation) -> Result<Option<Stream>, ShellError> {
    if invocation.args.is_empty() {
        return Err(ShellError::bad_argument("translate: missing language"));
    }
    invocation
        .session
        .set_language(Language::from_code(&invocation.args))
        .await;
    Ok(Some(invocation.input.unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use blog_host::ViewCall;
    use blog_shell_contract::Scene;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::commands::fixture::{run, sample_session};

    #[test]
    fn help_prints_one_block_or_lines_when_piped() {
        let (shell, _) = sample_session();
        let printed = run(&shell, "help");
        assert_eq!(printed.len(), 1);
        assert!(printed[0].starts_with("Available commands:"));

        let counted = run(&shell, "help | wc -l");
        let expected = shell.context().t(Message::Help).lines().count();
        assert_eq!(counted, vec![expected.to_string()]);
    }

    #[test]
    fn theme_switches_and_passes_input_through() {
        let (shell, view) = sample_session();
        let output = run(&shell, "ls | theme BLOG | head -n 1");
        assert_eq!(
            output,
            vec!["Theme switched to 'blog'.".to_string(), "hello.md".to_string()]
        );
        assert_eq!(shell.context().scene(), Scene::BlogList);
        assert_eq!(
            view.calls(),
            vec![ViewCall::Theme(Theme::Blog), ViewCall::Scene(Scene::BlogList)]
        );

        assert!(run(&shell, "theme blog").is_empty());
    }

    #[test]
    fn theme_requires_a_known_name() {
        let (shell, _) = sample_session();
        assert_eq!(run(&shell, "theme"), vec!["Invalid arguments.".to_string()]);
        assert_eq!(run(&shell, "theme dark"), vec!["Invalid arguments.".to_string()]);
        assert_eq!(shell.context().theme(), Theme::Terminal);
    }

    #[test]
    fn translate_switches_language_and_reloads_posts() {
        let (shell, view) = sample_session();
        let output = run(&shell, "translate jp");
        assert_eq!(shell.context().language(), Language::Kr);
        assert!(shell.context().posts().is_empty());
        assert_eq!(output, vec!["언어가 'KR'(으)로 전환되었습니다.".to_string()]);
        assert_eq!(view.calls(), vec![ViewCall::Language(Language::Kr)]);

        assert!(run(&shell, "translate kr").is_empty());
        assert_eq!(run(&shell, "translate"), vec!["인수 형식이 잘못되었습니다.".to_string()]);
    }

    #[test]
    fn clear_empties_transcript_and_stream() {
        let (shell, _) = sample_session();
        run(&shell, "help");
        assert!(run(&shell, "clear").is_empty());
        assert!(shell.context().transcript().is_empty());
        assert!(run(&shell, "ls | clear").is_empty());
    }
}
