//! Pipe interpreter.

use blog_shell_contract::{LineClass, ShellError, Stream};
use shell_line_headless::{escape_html, parse_command_line};

use crate::{
    registry::{CommandInvocation, CommandRegistry},
    session::SessionContext,
};

/// Runs one command line and writes its output to the session transcript.
///
/// A lone command gets no input stream and prints for itself. In a pipeline every stage receives
/// the previous stage's lines (the first one an empty stream), failures turn into a one-line
/// stream, unknown stages pass the stream through, and the final stream is printed.
pub async fn execute(registry: &CommandRegistry, session: &SessionContext, line: &str) {
    let parsed = parse_command_line(line);
    if parsed.is_empty() {
        return;
    }

    let piped = parsed.is_pipeline();
    let mut stream: Option<Stream> = piped.then(Vec::new);

    for stage in parsed.stages {
        let Some(command) = registry.get(&stage.command) else {
            if !piped {
                let message = session.localized_error(&ShellError::UnknownCommand(stage.command));
                session.print_text(&message, LineClass::Error);
                return;
            }
            continue;
        };

        let invocation = CommandInvocation {
            args: stage.args,
            input: stream.clone(),
            session: session.clone(),
        };
        match (command.handler)(invocation).await {
            Ok(Some(next)) => stream = Some(next),
            Ok(None) => {}
            Err(err) => {
                let message = session.localized_error(&err);
                if piped {
                    stream = Some(vec![message]);
                } else {
                    session.print_text(&message, LineClass::Error);
                }
            }
        }
    }

    if piped {
        for output in stream.unwrap_or_default() {
            session.print_html(escape_html(&output), LineClass::Plain);
        }
    }
}
