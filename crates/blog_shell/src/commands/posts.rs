//! `ls` and `open`.

use std::rc::Rc;

use blog_host::Message;
use blog_shell_contract::{LineClass, PostSummary, Scene, ShellError, Stream, Theme};
use shell_line_headless::escape_html;

use super::{descriptor, fixed_options};
use crate::{
    registry::{CommandInvocation, CommandRegistration},
    session::SessionContext,
};

const BYTES_PER_TITLE_CHAR: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Listing {
    Names,
    Long,
    Topics,
}

pub(super) fn ls_registration() -> CommandRegistration {
    CommandRegistration {
        descriptor: descriptor("ls", "List posts.", "ls [-al|-topic]"),
        completion: fixed_options(&["-al", "-topic"]),
        handler: Rc::new(|invocation| Box::pin(async move { list_posts(&invocation) })),
    }
}

pub(super) fn open_registration() -> CommandRegistration {
    CommandRegistration {
        descriptor: descriptor(
            "open",
            "Open a post in the reader. Reads the name from the first input line when piped.",
            "open <name|slug>",
        ),
        completion: Some(Rc::new(|session: &SessionContext| session.post_filenames())),
        handler: Rc::new(|invocation| Box::pin(open_post(invocation))),
    }
}

fn list_posts(invocation: &CommandInvocation) -> Result<Option<Stream>, ShellError> {
    let session = &invocation.session;
    let posts = session.posts();
    if posts.is_empty() {
        let message = session.t(Message::NoPosts);
        if invocation.is_piped() {
            return Ok(Some(vec![message]));
        }
        session.print_text(&message, LineClass::Plain);
        return Ok(None);
    }

    let listing = match invocation.args.as_str() {
        "" => Listing::Names,
        "-al" => Listing::Long,
        "-topic" => Listing::Topics,
        other => return Err(ShellError::bad_argument(format!("ls: unknown option `{other}`"))),
    };
    let user = session.config().user;
    let lines: Stream = posts
        .iter()
        .map(|post| listing_line(post, listing, &user))
        .collect();

    if invocation.is_piped() {
        return Ok(Some(lines));
    }
    for line in &lines {
        session.print_html(file_markup(line), LineClass::Plain);
    }
    Ok(None)
}

fn listing_line(post: &PostSummary, listing: Listing, user: &str) -> String {
    let filename = post.filename();
    match listing {
        Listing::Names => filename,
        Listing::Long => {
            let size = post.display_title().chars().count() * BYTES_PER_TITLE_CHAR;
            format!(
                "-rw-r--r-- 1 {user} {user} {size:>6} {date:<12} {filename}",
                date = post.date
            )
        }
        Listing::Topics => {
            let tags = if post.tags.is_empty() {
                "-".to_string()
            } else {
                post.tags.join(", ")
            };
            format!("{filename}\t[{tags}]")
        }
    }
}

/// Highlights the text before the first tab as a file name.
fn file_markup(line: &str) -> String {
    match line.split_once('\t') {
        Some((file, rest)) => format!(
            "<span class=\"file\">{}</span>\t{}",
            escape_html(file),
            escape_html(rest)
        ),
        None => format!("<span class=\"file\">{}</span>", escape_html(line)),
    }
}

async fn open_post(invocation: CommandInvocation) -> Result<Option<Stream>, ShellError> {
    let target = match invocation.args.trim() {
        "" => invocation
            .input
            .as_ref()
            .and_then(|lines| lines.first())
            .map(|line| line.trim().to_string())
            .unwrap_or_default(),
        explicit => explicit.to_string(),
    };
    if target.is_empty() {
        return Err(ShellError::bad_argument("open: missing post name"));
    }

    let session = &invocation.session;
    let slug = target.strip_suffix(".md").unwrap_or(&target).to_string();
    let slug = session.find_post(&slug).map(|post| post.slug).unwrap_or(slug);
    session.open_post(&slug).await?;
    session.set_theme(Theme::Blog);
    session.show_scene(Scene::BlogPost);
    if !invocation.is_piped() {
        let message = session.t(Message::Opened(&format!("{slug}.md")));
        session.print_text(&message, LineClass::Ok);
    }
    Ok(None)
}
