//! Terminal scene UI component backed by a [`ShellSession`].
//!
//! The component is a thin view over the engine: it mirrors the prompt element into the
//! session, forwards key gestures, and re-renders whenever the session revision changes.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use std::rc::Rc;

use blog_host::{next_monotonic_timestamp_ms, TextMeasure};
use blog_shell::ShellSession;
use blog_shell_contract::{
    CaretGeometry, CompletionDirection, FontProfile, InputLayout, LineClass, Scene,
    TranscriptEntry,
};
use leptos::ev::KeyboardEvent;
use leptos::html;
use leptos::*;
use shell_line_headless::escape_html;

fn line_class_name(class: LineClass) -> &'static str {
    match class {
        LineClass::Plain => "terminal-line",
        LineClass::Ok => "terminal-line ok",
        LineClass::Error => "terminal-line error",
    }
}

fn suggestion_markup(items: &[String]) -> String {
    items
        .iter()
        .map(|item| escape_html(item))
        .collect::<Vec<_>>()
        .join("&nbsp;&nbsp;")
}

/// Character offset for a DOM selection offset counted in UTF-16 code units.
fn utf16_to_char_offset(text: &str, utf16: usize) -> usize {
    let mut units = 0;
    for (index, ch) in text.chars().enumerate() {
        if units >= utf16 {
            return index;
        }
        units += ch.len_utf16();
    }
    text.chars().count()
}

fn char_to_utf16_offset(text: &str, chars: usize) -> usize {
    text.chars().take(chars).map(char::len_utf16).sum()
}

/// Parses a computed CSS length such as `14px`; keywords like `normal` yield `None`.
fn parse_px(raw: &str) -> Option<f64> {
    raw.trim().strip_suffix("px")?.trim().parse().ok()
}

fn render_entry(entry: TranscriptEntry) -> View {
    match entry {
        TranscriptEntry::Prompt { ps1, echo } => view! {
            <div class="prompt-line readonly">
                <span class="ps1">{ps1}</span>
                <span class="echo">{echo}</span>
            </div>
        }
        .into_view(),
        TranscriptEntry::Line { html, class } => {
            view! { <div class=line_class_name(class) inner_html=html></div> }.into_view()
        }
        TranscriptEntry::Suggestions { items } => view! {
            <div class="terminal-line">
                <div class="ac-suggestions" inner_html=suggestion_markup(&items)></div>
            </div>
        }
        .into_view(),
    }
}

fn read_font_profile(input: &web_sys::HtmlInputElement) -> FontProfile {
    let defaults = FontProfile::default();
    let Ok(Some(style)) = window().get_computed_style(input) else {
        return defaults;
    };
    let property = |name: &str| style.get_property_value(name).ok().filter(|v| !v.is_empty());
    FontProfile {
        family: property("font-family").unwrap_or(defaults.family),
        size_px: property("font-size")
            .and_then(|raw| parse_px(&raw))
            .unwrap_or(defaults.size_px),
        weight: property("font-weight").unwrap_or(defaults.weight),
        letter_spacing_px: property("letter-spacing")
            .and_then(|raw| parse_px(&raw))
            .unwrap_or(0.0),
    }
}

/// Copies the element's text and caret into the session.
fn pull_input(shell: &ShellSession, input_ref: NodeRef<html::Input>) {
    let Some(input) = input_ref.get_untracked() else {
        return;
    };
    let text = input.value();
    let utf16 = input
        .selection_start()
        .ok()
        .flatten()
        .map(|offset| offset as usize)
        .unwrap_or_else(|| text.encode_utf16().count());
    let caret = utf16_to_char_offset(&text, utf16);
    shell.set_input(text, caret);
}

/// Writes the session's text and caret back into the element after an engine-side edit.
fn push_input(shell: &ShellSession, input_ref: NodeRef<html::Input>) {
    let (Some(input), Some(state)) = (input_ref.get_untracked(), shell.input()) else {
        return;
    };
    if input.value() != state.text() {
        input.set_value(state.text());
    }
    let at = char_to_utf16_offset(state.text(), state.caret()) as u32;
    if let Err(err) = input.set_selection_range(at, at) {
        logging::warn!("prompt selection update failed: {err:?}");
    }
}

fn focus_input(input_ref: NodeRef<html::Input>) {
    if let Some(input) = input_ref.get_untracked() {
        if let Err(err) = input.focus() {
            logging::warn!("prompt focus failed: {err:?}");
        }
    }
}

fn refresh_caret(
    shell: &ShellSession,
    measure: &dyn TextMeasure,
    input_ref: NodeRef<html::Input>,
    caret: RwSignal<Option<CaretGeometry>>,
) {
    let Some(input) = input_ref.get_untracked() else {
        caret.set(None);
        return;
    };
    let layout = InputLayout {
        offset_left: f64::from(input.offset_left()),
        offset_top: f64::from(input.offset_top()),
        height: f64::from(input.offset_height()),
    };
    let font = read_font_profile(&input);
    caret.set(shell.caret_geometry(measure, &font, &layout));
}

fn handle_keydown(shell: &ShellSession, input_ref: NodeRef<html::Input>, ev: &KeyboardEvent) {
    match ev.key().as_str() {
        "Enter" => {
            ev.prevent_default();
            pull_input(shell, input_ref);
            let shell = shell.clone();
            spawn_local(async move { shell.submit().await });
        }
        "Tab" => {
            ev.prevent_default();
            pull_input(shell, input_ref);
            let direction = if ev.shift_key() {
                CompletionDirection::Backward
            } else {
                CompletionDirection::Forward
            };
            shell.complete(direction, next_monotonic_timestamp_ms());
            push_input(shell, input_ref);
        }
        "ArrowUp" => {
            ev.prevent_default();
            shell.history_back();
            push_input(shell, input_ref);
        }
        "ArrowDown" => {
            ev.prevent_default();
            shell.history_forward();
            push_input(shell, input_ref);
        }
        "c" | "C" if ev.ctrl_key() => {
            ev.prevent_default();
            shell.interrupt();
            push_input(shell, input_ref);
        }
        _ => {}
    }
}

#[component]
/// Terminal scene contents: transcript, the single editable prompt, and its fake caret.
pub fn TerminalApp(
    /// Session driving the terminal.
    shell: ShellSession,
    /// Bumped after every session change.
    revision: Signal<u64>,
    /// Text measurement used to place the caret.
    measure: Rc<dyn TextMeasure>,
) -> impl IntoView {
    let session = store_value(shell);
    let measure = store_value(measure);
    let input_ref = create_node_ref::<html::Input>();
    let output_ref = create_node_ref::<html::Div>();
    let caret = create_rw_signal(None::<CaretGeometry>);

    create_effect(move |last_prompt: Option<Option<u64>>| {
        revision.get();
        let (prompt_id, scene) = session.with_value(|shell| {
            let context = shell.context();
            (context.prompt().map(|prompt| prompt.id), context.scene())
        });
        let should_focus = prompt_id.is_some()
            && last_prompt.flatten() != prompt_id
            && scene == Scene::Terminal;
        request_animation_frame(move || {
            if should_focus {
                focus_input(input_ref);
            }
            let measure = measure.get_value();
            refresh_caret(&session.get_value(), measure.as_ref(), input_ref, caret);
            if let Some(output) = output_ref.get_untracked() {
                output.set_scroll_top(output.scroll_height());
            }
        });
        prompt_id
    });

    let transcript = move || {
        revision.get();
        session
            .with_value(|shell| shell.context().transcript())
            .into_iter()
            .map(render_entry)
            .collect_view()
    };
    let prompt_ps1 = move || {
        revision.get();
        session
            .with_value(|shell| shell.context().prompt())
            .map(|prompt| prompt.ps1)
            .unwrap_or_default()
    };
    let prompt_text = move || {
        revision.get();
        session
            .with_value(ShellSession::input)
            .map(|input| input.text().to_string())
            .unwrap_or_default()
    };
    let prompt_idle = move || {
        revision.get();
        session.with_value(|shell| shell.context().prompt().is_none())
    };
    let sync = move || pull_input(&session.get_value(), input_ref);
    let px = |value: f64| format!("{value}px");

    view! {
        <div
            class="terminal-output"
            id="terminal-output"
            role="log"
            aria-live="polite"
            node_ref=output_ref
            on:click=move |_| focus_input(input_ref)
        >
            {transcript}
            <div class="prompt-line" class:hidden=prompt_idle>
                <span class="ps1">{prompt_ps1}</span>
                <input
                    node_ref=input_ref
                    class="prompt-input"
                    type="text"
                    autocomplete="off"
                    spellcheck="false"
                    prop:value=prompt_text
                    prop:disabled=prompt_idle
                    on:input=move |_| sync()
                    on:keydown=move |ev: KeyboardEvent| {
                        handle_keydown(&session.get_value(), input_ref, &ev)
                    }
                    on:keyup=move |_| sync()
                    on:click=move |_| sync()
                    on:focus=move |_| sync()
                />
                <span
                    class="fake-caret"
                    class:hidden=move || caret.get().is_none()
                    style:left=move || px(caret.get().map_or(0.0, |geometry| geometry.left_px))
                    style:top=move || px(caret.get().map_or(0.0, |geometry| geometry.top_px))
                    style:height=move || px(caret.get().map_or(0.0, |geometry| geometry.height_px))
                ></span>
            </div>
        </div>
    }
}
