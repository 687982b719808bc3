//! Session state and the high-level shell facade used by the page.

use std::{
    cell::{Cell, RefCell},
    collections::{HashMap, VecDeque},
    rc::Rc,
};

use blog_host::{
    extract_title, filter_posts, translate, HostServices, Message, ShellConfig, TextMeasure,
};
use blog_shell_contract::{
    CaretGeometry, CompletionDirection, FontProfile, InputLayout, Language, LineClass, OpenedPost,
    PostSummary, Scene, ShellError, Theme, TranscriptEntry,
};
use leptos::logging;
use shell_line_headless::escape_html;

use crate::{
    commands::builtin_registrations,
    completion::{compute_candidates, CompletionOutcome, CompletionState},
    history::HistoryLog,
    pipeline::execute,
    prompt::{caret_geometry, ActivePrompt, PromptInput},
    registry::CommandRegistry,
};

/// Handle returned by [`SessionContext::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct SessionState {
    config: ShellConfig,
    theme: Theme,
    language: Language,
    scene: Scene,
    posts: Vec<PostSummary>,
    index_by_slug: HashMap<String, usize>,
    transcript: VecDeque<TranscriptEntry>,
    prompt: Option<ActivePrompt>,
    next_prompt_id: u64,
    history: HistoryLog,
    completion: CompletionState,
    opened_post: Option<OpenedPost>,
    search_query: String,
}

impl SessionState {
    fn new(config: ShellConfig) -> Self {
        Self {
            theme: config.theme,
            language: config.language,
            scene: scene_for_theme(config.theme),
            posts: Vec::new(),
            index_by_slug: HashMap::new(),
            transcript: VecDeque::new(),
            prompt: None,
            next_prompt_id: 0,
            history: HistoryLog::new(config.history_limit),
            completion: CompletionState::default(),
            opened_post: None,
            search_query: String::new(),
            config,
        }
    }

    fn push_entry(&mut self, entry: TranscriptEntry) {
        self.transcript.push_back(entry);
        let cap = self.config.max_transcript_entries.max(1);
        while self.transcript.len() > cap {
            self.transcript.pop_front();
        }
    }

    fn set_posts(&mut self, posts: Vec<PostSummary>) {
        self.index_by_slug = posts
            .iter()
            .enumerate()
            .map(|(index, post)| (post.slug.clone(), index))
            .collect();
        self.posts = posts;
    }

    fn open_prompt(&mut self) {
        self.next_prompt_id += 1;
        self.prompt = Some(ActivePrompt {
            id: self.next_prompt_id,
            ps1: self.config.ps1(),
            input: PromptInput::default(),
        });
    }

    fn freeze_prompt(&mut self, echo: Option<&str>) -> Option<String> {
        let prompt = self.prompt.take()?;
        let raw = prompt.input.text().to_string();
        self.push_entry(TranscriptEntry::Prompt {
            ps1: prompt.ps1,
            echo: echo.map(str::to_string).unwrap_or_else(|| raw.clone()),
        });
        Some(raw)
    }
}

fn scene_for_theme(theme: Theme) -> Scene {
    match theme {
        Theme::Terminal => Scene::Terminal,
        Theme::Blog => Scene::BlogList,
    }
}

struct SessionInner {
    services: HostServices,
    state: RefCell<SessionState>,
    subscribers: RefCell<Vec<(SubscriptionId, Rc<dyn Fn()>)>>,
    next_subscription: Cell<u64>,
}

/// Shared session state handed to every command.
///
/// Cloning is cheap; all clones observe the same session. Subscribers run after every mutation.
#[derive(Clone)]
pub struct SessionContext {
    inner: Rc<SessionInner>,
}

impl SessionContext {
    /// Creates a session with no posts loaded and no prompt.
    pub fn new(config: ShellConfig, services: HostServices) -> Self {
        Self {
            inner: Rc::new(SessionInner {
                services,
                state: RefCell::new(SessionState::new(config)),
                subscribers: RefCell::new(Vec::new()),
                next_subscription: Cell::new(0),
            }),
        }
    }

    fn read<R>(&self, f: impl FnOnce(&SessionState) -> R) -> R {
        f(&self.inner.state.borrow())
    }

    fn update<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> R {
        let result = f(&mut self.inner.state.borrow_mut());
        self.notify();
        result
    }

    fn notify(&self) {
        let subscribers: Vec<Rc<dyn Fn()>> = self
            .inner
            .subscribers
            .borrow()
            .iter()
            .map(|(_, callback)| callback.clone())
            .collect();
        for callback in subscribers {
            callback();
        }
    }

    /// Registers a callback that runs after every state change.
    pub fn subscribe(&self, callback: impl Fn() + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_subscription.get() + 1);
        self.inner.next_subscription.set(id.0);
        self.inner
            .subscribers
            .borrow_mut()
            .push((id, Rc::new(callback)));
        id
    }

    /// Removes a callback registered with [`SessionContext::subscribe`].
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.inner
            .subscribers
            .borrow_mut()
            .retain(|(existing, _)| *existing != id);
    }

    /// Host collaborators.
    pub fn services(&self) -> &HostServices {
        &self.inner.services
    }

    /// Session configuration.
    pub fn config(&self) -> ShellConfig {
        self.read(|state| state.config.clone())
    }

    /// Current theme.
    pub fn theme(&self) -> Theme {
        self.read(|state| state.theme)
    }

    /// Current language.
    pub fn language(&self) -> Language {
        self.read(|state| state.language)
    }

    /// Visible scene.
    pub fn scene(&self) -> Scene {
        self.read(|state| state.scene)
    }

    /// Posts of the current language in manifest order.
    pub fn posts(&self) -> Vec<PostSummary> {
        self.read(|state| state.posts.clone())
    }

    /// Looks a post up by slug.
    pub fn find_post(&self, slug: &str) -> Option<PostSummary> {
        self.read(|state| {
            state
                .index_by_slug
                .get(slug)
                .and_then(|index| state.posts.get(*index))
                .cloned()
        })
    }

    /// `<slug>.md` names of every post.
    pub fn post_filenames(&self) -> Vec<String> {
        self.read(|state| state.posts.iter().map(PostSummary::filename).collect())
    }

    /// Post list search text.
    pub fn search_query(&self) -> String {
        self.read(|state| state.search_query.clone())
    }

    /// Updates the post list search text.
    pub fn set_search_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.update(|state| state.search_query = query);
    }

    /// Posts matching the current search text.
    pub fn filtered_posts(&self) -> Vec<PostSummary> {
        self.read(|state| {
            filter_posts(&state.posts, &state.search_query)
                .into_iter()
                .cloned()
                .collect()
        })
    }

    /// Transcript entries oldest first.
    pub fn transcript(&self) -> Vec<TranscriptEntry> {
        self.read(|state| state.transcript.iter().cloned().collect())
    }

    /// The editable prompt, absent while a line is executing.
    pub fn prompt(&self) -> Option<ActivePrompt> {
        self.read(|state| state.prompt.clone())
    }

    /// Submitted lines oldest first.
    pub fn history_entries(&self) -> Vec<String> {
        self.read(|state| state.history.entries())
    }

    /// Post shown in the reader.
    pub fn opened_post(&self) -> Option<OpenedPost> {
        self.read(|state| state.opened_post.clone())
    }

    /// Localizes `message` in the current language.
    pub fn t(&self, message: Message<'_>) -> String {
        translate(self.language(), message)
    }

    /// Appends a line of trusted markup.
    pub fn print_html(&self, html: impl Into<String>, class: LineClass) {
        let html = html.into();
        self.update(|state| state.push_entry(TranscriptEntry::Line { html, class }));
    }

    /// Appends a line of plain text, escaping markup characters.
    pub fn print_text(&self, text: &str, class: LineClass) {
        self.print_html(escape_html(text), class);
    }

    /// Appends a completion suggestion listing.
    pub fn print_suggestions(&self, items: Vec<String>) {
        if items.is_empty() {
            return;
        }
        self.update(|state| state.push_entry(TranscriptEntry::Suggestions { items }));
    }

    /// Empties the transcript.
    pub fn clear_transcript(&self) {
        self.update(|state| state.transcript.clear());
    }

    /// User-facing text for a command failure.
    pub fn localized_error(&self, err: &ShellError) -> String {
        match err.clone().for_display() {
            unknown @ ShellError::UnknownCommand(_) => unknown.to_string(),
            ShellError::BadArgument(_) => self.t(Message::BadArg),
            ShellError::NotFound(slug) | ShellError::FetchFailure { slug, .. } => {
                format!("{}: {slug}", self.t(Message::NotFound))
            }
        }
    }

    /// Switches the visible scene.
    pub fn show_scene(&self, scene: Scene) {
        self.update(|state| state.scene = scene);
        self.inner.services.view.switch_scene(scene);
    }

    /// Switches the theme, moves to the matching scene, and reports it.
    ///
    /// Returns `false` without side effects when `theme` is already active.
    pub fn set_theme(&self, theme: Theme) -> bool {
        if self.theme() == theme {
            return false;
        }
        let scene = scene_for_theme(theme);
        self.update(|state| {
            state.theme = theme;
            state.scene = scene;
        });
        let view = &self.inner.services.view;
        view.set_theme(theme);
        view.switch_scene(scene);
        self.print_text(&self.t(Message::ThemeSwitched(theme)), LineClass::Ok);
        true
    }

    /// Switches the language, reloads its posts, and reports it.
    ///
    /// Returns `false` without side effects when `language` is already active.
    pub async fn set_language(&self, language: Language) -> bool {
        if self.language() == language {
            return false;
        }
        let left_reader = self.update(|state| {
            state.language = language;
            state.search_query.clear();
            let reading = state.scene == Scene::BlogPost;
            if reading {
                state.scene = Scene::BlogList;
            }
            reading
        });
        let view = self.inner.services.view.clone();
        view.apply_language(language);
        if left_reader {
            view.switch_scene(Scene::BlogList);
        }
        self.reload_posts().await;
        self.print_text(&self.t(Message::LangSwitched(language)), LineClass::Ok);
        true
    }

    /// Loads the manifest of the current language. Failures leave the post list empty.
    pub async fn reload_posts(&self) {
        let language = self.language();
        let source = self.inner.services.posts.clone();
        let posts = match source.load_manifest(language).await {
            Ok(manifest) => manifest.posts,
            Err(err) => {
                logging::warn!("post manifest load failed for `{}`: {err}", language.code());
                Vec::new()
            }
        };
        self.update(|state| state.set_posts(posts));
    }

    /// Fetches and renders a post for the reader.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::FetchFailure`] when the body cannot be fetched.
    pub async fn open_post(&self, slug: &str) -> Result<OpenedPost, ShellError> {
        let language = self.language();
        let source = self.inner.services.posts.clone();
        let body = source
            .fetch_post_body(language, slug)
            .await
            .map_err(|err| {
                logging::warn!("post fetch failed for `{slug}`: {err}");
                ShellError::FetchFailure {
                    slug: slug.to_string(),
                    reason: err.to_string(),
                }
            })?;

        let meta = self.find_post(slug);
        let filename = format!("{slug}.md");
        let fallback = meta
            .as_ref()
            .map(|post| post.display_title().to_string())
            .unwrap_or_else(|| filename.clone());
        let meta_line = match meta.as_ref().filter(|post| !post.date.is_empty()) {
            Some(post) => format!("{filename} • {}", post.date),
            None => filename,
        };
        let opened = OpenedPost {
            slug: slug.to_string(),
            title: extract_title(&body, &fallback),
            meta_line,
            tags: meta.map(|post| post.tags).unwrap_or_default(),
            html: self.inner.services.markdown.render_to_safe_html(&body),
        };
        self.update(|state| state.opened_post = Some(opened.clone()));
        Ok(opened)
    }
}

/// A shell session bound to a command registry.
#[derive(Clone)]
pub struct ShellSession {
    context: SessionContext,
    registry: Rc<CommandRegistry>,
}

impl ShellSession {
    /// Creates a session with the built-in commands.
    pub fn new(config: ShellConfig, services: HostServices) -> Self {
        Self::with_registry(
            config,
            services,
            CommandRegistry::from_registrations(builtin_registrations()),
        )
    }

    /// Creates a session with a custom command table.
    pub fn with_registry(
        config: ShellConfig,
        services: HostServices,
        registry: CommandRegistry,
    ) -> Self {
        Self {
            context: SessionContext::new(config, services),
            registry: Rc::new(registry),
        }
    }

    /// Shared session state.
    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    /// Command table.
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Applies the initial view, loads posts, prints the banner and help, and opens the first
    /// prompt. Calling it again does nothing once a prompt exists.
    pub async fn boot(&self) {
        if self.context.prompt().is_some() {
            return;
        }
        let view = self.context.services().view.clone();
        view.set_theme(self.context.theme());
        view.apply_language(self.context.language());
        view.switch_scene(self.context.scene());

        self.context.reload_posts().await;
        self.context
            .print_text(&self.context.t(Message::Welcome), LineClass::Plain);
        self.context
            .print_text(&self.context.t(Message::Help), LineClass::Plain);
        self.context.update(SessionState::open_prompt);
    }

    /// Text and caret of the editable prompt.
    pub fn input(&self) -> Option<PromptInput> {
        self.context.prompt().map(|prompt| prompt.input)
    }

    /// Mirrors an edit made in the prompt element.
    pub fn set_input(&self, text: impl Into<String>, caret: usize) {
        let text = text.into();
        self.context.update(|state| {
            if let Some(prompt) = state.prompt.as_mut() {
                prompt.input.set(text, caret);
            }
        });
    }

    /// Mirrors a caret move made in the prompt element.
    pub fn set_caret(&self, caret: usize) {
        self.context.update(|state| {
            if let Some(prompt) = state.prompt.as_mut() {
                prompt.input.set_caret(caret);
            }
        });
    }

    /// Handles Tab (`Forward`) or Shift+Tab (`Backward`) at `now_ms`.
    pub fn complete(&self, direction: CompletionDirection, now_ms: u64) -> CompletionOutcome {
        let Some(prompt) = self.context.prompt() else {
            return CompletionOutcome::NoCandidates;
        };
        let window = self.context.read(|state| state.config.suggestion_window_ms);
        let mut completion = self
            .context
            .read(|state| state.completion.clone());
        let outcome = completion.gesture(
            prompt.input.text(),
            prompt.input.caret(),
            direction,
            now_ms,
            window,
            |text, caret| compute_candidates(&self.registry, &self.context, text, caret),
        );

        self.context.update(|state| {
            state.completion = completion;
            match &outcome {
                CompletionOutcome::Inserted { text, caret }
                | CompletionOutcome::Cycled { text, caret } => {
                    if let Some(prompt) = state.prompt.as_mut() {
                        prompt.input.set(text.clone(), *caret);
                    }
                }
                CompletionOutcome::Suggested(items) => {
                    state.push_entry(TranscriptEntry::Suggestions {
                        items: items.clone(),
                    });
                }
                CompletionOutcome::NoCandidates | CompletionOutcome::Pending => {}
            }
        });
        outcome
    }

    /// Recalls the previous history entry (ArrowUp).
    pub fn history_back(&self) {
        self.recall(HistoryLog::back);
    }

    /// Recalls the next history entry, or clears the input past the newest (ArrowDown).
    pub fn history_forward(&self) {
        self.recall(HistoryLog::forward);
    }

    fn recall(&self, step: fn(&mut HistoryLog) -> Option<String>) {
        self.context.update(|state| {
            state.completion.reset();
            if state.prompt.is_none() {
                return;
            }
            let Some(text) = step(&mut state.history) else {
                return;
            };
            if let Some(prompt) = state.prompt.as_mut() {
                prompt.input.replace_with_caret_at_end(text);
            }
        });
    }

    /// Freezes the prompt, runs its trimmed text, and opens a fresh prompt.
    ///
    /// Does nothing while a previous line is still running.
    pub async fn submit(&self) {
        let Some(raw) = self.context.update(|state| state.freeze_prompt(None)) else {
            return;
        };
        let line = raw.trim().to_string();
        self.context.update(|state| {
            state.completion.reset();
            if line.is_empty() {
                state.history.reset_cursor();
            } else {
                state.history.push(line.clone());
            }
        });
        if !line.is_empty() {
            execute(&self.registry, &self.context, &line).await;
        }
        self.context.update(SessionState::open_prompt);
    }

    /// Ctrl+C: abandons the current input without running it.
    pub fn interrupt(&self) {
        self.context.update(|state| {
            if state.freeze_prompt(Some("")).is_none() {
                return;
            }
            state.push_entry(TranscriptEntry::Line {
                html: "^C".to_string(),
                class: LineClass::Plain,
            });
            state.completion.reset();
            state.open_prompt();
        });
    }

    /// Freezes the current prompt as typed and opens a new one, when the terminal is visible.
    pub fn refresh_prompt(&self) {
        self.context.update(|state| {
            if state.scene != Scene::Terminal {
                return;
            }
            if state.freeze_prompt(None).is_some() {
                state.completion.reset();
                state.open_prompt();
            }
        });
    }

    /// Fake caret placement for the editable prompt.
    pub fn caret_geometry(
        &self,
        measure: &dyn TextMeasure,
        font: &FontProfile,
        layout: &InputLayout,
    ) -> Option<CaretGeometry> {
        self.input()
            .map(|input| caret_geometry(measure, font, layout, &input))
    }

    /// Header theme toggle.
    pub fn toggle_theme(&self) {
        let next = self.context.theme().toggled();
        self.context.set_theme(next);
        if next == Theme::Terminal {
            self.refresh_prompt();
        }
    }

    /// Header language toggle.
    pub async fn toggle_language(&self) {
        let next = self.context.language().toggled();
        self.context.set_language(next).await;
        self.refresh_prompt();
    }

    /// Opens a post picked from the list and shows the reader.
    pub async fn open_from_list(&self, slug: &str) {
        match self.context.open_post(slug).await {
            Ok(_) => {
                self.context.show_scene(Scene::BlogPost);
                let opened = self.context.t(Message::Opened(&format!("{slug}.md")));
                self.context.print_text(&opened, LineClass::Ok);
            }
            Err(err) => {
                let message = self.context.localized_error(&err);
                self.context.print_text(&message, LineClass::Error);
            }
        }
    }

    /// Reader back button.
    pub fn show_post_list(&self) {
        self.context.show_scene(Scene::BlogList);
    }
}
