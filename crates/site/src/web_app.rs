use std::rc::Rc;
use std::time::Duration;

use blog_app_terminal::TerminalApp;
use blog_host::{Message, TextMeasure};
use blog_host_web::{build_host_services, CanvasTextMeasure, PagePrefs, WebPrefsStore};
use blog_shell::ShellSession;
use blog_shell_contract::{Language, PostSummary, Scene, Theme};
use futures::future::{FutureExt, LocalBoxFuture, Shared};
use leptos::leptos_dom::helpers::TimeoutHandle;
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

use crate::config::load_shell_config;
use crate::permalink::{PermalinkTable, PostQuery};

const SEARCH_DEBOUNCE: Duration = Duration::from_millis(120);

#[derive(Clone)]
struct SiteState {
    shell: ShellSession,
    revision: RwSignal<u64>,
    boot: Shared<LocalBoxFuture<'static, ()>>,
}

type Site = StoredValue<SiteState>;

fn session(site: Site) -> ShellSession {
    site.with_value(|state| state.shell.clone())
}

/// Theme implied by the page path: `/posts` is the blog, everything else the terminal.
fn theme_for_path(pathname: &str) -> Theme {
    if pathname.starts_with("/posts") {
        Theme::Blog
    } else {
        Theme::Terminal
    }
}

#[derive(Debug, Clone, PartialEq)]
struct PostListing {
    indexed: usize,
    entries: Vec<(PostSummary, String)>,
}

fn post_listing(shell: &ShellSession) -> PostListing {
    let context = shell.context();
    let posts = context.posts();
    let permalinks = PermalinkTable::build(&posts);
    PostListing {
        indexed: posts.len(),
        entries: context
            .filtered_posts()
            .into_iter()
            .map(|post| {
                let href = permalinks.href(&post.slug);
                (post, href)
            })
            .collect(),
    }
}

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    let mut config = load_shell_config();
    if let Some(prefs) = WebPrefsStore.load_page_prefs() {
        prefs.apply_to(&mut config);
    }
    if let Ok(pathname) = window().location().pathname() {
        config.theme = theme_for_path(&pathname);
    }
    let title = config.ps1();
    let services = build_host_services(&config);
    let shell = ShellSession::new(config, services);

    let revision = create_rw_signal(0u64);
    let subscription = shell
        .context()
        .subscribe(move || revision.update(|value| *value += 1));
    {
        let shell = shell.clone();
        on_cleanup(move || shell.context().unsubscribe(subscription));
    }

    let boot = {
        let shell = shell.clone();
        async move { shell.boot().await }.boxed_local().shared()
    };
    spawn_local(boot.clone());

    {
        let shell = shell.clone();
        create_effect(move |previous: Option<Language>| {
            revision.get();
            let language = shell.context().language();
            if previous.is_some_and(|previous| previous != language) {
                if let Err(err) = WebPrefsStore.save_page_prefs(PagePrefs { language }) {
                    logging::warn!("page prefs save failed: {err}");
                }
            }
            language
        });
    }

    let site = store_value(SiteState {
        shell,
        revision,
        boot,
    });

    view! {
        <Title text=title />
        <Meta name="description" content="A personal blog behind a terminal prompt." />

        <Router>
            <SiteHeader site=site />
            <main class="site-root">
                <Routes>
                    <Route path="" view=move || view! { <TerminalRoute site=site /> } />
                    <Route path="/posts" view=move || view! { <PostsRoute site=site /> } />
                </Routes>
                <TerminalScene site=site />
                <BlogScene site=site />
            </main>
        </Router>
    }
}

#[component]
fn TerminalRoute(site: Site) -> impl IntoView {
    let SiteState { shell, boot, .. } = site.get_value();
    spawn_local(async move {
        boot.await;
        if shell.context().set_theme(Theme::Terminal) {
            shell.refresh_prompt();
        }
    });
}

#[component]
fn PostsRoute(site: Site) -> impl IntoView {
    let location = use_location();
    create_effect(move |_| {
        let search = location.search.get();
        let SiteState { shell, boot, .. } = site.get_value();
        spawn_local(async move {
            boot.await;
            let context = shell.context();
            context.set_theme(Theme::Blog);
            let permalinks = PermalinkTable::build(&context.posts());
            match PostQuery::parse(&search).and_then(|query| permalinks.resolve(query)) {
                Some(slug) => shell.open_from_list(&slug).await,
                None => shell.show_post_list(),
            }
        });
    });
}

#[component]
fn SiteHeader(site: Site) -> impl IntoView {
    let revision = site.with_value(|state| state.revision);
    let theme_label = move || {
        revision.get();
        session(site).context().theme().as_str()
    };
    let language_label = move || {
        revision.get();
        session(site).context().language().code().to_uppercase()
    };

    view! {
        <header class="site-header">
            <span class="site-title">{move || session(site).context().config().ps1()}</span>
            <nav class="site-controls">
                <button
                    type="button"
                    class="theme-toggle"
                    on:click=move |_| session(site).toggle_theme()
                >
                    {theme_label}
                </button>
                <button
                    type="button"
                    class="lang-toggle"
                    on:click=move |_| {
                        let shell = session(site);
                        spawn_local(async move { shell.toggle_language().await });
                    }
                >
                    {language_label}
                </button>
            </nav>
        </header>
    }
}

#[component]
fn TerminalScene(site: Site) -> impl IntoView {
    let SiteState {
        shell, revision, ..
    } = site.get_value();
    let measure: Rc<dyn TextMeasure> = Rc::new(CanvasTextMeasure::default());
    let hidden = move || {
        revision.get();
        session(site).context().scene() != Scene::Terminal
    };

    view! {
        <section class="terminal-scene" class:hidden=hidden>
            <TerminalApp shell=shell revision=Signal::from(revision) measure=measure />
        </section>
    }
}

#[component]
fn BlogScene(site: Site) -> impl IntoView {
    let revision = site.with_value(|state| state.revision);
    let navigate = use_navigate();
    let scene = move || {
        revision.get();
        session(site).context().scene()
    };
    let t = move |message: Message<'static>| {
        revision.get();
        session(site).context().t(message)
    };

    let listing = create_memo(move |_| {
        revision.get();
        post_listing(&session(site))
    });
    let opened = create_memo(move |_| {
        revision.get();
        session(site).context().opened_post()
    });

    // Typed search text; the session only sees it once typing pauses.
    let draft = create_rw_signal(session(site).context().search_query());
    let pending = store_value(None::<TimeoutHandle>);
    create_effect(move |_| {
        revision.get();
        if pending.get_value().is_none() {
            let query = session(site).context().search_query();
            if draft.get_untracked() != query {
                draft.set(query);
            }
        }
    });

    let commit_search = move |query: String| {
        if let Some(handle) = pending.get_value() {
            handle.clear();
        }
        pending.set_value(None);
        session(site).context().set_search_query(query);
    };
    let on_search = move |ev: ev::Event| {
        let value = event_target_value(&ev);
        draft.set(value.clone());
        if let Some(handle) = pending.get_value() {
            handle.clear();
        }
        let deferred = value.clone();
        match set_timeout_with_handle(move || commit_search(deferred), SEARCH_DEBOUNCE) {
            Ok(handle) => pending.set_value(Some(handle)),
            Err(err) => {
                logging::warn!("search debounce unavailable: {err:?}");
                commit_search(value);
            }
        }
    };
    let search_tag = move |tag: String| {
        draft.set(tag.clone());
        commit_search(tag);
    };

    let posts = move || {
        let PostListing { indexed, entries } = listing.get();
        if entries.is_empty() {
            let message = if indexed == 0 {
                Message::NoPosts
            } else {
                Message::NoResults
            };
            return view! { <li class="post-empty">{t(message)}</li> }.into_view();
        }
        entries
            .into_iter()
            .map(|(post, href)| post_item(post, href, search_tag))
            .collect_view()
    };

    let detail = move || {
        let post = opened.get()?;
        let navigate = navigate.clone();
        let back = move |_: ev::MouseEvent| {
            session(site).show_post_list();
            navigate("/posts", NavigateOptions::default());
        };
        let tags = post
            .tags
            .iter()
            .map(|tag| view! { <span class="post-tag">{format!("#{tag}")}</span> })
            .collect_view();
        Some(view! {
            <article class="post-detail">
                <button type="button" class="post-back" on:click=back>
                    {t(Message::Back)}
                </button>
                <h1 class="post-title">{post.title}</h1>
                <p class="post-meta">{post.meta_line}</p>
                <div class="post-tags">{tags}</div>
                <div class="post-content" inner_html=post.html></div>
            </article>
        })
    };

    view! {
        <section class="blog-scene" class:hidden=move || scene() == Scene::Terminal>
            <div class="blog-list" class:hidden=move || scene() != Scene::BlogList>
                <h2 class="blog-heading">{move || t(Message::Posts)}</h2>
                <input
                    type="search"
                    class="post-search"
                    placeholder=move || t(Message::SearchPlaceholder)
                    prop:value=move || draft.get()
                    on:input=on_search
                />
                <ul class="post-list">{posts}</ul>
            </div>
            <div class="blog-post" class:hidden=move || scene() != Scene::BlogPost>
                {detail}
            </div>
        </section>
    }
}

fn post_item(post: PostSummary, href: String, on_tag: impl Fn(String) + Copy + 'static) -> View {
    let title = post.display_title().to_string();
    let tags = post
        .tags
        .into_iter()
        .map(|tag| {
            let label = format!("#{tag}");
            view! {
                <button
                    type="button"
                    class="post-tag"
                    on:click=move |ev| {
                        ev.prevent_default();
                        ev.stop_propagation();
                        on_tag(tag.clone());
                    }
                >
                    {label}
                </button>
            }
        })
        .collect_view();

    view! {
        <li class="post-item">
            <A href=href class="post-link">
                <span class="post-title">{title}</span>
                <span class="post-date">{post.date}</span>
            </A>
            <div class="post-tags">{tags}</div>
        </li>
    }
    .into_view()
}

#[cfg(test)]
mod tests {
    use blog_host::{
        HostServices, MemoryPostSource, NoopViewController, PulldownMarkdownRenderer, ShellConfig,
    };
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    fn summary(slug: &str, tags: &[&str]) -> PostSummary {
        PostSummary {
            slug: slug.to_string(),
            title: slug.to_uppercase(),
            date: "2024-01-02".to_string(),
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
        }
    }

    #[test]
    fn path_selects_theme() {
        assert_eq!(theme_for_path("/"), Theme::Terminal);
        assert_eq!(theme_for_path(""), Theme::Terminal);
        assert_eq!(theme_for_path("/posts"), Theme::Blog);
        assert_eq!(theme_for_path("/posts/"), Theme::Blog);
    }

    #[test]
    fn listing_links_filtered_posts_by_permalink() {
        let mut config = ShellConfig::default();
        config.language = Language::En;
        let source = MemoryPostSource::default();
        source.insert(Language::En, summary("hello", &["intro"]), "# Hello");
        source.insert(Language::En, summary("rust-notes", &["rust"]), "# Rust");
        let services = HostServices::new(
            Rc::new(source),
            Rc::new(PulldownMarkdownRenderer),
            Rc::new(NoopViewController),
        );
        let shell = ShellSession::new(config, services);
        block_on(shell.boot());

        shell.context().set_search_query("rust");
        let listing = post_listing(&shell);
        assert_eq!(listing.indexed, 2);
        assert_eq!(
            listing.entries,
            vec![(summary("rust-notes", &["rust"]), "/posts?=9629963".to_string())]
        );
    }
}
