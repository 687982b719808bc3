//! Localized user-facing strings.

use blog_shell_contract::{Language, Theme};

const BANNER: &str = r#" _     _
| |__ | | ___   __ _
| '_ \| |/ _ \ / _` |
| |_) | | (_) | (_| |
|_.__/|_|\___/ \__, |
               |___/"#;

const HELP_KR: &str = "사용 가능한 명령어:
 - ls [-al|-topic]\t: 게시물 목록
 - open <name|slug>\t: 게시물 보기 (보기 화면으로 전환)
 - theme <terminal|blog>\t: 테마 전환
 - translate <en|kr>\t: 언어 전환
 - clear\t\t: 화면 지우기
 - help\t\t: 도움말
파이프(|)로 연결: grep [-i] <패턴>, head [-n N], tail [-n N], sort, uniq, wc [-l], cut [-f N]";

const HELP_EN: &str = "Available commands:
 - ls [-al|-topic]\t: list posts
 - open <name|slug>\t: open a post (switches to reader)
 - theme <terminal|blog>\t: switch theme
 - translate <en|kr>\t: switch language
 - clear\t\t: clear console
 - help\t\t: help
Chain with pipes (|): grep [-i] <pattern>, head [-n N], tail [-n N], sort, uniq, wc [-l], cut [-f N]";

/// Localizable message keys; some carry arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message<'a> {
    /// Boot banner.
    Welcome,
    /// Command overview printed by `help`.
    Help,
    /// The post index is empty.
    NoPosts,
    /// A post file was opened.
    Opened(&'a str),
    /// A post could not be found or fetched.
    NotFound,
    /// Malformed command arguments.
    BadArg,
    /// The theme changed.
    ThemeSwitched(Theme),
    /// The language changed.
    LangSwitched(Language),
    /// Post list heading.
    Posts,
    /// Reader back button.
    Back,
    /// Post search placeholder.
    SearchPlaceholder,
    /// Post search matched nothing.
    NoResults,
}

/// Resolves `message` in `language`.
pub fn translate(language: Language, message: Message<'_>) -> String {
    match (language, message) {
        (_, Message::Welcome) => BANNER.to_string(),
        (Language::Kr, Message::Help) => HELP_KR.to_string(),
        (Language::En, Message::Help) => HELP_EN.to_string(),
        (Language::Kr, Message::NoPosts) => {
            "게시물이 없습니다. blog/ 폴더에 .md 파일과 manifest.json을 추가하세요.".to_string()
        }
        (Language::En, Message::NoPosts) => {
            "No posts found. Add .md files and manifest.json under blog/.".to_string()
        }
        (Language::Kr, Message::Opened(file)) => format!("'{file}' 파일을 열었습니다."),
        (Language::En, Message::Opened(file)) => format!("Opened '{file}'."),
        (Language::Kr, Message::NotFound) => "파일을 찾을 수 없습니다".to_string(),
        (Language::En, Message::NotFound) => "No such file".to_string(),
        (Language::Kr, Message::BadArg) => "인수 형식이 잘못되었습니다.".to_string(),
        (Language::En, Message::BadArg) => "Invalid arguments.".to_string(),
        (Language::Kr, Message::ThemeSwitched(theme)) => {
            format!("테마가 '{}'(으)로 전환되었습니다.", theme.as_str())
        }
        (Language::En, Message::ThemeSwitched(theme)) => {
            format!("Theme switched to '{}'.", theme.as_str())
        }
        (Language::Kr, Message::LangSwitched(lang)) => {
            format!("언어가 '{}'(으)로 전환되었습니다.", lang.code().to_uppercase())
        }
        (Language::En, Message::LangSwitched(lang)) => {
            format!("Language switched to '{}'.", lang.code().to_uppercase())
        }
        (Language::Kr, Message::Posts) => "게시물".to_string(),
        (Language::En, Message::Posts) => "Posts".to_string(),
        (Language::Kr, Message::Back) => "목록으로".to_string(),
        (Language::En, Message::Back) => "Back to list".to_string(),
        (Language::Kr, Message::SearchPlaceholder) => "제목이나 태그로 검색…".to_string(),
        (Language::En, Message::SearchPlaceholder) => "Search by title or tag…".to_string(),
        (Language::Kr, Message::NoResults) => "검색 결과가 없습니다.".to_string(),
        (Language::En, Message::NoResults) => "No results.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_arguments_per_language() {
        assert_eq!(
            translate(Language::En, Message::Opened("hello.md")),
            "Opened 'hello.md'."
        );
        assert_eq!(
            translate(Language::Kr, Message::LangSwitched(Language::Kr)),
            "언어가 'KR'(으)로 전환되었습니다."
        );
        assert_eq!(
            translate(Language::En, Message::ThemeSwitched(Theme::Blog)),
            "Theme switched to 'blog'."
        );
    }

    #[test]
    fn help_lists_every_builtin() {
        for language in [Language::En, Language::Kr] {
            let help = translate(language, Message::Help);
            for command in ["ls", "open", "theme", "translate", "clear", "grep", "cut"] {
                assert!(help.contains(command), "{command} missing from help");
            }
        }
    }
}
