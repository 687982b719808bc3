//! Headless command-line parsing for the terminal blog shell.
//!
//! This crate intentionally implements only the small subset needed by the page terminal:
//! pipe splitting, command/argument separation, locating the completion fragment under the
//! caret, and a few option helpers. There is no quoting, escaping, or variable expansion.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// One `command args...` segment of a pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    /// Command token, matched case-sensitively against the registry.
    pub command: String,
    /// Remaining tokens joined by single spaces.
    pub args: String,
}

impl Stage {
    /// Splits a trimmed stage into its command token and argument string.
    ///
    /// Returns `None` when the stage holds no tokens.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut tokens = raw.split_whitespace();
        let command = tokens.next()?.to_string();
        let args = tokens.collect::<Vec<_>>().join(" ");
        Some(Self { command, args })
    }
}

/// Parsed command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCommandLine {
    /// Non-empty stages in input order.
    pub stages: Vec<Stage>,
}

impl ParsedCommandLine {
    /// Whether the line has anything to run.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Whether the line carries an explicit stream between stages.
    pub fn is_pipeline(&self) -> bool {
        self.stages.len() > 1
    }
}

/// Splits `line` on `|`, trims each part, and drops empty parts.
pub fn parse_command_line(line: &str) -> ParsedCommandLine {
    ParsedCommandLine {
        stages: line
            .split('|')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .filter_map(Stage::parse)
            .collect(),
    }
}

/// What the caret is completing inside the current pipeline stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionContext {
    /// Partially typed token (empty right after whitespace).
    pub fragment: String,
    /// Character offset of the fragment in the full input.
    pub replace_start: usize,
    /// First token of the stage, if any.
    pub command: Option<String>,
    /// Whether the fragment is the command name itself.
    pub completes_command: bool,
}

impl CompletionContext {
    /// Inspects `text` up to the character offset `caret`.
    pub fn locate(text: &str, caret: usize) -> Self {
        let before: String = text.chars().take(caret).collect();
        let stage_start = before.rfind('|').map(|idx| idx + 1).unwrap_or(0);
        let stage = &before[stage_start..];
        let stage_offset = before[..stage_start].chars().count();

        let at_boundary = stage.chars().last().is_some_and(char::is_whitespace);
        let tokens: Vec<&str> = stage.split_whitespace().collect();
        let fragment = if at_boundary {
            String::new()
        } else {
            tokens.last().map(|token| token.to_string()).unwrap_or_default()
        };
        let completes_command = tokens.len() <= 1 && !at_boundary;

        Self {
            replace_start: stage_offset + stage.chars().count() - fragment.chars().count(),
            command: tokens.first().map(|token| token.to_string()),
            completes_command,
            fragment,
        }
    }
}

/// Longest prefix shared by every item, compared case-insensitively.
///
/// The returned prefix keeps the casing of the first item.
pub fn longest_common_prefix(items: &[String]) -> String {
    let Some((first, rest)) = items.split_first() else {
        return String::new();
    };
    let mut end = first.chars().count();
    for item in rest {
        let shared = first
            .chars()
            .zip(item.chars())
            .take(end)
            .take_while(|(left, right)| left.to_lowercase().eq(right.to_lowercase()))
            .count();
        end = shared;
        if end == 0 {
            return String::new();
        }
    }
    first.chars().take(end).collect()
}

/// Case-insensitive `starts_with`.
pub fn starts_with_ignore_case(candidate: &str, prefix: &str) -> bool {
    candidate.to_lowercase().starts_with(&prefix.to_lowercase())
}

/// Reads the unsigned integer following `flag` (for example `-n 5`).
///
/// Only a separate all-digit token is recognized; signs and other text yield `None` so callers
/// fall back to their defaults. Values too large for `usize` saturate.
pub fn option_number(args: &str, flag: &str) -> Option<usize> {
    let tokens: Vec<&str> = args.split_whitespace().collect();
    tokens.windows(2).find_map(|pair| {
        if pair[0] != flag || pair[1].is_empty() || !pair[1].bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(pair[1].parse::<usize>().unwrap_or(usize::MAX))
    })
}

/// Whether `flag` appears as its own token in `args`.
pub fn has_flag(args: &str, flag: &str) -> bool {
    args.split_whitespace().any(|token| token == flag)
}

/// Converts a character offset into a byte offset, clamping to the end of `text`.
pub fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len())
}

/// Escapes `&`, `<`, and `>` so text can be placed inside markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    #[test]
    fn splits_pipeline_and_drops_empty_stages() {
        let parsed = parse_command_line(" ls -al ||  grep   foo  bar | ");
        assert!(parsed.is_pipeline());
        assert_eq!(
            parsed.stages,
            vec![
                Stage {
                    command: "ls".to_string(),
                    args: "-al".to_string()
                },
                Stage {
                    command: "grep".to_string(),
                    args: "foo bar".to_string()
                },
            ]
        );
    }

    #[test]
    fn blank_line_has_no_stages() {
        assert!(parse_command_line("  |  | ").is_empty());
        assert!(!parse_command_line("help").is_pipeline());
    }

    #[test]
    fn locates_command_fragment() {
        let context = CompletionContext::locate("op", 2);
        assert!(context.completes_command);
        assert_eq!(context.fragment, "op");
        assert_eq!(context.replace_start, 0);
    }

    #[test]
    fn boundary_switches_to_options() {
        let context = CompletionContext::locate("ls ", 3);
        assert!(!context.completes_command);
        assert_eq!(context.fragment, "");
        assert_eq!(context.replace_start, 3);
        assert_eq!(context.command.as_deref(), Some("ls"));
    }

    #[test]
    fn locates_fragment_inside_later_stage() {
        let context = CompletionContext::locate("ls | grep -", 11);
        assert_eq!(context.command.as_deref(), Some("grep"));
        assert_eq!(context.fragment, "-");
        assert_eq!(context.replace_start, 10);

        let context = CompletionContext::locate("ls | he", 7);
        assert!(context.completes_command);
        assert_eq!(context.replace_start, 5);
    }

    #[test]
    fn caret_in_middle_ignores_trailing_text() {
        let context = CompletionContext::locate("open abc | wc", 6);
        assert_eq!(context.fragment, "a");
        assert_eq!(context.replace_start, 5);
    }

    #[test]
    fn multibyte_offsets_are_counted_in_chars() {
        let context = CompletionContext::locate("open 한글", 7);
        assert_eq!(context.fragment, "한글");
        assert_eq!(context.replace_start, 5);
        assert_eq!(byte_offset("한글", 1), 3);
        assert_eq!(byte_offset("한글", 9), 6);
    }

    #[test]
    fn common_prefix_is_case_insensitive() {
        assert_eq!(longest_common_prefix(&strings(&["Readme.md", "readme-2.md"])), "Readme");
        assert_eq!(longest_common_prefix(&strings(&["-al", "-topic"])), "-");
        assert_eq!(longest_common_prefix(&strings(&["abc", "xyz"])), "");
        assert_eq!(longest_common_prefix(&[]), "");
    }

    #[test]
    fn option_number_accepts_only_digits() {
        assert_eq!(option_number("-n 3", "-n"), Some(3));
        assert_eq!(option_number("-n -3", "-n"), None);
        assert_eq!(option_number("-n abc", "-n"), None);
        assert_eq!(option_number("", "-n"), None);
        assert_eq!(option_number("-f 2", "-f"), Some(2));
    }

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape_html("<a href=\"x\">&</a>"), "&lt;a href=\"x\"&gt;&amp;&lt;/a&gt;");
    }
}
