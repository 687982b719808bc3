//! Tab completion: candidate lookup, shared-prefix insertion, suggestion listing, and cycling.
//!
//! A gesture is either *fresh* or a *repeat*. A repeat is a gesture made while cycling is armed
//! and the input still equals what the previous gesture produced; it recomputes candidates on the
//! remembered base text and, when the set has not changed size, steps through them however long
//! the pause was. Anything else is fresh:
//!
//! * no candidates: nothing happens and the state resets,
//! * one candidate: it is inserted (with a trailing space when nothing follows) and the state
//!   resets,
//! * several candidates: cycling arms. A longer shared prefix is inserted; without one the
//!   candidates are listed when the previous gesture falls inside the suggestion window.
//!
//! Timing only decides listing: a quick repeat after a fresh gesture that listed nothing lists
//! the candidates once instead of stepping.

use blog_shell_contract::{CompletionCandidates, CompletionDirection};
use shell_line_headless::{
    byte_offset, longest_common_prefix, starts_with_ignore_case, CompletionContext,
};

use crate::{commands::locale_compare, registry::CommandRegistry, session::SessionContext};

/// Computes completion candidates for the fragment left of `caret` (in characters).
pub fn compute_candidates(
    registry: &CommandRegistry,
    session: &SessionContext,
    text: &str,
    caret: usize,
) -> CompletionCandidates {
    let context = CompletionContext::locate(text, caret);
    let pool = if context.completes_command {
        registry.names()
    } else {
        context
            .command
            .as_deref()
            .map(|command| registry.options_for(command, session))
            .unwrap_or_default()
    };

    let mut candidates: Vec<String> = pool
        .into_iter()
        .filter(|candidate| starts_with_ignore_case(candidate, &context.fragment))
        .collect();
    candidates.sort_by(|left, right| locale_compare(left, right));
    candidates.dedup();

    CompletionCandidates {
        candidates,
        fragment: context.fragment,
        replace_start: context.replace_start,
    }
}

/// What a completion gesture did to the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// No candidate matched.
    NoCandidates,
    /// Several candidates matched without a longer shared prefix; nothing visible changed.
    Pending,
    /// Candidates should be listed under the prompt.
    Suggested(Vec<String>),
    /// Text was inserted (sole candidate or shared prefix).
    Inserted {
        /// New input text.
        text: String,
        /// New caret offset in characters.
        caret: usize,
    },
    /// A cycling step replaced the fragment with the next candidate.
    Cycled {
        /// New input text.
        text: String,
        /// New caret offset in characters.
        caret: usize,
    },
}

/// Completion memory carried between gestures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionState {
    base_text: String,
    base_caret: usize,
    candidates: Vec<String>,
    index: Option<usize>,
    applied_text: Option<String>,
    last_gesture_ms: Option<u64>,
    armed: bool,
    list_on_repeat: bool,
}

impl CompletionState {
    /// Forgets everything, including the previous gesture time.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether the next gesture on unchanged input counts as a repeat.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Handles one completion gesture on `text` with the caret at `caret`.
    ///
    /// `compute` yields candidates for a text and caret; it is called on the remembered base text
    /// for repeat gestures and on the current text for fresh ones.
    pub fn gesture(
        &mut self,
        text: &str,
        caret: usize,
        direction: CompletionDirection,
        now_ms: u64,
        suggestion_window_ms: u64,
        compute: impl Fn(&str, usize) -> CompletionCandidates,
    ) -> CompletionOutcome {
        let within_window = self
            .last_gesture_ms
            .is_some_and(|last| now_ms.saturating_sub(last) < suggestion_window_ms);

        if self.armed && self.applied_text.as_deref() == Some(text) {
            let found = compute(&self.base_text, self.base_caret);
            if !found.candidates.is_empty() && found.candidates.len() == self.candidates.len() {
                if self.list_on_repeat && within_window {
                    self.list_on_repeat = false;
                    self.last_gesture_ms = Some(now_ms);
                    return CompletionOutcome::Suggested(found.candidates);
                }
                return self.cycle(found, direction, now_ms);
            }
        }

        let found = compute(text, caret);
        match found.candidates.len() {
            0 => {
                self.reset();
                CompletionOutcome::NoCandidates
            }
            1 => {
                let (mut next_text, mut next_caret) =
                    splice(text, found.replace_start, &found.fragment, &found.candidates[0]);
                let follows = next_text[byte_offset(&next_text, next_caret)..].chars().next();
                if follows.map_or(true, |ch| !ch.is_whitespace()) {
                    next_text.insert(byte_offset(&next_text, next_caret), ' ');
                    next_caret += 1;
                }
                self.reset();
                CompletionOutcome::Inserted {
                    text: next_text,
                    caret: next_caret,
                }
            }
            _ => {
                let prefix = longest_common_prefix(&found.candidates);
                if prefix.chars().count() > found.fragment.chars().count() {
                    let (next_text, next_caret) =
                        splice(text, found.replace_start, &found.fragment, &prefix);
                    self.remember(&next_text, next_caret, found.candidates, now_ms, false);
                    return CompletionOutcome::Inserted {
                        text: next_text,
                        caret: next_caret,
                    };
                }

                let candidates = found.candidates;
                self.remember(text, caret, candidates.clone(), now_ms, !within_window);
                if within_window {
                    CompletionOutcome::Suggested(candidates)
                } else {
                    CompletionOutcome::Pending
                }
            }
        }
    }

    fn cycle(
        &mut self,
        found: CompletionCandidates,
        direction: CompletionDirection,
        now_ms: u64,
    ) -> CompletionOutcome {
        let count = found.candidates.len();
        let index = match (self.index, direction) {
            (None, CompletionDirection::Forward) => 0,
            (None, CompletionDirection::Backward) => count - 1,
            (Some(index), CompletionDirection::Forward) => (index + 1) % count,
            (Some(index), CompletionDirection::Backward) => (index + count - 1) % count,
        };
        let (text, caret) = splice(
            &self.base_text,
            found.replace_start,
            &found.fragment,
            &found.candidates[index],
        );
        self.index = Some(index);
        self.list_on_repeat = false;
        self.candidates = found.candidates;
        self.applied_text = Some(text.clone());
        self.last_gesture_ms = Some(now_ms);
        CompletionOutcome::Cycled { text, caret }
    }

    fn remember(
        &mut self,
        base_text: &str,
        base_caret: usize,
        candidates: Vec<String>,
        now_ms: u64,
        list_on_repeat: bool,
    ) {
        *self = Self {
            base_text: base_text.to_string(),
            base_caret,
            candidates,
            index: None,
            applied_text: Some(base_text.to_string()),
            last_gesture_ms: Some(now_ms),
            armed: true,
            list_on_repeat,
        };
    }
}

/// Replaces `fragment` starting at character `start` with `replacement`.
fn splice(text: &str, start: usize, fragment: &str, replacement: &str) -> (String, usize) {
    let from = byte_offset(text, start);
    let to = byte_offset(text, start + fragment.chars().count());
    let mut out = String::with_capacity(text.len() + replacement.len());
    out.push_str(&text[..from]);
    out.push_str(replacement);
    out.push_str(&text[to..]);
    (out, start + replacement.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool_compute(pool: &'static [&'static str]) -> impl Fn(&str, usize) -> CompletionCandidates {
        move |text: &str, caret: usize| {
            let context = CompletionContext::locate(text, caret);
            let mut candidates: Vec<String> = pool
                .iter()
                .filter(|item| starts_with_ignore_case(item, &context.fragment))
                .map(|item| item.to_string())
                .collect();
            candidates.sort();
            CompletionCandidates {
                candidates,
                fragment: context.fragment,
                replace_start: context.replace_start,
            }
        }
    }

    #[test]
    fn splice_replaces_fragment_only() {
        assert_eq!(splice("ls -a | wc", 3, "-a", "-al"), ("ls -al | wc".to_string(), 6));
        assert_eq!(splice("open 한", 5, "한", "한글.md"), ("open 한글.md".to_string(), 10));
    }

    #[test]
    fn sole_candidate_adds_space_only_when_needed() {
        let mut state = CompletionState::default();
        let compute = pool_compute(&["open"]);
        let outcome = state.gesture("op", 2, CompletionDirection::Forward, 0, 600, &compute);
        assert_eq!(
            outcome,
            CompletionOutcome::Inserted {
                text: "open ".to_string(),
                caret: 5
            }
        );

        let outcome = state.gesture("op x", 2, CompletionDirection::Forward, 0, 600, &compute);
        assert_eq!(
            outcome,
            CompletionOutcome::Inserted {
                text: "open x".to_string(),
                caret: 4
            }
        );
        assert!(!state.is_armed());
    }

    #[test]
    fn shared_prefix_is_inserted_then_cycled() {
        let mut state = CompletionState::default();
        let compute = pool_compute(&["rust-async", "rust-borrow"]);
        let outcome = state.gesture("r", 1, CompletionDirection::Forward, 0, 600, &compute);
        assert_eq!(
            outcome,
            CompletionOutcome::Inserted {
                text: "rust-".to_string(),
                caret: 5
            }
        );
        assert!(state.is_armed());

        let outcome = state.gesture("rust-", 5, CompletionDirection::Forward, 5000, 600, &compute);
        assert_eq!(
            outcome,
            CompletionOutcome::Cycled {
                text: "rust-async".to_string(),
                caret: 10
            }
        );
    }

    #[test]
    fn slow_repeats_cycle_without_listing() {
        let mut state = CompletionState::default();
        let compute = pool_compute(&["head", "help"]);
        assert_eq!(
            state.gesture("he", 2, CompletionDirection::Forward, 1000, 600, &compute),
            CompletionOutcome::Pending
        );
        assert!(state.is_armed());

        let mut text = "he".to_string();
        let mut seen = Vec::new();
        for now in [3000, 5000, 7000] {
            match state.gesture(&text, 2, CompletionDirection::Forward, now, 600, &compute) {
                CompletionOutcome::Cycled { text: next, .. } => {
                    seen.push(next.clone());
                    text = next;
                }
                other => panic!("expected a cycling step, got {other:?}"),
            }
        }
        assert_eq!(seen, vec!["head", "help", "head"]);
    }

    #[test]
    fn quick_repeat_lists_once_then_cycles() {
        let mut state = CompletionState::default();
        let compute = pool_compute(&["head", "help"]);
        state.gesture("he", 2, CompletionDirection::Forward, 1000, 600, &compute);
        assert_eq!(
            state.gesture("he", 2, CompletionDirection::Forward, 1100, 600, &compute),
            CompletionOutcome::Suggested(vec!["head".to_string(), "help".to_string()])
        );
        assert_eq!(
            state.gesture("he", 2, CompletionDirection::Forward, 1150, 600, &compute),
            CompletionOutcome::Cycled {
                text: "head".to_string(),
                caret: 4
            }
        );
    }

    #[test]
    fn backward_cycling_starts_from_the_end() {
        let mut state = CompletionState::default();
        let compute = pool_compute(&["head", "help"]);
        state.gesture("he", 2, CompletionDirection::Forward, 0, 600, &compute);
        state.gesture("he", 2, CompletionDirection::Forward, 10, 600, &compute);
        assert_eq!(
            state.gesture("he", 2, CompletionDirection::Backward, 20, 600, &compute),
            CompletionOutcome::Cycled {
                text: "help".to_string(),
                caret: 4
            }
        );
    }

    #[test]
    fn editing_after_cycling_starts_fresh() {
        let mut state = CompletionState::default();
        let compute = pool_compute(&["head", "help"]);
        state.gesture("he", 2, CompletionDirection::Forward, 0, 600, &compute);
        state.gesture("he", 2, CompletionDirection::Forward, 10, 600, &compute);
        state.gesture("he", 2, CompletionDirection::Forward, 20, 600, &compute);
        assert_eq!(
            state.gesture("hel", 3, CompletionDirection::Forward, 30, 600, &compute),
            CompletionOutcome::Inserted {
                text: "help ".to_string(),
                caret: 5
            }
        );
    }

    #[test]
    fn no_candidates_resets() {
        let mut state = CompletionState::default();
        let compute = pool_compute(&["help"]);
        assert_eq!(
            state.gesture("zz", 2, CompletionDirection::Forward, 0, 600, &compute),
            CompletionOutcome::NoCandidates
        );
        assert_eq!(state, CompletionState::default());
    }
}
