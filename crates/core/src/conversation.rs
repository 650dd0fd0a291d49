use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// Ordered turn log, bounded to the last `max_history` user/assistant turns.
///
/// The system turn is special: inserted at most once, always first, and
/// exempt from trimming. Trimming runs after every append, so the log can
/// never exceed `max_history` non-system entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversationState {
    turns: Vec<Turn>,
    max_history: usize,
}

impl ConversationState {
    pub fn new(max_history: usize) -> Self {
        Self { turns: Vec::new(), max_history }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn max_history(&self) -> usize {
        self.max_history
    }

    pub fn non_system_len(&self) -> usize {
        self.turns.iter().filter(|turn| turn.role != Role::System).count()
    }

    pub fn has_system_turn(&self) -> bool {
        self.turns.iter().any(|turn| turn.role == Role::System)
    }

    /// Inserts the system turn if absent, otherwise replaces its content.
    /// The system turn always occupies position 0.
    pub fn set_system_prompt(&mut self, content: impl Into<String>) {
        let content = content.into();
        match self.turns.iter_mut().find(|turn| turn.role == Role::System) {
            Some(existing) => existing.content = content,
            None => self.turns.insert(0, Turn::system(content)),
        }
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::user(content));
        self.trim();
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::assistant(content));
        self.trim();
    }

    /// Drops the oldest non-system turns until the bound holds. The system
    /// turn keeps its slot regardless of how long the conversation runs.
    fn trim(&mut self) {
        let mut excess = self.non_system_len().saturating_sub(self.max_history);
        while excess > 0 {
            if let Some(index) = self.turns.iter().position(|turn| turn.role != Role::System) {
                self.turns.remove(index);
            }
            excess -= 1;
        }
    }

    /// Flattens the log into `role: content` lines, oldest first, skipping
    /// the system turn. Used for transcript interpolation and the
    /// generate-style providers that take a single prompt string.
    pub fn transcript(&self) -> String {
        let mut lines = Vec::with_capacity(self.turns.len());
        for turn in &self.turns {
            let label = match turn.role {
                Role::System => continue,
                Role::User => "user",
                Role::Assistant => "assistant",
            };
            lines.push(format!("{label}: {}", turn.content));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::{ConversationState, Role, Turn};

    #[test]
    fn history_never_exceeds_bound() {
        let mut state = ConversationState::new(5);
        for i in 0..20 {
            state.push_user(format!("question {i}"));
            state.push_assistant(format!("answer {i}"));
        }
        assert_eq!(state.non_system_len(), 5);
        assert_eq!(state.turns().last(), Some(&Turn::assistant("answer 19")));
    }

    #[test]
    fn system_turn_survives_trimming() {
        let mut state = ConversationState::new(3);
        state.set_system_prompt("you are a tile assistant");
        for i in 0..50 {
            state.push_user(format!("turn {i}"));
        }

        assert!(state.has_system_turn());
        assert_eq!(state.turns()[0].role, Role::System);
        assert_eq!(state.non_system_len(), 3);
    }

    #[test]
    fn system_prompt_insert_is_idempotent() {
        let mut state = ConversationState::new(5);
        state.push_user("hello");
        state.set_system_prompt("v1");
        state.set_system_prompt("v2");

        let system_turns =
            state.turns().iter().filter(|turn| turn.role == Role::System).count();
        assert_eq!(system_turns, 1);
        assert_eq!(state.turns()[0], Turn::system("v2"));
    }

    #[test]
    fn trim_drops_oldest_non_system_turns_first() {
        let mut state = ConversationState::new(2);
        state.set_system_prompt("system");
        state.push_user("first");
        state.push_assistant("second");
        state.push_user("third");

        let contents: Vec<&str> =
            state.turns().iter().map(|turn| turn.content.as_str()).collect();
        assert_eq!(contents, vec!["system", "second", "third"]);
    }

    #[test]
    fn transcript_skips_system_turn() {
        let mut state = ConversationState::new(5);
        state.set_system_prompt("system");
        state.push_user("hello");
        state.push_assistant("hi there");

        assert_eq!(state.transcript(), "user: hello\nassistant: hi there");
    }
}
