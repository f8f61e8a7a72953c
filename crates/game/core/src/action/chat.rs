use crate::action::{ActionError, ActionKind, ActionTransition, require_logged_in};
use crate::env::Env;
use crate::state::GameState;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatAction {
    pub text: String,
}

impl ChatAction {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl ActionTransition for ChatAction {
    type Result = ();

    fn kind(&self) -> ActionKind {
        ActionKind::Chat
    }

    fn pre_validate(&self, state: &GameState, _env: &Env<'_>) -> Result<(), ActionError> {
        require_logged_in(state)?;
        if self.text.trim().is_empty() {
            return Err(ActionError::EmptyMessage);
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &mut Env<'_>) -> Result<(), ActionError> {
        let line = format!("[{}]: {}", state.player.name, self.text.trim());
        state.messages.push(line);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::test_support::Harness;
    use crate::state::Mode;

    #[test]
    fn chat_is_trimmed_and_attributed() {
        let mut h = Harness::new(Mode::World);
        h.state.player.name = "ada".into();

        h.run(&ChatAction::new("  hello there \n")).unwrap();

        assert_eq!(h.state.messages.last(), Some("[ada]: hello there"));
    }

    #[test]
    fn blank_chat_is_dropped() {
        let mut h = Harness::new(Mode::World);
        let before = h.state.messages.len();

        assert_eq!(h.run(&ChatAction::new("   ")), Err(ActionError::EmptyMessage));
        assert_eq!(h.state.messages.len(), before);
    }
}
