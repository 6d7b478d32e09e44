use super::message::ChatTurn;

/// Transcript plus the in-flight flag.
///
/// Only [`TurnController`](super::controller::TurnController) holds this
/// mutably; renderers get a shared reference.
#[derive(Debug, Default)]
pub struct ConversationState {
    turns: Vec<ChatTurn>,
    busy: bool,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn last_assistant_turn(&self) -> Option<&ChatTurn> {
        self.turns.iter().rev().find(|turn| turn.is_assistant())
    }

    pub(crate) fn push(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
    }

    pub(crate) fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    pub(crate) fn clear(&mut self) {
        self.turns.clear();
    }
}
