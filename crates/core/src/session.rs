use uuid::Uuid;

use crate::conversation::ConversationState;
use crate::language::Persona;

/// Conversational slots filled by the extractor. Values persist for the
/// life of one session; a pass that finds no match leaves the previous
/// value in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotValues {
    pub item_name: String,
    pub size: String,
    pub quantity: u32,
}

impl Default for SlotValues {
    fn default() -> Self {
        Self { item_name: "Unknown Tile".to_string(), size: "15x20".to_string(), quantity: 6 }
    }
}

/// Everything mutable that belongs to one chat session. Passing this
/// explicitly (instead of the globals the flow was first sketched with)
/// keeps concurrent sessions from corrupting each other's slots and
/// history.
#[derive(Clone, Debug)]
pub struct SessionContext {
    pub id: Uuid,
    pub persona: Persona,
    pub slots: SlotValues,
    pub conversation: ConversationState,
}

impl SessionContext {
    pub fn new(persona: Persona, max_history: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            persona,
            slots: SlotValues::default(),
            conversation: ConversationState::new(max_history),
        }
    }
}
