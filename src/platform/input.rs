//! Keyboard / pointer mapping to game actions

/// The only in-round action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Flap,
}

/// Map a `KeyboardEvent.code` to an action
pub fn action_for_key(code: &str) -> Option<InputAction> {
    match code {
        "Space" | "ArrowUp" => Some(InputAction::Flap),
        _ => None,
    }
}
