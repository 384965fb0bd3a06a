//! Turn-change notification.
//!
//! Listeners are told that the game moved on and re-query it through the
//! shared reference they are handed; they cannot mutate it.

use crate::game::Game;

/// Receives a callback after every successful start, move, and pass.
pub trait TurnListener {
    fn turn_changed(&self, game: &Game);
}

/// Closures can be registered directly.
impl<F> TurnListener for F
where
    F: Fn(&Game),
{
    fn turn_changed(&self, game: &Game) {
        self(game)
    }
}

/// Listeners in registration order.
#[derive(Default)]
pub struct Listeners {
    inner: Vec<Box<dyn TurnListener>>,
}

impl Listeners {
    pub fn push(&mut self, listener: Box<dyn TurnListener>) {
        self.inner.push(listener);
    }

    pub(crate) fn notify(&self, game: &Game) {
        for listener in &self.inner {
            listener.turn_changed(game);
        }
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.inner.len())
            .finish()
    }
}
