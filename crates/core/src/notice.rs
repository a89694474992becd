//! Transient player-facing text.
//! Last message wins and stays visible for a fixed number of ticks.

use crate::content::MESSAGE_DURATION_TICKS;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageBoard {
    text: Option<String>,
    ticks_left: u32,
}

impl MessageBoard {
    pub fn show_message(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
        self.ticks_left = MESSAGE_DURATION_TICKS;
    }

    pub fn current(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Counts one tick down and clears the message once its time is up.
    pub fn advance(&mut self) {
        if self.text.is_none() {
            return;
        }
        self.ticks_left = self.ticks_left.saturating_sub(1);
        if self.ticks_left == 0 {
            self.text = None;
        }
    }
}
