//! Corner-hit counter overlay
//!
//! Text is only rebuilt when the count or visibility changes, so the host
//! can touch the DOM only when something is actually different.

/// Counter label shown on screen
pub fn counter_label(corner_hits: u32) -> String {
    match corner_hits {
        1 => "1 corner hit".to_string(),
        n => format!("{} corner hits", n),
    }
}

/// What the host should do with the counter element this frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HudUpdate {
    /// Show the element with new text
    Show(String),
    /// Hide the element
    Hide,
}

/// Tracks what is currently on screen
#[derive(Debug, Clone, Default)]
pub struct HudCounter {
    shown: Option<u32>,
    hidden: bool,
}

impl HudCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an update only when the visible state must change
    pub fn update(&mut self, corner_hits: u32, visible: bool) -> Option<HudUpdate> {
        if !visible {
            if self.hidden {
                return None;
            }
            self.hidden = true;
            self.shown = None;
            return Some(HudUpdate::Hide);
        }

        if !self.hidden && self.shown == Some(corner_hits) {
            return None;
        }
        self.hidden = false;
        self.shown = Some(corner_hits);
        Some(HudUpdate::Show(counter_label(corner_hits)))
    }
}
