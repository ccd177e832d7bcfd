//! Translation of host pointer events into selector calls.

use crate::indicator::Indicator;
use crate::selector::RectangleSelector;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Pointer event in surface coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
    },
    /// The pointer was lost without a release, e.g. on focus loss.
    Cancel,
}

/// Routes pointer events to a [`RectangleSelector`].
#[derive(Debug, Clone)]
pub struct SelectionInput {
    /// Button that drives the selection.
    pub primary_button: MouseButton,
    /// Finish an active drag on [`PointerEvent::Cancel`].
    pub end_on_abandon: bool,
    /// Last known pointer position, unset until the host reports one.
    pointer_position: Option<Point>,
}

impl Default for SelectionInput {
    fn default() -> Self {
        Self {
            primary_button: MouseButton::Left,
            end_on_abandon: true,
            pointer_position: None,
        }
    }
}

impl SelectionInput {
    /// Create an input router driven by the left button.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether a cancelled pointer finishes an active drag.
    pub fn with_end_on_abandon(mut self, end_on_abandon: bool) -> Self {
        self.end_on_abandon = end_on_abandon;
        self
    }

    /// Last known pointer position.
    pub fn pointer_position(&self) -> Option<Point> {
        self.pointer_position
    }

    /// Build a press or release event at the last known pointer position.
    ///
    /// For hosts whose button events carry no position. Returns `None` until
    /// a position has been seen, so a press never anchors at a made-up point.
    pub fn button_event(&self, button: MouseButton, pressed: bool) -> Option<PointerEvent> {
        let Some(position) = self.pointer_position else {
            log::trace!("Ignoring {:?} button event before any pointer position", button);
            return None;
        };
        Some(if pressed {
            PointerEvent::Down { position, button }
        } else {
            PointerEvent::Up { position, button }
        })
    }

    /// Forward one event to the selector.
    pub fn handle_pointer_event<I: Indicator>(
        &mut self,
        event: PointerEvent,
        selector: &mut RectangleSelector<I>,
    ) {
        match event {
            PointerEvent::Down { position, button } => {
                self.pointer_position = Some(position);
                if button == self.primary_button {
                    selector.start(position.x, position.y);
                }
            }
            PointerEvent::Up { position, button } => {
                self.pointer_position = Some(position);
                if button == self.primary_button {
                    selector.end();
                }
            }
            PointerEvent::Move { position } => {
                self.pointer_position = Some(position);
                selector.move_to(position.x, position.y);
            }
            PointerEvent::Cancel => {
                if !selector.is_active() {
                    return;
                }
                if self.end_on_abandon {
                    log::debug!("Pointer lost during drag, finishing selection");
                    selector.end();
                } else {
                    log::warn!("Pointer lost during drag; waiting for the host to release");
                }
            }
        }
    }
}
