//! Rectangle selection state machine.
//!
//! A press starts a drag session anchored at the press point, each move
//! re-normalizes the box spanned by the anchor and the pointer, and the
//! release hands the final box to the selection callback. Moves outside a
//! drag are ignored. The selector can be reused for any number of drags.

use crate::config::{ReleasePolicy, SelectorConfig};
use crate::geometry::{BoundingBox, PointerPosition, compute_box};
use crate::indicator::{Indicator, IndicatorState, collapsed_at};
use crate::style::SelectionStyle;
use kurbo::Point;
use std::fmt;

/// Callback receiving the final box of each completed drag.
pub type SelectionCallback = Box<dyn FnMut(BoundingBox)>;

/// Drag state of a selector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragSession {
    /// No drag in progress.
    #[default]
    Idle,
    /// Pointer is held down.
    Dragging {
        /// Press position; one fixed corner of the box.
        anchor: PointerPosition,
        /// Box spanned by the anchor and the latest pointer position.
        bbox: BoundingBox,
    },
}

impl DragSession {
    /// Returns `true` while a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragSession::Dragging { .. })
    }
}

/// Interactive press-drag-release rectangle selector.
pub struct RectangleSelector<I: Indicator = IndicatorState> {
    session: DragSession,
    /// Box of the current or most recent drag. `None` until the first press.
    last_box: Option<BoundingBox>,
    indicator: I,
    on_select: SelectionCallback,
    release_policy: ReleasePolicy,
}

impl<I: Indicator> RectangleSelector<I> {
    /// Create a selector with the default release policy.
    ///
    /// The style is applied to the indicator here and never again.
    pub fn new(
        indicator: I,
        style: &SelectionStyle,
        on_select: impl FnMut(BoundingBox) + 'static,
    ) -> Self {
        Self::build(indicator, style, ReleasePolicy::default(), Box::new(on_select))
    }

    /// Create a selector from a full configuration.
    pub fn with_config(
        indicator: I,
        config: &SelectorConfig,
        on_select: impl FnMut(BoundingBox) + 'static,
    ) -> Self {
        Self::build(
            indicator,
            &config.style,
            config.release_policy,
            Box::new(on_select),
        )
    }

    fn build(
        mut indicator: I,
        style: &SelectionStyle,
        release_policy: ReleasePolicy,
        on_select: SelectionCallback,
    ) -> Self {
        indicator.apply_style(style);
        indicator.set_visible(false);
        Self {
            session: DragSession::Idle,
            last_box: None,
            indicator,
            on_select,
            release_policy,
        }
    }

    /// Begin a drag at the press point. Restarts any drag already in progress.
    pub fn start(&mut self, x: f64, y: f64) {
        let anchor = Point::new(x, y);
        let bbox = BoundingBox::seed(anchor);
        self.session = DragSession::Dragging { anchor, bbox };
        self.last_box = Some(bbox);

        self.indicator.set_frame(collapsed_at(anchor));
        self.indicator.set_visible(true);
        log::debug!("Selection started at ({}, {})", x, y);
    }

    /// Track the pointer during a drag. Does nothing outside a drag.
    pub fn move_to(&mut self, x: f64, y: f64) {
        let DragSession::Dragging { anchor, bbox } = &mut self.session else {
            log::trace!("Ignoring move to ({}, {}) outside a drag", x, y);
            return;
        };
        *bbox = compute_box(*anchor, Point::new(x, y));
        let bbox = *bbox;
        self.last_box = Some(bbox);

        self.indicator.set_frame(bbox.to_rect());
        log::trace!("Selection box {:?}", bbox);
    }

    /// Finish the drag and report the final box.
    ///
    /// The callback fires once, before this returns. A release while idle
    /// follows the configured [`ReleasePolicy`].
    pub fn end(&mut self) {
        let bbox = match std::mem::take(&mut self.session) {
            DragSession::Dragging { bbox, .. } => bbox,
            DragSession::Idle => match (self.release_policy, self.last_box) {
                (ReleasePolicy::ReplayLastBox, Some(bbox)) => {
                    log::debug!("Release while idle, replaying last box");
                    bbox
                }
                _ => {
                    log::trace!("Ignoring release outside a drag");
                    return;
                }
            },
        };

        self.indicator.set_visible(false);
        self.indicator.set_frame(collapsed_at(bbox.to_rect().origin()));
        log::debug!("Selection finished: {:?}", bbox);
        (self.on_select)(bbox);
    }

    /// Returns `true` between a press and its release.
    pub fn is_active(&self) -> bool {
        self.session.is_dragging()
    }

    /// Current drag state.
    pub fn session(&self) -> &DragSession {
        &self.session
    }

    /// Box of the current or most recent drag, `None` before the first press.
    pub fn current_box(&self) -> Option<BoundingBox> {
        self.last_box
    }

    /// The indicator being driven.
    pub fn indicator(&self) -> &I {
        &self.indicator
    }

    /// Configured release policy.
    pub fn release_policy(&self) -> ReleasePolicy {
        self.release_policy
    }
}

impl<I: Indicator + fmt::Debug> fmt::Debug for RectangleSelector<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RectangleSelector")
            .field("session", &self.session)
            .field("last_box", &self.last_box)
            .field("indicator", &self.indicator)
            .field("release_policy", &self.release_policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::SerializableColor;
    use kurbo::Rect;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Reported = Rc<RefCell<Vec<BoundingBox>>>;

    fn selector() -> (RectangleSelector, Reported) {
        selector_with(SelectorConfig::default())
    }

    fn selector_with(config: SelectorConfig) -> (RectangleSelector, Reported) {
        let reported: Reported = Rc::default();
        let sink = reported.clone();
        let selector = RectangleSelector::with_config(IndicatorState::new(), &config, move |bbox| {
            sink.borrow_mut().push(bbox)
        });
        (selector, reported)
    }

    #[test]
    fn test_new_selector_is_idle() {
        let (selector, reported) = selector();
        assert!(!selector.is_active());
        assert_eq!(selector.session(), &DragSession::Idle);
        assert_eq!(selector.current_box(), None);
        assert!(!selector.indicator().visible);
        assert!(reported.borrow().is_empty());
    }

    #[test]
    fn test_style_applied_at_construction() {
        let style = SelectionStyle {
            stroke: SerializableColor::new(0, 0, 0, 255),
            stroke_width: 3.0,
            ..Default::default()
        };
        let selector = RectangleSelector::new(IndicatorState::new(), &style, |_| {});
        assert_eq!(selector.indicator().style, style);
        assert_eq!(selector.release_policy(), ReleasePolicy::IgnoreWhenIdle);
    }

    #[test]
    fn test_drag_down_left() {
        let (mut selector, reported) = selector();
        selector.start(100.0, 50.0);
        selector.move_to(40.0, 150.0);
        selector.end();

        assert_eq!(
            reported.borrow().as_slice(),
            &[BoundingBox::new(40.0, 150.0, 60.0, 100.0)]
        );
        assert!(!selector.is_active());
    }

    #[test]
    fn test_zero_size_drag() {
        let (mut selector, reported) = selector();
        selector.start(20.0, 20.0);
        selector.move_to(20.0, 20.0);
        selector.end();

        assert_eq!(
            reported.borrow().as_slice(),
            &[BoundingBox::new(20.0, 20.0, 0.0, 0.0)]
        );
    }

    #[test]
    fn test_last_move_wins() {
        let (mut selector, reported) = selector();
        selector.start(0.0, 0.0);
        selector.move_to(10.0, 10.0);
        selector.move_to(5.0, 5.0);
        selector.end();

        assert_eq!(
            reported.borrow().as_slice(),
            &[BoundingBox::new(0.0, 5.0, 5.0, 5.0)]
        );
    }

    #[test]
    fn test_reversed_drag_gives_same_box() {
        let (mut selector, reported) = selector();
        selector.start(10.0, 10.0);
        selector.move_to(50.0, 80.0);
        selector.end();
        selector.start(50.0, 80.0);
        selector.move_to(10.0, 10.0);
        selector.end();

        let reported = reported.borrow();
        assert_eq!(reported.len(), 2);
        assert_eq!(reported[0], reported[1]);
        assert_eq!(reported[0], BoundingBox::new(10.0, 80.0, 40.0, 70.0));
    }

    #[test]
    fn test_box_non_negative_while_dragging() {
        let (mut selector, _) = selector();
        selector.start(50.0, 50.0);
        for (x, y) in [(0.0, 0.0), (100.0, 0.0), (0.0, 100.0), (100.0, 100.0), (50.0, 50.0)] {
            selector.move_to(x, y);
            let bbox = selector.current_box().unwrap();
            assert!(bbox.width >= 0.0);
            assert!(bbox.height >= 0.0);
        }
    }

    #[test]
    fn test_callback_only_on_end() {
        let (mut selector, reported) = selector();
        selector.start(1.0, 1.0);
        assert!(reported.borrow().is_empty());
        selector.move_to(5.0, 5.0);
        selector.move_to(9.0, 2.0);
        assert!(reported.borrow().is_empty());
        selector.end();
        assert_eq!(reported.borrow().len(), 1);
    }

    #[test]
    fn test_release_without_move_reports_seed_box() {
        let (mut selector, reported) = selector();
        selector.start(30.0, 40.0);
        selector.end();

        assert_eq!(
            reported.borrow().as_slice(),
            &[BoundingBox::new(30.0, 40.0, 1.0, 1.0)]
        );
    }

    #[test]
    fn test_move_before_start_is_ignored() {
        let (mut selector, reported) = selector();
        selector.move_to(10.0, 10.0);

        assert_eq!(selector.current_box(), None);
        assert_eq!(selector.session(), &DragSession::Idle);
        assert!(!selector.indicator().visible);
        assert!(reported.borrow().is_empty());
    }

    #[test]
    fn test_move_after_end_is_ignored() {
        let (mut selector, reported) = selector();
        selector.start(0.0, 0.0);
        selector.move_to(10.0, 20.0);
        selector.end();
        let reported_box = selector.current_box();

        selector.move_to(500.0, 500.0);

        assert_eq!(selector.current_box(), reported_box);
        assert_eq!(reported.borrow().len(), 1);
        assert!(!selector.indicator().visible);
    }

    #[test]
    fn test_cycles_are_isolated() {
        let (mut selector, reported) = selector();
        selector.start(0.0, 0.0);
        selector.move_to(10.0, 10.0);
        selector.end();

        selector.start(100.0, 100.0);
        selector.move_to(90.0, 120.0);
        selector.end();

        assert_eq!(
            reported.borrow().as_slice(),
            &[
                BoundingBox::new(0.0, 10.0, 10.0, 10.0),
                BoundingBox::new(90.0, 120.0, 10.0, 20.0),
            ]
        );
    }

    #[test]
    fn test_restart_discards_previous_anchor() {
        let (mut selector, reported) = selector();
        selector.start(0.0, 0.0);
        selector.move_to(10.0, 10.0);
        selector.start(50.0, 50.0);
        selector.move_to(60.0, 55.0);
        selector.end();

        assert_eq!(
            reported.borrow().as_slice(),
            &[BoundingBox::new(50.0, 55.0, 10.0, 5.0)]
        );
    }

    #[test]
    fn test_indicator_follows_drag() {
        let (mut selector, _) = selector();

        selector.start(100.0, 50.0);
        assert!(selector.indicator().visible);
        assert_eq!(selector.indicator().frame.area(), 0.0);

        selector.move_to(40.0, 150.0);
        assert_eq!(
            selector.indicator().visible_frame(),
            Some(Rect::new(40.0, 50.0, 100.0, 150.0))
        );

        selector.end();
        assert!(!selector.indicator().visible);
        assert_eq!(selector.indicator().frame.width(), 0.0);
        assert_eq!(selector.indicator().frame.height(), 0.0);
    }

    #[test]
    fn test_session_tracks_anchor_and_box() {
        let (mut selector, _) = selector();
        selector.start(3.0, 4.0);
        selector.move_to(1.0, 8.0);

        assert_eq!(
            selector.session(),
            &DragSession::Dragging {
                anchor: Point::new(3.0, 4.0),
                bbox: BoundingBox::new(1.0, 8.0, 2.0, 4.0),
            }
        );
    }

    #[test]
    fn test_double_release_ignored_by_default() {
        let (mut selector, reported) = selector();
        selector.start(0.0, 0.0);
        selector.move_to(4.0, 4.0);
        selector.end();
        selector.end();

        assert_eq!(reported.borrow().len(), 1);
    }

    #[test]
    fn test_double_release_replays_last_box() {
        let (mut selector, reported) = selector_with(SelectorConfig {
            release_policy: ReleasePolicy::ReplayLastBox,
            ..Default::default()
        });
        selector.start(0.0, 0.0);
        selector.move_to(4.0, 4.0);
        selector.end();
        selector.end();

        let expected = BoundingBox::new(0.0, 4.0, 4.0, 4.0);
        assert_eq!(reported.borrow().as_slice(), &[expected, expected]);
        assert!(!selector.indicator().visible);
    }

    #[test]
    fn test_replay_without_any_drag_does_nothing() {
        let (mut selector, reported) = selector_with(SelectorConfig {
            release_policy: ReleasePolicy::ReplayLastBox,
            ..Default::default()
        });
        selector.end();

        assert!(reported.borrow().is_empty());
    }

    /// Indicator that records every call, for hosts with retained scene nodes.
    #[derive(Debug, Default)]
    struct RecordingIndicator {
        calls: Vec<String>,
    }

    impl Indicator for RecordingIndicator {
        fn apply_style(&mut self, _style: &SelectionStyle) {
            self.calls.push("style".into());
        }

        fn set_visible(&mut self, visible: bool) {
            self.calls.push(format!("visible {}", visible));
        }

        fn set_frame(&mut self, frame: Rect) {
            self.calls.push(format!("frame {}x{}", frame.width(), frame.height()));
        }
    }

    #[test]
    fn test_style_applied_once() {
        let mut selector =
            RectangleSelector::new(RecordingIndicator::default(), &SelectionStyle::default(), |_| {});
        selector.start(0.0, 0.0);
        selector.move_to(2.0, 3.0);
        selector.end();
        selector.start(1.0, 1.0);
        selector.end();

        let calls = &selector.indicator().calls;
        assert_eq!(calls.iter().filter(|c| *c == "style").count(), 1);
        assert_eq!(calls[0], "style");
        assert_eq!(calls[1], "visible false");
        assert!(calls.contains(&"frame 2x3".to_string()));
    }
}
