//! Hover intent debouncing.
//!
//! Turns raw pointer enter/leave events on the card and on the overlay into
//! a single open/close signal. The pointer counts as "inside" while it is
//! over either region, so moving from the card onto the overlay never closes
//! the preview, while a pointer that merely sweeps across a card never opens
//! one.

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::scheduling::{TimerSlot, earliest};

/// Region of a tile that can receive pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HoverRegion {
    Card,
    Overlay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentSignal {
    Open,
    Close,
}

#[derive(Debug)]
pub struct HoverIntentController {
    open_delay: Duration,
    close_delay: Duration,
    over_card: bool,
    over_overlay: bool,
    /// Last signal emitted was `Open`.
    open: bool,
    open_timer: TimerSlot,
    close_timer: TimerSlot,
}

impl HoverIntentController {
    pub fn new(open_delay: Duration, close_delay: Duration) -> Self {
        Self {
            open_delay,
            close_delay,
            over_card: false,
            over_overlay: false,
            open: false,
            open_timer: TimerSlot::new("intent-open"),
            close_timer: TimerSlot::new("intent-close"),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Pointer is over the card or the overlay.
    pub fn is_inside(&self) -> bool {
        self.over_card || self.over_overlay
    }

    pub fn on_pointer_enter(&mut self, region: HoverRegion, now: Instant) {
        let was_inside = self.is_inside();
        match region {
            HoverRegion::Card => self.over_card = true,
            HoverRegion::Overlay => self.over_overlay = true,
        }

        self.close_timer.cancel();

        // Repeated enters while already inside keep the running dwell timer.
        if !self.open && !was_inside {
            self.open_timer.schedule(now, self.open_delay);
        }
    }

    pub fn on_pointer_leave(&mut self, region: HoverRegion, now: Instant) {
        match region {
            HoverRegion::Card => self.over_card = false,
            HoverRegion::Overlay => self.over_overlay = false,
        }

        if self.is_inside() {
            return;
        }

        self.open_timer.cancel();
        if self.open {
            self.close_timer.schedule(now, self.close_delay);
        }
    }

    /// Emit the signal whose timer is due at `now`, if any.
    pub fn poll(&mut self, now: Instant) -> Option<IntentSignal> {
        if self.open_timer.take_due(now).is_some()
            && self.is_inside()
            && !self.open
        {
            self.open = true;
            return Some(IntentSignal::Open);
        }

        if self.close_timer.take_due(now).is_some()
            && !self.is_inside()
            && self.open
        {
            self.open = false;
            return Some(IntentSignal::Close);
        }

        None
    }

    /// Cancel pending timers without touching pointer occupancy. Used while a
    /// redirect owns the tile.
    pub fn suspend(&mut self) {
        self.open_timer.cancel();
        self.close_timer.cancel();
    }

    /// Forget everything, including where the pointer is.
    pub fn reset(&mut self) {
        self.suspend();
        self.over_card = false;
        self.over_overlay = false;
        self.open = false;
    }

    /// Mark the intent closed after the owner tore the preview down on its
    /// own (redirect finished, tile detached).
    pub fn acknowledge_closed(&mut self) {
        self.suspend();
        self.over_overlay = false;
        self.open = false;
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        earliest([self.open_timer.deadline(), self.close_timer.deadline()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    fn controller() -> HoverIntentController {
        HoverIntentController::new(300 * MS, 120 * MS)
    }

    #[test]
    fn dwell_opens_after_delay() {
        let t0 = Instant::now();
        let mut intent = controller();
        intent.on_pointer_enter(HoverRegion::Card, t0);

        assert_eq!(intent.poll(t0 + 299 * MS), None);
        assert_eq!(intent.poll(t0 + 300 * MS), Some(IntentSignal::Open));
        assert!(intent.is_open());
        assert_eq!(intent.poll(t0 + 10_000 * MS), None);
    }

    #[test]
    fn transient_pass_never_opens() {
        let t0 = Instant::now();
        let mut intent = controller();
        intent.on_pointer_enter(HoverRegion::Card, t0);
        intent.on_pointer_leave(HoverRegion::Card, t0 + 200 * MS);

        for step in 0..50 {
            assert_eq!(intent.poll(t0 + step * 20 * MS), None);
        }
        assert_eq!(intent.next_deadline(), None);
    }

    #[test]
    fn crossing_onto_overlay_keeps_preview_open() {
        let t0 = Instant::now();
        let mut intent = controller();
        intent.on_pointer_enter(HoverRegion::Card, t0);
        assert_eq!(intent.poll(t0 + 300 * MS), Some(IntentSignal::Open));

        // Browsers deliver the card leave before the overlay enter.
        intent.on_pointer_leave(HoverRegion::Card, t0 + 400 * MS);
        intent.on_pointer_enter(HoverRegion::Overlay, t0 + 400 * MS);
        assert_eq!(intent.poll(t0 + 5_000 * MS), None);

        // And occasionally the other way round.
        intent.on_pointer_enter(HoverRegion::Card, t0 + 5_100 * MS);
        intent.on_pointer_leave(HoverRegion::Overlay, t0 + 5_100 * MS);
        assert_eq!(intent.poll(t0 + 9_000 * MS), None);
        assert!(intent.is_open());
    }

    #[test]
    fn leaving_both_regions_closes_after_grace() {
        let t0 = Instant::now();
        let mut intent = controller();
        intent.on_pointer_enter(HoverRegion::Card, t0);
        intent.poll(t0 + 300 * MS);

        intent.on_pointer_leave(HoverRegion::Card, t0 + 500 * MS);
        assert_eq!(intent.poll(t0 + 619 * MS), None);
        assert_eq!(intent.poll(t0 + 620 * MS), Some(IntentSignal::Close));
        assert!(!intent.is_open());
    }

    #[test]
    fn reentry_within_grace_cancels_close() {
        let t0 = Instant::now();
        let mut intent = controller();
        intent.on_pointer_enter(HoverRegion::Card, t0);
        intent.poll(t0 + 300 * MS);

        intent.on_pointer_leave(HoverRegion::Card, t0 + 500 * MS);
        intent.on_pointer_enter(HoverRegion::Card, t0 + 560 * MS);
        assert_eq!(intent.poll(t0 + 2_000 * MS), None);
        assert!(intent.is_open());
    }

    #[test]
    fn bursts_leave_at_most_one_timer() {
        let t0 = Instant::now();
        let mut intent = controller();
        for i in 0..20 {
            intent.on_pointer_enter(HoverRegion::Card, t0 + i * 10 * MS);
            intent.on_pointer_leave(HoverRegion::Card, t0 + (i * 10 + 5) * MS);
        }
        intent.on_pointer_enter(HoverRegion::Card, t0 + 200 * MS);

        assert_eq!(intent.next_deadline(), Some(t0 + 500 * MS));
        assert_eq!(intent.poll(t0 + 499 * MS), None);
        assert_eq!(intent.poll(t0 + 500 * MS), Some(IntentSignal::Open));
    }

    #[test]
    fn reset_drops_pending_open() {
        let t0 = Instant::now();
        let mut intent = controller();
        intent.on_pointer_enter(HoverRegion::Card, t0);
        intent.reset();
        assert_eq!(intent.poll(t0 + 1_000 * MS), None);
        assert!(!intent.is_inside());
    }
}
