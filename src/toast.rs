//! Transient "still running" notifications
//!
//! A toast holds at full opacity, fades out linearly and then closes itself.
//! Timing is driven by the UI repaint schedule; nothing here blocks or sleeps.
//! Each push creates an independent toast; duplicates are not merged.

use egui::{Pos2, Rect, Vec2};
use std::time::{Duration, Instant};

use crate::constants::toast;

/// Repaint interval while a toast is fading
const FADE_FRAME: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToastOptions {
    pub hold: Duration,
    pub fade: Duration,
    pub margin: Vec2,
    pub size: Vec2,
}

impl Default for ToastOptions {
    fn default() -> Self {
        Self {
            hold: Duration::from_millis(toast::HOLD_MS),
            fade: Duration::from_millis(toast::FADE_MS),
            margin: Vec2::new(toast::MARGIN_X, toast::MARGIN_Y),
            size: Vec2::new(toast::WIDTH, toast::HEIGHT),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToastPhase {
    Holding,
    Fading { opacity: f32 },
    Finished,
}

impl ToastPhase {
    pub fn opacity(self) -> f32 {
        match self {
            ToastPhase::Holding => 1.0,
            ToastPhase::Fading { opacity } => opacity,
            ToastPhase::Finished => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToastId(u64);

impl ToastId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: ToastId,
    pub title: String,
    pub message: String,
    shown_at: Instant,
}

impl Toast {
    pub fn phase(&self, now: Instant, options: &ToastOptions) -> ToastPhase {
        let elapsed = now.saturating_duration_since(self.shown_at);
        if elapsed < options.hold {
            return ToastPhase::Holding;
        }

        let fading = elapsed - options.hold;
        if fading >= options.fade {
            return ToastPhase::Finished;
        }

        let opacity = 1.0 - fading.as_secs_f32() / options.fade.as_secs_f32();
        ToastPhase::Fading {
            opacity: opacity.clamp(0.0, 1.0),
        }
    }

    /// How long until this toast next needs a repaint
    fn next_repaint(&self, now: Instant, options: &ToastOptions) -> Option<Duration> {
        match self.phase(now, options) {
            ToastPhase::Holding => {
                Some((self.shown_at + options.hold).saturating_duration_since(now))
            }
            ToastPhase::Fading { .. } => Some(FADE_FRAME),
            ToastPhase::Finished => None,
        }
    }
}

/// Top-left corner that places a toast in the bottom-right of the work area
pub fn anchor(work_area: Rect, size: Vec2, margin: Vec2) -> Pos2 {
    Pos2::new(
        work_area.right() - size.x - margin.x,
        work_area.bottom() - size.y - margin.y,
    )
}

/// Live toasts, oldest first
#[derive(Debug, Default)]
pub struct ToastQueue {
    options: ToastOptions,
    toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastQueue {
    pub fn new(options: ToastOptions) -> Self {
        Self {
            options,
            toasts: Vec::new(),
            next_id: 0,
        }
    }

    pub fn options(&self) -> &ToastOptions {
        &self.options
    }

    pub fn push(&mut self, title: impl Into<String>, message: impl Into<String>, now: Instant) -> ToastId {
        let id = ToastId(self.next_id);
        self.next_id += 1;
        self.toasts.push(Toast {
            id,
            title: title.into(),
            message: message.into(),
            shown_at: now,
        });
        tracing::debug!(toast = id.raw(), "Showing toast");
        id
    }

    /// Dismiss a toast early; returns false if it already closed
    pub fn cancel(&mut self, id: ToastId) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    /// Drop toasts whose fade has completed
    pub fn prune(&mut self, now: Instant) {
        let options = self.options;
        self.toasts
            .retain(|t| t.phase(now, &options) != ToastPhase::Finished);
    }

    /// Toasts still on screen with their current phase
    pub fn visible(&self, now: Instant) -> impl Iterator<Item = (&Toast, ToastPhase)> + '_ {
        self.toasts
            .iter()
            .map(move |t| (t, t.phase(now, &self.options)))
            .filter(|(_, phase)| *phase != ToastPhase::Finished)
    }

    /// Shortest wait before any toast changes appearance
    pub fn next_repaint(&self, now: Instant) -> Option<Duration> {
        self.toasts
            .iter()
            .filter_map(|t| t.next_repaint(now, &self.options))
            .min()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_phase_timeline_with_defaults() {
        let start = Instant::now();
        let mut queue = ToastQueue::new(ToastOptions::default());
        queue.push("t", "m", start);
        let toast = &queue.toasts[0];
        let options = ToastOptions::default();

        assert_eq!(toast.phase(start, &options), ToastPhase::Holding);
        assert_eq!(toast.phase(start + ms(2999), &options), ToastPhase::Holding);

        match toast.phase(start + ms(3250), &options) {
            ToastPhase::Fading { opacity } => assert!((opacity - 0.5).abs() < 0.01),
            other => panic!("expected fading, got {other:?}"),
        }

        assert_eq!(toast.phase(start + ms(3500), &options), ToastPhase::Finished);
    }

    #[test]
    fn test_zero_fade_finishes_after_hold() {
        let options = ToastOptions {
            hold: ms(100),
            fade: Duration::ZERO,
            ..Default::default()
        };
        let start = Instant::now();
        let mut queue = ToastQueue::new(options);
        queue.push("t", "m", start);

        assert_eq!(queue.toasts[0].phase(start + ms(99), &options), ToastPhase::Holding);
        assert_eq!(queue.toasts[0].phase(start + ms(100), &options), ToastPhase::Finished);
    }

    #[test]
    fn test_anchor_bottom_right_with_margin() {
        let work_area = Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(1920.0, 1040.0));
        let pos = anchor(work_area, Vec2::new(300.0, 80.0), Vec2::new(10.0, 10.0));
        assert_eq!(pos, Pos2::new(1610.0, 950.0));
    }

    #[test]
    fn test_pushes_are_independent() {
        let start = Instant::now();
        let mut queue = ToastQueue::new(ToastOptions::default());
        let first = queue.push("a", "m", start);
        let second = queue.push("a", "m", start + ms(1000));

        assert_ne!(first, second);
        assert_eq!(queue.len(), 2);

        // First finishes at 3500ms, second at 4500ms
        queue.prune(start + ms(3600));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.visible(start + ms(3600)).next().unwrap().0.id, second);

        queue.prune(start + ms(4500));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut queue = ToastQueue::new(ToastOptions::default());
        let id = queue.push("a", "m", start);

        assert!(queue.cancel(id));
        assert!(!queue.cancel(id));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_next_repaint_targets_end_of_hold_then_frames() {
        let start = Instant::now();
        let mut queue = ToastQueue::new(ToastOptions::default());
        assert_eq!(queue.next_repaint(start), None);

        queue.push("a", "m", start);
        assert_eq!(queue.next_repaint(start + ms(1000)), Some(ms(2000)));
        assert_eq!(queue.next_repaint(start + ms(3100)), Some(FADE_FRAME));
        assert_eq!(queue.next_repaint(start + ms(4000)), None);
    }
}
