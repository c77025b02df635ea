//! One-shot delayed events
//!
//! Each scheduled event captures the epoch it was created in. Retry bumps the
//! epoch, so anything scheduled during the previous run can never fire into
//! the new one.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerKind {
    /// End of the post-hit grace window
    InvincibilityExpiry,
    /// Clear the score pulse cue
    ScorePulseEnd,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct Scheduled {
    kind: TimerKind,
    due_tick: u64,
    epoch: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timers {
    epoch: u64,
    pending: Vec<Scheduled>,
}

impl Timers {
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Schedule `kind` to fire `delay` ticks after `now`.
    /// Replaces any pending timer of the same kind.
    pub fn schedule(&mut self, kind: TimerKind, now: u64, delay: u64) {
        self.cancel(kind);
        self.pending.push(Scheduled {
            kind,
            due_tick: now + delay,
            epoch: self.epoch,
        });
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        self.pending.retain(|t| t.kind != kind);
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.pending.iter().any(|t| t.kind == kind)
    }

    /// Invalidate everything scheduled so far
    pub fn advance_epoch(&mut self) {
        self.epoch += 1;
        self.pending.clear();
    }

    /// Remove and return every timer due at `now`, in due order.
    /// Timers from an older epoch are dropped without firing.
    pub fn fire_due(&mut self, now: u64) -> Vec<TimerKind> {
        let epoch = self.epoch;
        let mut due: Vec<Scheduled> = Vec::new();
        self.pending.retain(|t| {
            if t.epoch != epoch {
                return false;
            }
            if t.due_tick <= now {
                due.push(*t);
                return false;
            }
            true
        });
        due.sort_by_key(|t| t.due_tick);
        due.into_iter().map(|t| t.kind).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_only_when_due() {
        let mut timers = Timers::default();
        timers.schedule(TimerKind::InvincibilityExpiry, 10, 100);
        assert!(timers.fire_due(109).is_empty());
        assert_eq!(timers.fire_due(110), vec![TimerKind::InvincibilityExpiry]);
        assert!(!timers.is_pending(TimerKind::InvincibilityExpiry));
    }

    #[test]
    fn test_reschedule_supersedes() {
        let mut timers = Timers::default();
        timers.schedule(TimerKind::ScorePulseEnd, 0, 15);
        timers.schedule(TimerKind::ScorePulseEnd, 10, 15);
        assert!(timers.fire_due(15).is_empty());
        assert_eq!(timers.fire_due(25), vec![TimerKind::ScorePulseEnd]);
    }

    #[test]
    fn test_stale_epoch_never_fires() {
        let mut timers = Timers::default();
        timers.schedule(TimerKind::InvincibilityExpiry, 0, 5);
        timers.advance_epoch();
        assert!(!timers.is_pending(TimerKind::InvincibilityExpiry));

        // A timer captured before the epoch bump
        timers.pending.push(Scheduled {
            kind: TimerKind::ScorePulseEnd,
            due_tick: 1,
            epoch: timers.epoch() - 1,
        });
        assert!(timers.fire_due(1000).is_empty());
        assert!(!timers.is_pending(TimerKind::ScorePulseEnd));
    }

    #[test]
    fn test_fire_order_follows_due_tick() {
        let mut timers = Timers::default();
        timers.schedule(TimerKind::InvincibilityExpiry, 0, 20);
        timers.schedule(TimerKind::ScorePulseEnd, 0, 5);
        assert_eq!(
            timers.fire_due(30),
            vec![TimerKind::ScorePulseEnd, TimerKind::InvincibilityExpiry]
        );
    }
}
