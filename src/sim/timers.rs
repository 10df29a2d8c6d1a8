//! One-shot scheduled callbacks
//!
//! Nothing in the sim blocks. Delays (hold detection, banners, the game over
//! sequence) are timers that fire on a later tick and can be cancelled.

/// Handle for cancelling a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Press held long enough to count as a drag
    Hold,
    /// Round banner done, spawn the next board
    Respawn,
    /// Present the game over screen
    GameOver,
}

#[derive(Debug, Clone)]
struct Timer {
    id: TimerId,
    due_ms: u64,
    kind: TimerKind,
}

/// Pending timers, fired in due order (ties by scheduling order)
#[derive(Debug, Clone, Default)]
pub struct Timers {
    pending: Vec<Timer>,
    next_id: u64,
}

impl Timers {
    /// Schedule `kind` to fire once the clock reaches `due_ms`
    pub fn schedule(&mut self, due_ms: u64, kind: TimerKind) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Timer { id, due_ms, kind });
        id
    }

    /// Cancel a timer; returns false if it already fired or was cancelled
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.id != id);
        self.pending.len() != before
    }

    /// Drop every pending timer, returning how many were dropped
    pub fn cancel_all(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        count
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return every timer due at `now_ms`
    pub fn advance(&mut self, now_ms: u64) -> Vec<(TimerId, TimerKind)> {
        let mut due: Vec<Timer> = Vec::new();
        self.pending.retain(|t| {
            if t.due_ms <= now_ms {
                due.push(t.clone());
                false
            } else {
                true
            }
        });
        due.sort_by_key(|t| (t.due_ms, t.id.0));
        due.into_iter().map(|t| (t.id, t.kind)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_due_order() {
        let mut timers = Timers::default();
        let late = timers.schedule(300, TimerKind::Respawn);
        let early = timers.schedule(150, TimerKind::Hold);

        assert!(timers.advance(100).is_empty());
        assert_eq!(timers.advance(150), vec![(early, TimerKind::Hold)]);
        assert_eq!(timers.len(), 1);
        assert_eq!(timers.advance(1000), vec![(late, TimerKind::Respawn)]);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_same_tick_fires_both_sorted() {
        let mut timers = Timers::default();
        let b = timers.schedule(200, TimerKind::GameOver);
        let a = timers.schedule(100, TimerKind::Hold);
        assert_eq!(
            timers.advance(500),
            vec![(a, TimerKind::Hold), (b, TimerKind::GameOver)]
        );
    }

    #[test]
    fn test_cancel() {
        let mut timers = Timers::default();
        let id = timers.schedule(150, TimerKind::Hold);
        assert!(timers.is_pending(id));
        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));
        assert!(timers.advance(1000).is_empty());
    }

    #[test]
    fn test_cancel_all() {
        let mut timers = Timers::default();
        timers.schedule(10, TimerKind::Hold);
        timers.schedule(20, TimerKind::GameOver);
        assert_eq!(timers.cancel_all(), 2);
        assert!(timers.advance(u64::MAX).is_empty());
    }
}
