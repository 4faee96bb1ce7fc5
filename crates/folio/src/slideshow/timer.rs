use std::time::Duration;

/// Handle for a scheduled timer, unique within one scheduler.
pub type TimerId = u64;

/// Deferred-callback interface injected into every time-driven behavior.
///
/// Events are plain values: the owner drains them with [`Scheduler::pop_due`]
/// and dispatches them to its own handler, so no callback ever needs a
/// borrow of the owner.
pub trait Scheduler<E> {
    /// Current position of the scheduler's clock.
    fn now(&self) -> Duration;

    /// Fire `event` once, `delay` after the current clock.
    fn schedule_once(&mut self, delay: Duration, event: E) -> TimerId;

    /// Fire `event` every `interval`, first after one full interval.
    fn schedule_repeating(&mut self, interval: Duration, event: E) -> TimerId;

    /// Cancel a timer. Returns false if it already fired or was cancelled.
    fn cancel(&mut self, id: TimerId) -> bool;

    fn is_live(&self, id: TimerId) -> bool;

    /// Pop the earliest event due at or before `now`.
    fn pop_due(&mut self, now: Duration) -> Option<E>;
}

#[derive(Debug, Clone)]
struct Entry<E> {
    id: TimerId,
    deadline: Duration,
    interval: Option<Duration>,
    event: E,
}

/// Virtual-time timer queue.
///
/// Time only moves when the owner calls [`Scheduler::pop_due`]. While
/// draining, the clock jumps to each fired deadline, so a timer scheduled
/// from inside a handler is measured from the instant its parent fired
/// rather than from the frame that happened to observe it.
#[derive(Debug, Clone)]
pub struct TimerQueue<E> {
    now: Duration,
    next_id: TimerId,
    entries: Vec<Entry<E>>,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 1,
            entries: Vec::new(),
        }
    }

    /// Queue whose clock starts at `now` instead of zero.
    pub fn starting_at(now: Duration) -> Self {
        Self {
            now,
            ..Self::new()
        }
    }

    /// Number of live timers (one-shot and repeating).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deadline of the earliest pending timer, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.iter().map(|e| e.deadline).min()
    }

    fn push(&mut self, deadline: Duration, interval: Option<Duration>, event: E) -> TimerId {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            deadline,
            interval,
            event,
        });
        id
    }
}

impl<E: Clone> Scheduler<E> for TimerQueue<E> {
    fn now(&self) -> Duration {
        self.now
    }

    fn schedule_once(&mut self, delay: Duration, event: E) -> TimerId {
        self.push(self.now + delay, None, event)
    }

    fn schedule_repeating(&mut self, interval: Duration, event: E) -> TimerId {
        // A zero interval would spin forever inside a single drain.
        let interval = interval.max(Duration::from_millis(1));
        self.push(self.now + interval, Some(interval), event)
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    fn is_live(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    fn pop_due(&mut self, now: Duration) -> Option<E> {
        // Ties go to the timer scheduled first (lower id).
        let pos = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.deadline <= now)
            .min_by_key(|(_, e)| (e.deadline, e.id))
            .map(|(i, _)| i);

        let Some(pos) = pos else {
            self.now = self.now.max(now);
            return None;
        };

        self.now = self.now.max(self.entries[pos].deadline);
        match self.entries[pos].interval {
            Some(interval) => {
                let entry = &mut self.entries[pos];
                entry.deadline += interval;
                Some(entry.event.clone())
            }
            None => Some(self.entries.remove(pos).event),
        }
    }
}
