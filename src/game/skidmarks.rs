// Skidmark trail - fixed-capacity ring of timestamped tire prints
//
// Old marks are never removed. Readers skip anything older than the lifetime,
// and the write cursor eventually overwrites them.

use glam::Vec2;

/// One pair of tire prints
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Skidmark {
    pub left: Vec2,
    pub right: Vec2,
    /// Creation time in seconds on the game clock
    pub time: f64,
}

impl Skidmark {
    /// Age in seconds at `now`
    pub fn age(&self, now: f64) -> f64 {
        now - self.time
    }
}

/// Ring buffer holding the most recent `capacity` skidmarks
#[derive(Debug)]
pub struct SkidmarkBuffer {
    slots: Vec<Skidmark>,
    capacity: usize,
    /// Total marks ever appended; the write slot is `count % capacity`
    count: u64,
    lifetime: f64,
}

impl SkidmarkBuffer {
    /// Create an empty buffer. A zero capacity is bumped to one slot.
    pub fn new(capacity: usize, lifetime: f64) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
            count: 0,
            lifetime,
        }
    }

    /// Record a new pair of tire prints, overwriting the oldest slot when full
    pub fn append(&mut self, left: Vec2, right: Vec2, time: f64) {
        let mark = Skidmark { left, right, time };
        let slot = (self.count % self.capacity as u64) as usize;

        if slot < self.slots.len() {
            self.slots[slot] = mark;
        } else {
            self.slots.push(mark);
        }

        self.count = self.count.saturating_add(1);
    }

    /// Marks no older than the lifetime at `now`, in slot order.
    ///
    /// Once the buffer has wrapped, slot order is not chronological.
    pub fn live(&self, now: f64) -> impl Iterator<Item = &Skidmark> + '_ {
        let lifetime = self.lifetime;
        self.slots
            .iter()
            .filter(move |mark| mark.age(now) <= lifetime)
    }

    /// Total number of marks ever appended
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Number of occupied physical slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether nothing has been appended yet
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of physical slots
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
