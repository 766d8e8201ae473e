//! Bounded ring buffer
//!
//! Fixed capacity `N`, drop-oldest eviction. Storage is allocated once at
//! construction; pushes never reallocate.

/// Ring buffer with fixed capacity
#[derive(Debug, Clone)]
pub struct RingBuffer<T, const N: usize> {
    buffer: [Option<T>; N],
    /// Next write position
    head: usize,
    count: usize,
}

impl<T, const N: usize> RingBuffer<T, N> {
    /// Create new ring buffer
    pub fn new() -> Self {
        Self {
            buffer: std::array::from_fn(|_| None),
            head: 0,
            count: 0,
        }
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Add value; at capacity the oldest value is evicted and returned
    #[inline]
    pub fn push(&mut self, value: T) -> Option<T> {
        if N == 0 {
            return Some(value);
        }
        let evicted = self.buffer[self.head].replace(value);
        self.head = (self.head + 1) % N;
        if self.count < N {
            self.count += 1;
        }
        evicted
    }

    /// Values oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        let start = (self.head + N - self.count) % N.max(1);
        (0..self.count).filter_map(move |i| self.buffer[(start + i) % N].as_ref())
    }

    /// The newest `k` values, oldest first
    pub fn recent(&self, k: usize) -> impl Iterator<Item = &T> {
        self.iter().skip(self.count.saturating_sub(k))
    }

    /// Get stored count
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Clear buffer
    pub fn clear(&mut self) {
        self.buffer.iter_mut().for_each(|slot| *slot = None);
        self.head = 0;
        self.count = 0;
    }
}

impl<T, const N: usize> Default for RingBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}
