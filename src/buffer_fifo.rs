/// A fixed-capacity FIFO queue backed by an array.
pub struct BufferFIFO<T, const N: usize> {
    buffer: [T; N],
    /// Index of the next slot to write.
    idx: usize,
    /// Number of queued values.
    len: usize,
}

impl<T, const N: usize> Default for BufferFIFO<T, N>
where
    T: Default + Copy,
{
    fn default() -> Self {
        Self {
            buffer: [T::default(); N],
            idx: 0,
            len: 0,
        }
    }
}

impl<T, const N: usize> BufferFIFO<T, N>
where
    T: Default + Copy,
{
    /// Queues a value. Returns `false` and leaves the queue untouched if it is full.
    pub fn push(&mut self, value: T) -> bool {
        if self.is_full() {
            return false;
        }
        self.buffer[self.idx] = value;
        self.idx = (self.idx + 1) % N;
        self.len += 1;
        true
    }

    /// Removes and returns the oldest value.
    pub fn pop(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let val = self.buffer[(self.idx + N - self.len) % N];
        self.len -= 1;
        Some(val)
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_full(&self) -> bool {
        self.len == N
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_insertion_order() {
        let mut fifo = BufferFIFO::<u8, 3>::default();
        assert!(fifo.push(1));
        assert!(fifo.push(2));
        assert_eq!(fifo.pop(), Some(1));
        assert!(fifo.push(3));
        assert!(fifo.push(4));
        assert_eq!(fifo.len(), 3);
        assert_eq!(fifo.pop(), Some(2));
        assert_eq!(fifo.pop(), Some(3));
        assert_eq!(fifo.pop(), Some(4));
        assert_eq!(fifo.pop(), None);
    }

    #[test]
    fn rejects_when_full() {
        let mut fifo = BufferFIFO::<u8, 2>::default();
        assert!(fifo.push(1));
        assert!(fifo.push(2));
        assert!(fifo.is_full());
        assert!(!fifo.push(3));
        assert_eq!(fifo.pop(), Some(1));
        assert_eq!(fifo.pop(), Some(2));
        assert!(fifo.is_empty());
    }
}
