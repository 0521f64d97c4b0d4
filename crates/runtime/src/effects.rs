/// An effect waiting to be dispatched, tagged with its enqueue order.
#[derive(Debug, Clone, PartialEq)]
pub struct Queued<E> {
    pub seq: u64,
    pub effect: E,
}

/// FIFO of side effects produced by state transitions.
///
/// Transitions commit their state first and only then push effects here; the
/// owner drains the queue and hands each effect to whatever performs it.
#[derive(Debug)]
pub struct EffectQueue<E> {
    next_seq: u64,
    pending: Vec<Queued<E>>,
}

impl<E> Default for EffectQueue<E> {
    fn default() -> Self {
        Self {
            next_seq: 0,
            pending: Vec::new(),
        }
    }
}

impl<E> EffectQueue<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, effect: E) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Queued { seq, effect });
        seq
    }

    pub fn pending(&self) -> &[Queued<E>] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn drain(&mut self) -> Vec<Queued<E>> {
        std::mem::take(&mut self.pending)
    }
}
