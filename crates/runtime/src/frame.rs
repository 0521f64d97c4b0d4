use foundation::time::Time;

/// Frame metadata handed to per-frame updates.
///
/// Frames form a chain: each one records its own delta and the engine time at
/// its start, so a run can be replayed from the recorded deltas.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Delta time covered by this frame (seconds).
    pub dt_s: f64,
    /// Engine time at the start of the frame.
    pub time: Time,
}

impl Frame {
    pub fn first(dt_s: f64) -> Self {
        Self {
            index: 0,
            dt_s: dt_s.max(0.0),
            time: Time::ZERO,
        }
    }

    /// Next frame in the chain, covering `dt_s` seconds.
    pub fn advance(self, dt_s: f64) -> Self {
        Self {
            index: self.index + 1,
            dt_s: dt_s.max(0.0),
            time: Time(self.time.0 + self.dt_s),
        }
    }
}
