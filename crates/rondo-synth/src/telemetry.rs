//! Decimated engine telemetry.
//!
//! When enabled, the engine hands every output sample to [`Telemetry::observe`]
//! and, once per interval, a [`Snapshot`] to [`Telemetry::publish`].
//! Publishing stores the snapshot in a [`TelemetryMailbox`]: a single slot of
//! atomics guarded by a sequence counter. The audio path never formats, logs
//! or waits. A host thread drains the mailbox with [`TelemetryMailbox::take`]
//! and logs what it finds ([`Snapshot::log`] with the `tracing` feature).
//!
//! The slot keeps only the latest snapshot. Reports the reader misses are
//! dropped, and a read that overlaps a write returns `None` until the next
//! report. Telemetry never feeds back into the signal path.

use core::sync::atomic::{AtomicU32, Ordering, fence};

/// One telemetry report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    /// Stage receiving live writes.
    pub active_stage: usize,
    /// Voice the next clock tick will trigger.
    pub next_voice: usize,
    /// Clock rate in Hz.
    pub clock_hz: f32,
    /// Largest absolute output since the previous report.
    pub peak: f32,
    /// Clock ticks since start.
    pub fires: u64,
}

#[cfg(feature = "tracing")]
impl Snapshot {
    /// Emit this snapshot as a `debug` event on the `rondo::engine` target.
    ///
    /// Call from a host thread, never from the audio callback.
    pub fn log(&self) {
        tracing::debug!(
            target: "rondo::engine",
            active_stage = self.active_stage,
            next_voice = self.next_voice,
            clock_hz = self.clock_hz,
            peak = self.peak,
            fires = self.fires,
            "engine"
        );
    }
}

/// Single-writer, single-reader slot holding the latest [`Snapshot`].
///
/// Every field is a 32-bit atomic so the slot works on targets without
/// 64-bit atomics. `seq` is odd while a write is in progress.
#[derive(Debug, Default)]
pub struct TelemetryMailbox {
    seq: AtomicU32,
    taken: AtomicU32,
    active_stage: AtomicU32,
    next_voice: AtomicU32,
    clock_hz: AtomicU32,
    peak: AtomicU32,
    fires_lo: AtomicU32,
    fires_hi: AtomicU32,
}

impl TelemetryMailbox {
    /// Create an empty mailbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the slot. Wait-free; only one thread may publish.
    pub fn publish(&self, snapshot: &Snapshot) {
        let seq = self.seq.load(Ordering::Relaxed);
        self.seq.store(seq.wrapping_add(1), Ordering::Relaxed);
        fence(Ordering::Release);

        self.active_stage
            .store(snapshot.active_stage as u32, Ordering::Relaxed);
        self.next_voice
            .store(snapshot.next_voice as u32, Ordering::Relaxed);
        self.clock_hz
            .store(snapshot.clock_hz.to_bits(), Ordering::Relaxed);
        self.peak.store(snapshot.peak.to_bits(), Ordering::Relaxed);
        self.fires_lo.store(snapshot.fires as u32, Ordering::Relaxed);
        self.fires_hi
            .store((snapshot.fires >> 32) as u32, Ordering::Relaxed);

        self.seq.store(seq.wrapping_add(2), Ordering::Release);
    }

    /// Latest snapshot not yet taken.
    ///
    /// Returns `None` when nothing new was published or a write is in
    /// progress. Only one thread may take.
    pub fn take(&self) -> Option<Snapshot> {
        let before = self.seq.load(Ordering::Acquire);
        if before & 1 == 1 || before == self.taken.load(Ordering::Relaxed) {
            return None;
        }

        let snapshot = Snapshot {
            active_stage: self.active_stage.load(Ordering::Relaxed) as usize,
            next_voice: self.next_voice.load(Ordering::Relaxed) as usize,
            clock_hz: f32::from_bits(self.clock_hz.load(Ordering::Relaxed)),
            peak: f32::from_bits(self.peak.load(Ordering::Relaxed)),
            fires: u64::from(self.fires_lo.load(Ordering::Relaxed))
                | (u64::from(self.fires_hi.load(Ordering::Relaxed)) << 32),
        };

        fence(Ordering::Acquire);
        if self.seq.load(Ordering::Relaxed) != before {
            return None;
        }
        self.taken.store(before, Ordering::Relaxed);
        Some(snapshot)
    }
}

impl Clone for TelemetryMailbox {
    fn clone(&self) -> Self {
        let copy = |a: &AtomicU32| AtomicU32::new(a.load(Ordering::Acquire));
        Self {
            seq: copy(&self.seq),
            taken: copy(&self.taken),
            active_stage: copy(&self.active_stage),
            next_voice: copy(&self.next_voice),
            clock_hz: copy(&self.clock_hz),
            peak: copy(&self.peak),
            fires_lo: copy(&self.fires_lo),
            fires_hi: copy(&self.fires_hi),
        }
    }
}

#[cfg(feature = "std")]
type MailboxHandle = std::sync::Arc<TelemetryMailbox>;
#[cfg(not(feature = "std"))]
type MailboxHandle = TelemetryMailbox;

/// Interval-gated reporter.
#[derive(Debug)]
pub struct Telemetry {
    enabled: bool,
    interval: u32,
    countdown: u32,
    peak: f32,
    reports: u64,
    mailbox: MailboxHandle,
}

impl Clone for Telemetry {
    /// The clone gets its own mailbox holding a copy of the current slot.
    fn clone(&self) -> Self {
        Self {
            enabled: self.enabled,
            interval: self.interval,
            countdown: self.countdown,
            peak: self.peak,
            reports: self.reports,
            mailbox: TelemetryMailbox::clone(&self.mailbox).into(),
        }
    }
}

impl Telemetry {
    /// Create a reporter firing every `interval` samples (at least 1).
    pub fn new(enabled: bool, interval: u32) -> Self {
        let interval = interval.max(1);
        Self {
            enabled,
            interval,
            countdown: interval,
            peak: 0.0,
            reports: 0,
            mailbox: TelemetryMailbox::new().into(),
        }
    }

    /// Whether reports are produced.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Reports published so far.
    pub fn reports(&self) -> u64 {
        self.reports
    }

    /// The mailbox reports are published into.
    pub fn mailbox(&self) -> &TelemetryMailbox {
        &self.mailbox
    }

    /// A handle to the mailbox for a reader on another thread.
    #[cfg(feature = "std")]
    pub fn share_mailbox(&self) -> std::sync::Arc<TelemetryMailbox> {
        std::sync::Arc::clone(&self.mailbox)
    }

    /// Track one output sample. Returns the interval's peak when a report is due.
    #[inline]
    pub fn observe(&mut self, sample: f32) -> Option<f32> {
        if !self.enabled {
            return None;
        }
        self.peak = self.peak.max(sample.abs());
        self.countdown -= 1;
        if self.countdown > 0 {
            return None;
        }
        self.countdown = self.interval;
        let peak = self.peak;
        self.peak = 0.0;
        Some(peak)
    }

    /// Store a snapshot in the mailbox.
    #[inline]
    pub fn publish(&mut self, snapshot: &Snapshot) {
        self.reports += 1;
        self.mailbox.publish(snapshot);
    }
}
