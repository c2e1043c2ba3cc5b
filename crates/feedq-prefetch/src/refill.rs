//! Refill policy state.
//!
//! Pure bookkeeping for the coordinator: which fetch (if any) is in flight,
//! the exhausted and error flags, and the rules deciding whether a trigger
//! may start a fetch. The manager evaluates these under its state lock.
//!
//! # Leases
//!
//! Each started fetch is stamped with a `FetchLease`. Only the holder of the
//! current lease may record a result. `reset` revokes the lease, so a fetch
//! that resolves after `clear` is discarded instead of repopulating the
//! queue.

use std::fmt;

/// Lease identifying one fetch attempt.
///
/// Leases are issued in increasing order, one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FetchLease(u64);

impl FetchLease {
    pub const fn seq(self) -> u64 {
        self.0
    }
}

impl fmt::Display for FetchLease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Observable fetch status, published on a watch channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FetchProgress {
    /// A fetch is in flight.
    pub loading: bool,
    /// Number of leases that have finished or been revoked.
    pub settled: u64,
}

impl FetchProgress {
    /// Whether `lease` has finished or been revoked.
    pub const fn has_settled(&self, lease: FetchLease) -> bool {
        self.settled > lease.0
    }
}

/// Why a fetch is being considered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchTrigger {
    /// First activation found nothing to hydrate.
    Activation,
    /// Queue length changed and sits below the low-water mark.
    LowWater,
    /// `pop` left the queue empty.
    Drained,
    /// Consumer called `refetch`.
    Manual,
}

impl fmt::Display for FetchTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Activation => "activation",
            Self::LowWater => "low_water",
            Self::Drained => "drained",
            Self::Manual => "manual",
        })
    }
}

/// How a finished fetch changed the flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Items arrived; `appended` survived dedup.
    Merged { received: usize, appended: usize },
    /// Provider had nothing; `exhausted` says whether the flag was set.
    Empty { exhausted: bool },
    /// The attempt failed with `message`.
    Failed { message: String },
}

/// Coordinator flags.
#[derive(Debug, Default)]
pub struct RefillState {
    active: bool,
    in_flight: Option<FetchLease>,
    next_lease: u64,
    settled: u64,
    exhausted: bool,
    last_error: Option<String>,
}

impl RefillState {
    pub const fn is_active(&self) -> bool {
        self.active
    }

    pub const fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub const fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    pub const fn in_flight(&self) -> Option<FetchLease> {
        self.in_flight
    }

    pub const fn progress(&self) -> FetchProgress {
        FetchProgress {
            loading: self.in_flight.is_some(),
            settled: self.settled,
        }
    }

    pub const fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Whether `trigger` may start a fetch given the current queue length.
    ///
    /// The single-fetch guard applies to every trigger.
    pub const fn permits(&self, trigger: FetchTrigger, len: usize, threshold: usize) -> bool {
        if self.is_fetching() {
            return false;
        }

        match trigger {
            FetchTrigger::Manual => true,
            FetchTrigger::Activation => self.active && len == 0,
            FetchTrigger::LowWater => {
                self.active && len > 0 && len < threshold && !self.exhausted
            }
            FetchTrigger::Drained => self.active && len == 0 && !self.exhausted,
        }
    }

    /// Check `trigger` and claim the in-flight slot in one step.
    pub const fn claim(
        &mut self,
        trigger: FetchTrigger,
        len: usize,
        threshold: usize,
    ) -> Option<FetchLease> {
        if self.permits(trigger, len, threshold) {
            self.begin()
        } else {
            None
        }
    }

    /// Claim the in-flight slot. Returns `None` if a fetch is already running.
    pub const fn begin(&mut self) -> Option<FetchLease> {
        if self.in_flight.is_some() {
            return None;
        }
        let lease = FetchLease(self.next_lease);
        self.next_lease += 1;
        self.in_flight = Some(lease);
        Some(lease)
    }

    /// Release the in-flight slot if `lease` still holds it.
    ///
    /// Returns `false` for a revoked lease; the caller must then discard its
    /// result without touching any flag.
    pub fn finish(&mut self, lease: FetchLease) -> bool {
        if self.in_flight == Some(lease) {
            self.in_flight = None;
            self.settled = lease.0 + 1;
            true
        } else {
            false
        }
    }

    /// Record a successful fetch that appended `appended` of `received` items.
    pub fn record_items(&mut self, received: usize, appended: usize) -> FetchOutcome {
        self.exhausted = false;
        self.last_error = None;
        FetchOutcome::Merged { received, appended }
    }

    /// Record an empty result. Exhaustion only latches when the consumer has
    /// nothing buffered.
    pub fn record_empty(&mut self, queue_len: usize) -> FetchOutcome {
        self.last_error = None;
        if queue_len == 0 {
            self.exhausted = true;
        }
        FetchOutcome::Empty {
            exhausted: self.exhausted,
        }
    }

    /// Record a failed fetch. Not terminal: later triggers may retry.
    pub fn record_failure(&mut self, message: String) -> FetchOutcome {
        self.last_error = Some(message.clone());
        FetchOutcome::Failed { message }
    }

    /// Return to the freshly constructed state, revoking any lease.
    ///
    /// Returns the revoked lease. Lease numbering continues so a revoked
    /// lease can never match a later one.
    pub fn reset(&mut self) -> Option<FetchLease> {
        let revoked = self.in_flight.take();
        if let Some(lease) = revoked {
            self.settled = lease.0 + 1;
        }
        self.active = false;
        self.exhausted = false;
        self.last_error = None;
        revoked
    }
}
