//! Cumulative registry counters.

use herald_core::BroadcastReport;

/// Counters accumulated over a registry's lifetime.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistryStats {
    /// Successful `register` calls
    pub registered: u64,
    /// Successful `unregister` calls (plus subscribers dropped by `clear`)
    pub unregistered: u64,
    /// Mutating calls rejected with a precondition error
    pub rejected: u64,
    /// Completed broadcasts
    pub broadcasts: u64,
    /// Successful `receive` calls
    pub delivered: u64,
    /// Subscribers passed over for lacking a delivery channel
    pub skipped: u64,
    /// Failed `receive` calls
    pub failed: u64,
    /// Broadcasts cut short by the abort policy
    pub aborted_broadcasts: u64,
}

impl RegistryStats {
    /// Creates zeroed stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds a finished broadcast into the counters.
    pub fn record_broadcast(&mut self, report: &BroadcastReport) {
        self.broadcasts += 1;
        self.delivered += report.delivered as u64;
        self.skipped += report.skipped as u64;
        self.failed += report.failed() as u64;
        if report.aborted {
            self.aborted_broadcasts += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::Message;

    #[test]
    fn test_record_broadcast() {
        let msg = Message::new("s", "b");
        let mut report = BroadcastReport::new(msg.id);
        report.delivered = 3;
        report.skipped = 2;
        report.aborted = true;

        let mut stats = RegistryStats::new();
        stats.record_broadcast(&report);
        stats.record_broadcast(&BroadcastReport::new(msg.id));

        assert_eq!(stats.broadcasts, 2);
        assert_eq!(stats.delivered, 3);
        assert_eq!(stats.skipped, 2);
        assert_eq!(stats.failed, 0);
        assert_eq!(stats.aborted_broadcasts, 1);
    }
}
