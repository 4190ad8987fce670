//! Watchdog refresh

use kflash_hal::Watchdog;

/// Refreshes a hardware watchdog
#[derive(Debug)]
pub struct LivenessSupervisor<W> {
    watchdog: W,
    refreshes: u32,
}

impl<W: Watchdog> LivenessSupervisor<W> {
    pub const fn new(watchdog: W) -> Self {
        Self {
            watchdog,
            refreshes: 0,
        }
    }

    /// Write the refresh sequence with interrupts masked
    ///
    /// The previous interrupt state is restored afterwards.
    pub fn service(&mut self) {
        let watchdog = &mut self.watchdog;
        critical_section::with(|_| {
            for value in W::REFRESH_SEQUENCE {
                watchdog.write_counter(value);
            }
        });
        self.refreshes = self.refreshes.wrapping_add(1);
    }

    /// Number of refreshes since creation (wraps)
    pub fn refreshes(&self) -> u32 {
        self.refreshes
    }

    pub fn watchdog(&self) -> &W {
        &self.watchdog
    }

    /// Give the watchdog back
    pub fn release(self) -> W {
        self.watchdog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{critical_section_depth, FakeWatchdog};

    #[test]
    fn test_service_writes_sequence_in_order() {
        let mut supervisor = LivenessSupervisor::new(FakeWatchdog::new());
        supervisor.service();

        assert_eq!(supervisor.watchdog().writes, vec![0x02A6, 0x80B4]);
        assert_eq!(supervisor.refreshes(), 1);
    }

    #[test]
    fn test_keys_written_inside_critical_section() {
        let mut supervisor = LivenessSupervisor::new(FakeWatchdog::new());
        assert_eq!(critical_section_depth(), 0);

        supervisor.service();

        assert_eq!(supervisor.watchdog().depths, vec![1, 1]);
        assert_eq!(critical_section_depth(), 0);
    }

    #[test]
    fn test_service_restores_enclosing_section() {
        let mut supervisor = LivenessSupervisor::new(FakeWatchdog::new());

        critical_section::with(|_| {
            supervisor.service();
            assert_eq!(critical_section_depth(), 1);
        });

        assert_eq!(supervisor.watchdog().depths, vec![2, 2]);
        assert_eq!(critical_section_depth(), 0);
    }

    #[test]
    fn test_every_service_is_complete() {
        let mut supervisor = LivenessSupervisor::new(FakeWatchdog::new());
        for _ in 0..50 {
            supervisor.service();
        }

        let watchdog = supervisor.release();
        assert_eq!(watchdog.writes.len(), 100);
        assert_eq!(watchdog.refreshes(), 50);
    }
}
