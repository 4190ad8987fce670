//! Flash completion detector

use kflash_hal::FlashRegisters;

/// State of the last launched flash command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Completion {
    /// Still executing
    Pending,
    /// Finished without error flags
    Done,
    /// Finished with error flags; carries the raw FSTAT value
    Failed(u8),
}

impl Completion {
    /// Check if the controller is idle again
    pub const fn is_finished(&self) -> bool {
        !matches!(self, Completion::Pending)
    }
}

/// Sample the controller status once
///
/// Only reads FSTAT. With no command in flight an idle controller reads as
/// [`Completion::Done`], or [`Completion::Failed`] if flags from an earlier
/// command are still set.
pub fn poll_completion<R: FlashRegisters + ?Sized>(regs: &R) -> Completion {
    let status = regs.status();
    if !status.ccif() {
        Completion::Pending
    } else if status.has_fault() {
        Completion::Failed(status.into_bits())
    } else {
        Completion::Done
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeFlash;

    #[test]
    fn test_busy_is_pending() {
        let mut flash = FakeFlash::new();
        flash.force_status(0x00);
        assert_eq!(poll_completion(&flash), Completion::Pending);

        // Error flags without CCIF do not count yet
        flash.force_status(0x20);
        assert_eq!(poll_completion(&flash), Completion::Pending);
    }

    #[test]
    fn test_complete_without_flags() {
        let mut flash = FakeFlash::new();
        flash.force_status(0x80);
        assert_eq!(poll_completion(&flash), Completion::Done);
    }

    #[test]
    fn test_failure_carries_raw_status() {
        let mut flash = FakeFlash::new();
        for raw in [0xA0, 0x90, 0x81, 0x88, 0xB3] {
            flash.force_status(raw);
            assert_eq!(poll_completion(&flash), Completion::Failed(raw));
        }
    }

    #[test]
    fn test_is_finished() {
        assert!(!Completion::Pending.is_finished());
        assert!(Completion::Done.is_finished());
        assert!(Completion::Failed(0xA0).is_finished());
    }
}
