//! Fake hardware for host tests

#![allow(unsafe_code)]

use core::cell::Cell;

use kflash_hal::{FlashRegisters, FlashStatus, Watchdog};

/// One register write seen by [`FakeFlash`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegWrite {
    Divider(u8),
    Index(u8),
    Word(u16),
    Status(u8),
}

/// A program command as decoded from its FCCOB words
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramRecord {
    pub address: u32,
    pub words: Vec<u32>,
}

/// In-memory FTMRE
///
/// A launched command stays busy for `latency` status reads, then sets
/// CCIF together with whatever fault flags were configured for it.
pub struct FakeFlash {
    fstat: Cell<u8>,
    busy: Cell<bool>,
    remaining: Cell<u32>,
    polls: Cell<u32>,
    pending_fault: Cell<u8>,
    latency: u32,
    fccob: [u16; 8],
    index: usize,
    divider: Option<u8>,
    writes: Vec<RegWrite>,
    commands: Vec<Vec<u16>>,
    faults: Vec<(usize, u8)>,
}

impl FakeFlash {
    /// Controller that finishes every command on the first status read
    pub fn new() -> Self {
        Self::with_latency(0)
    }

    /// Controller whose commands stay busy for `latency` status reads
    pub fn with_latency(latency: u32) -> Self {
        Self {
            fstat: Cell::new(FlashStatus::CCIF_MASK),
            busy: Cell::new(false),
            remaining: Cell::new(0),
            polls: Cell::new(0),
            pending_fault: Cell::new(0),
            latency,
            fccob: [0; 8],
            index: 0,
            divider: None,
            writes: Vec::new(),
            commands: Vec::new(),
            faults: Vec::new(),
        }
    }

    /// Make the `n`th launched command (0-based) finish with `flags` set
    pub fn fail_command(&mut self, n: usize, flags: u8) {
        self.faults.push((n, flags));
    }

    /// Overwrite FSTAT and drop any command in flight
    pub fn force_status(&mut self, raw: u8) {
        self.fstat.set(raw);
        self.busy.set(false);
    }

    pub fn divider(&self) -> Option<u8> {
        self.divider
    }

    pub fn writes(&self) -> &[RegWrite] {
        &self.writes
    }

    pub fn polls(&self) -> u32 {
        self.polls.get()
    }

    /// Number of commands launched so far
    pub fn launched(&self) -> usize {
        self.commands.len()
    }

    /// FCCOB words of every launched command
    pub fn commands(&self) -> &[Vec<u16>] {
        &self.commands
    }

    /// Launched Program Flash commands, decoded
    pub fn programs(&self) -> Vec<ProgramRecord> {
        self.commands
            .iter()
            .filter(|words| words.first().is_some_and(|w| w >> 8 == 0x06))
            .map(|words| ProgramRecord {
                address: (u32::from(words[0] & 0xFF) << 16) | u32::from(words[1]),
                words: words[2..]
                    .chunks(2)
                    .map(|pair| u32::from(pair[0]) | (u32::from(pair[1]) << 16))
                    .collect(),
            })
            .collect()
    }

    /// Number of launched Erase All Blocks commands
    pub fn erases(&self) -> usize {
        self.commands
            .iter()
            .filter(|words| **words == [0x0800])
            .count()
    }

    fn launch(&mut self) {
        let n = self.commands.len();
        let length = self.index + 1;
        self.commands.push(self.fccob[..length].to_vec());
        self.fccob = [0; 8];
        self.index = 0;

        let fault = self
            .faults
            .iter()
            .find(|(at, _)| *at == n)
            .map_or(0, |(_, flags)| *flags);
        self.pending_fault.set(fault);
        self.fstat.set(0);
        self.busy.set(true);
        self.remaining.set(self.latency);
    }
}

impl Default for FakeFlash {
    fn default() -> Self {
        Self::new()
    }
}

impl FlashRegisters for FakeFlash {
    fn status(&self) -> FlashStatus {
        self.polls.set(self.polls.get() + 1);
        if self.busy.get() {
            if self.remaining.get() == 0 {
                self.busy.set(false);
                self.fstat.set(FlashStatus::CCIF_MASK | self.pending_fault.get());
            } else {
                self.remaining.set(self.remaining.get() - 1);
            }
        }
        FlashStatus::from_bits(self.fstat.get())
    }

    fn write_status(&mut self, status: FlashStatus) {
        self.writes.push(RegWrite::Status(status.into_bits()));
        // Error flags are write-one-to-clear
        let cleared = status.into_bits() & 0x30;
        self.fstat.set(self.fstat.get() & !cleared);
        if status.ccif() && !self.busy.get() {
            self.launch();
        }
    }

    fn set_clock_divider(&mut self, divider: u8) {
        self.writes.push(RegWrite::Divider(divider));
        self.divider = Some(divider);
    }

    fn select_command_word(&mut self, index: u8) {
        self.writes.push(RegWrite::Index(index));
        self.index = usize::from(index & 0x7);
    }

    fn write_command_word(&mut self, value: u16) {
        self.writes.push(RegWrite::Word(value));
        self.fccob[self.index] = value;
    }
}

std::thread_local! {
    static CS_DEPTH: Cell<u32> = const { Cell::new(0) };
}

/// Critical section for host tests
///
/// Nothing to mask on the host; it only tracks how deeply the current
/// thread is nested so tests can see what ran inside a section.
struct DepthTrackingCriticalSection;
critical_section::set_impl!(DepthTrackingCriticalSection);

unsafe impl critical_section::Impl for DepthTrackingCriticalSection {
    unsafe fn acquire() -> critical_section::RawRestoreState {
        CS_DEPTH.with(|depth| depth.set(depth.get() + 1));
        Default::default()
    }

    unsafe fn release(_restore: critical_section::RawRestoreState) {
        CS_DEPTH.with(|depth| depth.set(depth.get() - 1));
    }
}

/// Critical section nesting depth of the calling thread
pub fn critical_section_depth() -> u32 {
    CS_DEPTH.with(Cell::get)
}

/// Watchdog that records every counter write
#[derive(Debug, Default)]
pub struct FakeWatchdog {
    pub writes: Vec<u16>,
    /// Critical section depth seen by each write
    pub depths: Vec<u32>,
}

impl FakeWatchdog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of complete refresh sequences written
    pub fn refreshes(&self) -> usize {
        self.writes
            .chunks_exact(2)
            .filter(|pair| *pair == <Self as Watchdog>::REFRESH_SEQUENCE)
            .count()
    }
}

impl Watchdog for FakeWatchdog {
    const REFRESH_SEQUENCE: [u16; 2] = [0x02A6, 0x80B4];

    fn write_counter(&mut self, value: u16) {
        self.writes.push(value);
        self.depths.push(critical_section_depth());
    }
}
