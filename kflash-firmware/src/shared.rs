//! The command block shared with the host
//!
//! The host finds the block through the `flash_api_state` symbol in the
//! map file and reads and writes it over SWD while the core runs. Every
//! access from this side is volatile.

use core::cell::Cell;
use core::ptr::{addr_of, addr_of_mut, read_volatile, write_volatile};

use critical_section::Mutex;
use kflash_core::interface::{CommandPort, Outcome, RequestView};
use kflash_protocol::{CommandBlock, StatusWord, BUFFER_LEN};

#[export_name = "flash_api_state"]
#[link_section = ".flash_api_state"]
static mut FLASH_API_STATE: CommandBlock = CommandBlock::new();

static TAKEN: Mutex<Cell<bool>> = Mutex::new(Cell::new(false));

/// Volatile port onto the shared block
pub struct SharedBlock {
    block: *mut CommandBlock,
}

impl SharedBlock {
    /// Get the port
    ///
    /// Returns `None` on every call after the first.
    pub fn take() -> Option<Self> {
        critical_section::with(|cs| {
            let taken = TAKEN.borrow(cs);
            if taken.get() {
                return None;
            }
            taken.set(true);
            Some(Self {
                // SAFETY: only the address is taken, no reference is formed
                block: unsafe { addr_of_mut!(FLASH_API_STATE) },
            })
        })
    }

    /// Address of the block in memory
    pub fn location(&self) -> usize {
        self.block as usize
    }

    fn write_status(&mut self, status: StatusWord) {
        // SAFETY: `block` points at the static for the life of the program
        // and this port is the only writer on the loader side
        unsafe { write_volatile(addr_of_mut!((*self.block).status), status.into_bits()) }
    }
}

impl RequestView for SharedBlock {
    fn status(&self) -> StatusWord {
        // SAFETY: see `write_status`
        StatusWord::from_bits(unsafe { read_volatile(addr_of!((*self.block).status)) })
    }

    fn address(&self) -> u32 {
        // SAFETY: see `write_status`
        unsafe { read_volatile(addr_of!((*self.block).address)) }
    }

    fn length(&self) -> u32 {
        // SAFETY: see `write_status`
        unsafe { read_volatile(addr_of!((*self.block).length)) }
    }

    fn word(&self, index: usize) -> u32 {
        if index >= BUFFER_LEN {
            return 0;
        }
        // SAFETY: see `write_status`; index checked against the buffer length
        unsafe {
            let buffer = addr_of!((*self.block).buffer).cast::<u32>();
            read_volatile(buffer.add(index))
        }
    }
}

impl CommandPort for SharedBlock {
    fn initialize(&mut self) {
        self.write_status(StatusWord::idle());
    }

    fn complete(&mut self, outcome: Outcome) {
        let request = RequestView::status(self);
        self.write_status(outcome.status_for(request));
    }
}
