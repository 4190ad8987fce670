//! Memory-mapped register access
//!
//! A register is a fixed address plus a width. Construction is unsafe;
//! once a `Reg` exists, reads and writes are volatile and safe to call.

use core::marker::PhantomData;
use core::ptr::{read_volatile, write_volatile};

/// A memory-mapped register of width `T`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reg<T> {
    addr: usize,
    _width: PhantomData<T>,
}

impl<T: Copy> Reg<T> {
    /// Name a register
    ///
    /// # Safety
    ///
    /// `addr` must be a valid, suitably aligned register address of width
    /// `T` on the running part, and accessing it must not break any
    /// invariant held elsewhere in the program.
    pub const unsafe fn new(addr: usize) -> Self {
        Self {
            addr,
            _width: PhantomData,
        }
    }

    /// Address of the register
    pub const fn addr(&self) -> usize {
        self.addr
    }

    /// Volatile read
    #[inline(always)]
    pub fn read(&self) -> T {
        // SAFETY: upheld by the contract of `Reg::new`
        unsafe { read_volatile(self.addr as *const T) }
    }

    /// Volatile write
    #[inline(always)]
    pub fn write(&self, value: T) {
        // SAFETY: upheld by the contract of `Reg::new`
        unsafe { write_volatile(self.addr as *mut T, value) }
    }

    /// Read, transform and write back
    #[inline(always)]
    pub fn modify(&self, f: impl FnOnce(T) -> T) {
        self.write(f(self.read()));
    }
}
