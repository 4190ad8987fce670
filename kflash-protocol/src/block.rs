//! Command block layout and data packing

use core::mem::{offset_of, size_of};

use crate::status::StatusWord;

/// Capacity of the data buffer, in words
pub const BUFFER_LEN: usize = 64;

/// Size of one buffer word in bytes
pub const WORD_BYTES: usize = 4;

/// Largest byte run a single program command can carry
pub const MAX_PROGRAM_BYTES: usize = BUFFER_LEN * WORD_BYTES;

/// Byte offset of `status` within the block
pub const STATUS_OFFSET: usize = 0x00;
/// Byte offset of `address` within the block
pub const ADDRESS_OFFSET: usize = 0x04;
/// Byte offset of `length` within the block
pub const LENGTH_OFFSET: usize = 0x08;
/// Byte offset of `buffer` within the block
pub const BUFFER_OFFSET: usize = 0x0C;

/// The structure shared between host and loader
///
/// Lives at a fixed address for the whole run of the firmware. Fields are
/// plain words here; the firmware accesses its static instance through
/// volatile reads and writes since the host changes it behind the CPU's back.
#[derive(Debug, Clone, PartialEq, Eq)]
#[repr(C)]
pub struct CommandBlock {
    /// Packed status word, see [`StatusWord`]
    pub status: u32,
    /// Target flash byte address for a program command
    pub address: u32,
    /// Number of buffer words to program
    pub length: u32,
    /// Data words, little-endian packing of the image bytes
    pub buffer: [u32; BUFFER_LEN],
}

const _: () = {
    assert!(offset_of!(CommandBlock, status) == STATUS_OFFSET);
    assert!(offset_of!(CommandBlock, address) == ADDRESS_OFFSET);
    assert!(offset_of!(CommandBlock, length) == LENGTH_OFFSET);
    assert!(offset_of!(CommandBlock, buffer) == BUFFER_OFFSET);
    assert!(size_of::<CommandBlock>() == BUFFER_OFFSET + MAX_PROGRAM_BYTES);
};

impl Default for CommandBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandBlock {
    /// All-zero block, as left by startup before the loader initializes it
    pub const fn new() -> Self {
        Self {
            status: 0,
            address: 0,
            length: 0,
            buffer: [0; BUFFER_LEN],
        }
    }

    /// Typed view of the status word
    pub fn status_word(&self) -> StatusWord {
        StatusWord::from_bits(self.status)
    }
}

/// Pack image bytes into buffer words
///
/// Byte 0 lands in bits 0-7 of the first word. A trailing partial word is
/// padded with zero bytes, matching what the host tooling sends.
pub fn pack_words(bytes: &[u8]) -> impl Iterator<Item = u32> + '_ {
    bytes.chunks(WORD_BYTES).map(|chunk| {
        let mut word = [0u8; WORD_BYTES];
        word[..chunk.len()].copy_from_slice(chunk);
        u32::from_le_bytes(word)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_size() {
        assert_eq!(size_of::<CommandBlock>(), 268);
    }

    #[test]
    fn test_new_block_is_not_ready() {
        let block = CommandBlock::new();
        assert!(!block.status_word().ready());
    }

    #[test]
    fn test_pack_words_little_endian() {
        let words: Vec<u32> = pack_words(&[0x01, 0x02, 0x03, 0x04, 0xAA, 0xBB, 0xCC, 0xDD]).collect();
        assert_eq!(words, vec![0x0403_0201, 0xDDCC_BBAA]);
    }

    #[test]
    fn test_pack_words_pads_tail_with_zero() {
        let words: Vec<u32> = pack_words(&[0x11, 0x22, 0x33, 0x44, 0x55]).collect();
        assert_eq!(words, vec![0x4433_2211, 0x0000_0055]);
    }

    #[test]
    fn test_pack_words_empty() {
        assert_eq!(pack_words(&[]).count(), 0);
    }
}
