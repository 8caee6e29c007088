//! Bit-level writer for the data stream
//!
//! Bits are packed most significant first; a partially written final byte
//! is zero-filled on the right.

use alloc::vec::Vec;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitBuffer {
    data: Vec<u8>,
    bit_len: usize,
}

impl BitBuffer {
    /// Creates a new empty buffer
    ///
    /// # Example
    ///```
    /// use tiny_qr_encoding::BitBuffer;
    /// let mut buffer = BitBuffer::new();
    /// assert!(buffer.data().is_empty());
    /// buffer.append_bytes(&[1, 2, 3]);
    /// assert_eq!(buffer.data(), [1, 2, 3]);
    ///```
    #[must_use]
    pub const fn new() -> Self {
        Self {
            data: Vec::new(),
            bit_len: 0,
        }
    }

    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            data: Vec::with_capacity(bytes),
            bit_len: 0,
        }
    }

    /// Number of bits written so far
    #[must_use]
    pub const fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Whole bytes and leftover bits written so far
    ///
    /// # Example
    ///```
    /// use tiny_qr_encoding::BitBuffer;
    /// let mut buffer = BitBuffer::new();
    /// buffer.append_bytes(&[1, 2, 3]);
    /// buffer.append_bits(&[true, false, true, false]);
    /// assert_eq!(buffer.byte_bit_len(), (3, 4));
    ///```
    #[must_use]
    pub const fn byte_bit_len(&self) -> (usize, usize) {
        (self.bit_len / 8, self.bit_len % 8)
    }

    #[must_use]
    pub const fn is_byte_aligned(&self) -> bool {
        self.bit_len % 8 == 0
    }

    /// Adds a single bit to the buffer
    ///
    /// # Example
    ///```
    /// use tiny_qr_encoding::BitBuffer;
    /// let mut buffer = BitBuffer::new();
    /// buffer.append_bit(true);
    /// buffer.append_bit(false);
    /// buffer.append_bit(true);
    /// assert_eq!(buffer.data(), [0b1010_0000]);
    ///```
    pub fn append_bit(&mut self, bit: bool) {
        let (byte_len, bit_offset) = self.byte_bit_len();
        if bit_offset == 0 {
            self.data.push(0);
        }
        if bit {
            self.data[byte_len] |= 1 << (7 - bit_offset);
        }
        self.bit_len += 1;
    }

    pub fn append_bits(&mut self, bits: &[bool]) {
        for &bit in bits {
            self.append_bit(bit);
        }
    }

    pub fn append_byte(&mut self, byte: u8) {
        if self.is_byte_aligned() {
            self.data.push(byte);
            self.bit_len += 8;
        } else {
            self.append_number(u32::from(byte), 8);
        }
    }

    pub fn append_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.append_byte(byte);
        }
    }

    /// Adds the low `bit_len` bits of `number`, most significant first
    ///
    /// # Example
    ///```
    /// use tiny_qr_encoding::BitBuffer;
    /// let mut buffer = BitBuffer::new();
    /// buffer.append_number(3, 4);
    /// buffer.append_number(0b11_1100, 6);
    /// buffer.append_number(2, 2);
    /// assert_eq!(buffer.data(), [0b0011_1111, 0b0010_0000]);
    ///```
    pub fn append_number(&mut self, number: u32, bit_len: usize) {
        debug_assert!(bit_len <= 32, "cannot append {bit_len} bits from a u32");
        for index in (0..bit_len).rev() {
            self.append_bit((number >> index) & 1 != 0);
        }
    }

    /// All written data, including a partial final byte
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}
