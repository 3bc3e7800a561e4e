
//! Bit-level input for decoding Huffman codes.
//! Uses the error handling for this crate.

pub use ::std::io::Read;
use lebe::prelude::*;
use crate::error::{Result, UnitResult};


/// Supplies the bits of a compressed block, most significant bit first.
pub trait BitSource {

    /// Read the next `count` bits as an unsigned integer, the first bit being the most significant.
    /// Supports `1 ..= 64` bits. Returns `Error::Truncated` if the stream ends early.
    fn read_bits(&mut self, count: u32) -> Result<u64>;

    /// Return the next bit if it has already been buffered, without touching the underlying stream.
    /// Sources without a buffer may leave this unimplemented, then every bit goes through `read_bits`.
    #[inline]
    fn take_buffered_bit(&mut self) -> Option<u8> { None }

    /// Read a single bit, preferring buffered bits over a refill.
    #[inline]
    fn read_bit(&mut self) -> Result<u8> {
        match self.take_buffered_bit() {
            Some(bit) => Ok(bit),
            None => Ok(self.read_bits(1)? as u8),
        }
    }
}


/// Reads bits from a byte stream, refilling one byte at a time.
/// The first bit of each byte is its most significant bit.
#[derive(Debug)]
pub struct BitReader<R> {

    /// Do not expose to prevent reading bytes behind the buffered bits.
    inner: R,

    /// The lowest `bit_count` bits have not been consumed yet.
    buffer: u64,
    bit_count: u32,
}

impl<R: Read> BitReader<R> {

    /// Start reading bits at the current position of the byte stream.
    pub fn new(inner: R) -> Self {
        BitReader { inner, buffer: 0, bit_count: 0 }
    }

    /// Number of bits that can be read without touching the byte stream.
    #[inline]
    pub fn buffered_bit_count(&self) -> u32 {
        self.bit_count
    }

    /// Discard the buffered bits and return the byte stream.
    pub fn into_inner(self) -> R {
        self.inner
    }

    #[inline]
    fn refill_byte(&mut self) -> UnitResult {
        let byte = u8::read_from_little_endian(&mut self.inner)?;
        self.buffer = (self.buffer << 8) | u64::from(byte);
        self.bit_count += 8;
        Ok(())
    }

    /// At most 39 bits are held at once, so the buffer never loses unread bits.
    #[inline]
    fn read_bits_leq32(&mut self, count: u32) -> Result<u64> {
        debug_assert!(count >= 1 && count <= 32, "bit count out of range");

        while self.bit_count < count {
            self.refill_byte()?;
        }

        self.bit_count -= count;
        Ok((self.buffer >> self.bit_count) & ((1_u64 << count) - 1))
    }
}

impl<R: Read> BitSource for BitReader<R> {
    fn read_bits(&mut self, count: u32) -> Result<u64> {
        assert!(count >= 1 && count <= 64, "can only read 1 to 64 bits at once");

        if count <= 32 {
            self.read_bits_leq32(count)
        }
        else {
            let high = self.read_bits_leq32(count - 32)?;
            let low = self.read_bits_leq32(32)?;
            Ok((high << 32) | low)
        }
    }

    #[inline]
    fn take_buffered_bit(&mut self) -> Option<u8> {
        if self.bit_count > 0 {
            self.bit_count -= 1;
            Some(((self.buffer >> self.bit_count) & 1) as u8)
        }
        else {
            None
        }
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::error::Error;

    #[test]
    fn most_significant_bit_first(){
        let bytes: &[u8] = &[0b1010_0000, 0xff];
        let mut reader = BitReader::new(bytes);

        assert_eq!(reader.read_bits(1).unwrap(), 1);
        assert_eq!(reader.read_bits(1).unwrap(), 0);
        assert_eq!(reader.read_bits(2).unwrap(), 0b10);
        assert_eq!(reader.buffered_bit_count(), 4);

        // crosses the byte boundary
        assert_eq!(reader.read_bits(8).unwrap(), 0b0000_1111);
        assert_eq!(reader.read_bits(4).unwrap(), 0b1111);
        assert!(matches!(reader.read_bits(1), Err(Error::Truncated)));
    }

    #[test]
    fn buffered_bits_are_used_before_refill(){
        let bytes: &[u8] = &[0b1100_0000];
        let mut reader = BitReader::new(bytes);

        assert_eq!(reader.take_buffered_bit(), None);
        assert_eq!(reader.read_bit().unwrap(), 1);
        assert_eq!(reader.buffered_bit_count(), 7);

        assert_eq!(reader.take_buffered_bit(), Some(1));
        assert_eq!(reader.take_buffered_bit(), Some(0));
        assert_eq!(reader.buffered_bit_count(), 5);

        let remaining = reader.into_inner();
        assert!(remaining.is_empty());
    }

    #[test]
    fn read_wide_values(){
        let bytes: Vec<u8> = (1 ..= 9).collect();
        let mut reader = BitReader::new(bytes.as_slice());

        assert_eq!(reader.read_bits(4).unwrap(), 0);
        assert_eq!(reader.read_bits(64).unwrap(), 0x1020_3040_5060_7080);
        assert_eq!(reader.read_bits(4).unwrap(), 9);
    }

    #[test]
    fn partial_read_fails_at_end(){
        let bytes: &[u8] = &[0xab];
        let mut reader = BitReader::new(bytes);
        assert!(matches!(reader.read_bits(9), Err(Error::Truncated)));
    }
}
