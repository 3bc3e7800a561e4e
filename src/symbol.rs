
//! The symbols of a bzip2 block alphabet.
//! Besides the move-to-front ranks, an alphabet contains
//! two run-length symbols and a symbol that ends the block.

use crate::error::{Error, Result, UnitResult, usize_to_u16};

/// Symbol value of the first run-length digit.
pub const RUN_A: u16 = 0;

/// Symbol value of the second run-length digit.
pub const RUN_B: u16 = 1;

/// Used when all 256 byte values occur in a block.
pub const MAX_ALPHABET_SIZE: usize = 256 + 2;

/// Used when a single byte value occurs in a block.
pub const MIN_ALPHABET_SIZE: usize = 1 + 2;


/// A decoded symbol, interpreted within the alphabet of its block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Symbol {

    /// Adds one times the current digit weight to the run of the front byte.
    RunA,

    /// Adds two times the current digit weight to the run of the front byte.
    RunB,

    /// Moves the byte at this rank to the front of the list.
    /// The rank is never zero, as repeating the front byte is expressed by runs.
    MoveToFront(u8),

    /// The last symbol of the block.
    EndOfBlock,
}

impl Symbol {

    /// Interpret a symbol value in an alphabet of `alphabet_size` symbols,
    /// which are the symbols in use plus the two run-length symbols.
    pub fn from_value(value: u16, alphabet_size: usize) -> Result<Self> {
        check_alphabet_size(alphabet_size)?;
        let end_of_block = usize_to_u16(alphabet_size - 1, "alphabet size")?;

        Ok(match value {
            RUN_A => Symbol::RunA,
            RUN_B => Symbol::RunB,
            value if value == end_of_block => Symbol::EndOfBlock,
            value if value < end_of_block => Symbol::MoveToFront((value - 1) as u8), // at most 256 - 1
            _ => return Err(Error::invalid("symbol outside of block alphabet")),
        })
    }

    /// The symbol value within an alphabet of `alphabet_size` symbols.
    /// Panics if the alphabet size is not within `MIN_ALPHABET_SIZE ..= MAX_ALPHABET_SIZE`.
    pub fn to_value(self, alphabet_size: usize) -> u16 {
        assert!(check_alphabet_size(alphabet_size).is_ok(), "alphabet size out of range");

        match self {
            Symbol::RunA => RUN_A,
            Symbol::RunB => RUN_B,
            Symbol::MoveToFront(rank) => u16::from(rank) + 1,
            Symbol::EndOfBlock => (alphabet_size - 1) as u16,
        }
    }

    /// Whether this symbol is one of the run-length digits.
    pub fn is_run(self) -> bool {
        matches!(self, Symbol::RunA | Symbol::RunB)
    }
}

/// Reject alphabets which cannot occur in a block.
pub(crate) fn check_alphabet_size(alphabet_size: usize) -> UnitResult {
    if alphabet_size < MIN_ALPHABET_SIZE || alphabet_size > MAX_ALPHABET_SIZE {
        Err(Error::invalid("alphabet size"))
    }
    else {
        Ok(())
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn smallest_alphabet(){
        assert_eq!(Symbol::from_value(0, MIN_ALPHABET_SIZE).unwrap(), Symbol::RunA);
        assert_eq!(Symbol::from_value(1, MIN_ALPHABET_SIZE).unwrap(), Symbol::RunB);
        assert_eq!(Symbol::from_value(2, MIN_ALPHABET_SIZE).unwrap(), Symbol::EndOfBlock);
        assert!(Symbol::from_value(3, MIN_ALPHABET_SIZE).is_err());
    }

    #[test]
    fn largest_alphabet(){
        assert_eq!(Symbol::from_value(2, MAX_ALPHABET_SIZE).unwrap(), Symbol::MoveToFront(1));
        assert_eq!(Symbol::from_value(256, MAX_ALPHABET_SIZE).unwrap(), Symbol::MoveToFront(255));
        assert_eq!(Symbol::from_value(257, MAX_ALPHABET_SIZE).unwrap(), Symbol::EndOfBlock);
        assert!(matches!(Symbol::from_value(258, MAX_ALPHABET_SIZE), Err(Error::Invalid(_))));
    }

    #[test]
    fn alphabet_size_is_checked(){
        for &alphabet_size in &[0, 1, 2, MAX_ALPHABET_SIZE + 1, 300, 65_536 + 3] {
            assert!(
                matches!(Symbol::from_value(2, alphabet_size), Err(Error::Invalid(_))),
                "alphabet size {}", alphabet_size
            );
        }
    }

    #[test]
    #[should_panic]
    fn value_in_oversized_alphabet_is_a_contract_violation(){
        let _ = Symbol::EndOfBlock.to_value(MAX_ALPHABET_SIZE + 1);
    }

    #[test]
    fn values_survive_interpretation(){
        let alphabet_size = 40;

        for value in 0 .. alphabet_size as u16 {
            let symbol = Symbol::from_value(value, alphabet_size).unwrap();
            assert_eq!(symbol.to_value(alphabet_size), value);
            assert_eq!(symbol.is_run(), value < 2);
        }
    }
}
