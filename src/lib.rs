
//! Decode the Huffman coded symbols of bzip2 blocks.
//!
//! Every bzip2 block transmits nothing but the code length of each symbol.
//! A `HuffmanTree` reconstructs the canonical codes from these lengths,
//! tolerating the superfluous tree levels that some encoders produce,
//! and then decodes one symbol at a time from a `BitSource`.
//!
//! ```
//! use bzip2_huffman::prelude::*;
//!
//! // symbol 0 is "0", symbol 1 is "10", symbol 2 is "11"
//! let tree = HuffmanTree::new(&[1, 2, 2]).unwrap();
//!
//! let bytes: &[u8] = &[0b1101_0000];
//! let mut bits = BitReader::new(bytes);
//!
//! assert_eq!(tree.decode(&mut bits).unwrap(), 2);
//! assert_eq!(tree.decode(&mut bits).unwrap(), 0);
//! assert_eq!(tree.decode(&mut bits).unwrap(), 1);
//! ```

#![warn(
    rust_2018_idioms,
    future_incompatible,
    unused_extern_crates,
    unused,

    missing_debug_implementations,

    clippy::all,
    clippy::restriction,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
)]

#![deny(
    unused_variables,
    unused_assignments,
    dead_code,
    unused_must_use,
    missing_copy_implementations,
    trivial_numeric_casts,
    redundant_semicolons
)]

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod io;
pub mod huffman;
pub mod symbol;
pub mod block;
pub mod error;


/// Export the most important items from `bzip2_huffman`.
/// _Note: This includes a type called `Result`, possibly overwriting the default `std::Result` type usage._
pub mod prelude {

    // main exports
    pub use crate::huffman::HuffmanTree;
    pub use crate::io::{BitSource, BitReader};

    // secondary data types
    pub use crate::block::{HuffmanTables, SymbolStream};
    pub use crate::symbol::Symbol;

    pub use crate::error::{Result, Error};
}
