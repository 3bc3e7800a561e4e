
//! Error type definitions.

use std::borrow::Cow;
use std::io::ErrorKind;
pub use std::io::Error as IoError;
pub use std::io::Result as IoResult;
use std::convert::TryFrom;
use std::error;
use std::fmt;

/// A result that may contain a decoding error.
pub type Result<T> = std::result::Result<T, Error>;

/// A result that, if ok, contains nothing, and otherwise contains a decoding error.
pub type UnitResult = Result<()>;


/// An error that may happen while building a Huffman tree or decoding symbols.
/// Distinguishes between two kinds of invalid input:
/// a structurally broken code, and a bit stream that ends too early.
/// Any of these errors leaves the current block unrecoverable.
#[derive(Debug)]
pub enum Error {

    /// The code lengths or the decoded values do not describe a valid block.
    /// For example, two symbols share the same code.
    Invalid(Cow<'static, str>),

    /// The bit source ran out of bits before a symbol was complete.
    Truncated,

    /// The underlying byte stream could not be read.
    Io(IoError),
}


impl Error {

    /// Create an error of the variant `Invalid`.
    pub(crate) fn invalid(message: impl Into<Cow<'static, str>>) -> Self {
        Error::Invalid(message.into())
    }
}

/// Enable using the `?` operator on `std::io::Result`.
impl From<IoError> for Error {
    fn from(error: IoError) -> Self {
        if error.kind() == ErrorKind::UnexpectedEof {
            Error::Truncated
        }
        else {
            Error::Io(error)
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::Io(ref err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => err.fmt(formatter),
            Error::Invalid(message) => write!(formatter, "invalid huffman data: {}", message),
            Error::Truncated => write!(formatter, "bit stream ended in the middle of a symbol"),
        }
    }
}


/// Convert a symbol index to `u16`, returning an error instead of wrapping.
#[inline]
pub(crate) fn usize_to_u16(value: usize, name: &'static str) -> Result<u16> {
    u16::try_from(value).map_err(|_| Error::invalid(name))
}
