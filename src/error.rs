//! Crate error type

use embedded_storage_async::nor_flash::NorFlashErrorKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Configuration payload ended in the middle of a key/value pair
    Truncated,
    /// Settings flash could not be read, erased or written
    Flash(NorFlashErrorKind),
}

impl From<NorFlashErrorKind> for Error {
    fn from(kind: NorFlashErrorKind) -> Self {
        Error::Flash(kind)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::Truncated => defmt::write!(f, "truncated configuration payload"),
            Error::Flash(NorFlashErrorKind::NotAligned) => defmt::write!(f, "flash: not aligned"),
            Error::Flash(NorFlashErrorKind::OutOfBounds) => {
                defmt::write!(f, "flash: out of bounds")
            }
            Error::Flash(_) => defmt::write!(f, "flash: other"),
        }
    }
}
