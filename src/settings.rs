//! Persisted face settings
//!
//! Settings live in a single 8 byte record at the start of a reserved flash
//! page:
//!
//! | byte | content                    |
//! |------|----------------------------|
//! | 0..2 | magic `"PF"`               |
//! | 2    | record version             |
//! | 3    | face mode (raw `i8`)       |
//! | 4    | show extra (`0` or `1`)    |
//! | 5..7 | reserved, `0xff`           |
//! | 7    | XOR of bytes 0..7          |
//!
//! An erased page or a damaged record reads back as the defaults.

use embedded_storage_async::nor_flash::{NorFlash, NorFlashError};

use crate::error::Error;

const MAGIC: [u8; 2] = *b"PF";
const VERSION: u8 = 1;
pub const RECORD_LEN: usize = 8;

/// Which face is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaceMode {
    /// Digital time, date and battery meter
    #[default]
    Text = 1,
    /// Outline circle with hour and minute hands
    Circular = 2,
}

impl FaceMode {
    /// Anything but `2` selects the text face.
    pub fn from_raw(raw: i8) -> Self {
        match raw {
            2 => FaceMode::Circular,
            _ => FaceMode::Text,
        }
    }

    pub fn as_raw(self) -> i8 {
        self as i8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    pub face_mode: FaceMode,
    /// Received and persisted, never drawn
    pub show_extra: bool,
}

impl Settings {
    pub fn to_record(&self) -> [u8; RECORD_LEN] {
        let mut record = [
            MAGIC[0],
            MAGIC[1],
            VERSION,
            self.face_mode.as_raw() as u8,
            self.show_extra as u8,
            0xff,
            0xff,
            0,
        ];
        record[RECORD_LEN - 1] = checksum(&record[..RECORD_LEN - 1]);
        record
    }

    /// Parse a record, `None` if it is erased or damaged.
    pub fn from_record(record: &[u8; RECORD_LEN]) -> Option<Self> {
        if record[..2] != MAGIC || record[2] != VERSION {
            return None;
        }
        if checksum(&record[..RECORD_LEN - 1]) != record[RECORD_LEN - 1] {
            return None;
        }

        Some(Self {
            face_mode: FaceMode::from_raw(record[3] as i8),
            show_extra: record[4] != 0,
        })
    }
}

fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0, |acc, b| acc ^ b)
}

/// Storage for the face settings
#[allow(async_fn_in_trait)]
pub trait SettingsStore {
    type Error;

    /// Read the settings once at startup.
    async fn load(&mut self) -> Result<Settings, Self::Error>;

    /// Write the settings after every configuration update.
    async fn save(&mut self, settings: &Settings) -> Result<(), Self::Error>;
}

/// Settings stored on one erase page of a NOR flash
pub struct FlashSettings<F> {
    flash: F,
    /// Start of the reserved page, must be aligned to `F::ERASE_SIZE`
    offset: u32,
}

impl<F> FlashSettings<F>
where
    F: NorFlash,
{
    pub fn new(flash: F, offset: u32) -> Self {
        Self { flash, offset }
    }

    pub fn release(self) -> F {
        self.flash
    }
}

impl<F> SettingsStore for FlashSettings<F>
where
    F: NorFlash,
{
    type Error = Error;

    async fn load(&mut self) -> Result<Settings, Error> {
        let mut record = [0; RECORD_LEN];
        self.flash
            .read(self.offset, &mut record)
            .await
            .map_err(|e| e.kind())?;

        match Settings::from_record(&record) {
            Some(settings) => Ok(settings),
            None => {
                #[cfg(feature = "defmt")]
                defmt::warn!("No valid settings record, using defaults");
                Ok(Settings::default())
            }
        }
    }

    async fn save(&mut self, settings: &Settings) -> Result<(), Error> {
        let page_end = self.offset + F::ERASE_SIZE as u32;
        self.flash
            .erase(self.offset, page_end)
            .await
            .map_err(|e| e.kind())?;
        self.flash
            .write(self.offset, &settings.to_record())
            .await
            .map_err(|e| e.kind())?;

        #[cfg(feature = "defmt")]
        defmt::info!("Settings saved: {}", settings);

        Ok(())
    }
}
