//! Configuration messages from the companion app
//!
//! A message is a sequence of `(key: u8, value: i8)` pairs written to the
//! configuration characteristic. Unknown keys are skipped.

use crate::error::Error;
use crate::settings::FaceMode;

/// Face mode, `1` text, `2` circular
pub const FACE_MODE: u8 = 0;
/// Show extra decorations, stored but unused
pub const SHOW_GIFS: u8 = 1;

/// Settings carried by one message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigMessage {
    pub face_mode: Option<FaceMode>,
    pub show_extra: Option<bool>,
}

impl ConfigMessage {
    /// Decode a raw payload. Later pairs override earlier ones.
    pub fn decode(payload: &[u8]) -> Result<Self, Error> {
        let pairs = payload.chunks_exact(2);
        if !pairs.remainder().is_empty() {
            return Err(Error::Truncated);
        }

        let mut message = Self::default();
        for pair in pairs {
            let value = pair[1] as i8;
            match pair[0] {
                FACE_MODE => message.face_mode = Some(FaceMode::from_raw(value)),
                SHOW_GIFS => message.show_extra = Some(value != 0),
                _key => {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("Ignoring configuration key {}", _key);
                }
            }
        }

        Ok(message)
    }

    /// Encode the message, used by tests and the companion side.
    pub fn encode<'a>(&self, buf: &'a mut [u8; 4]) -> &'a [u8] {
        let mut len = 0;
        if let Some(mode) = self.face_mode {
            buf[len] = FACE_MODE;
            buf[len + 1] = mode.as_raw() as u8;
            len += 2;
        }
        if let Some(show_extra) = self.show_extra {
            buf[len] = SHOW_GIFS;
            buf[len + 1] = show_extra as u8;
            len += 2;
        }
        &buf[..len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_both_keys() {
        let message = ConfigMessage::decode(&[FACE_MODE, 2, SHOW_GIFS, 1]).unwrap();

        assert_eq!(message.face_mode, Some(FaceMode::Circular));
        assert_eq!(message.show_extra, Some(true));
    }

    #[test]
    fn missing_keys_stay_unset() {
        let message = ConfigMessage::decode(&[SHOW_GIFS, 0]).unwrap();
        assert_eq!(message.face_mode, None);
        assert_eq!(message.show_extra, Some(false));

        assert_eq!(ConfigMessage::decode(&[]).unwrap(), ConfigMessage::default());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let message = ConfigMessage::decode(&[7, 42, FACE_MODE, 1, 200, 0xff]).unwrap();

        assert_eq!(message.face_mode, Some(FaceMode::Text));
        assert_eq!(message.show_extra, None);
    }

    #[test]
    fn unexpected_mode_falls_back_to_text() {
        let message = ConfigMessage::decode(&[FACE_MODE, 9]).unwrap();
        assert_eq!(message.face_mode, Some(FaceMode::Text));
    }

    #[test]
    fn odd_length_is_truncated() {
        assert_eq!(ConfigMessage::decode(&[FACE_MODE]), Err(Error::Truncated));
        assert_eq!(ConfigMessage::decode(&[FACE_MODE, 2, SHOW_GIFS]), Err(Error::Truncated));
    }

    #[test]
    fn encode_matches_decode() {
        let message = ConfigMessage {
            face_mode: Some(FaceMode::Circular),
            show_extra: Some(true),
        };
        let mut buf = [0; 4];

        assert_eq!(message.encode(&mut buf), &[FACE_MODE, 2, SHOW_GIFS, 1]);
    }
}
