use crate::{Result, StoreError};

/// Turns a save line into stored bytes and back.
///
/// Encryption of saves lives behind this trait; the store only ever sees the
/// plaintext line on one side and opaque bytes on the other.
pub trait SaveCipher {
    fn seal(&self, plaintext: &str) -> Vec<u8>;
    fn open(&self, sealed: &[u8]) -> Result<String>;
}

/// Stores saves as-is.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Plaintext;

impl SaveCipher for Plaintext {
    fn seal(&self, plaintext: &str) -> Vec<u8> {
        plaintext.as_bytes().to_vec()
    }

    fn open(&self, sealed: &[u8]) -> Result<String> {
        String::from_utf8(sealed.to_vec()).map_err(|err| StoreError::Cipher(err.to_string()))
    }
}
