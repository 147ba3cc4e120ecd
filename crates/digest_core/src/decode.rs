use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid hex target: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("invalid base64 target: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// String to byte array decoder; the first stage of the digest pipeline.
pub trait StringDecoder: Send + Sync {
    fn decode(&self, encoded: &str) -> Result<Vec<u8>, DecodeError>;
}

/// Treats the target as literal text and digests its UTF-8 bytes.
pub struct Utf8Decoder;

impl StringDecoder for Utf8Decoder {
    fn decode(&self, encoded: &str) -> Result<Vec<u8>, DecodeError> {
        Ok(encoded.as_bytes().to_vec())
    }
}

pub struct HexDecoder;

impl StringDecoder for HexDecoder {
    fn decode(&self, encoded: &str) -> Result<Vec<u8>, DecodeError> {
        Ok(hex::decode(encoded)?)
    }
}

pub struct Base64Decoder;

impl StringDecoder for Base64Decoder {
    fn decode(&self, encoded: &str) -> Result<Vec<u8>, DecodeError> {
        Ok(STANDARD.decode(encoded)?)
    }
}
