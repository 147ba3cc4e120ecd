use sha2::{Digest, Sha256, Sha512};

/// Byte array to byte array converter; the hashing stage of the pipeline.
pub trait ByteArrayConverter: Send + Sync {
    fn convert(&self, value: &[u8]) -> Vec<u8>;
}

pub struct Sha256Converter;

impl ByteArrayConverter for Sha256Converter {
    fn convert(&self, value: &[u8]) -> Vec<u8> {
        let mut hasher = Sha256::new();
        hasher.update(value);
        hasher.finalize().to_vec()
    }
}

pub struct Sha512Converter;

impl ByteArrayConverter for Sha512Converter {
    fn convert(&self, value: &[u8]) -> Vec<u8> {
        let mut hasher = Sha512::new();
        hasher.update(value);
        hasher.finalize().to_vec()
    }
}
