use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Byte array to string encoder; the final stage of the digest pipeline.
pub trait ByteArrayEncoder: Send + Sync {
    fn encode(&self, decoded: &[u8]) -> String;
}

/// Lowercase hex, the conventional rendering for digest values.
pub struct HexEncoder;

impl ByteArrayEncoder for HexEncoder {
    fn encode(&self, decoded: &[u8]) -> String {
        hex::encode(decoded)
    }
}

pub struct Base64Encoder;

impl ByteArrayEncoder for Base64Encoder {
    fn encode(&self, decoded: &[u8]) -> String {
        STANDARD.encode(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_encoder_is_lowercase() {
        assert_eq!(HexEncoder.encode(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
    }

    #[test]
    fn base64_encoder_pads_standard_alphabet() {
        assert_eq!(Base64Encoder.encode(b"abc"), "YWJj");
        assert_eq!(Base64Encoder.encode(b"ab"), "YWI=");
    }

    #[test]
    fn encoders_render_empty_input_as_empty_string() {
        assert_eq!(HexEncoder.encode(&[]), "");
        assert_eq!(Base64Encoder.encode(&[]), "");
    }
}
