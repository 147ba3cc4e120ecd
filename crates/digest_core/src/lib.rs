use std::{str::FromStr, sync::Arc};

use serde::{Deserialize, Serialize};
use shared::{
    error::{ApiError, ErrorCode},
    protocol::DigestReport,
};
use thiserror::Error;

pub mod convert;
pub mod decode;
pub mod encode;

pub use convert::{ByteArrayConverter, Sha256Converter, Sha512Converter};
pub use decode::{Base64Decoder, DecodeError, HexDecoder, StringDecoder, Utf8Decoder};
pub use encode::{Base64Encoder, ByteArrayEncoder, HexEncoder};

#[derive(Debug, Error)]
#[error("unknown {kind} selector '{value}'")]
pub struct UnknownSelector {
    kind: &'static str,
    value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputEncoding {
    Utf8,
    Hex,
    Base64,
}

impl FromStr for InputEncoding {
    type Err = UnknownSelector;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "utf8" => Ok(Self::Utf8),
            "hex" => Ok(Self::Hex),
            "base64" => Ok(Self::Base64),
            other => Err(UnknownSelector {
                kind: "input encoding",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DigestAlgorithm {
    Sha256,
    Sha512,
}

impl FromStr for DigestAlgorithm {
    type Err = UnknownSelector;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sha256" => Ok(Self::Sha256),
            "sha512" => Ok(Self::Sha512),
            other => Err(UnknownSelector {
                kind: "digest algorithm",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputEncoding {
    Hex,
    Base64,
}

impl FromStr for OutputEncoding {
    type Err = UnknownSelector;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hex" => Ok(Self::Hex),
            "base64" => Ok(Self::Base64),
            other => Err(UnknownSelector {
                kind: "output encoding",
                value: other.to_string(),
            }),
        }
    }
}

/// Decode, convert, encode. The three stages are seams: any combination of
/// implementations forms a valid pipeline.
pub struct DigestPipeline {
    decoder: Box<dyn StringDecoder>,
    converter: Box<dyn ByteArrayConverter>,
    encoder: Box<dyn ByteArrayEncoder>,
}

impl DigestPipeline {
    pub fn new(
        decoder: Box<dyn StringDecoder>,
        converter: Box<dyn ByteArrayConverter>,
        encoder: Box<dyn ByteArrayEncoder>,
    ) -> Self {
        Self {
            decoder,
            converter,
            encoder,
        }
    }

    pub fn from_selectors(
        input: InputEncoding,
        algorithm: DigestAlgorithm,
        output: OutputEncoding,
    ) -> Self {
        let decoder: Box<dyn StringDecoder> = match input {
            InputEncoding::Utf8 => Box::new(Utf8Decoder),
            InputEncoding::Hex => Box::new(HexDecoder),
            InputEncoding::Base64 => Box::new(Base64Decoder),
        };
        let converter: Box<dyn ByteArrayConverter> = match algorithm {
            DigestAlgorithm::Sha256 => Box::new(Sha256Converter),
            DigestAlgorithm::Sha512 => Box::new(Sha512Converter),
        };
        let encoder: Box<dyn ByteArrayEncoder> = match output {
            OutputEncoding::Hex => Box::new(HexEncoder),
            OutputEncoding::Base64 => Box::new(Base64Encoder),
        };
        Self::new(decoder, converter, encoder)
    }

    pub fn digest(&self, target: &str) -> Result<DigestReport, DecodeError> {
        let decoded = self.decoder.decode(target)?;
        let converted = self.converter.convert(&decoded);
        Ok(DigestReport {
            raw: target.to_string(),
            digest: self.encoder.encode(&converted),
        })
    }
}

impl Default for DigestPipeline {
    fn default() -> Self {
        Self::from_selectors(
            InputEncoding::Utf8,
            DigestAlgorithm::Sha256,
            OutputEncoding::Hex,
        )
    }
}

#[derive(Clone)]
pub struct ApiContext {
    pub pipeline: Arc<DigestPipeline>,
}

pub fn compute_digest(ctx: &ApiContext, target: &str) -> Result<DigestReport, ApiError> {
    ctx.pipeline
        .digest(target)
        .map_err(|e| ApiError::new(ErrorCode::Validation, e.to_string()))
}
