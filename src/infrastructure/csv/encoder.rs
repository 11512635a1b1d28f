// ============================================================
// CSV ENCODER
// ============================================================
// Convert formatted CSV text into the target character encoding

use encoding_rs::{Encoding, EncoderResult, UTF_8};
use tracing::warn;

use crate::domain::error::{AppError, Result};

/// Encoder for a single target encoding
#[derive(Debug, Clone, Copy)]
pub struct CsvEncoder {
    encoding: &'static Encoding,
}

impl CsvEncoder {
    /// Resolve an encoding label such as `WINDOWS-1252` or `utf-8`.
    ///
    /// Only encodings `encoding_rs` can write are accepted: UTF-16LE/BE and
    /// `replacement` are decode-only there and fail with `EncodingError`.
    pub fn for_label(label: &str) -> Result<Self> {
        let encoding = Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| {
            warn!("Rejected unknown CSV encoding label {:?}", label);
            AppError::EncodingError(format!("Unsupported encoding: {}", label))
        })?;

        // UTF-16 and the replacement encoding never produce their own bytes
        if encoding.output_encoding() != encoding {
            warn!("Rejected CSV encoding {} (not an output encoding)", encoding.name());
            return Err(AppError::EncodingError(format!(
                "{} cannot be used to encode output",
                encoding.name()
            )));
        }

        Ok(Self { encoding })
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }

    /// Encode `text`, failing on the first character the encoding cannot represent
    pub fn encode(&self, text: &str) -> Result<Vec<u8>> {
        if self.encoding == UTF_8 {
            return Ok(text.as_bytes().to_vec());
        }

        let mut encoder = self.encoding.new_encoder();
        let capacity = encoder
            .max_buffer_length_from_utf8_without_replacement(text.len())
            .ok_or_else(|| AppError::EncodingError("CSV payload too large to encode".to_string()))?;
        let mut output = Vec::with_capacity(capacity);

        let (result, _read) =
            encoder.encode_from_utf8_to_vec_without_replacement(text, &mut output, true);

        match result {
            EncoderResult::InputEmpty => Ok(output),
            EncoderResult::Unmappable(c) => Err(AppError::EncodingError(format!(
                "Character {:?} (U+{:04X}) cannot be represented in {}",
                c,
                c as u32,
                self.name()
            ))),
            EncoderResult::OutputFull => Err(AppError::Internal(
                "Encoder output buffer exhausted".to_string(),
            )),
        }
    }
}
