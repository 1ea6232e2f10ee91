use encoding_rs::{CoderResult, Decoder, Encoding, UTF_8};

/// Splits a chunked byte stream into complete lines.
///
/// Text decoding is stateful, so a multi-byte character split across two
/// chunks decodes correctly. Invalid sequences become U+FFFD.
pub struct LineDecoder {
    decoder: Decoder,
    pending: String,
}

impl Default for LineDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl LineDecoder {
    pub fn new() -> Self {
        Self::for_encoding(UTF_8)
    }

    pub fn for_encoding(encoding: &'static Encoding) -> Self {
        Self {
            decoder: encoding.new_decoder_with_bom_removal(),
            pending: String::new(),
        }
    }

    /// Feed one chunk and return the lines it completed, in order.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.decode(chunk, false);
        self.drain_complete_lines()
    }

    /// The fragment waiting for its newline.
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// End of stream. Returns the unterminated tail, if any; it is never a line.
    pub fn finish(mut self) -> Option<String> {
        self.decode(&[], true);
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending)
        }
    }

    fn decode(&mut self, bytes: &[u8], last: bool) {
        let mut remaining = bytes;
        loop {
            let needed = self
                .decoder
                .max_utf8_buffer_length(remaining.len())
                .unwrap_or(remaining.len().saturating_mul(3).saturating_add(16));
            self.pending.reserve(needed);
            let (result, read, _had_errors) =
                self.decoder
                    .decode_to_string(remaining, &mut self.pending, last);
            remaining = &remaining[read..];
            match result {
                CoderResult::InputEmpty => break,
                CoderResult::OutputFull => continue,
            }
        }
    }

    fn drain_complete_lines(&mut self) -> Vec<String> {
        let Some(last_newline) = self.pending.rfind('\n') else {
            return Vec::new();
        };
        let rest = self.pending.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.pending, rest);
        complete[..last_newline]
            .split('\n')
            .map(ToOwned::to_owned)
            .collect()
    }
}
