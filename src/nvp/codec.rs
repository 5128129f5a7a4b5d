//! Query-string encoding and strict decoding.

use url::form_urlencoded;

use super::FieldMultimap;
use crate::error::{GatewayError, Result};

impl FieldMultimap {
    /// Encodes the fields as an `application/x-www-form-urlencoded` body.
    ///
    /// Keys are emitted in first-appearance order; a key with several values is
    /// emitted once per value.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.pairs() {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    /// Decodes a query-string response body.
    ///
    /// Repeated keys accumulate under their first appearance. An empty body
    /// yields an empty multimap.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Parse`] if a `%` is not followed by two hex
    /// digits, or if a decoded segment is not valid UTF-8.
    pub fn parse(body: &[u8]) -> Result<Self> {
        let mut offset = 0;
        for segment in body.split(|&b| b == b'&') {
            check_segment(segment, offset)?;
            offset += segment.len() + 1;
        }
        Ok(form_urlencoded::parse(body).collect())
    }
}

/// Percent-decodes one `key=value` segment and checks the bytes are UTF-8.
fn check_segment(segment: &[u8], offset: usize) -> Result<()> {
    let mut decoded = Vec::with_capacity(segment.len());
    let mut idx = 0;
    while idx < segment.len() {
        match segment[idx] {
            b'%' => {
                let Some(byte) = decode_escape(segment.get(idx + 1..idx + 3)) else {
                    let end = segment.len().min(idx + 3);
                    return Err(GatewayError::Parse(format!(
                        "invalid URL escape {:?} at byte {}",
                        String::from_utf8_lossy(&segment[idx..end]),
                        offset + idx
                    )));
                };
                decoded.push(byte);
                idx += 3;
            }
            byte => {
                decoded.push(byte);
                idx += 1;
            }
        }
    }

    std::str::from_utf8(&decoded).map(|_| ()).map_err(|err| {
        GatewayError::Parse(format!("segment at byte {offset} is not valid UTF-8: {err}"))
    })
}

fn decode_escape(hex: Option<&[u8]>) -> Option<u8> {
    let [high, low] = hex? else {
        return None;
    };
    let high = char::from(*high).to_digit(16)?;
    let low = char::from(*low).to_digit(16)?;
    u8::try_from(high * 16 + low).ok()
}
