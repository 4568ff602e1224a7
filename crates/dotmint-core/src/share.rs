//! Share links: snapshots packed into a URL query parameter.
//!
//! A token is the snapshot's JSON, zlib-deflated, then base64url encoded
//! without padding:
//!
//! ```text
//! https://host/?data=<token>
//! ```
//!
//! Positions in the payload are grid cells, i.e. canvas pixels divided by
//! [`CELL_SIZE`](crate::input::CELL_SIZE), so tokens stay small and
//! independent of the canvas resolution.

use crate::history::Snapshot;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use std::io::{Read, Write};
use thiserror::Error;
use url::Url;

/// Query parameter carrying the token.
pub const SHARE_QUERY_KEY: &str = "data";

/// Largest inflated payload accepted from a token.
pub const MAX_PAYLOAD_BYTES: u64 = 1 << 20;

/// Share token errors.
#[derive(Debug, Error)]
pub enum ShareError {
    #[error("Share token is empty")]
    Empty,
    #[error("Invalid base64 in share token: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Compression error: {0}")]
    Compression(#[from] std::io::Error),
    #[error("Invalid share payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid share link: {0}")]
    Url(#[from] url::ParseError),
    #[error("Share link has no 'data' parameter")]
    MissingToken,
    #[error("Share payload exceeds {MAX_PAYLOAD_BYTES} bytes")]
    TooLarge,
}

/// Result type for share operations.
pub type ShareResult<T> = Result<T, ShareError>;

/// Encode a snapshot into a URL-safe token.
pub fn encode(snapshot: &Snapshot) -> ShareResult<String> {
    let json = serde_json::to_vec(snapshot)?;
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&json)?;
    let compressed = encoder.finish()?;
    Ok(URL_SAFE_NO_PAD.encode(compressed))
}

/// Decode a token produced by [`encode`].
///
/// Padding and the standard base64 alphabet are tolerated, so tokens that
/// went through a plain base64 step still load.
pub fn decode(token: &str) -> ShareResult<Snapshot> {
    let normalized: String = token
        .trim()
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            // '+' turns into a space when a query string is form-decoded
            '+' | ' ' => '-',
            '/' => '_',
            c => c,
        })
        .collect();
    if normalized.is_empty() {
        return Err(ShareError::Empty);
    }

    let compressed = URL_SAFE_NO_PAD.decode(normalized.as_bytes())?;
    let mut json = Vec::new();
    ZlibDecoder::new(compressed.as_slice())
        .take(MAX_PAYLOAD_BYTES + 1)
        .read_to_end(&mut json)?;
    if json.len() as u64 > MAX_PAYLOAD_BYTES {
        return Err(ShareError::TooLarge);
    }
    Ok(serde_json::from_slice(&json)?)
}

/// Build a share link for `snapshot` on the origin of `base_url`.
pub fn share_link(base_url: &str, snapshot: &Snapshot) -> ShareResult<String> {
    let token = encode(snapshot)?;
    let mut url = Url::parse(base_url)?;
    url.set_path("/");
    url.set_fragment(None);
    url.query_pairs_mut()
        .clear()
        .append_pair(SHARE_QUERY_KEY, &token);
    Ok(url.to_string())
}

/// Extract the token from a share link, a query string, or a bare token.
pub fn token_from_link(input: &str) -> ShareResult<String> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ShareError::Empty);
    }

    if input.contains("://") {
        let url = Url::parse(input)?;
        return url
            .query_pairs()
            .find(|(key, _)| key == SHARE_QUERY_KEY)
            .map(|(_, value)| value.into_owned())
            .ok_or(ShareError::MissingToken);
    }

    // Bare tokens never contain '?' or '&', but padded ones may end in "data="
    let query = input.strip_prefix('?');
    let is_query = query.is_some()
        || input.contains('&')
        || input.starts_with(&format!("{SHARE_QUERY_KEY}="));
    if is_query {
        let query = query.unwrap_or(input);
        return url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == SHARE_QUERY_KEY)
            .map(|(_, value)| value.into_owned())
            .ok_or(ShareError::MissingToken);
    }

    Ok(input.to_string())
}

/// Decode whatever [`token_from_link`] accepts.
pub fn decode_link(input: &str) -> ShareResult<Snapshot> {
    decode(&token_from_link(input)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::HexColor;
    use crate::stroke::Dot;

    fn sample() -> Snapshot {
        Snapshot {
            strokes: vec![Dot::new(1, 2, HexColor::new(0xAB, 0xCD, 0xEF))],
            background_color: HexColor::WHITE,
        }
    }

    #[test]
    fn test_roundtrip_exact() {
        let snapshot = sample();
        let token = encode(&snapshot).unwrap();
        assert_eq!(decode(&token).unwrap(), snapshot);
    }

    #[test]
    fn test_token_is_url_safe() {
        let mut snapshot = Snapshot::blank(HexColor::new(0x12, 0x34, 0x56));
        for x in 0..30 {
            for y in 0..30 {
                let shade = ((x * 7 + y * 13) % 256) as u8;
                snapshot.strokes.push(Dot::new(x, y, HexColor::new(shade, 255 - shade, x as u8)));
            }
        }
        let token = encode(&snapshot).unwrap();
        assert!(!token.contains('+'));
        assert!(!token.contains('/'));
        assert!(!token.contains('='));
        assert_eq!(decode(&token).unwrap(), snapshot);
    }

    #[test]
    fn test_decode_accepts_standard_alphabet_and_padding() {
        let snapshot = sample();
        let token = encode(&snapshot).unwrap();
        let standard = base64::engine::general_purpose::STANDARD
            .encode(URL_SAFE_NO_PAD.decode(token.as_bytes()).unwrap());
        assert_eq!(decode(&standard).unwrap(), snapshot);
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert!(matches!(decode(""), Err(ShareError::Empty)));
        assert!(decode("not a token!").is_err());
        assert!(decode("aGVsbG8").is_err());
    }

    #[test]
    fn test_decode_rejects_truncated() {
        let mut snapshot = sample();
        for x in 0..20 {
            snapshot.strokes.push(Dot::new(x, 9, HexColor::BLACK));
        }
        let token = encode(&snapshot).unwrap();
        let truncated = &token[..token.len() / 2];
        assert!(decode(truncated).is_err());
    }

    #[test]
    fn test_decode_rejects_oversized_payload() {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
        encoder.write_all(&vec![b' '; 2 << 20]).unwrap();
        let token = URL_SAFE_NO_PAD.encode(encoder.finish().unwrap());
        assert!(token.len() < 8 * 1024);
        assert!(matches!(decode(&token), Err(ShareError::TooLarge)));
    }

    #[test]
    fn test_share_link_roundtrip() {
        let snapshot = sample();
        let link = share_link("https://dotmint.app/editor?x=1#top", &snapshot).unwrap();
        assert!(link.starts_with("https://dotmint.app/?data="));
        assert_eq!(decode_link(&link).unwrap(), snapshot);
    }

    #[test]
    fn test_token_from_query_and_bare() {
        assert_eq!(token_from_link("?data=abc&x=1").unwrap(), "abc");
        assert_eq!(token_from_link("x=1&data=abc").unwrap(), "abc");
        assert_eq!(token_from_link("abc").unwrap(), "abc");
        assert_eq!(token_from_link("data=abc").unwrap(), "abc");
        // A padded token may happen to end in "data="
        assert_eq!(token_from_link("eJyrVkpOLMrMSdata=").unwrap(), "eJyrVkpOLMrMSdata=");
        assert!(matches!(
            token_from_link("https://dotmint.app/?other=1"),
            Err(ShareError::MissingToken)
        ));
    }
}
