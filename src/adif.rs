//! Parser for QRZ Logbook API responses carrying ADIF payloads.
//!
//! The API answers a FETCH request with a key/value envelope such as:
//! ```text
//! RESULT=OK&COUNT=123&ADIF=%3CCALL%3A5%3EW1ABC...
//! ```
//! or, on failure:
//! ```text
//! RESULT=FAIL&REASON=invalid api key&EXT=...
//! ```
//!
//! The `ADIF=` payload is percent-decoded and parsed as a sequence of ADIF
//! records. Each record is a run of `<NAME:LENGTH>value` or
//! `<NAME:LENGTH:TYPE>value` fields terminated by a case-insensitive `<eor>`
//! marker. The field tags themselves are parsed with `nom`; everything that
//! does not look like a tag is skipped, so a malformed payload degrades to
//! fewer extracted fields rather than a hard error.
//!
//! Field values are taken as the literal text between the tag and the next
//! `<`, then truncated to the declared length and trimmed. Scanning to the
//! delimiter first (instead of consuming exactly `LENGTH` characters) is
//! deliberately lenient and matches the upstream service's own output; see
//! the truncation tests for the exact semantics.

use std::borrow::Cow;

use nom::{
    IResult, Parser,
    bytes::complete::take_while1,
    character::complete::{char, digit1},
    combinator::{map_res, opt},
};
use percent_encoding::percent_decode_str;
use tracing::debug;

use crate::error::SyncError;
use crate::qso::QsoRecord;

/// Envelope marker introducing the ADIF payload.
const ADIF_MARKER: &str = "ADIF=";

/// Envelope marker signalling a failed request.
const FAIL_MARKER: &str = "RESULT=FAIL";

/// Case-insensitive end-of-record marker between ADIF records.
const EOR: &str = "<eor>";

/// Parse a raw API response into the record sequence.
///
/// A `RESULT=FAIL` envelope is fatal and yields [`SyncError::Protocol`].
/// Otherwise the text after the `ADIF=` marker is percent-decoded and parsed;
/// when no marker is present the whole input is treated as bare ADIF, which
/// covers responses that skip the envelope entirely.
pub fn parse_fetch_response(raw: &str) -> Result<Vec<QsoRecord>, SyncError> {
    if raw.contains(FAIL_MARKER) {
        return Err(SyncError::Protocol {
            reason: extract_fail_reason(raw),
        });
    }

    let payload: Cow<'_, str> = match raw.find(ADIF_MARKER) {
        Some(at) => percent_decode_str(&raw[at + ADIF_MARKER.len()..]).decode_utf8_lossy(),
        None => Cow::Borrowed(raw),
    };

    Ok(parse_adif(&payload))
}

/// Extract the failure reason between `REASON=` and the next `&`.
///
/// The reason is carried verbatim — no percent or `+` decoding — because the
/// envelope keys themselves are plain text. Defaults to `"unknown"` when the
/// key is missing or empty.
fn extract_fail_reason(raw: &str) -> String {
    raw.find("REASON=")
        .map(|at| &raw[at + "REASON=".len()..])
        .and_then(|rest| rest.split('&').next())
        .filter(|reason| !reason.is_empty())
        .unwrap_or("unknown")
        .to_string()
}

/// Parse a bare ADIF payload into the ordered record sequence.
///
/// Records with zero extractable fields are dropped, so an empty or
/// whitespace-only payload yields an empty sequence.
pub fn parse_adif(payload: &str) -> Vec<QsoRecord> {
    let records: Vec<QsoRecord> = split_records(payload)
        .into_iter()
        .filter(|chunk| !chunk.trim().is_empty())
        .filter_map(parse_record)
        .collect();

    debug!("extracted {} records from ADIF payload", records.len());
    records
}

/// Check if a character may appear in a field name or type qualifier.
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Parse a field tag `<NAME:LENGTH>` or `<NAME:LENGTH:TYPE>`.
///
/// Returns the field name (original casing) and the declared length. The
/// optional type qualifier is recognized and discarded.
fn parse_field_tag(input: &str) -> IResult<&str, (&str, usize)> {
    let (input, _) = char('<').parse(input)?;
    let (input, name) = take_while1(is_word_char).parse(input)?;
    let (input, _) = char(':').parse(input)?;
    let (input, length) = map_res(digit1, |s: &str| s.parse::<usize>()).parse(input)?;
    let (input, _) = opt((char(':'), take_while1(is_word_char))).parse(input)?;
    let (input, _) = char('>').parse(input)?;
    Ok((input, (name, length)))
}

/// Split the payload on the case-insensitive `<eor>` terminator.
///
/// The trailing chunk after the last terminator is included; callers filter
/// out whitespace-only chunks.
fn split_records(payload: &str) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut rest = payload;

    loop {
        let mut found = None;
        let mut from = 0;
        while let Some(offset) = rest[from..].find('<') {
            let at = from + offset;
            if rest
                .get(at..at + EOR.len())
                .is_some_and(|tag| tag.eq_ignore_ascii_case(EOR))
            {
                found = Some(at);
                break;
            }
            from = at + 1;
        }

        match found {
            Some(at) => {
                chunks.push(&rest[..at]);
                rest = &rest[at + EOR.len()..];
            }
            None => {
                chunks.push(rest);
                break;
            }
        }
    }

    chunks
}

/// Extract the fields of one record chunk.
///
/// Scans for `<`, tries the tag grammar there, and on a miss skips that `<`
/// and keeps scanning. Returns `None` when not a single field was extracted.
fn parse_record(chunk: &str) -> Option<QsoRecord> {
    let mut record = QsoRecord::new();
    let mut rest = chunk;

    while let Some(at) = rest.find('<') {
        rest = &rest[at..];
        match parse_field_tag(rest) {
            Ok((after_tag, (name, length))) => {
                let value_end = after_tag.find('<').unwrap_or(after_tag.len());
                let value = truncate_chars(&after_tag[..value_end], length).trim();
                record.insert(name, value.to_string());
                rest = &after_tag[value_end..];
            }
            Err(_) => {
                // Not a field tag; skip this '<' and keep looking.
                rest = &rest[1..];
            }
        }
    }

    (!record.is_empty()).then_some(record)
}

/// Truncate to at most `max` characters (not bytes).
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
