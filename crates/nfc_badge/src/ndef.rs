//! Minimal NDEF encoding: the badge payload is a single short-record MIME
//! message.

use shared::domain::BeneficiaryId;

/// MIME type carried by the badge record; the companion mobile app
/// filters on it when reading tags back.
pub const BADGE_MIME_TYPE: &str = "application/android-app";

const FLAG_MESSAGE_BEGIN: u8 = 0x80;
const FLAG_MESSAGE_END: u8 = 0x40;
const FLAG_SHORT_RECORD: u8 = 0x10;
const TNF_MIME_MEDIA: u8 = 0x02;

/// Encodes a single-record NDEF message holding `payload` under `mime`.
/// Only short records are produced; badge payloads sit far below the
/// 255-byte short-record limit.
pub fn mime_message(mime: &str, payload: &[u8]) -> Vec<u8> {
    debug_assert!(mime.len() <= usize::from(u8::MAX));
    debug_assert!(payload.len() <= usize::from(u8::MAX));
    let mut message = Vec::with_capacity(3 + mime.len() + payload.len());
    message.push(FLAG_MESSAGE_BEGIN | FLAG_MESSAGE_END | FLAG_SHORT_RECORD | TNF_MIME_MEDIA);
    message.push(mime.len() as u8);
    message.push(payload.len() as u8);
    message.extend_from_slice(mime.as_bytes());
    message.extend_from_slice(payload);
    message
}

/// The badge message: the beneficiary id as ASCII decimal under the app
/// MIME type.
pub fn badge_message(beneficiary: BeneficiaryId) -> Vec<u8> {
    mime_message(BADGE_MIME_TYPE, beneficiary.0.to_string().as_bytes())
}
