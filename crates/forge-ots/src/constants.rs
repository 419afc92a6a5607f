//! Constants from the OpenTimestamps proof-file format.
//!
//! Only [`ATTESTATION_BITCOIN`] is used by this client today (as a raw
//! byte-scan heuristic over calendar responses, per the present design's
//! accepted simplification — see the crate-level docs). The rest are held
//! here, named, for the day this client grows a full tag-stream parser
//! instead of scanning for the marker byte.

/// The fixed 32-byte magic that opens every `.ots` proof file.
pub const OTS_MAGIC: [u8; 32] = [
    0x00, 0x4f, 0x70, 0x65, 0x6e, 0x54, 0x69, 0x6d, 0x65, 0x73, 0x74, 0x61, 0x6d, 0x70, 0x73, 0x00,
    0x00, 0x50, 0x72, 0x6f, 0x6f, 0x66, 0x00, 0xbf, 0x89, 0xe2, 0xe8, 0x84, 0xe8, 0x92, 0x94, 0x01,
];

/// Opcode: the operand is hashed with SHA-256.
pub const OP_SHA256: u8 = 0x08;
/// Opcode: the operand is appended to the current message.
pub const OP_APPEND: u8 = 0xf0;
/// Opcode: the operand is prepended to the current message.
pub const OP_PREPEND: u8 = 0xf1;
/// Opcode: an attestation is pending confirmation by the named calendar.
pub const ATTESTATION_PENDING: u8 = 0x83;
/// Opcode: the message is attested by a Bitcoin block header.
pub const ATTESTATION_BITCOIN: u8 = 0x05;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magic_is_32_bytes() {
        assert_eq!(OTS_MAGIC.len(), 32);
    }
}
