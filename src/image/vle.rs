//! Variable-length integer encoding for long delays
//!
//! The value is split into 7-bit groups. Groups are emitted most significant
//! first, and every byte except the last carries the continuation bit.

/// Maximum number of 7-bit groups
pub const MAX_GROUPS: usize = 5;

/// Continuation flag set on every byte but the last
const CONTINUE: u8 = 0x80;

/// Encode a value into its VLE byte sequence
pub fn encode_vle(mut value: u32) -> Vec<u8> {
    let mut groups = [0u8; MAX_GROUPS];
    let mut n = 0;

    loop {
        groups[n] = (value & 0x7F) as u8;
        n += 1;
        value >>= 7;
        if value == 0 || n == MAX_GROUPS {
            break;
        }
    }

    groups[..n]
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &g)| if i + 1 < n { g | CONTINUE } else { g })
        .collect()
}
