/// Compressed secp256k1 keys start with 0x02 (even y) or 0x03 (odd y).
pub const PUBKEY_PREFIX_EVEN: u8 = 0x02;
pub const PUBKEY_PREFIX_ODD: u8 = 0x03;

/// Length of the x coordinate that follows the prefix byte.
pub const PUBKEY_X_LEN: usize = 32;

pub fn is_valid_pubkey_prefix(prefix: u8) -> bool {
    prefix == PUBKEY_PREFIX_EVEN || prefix == PUBKEY_PREFIX_ODD
}
