use crate::models::DecodeError;

/// Reverses the single-byte XOR obfuscation used by `data-cfemail`
/// attributes: the first hex pair is the key, each following pair is one
/// key-XORed byte of the address. The key travels with the ciphertext,
/// so this hides addresses from naive text scrapers and nothing more.
pub fn decode_cfemail(hex: &str) -> Result<String, DecodeError> {
    if hex.bytes().any(|b| !b.is_ascii_hexdigit()) {
        return Err(DecodeError::InvalidHex);
    }
    if hex.len() % 2 != 0 {
        return Err(DecodeError::OddLength);
    }
    if hex.is_empty() {
        return Err(DecodeError::MissingKey);
    }

    let byte_at =
        |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| DecodeError::InvalidHex);

    let key = byte_at(0)?;
    let mut email = String::with_capacity(hex.len() / 2 - 1);
    for i in (2..hex.len()).step_by(2) {
        email.push((byte_at(i)? ^ key) as char);
    }
    Ok(email)
}
