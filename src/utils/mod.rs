pub mod url_validator;

pub use url_validator::{UrlValidationError, UrlValidator, validate_url};

/// Token alphabet: digits plus upper and lower ASCII letters.
pub const TOKEN_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Random alphanumeric string of `length` characters.
///
/// Draws from `rand`'s thread-local generator, a CSPRNG seeded from the OS,
/// so tokens cannot be predicted from earlier ones.
pub fn generate_random_code(length: usize) -> String {
    use std::iter;

    iter::repeat_with(|| TOKEN_ALPHABET[rand::random_range(0..TOKEN_ALPHABET.len())] as char)
        .take(length)
        .collect()
}

/// A token is 1..=`max_len` ASCII alphanumeric characters.
pub fn is_valid_token(token: &str, max_len: usize) -> bool {
    !token.is_empty() && token.len() <= max_len && token.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Escape text for embedding inside HTML element content or a quoted attribute.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
