//! Record identifiers
//!
//! Ids are a one-letter prefix, a dash, and five characters drawn uniformly
//! from `A-Z0-9`, e.g. `B-7QX2K` for a book or `M-0LA9C` for a member.

use rand::Rng;

/// Prefix for book ids
pub const BOOK_PREFIX: &str = "B";

/// Prefix for member ids
pub const MEMBER_PREFIX: &str = "M";

/// Number of random characters after the prefix
pub const ID_LEN: usize = 5;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate a random id with the given prefix
pub fn generate_id(prefix: &str) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    format!("{}-{}", prefix, suffix)
}

/// Generate an id with the given prefix for which `is_taken` returns false
///
/// Keeps drawing until a free id comes up.
pub fn generate_unique_id(prefix: &str, is_taken: impl Fn(&str) -> bool) -> String {
    loop {
        let id = generate_id(prefix);
        if !is_taken(&id) {
            return id;
        }
        tracing::debug!("Generated id {} already in use, retrying", id);
    }
}

/// Check whether `id` has the shape `<prefix>-XXXXX`
pub fn is_valid_id(prefix: &str, id: &str) -> bool {
    let Some(suffix) = id
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
    else {
        return false;
    };
    suffix.len() == ID_LEN && suffix.bytes().all(|b| ALPHABET.contains(&b))
}
