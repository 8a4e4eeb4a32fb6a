//! Short URL-safe paste identifier generation.

use crate::constants::ID_LENGTH;
use rand::Rng;

const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Generate a random URL-safe paste id.
///
/// Ten characters over a 62-symbol alphabet gives ~59 bits of entropy, so a
/// collision against stored ids is treated as a generator fault rather than
/// a normal outcome (see [`crate::service::PasteService::create_paste`]).
///
/// # Returns
/// A freshly generated id of [`ID_LENGTH`] characters.
pub fn generate_paste_id() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_LENGTH)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}
