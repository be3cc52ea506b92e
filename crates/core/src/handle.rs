//! Person/family handle derivation.
//!
//! A handle is a URL-safe slug of the display name followed by a short random
//! suffix, e.g. `nguyen-van-a-k3x9`. Handles are derived when a record is
//! written, never when it is proposed.

use rand::Rng;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Length of the random suffix appended to every handle.
pub const HANDLE_SUFFIX_LEN: usize = 4;

/// Slug used when a display name contains no usable characters.
pub const FALLBACK_SLUG: &str = "nguoi";

/// Maximum slug length before the suffix is appended.
const MAX_SLUG_LEN: usize = 60;

const SUFFIX_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Convert arbitrary (Vietnamese) text into a lowercase, diacritic-free,
/// dash-separated slug.
///
/// Characters are decomposed (NFD) and combining marks dropped, so `ễ`
/// becomes `e`. `đ`/`Đ` do not decompose and are mapped to `d` explicitly.
/// Runs of anything that is not an ASCII letter or digit collapse into a
/// single dash; leading and trailing dashes are never emitted.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for c in input.nfd() {
        if is_combining_mark(c) {
            continue;
        }
        let c = match c {
            'đ' | 'Đ' => 'd',
            other => other,
        };
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    if slug.len() > MAX_SLUG_LEN {
        slug.truncate(MAX_SLUG_LEN);
        while slug.ends_with('-') {
            slug.pop();
        }
    }
    slug
}

/// Derive a fresh handle from a display name using the thread-local RNG.
pub fn generate_handle(display_name: &str) -> String {
    generate_handle_with(display_name, &mut rand::rng())
}

/// Derive a handle with a caller-supplied RNG.
pub fn generate_handle_with<R: Rng + ?Sized>(display_name: &str, rng: &mut R) -> String {
    let mut slug = slugify(display_name);
    if slug.is_empty() {
        slug.push_str(FALLBACK_SLUG);
    }

    let suffix: String = (0..HANDLE_SUFFIX_LEN)
        .map(|_| SUFFIX_ALPHABET[rng.random_range(0..SUFFIX_ALPHABET.len())] as char)
        .collect();

    format!("{slug}-{suffix}")
}
