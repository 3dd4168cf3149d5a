//! Canonical neighbourhood name form.
//!
//! Downstream joins depend on bit-for-bit equality of the canonical
//! form, so the algorithm is fixed: lowercase, fold the Spanish/Catalan
//! accented vowels and ñ, strip everything that is not a lowercase ASCII
//! letter, digit, or whitespace, then collapse runs of whitespace to a
//! single space and trim.

/// Normalizes a free-text neighbourhood name to its canonical matching
/// key.
///
/// Total (never fails; empty input yields an empty string) and
/// idempotent: `canonical_name(canonical_name(s)) == canonical_name(s)`.
#[must_use]
pub fn canonical_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());

    for c in name.chars().flat_map(char::to_lowercase) {
        let folded = match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'ñ' => 'n',
            other => other,
        };

        if folded.is_ascii_lowercase() || folded.is_ascii_digit() {
            out.push(folded);
        } else if folded.is_whitespace() && !out.is_empty() && !out.ends_with(' ') {
            out.push(' ');
        }
    }

    if out.ends_with(' ') {
        out.pop();
    }

    out
}
