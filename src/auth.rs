//! Bearer credential checks.

use subtle::ConstantTimeEq;

/// Returns true iff `presented` is exactly `Bearer <secret>`.
///
/// The comparison runs in constant time for equal length inputs. A missing header, another
/// scheme, a different secret or any extra whitespace are all rejected the same way.
#[must_use]
pub fn bearer_matches(presented: Option<&str>, secret: &str) -> bool {
    let Some(presented) = presented else {
        return false;
    };
    let expected = format!("Bearer {secret}");
    presented.as_bytes().ct_eq(expected.as_bytes()).into()
}
