//! Anti-replay `state` values for the authorization redirect.
//!
//! A state is `id_<channel_id>rest_<suffix>` where the suffix is six
//! characters drawn uniformly from `A-Z0-9` (36^6 values). The suffix only
//! keeps concurrent redirects apart; it is not a CSRF secret, and checking it
//! on the callback is the host's job.

use rand::Rng;

const STATE_PREFIX: &str = "id_";
const STATE_SEPARATOR: &str = "rest_";
const SUFFIX_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of the random part of a state value.
pub const SUFFIX_LEN: usize = 6;

/// Random `[A-Z0-9]{6}` suffix.
pub fn random_suffix() -> String {
    let mut rng = rand::rng();
    (0..SUFFIX_LEN)
        .map(|_| SUFFIX_CHARSET[rng.random_range(0..SUFFIX_CHARSET.len())] as char)
        .collect()
}

/// Build a fresh state value for `channel_id`.
pub fn generate_state(channel_id: &str) -> String {
    format!(
        "{STATE_PREFIX}{channel_id}{STATE_SEPARATOR}{}",
        random_suffix()
    )
}

/// Recover the channel id from a state value produced by [`generate_state`].
pub fn parse_state(state: &str) -> Option<&str> {
    let rest = state.strip_prefix(STATE_PREFIX)?;
    let (channel_id, suffix) = rest.rsplit_once(STATE_SEPARATOR)?;
    let well_formed = suffix.len() == SUFFIX_LEN
        && suffix
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit());
    well_formed.then_some(channel_id)
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn assert_suffix_shape(suffix: &str) {
        assert_eq!(suffix.len(), SUFFIX_LEN);
        assert!(
            suffix
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()),
            "unexpected suffix {suffix}"
        );
    }

    #[test]
    fn state_has_channel_prefix_and_suffix() {
        for channel_id in ["1", "42", "abc", ""] {
            let state = generate_state(channel_id);
            let prefix = format!("id_{channel_id}rest_");
            assert!(state.starts_with(&prefix), "{state}");
            assert_suffix_shape(&state[prefix.len()..]);
        }
    }

    #[test]
    fn states_differ_between_calls() {
        assert_ne!(generate_state("7"), generate_state("7"));
    }

    #[test]
    fn parse_state_roundtrip() {
        let state = generate_state("12");
        assert_eq!(parse_state(&state), Some("12"));
    }

    #[test]
    fn parse_state_rejects_foreign_values() {
        assert_eq!(parse_state("xyz"), None);
        assert_eq!(parse_state("id_12rest_abc123"), None);
        assert_eq!(parse_state("id_12rest_ABC12"), None);
        assert_eq!(parse_state("id_12_ABC123"), None);
    }
}
