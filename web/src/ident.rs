//! Opaque identifier generation for sessions and participants.
//!
//! UUID v4 collisions are not expected, but uniqueness is best-effort:
//! the registry still checks before inserting.

use uuid::Uuid;

pub fn opaque_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_and_non_empty() {
        let a = opaque_id();
        let b = opaque_id();
        assert!(!a.is_empty());
        assert_ne!(a, b);
    }
}
