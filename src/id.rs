//! ID generation for persisted records.

use uuid::Uuid;

/// Produces unique, opaque identifiers.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// UUID v4 identifiers in their hyphenated string form.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_generator_is_unique_and_parseable() {
        let ids = UuidGenerator;
        let first = ids.generate();
        let second = ids.generate();

        assert_ne!(first, second);
        assert!(Uuid::parse_str(&first).is_ok());
    }
}
