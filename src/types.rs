//! Core entity types
//!
//! The wider platform owns the actual state representation; this crate
//! only ever reads an entity's string identifier.

/// Anything that exposes an entity identifier.
///
/// Entity ids have the form `<domain>.<object_id>`. Filtering a
/// collection only reads this identifier, nothing else.
pub trait Entity {
    /// Entity identifier (e.g. `"light.kitchen"`).
    fn entity_id(&self) -> &str;
}

impl Entity for String {
    fn entity_id(&self) -> &str {
        self
    }
}

impl Entity for &str {
    fn entity_id(&self) -> &str {
        self
    }
}

/// Extract the domain from an entity id.
///
/// The domain is the substring before the first `.`. An id without a
/// separator is its own domain.
pub fn domain(entity_id: &str) -> &str {
    entity_id.split('.').next().unwrap_or(entity_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_extraction() {
        assert_eq!(domain("light.kitchen"), "light");
        assert_eq!(domain("sensor.outdoor.temp"), "sensor");
        assert_eq!(domain("no_separator"), "no_separator");
    }

    #[test]
    fn test_entity_impl_for_strings() {
        let owned = String::from("switch.garage");
        assert_eq!(owned.entity_id(), "switch.garage");
        assert_eq!("switch.garage".entity_id(), "switch.garage");
    }
}
