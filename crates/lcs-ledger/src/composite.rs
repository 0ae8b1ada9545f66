//! Composite keys.
//!
//! A composite key packs an object type and an ordered list of attributes
//! into a single ledger key:
//!
//! ```text
//! U+0000 objectType U+0000 attr1 U+0000 attr2 U+0000 ...
//! ```
//!
//! The leading namespace character keeps composite keys disjoint from plain
//! keys, and the trailing separator after every attribute makes the encoding
//! of a partial key a strict prefix of every full key that extends it. That
//! property is what partition scans rely on.
//!
//! Rules for every component:
//! - Must not contain U+0000 (the separator)
//! - Must not contain U+10FFFF (reserved as the range-scan upper bound)
//! - The object type must be non-empty

use crate::error::{LedgerError, LedgerResult};

/// Namespace prefix and separator for composite keys.
pub const COMPOSITE_NAMESPACE: char = '\u{0000}';

/// Highest Unicode scalar; reserved so that `prefix + MAX_UNICODE_RUNE`
/// bounds a scan.
const MAX_UNICODE_RUNE: char = '\u{10FFFF}';

/// Build a composite key from an object type and ordered attributes.
///
/// # Examples
///
/// ```
/// use lcs_ledger::composite::{create_composite_key, split_composite_key};
///
/// let key = create_composite_key("learner~key", &["current", "L1"]).unwrap();
/// assert_eq!(key, "\u{0}learner~key\u{0}current\u{0}L1\u{0}");
///
/// let (object_type, parts) = split_composite_key(&key).unwrap();
/// assert_eq!(object_type, "learner~key");
/// assert_eq!(parts, vec!["current".to_string(), "L1".to_string()]);
/// ```
pub fn create_composite_key(object_type: &str, attributes: &[&str]) -> LedgerResult<String> {
    if object_type.is_empty() {
        return Err(LedgerError::CompositeKey(
            "object type must not be empty".into(),
        ));
    }
    validate_component(object_type)?;

    let capacity = 2 + object_type.len() + attributes.iter().map(|a| a.len() + 1).sum::<usize>();
    let mut key = String::with_capacity(capacity);
    key.push(COMPOSITE_NAMESPACE);
    key.push_str(object_type);
    key.push(COMPOSITE_NAMESPACE);

    for attribute in attributes {
        validate_component(attribute)?;
        key.push_str(attribute);
        key.push(COMPOSITE_NAMESPACE);
    }

    Ok(key)
}

/// Split a composite key back into its object type and attributes.
pub fn split_composite_key(key: &str) -> LedgerResult<(String, Vec<String>)> {
    let body = key.strip_prefix(COMPOSITE_NAMESPACE).ok_or_else(|| {
        LedgerError::CompositeKey(format!("{key:?} is not a composite key"))
    })?;
    let body = body.strip_suffix(COMPOSITE_NAMESPACE).ok_or_else(|| {
        LedgerError::CompositeKey(format!("{key:?} is missing its trailing separator"))
    })?;

    let mut components = body.split(COMPOSITE_NAMESPACE).map(str::to_string);
    let object_type = components
        .next()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| LedgerError::CompositeKey(format!("{key:?} has no object type")))?;

    Ok((object_type, components.collect()))
}

/// Returns `true` if the key lives in the composite-key namespace.
pub fn is_composite_key(key: &str) -> bool {
    key.starts_with(COMPOSITE_NAMESPACE)
}

fn validate_component(component: &str) -> LedgerResult<()> {
    if component.contains(COMPOSITE_NAMESPACE) {
        return Err(LedgerError::CompositeKey(format!(
            "component {component:?} contains the U+0000 separator"
        )));
    }
    if component.contains(MAX_UNICODE_RUNE) {
        return Err(LedgerError::CompositeKey(format!(
            "component {component:?} contains reserved character U+10FFFF"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rejects_separator_in_attribute() {
        let result = create_composite_key("learner~key", &["current", "L\u{0}1"]);
        assert!(matches!(result, Err(LedgerError::CompositeKey(_))));
    }

    #[test]
    fn rejects_reserved_rune() {
        let result = create_composite_key("crime~key", &["L1\u{10FFFF}"]);
        assert!(matches!(result, Err(LedgerError::CompositeKey(_))));
    }

    #[test]
    fn rejects_empty_object_type() {
        assert!(create_composite_key("", &["a"]).is_err());
    }

    #[test]
    fn partial_key_is_prefix_of_full_key() {
        let partial = create_composite_key("crime~key", &["L1"]).unwrap();
        let full = create_composite_key("crime~key", &["L1", "R7"]).unwrap();
        assert!(full.starts_with(&partial));

        // A holder whose ID merely starts with "L1" must not share the prefix.
        let other = create_composite_key("crime~key", &["L10", "R8"]).unwrap();
        assert!(!other.starts_with(&partial));
    }

    #[test]
    fn split_rejects_plain_keys() {
        assert!(split_composite_key("L1").is_err());
        assert!(split_composite_key("\u{0}learner~key").is_err());
        assert!(split_composite_key("\u{0}\u{0}").is_err());
    }

    #[test]
    fn empty_attributes_survive_split() {
        let key = create_composite_key("nid~key", &["current", ""]).unwrap();
        let (_, parts) = split_composite_key(&key).unwrap();
        assert_eq!(parts, vec!["current".to_string(), String::new()]);
    }

    proptest! {
        #[test]
        fn split_inverts_create(
            object_type in "[a-z~]{1,12}",
            parts in proptest::collection::vec(r"[^\x00\x{10FFFF}]{0,8}", 0..4),
        ) {
            let refs: Vec<&str> = parts.iter().map(String::as_str).collect();
            let key = create_composite_key(&object_type, &refs).unwrap();
            prop_assert!(is_composite_key(&key));
            let (split_type, split_parts) = split_composite_key(&key).unwrap();
            prop_assert_eq!(split_type, object_type);
            prop_assert_eq!(split_parts, parts);
        }
    }
}
