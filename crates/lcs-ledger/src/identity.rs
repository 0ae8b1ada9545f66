use std::collections::BTreeMap;

use crate::error::{LedgerError, LedgerResult};

/// Attributes of an already-authenticated caller.
///
/// Credential verification happens outside this crate; a `CallerIdentity`
/// only carries the attribute set that verification produced. An identity
/// whose attributes could not be decoded is represented explicitly so that
/// lookups can fail the way they would against a malformed certificate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallerIdentity {
    attributes: Option<BTreeMap<String, String>>,
}

impl CallerIdentity {
    /// A caller with no attributes at all.
    pub fn anonymous() -> Self {
        Self {
            attributes: Some(BTreeMap::new()),
        }
    }

    /// A caller carrying only a `role` attribute.
    pub fn with_role(role: impl Into<String>) -> Self {
        Self::anonymous().with_attribute("role", role)
    }

    /// A caller whose attribute set could not be decoded.
    pub fn undecodable() -> Self {
        Self { attributes: None }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn attribute(&self, name: &str) -> LedgerResult<Option<String>> {
        match &self.attributes {
            Some(attributes) => Ok(attributes.get(name).cloned()),
            None => Err(LedgerError::IdentityUnavailable(
                "attribute set could not be decoded".into(),
            )),
        }
    }
}

impl Default for CallerIdentity {
    fn default() -> Self {
        Self::anonymous()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_attribute_lookup() {
        let caller = CallerIdentity::with_role("org1-approver");
        assert_eq!(caller.attribute("role").unwrap().as_deref(), Some("org1-approver"));
        assert_eq!(caller.attribute("email").unwrap(), None);
    }

    #[test]
    fn anonymous_has_no_attributes() {
        assert_eq!(CallerIdentity::anonymous().attribute("role").unwrap(), None);
    }

    #[test]
    fn undecodable_identity_errors() {
        let result = CallerIdentity::undecodable().attribute("role");
        assert!(matches!(result, Err(LedgerError::IdentityUnavailable(_))));
    }
}
