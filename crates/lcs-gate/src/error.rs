/// Errors that can occur during access control.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
    /// The caller's identity could not be inspected.
    #[error("error while retrieving caller attributes: {0}")]
    AttributeUnavailable(String),

    /// The caller's identity does not carry the required attribute.
    #[error("client identity does not possess the '{attribute}' attribute")]
    AttributeMissing { attribute: String },

    /// The caller's role is not in the allow-list.
    #[error("role '{role}' is not permitted; allowed roles: {allowed}")]
    Forbidden { role: String, allowed: String },
}
