use crate::types::Event;

/// Raised when the authenticated subject does not own the target resource.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Operation not allowed")]
pub struct Forbidden;

/// A resource with a recorded owner identity.
pub trait Owned {
    /// Identity recorded as the owner at creation.
    fn owner(&self) -> &str;
}

impl Owned for Event {
    fn owner(&self) -> &str {
        &self.creator
    }
}

/// Allows a mutation only when `subject` is exactly the resource owner.
///
/// Comparison is byte-for-byte: no case folding or trimming.
pub fn authorize_mutation<R: Owned + ?Sized>(subject: &str, resource: &R) -> Result<(), Forbidden> {
    if resource.owner() == subject {
        Ok(())
    } else {
        tracing::warn!(subject = %subject, owner = %resource.owner(), "mutation denied");
        Err(Forbidden)
    }
}
