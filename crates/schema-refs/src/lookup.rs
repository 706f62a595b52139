//! Reference lookup capability injected into the resolver

use crate::types::Schema;
use std::sync::Arc;

/// Maps a reference string to the schema it points at
///
/// Implementations must answer consistently for the duration of one
/// resolution and return `None` for absent references. When resolutions run
/// concurrently over one lookup it must also be `Sync`.
pub trait SchemaLookup {
    /// Look up the schema a reference points at
    fn lookup(&self, reference: &str) -> Option<Arc<Schema>>;
}

impl<F> SchemaLookup for F
where
    F: Fn(&str) -> Option<Arc<Schema>>,
{
    fn lookup(&self, reference: &str) -> Option<Arc<Schema>> {
        self(reference)
    }
}
