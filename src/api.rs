//! Remote API bindings.

pub mod n8n;

pub use n8n::N8nClient;
