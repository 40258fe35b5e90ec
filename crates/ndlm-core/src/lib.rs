#![deny(missing_docs)]
#![doc = "Core error, randomness, and serialization types shared by the NDLM derivation checks."]

pub mod errors;
pub mod hash;
pub mod rng;
pub mod schema;
pub mod serde;

pub use errors::{ErrorInfo, NdlmError};
pub use hash::stable_hash_string;
pub use rng::RngHandle;
pub use schema::SchemaVersion;
pub use serde::to_canonical_json_bytes;
