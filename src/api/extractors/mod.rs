//! Custom request extractors.

mod credentials;
mod validated_json;

pub use credentials::Credentials;
pub use validated_json::ValidatedJson;
