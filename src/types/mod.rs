//! Data types shared by the controller, the HTTP client and the renderers.
//!
//! - [`Role`] - the three image slots of a listing
//! - [`Metadata`] - the descriptive record returned by the backend
//! - [`ProcessResponse`] - the `/process` payload

mod metadata;
mod role;

pub use metadata::{Metadata, Price, ProcessResponse, NO_BRAND_DOMAIN};
pub use role::{ParseRoleError, Role};
