//! HTTP middleware components.

pub mod family_access;
pub mod logging;
pub mod security_headers;
pub mod trace_id;

pub use family_access::{authorize_family_role, FamilyAccess};
pub use security_headers::security_headers_middleware;
pub use trace_id::{trace_id, RequestId, REQUEST_ID_HEADER};
