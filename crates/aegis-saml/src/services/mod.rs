//! Engine services: validation, endpoint negotiation, assertion
//! construction.

pub mod assertion_builder;
pub mod endpoint_resolver;
pub mod validator;

pub use assertion_builder::AssertionBuilder;
pub use endpoint_resolver::{EndpointOverrides, EndpointResolver};
pub use validator::RequestValidator;
