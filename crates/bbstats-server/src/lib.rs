// HTTP front end: axum router, handlers, and the error-to-response mapping.

pub mod error;
pub mod routes;
