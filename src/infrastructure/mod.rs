//! Infrastructure layer - storage backends, services and process plumbing

pub mod logging;
pub mod storage;
pub mod user;
