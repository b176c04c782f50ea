//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Registration, login and bearer-token authentication live here; the
//! article and comment services only ever see the resolved user id.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod token;
pub mod repo;

pub use service::AuthService;
