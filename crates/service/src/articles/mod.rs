//! Articles: create, list, get and owner-only delete.

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::ArticleService;
