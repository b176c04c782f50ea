//! Comments: create under an existing article, list by article.

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::CommentService;
