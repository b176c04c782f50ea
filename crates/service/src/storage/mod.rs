//! Storage backends for the service layer that are not SeaORM.

pub mod memory;
