//! Durable storage adapters

mod json_repository;

pub use json_repository::JsonFileBookRepository;
