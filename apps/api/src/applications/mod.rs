// Application records and their saved insight responses.

pub mod handlers;
pub mod repository;
pub mod response_store;
pub mod validation;
