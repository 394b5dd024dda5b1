// User profiles: contact details and the stored CV used for insights.

pub mod handlers;
pub mod repository;
