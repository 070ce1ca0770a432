//! Repository layer: one struct per table, all queries take a `&DbPool`.

pub mod ticket_repo;

pub use ticket_repo::TicketRepo;
