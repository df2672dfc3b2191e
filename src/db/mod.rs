pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::MemoryStore;
pub use postgres::{create_pool, run_migrations, PgStore};
pub use store::{BookStore, UserStore};

#[cfg(test)]
pub use store::{MockBookStore, MockUserStore};
