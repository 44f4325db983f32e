//! Command implementations.

mod destination;
mod init;
mod send;
mod validate;

pub use destination::run_destination;
pub use init::run_init;
pub use send::run_send;
pub use validate::run_validate;
