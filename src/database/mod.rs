pub mod halls;
pub mod models;
pub mod pool;
pub mod reservations;

pub use halls::{HallDraft, HallError};
pub use models::{Hall, Reservation};
