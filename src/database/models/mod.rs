pub mod hall;
pub mod reservation;

pub use hall::Hall;
pub use reservation::Reservation;
