pub mod events;
pub mod go;
pub mod health;
pub mod weather;
