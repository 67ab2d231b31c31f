pub mod handlers;

pub use handlers::{analizar, health_check};
