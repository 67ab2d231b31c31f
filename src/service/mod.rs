pub mod amounts;
pub mod client;
pub mod extractor;
pub mod patterns;
pub mod text;

pub use extractor::analizar;
