pub mod record;

pub use record::{ClientInfo, InvoiceRecord};
