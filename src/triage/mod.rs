pub mod zone;

pub use zone::{classify, UrgencyZone};
