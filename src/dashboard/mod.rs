pub mod page;

pub use page::{render, RenderError};
