pub mod catalog;
pub mod draw;
pub mod prompt;
pub mod reader;
pub mod sections;
pub mod session;

pub use crate::domain::model::{CardEntity, DrawnCard, ReadingRequest, ReadingSection};
pub use crate::domain::ports::{GenerativeModel, ReadingService};
pub use crate::utils::error::Result;
