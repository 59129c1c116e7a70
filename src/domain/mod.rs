pub mod collector;
pub mod page;
pub mod post;

pub use collector::Collector;
pub use page::PageOutcome;
pub use post::Post;
