//! agora/crates/services/src/lib.rs
//!
//! Application services for Agora: per-entity orchestration over the
//! domain ports, the pagination helper, the search and activity
//! aggregators, and the content sanitizer.

pub mod activity;
pub mod forums;
pub mod pagination;
pub mod replies;
pub mod sanitize;
pub mod search;
pub mod threads;
pub mod users;
mod util;

pub use activity::{ActivityFeed, DEFAULT_ACTIVITY_LIMIT};
pub use forums::ForumService;
pub use pagination::{page_bounds, PageBounds};
pub use replies::ReplyService;
pub use sanitize::{sanitize, HtmlSanitizer, DEFAULT_ALLOWED_TAGS};
pub use search::{SearchHit, SearchService, SEARCH_LIMIT};
pub use threads::ThreadService;
pub use users::UserService;
