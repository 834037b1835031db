//! Session crate for the friend-based recommender.
//!
//! A `RecommendationSession` is the explicit context a host keeps between
//! queries: the loaded inputs, the column choices and the aligned dataset.

pub mod config;
pub mod session;
pub mod view;

pub use config::SessionConfig;
pub use session::RecommendationSession;
pub use view::{FriendView, PersonView, RecommendationView};
