// Course listings: the demo catalog shown on the dashboard and video search.

pub mod catalog;
pub mod handlers;
pub mod youtube;
