//! Port implementations: live disk access plus cassette record/replay.

pub mod live;
pub mod recording;
pub mod replaying;
