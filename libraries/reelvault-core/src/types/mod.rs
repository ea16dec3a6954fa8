mod ids;
mod list;
mod user;
mod video;

pub use ids::{ListId, UserId, VideoId};
pub use list::{CreateList, VideoList, VideoSnapshot};
pub use user::UserProfile;
pub use video::{CreateVideo, NewVideo, Platform, Video};
