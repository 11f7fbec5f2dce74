//! Typed ID definitions for the persisted entities.

pub use super::id::Id;

/// Marker type for blog posts.
pub struct Post;

/// Marker type for admin accounts.
pub struct AdminAccount;

/// Marker type for newsletter subscribers.
pub struct Subscriber;

/// Typed ID for blog posts.
pub type PostId = Id<Post>;

/// Typed ID for admin accounts.
pub type AdminId = Id<AdminAccount>;

/// Typed ID for newsletter subscribers.
pub type SubscriberId = Id<Subscriber>;
