//! Domain records of the snippet server.

mod category;
mod snippet;
mod user;

pub use category::Category;
pub use snippet::Snippet;
pub use user::User;
