mod category;
mod comment;
mod post;
mod user;

pub use category::{Category, NewCategory};
pub use comment::{Comment, NewComment};
pub use post::{NewPost, Post, UpdatePost};
pub use user::{NewUser, User};
