pub mod ack;
pub mod review;
pub mod user;
pub mod watchlist;

pub use ack::*;
pub use review::{Review, ReviewInput};
pub use user::*;
pub use watchlist::*;
