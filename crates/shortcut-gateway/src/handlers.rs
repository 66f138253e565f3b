pub mod health;
pub mod home;
pub mod url;

pub use health::health_handler;
pub use home::home_handler;
pub use url::{redirect_handler, shorten_handler};
