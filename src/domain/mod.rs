pub mod news;
pub mod session;
pub mod view;
