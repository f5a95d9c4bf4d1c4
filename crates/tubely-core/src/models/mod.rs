//! Data models for the application

mod thumbnail;
mod video;

pub use thumbnail::*;
pub use video::*;
