//! Request handlers.

pub mod catalog;
pub mod credentials;
pub mod health;
pub mod pack;
pub mod render;
pub mod scene;
pub mod studio;
pub mod timeline;

pub use catalog::*;
pub use credentials::*;
pub use health::*;
pub use pack::*;
pub use render::*;
pub use scene::*;
pub use studio::*;
pub use timeline::*;
