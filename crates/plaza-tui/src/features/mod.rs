//! Feature slices. Each owns its state, key handling and rendering.

pub mod auth;
pub mod feed;
pub mod nav;
pub mod post;
pub mod profile;
pub mod users;
