//! Content store gateway for the folio site.
//!
//! Blog posts, projects and admin quick links live in a Sanity dataset. This crate
//! wraps that dataset behind [`ContentStore`] and exposes [`Content`], which falls
//! back to bundled content whenever the store is unavailable.

mod error;
mod fallback;
mod input;
mod queries;
mod sanity;
mod service;
mod store;
mod types;

pub use error::ContentError;
pub use input::{
    PostInput, PostUpdate, ProjectInput, ProjectUpdate, QuickLinkInput, QuickLinksUpdate,
};
pub use sanity::{SanityClient, SanitySettings};
pub use service::Content;
pub use store::ContentStore;
pub use types::{
    AdminQuickLink, BlogPost, Pagination, Project, QuickLinkCategory, SanityImage, SlugItem,
};
