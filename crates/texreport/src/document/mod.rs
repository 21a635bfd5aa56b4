//! Report content: metadata for the cover and title page, and the ordered
//! blocks that make up the body.

mod block;
mod metadata;
mod report;

pub use block::{Block, Figure, Listing, Table};
pub use metadata::{AuthorEntry, Authorship, ContactDetails, Metadata};
pub use report::Report;
