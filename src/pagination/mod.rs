//! Pagination module
//!
//! The script endpoint paginates by page number and reports the total row
//! count on every page. Page 1 tells us how many pages follow.

mod types;

pub use types::{total_pages, PagePlan};

#[cfg(test)]
mod tests;
