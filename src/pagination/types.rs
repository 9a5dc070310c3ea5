//! Page-count planning
//!
//! Turns the `TotalResults` reported with page 1 into the list of
//! page numbers still to request.

use crate::error::{Error, Result};
use std::ops::RangeInclusive;

/// Number of pages needed to cover `total_results` rows
///
/// `ceil(total_results / page_size)`; zero rows means zero pages.
/// A zero page size yields zero pages rather than dividing by zero.
pub fn total_pages(total_results: u64, page_size: u32) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total_results.div_ceil(u64::from(page_size))
}

/// Page schedule derived from the first page's header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePlan {
    total_results: u64,
    page_size: u32,
    total_pages: u32,
}

impl PagePlan {
    /// Plan pages for a declared row count
    pub fn new(total_results: u64, page_size: u32) -> Result<Self> {
        if page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be at least 1"));
        }

        let pages = total_pages(total_results, page_size);
        let total_pages = u32::try_from(pages).map_err(|_| {
            Error::decode(format!(
                "TotalResults {total_results} needs {pages} pages, more than a page number can hold"
            ))
        })?;

        Ok(Self {
            total_results,
            page_size,
            total_pages,
        })
    }

    /// Rows the server says exist
    pub fn total_results(&self) -> u64 {
        self.total_results
    }

    /// Rows requested per page
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Pages needed, including the first
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Page numbers after the first, in ascending order
    ///
    /// Empty when the report fits in one page or has no rows.
    pub fn remaining_pages(&self) -> RangeInclusive<u32> {
        // 2..=0 and 2..=1 are both empty
        2..=self.total_pages
    }
}
