//! Pagination utilities for the service layer
//!
//! Provides a simple `Pagination` struct and helpers to normalize inputs.

/// Pagination parameters
#[derive(Clone, Copy, Debug)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub size: u32,
}

impl Pagination {
    /// Clamp to sane bounds and convert to `u64`
    pub fn normalize(self) -> (u64, u64) {
        let page = if self.page == 0 { 1 } else { self.page };
        let size = self.size.clamp(1, 100);
        ((page - 1) as u64, size as u64)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, size: 20 } }
}
