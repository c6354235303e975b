use crate::domain::error::DashboardError;

pub const PAGE_SIZE_OPTIONS: [u32; 4] = [10, 25, 50, 100];

/// Rows per page, restricted to the page-size menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageSize(u32);

impl PageSize {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize(PAGE_SIZE_OPTIONS[0])
    }
}

impl TryFrom<u32> for PageSize {
    type Error = DashboardError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if PAGE_SIZE_OPTIONS.contains(&value) {
            Ok(PageSize(value))
        } else {
            Err(DashboardError::InvalidPageSize(value))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageDescriptor {
    pub page_index: u64,
    pub rows_per_page: u32,
    pub total_rows: u64,
}

impl PageDescriptor {
    pub fn page_count(&self) -> u64 {
        self.total_rows.div_ceil(u64::from(self.rows_per_page))
    }

    pub fn is_empty(&self) -> bool {
        self.total_rows == 0
    }

    pub fn offset(&self) -> u64 {
        if self.is_empty() {
            return 0;
        }
        self.page_index * u64::from(self.rows_per_page)
    }

    /// Rows on this page; the last page holds the remainder.
    pub fn limit(&self) -> u64 {
        if self.is_empty() {
            return 0;
        }
        u64::from(self.rows_per_page).min(self.total_rows - self.offset())
    }
}

/// Clamps `requested_page` into `0..page_count`. An empty table yields an
/// empty descriptor rather than an error.
pub fn paginate(
    total_rows: u64,
    rows_per_page: u32,
    requested_page: i64,
) -> Result<PageDescriptor, DashboardError> {
    let size = PageSize::try_from(rows_per_page)?;
    Ok(clamp_page(total_rows, size, requested_page))
}

fn clamp_page(total_rows: u64, size: PageSize, requested_page: i64) -> PageDescriptor {
    let mut descriptor = PageDescriptor {
        page_index: 0,
        rows_per_page: size.get(),
        total_rows,
    };

    let page_count = descriptor.page_count();
    if page_count > 0 {
        descriptor.page_index = (requested_page.max(0) as u64).min(page_count - 1);
    }

    descriptor
}

/// Current page index and page size for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    page_size: PageSize,
    page_index: i64,
}

impl Pagination {
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn page_index(&self) -> i64 {
        self.page_index
    }

    /// Switching size invalidates the old index, so the page goes back to 0.
    pub fn set_rows_per_page(&mut self, rows_per_page: u32) -> Result<(), DashboardError> {
        self.page_size = PageSize::try_from(rows_per_page)?;
        self.page_index = 0;
        Ok(())
    }

    pub fn set_page(&mut self, page_index: i64) {
        self.page_index = page_index;
    }

    pub fn reset(&mut self) {
        self.page_index = 0;
    }

    /// Resolves the page for `total_rows` and keeps the clamped index.
    pub fn describe(&mut self, total_rows: u64) -> PageDescriptor {
        let descriptor = clamp_page(total_rows, self.page_size, self.page_index);
        self.page_index = descriptor.page_index as i64;
        descriptor
    }
}
