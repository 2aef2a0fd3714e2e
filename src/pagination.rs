use serde::Serialize;

/// The page a caller asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-indexed, never below 1
    pub current_page: u32,
    pub page_size: u32,
}

impl Pagination {
    /// Page 0 becomes page 1 and a page size of 0 becomes 1.
    pub fn new(requested_page: u32, page_size: u32) -> Self {
        Pagination {
            current_page: requested_page.max(1),
            page_size: page_size.max(1),
        }
    }

    pub fn offset(&self) -> usize {
        (self.current_page as usize - 1).saturating_mul(self.page_size as usize)
    }

    pub fn limit(&self) -> usize {
        self.page_size as usize
    }

    /// Where this page falls in a listing of `total_items` rows.
    pub fn slice(&self, total_items: usize) -> PageBounds {
        paginate(total_items, self.page_size, self.current_page)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageBounds {
    pub current_page: u32,
    pub total_pages: u32,
    pub items: std::ops::Range<usize>,
}

/// Works out which rows of `total_items` belong to `requested_page`.
///
/// Pages past the last one are not pulled back onto it, they slice to
/// nothing.
pub fn paginate(total_items: usize, page_size: u32, requested_page: u32) -> PageBounds {
    let pagination = Pagination::new(requested_page, page_size);
    let total_pages = total_items.div_ceil(pagination.limit());

    let start = pagination.offset().min(total_items);
    let end = pagination
        .offset()
        .saturating_add(pagination.limit())
        .min(total_items);

    PageBounds {
        current_page: pagination.current_page,
        total_pages: u32::try_from(total_pages).unwrap_or(u32::MAX),
        items: start..end,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: u32,
    pub total_items: usize,
    pub page_size: u32,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn from_parts(pagination: Pagination, items: Vec<T>, total_items: usize) -> Self {
        let bounds = pagination.slice(total_items);

        Page {
            items,
            current_page: bounds.current_page,
            total_items,
            page_size: pagination.page_size,
            total_pages: bounds.total_pages,
        }
    }
}
