//! Client-side search and pagination for list views

use shared::models::{Batch, MasterEntity, Resource, User};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Record that can be matched by the list search box
pub trait Searchable {
    /// Text fields the search term is matched against.
    fn search_fields(&self) -> Vec<&str>;

    fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
    }
}

impl Searchable for Resource {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.resource_id.as_str(),
            self.brand.as_str(),
            self.model.as_str(),
            self.specification.as_str(),
            self.resource_type.as_str(),
            self.resource_class.as_str(),
            self.resource_status.as_str(),
            self.serial_number.as_str(),
        ];
        if let Some(remarks) = &self.remarks {
            fields.push(remarks);
        }
        fields
    }
}

impl Searchable for User {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.username.as_str(), self.email.as_str(), self.role.as_str()]
    }
}

impl Searchable for Batch {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.batch_code.as_str(), self.resource_type.as_str()];
        if let Some(description) = &self.description {
            fields.push(description);
        }
        fields
    }
}

impl Searchable for MasterEntity {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        if let Some(description) = &self.description {
            fields.push(description);
        }
        fields
    }
}

/// Search box and pager state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub search: String,
    /// 1-based
    pub page: usize,
    pub page_size: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListQuery {
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            ..Default::default()
        }
    }

    /// Change the search term and go back to the first page.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }
}

/// One page of a list
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    /// Matching records across all pages
    pub total: usize,
}

pub fn filter_records<'a, T: Searchable>(records: &'a [T], search: &str) -> Vec<&'a T> {
    records.iter().filter(|r| r.matches(search)).collect()
}

/// Slice `items` to the requested page; out-of-range pages are clamped.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total = items.len();
    let total_pages = total.div_ceil(page_size).max(1);
    let page = page.clamp(1, total_pages);
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(total);

    Page {
        items: items.get(start..end).map(<[T]>::to_vec).unwrap_or_default(),
        page,
        total_pages,
        total,
    }
}

/// Search then paginate.
pub fn query<T: Searchable + Clone>(records: &[T], query: &ListQuery) -> Page<T> {
    let matched: Vec<T> = filter_records(records, &query.search)
        .into_iter()
        .cloned()
        .collect();
    paginate(&matched, query.page, query.page_size)
}
