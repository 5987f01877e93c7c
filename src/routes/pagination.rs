use axum::http::Uri;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// `?page=&limit=` query parameters, page is 1-based.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PageParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub count: usize,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// SQLite binds LIMIT and OFFSET as signed 64-bit integers.
const MAX_WINDOW: u64 = i64::MAX as u64;

impl PageParams {
    pub fn limit(&self, default_limit: u64) -> u64 {
        self.limit
            .filter(|l| *l > 0)
            .unwrap_or(default_limit)
            .min(MAX_WINDOW)
    }

    /// Rows to skip before the requested page.
    pub fn offset(&self, default_limit: u64) -> u64 {
        self.page
            .unwrap_or(1)
            .saturating_sub(1)
            .saturating_mul(self.limit(default_limit))
            .min(MAX_WINDOW)
    }
}

impl<T> Page<T> {
    /// Slice one page out of the full ordered sequence.
    pub fn paginate(
        items: Vec<T>,
        params: &PageParams,
        default_limit: u64,
        uri: &Uri,
    ) -> Result<Self, AppError> {
        let count = items.len();
        let results = items
            .into_iter()
            .skip(params.offset(default_limit) as usize)
            .take(params.limit(default_limit) as usize)
            .collect();

        Self::new(count, results, params, default_limit, uri)
    }

    /// Wrap a page already fetched with `params.offset`/`params.limit`, out of
    /// `count` items in total. A page past the end is a 404 unless there is
    /// nothing at all and page 1 was asked for.
    pub fn new(
        count: usize,
        results: Vec<T>,
        params: &PageParams,
        default_limit: u64,
        uri: &Uri,
    ) -> Result<Self, AppError> {
        let limit = params.limit(default_limit) as usize;
        let page = params.page.unwrap_or(1) as usize;
        let pages = count.div_ceil(limit).max(1);

        if page == 0 || page > pages {
            return Err(AppError::not_found("page"));
        }

        Ok(Self {
            count,
            next: (page < pages).then(|| page_link(uri, page + 1)),
            previous: (page > 1).then(|| page_link(uri, page - 1)),
            results,
        })
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        let results = self.results.into_iter().map(f).collect();
        Page {
            count: self.count,
            next: self.next,
            previous: self.previous,
            results,
        }
    }

    pub fn with_results<U>(self, results: Vec<U>) -> Page<U> {
        Page {
            count: self.count,
            next: self.next,
            previous: self.previous,
            results,
        }
    }
}

/// Same path and query with `page` replaced.
fn page_link(uri: &Uri, page: usize) -> String {
    let page = format!("page={page}");
    let mut pairs: Vec<&str> = uri
        .query()
        .unwrap_or_default()
        .split('&')
        .filter(|pair| !pair.is_empty() && !pair.starts_with("page="))
        .collect();
    pairs.push(&page);

    format!("{}?{}", uri.path(), pairs.join("&"))
}
