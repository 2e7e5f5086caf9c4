//! Pagination parameter parsing and the `X-Total-Count` / `Link` headers.

use axum::http::{header, HeaderMap, HeaderName, HeaderValue};
use roster_core::{Page, PageRequest, SortOrder};

use crate::errors::AppError;

pub static TOTAL_COUNT_HEADER: HeaderName = HeaderName::from_static("x-total-count");

/// Parse `page`, `size` and repeatable `sort` parameters out of the raw
/// query string. Working on the raw string keeps repeated `sort` keys, which
/// form-deserialization would collapse.
pub fn parse_page_request(query: Option<&str>) -> Result<PageRequest, AppError> {
    let mut request = PageRequest::default();
    let Some(query) = query else {
        return Ok(request);
    };

    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "page" => {
                request.page = value
                    .parse()
                    .map_err(|_| AppError::bad_request(format!("invalid page parameter: {value}")))?;
            }
            "size" => {
                request.size = value
                    .parse()
                    .map_err(|_| AppError::bad_request(format!("invalid size parameter: {value}")))?;
            }
            "sort" => request.sort.push(SortOrder::parse(&value)?),
            _ => {}
        }
    }

    request.validate()?;
    Ok(request)
}

/// Build the pagination response headers for a page served under
/// `base_path`: the global total count plus `next`/`prev`/`last`/`first`
/// link relations. `next` and `prev` only appear when the window has a
/// neighbor on that side.
pub fn pagination_headers<T>(base_path: &str, page: &Page<T>) -> Result<HeaderMap, AppError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        &TOTAL_COUNT_HEADER,
        HeaderValue::from_str(&page.total_elements.to_string())?,
    );

    let mut link = String::new();
    if page.number + 1 < page.total_pages {
        link.push_str(&format!(
            "<{}>; rel=\"next\",",
            page_uri(base_path, page.number + 1, page.size)
        ));
    }
    if page.number > 0 {
        link.push_str(&format!(
            "<{}>; rel=\"prev\",",
            page_uri(base_path, page.number - 1, page.size)
        ));
    }
    let last_page = page.total_pages.saturating_sub(1);
    link.push_str(&format!(
        "<{}>; rel=\"last\",",
        page_uri(base_path, last_page, page.size)
    ));
    link.push_str(&format!("<{}>; rel=\"first\"", page_uri(base_path, 0, page.size)));
    headers.insert(header::LINK, HeaderValue::from_str(&link)?);

    Ok(headers)
}

fn page_uri(base_path: &str, page: u64, size: u64) -> String {
    format!("{base_path}?page={page}&size={size}")
}
