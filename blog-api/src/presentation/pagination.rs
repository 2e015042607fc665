use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Raw `limit`/`offset` as sent by the client. Parsing is lenient: a value
/// that is not a positive integer falls back to the default, but the mere
/// presence of either parameter opts the request into the paginated
/// response shape.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub limit: i64,
    pub offset: i64,
}

impl PageQuery {
    pub fn requested(&self) -> bool {
        self.limit.is_some() || self.offset.is_some()
    }

    pub fn params(&self) -> PageParams {
        let limit = self
            .limit
            .as_deref()
            .and_then(|raw| raw.parse::<i64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);
        let offset = self
            .offset
            .as_deref()
            .and_then(|raw| raw.parse::<i64>().ok())
            .filter(|v| *v >= 0)
            .unwrap_or(0);
        PageParams { limit, offset }
    }
}

/// The paginated envelope: total collection size plus links to the
/// neighbouring slices.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

pub fn paginate<T>(base_url: &str, params: PageParams, count: i64, results: Vec<T>) -> Page<T> {
    let next = (params.offset + params.limit < count)
        .then(|| page_url(base_url, params.limit, params.offset + params.limit));
    let previous =
        (params.offset > 0).then(|| page_url(base_url, params.limit, params.offset - params.limit));
    Page {
        count,
        next,
        previous,
        results,
    }
}

// The first page is addressed without an offset parameter.
fn page_url(base_url: &str, limit: i64, offset: i64) -> String {
    if offset > 0 {
        format!("{}?limit={}&offset={}", base_url, limit, offset)
    } else {
        format!("{}?limit={}", base_url, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(limit: Option<&str>, offset: Option<&str>) -> PageQuery {
        PageQuery {
            limit: limit.map(String::from),
            offset: offset.map(String::from),
        }
    }

    #[test]
    fn absent_parameters_do_not_request_pagination() {
        assert!(!query(None, None).requested());
        assert!(query(Some("2"), None).requested());
        assert!(query(None, Some("4")).requested());
    }

    #[test]
    fn invalid_values_fall_back_but_still_page() {
        let q = query(Some("abc"), Some("-3"));
        assert!(q.requested());
        assert_eq!(
            q.params(),
            PageParams {
                limit: DEFAULT_PAGE_SIZE,
                offset: 0
            }
        );
    }

    #[test]
    fn zero_limit_falls_back_to_default() {
        let q = query(Some("0"), Some("7"));
        assert_eq!(
            q.params(),
            PageParams {
                limit: DEFAULT_PAGE_SIZE,
                offset: 7
            }
        );
    }

    #[test]
    fn links_walk_the_collection() {
        let page = paginate::<i64>(
            "http://localhost/v1/posts/",
            PageParams { limit: 2, offset: 2 },
            6,
            vec![3, 4],
        );
        assert_eq!(page.count, 6);
        assert_eq!(
            page.next.as_deref(),
            Some("http://localhost/v1/posts/?limit=2&offset=4")
        );
        assert_eq!(
            page.previous.as_deref(),
            Some("http://localhost/v1/posts/?limit=2")
        );
    }

    #[test]
    fn links_are_absent_off_the_ends() {
        let first = paginate::<i64>(
            "http://localhost/v1/posts/",
            PageParams { limit: 10, offset: 0 },
            3,
            vec![1, 2, 3],
        );
        assert_eq!(first.next, None);
        assert_eq!(first.previous, None);

        let last = paginate::<i64>(
            "http://localhost/v1/posts/",
            PageParams { limit: 2, offset: 4 },
            6,
            vec![5, 6],
        );
        assert_eq!(last.next, None);
        assert_eq!(
            last.previous.as_deref(),
            Some("http://localhost/v1/posts/?limit=2&offset=2")
        );
    }
}
