//! Shared query infrastructure: the [`Query`] trait, [`QueryCommon`] fields, and [`SortDirection`].

use std::fmt;
use std::str::FromStr;

use url::Url;

use super::filter::FilterExpression;

/// Largest page size the BoldDesk list endpoints accept.
pub const MAX_PER_PAGE: u32 = 100;

/// Clamps a requested page size into `1..=MAX_PER_PAGE`.
pub fn clamp_per_page(per_page: u32) -> u32 {
    per_page.clamp(1, MAX_PER_PAGE)
}

/// Trait implemented by all query builders. Provides URL serialization and
/// shared builder methods for pagination, filtering, and ordering.
pub trait Query {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;

    /// Returns a mutable reference to the common query fields.
    fn get_common(&mut self) -> &mut QueryCommon;

    /// Returns the common query fields.
    fn common(&self) -> &QueryCommon;

    /// Sets the page number (1-indexed).
    fn with_page(mut self, page: u32) -> Self
    where
        Self: Sized,
    {
        self.get_common().page = page.max(1);
        self
    }

    /// Sets the number of results per page, clamped to [`MAX_PER_PAGE`].
    fn with_per_page(mut self, per_page: u32) -> Self
    where
        Self: Sized,
    {
        self.get_common().per_page = Some(clamp_per_page(per_page));
        self
    }

    /// Asks the server to compute the total `count` for the result set.
    fn with_requires_counts(mut self, requires_counts: bool) -> Self
    where
        Self: Sized,
    {
        self.get_common().requires_counts = Some(requires_counts);
        self
    }

    /// Free-text filter.
    fn with_filter(mut self, filter: &str) -> Self
    where
        Self: Sized,
    {
        self.get_common().filter = Some(filter.to_string());
        self
    }

    /// Orders results by `field` in the given direction, e.g. `createdon desc`.
    fn with_order_by(mut self, field: &str, direction: SortDirection) -> Self
    where
        Self: Sized,
    {
        self.get_common().order_by = Some(format!("{} {}", field, direction));
        self
    }

    /// Adds a raw `Q` filter expression such as `status:[1,2]`.
    fn with_q(mut self, expression: &str) -> Self
    where
        Self: Sized,
    {
        self.get_common().q.push(expression.to_string());
        self
    }

    /// Adds a built [`FilterExpression`] as a `Q` parameter. Empty expressions are ignored.
    fn with_filter_expression(mut self, expression: &FilterExpression) -> Self
    where
        Self: Sized,
    {
        if let Some(q) = expression.build() {
            self.get_common().q.push(q);
        }
        self
    }
}

/// Sort order for API results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending order (oldest/smallest first).
    Asc,
    /// Descending order (newest/largest first). This is the default.
    #[default]
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        })
    }
}

impl FromStr for SortDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            _ => Err(()),
        }
    }
}

/// Fields shared by all query types: pagination, counting, filtering and ordering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryCommon {
    /// Page number (1-indexed). Defaults to 1.
    pub page: u32,
    /// Results per page. `None` uses the API default.
    pub per_page: Option<u32>,
    /// Whether the server should compute `count`. `None` leaves it to the API.
    pub requires_counts: Option<bool>,
    /// Free-text filter.
    pub filter: Option<String>,
    /// Ordering clause, e.g. `createdon desc`.
    pub order_by: Option<String>,
    /// `Q` filter expressions, each sent as its own parameter.
    pub q: Vec<String>,
}

impl Default for QueryCommon {
    fn default() -> QueryCommon {
        QueryCommon {
            page: 1,
            per_page: None,
            requires_counts: None,
            filter: None,
            order_by: None,
            q: Vec::new(),
        }
    }
}

impl QueryCommon {
    /// Appends the common pagination and filter parameters to the URL.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("page", &self.page.to_string());
        if let Some(per_page) = self.per_page {
            url.query_pairs_mut()
                .append_pair("perPage", &per_page.to_string());
        };
        if let Some(requires_counts) = self.requires_counts {
            url.query_pairs_mut()
                .append_pair("requiresCounts", &requires_counts.to_string());
        };
        if let Some(filter) = &self.filter {
            url.query_pairs_mut().append_pair("Filter", filter);
        };
        if let Some(order_by) = &self.order_by {
            url.query_pairs_mut().append_pair("OrderBy", order_by);
        };
        for q in self.q.iter() {
            url.query_pairs_mut().append_pair("Q", q);
        }
        url
    }
}

/// Query for resources whose list endpoint takes only the common parameters
/// (contact groups, brands, fields).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub common: QueryCommon,
}

impl Query for ListQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn common(&self) -> &QueryCommon {
        &self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        self.common.add_to_url(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.bolddesk.com/api/v1/brands").unwrap()
    }

    #[test]
    fn defaults_only_send_page() {
        let url = ListQuery::default().add_to_url(&base());
        assert_eq!(url.query(), Some("page=1"));
    }

    #[test]
    fn per_page_is_clamped() {
        let query = ListQuery::default().with_per_page(500);
        assert_eq!(query.common.per_page, Some(MAX_PER_PAGE));
        let query = ListQuery::default().with_per_page(0);
        assert_eq!(query.common.per_page, Some(1));
    }

    #[test]
    fn page_zero_becomes_one() {
        assert_eq!(ListQuery::default().with_page(0).common.page, 1);
    }

    #[test]
    fn all_common_parameters() {
        let url = ListQuery::default()
            .with_page(3)
            .with_per_page(50)
            .with_requires_counts(true)
            .with_filter("acme")
            .with_order_by("createdon", SortDirection::Desc)
            .with_q("status:[1,2]")
            .with_q("createdon:today")
            .add_to_url(&base());
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("page".into(), "3".into()),
                ("perPage".into(), "50".into()),
                ("requiresCounts".into(), "true".into()),
                ("Filter".into(), "acme".into()),
                ("OrderBy".into(), "createdon desc".into()),
                ("Q".into(), "status:[1,2]".into()),
                ("Q".into(), "createdon:today".into()),
            ]
        );
    }

    #[test]
    fn sort_direction_parses() {
        assert_eq!("ASC".parse::<SortDirection>(), Ok(SortDirection::Asc));
        assert_eq!("descending".parse::<SortDirection>(), Ok(SortDirection::Desc));
        assert!("sideways".parse::<SortDirection>().is_err());
    }
}
