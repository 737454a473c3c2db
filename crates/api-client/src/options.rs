use bugrelay_protocol::report::ReportStatus;

/// Filters for listing the caller's bug reports.
///
/// Every field is optional; only the fields that are set appear in the
/// query string.
#[derive(Debug, Clone, Default)]
pub struct ListReportsOptions {
    /// 1-based page number. Zero is treated as unset.
    pub page: Option<u32>,
    /// Page size. Zero is treated as unset.
    pub limit: Option<u32>,
    pub status: Option<ReportStatus>,
    pub category: Option<String>,
    pub search: Option<String>,
}

impl ListReportsOptions {
    /// Builds the query parameters, omitting unset fields entirely.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();

        if let Some(page) = self.page.filter(|&p| p != 0) {
            params.push(("page".into(), page.to_string()));
        }
        if let Some(limit) = self.limit.filter(|&l| l != 0) {
            params.push(("limit".into(), limit.to_string()));
        }
        if let Some(status) = self.status {
            params.push(("status".into(), status.as_str().into()));
        }
        if let Some(category) = &self.category {
            params.push(("category".into(), category.clone()));
        }
        if let Some(search) = &self.search {
            params.push(("search".into(), search.clone()));
        }

        params
    }
}
