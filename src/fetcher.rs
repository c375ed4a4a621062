use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::{report, Config, PAGE_SIZE, USER_AGENT};
use crate::error::{AppError, Result};
use crate::parser::{parse_page, NthTableOfClass, TableLocator};
use crate::types::BattingRecord;

/// Pulls batting records from the stats engine, one results page at a time.
pub struct StatsFetcher {
    client: reqwest::Client,
    stats_url: String,
    locator: Box<dyn TableLocator>,
}

impl StatsFetcher {
    pub fn new(cfg: &Config) -> Result<Self> {
        Self::with_locator(cfg, Box::new(NthTableOfClass::default()))
    }

    pub fn with_locator(cfg: &Config, locator: Box<dyn TableLocator>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.request_timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            stats_url: cfg.stats_url.clone(),
            locator,
        })
    }

    pub fn stats_url(&self) -> &str {
        &self.stats_url
    }

    /// Fetch the first `count` records of the batting report.
    ///
    /// Pages are requested in order (`start` = 1, 51, 101, ...) until `count`
    /// records are collected, a page yields no usable rows, or the offsets
    /// run past `count`. Any page failure aborts the whole fetch.
    pub async fn fetch_batting_records(&self, count: usize) -> Result<Vec<BattingRecord>> {
        let mut records = Vec::with_capacity(count.min(1024));

        for start in (1..=count).step_by(PAGE_SIZE) {
            let html = self.fetch_page(start).await?;

            let remaining = count - records.len();
            let page = parse_page(&html, self.locator.as_ref(), remaining)?;
            debug!(start, parsed = page.records.len(), skipped = page.skipped, "parsed results page");

            if page.records.is_empty() {
                warn!(start, "results page has no data rows, stopping");
                break;
            }
            records.extend(page.records);

            if records.len() >= count {
                break;
            }
        }

        records.truncate(count);
        info!(requested = count, fetched = records.len(), "fetched batting records");
        Ok(records)
    }

    /// GET one results page starting at row `start` (1-based).
    async fn fetch_page(&self, start: usize) -> Result<String> {
        let start_param = start.to_string();
        let params = [
            ("class", report::CLASS),
            ("template", report::TEMPLATE),
            ("type", report::STAT_TYPE),
            ("start", start_param.as_str()),
        ];

        let resp = self.client.get(&self.stats_url).query(&params).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(AppError::Status {
                status,
                url: resp.url().to_string(),
            });
        }

        let html = resp.text().await?;
        info!(start, bytes = html.len(), "fetched results page");
        Ok(html)
    }
}


#[cfg(test)]
mod tests {
    use super::mock::{spawn, Behavior};
    use super::*;

    async fn fetcher_for(behavior: Behavior) -> (mock::MockUpstream, StatsFetcher) {
        let (mock, url) = spawn(behavior).await;
        let fetcher = StatsFetcher::new(&Config::for_upstream(url)).unwrap();
        (mock, fetcher)
    }

    #[tokio::test]
    async fn returns_exactly_requested_count() {
        for count in [10, 20, 50, 60, 100, 150, 200] {
            let (mock, fetcher) = fetcher_for(Behavior::Rows { total: 1000 }).await;
            let records = fetcher.fetch_batting_records(count).await.unwrap();
            assert_eq!(records.len(), count, "count={count}");
            assert!(mock.hits() <= count.div_ceil(PAGE_SIZE), "count={count}");
        }
    }

    #[tokio::test]
    async fn returns_available_rows_when_fewer_than_requested() {
        let (mock, fetcher) = fetcher_for(Behavior::Rows { total: 73 }).await;
        let records = fetcher.fetch_batting_records(200).await.unwrap();
        assert_eq!(records.len(), 73);
        // third page is empty and stops the loop; the fourth is never requested
        assert_eq!(mock.starts(), vec![1, 51, 101]);
    }

    #[tokio::test]
    async fn requests_consecutive_blocks_of_fifty() {
        let (mock, fetcher) = fetcher_for(Behavior::Rows { total: 1000 }).await;
        let records = fetcher.fetch_batting_records(120).await.unwrap();
        assert_eq!(records.len(), 120);
        assert_eq!(mock.starts(), vec![1, 51, 101]);
        assert_eq!(records[0].player, "Player 1 (IND)");
        assert_eq!(records[119].player, "Player 120 (IND)");
    }

    #[tokio::test]
    async fn sends_report_params_and_browser_agent() {
        let (mock, fetcher) = fetcher_for(Behavior::Rows { total: 1000 }).await;
        fetcher.fetch_batting_records(10).await.unwrap();

        let params = mock.params.lock().unwrap().clone();
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].get("class").map(String::as_str), Some("3"));
        assert_eq!(params[0].get("template").map(String::as_str), Some("results"));
        assert_eq!(params[0].get("type").map(String::as_str), Some("batting"));
        assert_eq!(params[0].get("start").map(String::as_str), Some("1"));

        let agents = mock.user_agents.lock().unwrap().clone();
        assert_eq!(agents, vec![USER_AGENT.to_string()]);
    }

    #[tokio::test]
    async fn averages_are_decimal_or_absent() {
        let (_mock, fetcher) = fetcher_for(Behavior::Rows { total: 1000 }).await;
        let records = fetcher.fetch_batting_records(100).await.unwrap();
        assert!(records.iter().any(|r| r.average.is_none()));
        assert!(records
            .iter()
            .all(|r| r.average.map_or(true, |a| a.is_finite())));
    }

    #[tokio::test]
    async fn server_error_fails_whole_fetch() {
        let (mock, fetcher) = fetcher_for(Behavior::Status(500)).await;
        let err = fetcher.fetch_batting_records(20).await.unwrap_err();
        match err {
            AppError::Status { status, .. } => assert_eq!(status.as_u16(), 500),
            other => panic!("expected Status error, got {other:?}"),
        }
        assert_eq!(mock.hits(), 1);
    }

    #[tokio::test]
    async fn later_page_failure_discards_earlier_rows() {
        let (mock, fetcher) = fetcher_for(Behavior::FailFrom { start: 51, status: 500 }).await;
        let err = fetcher.fetch_batting_records(100).await.unwrap_err();
        match err {
            AppError::Status { status, .. } => assert_eq!(status.as_u16(), 500),
            other => panic!("expected Status error, got {other:?}"),
        }
        assert_eq!(mock.starts(), vec![1, 51]);
    }

    #[tokio::test]
    async fn missing_table_is_structural_failure() {
        let (_mock, fetcher) = fetcher_for(Behavior::TwoTables).await;
        let err = fetcher.fetch_batting_records(20).await.unwrap_err();
        assert!(matches!(err, AppError::TableNotFound(_)));
    }

    #[tokio::test]
    async fn connection_refused_is_http_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let cfg = Config::for_upstream(format!("http://{addr}/index.html"));
        let fetcher = StatsFetcher::new(&cfg).unwrap();
        let err = fetcher.fetch_batting_records(10).await.unwrap_err();
        assert!(matches!(err, AppError::Http(_)));
    }

    #[tokio::test]
    async fn zero_count_makes_no_requests() {
        let (mock, fetcher) = fetcher_for(Behavior::Rows { total: 1000 }).await;
        let records = fetcher.fetch_batting_records(0).await.unwrap();
        assert!(records.is_empty());
        assert_eq!(mock.hits(), 0);
    }
}
