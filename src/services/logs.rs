//! Send-log queries.

use crate::batch::BatchClient;
use crate::client::SwuClient;
use crate::error::SwuResult;
use crate::http::{Operation, SwuResponse};

/// Filters for the log listing.
///
/// All fields are optional; an empty query lists with server defaults.
/// The `created_*` bounds are epoch seconds.
///
/// # Examples
///
/// ```rust
/// use sendwithus::LogQuery;
///
/// let query = LogQuery::new().count(50).created_gt(1363086000);
/// assert_eq!(query.to_query_string(), "count=50&created_gt=1363086000");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogQuery {
    count: Option<u32>,
    offset: Option<u32>,
    created_gt: Option<i64>,
    created_gte: Option<i64>,
    created_lt: Option<i64>,
    created_lte: Option<i64>,
}

impl LogQuery {
    /// An empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum number of log entries to return.
    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Number of log entries to skip.
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Only logs created strictly after this time.
    pub fn created_gt(mut self, epoch_seconds: i64) -> Self {
        self.created_gt = Some(epoch_seconds);
        self
    }

    /// Only logs created at or after this time.
    pub fn created_gte(mut self, epoch_seconds: i64) -> Self {
        self.created_gte = Some(epoch_seconds);
        self
    }

    /// Only logs created strictly before this time.
    pub fn created_lt(mut self, epoch_seconds: i64) -> Self {
        self.created_lt = Some(epoch_seconds);
        self
    }

    /// Only logs created at or before this time.
    pub fn created_lte(mut self, epoch_seconds: i64) -> Self {
        self.created_lte = Some(epoch_seconds);
        self
    }

    /// Render the set filters as a query string, without a leading `?`.
    ///
    /// Empty when no filter is set.
    pub fn to_query_string(&self) -> String {
        let mut parts = Vec::new();
        if let Some(count) = self.count {
            parts.push(format!("count={count}"));
        }
        if let Some(offset) = self.offset {
            parts.push(format!("offset={offset}"));
        }
        if let Some(t) = self.created_gt {
            parts.push(format!("created_gt={t}"));
        }
        if let Some(t) = self.created_gte {
            parts.push(format!("created_gte={t}"));
        }
        if let Some(t) = self.created_lt {
            parts.push(format!("created_lt={t}"));
        }
        if let Some(t) = self.created_lte {
            parts.push(format!("created_lte={t}"));
        }
        parts.join("&")
    }
}

fn list_op(query: Option<LogQuery>) -> Operation {
    let endpoint = match query {
        Some(query) => {
            let qs = query.to_query_string();
            if qs.is_empty() {
                "logs".to_string()
            } else {
                format!("logs?{qs}")
            }
        }
        None => "logs".to_string(),
    };
    Operation::get(endpoint)
}

fn get_op(log_id: &str) -> Operation {
    Operation::get(format!("logs/{log_id}"))
}

fn events_op(log_id: &str) -> Operation {
    Operation::get(format!("logs/{log_id}/events"))
}

impl SwuClient {
    /// List send logs, optionally filtered.
    pub fn logs(&self, query: Option<LogQuery>) -> SwuResult<SwuResponse> {
        self.call(list_op(query))
    }

    /// Fetch one log entry.
    pub fn get_log(&self, log_id: &str) -> SwuResult<SwuResponse> {
        self.call(get_op(log_id))
    }

    /// Fetch the delivery events of one log entry.
    pub fn get_log_events(&self, log_id: &str) -> SwuResult<SwuResponse> {
        self.call(events_op(log_id))
    }
}

impl BatchClient {
    /// Record a log listing.
    pub fn logs(&mut self, query: Option<LogQuery>) -> SwuResult<()> {
        self.record(list_op(query))
    }

    /// Record fetching one log entry.
    pub fn get_log(&mut self, log_id: &str) -> SwuResult<()> {
        self.record(get_op(log_id))
    }

    /// Record fetching the events of one log entry.
    pub fn get_log_events(&mut self, log_id: &str) -> SwuResult<()> {
        self.record(events_op(log_id))
    }
}
