use crate::error::{DomainError, DomainResult};

/// Client-supplied limit meaning "no preference"; materialized to the
/// configured maximum during resolution.
pub const LIMIT_ALL: i64 = -1;

/// Normalized offset/limit/time-range parameters governing a list or purge
/// operation. Repository implementations apply a window verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryWindow {
    pub offset: i64,
    /// Always materialized: never negative, never above the configured
    /// maximum result count.
    pub limit: i64,
    /// Inclusive lower bound on event origin, epoch milliseconds.
    pub start: Option<i64>,
    /// Inclusive upper bound on event origin, epoch milliseconds.
    pub end: Option<i64>,
}

fn parse_param(raw: &str, name: &str) -> DomainResult<i64> {
    raw.parse::<i64>().map_err(|_| {
        DomainError::Validation(format!("failed to parse {name} \"{raw}\" as an integer"))
    })
}

/// Resolve raw offset/limit query parameters against the configured
/// maximum result count.
///
/// - omitted offset defaults to 0; a negative offset is rejected
/// - omitted limit and the explicit "all" sentinel (-1) both materialize
///   to `max_result_count`
/// - a limit above `max_result_count` is rejected, never silently clamped
pub fn resolve_window(
    offset: Option<&str>,
    limit: Option<&str>,
    max_result_count: i64,
) -> DomainResult<QueryWindow> {
    let offset = match offset {
        Some(raw) => parse_param(raw, "offset")?,
        None => 0,
    };
    if offset < 0 {
        return Err(DomainError::Validation(format!(
            "offset {offset} is negative"
        )));
    }

    let limit = match limit {
        Some(raw) => parse_param(raw, "limit")?,
        None => LIMIT_ALL,
    };
    if limit < LIMIT_ALL {
        return Err(DomainError::Validation(format!(
            "limit {limit} is negative"
        )));
    }
    if limit > max_result_count {
        return Err(DomainError::Validation(format!(
            "limit {limit} exceeds the maximum result count {max_result_count}"
        )));
    }
    let limit = if limit == LIMIT_ALL {
        max_result_count
    } else {
        limit
    };

    Ok(QueryWindow {
        offset,
        limit,
        start: None,
        end: None,
    })
}

/// Resolve a time-range query: required start/end origin bounds (epoch
/// milliseconds) plus the usual offset/limit parameters. Accepted bounds
/// pass through unmodified.
pub fn resolve_time_range(
    start: &str,
    end: &str,
    offset: Option<&str>,
    limit: Option<&str>,
    max_result_count: i64,
) -> DomainResult<QueryWindow> {
    let start = parse_param(start, "start")?;
    let end = parse_param(end, "end")?;
    if start > end {
        return Err(DomainError::Validation(format!(
            "start {start} is after end {end}"
        )));
    }

    let mut window = resolve_window(offset, limit, max_result_count)?;
    window.start = Some(start);
    window.end = Some(end);
    Ok(window)
}

/// Resolve an age threshold (milliseconds) for purge-by-age. Zero is a
/// valid threshold: it purges everything older than now.
pub fn resolve_age(raw: &str) -> DomainResult<i64> {
    let age = parse_param(raw, "age")?;
    if age < 0 {
        return Err(DomainError::Validation(format!("age {age} is negative")));
    }
    Ok(age)
}
