//! since/limit 필터링 (CCXT filterBySinceLimit)

/// 타임스탬프를 가진 레코드
pub trait Timestamped {
    fn timestamp_ms(&self) -> Option<i64>;
}

/// `since` 이후(포함) 레코드만 남기고 `limit` 개수로 자른다.
///
/// `since`가 주어지면 타임스탬프가 없는 레코드는 제외된다. 순서는 유지.
pub fn filter_by_since_limit<T: Timestamped>(
    items: Vec<T>,
    since: Option<i64>,
    limit: Option<u32>,
) -> Vec<T> {
    let mut out: Vec<T> = match since {
        Some(since) => items
            .into_iter()
            .filter(|item| item.timestamp_ms().is_some_and(|ts| ts >= since))
            .collect(),
        None => items,
    };
    if let Some(limit) = limit {
        out.truncate(limit as usize);
    }
    out
}
