//! Ticker selector feeding the historical chart.

pub const PROMPT: &str = "-- Select --";

/// Entry 0 is always the prompt; entries 1.. are tickers in portfolio order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TickerSelector {
    tickers: Vec<String>,
    /// Index into `entries()`; 0 is the prompt.
    cursor: usize,
}

impl TickerSelector {
    /// Rebuilding resets the cursor to the prompt.
    pub fn build<'a>(tickers: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            tickers: tickers.into_iter().map(String::from).collect(),
            cursor: 0,
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        std::iter::once(PROMPT).chain(self.tickers.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.tickers.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor, clamped to the entry list.
    pub fn set_cursor(&mut self, index: usize) {
        self.cursor = index.min(self.len() - 1);
    }

    /// Ticker under the cursor; `None` on the prompt.
    pub fn selected(&self) -> Option<&str> {
        self.cursor
            .checked_sub(1)
            .and_then(|i| self.tickers.get(i))
            .map(String::as_str)
    }
}
