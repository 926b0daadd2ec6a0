use serde::{Deserialize, Serialize};

use super::{Cents, sum_cents};

/// A position in one security.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub id: String,
    pub symbol: String,
    pub name: String,
    /// Last price per share
    pub price: Cents,
    /// Today's price change per share
    pub change: Cents,
    pub change_percent: f64,
    pub shares: u32,
    /// Market value as quoted with the position
    pub value: Cents,
}

impl Holding {
    /// Price times shares, `None` if it does not fit in `Cents`.
    pub fn market_value(&self) -> Option<Cents> {
        self.price.checked_mul(Cents::from(self.shares))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub id: String,
    pub name: String,
    pub value: Cents,
    /// Today's change in value
    pub change: Cents,
    pub change_percent: f64,
    pub holdings: Vec<Holding>,
}

impl Portfolio {
    pub fn holding(&self, symbol: &str) -> Option<&Holding> {
        self.holdings
            .iter()
            .find(|h| h.symbol.eq_ignore_ascii_case(symbol))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_value: Cents,
    pub total_change: Cents,
    /// Change relative to the value before it. `None` when that value is zero.
    pub total_change_percent: Option<f64>,
    pub portfolio_count: usize,
    pub holding_count: usize,
}

pub fn summarize_portfolios(portfolios: &[Portfolio]) -> PortfolioSummary {
    let total_value = sum_cents(portfolios.iter().map(|p| p.value));
    let total_change = sum_cents(portfolios.iter().map(|p| p.change));
    let previous_value = total_value.saturating_sub(total_change);

    PortfolioSummary {
        total_value,
        total_change,
        total_change_percent: (previous_value != 0)
            .then(|| total_change as f64 / previous_value as f64 * 100.0),
        portfolio_count: portfolios.len(),
        holding_count: portfolios.iter().map(|p| p.holdings.len()).sum(),
    }
}
