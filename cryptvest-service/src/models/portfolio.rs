use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Allocation {
    pub asset: &'static str,
    pub percent: u32,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquityPoint {
    pub t: &'static str,
    pub v: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioStats {
    pub total_value: u64,
    pub one_day: f64,
    pub one_week: f64,
    pub one_month: f64,
    pub best_asset: &'static str,
}

/// Static sample portfolio used by the front-end charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemoPortfolio {
    pub allocations: Vec<Allocation>,
    pub equity_curve: Vec<EquityPoint>,
    pub stats: PortfolioStats,
}

const ALLOCATIONS: [(&str, u32, u64); 5] = [
    ("BTC", 48, 48250),
    ("ETH", 28, 28110),
    ("SOL", 12, 12040),
    ("USDC", 7, 7010),
    ("Others", 5, 5040),
];

const EQUITY_CURVE: [(&str, u64); 7] = [
    ("-6m", 72000),
    ("-5m", 76000),
    ("-4m", 81000),
    ("-3m", 79000),
    ("-2m", 83000),
    ("-1m", 88500),
    ("now", 100450),
];

impl DemoPortfolio {
    pub fn sample() -> Self {
        Self {
            allocations: ALLOCATIONS
                .iter()
                .map(|&(asset, percent, value)| Allocation {
                    asset,
                    percent,
                    value,
                })
                .collect(),
            equity_curve: EQUITY_CURVE
                .iter()
                .map(|&(t, v)| EquityPoint { t, v })
                .collect(),
            stats: PortfolioStats {
                total_value: 100450,
                one_day: 2.6,
                one_week: 7.4,
                one_month: 13.8,
                best_asset: "SOL",
            },
        }
    }
}
