use serde::Serialize;

/// One row of the industry reference table: an industry and its typical
/// net-profit-per-billable-hour range, shown alongside every result.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BenchmarkRow {
    pub industry: &'static str,
    pub target_net_profit_per_hour: &'static str,
}

/// Fixed reference data shipped with the application. Never derived from
/// user input, never mutated at runtime, never written to disk.
pub static BENCHMARKS: [BenchmarkRow; 4] = [
    BenchmarkRow {
        industry: "Consulting",
        target_net_profit_per_hour: "$100 – $250",
    },
    BenchmarkRow {
        industry: "Legal Services",
        target_net_profit_per_hour: "$150 – $400",
    },
    BenchmarkRow {
        industry: "Creative & Design Agencies",
        target_net_profit_per_hour: "$75 – $150",
    },
    BenchmarkRow {
        industry: "Accounting & Bookkeeping",
        target_net_profit_per_hour: "$60 – $140",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_exactly_four_rows() {
        assert_eq!(BENCHMARKS.len(), 4);
    }

    #[test]
    fn rows_are_distinct_industries() {
        let mut industries: Vec<&str> = BENCHMARKS.iter().map(|r| r.industry).collect();
        industries.sort_unstable();
        industries.dedup();
        assert_eq!(industries.len(), 4);
    }
}
