use crate::domain::parameters::SimulationParameters;

/// Minimum number of present workers needed to run the line.
pub const MIN_CREW_FOR_PRODUCTION: i64 = 20;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyOutcome {
    pub present_count: i64,
    pub production_occurred: bool,
    pub revenue: f64,
    pub total_cost: f64,
    pub profit: f64,
}

/// Computes the economics of one day given how many workers stayed home.
///
/// Payroll is charged on the full nominal headcount whether or not the line
/// runs. Revenue and the production cost only apply on producing days.
pub fn evaluate(absentee_count: u32, params: &SimulationParameters) -> DailyOutcome {
    let present_count = i64::from(params.workforce_size) - i64::from(absentee_count);
    let production_occurred = present_count >= MIN_CREW_FOR_PRODUCTION;

    let costs = &params.costs;
    let (revenue, production_cost) = if production_occurred {
        (costs.daily_revenue, costs.production_cost)
    } else {
        (0.0, 0.0)
    };
    let labor_cost = f64::from(params.workforce_size) * costs.labor_cost_per_worker;
    let total_cost = production_cost + labor_cost;

    DailyOutcome {
        present_count,
        production_occurred,
        revenue,
        total_cost,
        profit: revenue - total_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parameters::CostModel;

    #[test]
    fn full_crew_produces_and_earns_the_daily_margin() {
        let params = SimulationParameters::new(1, 21, 100.0);
        let outcome = evaluate(0, &params);

        assert_eq!(outcome.present_count, 21);
        assert!(outcome.production_occurred);
        assert_eq!(outcome.revenue, 4000.0);
        assert_eq!(outcome.total_cost, 3030.0);
        assert_eq!(outcome.profit, 970.0);
    }

    #[test]
    fn short_crew_pays_payroll_without_production() {
        let params = SimulationParameters::new(1, 21, 100.0);
        let outcome = evaluate(4, &params);

        assert_eq!(outcome.present_count, 17);
        assert!(!outcome.production_occurred);
        assert_eq!(outcome.revenue, 0.0);
        assert_eq!(outcome.total_cost, 630.0);
        assert_eq!(outcome.profit, -630.0);
    }

    #[test]
    fn exactly_twenty_present_is_enough() {
        let params = SimulationParameters::new(1, 22, 100.0);
        assert!(evaluate(2, &params).production_occurred);
        assert!(!evaluate(3, &params).production_occurred);
    }

    #[test]
    fn labor_cost_uses_nominal_headcount() {
        let params = SimulationParameters::new(1, 24, 0.0).with_costs(CostModel {
            daily_revenue: 1000.0,
            production_cost: 100.0,
            labor_cost_per_worker: 10.0,
        });
        let outcome = evaluate(3, &params);

        assert_eq!(outcome.present_count, 21);
        assert_eq!(outcome.total_cost, 100.0 + 240.0);
        assert_eq!(outcome.profit, 660.0);
    }

    #[test]
    fn present_count_can_go_negative_for_tiny_workforces() {
        let params = SimulationParameters::new(1, 3, 0.0);
        let outcome = evaluate(4, &params);

        assert_eq!(outcome.present_count, -1);
        assert_eq!(outcome.present_count + 4, 3);
        assert!(!outcome.production_occurred);
    }
}
