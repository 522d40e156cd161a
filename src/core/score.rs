use super::components::table::Payment;
use serde::Serialize;

/// Session score, owned by the cycle engine
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoreBoard {
    pub score: f64,
    pub customers_paid: u32,
    pub tables_paid: u32,
    /// Sum of the tip factors of every paying table
    pub total_tip_percent: f64,
    pub orders_served: u32,
    pub customers_lost: u32,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_payment(&mut self, payment: &Payment, customers: usize) {
        self.score += payment.amount;
        self.total_tip_percent += payment.tip;
        self.customers_paid += customers as u32;
        self.tables_paid += 1;
    }

    pub fn record_served(&mut self) {
        self.orders_served += 1;
    }

    pub fn record_lost(&mut self, customers: usize) {
        self.customers_lost += customers as u32;
    }

    /// Mean tip factor over every paying table
    pub fn average_tip(&self) -> f64 {
        if self.tables_paid == 0 {
            0.0
        } else {
            self.total_tip_percent / self.tables_paid as f64
        }
    }
}
