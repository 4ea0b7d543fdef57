use serde::Serialize;

/// Per-vehicle balance and append-only debit history.
///
/// Overdraft is permitted: `deduct_toll` never refuses a debit, so the
/// balance may go negative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountLedger {
    balance: f64,
    vendor: String,
    payments: Vec<f64>,
}

impl AccountLedger {
    pub fn new(balance: f64, vendor: impl Into<String>) -> Self {
        Self {
            balance,
            vendor: vendor.into(),
            payments: Vec::new(),
        }
    }

    /// Debit `amount` and record it. Returns the new balance.
    pub fn deduct_toll(&mut self, amount: f64) -> f64 {
        self.balance -= amount;
        self.payments.push(amount);
        self.balance
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    pub fn payments(&self) -> &[f64] {
        &self.payments
    }

    pub fn total_paid(&self) -> f64 {
        self.payments.iter().sum()
    }
}
