//! All-in/all-out portfolio state.
//!
//! At most one of `balance` and `position` is nonzero: a buy converts the whole
//! balance into position, a sell converts the whole position back.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Portfolio {
    pub balance: f64,
    pub position: f64,
}

impl Portfolio {
    pub fn new(initial_balance: f64) -> Self {
        Portfolio {
            balance: initial_balance,
            position: 0.0,
        }
    }

    /// Spend the entire balance at `price`. Returns the quantity bought, or
    /// `None` if there was no cash to spend.
    pub fn buy_all(&mut self, price: f64) -> Option<f64> {
        if self.balance > 0.0 {
            self.position = self.balance / price;
            self.balance = 0.0;
            Some(self.position)
        } else {
            None
        }
    }

    /// Liquidate the entire position at `price`. Returns the quantity sold, or
    /// `None` if nothing was held.
    pub fn sell_all(&mut self, price: f64) -> Option<f64> {
        if self.position > 0.0 {
            let quantity = self.position;
            self.balance = quantity * price;
            self.position = 0.0;
            Some(quantity)
        } else {
            None
        }
    }

    /// balance + position * price
    pub fn value(&self, price: f64) -> f64 {
        self.balance + self.position * price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_portfolio_is_all_cash() {
        let p = Portfolio::new(1000.0);
        assert!((p.balance - 1000.0).abs() < f64::EPSILON);
        assert_eq!(p.position, 0.0);
    }

    #[test]
    fn buy_all_converts_balance() {
        let mut p = Portfolio::new(1000.0);
        let qty = p.buy_all(20.0);
        assert_eq!(qty, Some(50.0));
        assert_eq!(p.balance, 0.0);
        assert!((p.position - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn buy_without_cash_is_noop() {
        let mut p = Portfolio {
            balance: 0.0,
            position: 10.0,
        };
        assert_eq!(p.buy_all(5.0), None);
        assert_eq!(p.position, 10.0);
    }

    #[test]
    fn sell_all_converts_position() {
        let mut p = Portfolio::new(1000.0);
        p.buy_all(20.0);
        assert_eq!(p.sell_all(25.0), Some(50.0));
        assert!((p.balance - 1250.0).abs() < f64::EPSILON);
        assert_eq!(p.position, 0.0);
    }

    #[test]
    fn sell_without_position_is_noop() {
        let mut p = Portfolio::new(1000.0);
        assert_eq!(p.sell_all(25.0), None);
        assert!((p.balance - 1000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn value_marks_position_to_price() {
        let p = Portfolio {
            balance: 0.0,
            position: 50.0,
        };
        assert!((p.value(21.0) - 1050.0).abs() < f64::EPSILON);
        let cash = Portfolio::new(1000.0);
        assert!((cash.value(21.0) - 1000.0).abs() < f64::EPSILON);
    }
}
