//! Moving-average crossover simulator.
//!
//! Every price is pushed into a short and a long [`RollingWindow`]. Once both
//! are full, the signal is long when the short mean strictly exceeds the long
//! mean and flat otherwise. A trade executes only when the signal differs from
//! the last acted-upon signal: long buys with the whole balance, flat sells the
//! whole position. The final value is `balance + position * last_price`.

use tracing::debug;

use crate::domain::config::SimulationConfig;
use crate::domain::error::CrossoverError;
use crate::domain::portfolio::Portfolio;
use crate::domain::signal::Signal;
use crate::domain::window::RollingWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulatorState {
    WarmingUp,
    Flat,
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeSide {
    Buy,
    Sell,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    /// Zero-based index of the observation that triggered the trade.
    pub index: usize,
    pub side: TradeSide,
    pub price: f64,
    pub quantity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    pub final_value: f64,
    pub observations: usize,
    pub trades: Vec<Trade>,
    pub portfolio: Portfolio,
}

#[derive(Debug, Clone)]
pub struct CrossoverSimulator {
    short: RollingWindow,
    long: RollingWindow,
    portfolio: Portfolio,
    last_signal: Signal,
    state: SimulatorState,
    observations: usize,
    trades: Vec<Trade>,
}

impl CrossoverSimulator {
    pub fn new(config: &SimulationConfig) -> Result<Self, CrossoverError> {
        config.validate()?;
        Ok(CrossoverSimulator {
            short: RollingWindow::new(config.short_window),
            long: RollingWindow::new(config.long_window),
            portfolio: Portfolio::new(config.initial_balance),
            last_signal: Signal::Flat,
            state: SimulatorState::WarmingUp,
            observations: 0,
            trades: Vec::new(),
        })
    }

    /// Feed one price. Returns the signal for this observation, or `None`
    /// while either window is still filling.
    pub fn update(&mut self, price: f64) -> Option<Signal> {
        let index = self.observations;
        self.observations += 1;
        self.short.push(price);
        self.long.push(price);

        if !self.short.is_full() || !self.long.is_full() {
            return None;
        }
        let short_avg = self.short.mean()?;
        let long_avg = self.long.mean()?;
        let signal = Signal::from_averages(short_avg, long_avg);

        if signal != self.last_signal {
            self.trade(signal, price, index);
            self.last_signal = signal;
        }
        self.state = match self.last_signal {
            Signal::Flat => SimulatorState::Flat,
            Signal::Long => SimulatorState::Long,
        };
        Some(signal)
    }

    fn trade(&mut self, signal: Signal, price: f64, index: usize) {
        let executed = match signal {
            Signal::Long => self
                .portfolio
                .buy_all(price)
                .map(|quantity| (TradeSide::Buy, quantity)),
            Signal::Flat => self
                .portfolio
                .sell_all(price)
                .map(|quantity| (TradeSide::Sell, quantity)),
        };

        if let Some((side, quantity)) = executed {
            debug!(index, %signal, ?side, price, quantity, "trade executed");
            self.trades.push(Trade {
                index,
                side,
                price,
                quantity,
            });
        }
    }

    pub fn state(&self) -> SimulatorState {
        self.state
    }

    pub fn last_signal(&self) -> Signal {
        self.last_signal
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn observations(&self) -> usize {
        self.observations
    }

    /// Run a fresh simulation over `prices` and value the portfolio at the
    /// last price.
    pub fn run(
        config: &SimulationConfig,
        prices: &[f64],
    ) -> Result<SimulationReport, CrossoverError> {
        let mut sim = CrossoverSimulator::new(config)?;
        let last_price = *prices.last().ok_or(CrossoverError::EmptySeries)?;
        for &price in prices {
            sim.update(price);
        }
        Ok(SimulationReport {
            final_value: sim.portfolio.value(last_price),
            observations: sim.observations,
            trades: sim.trades,
            portfolio: sim.portfolio,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sim() -> CrossoverSimulator {
        CrossoverSimulator::new(&SimulationConfig::default()).unwrap()
    }

    #[test]
    fn warming_up_until_long_window_full() {
        let mut s = sim();
        for _ in 0..9 {
            assert_eq!(s.update(10.0), None);
            assert_eq!(s.state(), SimulatorState::WarmingUp);
        }
        assert_eq!(s.update(10.0), Some(Signal::Flat));
        assert_eq!(s.state(), SimulatorState::Flat);
    }

    #[test]
    fn constant_prices_never_trade() {
        let report = CrossoverSimulator::run(&SimulationConfig::default(), &[1.0; 10]).unwrap();
        assert!(report.trades.is_empty());
        assert!((report.final_value - 1000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn jump_on_tenth_price_buys() {
        let mut prices = vec![10.0; 9];
        prices.push(20.0);
        let report = CrossoverSimulator::run(&SimulationConfig::default(), &prices).unwrap();

        assert_eq!(report.trades.len(), 1);
        let trade = &report.trades[0];
        assert_eq!(trade.index, 9);
        assert_eq!(trade.side, TradeSide::Buy);
        assert!((trade.price - 20.0).abs() < f64::EPSILON);
        assert!((trade.quantity - 50.0).abs() < f64::EPSILON);
        assert_eq!(report.portfolio.balance, 0.0);
        assert!((report.final_value - 1000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn buy_then_sell_round_trip() {
        let mut prices = vec![10.0; 9];
        prices.push(20.0); // short 12 > long 11: buy 50 @ 20
        prices.extend([5.0, 5.0, 5.0]); // short drops below long: sell @ 5
        let report = CrossoverSimulator::run(&SimulationConfig::default(), &prices).unwrap();

        let sides: Vec<TradeSide> = report.trades.iter().map(|t| t.side).collect();
        assert_eq!(sides, vec![TradeSide::Buy, TradeSide::Sell]);
        assert_eq!(report.portfolio.position, 0.0);
        let sell = &report.trades[1];
        assert!((report.final_value - 50.0 * sell.price).abs() < 1e-9);
    }

    #[test]
    fn repeated_signal_does_not_retrade() {
        let mut s = sim();
        for _ in 0..9 {
            s.update(10.0);
        }
        assert_eq!(s.update(20.0), Some(Signal::Long));
        assert_eq!(s.update(21.0), Some(Signal::Long));
        assert_eq!(s.trades().len(), 1);
        assert_eq!(s.state(), SimulatorState::Long);
        assert_eq!(s.last_signal(), Signal::Long);
    }

    #[test]
    fn update_reports_signal_without_trade() {
        let mut s = sim();
        for _ in 0..10 {
            s.update(3.0);
        }
        assert_eq!(s.update(3.0), Some(Signal::Flat));
        assert!(s.trades().is_empty());
        assert_eq!(s.observations(), 11);
    }

    #[test]
    fn empty_series_is_error() {
        let err = CrossoverSimulator::run(&SimulationConfig::default(), &[]).unwrap_err();
        assert!(matches!(err, CrossoverError::EmptySeries));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = SimulationConfig {
            long_window: 0,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            CrossoverSimulator::new(&config),
            Err(CrossoverError::ConfigInvalid { .. })
        ));
    }

    #[test]
    fn custom_windows() {
        let config = SimulationConfig {
            short_window: 1,
            long_window: 2,
            initial_balance: 100.0,
            ..SimulationConfig::default()
        };
        // obs 1: [1,2] short 2 > long 1.5 -> buy 50 @ 2
        // obs 2: [2,1] short 1 < long 1.5 -> sell 50 @ 1
        let report = CrossoverSimulator::run(&config, &[1.0, 2.0, 1.0]).unwrap();
        assert_eq!(report.trades.len(), 2);
        assert!((report.final_value - 50.0).abs() < f64::EPSILON);
    }
}
