//! Order Feed - simulated customer arrivals
//!
//! Each tick the feed makes one draw: with `arrival_probability` a new order
//! arrives, and it is VIP with `vip_probability`. A fixed seed makes a run
//! reproducible.

use counter_core::Priority;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Configuration for order arrival simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderFeedConfig {
    /// Probability of an order arriving on a tick (0.0 to 1.0)
    pub arrival_probability: f64,
    /// Probability that an arriving order is VIP (0.0 to 1.0)
    pub vip_probability: f64,
    /// Seed for reproducible runs; entropy when absent
    pub seed: Option<u64>,
}

impl Default for OrderFeedConfig {
    fn default() -> Self {
        Self {
            arrival_probability: 0.3,
            vip_probability: 0.2,
            seed: None,
        }
    }
}

impl OrderFeedConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("arrival_probability", self.arrival_probability),
            ("vip_probability", self.vip_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Generates simulated order arrivals
pub struct OrderFeed {
    config: OrderFeedConfig,
    rng: StdRng,
}

impl OrderFeed {
    /// Create a feed seeded from the config, or from entropy
    pub fn new(config: OrderFeedConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    /// Create with a specific seed, ignoring the configured one
    pub fn with_seed(config: OrderFeedConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &OrderFeedConfig {
        &self.config
    }

    /// Draw the arrival for one tick (call this on each tick)
    pub fn next_arrival(&mut self) -> Option<Priority> {
        if !self.rng.gen_bool(self.config.arrival_probability) {
            return None;
        }

        if self.rng.gen_bool(self.config.vip_probability) {
            Some(Priority::Vip)
        } else {
            Some(Priority::Normal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draws(feed: &mut OrderFeed, n: usize) -> Vec<Option<Priority>> {
        (0..n).map(|_| feed.next_arrival()).collect()
    }

    #[test]
    fn test_seeded_feed_is_reproducible() {
        let config = OrderFeedConfig {
            seed: Some(42),
            ..Default::default()
        };
        let mut a = OrderFeed::new(config.clone());
        let mut b = OrderFeed::with_seed(config, 42);

        assert_eq!(draws(&mut a, 200), draws(&mut b, 200));
    }

    #[test]
    fn test_certain_arrivals() {
        let mut feed = OrderFeed::with_seed(
            OrderFeedConfig {
                arrival_probability: 1.0,
                vip_probability: 0.0,
                seed: None,
            },
            1,
        );
        assert!(draws(&mut feed, 50)
            .into_iter()
            .all(|p| p == Some(Priority::Normal)));

        let mut vip_only = OrderFeed::with_seed(
            OrderFeedConfig {
                arrival_probability: 1.0,
                vip_probability: 1.0,
                seed: None,
            },
            1,
        );
        assert!(draws(&mut vip_only, 50)
            .into_iter()
            .all(|p| p == Some(Priority::Vip)));
    }

    #[test]
    fn test_no_arrivals() {
        let mut feed = OrderFeed::with_seed(
            OrderFeedConfig {
                arrival_probability: 0.0,
                ..Default::default()
            },
            3,
        );
        assert!(draws(&mut feed, 50).into_iter().all(|p| p.is_none()));
    }

    #[test]
    fn test_probability_bounds() {
        let config = OrderFeedConfig {
            vip_probability: 1.5,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        assert!(OrderFeedConfig::default().validate().is_ok());
    }
}
