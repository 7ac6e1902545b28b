use counter_core::{Bot, BotId};
use counter_ports::RemovalPolicy;

use crate::first_idle;

/// Default removal policy
///
/// Order of preference:
/// 1. The earliest-admitted idle bot
/// 2. The busy bot with the largest remaining countdown, i.e. the one that
///    has sunk the least work into its order. Ties go to the earliest admitted.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeastProgressRemoval;

impl LeastProgressRemoval {
    pub fn new() -> Self {
        Self
    }
}

impl RemovalPolicy for LeastProgressRemoval {
    fn select_victim(&self, bots: &[Bot]) -> Option<BotId> {
        if let Some(idle) = first_idle(bots) {
            return Some(idle);
        }

        let mut victim: Option<(&Bot, u32)> = None;
        for bot in bots {
            let Some(remaining) = bot.seconds_remaining() else {
                continue;
            };
            // Strictly greater keeps the earliest admitted on ties
            if victim.is_none_or(|(_, best)| remaining > best) {
                victim = Some((bot, remaining));
            }
        }
        victim.map(|(bot, _)| bot.id)
    }

    fn name(&self) -> &str {
        "Least Progress"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::bots;

    #[test]
    fn test_empty_pool_has_no_victim() {
        assert_eq!(LeastProgressRemoval::new().select_victim(&[]), None);
    }

    #[test]
    fn test_prefers_earliest_idle() {
        let pool = bots(&[Some(3), None, None]);
        assert_eq!(
            LeastProgressRemoval::new().select_victim(&pool),
            Some(BotId::new(2))
        );
    }

    #[test]
    fn test_all_busy_picks_largest_remaining() {
        let pool = bots(&[Some(3), Some(8)]);
        assert_eq!(
            LeastProgressRemoval::new().select_victim(&pool),
            Some(BotId::new(2))
        );
    }

    #[test]
    fn test_tie_goes_to_earliest_admitted() {
        let pool = bots(&[Some(4), Some(9), Some(9)]);
        assert_eq!(
            LeastProgressRemoval::new().select_victim(&pool),
            Some(BotId::new(2))
        );
    }
}
