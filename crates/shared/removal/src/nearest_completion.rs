use counter_core::{Bot, BotId};
use counter_ports::RemovalPolicy;

use crate::first_idle;

/// Alternative removal policy
///
/// Idle bots go first, as with [`LeastProgressRemoval`](crate::LeastProgressRemoval).
/// When all bots are busy, the one closest to finishing is removed, which
/// minimises the work still outstanding. Ties go to the earliest admitted.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestCompletionRemoval;

impl NearestCompletionRemoval {
    pub fn new() -> Self {
        Self
    }
}

impl RemovalPolicy for NearestCompletionRemoval {
    fn select_victim(&self, bots: &[Bot]) -> Option<BotId> {
        if let Some(idle) = first_idle(bots) {
            return Some(idle);
        }

        bots.iter()
            .filter_map(|bot| bot.seconds_remaining().map(|remaining| (bot.id, remaining)))
            // min_by_key returns the first minimum
            .min_by_key(|(_, remaining)| *remaining)
            .map(|(id, _)| id)
    }

    fn name(&self) -> &str {
        "Nearest Completion"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::bots;

    #[test]
    fn test_prefers_idle() {
        let pool = bots(&[Some(1), None]);
        assert_eq!(
            NearestCompletionRemoval::new().select_victim(&pool),
            Some(BotId::new(2))
        );
    }

    #[test]
    fn test_all_busy_picks_smallest_remaining() {
        let pool = bots(&[Some(3), Some(8), Some(3)]);
        assert_eq!(
            NearestCompletionRemoval::new().select_victim(&pool),
            Some(BotId::new(1))
        );
    }
}
