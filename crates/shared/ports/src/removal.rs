use counter_core::{Bot, BotId};

/// Port for bot removal policies
///
/// A policy only chooses the victim. Reverting its order and dropping it
/// from the pool is the pool's job.
pub trait RemovalPolicy: Send + Sync {
    /// Pick the bot to remove from `bots`, given in admission order
    ///
    /// Must return `Some` whenever `bots` is non-empty.
    fn select_victim(&self, bots: &[Bot]) -> Option<BotId>;

    /// Get the name of the policy
    fn name(&self) -> &str;
}
