use counter_core::{BotId, OrderId};
use thiserror::Error;

/// Broken engine invariant
///
/// None of these is reachable through the public engine API; seeing one
/// means a bug in the engine itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("{bot} is busy on unknown order {order}")]
    UnknownOrder { bot: BotId, order: OrderId },

    #[error("order {order} is claimed by both {first} and {second}")]
    DuplicateBinding {
        order: OrderId,
        first: BotId,
        second: BotId,
    },

    #[error("{bot} works on {order} but the order is bound to {bound:?}")]
    OrderBotMismatch {
        bot: BotId,
        order: OrderId,
        bound: Option<BotId>,
    },

    #[error("pending order {0} still has a bot assigned")]
    PendingOrderBound(OrderId),

    #[error("processing order {0} is not owned by any busy bot")]
    ProcessingOrderUnbound(OrderId),

    #[error("normal order {normal} is queued ahead of vip order {vip}")]
    PriorityOrder { normal: OrderId, vip: OrderId },

    #[error("order ids out of sequence: {0}")]
    IdSequence(String),
}

pub type InvariantResult<T> = std::result::Result<T, InvariantViolation>;
