use counter_core::{BotId, OrderId, Priority};
use serde::{Deserialize, Serialize};

/// Something that happened inside the engine
///
/// Recorded in the order it happened and drained with
/// [`SimulationEngine::take_events`](crate::SimulationEngine::take_events).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    OrderSubmitted {
        order_id: OrderId,
        priority: Priority,
    },
    BotAdded {
        bot_id: BotId,
    },
    /// A bot left the pool; `requeued` is the order it dropped, if any
    BotRemoved {
        bot_id: BotId,
        requeued: Option<OrderId>,
    },
    OrderAssigned {
        order_id: OrderId,
        bot_id: BotId,
    },
    OrderCompleted {
        order_id: OrderId,
        bot_id: BotId,
    },
    /// A processing order went back to pending after its bot was removed
    OrderRequeued {
        order_id: OrderId,
    },
}
