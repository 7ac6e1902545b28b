mod bot;
mod order;
mod order_status;
mod priority;

pub use bot::{Bot, BotState, BotStatus};
pub use order::Order;
pub use order_status::OrderStatus;
pub use priority::Priority;
