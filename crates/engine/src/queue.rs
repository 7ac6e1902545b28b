//! Priority-respecting order sequence

use counter_core::{Order, OrderId, Priority, Tick};
use counter_ports::{InvariantResult, InvariantViolation};
use std::collections::HashSet;

/// Every order ever submitted, in assignment priority order
///
/// Orders are never removed. Processing and completed orders keep their
/// slot for display; the dispatcher skips them.
#[derive(Debug, Clone, Default)]
pub struct OrderQueue {
    orders: Vec<Order>,
    last_id: u64,
}

impl OrderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next order id and insert a pending order
    ///
    /// Normal orders go to the back. VIP orders go immediately before the
    /// first normal entry in the sequence, whatever that entry's status,
    /// or to the back if there is none.
    pub fn submit(&mut self, priority: Priority, submitted_at: Tick) -> &Order {
        self.last_id += 1;
        let order = Order::new(OrderId::new(self.last_id), priority, submitted_at);

        let index = if priority.is_vip() {
            self.orders
                .iter()
                .position(|o| !o.priority.is_vip())
                .unwrap_or(self.orders.len())
        } else {
            self.orders.len()
        };
        self.orders.insert(index, order);
        &self.orders[index]
    }

    /// Earliest order in the sequence that is still pending
    pub fn first_pending(&self) -> Option<&Order> {
        self.orders.iter().find(|o| o.is_pending())
    }

    pub fn get(&self, id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    pub fn get_mut(&mut self, id: OrderId) -> Option<&mut Order> {
        self.orders.iter_mut().find(|o| o.id == id)
    }

    /// Position of an order in the sequence
    pub fn position(&self, id: OrderId) -> Option<usize> {
        self.orders.iter().position(|o| o.id == id)
    }

    pub fn all(&self) -> &[Order] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Check that ids are unique and increase along the sequence within
    /// each priority class
    pub fn check_sequence(&self) -> InvariantResult<()> {
        let mut seen = HashSet::new();
        let mut last_vip: Option<OrderId> = None;
        let mut last_normal: Option<OrderId> = None;

        for order in &self.orders {
            if !seen.insert(order.id) {
                return Err(InvariantViolation::IdSequence(format!(
                    "order {} appears twice",
                    order.id
                )));
            }
            let last = match order.priority {
                Priority::Vip => &mut last_vip,
                Priority::Normal => &mut last_normal,
            };
            if let Some(previous) = *last {
                if previous > order.id {
                    return Err(InvariantViolation::IdSequence(format!(
                        "{} order {} is queued behind later order {}",
                        order.priority, previous, order.id
                    )));
                }
            }
            if order.id.value() > self.last_id {
                return Err(InvariantViolation::IdSequence(format!(
                    "order {} was never allocated",
                    order.id
                )));
            }
            *last = Some(order.id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use counter_core::BotId;

    fn ids(queue: &OrderQueue) -> Vec<u64> {
        queue.all().iter().map(|o| o.id.value()).collect()
    }

    #[test]
    fn test_ids_are_monotonic_from_one() {
        let mut queue = OrderQueue::new();

        let first = queue.submit(Priority::Normal, 0).id;
        let second = queue.submit(Priority::Vip, 0).id;

        assert_eq!(first, OrderId::new(1));
        assert_eq!(second, OrderId::new(2));
        assert!(queue.check_sequence().is_ok());
    }

    #[test]
    fn test_check_sequence_rejects_class_out_of_order() {
        let mut queue = OrderQueue::new();
        queue.submit(Priority::Normal, 0); // 1
        queue.submit(Priority::Normal, 0); // 2
        queue.submit(Priority::Vip, 0); // 3
        assert!(queue.check_sequence().is_ok());

        // Later normal ahead of an earlier one
        queue.orders.swap(1, 2);
        assert!(matches!(
            queue.check_sequence(),
            Err(InvariantViolation::IdSequence(_))
        ));
    }

    #[test]
    fn test_check_sequence_rejects_duplicates_and_unallocated_ids() {
        let mut queue = OrderQueue::new();
        queue.submit(Priority::Vip, 0);
        queue.submit(Priority::Normal, 0);

        let mut duplicated = queue.clone();
        let copy = duplicated.orders[1].clone();
        duplicated.orders.push(copy);
        assert!(duplicated.check_sequence().is_err());

        queue
            .orders
            .push(Order::new(OrderId::new(9), Priority::Normal, 0));
        assert!(queue.check_sequence().is_err());
    }

    #[test]
    fn test_vip_jumps_ahead_of_normals() {
        let mut queue = OrderQueue::new();
        queue.submit(Priority::Normal, 0);
        queue.submit(Priority::Vip, 0);

        assert_eq!(ids(&queue), vec![2, 1]);
    }

    #[test]
    fn test_fifo_within_each_class() {
        let mut queue = OrderQueue::new();
        queue.submit(Priority::Normal, 0); // 1
        queue.submit(Priority::Vip, 0); // 2
        queue.submit(Priority::Normal, 0); // 3
        queue.submit(Priority::Vip, 0); // 4
        queue.submit(Priority::Vip, 0); // 5

        assert_eq!(ids(&queue), vec![2, 4, 5, 1, 3]);
    }

    #[test]
    fn test_vip_without_normals_appends() {
        let mut queue = OrderQueue::new();
        queue.submit(Priority::Vip, 0);
        queue.submit(Priority::Vip, 0);

        assert_eq!(ids(&queue), vec![1, 2]);
    }

    #[test]
    fn test_vip_goes_before_first_normal_regardless_of_status() {
        let mut queue = OrderQueue::new();
        queue.submit(Priority::Normal, 0); // 1
        queue.submit(Priority::Normal, 0); // 2
        queue.get_mut(OrderId::new(1)).unwrap().assign(BotId::new(1));

        queue.submit(Priority::Vip, 1); // 3

        assert_eq!(ids(&queue), vec![3, 1, 2]);
    }

    #[test]
    fn test_first_pending_skips_taken_orders() {
        let mut queue = OrderQueue::new();
        assert!(queue.first_pending().is_none());

        queue.submit(Priority::Vip, 0); // 1
        queue.submit(Priority::Normal, 0); // 2
        queue.get_mut(OrderId::new(1)).unwrap().assign(BotId::new(1));

        assert_eq!(queue.first_pending().map(|o| o.id), Some(OrderId::new(2)));
    }
}
