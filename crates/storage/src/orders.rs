use crossbeam_channel::Receiver;
use shared::{
    domain::{IdAllocator, Order, OrderId, OrderItem, OrderItemId},
    error::StoreError,
    protocol::{ChangeEvent, OrderItemUpdate, OrderUpdate},
};
use tracing::debug;

use crate::{seed, ChangeFeed};

/// Authoritative order and order item lists for the order demo.
///
/// Items refer to their order by id only. [`OrderStore::items_for`] and
/// [`OrderStore::order_total`] resolve that reference on every call.
#[derive(Debug)]
pub struct OrderStore {
    ids: IdAllocator,
    orders: Vec<Order>,
    order_items: Vec<OrderItem>,
    current_order: Option<OrderId>,
    feed: ChangeFeed,
}

impl Default for OrderStore {
    fn default() -> Self {
        Self::seeded()
    }
}

impl OrderStore {
    pub fn empty(ids: IdAllocator) -> Self {
        Self {
            ids,
            orders: Vec::new(),
            order_items: Vec::new(),
            current_order: None,
            feed: ChangeFeed::default(),
        }
    }

    pub fn seeded() -> Self {
        let mut store = Self::empty(IdAllocator::starting_at(seed::FIRST_ORDER_ID));

        // Orders take the first ids, items follow in seed order.
        let order_ids: Vec<OrderId> = seed::ORDERS
            .iter()
            .map(|order| store.insert_order(order.customer_name, order.limit))
            .collect();
        for (order_seed, order_id) in seed::ORDERS.iter().zip(order_ids) {
            for item in order_seed.items {
                let order_item_id = OrderItemId(store.ids.next_id());
                store.order_items.push(OrderItem {
                    order_item_id,
                    order_id,
                    product_name: item.product_name.to_string(),
                    quantity: item.quantity,
                    unit_price: item.unit_price,
                });
            }
        }

        debug!(
            orders = store.orders.len(),
            items = store.order_items.len(),
            "seeded order store"
        );
        store
    }

    /// Adds an order without publishing an event. Used while seeding.
    pub fn insert_order(&mut self, customer_name: impl Into<String>, limit: f64) -> OrderId {
        let order_id = OrderId(self.ids.next_id());
        self.orders.push(Order {
            order_id,
            customer_name: customer_name.into(),
            limit,
        });
        order_id
    }

    pub fn subscribe(&mut self) -> Receiver<ChangeEvent> {
        self.feed.subscribe()
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn order(&self, order_id: OrderId) -> Result<&Order, StoreError> {
        self.orders
            .iter()
            .find(|order| order.order_id == order_id)
            .ok_or(StoreError::OrderNotFound(order_id))
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.order_items
    }

    pub fn item(&self, order_item_id: OrderItemId) -> Result<&OrderItem, StoreError> {
        self.order_items
            .iter()
            .find(|item| item.order_item_id == order_item_id)
            .ok_or(StoreError::OrderItemNotFound(order_item_id))
    }

    pub fn items_for(&self, order_id: OrderId) -> Vec<&OrderItem> {
        self.order_items
            .iter()
            .filter(|item| item.order_id == order_id)
            .collect()
    }

    pub fn order_total(&self, order_id: OrderId) -> f64 {
        self.items_for(order_id).into_iter().map(OrderItem::total).sum()
    }

    pub fn current_order(&self) -> Option<&Order> {
        let order_id = self.current_order?;
        self.order(order_id).ok()
    }

    pub fn select_order(&mut self, order_id: OrderId) -> Result<(), StoreError> {
        self.order(order_id)?;
        self.current_order = Some(order_id);
        debug!(%order_id, "selected order");
        self.feed.publish(ChangeEvent::CurrentOrderChanged { order_id });
        Ok(())
    }

    pub fn add_item_for_order(&mut self, order_id: OrderId) -> Result<OrderItemId, StoreError> {
        self.order(order_id)?;
        let order_item_id = OrderItemId(self.ids.next_id());
        self.order_items.push(OrderItem::blank(order_item_id, order_id));
        debug!(%order_id, %order_item_id, "added order item");
        self.feed.publish(ChangeEvent::OrderItemAdded {
            order_id,
            order_item_id,
        });
        Ok(order_item_id)
    }

    /// Removes the item with the given id. A missing id leaves the list as is.
    pub fn delete_item(&mut self, order_item_id: OrderItemId) -> Result<OrderItem, StoreError> {
        let index = self
            .order_items
            .iter()
            .position(|item| item.order_item_id == order_item_id)
            .ok_or(StoreError::OrderItemNotFound(order_item_id))?;
        let removed = self.order_items.remove(index);
        debug!(order_id = %removed.order_id, %order_item_id, "deleted order item");
        self.feed.publish(ChangeEvent::OrderItemDeleted {
            order_id: removed.order_id,
            order_item_id,
        });
        Ok(removed)
    }

    pub fn update_order(
        &mut self,
        order_id: OrderId,
        update: OrderUpdate,
    ) -> Result<&Order, StoreError> {
        let index = self
            .orders
            .iter()
            .position(|order| order.order_id == order_id)
            .ok_or(StoreError::OrderNotFound(order_id))?;

        let order = &mut self.orders[index];
        if let Some(customer_name) = update.customer_name {
            order.customer_name = customer_name;
        }
        if let Some(limit) = update.limit {
            order.limit = limit;
        }
        debug!(%order_id, "updated order");
        self.feed.publish(ChangeEvent::OrderUpdated { order_id });
        Ok(&self.orders[index])
    }

    pub fn update_item(
        &mut self,
        order_item_id: OrderItemId,
        update: OrderItemUpdate,
    ) -> Result<&OrderItem, StoreError> {
        let index = self
            .order_items
            .iter()
            .position(|item| item.order_item_id == order_item_id)
            .ok_or(StoreError::OrderItemNotFound(order_item_id))?;

        let item = &mut self.order_items[index];
        if let Some(product_name) = update.product_name {
            item.product_name = product_name;
        }
        if let Some(quantity) = update.quantity {
            item.quantity = quantity;
        }
        if let Some(unit_price) = update.unit_price {
            item.unit_price = unit_price;
        }
        let order_id = item.order_id;
        debug!(%order_id, %order_item_id, "updated order item");
        self.feed.publish(ChangeEvent::OrderItemUpdated {
            order_id,
            order_item_id,
        });
        Ok(&self.order_items[index])
    }
}

#[cfg(test)]
#[path = "tests/orders_tests.rs"]
mod tests;
