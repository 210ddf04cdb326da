use shared::{
    domain::{Order, OrderId, OrderItem, OrderItemId},
    error::{ApiError, ErrorCode},
    protocol::{OrderDetails, OrderItemSummary, OrderItemUpdate, OrderSummary, OrderUpdate},
};
use storage::OrderStore;
use tracing::info;

/// Order list plus the detail view of the selected order.
#[derive(Debug, Default)]
pub struct OrderManagementApp {
    store: OrderStore,
}

impl OrderManagementApp {
    pub fn new(store: OrderStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &OrderStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut OrderStore {
        &mut self.store
    }

    pub fn list_orders(&self) -> Vec<OrderSummary> {
        self.store
            .orders()
            .iter()
            .map(|order| summarize_order(&self.store, order))
            .collect()
    }

    pub fn select_order(&mut self, order_id: OrderId) -> Result<OrderSummary, ApiError> {
        self.store.select_order(order_id)?;
        info!(%order_id, "order selected");
        let order = self.store.order(order_id)?;
        Ok(summarize_order(&self.store, order))
    }

    /// `None` until an order has been selected.
    pub fn order_details(&self) -> Option<OrderDetails> {
        let order = self.store.current_order()?;
        Some(OrderDetails {
            order: summarize_order(&self.store, order),
            items: self
                .store
                .items_for(order.order_id)
                .into_iter()
                .map(summarize_item)
                .collect(),
        })
    }

    /// Appends a blank item to the selected order.
    pub fn add_item(&mut self) -> Result<OrderItemSummary, ApiError> {
        let order_id = self
            .store
            .current_order()
            .map(|order| order.order_id)
            .ok_or_else(|| ApiError::new(ErrorCode::Validation, "no order selected"))?;
        let order_item_id = self.store.add_item_for_order(order_id)?;
        info!(%order_id, %order_item_id, "item added");
        Ok(summarize_item(self.store.item(order_item_id)?))
    }

    pub fn delete_item(&mut self, order_item_id: OrderItemId) -> Result<OrderItemSummary, ApiError> {
        let removed = self.store.delete_item(order_item_id)?;
        info!(order_id = %removed.order_id, %order_item_id, "item deleted");
        Ok(summarize_item(&removed))
    }

    pub fn update_item(
        &mut self,
        order_item_id: OrderItemId,
        update: OrderItemUpdate,
    ) -> Result<OrderItemSummary, ApiError> {
        if let Some(quantity) = update.quantity {
            ensure_finite("quantity", quantity)?;
        }
        if let Some(unit_price) = update.unit_price {
            ensure_finite("unit price", unit_price)?;
        }
        let item = self.store.update_item(order_item_id, update)?;
        Ok(summarize_item(item))
    }

    pub fn update_order(
        &mut self,
        order_id: OrderId,
        update: OrderUpdate,
    ) -> Result<OrderSummary, ApiError> {
        if let Some(limit) = update.limit {
            ensure_finite("limit", limit)?;
        }
        self.store.update_order(order_id, update)?;
        let order = self.store.order(order_id)?;
        Ok(summarize_order(&self.store, order))
    }
}

fn summarize_order(store: &OrderStore, order: &Order) -> OrderSummary {
    let total = store.order_total(order.order_id);
    OrderSummary {
        order_id: order.order_id,
        customer_name: order.customer_name.clone(),
        limit: order.limit,
        item_count: store.items_for(order.order_id).len(),
        total,
        over_limit: total > order.limit,
    }
}

fn summarize_item(item: &OrderItem) -> OrderItemSummary {
    OrderItemSummary {
        order_item_id: item.order_item_id,
        order_id: item.order_id,
        product_name: item.product_name.clone(),
        quantity: item.quantity,
        unit_price: item.unit_price,
        total: item.total(),
    }
}

fn ensure_finite(field: &str, value: f64) -> Result<(), ApiError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ApiError::new(
            ErrorCode::Validation,
            format!("{field} must be a finite number"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selected(order_id: i64) -> OrderManagementApp {
        let mut app = OrderManagementApp::default();
        app.select_order(OrderId(order_id)).expect("select");
        app
    }

    #[test]
    fn list_shows_counts_totals_and_limit_warnings() {
        let mut app = OrderManagementApp::default();
        let orders = app.list_orders();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].item_count, 3);
        assert_eq!(orders[0].total, 30.0);
        assert!(!orders[0].over_limit);

        app.update_order(
            OrderId(1000),
            OrderUpdate {
                limit: Some(20.0),
                ..OrderUpdate::default()
            },
        )
        .expect("lower limit");
        assert!(app.list_orders()[0].over_limit);
    }

    #[test]
    fn details_absent_until_selection() {
        let app = OrderManagementApp::default();
        assert!(app.order_details().is_none());

        let app = selected(1001);
        let details = app.order_details().expect("details");
        assert_eq!(details.order.customer_name, "B. Evans");
        let names: Vec<&str> = details.items.iter().map(|i| i.product_name.as_str()).collect();
        assert_eq!(names, vec!["Mozzarella", "Wine"]);
    }

    #[test]
    fn add_item_targets_selected_order() {
        let mut app = selected(1001);
        let item = app.add_item().expect("add");

        assert_eq!(item.order_id, OrderId(1001));
        assert_eq!(item.total, 0.0);
        assert_eq!(app.order_details().expect("details").items.len(), 3);
        assert_eq!(app.store().items_for(OrderId(1000)).len(), 3);
    }

    #[test]
    fn add_item_without_selection_is_a_validation_error() {
        let mut app = OrderManagementApp::default();
        let err = app.add_item().expect_err("no selection");
        assert_eq!(err.code, ErrorCode::Validation);
        assert_eq!(app.store().items().len(), 5);
    }

    #[test]
    fn deleting_unknown_item_is_not_found() {
        let mut app = selected(1000);
        let err = app.delete_item(OrderItemId(5)).expect_err("unknown");
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(app.order_details().expect("details").items.len(), 3);
    }

    #[test]
    fn item_update_rejects_non_finite_numbers() {
        let mut app = selected(1000);
        let err = app
            .update_item(
                OrderItemId(1002),
                OrderItemUpdate {
                    unit_price: Some(f64::NAN),
                    ..OrderItemUpdate::default()
                },
            )
            .expect_err("nan");
        assert_eq!(err.code, ErrorCode::Validation);
        assert_eq!(app.store().order_total(OrderId(1000)), 30.0);
    }

    #[test]
    fn item_update_recomputes_detail_totals() {
        let mut app = selected(1000);
        let item = app
            .update_item(
                OrderItemId(1004),
                OrderItemUpdate {
                    unit_price: Some(5.0),
                    ..OrderItemUpdate::default()
                },
            )
            .expect("update");
        assert_eq!(item.total, 25.0);
        assert_eq!(app.order_details().expect("details").order.total, 40.0);
    }

    #[test]
    fn summaries_serialize_for_snapshot_output() {
        let app = selected(1000);
        let json = serde_json::to_value(app.order_details().expect("details")).expect("json");
        assert_eq!(json["order"]["order_id"], 1000);
        assert_eq!(json["items"][2]["product_name"], "IPA");
        assert_eq!(json["items"][2]["total"], 15.0);
    }
}
