use super::*;
use shared::{ErrorCode, ErrorKind};
use shared::models::DiningTableCreate;

fn create_test_manager() -> TableOrderManager {
    let storage = OrderStorage::open_in_memory().unwrap();
    TableOrderManager::with_storage(storage)
}

/// Manager with tables `table_1` .. `table_{count}` already registered
fn create_manager_with_tables(count: u32) -> TableOrderManager {
    let manager = create_test_manager();
    manager.seed_tables(count).unwrap();
    manager
}

fn add_table(manager: &TableOrderManager, id: &str, number: i32) -> DiningTable {
    manager
        .create_table(DiningTableCreate {
            id: id.to_string(),
            number,
            capacity: Some(4),
        })
        .unwrap()
}

fn simple_item(product_id: &str, quantity: i32, price: f64) -> OrderItemInput {
    OrderItemInput::new(product_id, quantity, price)
}

fn order_input(table_id: &str, items: Vec<OrderItemInput>) -> CreateOrderInput {
    CreateOrderInput {
        items,
        table_id: table_id.to_string(),
        notes: None,
        staff_user_id: "staff_user_123".to_string(),
    }
}

// ========================================================================
// Helper: open a table with the two reference items (total 39.00)
// ========================================================================

fn open_order(manager: &TableOrderManager, table_id: &str) -> Order {
    manager
        .create_order(order_input(
            table_id,
            vec![
                simple_item("prod_123", 2, 15.50),
                simple_item("prod_456", 1, 8.00),
            ],
        ))
        .unwrap()
}

fn table_status(manager: &TableOrderManager, table_id: &str) -> TableStatus {
    manager.get_table(table_id).unwrap().status
}

fn assert_kind<T: std::fmt::Debug>(result: ManagerResult<T>, kind: ErrorKind) -> ManagerError {
    let err = result.unwrap_err();
    assert_eq!(err.kind(), kind, "unexpected error: {err:?}");
    err
}

mod test_boundary;
