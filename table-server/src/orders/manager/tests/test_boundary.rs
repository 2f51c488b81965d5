use super::*;

// ========================================================================
// Input validation
// ========================================================================

#[test]
fn test_create_order_empty_table_id() {
    let manager = create_manager_with_tables(1);
    let err = assert_kind(
        manager.create_order(order_input("", vec![simple_item("p", 1, 1.0)])),
        ErrorKind::ValidationError,
    );
    assert_eq!(err.to_string(), "mesa inválida");
}

#[test]
fn test_create_order_empty_items() {
    let manager = create_manager_with_tables(1);
    let err = assert_kind(
        manager.create_order(order_input("table_1", vec![])),
        ErrorKind::ValidationError,
    );
    assert_eq!(err.code(), ErrorCode::OrderEmpty);
    // Nothing happened to the table
    assert_eq!(table_status(&manager, "table_1"), TableStatus::Livre);
}

#[test]
fn test_add_empty_items() {
    let manager = create_manager_with_tables(1);
    let order = open_order(&manager, "table_1");
    let err = assert_kind(
        manager.add_products_to_order("table_1", vec![]),
        ErrorKind::ValidationError,
    );
    assert_eq!(err.code(), ErrorCode::OrderEmpty);
    assert_eq!(manager.get_order(&order.id).unwrap().items.len(), 2);
}

#[test]
fn test_create_order_invalid_items() {
    let manager = create_manager_with_tables(1);
    for item in [
        simple_item("p", 0, 1.0),
        simple_item("p", -3, 1.0),
        simple_item("p", 1, -1.0),
        simple_item("", 1, 1.0),
    ] {
        assert_kind(
            manager.create_order(order_input("table_1", vec![simple_item("ok", 1, 1.0), item])),
            ErrorKind::ValidationError,
        );
    }
    assert!(manager.list_active_orders().unwrap().is_empty());
}

#[test]
fn test_create_order_blank_staff() {
    let manager = create_manager_with_tables(1);
    let mut input = order_input("table_1", vec![simple_item("p", 1, 1.0)]);
    input.staff_user_id = " ".to_string();
    assert_kind(manager.create_order(input), ErrorKind::ValidationError);
}

#[test]
fn test_create_order_unknown_table() {
    let manager = create_test_manager();
    let err = assert_kind(
        manager.create_order(order_input("ghost", vec![simple_item("p", 1, 1.0)])),
        ErrorKind::NotFound,
    );
    assert!(matches!(err, ManagerError::TableNotFound(_)));
}

#[test]
fn test_payment_negative_tendered() {
    let manager = create_manager_with_tables(1);
    let order = open_order(&manager, "table_1");
    for tendered in [-1.0, f64::NAN, f64::INFINITY] {
        let err = assert_kind(
            manager.process_payment(&order.id, PaymentMethod::Dinheiro, Some(tendered)),
            ErrorKind::ValidationError,
        );
        assert_eq!(err.code(), ErrorCode::PaymentInvalidAmount);
    }
    assert!(!manager.get_order(&order.id).unwrap().is_paid);
}

#[test]
fn test_free_items_allowed() {
    let manager = create_manager_with_tables(1);
    let order = manager
        .create_order(order_input("table_1", vec![simple_item("agua", 2, 0.0)]))
        .unwrap();
    assert_eq!(order.total, 0.0);
}

// ========================================================================
// Single active order per table
// ========================================================================

#[test]
fn test_second_order_on_same_table_conflicts() {
    let manager = create_manager_with_tables(1);
    let first = open_order(&manager, "table_1");

    let err = assert_kind(
        manager.create_order(order_input("table_1", vec![simple_item("p", 1, 1.0)])),
        ErrorKind::Conflict,
    );
    assert_eq!(err.to_string(), "mesa já possui pedido ativo");
    match err {
        ManagerError::TableOccupied { order_id, .. } => assert_eq!(order_id, first.id),
        other => panic!("unexpected error: {other:?}"),
    }

    let active = manager.list_active_orders().unwrap();
    assert_eq!(active.len(), 1);
}

#[test]
fn test_table_reusable_after_delivery() {
    let manager = create_manager_with_tables(1);
    let first = open_order(&manager, "table_1");
    manager.mark_as_received(&first.id).unwrap();

    let second = open_order(&manager, "table_1");
    assert_ne!(first.id, second.id);
    assert_eq!(table_status(&manager, "table_1"), TableStatus::Ocupada);
}

#[test]
fn test_reserved_table_can_be_occupied() {
    let manager = create_manager_with_tables(1);
    manager
        .set_table_status("table_1", TableStatus::Reservada)
        .unwrap();
    open_order(&manager, "table_1");
    assert_eq!(table_status(&manager, "table_1"), TableStatus::Ocupada);
}

#[test]
fn test_maintenance_table_rejects_orders() {
    let manager = create_manager_with_tables(1);
    manager
        .set_table_status("table_1", TableStatus::Manutencao)
        .unwrap();
    let err = assert_kind(
        manager.create_order(order_input("table_1", vec![simple_item("p", 1, 1.0)])),
        ErrorKind::Conflict,
    );
    assert_eq!(err.to_string(), "mesa em manutenção");
}

// ========================================================================
// Adding to a table without an active order
// ========================================================================

#[test]
fn test_add_products_without_active_order() {
    let manager = create_manager_with_tables(1);
    let before = manager.get_state("table_1").unwrap();

    let err = assert_kind(
        manager.add_products_to_order("table_1", vec![simple_item("p", 1, 5.0)]),
        ErrorKind::NotFound,
    );
    assert_eq!(err.to_string(), "mesa não possui pedido ativo");

    assert_eq!(manager.get_state("table_1").unwrap(), before);
}

#[test]
fn test_add_products_after_delivery_is_not_found() {
    let manager = create_manager_with_tables(1);
    let order = open_order(&manager, "table_1");
    manager.mark_as_received(&order.id).unwrap();

    assert_kind(
        manager.add_products_to_order("table_1", vec![simple_item("p", 1, 5.0)]),
        ErrorKind::NotFound,
    );
    assert_eq!(manager.get_order(&order.id).unwrap().total, 39.00);
}

#[test]
fn test_add_products_unknown_table() {
    let manager = create_test_manager();
    let err = assert_kind(
        manager.add_products_to_order("ghost", vec![simple_item("p", 1, 5.0)]),
        ErrorKind::NotFound,
    );
    assert!(matches!(err, ManagerError::TableNotFound(_)));
}

#[test]
fn test_add_products_invalid_item_leaves_order_untouched() {
    let manager = create_manager_with_tables(1);
    let order = open_order(&manager, "table_1");

    assert_kind(
        manager.add_products_to_order(
            "table_1",
            vec![simple_item("p", 1, 5.0), simple_item("q", 0, 5.0)],
        ),
        ErrorKind::ValidationError,
    );
    assert_eq!(manager.get_order(&order.id).unwrap(), order);
}

#[test]
fn test_late_additions_allowed_while_preparing() {
    let manager = create_manager_with_tables(1);
    let order = open_order(&manager, "table_1");
    manager
        .update_order_status(&order.id, OrderStatus::Preparando)
        .unwrap();

    let updated = manager
        .add_products_to_order("table_1", vec![simple_item("sobremesa", 1, 12.00)])
        .unwrap();
    assert_eq!(updated.total, 51.00);
    assert_eq!(updated.status, OrderStatus::Preparando);
}

// ========================================================================
// Terminal guards
// ========================================================================

#[test]
fn test_double_cancel_conflicts() {
    let manager = create_manager_with_tables(1);
    let order = open_order(&manager, "table_1");
    manager.cancel_order(&order.id).unwrap();

    let err = assert_kind(manager.cancel_order(&order.id), ErrorKind::Conflict);
    assert!(matches!(err, ManagerError::OrderAlreadyVoided(_)));
}

#[test]
fn test_cancel_after_delivery_conflicts() {
    let manager = create_manager_with_tables(1);
    let order = open_order(&manager, "table_1");
    manager.mark_as_received(&order.id).unwrap();

    let err = assert_kind(manager.cancel_order(&order.id), ErrorKind::Conflict);
    assert!(matches!(err, ManagerError::OrderAlreadyCompleted(_)));
    assert_eq!(
        manager.get_order(&order.id).unwrap().status,
        OrderStatus::Entregue
    );
}

#[test]
fn test_double_receive_conflicts() {
    let manager = create_manager_with_tables(1);
    let order = open_order(&manager, "table_1");
    manager.mark_as_received(&order.id).unwrap();
    assert_kind(manager.mark_as_received(&order.id), ErrorKind::Conflict);
}

#[test]
fn test_double_payment_conflicts() {
    let manager = create_manager_with_tables(1);
    let order = open_order(&manager, "table_1");
    manager
        .process_payment(&order.id, PaymentMethod::Pix, None)
        .unwrap();

    let err = assert_kind(
        manager.process_payment(&order.id, PaymentMethod::Cartao, None),
        ErrorKind::Conflict,
    );
    assert_eq!(err.to_string(), "pedido já foi pago");
    assert_eq!(
        manager.get_order(&order.id).unwrap().payment_method,
        Some(PaymentMethod::Pix)
    );
}

#[test]
fn test_payment_of_cancelled_order_conflicts() {
    let manager = create_manager_with_tables(1);
    let order = open_order(&manager, "table_1");
    manager.cancel_order(&order.id).unwrap();
    assert_kind(
        manager.process_payment(&order.id, PaymentMethod::Pix, None),
        ErrorKind::Conflict,
    );
}

#[test]
fn test_payment_after_delivery_allowed() {
    let manager = create_manager_with_tables(1);
    let order = open_order(&manager, "table_1");
    manager.mark_as_received(&order.id).unwrap();

    let result = manager
        .process_payment(&order.id, PaymentMethod::Cartao, None)
        .unwrap();
    assert!(result.is_paid);
    assert_eq!(table_status(&manager, "table_1"), TableStatus::Livre);
}

#[test]
fn test_unknown_order_is_not_found() {
    let manager = create_test_manager();
    assert_kind(manager.cancel_order("missing"), ErrorKind::NotFound);
    assert_kind(manager.mark_as_received("missing"), ErrorKind::NotFound);
    assert_kind(
        manager.process_payment("missing", PaymentMethod::Pix, None),
        ErrorKind::NotFound,
    );
    assert_kind(manager.get_order("missing"), ErrorKind::NotFound);
    assert_kind(
        manager.update_order_status("missing", OrderStatus::Confirmado),
        ErrorKind::NotFound,
    );
}

// ========================================================================
// Kitchen workflow and admin status
// ========================================================================

#[test]
fn test_update_order_status_rejects_backwards() {
    let manager = create_manager_with_tables(1);
    let order = open_order(&manager, "table_1");
    manager
        .update_order_status(&order.id, OrderStatus::Pronto)
        .unwrap();

    let err = assert_kind(
        manager.update_order_status(&order.id, OrderStatus::Confirmado),
        ErrorKind::ValidationError,
    );
    assert!(matches!(err, ManagerError::InvalidTransition { .. }));
    assert_kind(
        manager.update_order_status(&order.id, OrderStatus::Pronto),
        ErrorKind::ValidationError,
    );
}

#[test]
fn test_update_order_status_rejects_terminal_target() {
    let manager = create_manager_with_tables(1);
    let order = open_order(&manager, "table_1");
    assert_kind(
        manager.update_order_status(&order.id, OrderStatus::Entregue),
        ErrorKind::ValidationError,
    );
    assert_kind(
        manager.update_order_status(&order.id, OrderStatus::Cancelado),
        ErrorKind::ValidationError,
    );
    assert_eq!(
        manager.get_order(&order.id).unwrap().status,
        OrderStatus::Pendente
    );
}

#[test]
fn test_update_status_of_terminal_order_conflicts() {
    let manager = create_manager_with_tables(1);
    let order = open_order(&manager, "table_1");
    manager.cancel_order(&order.id).unwrap();
    assert_kind(
        manager.update_order_status(&order.id, OrderStatus::Confirmado),
        ErrorKind::Conflict,
    );
}

#[test]
fn test_set_table_status_occupied_rejected() {
    let manager = create_manager_with_tables(1);
    assert_kind(
        manager.set_table_status("table_1", TableStatus::Ocupada),
        ErrorKind::ValidationError,
    );
}

#[test]
fn test_set_table_status_with_active_order_conflicts() {
    let manager = create_manager_with_tables(1);
    open_order(&manager, "table_1");
    let err = assert_kind(
        manager.set_table_status("table_1", TableStatus::Manutencao),
        ErrorKind::Conflict,
    );
    assert!(matches!(err, ManagerError::TableHasOrders(_)));
    assert_eq!(table_status(&manager, "table_1"), TableStatus::Ocupada);
}

#[test]
fn test_create_table_validation() {
    let manager = create_test_manager();
    for (id, number, capacity) in [("", 1, Some(4)), ("t", 0, Some(4)), ("t", 1, Some(0))] {
        assert_kind(
            manager.create_table(DiningTableCreate {
                id: id.to_string(),
                number,
                capacity,
            }),
            ErrorKind::ValidationError,
        );
    }
    assert_eq!(manager.storage().table_count().unwrap(), 0);
}

// ========================================================================
// Lock registry
// ========================================================================

#[test]
fn test_unknown_tables_leave_no_locks() {
    let manager = create_manager_with_tables(1);
    for i in 0..1_000 {
        let id = format!("ghost_{i}");
        assert_kind(manager.select_table(&id, "staff_1"), ErrorKind::NotFound);
        assert_kind(manager.release_table(&id), ErrorKind::NotFound);
        assert_kind(
            manager.set_table_status(&id, TableStatus::Reservada),
            ErrorKind::NotFound,
        );
        assert_kind(
            manager.add_products_to_order(&id, vec![simple_item("p", 1, 1.0)]),
            ErrorKind::NotFound,
        );
        assert_kind(
            manager.create_order(order_input(&id, vec![simple_item("p", 1, 1.0)])),
            ErrorKind::NotFound,
        );
    }
    assert!(manager.locks.is_empty());

    // Successful work on a real table is evicted as well
    let order = open_order(&manager, "table_1");
    manager.mark_as_received(&order.id).unwrap();
    assert!(manager.locks.is_empty());
}
