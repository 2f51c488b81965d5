//! TableOrderManager - table/order lifecycle with per-table serialization
//!
//! This module handles:
//! - Input validation
//! - Check-then-act sequences under the table's lock
//! - Persistence to redb (one write transaction per mutation)
//! - Event broadcasting after commit
//!
//! # Mutation Flow
//!
//! ```text
//! operation(args)
//!     ├─ 1. Validate input (no lock, no I/O)
//!     ├─ 2. Resolve the table (order-keyed operations read the order first)
//!     ├─ 3. Take the table lock
//!     ├─ 4. Begin write transaction, re-read current state
//!     ├─ 5. Check business rules
//!     ├─ 6. Persist order / table rows
//!     ├─ 7. Commit transaction
//!     ├─ 8. Broadcast event(s)
//!     └─ 9. Return the updated record
//! ```
//!
//! Returning early before step 7 drops the transaction, which aborts it, so
//! a failed operation never leaves partial writes behind.

mod error;
pub use error::*;

use super::locks::TableLocks;
use super::money;
use super::storage::{OrderStorage, StorageError};
use crate::utils::validation::{
    MAX_ID_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text, validate_table_id,
};
use shared::models::{
    DiningTable, DiningTableCreate, Order, OrderItem, OrderStatus, PaymentMethod, TableStatus,
};
use shared::order::{
    CreateOrderInput, EventPayload, LifecycleEvent, OrderItemInput, PaymentResult, TableState,
};
use shared::util::now_millis;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;

/// Event broadcast channel capacity
const EVENT_CHANNEL_CAPACITY: usize = 4096;

/// Default seat count for tables created without one
pub const DEFAULT_TABLE_CAPACITY: i32 = 4;

/// Event waiting to be broadcast once its transaction commits
type PendingEvent = (Option<String>, Option<String>, EventPayload);

/// TableOrderManager
///
/// The `epoch` field is a unique identifier generated on each startup.
/// Clients use it to detect server restarts.
pub struct TableOrderManager {
    storage: OrderStorage,
    locks: TableLocks,
    event_tx: broadcast::Sender<LifecycleEvent>,
    sequence: AtomicU64,
    /// Server instance epoch - unique ID generated on startup
    epoch: String,
}

impl std::fmt::Debug for TableOrderManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableOrderManager")
            .field("storage", &"<OrderStorage>")
            .field("event_tx", &"<broadcast::Sender>")
            .field("epoch", &self.epoch)
            .finish()
    }
}

impl TableOrderManager {
    /// Create a new manager with the given database path
    pub fn new(db_path: impl AsRef<Path>) -> ManagerResult<Self> {
        let storage = OrderStorage::open(db_path)?;
        Ok(Self::with_storage(storage))
    }

    /// Create a manager over an already opened storage
    pub fn with_storage(storage: OrderStorage) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let epoch = uuid::Uuid::new_v4().to_string();
        tracing::info!(epoch = %epoch, "TableOrderManager started with new epoch");
        Self {
            storage,
            locks: TableLocks::new(),
            event_tx,
            sequence: AtomicU64::new(0),
            epoch,
        }
    }

    /// Get the server epoch (unique instance ID)
    pub fn epoch(&self) -> &str {
        &self.epoch
    }

    /// Subscribe to lifecycle events
    pub fn subscribe(&self) -> broadcast::Receiver<LifecycleEvent> {
        self.event_tx.subscribe()
    }

    /// Get the storage (for tests and seeding)
    pub fn storage(&self) -> &OrderStorage {
        &self.storage
    }

    fn broadcast(&self, events: Vec<PendingEvent>) {
        for (table_id, order_id, payload) in events {
            let event = LifecycleEvent {
                event_id: uuid::Uuid::new_v4().to_string(),
                sequence: self.sequence.fetch_add(1, Ordering::SeqCst) + 1,
                timestamp: now_millis(),
                table_id,
                order_id,
                payload,
            };
            tracing::debug!(sequence = event.sequence, kind = event.kind(), "Broadcasting event");
            if self.event_tx.send(event).is_err() {
                tracing::trace!("Event broadcast skipped: no active receivers");
            }
        }
    }

    /// Lock key for an order-keyed operation
    ///
    /// The order's table never changes after creation, so reading it outside
    /// the lock is safe. Orders without a table serialize on their own id.
    fn lock_key_for_order(&self, order_id: &str) -> ManagerResult<String> {
        let order = self
            .storage
            .get_order(order_id)?
            .ok_or_else(|| ManagerError::OrderNotFound(order_id.to_string()))?;
        Ok(order
            .table_id
            .unwrap_or_else(|| format!("order:{}", order.id)))
    }

    // ========== Tables ==========

    /// Register a new table (admin setup). Tables start LIVRE.
    pub fn create_table(&self, input: DiningTableCreate) -> ManagerResult<DiningTable> {
        validate_table_id(&input.id)?;
        if input.number <= 0 {
            return Err(ManagerError::Validation(format!(
                "número de mesa inválido: {}",
                input.number
            )));
        }
        let capacity = input.capacity.unwrap_or(DEFAULT_TABLE_CAPACITY);
        if capacity <= 0 {
            return Err(ManagerError::Validation(format!(
                "capacidade inválida: {}",
                capacity
            )));
        }

        self.locks.with_table(&input.id, || -> ManagerResult<_> {
            let txn = self.storage.begin_write()?;
            if self.storage.get_table_txn(&txn, &input.id)?.is_some() {
                return Err(ManagerError::TableAlreadyExists(input.id.clone()));
            }

            let now = now_millis();
            let table = DiningTable {
                id: input.id.clone(),
                number: input.number,
                capacity,
                status: TableStatus::Livre,
                assigned_user_id: None,
                created_at: now,
                updated_at: now,
            };
            self.storage.store_table(&txn, &table)?;
            txn.commit().map_err(StorageError::from)?;

            tracing::info!(table_id = %table.id, number = table.number, "Table created");
            Ok(table)
        })
    }

    /// Create tables numbered 1..=count that do not exist yet
    ///
    /// Returns how many tables were created.
    pub fn seed_tables(&self, count: u32) -> ManagerResult<u32> {
        let mut created = 0;
        for number in 1..=count {
            let input = DiningTableCreate {
                id: format!("table_{number}"),
                number: number as i32,
                capacity: None,
            };
            match self.create_table(input) {
                Ok(_) => created += 1,
                Err(ManagerError::TableAlreadyExists(_)) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(created)
    }

    /// All tables ordered by number
    pub fn list_tables(&self) -> ManagerResult<Vec<DiningTable>> {
        Ok(self.storage.list_tables()?)
    }

    /// Get a single table
    pub fn get_table(&self, table_id: &str) -> ManagerResult<DiningTable> {
        validate_table_id(table_id)?;
        self.storage
            .get_table(table_id)?
            .ok_or_else(|| ManagerError::TableNotFound(table_id.to_string()))
    }

    /// Advisory table selection
    ///
    /// Records `assigned_user_id` unless the table is OCUPADA. Never changes
    /// the table status.
    pub fn select_table(&self, table_id: &str, staff_user_id: &str) -> ManagerResult<DiningTable> {
        validate_table_id(table_id)?;

        self.locks.with_table(table_id, || -> ManagerResult<_> {
            let txn = self.storage.begin_write()?;
            let mut table = self
                .storage
                .get_table_txn(&txn, table_id)?
                .ok_or_else(|| ManagerError::TableNotFound(table_id.to_string()))?;

            let assignable = table.status != TableStatus::Ocupada
                && !staff_user_id.trim().is_empty()
                && table.assigned_user_id.as_deref() != Some(staff_user_id);
            if assignable {
                table.assigned_user_id = Some(staff_user_id.to_string());
                table.updated_at = now_millis();
                self.storage.store_table(&txn, &table)?;
                txn.commit().map_err(StorageError::from)?;
                tracing::debug!(table_id, staff_user_id, "Table assigned");
            }

            Ok(table)
        })
    }

    /// Admin status change (RESERVADA / MANUTENCAO / LIVRE)
    ///
    /// OCUPADA is only ever entered through `create_order`.
    pub fn set_table_status(&self, table_id: &str, status: TableStatus) -> ManagerResult<DiningTable> {
        validate_table_id(table_id)?;
        if status == TableStatus::Ocupada {
            return Err(ManagerError::Validation(
                "mesa só pode ser ocupada por um pedido".to_string(),
            ));
        }

        let (table, events) = self.locks.with_table(table_id, || -> ManagerResult<_> {
            let txn = self.storage.begin_write()?;
            let mut table = self
                .storage
                .get_table_txn(&txn, table_id)?
                .ok_or_else(|| ManagerError::TableNotFound(table_id.to_string()))?;

            if self
                .storage
                .find_active_order_for_table_txn(&txn, table_id)?
                .is_some()
            {
                return Err(ManagerError::TableHasOrders(table_id.to_string()));
            }

            if table.status == status {
                return Ok((table, Vec::new()));
            }

            let from = table.status;
            table.status = status;
            if status == TableStatus::Livre {
                table.assigned_user_id = None;
            }
            table.updated_at = now_millis();
            self.storage.store_table(&txn, &table)?;
            txn.commit().map_err(StorageError::from)?;

            tracing::info!(table_id, from = %from, to = %status, "Table status changed");
            let events = vec![(
                Some(table_id.to_string()),
                None,
                EventPayload::TableStatusChanged { from, to: status },
            )];
            Ok((table, events))
        })?;

        self.broadcast(events);
        Ok(table)
    }

    /// Force a table back to LIVRE without touching its orders
    ///
    /// Manual correction path; may leave an active order on a LIVRE table,
    /// which `check_status` then reports as drift.
    pub fn release_table(&self, table_id: &str) -> ManagerResult<DiningTable> {
        validate_table_id(table_id)?;

        let (table, events) = self.locks.with_table(table_id, || -> ManagerResult<_> {
            let txn = self.storage.begin_write()?;
            let mut table = self
                .storage
                .get_table_txn(&txn, table_id)?
                .ok_or_else(|| ManagerError::TableNotFound(table_id.to_string()))?;

            if table.status == TableStatus::Livre {
                return Ok((table, Vec::new()));
            }

            let active = self.storage.find_active_orders_for_table_txn(&txn, table_id)?;
            if !active.is_empty() {
                tracing::warn!(
                    table_id,
                    active_orders = active.len(),
                    "Releasing table that still has active orders"
                );
            }

            let from = table.status;
            table.status = TableStatus::Livre;
            table.assigned_user_id = None;
            table.updated_at = now_millis();
            self.storage.store_table(&txn, &table)?;
            txn.commit().map_err(StorageError::from)?;

            tracing::info!(table_id, from = %from, "Table released manually");
            let events = vec![(
                Some(table_id.to_string()),
                None,
                EventPayload::TableStatusChanged {
                    from,
                    to: TableStatus::Livre,
                },
            )];
            Ok((table, events))
        })?;

        self.broadcast(events);
        Ok(table)
    }

    /// Reconciliation report; never corrects anything
    pub fn check_status(&self, table_id: &str) -> ManagerResult<TableState> {
        let state = self.get_state(table_id)?;
        if !state.status_matches {
            tracing::warn!(
                table_id,
                status = %state.table.status,
                active_orders = state.active_orders.len(),
                "Table status drift detected"
            );
        }
        Ok(state)
    }

    /// Table plus its non-terminal orders
    pub fn get_state(&self, table_id: &str) -> ManagerResult<TableState> {
        validate_table_id(table_id)?;
        let (table, active_orders) = self
            .storage
            .get_table_with_active_orders(table_id)?
            .ok_or_else(|| ManagerError::TableNotFound(table_id.to_string()))?;
        Ok(TableState::from_parts(table, active_orders))
    }

    // ========== Orders ==========

    /// Open the single active order of a table
    ///
    /// Order, items and the table's OCUPADA status are written in one
    /// transaction under the table lock; a second create for the same table
    /// sees the first one and fails with a conflict.
    pub fn create_order(&self, input: CreateOrderInput) -> ManagerResult<Order> {
        validate_table_id(&input.table_id)?;
        validate_required_text(&input.staff_user_id, "staff_user_id", MAX_ID_LEN)?;
        validate_optional_text(&input.notes, "notes", MAX_NOTE_LEN)?;
        money::validate_items(&input.items)?;

        let table_id = input.table_id.as_str();
        let (order, events) = self.locks.with_table(table_id, || -> ManagerResult<_> {
            let txn = self.storage.begin_write()?;
            let mut table = self
                .storage
                .get_table_txn(&txn, table_id)?
                .ok_or_else(|| ManagerError::TableNotFound(table_id.to_string()))?;

            if table.status == TableStatus::Manutencao {
                return Err(ManagerError::TableUnderMaintenance(table_id.to_string()));
            }

            if let Some(existing) = self.storage.find_active_order_for_table_txn(&txn, table_id)? {
                return Err(ManagerError::TableOccupied {
                    table_id: table_id.to_string(),
                    order_id: existing.id,
                });
            }

            let now = now_millis();
            let order_id = uuid::Uuid::new_v4().to_string();
            let items = build_items(&order_id, &input.items, now);
            let total = money::calculate_total(&items);
            let order = Order {
                id: order_id,
                table_id: Some(table_id.to_string()),
                staff_user_id: input.staff_user_id.clone(),
                status: OrderStatus::Pendente,
                items,
                total,
                is_paid: false,
                payment_method: None,
                paid_at: None,
                notes: input.notes.clone(),
                created_at: now,
                updated_at: now,
            };
            self.storage.store_order(&txn, &order)?;

            let from = table.status;
            table.status = TableStatus::Ocupada;
            if table.assigned_user_id.is_none() {
                table.assigned_user_id = Some(input.staff_user_id.clone());
            }
            table.updated_at = now;
            self.storage.store_table(&txn, &table)?;

            txn.commit().map_err(StorageError::from)?;

            tracing::info!(
                order_id = %order.id,
                table_id,
                staff_user_id = %order.staff_user_id,
                total = order.total,
                "Order created"
            );

            let mut events = vec![(
                Some(table_id.to_string()),
                Some(order.id.clone()),
                EventPayload::OrderCreated {
                    staff_user_id: order.staff_user_id.clone(),
                    item_count: order.items.len(),
                    total: order.total,
                },
            )];
            if from != TableStatus::Ocupada {
                events.push((
                    Some(table_id.to_string()),
                    None,
                    EventPayload::TableStatusChanged {
                        from,
                        to: TableStatus::Ocupada,
                    },
                ));
            }
            Ok((order, events))
        })?;

        self.broadcast(events);
        Ok(order)
    }

    /// Append items to the table's active order and recompute its total
    ///
    /// Allowed at any non-terminal status, including PREPARANDO and PRONTO.
    pub fn add_products_to_order(
        &self,
        table_id: &str,
        items: Vec<OrderItemInput>,
    ) -> ManagerResult<Order> {
        validate_table_id(table_id)?;
        money::validate_items(&items)?;

        let (order, events) = self.locks.with_table(table_id, || -> ManagerResult<_> {
            let txn = self.storage.begin_write()?;
            if self.storage.get_table_txn(&txn, table_id)?.is_none() {
                return Err(ManagerError::TableNotFound(table_id.to_string()));
            }

            let mut order = self
                .storage
                .find_active_order_for_table_txn(&txn, table_id)?
                .ok_or_else(|| ManagerError::NoActiveOrder(table_id.to_string()))?;

            let now = now_millis();
            order.items.extend(build_items(&order.id, &items, now));
            order.total = money::calculate_total(&order.items);
            order.updated_at = now;
            self.storage.store_order(&txn, &order)?;
            txn.commit().map_err(StorageError::from)?;

            tracing::info!(
                order_id = %order.id,
                table_id,
                added = items.len(),
                total = order.total,
                "Items added to order"
            );

            let events = vec![(
                Some(table_id.to_string()),
                Some(order.id.clone()),
                EventPayload::ItemsAdded {
                    item_count: items.len(),
                    total: order.total,
                },
            )];
            Ok((order, events))
        })?;

        self.broadcast(events);
        Ok(order)
    }

    /// Mark an order as paid
    ///
    /// Payment is orthogonal to fulfilment: the order status and the table
    /// are left as they are. `amount_tendered` is echoed back, not enforced.
    pub fn process_payment(
        &self,
        order_id: &str,
        method: PaymentMethod,
        amount_tendered: Option<f64>,
    ) -> ManagerResult<PaymentResult> {
        if let Some(amount) = amount_tendered
            && (!amount.is_finite() || amount < 0.0)
        {
            return Err(ManagerError::InvalidPaymentAmount(amount));
        }

        let key = self.lock_key_for_order(order_id)?;
        let (result, events) = self.locks.with_table(&key, || -> ManagerResult<_> {
            let txn = self.storage.begin_write()?;
            let mut order = self
                .storage
                .get_order_txn(&txn, order_id)?
                .ok_or_else(|| ManagerError::OrderNotFound(order_id.to_string()))?;

            if order.is_paid {
                return Err(ManagerError::OrderAlreadyPaid(order_id.to_string()));
            }
            if order.status == OrderStatus::Cancelado {
                return Err(ManagerError::OrderAlreadyVoided(order_id.to_string()));
            }

            let now = now_millis();
            order.is_paid = true;
            order.payment_method = Some(method);
            order.paid_at = Some(now);
            order.updated_at = now;
            self.storage.store_order(&txn, &order)?;
            txn.commit().map_err(StorageError::from)?;

            if let Some(tendered) = amount_tendered
                && money::to_decimal(tendered) < money::to_decimal(order.total)
            {
                tracing::warn!(
                    order_id,
                    tendered,
                    total = order.total,
                    "Amount tendered is below the order total"
                );
            }
            tracing::info!(order_id, method = %method, amount = order.total, "Order paid");

            let result = PaymentResult {
                order_id: order.id.clone(),
                amount: order.total,
                method,
                amount_tendered,
                is_paid: true,
                paid_at: now,
            };
            let events = vec![(
                order.table_id.clone(),
                Some(order.id.clone()),
                EventPayload::OrderPaid {
                    method,
                    amount: order.total,
                },
            )];
            Ok((result, events))
        })?;

        self.broadcast(events);
        Ok(result)
    }

    /// Deliver an order (terminal) and free its table if nothing else is active
    pub fn mark_as_received(&self, order_id: &str) -> ManagerResult<Order> {
        self.finish_order(order_id, OrderStatus::Entregue)
    }

    /// Cancel an order (terminal) and free its table if nothing else is active
    pub fn cancel_order(&self, order_id: &str) -> ManagerResult<Order> {
        self.finish_order(order_id, OrderStatus::Cancelado)
    }

    /// Move an order to a terminal status and re-evaluate its table
    ///
    /// The remaining-orders check and the table write share the order's
    /// transaction and the table lock, so no create can slip in between.
    fn finish_order(&self, order_id: &str, target: OrderStatus) -> ManagerResult<Order> {
        let key = self.lock_key_for_order(order_id)?;
        let (order, events) = self.locks.with_table(&key, || -> ManagerResult<_> {
            let txn = self.storage.begin_write()?;
            let mut order = self
                .storage
                .get_order_txn(&txn, order_id)?
                .ok_or_else(|| ManagerError::OrderNotFound(order_id.to_string()))?;

            if order.status.is_terminal() {
                return Err(ManagerError::terminal(order_id, order.status));
            }

            let now = now_millis();
            let from = order.status;
            order.status = target;
            order.updated_at = now;
            self.storage.store_order(&txn, &order)?;

            let mut events = vec![(
                order.table_id.clone(),
                Some(order.id.clone()),
                EventPayload::OrderStatusChanged { from, to: target },
            )];

            let mut released = false;
            if let Some(table_id) = order.table_id.as_deref()
                && let Some(mut table) = self.storage.get_table_txn(&txn, table_id)?
            {
                let remaining = self.storage.find_active_orders_for_table_txn(&txn, table_id)?;
                if remaining.is_empty() && table.status == TableStatus::Ocupada {
                    table.status = TableStatus::Livre;
                    table.assigned_user_id = None;
                    table.updated_at = now;
                    self.storage.store_table(&txn, &table)?;
                    released = true;
                    events.push((
                        Some(table_id.to_string()),
                        None,
                        EventPayload::TableStatusChanged {
                            from: TableStatus::Ocupada,
                            to: TableStatus::Livre,
                        },
                    ));
                }
            }

            txn.commit().map_err(StorageError::from)?;

            tracing::info!(
                order_id,
                table_id = ?order.table_id,
                from = %from,
                to = %target,
                table_released = released,
                "Order finished"
            );
            Ok((order, events))
        })?;

        self.broadcast(events);
        Ok(order)
    }

    /// Kitchen workflow step: PENDENTE → CONFIRMADO → PREPARANDO → PRONTO
    ///
    /// Only forward moves are accepted. Terminal statuses go through
    /// `mark_as_received` / `cancel_order`.
    pub fn update_order_status(&self, order_id: &str, status: OrderStatus) -> ManagerResult<Order> {
        let Some(target_rank) = status.workflow_rank() else {
            return Err(ManagerError::Validation(format!(
                "status {} deve ser definido por entrega ou cancelamento",
                status
            )));
        };

        let key = self.lock_key_for_order(order_id)?;
        let (order, events) = self.locks.with_table(&key, || -> ManagerResult<_> {
            let txn = self.storage.begin_write()?;
            let mut order = self
                .storage
                .get_order_txn(&txn, order_id)?
                .ok_or_else(|| ManagerError::OrderNotFound(order_id.to_string()))?;

            let Some(current_rank) = order.status.workflow_rank() else {
                return Err(ManagerError::terminal(order_id, order.status));
            };
            if target_rank <= current_rank {
                return Err(ManagerError::InvalidTransition {
                    from: order.status,
                    to: status,
                });
            }

            let from = order.status;
            order.status = status;
            order.updated_at = now_millis();
            self.storage.store_order(&txn, &order)?;
            txn.commit().map_err(StorageError::from)?;

            tracing::info!(order_id, from = %from, to = %status, "Order status changed");
            let events = vec![(
                order.table_id.clone(),
                Some(order.id.clone()),
                EventPayload::OrderStatusChanged { from, to: status },
            )];
            Ok((order, events))
        })?;

        self.broadcast(events);
        Ok(order)
    }

    /// Get an order by ID
    pub fn get_order(&self, order_id: &str) -> ManagerResult<Order> {
        self.storage
            .get_order(order_id)?
            .ok_or_else(|| ManagerError::OrderNotFound(order_id.to_string()))
    }

    /// All non-terminal orders, oldest first
    pub fn list_active_orders(&self) -> ManagerResult<Vec<Order>> {
        Ok(self.storage.get_active_orders()?)
    }
}

/// Turn validated inputs into item rows owned by `order_id`
fn build_items(order_id: &str, inputs: &[OrderItemInput], now: i64) -> Vec<OrderItem> {
    inputs
        .iter()
        .map(|input| OrderItem {
            id: uuid::Uuid::new_v4().to_string(),
            order_id: order_id.to_string(),
            product_id: input.product_id.clone(),
            quantity: input.quantity,
            price: input.price,
            notes: input.notes.clone(),
            created_at: now,
        })
        .collect()
}

#[cfg(test)]
mod tests;
