//! redb-based persistence gateway for tables and orders
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `dining_tables` | `table_id` | `DiningTable` | Table records |
//! | `orders` | `order_id` | `Order` | Orders with embedded items |
//! | `active_orders` | `order_id` | `()` | Non-terminal order index |
//!
//! # Atomicity
//!
//! redb allows a single write transaction at a time and commits are
//! all-or-nothing. Every read-modify-write the manager performs (check the
//! active index, write the order, flip the table status) happens inside one
//! `WriteTransaction`, so a half-applied order can never be observed.
//!
//! # Durability
//!
//! redb uses `Durability::Immediate` by default: commits are persistent as
//! soon as `commit()` returns.

use redb::{
    Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition,
    WriteTransaction,
};
use shared::models::{DiningTable, Order};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Table records: key = table_id, value = JSON-serialized DiningTable
const DINING_TABLES_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("dining_tables");

/// Orders: key = order_id, value = JSON-serialized Order (items embedded)
const ORDERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("orders");

/// Non-terminal orders: key = order_id, value = empty (existence check)
const ACTIVE_ORDERS_TABLE: TableDefinition<&str, ()> = TableDefinition::new("active_orders");

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Table and order storage backed by redb
#[derive(Clone)]
pub struct OrderStorage {
    db: Arc<Database>,
}

impl std::fmt::Debug for OrderStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderStorage").finish_non_exhaustive()
    }
}

impl OrderStorage {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (tests and ephemeral runs)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        // Create all tables if they don't exist
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(DINING_TABLES_TABLE)?;
            let _ = write_txn.open_table(ORDERS_TABLE)?;
            let _ = write_txn.open_table(ACTIVE_ORDERS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Begin a write transaction
    pub fn begin_write(&self) -> StorageResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    // ========== Dining Tables ==========

    /// Store a table record
    pub fn store_table(&self, txn: &WriteTransaction, table: &DiningTable) -> StorageResult<()> {
        let mut t = txn.open_table(DINING_TABLES_TABLE)?;
        let value = serde_json::to_vec(table)?;
        t.insert(table.id.as_str(), value.as_slice())?;
        Ok(())
    }

    /// Get a table by ID (within transaction)
    pub fn get_table_txn(
        &self,
        txn: &WriteTransaction,
        table_id: &str,
    ) -> StorageResult<Option<DiningTable>> {
        let t = txn.open_table(DINING_TABLES_TABLE)?;
        match t.get(table_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Get a table by ID
    pub fn get_table(&self, table_id: &str) -> StorageResult<Option<DiningTable>> {
        let read_txn = self.db.begin_read()?;
        let t = read_txn.open_table(DINING_TABLES_TABLE)?;
        match t.get(table_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Get all tables ordered by display number
    pub fn list_tables(&self) -> StorageResult<Vec<DiningTable>> {
        let read_txn = self.db.begin_read()?;
        let t = read_txn.open_table(DINING_TABLES_TABLE)?;

        let mut tables = Vec::new();
        for result in t.iter()? {
            let (_key, value) = result?;
            let table: DiningTable = serde_json::from_slice(value.value())?;
            tables.push(table);
        }

        tables.sort_by_key(|t| t.number);
        Ok(tables)
    }

    /// Count table records
    pub fn table_count(&self) -> StorageResult<u64> {
        let read_txn = self.db.begin_read()?;
        let t = read_txn.open_table(DINING_TABLES_TABLE)?;
        Ok(t.len()?)
    }

    // ========== Orders ==========

    /// Store an order and keep the active index in step with its status
    pub fn store_order(&self, txn: &WriteTransaction, order: &Order) -> StorageResult<()> {
        {
            let mut t = txn.open_table(ORDERS_TABLE)?;
            let value = serde_json::to_vec(order)?;
            t.insert(order.id.as_str(), value.as_slice())?;
        }

        let mut active = txn.open_table(ACTIVE_ORDERS_TABLE)?;
        if order.is_active() {
            active.insert(order.id.as_str(), ())?;
        } else {
            active.remove(order.id.as_str())?;
        }
        Ok(())
    }

    /// Get an order by ID (within transaction)
    pub fn get_order_txn(
        &self,
        txn: &WriteTransaction,
        order_id: &str,
    ) -> StorageResult<Option<Order>> {
        let t = txn.open_table(ORDERS_TABLE)?;
        match t.get(order_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Get an order by ID
    pub fn get_order(&self, order_id: &str) -> StorageResult<Option<Order>> {
        let read_txn = self.db.begin_read()?;
        let t = read_txn.open_table(ORDERS_TABLE)?;
        match t.get(order_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    // ========== Active Orders ==========

    /// Get all active orders, oldest first
    pub fn get_active_orders(&self) -> StorageResult<Vec<Order>> {
        let read_txn = self.db.begin_read()?;
        let active_table = read_txn.open_table(ACTIVE_ORDERS_TABLE)?;
        let orders_table = read_txn.open_table(ORDERS_TABLE)?;

        let mut orders = Vec::new();
        for result in active_table.iter()? {
            let (key, _) = result?;
            if let Some(value) = orders_table.get(key.value())? {
                let order: Order = serde_json::from_slice(value.value())?;
                orders.push(order);
            }
        }

        orders.sort_by_key(|o| o.created_at);
        Ok(orders)
    }

    /// Find active orders for a specific table (within transaction)
    ///
    /// The manager keeps this at most one element long; more than one means
    /// the store was written around the manager.
    pub fn find_active_orders_for_table_txn(
        &self,
        txn: &WriteTransaction,
        table_id: &str,
    ) -> StorageResult<Vec<Order>> {
        let active_table = txn.open_table(ACTIVE_ORDERS_TABLE)?;
        let orders_table = txn.open_table(ORDERS_TABLE)?;

        let mut orders = Vec::new();
        for result in active_table.iter()? {
            let (key, _) = result?;
            if let Some(value) = orders_table.get(key.value())? {
                let order: Order = serde_json::from_slice(value.value())?;
                if order.table_id.as_deref() == Some(table_id) {
                    orders.push(order);
                }
            }
        }

        orders.sort_by_key(|o| o.created_at);
        Ok(orders)
    }

    /// Read a table and its active orders from one snapshot
    pub fn get_table_with_active_orders(
        &self,
        table_id: &str,
    ) -> StorageResult<Option<(DiningTable, Vec<Order>)>> {
        let read_txn = self.db.begin_read()?;
        let table: DiningTable = {
            let t = read_txn.open_table(DINING_TABLES_TABLE)?;
            match t.get(table_id)? {
                Some(value) => serde_json::from_slice(value.value())?,
                None => return Ok(None),
            }
        };

        let active_table = read_txn.open_table(ACTIVE_ORDERS_TABLE)?;
        let orders_table = read_txn.open_table(ORDERS_TABLE)?;
        let mut orders = Vec::new();
        for result in active_table.iter()? {
            let (key, _) = result?;
            if let Some(value) = orders_table.get(key.value())? {
                let order: Order = serde_json::from_slice(value.value())?;
                if order.table_id.as_deref() == Some(table_id) {
                    orders.push(order);
                }
            }
        }

        orders.sort_by_key(|o| o.created_at);
        Ok(Some((table, orders)))
    }

    /// Find the single active order for a table (within transaction)
    pub fn find_active_order_for_table_txn(
        &self,
        txn: &WriteTransaction,
        table_id: &str,
    ) -> StorageResult<Option<Order>> {
        Ok(self
            .find_active_orders_for_table_txn(txn, table_id)?
            .into_iter()
            .next())
    }
}
