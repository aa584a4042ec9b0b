//! Test support: an in-memory database speaking the statement shapes the
//! builders emit, plus shared entity fixtures.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rowmap::{
    ColumnDef, Connection, ConnectionConfig, ConnectionError, Connector, Entity, EntityConfig,
    Error, Result, Row, Value,
};

#[derive(Debug, Clone, Default)]
struct Table {
    /// Column names in registration order
    columns: Vec<String>,
    id_column: String,
    next_id: i64,
    rows: Vec<HashMap<String, Value>>,
}

#[derive(Debug, Default)]
struct Store {
    tables: HashMap<String, Table>,
    /// Snapshot taken when autocommit is disabled; rollback restores it.
    snapshot: Option<HashMap<String, Table>>,
    /// When set, SELECT results expose columns in reversed registration
    /// order, to exercise positional-mapping bugs in callers.
    reverse_select_columns: bool,
}

/// Shared in-memory database.
///
/// Cloneable handle over the same store; implements [`Connector`], so a
/// `SessionFactory` can open any number of connections against it.
#[derive(Debug, Clone, Default)]
pub struct MemoryDb {
    store: Arc<Mutex<Store>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect(&self) -> MemoryConnection {
        MemoryConnection {
            store: Arc::clone(&self.store),
            closed: false,
        }
    }

    /// Make SELECT results expose columns in reversed order.
    pub fn reverse_select_columns(&self, enabled: bool) {
        self.store.lock().unwrap().reverse_select_columns = enabled;
    }

    pub fn table_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.store.lock().unwrap().tables.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Connector for MemoryDb {
    type Conn = MemoryConnection;

    fn open(&self, _config: &ConnectionConfig) -> Result<MemoryConnection> {
        Ok(self.connect())
    }
}

/// One connection into a [`MemoryDb`].
#[derive(Debug)]
pub struct MemoryConnection {
    store: Arc<Mutex<Store>>,
    closed: bool,
}

fn db_error(message: impl Into<String>) -> Error {
    Error::Connection(ConnectionError::new(message))
}

fn between<'a>(s: &'a str, start: &str, end: &str) -> Result<&'a str> {
    let from = s
        .find(start)
        .ok_or_else(|| db_error(format!("malformed statement: {s}")))?
        + start.len();
    let to = s[from..]
        .find(end)
        .ok_or_else(|| db_error(format!("malformed statement: {s}")))?;
    Ok(&s[from..from + to])
}

fn unquote(ident: &str) -> String {
    ident.trim_matches('"').to_string()
}

/// Loose equality for key comparison: integers compare by value across
/// widths, everything else compares exactly.
fn key_matches(stored: &Value, probe: &Value) -> bool {
    match (stored.as_i64(), probe.as_i64()) {
        (Some(a), Some(b)) => a == b,
        _ => stored == probe,
    }
}

impl MemoryConnection {
    fn guard(&self) -> Result<()> {
        if self.closed {
            Err(db_error("connection is closed"))
        } else {
            Ok(())
        }
    }

    fn create_table(store: &mut Store, sql: &str) -> Result<u64> {
        let name = between(sql, "CREATE TABLE ", " (")?.to_string();
        if store.tables.contains_key(&name) {
            return Err(db_error(format!("table {name} already exists")));
        }

        let open = sql.find(" (").expect("checked above") + 2;
        let defs = &sql[open..sql.len() - 1];
        let mut table = Table::default();
        table.next_id = 1;
        for def in defs.split(", ") {
            let column = unquote(def.split(' ').next().unwrap_or(""));
            if def.contains("GENERATED BY DEFAULT AS IDENTITY") {
                table.id_column = column.clone();
            }
            table.columns.push(column);
        }
        if table.id_column.is_empty() {
            return Err(db_error(format!("table {name} has no identity column")));
        }

        store.tables.insert(name, table);
        Ok(0)
    }

    fn update(store: &mut Store, sql: &str, params: &[Value]) -> Result<u64> {
        let name = between(sql, "UPDATE ", " SET ")?.to_string();
        let assignments: Vec<String> = between(sql, " SET ", " WHERE ")?
            .split(", ")
            .map(|clause| unquote(clause.split(" = ").next().unwrap_or("")))
            .collect();
        let key_column = unquote(between(sql, " WHERE ", " = ?")?);

        let table = store
            .tables
            .get_mut(&name)
            .ok_or_else(|| db_error(format!("no such table {name}")))?;
        let key = params
            .last()
            .ok_or_else(|| db_error("missing key parameter"))?;

        let mut affected = 0;
        for row in &mut table.rows {
            let matches = row.get(&key_column).is_some_and(|v| key_matches(v, key));
            if matches {
                for (column, value) in assignments.iter().zip(params) {
                    row.insert(column.clone(), value.clone());
                }
                affected += 1;
            }
        }
        Ok(affected)
    }

    fn delete(store: &mut Store, sql: &str, params: &[Value]) -> Result<u64> {
        let name = between(sql, "DELETE FROM ", " WHERE ")?.to_string();
        let key_column = unquote(between(sql, " WHERE ", " = ?")?);

        let table = store
            .tables
            .get_mut(&name)
            .ok_or_else(|| db_error(format!("no such table {name}")))?;
        let key = params
            .first()
            .ok_or_else(|| db_error("missing key parameter"))?;

        let before = table.rows.len();
        table
            .rows
            .retain(|row| !row.get(&key_column).is_some_and(|v| key_matches(v, key)));
        Ok((before - table.rows.len()) as u64)
    }
}

impl Connection for MemoryConnection {
    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<u64> {
        self.guard()?;
        let mut store = self.store.lock().unwrap();
        if sql.starts_with("CREATE TABLE ") {
            Self::create_table(&mut store, sql)
        } else if sql.starts_with("UPDATE ") {
            Self::update(&mut store, sql, params)
        } else if sql.starts_with("DELETE FROM ") {
            Self::delete(&mut store, sql, params)
        } else {
            Err(db_error(format!("unsupported statement: {sql}")))
        }
    }

    fn query(&mut self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
        self.guard()?;
        let store = self.store.lock().unwrap();

        let name = between(sql, "SELECT * FROM ", " WHERE ")?.to_string();
        let key_column = unquote(between(sql, " WHERE ", " = ?")?);
        let table = store
            .tables
            .get(&name)
            .ok_or_else(|| db_error(format!("no such table {name}")))?;
        let key = params
            .first()
            .ok_or_else(|| db_error("missing key parameter"))?;

        let mut columns = table.columns.clone();
        if store.reverse_select_columns {
            columns.reverse();
        }

        let rows = table
            .rows
            .iter()
            .filter(|row| row.get(&key_column).is_some_and(|v| key_matches(v, key)))
            .map(|row| {
                let values = columns
                    .iter()
                    .map(|c| row.get(c).cloned().unwrap_or(Value::Null))
                    .collect();
                Row::new(columns.clone(), values)
            })
            .collect();
        Ok(rows)
    }

    fn insert(&mut self, sql: &str, params: &[Value]) -> Result<Option<i64>> {
        self.guard()?;
        let mut store = self.store.lock().unwrap();

        let name = between(sql, "INSERT INTO ", " (")?.to_string();
        let columns: Vec<String> = between(sql, " (", ") VALUES")?
            .split(", ")
            .map(unquote)
            .collect();

        let table = store
            .tables
            .get_mut(&name)
            .ok_or_else(|| db_error(format!("no such table {name}")))?;
        if columns.len() != params.len() {
            return Err(db_error("parameter count mismatch"));
        }

        let id = table.next_id;
        table.next_id += 1;

        let mut row: HashMap<String, Value> = columns
            .into_iter()
            .zip(params.iter().cloned())
            .collect();
        row.insert(table.id_column.clone(), Value::BigInt(id));
        table.rows.push(row);
        Ok(Some(id))
    }

    fn set_autocommit(&mut self, enabled: bool) -> Result<()> {
        self.guard()?;
        let mut store = self.store.lock().unwrap();
        if enabled {
            store.snapshot = None;
        } else if store.snapshot.is_none() {
            store.snapshot = Some(store.tables.clone());
        }
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        self.guard()?;
        self.store.lock().unwrap().snapshot = None;
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        self.guard()?;
        let mut store = self.store.lock().unwrap();
        if let Some(snapshot) = store.snapshot.take() {
            store.tables = snapshot;
        }
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Entity fixtures
// ---------------------------------------------------------------------------

/// The canonical fixture: no explicit table name, so it maps to
/// `testentity`.
#[derive(Debug, Clone, PartialEq)]
pub struct TestEntity {
    pub id: Option<i64>,
    pub name: String,
    pub value: String,
}

impl Entity for TestEntity {
    const TYPE_NAME: &'static str = "TestEntity";

    fn config() -> EntityConfig {
        EntityConfig::persistable()
    }

    fn columns() -> &'static [ColumnDef] {
        static COLUMNS: &[ColumnDef] = &[
            ColumnDef::of::<Option<i64>>("id", "id").identity(true),
            ColumnDef::of::<String>("name", "name"),
            ColumnDef::of::<String>("value", "value"),
        ];
        COLUMNS
    }

    fn column_values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("id", self.id.into()),
            ("name", self.name.clone().into()),
            ("value", self.value.clone().into()),
        ]
    }

    fn load(row: &Row) -> Result<Self> {
        Ok(Self {
            id: row.get_named("id")?,
            name: row.get_named("name")?,
            value: row.get_named("value")?,
        })
    }

    fn id_value(&self) -> Value {
        self.id.into()
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }
}

/// Fixture covering every mapped column type, with an explicit table name.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: Option<i64>,
    pub owner: String,
    pub age: i32,
    pub active: bool,
}

impl Entity for Account {
    const TYPE_NAME: &'static str = "Account";
    const TABLE: Option<&'static str> = Some("accounts");

    fn config() -> EntityConfig {
        EntityConfig::persistable()
    }

    fn columns() -> &'static [ColumnDef] {
        static COLUMNS: &[ColumnDef] = &[
            ColumnDef::of::<Option<i64>>("id", "id").identity(true),
            ColumnDef::of::<String>("owner", "owner"),
            ColumnDef::of::<i32>("age", "age"),
            ColumnDef::of::<bool>("active", "active"),
        ];
        COLUMNS
    }

    fn column_values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("id", self.id.into()),
            ("owner", self.owner.clone().into()),
            ("age", self.age.into()),
            ("active", self.active.into()),
        ]
    }

    fn load(row: &Row) -> Result<Self> {
        Ok(Self {
            id: row.get_named("id")?,
            owner: row.get_named("owner")?,
            age: row.get_named("age")?,
            active: row.get_named("active")?,
        })
    }

    fn id_value(&self) -> Value {
        self.id.into()
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }
}
