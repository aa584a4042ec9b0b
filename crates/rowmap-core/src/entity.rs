//! Entity declaration trait and metadata resolution.
//!
//! A record type becomes persistable by implementing [`Entity`]: a static,
//! compile-time table of [`ColumnDef`]s plus accessors for the identity
//! field. There is no runtime introspection anywhere — the resolver only
//! reads what the type declares.

use crate::error::{Error, MappingErrorKind, Result};
use crate::row::Row;
use crate::types::{SqlType, TypeInfo};
use crate::value::Value;

/// Entity-level configuration.
///
/// Carries the persistable marker: a type whose config is not persistable
/// fails metadata resolution, the static analogue of a type missing its
/// entity annotation.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityConfig {
    /// Whether this type maps to a database table.
    pub persistable: bool,
}

impl EntityConfig {
    /// Create a config with all defaults (not persistable).
    #[must_use]
    pub const fn new() -> Self {
        Self { persistable: false }
    }

    /// Create a config for a persistable entity.
    #[must_use]
    pub const fn persistable() -> Self {
        Self { persistable: true }
    }
}

/// Static metadata about one entity column.
#[derive(Debug, Clone)]
pub struct ColumnDef {
    /// Database column name
    pub name: &'static str,
    /// Rust field name
    pub field: &'static str,
    /// Declared SQL type
    pub sql_type: SqlType,
    /// Whether this column is the identity (primary key) column,
    /// populated by the database on insert
    pub identity: bool,
}

impl ColumnDef {
    /// Create a new column definition.
    #[must_use]
    pub const fn new(name: &'static str, field: &'static str, sql_type: SqlType) -> Self {
        Self {
            name,
            field,
            sql_type,
            identity: false,
        }
    }

    /// Create a column definition deriving the SQL type from the field's
    /// Rust type via [`TypeInfo`].
    #[must_use]
    pub const fn of<T: TypeInfo>(name: &'static str, field: &'static str) -> Self {
        Self::new(name, field, T::SQL_TYPE)
    }

    /// Mark this column as the identity column.
    #[must_use]
    pub const fn identity(mut self, value: bool) -> Self {
        self.identity = value;
        self
    }
}

/// Trait for record types mapped to exactly one table.
///
/// Implementations declare their column table once, in field declaration
/// order — the order is significant: it fixes positional binding order for
/// inserts and updates.
///
/// # Example
///
/// ```
/// use rowmap_core::{ColumnDef, Entity, EntityConfig, Result, Row, Value};
///
/// struct Hero {
///     id: Option<i64>,
///     name: String,
/// }
///
/// impl Entity for Hero {
///     const TYPE_NAME: &'static str = "Hero";
///     const TABLE: Option<&'static str> = Some("heroes");
///
///     fn config() -> EntityConfig {
///         EntityConfig::persistable()
///     }
///
///     fn columns() -> &'static [ColumnDef] {
///         static COLUMNS: &[ColumnDef] = &[
///             ColumnDef::of::<Option<i64>>("id", "id").identity(true),
///             ColumnDef::of::<String>("name", "name"),
///         ];
///         COLUMNS
///     }
///
///     fn column_values(&self) -> Vec<(&'static str, Value)> {
///         vec![("id", self.id.into()), ("name", self.name.clone().into())]
///     }
///
///     fn load(row: &Row) -> Result<Self> {
///         Ok(Self {
///             id: row.get_named("id")?,
///             name: row.get_named("name")?,
///         })
///     }
///
///     fn id_value(&self) -> Value {
///         self.id.into()
///     }
///
///     fn set_id(&mut self, id: i64) {
///         self.id = Some(id);
///     }
/// }
/// ```
pub trait Entity: Sized + Send {
    /// The record type's own name, used for the lower-cased table-name
    /// default.
    const TYPE_NAME: &'static str;

    /// Explicit table name, if declared.
    const TABLE: Option<&'static str> = None;

    /// Get the entity configuration.
    fn config() -> EntityConfig;

    /// Get the declared column table, in field declaration order.
    fn columns() -> &'static [ColumnDef];

    /// Extract the current column values in declaration order, identity
    /// included.
    fn column_values(&self) -> Vec<(&'static str, Value)>;

    /// Construct an instance from a result row by column-name lookup.
    fn load(row: &Row) -> Result<Self>;

    /// Get the current identity value.
    fn id_value(&self) -> Value;

    /// Write a server-generated identity back into the instance.
    fn set_id(&mut self, id: i64);
}

/// Resolved metadata for one entity type.
///
/// Built fresh per operation from the static declarations; holds the
/// effective table name, the ordered column list, and the identity column.
#[derive(Debug, Clone)]
pub struct EntityMeta {
    entity: &'static str,
    table_name: String,
    columns: &'static [ColumnDef],
    id_column: &'static ColumnDef,
}

impl EntityMeta {
    /// Resolve metadata for `E`.
    ///
    /// Fails with a mapping error when the type is not marked persistable,
    /// when a declared column type has no SQL mapping, or when the identity
    /// column count is anything but one.
    pub fn resolve<E: Entity>() -> Result<Self> {
        if !E::config().persistable {
            return Err(Error::mapping(
                MappingErrorKind::NotAnEntity,
                E::TYPE_NAME,
                "the type is not marked as a persistable entity",
            ));
        }

        let columns = E::columns();
        for column in columns {
            if !column.sql_type.is_mapped() {
                return Err(Error::mapping(
                    MappingErrorKind::UnsupportedType,
                    E::TYPE_NAME,
                    format!(
                        "column '{}' has unsupported type {}",
                        column.name,
                        column.sql_type.sql_name()
                    ),
                ));
            }
        }

        let mut identities = columns.iter().filter(|c| c.identity);
        let id_column = identities.next().ok_or_else(|| {
            Error::mapping(
                MappingErrorKind::NoIdentityColumn,
                E::TYPE_NAME,
                "no column is marked as the identity column",
            )
        })?;
        if identities.next().is_some() {
            return Err(Error::mapping(
                MappingErrorKind::MultipleIdentityColumns,
                E::TYPE_NAME,
                "more than one column is marked as the identity column",
            ));
        }

        let table_name = E::TABLE.map_or_else(|| E::TYPE_NAME.to_lowercase(), |t| t.to_string());

        Ok(Self {
            entity: E::TYPE_NAME,
            table_name,
            columns,
            id_column,
        })
    }

    /// The entity type name, for error and log context.
    #[must_use]
    pub const fn entity_name(&self) -> &'static str {
        self.entity
    }

    /// The effective table name.
    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// All declared columns, in declaration order.
    #[must_use]
    pub const fn columns(&self) -> &'static [ColumnDef] {
        self.columns
    }

    /// The identity column.
    #[must_use]
    pub const fn id_column(&self) -> &'static ColumnDef {
        self.id_column
    }

    /// The non-identity columns, in declaration order.
    pub fn data_columns(&self) -> impl Iterator<Item = &'static ColumnDef> {
        self.columns.iter().filter(|c| !c.identity)
    }

    /// Extract the insert parameters: non-identity values in declaration
    /// order. The identity is excluded because the server generates it.
    pub fn insert_values<E: Entity>(&self, entity: &E) -> Vec<Value> {
        entity
            .column_values()
            .into_iter()
            .filter(|(name, _)| *name != self.id_column.name)
            .map(|(_, value)| value)
            .collect()
    }

    /// Extract the update parameters: non-identity values in declaration
    /// order, with the identity value bound last for the WHERE clause.
    pub fn update_values<E: Entity>(&self, entity: &E) -> Vec<Value> {
        let mut values = self.insert_values(entity);
        values.push(entity.id_value());
        values
    }
}
