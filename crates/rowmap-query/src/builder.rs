//! SQL statement builders.
//!
//! Each builder is a pure function of resolved [`EntityMeta`]: no I/O, no
//! state, one [`Query`] out. Builders are only reachable through a resolved
//! metadata value, so the marked-entity check has already happened by the
//! time any SQL is synthesized.
//!
//! Column identifiers are double-quote-delimited to preserve case and avoid
//! keyword collisions.

use rowmap_core::{EntityMeta, quote_ident};

use crate::statement::{Query, QueryKind};

/// Builder for CREATE TABLE statements.
///
/// The identity column gets the auto-generation clause; all other columns
/// are plain typed columns.
#[derive(Debug)]
pub struct CreateTableStatement<'a> {
    meta: &'a EntityMeta,
}

impl<'a> CreateTableStatement<'a> {
    pub fn new(meta: &'a EntityMeta) -> Self {
        Self { meta }
    }

    #[must_use]
    pub fn build(&self) -> Query {
        let definitions: Vec<String> = self
            .meta
            .columns()
            .iter()
            .map(|column| {
                let mut def = format!(
                    "{} {}",
                    quote_ident(column.name),
                    column.sql_type.sql_name()
                );
                if column.identity {
                    def.push_str(" GENERATED BY DEFAULT AS IDENTITY");
                }
                def
            })
            .collect();

        Query::new(
            QueryKind::CreateTable,
            format!(
                "CREATE TABLE {} ({})",
                self.meta.table_name(),
                definitions.join(", ")
            ),
        )
    }
}

/// Builder for INSERT statements.
///
/// One placeholder per non-identity column, in declaration order; the
/// identity column is omitted because the server generates it.
#[derive(Debug)]
pub struct InsertStatement<'a> {
    meta: &'a EntityMeta,
}

impl<'a> InsertStatement<'a> {
    pub fn new(meta: &'a EntityMeta) -> Self {
        Self { meta }
    }

    #[must_use]
    pub fn build(&self) -> Query {
        let columns: Vec<String> = self
            .meta
            .data_columns()
            .map(|column| quote_ident(column.name))
            .collect();
        let placeholders = vec!["?"; columns.len()];

        Query::new(
            QueryKind::Insert,
            format!(
                "INSERT INTO {} ({}) VALUES ({})",
                self.meta.table_name(),
                columns.join(", "),
                placeholders.join(", ")
            ),
        )
    }
}

/// Builder for SELECT-by-key statements.
#[derive(Debug)]
pub struct SelectStatement<'a> {
    meta: &'a EntityMeta,
}

impl<'a> SelectStatement<'a> {
    pub fn new(meta: &'a EntityMeta) -> Self {
        Self { meta }
    }

    #[must_use]
    pub fn build(&self) -> Query {
        Query::new(
            QueryKind::Select,
            format!(
                "SELECT * FROM {} WHERE {} = ?",
                self.meta.table_name(),
                quote_ident(self.meta.id_column().name)
            ),
        )
    }
}

/// Builder for UPDATE statements.
///
/// Non-identity columns in declaration order; the identity value is bound
/// last as the WHERE parameter.
#[derive(Debug)]
pub struct UpdateStatement<'a> {
    meta: &'a EntityMeta,
}

impl<'a> UpdateStatement<'a> {
    pub fn new(meta: &'a EntityMeta) -> Self {
        Self { meta }
    }

    #[must_use]
    pub fn build(&self) -> Query {
        let assignments: Vec<String> = self
            .meta
            .data_columns()
            .map(|column| format!("{} = ?", quote_ident(column.name)))
            .collect();

        Query::new(
            QueryKind::Update,
            format!(
                "UPDATE {} SET {} WHERE {} = ?",
                self.meta.table_name(),
                assignments.join(", "),
                quote_ident(self.meta.id_column().name)
            ),
        )
    }
}

/// Builder for DELETE-by-key statements.
#[derive(Debug)]
pub struct DeleteStatement<'a> {
    meta: &'a EntityMeta,
}

impl<'a> DeleteStatement<'a> {
    pub fn new(meta: &'a EntityMeta) -> Self {
        Self { meta }
    }

    #[must_use]
    pub fn build(&self) -> Query {
        Query::new(
            QueryKind::Delete,
            format!(
                "DELETE FROM {} WHERE {} = ?",
                self.meta.table_name(),
                quote_ident(self.meta.id_column().name)
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use rowmap_core::{ColumnDef, Entity, EntityConfig, EntityMeta, Result, Row, Value};

    use super::*;

    struct Hero {
        id: Option<i64>,
        name: String,
        age: i32,
        retired: bool,
    }

    impl Entity for Hero {
        const TYPE_NAME: &'static str = "Hero";
        const TABLE: Option<&'static str> = Some("heroes");

        fn config() -> EntityConfig {
            EntityConfig::persistable()
        }

        fn columns() -> &'static [ColumnDef] {
            static COLUMNS: &[ColumnDef] = &[
                ColumnDef::of::<Option<i64>>("id", "id").identity(true),
                ColumnDef::of::<String>("name", "name"),
                ColumnDef::of::<i32>("age", "age"),
                ColumnDef::of::<bool>("retired", "retired"),
            ];
            COLUMNS
        }

        fn column_values(&self) -> Vec<(&'static str, Value)> {
            vec![
                ("id", self.id.into()),
                ("name", self.name.clone().into()),
                ("age", self.age.into()),
                ("retired", self.retired.into()),
            ]
        }

        fn load(row: &Row) -> Result<Self> {
            Ok(Self {
                id: row.get_named("id")?,
                name: row.get_named("name")?,
                age: row.get_named("age")?,
                retired: row.get_named("retired")?,
            })
        }

        fn id_value(&self) -> Value {
            self.id.into()
        }

        fn set_id(&mut self, id: i64) {
            self.id = Some(id);
        }
    }

    fn meta() -> EntityMeta {
        EntityMeta::resolve::<Hero>().unwrap()
    }

    #[test]
    fn create_table_sql() {
        let meta = meta();
        let query = CreateTableStatement::new(&meta).build();
        assert_eq!(query.kind(), QueryKind::CreateTable);
        assert_eq!(
            query.sql(),
            "CREATE TABLE heroes (\"id\" BIGINT GENERATED BY DEFAULT AS IDENTITY, \
             \"name\" VARCHAR(255), \"age\" INT, \"retired\" BOOLEAN)"
        );
    }

    #[test]
    fn insert_sql_skips_identity() {
        let meta = meta();
        let query = InsertStatement::new(&meta).build();
        assert_eq!(query.kind(), QueryKind::Insert);
        assert_eq!(
            query.sql(),
            "INSERT INTO heroes (\"name\", \"age\", \"retired\") VALUES (?, ?, ?)"
        );
    }

    #[test]
    fn select_sql_filters_on_identity() {
        let meta = meta();
        let query = SelectStatement::new(&meta).build();
        assert_eq!(query.kind(), QueryKind::Select);
        assert_eq!(query.sql(), "SELECT * FROM heroes WHERE \"id\" = ?");
    }

    #[test]
    fn update_sql_binds_identity_last() {
        let meta = meta();
        let query = UpdateStatement::new(&meta).build();
        assert_eq!(query.kind(), QueryKind::Update);
        assert_eq!(
            query.sql(),
            "UPDATE heroes SET \"name\" = ?, \"age\" = ?, \"retired\" = ? WHERE \"id\" = ?"
        );
    }

    #[test]
    fn delete_sql_filters_on_identity() {
        let meta = meta();
        let query = DeleteStatement::new(&meta).build();
        assert_eq!(query.kind(), QueryKind::Delete);
        assert_eq!(query.sql(), "DELETE FROM heroes WHERE \"id\" = ?");
    }

    #[test]
    fn builders_are_pure() {
        let meta = meta();
        let first = InsertStatement::new(&meta).build();
        let second = InsertStatement::new(&meta).build();
        assert_eq!(first, second);
    }
}
