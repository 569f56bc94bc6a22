//! The SQLite implementation of the category store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};

use crate::{
    Error,
    database_id::CategoryId,
    models::{Category, CategoryName, NewCategory, UserId},
    stores::CategoryStore,
};

/// Stores categories in a SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteCategoryStore {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteCategoryStore {
    /// Create a store backed by `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl CategoryStore for SqliteCategoryStore {
    fn create(&self, new_category: NewCategory) -> Result<Category, Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLockError)?;

        let category = connection
            .prepare(
                "INSERT INTO category (user_id, name, color, icon)
                 VALUES (?1, ?2, ?3, ?4)
                 RETURNING id, user_id, name, color, icon",
            )?
            .query_row(
                (
                    new_category.user_id.as_i64(),
                    new_category.name.as_ref(),
                    &new_category.color,
                    &new_category.icon,
                ),
                map_category_row,
            )?;

        Ok(category)
    }

    fn get_by_user(&self, user_id: UserId) -> Result<Vec<Category>, Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLockError)?;

        let categories = connection
            .prepare(
                "SELECT id, user_id, name, color, icon FROM category
                 WHERE user_id = ?1
                 ORDER BY name",
            )?
            .query_map([user_id.as_i64()], map_category_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(categories)
    }

    fn count_by_user(&self, user_id: UserId) -> Result<u32, Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLockError)?;

        connection
            .query_row(
                "SELECT COUNT(id) FROM category WHERE user_id = ?1",
                [user_id.as_i64()],
                |row| row.get(0),
            )
            .map_err(|error| error.into())
    }

    fn update(&self, category: Category) -> Result<Category, Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLockError)?;

        let category = connection
            .prepare(
                "UPDATE category SET name = ?3, color = ?4, icon = ?5
                 WHERE id = ?1 AND user_id = ?2
                 RETURNING id, user_id, name, color, icon",
            )?
            .query_row(
                (
                    category.id,
                    category.user_id.as_i64(),
                    category.name.as_ref(),
                    &category.color,
                    &category.icon,
                ),
                map_category_row,
            )?;

        Ok(category)
    }

    fn delete(&self, id: CategoryId, user_id: UserId) -> Result<(), Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLockError)?;

        let rows_affected = connection.execute(
            "DELETE FROM category WHERE id = ?1 AND user_id = ?2",
            (id, user_id.as_i64()),
        )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}

/// Map a database row to a [Category].
fn map_category_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let name: String = row.get(2)?;

    Ok(Category {
        id: row.get(0)?,
        user_id: UserId::new(row.get(1)?),
        name: CategoryName::new_unchecked(&name),
        color: row.get(3)?,
        icon: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::{
        Error,
        db::initialize,
        models::{CategoryName, NewCategory, PasswordHash, Transaction, UserId},
        stores::{
            CategoryStore, ProfileStore, TransactionStore,
            sqlite::{SqliteProfileStore, SqliteTransactionStore},
        },
    };

    use super::SqliteCategoryStore;

    fn get_test_stores() -> (SqliteCategoryStore, SqliteTransactionStore, UserId) {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let connection = Arc::new(Mutex::new(connection));

        let profile = SqliteProfileStore::new(connection.clone())
            .create(
                "test@test.com",
                "Test",
                PasswordHash::new_unchecked("notarealhash"),
            )
            .unwrap();

        (
            SqliteCategoryStore::new(connection.clone()),
            SqliteTransactionStore::new(connection),
            profile.id,
        )
    }

    fn new_category(user_id: UserId, name: &str, color: &str) -> NewCategory {
        NewCategory {
            user_id,
            name: CategoryName::new_unchecked(name),
            color: color.to_owned(),
            icon: None,
        }
    }

    #[test]
    fn create_and_list_by_name() {
        let (store, _, user_id) = get_test_stores();
        store
            .create(new_category(user_id, "Transporte", "#00C49F"))
            .unwrap();
        store
            .create(new_category(user_id, "Alimentação", "#FF8042"))
            .unwrap();

        let categories = store.get_by_user(user_id).unwrap();

        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].name.as_ref(), "Alimentação");
        assert_eq!(categories[1].name.as_ref(), "Transporte");
    }

    #[test]
    fn count_by_user_only_counts_own_rows() {
        let (store, _, user_id) = get_test_stores();
        store
            .create(new_category(user_id, "Lazer", "#FFBB28"))
            .unwrap();

        assert_eq!(store.count_by_user(user_id).unwrap(), 1);
        assert_eq!(store.count_by_user(UserId::new(999)).unwrap(), 0);
    }

    #[test]
    fn delete_clears_transaction_references_without_deleting_them() {
        let (store, transaction_store, user_id) = get_test_stores();
        let category = store
            .create(new_category(user_id, "Mercado", "#FF8042"))
            .unwrap();
        let transaction = transaction_store
            .create(
                Transaction::build(user_id, -50.0, time::macros::date!(2024 - 03 - 15), "Feira")
                    .category_id(Some(category.id)),
            )
            .unwrap();

        store.delete(category.id, user_id).expect("Could not delete");

        let orphaned = transaction_store.get(transaction.id, user_id).unwrap();
        assert_eq!(orphaned.category_id, None);
    }

    #[test]
    fn delete_missing_category_fails() {
        let (store, _, user_id) = get_test_stores();

        assert_eq!(store.delete(42, user_id), Err(Error::NotFound));
    }
}
