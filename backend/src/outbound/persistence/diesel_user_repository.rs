//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::user::{PasswordHash, Role, User, UserId, Username};

use super::diesel_error_mapping;
use super::models::{NewUserRow, UserRow, UserUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    diesel_error_mapping::map_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    diesel_error_mapping::map_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

/// Map an insert failure, distinguishing a username uniqueness conflict.
fn map_insert_error(error: diesel::result::Error, username: &Username) -> UserPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    ) {
        return UserPersistenceError::duplicate_username(username.as_str());
    }
    map_diesel_error(error)
}

/// Convert a database row into a validated domain user.
fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let username = Username::new(&row.username)
        .map_err(|err| UserPersistenceError::query(format!("invalid stored username: {err}")))?;
    let role = row
        .role
        .parse::<Role>()
        .map_err(|err| UserPersistenceError::query(format!("invalid stored role: {err}")))?;

    Ok(User {
        id: UserId::from_uuid(row.id),
        username,
        password_hash: PasswordHash::new(row.password_hash),
        full_name: row.full_name,
        email: row.email,
        phone: row.phone,
        role,
        enabled: row.enabled,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn new_row(user: &User) -> NewUserRow<'_> {
    NewUserRow {
        id: *user.id.as_uuid(),
        username: user.username.as_str(),
        password_hash: user.password_hash.as_str(),
        full_name: &user.full_name,
        email: &user.email,
        phone: &user.phone,
        role: user.role.as_str(),
        enabled: user.enabled,
        created_at: user.created_at,
        updated_at: user.updated_at,
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(users::table)
            .values(&new_row(user))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_insert_error(err, &user.username))
    }

    async fn upsert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let update = UserUpdate {
            username: user.username.as_str(),
            password_hash: user.password_hash.as_str(),
            full_name: &user.full_name,
            email: &user.email,
            phone: &user.phone,
            role: user.role.as_str(),
            enabled: user.enabled,
            updated_at: user.updated_at,
        };

        diesel::insert_into(users::table)
            .values(&new_row(user))
            .on_conflict(users::id)
            .do_update()
            .set(&update)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_username(
        &self,
        name: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::username.eq(name.as_str()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping and row conversion edge cases.
    use chrono::Utc;
    use rstest::{fixture, rstest};
    use uuid::Uuid;

    use super::*;

    #[fixture]
    fn valid_row() -> UserRow {
        let now = Utc::now();
        UserRow {
            id: Uuid::new_v4(),
            username: "alice".to_owned(),
            password_hash: "salt$digest".to_owned(),
            full_name: "Alice Example".to_owned(),
            email: "alice@example.test".to_owned(),
            phone: "555-0100".to_owned(),
            role: "USER".to_owned(),
            enabled: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let err = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(err, UserPersistenceError::Connection { .. }));
        assert!(err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn diesel_not_found_maps_to_query_error() {
        let err = map_diesel_error(diesel::result::Error::NotFound);

        assert!(matches!(err, UserPersistenceError::Query { .. }));
        assert!(err.to_string().contains("record not found"));
    }

    #[rstest]
    fn unique_violation_maps_to_duplicate_username() {
        use diesel::result::{DatabaseErrorKind, Error as DieselError};

        let violation = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value".to_owned()),
        );
        let username = Username::new("alice").expect("valid username");

        let err = map_insert_error(violation, &username);
        assert!(matches!(
            err,
            UserPersistenceError::DuplicateUsername { ref username } if username == "alice"
        ));
    }

    #[rstest]
    fn row_conversion_accepts_valid_rows(valid_row: UserRow) {
        let user = row_to_user(valid_row).expect("valid row converts");
        assert_eq!(user.username.as_str(), "alice");
        assert_eq!(user.role, Role::User);
    }

    #[rstest]
    #[case("MODERATOR")]
    #[case("")]
    fn row_conversion_rejects_unknown_roles(mut valid_row: UserRow, #[case] role: &str) {
        valid_row.role = role.to_owned();

        let err = row_to_user(valid_row).expect_err("unknown role should fail");
        assert!(matches!(err, UserPersistenceError::Query { .. }));
        assert!(err.to_string().contains("invalid stored role"));
    }

    #[rstest]
    fn row_conversion_rejects_blank_usernames(mut valid_row: UserRow) {
        valid_row.username = "   ".to_owned();

        let err = row_to_user(valid_row).expect_err("blank username should fail");
        assert!(err.to_string().contains("invalid stored username"));
    }
}
