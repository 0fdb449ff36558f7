//! In-memory repository doubles and fixtures shared by unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use crate::domain::auth::Registration;
use crate::domain::claim::{Amount, Claim, ClaimDraft, ClaimId, ClaimStatus};
use crate::domain::ports::{
    ClaimPersistenceError, ClaimRepository, UserPersistenceError, UserRepository,
};
use crate::domain::user::{PasswordHash, Role, User, UserId, Username};

/// Build a username fixture, panicking on invalid input.
pub(crate) fn username(raw: &str) -> Username {
    Username::new(raw).expect("valid test username")
}

/// Build an amount fixture, panicking on invalid input.
pub(crate) fn amount(cents: i64) -> Amount {
    Amount::from_cents(cents).expect("non-negative test amount")
}

/// Build an enabled account fixture with the given role.
pub(crate) fn account(name: &str, role: Role) -> User {
    let now = Utc::now();
    User {
        id: UserId::generate(),
        username: username(name),
        password_hash: PasswordHash::new("salt$digest"),
        full_name: format!("{name} Test"),
        email: format!("{name}@example.test"),
        phone: "555-0100".to_owned(),
        role,
        enabled: true,
        created_at: now,
        updated_at: now,
    }
}

/// Build a claim draft fixture.
pub(crate) fn draft(disaster_type: &str, location: &str, cents: i64) -> ClaimDraft {
    let incident_date = NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date");
    ClaimDraft::new(disaster_type, incident_date, location, "", amount(cents))
        .expect("valid test draft")
}

/// Build a registration fixture.
pub(crate) fn registration(name: &str) -> Registration {
    Registration::try_from_parts(name, "pw", &format!("{name} Test"), "r@example.test", "555")
        .expect("valid test registration")
}

/// In-memory [`UserRepository`] with optional injected failures.
#[derive(Default)]
pub(crate) struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
    failure: Mutex<Option<UserPersistenceError>>,
}

impl InMemoryUserRepository {
    pub(crate) fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
            failure: Mutex::new(None),
        }
    }

    pub(crate) fn set_failure(&self, failure: UserPersistenceError) {
        *self.failure.lock().expect("failure lock") = Some(failure);
    }

    pub(crate) fn stored(&self) -> Vec<User> {
        self.users.lock().expect("users lock").clone()
    }

    fn check_failure(&self) -> Result<(), UserPersistenceError> {
        self.failure
            .lock()
            .expect("failure lock")
            .clone()
            .map_or(Ok(()), Err)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        self.check_failure()?;
        let mut users = self.users.lock().expect("users lock");
        if users.iter().any(|u| u.username == user.username) {
            return Err(UserPersistenceError::duplicate_username(
                user.username.as_str(),
            ));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn upsert(&self, user: &User) -> Result<(), UserPersistenceError> {
        self.check_failure()?;
        let mut users = self.users.lock().expect("users lock");
        match users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => *existing = user.clone(),
            None => users.push(user.clone()),
        }
        Ok(())
    }

    async fn find_by_username(
        &self,
        name: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        self.check_failure()?;
        let users = self.users.lock().expect("users lock");
        Ok(users.iter().find(|u| &u.username == name).cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        self.check_failure()?;
        let users = self.users.lock().expect("users lock");
        Ok(users.iter().find(|u| &u.id == id).cloned())
    }
}

/// In-memory [`ClaimRepository`] with optional injected failures.
#[derive(Default)]
pub(crate) struct InMemoryClaimRepository {
    claims: Mutex<Vec<Claim>>,
    failure: Mutex<Option<ClaimPersistenceError>>,
}

impl InMemoryClaimRepository {
    pub(crate) fn with_claims(claims: Vec<Claim>) -> Self {
        Self {
            claims: Mutex::new(claims),
            failure: Mutex::new(None),
        }
    }

    pub(crate) fn set_failure(&self, failure: ClaimPersistenceError) {
        *self.failure.lock().expect("failure lock") = Some(failure);
    }

    pub(crate) fn stored(&self) -> Vec<Claim> {
        self.claims.lock().expect("claims lock").clone()
    }

    fn check_failure(&self) -> Result<(), ClaimPersistenceError> {
        self.failure
            .lock()
            .expect("failure lock")
            .clone()
            .map_or(Ok(()), Err)
    }
}

#[async_trait]
impl ClaimRepository for InMemoryClaimRepository {
    async fn insert(&self, claim: &Claim) -> Result<(), ClaimPersistenceError> {
        self.check_failure()?;
        self.claims.lock().expect("claims lock").push(claim.clone());
        Ok(())
    }

    async fn save(&self, claim: &Claim) -> Result<(), ClaimPersistenceError> {
        self.check_failure()?;
        let mut claims = self.claims.lock().expect("claims lock");
        match claims.iter_mut().find(|c| c.id == claim.id) {
            Some(existing) => {
                *existing = claim.clone();
                Ok(())
            }
            None => Err(ClaimPersistenceError::query("claim missing on save")),
        }
    }

    async fn delete(&self, id: &ClaimId) -> Result<bool, ClaimPersistenceError> {
        self.check_failure()?;
        let mut claims = self.claims.lock().expect("claims lock");
        let before = claims.len();
        claims.retain(|c| &c.id != id);
        Ok(claims.len() < before)
    }

    async fn find_by_id(&self, id: &ClaimId) -> Result<Option<Claim>, ClaimPersistenceError> {
        self.check_failure()?;
        let claims = self.claims.lock().expect("claims lock");
        Ok(claims.iter().find(|c| &c.id == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Claim>, ClaimPersistenceError> {
        self.check_failure()?;
        Ok(self.claims.lock().expect("claims lock").clone())
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Claim>, ClaimPersistenceError> {
        self.check_failure()?;
        let claims = self.claims.lock().expect("claims lock");
        let mut owned: Vec<Claim> = claims
            .iter()
            .filter(|c| &c.owner_id == owner)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn list_by_status(
        &self,
        status: ClaimStatus,
    ) -> Result<Vec<Claim>, ClaimPersistenceError> {
        self.check_failure()?;
        let claims = self.claims.lock().expect("claims lock");
        Ok(claims.iter().filter(|c| c.status == status).cloned().collect())
    }

    async fn count_all(&self) -> Result<u64, ClaimPersistenceError> {
        self.check_failure()?;
        Ok(self.claims.lock().expect("claims lock").len() as u64)
    }

    async fn count_by_status(&self, status: ClaimStatus) -> Result<u64, ClaimPersistenceError> {
        self.check_failure()?;
        let claims = self.claims.lock().expect("claims lock");
        Ok(claims.iter().filter(|c| c.status == status).count() as u64)
    }
}
