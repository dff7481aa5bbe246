//! PIN check and session login/logout. The UI side of authentication lives
//! elsewhere; this only verifies credentials and records the actor.

use crate::core::areas::AreaLogic;
use crate::core::services::Services;
use crate::errors::{AppError, AppResult};
use crate::models::actor::Actor;
use crate::models::collection::Collection;
use crate::models::user::{Role, User};
use rand::RngCore;
use sha2::{Digest, Sha256};
use tracing::debug;

pub const ADMIN_NAME: &str = "Admin";
pub const PIN_MIN: usize = 4;
pub const PIN_MAX: usize = 8;
const SALT_BYTES: usize = 12;

/// Hex of 12 random bytes.
pub fn new_salt() -> String {
    let mut buf = [0u8; SALT_BYTES];
    rand::rng().fill_bytes(&mut buf);
    hex::encode(buf)
}

/// `sha256(salt + pin)`, lowercase hex.
pub fn hash_pin(salt: &str, pin: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(pin.as_bytes());
    hex::encode(hasher.finalize())
}

pub fn check_pin(pin: &str) -> AppResult<()> {
    let len = pin.chars().count();
    if !(PIN_MIN..=PIN_MAX).contains(&len) {
        return Err(AppError::Validation(format!(
            "PIN must have {PIN_MIN} to {PIN_MAX} characters"
        )));
    }
    Ok(())
}

pub struct AuthLogic;

impl AuthLogic {
    /// Create the distinguished executive on an empty store.
    pub fn bootstrap_admin(svc: &Services, pin: &str) -> AppResult<User> {
        check_pin(pin)?;
        if svc.store.count(Collection::Users)? > 0 {
            return Err(AppError::Validation(
                "users already exist; log in instead".into(),
            ));
        }

        let salt = new_salt();
        let mut admin = User {
            id: 0,
            name: ADMIN_NAME.to_string(),
            role: Role::Executive,
            password_hash: hash_pin(&salt, pin),
            salt,
            created_at: svc.now(),
        };
        svc.store.create(&mut admin)?;
        AreaLogic::ensure_default(svc)?;

        svc.audit("init", &format!("user #{}", admin.id), "Admin created");
        Ok(admin)
    }

    /// Verify the PIN and store the actor in the session.
    pub fn login(svc: &Services, user_id: i64, pin: &str) -> AppResult<Actor> {
        let user: User = svc.store.require(user_id)?;
        if hash_pin(&user.salt, pin) != user.password_hash {
            return Err(AppError::Auth("wrong PIN".into()));
        }

        let actor = Actor::from(&user);
        svc.sessions.save_actor(&actor)?;
        AreaLogic::ensure_default(svc)?;

        debug!(user = actor.id, "logged in");
        svc.audit("login", &format!("user #{}", actor.id), &actor.name);
        Ok(actor)
    }

    /// Clears the actor; running timers stay in the snapshot.
    pub fn logout(svc: &Services) -> AppResult<Option<Actor>> {
        let actor = svc.sessions.load_actor()?;
        svc.sessions.clear_actor()?;
        if let Some(a) = &actor {
            svc.audit("logout", &format!("user #{}", a.id), &a.name);
        }
        Ok(actor)
    }
}
