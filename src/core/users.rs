use crate::core::auth::{check_pin, hash_pin, new_salt};
use crate::core::services::{Services, require_executive, require_manager};
use crate::errors::{AppError, AppResult};
use crate::models::actor::Actor;
use crate::models::order::Order;
use crate::models::user::{Role, User};

/// User administration. Everything but `list` is executive-only.
pub struct UserLogic;

impl UserLogic {
    pub fn list(svc: &Services, actor: &Actor) -> AppResult<Vec<User>> {
        require_manager(actor, "listing users")?;
        svc.store.list()
    }

    pub fn create(
        svc: &Services,
        actor: &Actor,
        name: &str,
        role: Role,
        pin: &str,
    ) -> AppResult<User> {
        require_executive(actor, "creating users")?;
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("user name must not be empty".into()));
        }
        check_pin(pin)?;

        let salt = new_salt();
        let mut user = User {
            id: 0,
            name: name.to_string(),
            role,
            password_hash: hash_pin(&salt, pin),
            salt,
            created_at: svc.now(),
        };
        svc.store.create(&mut user)?;

        svc.audit(
            "user_add",
            &format!("user #{}", user.id),
            &format!("{} ({})", user.name, role.code()),
        );
        Ok(user)
    }

    pub fn set_role(svc: &Services, actor: &Actor, id: i64, role: Role) -> AppResult<User> {
        require_executive(actor, "changing roles")?;
        let mut user: User = svc.store.require(id)?;
        user.role = role;
        svc.store.put(&user)?;

        svc.audit("user_edit", &format!("user #{id}"), &format!("role {}", role.code()));
        Ok(user)
    }

    /// Keeps an existing salt, generates one for users without.
    pub fn set_pin(svc: &Services, actor: &Actor, id: i64, pin: &str) -> AppResult<()> {
        require_executive(actor, "setting PINs")?;
        check_pin(pin)?;

        let mut user: User = svc.store.require(id)?;
        if user.salt.is_empty() {
            user.salt = new_salt();
        }
        user.password_hash = hash_pin(&user.salt, pin);
        svc.store.put(&user)?;

        svc.audit("user_edit", &format!("user #{id}"), "PIN changed");
        Ok(())
    }

    /// Executives can not be deleted, nor can users with assigned orders.
    pub fn delete(svc: &Services, actor: &Actor, id: i64) -> AppResult<bool> {
        require_executive(actor, "deleting users")?;
        let Some(user) = svc.store.get::<User>(id)? else {
            return Ok(false);
        };
        if user.role == Role::Executive {
            return Err(AppError::Forbidden(format!(
                "user #{id} is an executive and can not be deleted"
            )));
        }

        let assigned = svc
            .store
            .list::<Order>()?
            .iter()
            .filter(|o| o.assigned_to == id)
            .count();
        if assigned > 0 {
            return Err(AppError::ReferentialIntegrity(format!(
                "user #{id} is assigned to {assigned} orders"
            )));
        }

        let removed = svc.store.delete::<User>(id)?;
        svc.audit("user_del", &format!("user #{id}"), &user.name);
        Ok(removed)
    }
}
