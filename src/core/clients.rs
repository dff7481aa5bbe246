use crate::core::services::{Services, require_manager};
use crate::errors::{AppError, AppResult};
use crate::models::actor::Actor;
use crate::models::area::Area;
use crate::models::client::Client;
use rand::Rng;
use rand::distr::Alphanumeric;

const TOKEN_LEN: usize = 16;

pub fn new_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect()
}

fn check_areas(svc: &Services, area_ids: &[i64]) -> AppResult<()> {
    for id in area_ids {
        svc.store.require::<Area>(*id)?;
    }
    Ok(())
}

pub struct ClientLogic;

impl ClientLogic {
    pub fn list(svc: &Services, actor: &Actor) -> AppResult<Vec<Client>> {
        require_manager(actor, "listing clients")?;
        svc.store.list()
    }

    pub fn create(svc: &Services, actor: &Actor, name: &str, area_ids: Vec<i64>) -> AppResult<Client> {
        require_manager(actor, "creating clients")?;
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("client name must not be empty".into()));
        }
        check_areas(svc, &area_ids)?;

        let mut client = Client {
            id: 0,
            name: name.to_string(),
            token: new_token(),
            area_ids,
        };
        svc.store.create(&mut client)?;

        svc.audit("client_add", &format!("client #{}", client.id), &client.name);
        Ok(client)
    }

    pub fn rename(svc: &Services, actor: &Actor, id: i64, name: &str) -> AppResult<Client> {
        require_manager(actor, "editing clients")?;
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("client name must not be empty".into()));
        }
        let mut client: Client = svc.store.require(id)?;
        client.name = name.to_string();
        svc.store.put(&client)?;

        svc.audit("client_edit", &format!("client #{id}"), &client.name);
        Ok(client)
    }

    /// Replace the area scope of the portal token.
    pub fn set_areas(svc: &Services, actor: &Actor, id: i64, area_ids: Vec<i64>) -> AppResult<Client> {
        require_manager(actor, "editing clients")?;
        check_areas(svc, &area_ids)?;

        let mut client: Client = svc.store.require(id)?;
        client.area_ids = area_ids;
        client.area_ids.sort_unstable();
        client.area_ids.dedup();
        svc.store.put(&client)?;

        svc.audit(
            "client_edit",
            &format!("client #{id}"),
            &format!("areas {:?}", client.area_ids),
        );
        Ok(client)
    }

    pub fn delete(svc: &Services, actor: &Actor, id: i64) -> AppResult<bool> {
        require_manager(actor, "deleting clients")?;
        let removed = svc.store.delete::<Client>(id)?;
        if removed {
            svc.audit("client_del", &format!("client #{id}"), "Client deleted");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_sixteen_alphanumerics() {
        let t = new_token();
        assert_eq!(t.len(), TOKEN_LEN);
        assert!(t.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(t, new_token());
    }
}
