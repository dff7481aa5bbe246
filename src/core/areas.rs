use crate::core::services::{Services, require_manager};
use crate::errors::{AppError, AppResult};
use crate::models::actor::Actor;
use crate::models::area::{Area, DEFAULT_AREA_COLOR, DEFAULT_AREA_NAME};
use crate::models::collection::Collection;
use crate::models::entry::Entry;

fn check_color(color: &str) -> AppResult<()> {
    let hex = color.strip_prefix('#').unwrap_or("");
    if matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "'{color}' is not a hex colour like #14b8a6"
        )))
    }
}

pub struct AreaLogic;

impl AreaLogic {
    /// Create "Allgemein" when there is no area at all.
    pub fn ensure_default(svc: &Services) -> AppResult<Option<Area>> {
        if svc.store.count(Collection::Areas)? > 0 {
            return Ok(None);
        }
        let mut area = Area {
            id: 0,
            name: DEFAULT_AREA_NAME.to_string(),
            color: DEFAULT_AREA_COLOR.to_string(),
            created_at: svc.now(),
        };
        svc.store.create(&mut area)?;
        Ok(Some(area))
    }

    pub fn list(svc: &Services) -> AppResult<Vec<Area>> {
        svc.store.list()
    }

    /// Entries per area id, for the area listing.
    pub fn entry_counts(svc: &Services) -> AppResult<Vec<(Area, usize)>> {
        let entries: Vec<Entry> = svc.store.list()?;
        Ok(Self::list(svc)?
            .into_iter()
            .map(|a| {
                let n = entries.iter().filter(|e| e.area_id == a.id).count();
                (a, n)
            })
            .collect())
    }

    pub fn create(svc: &Services, actor: &Actor, name: &str, color: &str) -> AppResult<Area> {
        require_manager(actor, "creating areas")?;
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("area name must not be empty".into()));
        }
        check_color(color)?;

        let mut area = Area {
            id: 0,
            name: name.to_string(),
            color: color.to_string(),
            created_at: svc.now(),
        };
        svc.store.create(&mut area)?;

        svc.audit("area_add", &format!("area #{}", area.id), &area.name);
        Ok(area)
    }

    pub fn edit(
        svc: &Services,
        actor: &Actor,
        id: i64,
        name: Option<&str>,
        color: Option<&str>,
    ) -> AppResult<Area> {
        require_manager(actor, "editing areas")?;
        let mut area: Area = svc.store.require(id)?;

        if let Some(n) = name {
            let n = n.trim();
            if n.is_empty() {
                return Err(AppError::Validation("area name must not be empty".into()));
            }
            area.name = n.to_string();
        }
        if let Some(c) = color {
            check_color(c)?;
            area.color = c.to_string();
        }
        svc.store.put(&area)?;

        svc.audit("area_edit", &format!("area #{id}"), &area.name);
        Ok(area)
    }

    /// Refused while any entry still points at the area.
    pub fn delete(svc: &Services, actor: &Actor, id: i64) -> AppResult<bool> {
        require_manager(actor, "deleting areas")?;

        let referencing = svc
            .store
            .list::<Entry>()?
            .iter()
            .filter(|e| e.area_id == id)
            .count();
        if referencing > 0 {
            return Err(AppError::ReferentialIntegrity(format!(
                "area #{id} is used by {referencing} entries"
            )));
        }

        let removed = svc.store.delete::<Area>(id)?;
        if removed {
            svc.audit("area_del", &format!("area #{id}"), "Area deleted");
        }
        Ok(removed)
    }
}
