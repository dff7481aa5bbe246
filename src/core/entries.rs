use crate::core::services::{Services, require_executive};
use crate::errors::{AppError, AppResult};
use crate::models::actor::Actor;
use crate::models::area::Area;
use crate::models::entry::Entry;
use crate::models::user::User;
use chrono::{DateTime, NaiveDate, Utc};

#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    /// Ignored for field-workers, who only ever see their own entries.
    pub user_id: Option<i64>,
}

/// Typed edit; `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct EntryEdit {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub note: Option<String>,
    pub user_id: Option<i64>,
    pub area_id: Option<i64>,
}

impl EntryEdit {
    pub fn is_empty(&self) -> bool {
        self.start.is_none()
            && self.end.is_none()
            && self.note.is_none()
            && self.user_id.is_none()
            && self.area_id.is_none()
    }
}

pub struct EntryLogic;

impl EntryLogic {
    /// Newest first.
    pub fn list(svc: &Services, actor: &Actor, filter: &EntryFilter) -> AppResult<Vec<Entry>> {
        let user = if actor.is_manager() {
            filter.user_id
        } else {
            Some(actor.id)
        };

        let mut entries: Vec<Entry> = svc
            .store
            .list::<Entry>()?
            .into_iter()
            .filter(|e| user.is_none_or(|u| e.user_id == u))
            .filter(|e| filter.from.is_none_or(|f| e.day >= f))
            .filter(|e| filter.to.is_none_or(|t| e.day <= t))
            .collect();

        entries.sort_by(|a, b| b.start.cmp(&a.start).then(b.id.cmp(&a.id)));
        Ok(entries)
    }

    /// Validate everything first, then write once.
    pub fn edit(svc: &Services, actor: &Actor, id: i64, edit: EntryEdit) -> AppResult<Entry> {
        require_executive(actor, "editing entries")?;
        if edit.is_empty() {
            return Err(AppError::Validation("nothing to change".into()));
        }

        let mut entry: Entry = svc.store.require(id)?;

        if let Some(uid) = edit.user_id {
            svc.store.require::<User>(uid)?;
            entry.user_id = uid;
        }
        if let Some(aid) = edit.area_id {
            svc.store.require::<Area>(aid)?;
            entry.area_id = aid;
        }
        if let Some(note) = edit.note {
            entry.note = note.trim().to_string();
        }

        let start = edit.start.unwrap_or(entry.start);
        let end = edit.end.unwrap_or(entry.end);
        entry.set_interval(start, end)?;

        svc.store.put(&entry)?;
        svc.audit(
            "entry_edit",
            &format!("entry #{}", entry.id),
            &format!("{} ms on {}", entry.duration_ms, entry.day),
        );
        Ok(entry)
    }

    pub fn delete(svc: &Services, actor: &Actor, id: i64) -> AppResult<bool> {
        require_executive(actor, "deleting entries")?;
        let removed = svc.store.delete::<Entry>(id)?;
        if removed {
            svc.audit("entry_del", &format!("entry #{id}"), "Entry deleted");
        }
        Ok(removed)
    }
}
