//! Approval/publish overlay shared by entries and orders.
//!
//! The two flags are plain field sets: any combination is valid at any time
//! and neither one touches the record's own lifecycle.

use crate::core::services::{Services, require_manager};
use crate::errors::{AppError, AppResult};
use crate::models::actor::Actor;
use crate::models::entry::Entry;
use crate::models::order::Order;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewKind {
    Entry,
    Order,
}

impl ReviewKind {
    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "entry" | "e" => Some(ReviewKind::Entry),
            "order" | "o" => Some(ReviewKind::Order),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ReviewKind::Entry => "entry",
            ReviewKind::Order => "order",
        }
    }
}

/// `None` leaves the flag as it is.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReviewFlags {
    pub approved: Option<bool>,
    pub published: Option<bool>,
}

/// One row of the approvals view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewItem {
    pub kind: ReviewKind,
    pub id: i64,
    pub label: String,
    pub when: Option<DateTime<Utc>>,
    pub approved: bool,
    pub published: bool,
}

impl From<&Entry> for ReviewItem {
    fn from(e: &Entry) -> Self {
        Self {
            kind: ReviewKind::Entry,
            id: e.id,
            label: e.note.clone(),
            when: Some(e.start),
            approved: e.approved,
            published: e.published,
        }
    }
}

impl From<&Order> for ReviewItem {
    fn from(o: &Order) -> Self {
        Self {
            kind: ReviewKind::Order,
            id: o.id,
            label: o.title.clone(),
            when: o.start_plan.or(o.start_real),
            approved: o.approved,
            published: o.published,
        }
    }
}

pub struct ReviewLogic;

impl ReviewLogic {
    pub fn set_review(
        svc: &Services,
        actor: &Actor,
        kind: ReviewKind,
        id: i64,
        flags: ReviewFlags,
    ) -> AppResult<ReviewItem> {
        require_manager(actor, "reviewing records")?;

        if flags.approved.is_none() && flags.published.is_none() {
            return Err(AppError::Validation(
                "nothing to change: pass approved and/or published".into(),
            ));
        }

        let item = match kind {
            ReviewKind::Entry => {
                let mut e: Entry = svc.store.require(id)?;
                if let Some(a) = flags.approved {
                    e.approved = a;
                }
                if let Some(p) = flags.published {
                    e.published = p;
                }
                svc.store.put(&e)?;
                ReviewItem::from(&e)
            }
            ReviewKind::Order => {
                let mut o: Order = svc.store.require(id)?;
                if let Some(a) = flags.approved {
                    o.approved = a;
                }
                if let Some(p) = flags.published {
                    o.published = p;
                }
                svc.store.put(&o)?;
                ReviewItem::from(&o)
            }
        };

        svc.audit(
            "review",
            &format!("{} #{}", kind.code(), id),
            &format!("approved={} published={}", item.approved, item.published),
        );
        Ok(item)
    }

    /// Entries and orders together, newest first.
    pub fn list(svc: &Services, actor: &Actor) -> AppResult<Vec<ReviewItem>> {
        require_manager(actor, "viewing approvals")?;

        let mut items: Vec<ReviewItem> = svc
            .store
            .list::<Entry>()?
            .iter()
            .map(ReviewItem::from)
            .chain(svc.store.list::<Order>()?.iter().map(ReviewItem::from))
            .collect();

        items.sort_by(|a, b| b.when.cmp(&a.when).then(b.id.cmp(&a.id)));
        Ok(items)
    }
}
