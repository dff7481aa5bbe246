//! Read-only client portal projections.
//!
//! Scoped by the client's token to its areas and restricted to published
//! records; the `published` filter is enforced here, not left to the caller.

use crate::core::aggregate::duration_minutes;
use crate::core::services::Services;
use crate::core::settings::SettingsLogic;
use crate::errors::{AppError, AppResult};
use crate::models::area::Area;
use crate::models::client::Client;
use crate::models::collection::Collection;
use crate::models::entry::{Entry, local_day};
use crate::models::order::Order;
use crate::models::user::User;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortalEntry {
    pub user_name: String,
    pub area_name: String,
    pub start_ts: DateTime<Utc>,
    pub end_ts: DateTime<Utc>,
    pub duration_min: i64,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortalOrder {
    pub title: String,
    pub area_name: String,
    pub assigned_name: String,
    pub start_plan: Option<DateTime<Utc>>,
    pub status: String,
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortalFeed {
    pub client: String,
    pub entries: Vec<PortalEntry>,
    pub orders: Vec<PortalOrder>,
}

const UNKNOWN: &str = "—";

fn in_range(day: NaiveDate, from: Option<NaiveDate>, to: Option<NaiveDate>) -> bool {
    from.is_none_or(|f| day >= f) && to.is_none_or(|t| day <= t)
}

pub struct PortalLogic;

impl PortalLogic {
    /// Feed for `token`. An unknown token is `NotFound` on the clients
    /// collection (id 0).
    pub fn feed(
        svc: &Services,
        token: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> AppResult<PortalFeed> {
        let token = token.trim();
        let client = svc
            .store
            .list::<Client>()?
            .into_iter()
            .find(|c| !token.is_empty() && c.token == token)
            .ok_or_else(|| AppError::not_found(Collection::Clients, 0))?;

        let step = SettingsLogic::load(svc)?.rounding;

        let users: HashMap<i64, String> = svc
            .store
            .list::<User>()?
            .into_iter()
            .map(|u| (u.id, u.name))
            .collect();
        let areas: HashMap<i64, String> = svc
            .store
            .list::<Area>()?
            .into_iter()
            .map(|a| (a.id, a.name))
            .collect();
        let name = |map: &HashMap<i64, String>, id: i64| {
            map.get(&id).cloned().unwrap_or_else(|| UNKNOWN.to_string())
        };

        let mut entries: Vec<PortalEntry> = svc
            .store
            .list::<Entry>()?
            .into_iter()
            .filter(|e| e.published && client.area_ids.contains(&e.area_id))
            .filter(|e| in_range(e.day, from, to))
            .map(|e| PortalEntry {
                user_name: name(&users, e.user_id),
                area_name: name(&areas, e.area_id),
                start_ts: e.start,
                end_ts: e.end,
                duration_min: duration_minutes(e.duration_ms, step),
                note: e.note,
            })
            .collect();
        entries.sort_by_key(|e| e.start_ts);

        let ranged = from.is_some() || to.is_some();
        let mut orders: Vec<PortalOrder> = svc
            .store
            .list::<Order>()?
            .into_iter()
            .filter(|o| o.published && client.area_ids.contains(&o.area_id))
            .filter(|o| match o.start_plan {
                Some(sp) => in_range(local_day(sp), from, to),
                None => !ranged,
            })
            .map(|o| PortalOrder {
                area_name: name(&areas, o.area_id),
                assigned_name: name(&users, o.assigned_to),
                status: o.status.code().to_string(),
                title: o.title,
                start_plan: o.start_plan,
                address: o.address,
            })
            .collect();
        orders.sort_by_key(|o| o.start_plan);

        Ok(PortalFeed {
            client: client.name,
            entries,
            orders,
        })
    }
}
