//! Order lifecycle: planned → started → finished → confirmed.
//!
//! Plan fields stay editable by managers at every status. `stop` is the only
//! path by which an order produces a billable entry.

use crate::core::services::{Services, require_manager};
use crate::errors::{AppError, AppResult};
use crate::models::actor::Actor;
use crate::models::area::Area;
use crate::models::entry::{Entry, local_day};
use crate::models::file::StoredFile;
use crate::models::order::{Order, OrderStatus};
use crate::models::user::User;
use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, warn};

/// Plan fields of a new order.
#[derive(Debug, Clone, Default)]
pub struct OrderDraft {
    pub title: String,
    pub area_id: i64,
    pub assigned_to: i64,
    pub start_plan: Option<DateTime<Utc>>,
    pub end_plan: Option<DateTime<Utc>>,
    pub instructions: Option<String>,
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// Typed edit of plan fields; `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct OrderEdit {
    pub title: Option<String>,
    pub area_id: Option<i64>,
    pub assigned_to: Option<i64>,
    pub start_plan: Option<DateTime<Utc>>,
    pub end_plan: Option<DateTime<Utc>>,
    pub instructions: Option<String>,
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    /// Only orders assigned to the acting user.
    pub mine: bool,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Order start outcome; the transition happened even when `location` is set.
#[derive(Debug)]
pub struct OrderStarted {
    pub order: Order,
    pub location: Option<AppError>,
}

/// Composite result of `stop`: the order write always happened, the entry
/// write may not have.
#[derive(Debug)]
pub struct OrderFinished {
    pub order: Order,
    pub entry: Option<Entry>,
    pub entry_error: Option<AppError>,
    pub location: Option<AppError>,
}

impl OrderFinished {
    pub fn is_complete(&self) -> bool {
        self.entry.is_some()
    }

    /// Collapse a partial outcome into `PartialFailure`.
    pub fn into_entry(self) -> AppResult<(Order, Entry)> {
        match (self.entry, self.entry_error) {
            (Some(entry), _) => Ok((self.order, entry)),
            (None, err) => Err(AppError::PartialFailure(format!(
                "order #{} is finished but its entry was not recorded: {}",
                self.order.id,
                err.map(|e| e.to_string())
                    .unwrap_or_else(|| "unknown error".into())
            ))),
        }
    }
}

fn check_plan(svc: &Services, order: &Order) -> AppResult<()> {
    if order.title.trim().is_empty() {
        return Err(AppError::Validation("order title must not be empty".into()));
    }
    svc.store.require::<Area>(order.area_id)?;
    svc.store.require::<User>(order.assigned_to)?;

    if let (Some(s), Some(e)) = (order.start_plan, order.end_plan)
        && e < s
    {
        return Err(AppError::Validation(
            "planned end must not be before planned start".into(),
        ));
    }
    if order.lat.is_some_and(|lat| !(-90.0..=90.0).contains(&lat))
        || order.lon.is_some_and(|lon| !(-180.0..=180.0).contains(&lon))
    {
        return Err(AppError::Validation("coordinates out of range".into()));
    }
    Ok(())
}

/// Field-workers may only act on their own orders.
fn require_executor(actor: &Actor, order: &Order) -> AppResult<()> {
    if actor.is_manager() || order.assigned_to == actor.id {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "order #{} is assigned to someone else",
            order.id
        )))
    }
}

/// Entry mirroring the real execution window of a finished order.
fn entry_for(order: &Order, created_at: DateTime<Utc>) -> AppResult<Entry> {
    let (start, end) = match (order.start_real, order.end_real) {
        (Some(s), Some(e)) => (s, e),
        _ => {
            return Err(AppError::Validation(format!(
                "order #{} has no complete execution window",
                order.id
            )));
        }
    };
    Ok(
        Entry::new(order.assigned_to, order.area_id, start, end, order.entry_note(), created_at)?
            .with_geo(order.geo_start, order.geo_end),
    )
}

pub struct OrderLogic;

impl OrderLogic {
    pub fn create(svc: &Services, actor: &Actor, draft: OrderDraft) -> AppResult<Order> {
        require_manager(actor, "creating orders")?;

        let mut order = Order {
            id: 0,
            title: draft.title.trim().to_string(),
            area_id: draft.area_id,
            assigned_to: draft.assigned_to,
            start_plan: draft.start_plan,
            end_plan: draft.end_plan,
            instructions: draft.instructions,
            address: draft.address,
            lat: draft.lat,
            lon: draft.lon,
            photos: Vec::new(),
            signature: None,
            status: OrderStatus::Planned,
            start_real: None,
            end_real: None,
            geo_start: None,
            geo_end: None,
            approved: false,
            published: false,
        };
        check_plan(svc, &order)?;
        svc.store.create(&mut order)?;

        svc.audit("order_add", &format!("order #{}", order.id), &order.title);
        Ok(order)
    }

    pub fn edit(svc: &Services, actor: &Actor, id: i64, edit: OrderEdit) -> AppResult<Order> {
        require_manager(actor, "editing orders")?;
        let mut order: Order = svc.store.require(id)?;

        if let Some(v) = edit.title {
            order.title = v.trim().to_string();
        }
        if let Some(v) = edit.area_id {
            order.area_id = v;
        }
        if let Some(v) = edit.assigned_to {
            order.assigned_to = v;
        }
        if edit.start_plan.is_some() {
            order.start_plan = edit.start_plan;
        }
        if edit.end_plan.is_some() {
            order.end_plan = edit.end_plan;
        }
        if edit.instructions.is_some() {
            order.instructions = edit.instructions;
        }
        if edit.address.is_some() {
            order.address = edit.address;
        }
        if edit.lat.is_some() {
            order.lat = edit.lat;
        }
        if edit.lon.is_some() {
            order.lon = edit.lon;
        }

        check_plan(svc, &order)?;
        svc.store.put(&order)?;

        svc.audit("order_edit", &format!("order #{}", order.id), &order.title);
        Ok(order)
    }

    pub fn delete(svc: &Services, actor: &Actor, id: i64) -> AppResult<bool> {
        require_manager(actor, "deleting orders")?;
        let removed = svc.store.delete::<Order>(id)?;
        if removed {
            svc.audit("order_del", &format!("order #{id}"), "Order deleted");
        }
        Ok(removed)
    }

    /// Record the real start. Repeating it overwrites `start_real`/`geo_start`
    /// and never moves the status backwards.
    pub fn start(svc: &Services, actor: &Actor, id: i64) -> AppResult<OrderStarted> {
        let mut order: Order = svc.store.require(id)?;
        require_executor(actor, &order)?;

        let (geo, location) = svc.capture_location();
        order.start_real = Some(svc.now());
        order.geo_start = geo;
        if order.status == OrderStatus::Planned {
            order.status = OrderStatus::Started;
        }
        svc.store.put(&order)?;

        debug!(order = order.id, "order started");
        svc.audit("order_start", &format!("order #{}", order.id), &order.title);
        Ok(OrderStarted { order, location })
    }

    /// Finish the order and record its entry.
    ///
    /// Not idempotent: every call on a started order writes another entry.
    pub fn stop(svc: &Services, actor: &Actor, id: i64) -> AppResult<OrderFinished> {
        let mut order: Order = svc.store.require(id)?;
        require_executor(actor, &order)?;

        if order.start_real.is_none() {
            return Err(AppError::Validation(format!(
                "order #{} has not been started",
                order.id
            )));
        }

        let (geo, location) = svc.capture_location();
        let now = svc.now();
        order.end_real = Some(now);
        order.geo_end = geo;
        if order.status != OrderStatus::Confirmed {
            order.status = OrderStatus::Finished;
        }
        svc.store.put(&order)?;
        svc.audit("order_stop", &format!("order #{}", order.id), &order.title);

        let written = entry_for(&order, now).and_then(|mut entry| {
            svc.store.create(&mut entry)?;
            Ok(entry)
        });

        let (entry, entry_error) = match written {
            Ok(entry) => {
                svc.audit(
                    "entry_add",
                    &format!("entry #{}", entry.id),
                    &format!("From order #{}", order.id),
                );
                (Some(entry), None)
            }
            Err(e) => {
                warn!(order = order.id, error = %e, "order finished without entry");
                (None, Some(e))
            }
        };

        Ok(OrderFinished {
            order,
            entry,
            entry_error,
            location,
        })
    }

    /// Write the entry of a finished order again (reconciles a partial stop).
    pub fn record_entry(svc: &Services, actor: &Actor, id: i64) -> AppResult<Entry> {
        require_manager(actor, "recording order entries")?;
        let order: Order = svc.store.require(id)?;

        if !matches!(order.status, OrderStatus::Finished | OrderStatus::Confirmed) {
            return Err(AppError::Validation(format!(
                "order #{} is not finished",
                order.id
            )));
        }

        let mut entry = entry_for(&order, svc.now())?;
        svc.store.create(&mut entry)?;
        svc.audit(
            "entry_add",
            &format!("entry #{}", entry.id),
            &format!("Reconciled from order #{}", order.id),
        );
        Ok(entry)
    }

    /// Attach the customer's signature; confirms the order from any status.
    pub fn sign(svc: &Services, actor: &Actor, id: i64, signature_file: i64) -> AppResult<Order> {
        let mut order: Order = svc.store.require(id)?;
        require_executor(actor, &order)?;
        svc.store.require::<StoredFile>(signature_file)?;

        order.signature = Some(signature_file);
        order.status = OrderStatus::Confirmed;
        svc.store.put(&order)?;

        svc.audit(
            "order_sign",
            &format!("order #{}", order.id),
            &format!("Signature file #{signature_file}"),
        );
        Ok(order)
    }

    pub fn attach_photo(svc: &Services, actor: &Actor, id: i64, file_id: i64) -> AppResult<Order> {
        let mut order: Order = svc.store.require(id)?;
        require_executor(actor, &order)?;
        svc.store.require::<StoredFile>(file_id)?;

        order.photos.push(file_id);
        svc.store.put(&order)?;

        svc.audit(
            "order_photo",
            &format!("order #{}", order.id),
            &format!("Photo file #{file_id}"),
        );
        Ok(order)
    }

    /// Orders sorted by planned start; unplanned orders first and always
    /// inside any date window.
    pub fn list(svc: &Services, actor: &Actor, filter: &OrderFilter) -> AppResult<Vec<Order>> {
        let mut orders: Vec<Order> = svc
            .store
            .list::<Order>()?
            .into_iter()
            .filter(|o| !filter.mine || o.assigned_to == actor.id)
            .filter(|o| match o.start_plan {
                None => true,
                Some(sp) => {
                    let day = local_day(sp);
                    filter.from.is_none_or(|f| day >= f) && filter.to.is_none_or(|t| day <= t)
                }
            })
            .collect();

        orders.sort_by_key(|o| (o.start_plan, o.id));
        Ok(orders)
    }
}
