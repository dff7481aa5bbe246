use crate::cli::parser::{Commands, OrderCmd, OrderPlanArgs};
use crate::core::orders::{OrderDraft, OrderEdit, OrderFilter, OrderLogic};
use crate::core::services::Services;
use crate::errors::{AppError, AppResult};
use crate::models::area::Area;
use crate::models::order::Order;
use crate::models::user::User;
use crate::ui::messages::{location_notice, success, warning};
use crate::utils::colors::{colorize_flag, colorize_optional, colorize_status};
use crate::utils::date::{parse_opt_date, parse_opt_datetime};
use crate::utils::formatting::{fmt_duration, fmt_opt_ts};
use crate::utils::table::Table;
use std::collections::HashMap;

fn to_edit(plan: &OrderPlanArgs) -> AppResult<OrderEdit> {
    Ok(OrderEdit {
        title: plan.title.clone(),
        area_id: plan.area,
        assigned_to: plan.assigned_to,
        start_plan: parse_opt_datetime(plan.start_plan.as_deref())?,
        end_plan: parse_opt_datetime(plan.end_plan.as_deref())?,
        instructions: plan.instructions.clone(),
        address: plan.address.clone(),
        lat: plan.site_lat,
        lon: plan.site_lon,
    })
}

fn to_draft(plan: &OrderPlanArgs) -> AppResult<OrderDraft> {
    let missing = |f: &str| AppError::Validation(format!("--{f} is required for a new order"));
    let edit = to_edit(plan)?;
    Ok(OrderDraft {
        title: edit.title.ok_or_else(|| missing("title"))?,
        area_id: edit.area_id.ok_or_else(|| missing("area"))?,
        assigned_to: edit.assigned_to.ok_or_else(|| missing("assign"))?,
        start_plan: edit.start_plan,
        end_plan: edit.end_plan,
        instructions: edit.instructions,
        address: edit.address,
        lat: edit.lat,
        lon: edit.lon,
    })
}

fn print_order(svc: &Services, order: &Order) -> AppResult<()> {
    let area = svc.store.get::<Area>(order.area_id)?;
    let user = svc.store.get::<User>(order.assigned_to)?;

    println!("📋 Order #{} {}", order.id, order.title);
    println!("   Status     : {}", colorize_status(order.status));
    println!(
        "   Area       : {}",
        area.map(|a| a.name).unwrap_or_else(|| "—".into())
    );
    println!(
        "   Assigned   : {}",
        user.map(|u| u.name).unwrap_or_else(|| "—".into())
    );
    println!(
        "   Planned    : {} → {}",
        fmt_opt_ts(order.start_plan),
        fmt_opt_ts(order.end_plan)
    );
    println!(
        "   Real       : {} → {}",
        fmt_opt_ts(order.start_real),
        fmt_opt_ts(order.end_real)
    );
    println!(
        "   Address    : {}",
        colorize_optional(order.address.as_deref().unwrap_or(""))
    );
    if let Some(link) = order.maps_link() {
        println!("   Map        : {link}");
    }
    if let Some(text) = &order.instructions {
        println!("   Instructions: {text}");
    }
    println!(
        "   Photos     : {}   Signature: {}",
        order.photos.len(),
        order
            .signature
            .map(|f| format!("file #{f}"))
            .unwrap_or_else(|| "—".into())
    );
    println!(
        "   {}  {}",
        colorize_flag("approved", order.approved),
        colorize_flag("published", order.published)
    );
    Ok(())
}

pub fn handle(cmd: &Commands, svc: &Services) -> AppResult<()> {
    let Commands::Order { action } = cmd else {
        return Ok(());
    };
    let actor = svc.current_actor()?;

    match action {
        OrderCmd::List { mine, from, to } => {
            let filter = OrderFilter {
                mine: *mine,
                from: parse_opt_date(from.as_deref())?,
                to: parse_opt_date(to.as_deref())?,
            };
            let areas: HashMap<i64, String> = svc
                .store
                .list::<Area>()?
                .into_iter()
                .map(|a| (a.id, a.name))
                .collect();

            let mut table = Table::new(["ID", "Planned", "Title", "Area", "Assigned", "Status"]);
            for o in OrderLogic::list(svc, &actor, &filter)? {
                table.add_row(vec![
                    o.id.to_string(),
                    fmt_opt_ts(o.start_plan),
                    o.title.clone(),
                    areas.get(&o.area_id).cloned().unwrap_or_else(|| "—".into()),
                    format!("#{}", o.assigned_to),
                    o.status.code().to_string(),
                ]);
            }
            print!("{}", table.render());
        }
        OrderCmd::Show { id } => {
            let order: Order = svc.store.require(*id)?;
            if !actor.is_manager() && order.assigned_to != actor.id {
                return Err(AppError::Forbidden(format!(
                    "order #{id} is assigned to someone else"
                )));
            }
            print_order(svc, &order)?;
        }
        OrderCmd::Add { plan } => {
            let order = OrderLogic::create(svc, &actor, to_draft(plan)?)?;
            success(format!("Order '{}' created with id {}", order.title, order.id));
        }
        OrderCmd::Edit { id, plan } => {
            let order = OrderLogic::edit(svc, &actor, *id, to_edit(plan)?)?;
            success(format!("Order #{} updated", order.id));
        }
        OrderCmd::Del { id } => {
            if OrderLogic::delete(svc, &actor, *id)? {
                success(format!("Order #{id} deleted"));
            } else {
                warning(format!("Order #{id} does not exist"));
            }
        }
        OrderCmd::Start { id } => {
            let started = OrderLogic::start(svc, &actor, *id)?;
            location_notice(started.location.as_ref());
            success(format!(
                "Order #{} started at {}",
                started.order.id,
                fmt_opt_ts(started.order.start_real)
            ));
        }
        OrderCmd::Stop { id } => {
            let finished = OrderLogic::stop(svc, &actor, *id)?;
            location_notice(finished.location.as_ref());
            let (order, entry) = finished.into_entry()?;
            success(format!(
                "Order #{} finished, entry #{} recorded: {}",
                order.id,
                entry.id,
                fmt_duration(entry.duration_ms)
            ));
        }
        OrderCmd::Record { id } => {
            let entry = OrderLogic::record_entry(svc, &actor, *id)?;
            success(format!(
                "Entry #{} recorded for order #{id}: {}",
                entry.id,
                fmt_duration(entry.duration_ms)
            ));
        }
        OrderCmd::Sign { id, file } => {
            let order = OrderLogic::sign(svc, &actor, *id, *file)?;
            success(format!("Order #{} signed and confirmed", order.id));
        }
        OrderCmd::Photo { id, file } => {
            let order = OrderLogic::attach_photo(svc, &actor, *id, *file)?;
            success(format!(
                "Photo attached to order #{} ({} total)",
                order.id,
                order.photos.len()
            ));
        }
    }
    Ok(())
}
