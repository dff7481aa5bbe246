use crate::core::services::{Services, require_manager};
use crate::errors::{AppError, AppResult};
use crate::models::actor::Actor;
use crate::models::area::Area;
use crate::models::task::{Task, TaskStatus};
use crate::models::user::User;

#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub title: String,
    pub desc: Option<String>,
    pub area_id: Option<i64>,
    pub assigned_to: Option<i64>,
}

pub struct TaskLogic;

impl TaskLogic {
    pub fn create(svc: &Services, actor: &Actor, draft: TaskDraft) -> AppResult<Task> {
        require_manager(actor, "creating tasks")?;

        let title = draft.title.trim();
        if title.is_empty() {
            return Err(AppError::Validation("task title must not be empty".into()));
        }
        if let Some(a) = draft.area_id {
            svc.store.require::<Area>(a)?;
        }
        if let Some(u) = draft.assigned_to {
            svc.store.require::<User>(u)?;
        }

        let mut task = Task {
            id: 0,
            title: title.to_string(),
            desc: draft.desc.filter(|d| !d.trim().is_empty()),
            area_id: draft.area_id,
            assigned_to: draft.assigned_to,
            status: TaskStatus::Open,
            created_at: svc.now(),
        };
        svc.store.create(&mut task)?;

        svc.audit("task_add", &format!("task #{}", task.id), &task.title);
        Ok(task)
    }

    /// Managers see every task, field-workers the unassigned ones and their own.
    pub fn list(svc: &Services, actor: &Actor) -> AppResult<Vec<Task>> {
        let mut tasks: Vec<Task> = svc
            .store
            .list::<Task>()?
            .into_iter()
            .filter(|t| actor.is_manager() || t.visible_to(actor.id))
            .collect();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(tasks)
    }

    pub fn mark_done(svc: &Services, actor: &Actor, id: i64) -> AppResult<Task> {
        let mut task: Task = svc.store.require(id)?;
        if !actor.is_manager() && !task.visible_to(actor.id) {
            return Err(AppError::Forbidden(format!(
                "task #{id} is assigned to someone else"
            )));
        }

        task.status = TaskStatus::Done;
        svc.store.put(&task)?;

        svc.audit("task_done", &format!("task #{id}"), &task.title);
        Ok(task)
    }

    pub fn delete(svc: &Services, actor: &Actor, id: i64) -> AppResult<bool> {
        require_manager(actor, "deleting tasks")?;
        let removed = svc.store.delete::<Task>(id)?;
        if removed {
            svc.audit("task_del", &format!("task #{id}"), "Task deleted");
        }
        Ok(removed)
    }
}
