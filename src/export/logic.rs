use crate::core::entries::{EntryFilter, EntryLogic};
use crate::core::services::Services;
use crate::core::settings::SettingsLogic;
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::csv::{CsvNames, entries_csv};
use crate::export::fs_utils::ensure_writable;
use crate::export::json::snapshot_json;
use crate::export::range::parse_optional_range;
use crate::models::actor::Actor;
use crate::models::area::Area;
use crate::models::entry::Entry;
use crate::models::user::User;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// What the caller asked for.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub format: ExportFormat,
    pub file: String,
    /// `None`, `"all"` or a `--range` expression (CSV only).
    pub range: Option<String>,
    /// CSV only; ignored for field-workers.
    pub user_id: Option<i64>,
    pub force: bool,
}

pub struct ExportLogic;

impl ExportLogic {
    /// Entries for the CSV: filtered by day and user, oldest first.
    pub fn csv_entries(
        svc: &Services,
        actor: &Actor,
        range: Option<&str>,
        user_id: Option<i64>,
    ) -> AppResult<Vec<Entry>> {
        let bounds = parse_optional_range(range)?;
        let filter = EntryFilter {
            from: bounds.map(|(f, _)| f),
            to: bounds.map(|(_, t)| t),
            user_id,
        };
        let mut entries = EntryLogic::list(svc, actor, &filter)?;
        entries.sort_by(|a, b| a.start.cmp(&b.start).then(a.id.cmp(&b.id)));
        Ok(entries)
    }

    pub fn render_csv(
        svc: &Services,
        actor: &Actor,
        range: Option<&str>,
        user_id: Option<i64>,
    ) -> AppResult<Vec<u8>> {
        let entries = Self::csv_entries(svc, actor, range, user_id)?;
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

        entries_csv(
            &entries,
            &CsvNames {
                users: &users,
                areas: &areas,
            },
            step,
        )
    }

    /// Write the export to `req.file` and return the number of bytes.
    pub fn export(svc: &Services, actor: &Actor, req: &ExportRequest) -> AppResult<usize> {
        let path = Path::new(&req.file);
        ensure_writable(path, req.force)?;

        let bytes = match req.format {
            ExportFormat::Csv => {
                Self::render_csv(svc, actor, req.range.as_deref(), req.user_id)?
            }
            ExportFormat::Json => {
                let snap = snapshot_json(&svc.store, svc.now())?;
                serde_json::to_vec_pretty(&snap)?
            }
        };

        fs::write(path, &bytes)?;
        svc.audit(
            "export",
            &path.to_string_lossy(),
            &format!("{} export", req.format.as_str()),
        );
        Ok(bytes.len())
    }
}
