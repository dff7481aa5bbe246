use crate::core::services::Services;
use crate::errors::{AppError, AppResult};
use crate::models::file::StoredFile;
use regex::Regex;
use std::sync::LazyLock;

/// `data:<mime>[;param...][;base64],<payload>`
static DATA_URL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^data:[\w.+-]+/[\w.+-]+(;[\w.+-]+=[\w.+-]+)*(;base64)?,").ok());

pub fn is_data_url(s: &str) -> bool {
    DATA_URL.as_ref().is_some_and(|re| re.is_match(s))
}

pub struct FileLogic;

impl FileLogic {
    /// Store an opaque payload (photo or signature) and return its record.
    pub fn save(svc: &Services, data_url: &str) -> AppResult<StoredFile> {
        let data_url = data_url.trim();
        if !is_data_url(data_url) {
            return Err(AppError::Validation(
                "expected a data URL (data:<mime>;base64,...)".into(),
            ));
        }

        let mut file = StoredFile {
            id: 0,
            data_url: data_url.to_string(),
            created_at: svc.now(),
        };
        svc.store.create(&mut file)?;
        Ok(file)
    }

    pub fn get(svc: &Services, id: i64) -> AppResult<Option<StoredFile>> {
        svc.store.get(id)
    }
}
