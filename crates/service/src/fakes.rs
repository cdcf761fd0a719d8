//! In-memory stores and providers for service tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use freshboard_core::constants::{
    COL_BARCODE, COL_ID, COL_IDEAL_TEMP, COL_MEASURED_TEMP, COL_POSITION, COL_PROVINCE,
    COL_QR_CODE, COL_SCANNED_AT,
};
use freshboard_core::{ChatMessage, ColumnSet, Reading, ReadingTable, TableName, User};
use freshboard_llm::{CompletionProvider, LlmError};
use freshboard_storage::{ReadingStore, StorageError, UserStore};
use tokio::sync::Notify;

pub(crate) fn user_with_password(username: &str, password: &str, company: &str) -> User {
    User {
        username: username.to_owned(),
        password_hash: bcrypt::hash(password, 4).unwrap(),
        company_name: company.to_owned(),
    }
}

pub(crate) struct FakeUsers(HashMap<String, User>);

impl FakeUsers {
    pub(crate) fn new(users: Vec<User>) -> Self {
        Self(users.into_iter().map(|u| (u.username.clone(), u)).collect())
    }
}

#[async_trait]
impl UserStore for FakeUsers {
    async fn find_user(&self, username: &str) -> Result<Option<User>, StorageError> {
        Ok(self.0.get(username).cloned())
    }
}

/// Tables by name; unknown names behave like a missing relation.
#[derive(Default)]
pub(crate) struct FakeReadings {
    tables: HashMap<String, ReadingTable>,
    broken: bool,
}

impl FakeReadings {
    pub(crate) fn with_table(mut self, name: &str, table: ReadingTable) -> Self {
        self.tables.insert(name.to_owned(), table);
        self
    }

    /// Every load fails with a non-table error.
    pub(crate) fn broken() -> Self {
        Self { tables: HashMap::new(), broken: true }
    }
}

#[async_trait]
impl ReadingStore for FakeReadings {
    async fn load_readings(&self, table: &TableName) -> Result<ReadingTable, StorageError> {
        if self.broken {
            return Err(StorageError::Timeout(Duration::from_secs(15)));
        }
        self.tables
            .get(table.as_str())
            .cloned()
            .ok_or_else(|| StorageError::TableMissing(table.as_str().to_owned()))
    }
}

pub(crate) fn all_columns() -> ColumnSet {
    ColumnSet::new([
        COL_ID,
        COL_QR_CODE,
        COL_BARCODE,
        COL_PROVINCE,
        COL_IDEAL_TEMP,
        COL_MEASURED_TEMP,
        COL_POSITION,
        COL_SCANNED_AT,
    ])
}

pub(crate) fn reading(
    id: i64,
    qr: &str,
    measured: f64,
    ideal: f64,
    pos: &str,
    scanned_at: &str,
) -> Reading {
    Reading {
        id: Some(id),
        qr_code: Some(qr.to_owned()),
        barcode: Some(format!("800{id}")),
        province: Some("MI".to_owned()),
        ideal_temp: Some(ideal),
        measured_temp: Some(measured),
        position: Some(pos.to_owned()),
        scanned_at: Some(scanned_at.to_owned()),
    }
}

/// Four readings over three days, two QR codes, one malformed position.
pub(crate) fn acme_table() -> ReadingTable {
    ReadingTable {
        columns: all_columns(),
        rows: vec![
            reading(1, "QR-A", 5.0, 5.5, "45.46, 9.19", "01/03/2025 08:00"),
            reading(2, "QR-B", 10.0, 4.0, "41.90,12.49", "02/03/2025 09:30"),
            reading(3, "QR-A", 6.0, 4.0, "45.07,7.68", "03/03/2025 10:15"),
            reading(4, "QR-B", 4.0, 4.0, "not a position", "03/03/2025 11:00"),
        ],
    }
}

/// Records every conversation it receives and answers with a fixed text.
pub(crate) struct FakeProvider {
    answer: Result<String, u16>,
    pub(crate) seen: Mutex<Vec<Vec<ChatMessage>>>,
}

impl FakeProvider {
    pub(crate) fn answering(answer: &str) -> Self {
        Self { answer: Ok(answer.to_owned()), seen: Mutex::new(Vec::new()) }
    }

    pub(crate) fn failing(status: u16) -> Self {
        Self { answer: Err(status), seen: Mutex::new(Vec::new()) }
    }
}

#[async_trait]
impl CompletionProvider for FakeProvider {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        self.seen.lock().unwrap().push(messages.to_vec());
        match &self.answer {
            Ok(answer) => Ok(answer.clone()),
            Err(code) => {
                Err(LlmError::HttpStatus { code: *code, body: "upstream failure".to_owned() })
            },
        }
    }
}

/// Answers only after the test releases it.
#[derive(Default)]
pub(crate) struct GatedProvider {
    pub(crate) entered: Notify,
    pub(crate) release: Notify,
}

#[async_trait]
impl CompletionProvider for GatedProvider {
    async fn complete(&self, _messages: &[ChatMessage]) -> Result<String, LlmError> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok("released".to_owned())
    }
}
