use crate::db;
use crate::record::{StudentDocument, StudentRecord};
use rusqlite::Connection;
use std::path::Path;
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub type Snapshot = Vec<StudentRecord>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no workspace is open")]
    Closed,
    #[error("store write failed: {0}")]
    Write(String),
    #[error("store read failed: {0}")]
    Read(String),
    #[error("document encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

pub trait DocumentStore {
    fn create(&mut self, doc: &StudentDocument) -> Result<String, StoreError>;
    /// Deletes by id. Deleting an id that does not exist succeeds.
    fn delete(&mut self, id: &str) -> Result<(), StoreError>;
    fn subscribe(&mut self) -> Result<Subscription, StoreError>;
    fn unsubscribe(&mut self, subscription_id: u64);
}

#[derive(Debug)]
pub struct Subscription {
    id: u64,
    rx: Receiver<Snapshot>,
}

#[derive(Debug, Default)]
pub struct Drained {
    pub latest: Option<Snapshot>,
    pub disconnected: bool,
}

impl Subscription {
    pub fn new(id: u64, rx: Receiver<Snapshot>) -> Self {
        Subscription { id, rx }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn drain(&self) -> Drained {
        let mut out = Drained::default();
        loop {
            match self.rx.try_recv() {
                Ok(snapshot) => out.latest = Some(snapshot),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    out.disconnected = true;
                    break;
                }
            }
        }
        out
    }
}

#[derive(Debug, Default)]
pub struct Subscribers {
    senders: Vec<(u64, Sender<Snapshot>)>,
    next_id: u64,
}

impl Subscribers {
    pub fn add(&mut self, initial: Snapshot) -> Subscription {
        self.next_id += 1;
        let (tx, rx) = channel();
        // The receiver is alive here, so the first send cannot fail.
        let _ = tx.send(initial);
        self.senders.push((self.next_id, tx));
        Subscription::new(self.next_id, rx)
    }

    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.senders.len();
        self.senders.retain(|(sid, _)| *sid != id);
        self.senders.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }

    pub fn len(&self) -> usize {
        self.senders.len()
    }

    pub fn publish(&mut self, snapshot: &Snapshot) {
        self.senders.retain(|(id, tx)| {
            let alive = tx.send(snapshot.clone()).is_ok();
            if !alive {
                debug!(subscription = id, "pruning dropped subscriber");
            }
            alive
        });
    }
}

pub struct SqliteStore {
    conn: Connection,
    subscribers: Subscribers,
}

impl SqliteStore {
    pub fn open(workspace: &Path) -> anyhow::Result<Self> {
        let conn = db::open_db(workspace)?;
        Ok(SqliteStore {
            conn,
            subscribers: Subscribers::default(),
        })
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn snapshot(&self) -> Result<Snapshot, StoreError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, doc
                 FROM students
                 ORDER BY registration_number, rowid",
            )
            .map_err(|e| StoreError::Read(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| {
                let id: String = row.get(0)?;
                let doc: String = row.get(1)?;
                Ok((id, doc))
            })
            .and_then(|it| it.collect::<Result<Vec<_>, _>>())
            .map_err(|e| StoreError::Read(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(id, raw)| {
                let doc = serde_json::from_str::<StudentDocument>(&raw).unwrap_or_else(|e| {
                    warn!(record = %id, error = %e, "stored document does not decode; showing it empty");
                    StudentDocument::default()
                });
                StudentRecord { id, doc }
            })
            .collect())
    }

    fn notify(&mut self) {
        if self.subscribers.is_empty() {
            return;
        }
        match self.snapshot() {
            Ok(snapshot) => self.subscribers.publish(&snapshot),
            Err(e) => warn!(error = %e, "could not build snapshot for subscribers"),
        }
    }
}

impl DocumentStore for SqliteStore {
    fn create(&mut self, doc: &StudentDocument) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        let body = serde_json::to_string(doc)?;
        let created_at = chrono::Utc::now().to_rfc3339();
        self.conn
            .execute(
                "INSERT INTO students(id, registration_number, doc, created_at)
                 VALUES(?, ?, ?, ?)",
                (
                    &id,
                    &doc.personal_info.registration_number,
                    &body,
                    &created_at,
                ),
            )
            .map_err(|e| StoreError::Write(e.to_string()))?;
        info!(record = %id, "student record created");
        self.notify();
        Ok(id)
    }

    fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let changed = self
            .conn
            .execute("DELETE FROM students WHERE id = ?", [id])
            .map_err(|e| StoreError::Write(e.to_string()))?;
        if changed == 0 {
            debug!(record = %id, "delete of unknown record");
            return Ok(());
        }
        info!(record = %id, "student record deleted");
        self.notify();
        Ok(())
    }

    fn subscribe(&mut self) -> Result<Subscription, StoreError> {
        let initial = self.snapshot()?;
        let sub = self.subscribers.add(initial);
        debug!(subscription = sub.id(), "subscribed to students");
        Ok(sub)
    }

    fn unsubscribe(&mut self, subscription_id: u64) {
        if self.subscribers.remove(subscription_id) {
            debug!(subscription = subscription_id, "unsubscribed from students");
        }
    }
}

#[derive(Default)]
pub struct StoreClient {
    backend: Option<SqliteStore>,
}

impl StoreClient {
    pub fn closed() -> Self {
        StoreClient { backend: None }
    }

    pub fn open(&mut self, workspace: &Path) -> anyhow::Result<()> {
        let store = SqliteStore::open(workspace)?;
        self.close();
        self.backend = Some(store);
        info!(workspace = %workspace.display(), "store opened");
        Ok(())
    }

    pub fn close(&mut self) {
        if let Some(store) = self.backend.take() {
            info!(
                subscribers = store.subscriber_count(),
                "store closed"
            );
        }
    }

    pub fn is_open(&self) -> bool {
        self.backend.is_some()
    }

    pub fn snapshot(&self) -> Result<Snapshot, StoreError> {
        self.backend.as_ref().ok_or(StoreError::Closed)?.snapshot()
    }

    pub fn subscriber_count(&self) -> usize {
        self.backend
            .as_ref()
            .map(|s| s.subscriber_count())
            .unwrap_or(0)
    }

    fn backend_mut(&mut self) -> Result<&mut SqliteStore, StoreError> {
        self.backend.as_mut().ok_or(StoreError::Closed)
    }
}

impl DocumentStore for StoreClient {
    fn create(&mut self, doc: &StudentDocument) -> Result<String, StoreError> {
        self.backend_mut()?.create(doc)
    }

    fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        self.backend_mut()?.delete(id)
    }

    fn subscribe(&mut self) -> Result<Subscription, StoreError> {
        self.backend_mut()?.subscribe()
    }

    fn unsubscribe(&mut self, subscription_id: u64) {
        if let Some(store) = self.backend.as_mut() {
            store.unsubscribe(subscription_id);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::PersonalInfo;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(prefix: &str) -> PathBuf {
        let p = std::env::temp_dir().join(format!(
            "{}-{}",
            prefix,
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("clock")
                .as_nanos()
        ));
        std::fs::create_dir_all(&p).expect("create temp dir");
        p
    }

    fn doc(reg: &str, name: &str) -> StudentDocument {
        StudentDocument {
            personal_info: PersonalInfo {
                registration_number: reg.to_string(),
                name: name.to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn snapshot_orders_by_registration_number_as_text() {
        let workspace = temp_dir("recordbook-store-order");
        let mut store = SqliteStore::open(&workspace).expect("open store");
        store.create(&doc("9", "C")).expect("create");
        store.create(&doc("10", "A")).expect("create");
        store.create(&doc("100", "B")).expect("create");

        let names: Vec<_> = store
            .snapshot()
            .expect("snapshot")
            .into_iter()
            .map(|r| r.doc.personal_info.name)
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);

        let _ = std::fs::remove_dir_all(workspace);
    }

    #[test]
    fn subscribers_get_initial_and_change_snapshots() {
        let workspace = temp_dir("recordbook-store-live");
        let mut store = SqliteStore::open(&workspace).expect("open store");
        let sub = store.subscribe().expect("subscribe");

        let first = sub.drain();
        assert_eq!(first.latest.map(|s| s.len()), Some(0));

        let id = store.create(&doc("1", "Ali")).expect("create");
        store.create(&doc("2", "Sara")).expect("create");
        let after_creates = sub.drain().latest.expect("snapshot after creates");
        assert_eq!(after_creates.len(), 2);

        store.delete(&id).expect("delete");
        let after_delete = sub.drain().latest.expect("snapshot after delete");
        assert_eq!(after_delete.len(), 1);
        assert_eq!(after_delete[0].doc.personal_info.name, "Sara");

        store.unsubscribe(sub.id());
        assert!(sub.drain().disconnected);
        assert_eq!(store.subscriber_count(), 0);

        let _ = std::fs::remove_dir_all(workspace);
    }

    #[test]
    fn dropped_receivers_are_pruned_on_publish() {
        let workspace = temp_dir("recordbook-store-prune");
        let mut store = SqliteStore::open(&workspace).expect("open store");
        let kept = store.subscribe().expect("subscribe");
        drop(store.subscribe().expect("subscribe"));
        assert_eq!(store.subscriber_count(), 2);

        store.create(&doc("1", "Ali")).expect("create");
        assert_eq!(store.subscriber_count(), 1);
        assert!(!kept.drain().disconnected);

        let _ = std::fs::remove_dir_all(workspace);
    }

    #[test]
    fn deleting_unknown_id_succeeds() {
        let workspace = temp_dir("recordbook-store-delete-missing");
        let mut store = SqliteStore::open(&workspace).expect("open store");
        store.delete("nope").expect("delete of unknown id is ok");
        let _ = std::fs::remove_dir_all(workspace);
    }

    #[test]
    fn closed_client_refuses_and_disconnects() {
        let workspace = temp_dir("recordbook-store-client");
        let mut client = StoreClient::closed();
        assert!(matches!(client.create(&doc("1", "x")), Err(StoreError::Closed)));
        assert!(matches!(client.delete("x"), Err(StoreError::Closed)));

        client.open(&workspace).expect("open client");
        let sub = client.subscribe().expect("subscribe");
        client.close();
        let drained = sub.drain();
        assert!(drained.latest.is_some());
        assert!(drained.disconnected);
        assert!(!client.is_open());

        let _ = std::fs::remove_dir_all(workspace);
    }
}
