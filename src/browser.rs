use crate::notice::Notice;
use crate::record::{RecordCard, StudentRecord};
use crate::store::{DocumentStore, StoreError, Subscription};
use tracing::{debug, error};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserView {
    Loading,
    Ready {
        cards: Vec<RecordCard>,
        total: usize,
    },
}

impl BrowserView {
    pub fn is_empty_state(&self) -> bool {
        matches!(self, BrowserView::Ready { total: 0, .. })
    }
}

#[derive(Debug, Default)]
pub struct RecordBrowser {
    subscription: Option<Subscription>,
    records: Option<Vec<StudentRecord>>,
    query: String,
    pending_delete: Option<String>,
}

impl RecordBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn attach(&mut self, store: &mut dyn DocumentStore) -> Result<(), StoreError> {
        if self.subscription.is_none() {
            let sub = store.subscribe()?;
            debug!(subscription = sub.id(), "record browser attached");
            self.subscription = Some(sub);
        }
        Ok(())
    }

    pub fn detach(&mut self, store: &mut dyn DocumentStore) {
        if let Some(sub) = self.subscription.take() {
            store.unsubscribe(sub.id());
            debug!(subscription = sub.id(), "record browser detached");
        }
        self.records = None;
        self.pending_delete = None;
    }

    pub fn refresh(&mut self) -> bool {
        let Some(sub) = self.subscription.as_ref() else {
            return false;
        };
        let drained = sub.drain();
        let changed = drained.latest.is_some();
        if let Some(snapshot) = drained.latest {
            self.records = Some(snapshot);
        }
        if drained.disconnected {
            debug!("store closed the record subscription");
            self.subscription = None;
            self.records = None;
            return true;
        }
        changed
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn search(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn filtered(&self) -> Vec<&StudentRecord> {
        let Some(records) = self.records.as_ref() else {
            return Vec::new();
        };
        records
            .iter()
            .filter(|r| matches_query(r, &self.query))
            .collect()
    }

    pub fn view(&self) -> BrowserView {
        match self.records.as_ref() {
            None => BrowserView::Loading,
            Some(all) => BrowserView::Ready {
                cards: self.filtered().into_iter().map(|r| r.card()).collect(),
                total: all.len(),
            },
        }
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn request_delete(&mut self, id: impl Into<String>) {
        self.pending_delete = Some(id.into());
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Deletes the pending record. The confirmation closes either way.
    /// Returns `None` when nothing was pending.
    pub fn confirm_delete(&mut self, store: &mut dyn DocumentStore) -> Option<Notice> {
        let id = self.pending_delete.take()?;
        match store.delete(&id) {
            Ok(()) => Some(Notice::deleted()),
            Err(e) => {
                error!(record = %id, error = %e, "deleting student record failed");
                Some(Notice::delete_failed())
            }
        }
    }
}

pub fn matches_query(record: &StudentRecord, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let info = &record.doc.personal_info;
    info.name.to_lowercase().contains(&query.to_lowercase())
        || info.registration_number.contains(query)
        || info.id_number.contains(query)
}
