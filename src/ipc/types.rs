use crate::browser::RecordBrowser;
use crate::form::FormController;
use crate::store::StoreClient;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub workspace: Option<PathBuf>,
    pub store: StoreClient,
    pub form: FormController,
    pub browser: RecordBrowser,
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            workspace: None,
            store: StoreClient::closed(),
            form: FormController::new(),
            browser: RecordBrowser::new(),
        }
    }

    pub fn close_workspace(&mut self) {
        self.browser.detach(&mut self.store);
        self.store.close();
        self.workspace = None;
    }
}
