use crate::catalog;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: &'static str,
}

impl Notice {
    pub fn saved() -> Self {
        Notice {
            kind: NoticeKind::Success,
            message: catalog::MSG_SAVE_OK,
        }
    }

    pub fn save_failed() -> Self {
        Notice {
            kind: NoticeKind::Error,
            message: catalog::MSG_SAVE_FAILED,
        }
    }

    pub fn deleted() -> Self {
        Notice {
            kind: NoticeKind::Success,
            message: catalog::MSG_DELETE_OK,
        }
    }

    pub fn delete_failed() -> Self {
        Notice {
            kind: NoticeKind::Error,
            message: catalog::MSG_DELETE_FAILED,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}
