//! User-facing warning payloads. The session only signals that an action was
//! disallowed; the UI decides how to render the toast.

use crate::session::SessionError;

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, Copy, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "snake_case")]
pub enum NotificationStatus {
    Warning,
}

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct Notification {
    pub status: NotificationStatus,
    pub title: String,
    pub body: String,
}

impl Notification {
    pub(crate) fn for_rejection(error: &SessionError) -> Self {
        match error {
            SessionError::LastActiveWordList => Notification {
                status: NotificationStatus::Warning,
                title: "Cannot remove all word lists!".to_string(),
                body: "Make sure you have at least one word list selected.".to_string(),
            },
        }
    }
}
