use std::fmt;

use serde_json::{json, Value};

/// The four documents the service persists. Contents are opaque JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Document {
    Expenses,
    FriendTransactions,
    ReceivedTransactions,
    Settings,
}

impl Document {
    pub const ALL: [Document; 4] = [
        Document::Expenses,
        Document::FriendTransactions,
        Document::ReceivedTransactions,
        Document::Settings,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Document::Expenses => "expenses.json",
            Document::FriendTransactions => "friend_transactions.json",
            Document::ReceivedTransactions => "received_transactions.json",
            Document::Settings => "settings.json",
        }
    }

    /// Absolute route path of the document under `/api`.
    pub fn route(self) -> &'static str {
        match self {
            Document::Expenses => "/api/expenses",
            Document::FriendTransactions => "/api/friend-transactions",
            Document::ReceivedTransactions => "/api/received-transactions",
            Document::Settings => "/api/settings",
        }
    }

    /// Value written at startup when the file is absent, and returned by a
    /// load that finds nothing usable.
    pub fn default_value(self) -> Value {
        match self {
            Document::Settings => json!({}),
            _ => json!([]),
        }
    }

    /// Value written by clear-all. This is `[]` for every document, settings
    /// included, even though the settings default is `{}`.
    pub fn cleared_value(self) -> Value {
        json!([])
    }

    pub fn label(self) -> &'static str {
        match self {
            Document::Expenses => "expenses",
            Document::FriendTransactions => "friend transactions",
            Document::ReceivedTransactions => "received transactions",
            Document::Settings => "settings",
        }
    }

    pub fn saved_message(self) -> &'static str {
        match self {
            Document::Expenses => "Expenses saved successfully",
            Document::FriendTransactions => "Friend transactions saved successfully",
            Document::ReceivedTransactions => "Received transactions saved successfully",
            Document::Settings => "Settings saved successfully",
        }
    }

    pub fn save_failed_message(self) -> &'static str {
        match self {
            Document::Expenses => "Failed to save expenses",
            Document::FriendTransactions => "Failed to save friend transactions",
            Document::ReceivedTransactions => "Failed to save received transactions",
            Document::Settings => "Failed to save settings",
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
