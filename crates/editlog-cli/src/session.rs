//! Recorded editing sessions
//!
//! A recording is a JSON-lines file, one record per line:
//!
//! ```text
//! {"type":"open","path":"/w/app/main.rs","text":"fn main() {}\n"}
//! {"type":"change","path":"/w/app/main.rs","changes":[{"range":{...},"rangeLength":0,"text":"x"}]}
//! {"type":"cursor","path":"/w/app/main.rs","line":0}
//! {"type":"wait","ms":1500}
//! {"type":"save","path":"/w/app/main.rs"}
//! {"type":"close","path":"/w/app/main.rs"}
//! ```
//!
//! `open` without `text` reads the file from disk. Blank lines and lines
//! starting with `//` are ignored.

use anyhow::Context;
use editlog_core::events::{ContentChange, FILE_SCHEME};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SessionRecord {
    Open {
        path: PathBuf,
        #[serde(default)]
        text: Option<String>,
    },
    Change {
        path: PathBuf,
        changes: Vec<ContentChange>,
        #[serde(default = "default_scheme")]
        scheme: String,
    },
    Cursor {
        path: PathBuf,
        line: usize,
    },
    Save {
        path: PathBuf,
    },
    Close {
        path: PathBuf,
    },
    Wait {
        ms: u64,
    },
}

fn default_scheme() -> String {
    FILE_SCHEME.to_string()
}

/// Parse a whole recording, reporting the first bad line
pub fn parse(content: &str) -> anyhow::Result<Vec<SessionRecord>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with("//")
        })
        .map(|(idx, line)| {
            serde_json::from_str::<SessionRecord>(line)
                .with_context(|| format!("Invalid record on line {}", idx + 1))
        })
        .collect()
}
