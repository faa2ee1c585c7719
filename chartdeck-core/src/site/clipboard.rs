//! Clipboard access
//!
//! One `ClipboardService` is created by the application and handed to
//! whatever needs to copy text, rather than being reachable globally.

use std::io::Write;
use std::process::{Command, Stdio};
use std::sync::Mutex;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("No clipboard tool found (tried: {tried})")]
    Unavailable { tried: String },

    #[error("Clipboard tool '{tool}' failed")]
    ToolFailed {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Clipboard tool '{tool}' exited with {status}")]
    ToolExit { tool: String, status: String },
}

/// Copies text to a clipboard
pub trait ClipboardService: Send + Sync {
    fn copy(&self, text: &str) -> Result<(), ClipboardError>;
}

/// A command that reads clipboard contents from stdin
#[derive(Debug, Clone, Copy)]
struct ClipboardTool {
    program: &'static str,
    args: &'static [&'static str],
}

/// Tried in order; the first one installed wins
const CLIPBOARD_TOOLS: &[ClipboardTool] = &[
    ClipboardTool {
        program: "pbcopy",
        args: &[],
    },
    ClipboardTool {
        program: "wl-copy",
        args: &[],
    },
    ClipboardTool {
        program: "xclip",
        args: &["-selection", "clipboard"],
    },
    ClipboardTool {
        program: "xsel",
        args: &["--clipboard", "--input"],
    },
    ClipboardTool {
        program: "clip",
        args: &[],
    },
];

/// System clipboard through the platform's command-line tools
#[derive(Debug, Clone)]
pub struct SystemClipboard {
    candidates: Vec<ClipboardTool>,
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self {
            candidates: CLIPBOARD_TOOLS.to_vec(),
        }
    }
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn run(tool: &str, args: &[&str], text: &str) -> Result<(), ClipboardError> {
        let failed = |source: std::io::Error| ClipboardError::ToolFailed {
            tool: tool.to_string(),
            source,
        };

        let mut child = Command::new(tool)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(failed)?;

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(text.as_bytes()) {
                drop(stdin);
                let _ = child.kill();
                let _ = child.wait();
                return Err(failed(e));
            }
        }

        let status = child.wait().map_err(failed)?;
        if status.success() {
            Ok(())
        } else {
            Err(ClipboardError::ToolExit {
                tool: tool.to_string(),
                status: status.to_string(),
            })
        }
    }
}

impl ClipboardService for SystemClipboard {
    fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        for tool in &self.candidates {
            match Self::run(tool.program, tool.args, text) {
                Ok(()) => {
                    debug!("Copied {} bytes with {}", text.len(), tool.program);
                    return Ok(());
                }
                Err(ClipboardError::ToolFailed { source, .. })
                    if source.kind() == std::io::ErrorKind::NotFound =>
                {
                    continue;
                }
                Err(e) => return Err(e),
            }
        }

        Err(ClipboardError::Unavailable {
            tried: self
                .candidates
                .iter()
                .map(|tool| tool.program)
                .collect::<Vec<_>>()
                .join(", "),
        })
    }
}

/// In-process clipboard that remembers everything copied
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    copies: Mutex<Vec<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently copied text
    pub fn last(&self) -> Option<String> {
        self.copies.lock().ok()?.last().cloned()
    }

    pub fn copies(&self) -> Vec<String> {
        self.copies
            .lock()
            .map(|copies| copies.clone())
            .unwrap_or_default()
    }
}

impl ClipboardService for MemoryClipboard {
    fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        if let Ok(mut copies) = self.copies.lock() {
            copies.push(text.to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod clipboard_tests {
    use super::*;

    #[test]
    fn test_memory_clipboard_records_copies() {
        let clipboard = MemoryClipboard::new();
        assert!(clipboard.last().is_none());

        clipboard.copy("first").unwrap();
        clipboard.copy("second").unwrap();

        assert_eq!(clipboard.last().as_deref(), Some("second"));
        assert_eq!(clipboard.copies(), vec!["first", "second"]);
    }

    #[test]
    fn test_system_clipboard_without_tools() {
        let clipboard = SystemClipboard {
            candidates: vec![ClipboardTool {
                program: "chartdeck-no-such-clipboard-tool",
                args: &[],
            }],
        };

        let err = clipboard.copy("text").unwrap_err();
        assert!(matches!(err, ClipboardError::Unavailable { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_tool_that_ignores_stdin_is_reported() {
        let clipboard = SystemClipboard {
            candidates: vec![ClipboardTool {
                program: "true",
                args: &[],
            }],
        };

        // Larger than a pipe buffer, so the write fails once the tool exits
        let text = "x".repeat(4 * 1024 * 1024);
        let err = clipboard.copy(&text).unwrap_err();
        match err {
            ClipboardError::ToolFailed { tool, source } => {
                assert_eq!(tool, "true");
                assert_eq!(source.kind(), std::io::ErrorKind::BrokenPipe);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
