//! Copy-to-clipboard via the OSC 52 terminal escape sequence.
//!
//! The terminal intercepts `ESC ] 52 ; c ; <base64> ESC \` and places the
//! decoded text on the system clipboard, which also works over SSH.

use std::io::{self, Write};

use base64::Engine;

use crate::ui::notify::{Notification, Notifier};

/// Escape sequence that sets the clipboard to `text`.
pub fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text);
    format!("\x1b]52;c;{encoded}\x1b\\")
}

/// Writes the OSC 52 sequence for `text` to `out`.
pub fn copy_to<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    out.write_all(osc52_sequence(text).as_bytes())?;
    out.flush()
}

/// Copies `text` and reports the outcome. Empty text is ignored.
///
/// Returns `true` if the sequence was written.
pub fn copy_with_notice<W: Write>(out: &mut W, text: &str, notifier: &dyn Notifier) -> bool {
    if text.is_empty() {
        return false;
    }

    match copy_to(out, text) {
        Ok(()) => {
            notifier.notify(Notification::success(
                "Copied to clipboard",
                Some(text.to_string()),
            ));
            true
        }
        Err(e) => {
            tracing::error!(error = %e, "Copy failed");
            notifier.notify(Notification::error("Failed to copy URL", None));
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::notify::{Level, MemoryNotifier};

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_osc52_sequence() {
        assert_eq!(
            osc52_sequence("https://sho.rt/abc123"),
            "\x1b]52;c;aHR0cHM6Ly9zaG8ucnQvYWJjMTIz\x1b\\"
        );
    }

    #[test]
    fn test_copy_with_notice_success() {
        let mut out = Vec::new();
        let notifier = MemoryNotifier::new();

        assert!(copy_with_notice(&mut out, "https://sho.rt/abc123", &notifier));
        assert_eq!(
            String::from_utf8(out).unwrap(),
            osc52_sequence("https://sho.rt/abc123")
        );
        let note = notifier.last().unwrap();
        assert_eq!(note.level, Level::Success);
        assert_eq!(note.description.as_deref(), Some("https://sho.rt/abc123"));
    }

    #[test]
    fn test_copy_empty_is_noop() {
        let mut out = Vec::new();
        let notifier = MemoryNotifier::new();

        assert!(!copy_with_notice(&mut out, "", &notifier));
        assert!(out.is_empty());
        assert!(notifier.all().is_empty());
    }

    #[test]
    fn test_copy_failure_notifies() {
        let notifier = MemoryNotifier::new();

        assert!(!copy_with_notice(&mut BrokenPipe, "https://sho.rt/x", &notifier));
        assert_eq!(notifier.last().unwrap().level, Level::Error);
    }
}
