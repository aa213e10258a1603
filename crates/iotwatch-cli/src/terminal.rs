//! Terminal adapters for the notifier and navigator ports.
//!
//! Notices go to stderr so that stdout carries only command output.

use std::io::Write;
use std::sync::{Mutex, PoisonError};

use iotwatch_core::{LOGIN_ROUTE, Navigator, Notice, NoticeLevel, Notifier};

/// Prints notices to a writer, stderr by default.
pub struct TerminalNotifier {
    out: Mutex<Box<dyn Write + Send>>,
}

impl TerminalNotifier {
    pub fn stderr() -> Self {
        Self::to_writer(Box::new(std::io::stderr()))
    }

    pub fn to_writer(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: Notice) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(out, "{}", format_notice(&notice)) {
            tracing::warn!(error = %e, message = %notice.message, "Could not print notice");
        }
    }
}

pub fn format_notice(notice: &Notice) -> String {
    let prefix = match notice.level {
        NoticeLevel::Success => "ok",
        NoticeLevel::Info => "info",
        NoticeLevel::Warning => "warning",
        NoticeLevel::Error => "error",
    };
    format!("{prefix}: {}", notice.message)
}

/// There are no pages to move between in a terminal; a trip to the login
/// route becomes a hint telling the user how to sign in again.
#[derive(Debug, Default)]
pub struct LoginHintNavigator;

impl Navigator for LoginHintNavigator {
    fn navigate(&self, route: &str) {
        if route == LOGIN_ROUTE {
            eprintln!("{}", login_hint());
        } else {
            tracing::debug!(route, "Ignoring navigation");
        }
    }
}

pub const fn login_hint() -> &'static str {
    "Run `iotwatch login <username>` to sign in."
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_format_notice_prefixes() {
        assert_eq!(format_notice(&Notice::error("boom")), "error: boom");
        assert_eq!(format_notice(&Notice::warning("hmm")), "warning: hmm");
        assert_eq!(format_notice(&Notice::success("done")), "ok: done");
    }

    #[test]
    fn test_notifier_writes_one_line_per_notice() {
        let buf = SharedBuf::default();
        let notifier = TerminalNotifier::to_writer(Box::new(buf.clone()));

        notifier.notify(Notice::error("Internal server error"));
        notifier.notify(Notice::warning("slow"));

        let text = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        assert_eq!(text, "error: Internal server error\nwarning: slow\n");
    }

    #[test]
    fn test_notifier_still_prints_after_poisoned_lock() {
        let buf = SharedBuf::default();
        let notifier = Arc::new(TerminalNotifier::to_writer(Box::new(buf.clone())));
        let holder = Arc::clone(&notifier);
        let _ = std::thread::spawn(move || {
            let _guard = holder.out.lock().unwrap();
            panic!("writer thread died");
        })
        .join();
        assert!(notifier.out.is_poisoned());

        notifier.notify(Notice::error("Network error"));

        let text = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        assert_eq!(text, "error: Network error\n");
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_does_not_panic() {
        let notifier = TerminalNotifier::to_writer(Box::new(BrokenPipe));
        notifier.notify(Notice::error("boom"));
    }
}
