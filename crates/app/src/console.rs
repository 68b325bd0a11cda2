//! Notices printed to stderr, one line each.

use stockledger_client::{Notice, NoticeLevel, Notifier};

#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn format(notice: &Notice) -> String {
        match notice.level {
            NoticeLevel::Success => format!("✔ {}", notice.message),
            NoticeLevel::Error => format!("✖ {}", notice.message),
        }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        eprintln!("{}", Self::format(&notice));
    }
}
