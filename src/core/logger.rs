use flexi_logger::filter::{self, LogLineFilter};

/// Drops records from the HTTP stack, they are noisy and may carry cookies.
pub struct IgnoreHttpInternals;

const IGNORED_MODULES: [&str; 4] = ["reqwest", "hyper", "cookie_store", "rustls"];

impl LogLineFilter for IgnoreHttpInternals {
    fn write(
        &self,
        now: &mut flexi_logger::DeferredNow,
        record: &log::Record,
        log_line_writer: &dyn filter::LogLineWriter,
    ) -> std::io::Result<()> {
        let path = record.module_path().unwrap_or_default();

        if IGNORED_MODULES.iter().any(|m| path.starts_with(m)) {
            return Ok(());
        }

        log_line_writer.write(now, record)
    }
}
