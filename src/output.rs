use std::io::Write;

use crate::batch::LabelOutcome;
use crate::error::Result;
use crate::models::ParseResult;

/// Destination for result rows, one call per row
pub trait RowSink {
    fn append_row(&mut self, row: &[String]) -> Result<()>;

    fn append_header(&mut self) -> Result<()> {
        let header: Vec<String> = ParseResult::HEADER.iter().map(|s| s.to_string()).collect();
        self.append_row(&header)
    }

    fn append_result(&mut self, result: &ParseResult) -> Result<()> {
        self.append_row(&result.to_row())
    }
}

/// Writes rows as tab-separated lines. Tabs and newlines inside a cell are
/// replaced by spaces so every row stays on one line.
pub struct DelimitedWriter<W: Write> {
    inner: W,
}

impl<W: Write> DelimitedWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> RowSink for DelimitedWriter<W> {
    fn append_row(&mut self, row: &[String]) -> Result<()> {
        let cells: Vec<String> = row
            .iter()
            .map(|cell| cell.replace(['\t', '\n', '\r'], " "))
            .collect();
        writeln!(self.inner, "{}", cells.join("\t"))?;
        self.inner.flush()?;
        Ok(())
    }
}

/// Label counts for one written run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl RunSummary {
    /// True when there was at least one label and none of them parsed
    pub fn all_failed(&self) -> bool {
        self.failed > 0 && self.succeeded == 0
    }
}

/// Write one run: a `Run at` row, a blank row, the header, one row per
/// successful label in outcome order, then a closing blank row. Failed
/// labels get no row.
pub fn write_run<S: RowSink + ?Sized>(
    sink: &mut S,
    run_ts: &str,
    outcomes: &[LabelOutcome],
) -> Result<RunSummary> {
    sink.append_row(&[format!("Run at {}", run_ts)])?;
    sink.append_row(&[])?;
    sink.append_header()?;

    let mut succeeded = 0;
    for outcome in outcomes {
        if let Ok(result) = &outcome.result {
            sink.append_result(result)?;
            succeeded += 1;
        }
    }
    sink.append_row(&[])?;

    Ok(RunSummary {
        succeeded,
        failed: outcomes.len() - succeeded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LabelError;

    fn outcome(name: &str, result: Result<ParseResult>) -> LabelOutcome {
        LabelOutcome {
            name: name.to_string(),
            result,
        }
    }

    fn parsed(sender: &str, tracking: &str) -> Result<ParseResult> {
        Ok(ParseResult {
            sender_address: sender.to_string(),
            receiver_address: String::new(),
            tracking_id: tracking.to_string(),
        })
    }

    #[test]
    fn test_rows_are_tab_separated() -> Result<()> {
        let mut writer = DelimitedWriter::new(Vec::new());
        writer.append_header()?;
        writer.append_result(&ParseResult {
            sender_address: "JOHN SMITH|123 MAIN ST".to_string(),
            receiver_address: "JANE\tDOE".to_string(),
            tracking_id: String::new(),
        })?;
        writer.append_row(&[])?;

        let text = String::from_utf8(writer.into_inner()).expect("utf8 output");
        assert_eq!(
            text,
            "sender_address\treceiver_address\ttracking_id\nJOHN SMITH|123 MAIN ST\tJANE DOE\t\n\n"
        );
        Ok(())
    }

    #[test]
    fn test_run_layout_skips_failed_labels() -> Result<()> {
        let outcomes = vec![
            outcome("a.png", parsed("1 ELM ST", "1Z999AA10123456784")),
            outcome("b.png", Err(LabelError::Ocr("engine crashed".to_string()))),
            outcome("c.png", parsed("2 OAK AVE", "")),
        ];
        let mut writer = DelimitedWriter::new(Vec::new());

        let summary = write_run(&mut writer, "2026-10-19 08:30:00", &outcomes)?;

        assert_eq!(summary, RunSummary { succeeded: 2, failed: 1 });
        assert!(!summary.all_failed());
        let text = String::from_utf8(writer.into_inner()).expect("utf8 output");
        assert_eq!(
            text,
            "Run at 2026-10-19 08:30:00\n\n\
             sender_address\treceiver_address\ttracking_id\n\
             1 ELM ST\t\t1Z999AA10123456784\n\
             2 OAK AVE\t\t\n\
             \n"
        );
        Ok(())
    }

    #[test]
    fn test_run_with_only_failures_reports_all_failed() -> Result<()> {
        let outcomes = vec![
            outcome("a.png", Err(LabelError::Io(std::io::Error::from(std::io::ErrorKind::NotFound)))),
            outcome("b.png", Err(LabelError::Ocr("engine crashed".to_string()))),
        ];
        let mut writer = DelimitedWriter::new(Vec::new());

        let summary = write_run(&mut writer, "ts", &outcomes)?;

        assert_eq!(summary, RunSummary { succeeded: 0, failed: 2 });
        assert!(summary.all_failed());
        let text = String::from_utf8(writer.into_inner()).expect("utf8 output");
        assert_eq!(text, "Run at ts\n\nsender_address\treceiver_address\ttracking_id\n\n");
        Ok(())
    }

    #[test]
    fn test_empty_run_is_not_a_failure() -> Result<()> {
        let mut writer = DelimitedWriter::new(Vec::new());
        let summary = write_run(&mut writer, "ts", &[])?;
        assert!(!summary.all_failed());
        Ok(())
    }
}
