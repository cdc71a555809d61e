use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use csv::Writer;
use serde::Serialize;

use crate::error::{Error, Result};

/// Writes one CSV row per record, with a header taken from the field names
pub fn write_records_csv<T: Serialize, P: AsRef<Path>>(records: &[T], path: P) -> Result<()> {
    let mut wtr = Writer::from_path(path.as_ref())?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush().map_err(Error::Io)?;
    Ok(())
}

/// Pretty-printed JSON of any serializable report
pub fn write_json<T: Serialize + ?Sized, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explore::AssociationResult;
    use tempfile::tempdir;

    #[test]
    fn test_write_reports() {
        let dir = tempdir().unwrap();
        let rows = vec![
            AssociationResult::new("a x b".into(), 0.9, 0.01, 10, 0.05),
            AssociationResult::new("a x c".into(), 0.1, 0.7, 10, 0.05),
        ];

        let csv_path = dir.path().join("report.csv");
        write_records_csv(&rows, &csv_path).unwrap();
        let text = std::fs::read_to_string(&csv_path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("label,statistic,p_value,reject_null,n"));
        assert_eq!(lines.next(), Some("a x b,0.9,0.01,true,10"));

        let json_path = dir.path().join("report.json");
        write_json(&rows, &json_path).unwrap();
        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(parsed[1]["reject_null"], serde_json::Value::Bool(false));
    }
}
