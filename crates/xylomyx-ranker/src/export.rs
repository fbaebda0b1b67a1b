//! Matrix exporters.

use std::fmt;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use tracing::info;

use xylomyx_common::{Result, XylomyxError};

use crate::matrix::{MatrixRow, RankedMatrix};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
    /// Array of row records
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
        }
    }

    /// Parse a comma-separated list such as `csv,json`.
    pub fn parse_list(list: &str) -> Result<Vec<Self>> {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<Self>())
            .collect()
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = XylomyxError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            "json" => Ok(Self::Json),
            other => Err(XylomyxError::InvalidArgument(format!("unsupported export format '{other}'"))),
        }
    }
}

fn write_delimited<W: Write>(rows: &[MatrixRow], writer: W, delimiter: u8) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().delimiter(delimiter).from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write rows in `format` to any writer.
pub fn write_rows<W: Write>(rows: &[MatrixRow], format: ExportFormat, mut writer: W) -> Result<()> {
    match format {
        ExportFormat::Csv => write_delimited(rows, writer, b','),
        ExportFormat::Tsv => write_delimited(rows, writer, b'\t'),
        ExportFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, rows)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
            Ok(())
        }
    }
}

/// Write rows to `path`, creating or truncating it.
pub fn export_rows(rows: &[MatrixRow], format: ExportFormat, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_rows(rows, format, std::io::BufWriter::new(file))?;
    info!(path = %path.display(), rows = rows.len(), format = %format, "Exported matrix");
    Ok(())
}

impl RankedMatrix {
    /// Write the rows in their current order.
    pub fn export(&self, format: ExportFormat, path: &Path) -> Result<()> {
        export_rows(&self.rows, format, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(accession: &str, confidence: f64) -> MatrixRow {
        MatrixRow {
            accession: accession.to_string(),
            gene_name: "cel5".to_string(),
            protein_name: "endoglucanase, partial".to_string(),
            enzyme_type: "cellulase".to_string(),
            family: "GH5".to_string(),
            ec_number: "3.2.1.4".to_string(),
            organism: "Agrilus planipennis".to_string(),
            tissue: "midgut".to_string(),
            stage: "larval".to_string(),
            length: 450,
            confidence,
            expression_score: 1.0,
            homology_score: 0.0,
            function: "Cellulose hydrolysis".to_string(),
        }
    }

    #[test]
    fn test_parse_formats() {
        assert_eq!(ExportFormat::parse_list("csv, json").unwrap(), vec![ExportFormat::Csv, ExportFormat::Json]);
        assert!(matches!("excel".parse::<ExportFormat>(), Err(XylomyxError::InvalidArgument(_))));
        assert!(ExportFormat::parse_list("csv,fasta").is_err());
    }

    #[test]
    fn test_csv_header_and_rounding() {
        let mut out = Vec::new();
        write_rows(&[row("XP_1", 0.87654)], ExportFormat::Csv, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "accession,gene_name,protein_name,enzyme_type,family,ec_number,organism,tissue,stage,length,confidence,expression_score,homology_score,function"
        );
        let record = lines.next().unwrap();
        assert!(record.starts_with("XP_1,cel5,\"endoglucanase, partial\",cellulase,GH5"));
        assert!(record.contains(",0.877,"));
    }

    #[test]
    fn test_tsv_uses_tabs() {
        let mut out = Vec::new();
        write_rows(&[row("XP_1", 0.5)], ExportFormat::Tsv, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.lines().next().unwrap().starts_with("accession\tgene_name\t"));
        assert!(text.contains("endoglucanase, partial\tcellulase"));
    }

    #[test]
    fn test_json_file_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("digestive_matrix.json");
        export_rows(&[row("XP_1", 0.9), row("XP_2", 0.8)], ExportFormat::Json, &path).unwrap();

        let parsed: Vec<MatrixRow> = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].accession, "XP_2");
    }

    #[test]
    fn test_empty_csv_has_no_rows() {
        let mut out = Vec::new();
        write_rows(&[], ExportFormat::Csv, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().lines().count() <= 1);
    }
}
