use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use rand::Rng;
use serde::Serialize;

use crate::error::{Result, RiskError};
use crate::risk::{calculate_risk_index, RiskRow, RiskScore, WeightTables};

pub const RISK_INDEX_COLUMN: &str = "risk_index";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    weather: usize,
    temperature: usize,
    humidity: usize,
    construction_type: usize,
    process: usize,
    progress_rate: usize,
    worker_count: usize,
    risk_index: usize,
}

impl ColumnMap {
    fn resolve(headers: &mut StringRecord) -> Result<Self> {
        let find = |name: &str| -> Result<usize> {
            headers
                .iter()
                .position(|header| header.trim() == name)
                .ok_or_else(|| RiskError::MissingColumn(name.to_string()))
        };

        let weather = find("weather")?;
        let temperature = find("temperature")?;
        let humidity = find("humidity")?;
        let construction_type = find("construction_type")?;
        let process = find("process")?;
        let progress_rate = find("progress_rate")?;
        let worker_count = find("worker_count")?;
        let risk_index = match find(RISK_INDEX_COLUMN) {
            Ok(index) => index,
            Err(_) => {
                log::warn!("No `{}` column found; appending one", RISK_INDEX_COLUMN);
                headers.push_field(RISK_INDEX_COLUMN);
                headers.len() - 1
            }
        };

        Ok(ColumnMap {
            weather,
            temperature,
            humidity,
            construction_type,
            process,
            progress_rate,
            worker_count,
            risk_index,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleRow {
    pub weather: String,
    pub construction_type: String,
    pub process: String,
    pub risk_index: String,
}

/// A CSV dataset held in memory with its risk inputs parsed.
///
/// Columns other than the risk inputs are kept as raw text and written back
/// untouched, in their original order.
#[derive(Debug, Clone)]
pub struct RiskTable {
    headers: StringRecord,
    records: Vec<StringRecord>,
    rows: Vec<RiskRow>,
    columns: ColumnMap,
    has_bom: bool,
    crlf: bool,
}

impl RiskTable {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| RiskError::io(path, e))?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let has_bom = bytes.starts_with(UTF8_BOM);
        let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        let crlf = header_ends_with_crlf(body);

        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(body);
        let mut headers = reader.headers()?.clone();
        let source_width = headers.len();
        let columns = ColumnMap::resolve(&mut headers)?;
        let appended_index = headers.len() > source_width;

        let mut records = Vec::new();
        let mut rows = Vec::new();
        for result in reader.records() {
            let mut record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            rows.push(parse_row(&record, &columns, line)?);
            if appended_index {
                record.push_field("");
            }
            records.push(record);
        }

        log::debug!(
            "Parsed {} rows across {} columns (bom: {}, crlf: {})",
            rows.len(),
            headers.len(),
            has_bom,
            crlf
        );

        Ok(RiskTable {
            headers,
            records,
            rows,
            columns,
            has_bom,
            crlf,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[RiskRow] {
        &self.rows
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.headers.iter()
    }

    /// Current `risk_index` values; blanks and non-integers are `None`.
    pub fn risk_indices(&self) -> Vec<Option<i64>> {
        self.records
            .iter()
            .map(|record| {
                record
                    .get(self.columns.risk_index)
                    .and_then(parse_index)
            })
            .collect()
    }

    /// Overwrites every row's `risk_index` with a freshly drawn value.
    pub fn recalculate<R: Rng + ?Sized>(
        &mut self,
        weights: &WeightTables,
        rng: &mut R,
    ) -> Vec<RiskScore> {
        let column = self.columns.risk_index;
        self.rows
            .iter()
            .zip(self.records.iter_mut())
            .map(|(row, record)| {
                let score = calculate_risk_index(row, weights, rng);
                let value = score.index.to_string();
                *record = record
                    .iter()
                    .enumerate()
                    .map(|(i, field)| if i == column { value.as_str() } else { field })
                    .collect();
                score
            })
            .collect()
    }

    pub fn sample(&self, limit: usize) -> Vec<SampleRow> {
        let field = |record: &StringRecord, index: usize| {
            record.get(index).unwrap_or_default().to_string()
        };
        self.records
            .iter()
            .take(limit)
            .map(|record| SampleRow {
                weather: field(record, self.columns.weather),
                construction_type: field(record, self.columns.construction_type),
                process: field(record, self.columns.process),
                risk_index: field(record, self.columns.risk_index),
            })
            .collect()
    }

    /// Serializes with the source's BOM and line terminator.
    pub fn to_csv_bytes(&self) -> Result<Vec<u8>> {
        let terminator = if self.crlf {
            Terminator::CRLF
        } else {
            Terminator::Any(b'\n')
        };
        let mut buffer = Vec::new();
        if self.has_bom {
            buffer.extend_from_slice(UTF8_BOM);
        }

        let mut writer = WriterBuilder::new()
            .terminator(terminator)
            .from_writer(buffer);
        writer.write_record(&self.headers)?;
        for record in &self.records {
            writer.write_record(record)?;
        }
        writer
            .into_inner()
            .map_err(|e| RiskError::Csv(csv::Error::from(e.into_error())))
    }
}

/// Terminator of the header record; newlines inside quoted fields don't count.
pub(super) fn header_ends_with_crlf(body: &[u8]) -> bool {
    let mut quoted = false;
    for (i, &byte) in body.iter().enumerate() {
        match byte {
            b'"' => quoted = !quoted,
            b'\n' if !quoted => return i > 0 && body[i - 1] == b'\r',
            _ => {}
        }
    }
    false
}

fn parse_index(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    raw.parse::<i64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|value| value.is_finite() && value.fract() == 0.0)
            .map(|value| value as i64)
    })
}

fn parse_row(record: &StringRecord, columns: &ColumnMap, line: u64) -> Result<RiskRow> {
    let text = |index: usize| record.get(index).unwrap_or_default();

    let number = |index: usize, name: &str| -> Result<f64> {
        let raw = text(index).trim();
        if raw.is_empty() {
            return Err(RiskError::InvalidRow {
                line,
                reason: format!("missing value for `{}`", name),
            });
        }
        raw.parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| RiskError::InvalidRow {
                line,
                reason: format!("`{}` is not a number: {:?}", name, raw),
            })
    };

    let worker_count = {
        let raw = text(columns.worker_count).trim();
        if raw.is_empty() {
            return Err(RiskError::InvalidRow {
                line,
                reason: "missing value for `worker_count`".to_string(),
            });
        }
        parse_index(raw).ok_or_else(|| RiskError::InvalidRow {
            line,
            reason: format!("`worker_count` is not an integer: {:?}", raw),
        })?
    };

    let construction_type = text(columns.construction_type);
    if construction_type.trim().is_empty() {
        return Err(RiskError::InvalidRow {
            line,
            reason: "missing value for `construction_type`".to_string(),
        });
    }

    Ok(RiskRow {
        weather: text(columns.weather).to_string(),
        temperature: number(columns.temperature, "temperature")?,
        humidity: number(columns.humidity, "humidity")?,
        construction_type: construction_type.to_string(),
        process: text(columns.process).to_string(),
        progress_rate: number(columns.progress_rate, "progress_rate")?,
        worker_count,
    })
}
