//! Reading the lead list and rendering the augmented table.

use crate::domain::model::{
    Lead, LeadRow, LeadSheet, OutputRow, OutreachResult, BODY_COLUMN, EMAIL_COLUMN, NAME_COLUMN,
    PHONE_COLUMN, SUBJECT_COLUMN, WHATSAPP_COLUMN,
};
use crate::utils::error::{OutreachError, Result};
use serde_json::{Map, Value};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

fn column_index(headers: &[String], column: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == column)
        .ok_or_else(|| OutreachError::MissingColumnError {
            column: column.to_string(),
        })
}

pub fn read_leads(data: &[u8]) -> Result<LeadSheet> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(data);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let name_idx = column_index(&headers, NAME_COLUMN)?;
    let email_idx = column_index(&headers, EMAIL_COLUMN)?;
    let phone_idx = column_index(&headers, PHONE_COLUMN)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let fields: Vec<String> = record.iter().map(str::to_string).collect();
        let cell = |idx: usize| fields.get(idx).map(|v| v.trim().to_string()).unwrap_or_default();
        let lead = Lead {
            name: cell(name_idx),
            email: cell(email_idx),
            phone: cell(phone_idx),
        };
        rows.push(LeadRow { lead, fields });
    }

    Ok(LeadSheet { headers, rows })
}

/// Output header order: every input column, then the generated columns.
/// A generated column that already exists in the input is reused in place.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    pub headers: Vec<String>,
    generated: [usize; 3],
}

impl OutputLayout {
    pub fn new(input_headers: &[String]) -> Self {
        let mut headers = input_headers.to_vec();
        let mut slot = |column: &str| match headers.iter().position(|h| h == column) {
            Some(idx) => idx,
            None => {
                headers.push(column.to_string());
                headers.len() - 1
            }
        };
        let generated = [
            slot(WHATSAPP_COLUMN),
            slot(SUBJECT_COLUMN),
            slot(BODY_COLUMN),
        ];
        Self { headers, generated }
    }

    pub fn render(&self, row: &OutputRow) -> Vec<String> {
        let mut values = row.row.fields.clone();
        values.resize(self.headers.len(), String::new());

        let [whatsapp, subject, body] = self.generated;
        values[whatsapp] = row.message.whatsapp_message.clone();
        values[subject] = row.message.email_subject.clone();
        values[body] = row.message.email_body.clone();
        values
    }
}

pub fn write_delimited(result: &OutreachResult, delimiter: u8) -> Result<Vec<u8>> {
    let layout = OutputLayout::new(&result.headers);
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(&layout.headers)?;
    for row in &result.rows {
        writer.write_record(layout.render(row))?;
    }

    writer
        .into_inner()
        .map_err(|e| OutreachError::IoError(e.into_error()))
}

pub fn write_json(result: &OutreachResult) -> Result<Vec<u8>> {
    let layout = OutputLayout::new(&result.headers);
    let leads: Vec<Value> = result
        .rows
        .iter()
        .map(|row| {
            let object: Map<String, Value> = layout
                .headers
                .iter()
                .cloned()
                .zip(layout.render(row).into_iter().map(Value::String))
                .collect();
            Value::Object(object)
        })
        .collect();

    let document = serde_json::json!({
        "summary": result.summary,
        "leads": leads,
    });
    Ok(serde_json::to_vec_pretty(&document)?)
}
