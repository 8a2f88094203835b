//! Row-per-plot text table with the columns
//! `PlotID,X,Y,Area,Zone,Subtype,Reason`.

use super::{Grid, InputError, Zone};
use ub_structs::core::PlotRecord;

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

pub fn write_plot_table(records: &[PlotRecord]) -> String {
    let mut out = PlotRecord::COLUMNS.join(",");
    out.push('\n');
    for r in records {
        let row = [
            r.plot_id.to_string(),
            r.x.to_string(),
            r.y.to_string(),
            r.area.to_string(),
            escape(&r.zone),
            escape(&r.subtype),
            escape(&r.reason),
        ];
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

/// Splits the input into rows of fields, honouring quoted fields.
fn split_rows(input: &str) -> Result<Vec<(usize, Vec<String>)>, InputError> {
    let mut rows = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut row_line = 1;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, in_quotes) {
            ('"', true) if chars.peek() == Some(&'"') => {
                chars.next();
                field.push('"');
            }
            ('"', true) => in_quotes = false,
            ('"', false) if field.is_empty() => in_quotes = true,
            ('\n', true) => {
                line += 1;
                field.push('\n');
            }
            (',', false) => fields.push(std::mem::take(&mut field)),
            ('\r', false) if chars.peek() == Some(&'\n') => {}
            ('\n', false) => {
                fields.push(std::mem::take(&mut field));
                let row = std::mem::take(&mut fields);
                if !(row.len() == 1 && row[0].is_empty()) {
                    rows.push((row_line, row));
                }
                line += 1;
                row_line = line;
            }
            (c, _) => field.push(c),
        }
    }
    if in_quotes {
        return Err(InputError::MalformedTable {
            line: row_line,
            reason: "unterminated quoted field".to_string(),
        });
    }
    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        rows.push((row_line, fields));
    }
    Ok(rows)
}

pub fn read_plot_table(input: &str) -> Result<Vec<PlotRecord>, InputError> {
    let mut rows = split_rows(input)?.into_iter();
    let (header_line, header) = rows.next().ok_or(InputError::MalformedTable {
        line: 1,
        reason: "missing header".to_string(),
    })?;
    if header.iter().map(|h| h.trim()).ne(PlotRecord::COLUMNS) {
        return Err(InputError::MalformedTable {
            line: header_line,
            reason: format!("expected header {}", PlotRecord::COLUMNS.join(",")),
        });
    }

    rows.map(|(line, fields)| {
        let malformed = |reason: String| InputError::MalformedTable { line, reason };
        if fields.len() != PlotRecord::COLUMNS.len() {
            return Err(malformed(format!(
                "expected {} columns, found {}",
                PlotRecord::COLUMNS.len(),
                fields.len()
            )));
        }
        let parse_usize = |idx: usize| {
            fields[idx].trim().parse::<usize>().map_err(|_| {
                malformed(format!(
                    "invalid {} '{}'",
                    PlotRecord::COLUMNS[idx],
                    fields[idx]
                ))
            })
        };
        let area = fields[3]
            .trim()
            .parse::<f64>()
            .map_err(|_| malformed(format!("invalid Area '{}'", fields[3])))?;
        let zone: Zone = fields[4].trim().parse()?;
        Ok(PlotRecord {
            plot_id: parse_usize(0)?,
            x: parse_usize(1)?,
            y: parse_usize(2)?,
            area,
            zone: zone.to_string(),
            subtype: fields[5].clone(),
            reason: fields[6].clone(),
        })
    })
    .collect()
}

impl Grid {
    pub fn to_table(&self) -> String {
        write_plot_table(&self.records())
    }

    pub fn from_table(input: &str) -> Result<Self, InputError> {
        Self::from_records(&read_plot_table(input)?)
    }
}
