use std::collections::BTreeMap;
use std::io::{self, Write};

use clap::ValueEnum;

use crate::summary::Summary;
use crate::Table;

/// Output layout for the final table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// `{Abha=-23.0/18.0/59.2, Abidjan=...}` as min/mean/max
    #[default]
    Standard,
    /// `{"Abha":"-23.0/59.2/18.0",...}` as min/max/mean
    Json,
}

/// outputs the report for a summary table, stations sorted by name
pub fn write_report<W: Write>(out: &mut W, table: &Table, format: Format) -> io::Result<()> {
    let sorted: BTreeMap<&str, &Summary> = table.iter().map(|(k, v)| (k.as_str(), v)).collect();

    write!(out, "{{")?;
    let mut first = true;
    for (station, s) in sorted {
        match format {
            Format::Standard => {
                if !first {
                    write!(out, ", ")?;
                }
                write!(out, "{station}={:.1}/{:.1}/{:.1}", s.min(), s.mean(), s.max())?;
            }
            Format::Json => {
                if !first {
                    write!(out, ",")?;
                }
                write!(
                    out,
                    "\"{}\":\"{:.1}/{:.1}/{:.1}\"",
                    escape(station),
                    s.min(),
                    s.max(),
                    s.mean()
                )?;
            }
        }
        first = false;
    }
    writeln!(out, "}}")?;
    Ok(())
}

fn escape(key: &str) -> String {
    let mut escaped = String::with_capacity(key.len());
    for c in key.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            c if c.is_control() => escaped.push_str(&format!("\\u{:04x}", c as u32)),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut table = Table::default();
        let mut hamburg = Summary::new(12.0);
        hamburg.add(-3.5);
        hamburg.add(8.0);
        table.insert("Hamburg".into(), hamburg);
        table.insert("Bulawayo".into(), Summary::new(8.9));
        table
    }

    fn render(table: &Table, format: Format) -> String {
        let mut out = Vec::new();
        write_report(&mut out, table, format).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn standard_layout_is_sorted() {
        assert_eq!(
            render(&sample(), Format::Standard),
            "{Bulawayo=8.9/8.9/8.9, Hamburg=-3.5/5.5/12.0}\n"
        );
    }

    #[test]
    fn json_layout() {
        assert_eq!(
            render(&sample(), Format::Json),
            "{\"Bulawayo\":\"8.9/8.9/8.9\",\"Hamburg\":\"-3.5/12.0/5.5\"}\n"
        );
    }

    #[test]
    fn json_escapes_keys() {
        let mut table = Table::default();
        table.insert("say \"hi\"".into(), Summary::new(1.0));
        assert_eq!(render(&table, Format::Json), "{\"say \\\"hi\\\"\":\"1.0/1.0/1.0\"}\n");
    }

    #[test]
    fn empty_table() {
        assert_eq!(render(&Table::default(), Format::Standard), "{}\n");
        assert_eq!(render(&Table::default(), Format::Json), "{}\n");
    }
}
