use crate::core::aggregate::duration_minutes;
use crate::errors::AppResult;
use crate::models::entry::Entry;
use crate::models::geo::GeoFix;
use chrono::{DateTime, Local, Utc};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::collections::HashMap;

pub const CSV_HEADER: [&str; 15] = [
    "ID",
    "Mitarbeiter",
    "Arbeitsbereich",
    "Start",
    "Ende",
    "Dauer_Minuten",
    "Notiz",
    "GeoStart_Breitengrad",
    "GeoStart_Laengengrad",
    "GeoEnde_Breitengrad",
    "GeoEnde_Laengengrad",
    "GeoStart_Genauigkeit_m",
    "GeoEnde_Genauigkeit_m",
    "Genehmigt",
    "Freigegeben",
];

const BOM: &str = "\u{feff}";

/// Name lookups for the id columns.
pub struct CsvNames<'a> {
    pub users: &'a HashMap<i64, String>,
    pub areas: &'a HashMap<i64, String>,
}

/// `"..."` with embedded quotes doubled.
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

fn local_display(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%d.%m.%Y, %H:%M").to_string()
}

fn yes_no(b: bool) -> &'static str {
    if b { "ja" } else { "nein" }
}

fn geo_cols(g: Option<&GeoFix>) -> (String, String, String) {
    match g {
        Some(g) => (g.lat.to_string(), g.lon.to_string(), g.acc.to_string()),
        None => (String::new(), String::new(), String::new()),
    }
}

/// Semicolon separated, UTF-8 with BOM, one line per entry.
///
/// Free-text columns are quoted here, so the writer itself never quotes.
pub fn entries_csv(entries: &[Entry], names: &CsvNames<'_>, step_minutes: u32) -> AppResult<Vec<u8>> {
    let mut buf: Vec<u8> = BOM.as_bytes().to_vec();
    {
        let mut wtr = WriterBuilder::new()
            .delimiter(b';')
            .quote_style(QuoteStyle::Never)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(&mut buf);

        wtr.write_record(CSV_HEADER)?;

        for e in entries {
            let (gs_lat, gs_lon, gs_acc) = geo_cols(e.geo_start.as_ref());
            let (ge_lat, ge_lon, ge_acc) = geo_cols(e.geo_end.as_ref());
            let lookup = |map: &HashMap<i64, String>, id: i64| {
                map.get(&id).map(String::as_str).unwrap_or("").to_string()
            };

            wtr.write_record([
                e.id.to_string(),
                quoted(&lookup(names.users, e.user_id)),
                quoted(&lookup(names.areas, e.area_id)),
                local_display(e.start),
                local_display(e.end),
                duration_minutes(e.duration_ms, step_minutes).to_string(),
                quoted(&e.note),
                gs_lat,
                gs_lon,
                ge_lat,
                ge_lon,
                gs_acc,
                ge_acc,
                yes_no(e.approved).to_string(),
                yes_no(e.published).to_string(),
            ])?;
        }

        wtr.flush()?;
    }

    // the writer adds a final terminator; the export has none
    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    Ok(buf)
}
