use crate::CliResult;

use std::io::Write;

use circle_server::Car;
use circle_sse::{EventRecord, SseClient};

/// One line per record; a car payload gets a second line with its fields.
pub fn format_record(record: &EventRecord) -> String {
    let mut line = format!(
        "id: {} | event: {} | data: {}",
        record.id,
        record.event_type,
        record.payload_lossy()
    );

    if let Ok(car) = serde_json::from_slice::<Car>(&record.payload) {
        line.push_str(&format!("\n  marke: {}, baujahr: {}", car.marke, car.baujahr));
    }

    line
}

/// Subscribe to `path` and write every record to `out` until the stream
/// ends. Returns the number of records seen.
pub async fn watch<W: Write>(client: &SseClient, path: &str, out: &mut W) -> CliResult<usize> {
    let mut events = client.connect(path).await?;
    writeln!(out, "watching {}", client.url(path))?;

    let mut seen = 0;
    while let Some(record) = events.recv().await {
        writeln!(out, "{}", format_record(&record))?;
        out.flush()?;
        seen += 1;
    }

    writeln!(out, "stream closed after {} event(s)", seen)?;
    Ok(seen)
}
