use anyhow::{Context, Result};
use crate::input::gesture::InputEvent;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// An input event and the time it happens, relative to the start of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedEvent {
    pub at_ms: u64,
    pub event: InputEvent,
}

/// Load a gesture script in CSV form
///
/// Expected columns (header names are case-insensitive):
/// - `at_ms` / `time` / `t`: milliseconds since the session started
/// - `event` / `gesture`: `tap`, `press_start`, `hold`, `press_end` or `scrub`
/// - `arg` / `zone` / `value`: `left`/`right`, or the scrub target in ms
///
/// Rows are returned ordered by time; rows sharing a timestamp keep
/// their file order.
pub fn load_script_csv<R: Read>(reader: R) -> Result<Vec<ScriptedEvent>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let time_idx = find_column(&headers, &["at_ms", "time", "t", "ms"])?;
    let event_idx = find_column(&headers, &["event", "gesture", "kind"])?;
    let arg_idx = find_column(&headers, &["arg", "zone", "value", "target"])?;

    let mut events = Vec::new();
    for (line, result) in rdr.records().enumerate() {
        let record = result.context("Failed to read gesture script row")?;

        let at_ms = record
            .get(time_idx)
            .and_then(|s| s.parse::<u64>().ok())
            .with_context(|| format!("Row {}: invalid time", line + 1))?;
        let event = record.get(event_idx).unwrap_or("");
        let arg = record.get(arg_idx).unwrap_or("");

        let event = InputEvent::parse(event, arg).with_context(|| format!("Row {}", line + 1))?;
        events.push(ScriptedEvent { at_ms, event });
    }

    events.sort_by_key(|e| e.at_ms);
    Ok(events)
}

/// Load a gesture script stored as a JSON array of [`ScriptedEvent`]
pub fn load_script_json(data: &[u8]) -> Result<Vec<ScriptedEvent>> {
    let mut events: Vec<ScriptedEvent> =
        serde_json::from_slice(data).context("Failed to parse JSON gesture script")?;
    events.sort_by_key(|e| e.at_ms);
    Ok(events)
}

/// Find a column by checking possible names
fn find_column(headers: &csv::StringRecord, names: &[&str]) -> Result<usize> {
    for (idx, header) in headers.iter().enumerate() {
        let header_lower = header.to_lowercase();
        if names.iter().any(|&name| header_lower == name) {
            return Ok(idx);
        }
    }

    anyhow::bail!("Could not find column with names: {:?}", names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::gesture::Zone;

    #[test]
    fn test_load_csv_script() {
        let data = "\
at_ms,event,arg
0,tap,left
500, hold ,right
1500,press_end,right
2000,scrub,9500
";
        let events = load_script_csv(data.as_bytes()).unwrap();
        assert_eq!(
            events,
            vec![
                ScriptedEvent { at_ms: 0, event: InputEvent::tap(Zone::Left) },
                ScriptedEvent { at_ms: 500, event: InputEvent::hold(Zone::Right) },
                ScriptedEvent { at_ms: 1500, event: InputEvent::release(Zone::Right) },
                ScriptedEvent { at_ms: 2000, event: InputEvent::Scrub { target_ms: 9500 } },
            ]
        );
    }

    #[test]
    fn test_alternate_headers_and_ordering() {
        let data = "Time,Gesture,Zone\n300,tap,right\n100,tap,left\n300,hold,left\n";
        let events = load_script_csv(data.as_bytes()).unwrap();

        let times: Vec<u64> = events.iter().map(|e| e.at_ms).collect();
        assert_eq!(times, vec![100, 300, 300]);
        // Same timestamp keeps file order
        assert_eq!(events[1].event, InputEvent::tap(Zone::Right));
        assert_eq!(events[2].event, InputEvent::hold(Zone::Left));
    }

    #[test]
    fn test_bad_rows_are_reported() {
        assert!(load_script_csv("at_ms,event,arg\nsoon,tap,left\n".as_bytes()).is_err());
        assert!(load_script_csv("at_ms,event,arg\n0,wiggle,left\n".as_bytes()).is_err());
        assert!(load_script_csv("when,what\n0,tap\n".as_bytes()).is_err());
    }

    #[test]
    fn test_load_json_script() {
        let data = br#"[
            {"at_ms": 900, "event": {"type": "scrub", "target_ms": 4000}},
            {"at_ms": 0, "event": {"type": "gesture", "zone": "right", "kind": "tap"}}
        ]"#;
        let events = load_script_json(data).unwrap();
        assert_eq!(events[0].event, InputEvent::tap(Zone::Right));
        assert_eq!(events[1].event, InputEvent::Scrub { target_ms: 4000 });
    }
}
