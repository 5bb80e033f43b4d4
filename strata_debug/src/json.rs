// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON exporter.
//!
//! [`export`] writes the log of a [`RecorderSink`](super::recorder::RecorderSink)
//! as a JSON array with one object per event, in recording order. Every object
//! carries a `seq` index, an event `name`, and an `args` object.

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::RecordedEvent;

/// Exports recorded events as a pretty-printed JSON array.
pub fn export(events: &[RecordedEvent], writer: &mut dyn Write) -> io::Result<()> {
    let values: Vec<Value> = events
        .iter()
        .enumerate()
        .map(|(seq, event)| to_value(seq, event))
        .collect();
    serde_json::to_writer_pretty(writer, &values)?;
    Ok(())
}

fn to_value(seq: usize, event: &RecordedEvent) -> Value {
    match event {
        RecordedEvent::PointerRouted {
            kind,
            position,
            target,
            role,
        } => json!({
            "seq": seq,
            "name": "PointerRouted",
            "args": {
                "kind": kind.as_str(),
                "x": position.x,
                "y": position.y,
                "target": target.index(),
                "role": role.as_str(),
            }
        }),
        RecordedEvent::BannerSettled { key, state } => json!({
            "seq": seq,
            "name": "BannerSettled",
            "args": {
                "key": key,
                "visible": state.is_visible(),
            }
        }),
        RecordedEvent::BannerDismissed {
            key,
            was_visible,
            persisted,
        } => json!({
            "seq": seq,
            "name": "BannerDismissed",
            "args": {
                "key": key,
                "was_visible": was_visible,
                "persisted": persisted,
            }
        }),
        RecordedEvent::StoreFault { key, op, error } => json!({
            "seq": seq,
            "name": "StoreFault",
            "args": {
                "key": key,
                "op": op.as_str(),
                "error": error.to_string(),
            }
        }),
        RecordedEvent::RegionMeasured { region, bounds } => json!({
            "seq": seq,
            "name": "RegionMeasured",
            "args": {
                "region": region.as_str(),
                "x0": bounds.x0,
                "y0": bounds.y0,
                "x1": bounds.x1,
                "y1": bounds.y1,
            }
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use strata_core::dismissal::BannerViewState;
    use strata_core::storage::StoreError;
    use strata_core::trace::{BannerSettledEvent, StoreFaultEvent, StoreOp, TraceSink};

    #[test]
    fn export_produces_valid_json() {
        let mut rec = RecorderSink::new();
        rec.on_store_fault(&StoreFaultEvent {
            key: "banner-dismissed",
            op: StoreOp::Read,
            error: &StoreError::Unavailable,
        });
        rec.on_banner_settled(&BannerSettledEvent {
            key: "banner-dismissed",
            state: BannerViewState::Visible,
        });

        let mut out = Vec::new();
        export(rec.events(), &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();

        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert_eq!(parsed.len(), 2);

        assert_eq!(parsed[0]["seq"], 0);
        assert_eq!(parsed[0]["name"], "StoreFault");
        assert_eq!(parsed[0]["args"]["op"], "read");
        assert_eq!(parsed[0]["args"]["error"], "storage unavailable");

        assert_eq!(parsed[1]["name"], "BannerSettled");
        assert_eq!(parsed[1]["args"]["visible"], true);
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export(&[], &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert!(parsed.is_empty());
    }
}
