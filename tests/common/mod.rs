// Shared test helpers
#![allow(dead_code)]

use jmxsnap::session::StaticSession;
use jmxsnap::value::AttributeValue;
use std::collections::BTreeMap;

/// Canned session document: one memory pool and one GC bean with a
/// tabular per-pool record, plus a pool with an unbounded max.
pub const SAMPLE_DOCUMENT: &str = r#"
{
  "java.lang:type=MemoryPool,name=CMS Perm Gen": {
    "Usage": {
      "kind": "composite",
      "value": {
        "init": { "kind": "int", "value": 16777216 },
        "used": { "kind": "int", "value": 50 },
        "committed": { "kind": "int", "value": 200 },
        "max": { "kind": "int", "value": 200 }
      }
    },
    "Type": { "kind": "text", "value": "NON_HEAP" },
    "CollectionUsageThreshold": { "kind": "int", "value": 0 }
  },
  "java.lang:type=MemoryPool,name=CMS Old Gen": {
    "Usage": {
      "kind": "composite",
      "value": {
        "init": { "kind": "int", "value": 0 },
        "used": { "kind": "int", "value": 75 },
        "committed": { "kind": "int", "value": 100 },
        "max": { "kind": "int", "value": -1 }
      }
    }
  },
  "java.lang:type=GarbageCollector,name=ConcurrentMarkSweep": {
    "LastGcInfo": {
      "kind": "composite",
      "value": {
        "id": { "kind": "int", "value": 17 },
        "duration": { "kind": "int", "value": 184 },
        "memoryUsageAfterGc": {
          "kind": "tabular",
          "value": {
            "indexNames": ["key"],
            "rows": [
              {
                "kind": "composite",
                "value": {
                  "key": { "kind": "text", "value": "CMS Old Gen" },
                  "value": {
                    "kind": "composite",
                    "value": {
                      "used": { "kind": "int", "value": 30 },
                      "committed": { "kind": "int", "value": 100 },
                      "max": { "kind": "int", "value": 400 }
                    }
                  }
                }
              }
            ]
          }
        }
      }
    }
  },
  "java.lang:type=Runtime": {
    "Broken": { "kind": "spline", "value": 1 }
  }
}
"#;

pub fn sample_session() -> StaticSession {
    StaticSession::from_json_str(SAMPLE_DOCUMENT).expect("sample document parses")
}

pub fn int(n: i64) -> AttributeValue {
    AttributeValue::Int(n)
}

pub fn text(s: &str) -> AttributeValue {
    AttributeValue::Text(s.into())
}

pub fn composite(fields: &[(&str, AttributeValue)]) -> AttributeValue {
    AttributeValue::Composite(
        fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect::<BTreeMap<_, _>>(),
    )
}
