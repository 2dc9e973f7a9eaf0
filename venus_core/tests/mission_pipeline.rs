// venus_core/tests/mission_pipeline.rs

//! Drives raw payloads through decode, pairing and mapping the same way the
//! simulator does, without a broker.

use venus_core::prelude::*;
use venus_core::report::{load_snapshot, save_snapshot};

fn tagged(source: RobotId, payload: &str) -> TaggedRecord {
    TaggedRecord::new(source, decode_payload(payload.as_bytes()).unwrap())
}

#[test]
fn payloads_become_a_rock_report() {
    let mut aggregator = PairAggregator::new();
    let mut mapper = ExplorationMapper::default();
    let mut last_snapshot = Vec::new();

    let stream = [
        // B reports twice before the pair closes; only the latest counts.
        tagged(RobotId::B, r#"[5, 5, true, "gold", 9, false, false]"#),
        tagged(RobotId::B, r#"[0, 1, false, null, 0, true, false]"#),
        tagged(RobotId::A, r#"[1, 0, true, "red", 5, false, false]"#),
        tagged(RobotId::B, r#"[1, 0, true, 2, 3, false, false]"#),
        tagged(RobotId::A, r#"[0, 2, false, false, 4, false, true]"#),
    ];

    let mut pairs = 0;
    for record in stream {
        if let Some(pair) = aggregator.offer(record) {
            pairs += 1;
            last_snapshot = mapper.update_pair(&pair).unwrap();
        }
    }

    assert_eq!(pairs, 2);
    assert_eq!(mapper.position(RobotId::A), GridPosition::new(2, 2));
    assert_eq!(mapper.position(RobotId::B), GridPosition::new(-2, -1));
    assert_eq!(mapper.cliffs(RobotId::B).len(), 1);
    assert_eq!(mapper.mountains(RobotId::A).len(), 1);

    assert_eq!(
        last_snapshot,
        vec![
            RockEntry {
                robot: RobotId::A,
                id: 1,
                colour: Colour::Name("red".into()),
                size: 5,
                coordinates: [2, 0],
            },
            RockEntry {
                robot: RobotId::B,
                id: 2,
                colour: Colour::Code(2),
                size: 3,
                coordinates: [-2, -1],
            },
        ]
    );

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("table.json");
    save_snapshot(&path, &last_snapshot).unwrap();
    assert_eq!(load_snapshot(&path).unwrap(), last_snapshot);
}

#[test]
fn malformed_payloads_never_reach_the_aggregator() {
    let payloads: [&[u8]; 4] = [
        b"[1, 0, true, \"red\", 5, false]",
        b"not json",
        b"{\"x\": 1}",
        &[0xc3, 0x28],
    ];
    for payload in payloads {
        assert!(decode_payload(payload).is_err());
    }
}
