//! Property-based tests for the API wire format.
//!
//! Uses proptest to verify:
//! 1. Any task survives encode → decode through the list envelope.
//! 2. A status-only update never carries title or description keys.
//! 3. Random bytes never cause a panic in `decode_task_list`.
//! 4. `Status` display and parse agree for every variant.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use taskboard_proto::api::{TaskListResponse, UpdateTaskRequest};
use taskboard_proto::codec;
use taskboard_proto::task::{Status, Task, TaskId};

/// Strategy for generating arbitrary `Status` values.
fn arb_status() -> impl Strategy<Value = Status> {
    prop_oneof![
        Just(Status::Todo),
        Just(Status::InProgress),
        Just(Status::Done),
    ]
}

/// Strategy for generating arbitrary `Task` values.
fn arb_task() -> impl Strategy<Value = Task> {
    ("[a-zA-Z0-9-]{1,40}", ".{0,128}", ".{0,512}", arb_status()).prop_map(
        |(id, title, description, status)| Task {
            id: TaskId::new(id),
            title,
            description,
            status,
        },
    )
}

proptest! {
    #[test]
    fn task_list_survives_wire(tasks in prop::collection::vec(arb_task(), 0..16)) {
        let body = codec::encode(&TaskListResponse { data: tasks.clone() }).unwrap();
        let decoded = codec::decode_task_list(&body).unwrap();
        prop_assert_eq!(decoded.data, tasks);
    }

    #[test]
    fn status_only_update_has_single_key(status in arb_status()) {
        let value = serde_json::to_value(UpdateTaskRequest::status_only(status)).unwrap();
        let obj = value.as_object().unwrap();
        prop_assert_eq!(obj.len(), 1);
        prop_assert_eq!(obj["status"].as_str(), Some(status.as_str()));
    }

    #[test]
    fn random_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = codec::decode_task_list(&bytes);
    }

    #[test]
    fn status_display_parses_back(status in arb_status()) {
        prop_assert_eq!(status.to_string().parse::<Status>().unwrap(), status);
    }
}
