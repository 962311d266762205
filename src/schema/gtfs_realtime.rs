// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Built-in schema for GTFS-realtime `FeedMessage`.
//!
//! Field numbers follow the published `gtfs-realtime.proto`. Fields whose
//! wire type the decoder does not support (the `double` odometer reading)
//! are left out. When present they are skipped with a warning; under the
//! default policy their payload bytes show up as stray numeric keys.

use std::sync::OnceLock;

use super::SchemaNode;

/// Root schema for a GTFS-realtime feed.
pub fn feed_message() -> &'static SchemaNode {
    static SCHEMA: OnceLock<SchemaNode> = OnceLock::new();
    SCHEMA.get_or_init(build_feed_message)
}

fn t(name: &str) -> SchemaNode {
    SchemaNode::terminal(name)
}

fn build_feed_message() -> SchemaNode {
    SchemaNode::message("FeedMessage", [(1, feed_header()), (2, feed_entity())])
}

fn feed_header() -> SchemaNode {
    SchemaNode::message(
        "header",
        [
            (1, t("gtfs_realtime_version")),
            (2, t("incrementality")),
            (3, t("timestamp")),
            (4, t("feed_version")),
        ],
    )
}

fn feed_entity() -> SchemaNode {
    SchemaNode::message(
        "entity",
        [
            (1, t("id")),
            (2, t("is_deleted")),
            (3, trip_update()),
            (4, vehicle_position()),
            (5, alert()),
        ],
    )
}

fn trip_descriptor(name: &str) -> SchemaNode {
    SchemaNode::message(
        name,
        [
            (1, t("trip_id")),
            (2, t("start_time")),
            (3, t("start_date")),
            (4, t("schedule_relationship")),
            (5, t("route_id")),
            (6, t("direction_id")),
        ],
    )
}

fn vehicle_descriptor() -> SchemaNode {
    SchemaNode::message(
        "vehicle",
        [
            (1, t("id")),
            (2, t("label")),
            (3, t("license_plate")),
            (4, t("wheelchair_accessible")),
        ],
    )
}

fn stop_time_event(name: &str) -> SchemaNode {
    SchemaNode::message(
        name,
        [(1, t("delay")), (2, t("time")), (3, t("uncertainty"))],
    )
}

fn trip_update() -> SchemaNode {
    SchemaNode::message(
        "trip_update",
        [
            (1, trip_descriptor("trip")),
            (
                2,
                SchemaNode::message(
                    "stop_time_update",
                    [
                        (1, t("stop_sequence")),
                        (2, stop_time_event("arrival")),
                        (3, stop_time_event("departure")),
                        (4, t("stop_id")),
                        (5, t("schedule_relationship")),
                    ],
                ),
            ),
            (3, vehicle_descriptor()),
            (4, t("timestamp")),
            (5, t("delay")),
        ],
    )
}

fn vehicle_position() -> SchemaNode {
    SchemaNode::message(
        "vehicle",
        [
            (1, trip_descriptor("trip")),
            (
                2,
                SchemaNode::message(
                    "position",
                    [
                        (1, t("latitude")),
                        (2, t("longitude")),
                        (3, t("bearing")),
                        (5, t("speed")),
                    ],
                ),
            ),
            (3, t("current_stop_sequence")),
            (4, t("current_status")),
            (5, t("timestamp")),
            (6, t("congestion_level")),
            (7, t("stop_id")),
            (8, vehicle_descriptor()),
            (9, t("occupancy_status")),
            (10, t("occupancy_percentage")),
        ],
    )
}

fn translated_string(name: &str) -> SchemaNode {
    SchemaNode::message(
        name,
        [(
            1,
            SchemaNode::message("translation", [(1, t("text")), (2, t("language"))]),
        )],
    )
}

fn alert() -> SchemaNode {
    SchemaNode::message(
        "alert",
        [
            (
                1,
                SchemaNode::message("active_period", [(1, t("start")), (2, t("end"))]),
            ),
            (
                5,
                SchemaNode::message(
                    "informed_entity",
                    [
                        (1, t("agency_id")),
                        (2, t("route_id")),
                        (3, t("route_type")),
                        (4, trip_descriptor("trip")),
                        (5, t("stop_id")),
                        (6, t("direction_id")),
                    ],
                ),
            ),
            (6, t("cause")),
            (7, t("effect")),
            (8, translated_string("url")),
            (10, translated_string("header_text")),
            (11, translated_string("description_text")),
            (12, translated_string("tts_header_text")),
            (13, translated_string("tts_description_text")),
            (14, t("severity_level")),
        ],
    )
}
