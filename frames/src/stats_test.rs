use super::*;

fn full_payload() -> StatsPayload {
    StatsPayload {
        signal_strength: Some(-60.0),
        frequency: Some(915_000_000.0),
        bandwidth: Some(125_000.0),
        spreading_factor: Some(7),
        last_ping: Some(10_000),
        messages_sent: Some(5),
        messages_received: Some(3),
        delivery_rate: Some(80.0),
        avg_latency: Some(42.3),
    }
}

// =============================================================================
// RSSI classification
// =============================================================================

#[test]
fn rssi_above_minus_70_is_excellent() {
    assert_eq!(SignalQuality::from_rssi(-69.9), SignalQuality::Excellent);
    assert_eq!(SignalQuality::from_rssi(-30.0), SignalQuality::Excellent);
}

#[test]
fn rssi_between_minus_85_and_minus_70_is_good() {
    assert_eq!(SignalQuality::from_rssi(-71.0), SignalQuality::Good);
    assert_eq!(SignalQuality::from_rssi(-84.9), SignalQuality::Good);
}

#[test]
fn rssi_between_minus_100_and_minus_85_is_fair() {
    assert_eq!(SignalQuality::from_rssi(-86.0), SignalQuality::Fair);
    assert_eq!(SignalQuality::from_rssi(-99.9), SignalQuality::Fair);
}

#[test]
fn rssi_at_or_below_minus_100_is_poor() {
    assert_eq!(SignalQuality::from_rssi(-100.1), SignalQuality::Poor);
    assert_eq!(SignalQuality::from_rssi(-130.0), SignalQuality::Poor);
}

#[test]
fn boundary_values_classify_downward() {
    // The threshold tests are strict `>`, so the exact boundary falls into
    // the band below it.
    assert_eq!(SignalQuality::from_rssi(-70.0), SignalQuality::Good);
    assert_eq!(SignalQuality::from_rssi(-85.0), SignalQuality::Fair);
    assert_eq!(SignalQuality::from_rssi(-100.0), SignalQuality::Poor);
}

#[test]
fn nan_rssi_classifies_poor() {
    assert_eq!(SignalQuality::from_rssi(f64::NAN), SignalQuality::Poor);
}

// =============================================================================
// Snapshot mapping
// =============================================================================

#[test]
fn full_payload_maps_to_display_fields() {
    let snapshot = TelemetrySnapshot::from_payload(&full_payload());
    assert_eq!(snapshot.signal_quality, SignalQuality::Excellent);
    assert_eq!(snapshot.frequency, "915 MHz");
    assert_eq!(snapshot.bandwidth, "125 kHz");
    assert_eq!(snapshot.spreading_factor, "SF7");
    assert_eq!(snapshot.sent_messages, 5);
    assert_eq!(snapshot.received_messages, 3);
    assert_eq!(snapshot.delivery_rate, 80.0);
    assert_eq!(snapshot.latency, "42.3 ms");
}

#[test]
fn fractional_frequency_keeps_its_decimals() {
    let payload = StatsPayload {
        frequency: Some(868_100_000.0),
        ..StatsPayload::default()
    };
    let snapshot = TelemetrySnapshot::from_payload(&payload);
    assert_eq!(snapshot.frequency, "868.1 MHz");
}

#[test]
fn latency_renders_one_decimal_place() {
    let payload = StatsPayload {
        avg_latency: Some(42.0),
        ..StatsPayload::default()
    };
    assert_eq!(TelemetrySnapshot::from_payload(&payload).latency, "42.0 ms");
}

#[test]
fn omitted_fields_render_placeholders_not_stale_values() {
    // Whole-object replacement: a second payload that omits fields must not
    // inherit anything from the snapshot it replaces.
    let first = TelemetrySnapshot::from_payload(&full_payload());
    assert_eq!(first.frequency, "915 MHz");

    let partial = StatsPayload {
        signal_strength: Some(-90.0),
        ..StatsPayload::default()
    };
    let second = TelemetrySnapshot::from_payload(&partial);
    assert_eq!(second.signal_quality, SignalQuality::Fair);
    assert_eq!(second.frequency, "-");
    assert_eq!(second.bandwidth, "-");
    assert_eq!(second.spreading_factor, "-");
    assert_eq!(second.latency, "-");
    assert_eq!(second.sent_messages, 0);
    assert_eq!(second.received_messages, 0);
    assert_eq!(second.delivery_rate, 0.0);
    assert_eq!(second.last_ping_ms, None);
}

#[test]
fn missing_rssi_classifies_poor() {
    let snapshot = TelemetrySnapshot::from_payload(&StatsPayload::default());
    assert_eq!(snapshot.signal_quality, SignalQuality::Poor);
}

#[test]
fn default_snapshot_matches_initial_widget_state() {
    let snapshot = TelemetrySnapshot::default();
    assert_eq!(snapshot.signal_quality, SignalQuality::Good);
    assert_eq!(snapshot.frequency, "-");
    assert_eq!(snapshot.sent_messages, 0);
    assert_eq!(snapshot.last_ping_age(1_000), "-");
}

#[test]
fn last_ping_age_is_computed_against_the_caller_clock() {
    let payload = StatsPayload {
        last_ping: Some(10_000),
        ..StatsPayload::default()
    };
    let snapshot = TelemetrySnapshot::from_payload(&payload);
    assert_eq!(snapshot.last_ping_age(13_000), "3s ago");
    assert_eq!(snapshot.last_ping_age(13_400), "3s ago");
    assert_eq!(snapshot.last_ping_age(13_600), "4s ago");
    assert_eq!(snapshot.last_ping_age(10_000), "0s ago");
}
