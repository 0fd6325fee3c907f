#![allow(clippy::float_cmp)]

use super::*;
use crate::fake::{Call, FakeEngine};
use crate::{icon, overlay};

fn marker_el(lat: &str, lng: &str) -> Element {
    Element::new("leaflet-marker")
        .with_attr("latitude", lat)
        .with_attr("longitude", lng)
}

fn connected(engine: &mut FakeEngine) -> MarkerAssembler {
    MarkerAssembler::connect(&marker_el("45.50", "-73.56"), engine).unwrap()
}

fn icon_signal(anchor: &str) -> Signal {
    icon::connect(Element::icon().with_attr("icon-anchor", anchor)).unwrap()
}

fn hover_signal(anchor: &str) -> Signal {
    icon::connect(
        Element::icon()
            .with_attr("class", "hover")
            .with_attr("hover-icon-anchor", anchor),
    )
    .unwrap()
}

fn descriptor(signal: &Signal) -> IconDescriptor {
    match signal {
        Signal::Icon(d) | Signal::HoverIcon(d) => d.clone(),
        other => panic!("expected an icon signal, got {other:?}"),
    }
}

// --- construction ---

#[test]
fn connect_parses_position_exactly() {
    let mut engine = FakeEngine::new();
    let marker = connected(&mut engine);
    assert_eq!(marker.position(), LatLng::new(45.50, -73.56));
    assert_eq!(engine.marker(marker.id()).position, Some(LatLng::new(45.50, -73.56)));
}

#[test]
fn connect_zero_coordinates_are_valid() {
    let mut engine = FakeEngine::new();
    let marker = MarkerAssembler::connect(&marker_el("0", "0"), &mut engine).unwrap();
    assert_eq!(marker.position(), LatLng::new(0.0, 0.0));
}

#[test]
fn connect_missing_coordinate_is_fatal_and_touches_no_engine() {
    let mut engine = FakeEngine::new();
    let el = Element::new("leaflet-marker").with_attr("longitude", "-73.56");
    let err = MarkerAssembler::connect(&el, &mut engine).unwrap_err();
    assert_eq!(err, AttrError::MissingCoordinate { name: "latitude".into() });
    assert!(engine.calls.is_empty());
    assert!(engine.markers.is_empty());
}

#[test]
fn connect_non_numeric_coordinate_is_fatal() {
    let mut engine = FakeEngine::new();
    let el = marker_el("north", "-73.56");
    assert!(MarkerAssembler::connect(&el, &mut engine).is_err());
    assert!(engine.markers.is_empty());
}

// --- announcement ---

#[test]
fn announce_emits_exactly_once() {
    let mut engine = FakeEngine::new();
    let mut marker = connected(&mut engine);
    let mut channel = SignalChannel::new();
    marker.announce(&mut channel);
    marker.announce(&mut channel);
    assert_eq!(channel.len(), 1);
    let envelope = channel.pop().unwrap();
    assert_eq!(envelope.scope, Scope::Host);
    assert_eq!(envelope.signal, Signal::Marker(marker.id()));
}

#[test]
fn announce_does_not_wait_for_descendants() {
    // Zero factories connected; the marker still announces.
    let mut engine = FakeEngine::new();
    let mut marker = connected(&mut engine);
    let mut channel = SignalChannel::new();
    marker.announce(&mut channel);
    assert_eq!(channel.len(), 1);
}

// --- per-kind application ---

#[test]
fn icon_applies_immediately_and_registers_revert_listeners() {
    let mut engine = FakeEngine::new();
    let mut marker = connected(&mut engine);
    let signal = icon_signal("10 10");
    let expected = descriptor(&signal);

    marker.apply(signal, &mut engine);

    assert_eq!(engine.marker(marker.id()).icon.as_ref(), Some(&expected));
    let kinds = engine.listener_kinds(marker.id());
    assert_eq!(kinds.len(), 2);
    assert!(kinds.contains(&MarkerEventKind::MouseOut));
    assert!(kinds.contains(&MarkerEventKind::PopupClose));
}

#[test]
fn second_icon_replaces_without_duplicate_listeners() {
    let mut engine = FakeEngine::new();
    let mut marker = connected(&mut engine);
    marker.apply(icon_signal("10 10"), &mut engine);
    let replacement = icon_signal("1 2");
    let expected = descriptor(&replacement);

    marker.apply(replacement, &mut engine);

    assert_eq!(engine.marker(marker.id()).icon.as_ref(), Some(&expected));
    assert_eq!(engine.listener_kinds(marker.id()).len(), 2);
    let set_icons = engine.calls_where(|c| matches!(c, Call::SetIcon(_)));
    assert_eq!(set_icons.len(), 2);
}

#[test]
fn hover_icon_is_stored_not_applied() {
    let mut engine = FakeEngine::new();
    let mut marker = connected(&mut engine);
    marker.apply(hover_signal("3 4"), &mut engine);

    assert!(engine.marker(marker.id()).icon.is_none());
    assert!(marker.hover_icon().is_some());
    assert_eq!(engine.listener_kinds(marker.id()), vec![MarkerEventKind::MouseOver]);
}

#[test]
fn popup_binds_to_marker() {
    let mut engine = FakeEngine::new();
    let mut marker = connected(&mut engine);
    marker.apply(
        overlay::connect_popup(Element::popup().with_text("Hello")),
        &mut engine,
    );
    assert!(engine.marker(marker.id()).popup.is_some());
    assert!(marker.popup().is_some());
}

#[test]
fn second_popup_rebinds() {
    let mut engine = FakeEngine::new();
    let mut marker = connected(&mut engine);
    marker.apply(overlay::connect_popup(Element::popup().with_text("a")), &mut engine);
    marker.apply(overlay::connect_popup(Element::popup().with_text("b")), &mut engine);
    let binds = engine.calls_where(|c| matches!(c, Call::BindPopup(_)));
    assert_eq!(binds.len(), 2);
}

#[test]
fn tooltip_binds_and_registers_popup_precedence() {
    let mut engine = FakeEngine::new();
    let mut marker = connected(&mut engine);
    marker.apply(
        overlay::connect_tooltip(Element::tooltip().with_text("tip")),
        &mut engine,
    );
    assert!(engine.marker(marker.id()).tooltip.is_some());
    assert_eq!(engine.listener_kinds(marker.id()), vec![MarkerEventKind::PopupOpen]);
}

#[test]
fn marker_signal_on_marker_scope_is_ignored() {
    let mut engine = FakeEngine::new();
    let mut marker = connected(&mut engine);
    let calls_before = engine.calls.len();
    marker.apply(Signal::Marker(marker.id()), &mut engine);
    assert_eq!(engine.calls.len(), calls_before);
}

// --- hover and popup interaction ---

#[test]
fn mouse_over_swaps_to_hover_icon() {
    let mut engine = FakeEngine::new();
    let mut marker = connected(&mut engine);
    marker.apply(icon_signal("10 10"), &mut engine);
    let hover = hover_signal("3 4");
    let hover_desc = descriptor(&hover);
    marker.apply(hover, &mut engine);

    marker.on_event(MarkerEventKind::MouseOver, &mut engine);

    assert_eq!(engine.marker(marker.id()).icon.as_ref(), Some(&hover_desc));
}

#[test]
fn mouse_over_without_hover_icon_changes_nothing() {
    let mut engine = FakeEngine::new();
    let mut marker = connected(&mut engine);
    marker.apply(icon_signal("10 10"), &mut engine);
    let set_icons_before = engine.calls_where(|c| matches!(c, Call::SetIcon(_))).len();

    marker.on_event(MarkerEventKind::MouseOver, &mut engine);

    let set_icons = engine.calls_where(|c| matches!(c, Call::SetIcon(_)));
    assert_eq!(set_icons.len(), set_icons_before);
}

#[test]
fn mouse_out_with_popup_closed_reverts_to_default() {
    let mut engine = FakeEngine::new();
    let mut marker = connected(&mut engine);
    let default = icon_signal("10 10");
    let default_desc = descriptor(&default);
    marker.apply(default, &mut engine);
    marker.apply(hover_signal("3 4"), &mut engine);
    marker.on_event(MarkerEventKind::MouseOver, &mut engine);

    marker.on_event(MarkerEventKind::MouseOut, &mut engine);

    assert_eq!(engine.marker(marker.id()).icon.as_ref(), Some(&default_desc));
}

#[test]
fn mouse_out_with_popup_open_keeps_hover_icon() {
    let mut engine = FakeEngine::new();
    let mut marker = connected(&mut engine);
    marker.apply(icon_signal("10 10"), &mut engine);
    let hover = hover_signal("3 4");
    let hover_desc = descriptor(&hover);
    marker.apply(hover, &mut engine);
    marker.on_event(MarkerEventKind::MouseOver, &mut engine);
    engine.set_popup_open(marker.id(), true);

    marker.on_event(MarkerEventKind::MouseOut, &mut engine);

    assert_eq!(engine.marker(marker.id()).icon.as_ref(), Some(&hover_desc));
}

#[test]
fn popup_close_reverts_regardless_of_hover() {
    let mut engine = FakeEngine::new();
    let mut marker = connected(&mut engine);
    let default = icon_signal("10 10");
    let default_desc = descriptor(&default);
    marker.apply(default, &mut engine);
    marker.apply(hover_signal("3 4"), &mut engine);
    marker.on_event(MarkerEventKind::MouseOver, &mut engine);
    engine.set_popup_open(marker.id(), true);
    marker.on_event(MarkerEventKind::MouseOut, &mut engine);
    engine.set_popup_open(marker.id(), false);

    marker.on_event(MarkerEventKind::PopupClose, &mut engine);

    assert_eq!(engine.marker(marker.id()).icon.as_ref(), Some(&default_desc));
}

#[test]
fn popup_open_closes_bound_tooltip() {
    let mut engine = FakeEngine::new();
    let mut marker = connected(&mut engine);
    marker.apply(
        overlay::connect_tooltip(Element::tooltip().with_text("tip")),
        &mut engine,
    );
    assert!(engine.marker(marker.id()).tooltip_open);

    marker.on_event(MarkerEventKind::PopupOpen, &mut engine);

    assert!(!engine.marker(marker.id()).tooltip_open);
}

#[test]
fn popup_open_without_tooltip_does_nothing() {
    let mut engine = FakeEngine::new();
    let mut marker = connected(&mut engine);
    marker.on_event(MarkerEventKind::PopupOpen, &mut engine);
    assert!(engine.calls_where(|c| matches!(c, Call::CloseTooltip(_))).is_empty());
}

// --- teardown ---

#[test]
fn detach_removes_all_listeners_and_the_marker() {
    let mut engine = FakeEngine::new();
    let mut marker = connected(&mut engine);
    marker.apply(icon_signal("10 10"), &mut engine);
    marker.apply(hover_signal("3 4"), &mut engine);
    marker.apply(overlay::connect_tooltip(Element::tooltip()), &mut engine);
    assert_eq!(engine.listeners.len(), 4);

    marker.detach(&mut engine);

    assert!(engine.listeners.is_empty());
    assert!(engine.markers.is_empty());
    let removes = engine.calls_where(|c| matches!(c, Call::RemoveListener(_)));
    assert_eq!(removes.len(), 4);
}

#[test]
fn detach_with_no_listeners_only_removes_marker() {
    let mut engine = FakeEngine::new();
    let mut marker = connected(&mut engine);
    marker.detach(&mut engine);
    assert!(engine.calls_where(|c| matches!(c, Call::RemoveListener(_))).is_empty());
    assert_eq!(engine.calls_where(|c| matches!(c, Call::RemoveMarker(_))).len(), 1);
}
