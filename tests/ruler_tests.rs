//! End-to-end tests driving a page context over the recording surface.

use std::time::Duration;

use lumbus_ruler::model::constants::*;
use lumbus_ruler::storage::{MemoryPreferences, PreferenceStore};
use lumbus_ruler::surface::{Mutation, NodeSpec, SignalKind};
use lumbus_ruler::{
    Ack, Command, CommandBus, ReadingRuler, RecordingSurface, RestorePolicy, RulerColor,
    RulerConfig, Signal, StatusEvent, Surface, SurfaceError,
};

type Ruler = ReadingRuler<RecordingSurface, MemoryPreferences>;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn ruler() -> Ruler {
    ruler_with(RulerConfig::default())
}

fn ruler_with(config: RulerConfig) -> Ruler {
    ReadingRuler::new(RecordingSurface::new(), MemoryPreferences::new(), config)
}

fn toggle(enabled: bool, color: Option<&str>) -> Command {
    Command::ToggleRuler {
        enabled,
        color: color.map(str::to_string),
    }
}

fn band_top(r: &Ruler) -> Option<String> {
    let band = r.overlay().band()?;
    r.surface().style_of(band, "top").map(str::to_string)
}

/// `top` values written to the band, in order.
fn top_commits(r: &Ruler) -> Vec<String> {
    let Some(band) = r.overlay().band() else {
        return Vec::new();
    };
    r.surface()
        .log()
        .iter()
        .filter_map(|m| match m {
            Mutation::SetStyle {
                node,
                property,
                value,
            } if *node == band && property == "top" => Some(value.clone()),
            _ => None,
        })
        .collect()
}

fn appended(r: &Ruler) -> usize {
    r.surface()
        .log()
        .iter()
        .filter(|m| matches!(m, Mutation::Append(_)))
        .count()
}

// === Lifecycle ===

#[test]
fn enable_track_disable_leaves_no_trace() {
    let mut r = ruler();
    assert_eq!(r.dispatch(toggle(true, Some("#ffeb3b"))), Ack::ok());

    let band = r.overlay().band().unwrap();
    assert_eq!(r.surface().style_of(band, "top"), Some("-100px"));
    assert_eq!(r.surface().listener_count(), 3);
    assert!(r.overlay().tracker().is_attached());

    r.handle_signal(Signal::PointerMove { y: 500.0 });
    r.advance_by(ms(DEBOUNCE_MS));
    assert_eq!(band_top(&r).as_deref(), Some("487.5px"));

    assert_eq!(r.dispatch(toggle(false, None)), Ack::ok());
    assert!(!r.surface().contains(band));
    assert_eq!(r.surface().listener_count(), 0);
    assert!(!r.overlay().tracker().is_attached());

    r.advance_by(ms(NOTIFICATION_DISPLAY_MS + NOTIFICATION_FADE_OUT_MS));
    assert_eq!(r.surface().node_count(), 0);
    assert!(r.notifier().is_empty());
    assert_eq!(r.next_deadline(), None);
}

#[test]
fn enable_twice_keeps_one_band() {
    let mut r = ruler();
    r.dispatch(toggle(true, None));
    let band = r.overlay().band();
    let listeners = r.overlay().tracker().subscriptions();

    r.dispatch(toggle(true, Some("#4caf50")));

    assert_eq!(r.overlay().band(), band);
    assert_eq!(r.overlay().tracker().subscriptions(), listeners);
    assert_eq!(r.surface().listener_count(), 3);
    assert_eq!(r.overlay().state().color, RulerColor::default());
    assert_eq!(
        r.drain_status(),
        vec![StatusEvent::RulerEnabled {
            color: RulerColor::default()
        }]
    );
    // band + a single toast
    assert_eq!(appended(&r), 2);
}

#[test]
fn disable_while_disabled_is_silent() {
    let mut r = ruler();
    assert_eq!(r.dispatch(toggle(false, None)), Ack::ok());
    assert!(r.surface().log().is_empty());
    assert!(r.notifier().is_empty());
    assert!(r.drain_status().is_empty());
}

#[test]
fn band_is_styled_from_color() {
    let mut r = ruler();
    r.dispatch(toggle(true, Some("#ffeb3b")));
    let band = r.overlay().band().unwrap();
    let node = &r.surface().node(band).unwrap().spec;

    assert_eq!(node.dom_id.as_deref(), Some(BAND_DOM_ID));
    assert_eq!(node.style("position"), Some("fixed"));
    assert_eq!(node.style("height"), Some("25px"));
    assert_eq!(node.style("pointer-events"), Some("none"));
    assert_eq!(node.style("transition"), Some("top 0.1s ease"));
    assert_eq!(node.style("border-top"), Some("1px solid #ffeb3b80"));
    assert_eq!(node.style("box-shadow"), Some("0 0 10px #ffeb3b40"));
    assert!(node.style("background").unwrap().contains("#ffeb3b4d 20%"));
}

// === Tracking ===

#[test]
fn burst_of_moves_commits_once_with_latest_sample() {
    let mut r = ruler();
    r.dispatch(toggle(true, None));

    for (t, y) in [(0, 100.0), (3, 200.0), (6, 300.0), (9, 400.0)] {
        r.advance_to(ms(t));
        r.handle_signal(Signal::PointerMove { y });
    }
    r.advance_to(ms(18));
    assert!(top_commits(&r).iter().all(|top| top == "-100px"));

    r.advance_to(ms(19));
    let commits: Vec<_> = top_commits(&r)
        .into_iter()
        .filter(|top| top != "-100px")
        .collect();
    assert_eq!(commits, vec!["387.5px".to_string()]);
    assert!(r.overlay().tracker().pending().is_none());
}

#[test]
fn scroll_reapplies_last_position_immediately() {
    let mut r = ruler();
    r.dispatch(toggle(true, None));
    r.handle_signal(Signal::PointerMove { y: 300.0 });
    r.advance_by(ms(10));
    r.surface_mut().clear_log();

    r.handle_signal(Signal::Scroll);
    assert_eq!(top_commits(&r), vec!["287.5px".to_string()]);

    r.handle_signal(Signal::Resize);
    assert_eq!(top_commits(&r).len(), 2);
}

#[test]
fn disable_cancels_pending_commit() {
    let mut r = ruler();
    r.dispatch(toggle(true, None));
    r.handle_signal(Signal::PointerMove { y: 300.0 });
    r.dispatch(toggle(false, None));
    r.surface_mut().clear_log();

    r.advance_by(ms(10));
    assert!(!r
        .surface()
        .log()
        .iter()
        .any(|m| matches!(m, Mutation::SetStyle { property, .. } if property == "top")));
}

#[test]
fn stale_signal_after_disable_is_ignored() {
    let mut r = ruler();
    r.dispatch(toggle(true, None));
    r.dispatch(toggle(false, None));
    r.surface_mut().clear_log();

    r.handle_signal(Signal::PointerMove { y: 10.0 });
    r.handle_signal(Signal::Scroll);
    r.advance_by(ms(10));

    assert!(r.overlay().tracker().pending().is_none());
    assert!(!r
        .surface()
        .log()
        .iter()
        .any(|m| matches!(m, Mutation::SetStyle { property, .. } if property == "top")));
}

// === Recolor ===

#[test]
fn recolor_restyles_in_place() {
    let mut r = ruler();
    r.dispatch(toggle(true, None));
    let band = r.overlay().band().unwrap();
    let listeners = r.surface().listeners_for(SignalKind::PointerMove);
    let appends = appended(&r);

    assert_eq!(
        r.dispatch(Command::UpdateRulerColor {
            color: "#4CAF50".to_string()
        }),
        Ack::ok()
    );

    assert_eq!(r.overlay().band(), Some(band));
    assert_eq!(r.surface().listeners_for(SignalKind::PointerMove), listeners);
    let subscriptions = r.overlay().tracker().subscriptions().unwrap();
    assert!(subscriptions
        .ids()
        .iter()
        .all(|id| r.surface().is_listening(*id)));
    assert_eq!(appended(&r), appends);
    assert_eq!(r.surface().style_of(band, "border-bottom"), Some("1px solid #4caf5080"));
    assert_eq!(r.surface().style_of(band, "box-shadow"), Some("0 0 10px #4caf5040"));
    assert!(r
        .surface()
        .style_of(band, "background")
        .unwrap()
        .contains("#4caf504d 80%"));
}

#[test]
fn recolor_while_disabled_only_stores() {
    let mut r = ruler();
    r.dispatch(Command::UpdateRulerColor {
        color: "#00f".to_string(),
    });
    assert!(r.surface().log().is_empty());
    assert_eq!(r.overlay().state().color.as_str(), "#0000ff");
    assert_eq!(
        r.drain_status(),
        vec![StatusEvent::RulerRecolored {
            color: RulerColor::parse("#0000ff").unwrap()
        }]
    );
}

#[test]
fn empty_color_enables_with_default() {
    let mut r = ruler();
    assert_eq!(r.dispatch(toggle(true, Some(""))), Ack::ok());
    assert!(r.overlay().is_active());
    assert_eq!(r.overlay().state().color, RulerColor::default());

    r.dispatch(toggle(false, None));
    assert_eq!(r.dispatch(toggle(true, Some("   "))), Ack::ok());
    assert_eq!(r.overlay().state().color, RulerColor::default());
}

#[test]
fn invalid_color_is_rejected() {
    let mut r = ruler();
    let ack = r.dispatch(toggle(true, Some("chartreuse")));
    assert!(!ack.success);
    assert!(ack.error.unwrap().contains("chartreuse"));
    assert!(r.surface().log().is_empty());
}

// === Notifications ===

#[test]
fn toast_timeline() {
    let mut r = ruler();
    r.notify("Hello", "world");
    let toast = r.notifier().live().next().unwrap().node;
    assert_eq!(r.surface().style_of(toast, "opacity"), Some("0"));

    r.advance_to(ms(10));
    assert_eq!(r.surface().style_of(toast, "opacity"), Some("1"));
    assert_eq!(r.surface().style_of(toast, "transform"), Some("translateX(0)"));

    r.advance_to(ms(2999));
    assert_eq!(r.surface().style_of(toast, "opacity"), Some("1"));
    r.advance_to(ms(3000));
    assert_eq!(r.surface().style_of(toast, "opacity"), Some("0"));
    assert!(r.surface().contains(toast));

    r.advance_to(ms(3299));
    assert!(r.surface().contains(toast));
    r.advance_to(ms(3300));
    assert!(!r.surface().contains(toast));
    assert!(r.notifier().is_empty());
}

#[test]
fn concurrent_toasts_are_independent() {
    let mut r = ruler();
    r.notify("first", "");
    r.advance_to(ms(1000));
    r.notify("second", "");

    r.advance_to(ms(3300));
    let titles: Vec<_> = r.notifier().live().map(|n| n.title.clone()).collect();
    assert_eq!(titles, vec!["second".to_string()]);

    r.advance_to(ms(4300));
    assert!(r.notifier().is_empty());
}

// === Preferences ===

#[test]
fn init_enables_from_preferences() {
    let prefs = MemoryPreferences::from_json_str(
        r##"{"dyslexiaRulerEnabled": true, "rulerColor": "#00ff00"}"##,
    )
    .unwrap();
    let mut r = ReadingRuler::new(RecordingSurface::new(), prefs, RulerConfig::default());
    r.init();

    assert!(r.overlay().is_active());
    assert_eq!(r.overlay().state().color.as_str(), "#00ff00");
}

#[test]
fn init_falls_back_to_default_color() {
    let prefs = MemoryPreferences::from_json_str(
        r#"{"dyslexiaRulerEnabled": true, "rulerColor": "sunshine"}"#,
    )
    .unwrap();
    let mut r = ReadingRuler::new(RecordingSurface::new(), prefs, RulerConfig::default());
    r.init();

    assert!(r.overlay().is_active());
    assert_eq!(r.overlay().state().color, RulerColor::default());
}

#[test]
fn init_stays_disabled_by_default() {
    let mut r = ruler();
    r.init();
    assert!(!r.overlay().is_active());
    assert!(r.surface().log().is_empty());
}

// === Restore ===

#[test]
fn restore_through_bus() {
    let mut prefs = MemoryPreferences::new();
    prefs.set_bool(PREF_RULER_ENABLED, true).unwrap();
    let mut r = ReadingRuler::new(RecordingSurface::new(), prefs, RulerConfig::default());
    r.init();
    r.surface_mut()
        .inject_node(NodeSpec::new("style").with_dom_id("neuro-focus-reading-style"));

    let bus = CommandBus::new();
    let ack = bus.sender().send(Command::RestorePage);
    r.pump(&bus);

    assert_eq!(ack.try_recv().unwrap(), Ack::ok());
    let status = bus.drain_status();
    assert_eq!(status.last(), Some(&StatusEvent::PageRestored));
    assert!(status.contains(&StatusEvent::RulerDisabled));

    assert!(!r.overlay().is_active());
    assert_eq!(r.surface().listener_count(), 0);
    assert!(r.surface().injected_nodes().is_empty());
    assert_eq!(r.prefs().get_bool(PREF_RULER_ENABLED).unwrap(), Some(false));
}

#[test]
fn restore_with_reload_policy() {
    let config = RulerConfig {
        restore_policy: RestorePolicy::Reload,
        ..RulerConfig::default()
    };
    let mut r = ruler_with(config);
    r.dispatch(toggle(true, None));
    r.dispatch(Command::RestorePage);

    assert_eq!(r.surface().reload_count(), 1);
    assert_eq!(r.surface().listener_count(), 0);
    // only the "restored" toast remains
    assert_eq!(r.notifier().len(), 1);
    assert_eq!(r.surface().node_count(), 1);
}

#[test]
fn restore_failure_is_reported() {
    let config = RulerConfig {
        restore_policy: RestorePolicy::Reload,
        ..RulerConfig::default()
    };
    let mut r = ruler_with(config);
    r.surface_mut()
        .fail_next_reload(SurfaceError::NotPermitted("reload"));

    assert_eq!(r.dispatch(Command::RestorePage), Ack::ok());
    assert!(matches!(
        r.drain_status().last(),
        Some(StatusEvent::RestoreFailed { .. })
    ));
    let last = r.notifier().live().last().unwrap();
    assert_eq!(last.title, MSG_RESTORE_FAILED_TITLE);
}

#[test]
fn shutdown_flushes_and_cleans() {
    let mut r = ruler();
    r.dispatch(toggle(true, None));
    r.handle_signal(Signal::PointerMove { y: 42.0 });
    let (surface, _prefs) = r.shutdown();
    assert_eq!(surface.node_count(), 0);
    assert_eq!(surface.listener_count(), 0);
}
