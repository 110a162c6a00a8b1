use super::*;
use crate::frame::WindowId;
use crate::sandbox::Files;
use serde_json::json;

// ========================================================================
// Messages
// ========================================================================

#[test]
fn test_inbound_initialized() {
    let message = InboundMessage::from_value(&json!({ "type": "initialized" }));
    assert_eq!(message, InboundMessage::Initialized);
    assert_eq!(message.kind(), Some("initialized"));
}

#[test]
fn test_inbound_unknown_kinds_are_ignored() {
    let message = InboundMessage::from_value(&json!({ "type": "done", "compilatonError": false }));
    assert_eq!(
        message,
        InboundMessage::Ignored {
            kind: Some("done".to_string())
        }
    );

    let untyped = InboundMessage::from_value(&json!({ "kind": "initialized" }));
    assert_eq!(untyped, InboundMessage::Ignored { kind: None });
    assert_eq!(untyped.kind(), None);

    let non_string = InboundMessage::from_value(&json!({ "type": 1 }));
    assert_eq!(non_string, InboundMessage::Ignored { kind: None });
}

#[test]
fn test_module_set_is_path_bijection() {
    let files: Files = [
        ("/index.js", "import './a'"),
        ("/a.js", "export const a = '\u{e9}\n\t';"),
        ("/package.json", "{}"),
    ]
    .iter()
    .map(|(p, c)| (p.to_string(), c.to_string()))
    .collect();

    let modules = module_set(&files);

    assert_eq!(modules.len(), files.len());
    for (path, code) in &files {
        let module = &modules[path];
        assert_eq!(&module.code, code);
        assert_eq!(&module.path, path);
    }
}

#[test]
fn test_compile_command_wire_shape() {
    let files: Files = [("/index.js".to_string(), "console.log(1)".to_string())]
        .into_iter()
        .collect();
    let command = CompileCommand::new(module_set(&files), "parcel", true);

    let value = OutboundMessage::Compile(command).to_value().unwrap();

    assert_eq!(
        value,
        json!({
            "type": "compile",
            "codesandbox": true,
            "version": 3,
            "modules": {
                "/index.js": { "code": "console.log(1)", "path": "/index.js" }
            },
            "externalResources": [],
            "template": "parcel",
            "showOpenInCodeSandbox": true,
            "skipEval": true
        })
    );
}

#[test]
fn test_outbound_decodes_back() {
    let command = CompileCommand::new(ModuleSet::new(), "vue-cli", false);
    let value = OutboundMessage::Compile(command.clone()).to_value().unwrap();

    let decoded: OutboundMessage = serde_json::from_value(value).unwrap();
    assert_eq!(decoded, OutboundMessage::Compile(command));
}

// ========================================================================
// Bus
// ========================================================================

#[test]
fn test_bus_delivers_in_order_to_every_subscriber() {
    let bus = MessageBus::new();
    let first = bus.subscribe();
    let second = bus.subscribe();

    assert_eq!(bus.post(json!({ "type": "a" })), 2);
    assert_eq!(bus.post(json!({ "type": "b" })), 2);

    for subscription in [&first, &second] {
        assert_eq!(subscription.try_next().unwrap()["type"], "a");
        assert_eq!(subscription.try_next().unwrap()["type"], "b");
        assert!(subscription.try_next().is_none());
    }
}

#[test]
fn test_bus_subscription_ids_are_unique() {
    let bus = MessageBus::new();
    let first = bus.subscribe();
    let second = bus.subscribe();
    assert_ne!(first.id(), second.id());
}

#[test]
fn test_dropping_subscription_unsubscribes() {
    let bus = MessageBus::new();
    let kept = bus.subscribe();
    let dropped = bus.subscribe();
    assert_eq!(bus.subscriber_count(), 2);

    dropped.unsubscribe();
    assert_eq!(bus.subscriber_count(), 1);
    assert_eq!(bus.post(json!({ "type": "initialized" })), 1);
    assert!(kept.try_next().is_some());
}

#[test]
fn test_subscription_outliving_bus() {
    let bus = MessageBus::new();
    let subscription = bus.subscribe();
    bus.post(json!({ "type": "initialized" }));
    drop(bus);

    assert!(subscription.try_next().is_some());
    drop(subscription);
}

#[test]
fn test_bus_clones_share_subscribers() {
    let bus = MessageBus::new();
    let clone = bus.clone();
    let subscription = bus.subscribe();

    clone.post(json!({ "type": "initialized" }));
    assert!(subscription.try_next().is_some());
}

// ========================================================================
// Transport
// ========================================================================

#[test]
fn test_memory_transport_records_per_window() {
    let mut transport = MemoryTransport::new();
    let log = transport.clone();
    assert!(log.is_empty());

    transport.post_message(WindowId::new(1), json!({ "n": 1 }));
    transport.post_message(WindowId::new(2), json!({ "n": 2 }));
    transport.post_message(WindowId::new(1), json!({ "n": 3 }));

    assert_eq!(log.len(), 3);
    assert_eq!(
        log.messages_for(WindowId::new(1)),
        vec![json!({ "n": 1 }), json!({ "n": 3 })]
    );
    assert_eq!(log.sent()[1].0, WindowId::new(2));
}
