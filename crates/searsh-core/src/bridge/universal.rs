// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The universal prototype shared by every script object.

use serde_json::Value;

use crate::script::{ObjectRef, PropertySource, ScriptError, ScriptObject, ScriptValue};

/// Builds the prototype at the root of every object's chain.
///
/// Deny-list policy: completion hides `equals`, `hash`, and `type` by
/// default and keeps `toString`, `inspect`, and `keys` visible — the
/// three an operator actually reaches for.
pub(crate) fn universal_prototype() -> ObjectRef {
    let mut proto = ScriptObject::new();

    proto.define_method("toString", &[], |receiver, _| {
        Ok(ScriptValue::Str(receiver.render_compact().into()))
    });

    proto.define_method("inspect", &[], |receiver, _| {
        let rendered = serde_json::to_string_pretty(&receiver.to_json())
            .unwrap_or_else(|_| receiver.render_compact());
        Ok(ScriptValue::Str(rendered.into()))
    });

    proto.define_method("keys", &[], |receiver, _| {
        let keys: Vec<Value> = receiver
            .property_keys()
            .into_iter()
            .map(|key| Value::String(key.to_string()))
            .collect();
        Ok(ScriptValue::Json(Value::Array(keys)))
    });

    proto.define_method("type", &[], |receiver, _| {
        Ok(ScriptValue::Str(receiver.type_name().into()))
    });

    proto.define_method("equals", &[], |receiver, args| {
        let other = args.first().ok_or(ScriptError::MissingArgument {
            method: "equals".into(),
            index: 0,
            expected: "a value to compare against",
        })?;
        Ok(ScriptValue::Bool(receiver.to_json() == other.to_json()))
    });

    proto.define_method("hash", &[], |receiver, _| {
        Ok(ScriptValue::Int(receiver.render_hash()))
    });

    proto.into_ref()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object_with_proto() -> ScriptValue {
        let proto = universal_prototype();
        let mut obj = ScriptObject::with_prototype(&proto);
        obj.set("a", ScriptValue::Int(1));
        ScriptValue::Object(obj.into_ref())
    }

    fn call(value: &ScriptValue, method: &str, args: &[ScriptValue]) -> ScriptValue {
        let Some(ScriptValue::Method(m)) = value.lookup(method) else {
            panic!("{method} should resolve through the prototype");
        };
        m.invoke(value, args).expect("universal method should succeed")
    }

    #[test]
    fn to_string_renders_compact_json() {
        let value = object_with_proto();
        let ScriptValue::Str(text) = call(&value, "toString", &[]) else {
            panic!("toString should return a string");
        };
        assert_eq!(text, r#"{"a":1}"#);
    }

    #[test]
    fn keys_lists_own_properties() {
        let value = object_with_proto();
        let ScriptValue::Json(Value::Array(keys)) = call(&value, "keys", &[]) else {
            panic!("keys should return an array");
        };
        assert_eq!(keys, vec![Value::String("a".to_string())]);
    }

    #[test]
    fn equals_compares_rendered_values() {
        let a = object_with_proto();
        let b = object_with_proto();
        let ScriptValue::Bool(equal) = call(&a, "equals", &[b]) else {
            panic!("equals should return a boolean");
        };
        assert!(equal);
    }

    #[test]
    fn hash_matches_for_equal_values() {
        let a = object_with_proto();
        let b = object_with_proto();
        let (ScriptValue::Int(ha), ScriptValue::Int(hb)) =
            (call(&a, "hash", &[]), call(&b, "hash", &[]))
        else {
            panic!("hash should return an integer");
        };
        assert_eq!(ha, hb);
    }
}
