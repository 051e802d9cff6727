use super::*;
use js_sys::Promise;
use serde::Serialize;
use serde_wasm_bindgen::{from_value, Serializer};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

#[wasm_bindgen(inline_js = r#"
function transportError(message) {
  return new Error(message);
}

function nativeModule(name) {
  const registries = [globalThis.NativeModules, globalThis.__DYNALINKS_NATIVE_MODULES__];
  for (const registry of registries) {
    if (registry && registry[name]) {
      return registry[name];
    }
  }
  throw transportError(
    `Dynalinks native module '${name}' is not linked. Rebuild the app after installing the native SDK.`
  );
}

async function call(name, method, args) {
  const mod = nativeModule(name);
  if (typeof mod[method] !== 'function') {
    throw transportError(`Dynalinks native module '${name}' has no method '${method}'`);
  }
  return await mod[method](...args);
}

export async function jsNativeConfigure(name, config) { await call(name, 'configure', [config]); return null; }
export async function jsNativeCheckForDeferredDeepLink(name) { return await call(name, 'checkForDeferredDeepLink', []); }
export async function jsNativeResolveLink(name, url) { return await call(name, 'resolveLink', [url]); }
"#)]
extern "C" {
    #[wasm_bindgen(js_name = jsNativeConfigure)]
    fn js_native_configure(module: &str, config: JsValue) -> Promise;
    #[wasm_bindgen(js_name = jsNativeCheckForDeferredDeepLink)]
    fn js_native_check_for_deferred_deep_link(module: &str) -> Promise;
    #[wasm_bindgen(js_name = jsNativeResolveLink)]
    fn js_native_resolve_link(module: &str, url: &str) -> Promise;
}

async fn await_promise(promise: Promise) -> Result<JsValue, NativeError> {
    JsFuture::from(promise).await.map_err(js_error_to_native)
}

fn string_property(value: &JsValue, key: &str) -> Option<String> {
    js_sys::Reflect::get(value, &JsValue::from_str(key))
        .ok()
        .and_then(|prop| prop.as_string())
}

fn js_error_to_native(err: JsValue) -> NativeError {
    if let Some(text) = err.as_string() {
        return NativeError::transport(text);
    }
    if err.is_object() {
        return NativeError {
            code: string_property(&err, "code"),
            message: string_property(&err, "message"),
        };
    }
    NativeError::transport(format!("{err:?}"))
}

async fn promise_to_payload(promise: Promise) -> Result<Value, NativeError> {
    let value = await_promise(promise).await?;
    if value.is_null() || value.is_undefined() {
        return Ok(Value::Null);
    }
    from_value(value).map_err(|e| NativeError::new("INVALID_RESPONSE", e.to_string()))
}

pub async fn native_configure(module: &str, config: &NativeConfig) -> Result<(), NativeError> {
    let value = config
        .serialize(&Serializer::json_compatible())
        .map_err(|e| NativeError::transport(e.to_string()))?;
    await_promise(js_native_configure(module, value)).await?;
    Ok(())
}

pub async fn native_check_for_deferred_deep_link(module: &str) -> Result<Value, NativeError> {
    promise_to_payload(js_native_check_for_deferred_deep_link(module)).await
}

pub async fn native_resolve_link(module: &str, url: &str) -> Result<Value, NativeError> {
    promise_to_payload(js_native_resolve_link(module, url)).await
}

#[cfg(test)]
mod tests {
    use dynalinks_host::{normalize_native_result, DeepLinkResult, ErrorCode};
    use wasm_bindgen_test::*;

    use super::*;

    const TEST_MODULE: &str = "DynalinksTestModule";

    fn install_test_module() {
        js_sys::eval(
            r#"
globalThis.__DYNALINKS_NATIVE_MODULES__ = {
  DynalinksTestModule: {
    configure: async () => undefined,
    checkForDeferredDeepLink: async () => null,
    resolveLink: async () => { throw { code: 'INVALID_INTENT', message: 'Intent has no data' }; },
  },
};
"#,
        )
        .expect("install native module");
    }

    #[wasm_bindgen_test]
    async fn coded_rejection_object_normalizes_through_the_table() {
        install_test_module();

        let err = native_resolve_link(TEST_MODULE, "myapp://nowhere")
            .await
            .expect_err("resolve should reject");

        assert_eq!(err.code.as_deref(), Some("INVALID_INTENT"));
        let normalized = err.normalize();
        assert_eq!(normalized.code(), ErrorCode::InvalidUrl);
        assert_eq!(normalized.message(), "Intent has no data");
    }

    #[wasm_bindgen_test]
    async fn string_rejection_normalizes_to_unknown() {
        let err = await_promise(Promise::reject(&JsValue::from_str("bridge crashed")))
            .await
            .expect_err("promise should reject");

        assert_eq!(err, NativeError::transport("bridge crashed"));
        let normalized = err.normalize();
        assert_eq!(normalized.code(), ErrorCode::Unknown);
        assert_eq!(normalized.message(), "bridge crashed");
    }

    #[wasm_bindgen_test]
    async fn null_payload_normalizes_to_unmatched() {
        install_test_module();

        let raw = native_check_for_deferred_deep_link(TEST_MODULE)
            .await
            .expect("check should resolve");

        assert_eq!(raw, Value::Null);
        assert_eq!(normalize_native_result(&raw, true), DeepLinkResult::unmatched(true));
    }

    #[wasm_bindgen_test]
    async fn unlinked_module_rejects_without_a_code() {
        let err = native_check_for_deferred_deep_link("DynalinksMissingModule")
            .await
            .expect_err("missing module should reject");

        assert_eq!(err.code, None);
        assert!(err
            .message
            .as_deref()
            .is_some_and(|message| message.contains("is not linked")));
        assert_eq!(err.normalize().code(), ErrorCode::Unknown);
    }

    #[wasm_bindgen_test]
    async fn configure_resolves_with_unit() {
        install_test_module();
        let config = dynalinks_host::Configuration::new("k")
            .validate()
            .expect("valid config");

        native_configure(TEST_MODULE, &config)
            .await
            .expect("configure should resolve");
    }
}
