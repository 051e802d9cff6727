use super::*;

fn unsupported() -> NativeError {
    NativeError::transport("Dynalinks native modules are only available when compiled for wasm32")
}

pub async fn native_configure(_module: &str, _config: &NativeConfig) -> Result<(), NativeError> {
    Err(unsupported())
}

pub async fn native_check_for_deferred_deep_link(_module: &str) -> Result<Value, NativeError> {
    Err(unsupported())
}

pub async fn native_resolve_link(_module: &str, _url: &str) -> Result<Value, NativeError> {
    Err(unsupported())
}
