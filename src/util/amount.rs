/// Amount resolution for provider payloads
///
/// Helius reports token quantities in several shapes depending on the
/// endpoint: a human-readable string, a float, a bare number or a raw
/// integer plus decimals. Everything here works on `serde_json::Value`
/// so malformed or missing fields degrade to `None` instead of failing
/// the request.

use serde_json::Value;

/// Coerce a JSON scalar into a finite number.
///
/// Numbers pass through, numeric strings are parsed. Anything else
/// (null, objects, arrays, booleans, garbage strings) yields `None`.
pub fn coerce_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Resolve the amount carried by a single `tokenTransfers` entry.
///
/// Representations are tried in order: `tokenAmount.uiAmountString`,
/// `tokenAmount.uiAmount`, `tokenAmount` itself, then `amount`. The first
/// one present wins; if it is not numeric the amount is unknown.
pub fn resolve_token_amount(transfer: &Value) -> Option<f64> {
    let token_amount = transfer.get("tokenAmount");
    let candidates = [
        token_amount.and_then(|t| t.get("uiAmountString")),
        token_amount.and_then(|t| t.get("uiAmount")),
        token_amount,
        transfer.get("amount"),
    ];

    candidates
        .into_iter()
        .flatten()
        .find(|v| !v.is_null())
        .and_then(coerce_number)
}

/// Resolve a `getTokenSupply` result into a UI amount.
///
/// Prefers `value.uiAmount`, then `value.uiAmountString`, then
/// `value.amount / 10^value.decimals`. Unresolvable supplies are 0.
pub fn resolve_supply_amount(result: &Value) -> f64 {
    let value = result.get("value");
    let field = |name: &str| value.and_then(|v| v.get(name)).filter(|v| !v.is_null());

    if let Some(ui_amount) = field("uiAmount") {
        return coerce_number(ui_amount).unwrap_or(0.0);
    }
    if let Some(ui_string) = field("uiAmountString") {
        return coerce_number(ui_string).unwrap_or(0.0);
    }

    let amount = field("amount").and_then(coerce_number).unwrap_or(0.0);
    let decimals = field("decimals").and_then(coerce_number).unwrap_or(0.0);
    if decimals == 0.0 {
        return amount;
    }

    let scaled = amount / 10f64.powf(decimals);
    if scaled.is_finite() { scaled } else { 0.0 }
}
