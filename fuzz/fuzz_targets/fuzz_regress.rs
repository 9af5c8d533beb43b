#![no_main]
use libfuzzer_sys::fuzz_target;

use casegate_core::usecase::UseCase;
use casegate_engine::enforcement::regression::check_governance_regression;

fuzz_target!(|data: &[u8]| {
    // Split input into two halves: current record and proposed updates.
    let mid = data.len() / 2;
    let (left, right) = data.split_at(mid);
    if let (Ok(uc), Ok(serde_json::Value::Object(updates))) = (
        serde_json::from_slice::<UseCase>(left),
        serde_json::from_slice::<serde_json::Value>(right),
    ) {
        let _ = check_governance_regression(&uc, &updates);
    }
});
