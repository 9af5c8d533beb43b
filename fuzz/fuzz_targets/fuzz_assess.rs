#![no_main]
use libfuzzer_sys::fuzz_target;

use casegate_core::usecase::UseCase;
use casegate_engine::assess::Assessor;

fuzz_target!(|data: &[u8]| {
    if let Ok(uc) = serde_json::from_slice::<UseCase>(data) {
        let assessor = Assessor::default();
        let _ = assessor.assess(&uc);
        let _ = assessor.governance(&uc);
    }
});
