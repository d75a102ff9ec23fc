#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (&str, &str)| {
    let (pattern, input) = data;
    if let Ok(parsed) = rubytime::strptime(pattern, input) {
        let _ = parsed.to_hash();
        let _ = rubytime::Resolver::utc().resolve(&parsed);
    }
});
