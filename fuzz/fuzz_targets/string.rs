#![no_main]

mod mock;

use libfuzzer_sys::fuzz_target;
use mock::MockTime;

fuzz_target!(|data: (MockTime<'_>, &str)| {
    let (time, format) = data;
    let _ = rubytime::string::strftime(&time, format);
});
